//! # Construct tree and synthesis
//!
//! The minimal host-framework seam the high-level layer consumes: a scoped
//! construct tree rooted at a [`Stack`], deferred [`Token`] values for
//! cross-resource references, and resource registration that records every
//! emitted Cfn record in creation order. `Stack::synth` freezes the graph
//! and emits the CloudFormation template fragment.
//!
//! Graph construction is single-threaded, synchronous and free of I/O; every
//! failure surfaces at the call site that caused it.

mod token;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::cfn::apigatewayv2::CfnVpcLink;
use crate::cfn::CfnResource;
use crate::common::domain_name::DomainState;
use crate::common::vpc_link::VpcLinkState;
use crate::errors::{Error, Result};
use crate::http::authorizer::AuthorizerState;

pub use token::{StringValue, Token};

/// Mutable state of one Api aggregate.
///
/// The route-key set, the per-api integration cache and the stage-name set
/// are the only cross-object state an api owns; they are mutated exclusively
/// through the owning aggregate's public operations.
#[derive(Debug, Default)]
pub(crate) struct ApiState {
    pub(crate) route_keys: BTreeSet<String>,
    /// Canonical integration config rendering -> integration id token.
    /// First insertion wins; the deduped resource's id derives from the
    /// first route that caused it.
    pub(crate) integrations: BTreeMap<String, Token>,
    pub(crate) stage_names: BTreeSet<String>,
}

struct ResourceEntry {
    logical_id: String,
    construct_path: String,
    resource: CfnResource,
}

/// Root of the construct tree. Owns every aggregate created under it and
/// emits the template fragment at synthesis.
pub struct Stack {
    name: String,
    resources: Vec<ResourceEntry>,
    used_paths: BTreeSet<String>,
    pub(crate) apis: Vec<ApiState>,
    pub(crate) authorizers: Vec<AuthorizerState>,
    pub(crate) domains: Vec<DomainState>,
    pub(crate) vpc_links: Vec<VpcLinkState>,
    synthesized: bool,
}

impl Stack {
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_input("stack name must not be empty"));
        }
        if name.contains('/') {
            return Err(Error::invalid_input(format!(
                "stack name '{}' must not contain '/'",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            resources: Vec::new(),
            used_paths: BTreeSet::new(),
            apis: Vec::new(),
            authorizers: Vec::new(),
            domains: Vec::new(),
            vpc_links: Vec::new(),
            synthesized: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `synth` has already frozen the graph.
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// Register a mechanical Cfn record under the stack root and return the
    /// `Ref` token for it. This is the entry point for resource types that
    /// carry no high-level layer (e.g. the Pinpoint Email records).
    pub fn add_cfn_resource(&mut self, id: &str, resource: CfnResource) -> Result<Token> {
        let path = format!("{}/{}", self.name, id);
        let logical_id = self.add_resource(&path, resource)?;
        Ok(Token::reference(logical_id))
    }

    /// Register a resource at an explicit scoped path. Returns the logical id.
    pub(crate) fn add_resource(&mut self, construct_path: &str, resource: CfnResource) -> Result<String> {
        self.reserve_path(construct_path)?;
        let logical_id = self.logical_id(construct_path);
        debug!(
            construct_path,
            logical_id = %logical_id,
            resource_type = resource.resource_type(),
            "registered resource"
        );
        self.resources.push(ResourceEntry {
            logical_id: logical_id.clone(),
            construct_path: construct_path.to_string(),
            resource,
        });
        Ok(logical_id)
    }

    /// Claim a scoped path without emitting a resource yet. Used by
    /// constructs whose Cfn record materializes at synthesis.
    pub(crate) fn reserve_path(&mut self, construct_path: &str) -> Result<()> {
        if self.synthesized {
            return Err(Error::invariant_at(
                construct_path,
                "graph is frozen: the stack has already been synthesized",
            ));
        }
        if !self.used_paths.insert(construct_path.to_string()) {
            return Err(Error::invalid_input_at(
                construct_path,
                "a construct with this scoped id already exists",
            ));
        }
        Ok(())
    }

    pub(crate) fn resource_mut(&mut self, logical_id: &str) -> Option<&mut CfnResource> {
        self.resources
            .iter_mut()
            .find(|entry| entry.logical_id == logical_id)
            .map(|entry| &mut entry.resource)
    }

    /// Scoped-path -> logical-id derivation: path components below the stack
    /// root, stripped to alphanumerics, plus a digest suffix that keeps
    /// distinct paths distinct.
    pub(crate) fn logical_id(&self, construct_path: &str) -> String {
        let human: String = construct_path
            .split('/')
            .skip(1)
            .collect::<Vec<_>>()
            .join("")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let mut human = human;
        human.truncate(240);
        format!("{}{}", human, short_digest(construct_path))
    }

    pub(crate) fn register_api(&mut self, state: ApiState) -> usize {
        self.apis.push(state);
        self.apis.len() - 1
    }

    /// Freeze the graph and emit the template fragment. Deferred collectors
    /// (the VpcLink subnet and security-group sets) are materialized first;
    /// any mutation after this call is an invariant violation.
    pub fn synth(&mut self) -> Result<Template> {
        if self.synthesized {
            return Err(Error::invariant("stack has already been synthesized"));
        }
        for index in 0..self.vpc_links.len() {
            let state = &self.vpc_links[index];
            if state.subnet_ids.is_empty() {
                return Err(Error::invariant_at(
                    state.path.clone(),
                    "vpc link has an empty subnet set",
                ));
            }
            let resource = CfnResource::VpcLink(CfnVpcLink {
                name: state.name.clone(),
                subnet_ids: state.subnet_ids.clone(),
                security_group_ids: if state.security_group_ids.is_empty() {
                    None
                } else {
                    Some(state.security_group_ids.clone())
                },
            });
            let entry = ResourceEntry {
                logical_id: state.logical_id.clone(),
                construct_path: state.path.clone(),
                resource,
            };
            debug!(
                construct_path = %entry.construct_path,
                logical_id = %entry.logical_id,
                "materialized vpc link"
            );
            self.resources.push(entry);
        }
        self.synthesized = true;

        let mut resources = BTreeMap::new();
        for entry in &self.resources {
            let value = serde_json::to_value(&entry.resource).map_err(|source| {
                Error::Serialization {
                    source,
                    context: format!("failed to serialize '{}'", entry.construct_path),
                }
            })?;
            resources.insert(entry.logical_id.clone(), value);
        }
        info!(stack = %self.name, resource_count = resources.len(), "synthesized stack");
        Ok(Template { resources })
    }
}

fn short_digest(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode_upper(&digest[..4])
}

/// Stable digest of a canonical record rendering; used to key deduplicated
/// resources inside one synthesis pass.
pub(crate) fn config_digest(canonical: &str) -> String {
    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode_upper(&digest[..4])
}

/// The emitted CloudFormation template fragment: a map of logical ids to
/// `{"Type", "Properties"}` records.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, serde_json::Value>,
}

impl Template {
    pub fn resources(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.resources
    }

    pub fn get(&self, logical_id: &str) -> Option<&serde_json::Value> {
        self.resources.get(logical_id)
    }

    /// All resources of one CloudFormation type, in logical-id order.
    pub fn of_type(&self, resource_type: &str) -> Vec<(&str, &serde_json::Value)> {
        self.resources
            .iter()
            .filter(|(_, value)| value["Type"] == resource_type)
            .map(|(id, value)| (id.as_str(), value))
            .collect()
    }
}
