//! Custom domain names and their stage mappings.
//!
//! A [`DomainName`] owns the registry of mappings created against it; the
//! single-root-mapping invariant is checked there at construction time, so
//! creating mappings in different orders may surface different (equally
//! valid) errors.

use tracing::debug;

use crate::cfn::apigatewayv2::{CfnApiMapping, CfnDomainName, DomainNameConfiguration};
use crate::cfn::CfnResource;
use crate::common::Api;
use crate::construct::{Stack, StringValue, Token};
use crate::errors::{Error, Result};

/// Mutable per-domain state: the mapping registry.
#[derive(Debug, Default)]
pub(crate) struct DomainState {
    pub(crate) name: String,
    /// Mapping keys created against this domain; `None` is the root mapping.
    pub(crate) mapping_keys: Vec<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct DomainNameProps {
    /// The custom DNS name, e.g. `api.example.com`
    pub domain_name: String,
    /// ARN of the TLS certificate fronting the domain
    pub certificate_arn: StringValue,
}

/// A custom DNS name plus TLS certificate that fronts one or more stages.
/// May be shared across multiple APIs.
#[derive(Debug, Clone)]
pub struct DomainName {
    index: usize,
    name: String,
    regional_domain_name: Token,
    regional_hosted_zone_id: Token,
}

impl DomainName {
    pub fn new(stack: &mut Stack, id: &str, props: DomainNameProps) -> Result<Self> {
        let path = format!("{}/{}", stack.name(), id);
        if props.domain_name.is_empty() || props.domain_name.contains(char::is_whitespace) {
            return Err(Error::invalid_input_at(
                path,
                format!("'{}' is not a valid domain name", props.domain_name),
            ));
        }

        let resource = CfnResource::DomainName(CfnDomainName {
            domain_name: props.domain_name.clone().into(),
            domain_name_configurations: Some(vec![DomainNameConfiguration {
                certificate_arn: Some(props.certificate_arn),
                endpoint_type: Some("REGIONAL".to_string()),
            }]),
        });
        let logical_id = stack.add_resource(&path, resource)?;

        stack.domains.push(DomainState {
            name: props.domain_name.clone(),
            mapping_keys: Vec::new(),
        });
        Ok(Self {
            index: stack.domains.len() - 1,
            name: props.domain_name,
            regional_domain_name: Token::get_att(logical_id.clone(), "RegionalDomainName"),
            regional_hosted_zone_id: Token::get_att(logical_id, "RegionalHostedZoneId"),
        })
    }

    /// The configured DNS name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deferred regional DNS target for aliasing.
    pub fn regional_domain_name(&self) -> Token {
        self.regional_domain_name.clone()
    }

    /// Deferred hosted-zone id of the regional endpoint.
    pub fn regional_hosted_zone_id(&self) -> Token {
        self.regional_hosted_zone_id.clone()
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
pub struct ApiMappingProps {
    pub domain_name: DomainName,
    /// Stage to map; defaults to the api's default stage
    pub stage: Option<String>,
    /// Path prefix under the domain; omit for the root mapping
    pub api_mapping_key: Option<String>,
}

/// A binding of (DomainName, mappingKey) to a specific stage of a specific
/// api. On any one domain, at most one mapping may omit its key, and once
/// any mapping carries a key, every mapping must.
#[derive(Debug, Clone)]
pub struct ApiMapping {
    logical_id: String,
}

impl ApiMapping {
    pub fn new(stack: &mut Stack, id: &str, api: &dyn Api, props: ApiMappingProps) -> Result<Self> {
        let path = format!("{}/{}", stack.name(), id);
        Self::create(stack, &path, api, props)
    }

    pub(crate) fn create(
        stack: &mut Stack,
        path: &str,
        api: &dyn Api,
        props: ApiMappingProps,
    ) -> Result<Self> {
        let stage_name = match props.stage {
            Some(name) => name,
            None => api.default_stage_name().ok_or_else(|| {
                Error::invalid_input_at(
                    path,
                    "no stage given and the api has no default stage to map",
                )
            })?,
        };
        if !stack.apis[api.state_index()].stage_names.contains(&stage_name) {
            return Err(Error::invariant_at(
                path,
                format!("api '{}' has no stage named '{}'", api.construct_path(), stage_name),
            ));
        }
        if let Some(key) = &props.api_mapping_key {
            if key.is_empty() {
                return Err(Error::invalid_input_at(
                    path,
                    "mapping key must not be the empty string; omit it for the root mapping",
                ));
            }
        }

        let domain = &mut stack.domains[props.domain_name.index()];
        match &props.api_mapping_key {
            None if domain.mapping_keys.contains(&None) => {
                return Err(Error::invariant_at(
                    path,
                    format!("domain '{}' already has a root mapping", domain.name),
                ));
            }
            None if !domain.mapping_keys.is_empty() => {
                return Err(Error::invariant_at(
                    path,
                    format!(
                        "domain '{}' has keyed mappings; every mapping must carry a key",
                        domain.name
                    ),
                ));
            }
            Some(_) if domain.mapping_keys.contains(&None) => {
                return Err(Error::invariant_at(
                    path,
                    format!(
                        "domain '{}' has a root mapping; a keyed mapping cannot coexist with it",
                        domain.name
                    ),
                ));
            }
            Some(key) if domain.mapping_keys.contains(&Some(key.clone())) => {
                return Err(Error::invariant_at(
                    path,
                    format!("domain '{}' already maps key '{}'", domain.name, key),
                ));
            }
            _ => {}
        }
        domain.mapping_keys.push(props.api_mapping_key.clone());

        let resource = CfnResource::ApiMapping(CfnApiMapping {
            api_id: api.api_id().into(),
            domain_name: props.domain_name.name().into(),
            stage: stage_name.clone().into(),
            api_mapping_key: props.api_mapping_key,
        });
        let logical_id = stack.add_resource(path, resource)?;
        debug!(construct_path = path, stage = %stage_name, "created api mapping");
        Ok(Self { logical_id })
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_name_emits_regional_configuration() {
        let mut stack = Stack::new("Demo").unwrap();
        let domain = DomainName::new(
            &mut stack,
            "Domain",
            DomainNameProps {
                domain_name: "api.example.com".into(),
                certificate_arn: "arn:aws:acm:us-east-1:111:certificate/abc".into(),
            },
        )
        .unwrap();
        assert_eq!(domain.name(), "api.example.com");

        let template = stack.synth().unwrap();
        let domains = template.of_type("AWS::ApiGatewayV2::DomainName");
        assert_eq!(domains.len(), 1);
        let props = &domains[0].1["Properties"];
        assert_eq!(props["DomainName"], "api.example.com");
        assert_eq!(props["DomainNameConfigurations"][0]["EndpointType"], "REGIONAL");
    }

    #[test]
    fn invalid_domain_name_is_rejected() {
        let mut stack = Stack::new("Demo").unwrap();
        let err = DomainName::new(
            &mut stack,
            "Domain",
            DomainNameProps { domain_name: "bad domain".into(), certificate_arn: "arn".into() },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }
}
