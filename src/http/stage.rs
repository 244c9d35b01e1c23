//! HTTP stages.

use crate::common::stage::{register_stage, StageOptions};
use crate::common::{Api, ApiMapping, ApiMappingProps};
use crate::construct::{Stack, StringValue, Token};
use crate::errors::Result;
use crate::http::HttpApi;

pub(crate) const DEFAULT_STAGE_NAME: &str = "$default";

/// A named deployment slot of an HTTP API, optionally bound to a custom
/// domain through an ApiMapping.
#[derive(Debug, Clone)]
pub struct HttpStage {
    stage_name: String,
    api_endpoint: Token,
}

impl HttpStage {
    pub fn new(stack: &mut Stack, api: &HttpApi, id: &str, options: StageOptions) -> Result<Self> {
        let stage_name = options.stage_name.unwrap_or_else(|| DEFAULT_STAGE_NAME.to_string());
        let path = register_stage(stack, api, id, &stage_name, options.auto_deploy)?;
        if let Some(mapping) = options.domain_mapping {
            ApiMapping::create(
                stack,
                &format!("{}/ApiMapping", path),
                api,
                ApiMappingProps {
                    domain_name: mapping.domain_name,
                    stage: Some(stage_name.clone()),
                    api_mapping_key: mapping.mapping_key,
                },
            )?;
        }
        Ok(Self { stage_name, api_endpoint: api.api_endpoint() })
    }

    pub fn stage_name(&self) -> &str {
        &self.stage_name
    }

    /// The stage URL: `https://{apiEndpoint}/` for `$default`, otherwise
    /// `https://{apiEndpoint}/{stageName}`.
    pub fn url(&self) -> StringValue {
        if self.stage_name == DEFAULT_STAGE_NAME {
            StringValue::join([
                "https://".into(),
                self.api_endpoint.clone().into(),
                "/".into(),
            ])
        } else {
            StringValue::join([
                "https://".into(),
                self.api_endpoint.clone().into(),
                "/".into(),
                self.stage_name.clone().into(),
            ])
        }
    }
}
