//! WebSocket stages.

use crate::common::stage::{register_stage, StageOptions};
use crate::common::{Api, ApiMapping, ApiMappingProps};
use crate::construct::{Stack, StringValue, Token};
use crate::errors::Result;
use crate::websocket::WebSocketApi;

/// A named deployment slot of a WebSocket API.
#[derive(Debug, Clone)]
pub struct WebSocketStage {
    stage_name: String,
    api_id: Token,
}

impl WebSocketStage {
    pub fn new(
        stack: &mut Stack,
        api: &WebSocketApi,
        id: &str,
        options: StageOptions,
    ) -> Result<Self> {
        let stage_name = options.stage_name.unwrap_or_else(|| "$default".to_string());
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
        Ok(Self { stage_name, api_id: api.api_id() })
    }

    pub fn stage_name(&self) -> &str {
        &self.stage_name
    }

    /// The `wss://` URL clients connect to.
    pub fn url(&self) -> StringValue {
        self.endpoint_with_scheme("wss://")
    }

    /// The `https://` management URL used to post messages back onto open
    /// connections.
    pub fn callback_url(&self) -> StringValue {
        self.endpoint_with_scheme("https://")
    }

    fn endpoint_with_scheme(&self, scheme: &str) -> StringValue {
        StringValue::join([
            scheme.into(),
            self.api_id.clone().into(),
            ".execute-api.".into(),
            Token::region().into(),
            ".amazonaws.com/".into(),
            self.stage_name.clone().into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::WebSocketApiProps;

    #[test]
    fn urls_carry_the_stage_name() {
        let mut stack = Stack::new("Demo").unwrap();
        let api = WebSocketApi::new(&mut stack, "Chat", WebSocketApiProps::default()).unwrap();
        let stage = api
            .add_stage(
                &mut stack,
                "Dev",
                StageOptions { stage_name: Some("dev".into()), ..Default::default() },
            )
            .unwrap();
        assert!(stage.url().canonical().starts_with("wss://"));
        assert!(stage.url().canonical().ends_with("/dev"));
        assert!(stage.callback_url().canonical().starts_with("https://"));
        assert!(stage.callback_url().canonical().ends_with("/dev"));
    }
}
