//! WebSocket route materialization.
//!
//! Mirrors the HTTP route flow: bind the integration, reuse or create the
//! Cfn Integration through the api's dedup cache, then emit the Cfn Route.
//! WebSocket keys are free-form action selectors plus the three reserved
//! `$connect` / `$disconnect` / `$default` keys.

use tracing::debug;

use crate::cfn::apigatewayv2::{CfnIntegration, CfnRoute};
use crate::cfn::CfnResource;
use crate::construct::{config_digest, Stack, StringValue, Token};
use crate::errors::{Error, Result};
use crate::websocket::integration::WebSocketRouteIntegration;

/// Options for one WebSocket route.
#[derive(Debug, Clone)]
pub struct WebSocketRouteOptions {
    pub integration: WebSocketRouteIntegration,
    /// When set, the route returns the integration response to the caller
    /// via the `$default` route-response selection expression
    pub return_response: bool,
}

impl WebSocketRouteOptions {
    pub fn new<I: Into<WebSocketRouteIntegration>>(integration: I) -> Self {
        Self { integration: integration.into(), return_response: false }
    }
}

/// One materialized route on a WebSocket API.
#[derive(Debug, Clone)]
pub struct WebSocketRoute {
    route_key: String,
    integration_id: Token,
}

impl WebSocketRoute {
    pub(crate) fn create(
        stack: &mut Stack,
        api_index: usize,
        api_path: &str,
        api_id: &Token,
        route_key: &str,
        options: &WebSocketRouteOptions,
    ) -> Result<Self> {
        if route_key.is_empty() {
            return Err(Error::invalid_input_at(api_path, "route key must not be empty"));
        }
        let path = format!("{}/{}", api_path, route_key);
        if stack.apis[api_index].route_keys.contains(route_key) {
            return Err(Error::invariant_at(
                api_path,
                format!("duplicate route key '{}'", route_key),
            ));
        }

        let config = options.integration.bind();
        let dedup_key = config.dedup_key();
        let integration_id = match stack.apis[api_index].integrations.get(&dedup_key) {
            Some(token) => token.clone(),
            None => {
                let integration_path =
                    format!("{}/Integration{}", api_path, config_digest(&dedup_key));
                let resource = CfnResource::Integration(CfnIntegration {
                    api_id: api_id.clone().into(),
                    integration_type: config.integration_type.to_string(),
                    integration_uri: config.uri.clone(),
                    integration_method: None,
                    payload_format_version: None,
                    connection_id: None,
                    connection_type: None,
                });
                let logical_id = stack.add_resource(&integration_path, resource)?;
                let token = Token::reference(logical_id);
                debug!(construct_path = %integration_path, "created integration");
                stack.apis[api_index].integrations.insert(dedup_key, token.clone());
                token
            }
        };

        let resource = CfnResource::Route(CfnRoute {
            api_id: api_id.clone().into(),
            route_key: route_key.to_string(),
            target: Some(StringValue::join([
                "integrations/".into(),
                integration_id.clone().into(),
            ])),
            authorization_type: None,
            authorizer_id: None,
            authorization_scopes: None,
            route_response_selection_expression: options
                .return_response
                .then(|| "$default".to_string()),
        });
        stack.add_resource(&path, resource)?;
        stack.apis[api_index].route_keys.insert(route_key.to_string());
        debug!(construct_path = %path, route_key, "created route");

        Ok(Self { route_key: route_key.to_string(), integration_id })
    }

    pub fn route_key(&self) -> &str {
        &self.route_key
    }

    /// Deferred id of the integration this route targets.
    pub fn integration_id(&self) -> Token {
        self.integration_id.clone()
    }
}
