//! HTTP route materialization.
//!
//! A route resolves its integration and authorizer bindings, reuses or
//! creates the underlying Cfn Integration through the api's dedup cache,
//! merges authorization scopes, and emits the Cfn Route record.

use tracing::debug;

use crate::cfn::apigatewayv2::{CfnIntegration, CfnRoute};
use crate::cfn::CfnResource;
use crate::construct::{config_digest, Stack, StringValue, Token};
use crate::domain::RouteKey;
use crate::errors::{Error, Result};
use crate::http::authorizer::HttpRouteAuthorizer;
use crate::http::integration::HttpRouteIntegration;

/// One materialized route on an HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRoute {
    route_key: RouteKey,
    integration_id: Token,
}

impl HttpRoute {
    pub(crate) fn create(
        stack: &mut Stack,
        api_index: usize,
        api_path: &str,
        api_id: &Token,
        route_key: RouteKey,
        integration: &HttpRouteIntegration,
        authorizer: Option<&HttpRouteAuthorizer>,
        route_scopes: Option<&[String]>,
        api_default_scopes: Option<&[String]>,
    ) -> Result<Self> {
        let path = format!("{}/{}", api_path, route_key.key());
        if stack.apis[api_index].route_keys.contains(route_key.key()) {
            return Err(Error::invariant_at(
                api_path,
                format!("duplicate route key '{}'", route_key.key()),
            ));
        }

        let config = integration.bind();
        config.validate(&path)?;

        // Per-api dedup: the first route to produce a config owns the
        // integration resource; equal configs reuse its id.
        let dedup_key = config.dedup_key();
        let integration_id = match stack.apis[api_index].integrations.get(&dedup_key) {
            Some(token) => token.clone(),
            None => {
                let integration_path =
                    format!("{}/Integration{}", api_path, config_digest(&dedup_key));
                let resource = CfnResource::Integration(CfnIntegration {
                    api_id: api_id.clone().into(),
                    integration_type: config.integration_type.cfn_value().to_string(),
                    integration_uri: Some(config.uri.clone()),
                    integration_method: config.method.map(|m| m.as_str().to_string()),
                    payload_format_version: Some(config.payload_format_version.as_str().to_string()),
                    connection_id: config.connection_id.clone(),
                    connection_type: config.connection_type.map(|c| c.cfn_value().to_string()),
                });
                let logical_id = stack.add_resource(&integration_path, resource)?;
                let token = Token::reference(logical_id);
                debug!(construct_path = %integration_path, "created integration");
                stack.apis[api_index].integrations.insert(dedup_key, token.clone());
                token
            }
        };

        let auth = authorizer
            .map(|a| a.bind(stack, api_index, api_path, api_id))
            .transpose()?;

        // Scope merge: api defaults unless the route supplies its own list
        // (an explicit empty list is a valid override), then authorizer
        // scopes append. An empty result emits nothing.
        let mut scopes: Vec<String> = route_scopes
            .or(api_default_scopes)
            .map(|s| s.to_vec())
            .unwrap_or_default();
        if let Some(auth) = &auth {
            scopes.extend(auth.authorization_scopes.iter().cloned());
        }

        let resource = CfnResource::Route(CfnRoute {
            api_id: api_id.clone().into(),
            route_key: route_key.key().to_string(),
            target: Some(StringValue::join([
                "integrations/".into(),
                integration_id.clone().into(),
            ])),
            authorization_type: auth
                .as_ref()
                .map(|a| a.authorization_type.cfn_value().to_string()),
            authorizer_id: auth.as_ref().and_then(|a| a.authorizer_id.clone()).map(Into::into),
            authorization_scopes: if scopes.is_empty() { None } else { Some(scopes) },
            route_response_selection_expression: None,
        });
        stack.add_resource(&path, resource)?;
        stack.apis[api_index].route_keys.insert(route_key.key().to_string());
        debug!(construct_path = %path, route_key = route_key.key(), "created route");

        Ok(Self { route_key, integration_id })
    }

    pub fn route_key(&self) -> &RouteKey {
        &self.route_key
    }

    /// Deferred id of the integration this route targets. Routes that
    /// resolved to equal integration configs share one id.
    pub fn integration_id(&self) -> Token {
        self.integration_id.clone()
    }
}
