//! The WebSocket API aggregate root.

use tracing::debug;

use crate::cfn::apigatewayv2::CfnApi;
use crate::cfn::CfnResource;
use crate::common::stage::StageOptions;
use crate::common::Api;
use crate::construct::{ApiState, Stack, Token};
use crate::errors::Result;
use crate::observability::{api_metric, Metric, MetricOptions};
use crate::websocket::route::{WebSocketRoute, WebSocketRouteOptions};
use crate::websocket::stage::WebSocketStage;

const DEFAULT_ROUTE_SELECTION_EXPRESSION: &str = "$request.body.action";

#[derive(Debug, Clone, Default)]
pub struct WebSocketApiProps {
    /// Defaults to the construct id
    pub api_name: Option<String>,
    pub description: Option<String>,
    /// Defaults to `$request.body.action`
    pub route_selection_expression: Option<String>,
    pub api_key_selection_expression: Option<String>,
    /// Route for the reserved `$connect` key
    pub connect_route_options: Option<WebSocketRouteOptions>,
    /// Route for the reserved `$disconnect` key
    pub disconnect_route_options: Option<WebSocketRouteOptions>,
    /// Catch-all route for the reserved `$default` key
    pub default_route_options: Option<WebSocketRouteOptions>,
}

/// A WebSocket API front-end. Routes dispatch on the api's route selection
/// expression; the three reserved keys cover the connection lifecycle.
#[derive(Debug, Clone)]
pub struct WebSocketApi {
    index: usize,
    path: String,
    api_id: Token,
    api_endpoint: Token,
}

impl WebSocketApi {
    pub fn new(stack: &mut Stack, id: &str, props: WebSocketApiProps) -> Result<Self> {
        let path = format!("{}/{}", stack.name(), id);
        let resource = CfnResource::Api(CfnApi {
            name: Some(props.api_name.clone().unwrap_or_else(|| id.to_string()).into()),
            protocol_type: Some("WEBSOCKET".to_string()),
            description: props.description.clone(),
            cors_configuration: None,
            disable_execute_api_endpoint: None,
            route_selection_expression: Some(
                props
                    .route_selection_expression
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ROUTE_SELECTION_EXPRESSION.to_string()),
            ),
            api_key_selection_expression: props.api_key_selection_expression.clone(),
        });
        let logical_id = stack.add_resource(&path, resource)?;
        let index = stack.register_api(ApiState::default());
        debug!(construct_path = %path, "created websocket api");

        let api = Self {
            index,
            path,
            api_id: Token::reference(logical_id.clone()),
            api_endpoint: Token::get_att(logical_id, "ApiEndpoint"),
        };

        for (key, options) in [
            ("$connect", props.connect_route_options),
            ("$disconnect", props.disconnect_route_options),
            ("$default", props.default_route_options),
        ] {
            if let Some(options) = options {
                WebSocketRoute::create(stack, api.index, &api.path, &api.api_id, key, &options)?;
            }
        }

        Ok(api)
    }

    /// Add a route for an action key (or a reserved `$`-key not covered at
    /// construction).
    pub fn add_route(
        &self,
        stack: &mut Stack,
        route_key: &str,
        options: WebSocketRouteOptions,
    ) -> Result<WebSocketRoute> {
        WebSocketRoute::create(stack, self.index, &self.path, &self.api_id, route_key, &options)
    }

    /// Add a named stage.
    pub fn add_stage(
        &self,
        stack: &mut Stack,
        id: &str,
        options: StageOptions,
    ) -> Result<WebSocketStage> {
        WebSocketStage::new(stack, self, id, options)
    }

    /// A metric over all stages of this api.
    pub fn metric(&self, stack: &Stack, metric_name: &str, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, metric_name, "Average", options)
    }

    /// Total number of messages.
    pub fn metric_count(&self, stack: &Stack, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, "Count", "Sum", options)
    }
}

impl Api for WebSocketApi {
    fn api_id(&self) -> Token {
        self.api_id.clone()
    }

    fn api_endpoint(&self) -> Token {
        self.api_endpoint.clone()
    }

    fn construct_path(&self) -> &str {
        &self.path
    }

    fn default_stage_name(&self) -> Option<String> {
        None
    }

    fn state_index(&self) -> usize {
        self.index
    }
}
