//! The HTTP API aggregate root.
//!
//! An `HttpApi` owns its routes, default stage, default integration and
//! authorizer, CORS configuration, VPC links and custom-domain mapping. Each
//! public operation validates its inputs, resolves defaults, invokes the
//! binders, and creates or reuses the underlying Cfn resources.

use std::time::Duration;

use tracing::debug;

use crate::cfn::apigatewayv2::{CfnApi, CorsConfiguration};
use crate::cfn::CfnResource;
use crate::common::stage::StageOptions;
use crate::common::{Api, DomainMappingOptions, VpcLink, VpcLinkProps};
use crate::construct::{ApiState, Stack, Token};
use crate::domain::{HttpMethod, RouteKey};
use crate::errors::{Error, Result};
use crate::http::authorizer::HttpRouteAuthorizer;
use crate::http::integration::HttpRouteIntegration;
use crate::http::route::HttpRoute;
use crate::http::stage::HttpStage;
use crate::observability::{api_metric, Metric, MetricOptions};

/// Preflight CORS configuration serialized onto the Cfn Api. When set, the
/// service answers `OPTIONS` preflights itself instead of forwarding them.
#[derive(Debug, Clone, Default)]
pub struct CorsPreflightOptions {
    pub allow_credentials: Option<bool>,
    pub allow_headers: Option<Vec<String>>,
    pub allow_methods: Option<Vec<HttpMethod>>,
    pub allow_origins: Option<Vec<String>>,
    pub expose_headers: Option<Vec<String>>,
    pub max_age: Option<Duration>,
}

impl CorsPreflightOptions {
    fn validate(&self, path: &str) -> Result<()> {
        if self.allow_credentials == Some(true) {
            if let Some(origins) = &self.allow_origins {
                if origins.iter().any(|o| o == "*") {
                    return Err(Error::invalid_input_at(
                        path,
                        "CORS credentials cannot be combined with the wildcard origin",
                    ));
                }
            }
        }
        Ok(())
    }

    fn to_cfn(&self) -> CorsConfiguration {
        CorsConfiguration {
            allow_credentials: self.allow_credentials,
            allow_headers: self.allow_headers.clone(),
            allow_methods: self
                .allow_methods
                .as_ref()
                .map(|methods| methods.iter().map(|m| m.as_str().to_string()).collect()),
            allow_origins: self.allow_origins.clone(),
            expose_headers: self.expose_headers.clone(),
            max_age: self.max_age.map(|d| d.as_secs()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpApiProps {
    /// Defaults to the construct id
    pub api_name: Option<String>,
    pub description: Option<String>,
    pub cors_preflight: Option<CorsPreflightOptions>,
    /// Create the `$default` stage with auto-deploy; defaults to true
    pub create_default_stage: bool,
    /// Integration for the `$default` catch-all route
    pub default_integration: Option<HttpRouteIntegration>,
    /// Authorizer applied to routes that do not name their own
    pub default_authorizer: Option<HttpRouteAuthorizer>,
    /// Scopes applied when a route names none; an explicit empty route list
    /// still overrides these
    pub default_authorization_scopes: Option<Vec<String>>,
    /// Map the default stage onto a custom domain
    pub default_domain_mapping: Option<DomainMappingOptions>,
    pub disable_execute_api_endpoint: Option<bool>,
}

impl Default for HttpApiProps {
    fn default() -> Self {
        Self {
            api_name: None,
            description: None,
            cors_preflight: None,
            create_default_stage: true,
            default_integration: None,
            default_authorizer: None,
            default_authorization_scopes: None,
            default_domain_mapping: None,
            disable_execute_api_endpoint: None,
        }
    }
}

/// Options for one `add_routes` call; a route is created per method.
#[derive(Debug, Clone)]
pub struct AddRoutesOptions {
    /// Route path, beginning with `/`
    pub path: String,
    /// Defaults to `[ANY]`
    pub methods: Option<Vec<HttpMethod>>,
    pub integration: HttpRouteIntegration,
    /// Defaults to the api-level authorizer; pass
    /// [`HttpRouteAuthorizer::None`] to opt out of it
    pub authorizer: Option<HttpRouteAuthorizer>,
    /// Replaces the api-level default scopes; an empty list is a valid
    /// "no scopes" override
    pub authorization_scopes: Option<Vec<String>>,
}

/// An HTTP API front-end.
#[derive(Debug, Clone)]
pub struct HttpApi {
    index: usize,
    path: String,
    logical_id: String,
    api_id: Token,
    api_endpoint: Token,
    default_stage: Option<HttpStage>,
    default_authorizer: Option<HttpRouteAuthorizer>,
    default_authorization_scopes: Option<Vec<String>>,
}

impl HttpApi {
    pub fn new(stack: &mut Stack, id: &str, props: HttpApiProps) -> Result<Self> {
        let path = format!("{}/{}", stack.name(), id);
        if let Some(cors) = &props.cors_preflight {
            cors.validate(&path)?;
        }
        if props.default_domain_mapping.is_some() && !props.create_default_stage {
            return Err(Error::invariant_at(
                path,
                "a default domain mapping requires the default stage",
            ));
        }

        let resource = CfnResource::Api(CfnApi {
            name: Some(props.api_name.clone().unwrap_or_else(|| id.to_string()).into()),
            protocol_type: Some("HTTP".to_string()),
            description: props.description.clone(),
            cors_configuration: props.cors_preflight.as_ref().map(|c| c.to_cfn()),
            disable_execute_api_endpoint: props.disable_execute_api_endpoint,
            route_selection_expression: None,
            api_key_selection_expression: None,
        });
        let logical_id = stack.add_resource(&path, resource)?;
        let index = stack.register_api(ApiState::default());
        debug!(construct_path = %path, "created http api");

        let mut api = Self {
            index,
            path,
            logical_id: logical_id.clone(),
            api_id: Token::reference(logical_id.clone()),
            api_endpoint: Token::get_att(logical_id, "ApiEndpoint"),
            default_stage: None,
            default_authorizer: props.default_authorizer,
            default_authorization_scopes: props.default_authorization_scopes,
        };

        if props.create_default_stage {
            let stage = HttpStage::new(
                stack,
                &api,
                "DefaultStage",
                StageOptions {
                    stage_name: None,
                    auto_deploy: Some(true),
                    domain_mapping: props.default_domain_mapping,
                },
            )?;
            api.default_stage = Some(stage);
        }

        if let Some(integration) = &props.default_integration {
            HttpRoute::create(
                stack,
                api.index,
                &api.path,
                &api.api_id,
                RouteKey::default_route(),
                integration,
                api.default_authorizer.as_ref(),
                None,
                api.default_authorization_scopes.as_deref(),
            )?;
        }

        Ok(api)
    }

    /// Add one route per method for the given path.
    pub fn add_routes(&self, stack: &mut Stack, options: AddRoutesOptions) -> Result<Vec<HttpRoute>> {
        let methods = options.methods.unwrap_or_else(|| vec![HttpMethod::Any]);
        let authorizer = options.authorizer.or_else(|| self.default_authorizer.clone());
        let mut routes = Vec::with_capacity(methods.len());
        for method in methods {
            let route_key = RouteKey::with(&options.path, method)?;
            routes.push(HttpRoute::create(
                stack,
                self.index,
                &self.path,
                &self.api_id,
                route_key,
                &options.integration,
                authorizer.as_ref(),
                options.authorization_scopes.as_deref(),
                self.default_authorization_scopes.as_deref(),
            )?);
        }
        Ok(routes)
    }

    /// Add a named stage.
    pub fn add_stage(&self, stack: &mut Stack, id: &str, options: StageOptions) -> Result<HttpStage> {
        HttpStage::new(stack, self, id, options)
    }

    /// Add a private-network attachment under this api's scope.
    pub fn add_vpc_link(&self, stack: &mut Stack, id: &str, props: VpcLinkProps) -> Result<VpcLink> {
        VpcLink::create(stack, format!("{}/{}", self.path, id), id, props)
    }

    /// Toggle the default `execute-api` endpoint. Changing this after the
    /// first route has been added is undefined.
    pub fn set_disable_execute_api_endpoint(&self, stack: &mut Stack, value: bool) -> Result<()> {
        if stack.is_synthesized() {
            return Err(Error::invariant_at(
                self.path.clone(),
                "graph is frozen: the stack has already been synthesized",
            ));
        }
        match stack.resource_mut(&self.logical_id) {
            Some(CfnResource::Api(api)) => {
                api.disable_execute_api_endpoint = Some(value);
                Ok(())
            }
            _ => Err(Error::invariant_at(self.path.clone(), "underlying api record is missing")),
        }
    }

    /// The default stage, unless construction opted out.
    pub fn default_stage(&self) -> Option<&HttpStage> {
        self.default_stage.as_ref()
    }

    /// URL of the default stage, when one exists.
    pub fn url(&self) -> Option<crate::construct::StringValue> {
        self.default_stage.as_ref().map(|s| s.url())
    }

    /// A metric over all stages of this api.
    pub fn metric(&self, stack: &Stack, metric_name: &str, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, metric_name, "Average", options)
    }

    /// Total number of requests.
    pub fn metric_count(&self, stack: &Stack, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, "Count", "Sum", options)
    }

    /// Client-side (4xx) errors.
    pub fn metric_client_error(&self, stack: &Stack, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, "4xx", "Sum", options)
    }

    /// Server-side (5xx) errors.
    pub fn metric_server_error(&self, stack: &Stack, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, "5xx", "Sum", options)
    }

    /// Bytes processed.
    pub fn metric_data_processed(&self, stack: &Stack, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, "DataProcessed", "Sum", options)
    }

    /// Time between request receipt and response.
    pub fn metric_latency(&self, stack: &Stack, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, "Latency", "Average", options)
    }

    /// Time between relay to the backend and response.
    pub fn metric_integration_latency(&self, stack: &Stack, options: MetricOptions) -> Result<Metric> {
        api_metric(stack, self, "IntegrationLatency", "Average", options)
    }
}

impl Api for HttpApi {
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
        self.default_stage.as_ref().map(|s| s.stage_name().to_string())
    }

    fn state_index(&self) -> usize {
        self.index
    }
}
