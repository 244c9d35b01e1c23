//! HTTP route authorizers.
//!
//! A closed sum of JWT, Lambda and the built-in "none" sentinel. JWT and
//! Lambda authorizers create their Cfn Authorizer lazily on first bind to an
//! api and are reused across that api's routes — the layer never
//! deduplicates authorizers on the author's behalf. The "none" sentinel lets
//! a route opt out of an api-level default and creates no resources.

use tracing::debug;

use crate::cfn::apigatewayv2::{CfnAuthorizer, JwtConfiguration};
use crate::cfn::CfnResource;
use crate::construct::{Stack, StringValue, Token};
use crate::errors::{Error, Result};

const DEFAULT_IDENTITY_SOURCE: &str = "$request.header.Authorization";

/// `AuthorizationType` values emitted onto routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpAuthorizationType {
    Jwt,
    Custom,
    None,
}

impl HttpAuthorizationType {
    pub fn cfn_value(&self) -> &'static str {
        match self {
            HttpAuthorizationType::Jwt => "JWT",
            HttpAuthorizationType::Custom => "CUSTOM",
            HttpAuthorizationType::None => "NONE",
        }
    }
}

/// The record an authorizer binding produces for a route.
#[derive(Debug, Clone)]
pub struct HttpAuthorizerConfig {
    pub authorization_type: HttpAuthorizationType,
    pub authorizer_id: Option<Token>,
    /// OIDC scopes the authorizer contributes on top of the route's own
    pub authorization_scopes: Vec<String>,
}

/// Per-authorizer mutable state owned by the stack: which api the
/// authorizer is bound to, if any, and what to materialize on first bind.
#[derive(Debug)]
pub(crate) struct AuthorizerState {
    pub(crate) id: String,
    pub(crate) bound: Option<(usize, Token)>,
    pub(crate) spec: AuthorizerSpec,
}

#[derive(Debug)]
pub(crate) enum AuthorizerSpec {
    Jwt {
        name: String,
        issuer: String,
        audience: Vec<String>,
        identity_source: Vec<String>,
        authorization_scopes: Vec<String>,
    },
    Lambda {
        name: String,
        handler_arn: StringValue,
        identity_source: Vec<String>,
        simple_responses: bool,
        results_cache_ttl_secs: u64,
    },
}

#[derive(Debug, Clone)]
pub struct HttpJwtAuthorizerProps {
    /// Defaults to the construct id
    pub authorizer_name: Option<String>,
    /// OIDC issuer URL
    pub jwt_issuer: String,
    pub jwt_audience: Vec<String>,
    /// Defaults to `$request.header.Authorization`
    pub identity_source: Option<Vec<String>>,
    /// Scopes appended to every route this authorizer protects
    pub authorization_scopes: Vec<String>,
}

/// A JWT authorizer validating bearer tokens against an OIDC issuer.
#[derive(Debug, Clone)]
pub struct HttpJwtAuthorizer {
    index: usize,
}

impl HttpJwtAuthorizer {
    pub fn new(stack: &mut Stack, id: &str, props: HttpJwtAuthorizerProps) -> Result<Self> {
        if props.jwt_audience.is_empty() {
            return Err(Error::invalid_input(format!(
                "JWT authorizer '{}' requires at least one audience",
                id
            )));
        }
        stack.authorizers.push(AuthorizerState {
            id: id.to_string(),
            bound: None,
            spec: AuthorizerSpec::Jwt {
                name: props.authorizer_name.unwrap_or_else(|| id.to_string()),
                issuer: props.jwt_issuer,
                audience: props.jwt_audience,
                identity_source: props
                    .identity_source
                    .unwrap_or_else(|| vec![DEFAULT_IDENTITY_SOURCE.to_string()]),
                authorization_scopes: props.authorization_scopes,
            },
        });
        Ok(Self { index: stack.authorizers.len() - 1 })
    }
}

#[derive(Debug, Clone)]
pub struct HttpLambdaAuthorizerProps {
    /// Defaults to the construct id
    pub authorizer_name: Option<String>,
    /// ARN of the authorizer function
    pub handler_arn: StringValue,
    /// Defaults to `$request.header.Authorization`
    pub identity_source: Option<Vec<String>>,
    /// Simple boolean responses (payload 2.0); defaults to true
    pub simple_responses: Option<bool>,
    /// Result cache TTL in seconds; defaults to 300
    pub results_cache_ttl_secs: Option<u64>,
}

/// A Lambda (`REQUEST`) authorizer.
#[derive(Debug, Clone)]
pub struct HttpLambdaAuthorizer {
    index: usize,
}

impl HttpLambdaAuthorizer {
    pub fn new(stack: &mut Stack, id: &str, props: HttpLambdaAuthorizerProps) -> Result<Self> {
        stack.authorizers.push(AuthorizerState {
            id: id.to_string(),
            bound: None,
            spec: AuthorizerSpec::Lambda {
                name: props.authorizer_name.unwrap_or_else(|| id.to_string()),
                handler_arn: props.handler_arn,
                identity_source: props
                    .identity_source
                    .unwrap_or_else(|| vec![DEFAULT_IDENTITY_SOURCE.to_string()]),
                simple_responses: props.simple_responses.unwrap_or(true),
                results_cache_ttl_secs: props.results_cache_ttl_secs.unwrap_or(300),
            },
        });
        Ok(Self { index: stack.authorizers.len() - 1 })
    }
}

/// The closed set of authorizer kinds a route can carry.
#[derive(Debug, Clone)]
pub enum HttpRouteAuthorizer {
    Jwt(HttpJwtAuthorizer),
    Lambda(HttpLambdaAuthorizer),
    /// Explicitly unauthorized: emits `AuthorizationType: NONE` and opts the
    /// route out of any api-level default.
    None,
}

impl HttpRouteAuthorizer {
    pub(crate) fn bind(
        &self,
        stack: &mut Stack,
        api_index: usize,
        api_path: &str,
        api_id: &Token,
    ) -> Result<HttpAuthorizerConfig> {
        let index = match self {
            HttpRouteAuthorizer::None => {
                return Ok(HttpAuthorizerConfig {
                    authorization_type: HttpAuthorizationType::None,
                    authorizer_id: None,
                    authorization_scopes: Vec::new(),
                });
            }
            HttpRouteAuthorizer::Jwt(jwt) => jwt.index,
            HttpRouteAuthorizer::Lambda(lambda) => lambda.index,
        };

        if let Some((bound_api, token)) = &stack.authorizers[index].bound {
            if *bound_api != api_index {
                return Err(Error::bind_at(
                    api_path,
                    format!(
                        "authorizer '{}' is already bound to a different api",
                        stack.authorizers[index].id
                    ),
                ));
            }
            let token = token.clone();
            return Ok(self.config_for(&stack.authorizers[index], token));
        }

        let path = format!("{}/{}", api_path, stack.authorizers[index].id);
        let resource = match &stack.authorizers[index].spec {
            AuthorizerSpec::Jwt { name, issuer, audience, identity_source, .. } => {
                CfnResource::Authorizer(CfnAuthorizer {
                    api_id: api_id.clone().into(),
                    authorizer_type: "JWT".to_string(),
                    name: name.clone(),
                    identity_source: Some(identity_source.clone()),
                    jwt_configuration: Some(JwtConfiguration {
                        audience: Some(audience.clone()),
                        issuer: Some(issuer.clone()),
                    }),
                    authorizer_uri: None,
                    authorizer_payload_format_version: None,
                    enable_simple_responses: None,
                    authorizer_result_ttl_in_seconds: None,
                })
            }
            AuthorizerSpec::Lambda {
                name,
                handler_arn,
                identity_source,
                simple_responses,
                results_cache_ttl_secs,
            } => CfnResource::Authorizer(CfnAuthorizer {
                api_id: api_id.clone().into(),
                authorizer_type: "REQUEST".to_string(),
                name: name.clone(),
                identity_source: Some(identity_source.clone()),
                jwt_configuration: None,
                authorizer_uri: Some(StringValue::join([
                    "arn:aws:apigateway:".into(),
                    Token::region().into(),
                    ":lambda:path/2015-03-31/functions/".into(),
                    handler_arn.clone(),
                    "/invocations".into(),
                ])),
                authorizer_payload_format_version: Some(
                    if *simple_responses { "2.0" } else { "1.0" }.to_string(),
                ),
                enable_simple_responses: simple_responses.then_some(true),
                authorizer_result_ttl_in_seconds: Some(*results_cache_ttl_secs),
            }),
        };
        let logical_id = stack.add_resource(&path, resource)?;
        let token = Token::reference(logical_id);
        debug!(construct_path = %path, "bound authorizer to api");
        stack.authorizers[index].bound = Some((api_index, token.clone()));
        Ok(self.config_for(&stack.authorizers[index], token))
    }

    fn config_for(&self, state: &AuthorizerState, token: Token) -> HttpAuthorizerConfig {
        match &state.spec {
            AuthorizerSpec::Jwt { authorization_scopes, .. } => HttpAuthorizerConfig {
                authorization_type: HttpAuthorizationType::Jwt,
                authorizer_id: Some(token),
                authorization_scopes: authorization_scopes.clone(),
            },
            AuthorizerSpec::Lambda { .. } => HttpAuthorizerConfig {
                authorization_type: HttpAuthorizationType::Custom,
                authorizer_id: Some(token),
                authorization_scopes: Vec::new(),
            },
        }
    }
}

impl From<HttpJwtAuthorizer> for HttpRouteAuthorizer {
    fn from(value: HttpJwtAuthorizer) -> Self {
        HttpRouteAuthorizer::Jwt(value)
    }
}

impl From<HttpLambdaAuthorizer> for HttpRouteAuthorizer {
    fn from(value: HttpLambdaAuthorizer) -> Self {
        HttpRouteAuthorizer::Lambda(value)
    }
}
