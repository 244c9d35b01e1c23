//! # The HTTP API construct layer
//!
//! High-level constructs for HTTP APIs: the [`HttpApi`] aggregate, route
//! materialization with per-api integration dedup, stages, and the closed
//! integration and authorizer sums.

pub mod api;
pub mod authorizer;
pub mod integration;
pub mod route;
pub mod stage;

pub use api::{AddRoutesOptions, CorsPreflightOptions, HttpApi, HttpApiProps};
pub use authorizer::{
    HttpAuthorizationType, HttpAuthorizerConfig, HttpJwtAuthorizer, HttpJwtAuthorizerProps,
    HttpLambdaAuthorizer, HttpLambdaAuthorizerProps, HttpRouteAuthorizer,
};
pub use integration::{
    HttpConnectionType, HttpIntegrationConfig, HttpIntegrationType, HttpRouteIntegration,
    HttpUrlIntegration, LambdaProxyIntegration, PayloadFormatVersion, PrivateIntegration,
};
pub use route::HttpRoute;
pub use stage::HttpStage;
