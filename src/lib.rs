//! # apigw-constructs
//!
//! Strongly-typed constructs for AWS API Gateway v2 that declaratively
//! describe HTTP and WebSocket APIs and synthesize the corresponding
//! CloudFormation template fragment.
//!
//! ## Architecture
//!
//! The crate is layered:
//!
//! ```text
//! High-level constructs (HttpApi, WebSocketApi, stages, domains)
//!      ↓ expand into
//! Cfn property records (one struct per CloudFormation resource type)
//!      ↓ registered on
//! Stack → Template fragment { "Resources": { ... } }
//! ```
//!
//! The high-level layer resolves defaults, validates inputs, enforces
//! cross-resource invariants (unique route keys, per-api integration
//! dedup, the single-root domain mapping rule), and wires resources
//! together with deferred [`Token`] references. Graph construction is
//! synchronous and free of I/O; every failure surfaces at the call site.
//!
//! ## Example Usage
//!
//! ```rust
//! use apigw_constructs::construct::Stack;
//! use apigw_constructs::http::{AddRoutesOptions, HttpApi, HttpApiProps, LambdaProxyIntegration};
//!
//! fn main() -> apigw_constructs::Result<()> {
//!     let mut stack = Stack::new("Books")?;
//!     let api = HttpApi::new(&mut stack, "Api", HttpApiProps::default())?;
//!     api.add_routes(
//!         &mut stack,
//!         AddRoutesOptions {
//!             path: "/books".into(),
//!             methods: None,
//!             integration: LambdaProxyIntegration::new(
//!                 "arn:aws:lambda:us-east-1:111:function:books",
//!             )
//!             .into(),
//!             authorizer: None,
//!             authorization_scopes: None,
//!         },
//!     )?;
//!     let template = stack.synth()?;
//!     assert!(!template.resources().is_empty());
//!     Ok(())
//! }
//! ```

pub mod cfn;
pub mod common;
pub mod construct;
pub mod domain;
pub mod errors;
pub mod http;
pub mod observability;
pub mod websocket;

// Re-export commonly used types
pub use common::Api;
pub use construct::{Stack, StringValue, Template, Token};
pub use domain::{HttpMethod, RouteKey};
pub use errors::{Error, Result};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
