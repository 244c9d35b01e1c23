//! # The WebSocket API construct layer
//!
//! Parallel aggregate to the HTTP layer: a [`WebSocketApi`] dispatches
//! messages by route selection expression, with the reserved `$connect`,
//! `$disconnect` and `$default` keys covering the connection lifecycle.
//! Stage and domain machinery is shared with the HTTP layer.

pub mod api;
pub mod integration;
pub mod route;
pub mod stage;

pub use api::{WebSocketApi, WebSocketApiProps};
pub use integration::{WebSocketLambdaIntegration, WebSocketRouteIntegration};
pub use route::{WebSocketRoute, WebSocketRouteOptions};
pub use stage::WebSocketStage;
