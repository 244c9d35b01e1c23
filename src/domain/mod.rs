//! Domain value types shared by the HTTP and WebSocket layers.

mod route_key;

pub use route_key::{HttpMethod, RouteKey};
