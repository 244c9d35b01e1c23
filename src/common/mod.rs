//! Machinery shared by the HTTP and WebSocket aggregates: the abstract api
//! surface, stages, custom domains with their path-prefix mappings, and
//! private-network attachments.

pub mod domain_name;
pub mod stage;
pub mod vpc_link;

pub use domain_name::{ApiMapping, ApiMappingProps, DomainName, DomainNameProps};
pub use stage::{DomainMappingOptions, StageOptions};
pub use vpc_link::{Vpc, VpcLink, VpcLinkProps};

use crate::construct::Token;

/// A deployable HTTP or WebSocket front-end, identified by an opaque id.
///
/// Implemented by [`HttpApi`](crate::http::HttpApi) and
/// [`WebSocketApi`](crate::websocket::WebSocketApi); shared by the stage and
/// domain-mapping machinery, which never needs to know which protocol it is
/// wiring.
pub trait Api {
    /// Deferred api id; resolves to the underlying Cfn Api at deploy time.
    fn api_id(&self) -> Token;

    /// Deferred endpoint URL of the api.
    fn api_endpoint(&self) -> Token;

    /// Scoped path of the api construct, used in error messages.
    fn construct_path(&self) -> &str;

    /// Name of the default stage, when one exists.
    fn default_stage_name(&self) -> Option<String>;

    #[doc(hidden)]
    fn state_index(&self) -> usize;
}
