//! # Error Types
//!
//! Error taxonomy for the construct layer. Three failure classes surface to
//! the author: structural precondition violations (`InvalidInput`),
//! cross-resource invariant violations (`InvariantViolation`), and binder
//! rejections (`Bind`). All carry the scoped path of the offending construct
//! when one exists, so synthesis failures name the construct and the rule.

/// Custom result type for construct-layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the construct layer
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Caller violated a structural precondition (bad path, unknown HTTP
    /// method, missing required field for the chosen integration type)
    #[error("Invalid input{}: {message}", fmt_path(.construct_path))]
    InvalidInput { message: String, construct_path: Option<String> },

    /// Caller's action would violate a cross-resource invariant (duplicate
    /// route key, second root mapping on a domain, stage name collision)
    #[error("Invariant violation{}: {message}", fmt_path(.construct_path))]
    InvariantViolation { message: String, construct_path: Option<String> },

    /// An integration or authorizer binder rejected the route
    #[error("Bind error{}: {message}", fmt_path(.construct_path))]
    Bind { message: String, construct_path: Option<String> },

    /// Serialization failures while emitting the template fragment
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },
}

fn fmt_path(path: &Option<String>) -> String {
    match path {
        Some(p) => format!(" at '{}'", p),
        None => String::new(),
    }
}

impl Error {
    /// Create an invalid-input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput { message: message.into(), construct_path: None }
    }

    /// Create an invalid-input error naming the offending construct
    pub fn invalid_input_at<S: Into<String>, P: Into<String>>(path: P, message: S) -> Self {
        Self::InvalidInput { message: message.into(), construct_path: Some(path.into()) }
    }

    /// Create an invariant-violation error
    pub fn invariant<S: Into<String>>(message: S) -> Self {
        Self::InvariantViolation { message: message.into(), construct_path: None }
    }

    /// Create an invariant-violation error naming the offending construct
    pub fn invariant_at<S: Into<String>, P: Into<String>>(path: P, message: S) -> Self {
        Self::InvariantViolation { message: message.into(), construct_path: Some(path.into()) }
    }

    /// Create a bind error
    pub fn bind<S: Into<String>>(message: S) -> Self {
        Self::Bind { message: message.into(), construct_path: None }
    }

    /// Create a bind error naming the offending construct
    pub fn bind_at<S: Into<String>, P: Into<String>>(path: P, message: S) -> Self {
        Self::Bind { message: message.into(), construct_path: Some(path.into()) }
    }

    /// Scoped construct path the error points at, when known
    pub fn construct_path(&self) -> Option<&str> {
        match self {
            Error::InvalidInput { construct_path, .. }
            | Error::InvariantViolation { construct_path, .. }
            | Error::Bind { construct_path, .. } => construct_path.as_deref(),
            Error::Serialization { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error, context: "JSON serialization failed".to_string() }
    }
}
