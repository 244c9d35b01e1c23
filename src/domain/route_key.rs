//! Route keys: the canonical `"METHOD /path"` identifier of a route, plus
//! the `$default` catch-all sentinel.

use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

/// The eight HTTP methods a route key accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Any,
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Any => "ANY",
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ANY" => Ok(HttpMethod::Any),
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(Error::invalid_input(format!("unknown HTTP method '{}'", other))),
        }
    }
}

/// A (method, path) pair in canonical string form, or the `$default`
/// catch-all. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    method: Option<HttpMethod>,
    path: Option<String>,
    key: String,
}

impl RouteKey {
    /// Build a key from a path and method. The path must begin with `/`.
    pub fn with(path: &str, method: HttpMethod) -> Result<Self> {
        if !path.starts_with('/') {
            return Err(Error::invalid_input(format!(
                "route path must begin with '/', got '{}'",
                path
            )));
        }
        if path.len() > 1 && path.ends_with('/') {
            return Err(Error::invalid_input(format!(
                "route path must not end with '/', got '{}'",
                path
            )));
        }
        Ok(Self {
            method: Some(method),
            path: Some(path.to_string()),
            key: format!("{} {}", method, path),
        })
    }

    /// The `$default` sentinel that catches requests no other route matches.
    pub fn default_route() -> Self {
        Self { method: None, path: None, key: "$default".to_string() }
    }

    /// Canonical string form: `"METHOD /path"` or `$default`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The path, or `None` for the `$default` sentinel.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    pub fn is_default(&self) -> bool {
        self.path.is_none()
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for RouteKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "$default" {
            return Ok(Self::default_route());
        }
        let (method, path) = s.split_once(' ').ok_or_else(|| {
            Error::invalid_input(format!("route key '{}' is not 'METHOD /path' or '$default'", s))
        })?;
        Self::with(path, method.parse()?)
    }
}
