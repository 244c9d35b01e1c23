//! HTTP route integrations.
//!
//! Integration kinds are a closed sum: Lambda proxy, HTTP proxy, and
//! private (VPC link) proxy. Binding is a total function from arm to the
//! [`HttpIntegrationConfig`] record the route materializes; the record
//! carries everything the per-api dedup cache compares.

use std::fmt;

use crate::common::VpcLink;
use crate::construct::{StringValue, Token};
use crate::domain::HttpMethod;
use crate::errors::{Error, Result};

/// Closed value type for Lambda-proxy payload versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadFormatVersion {
    V1_0,
    V2_0,
}

impl PayloadFormatVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadFormatVersion::V1_0 => "1.0",
            PayloadFormatVersion::V2_0 => "2.0",
        }
    }
}

impl fmt::Display for PayloadFormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpIntegrationType {
    /// `AWS_PROXY`: forward to a Lambda function
    LambdaProxy,
    /// `HTTP_PROXY`: forward to an HTTP endpoint
    HttpProxy,
}

impl HttpIntegrationType {
    pub fn cfn_value(&self) -> &'static str {
        match self {
            HttpIntegrationType::LambdaProxy => "AWS_PROXY",
            HttpIntegrationType::HttpProxy => "HTTP_PROXY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpConnectionType {
    VpcLink,
    Internet,
}

impl HttpConnectionType {
    pub fn cfn_value(&self) -> &'static str {
        match self {
            HttpConnectionType::VpcLink => "VPC_LINK",
            HttpConnectionType::Internet => "INTERNET",
        }
    }
}

/// The configuration record a binder produces. Two routes whose records
/// compare equal (tokens by identity) share one Cfn Integration per api.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpIntegrationConfig {
    pub integration_type: HttpIntegrationType,
    pub uri: StringValue,
    pub payload_format_version: PayloadFormatVersion,
    pub method: Option<HttpMethod>,
    pub connection_id: Option<StringValue>,
    pub connection_type: Option<HttpConnectionType>,
}

impl HttpIntegrationConfig {
    /// Structural constraints of the binding protocol.
    pub(crate) fn validate(&self, route_path: &str) -> Result<()> {
        match self.integration_type {
            HttpIntegrationType::HttpProxy if self.method.is_none() => {
                return Err(Error::bind_at(
                    route_path,
                    "integration method is required for HTTP_PROXY integrations",
                ));
            }
            HttpIntegrationType::LambdaProxy if self.method.is_some() => {
                return Err(Error::bind_at(
                    route_path,
                    "integration method is only valid for HTTP_PROXY integrations",
                ));
            }
            _ => {}
        }
        if self.connection_id.is_some() != self.connection_type.is_some() {
            return Err(Error::bind_at(
                route_path,
                "connection id and connection type must be set together",
            ));
        }
        if self.connection_id.is_some()
            && self.connection_type != Some(HttpConnectionType::VpcLink)
        {
            return Err(Error::bind_at(
                route_path,
                "a connection id is only valid with the VPC_LINK connection type",
            ));
        }
        Ok(())
    }

    /// Canonical rendering for the per-api dedup cache. Byte-for-byte
    /// structural equality; token parts contribute their identity.
    pub(crate) fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.integration_type.cfn_value(),
            self.uri.canonical(),
            self.method.map(|m| m.as_str()).unwrap_or(""),
            self.connection_id.as_ref().map(|c| c.canonical()).unwrap_or_default(),
            self.connection_type.map(|c| c.cfn_value()).unwrap_or(""),
            self.payload_format_version,
        )
    }
}

/// A Lambda-proxy integration over a function ARN.
#[derive(Debug, Clone)]
pub struct LambdaProxyIntegration {
    pub handler_arn: StringValue,
    /// Defaults to `2.0`
    pub payload_format_version: Option<PayloadFormatVersion>,
}

impl LambdaProxyIntegration {
    pub fn new<A: Into<StringValue>>(handler_arn: A) -> Self {
        Self { handler_arn: handler_arn.into(), payload_format_version: None }
    }
}

/// An HTTP-proxy integration over an absolute URL.
#[derive(Debug, Clone)]
pub struct HttpUrlIntegration {
    pub url: String,
    /// Defaults to `ANY`
    pub method: Option<HttpMethod>,
}

impl HttpUrlIntegration {
    pub fn new<U: Into<String>>(url: U) -> Self {
        Self { url: url.into(), method: None }
    }
}

/// An HTTP-proxy integration reaching a private resource through a VpcLink.
#[derive(Debug, Clone)]
pub struct PrivateIntegration {
    /// Listener or service ARN/URI the link forwards to
    pub uri: StringValue,
    pub vpc_link: VpcLink,
    /// Defaults to `ANY`
    pub method: Option<HttpMethod>,
}

/// The closed set of integration kinds a route can bind.
#[derive(Debug, Clone)]
pub enum HttpRouteIntegration {
    LambdaProxy(LambdaProxyIntegration),
    HttpUrl(HttpUrlIntegration),
    Private(PrivateIntegration),
}

impl HttpRouteIntegration {
    /// Produce the integration configuration record for a route. Total over
    /// the arms; the record is validated by the route before use.
    pub(crate) fn bind(&self) -> HttpIntegrationConfig {
        match self {
            HttpRouteIntegration::LambdaProxy(lambda) => HttpIntegrationConfig {
                integration_type: HttpIntegrationType::LambdaProxy,
                uri: lambda.handler_arn.clone(),
                payload_format_version: lambda
                    .payload_format_version
                    .unwrap_or(PayloadFormatVersion::V2_0),
                method: None,
                connection_id: None,
                connection_type: None,
            },
            HttpRouteIntegration::HttpUrl(url) => HttpIntegrationConfig {
                integration_type: HttpIntegrationType::HttpProxy,
                uri: url.url.clone().into(),
                payload_format_version: PayloadFormatVersion::V1_0,
                method: Some(url.method.unwrap_or(HttpMethod::Any)),
                connection_id: None,
                connection_type: None,
            },
            HttpRouteIntegration::Private(private) => HttpIntegrationConfig {
                integration_type: HttpIntegrationType::HttpProxy,
                uri: private.uri.clone(),
                payload_format_version: PayloadFormatVersion::V1_0,
                method: Some(private.method.unwrap_or(HttpMethod::Any)),
                connection_id: Some(private.vpc_link.vpc_link_id().into()),
                connection_type: Some(HttpConnectionType::VpcLink),
            },
        }
    }
}

impl From<LambdaProxyIntegration> for HttpRouteIntegration {
    fn from(value: LambdaProxyIntegration) -> Self {
        HttpRouteIntegration::LambdaProxy(value)
    }
}

impl From<HttpUrlIntegration> for HttpRouteIntegration {
    fn from(value: HttpUrlIntegration) -> Self {
        HttpRouteIntegration::HttpUrl(value)
    }
}

impl From<PrivateIntegration> for HttpRouteIntegration {
    fn from(value: PrivateIntegration) -> Self {
        HttpRouteIntegration::Private(value)
    }
}
