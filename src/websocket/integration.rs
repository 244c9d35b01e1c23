//! WebSocket route integrations.
//!
//! The closed sum covers the two backend kinds a WebSocket route can bind:
//! a Lambda function invoked over the service's path-style URI, and a mock
//! backend that answers without leaving the gateway.

use crate::construct::{StringValue, Token};

/// A Lambda integration for a WebSocket route.
#[derive(Debug, Clone)]
pub struct WebSocketLambdaIntegration {
    pub handler_arn: StringValue,
}

impl WebSocketLambdaIntegration {
    pub fn new<A: Into<StringValue>>(handler_arn: A) -> Self {
        Self { handler_arn: handler_arn.into() }
    }
}

/// The closed set of integration kinds a WebSocket route can bind.
#[derive(Debug, Clone)]
pub enum WebSocketRouteIntegration {
    Lambda(WebSocketLambdaIntegration),
    /// `MOCK`: the gateway answers without invoking a backend
    Mock,
}

/// The configuration record a WebSocket binder produces. Routes whose
/// records compare equal share one Cfn Integration per api.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSocketIntegrationConfig {
    pub integration_type: &'static str,
    pub uri: Option<StringValue>,
}

impl WebSocketIntegrationConfig {
    pub(crate) fn dedup_key(&self) -> String {
        format!(
            "{}|{}",
            self.integration_type,
            self.uri.as_ref().map(|u| u.canonical()).unwrap_or_default(),
        )
    }
}

impl WebSocketRouteIntegration {
    /// Produce the integration configuration record for a route. Lambda
    /// targets use the service's path-style invocation URI.
    pub(crate) fn bind(&self) -> WebSocketIntegrationConfig {
        match self {
            WebSocketRouteIntegration::Lambda(lambda) => WebSocketIntegrationConfig {
                integration_type: "AWS_PROXY",
                uri: Some(StringValue::join([
                    "arn:aws:apigateway:".into(),
                    Token::region().into(),
                    ":lambda:path/2015-03-31/functions/".into(),
                    lambda.handler_arn.clone(),
                    "/invocations".into(),
                ])),
            },
            WebSocketRouteIntegration::Mock => WebSocketIntegrationConfig {
                integration_type: "MOCK",
                uri: None,
            },
        }
    }
}

impl From<WebSocketLambdaIntegration> for WebSocketRouteIntegration {
    fn from(value: WebSocketLambdaIntegration) -> Self {
        WebSocketRouteIntegration::Lambda(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lambda_uri_is_path_style() {
        let config = WebSocketRouteIntegration::from(WebSocketLambdaIntegration::new(
            "arn:aws:lambda:us-east-1:111:function:chat",
        ))
        .bind();
        assert_eq!(config.integration_type, "AWS_PROXY");
        let uri = config.uri.unwrap().canonical();
        assert!(uri.starts_with("arn:aws:apigateway:"));
        assert!(uri.ends_with("/invocations"));
        assert!(uri.contains(":lambda:path/2015-03-31/functions/"));
    }

    #[test]
    fn mock_carries_no_uri() {
        let config = WebSocketRouteIntegration::Mock.bind();
        assert_eq!(config.integration_type, "MOCK");
        assert!(config.uri.is_none());
    }

    #[test]
    fn equal_lambda_targets_share_a_dedup_key() {
        let handler: StringValue = "arn:aws:lambda:us-east-1:111:function:chat".into();
        let a = WebSocketRouteIntegration::Lambda(WebSocketLambdaIntegration {
            handler_arn: handler.clone(),
        })
        .bind();
        let b = WebSocketRouteIntegration::Lambda(WebSocketLambdaIntegration {
            handler_arn: handler,
        })
        .bind();
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
