//! # Low-level CloudFormation resource records
//!
//! Flat, mechanical bindings for the `AWS::ApiGatewayV2::*` and
//! `AWS::PinpointEmail::*` resource types. Property names keep their
//! CloudFormation-canonical casing and enum-valued strings are emitted
//! exactly as AWS defines them. No logic lives here; the high-level layer
//! owns defaults, validation and wiring.

pub mod apigatewayv2;
pub mod pinpoint_email;

use serde::Serialize;

/// One emitted resource record: the `Type`/`Properties` pair that lands in
/// the template fragment under the resource's logical id.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum CfnResource {
    #[serde(rename = "AWS::ApiGatewayV2::Api")]
    Api(apigatewayv2::CfnApi),
    #[serde(rename = "AWS::ApiGatewayV2::Stage")]
    Stage(apigatewayv2::CfnStage),
    #[serde(rename = "AWS::ApiGatewayV2::Route")]
    Route(apigatewayv2::CfnRoute),
    #[serde(rename = "AWS::ApiGatewayV2::Integration")]
    Integration(apigatewayv2::CfnIntegration),
    #[serde(rename = "AWS::ApiGatewayV2::Authorizer")]
    Authorizer(apigatewayv2::CfnAuthorizer),
    #[serde(rename = "AWS::ApiGatewayV2::DomainName")]
    DomainName(apigatewayv2::CfnDomainName),
    #[serde(rename = "AWS::ApiGatewayV2::ApiMapping")]
    ApiMapping(apigatewayv2::CfnApiMapping),
    #[serde(rename = "AWS::ApiGatewayV2::VpcLink")]
    VpcLink(apigatewayv2::CfnVpcLink),
    #[serde(rename = "AWS::PinpointEmail::ConfigurationSet")]
    PinpointConfigurationSet(pinpoint_email::CfnConfigurationSet),
    #[serde(rename = "AWS::PinpointEmail::ConfigurationSetEventDestination")]
    PinpointConfigurationSetEventDestination(
        pinpoint_email::CfnConfigurationSetEventDestination,
    ),
    #[serde(rename = "AWS::PinpointEmail::DedicatedIpPool")]
    PinpointDedicatedIpPool(pinpoint_email::CfnDedicatedIpPool),
    #[serde(rename = "AWS::PinpointEmail::Identity")]
    PinpointIdentity(pinpoint_email::CfnIdentity),
}

impl CfnResource {
    /// The CloudFormation resource type string.
    pub fn resource_type(&self) -> &'static str {
        match self {
            CfnResource::Api(_) => "AWS::ApiGatewayV2::Api",
            CfnResource::Stage(_) => "AWS::ApiGatewayV2::Stage",
            CfnResource::Route(_) => "AWS::ApiGatewayV2::Route",
            CfnResource::Integration(_) => "AWS::ApiGatewayV2::Integration",
            CfnResource::Authorizer(_) => "AWS::ApiGatewayV2::Authorizer",
            CfnResource::DomainName(_) => "AWS::ApiGatewayV2::DomainName",
            CfnResource::ApiMapping(_) => "AWS::ApiGatewayV2::ApiMapping",
            CfnResource::VpcLink(_) => "AWS::ApiGatewayV2::VpcLink",
            CfnResource::PinpointConfigurationSet(_) => "AWS::PinpointEmail::ConfigurationSet",
            CfnResource::PinpointConfigurationSetEventDestination(_) => {
                "AWS::PinpointEmail::ConfigurationSetEventDestination"
            }
            CfnResource::PinpointDedicatedIpPool(_) => "AWS::PinpointEmail::DedicatedIpPool",
            CfnResource::PinpointIdentity(_) => "AWS::PinpointEmail::Identity",
        }
    }
}
