//! `AWS::PinpointEmail::*` property records.
//!
//! Purely mechanical bindings with no high-level layer on top. Records are
//! registered on a [`Stack`](crate::construct::Stack) through
//! [`Stack::add_cfn_resource`](crate::construct::Stack::add_cfn_resource).

use serde::Serialize;

use crate::construct::StringValue;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnConfigurationSet {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_options: Option<DeliveryOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reputation_options: Option<ReputationOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_options: Option<SendingOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_options: Option<TrackingOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeliveryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_pool_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReputationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reputation_metrics_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_redirect_domain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnConfigurationSetEventDestination {
    pub configuration_set_name: StringValue,
    pub event_destination_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_destination: Option<EventDestination>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_event_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_watch_destination: Option<CloudWatchDestination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinesis_firehose_destination: Option<KinesisFirehoseDestination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinpoint_destination: Option<PinpointDestination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sns_destination: Option<SnsDestination>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudWatchDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_configurations: Option<Vec<DimensionConfiguration>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimensionConfiguration {
    pub default_dimension_value: String,
    pub dimension_name: String,
    pub dimension_value_source: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KinesisFirehoseDestination {
    pub delivery_stream_arn: StringValue,
    pub iam_role_arn: StringValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PinpointDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_arn: Option<StringValue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsDestination {
    pub topic_arn: StringValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnDedicatedIpPool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnIdentity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim_signing_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_forwarding_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_from_attributes: Option<MailFromAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MailFromAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_on_mx_failure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_from_domain: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_set_serializes_options() {
        let set = CfnConfigurationSet {
            name: "transactional".into(),
            delivery_options: Some(DeliveryOptions { sending_pool_name: Some("pool-1".into()) }),
            reputation_options: Some(ReputationOptions { reputation_metrics_enabled: Some(true) }),
            sending_options: Some(SendingOptions { sending_enabled: Some(true) }),
            tracking_options: None,
            tags: Some(vec![Tag { key: "team".into(), value: "mail".into() }]),
        };
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["Name"], "transactional");
        assert_eq!(json["DeliveryOptions"]["SendingPoolName"], "pool-1");
        assert_eq!(json["ReputationOptions"]["ReputationMetricsEnabled"], true);
        assert_eq!(json["Tags"][0]["Key"], "team");
    }

    #[test]
    fn identity_mail_from_attributes() {
        let identity = CfnIdentity {
            name: "example.com".into(),
            dkim_signing_enabled: Some(true),
            feedback_forwarding_enabled: None,
            mail_from_attributes: Some(MailFromAttributes {
                behavior_on_mx_failure: Some("USE_DEFAULT_VALUE".into()),
                mail_from_domain: Some("mail.example.com".into()),
            }),
            tags: None,
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["DkimSigningEnabled"], true);
        assert_eq!(json["MailFromAttributes"]["BehaviorOnMxFailure"], "USE_DEFAULT_VALUE");
    }
}
