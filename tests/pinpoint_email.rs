//! The Pinpoint Email records go through the mechanical `add_cfn_resource`
//! path: no high-level layer, just registration and template emission.

use apigw_constructs::cfn::pinpoint_email::{
    CfnConfigurationSet, CfnConfigurationSetEventDestination, CfnIdentity, EventDestination,
    MailFromAttributes, SendingOptions, SnsDestination,
};
use apigw_constructs::cfn::CfnResource;
use apigw_constructs::Stack;

#[test]
fn configuration_set_with_event_destination() {
    let mut stack = Stack::new("Mail").unwrap();
    let set = stack
        .add_cfn_resource(
            "Transactional",
            CfnResource::PinpointConfigurationSet(CfnConfigurationSet {
                name: "transactional".into(),
                delivery_options: None,
                reputation_options: None,
                sending_options: Some(SendingOptions { sending_enabled: Some(true) }),
                tracking_options: None,
                tags: None,
            }),
        )
        .unwrap();
    stack
        .add_cfn_resource(
            "Bounces",
            CfnResource::PinpointConfigurationSetEventDestination(
                CfnConfigurationSetEventDestination {
                    configuration_set_name: set.into(),
                    event_destination_name: "bounces".into(),
                    event_destination: Some(EventDestination {
                        enabled: Some(true),
                        matching_event_types: Some(vec!["BOUNCE".into(), "COMPLAINT".into()]),
                        cloud_watch_destination: None,
                        kinesis_firehose_destination: None,
                        pinpoint_destination: None,
                        sns_destination: Some(SnsDestination {
                            topic_arn: "arn:aws:sns:us-east-1:111:bounces".into(),
                        }),
                    }),
                },
            ),
        )
        .unwrap();

    let template = stack.synth().unwrap();
    let sets = template.of_type("AWS::PinpointEmail::ConfigurationSet");
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].1["Properties"]["SendingOptions"]["SendingEnabled"], true);

    let destinations =
        template.of_type("AWS::PinpointEmail::ConfigurationSetEventDestination");
    assert_eq!(destinations.len(), 1);
    let props = &destinations[0].1["Properties"];
    assert_eq!(props["ConfigurationSetName"], serde_json::json!({ "Ref": sets[0].0 }));
    assert_eq!(
        props["EventDestination"]["MatchingEventTypes"],
        serde_json::json!(["BOUNCE", "COMPLAINT"])
    );
    assert_eq!(
        props["EventDestination"]["SnsDestination"]["TopicArn"],
        "arn:aws:sns:us-east-1:111:bounces"
    );
}

#[test]
fn identity_with_mail_from_domain() {
    let mut stack = Stack::new("Mail").unwrap();
    stack
        .add_cfn_resource(
            "Sender",
            CfnResource::PinpointIdentity(CfnIdentity {
                name: "example.com".into(),
                dkim_signing_enabled: Some(true),
                feedback_forwarding_enabled: None,
                mail_from_attributes: Some(MailFromAttributes {
                    behavior_on_mx_failure: Some("USE_DEFAULT_VALUE".into()),
                    mail_from_domain: Some("mail.example.com".into()),
                }),
                tags: None,
            }),
        )
        .unwrap();

    let template = stack.synth().unwrap();
    let identities = template.of_type("AWS::PinpointEmail::Identity");
    assert_eq!(identities.len(), 1);
    let props = &identities[0].1["Properties"];
    assert_eq!(props["Name"], "example.com");
    assert_eq!(props["DkimSigningEnabled"], true);
    assert_eq!(props["MailFromAttributes"]["MailFromDomain"], "mail.example.com");
}
