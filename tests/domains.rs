//! Custom-domain mapping rules and private-network integrations.

use apigw_constructs::common::{
    ApiMapping, ApiMappingProps, DomainName, DomainNameProps, StageOptions, Vpc, VpcLinkProps,
};
use apigw_constructs::http::{
    AddRoutesOptions, HttpApi, HttpApiProps, PrivateIntegration,
};
use apigw_constructs::{Error, HttpMethod, Stack};

fn domain(stack: &mut Stack, id: &str) -> DomainName {
    DomainName::new(
        stack,
        id,
        DomainNameProps {
            domain_name: "api.example.com".into(),
            certificate_arn: "arn:aws:acm:us-east-1:111:certificate/abc".into(),
        },
    )
    .unwrap()
}

fn api_with_default_stage(stack: &mut Stack, id: &str) -> HttpApi {
    HttpApi::new(stack, id, HttpApiProps::default()).unwrap()
}

#[test]
fn a_root_mapping_excludes_keyed_mappings() {
    let mut stack = Stack::new("Demo").unwrap();
    let domain = domain(&mut stack, "Domain");
    let a = api_with_default_stage(&mut stack, "A");
    let b = api_with_default_stage(&mut stack, "B");

    ApiMapping::new(
        &mut stack,
        "Root",
        &a,
        ApiMappingProps { domain_name: domain.clone(), stage: None, api_mapping_key: None },
    )
    .unwrap();

    let err = ApiMapping::new(
        &mut stack,
        "Keyed",
        &b,
        ApiMappingProps {
            domain_name: domain,
            stage: None,
            api_mapping_key: Some("bar".into()),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvariantViolation { .. }));
}

#[test]
fn keyed_mappings_exclude_a_late_root_mapping() {
    let mut stack = Stack::new("Demo").unwrap();
    let domain = domain(&mut stack, "Domain");
    let a = api_with_default_stage(&mut stack, "A");
    let b = api_with_default_stage(&mut stack, "B");

    ApiMapping::new(
        &mut stack,
        "Keyed",
        &a,
        ApiMappingProps {
            domain_name: domain.clone(),
            stage: None,
            api_mapping_key: Some("v1".into()),
        },
    )
    .unwrap();

    let err = ApiMapping::new(
        &mut stack,
        "Root",
        &b,
        ApiMappingProps { domain_name: domain, stage: None, api_mapping_key: None },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvariantViolation { .. }));
}

#[test]
fn duplicate_mapping_keys_are_rejected() {
    let mut stack = Stack::new("Demo").unwrap();
    let domain = domain(&mut stack, "Domain");
    let a = api_with_default_stage(&mut stack, "A");
    let b = api_with_default_stage(&mut stack, "B");

    for (id, api) in [("First", &a), ("Second", &b)] {
        let result = ApiMapping::new(
            &mut stack,
            id,
            api,
            ApiMappingProps {
                domain_name: domain.clone(),
                stage: None,
                api_mapping_key: Some("v1".into()),
            },
        );
        if id == "First" {
            result.unwrap();
        } else {
            assert!(matches!(result.unwrap_err(), Error::InvariantViolation { .. }));
        }
    }
}

#[test]
fn mapping_requires_an_existing_stage() {
    let mut stack = Stack::new("Demo").unwrap();
    let domain = domain(&mut stack, "Domain");
    let api = HttpApi::new(
        &mut stack,
        "Api",
        HttpApiProps { create_default_stage: false, ..Default::default() },
    )
    .unwrap();

    let err = ApiMapping::new(
        &mut stack,
        "Mapping",
        &api,
        ApiMappingProps {
            domain_name: domain.clone(),
            stage: Some("prod".into()),
            api_mapping_key: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvariantViolation { .. }));

    let err = ApiMapping::new(
        &mut stack,
        "Unset",
        &api,
        ApiMappingProps { domain_name: domain, stage: None, api_mapping_key: None },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }), "no default stage to fall back on");
}

#[test]
fn private_integration_rides_a_vpc_link() {
    let mut stack = Stack::new("Demo").unwrap();
    let api = api_with_default_stage(&mut stack, "Api");
    let link = api
        .add_vpc_link(
            &mut stack,
            "Link",
            VpcLinkProps {
                vpc: Vpc {
                    vpc_id: "vpc-123".into(),
                    private_subnet_ids: vec!["subnet-a".into(), "subnet-b".into()],
                },
                subnets: None,
                security_groups: vec!["sg-1".into()],
                vpc_link_name: None,
            },
        )
        .unwrap();
    api.add_routes(
        &mut stack,
        AddRoutesOptions {
            path: "/internal".into(),
            methods: Some(vec![HttpMethod::Any]),
            integration: PrivateIntegration {
                uri: "arn:aws:elasticloadbalancing:us-east-1:111:listener/app/x".into(),
                vpc_link: link.clone(),
                method: None,
            }
            .into(),
            authorizer: None,
            authorization_scopes: None,
        },
    )
    .unwrap();

    let template = stack.synth().unwrap();
    let links = template.of_type("AWS::ApiGatewayV2::VpcLink");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].1["Properties"]["SubnetIds"], serde_json::json!(["subnet-a", "subnet-b"]));

    let props = &template.of_type("AWS::ApiGatewayV2::Integration")[0].1["Properties"];
    assert_eq!(props["ConnectionType"], "VPC_LINK");
    assert_eq!(props["ConnectionId"], serde_json::json!({ "Ref": links[0].0 }));
    assert_eq!(props["IntegrationType"], "HTTP_PROXY");
    assert_eq!(props["IntegrationMethod"], "ANY");

    let err = link.add_subnets(&mut stack, ["subnet-c".into()]).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation { .. }), "sets freeze at synthesis");
}

#[test]
fn a_domain_fronts_stages_of_multiple_apis() {
    let mut stack = Stack::new("Demo").unwrap();
    let domain = domain(&mut stack, "Domain");
    let a = api_with_default_stage(&mut stack, "A");
    let b = HttpApi::new(
        &mut stack,
        "B",
        HttpApiProps { create_default_stage: false, ..Default::default() },
    )
    .unwrap();
    b.add_stage(
        &mut stack,
        "Prod",
        StageOptions { stage_name: Some("prod".into()), ..Default::default() },
    )
    .unwrap();

    ApiMapping::new(
        &mut stack,
        "MapA",
        &a,
        ApiMappingProps {
            domain_name: domain.clone(),
            stage: None,
            api_mapping_key: Some("a".into()),
        },
    )
    .unwrap();
    ApiMapping::new(
        &mut stack,
        "MapB",
        &b,
        ApiMappingProps {
            domain_name: domain,
            stage: Some("prod".into()),
            api_mapping_key: Some("b".into()),
        },
    )
    .unwrap();

    let template = stack.synth().unwrap();
    let mappings = template.of_type("AWS::ApiGatewayV2::ApiMapping");
    assert_eq!(mappings.len(), 2);
}
