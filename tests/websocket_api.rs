//! End-to-end scenarios for the WebSocket API construct layer.

use apigw_constructs::common::StageOptions;
use apigw_constructs::websocket::{
    WebSocketApi, WebSocketApiProps, WebSocketLambdaIntegration, WebSocketRouteIntegration,
    WebSocketRouteOptions,
};
use apigw_constructs::{Error, Stack};

const HANDLER: &str = "arn:aws:lambda:us-east-1:111:function:chat";

#[test]
fn lifecycle_routes_cover_the_reserved_keys() {
    let mut stack = Stack::new("Demo").unwrap();
    WebSocketApi::new(
        &mut stack,
        "Chat",
        WebSocketApiProps {
            connect_route_options: Some(WebSocketRouteOptions::new(
                WebSocketLambdaIntegration::new(HANDLER),
            )),
            disconnect_route_options: Some(WebSocketRouteOptions::new(
                WebSocketLambdaIntegration::new(HANDLER),
            )),
            default_route_options: Some(WebSocketRouteOptions::new(
                WebSocketLambdaIntegration::new(HANDLER),
            )),
            ..Default::default()
        },
    )
    .unwrap();

    let template = stack.synth().unwrap();
    let routes = template.of_type("AWS::ApiGatewayV2::Route");
    let mut keys: Vec<&str> = routes
        .iter()
        .map(|(_, r)| r["Properties"]["RouteKey"].as_str().unwrap())
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, ["$connect", "$default", "$disconnect"]);

    // One Lambda target, three routes: the per-api dedup applies here too.
    assert_eq!(template.of_type("AWS::ApiGatewayV2::Integration").len(), 1);

    let api = &template.of_type("AWS::ApiGatewayV2::Api")[0].1["Properties"];
    assert_eq!(api["ProtocolType"], "WEBSOCKET");
    assert_eq!(api["RouteSelectionExpression"], "$request.body.action");
}

#[test]
fn action_routes_dispatch_on_a_custom_expression() {
    let mut stack = Stack::new("Demo").unwrap();
    let api = WebSocketApi::new(
        &mut stack,
        "Chat",
        WebSocketApiProps {
            route_selection_expression: Some("$request.body.kind".into()),
            ..Default::default()
        },
    )
    .unwrap();
    api.add_route(
        &mut stack,
        "sendMessage",
        WebSocketRouteOptions {
            integration: WebSocketLambdaIntegration::new(HANDLER).into(),
            return_response: true,
        },
    )
    .unwrap();

    let err = api
        .add_route(
            &mut stack,
            "sendMessage",
            WebSocketRouteOptions::new(WebSocketLambdaIntegration::new(HANDLER)),
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvariantViolation { .. }), "duplicate route key");

    let template = stack.synth().unwrap();
    let api_props = &template.of_type("AWS::ApiGatewayV2::Api")[0].1["Properties"];
    assert_eq!(api_props["RouteSelectionExpression"], "$request.body.kind");

    let route = &template.of_type("AWS::ApiGatewayV2::Route")[0].1["Properties"];
    assert_eq!(route["RouteKey"], "sendMessage");
    assert_eq!(route["RouteResponseSelectionExpression"], "$default");

    let integration = &template.of_type("AWS::ApiGatewayV2::Integration")[0].1["Properties"];
    assert_eq!(integration["IntegrationType"], "AWS_PROXY");
    assert_eq!(
        integration["IntegrationUri"],
        serde_json::json!({
            "Fn::Join": ["", [
                "arn:aws:apigateway:",
                { "Ref": "AWS::Region" },
                ":lambda:path/2015-03-31/functions/",
                HANDLER,
                "/invocations",
            ]]
        })
    );
}

#[test]
fn mock_routes_answer_without_a_backend() {
    let mut stack = Stack::new("Demo").unwrap();
    let api = WebSocketApi::new(&mut stack, "Chat", WebSocketApiProps::default()).unwrap();
    api.add_route(
        &mut stack,
        "ping",
        WebSocketRouteOptions::new(WebSocketRouteIntegration::Mock),
    )
    .unwrap();

    let template = stack.synth().unwrap();
    let props = &template.of_type("AWS::ApiGatewayV2::Integration")[0].1["Properties"];
    assert_eq!(props["IntegrationType"], "MOCK");
    assert!(props.get("IntegrationUri").is_none());
}

#[test]
fn stage_urls_and_callback_urls() {
    let mut stack = Stack::new("Demo").unwrap();
    let api = WebSocketApi::new(&mut stack, "Chat", WebSocketApiProps::default()).unwrap();
    let stage = api
        .add_stage(
            &mut stack,
            "Dev",
            StageOptions {
                stage_name: Some("dev".into()),
                auto_deploy: Some(true),
                domain_mapping: None,
            },
        )
        .unwrap();

    let template = stack.synth().unwrap();
    let props = &template.of_type("AWS::ApiGatewayV2::Stage")[0].1["Properties"];
    assert_eq!(props["StageName"], "dev");
    assert_eq!(props["AutoDeploy"], true);

    let url = serde_json::to_value(stage.url()).unwrap();
    let parts = url["Fn::Join"][1].as_array().unwrap();
    assert_eq!(parts[0], "wss://");
    let callback = serde_json::to_value(stage.callback_url()).unwrap();
    assert_eq!(callback["Fn::Join"][1][0], "https://");
}

#[test]
fn metrics_need_at_least_one_stage() {
    let mut stack = Stack::new("Demo").unwrap();
    let api = WebSocketApi::new(&mut stack, "Chat", WebSocketApiProps::default()).unwrap();
    let err = api.metric_count(&stack, Default::default()).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation { .. }));

    api.add_stage(
        &mut stack,
        "Dev",
        StageOptions { stage_name: Some("dev".into()), ..Default::default() },
    )
    .unwrap();
    assert!(api.metric_count(&stack, Default::default()).is_ok());
}
