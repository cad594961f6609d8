//! Notification Delivery Integration Tests
//!
//! Runs the notifier against an httptest server standing in for the
//! Mattermost incoming-webhook endpoint.

use std::time::Duration;

use httptest::all_of;
use httptest::matchers::*;
use httptest::responders::*;
use httptest::{Expectation, Server};
use serde_json::{json, Map, Value};

use mattermost_notifier::{MessageRenderer, Notifier, NotifyError, PluginConfig};

const HOOK_PATH: &str = "/hooks/xk3f9qz1ebgxdpn8e7ah4kqmrw";

fn execution_data() -> Map<String, Value> {
    match json!({
        "id": 981,
        "href": "https://rundeck.example.com/project/ops/execution/show/981",
        "project": "ops",
        "user": "carol",
        "argstring": "-env prod -tag a&b=c",
        "job": {
            "name": "déploiement \"blue/green\"",
            "group": "release",
            "href": "https://rundeck.example.com/project/ops/job/show/f00",
        },
    }) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn notifier_for(server: &Server) -> Notifier {
    Notifier::new(PluginConfig::new(server.url_str(HOOK_PATH))).unwrap()
}

// ============================================================================
// Accepted deliveries
// ============================================================================

#[test]
fn test_notify_returns_true_when_endpoint_answers_ok() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", HOOK_PATH),
            request::headers(contains((
                "content-type",
                "application/x-www-form-urlencoded; charset=utf-8"
            ))),
            request::body(url_decoded(contains(key("payload")))),
        ])
        .times(3)
        .respond_with(status_code(200).body("ok")),
    );

    let notifier = notifier_for(&server);
    for trigger in ["start", "success", "failure"] {
        assert!(notifier
            .notify(trigger, &execution_data(), &Map::new())
            .unwrap());
    }
}

#[test]
fn test_posted_payload_matches_rendered_payload() {
    let config = PluginConfig::new("http://placeholder.invalid/")
        .with_icon_url("https://example.com/icons/rundeck.png");
    let mut request_config = Map::new();
    request_config.insert("channel".into(), json!("town-square"));

    let expected = MessageRenderer::shared()
        .unwrap()
        .render("failure", &execution_data(), &request_config, &config)
        .unwrap();
    assert!(expected.contains("\"icon_url\""));
    assert!(expected.contains("a&b=c"));

    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", HOOK_PATH),
            request::body(url_decoded(contains(("payload", eq(expected))))),
        ])
        .respond_with(status_code(200).body("ok")),
    );

    let config = PluginConfig {
        webhook_url: server.url_str(HOOK_PATH),
        ..config
    };
    let notifier = Notifier::new(config).unwrap();
    assert!(notifier
        .notify("failure", &execution_data(), &request_config)
        .unwrap());
}

// ============================================================================
// Rejected deliveries
// ============================================================================

#[test]
fn test_notify_rejected_when_body_is_not_ok() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", HOOK_PATH))
            .respond_with(status_code(200).body("invalid_payload")),
    );

    let notifier = notifier_for(&server);
    let err = notifier
        .notify("success", &execution_data(), &Map::new())
        .unwrap_err();

    assert!(matches!(err, NotifyError::DeliveryRejected { status: 200, .. }));
    assert!(err.to_string().contains("invalid_payload"));
}

#[test]
fn test_notify_captures_error_status_body() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", HOOK_PATH)).respond_with(
            status_code(400).body(r#"{"id":"web.incoming_webhook.parse.app_error","status_code":400}"#),
        ),
    );

    let notifier = notifier_for(&server);
    let err = notifier
        .notify("start", &execution_data(), &Map::new())
        .unwrap_err();

    match err {
        NotifyError::DeliveryRejected { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("web.incoming_webhook.parse.app_error"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ============================================================================
// Failures before or during I/O
// ============================================================================

#[test]
fn test_unknown_trigger_never_reaches_endpoint() {
    let server = Server::run();
    server.expect(
        Expectation::matching(any())
            .times(0)
            .respond_with(status_code(200).body("ok")),
    );

    let notifier = notifier_for(&server);
    let err = notifier
        .notify("avgduration", &execution_data(), &Map::new())
        .unwrap_err();
    assert!(matches!(err, NotifyError::UnknownTrigger(_)));
}

#[test]
fn test_malformed_webhook_url() {
    let notifier = Notifier::new(PluginConfig::new("not a url")).unwrap();
    let err = notifier
        .notify("success", &execution_data(), &Map::new())
        .unwrap_err();
    assert!(matches!(err, NotifyError::InvalidUrl(_)));
}

#[test]
fn test_timeout_is_connection_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", HOOK_PATH)).respond_with(
            delay_and_then(Duration::from_secs(3), status_code(200).body("ok")),
        ),
    );

    let config = PluginConfig::new(server.url_str(HOOK_PATH)).with_timeout_secs(1);
    let notifier = Notifier::new(config).unwrap();
    let err = notifier
        .notify("success", &execution_data(), &Map::new())
        .unwrap_err();
    assert!(matches!(err, NotifyError::Connection(_)));
    assert!(err.is_transient());
    assert!(!err.to_string().contains(HOOK_PATH));
}

#[test]
fn test_send_test_against_endpoint() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", HOOK_PATH))
            .respond_with(status_code(200).body("ok")),
    );

    let notifier = notifier_for(&server);
    let result = notifier.send_test();
    assert!(result.success, "{:?}", result.error);
}
