//! Payload Integration Tests
//!
//! Checks the rendered incoming-webhook payload through the public API.

use serde_json::{json, Map, Value};

use mattermost_notifier::{MessageRenderer, NotificationRequest, NotifyError, PluginConfig, Trigger};

fn request(trigger: &str) -> NotificationRequest {
    let data = json!({
        "id": 55,
        "href": "https://rundeck.example.com/execution/55",
        "project": "data",
        "user": "dave",
        "failedNodeListString": "db-02",
        "job": {"name": "vacuum", "href": "https://rundeck.example.com/job/vacuum"},
    });
    let execution_data = match data {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    NotificationRequest::new(trigger, execution_data, Map::new())
}

fn render(request: &NotificationRequest, config: &PluginConfig) -> Result<Value, NotifyError> {
    let payload = MessageRenderer::shared()?.render(
        &request.trigger,
        &request.execution_data,
        &request.config,
        config,
    )?;
    Ok(serde_json::from_str(&payload).unwrap())
}

#[test]
fn test_color_matches_trigger_style() {
    let config = PluginConfig::new("https://chat.example.com/hooks/abc");
    for trigger in Trigger::ALL {
        let payload = render(&request(trigger.as_str()), &config).unwrap();
        assert_eq!(
            payload["attachments"][0]["color"],
            trigger.style().color.code()
        );
    }
}

#[test]
fn test_icon_url_presence_follows_config() {
    let without = PluginConfig::new("https://chat.example.com/hooks/abc");
    let with = without.clone().with_icon_url("https://example.com/r.png");

    let payload = render(&request("start"), &without).unwrap();
    assert!(payload.get("icon_url").is_none());

    let payload = render(&request("start"), &with).unwrap();
    assert_eq!(payload["icon_url"], "https://example.com/r.png");
}

#[test]
fn test_failed_nodes_only_on_failure() {
    let config = PluginConfig::new("https://chat.example.com/hooks/abc");
    let has_failed_nodes = |payload: &Value| {
        payload["attachments"][0]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .any(|field| field["title"] == "Failed Nodes")
    };

    assert!(has_failed_nodes(&render(&request("failure"), &config).unwrap()));
    assert!(!has_failed_nodes(&render(&request("success"), &config).unwrap()));
    assert!(!has_failed_nodes(&render(&request("start"), &config).unwrap()));
}

#[test]
fn test_unrecognized_trigger() {
    let config = PluginConfig::new("https://chat.example.com/hooks/abc");
    let err = render(&request("SUCCESS"), &config).unwrap_err();
    assert!(matches!(err, NotifyError::UnknownTrigger(_)));
}
