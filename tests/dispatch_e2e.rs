//! End-to-end dispatch scenarios against a mock panel server.
//!
//! The client is blocking, so each scenario runs it on a blocking task
//! while the mock server lives on the test runtime.

use std::sync::Arc;

use panelbot::{Dispatcher, PanelClient, PanelConfig};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher_for(base_url: &str) -> Arc<Dispatcher> {
    let config = PanelConfig {
        base_url: base_url.to_string(),
        api_key: "secret".to_string(),
        timeout_seconds: 5,
        verify_tls: true,
        token_mode: "time+md5key".to_string(),
    };
    Arc::new(Dispatcher::new(PanelClient::new(config).unwrap()))
}

async fn dispatch(base_url: String, command: &'static str) -> String {
    tokio::task::spawn_blocking(move || dispatcher_for(&base_url).dispatch(command))
        .await
        .unwrap()
}

#[tokio::test]
async fn status_command_formats_panel_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/system"))
        .and(query_param("action", "GetSystemTotal"))
        .and(body_string_contains("request_time="))
        .and(body_string_contains("request_token="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "system": "7.x",
            "cpu": "12%",
            "msg": "ok"
        })))
        .mount(&server)
        .await;

    let out = dispatch(server.uri(), "bt status").await;
    assert!(out.contains("系统版本: 7.x"), "missing version line: {}", out);
    assert!(out.contains("CPU: 12%"), "missing cpu line: {}", out);
    assert!(out.ends_with("消息: ok"), "unexpected tail: {}", out);
}

#[tokio::test]
async fn sites_command_reports_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/data"))
        .and(query_param("action", "getData"))
        .and(body_string_contains("table=sites"))
        .and(body_string_contains("limit=15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let out = dispatch(server.uri(), "bt sites").await;
    assert!(out.contains("暂无站点数据"), "missing placeholder: {}", out);
    assert!(out.ends_with("消息: OK"), "unexpected tail: {}", out);
}

#[tokio::test]
async fn restart_command_reports_panel_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/system"))
        .and(query_param("action", "RebootPanel"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": true, "msg": "重启中"})),
        )
        .mount(&server)
        .await;

    let out = dispatch(server.uri(), "bt restart panel").await;
    assert_eq!(out, "面板重启结果: 重启中");
}

#[tokio::test]
async fn server_error_becomes_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("panel exploded"))
        .mount(&server)
        .await;

    let out = dispatch(server.uri(), "bt status").await;
    assert!(out.starts_with("BT Panel 请求失败"), "unexpected: {}", out);
    assert!(out.contains("HTTP 500"), "missing status: {}", out);
    assert!(out.contains("panel exploded"), "missing body: {}", out);
}

#[tokio::test]
async fn non_json_body_becomes_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let out = dispatch(server.uri(), "bt status").await;
    assert!(out.contains("Invalid JSON response"), "unexpected: {}", out);
}

#[tokio::test]
async fn non_object_body_becomes_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let out = dispatch(server.uri(), "bt sites").await;
    assert!(
        out.contains("Unexpected response format (expected JSON object)"),
        "unexpected: {}",
        out
    );
}

#[tokio::test]
async fn unknown_command_skips_the_network() {
    let server = MockServer::start().await;

    let out = dispatch(server.uri(), "nonsense").await;
    assert_eq!(out, "未知命令，请使用 bt help 查看支持的命令。");

    // No mock was mounted; any request would have produced a 404 failure
    // message instead of the guidance text.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[test]
fn unsupported_token_mode_fails_before_any_request() {
    let config = PanelConfig {
        // Reserved TEST-NET address; a network attempt would time out.
        base_url: "http://192.0.2.1:8888".to_string(),
        api_key: "secret".to_string(),
        timeout_seconds: 1,
        verify_tls: true,
        token_mode: "hmac".to_string(),
    };
    let dispatcher = Dispatcher::new(PanelClient::new(config).unwrap());
    let out = dispatcher.dispatch("bt status");
    assert_eq!(out, "BT Panel 请求失败: Unsupported token_mode: hmac");
}
