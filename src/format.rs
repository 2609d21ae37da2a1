//! Display rendering for panel responses.
//!
//! Pure functions, never fail: missing or oddly-typed fields degrade to
//! placeholder text rather than erroring.

use serde_json::Value;

use crate::client::{display_value, truthy, PanelResponse};

const STATUS_KEYS: [&str; 4] = ["cpu", "mem", "disk", "network"];

pub fn format_system_status(response: &PanelResponse) -> String {
    let mut lines = vec!["BT Panel 系统状态:".to_string()];
    if let Some(Value::String(system)) = response.get("system") {
        lines.push(format!("系统版本: {}", system));
    }
    for key in STATUS_KEYS {
        if let Some(value) = response.get(key) {
            lines.push(format!("{}: {}", key.to_uppercase(), display_value(value)));
        }
    }
    lines.push(format!("消息: {}", response.message()));
    lines.join("\n")
}

pub fn format_site_list(response: &PanelResponse) -> String {
    let mut lines = vec!["站点列表:".to_string()];
    let mut count = 0;
    if let Some(Value::Array(items)) = response.get("data") {
        for item in items {
            let Value::Object(site) = item else { continue };
            let name = site
                .get("name")
                .map(display_value)
                .unwrap_or_else(|| "未知站点".to_string());
            let state = if site.get("status").map(truthy).unwrap_or(false) {
                "运行"
            } else {
                "停止"
            };
            let domain = site.get("domain").map(display_value).unwrap_or_default();
            lines.push(format!("- {} ({}) {}", name, state, domain));
            count += 1;
        }
    }
    if count == 0 {
        lines.push("暂无站点数据".to_string());
    }
    lines.push(format!("消息: {}", response.message()));
    lines.join("\n")
}
