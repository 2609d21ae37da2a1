//! Blocking client for the BT Panel HTTP control API.
//!
//! One `PanelClient` per configured panel. Every operation is a single
//! signed POST with no retries; each failure funnels into one error with a
//! human-readable cause, classified in a fixed order (network, HTTP status,
//! JSON parse, body shape).

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::auth;
use crate::config::PanelConfig;

/// Decoded response body with the panel's loose message/status conventions.
#[derive(Clone, Debug)]
pub struct PanelResponse {
    raw: Map<String, Value>,
}

impl PanelResponse {
    pub fn new(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Human-readable message. `msg` wins over `message`, which wins over
    /// `error`; a body carrying none of them reads as "OK".
    pub fn message(&self) -> String {
        for key in ["msg", "message", "error"] {
            if let Some(value) = self.raw.get(key) {
                return display_value(value);
            }
        }
        "OK".to_string()
    }

    /// Success flag. `status` takes precedence over `success`; a body with
    /// neither is success, since HTTP-level classification already covered
    /// the negative cases.
    pub fn is_success(&self) -> bool {
        if let Some(status) = self.raw.get("status") {
            return truthy(status);
        }
        if let Some(success) = self.raw.get("success") {
            return truthy(success);
        }
        true
    }
}

/// Render a JSON value for display: strings verbatim, everything else in
/// its JSON form.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose truthiness over JSON values: null, false, zero and empty
/// containers are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Signed client for one panel. Safe to reuse serially; callers must
/// serialize concurrent invocations themselves.
pub struct PanelClient {
    config: PanelConfig,
    http: Client,
}

impl PanelClient {
    pub fn new(config: PanelConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// One signed POST. `path` carries its leading `/`; `extra` fields win
    /// over the auth fields on key collision.
    pub fn post(&self, path: &str, extra: &[(&str, &str)]) -> Result<PanelResponse> {
        let url = format!("{}{}", self.config.normalized_base_url(), path);
        let payload = auth::build_auth_payload(&self.config)?;

        let mut form: BTreeMap<&str, &str> = BTreeMap::new();
        form.insert("request_time", &payload.request_time);
        form.insert("request_token", &payload.request_token);
        for &(key, value) in extra {
            form.insert(key, value);
        }

        log::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .map_err(|e| anyhow!("Request failed: {}", e))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| anyhow!("Request failed: {}", e))?;
        if status.as_u16() >= 400 {
            bail!("HTTP {}: {}", status.as_u16(), text);
        }

        let parsed: Value =
            serde_json::from_str(&text).map_err(|_| anyhow!("Invalid JSON response: {}", text))?;
        let Value::Object(raw) = parsed else {
            bail!("Unexpected response format (expected JSON object)");
        };
        Ok(PanelResponse::new(raw))
    }

    // The three panel operations. Each is one round trip; failures surface
    // to the caller unchanged.

    pub fn get_system_status(&self) -> Result<PanelResponse> {
        self.post("/system?action=GetSystemTotal", &[])
    }

    pub fn list_sites(&self) -> Result<PanelResponse> {
        self.post(
            "/data?action=getData",
            &[("table", "sites"), ("limit", "15"), ("p", "1")],
        )
    }

    pub fn restart_panel(&self) -> Result<PanelResponse> {
        self.post("/system?action=RebootPanel", &[])
    }
}
