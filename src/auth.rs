//! Time-based request token derivation.
//!
//! Every request to the panel carries a `request_time`/`request_token`
//! pair derived from the shared API key, proving possession of the key
//! without sending it. The token's validity window is enforced server-side,
//! so the timestamp is re-read from the wall clock on every call.

use anyhow::{bail, Result};
use md5::{Digest, Md5};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{PanelConfig, TOKEN_MODE_TIME_KEY, TOKEN_MODE_TIME_MD5KEY};

/// Auth fields merged into every request body. Recomputed per call, never
/// cached or reused across requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedPayload {
    /// Decimal Unix seconds.
    pub request_time: String,
    /// 32-char lowercase hex MD5 digest.
    pub request_token: String,
}

fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

/// Derive the signed payload at the current wall-clock time.
pub fn build_auth_payload(config: &PanelConfig) -> Result<SignedPayload> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    build_auth_payload_at(config, now)
}

/// Same derivation with an explicit timestamp. Deterministic for a fixed
/// key, mode and timestamp.
pub fn build_auth_payload_at(config: &PanelConfig, unix_seconds: u64) -> Result<SignedPayload> {
    let request_time = unix_seconds.to_string();
    let seed = if config.token_mode == TOKEN_MODE_TIME_KEY {
        format!("{}{}", request_time, config.api_key)
    } else if config.token_mode == TOKEN_MODE_TIME_MD5KEY {
        format!("{}{}", request_time, md5_hex(&config.api_key))
    } else {
        bail!("Unsupported token_mode: {}", config.token_mode);
    };
    Ok(SignedPayload {
        request_time,
        request_token: md5_hex(&seed),
    })
}
