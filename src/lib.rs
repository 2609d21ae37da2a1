// Library modules
pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod format;

// Re-export commonly used types
pub use auth::{build_auth_payload, SignedPayload};
pub use client::{PanelClient, PanelResponse};
pub use config::PanelConfig;
pub use dispatch::{register_commands, CommandHost, Dispatcher, Handler, Registration};
pub use format::{format_site_list, format_system_status};
