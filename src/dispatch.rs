//! Command dispatch and host registration.
//!
//! The dispatcher maps the fixed `bt …` command strings onto panel
//! operations. Chat-bot hosts disagree on how commands are attached, so
//! registration goes through the [`CommandHost`] capability trait and
//! probes the known styles in a fixed priority order.

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::client::PanelClient;
use crate::format::{format_site_list, format_system_status};

/// The fixed command surface, in registration order.
pub const COMMANDS: [&str; 4] = ["bt status", "bt sites", "bt restart panel", "bt help"];

const HELP_TEXT: &str = "可用命令:\n- bt status\n- bt sites\n- bt restart panel\n- bt help";
const UNKNOWN_TEXT: &str = "未知命令，请使用 bt help 查看支持的命令。";
const FAILURE_PREFIX: &str = "BT Panel 请求失败";

/// Command handler handed to a host. Hosts disagree on handler arity, so
/// handlers take an argument slice and ignore it.
pub type Handler = Box<dyn Fn(&[String]) -> String + Send + Sync>;

/// Outcome of offering a handler to one registration style. Unsupported
/// styles hand the handler back so the next style can be probed.
pub enum Registration {
    Accepted,
    Unsupported(Handler),
}

/// Registration capability of a chat-bot host. Every style defaults to
/// unsupported; a host implements whichever ones it actually has.
pub trait CommandHost {
    fn register_command(&mut self, name: &str, handler: Handler) -> Registration {
        let _ = name;
        Registration::Unsupported(handler)
    }

    fn add_command(&mut self, name: &str, handler: Handler) -> Registration {
        let _ = name;
        Registration::Unsupported(handler)
    }

    fn command(&mut self, name: &str, handler: Handler) -> Registration {
        let _ = name;
        Registration::Unsupported(handler)
    }

    fn register(&mut self, name: &str, handler: Handler) -> Registration {
        let _ = name;
        Registration::Unsupported(handler)
    }
}

/// Stateless mapping from command strings to panel operations.
pub struct Dispatcher {
    client: PanelClient,
}

impl Dispatcher {
    pub fn new(client: PanelClient) -> Self {
        Self { client }
    }

    /// Run one command and render the outcome. Client errors never escape:
    /// they come back as a failure-prefixed display string.
    pub fn dispatch(&self, command: &str) -> String {
        match self.handle(command) {
            Ok(text) => text,
            Err(err) => {
                log::error!("command {:?} failed: {:#}", command, err);
                format!("{}: {:#}", FAILURE_PREFIX, err)
            }
        }
    }

    fn handle(&self, command: &str) -> Result<String> {
        match command {
            "bt status" => Ok(format_system_status(&self.client.get_system_status()?)),
            "bt sites" => Ok(format_site_list(&self.client.list_sites()?)),
            "bt restart panel" => {
                let response = self.client.restart_panel()?;
                Ok(format!("面板重启结果: {}", response.message()))
            }
            "bt help" => Ok(HELP_TEXT.to_string()),
            _ => Ok(UNKNOWN_TEXT.to_string()),
        }
    }
}

/// Attach every command to the host, probing the registration styles in
/// priority order: `register_command`, `add_command`, `command`,
/// `register`. Fails if the host accepts none of them.
pub fn register_commands(host: &mut dyn CommandHost, dispatcher: Arc<Dispatcher>) -> Result<()> {
    for name in COMMANDS {
        let dispatcher = Arc::clone(&dispatcher);
        let mut handler: Handler = Box::new(move |_args| dispatcher.dispatch(name));

        handler = match host.register_command(name, handler) {
            Registration::Accepted => continue,
            Registration::Unsupported(h) => h,
        };
        handler = match host.add_command(name, handler) {
            Registration::Accepted => continue,
            Registration::Unsupported(h) => h,
        };
        handler = match host.command(name, handler) {
            Registration::Accepted => continue,
            Registration::Unsupported(h) => h,
        };
        match host.register(name, handler) {
            Registration::Accepted => {}
            Registration::Unsupported(_) => bail!("Host does not support command registration"),
        }
    }
    Ok(())
}
