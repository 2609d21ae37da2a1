use anyhow::{Context, Result};
use clap::Parser;
use panelbot::{
    register_commands, CommandHost, Dispatcher, Handler, PanelClient, PanelConfig, Registration,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Run one BT Panel chat command and print the reply.
#[derive(Parser, Debug)]
#[command(name = "panelbot", version, about = "Chat-bot bridge for the BT Panel API")]
struct Cli {
    /// Config file path (defaults to ~/.panelbot/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command words, e.g. `bt status`
    #[arg(required = true)]
    command: Vec<String>,
}

/// Map-backed host standing in for a real chat-bot host.
#[derive(Default)]
struct CliHost {
    handlers: HashMap<String, Handler>,
}

impl CommandHost for CliHost {
    fn register_command(&mut self, name: &str, handler: Handler) -> Registration {
        self.handlers.insert(name.to_string(), handler);
        Registration::Accepted
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PanelConfig::load_from(path)?,
        None => PanelConfig::load()?,
    };
    let client = PanelClient::new(config)?;
    let dispatcher = Arc::new(Dispatcher::new(client));

    let mut host = CliHost::default();
    register_commands(&mut host, Arc::clone(&dispatcher))
        .context("Command registration failed")?;

    let command = cli.command.join(" ");
    let output = match host.handlers.get(&command) {
        Some(handler) => handler(&[]),
        // Unrecognized strings get the fixed guidance message.
        None => dispatcher.dispatch(&command),
    };
    println!("{}", output);
    Ok(())
}
