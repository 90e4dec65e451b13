//! Toolbridge CLI - chat with a language model that can use an MCP server's tools.
//!
//! Commands inside the chat loop:
//! - `/tools`: list the server's tools
//! - `/clear`: forget the conversation so far
//! - `quit`, `exit`, `q`: leave

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use toolbridge_core::config::ConfigLevel;
use toolbridge_core::{
    BridgeClient, ClientConfig, FileConfigLoader, ServerTarget, ToolDescriptor, TracingLogger,
};

/// Fallback server script when neither the command line nor the config names one
const DEFAULT_SERVER: &str = "weather.py";

#[derive(Parser)]
#[command(
    name = "toolbridge",
    about = "Chat with an LLM that can call the tools of an MCP server",
    version
)]
struct Cli {
    /// Server script or executable (.py runs under python, .js under node)
    server_path: Option<String>,

    /// Read settings from this YAML file instead of the user/workspace files
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the model
    #[arg(short, long, env = "TOOLBRIDGE_MODEL")]
    model: Option<String>,

    /// Override the conversation window (turns)
    #[arg(long)]
    max_context: Option<usize>,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let loader = FileConfigLoader::new(path, ConfigLevel::Workspace);
            if !loader.exists() {
                bail!("config file not found: {}", path.display());
            }
            loader.load_resolved()?
        }
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            FileConfigLoader::layered(cwd)?
        }
    };

    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    if let Some(max) = cli.max_context {
        config = config.with_max_context_messages(max);
    }
    Ok(config)
}

/// Exit words are matched case-insensitively
fn is_exit_command(query: &str) -> bool {
    matches!(query.to_lowercase().as_str(), "quit" | "exit" | "q")
}

fn tool_line(tool: &ToolDescriptor) -> String {
    if tool.description.is_empty() {
        format!("  - {}", tool.name)
    } else {
        format!("  - {}: {}", tool.name, tool.description)
    }
}

fn print_tools(client: &BridgeClient) {
    for tool in client.available_tools() {
        println!("{}", tool_line(&tool));
    }
}

fn prompt() -> std::io::Result<()> {
    print!("\nQuery: ");
    std::io::stdout().flush()
}

async fn chat_loop(client: &mut BridgeClient) -> anyhow::Result<()> {
    println!("\nMCP Client Started!");
    println!("Type your queries, '/tools', '/clear', or 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if is_exit_command(query) {
            break;
        }
        match query {
            "" => {}
            "/clear" => {
                client.clear_conversation();
                println!("Conversation cleared.");
            }
            "/tools" => print_tools(client),
            _ => {
                let response = client.process_query(query).await;
                match response.error() {
                    Some(error) => println!("\n{}", error),
                    None => {
                        for call in response.tool_calls() {
                            println!("\n[Used {} with {}]", call.tool, call.args);
                        }
                        println!("\n{}", response.content());
                    }
                }
            }
        }
        prompt()?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("TOOLBRIDGE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = load_config(&cli)?;
    tracing::debug!(provider = %config.provider, model = %config.model, "configuration loaded");

    let target = match (&cli.server_path, &config.server) {
        (Some(path), _) => ServerTarget::from_path(path),
        (None, Some(server)) => server.clone(),
        (None, None) => ServerTarget::from_path(DEFAULT_SERVER),
    };

    let mut client = BridgeClient::new(&config, Arc::new(TracingLogger));
    let connected = client.connect_target(&target).await;

    let result = match connected.error() {
        Some(error) => Err(anyhow::anyhow!("{}", error)),
        None => {
            println!("{}", connected.content());
            print_tools(&client);
            chat_loop(&mut client).await
        }
    };

    client.cleanup().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words_ignore_case() {
        for word in ["quit", "QUIT", "Exit", "q", "Q"] {
            assert!(is_exit_command(word), "{}", word);
        }
        assert!(!is_exit_command("quit now"));
        assert!(!is_exit_command("/clear"));
    }

    #[test]
    fn test_tool_line() {
        let alerts = ToolDescriptor::new("get_alerts", "Get weather alerts for a US state");
        assert_eq!(tool_line(&alerts), "  - get_alerts: Get weather alerts for a US state");
        assert_eq!(tool_line(&ToolDescriptor::new("ping", "")), "  - ping");
    }
}
