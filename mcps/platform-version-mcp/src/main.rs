//! Platform Version MCP Server
//!
//! # Usage
//!
//! Run directly: `platform-version-mcp`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "platform-version": { "command": "./platform-version-mcp" } } }
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use platform_version_mcp::{
    config::CliOverrides, init_tracing, PlatformVersionMcpServer, ResponderConfig, SysinfoHost,
};
use rmcp::ServiceExt;

#[derive(Debug, Parser)]
#[command(name = "platform-version-mcp", version, about)]
struct Cli {
    /// Path to a TOML config file [default: $PLATFORM_VERSION_CONFIG_PATH, then
    /// ~/.binks/platform-version.toml if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Platform name placed before the OS version
    #[arg(long)]
    platform_name: Option<String>,

    /// Channel name to register; repeat for more than one
    #[arg(long = "channel")]
    channels: Vec<String>,

    /// Answer "<name> " instead of failing when the host version is empty
    #[arg(long)]
    allow_empty_version: bool,

    /// Print the version string once and exit instead of serving
    #[arg(long)]
    once: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            platform_name: self.platform_name.clone(),
            channels: self.channels.clone(),
            allow_empty_version: self.allow_empty_version,
        }
    }

    fn resolve_config(&self) -> anyhow::Result<ResponderConfig> {
        Ok(ResponderConfig::resolve(
            self.config.as_deref(),
            |key| std::env::var(key).ok(),
            &self.overrides(),
        )?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = cli.resolve_config().context("invalid configuration")?;

    if cli.once {
        let responder = config.build_responder(Arc::new(SysinfoHost));
        return match responder.get_platform_version() {
            Ok(version) => {
                println!("{version}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("error: {e}");
                Ok(ExitCode::FAILURE)
            }
        };
    }

    tracing::info!(
        platform = %config.platform_name,
        channels = ?config.channels,
        "Starting platform_version_mcp MCP Server"
    );

    let server = PlatformVersionMcpServer::from_config(&config)?;
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(ExitCode::SUCCESS)
}
