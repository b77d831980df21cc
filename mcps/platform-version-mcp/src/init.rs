//! Logging setup
//!
//! Logs always go to stderr: stdout carries the MCP protocol when serving and
//! the bare version string in one-shot mode.

use tracing_subscriber::{
    filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

pub const LOG_TARGET: &str = "platform_version_mcp";

/// Filter from `RUST_LOG` when it is set, otherwise `platform_version_mcp=info`
pub fn build_filter(rust_log: Option<&str>) -> Result<EnvFilter, ParseError> {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(format!("{LOG_TARGET}=info")),
    }
}

/// Initialize tracing filtered by `RUST_LOG`. Set `LOG_FORMAT=json` for JSON lines.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref())?;

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
