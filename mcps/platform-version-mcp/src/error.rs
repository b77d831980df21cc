//! Error types for platform version queries
//!
//! Each layer has its own error enum. Query failures are carried through the
//! channel and MCP layers without rewording, so the caller always sees the
//! message the host produced.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// The host environment could not supply a usable OS version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformQueryError {
    /// The host exposes no OS version at all
    #[error("host environment does not expose an OS version")]
    Unavailable,

    /// The host returned an empty or whitespace-only version
    #[error("host environment returned an empty OS version")]
    EmptyVersion,

    /// The host accessor itself failed
    #[error("host environment query failed: {0}")]
    Host(String),
}

/// Errors raised while routing a method call to a channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error(transparent)]
    Query(#[from] PlatformQueryError),
}

/// Errors raised while building or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("platform name must not be empty")]
    EmptyPlatformName,

    #[error("at least one channel must be configured")]
    NoChannels,

    #[error("channel names must not be empty")]
    EmptyChannelName,

    #[error("duplicate channel name: {0}")]
    DuplicateChannel(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("failed to read config file {path}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Errors from calling server tools in-process
#[derive(Debug, Error)]
pub enum ToolCallError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("mcp error: {0}")]
    Mcp(String),
}

impl From<McpError> for ToolCallError {
    fn from(err: McpError) -> Self {
        ToolCallError::Mcp(err.message.to_string())
    }
}

impl From<PlatformQueryError> for McpError {
    fn from(err: PlatformQueryError) -> Self {
        McpError::internal_error(err.to_string(), None)
    }
}

impl From<ChannelError> for McpError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::UnknownChannel(_) => McpError::invalid_params(err.to_string(), None),
            ChannelError::Query(query) => query.into(),
        }
    }
}
