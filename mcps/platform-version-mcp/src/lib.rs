//! Platform Version MCP Library
//!
//! Answers requests on named channels with `"<PlatformName> <OSVersion>"`,
//! e.g. `"iOS 17.4"`. Any number of channel names can share one responder.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use platform_version_mcp::{PlatformInfoResponder, SysinfoHost};
//!
//! let responder = PlatformInfoResponder::new("Linux", Arc::new(SysinfoHost));
//! println!("{}", responder.get_platform_version()?);
//! ```
//!
//! # Usage as Binary
//!
//! Serve over stdio: `platform-version-mcp --channel jpeg12 --channel libjpeg12`
//!
//! Print once and exit: `platform-version-mcp --once`

pub mod channel;
pub mod config;
pub mod error;
pub mod host;
pub mod init;
pub mod responder;
pub mod server;

pub use channel::ChannelRouter;
pub use config::ResponderConfig;
pub use error::{ChannelError, ConfigError, PlatformQueryError, ToolCallError};
pub use host::{FixedHost, HostEnvironment, SysinfoHost};
pub use init::init_tracing;
pub use responder::{MethodCall, PlatformInfoResponder, VersionString};
pub use server::{InvokeChannelParams, PlatformVersionMcpServer};
