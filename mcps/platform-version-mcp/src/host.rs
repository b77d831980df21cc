//! Host environment accessors
//!
//! The responder never reads the OS directly. It asks a [`HostEnvironment`],
//! which keeps the lookup swappable for embedding and tests.

use sysinfo::System;

use crate::error::PlatformQueryError;

/// Synchronous, side-effect-free access to the host OS version
pub trait HostEnvironment: Send + Sync {
    /// Current OS version as reported by the host, untrimmed
    fn os_version(&self) -> Result<String, PlatformQueryError>;
}

/// Reads the OS version through `sysinfo`
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoHost;

impl HostEnvironment for SysinfoHost {
    fn os_version(&self) -> Result<String, PlatformQueryError> {
        System::os_version().ok_or(PlatformQueryError::Unavailable)
    }
}

/// Host that always answers with the same outcome
#[derive(Debug, Clone)]
pub struct FixedHost {
    outcome: Result<String, PlatformQueryError>,
}

impl FixedHost {
    pub fn version(version: impl Into<String>) -> Self {
        Self {
            outcome: Ok(version.into()),
        }
    }

    pub fn failing(error: PlatformQueryError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl HostEnvironment for FixedHost {
    fn os_version(&self) -> Result<String, PlatformQueryError> {
        self.outcome.clone()
    }
}

/// Display name for the OS this binary was built for
pub fn default_platform_name() -> String {
    platform_display_name(std::env::consts::OS)
}

fn platform_display_name(os: &str) -> String {
    match os {
        "macos" => "macOS",
        "ios" => "iOS",
        "linux" => "Linux",
        "windows" => "Windows",
        "android" => "Android",
        "freebsd" => "FreeBSD",
        other => other,
    }
    .to_string()
}
