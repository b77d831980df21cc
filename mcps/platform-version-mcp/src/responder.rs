//! Platform version responder

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::PlatformQueryError;
use crate::host::HostEnvironment;

/// Separator between the platform name and the OS version
pub const SEPARATOR: char = ' ';

/// A request arriving on a channel. Neither field affects the answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// `"<PlatformName> <OSVersion>"`, built fresh for every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString {
    value: String,
    split: usize,
}

impl VersionString {
    fn new(platform: &str, version: &str) -> Self {
        let mut value = String::with_capacity(platform.len() + 1 + version.len());
        value.push_str(platform);
        value.push(SEPARATOR);
        value.push_str(version);
        Self {
            value,
            split: platform.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn platform(&self) -> &str {
        &self.value[..self.split]
    }

    pub fn version(&self) -> &str {
        &self.value[self.split + SEPARATOR.len_utf8()..]
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for VersionString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Serialize for VersionString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

/// Answers every query with the host's platform version string.
///
/// Holds only immutable state, so one instance can be shared across any
/// number of channels and concurrent callers.
#[derive(Clone)]
pub struct PlatformInfoResponder {
    platform_name: String,
    allow_empty_version: bool,
    host: Arc<dyn HostEnvironment>,
}

impl PlatformInfoResponder {
    pub fn new(platform_name: impl Into<String>, host: Arc<dyn HostEnvironment>) -> Self {
        Self {
            platform_name: platform_name.into(),
            allow_empty_version: false,
            host,
        }
    }

    /// Accept an empty host version instead of failing with
    /// [`PlatformQueryError::EmptyVersion`]
    pub fn allow_empty_version(mut self, allow: bool) -> Self {
        self.allow_empty_version = allow;
        self
    }

    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }

    pub fn get_platform_version(&self) -> Result<VersionString, PlatformQueryError> {
        let raw = self.host.os_version().inspect_err(|e| {
            tracing::warn!(error = %e, "OS version query failed");
        })?;
        let version = raw.trim();

        if version.is_empty() && !self.allow_empty_version {
            tracing::warn!("host returned an empty OS version");
            return Err(PlatformQueryError::EmptyVersion);
        }

        Ok(VersionString::new(&self.platform_name, version))
    }

    /// Channel entry point. The call's method and arguments are ignored.
    pub fn handle(&self, call: &MethodCall) -> Result<VersionString, PlatformQueryError> {
        tracing::debug!(method = %call.method, "handling method call");
        self.get_platform_version()
    }
}

impl fmt::Debug for PlatformInfoResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformInfoResponder")
            .field("platform_name", &self.platform_name)
            .field("allow_empty_version", &self.allow_empty_version)
            .finish_non_exhaustive()
    }
}
