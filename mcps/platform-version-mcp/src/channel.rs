//! Named request channels
//!
//! Every registered channel routes to the same responder, so callers that
//! still use legacy channel names get the same answer as new ones.

use std::collections::HashSet;

use crate::error::{ChannelError, ConfigError};
use crate::responder::{MethodCall, PlatformInfoResponder, VersionString};

/// Routes method calls from named channels to a shared responder
#[derive(Debug, Clone)]
pub struct ChannelRouter {
    channels: Vec<String>,
    responder: PlatformInfoResponder,
}

impl ChannelRouter {
    pub fn new(
        channels: impl IntoIterator<Item = impl Into<String>>,
        responder: PlatformInfoResponder,
    ) -> Result<Self, ConfigError> {
        let channels: Vec<String> = channels
            .into_iter()
            .map(Into::<String>::into)
            .map(|c| c.trim().to_string())
            .collect();
        validate_channels(&channels)?;
        Ok(Self {
            channels,
            responder,
        })
    }

    /// Registered channel names, in registration order
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn responder(&self) -> &PlatformInfoResponder {
        &self.responder
    }

    pub fn has_channel(&self, channel: &str) -> bool {
        self.channels.iter().any(|c| c == channel)
    }

    pub fn dispatch(
        &self,
        channel: &str,
        call: &MethodCall,
    ) -> Result<VersionString, ChannelError> {
        if !self.has_channel(channel) {
            tracing::debug!(channel, "call on unregistered channel");
            return Err(ChannelError::UnknownChannel(channel.to_string()));
        }
        tracing::debug!(channel, method = %call.method, "dispatching method call");
        Ok(self.responder.handle(call)?)
    }
}

/// Channel names must be non-empty and unique once surrounding whitespace is
/// ignored, and there must be at least one
pub(crate) fn validate_channels(channels: &[String]) -> Result<(), ConfigError> {
    if channels.is_empty() {
        return Err(ConfigError::NoChannels);
    }
    let mut seen = HashSet::new();
    for channel in channels {
        let name = channel.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyChannelName);
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateChannel(name.to_string()));
        }
    }
    Ok(())
}
