//! Configuration loading for platform-version-mcp
//!
//! Configuration is layered, later sources winning:
//! 1. Default values
//! 2. TOML file
//! 3. Environment variables PLATFORM_NAME, PLATFORM_CHANNELS, PLATFORM_ALLOW_EMPTY_VERSION
//! 4. Command line flags
//!
//! The file is the one named by `--config` or PLATFORM_VERSION_CONFIG_PATH.
//! A file named that way must exist and parse. Without one,
//! ~/.binks/platform-version.toml is read if present and skipped otherwise.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::channel::{validate_channels, ChannelRouter};
use crate::error::ConfigError;
use crate::host::{default_platform_name, HostEnvironment};
use crate::responder::PlatformInfoResponder;

pub const CONFIG_PATH_ENV: &str = "PLATFORM_VERSION_CONFIG_PATH";
pub const PLATFORM_NAME_ENV: &str = "PLATFORM_NAME";
pub const CHANNELS_ENV: &str = "PLATFORM_CHANNELS";
pub const ALLOW_EMPTY_ENV: &str = "PLATFORM_ALLOW_EMPTY_VERSION";

pub const DEFAULT_CHANNEL: &str = "platform_version";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponderConfig {
    /// Literal placed before the OS version (e.g. "iOS")
    #[serde(default = "default_platform_name")]
    pub platform_name: String,
    /// Channel names that route to the responder
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    /// Answer with "<name> " instead of failing when the host version is empty
    #[serde(default)]
    pub allow_empty_version: bool,
}

fn default_channels() -> Vec<String> {
    vec![DEFAULT_CHANNEL.to_string()]
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            platform_name: default_platform_name(),
            channels: default_channels(),
            allow_empty_version: false,
        }
    }
}

impl ResponderConfig {
    /// Load from the config file (if any) and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(None, |key| std::env::var(key).ok(), &CliOverrides::default())
    }

    /// Apply every layer in order and validate the result.
    ///
    /// `config_path` is an explicitly requested file; `lookup` reads
    /// environment-style variables, including the config path and HOME.
    pub fn resolve<F>(
        config_path: Option<&Path>,
        lookup: F,
        cli: &CliOverrides,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = config_path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_file(&path)?
            }
            None => match Self::home_config_path(&lookup) {
                Some(path) if path.exists() => {
                    tracing::info!("Loading config from: {}", path.display());
                    Self::from_file(&path)?
                }
                _ => {
                    tracing::info!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(&lookup)?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply environment-style overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(PLATFORM_NAME_ENV) {
            self.platform_name = name;
        }

        if let Some(channels) = lookup(CHANNELS_ENV) {
            self.channels = parse_channel_list(&channels);
        }

        if let Some(value) = lookup(ALLOW_EMPTY_ENV) {
            self.allow_empty_version = parse_bool(ALLOW_EMPTY_ENV, &value)?;
        }

        Ok(())
    }

    /// Apply command line values; unset flags leave the field alone
    pub fn apply_cli(&mut self, cli: &CliOverrides) {
        if let Some(name) = &cli.platform_name {
            self.platform_name = name.clone();
        }
        if !cli.channels.is_empty() {
            self.channels = cli.channels.iter().map(|c| c.trim().to_string()).collect();
        }
        if cli.allow_empty_version {
            self.allow_empty_version = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.platform_name.trim().is_empty() {
            return Err(ConfigError::EmptyPlatformName);
        }
        validate_channels(&self.channels)
    }

    pub fn build_responder(&self, host: Arc<dyn HostEnvironment>) -> PlatformInfoResponder {
        PlatformInfoResponder::new(self.platform_name.clone(), host)
            .allow_empty_version(self.allow_empty_version)
    }

    /// Validate and wire up a router over all configured channels
    pub fn build_router(&self, host: Arc<dyn HostEnvironment>) -> Result<ChannelRouter, ConfigError> {
        self.validate()?;
        ChannelRouter::new(self.channels.iter().cloned(), self.build_responder(host))
    }

    fn home_config_path<F>(lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("HOME").map(|home| {
            PathBuf::from(home)
                .join(".binks")
                .join("platform-version.toml")
        })
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub platform_name: Option<String>,
    pub channels: Vec<String>,
    /// A flag, so it can only switch acceptance on
    pub allow_empty_version: bool,
}

/// Split a comma-separated channel list, dropping blank entries
pub fn parse_channel_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FixedHost;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ResponderConfig::default();
        assert_eq!(config.channels, vec!["platform_version"]);
        assert!(!config.allow_empty_version);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ResponderConfig::from_toml(r#"platform_name = "iOS""#).unwrap();
        assert_eq!(config.platform_name, "iOS");
        assert_eq!(config.channels, vec!["platform_version"]);
        assert!(!config.allow_empty_version);
    }

    #[test]
    fn test_full_toml() {
        let config = ResponderConfig::from_toml(
            r#"
            platform_name = "iOS"
            channels = ["jpeg12", "libjpeg12"]
            allow_empty_version = true
            "#,
        )
        .unwrap();
        assert_eq!(config.channels, vec!["jpeg12", "libjpeg12"]);
        assert!(config.allow_empty_version);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "platform_name = \"Android\"").unwrap();

        let config = ResponderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.platform_name, "Android");
    }

    #[test]
    fn test_from_file_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "channels = 3").unwrap();

        let result = ResponderConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ResponderConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ResponderConfig::default();
        config
            .apply_overrides(lookup(&[
                (PLATFORM_NAME_ENV, "iOS"),
                (CHANNELS_ENV, "jpeg12, libjpeg12,,"),
                (ALLOW_EMPTY_ENV, "1"),
            ]))
            .unwrap();

        assert_eq!(config.platform_name, "iOS");
        assert_eq!(config.channels, vec!["jpeg12", "libjpeg12"]);
        assert!(config.allow_empty_version);
    }

    #[test]
    fn test_invalid_bool_override() {
        let mut config = ResponderConfig::default();
        let result = config.apply_overrides(lookup(&[(ALLOW_EMPTY_ENV, "maybe")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_platform_name() {
        let config = ResponderConfig {
            platform_name: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPlatformName)));
    }

    #[test]
    fn test_validate_rejects_duplicate_channels() {
        let config = ResponderConfig {
            channels: vec!["jpeg12".into(), "jpeg12".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateChannel(_))
        ));
    }

    #[test]
    fn test_build_router() {
        let config = ResponderConfig {
            platform_name: "iOS".into(),
            channels: vec!["jpeg12".into(), "libjpeg12".into()],
            allow_empty_version: true,
        };
        let router = config
            .build_router(Arc::new(FixedHost::version("")))
            .unwrap();

        assert_eq!(router.channels().len(), 2);
        let result = router.responder().get_platform_version().unwrap();
        assert_eq!(result.as_str(), "iOS ");
    }

    fn file_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("platform-version.toml");
        std::fs::write(
            &path,
            r#"
            platform_name = "FileOS"
            channels = ["from_file"]
            allow_empty_version = true
            "#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_config(&dir);

        let config =
            ResponderConfig::resolve(Some(&path), lookup(&[]), &CliOverrides::default()).unwrap();
        assert_eq!(config.platform_name, "FileOS");
        assert_eq!(config.channels, vec!["from_file"]);
        assert!(config.allow_empty_version);
    }

    #[test]
    fn test_env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_config(&dir);

        let config = ResponderConfig::resolve(
            Some(&path),
            lookup(&[
                (PLATFORM_NAME_ENV, "EnvOS"),
                (CHANNELS_ENV, "from_env"),
                (ALLOW_EMPTY_ENV, "false"),
            ]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.platform_name, "EnvOS");
        assert_eq!(config.channels, vec!["from_env"]);
        assert!(!config.allow_empty_version);
    }

    #[test]
    fn test_cli_beats_env_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_config(&dir);

        let cli = CliOverrides {
            platform_name: Some("CliOS".into()),
            channels: vec!["jpeg12".into(), " libjpeg12 ".into()],
            allow_empty_version: true,
        };
        let config = ResponderConfig::resolve(
            Some(&path),
            lookup(&[
                (PLATFORM_NAME_ENV, "EnvOS"),
                (CHANNELS_ENV, "from_env"),
                (ALLOW_EMPTY_ENV, "false"),
            ]),
            &cli,
        )
        .unwrap();
        assert_eq!(config.platform_name, "CliOS");
        assert_eq!(config.channels, vec!["jpeg12", "libjpeg12"]);
        assert!(config.allow_empty_version);
    }

    #[test]
    fn test_unset_cli_flags_keep_lower_layers() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_config(&dir);

        let config = ResponderConfig::resolve(
            Some(&path),
            lookup(&[(PLATFORM_NAME_ENV, "EnvOS")]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.platform_name, "EnvOS");
        assert_eq!(config.channels, vec!["from_file"]);
        assert!(config.allow_empty_version);
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = file_config(&dir);
        let path_str = path.display().to_string();

        let config = ResponderConfig::resolve(
            None,
            lookup(&[(CONFIG_PATH_ENV, path_str.as_str())]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.platform_name, "FileOS");
    }

    #[test]
    fn test_named_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let missing_str = missing.display().to_string();

        let from_flag =
            ResponderConfig::resolve(Some(&missing), lookup(&[]), &CliOverrides::default());
        assert!(matches!(from_flag, Err(ConfigError::Read { .. })));

        let from_env = ResponderConfig::resolve(
            None,
            lookup(&[(CONFIG_PATH_ENV, missing_str.as_str())]),
            &CliOverrides::default(),
        );
        assert!(matches!(from_env, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_missing_home_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().display().to_string();

        let config = ResponderConfig::resolve(
            None,
            lookup(&[("HOME", home.as_str())]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(config, ResponderConfig::default());
    }

    #[test]
    fn test_home_config_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".binks")).unwrap();
        std::fs::write(
            dir.path().join(".binks").join("platform-version.toml"),
            "platform_name = \"HomeOS\"\n",
        )
        .unwrap();
        let home = dir.path().display().to_string();

        let config = ResponderConfig::resolve(
            None,
            lookup(&[("HOME", home.as_str())]),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.platform_name, "HomeOS");
    }

    #[test]
    fn test_resolve_validates_result() {
        let cli = CliOverrides {
            channels: vec!["a".into(), "a ".into()],
            ..Default::default()
        };
        let result = ResponderConfig::resolve(None, lookup(&[]), &cli);
        assert!(matches!(result, Err(ConfigError::DuplicateChannel(_))));
    }
}
