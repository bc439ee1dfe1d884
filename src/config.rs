use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::utils::{Client, ClientError};

const API_BASE_VAR: &str = "REPLAY_TAGS_API";
const SESSION_VAR: &str = "REPLAY_TAGS_SESSION";
const MOCK_VAR: &str = "REPLAY_TAGS_MOCK";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub session_token: Option<String>,
    /// Answer play-style reads with canned data, for offline use.
    pub use_mock_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Client::DEFAULT_BASE_URL.to_owned(),
            session_token: None,
            use_mock_data: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigError {
    FileSystem,
    Format,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::FileSystem => "Failed to read/write the config file.",
            Self::Format => "Config file format not recognized.",
        };
        msg.fmt(f)
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let mut path = if let Some(project_dirs) =
            directories_next::ProjectDirs::from("gg", "Calculated", "replay-tags")
        {
            project_dirs.config_dir().into()
        } else {
            std::env::current_dir().unwrap_or_default()
        };

        path.push("config.json");
        path
    }

    /// Stored config with environment overrides applied.
    pub async fn load() -> Result<Self, ConfigError> {
        Ok(Self::load_file().await?.with_env_overrides())
    }

    /// Stored config as is. A missing file is not an error.
    pub async fn load_file() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()).await
    }

    async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file, using defaults.");
                return Ok(Self::default());
            }
            Err(_) => return Err(ConfigError::FileSystem),
        };
        serde_json::from_str(&contents).map_err(|_| ConfigError::Format)
    }

    pub async fn save(self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()).await
    }

    async fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|_| ConfigError::Format)?;

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|_| ConfigError::FileSystem)?;
        }
        tokio::fs::write(path, json)
            .await
            .map_err(|_| ConfigError::FileSystem)
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let use_mock_data = match lookup(MOCK_VAR) {
            None => self.use_mock_data,
            Some(value) => parse_flag(&value).unwrap_or_else(|| {
                warn!("Ignoring unrecognized {MOCK_VAR}={value:?}.");
                self.use_mock_data
            }),
        };
        Self {
            api_base: lookup(API_BASE_VAR).unwrap_or(self.api_base),
            session_token: lookup(SESSION_VAR)
                .filter(|t| !t.is_empty())
                .or(self.session_token),
            use_mock_data,
        }
    }

    pub fn client(&self) -> Result<Client, ClientError> {
        Client::new(
            &self.api_base,
            self.session_token.as_deref(),
            self.use_mock_data,
        )
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"use_mock_data": true}"#).expect("valid");
        assert_eq!(
            config,
            Config {
                use_mock_data: true,
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (API_BASE_VAR, "http://localhost:5000/api"),
            (SESSION_VAR, "s3cr3t"),
            (MOCK_VAR, "TRUE"),
        ]
        .into_iter()
        .collect();
        let config = Config::default()
            .with_overrides(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.api_base, "http://localhost:5000/api");
        assert_eq!(config.session_token.as_deref(), Some("s3cr3t"));
        assert!(config.use_mock_data);
    }

    #[test]
    fn test_bad_flag_keeps_stored_value() {
        let stored = Config {
            use_mock_data: true,
            session_token: Some("stored".to_owned()),
            ..Config::default()
        };
        let config = stored.clone().with_overrides(|name| match name {
            MOCK_VAR => Some("maybe".to_owned()),
            SESSION_VAR => Some(String::new()),
            _ => None,
        });
        assert_eq!(config, stored);
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("replay-tags-{name}-{}", std::process::id()))
    }

    // tokio::fs needs a tokio runtime, unlike the async_std tests elsewhere.
    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let path = scratch_dir("missing").join("config.json");
        let config = Config::load_from(&path).await.expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_saved_file_loads_back() {
        let dir = scratch_dir("saved");
        let path = dir.join("nested").join("config.json");
        let stored = Config {
            api_base: "http://localhost:5000/api".to_owned(),
            session_token: Some("s3cr3t".to_owned()),
            use_mock_data: true,
        };
        stored.save_to(&path).await.expect("saved");
        let loaded = Config::load_from(&path).await;
        let _ = tokio::fs::remove_dir_all(&dir).await;
        assert_eq!(loaded.expect("loaded"), stored);
    }
}
