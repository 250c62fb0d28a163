/// Playlist loader configuration
use crate::duration::DurationLimit;
use crate::error::{PlaylistError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix, e.g. `SOUL_PLAYLIST_MAX_TRACK_SECONDS=600`
pub const ENV_PREFIX: &str = "SOUL_PLAYLIST";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// Folder holding one JSON document per playlist
    #[serde(default = "default_playlists_folder")]
    pub playlists_folder: PathBuf,

    /// Longest accepted track in seconds, `0` for no limit
    #[serde(default = "default_max_track_seconds")]
    pub max_track_seconds: u64,

    /// Per-item lookup timeout; unset means wait forever
    #[serde(default)]
    pub resolve_timeout_secs: Option<u64>,
}

impl LoaderConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// A missing file is not an error. Environment variables override file
    /// values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path).required(false));
        }

        settings = settings.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config = settings
            .build()
            .map_err(|e| PlaylistError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| PlaylistError::Config(e.to_string()))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playlists_folder.as_os_str().is_empty() {
            return Err(PlaylistError::config("playlists_folder cannot be empty"));
        }

        if self.resolve_timeout_secs == Some(0) {
            return Err(PlaylistError::config(
                "resolve_timeout_secs must be positive (omit it to disable the timeout)",
            ));
        }

        Ok(())
    }

    pub fn duration_limit(&self) -> DurationLimit {
        DurationLimit::from_secs(self.max_track_seconds)
    }

    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout_secs.map(Duration::from_secs)
    }
}

fn default_playlists_folder() -> PathBuf {
    PathBuf::from("Playlists")
}

fn default_max_track_seconds() -> u64 {
    0
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            playlists_folder: default_playlists_folder(),
            max_track_seconds: default_max_track_seconds(),
            resolve_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.playlists_folder, PathBuf::from("Playlists"));
        assert_eq!(config.max_track_seconds, 0);
        assert!(config.duration_limit().is_unlimited());
        assert_eq!(config.resolve_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "playlists_folder = \"/srv/bot/playlists\"").unwrap();
        writeln!(file, "max_track_seconds = 600").unwrap();
        writeln!(file, "resolve_timeout_secs = 30").unwrap();

        let config = LoaderConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.playlists_folder, PathBuf::from("/srv/bot/playlists"));
        assert_eq!(config.duration_limit(), DurationLimit::from_secs(600));
        assert_eq!(config.resolve_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = LoaderConfig::load(Some(path.as_path())).unwrap();

        assert_eq!(config.playlists_folder, PathBuf::from("Playlists"));
        assert_eq!(config.max_track_seconds, 0);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = LoaderConfig {
            resolve_timeout_secs: Some(0),
            ..LoaderConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlaylistError::Config(_))));
    }

    #[test]
    fn empty_folder_is_rejected() {
        let config = LoaderConfig {
            playlists_folder: PathBuf::new(),
            ..LoaderConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
