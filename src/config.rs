//! Host configuration for the standalone runner.
//!
//! ```toml
//! home = "/home/agent"      # optional, defaults to the current user's home
//! min_age_hours = 24        # only run cleaners stale for at least this long
//!
//! [parameters]
//! "teamcity.cleaners.maven.enabled" = "false"
//! "teamcity.cleaners.configurable.directories" = "~/.cache/bazel, /opt/ci/tmp"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::context::ProviderContext;
use crate::error::{CleanupError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Overrides the detected home directory
    pub home: Option<PathBuf>,

    /// Minimum staleness before `clean` runs a cleaner.
    /// Default: 0 (everything registered is eligible)
    pub min_age_hours: u64,

    /// Shared configuration parameters seen by providers
    pub parameters: BTreeMap<String, String>,
}

impl HostConfig {
    /// `<config_dir>/cachesweep/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cachesweep").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CleanupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| CleanupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must load; the default location is optional.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply `key=value` overrides on top of the file's parameters.
    pub fn apply_overrides(&mut self, overrides: &[String]) -> Result<()> {
        for item in overrides {
            let (key, value) = item
                .split_once('=')
                .filter(|(k, _)| !k.trim().is_empty())
                .ok_or_else(|| CleanupError::InvalidParameter(item.clone()))?;
            self.parameters
                .insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(())
    }

    pub fn min_age(&self) -> Duration {
        Duration::from_secs(self.min_age_hours * 3600)
    }

    /// Provider context for a registration pass at `now`.
    pub fn context(&self, now: SystemTime) -> ProviderContext {
        let ctx = ProviderContext::from_environment(self.parameters.clone(), now);
        match &self.home {
            Some(home) => ctx.with_home(home),
            None => ctx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let text = r#"
            home = "/srv/agent"
            min_age_hours = 12

            [parameters]
            "teamcity.cleaners.maven.enabled" = "false"
        "#;
        let config = HostConfig::parse(text, Path::new("config.toml")).unwrap();
        assert_eq!(config.home, Some(PathBuf::from("/srv/agent")));
        assert_eq!(config.min_age(), Duration::from_secs(12 * 3600));
        assert_eq!(
            config.parameters.get("teamcity.cleaners.maven.enabled"),
            Some(&"false".to_string())
        );
    }

    #[test]
    fn empty_file_is_default() {
        let config = HostConfig::parse("", Path::new("config.toml")).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn bad_toml_reports_path() {
        let err = HostConfig::parse("min_age_hours = \"soon\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, CleanupError::ConfigParse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = HostConfig::load_or_default(Some(tmp.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, CleanupError::ConfigRead { .. }));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = HostConfig::default();
        config
            .parameters
            .insert("teamcity.cleaners.npm.enabled".into(), "true".into());
        config
            .apply_overrides(&["teamcity.cleaners.npm.enabled = false".to_string()])
            .unwrap();
        assert_eq!(config.parameters["teamcity.cleaners.npm.enabled"], "false");

        let err = config.apply_overrides(&["novalue".to_string()]).unwrap_err();
        assert!(matches!(err, CleanupError::InvalidParameter(_)));
        assert!(config.apply_overrides(&["=x".to_string()]).is_err());
    }

    #[test]
    fn context_uses_home_override() {
        let config = HostConfig {
            home: Some(PathBuf::from("/srv/agent")),
            ..Default::default()
        };
        let ctx = config.context(SystemTime::now());
        assert_eq!(ctx.home(), Some(Path::new("/srv/agent")));
    }
}
