//! What a provider may know about the agent it runs on.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
    Other(String),
}

impl Os {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "macos" => Os::MacOs,
            "linux" => Os::Linux,
            other => Os::Other(other.to_string()),
        }
    }
}

/// Inputs for one registration pass: configuration parameters, resolved
/// locations and the moment the pass runs.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    parameters: BTreeMap<String, String>,
    home: Option<PathBuf>,
    app_data: Option<PathBuf>,
    local_app_data: Option<PathBuf>,
    os: Os,
    now: SystemTime,
}

impl ProviderContext {
    /// Empty context: no parameters, no home, current OS.
    pub fn new(now: SystemTime) -> Self {
        Self {
            parameters: BTreeMap::new(),
            home: None,
            app_data: None,
            local_app_data: None,
            os: Os::current(),
            now,
        }
    }

    /// Context resolved from the running process: home via `dirs`, and on
    /// Windows the roaming and local application data directories.
    pub fn from_environment(parameters: BTreeMap<String, String>, now: SystemTime) -> Self {
        let os = Os::current();
        let (app_data, local_app_data) = if os == Os::Windows {
            (dirs::data_dir(), dirs::data_local_dir())
        } else {
            (None, None)
        };
        Self {
            parameters,
            home: utils::home_dir(),
            app_data,
            local_app_data,
            os,
            now,
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn without_home(mut self) -> Self {
        self.home = None;
        self
    }

    pub fn with_app_data(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_data = Some(dir.into());
        self
    }

    pub fn with_local_app_data(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_app_data = Some(dir.into());
        self
    }

    pub fn with_os(mut self, os: Os) -> Self {
        self.os = os;
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// True only when `key` is set to `false` (any case). Absent or any other
    /// value leaves the feature enabled.
    pub fn has_explicit_false(&self, key: &str) -> bool {
        self.parameter(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("false"))
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn app_data(&self) -> Option<&Path> {
        self.app_data.as_deref()
    }

    pub fn local_app_data(&self) -> Option<&Path> {
        self.local_app_data.as_deref()
    }

    pub fn os(&self) -> &Os {
        &self.os
    }

    pub fn now(&self) -> SystemTime {
        self.now
    }
}
