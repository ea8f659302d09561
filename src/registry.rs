//! The host side of cleaner registration.
//!
//! Providers never delete anything at registration time; they hand the host
//! an anchor path, a staleness timestamp and a [`CleanupAction`]. The host
//! decides later which actions to run.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rayon::prelude::*;

use crate::actions::{CleanupAction, CleanupReport};

/// Receives cleaners from providers.
pub trait CleanerRegistry {
    fn add_cleaner(&mut self, anchor: PathBuf, timestamp: SystemTime, action: CleanupAction);
}

/// One registration, as recorded by [`InMemoryRegistry`].
#[derive(Debug, Clone)]
pub struct RegisteredCleaner {
    /// Name of the provider that registered it, if known.
    pub provider: Option<&'static str>,
    pub anchor: PathBuf,
    pub timestamp: SystemTime,
    pub action: CleanupAction,
}

/// Registry that just records what it is given.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: Vec<RegisteredCleaner>,
    current_provider: Option<&'static str>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag subsequent registrations with a provider name.
    pub fn set_provider(&mut self, name: &'static str) {
        self.current_provider = Some(name);
    }

    pub fn entries(&self) -> &[RegisteredCleaner] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, anchor: &Path) -> Option<&RegisteredCleaner> {
        self.entries.iter().find(|e| e.anchor == anchor)
    }

    pub fn contains(&self, anchor: &Path) -> bool {
        self.get(anchor).is_some()
    }

    /// Entries whose staleness timestamp is at or before `cutoff`.
    pub fn eligible(&self, cutoff: SystemTime) -> Vec<&RegisteredCleaner> {
        self.entries.iter().filter(|e| e.timestamp <= cutoff).collect()
    }
}

impl CleanerRegistry for InMemoryRegistry {
    fn add_cleaner(&mut self, anchor: PathBuf, timestamp: SystemTime, action: CleanupAction) {
        self.entries.push(RegisteredCleaner {
            provider: self.current_provider,
            anchor,
            timestamp,
            action,
        });
    }
}

/// Run the given cleaners, in parallel, each exactly once.
/// Results come back in input order.
pub fn execute<'a, I>(cleaners: I) -> Vec<(&'a RegisteredCleaner, CleanupReport)>
where
    I: IntoIterator<Item = &'a RegisteredCleaner>,
{
    let cleaners: Vec<&RegisteredCleaner> = cleaners.into_iter().collect();
    cleaners
        .into_par_iter()
        .map(|cleaner| (cleaner, cleaner.action.run()))
        .collect()
}
