use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::actions::CleanupAction;
use crate::cleaner::CleanerProvider;
use crate::context::ProviderContext;
use crate::registry::CleanerRegistry;

/// Comma-separated list of directories to clean.
pub const DIRECTORIES_PARAMETER: &str = "teamcity.cleaners.configurable.directories";
/// When `false`, cleaned directories are recreated empty.
pub const REMOVE_ROOTS_PARAMETER: &str = "teamcity.internal.cleaners.configurable.removeCachesRoots";

/// User-listed cache directories.
pub struct ConfigurableCaches;

impl ConfigurableCaches {
    fn candidates(list: &str) -> Vec<&str> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn expand_home(path: &str, home: &Path) -> PathBuf {
        let expanded = match path.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => PathBuf::from(path),
        };
        expanded.components().collect()
    }
}

impl CleanerProvider for ConfigurableCaches {
    fn name(&self) -> &'static str {
        "configurable"
    }

    fn label(&self) -> &'static str {
        "Configurable local caches cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        let Some(home) = super::enabled_home(self, ctx) else {
            return;
        };
        let Some(list) = ctx.parameter(DIRECTORIES_PARAMETER) else {
            info!("Configurable cleaner skipped: '{DIRECTORIES_PARAMETER}' property undefined.");
            return;
        };

        let candidates = Self::candidates(list);
        debug!("Configurable cleaner: dirs to cleanup: {candidates:?}");
        let keep_root = ctx.has_explicit_false(REMOVE_ROOTS_PARAMETER);

        for path in candidates {
            let dir = Self::expand_home(path, home);
            debug!("Checking if '{path}' exists");
            if dir.is_dir() {
                debug!("Found '{path}', registering cleaner.");
                let action = CleanupAction::ReplaceDirectory {
                    dir: dir.clone(),
                    keep_root,
                };
                registry.add_cleaner(dir, ctx.now(), action);
            }
        }
    }
}
