use std::path::PathBuf;
use std::time::SystemTime;

use tracing::debug;

use crate::actions::CleanupAction;
use crate::cleaner::CleanerProvider;
use crate::context::ProviderContext;
use crate::registry::CleanerRegistry;
use crate::utils;

/// Location of the agent's persistent cache directory.
pub const PERSISTENT_CACHE_PARAMETER: &str = "agent.persistent.cache";

/// Entries of the agent's persistent cache, each on its own staleness clock.
///
/// The `teamcity.cleaners.persistent-cache.enabled` switch is this crate's own
/// addition for parity with the other providers; TeamCity defines no such
/// parameter for the persistent cache.
pub struct PersistentCache;

impl CleanerProvider for PersistentCache {
    fn name(&self) -> &'static str {
        "persistent-cache"
    }

    fn label(&self) -> &'static str {
        "Persistent agent cache cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        if ctx.has_explicit_false(&self.enabled_parameter()) {
            return;
        }
        let Some(dir) = ctx.parameter(PERSISTENT_CACHE_PARAMETER).map(PathBuf::from) else {
            return;
        };
        let Ok(read_dir) = std::fs::read_dir(&dir) else {
            debug!("Persistent cache {} not readable", dir.display());
            return;
        };

        let mut entries: Vec<PathBuf> = read_dir.flatten().map(|e| e.path()).collect();
        entries.sort();
        for path in entries {
            let modified = utils::modified(&path).unwrap_or(SystemTime::UNIX_EPOCH);
            let action = CleanupAction::Remove { path: path.clone() };
            registry.add_cleaner(path, modified, action);
        }
    }
}
