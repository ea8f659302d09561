use tracing::debug;

use crate::actions::{self, CleanupAction};
use crate::cleaner::CleanerProvider;
use crate::context::ProviderContext;
use crate::registry::CleanerRegistry;

pub const HPROF_SUFFIX: &str = ".hprof";

/// JVM heap dumps left directly in the home directory.
pub struct HeapDumps;

impl CleanerProvider for HeapDumps {
    fn name(&self) -> &'static str {
        "heapdumps"
    }

    fn label(&self) -> &'static str {
        "heap dumps at home cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        let Some(home) = super::enabled_home(self, ctx) else {
            return;
        };
        debug!("Checking if hprof files present in the home directory");
        if actions::matching_files(home, HPROF_SUFFIX).is_empty() {
            return;
        }
        debug!("Heap dumps found, registering cleaner.");
        let action = CleanupAction::MatchingFiles {
            dir: home.to_path_buf(),
            suffix: HPROF_SUFFIX.to_string(),
        };
        registry.add_cleaner(home.to_path_buf(), ctx.now(), action);
    }
}
