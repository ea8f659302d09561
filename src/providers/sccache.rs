use std::path::PathBuf;

use tracing::info;

use crate::cleaner::CleanerProvider;
use crate::context::{Os, ProviderContext};
use crate::registry::CleanerRegistry;

pub struct Sccache;

/// Default sccache local cache location for the context's OS.
pub fn sccache_dir(ctx: &ProviderContext) -> Option<PathBuf> {
    match ctx.os() {
        Os::Windows => ctx
            .local_app_data()
            .map(|p| p.join("Mozilla").join("sccache")),
        Os::MacOs => ctx
            .home()
            .map(|h| h.join("Library").join("Caches").join("Mozilla.sccache")),
        Os::Linux => ctx.home().map(|h| h.join(".cache").join("sccache")),
        Os::Other(name) => {
            info!("Unknown OS ({name}), sccache cleaner is disabled.");
            None
        }
    }
}

impl CleanerProvider for Sccache {
    fn name(&self) -> &'static str {
        "sccache"
    }

    fn label(&self) -> &'static str {
        "sccache local cache cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        if ctx.has_explicit_false(&self.enabled_parameter()) {
            info!("sccache cleaner is disabled by property.");
            return;
        }
        let Some(dir) = sccache_dir(ctx) else {
            info!("Cannot determine path to sccache cache directory, sccache cleaner is disabled.");
            return;
        };
        super::register_directory(dir, "sccache cache directory", ctx, registry);
    }
}
