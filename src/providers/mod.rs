mod configurable;
mod gradle;
mod heap_dumps;
mod ivy;
mod maven;
mod npm;
mod persistent_cache;
mod sccache;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::actions::CleanupAction;
use crate::cleaner::CleanerProvider;
use crate::context::ProviderContext;
use crate::registry::{CleanerRegistry, InMemoryRegistry};

pub use configurable::{ConfigurableCaches, DIRECTORIES_PARAMETER, REMOVE_ROOTS_PARAMETER};
pub use gradle::GradleCaches;
pub use heap_dumps::{HeapDumps, HPROF_SUFFIX};
pub use ivy::IvyCache;
pub use maven::MavenRepository;
pub use npm::NpmCache;
pub use persistent_cache::{PersistentCache, PERSISTENT_CACHE_PARAMETER};
pub use sccache::{sccache_dir, Sccache};

pub fn all_providers() -> Vec<Box<dyn CleanerProvider>> {
    vec![
        Box::new(MavenRepository),
        Box::new(GradleCaches),
        Box::new(NpmCache),
        Box::new(IvyCache),
        Box::new(Sccache),
        Box::new(HeapDumps),
        Box::new(ConfigurableCaches),
        Box::new(PersistentCache),
    ]
}

pub fn find_provider(name: &str) -> Option<Box<dyn CleanerProvider>> {
    all_providers().into_iter().find(|p| p.name() == name)
}

pub fn provider_names() -> Vec<&'static str> {
    all_providers().iter().map(|p| p.name()).collect()
}

/// Run every given provider against one registry, tagging each entry with
/// the provider that produced it.
pub fn register_all(
    providers: &[Box<dyn CleanerProvider>],
    ctx: &ProviderContext,
    registry: &mut InMemoryRegistry,
) {
    for provider in providers {
        registry.set_provider(provider.name());
        provider.register(ctx, registry);
    }
}

/// Shared preamble: `None` when the provider is switched off or no home
/// directory is known.
fn enabled_home<'a>(provider: &dyn CleanerProvider, ctx: &'a ProviderContext) -> Option<&'a Path> {
    debug!("{}: register dir cleaners", provider.label());
    if ctx.has_explicit_false(&provider.enabled_parameter()) {
        info!("{} is disabled, skipping.", provider.label());
        return None;
    }
    let home = ctx.home();
    if home.is_none() {
        warn!(
            "{}: failed to detect user home directory, skipping.",
            provider.label()
        );
    }
    home
}

/// Register a rename-then-delete cleaner for `dir` if it exists.
fn register_directory(
    dir: PathBuf,
    what: &str,
    ctx: &ProviderContext,
    registry: &mut dyn CleanerRegistry,
) -> bool {
    debug!("Checking if [{}] exists", dir.display());
    if !dir.exists() {
        return false;
    }
    debug!("{what} found, registering cleaner.");
    let action = CleanupAction::ReplaceDirectory {
        dir: dir.clone(),
        keep_root: false,
    };
    registry.add_cleaner(dir, ctx.now(), action);
    true
}
