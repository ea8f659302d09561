use crate::cleaner::CleanerProvider;
use crate::context::ProviderContext;
use crate::daemon_logs;
use crate::registry::CleanerRegistry;

/// Gradle dependency caches, wrapper distributions and daemon logs.
pub struct GradleCaches;

impl CleanerProvider for GradleCaches {
    fn name(&self) -> &'static str {
        "gradle"
    }

    fn label(&self) -> &'static str {
        "Gradle local cache cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        let Some(home) = super::enabled_home(self, ctx) else {
            return;
        };
        let gradle = home.join(".gradle");
        super::register_directory(gradle.join("caches"), "Gradle cache", ctx, registry);
        super::register_directory(
            gradle.join("wrapper").join("dists"),
            "Gradle wrapper distributions",
            ctx,
            registry,
        );
        daemon_logs::register(&gradle.join("daemon"), ctx.now(), registry);
    }
}
