use crate::cleaner::CleanerProvider;
use crate::context::ProviderContext;
use crate::registry::CleanerRegistry;

pub struct IvyCache;

impl CleanerProvider for IvyCache {
    fn name(&self) -> &'static str {
        "ivy"
    }

    fn label(&self) -> &'static str {
        "Apache Ivy local cache cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        let Some(home) = super::enabled_home(self, ctx) else {
            return;
        };
        super::register_directory(home.join(".ivy2").join("cache"), "Apache Ivy cache", ctx, registry);
    }
}
