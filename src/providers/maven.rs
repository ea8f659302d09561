use crate::cleaner::CleanerProvider;
use crate::context::ProviderContext;
use crate::registry::CleanerRegistry;

pub struct MavenRepository;

impl CleanerProvider for MavenRepository {
    fn name(&self) -> &'static str {
        "maven"
    }

    fn label(&self) -> &'static str {
        "Maven local cache cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        let Some(home) = super::enabled_home(self, ctx) else {
            return;
        };
        super::register_directory(home.join(".m2").join("repository"), "Maven cache", ctx, registry);
    }
}
