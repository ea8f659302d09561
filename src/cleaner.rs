use crate::context::ProviderContext;
use crate::registry::CleanerRegistry;

/// The trait every cache provider implements.
pub trait CleanerProvider: Send + Sync {
    /// Machine-readable name used in the `--provider` flag and in the
    /// `teamcity.cleaners.<name>.enabled` parameter (e.g. "maven").
    fn name(&self) -> &'static str;

    /// Human-readable label for display (e.g. "Maven local cache cleaner").
    fn label(&self) -> &'static str;

    /// Look for the provider's caches and register a cleaner for each one
    /// found. Never deletes anything itself.
    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry);

    /// Parameter that disables this provider when set to `false`.
    fn enabled_parameter(&self) -> String {
        format!("teamcity.cleaners.{}.enabled", self.name())
    }
}
