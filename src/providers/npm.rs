use std::path::PathBuf;

use crate::cleaner::CleanerProvider;
use crate::context::{Os, ProviderContext};
use crate::registry::CleanerRegistry;

pub struct NpmCache;

impl NpmCache {
    /// `%APPDATA%\npm-cache` on Windows (home when APPDATA is missing),
    /// `~/.npm` everywhere else.
    fn cache_dir(ctx: &ProviderContext) -> Option<PathBuf> {
        let home = ctx.home()?;
        let dir = if *ctx.os() == Os::Windows {
            let base = ctx.app_data().filter(|p| p.exists()).unwrap_or(home);
            base.join("npm-cache")
        } else {
            home.join(".npm")
        };
        Some(dir)
    }
}

impl CleanerProvider for NpmCache {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn label(&self) -> &'static str {
        "NPM local cache cleaner"
    }

    fn register(&self, ctx: &ProviderContext, registry: &mut dyn CleanerRegistry) {
        if super::enabled_home(self, ctx).is_none() {
            return;
        }
        if let Some(dir) = Self::cache_dir(ctx) {
            super::register_directory(dir, "NPM cache", ctx, registry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryRegistry;
    use std::time::SystemTime;
    use tempfile::TempDir;

    #[test]
    fn unix_cache_under_home() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join(".npm");
        std::fs::create_dir_all(cache.join("_cacache")).unwrap();
        let ctx = ProviderContext::new(SystemTime::now())
            .with_home(tmp.path())
            .with_os(Os::Linux);

        let mut registry = InMemoryRegistry::new();
        NpmCache.register(&ctx, &mut registry);
        assert!(registry.contains(&cache));
    }

    #[test]
    fn windows_prefers_app_data() {
        let tmp = TempDir::new().unwrap();
        let app_data = tmp.path().join("AppData/Roaming");
        std::fs::create_dir_all(app_data.join("npm-cache")).unwrap();
        let ctx = ProviderContext::new(SystemTime::now())
            .with_home(tmp.path())
            .with_app_data(&app_data)
            .with_os(Os::Windows);

        let mut registry = InMemoryRegistry::new();
        NpmCache.register(&ctx, &mut registry);
        assert!(registry.contains(&app_data.join("npm-cache")));
    }

    #[test]
    fn windows_falls_back_to_home() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("npm-cache")).unwrap();
        let ctx = ProviderContext::new(SystemTime::now())
            .with_home(tmp.path())
            .with_app_data(tmp.path().join("missing"))
            .with_os(Os::Windows);

        assert_eq!(NpmCache::cache_dir(&ctx), Some(tmp.path().join("npm-cache")));
    }
}
