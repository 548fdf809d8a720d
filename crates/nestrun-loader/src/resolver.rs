//! Resolver abstraction for the resolution context.
//!
//! A [`Resolver`] answers lookups by name and returns `None` when it has
//! nothing to offer, leaving the next resolver in a chain to try.

use std::sync::Arc;

use crate::entry::EntryPoint;
use crate::library::Resource;
use crate::tray::TrayIconProvider;

pub trait Resolver: Send + Sync {
    fn entry_point(&self, _name: &str) -> Option<Arc<dyn EntryPoint>> {
        None
    }

    fn tray_provider(&self, _name: &str) -> Option<Arc<dyn TrayIconProvider>> {
        None
    }

    fn resource(&self, _name: &str) -> Option<Resource> {
        None
    }
}

impl<T: Resolver + ?Sized> Resolver for Arc<T> {
    fn entry_point(&self, name: &str) -> Option<Arc<dyn EntryPoint>> {
        (**self).entry_point(name)
    }

    fn tray_provider(&self, name: &str) -> Option<Arc<dyn TrayIconProvider>> {
        (**self).tray_provider(name)
    }

    fn resource(&self, name: &str) -> Option<Resource> {
        (**self).resource(name)
    }
}

/// Ask `primary` first, then `fallback`.
#[derive(Clone, Debug)]
pub struct PairResolver<R1, R2> {
    primary: R1,
    fallback: R2,
}

impl<R1, R2> PairResolver<R1, R2>
where
    R1: Resolver,
    R2: Resolver,
{
    pub fn new(primary: R1, fallback: R2) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &R1 {
        &self.primary
    }

    pub fn fallback(&self) -> &R2 {
        &self.fallback
    }
}

impl<R1, R2> Resolver for PairResolver<R1, R2>
where
    R1: Resolver,
    R2: Resolver,
{
    fn entry_point(&self, name: &str) -> Option<Arc<dyn EntryPoint>> {
        self.primary
            .entry_point(name)
            .or_else(|| self.fallback.entry_point(name))
    }

    fn tray_provider(&self, name: &str) -> Option<Arc<dyn TrayIconProvider>> {
        self.primary
            .tray_provider(name)
            .or_else(|| self.fallback.tray_provider(name))
    }

    fn resource(&self, name: &str) -> Option<Resource> {
        self.primary
            .resource(name)
            .or_else(|| self.fallback.resource(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct MockResolver(&'static str, &'static str);

    impl Resolver for MockResolver {
        fn resource(&self, name: &str) -> Option<Resource> {
            (name == self.0).then(|| Resource::new(self.1, name))
        }
    }

    struct Empty;

    impl Resolver for Empty {}

    #[test]
    fn test_pair_resolver_fallback() {
        let primary = MockResolver("icon.png", "/primary/a.jar");
        let fallback = MockResolver("app.properties", "/fallback/app.jar");

        let resolver = PairResolver::new(primary, fallback);

        assert_eq!(
            resolver.resource("icon.png").map(|r| r.library().to_path_buf()),
            Some(PathBuf::from("/primary/a.jar"))
        );
        assert_eq!(
            resolver.resource("app.properties").map(|r| r.library().to_path_buf()),
            Some(PathBuf::from("/fallback/app.jar"))
        );
        assert!(resolver.resource("missing").is_none());
    }

    #[test]
    fn primary_wins_when_both_resolve() {
        let resolver = PairResolver::new(
            MockResolver("icon.png", "/primary/a.jar"),
            MockResolver("icon.png", "/fallback/app.jar"),
        );

        let resource = resolver.resource("icon.png").unwrap();

        assert_eq!(resource.library(), PathBuf::from("/primary/a.jar"));
    }

    #[test]
    fn default_lookups_resolve_nothing() {
        let resolver = Arc::new(Empty);
        assert!(resolver.entry_point("com.example.App").is_none());
        assert!(resolver.tray_provider("com.example.Tray").is_none());
        assert!(resolver.resource("icon.png").is_none());
    }
}
