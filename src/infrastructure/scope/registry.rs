//! In-process code scope
//!
//! For mods linked straight into the host binary. Types are registered
//! against the file name of the bundle that ships them and stay hidden until
//! that bundle is added to the scope, just like dynamically loaded code.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::application::errors::{MountError, ResolveError, ScopeError};
use crate::domain::traits::{CodeScope, EntryType, Mountable};

/// Adapts a plain closure to the [`Mountable`] capability
pub struct FnHook<F>(pub F);

impl<F> Mountable for FnHook<F>
where
    F: Fn() -> Result<(), MountError> + Send + Sync,
{
    fn mount(&self) -> Result<(), MountError> {
        (self.0)()
    }
}

/// Code scope over a catalog of compiled-in entry types
#[derive(Default)]
pub struct RegistryScope {
    catalog: HashMap<String, Vec<EntryType>>,
    bundles: HashSet<String>,
    active: HashMap<String, EntryType>,
}

impl RegistryScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ship a type without a mount hook in `bundle`
    pub fn register(&mut self, bundle: impl Into<String>, entry: EntryType) -> &mut Self {
        self.catalog.entry(bundle.into()).or_default().push(entry);
        self
    }

    /// Ship a type whose mount hook runs `hook`
    pub fn register_mountable<F>(
        &mut self,
        bundle: impl Into<String>,
        id: impl Into<String>,
        hook: F,
    ) -> &mut Self
    where
        F: Fn() -> Result<(), MountError> + Send + Sync + 'static,
    {
        let entry = EntryType::new(id).with_mount(Arc::new(FnHook(hook)));
        self.register(bundle, entry)
    }

    /// File names of the bundles extended so far
    pub fn bundles(&self) -> impl Iterator<Item = &str> {
        self.bundles.iter().map(String::as_str)
    }
}

impl CodeScope for RegistryScope {
    fn extend(&mut self, bundle: &Path) -> Result<(), ScopeError> {
        if !bundle.is_file() {
            return Err(ScopeError::NotFound(bundle.to_path_buf()));
        }
        let name = bundle
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ScopeError::NotFound(bundle.to_path_buf()))?;
        if !self.bundles.insert(name.clone()) {
            return Ok(());
        }

        // The first bundle to provide a type keeps it
        for entry in self.catalog.get(&name).into_iter().flatten() {
            self.active
                .entry(entry.id().to_string())
                .or_insert_with(|| entry.clone());
        }
        Ok(())
    }

    fn resolve(&self, entry_point_id: &str) -> Result<EntryType, ResolveError> {
        self.active
            .get(entry_point_id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(entry_point_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_types_hidden_until_bundle_extended() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("cool-mod.jar");
        fs::write(&bundle, b"").unwrap();

        let mut scope = RegistryScope::new();
        scope.register("cool-mod.jar", EntryType::new("com.example.Cool"));

        assert!(scope.resolve("com.example.Cool").is_err());
        scope.extend(&bundle).unwrap();
        assert_eq!(scope.resolve("com.example.Cool").unwrap().id(), "com.example.Cool");
    }

    #[test]
    fn test_extend_twice_keeps_resolved_types() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("cool-mod.jar");
        fs::write(&bundle, b"").unwrap();

        let mut scope = RegistryScope::new();
        scope.register_mountable("cool-mod.jar", "com.example.Cool", || Ok(()));
        scope.extend(&bundle).unwrap();
        let first = scope.resolve("com.example.Cool").unwrap();

        scope.extend(&bundle).unwrap();
        let second = scope.resolve("com.example.Cool").unwrap();
        assert_eq!(first.id(), second.id());
        assert!(second.mount_hook().is_some());
        assert_eq!(scope.bundles().count(), 1);
    }

    #[test]
    fn test_extend_missing_bundle_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut scope = RegistryScope::new();
        let err = scope.extend(&dir.path().join("missing.jar")).unwrap_err();
        assert!(matches!(err, ScopeError::NotFound(_)));
    }

    #[test]
    fn test_first_bundle_keeps_duplicate_type() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.jar");
        let second = dir.path().join("second.jar");
        fs::write(&first, b"").unwrap();
        fs::write(&second, b"").unwrap();

        let mut scope = RegistryScope::new();
        scope
            .register_mountable("first.jar", "com.example.Shared", || Ok(()))
            .register("second.jar", EntryType::new("com.example.Shared"));
        scope.extend(&first).unwrap();
        scope.extend(&second).unwrap();

        assert!(scope.resolve("com.example.Shared").unwrap().mount_hook().is_some());
    }
}
