use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::application::errors::{MountError, ResolveError, ScopeError};

/// The set of code locations entry types are resolved from.
///
/// Only the bootstrap holds one. `extend` must never drop what an earlier
/// call added, and calling it twice with the same bundle is a no-op.
pub trait CodeScope {
    /// Make the code packaged in `bundle` resolvable
    fn extend(&mut self, bundle: &Path) -> Result<(), ScopeError>;

    /// Look up an entry type by its fully qualified id
    fn resolve(&self, entry_point_id: &str) -> Result<EntryType, ResolveError>;
}

/// One-time initialization hook a mod may provide.
///
/// Plugin authors do not implement a base type; the scope finds the hook by
/// name and wraps it in this capability.
pub trait Mountable: Send + Sync {
    fn mount(&self) -> Result<(), MountError>;
}

/// A resolved, loadable entry type
#[derive(Clone)]
pub struct EntryType {
    id: String,
    mount: Option<Arc<dyn Mountable>>,
}

impl EntryType {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mount: None,
        }
    }

    pub fn with_mount(mut self, hook: Arc<dyn Mountable>) -> Self {
        self.mount = Some(hook);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `mount` hook, if the type declares one
    pub fn mount_hook(&self) -> Option<Arc<dyn Mountable>> {
        self.mount.clone()
    }
}

impl fmt::Debug for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryType")
            .field("id", &self.id)
            .field("mountable", &self.mount.is_some())
            .finish()
    }
}
