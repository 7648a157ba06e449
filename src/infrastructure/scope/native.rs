//! Native code scope - shared libraries packed inside bundles
//!
//! Each bundle may carry any number of shared libraries. Extending the scope
//! unpacks them into a staging directory and opens them for the rest of the
//! process lifetime. An entry type `com.example.Cool` is the exported symbol
//! `com_example_Cool`; its optional hook is `com_example_Cool__mount`, an
//! `extern "C" fn() -> i32` returning 0 on success.
//!
//! A panic cannot cross from a separately compiled library into the host, so
//! hooks must catch their own. [`crate::plugin_api`] exports the wrappers that
//! do it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::{Library, Symbol};

use crate::application::errors::{MountError, ResolveError, ScopeError};
use crate::domain::traits::{CodeScope, EntryType, Mountable};
use crate::infrastructure::archive;

/// Signature of an exported mount hook; nonzero means the mount failed
pub type MountFn = unsafe extern "C" fn() -> i32;

/// Suffix appended to the mangled type name to find its mount hook
pub const MOUNT_SUFFIX: &str = "__mount";

/// Turn a dotted entry id into the symbol name it is exported under
pub fn mangle(entry_point_id: &str) -> String {
    entry_point_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

struct LoadedLibrary {
    path: PathBuf,
    library: Arc<Library>,
}

/// Code scope backed by dynamically opened libraries
pub struct NativeScope {
    staging_dir: PathBuf,
    bundles: HashSet<PathBuf>,
    libraries: Vec<LoadedLibrary>,
}

impl NativeScope {
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            bundles: HashSet::new(),
            libraries: Vec::new(),
        }
    }

    /// Paths of every library opened so far, in load order
    pub fn library_paths(&self) -> Vec<&Path> {
        self.libraries.iter().map(|l| l.path.as_path()).collect()
    }

    fn staging_for(&self, bundle: &Path) -> PathBuf {
        let stem = bundle
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.staging_dir.join(stem)
    }

    #[cfg(unix)]
    fn open(path: &Path) -> Result<Library, libloading::Error> {
        use libloading::os::unix::{Library as UnixLibrary, RTLD_GLOBAL, RTLD_LAZY};
        // Global so that libraries from sibling bundles can bind each other
        unsafe { UnixLibrary::open(Some(path), RTLD_LAZY | RTLD_GLOBAL).map(Library::from) }
    }

    #[cfg(not(unix))]
    fn open(path: &Path) -> Result<Library, libloading::Error> {
        unsafe { Library::new(path) }
    }
}

impl CodeScope for NativeScope {
    fn extend(&mut self, bundle: &Path) -> Result<(), ScopeError> {
        let key = bundle
            .canonicalize()
            .map_err(|_| ScopeError::NotFound(bundle.to_path_buf()))?;
        if self.bundles.contains(&key) {
            return Ok(());
        }

        let dest = self.staging_for(bundle);
        let paths = archive::extract_by_extension(bundle, std::env::consts::DLL_EXTENSION, &dest)?;
        // Recorded before opening: a retry must not overwrite a mapped library
        self.bundles.insert(key);

        for path in paths {
            let library = Self::open(&path).map_err(|source| ScopeError::Library {
                path: path.clone(),
                source,
            })?;
            tracing::debug!("Opened library '{}'", path.display());
            self.libraries.push(LoadedLibrary {
                path,
                library: Arc::new(library),
            });
        }
        Ok(())
    }

    fn resolve(&self, entry_point_id: &str) -> Result<EntryType, ResolveError> {
        let symbol = mangle(entry_point_id);

        for loaded in &self.libraries {
            let found = unsafe { loaded.library.get::<*const u8>(symbol.as_bytes()).is_ok() };
            if !found {
                continue;
            }

            let hook_name = format!("{}{}", symbol, MOUNT_SUFFIX);
            let hook = unsafe {
                loaded
                    .library
                    .get::<MountFn>(hook_name.as_bytes())
                    .map(|f: Symbol<MountFn>| *f)
                    .ok()
            };

            let entry = EntryType::new(entry_point_id);
            return Ok(match hook {
                Some(func) => entry.with_mount(Arc::new(NativeMount {
                    func,
                    _library: Arc::clone(&loaded.library),
                })),
                None => entry,
            });
        }

        Err(ResolveError::NotFound(entry_point_id.to_string()))
    }
}

/// An exported mount hook together with the library that owns it
struct NativeMount {
    func: MountFn,
    _library: Arc<Library>,
}

impl Mountable for NativeMount {
    fn mount(&self) -> Result<(), MountError> {
        match unsafe { (self.func)() } {
            0 => Ok(()),
            status => Err(MountError::Failed(format!("mount hook returned status {}", status))),
        }
    }
}
