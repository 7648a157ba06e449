use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name suffix that identifies a mod bundle
pub const BUNDLE_EXTENSION: &str = ".jar";

/// A bundle archive found in the mods directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleCandidate {
    pub path: PathBuf,
    pub file_name: String,
}

impl BundleCandidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_bundle_name(file_name: &str) -> bool {
        file_name.ends_with(BUNDLE_EXTENSION)
    }
}

/// Bundle file names the operator switched off
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledSet {
    names: HashSet<String>,
}

impl DisabledSet {
    /// Parse a comma separated list of file names. Blank items are ignored.
    pub fn parse(value: Option<&str>) -> Self {
        let names = value
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DisabledSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
