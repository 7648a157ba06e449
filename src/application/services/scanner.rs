//! Bundle scanner - finds mod bundles in the mods directory

use std::fs;
use std::path::Path;

use crate::domain::entities::{BundleCandidate, DisabledSet};

/// Every bundle in `dir`, disabled or not, in directory listing order.
///
/// A missing or unreadable directory yields nothing; there is no recursion.
pub fn scan_all(dir: &Path) -> Vec<BundleCandidate> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if dir.exists() {
                tracing::warn!("Failed to read mods directory '{}': {}", dir.display(), e);
            }
            return Vec::new();
        }
    };

    let mut bundles = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let candidate = BundleCandidate::new(path);
        if BundleCandidate::is_bundle_name(&candidate.file_name) {
            bundles.push(candidate);
        }
    }
    bundles
}

/// Bundles in `dir` that are not disabled
pub fn scan(dir: &Path, disabled: &DisabledSet) -> Vec<BundleCandidate> {
    scan_all(dir)
        .into_iter()
        .filter(|bundle| {
            let skip = disabled.contains(&bundle.file_name);
            if skip {
                tracing::info!("Skipping disabled jar '{}'", bundle.file_name);
            }
            !skip
        })
        .collect()
}

/// Order bundles by file name
pub fn sort_by_name(bundles: &mut [BundleCandidate]) {
    bundles.sort_by(|a, b| a.file_name.cmp(&b.file_name));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(bundles: &[BundleCandidate]) -> Vec<String> {
        let mut names: Vec<String> = bundles.iter().map(|b| b.file_name.clone()).collect();
        names.sort();
        names
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(&dir.path().join("code-mods"), &DisabledSet::default()).is_empty());
    }

    #[test]
    fn test_empty_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(dir.path(), &DisabledSet::default()).is_empty());
    }

    #[test]
    fn test_filters_extension_and_disabled() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jar", "b.jar", "c.jar", "notes.txt", "d.jar.disabled"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("nested.jar")).unwrap();

        let disabled: DisabledSet = ["b.jar", "missing.jar"].into_iter().collect();
        assert_eq!(names(&scan(dir.path(), &disabled)), vec!["a.jar", "c.jar"]);

        // Order of the disabled list does not matter
        let disabled: DisabledSet = ["missing.jar", "b.jar"].into_iter().collect();
        assert_eq!(names(&scan(dir.path(), &disabled)), vec!["a.jar", "c.jar"]);

        assert_eq!(names(&scan_all(dir.path())), vec!["a.jar", "b.jar", "c.jar"]);
    }

    #[test]
    fn test_sort_by_name() {
        let mut bundles = vec![
            BundleCandidate::new("/m/zeta.jar"),
            BundleCandidate::new("/m/alpha.jar"),
            BundleCandidate::new("/m/mid.jar"),
        ];
        sort_by_name(&mut bundles);
        let order: Vec<&str> = bundles.iter().map(|b| b.file_name.as_str()).collect();
        assert_eq!(order, vec!["alpha.jar", "mid.jar", "zeta.jar"]);
    }
}
