//! Bundle archive access
//!
//! Bundles are zip archives. This module only knows about entries and bytes,
//! nothing about what a mod is.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::application::errors::ArchiveError;

/// Fixed manifest location inside every bundle
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

fn open(bundle: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    let file = File::open(bundle)?;
    Ok(ZipArchive::new(file)?)
}

fn read_lines(bundle: &Path, entry: &str) -> Result<String, ArchiveError> {
    let mut archive = open(bundle)?;
    let file = archive.by_name(entry)?;
    let mut text = String::new();
    for line in BufReader::new(file).lines() {
        text.push_str(&line?);
        text.push('\n');
    }
    Ok(text)
}

/// Read a text entry from a bundle, one `\n` after every line.
///
/// A missing entry, an unreadable archive or non UTF-8 content all yield
/// `None`; callers skip the bundle.
pub fn read_entry(bundle: &Path, entry: &str) -> Option<String> {
    match read_lines(bundle, entry) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("Failed to read '{}' from '{}': {}", entry, bundle.display(), e);
            None
        }
    }
}

/// Unpack every entry whose file name ends in `.<extension>` into `dest`,
/// returning the written paths in archive order.
pub fn extract_by_extension(
    bundle: &Path,
    extension: &str,
    dest: &Path,
) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut archive = open(bundle)?;
    let suffix = format!(".{}", extension);
    let mut written = Vec::new();

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        if entry.is_dir() || !entry.name().ends_with(&suffix) {
            continue;
        }
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafePath(entry.name().to_string()))?;
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written.push(target);
    }

    Ok(written)
}
