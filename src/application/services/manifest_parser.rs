//! Manifest parser - extracts mod identity from manifest text

use crate::application::errors::ManifestError;
use crate::domain::entities::ManifestRecord;

pub const MAIN_CLASS_KEY: &str = "Main-Class:";
pub const NAME_KEY: &str = "Name:";

/// Parse manifest text into a record.
///
/// Lines are matched by prefix, the last match of a key wins. Without a
/// `Name:` line the display name is `bundle_file_name`.
pub fn parse(text: &str, bundle_file_name: &str) -> Result<ManifestRecord, ManifestError> {
    let mut entry_point = None;
    let mut name = None;

    for line in text.lines() {
        if let Some(value) = line.strip_prefix(MAIN_CLASS_KEY) {
            entry_point = Some(value.trim());
        } else if let Some(value) = line.strip_prefix(NAME_KEY) {
            name = Some(value.trim());
        }
    }

    let entry_point = entry_point
        .filter(|id| !id.is_empty())
        .ok_or(ManifestError::MissingEntryPoint)?;

    Ok(ManifestRecord::new(entry_point, name.unwrap_or(bundle_file_name)))
}
