use serde::Serialize;

/// Identity and entry point declared by a bundle manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRecord {
    /// Fully qualified name of the entry type, never empty
    pub entry_point_id: String,
    /// Human readable mod name, the bundle file name when the manifest has none
    pub display_name: String,
}

impl ManifestRecord {
    pub fn new(entry_point_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            entry_point_id: entry_point_id.into(),
            display_name: display_name.into(),
        }
    }
}
