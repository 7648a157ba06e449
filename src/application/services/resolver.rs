//! Entry resolver - turns manifest records into loaded mods

use crate::application::errors::ResolveError;
use crate::domain::entities::{BundleCandidate, LoadedMod, ManifestRecord, ModTable};
use crate::domain::traits::CodeScope;

/// Resolves entry types against an already extended code scope
pub struct EntryResolver<'a> {
    scope: &'a dyn CodeScope,
    mods: ModTable,
}

impl<'a> EntryResolver<'a> {
    pub fn new(scope: &'a dyn CodeScope) -> Self {
        Self {
            scope,
            mods: ModTable::new(),
        }
    }

    /// Resolve `record` and add it to the table under its display name
    pub fn resolve(
        &mut self,
        bundle: &BundleCandidate,
        record: ManifestRecord,
    ) -> Result<(), ResolveError> {
        let entry = self.scope.resolve(&record.entry_point_id)?;
        tracing::info!("Loaded class '{}' from '{}'", record.entry_point_id, bundle.file_name);

        let loaded = LoadedMod::new(record.display_name, bundle.file_name.clone(), entry);
        if let Some(shadowed) = self.mods.insert(loaded) {
            tracing::warn!(
                "Mod '{}' from '{}' replaces the one from '{}'",
                shadowed.display_name,
                bundle.file_name,
                shadowed.bundle
            );
        }
        Ok(())
    }

    pub fn finish(self) -> ModTable {
        self.mods
    }
}
