use std::fmt;

use crate::domain::traits::EntryType;

/// A parsed and resolved mod, ready to be mounted
#[derive(Debug, Clone)]
pub struct LoadedMod {
    pub display_name: String,
    /// File name of the bundle the mod came from
    pub bundle: String,
    pub entry: EntryType,
}

impl LoadedMod {
    pub fn new(
        display_name: impl Into<String>,
        bundle: impl Into<String>,
        entry: EntryType,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            bundle: bundle.into(),
            entry,
        }
    }
}

/// Loaded mods keyed by display name, in insertion order.
///
/// Inserting a name that is already present replaces the earlier mod and
/// moves the name to the end.
#[derive(Debug, Default)]
pub struct ModTable {
    mods: Vec<LoadedMod>,
}

impl ModTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mod, returning the one it shadowed
    pub fn insert(&mut self, loaded: LoadedMod) -> Option<LoadedMod> {
        let shadowed = self
            .mods
            .iter()
            .position(|m| m.display_name == loaded.display_name)
            .map(|idx| self.mods.remove(idx));
        self.mods.push(loaded);
        shadowed
    }

    pub fn get(&self, display_name: &str) -> Option<&LoadedMod> {
        self.mods.iter().find(|m| m.display_name == display_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedMod> {
        self.mods.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.mods.iter().map(|m| m.display_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}

/// Result of invoking a mod's `mount` hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted,
    /// The entry type declares no `mount` hook
    NotMountable,
    Failed(String),
}

impl MountOutcome {
    pub fn is_mounted(&self) -> bool {
        matches!(self, MountOutcome::Mounted)
    }
}

impl fmt::Display for MountOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountOutcome::Mounted => write!(f, "mounted"),
            MountOutcome::NotMountable => write!(f, "not mountable"),
            MountOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(name: &str, bundle: &str) -> LoadedMod {
        LoadedMod::new(name, bundle, EntryType::new(format!("com.example.{}", bundle)))
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let mut table = ModTable::new();
        assert!(table.insert(loaded("Shared", "first.jar")).is_none());
        assert!(table.insert(loaded("Other", "other.jar")).is_none());

        let shadowed = table.insert(loaded("Shared", "second.jar"));
        assert_eq!(shadowed.map(|m| m.bundle), Some("first.jar".to_string()));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Shared").map(|m| m.bundle.as_str()), Some("second.jar"));
        assert_eq!(table.names(), vec!["Other", "Shared"]);
    }

    #[test]
    fn test_insertion_order() {
        let mut table = ModTable::new();
        table.insert(loaded("B", "b.jar"));
        table.insert(loaded("A", "a.jar"));
        table.insert(loaded("C", "c.jar"));
        assert_eq!(table.names(), vec!["B", "A", "C"]);
    }
}
