//! Bootstrap - sequences mod discovery, loading and mounting
//!
//! scan -> extend scope (every bundle) -> parse and resolve (every bundle)
//! -> mount (every mod). All scope extension happens before the first
//! resolution because an entry type may depend on code from a sibling bundle.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::application::errors::ManifestError;
use crate::application::services::{manifest_parser, mount_invoker, scanner, EntryResolver};
use crate::domain::entities::{BundleCandidate, DisabledSet, ManifestRecord, ModTable, MountOutcome};
use crate::domain::traits::CodeScope;
use crate::infrastructure::archive::{self, MANIFEST_PATH};

/// Pipeline stage a bundle problem was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The bundle stays in the run; resolution will most likely fail
    Scope,
    Manifest,
    EntryPoint,
    Resolve,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Scope => "scope",
            Stage::Manifest => "manifest",
            Stage::EntryPoint => "entry point",
            Stage::Resolve => "resolve",
        };
        write!(f, "{}", s)
    }
}

/// A per-bundle problem recorded during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleIssue {
    pub bundle: String,
    pub stage: Stage,
    pub reason: String,
}

/// What happened during one run
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Bundles that survived the disabled filter, in load order
    pub bundles: Vec<String>,
    pub issues: Vec<BundleIssue>,
    pub outcomes: Vec<(String, MountOutcome)>,
}

impl BootstrapReport {
    pub fn mounted(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_mounted()).count()
    }

    pub fn outcome(&self, display_name: &str) -> Option<&MountOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == display_name)
            .map(|(_, outcome)| outcome)
    }

    pub fn issues_for(&self, bundle: &str) -> Vec<&BundleIssue> {
        self.issues.iter().filter(|i| i.bundle == bundle).collect()
    }
}

/// Runs the mod pipeline against a code scope.
///
/// The bootstrap owns the scope, so keep it alive for as long as mounted
/// mods may run.
pub struct Bootstrap<S: CodeScope> {
    scope: S,
    mods_dir: PathBuf,
    disabled: DisabledSet,
    sort_bundles: bool,
}

impl<S: CodeScope> Bootstrap<S> {
    pub fn new(scope: S, mods_dir: impl Into<PathBuf>, disabled: DisabledSet) -> Self {
        Self {
            scope,
            mods_dir: mods_dir.into(),
            disabled,
            sort_bundles: false,
        }
    }

    pub fn with_sorted_bundles(mut self, sort: bool) -> Self {
        self.sort_bundles = sort;
        self
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn run(&mut self) -> BootstrapReport {
        let mut report = BootstrapReport::default();

        let mut bundles = scanner::scan(&self.mods_dir, &self.disabled);
        if bundles.is_empty() {
            tracing::debug!("No mods found in '{}'", self.mods_dir.display());
            return report;
        }
        if self.sort_bundles {
            scanner::sort_by_name(&mut bundles);
        }
        report.bundles = bundles.iter().map(|b| b.file_name.clone()).collect();

        self.extend_scope(&bundles, &mut report);
        let mods = self.load_mods(&bundles, &mut report);
        report.outcomes = mount_invoker::mount_all(&mods);

        tracing::info!(
            "Mounted {} of {} mod(s) from {} jar(s)",
            report.mounted(),
            mods.len(),
            bundles.len()
        );
        report
    }

    fn extend_scope(&mut self, bundles: &[BundleCandidate], report: &mut BootstrapReport) {
        for bundle in bundles {
            match self.scope.extend(bundle.path()) {
                Ok(()) => tracing::info!("Loaded jar '{}'", bundle.file_name),
                Err(e) => {
                    tracing::warn!("Failed to load jar '{}': {}", bundle.file_name, e);
                    tracing::debug!("Scope extension detail for '{}': {:?}", bundle.file_name, e);
                    report.issues.push(BundleIssue {
                        bundle: bundle.file_name.clone(),
                        stage: Stage::Scope,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    fn load_mods(&self, bundles: &[BundleCandidate], report: &mut BootstrapReport) -> ModTable {
        let mut resolver = EntryResolver::new(&self.scope);

        for bundle in bundles {
            let record = match read_record(bundle) {
                Ok(record) => record,
                Err(issue) => {
                    report.issues.push(issue);
                    continue;
                }
            };

            let entry_point = record.entry_point_id.clone();
            if let Err(e) = resolver.resolve(bundle, record) {
                tracing::warn!(
                    "Failed to load class '{}' from '{}': {}",
                    entry_point,
                    bundle.file_name,
                    e
                );
                report.issues.push(BundleIssue {
                    bundle: bundle.file_name.clone(),
                    stage: Stage::Resolve,
                    reason: e.to_string(),
                });
            }
        }

        resolver.finish()
    }
}

/// Read and parse a bundle's manifest, logging why it was rejected
fn read_record(bundle: &BundleCandidate) -> Result<ManifestRecord, BundleIssue> {
    let text = archive::read_entry(bundle.path(), MANIFEST_PATH)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Failed to read '{}' from '{}'", MANIFEST_PATH, bundle.file_name);
            BundleIssue {
                bundle: bundle.file_name.clone(),
                stage: Stage::Manifest,
                reason: format!("missing or unreadable '{}'", MANIFEST_PATH),
            }
        })?;

    manifest_parser::parse(&text, &bundle.file_name).map_err(|e: ManifestError| {
        tracing::warn!("Failed to read 'Main-Class' from '{}'", bundle.file_name);
        BundleIssue {
            bundle: bundle.file_name.clone(),
            stage: Stage::EntryPoint,
            reason: e.to_string(),
        }
    })
}

/// A bundle as seen without loading any code
#[derive(Debug, Clone, Serialize)]
pub struct BundleInfo {
    pub file_name: String,
    pub disabled: bool,
    #[serde(flatten)]
    pub manifest: Option<ManifestRecord>,
    /// Why the manifest was rejected, if it was
    pub problem: Option<String>,
}

/// Describe every bundle in `mods_dir`, disabled ones included.
/// Disabled bundles are reported without opening them.
pub fn inventory(mods_dir: &Path, disabled: &DisabledSet, sort: bool) -> Vec<BundleInfo> {
    let mut bundles = scanner::scan_all(mods_dir);
    if sort {
        scanner::sort_by_name(&mut bundles);
    }

    bundles
        .iter()
        .map(|bundle| {
            let is_disabled = disabled.contains(&bundle.file_name);
            let (manifest, problem) = if is_disabled {
                (None, None)
            } else {
                match read_record(bundle) {
                    Ok(record) => (Some(record), None),
                    Err(issue) => (None, Some(issue.reason)),
                }
            };
            BundleInfo {
                file_name: bundle.file_name.clone(),
                disabled: is_disabled,
                manifest,
                problem,
            }
        })
        .collect()
}
