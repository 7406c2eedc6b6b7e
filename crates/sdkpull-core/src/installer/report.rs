//! Results of an install.

use std::path::PathBuf;

use crate::platform::Platform;
use crate::profile::{Component, ComponentRole};

/// What happened to one component of the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentOutcome {
    /// Copied `files` files into `destination`
    Copied { destination: PathBuf, files: u64 },
    /// Source not present in the extracted tree; skipped with a warning
    Missing { source: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReport {
    pub component: Component,
    pub outcome: ComponentOutcome,
}

impl ComponentReport {
    pub fn is_copied(&self) -> bool {
        matches!(self.outcome, ComponentOutcome::Copied { .. })
    }
}

/// Outcome of the selective copy step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Directory component paths were resolved against
    pub source_root: PathBuf,
    /// The marker directory was absent and the tree root was used instead
    pub used_fallback_root: bool,
    pub components: Vec<ComponentReport>,
}

impl CopyReport {
    /// Total number of files copied
    pub fn copied_files(&self) -> u64 {
        self.components
            .iter()
            .map(|c| match c.outcome {
                ComponentOutcome::Copied { files, .. } => files,
                ComponentOutcome::Missing { .. } => 0,
            })
            .sum()
    }

    /// Components that were not found
    pub fn missing(&self) -> impl Iterator<Item = &ComponentReport> {
        self.components.iter().filter(|c| !c.is_copied())
    }

    pub fn has_warnings(&self) -> bool {
        self.used_fallback_root || self.missing().next().is_some()
    }

    /// `(copied, configured)` plugin counts
    pub fn plugin_counts(&self) -> (usize, usize) {
        let plugins = self
            .components
            .iter()
            .filter(|c| c.component.role == ComponentRole::Plugin);
        let total = plugins.clone().count();
        let copied = plugins.filter(|c| c.is_copied()).count();
        (copied, total)
    }
}

/// Outcome of a full install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub platform: Platform,
    /// `<libs>/<sdk>`
    pub destination: PathBuf,
    pub copy: CopyReport,
    pub installer_deleted: bool,
}
