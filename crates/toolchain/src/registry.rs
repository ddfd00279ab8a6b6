//! Installation Registry
//!
//! The ordered result of a scan, oldest installation first, with helpers
//! for picking the one a build should use.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use bbndk_core::entity::compare_ignore_case;
use bbndk_core::{InstallationRecord, NdkVersion};

/// Installations sorted ascending by version, then name
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Registry {
    installations: Vec<InstallationRecord>,
}

impl Registry {
    /// Build a registry; the records are sorted regardless of input order
    pub fn new(mut installations: Vec<InstallationRecord>) -> Self {
        installations.sort();
        Self { installations }
    }

    pub fn len(&self) -> usize {
        self.installations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstallationRecord> {
        self.installations.iter()
    }

    pub fn as_slice(&self) -> &[InstallationRecord] {
        &self.installations
    }

    pub fn into_vec(self) -> Vec<InstallationRecord> {
        self.installations
    }

    /// Highest installed version
    pub fn latest(&self) -> Option<&InstallationRecord> {
        self.installations.last()
    }

    /// Installation with the given name (case-insensitive), newest first
    pub fn find_by_name(&self, name: &str) -> Option<&InstallationRecord> {
        self.installations
            .iter()
            .rev()
            .find(|r| compare_ignore_case(r.name(), name.trim()) == Ordering::Equal)
    }

    /// First installation whose version equals `version`
    pub fn find_by_version(&self, version: &NdkVersion) -> Option<&InstallationRecord> {
        self.installations.iter().find(|r| r.version() == version)
    }

    /// Pick the installation to use.
    ///
    /// `preferred` is matched against names first, then versions. Without a
    /// preference, or when nothing matches, the latest installation is used.
    pub fn resolve(&self, preferred: Option<&str>) -> Option<&InstallationRecord> {
        let preferred = preferred.map(str::trim).filter(|p| !p.is_empty());

        if let Some(wanted) = preferred {
            let found = self.find_by_name(wanted).or_else(|| {
                NdkVersion::parse(wanted)
                    .ok()
                    .and_then(|v| self.find_by_version(&v))
            });
            if found.is_some() {
                return found;
            }
            debug!("Preferred installation {:?} not installed, using latest", wanted);
        }

        self.latest()
    }
}

impl IntoIterator for Registry {
    type Item = InstallationRecord;
    type IntoIter = std::vec::IntoIter<InstallationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.installations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a InstallationRecord;
    type IntoIter = std::slice::Iter<'a, InstallationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.installations.iter()
    }
}
