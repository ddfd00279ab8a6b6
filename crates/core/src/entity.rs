//! Named, versioned entities and their shared ordering

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{NdkError, Result};
use crate::version::NdkVersion;

/// A display name paired with a version
#[derive(Debug, Clone, Serialize)]
pub struct VersionedEntity {
    name: String,
    version: NdkVersion,
}

impl VersionedEntity {
    /// Create an entity; the name must not be blank
    pub fn new(name: impl Into<String>, version: NdkVersion) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NdkError::EmptyName);
        }
        Ok(Self { name, version })
    }

    /// Create an entity for a manifest that declared no name
    pub fn unnamed(version: NdkVersion) -> Self {
        Self {
            name: String::new(),
            version,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &NdkVersion {
        &self.version
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

/// Case-insensitive comparison using Unicode lowercase folding
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl Ord for VersionedEntity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| compare_ignore_case(&self.name, &other.name))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for VersionedEntity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionedEntity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionedEntity {}

impl fmt::Display for VersionedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{} ({})", self.name, self.version)
        }
    }
}
