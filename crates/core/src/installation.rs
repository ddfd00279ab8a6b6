//! Installation Records
//!
//! One discovered NDK installation: its name and version, where its host
//! tools and target sysroot live, and the devices it supports.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::device::{DeviceDescriptor, DeviceKind};
use crate::entity::VersionedEntity;
use crate::error::{NdkError, Result};
use crate::version::NdkVersion;

/// Descriptor of a locally installed NDK
#[derive(Debug, Clone, Serialize)]
pub struct InstallationRecord {
    #[serde(flatten)]
    entity: VersionedEntity,
    host_path: PathBuf,
    target_path: PathBuf,
    devices: Vec<DeviceDescriptor>,
}

impl InstallationRecord {
    /// Create a record; both paths must be non-empty
    pub fn new(
        entity: VersionedEntity,
        host_path: impl Into<PathBuf>,
        target_path: impl Into<PathBuf>,
        devices: Vec<DeviceDescriptor>,
    ) -> Result<Self> {
        let host_path = host_path.into();
        let target_path = target_path.into();

        if host_path.as_os_str().is_empty() {
            return Err(NdkError::EmptyHostPath);
        }
        if target_path.as_os_str().is_empty() {
            return Err(NdkError::EmptyTargetPath);
        }

        Ok(Self {
            entity,
            host_path,
            target_path,
            devices,
        })
    }

    pub fn entity(&self) -> &VersionedEntity {
        &self.entity
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn version(&self) -> &NdkVersion {
        self.entity.version()
    }

    /// Host-side tools directory
    pub fn host_path(&self) -> &Path {
        &self.host_path
    }

    /// Target sysroot directory
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    /// Physical devices only
    pub fn physical_devices(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.devices.iter().filter(|d| d.kind == DeviceKind::Device)
    }

    /// Simulators only
    pub fn simulators(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.devices.iter().filter(|d| d.kind == DeviceKind::Simulator)
    }

    /// Checks if the installation is really available.
    ///
    /// Both paths must currently be directories. Any failure while checking
    /// (permissions, dangling links) counts as missing.
    pub fn exists(&self) -> bool {
        self.host_path.is_dir() && self.target_path.is_dir()
    }
}

impl Ord for InstallationRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entity
            .cmp(&other.entity)
            .then_with(|| self.host_path.cmp(&other.host_path))
            .then_with(|| self.target_path.cmp(&other.target_path))
    }
}

impl PartialOrd for InstallationRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for InstallationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for InstallationRecord {}

impl fmt::Display for InstallationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entity.fmt(f)
    }
}
