//! bbndk - BlackBerry Native SDK discovery
//!
//! Finds the NDK installations registered on this machine and ranks them.
//!
//! ## Architecture
//!
//! bbndk is organized into specialized crates:
//!
//! - `bbndk-core`: versions, device descriptors, installation records, configuration
//! - `bbndk-manifest`: installation manifest and device descriptor parsing
//! - `bbndk-toolchain`: recursive scanning and the ordered registry

#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use bbndk_core as core;
pub use bbndk_manifest as manifest;
pub use bbndk_toolchain as toolchain;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use bbndk_core::{
        AppConfig, DeviceDescriptor, DeviceKind, InstallationRecord, NdkVersion, VersionedEntity,
    };
    pub use bbndk_manifest::{DeviceDescriptorLoader, ManifestParser};
    pub use bbndk_toolchain::{Registry, RegistryScanner};
}
