//! bbndk Core - shared model and configuration
//!
//! Types shared by the manifest parser and the registry scanner: versions,
//! device descriptors, installation records, configuration and errors.

pub mod config;
pub mod device;
pub mod entity;
pub mod error;
pub mod installation;
pub mod version;

pub use config::AppConfig;
pub use device::{DeviceDescriptor, DeviceKind};
pub use entity::VersionedEntity;
pub use error::{NdkError, Result, VersionError};
pub use installation::InstallationRecord;
pub use version::NdkVersion;

/// bbndk version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the per-installation device descriptor
pub const DESCRIPTOR_FILE_NAME: &str = "blackberry-sdk-descriptor.xml";
