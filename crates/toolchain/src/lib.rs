//! NDK Installation Discovery
//!
//! Scans the configuration folder for installation manifests and ranks the
//! installations found:
//! - recursive manifest discovery
//! - existence checks against the live filesystem
//! - version-ordered registry and selection helpers

pub mod registry;
pub mod scanner;

pub use registry::Registry;
pub use scanner::{RegistryScanner, ScanError, ScanStats};
