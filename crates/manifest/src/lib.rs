//! bbndk Manifest Parsing
//!
//! Reads the XML files describing NDK installations:
//! - installation manifests (`<installation>` with name, version, host, target)
//! - `blackberry-sdk-descriptor.xml` device descriptors

pub mod descriptor;
pub mod parser;
mod xml;

pub use descriptor::{DescriptorError, DeviceDescriptorLoader};
pub use parser::{ManifestError, ManifestParser};
