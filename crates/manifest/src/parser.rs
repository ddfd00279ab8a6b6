//! Installation Manifest Parser
//!
//! Parses one `<installation>` manifest into an [`InstallationRecord`],
//! resolving the installation's device list from the nearest
//! `blackberry-sdk-descriptor.xml`.

use std::io::Read;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, trace};

use bbndk_core::{
    DeviceDescriptor, InstallationRecord, NdkError, NdkVersion, VersionError, VersionedEntity,
    DESCRIPTOR_FILE_NAME,
};

use crate::descriptor::DeviceDescriptorLoader;
use crate::xml::ElementText;

/// Parser errors
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid version: {0}")]
    InvalidVersion(#[from] VersionError),
    #[error("Invalid installation: {0}")]
    Record(#[from] NdkError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Version,
    Host,
    Target,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(Field::Name),
            b"version" => Some(Field::Version),
            b"host" => Some(Field::Host),
            b"target" => Some(Field::Target),
            _ => None,
        }
    }
}

/// Raw values read from a manifest, before validation
#[derive(Debug, Default)]
struct ManifestFields {
    name: Option<String>,
    version: Option<String>,
    host: Option<String>,
    target: Option<String>,
}

impl ManifestFields {
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Version => &mut self.version,
            Field::Host => &mut self.host,
            Field::Target => &mut self.target,
        };
        *slot = Some(value);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Manifest parser
pub struct ManifestParser;

impl ManifestParser {
    /// Parse a manifest file from path
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Option<InstallationRecord>, ManifestError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a manifest from any UTF-8 byte stream
    pub fn parse_reader<R: Read>(mut reader: R) -> Result<Option<InstallationRecord>, ManifestError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse_str(&content)
    }

    /// Parse a manifest from a string.
    ///
    /// `Ok(None)` means the document is not a usable manifest: it never closes
    /// `installation`, or lacks a host path, target path or version.
    pub fn parse_str(xml: &str) -> Result<Option<InstallationRecord>, ManifestError> {
        match Self::read_fields(xml)? {
            Some(fields) => Self::into_record(fields),
            None => {
                trace!("No closing </installation> found");
                Ok(None)
            }
        }
    }

    fn read_fields(xml: &str) -> Result<Option<ManifestFields>, ManifestError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut fields = ManifestFields::default();
        let mut text = ElementText::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    if let Some(field) = Field::from_tag(e.local_name().as_ref()) {
                        text.begin(field);
                    }
                }
                Event::Empty(ref e) => {
                    if let Some(field) = Field::from_tag(e.local_name().as_ref()) {
                        fields.set(field, String::new());
                    }
                }
                Event::Text(ref t) => text.push_text(t)?,
                Event::CData(ref c) => text.push_cdata(c),
                Event::End(ref e) => {
                    let tag = e.local_name();
                    if tag.as_ref() == b"installation" {
                        return Ok(Some(fields));
                    }
                    if let Some(field) = Field::from_tag(tag.as_ref()) {
                        if let Some(value) = text.end(field) {
                            fields.set(field, value);
                        }
                    }
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    fn into_record(fields: ManifestFields) -> Result<Option<InstallationRecord>, ManifestError> {
        let (Some(host), Some(target)) = (non_empty(fields.host), non_empty(fields.target)) else {
            debug!("Manifest lacks a host or target path");
            return Ok(None);
        };

        let Some(version) = non_empty(fields.version) else {
            debug!("Manifest for {:?} lacks a version", target);
            return Ok(None);
        };
        let version = NdkVersion::parse(&version)?;

        let entity = match non_empty(fields.name) {
            Some(name) => VersionedEntity::new(name, version)?,
            None => VersionedEntity::unnamed(version),
        };

        let devices = Self::resolve_devices(Path::new(&target));
        let record = InstallationRecord::new(entity, host, target, devices)?;
        Ok(Some(record))
    }

    /// Descriptor locations tried for a target path, nearest first
    pub fn descriptor_candidates(target: &Path) -> [PathBuf; 3] {
        [
            target.join(DESCRIPTOR_FILE_NAME),
            target.join("..").join(DESCRIPTOR_FILE_NAME),
            target.join("..").join("..").join(DESCRIPTOR_FILE_NAME),
        ]
    }

    /// Load devices from the first candidate descriptor that can be read.
    ///
    /// A descriptor declaring no devices still ends the search.
    fn resolve_devices(target: &Path) -> Vec<DeviceDescriptor> {
        for candidate in Self::descriptor_candidates(target) {
            if let Some(devices) = DeviceDescriptorLoader::load(&candidate) {
                trace!("Using descriptor {:?}", candidate);
                return devices;
            }
        }

        debug!("No device descriptor found near {:?}", target);
        Vec::new()
    }
}
