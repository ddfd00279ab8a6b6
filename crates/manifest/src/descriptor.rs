//! Device Descriptor Loader
//!
//! Reads `blackberry-sdk-descriptor.xml` files into device descriptors.
//! Every `device` element yields one descriptor; its fields may be given as
//! attributes or as child elements:
//!
//! ```xml
//! <sdkDescriptor>
//!   <devices>
//!     <device family="handset" type="device" arch="armle-v7">
//!       <name>BlackBerry Z10</name>
//!     </device>
//!     <device type="simulator"><name>BlackBerry 10 Simulator</name></device>
//!   </devices>
//! </sdkDescriptor>
//! ```

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use bbndk_core::{DeviceDescriptor, DeviceKind};

use crate::xml::{get_attr, ElementText};

/// Descriptor errors
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("document has no root element")]
    MissingRoot,
    #[error("document ends inside <{0}>")]
    Unclosed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceField {
    Name,
    Family,
    Kind,
    Arch,
}

impl DeviceField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(DeviceField::Name),
            b"family" => Some(DeviceField::Family),
            b"type" => Some(DeviceField::Kind),
            b"arch" => Some(DeviceField::Arch),
            _ => None,
        }
    }
}

#[derive(Default)]
struct PendingDevice {
    name: Option<String>,
    family: Option<String>,
    kind: Option<String>,
    arch: Option<String>,
}

impl PendingDevice {
    fn from_attrs(e: &BytesStart) -> Result<Self, quick_xml::Error> {
        Ok(Self {
            name: get_attr(e, "name")?,
            family: get_attr(e, "family")?,
            kind: get_attr(e, "type")?,
            arch: get_attr(e, "arch")?,
        })
    }

    fn set(&mut self, field: DeviceField, value: String) {
        let slot = match field {
            DeviceField::Name => &mut self.name,
            DeviceField::Family => &mut self.family,
            DeviceField::Kind => &mut self.kind,
            DeviceField::Arch => &mut self.arch,
        };
        *slot = Some(value);
    }

    fn finish(self) -> DeviceDescriptor {
        DeviceDescriptor::new(
            self.name.unwrap_or_default(),
            self.family,
            self.kind.as_deref().and_then(DeviceKind::from_name),
            self.arch,
        )
    }
}

/// Device descriptor loader
pub struct DeviceDescriptorLoader;

impl DeviceDescriptorLoader {
    /// Load devices declared by the descriptor at `path`.
    ///
    /// `None` means there is no usable descriptor there: the file is missing
    /// or could not be read/parsed (failures are logged). `Some` with an empty
    /// list means the file exists but declares no devices.
    pub fn load(path: impl AsRef<Path>) -> Option<Vec<DeviceDescriptor>> {
        let path = path.as_ref();
        if !path.is_file() {
            return None;
        }

        match Self::read(path) {
            Ok(devices) => {
                debug!("Loaded {} device(s) from {:?}", devices.len(), path);
                Some(devices)
            }
            Err(e) => {
                warn!("Unable to load NDK descriptor file {:?}: {}", path, e);
                None
            }
        }
    }

    fn read(path: &Path) -> Result<Vec<DeviceDescriptor>, DescriptorError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Parse descriptor XML.
    ///
    /// The document must have a root element and close every element it
    /// opens; an empty or truncated file is an error.
    pub fn parse_str(xml: &str) -> Result<Vec<DeviceDescriptor>, DescriptorError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut devices = Vec::new();
        let mut current: Option<PendingDevice> = None;
        let mut text = ElementText::new();
        let mut open: Vec<String> = Vec::new();
        let mut seen_root = false;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    seen_root = true;
                    open.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                    match e.local_name().as_ref() {
                        b"device" if current.is_none() => {
                            current = Some(PendingDevice::from_attrs(e)?);
                        }
                        tag => {
                            if let (Some(_), Some(field)) = (&current, DeviceField::from_tag(tag)) {
                                text.begin(field);
                            }
                        }
                    }
                }
                Event::Empty(ref e) => {
                    seen_root = true;
                    match e.local_name().as_ref() {
                        b"device" if current.is_none() => {
                            devices.push(PendingDevice::from_attrs(e)?.finish());
                        }
                        tag => {
                            if let (Some(device), Some(field)) =
                                (current.as_mut(), DeviceField::from_tag(tag))
                            {
                                device.set(field, String::new());
                            }
                        }
                    }
                }
                Event::Text(ref t) => text.push_text(t)?,
                Event::CData(ref c) => text.push_cdata(c),
                Event::End(ref e) => {
                    open.pop();
                    let tag = e.local_name();
                    if let Some(field) = DeviceField::from_tag(tag.as_ref()) {
                        if let (Some(value), Some(device)) = (text.end(field), current.as_mut()) {
                            device.set(field, value);
                        }
                    } else if tag.as_ref() == b"device" {
                        if let Some(device) = current.take() {
                            devices.push(device.finish());
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err(DescriptorError::MissingRoot);
        }
        if let Some(tag) = open.pop() {
            return Err(DescriptorError::Unclosed(tag));
        }
        Ok(devices)
    }
}
