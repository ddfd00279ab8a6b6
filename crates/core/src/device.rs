//! Device Descriptors
//!
//! Devices and simulators an NDK installation can target, as declared by its
//! `blackberry-sdk-descriptor.xml`.

use serde::{Deserialize, Serialize};

/// Architecture assumed for physical devices that don't declare one
pub const DEFAULT_DEVICE_ARCH: &str = "armle-v7";

/// Architecture assumed for simulators that don't declare one
pub const DEFAULT_SIMULATOR_ARCH: &str = "x86";

/// Device kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Physical handset or tablet
    Device,
    /// Simulator image
    Simulator,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Device => "device",
            DeviceKind::Simulator => "simulator",
        }
    }

    /// Parse the descriptor's `type` value
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "device" | "physical" => Some(DeviceKind::Device),
            "simulator" | "emulator" => Some(DeviceKind::Simulator),
            _ => None,
        }
    }

    /// Guess the kind from an architecture when no type was declared
    pub fn infer(arch: &str) -> Self {
        if arch.trim().eq_ignore_ascii_case(DEFAULT_SIMULATOR_ARCH) {
            DeviceKind::Simulator
        } else {
            DeviceKind::Device
        }
    }

    /// Architecture to assume when the descriptor omits it
    pub fn default_arch(&self) -> &'static str {
        match self {
            DeviceKind::Device => DEFAULT_DEVICE_ARCH,
            DeviceKind::Simulator => DEFAULT_SIMULATOR_ARCH,
        }
    }
}

/// One supported device or simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Display label (e.g., "BlackBerry Z10")
    pub name: String,
    /// Form factor (e.g., "handset", "tablet")
    pub family: Option<String>,
    pub kind: DeviceKind,
    /// CPU architecture (e.g., "armle-v7", "x86")
    pub architecture: String,
}

impl DeviceDescriptor {
    /// Build a descriptor, filling in whichever of kind/architecture is missing
    pub fn new(
        name: impl Into<String>,
        family: Option<String>,
        kind: Option<DeviceKind>,
        architecture: Option<String>,
    ) -> Self {
        let architecture = architecture.filter(|a| !a.trim().is_empty());
        let kind = kind.unwrap_or_else(|| {
            architecture
                .as_deref()
                .map(DeviceKind::infer)
                .unwrap_or(DeviceKind::Device)
        });
        let architecture = architecture.unwrap_or_else(|| kind.default_arch().to_string());

        Self {
            name: name.into(),
            family: family.filter(|f| !f.trim().is_empty()),
            kind,
            architecture,
        }
    }

    pub fn is_simulator(&self) -> bool {
        self.kind == DeviceKind::Simulator
    }

    /// Get display name
    pub fn display_name(&self) -> String {
        let label = if self.name.is_empty() {
            self.kind.as_str()
        } else {
            self.name.as_str()
        };
        format!("{} [{}]", label, self.architecture)
    }
}
