//! CLI commands for bbndk
//!
//! Each command scans the manifest root and renders its result as text or
//! JSON; printing is left to the caller.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing::info;

use bbndk_core::{InstallationRecord, NdkVersion};
use bbndk_toolchain::{Registry, RegistryScanner};

/// Find the installation a command should act on.
///
/// An explicit selector must match by name or version; otherwise the
/// configured preference is resolved with fallback to the latest install.
pub fn select<'a>(
    registry: &'a Registry,
    selector: Option<&str>,
    preferred: Option<&str>,
) -> Result<&'a InstallationRecord> {
    match selector {
        Some(wanted) => registry
            .find_by_name(wanted)
            .or_else(|| {
                NdkVersion::parse(wanted)
                    .ok()
                    .and_then(|v| registry.find_by_version(&v))
            })
            .ok_or_else(|| anyhow!("No NDK installation matches {:?}", wanted)),
        None => registry
            .resolve(preferred)
            .ok_or_else(|| anyhow!("No NDK installation found")),
    }
}

/// List command options
pub struct ListCommand {
    pub root: PathBuf,
    pub preferred: Option<String>,
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command
    pub async fn execute(&self) -> Result<String> {
        info!("Scanning {:?} for NDK installations", self.root);
        let registry = RegistryScanner::scan_async(self.root.clone()).await?;
        self.render(&registry)
    }

    pub fn render(&self, registry: &Registry) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(registry)?);
        }

        if registry.is_empty() {
            return Ok(format!("No NDK installations found in {}\n", self.root.display()));
        }

        let active = registry.resolve(self.preferred.as_deref());
        let mut out = String::new();
        for record in registry {
            let marker = if Some(record) == active { "*" } else { " " };
            writeln!(out, "{} {:<40} {}", marker, record.to_string(), record.target_path().display())?;
        }
        Ok(out)
    }
}

/// Show command options
pub struct ShowCommand {
    pub root: PathBuf,
    pub selector: Option<String>,
    pub preferred: Option<String>,
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command
    pub async fn execute(&self) -> Result<String> {
        let registry = RegistryScanner::scan_async(self.root.clone()).await?;
        self.render(&registry)
    }

    pub fn render(&self, registry: &Registry) -> Result<String> {
        let record = select(registry, self.selector.as_deref(), self.preferred.as_deref())?;

        if self.json {
            return Ok(serde_json::to_string_pretty(record)?);
        }

        let mut out = String::new();
        writeln!(out, "Name:    {}", record.name())?;
        writeln!(out, "Version: {}", record.version())?;
        writeln!(out, "Host:    {}", record.host_path().display())?;
        writeln!(out, "Target:  {}", record.target_path().display())?;
        writeln!(out, "Devices: {}", record.devices().len())?;
        Ok(out)
    }
}

/// Devices command options
pub struct DevicesCommand {
    pub root: PathBuf,
    pub selector: Option<String>,
    pub preferred: Option<String>,
    pub json: bool,
}

impl DevicesCommand {
    /// Execute the devices command
    pub async fn execute(&self) -> Result<String> {
        let registry = RegistryScanner::scan_async(self.root.clone()).await?;
        self.render(&registry)
    }

    pub fn render(&self, registry: &Registry) -> Result<String> {
        let record = select(registry, self.selector.as_deref(), self.preferred.as_deref())?;

        if self.json {
            return Ok(serde_json::to_string_pretty(record.devices())?);
        }

        let mut out = String::new();
        writeln!(out, "{}", record)?;
        writeln!(out, "Devices:")?;
        for device in record.physical_devices() {
            writeln!(out, "  {}", device.display_name())?;
        }
        writeln!(out, "Simulators:")?;
        for device in record.simulators() {
            writeln!(out, "  {}", device.display_name())?;
        }
        Ok(out)
    }
}
