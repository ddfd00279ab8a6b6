//! Registry Scanner
//!
//! Walks the configuration folder for installation manifests and collects
//! the installations that are still present on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use bbndk_manifest::ManifestParser;

use crate::registry::Registry;

/// Scanner errors
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("configuration root folder must not be empty")]
    EmptyRoot,
}

/// What a scan ran into, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// `*.xml` files visited
    pub files: usize,
    /// Installations kept
    pub accepted: usize,
    /// Well-formed files that are not usable manifests
    pub rejected: usize,
    /// Files that could not be read or parsed
    pub failed: usize,
    /// Manifests whose host or target folder is gone
    pub stale: usize,
    /// Directory entries the walk could not read
    pub walk_errors: usize,
}

/// Registry scanner
pub struct RegistryScanner;

impl RegistryScanner {
    /// Load info about all installed NDKs under `root`.
    ///
    /// Only an empty `root` is an error. A missing folder gives an empty
    /// registry, and unreadable files or folders are logged and skipped.
    pub fn scan(root: impl AsRef<Path>) -> Result<Registry, ScanError> {
        let root = root.as_ref();
        let (registry, stats) = Self::scan_with_stats(root)?;

        info!(
            "Found {} NDK installation(s) in {:?} ({} manifest file(s), {} stale, {} unreadable)",
            registry.len(),
            root,
            stats.files,
            stats.stale,
            stats.failed
        );
        Ok(registry)
    }

    /// Like [`scan`](Self::scan), also reporting what was skipped
    pub fn scan_with_stats(root: impl AsRef<Path>) -> Result<(Registry, ScanStats), ScanError> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(ScanError::EmptyRoot);
        }

        let mut stats = ScanStats::default();
        if !root.is_dir() {
            debug!("Configuration folder {:?} does not exist", root);
            return Ok((Registry::default(), stats));
        }

        let mut records = Vec::new();

        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(
                        "Unable to list configuration files in {:?}: {}",
                        e.path().unwrap_or(root),
                        e
                    );
                    stats.walk_errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_manifest_file(entry.path()) {
                continue;
            }
            stats.files += 1;

            let path = entry.path();
            match ManifestParser::parse_file(path) {
                Ok(Some(record)) if record.exists() => {
                    debug!("Found {} at {:?}", record, record.target_path());
                    stats.accepted += 1;
                    records.push(record);
                }
                Ok(Some(record)) => {
                    trace!("Skipping {}: installation no longer on disk", record);
                    stats.stale += 1;
                }
                Ok(None) => {
                    trace!("{:?} is not an installation manifest", path);
                    stats.rejected += 1;
                }
                Err(e) => {
                    warn!("Unable to open configuration file {:?}: {}", path, e);
                    stats.failed += 1;
                }
            }
        }

        Ok((Registry::new(records), stats))
    }

    /// Run [`scan`](Self::scan) on the blocking thread pool
    pub async fn scan_async(root: impl Into<PathBuf>) -> Result<Registry, ScanError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(ScanError::EmptyRoot);
        }

        match tokio::task::spawn_blocking(move || Self::scan(&root)).await {
            Ok(result) => result,
            Err(e) => {
                warn!("NDK scan task failed: {}", e);
                Ok(Registry::default())
            }
        }
    }
}

/// `*.xml`, compared case-insensitively
fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("xml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use bbndk_core::DESCRIPTOR_FILE_NAME;

    struct Fixture {
        tmp: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            fs::create_dir_all(tmp.path().join("qconfig")).unwrap();
            Self { tmp }
        }

        fn root(&self) -> PathBuf {
            self.tmp.path().join("qconfig")
        }

        /// Create host/target folders for an installation and return them
        fn install(&self, dir: &str) -> (PathBuf, PathBuf) {
            let base = self.tmp.path().join("installs").join(dir);
            let host = base.join("host");
            let target = base.join("target").join("qnx6");
            fs::create_dir_all(&host).unwrap();
            fs::create_dir_all(&target).unwrap();
            (host, target)
        }

        fn manifest(&self, file: &str, name: Option<&str>, version: &str, host: &Path, target: &Path) {
            let name = name
                .map(|n| format!("<name>{}</name>", n))
                .unwrap_or_default();
            self.write(
                file,
                &format!(
                    "<qnxSoftwareDevelopmentPlatform><installation>{}<version>{}</version><host>{}</host><target>{}</target></installation></qnxSoftwareDevelopmentPlatform>",
                    name,
                    version,
                    host.display(),
                    target.display()
                ),
            );
        }

        fn write(&self, file: &str, contents: impl AsRef<[u8]>) {
            let path = self.root().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
    }

    #[test]
    fn test_empty_root_is_error() {
        assert!(matches!(RegistryScanner::scan(""), Err(ScanError::EmptyRoot)));
    }

    #[test]
    fn test_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let registry = RegistryScanner::scan(tmp.path().join("does-not-exist")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_round_trip_ordering() {
        let fx = Fixture::new();
        let (h1, t1) = fx.install("a");
        let (h2, t2) = fx.install("b");
        let (h3, t3) = fx.install("c");
        fx.manifest("a.xml", Some("Beta"), "2.0.0.0", &h1, &t1);
        fx.manifest("b.xml", Some("Alpha"), "2.0.0.0", &h2, &t2);
        fx.manifest("c.xml", None, "1.5.0.0", &h3, &t3);

        let registry = RegistryScanner::scan(fx.root()).unwrap();
        let order: Vec<String> = registry.iter().map(|r| r.to_string()).collect();
        assert_eq!(order, vec!["1.5.0.0", "Alpha (2.0.0.0)", "Beta (2.0.0.0)"]);
    }

    #[test]
    fn test_malformed_files_are_isolated() {
        let fx = Fixture::new();
        let (h1, t1) = fx.install("one");
        let (h2, t2) = fx.install("two");
        fx.manifest("one.xml", Some("One"), "10.1", &h1, &t1);
        fx.manifest("nested/deeper/two.xml", Some("Two"), "10.2", &h2, &t2);

        fx.write("broken.xml", "<installation><host>/h</target></installation>");
        fx.write("badversion.xml", "<installation><version>x.y</version><host>/h</host><target>/t</target></installation>");
        fx.write("binary.xml", [0x3c, 0x61, 0xff, 0xfe, 0x00, 0x3e]);
        fx.write("notes.xml", "just some notes");
        fx.write("readme.txt", "<installation/>");

        let (registry, stats) = RegistryScanner::scan_with_stats(fx.root()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(stats.files, 6);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.failed, 3);
        assert_eq!(stats.rejected, 1);
    }

    #[test]
    fn test_missing_target_is_excluded() {
        let fx = Fixture::new();
        let (host, _) = fx.install("gone");
        let target = fx.tmp.path().join("installs").join("gone").join("nowhere");
        fx.manifest("gone.xml", Some("Gone"), "10.2", &host, &target);

        let (registry, stats) = RegistryScanner::scan_with_stats(fx.root()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(stats.stale, 1);
    }

    #[test]
    fn test_missing_host_element_is_excluded() {
        let fx = Fixture::new();
        let (_, target) = fx.install("nohost");
        fx.write(
            "nohost.xml",
            format!(
                "<installation><name>NoHost</name><version>10.2</version><target>{}</target></installation>",
                target.display()
            ),
        );

        let registry = RegistryScanner::scan(fx.root()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_descriptor_found_two_levels_up() {
        let fx = Fixture::new();
        let (host, target) = fx.install("ndk");
        // target is installs/ndk/target/qnx6, so two levels up is installs/ndk
        fs::write(
            fx.tmp.path().join("installs").join("ndk").join(DESCRIPTOR_FILE_NAME),
            r#"<devices><device name="Z10" arch="armle-v7"/><device name="Simulator" type="simulator"/></devices>"#,
        )
        .unwrap();
        fx.manifest("ndk.xml", Some("NDK"), "10.2", &host, &target);

        let registry = RegistryScanner::scan(fx.root()).unwrap();
        let record = registry.latest().unwrap();
        assert_eq!(record.devices().len(), 2);
        assert_eq!(record.physical_devices().next().unwrap().name, "Z10");
        assert_eq!(record.simulators().next().unwrap().name, "Simulator");
    }

    #[test]
    fn test_extension_case_insensitive() {
        let fx = Fixture::new();
        let (host, target) = fx.install("upper");
        fx.manifest("UPPER.XML", Some("Upper"), "10.2", &host, &target);

        let registry = RegistryScanner::scan(fx.root()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_error_keeps_collected_records() {
        let fx = Fixture::new();
        let (host, target) = fx.install("ok");
        fx.manifest("ok.xml", Some("Ok"), "10.2", &host, &target);

        // symlink back up the tree; walkdir reports the loop as an error
        let sub = fx.root().join("sub");
        fs::create_dir_all(&sub).unwrap();
        std::os::unix::fs::symlink(fx.root(), sub.join("loop")).unwrap();

        let (registry, stats) = RegistryScanner::scan_with_stats(fx.root()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.latest().unwrap().name(), "Ok");
        assert_eq!(stats.walk_errors, 1);
        assert_eq!(stats.files, 1);
    }

    #[tokio::test]
    async fn test_scan_async() {
        let fx = Fixture::new();
        let (host, target) = fx.install("async");
        fx.manifest("async.xml", Some("Async"), "10.3", &host, &target);

        let registry = RegistryScanner::scan_async(fx.root()).await.unwrap();
        assert_eq!(registry.latest().unwrap().name(), "Async");

        assert!(matches!(
            RegistryScanner::scan_async(PathBuf::new()).await,
            Err(ScanError::EmptyRoot)
        ));
    }
}
