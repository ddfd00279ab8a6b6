//! End-to-end scan of a realistic qconfig layout.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use bbndk_core::DESCRIPTOR_FILE_NAME;
use bbndk_toolchain::RegistryScanner;

fn write_manifest(root: &Path, file: &str, name: &str, version: &str, base: &Path) {
    let host = base.join("host_10_x").join("linux").join("x86");
    let target = base.join("target_10_x").join("qnx6");
    fs::create_dir_all(&host).unwrap();
    fs::create_dir_all(&target).unwrap();

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<qnxSoftwareDevelopmentPlatform version="1.0">
  <installation>
    <base>{base}</base>
    <name>{name}</name>
    <version>{version}</version>
    <host>{host}</host>
    <target>{target}</target>
    <annotation>installed by test</annotation>
  </installation>
</qnxSoftwareDevelopmentPlatform>
"#,
        base = base.display(),
        name = name,
        version = version,
        host = host.display(),
        target = target.display(),
    );
    fs::write(root.join(file), xml).unwrap();
}

#[test]
fn scans_sorts_and_resolves() {
    let tmp = TempDir::new().unwrap();
    let qconfig = tmp.path().join("qconfig");
    fs::create_dir_all(&qconfig).unwrap();

    let ndk_102 = tmp.path().join("bbndk_10_2");
    let ndk_101 = tmp.path().join("bbndk_10_1");
    write_manifest(&qconfig, "bbndk_10_2.xml", "BlackBerry Native SDK 10.2", "10.2.0.1155", &ndk_102);
    write_manifest(&qconfig, "bbndk_10_1.xml", "BlackBerry Native SDK 10.1", "10.1.0.1020", &ndk_101);

    // descriptor beside target_10_x, one level above qnx6
    fs::write(
        ndk_102.join("target_10_x").join(DESCRIPTOR_FILE_NAME),
        r#"<sdkDescriptor><devices>
             <device family="handset"><name>BlackBerry Z10</name><arch>armle-v7</arch></device>
             <device><name>BlackBerry 10 Simulator</name><arch>x86</arch></device>
           </devices></sdkDescriptor>"#,
    )
    .unwrap();

    let registry = RegistryScanner::scan(&qconfig).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.as_slice()[0].version().to_string(), "10.1.0.1020");

    let latest = registry.resolve(None).unwrap();
    assert_eq!(latest.name(), "BlackBerry Native SDK 10.2");
    assert_eq!(latest.physical_devices().count(), 1);
    assert_eq!(latest.simulators().count(), 1);
    assert!(registry.as_slice()[0].devices().is_empty());

    let preferred = registry.resolve(Some("blackberry native sdk 10.1")).unwrap();
    assert_eq!(preferred.version().to_string(), "10.1.0.1020");

    // removing an installation drops it from the next scan
    fs::remove_dir_all(&ndk_101).unwrap();
    let registry = RegistryScanner::scan(&qconfig).unwrap();
    assert_eq!(registry.len(), 1);

    let json = serde_json::to_value(&registry).unwrap();
    assert_eq!(json[0]["name"], "BlackBerry Native SDK 10.2");
    assert_eq!(json[0]["version"], "10.2.0.1155");
    assert_eq!(json[0]["devices"][1]["kind"], "simulator");
}
