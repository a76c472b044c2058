// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end lifecycle tests: config-driven loading from real files,
//! context switches, and the two-tier persistence policy.

use langpack::config::PackConfig;
use langpack::diagnostics::MemorySink;
use langpack::lifecycle::PackManager;
use langpack::source::FsSource;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_pack(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.display().to_string()
}

fn manager_with_sink(config_yaml: &str) -> (PackManager, MemorySink) {
    let config: PackConfig = serde_yaml::from_str(config_yaml).unwrap();
    let sink = MemorySink::new();
    let manager = PackManager::with_parts(config, Box::new(FsSource), Box::new(sink.clone()));
    (manager, sink)
}

#[test]
fn test_persistent_survives_context_change_transient_does_not() {
    let dir = TempDir::new().unwrap();
    let core = write_pack(dir.path(), "core.lang", "<Label>P<List>persistent");
    let scene1 = write_pack(dir.path(), "scene1.lang", "<Label>T<List>transient");

    let (mut manager, _) = manager_with_sink(&format!(
        r#"
persistent: ["{core}"]
contexts:
  - name: Scene1
    files: ["{scene1}"]
"#
    ));
    manager.start().unwrap();
    manager.on_context_changed("Scene1").unwrap();

    assert_eq!(manager.resolve("P", 0).as_deref(), Some("persistent"));
    assert_eq!(manager.resolve("T", 0).as_deref(), Some("transient"));

    // Scene2 has no binding: transients go away, persistent stays
    manager.on_context_changed("Scene2").unwrap();
    assert_eq!(manager.resolve("P", 0).as_deref(), Some("persistent"));
    assert_eq!(manager.resolve("T", 0), None);
}

#[test]
fn test_persistent_pack_shadows_transient_pack() {
    let dir = TempDir::new().unwrap();
    let core = write_pack(dir.path(), "core.lang", "<Label>K<List>one");
    let scene = write_pack(dir.path(), "scene.lang", "<Label>K<List>two");

    let (mut manager, _) = manager_with_sink(&format!(
        r#"
persistent: ["{core}"]
contexts:
  - name: Scene1
    files: ["{scene}"]
"#
    ));
    manager.start().unwrap();
    manager.on_context_changed("Scene1").unwrap();

    // first-loaded pack wins regardless of which loaded more recently
    assert_eq!(manager.resolve("K", 0).as_deref(), Some("one"));
}

#[test]
fn test_context_reload_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let scene = write_pack(
        dir.path(),
        "scene.lang",
        "<Label>A<List>x<Label>B<List>y0<List>y1",
    );

    let (mut manager, _) = manager_with_sink(&format!(
        r#"
contexts:
  - name: Scene1
    files: ["{scene}"]
"#
    ));
    manager.start().unwrap();

    manager.on_context_changed("Scene1").unwrap();
    let first = (
        manager.resolve("A", 0),
        manager.resolve("B", 0),
        manager.resolve("B", 1),
        manager.registry().len(),
    );

    manager.on_context_changed("Scene1").unwrap();
    let second = (
        manager.resolve("A", 0),
        manager.resolve("B", 0),
        manager.resolve("B", 1),
        manager.registry().len(),
    );

    assert_eq!(first, second);
}

#[test]
fn test_missing_file_is_skipped_and_reported() {
    let dir = TempDir::new().unwrap();
    let good = write_pack(dir.path(), "good.lang", "<Label>A<List>x");
    let missing = dir.path().join("missing.lang").display().to_string();

    let (mut manager, sink) = manager_with_sink(&format!(
        r#"
persistent: ["{missing}", "{good}"]
"#
    ));

    let outcome = manager.start().unwrap();
    assert_eq!(outcome.attempted, 2);
    assert_eq!(outcome.loaded, 1);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(manager.resolve("A", 0).as_deref(), Some("x"));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].path.ends_with("missing.lang"));
}

#[test]
fn test_undecodable_file_is_skipped_and_reported() {
    let dir = TempDir::new().unwrap();
    let bad_path = dir.path().join("bad.lang");
    fs::write(&bad_path, [0xFF, 0xFE, 0x41]).unwrap();
    let good = write_pack(dir.path(), "good.lang", "<Label>A<List>x");

    let (mut manager, sink) = manager_with_sink(&format!(
        r#"
persistent: ["{}", "{good}"]
"#,
        bad_path.display()
    ));

    let outcome = manager.start().unwrap();
    assert_eq!(outcome.skipped, 1);
    assert_eq!(manager.resolve("A", 0).as_deref(), Some("x"));
    assert_eq!(sink.records().len(), 1);
    assert!(sink.records()[0].detail.contains("UTF-8"));
}

#[test]
fn test_failed_context_load_keeps_existing_packs() {
    let dir = TempDir::new().unwrap();
    let core = write_pack(dir.path(), "core.lang", "<Label>P<List>still here");
    let missing = dir.path().join("missing.lang").display().to_string();

    let (mut manager, _) = manager_with_sink(&format!(
        r#"
persistent: ["{core}"]
contexts:
  - name: Scene1
    files: ["{missing}"]
"#
    ));
    manager.start().unwrap();

    let outcome = manager.on_context_changed("Scene1").unwrap();
    assert_eq!(outcome.skipped, 1);
    assert_eq!(manager.resolve("P", 0).as_deref(), Some("still here"));
}

#[test]
fn test_context_files_load_in_declared_order() {
    let dir = TempDir::new().unwrap();
    let first = write_pack(dir.path(), "first.lang", "<Label>K<List>from first");
    let second = write_pack(dir.path(), "second.lang", "<Label>K<List>from second");

    let (mut manager, _) = manager_with_sink(&format!(
        r#"
contexts:
  - name: Scene1
    files: ["{first}", "{second}"]
"#
    ));
    manager.start().unwrap();
    manager.on_context_changed("Scene1").unwrap();

    assert_eq!(manager.resolve("K", 0).as_deref(), Some("from first"));
}

#[test]
fn test_bom_and_crlf_pack_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("authored.lang");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("<Label>Mes0\r\n<List>Test\r\n<List>テスト\r\n".as_bytes());
    fs::write(&path, bytes).unwrap();

    let (mut manager, _) = manager_with_sink(&format!(
        r#"
persistent: ["{}"]
"#,
        path.display()
    ));
    manager.start().unwrap();

    assert_eq!(manager.resolve("Mes0", 0).as_deref(), Some("Test"));
    assert_eq!(manager.resolve("Mes0", 1).as_deref(), Some("テスト"));
    assert_eq!(manager.resolve("Mes0", 5), None);
}

#[test]
fn test_config_file_round_trip_through_loader() {
    let dir = TempDir::new().unwrap();
    let core = write_pack(dir.path(), "core.lang", "<Label>Greeting<List>Hello<List>やあ");
    let config_path = dir.path().join("packs.yaml");
    fs::write(
        &config_path,
        format!("language: 1\npersistent: [\"{core}\"]\n"),
    )
    .unwrap();

    let config = PackConfig::load(&config_path).unwrap();
    let mut manager = PackManager::new(config);
    manager.start().unwrap();

    assert_eq!(manager.get_string("Greeting"), "やあ");
    assert_eq!(manager.get_string("NoSuchLabel"), "");
}
