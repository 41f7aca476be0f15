/// Tests for DefinitionStore
///
/// These tests build small namespaced trees in a temporary directory and
/// check naming, decoding and the skip-on-error policy.

use super::*;
use std::path::PathBuf;
use serial_test::serial;
use tempfile::TempDir;
use crate::framebuffer::Dimension;
use crate::galaxy3d::Engine;
use crate::log::LogSeverity;
use crate::test_logger::{CaptureLogger, messages};

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn name(text: &str) -> ResourceName {
    ResourceName::parse(text).unwrap()
}

// ============================================================================
// Tests: Loading
// ============================================================================

#[test]
#[serial]
fn test_load_empty_root() {
    let root = TempDir::new().unwrap();
    let definitions = DefinitionStore::load(root.path()).unwrap();
    assert!(definitions.is_empty());
}

#[test]
#[serial]
fn test_load_names_from_namespace_and_path() {
    let root = TempDir::new().unwrap();
    write(root.path(), "galaxy3d/framebuffers/deferred.json", "{}");
    write(root.path(), "galaxy3d/framebuffers/post/bloom.json", r#"{ "height": 64 }"#);
    write(root.path(), "my_mod/framebuffers/light.json", r#"{ "depth": true }"#);

    let definitions = DefinitionStore::load(root.path()).unwrap();

    assert_eq!(definitions.len(), 3);
    assert!(definitions.contains_key(&name("galaxy3d:deferred")));
    assert_eq!(
        definitions[&name("galaxy3d:post/bloom")].height,
        Dimension::Fixed(64)
    );
    assert!(definitions[&name("my_mod:light")].depth);
}

#[test]
#[serial]
fn test_load_ignores_other_directories_and_extensions() {
    let root = TempDir::new().unwrap();
    write(root.path(), "galaxy3d/shaders/deferred.json", "{}");
    write(root.path(), "galaxy3d/framebuffers/readme.txt", "not a definition");
    write(root.path(), "galaxy3d/framebuffers/main.json", "{}");
    write(root.path(), "stray.json", "{}");

    let definitions = DefinitionStore::load(root.path()).unwrap();

    assert_eq!(definitions.len(), 1);
    assert!(definitions.contains_key(&name("galaxy3d:main")));
}

#[test]
#[serial]
fn test_load_skips_malformed_files() {
    let entries = CaptureLogger::install(LOG_SOURCE);
    let root = TempDir::new().unwrap();
    write(root.path(), "galaxy3d/framebuffers/good.json", "{}");
    write(root.path(), "galaxy3d/framebuffers/broken.json", "{ \"width\": ");
    write(root.path(), "galaxy3d/framebuffers/typo.json", r#"{ "detph": true }"#);

    let definitions = DefinitionStore::load(root.path()).unwrap();

    assert_eq!(definitions.len(), 1);
    assert!(definitions.contains_key(&name("galaxy3d:good")));

    let warnings = messages(&entries, LogSeverity::Warn);
    assert!(warnings.iter().any(|w| w.contains("broken.json")));
    assert!(warnings.iter().any(|w| w.contains("typo.json")));
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_load_skips_invalid_names() {
    let root = TempDir::new().unwrap();
    write(root.path(), "galaxy3d/framebuffers/Upper Case.json", "{}");
    write(root.path(), "BadNamespace/framebuffers/main.json", "{}");
    write(root.path(), "galaxy3d/framebuffers/ok.json", "{}");

    let definitions = DefinitionStore::load(root.path()).unwrap();

    assert_eq!(definitions.len(), 1);
    assert!(definitions.contains_key(&name("galaxy3d:ok")));
}

#[test]
#[serial]
fn test_load_missing_root_fails() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("does_not_exist");
    assert!(matches!(DefinitionStore::load(&missing), Err(Error::Io(_))));
}

// ============================================================================
// Tests: Parse
// ============================================================================

#[test]
fn test_parse_error_names_the_definition() {
    match DefinitionStore::parse(&name("galaxy3d:post"), "42") {
        Err(Error::InvalidDefinition(msg)) => assert!(msg.starts_with("galaxy3d:post")),
        other => panic!("Expected InvalidDefinition, got {:?}", other),
    }
}

#[test]
fn test_parse_valid() {
    let def = DefinitionStore::parse(&name("galaxy3d:post"), r#"{ "width": 320 }"#).unwrap();
    assert_eq!(def.width, Dimension::Fixed(320));
}
