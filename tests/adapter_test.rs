// Integration tests for component resolution across install layouts
//
// Layouts are built in temp directories; no node process is ever spawned
// because resolution only checks the filesystem.

use std::fs;
use std::path::Path;

use promptlens::chain::{resolve_chain, AdapterError};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "// stub").unwrap();
}

#[test]
fn test_installed_package_layout() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("node_modules/langchain-prompt-feedback/dist/index.js"));

    let resolved = resolve_chain(dir.path(), None).unwrap();
    assert!(
        resolved.import_info().contains("installed package"),
        "got: {}",
        resolved.import_info()
    );
}

#[test]
fn test_checkout_layout_in_root() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("src/PromptFeedbackChain.ts"));
    touch(&dir.path().join("dist/index.js"));

    let resolved = resolve_chain(dir.path(), None).unwrap();
    assert!(
        resolved.import_info().contains("source checkout at ."),
        "got: {}",
        resolved.import_info()
    );
}

#[test]
fn test_checkout_layout_in_parent() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("src/PromptFeedbackChain.js"));
    touch(&dir.path().join("dist/index.js"));

    let app_dir = dir.path().join("app");
    fs::create_dir_all(&app_dir).unwrap();

    let resolved = resolve_chain(&app_dir, None).unwrap();
    assert!(
        resolved.import_info().contains("source checkout at .."),
        "got: {}",
        resolved.import_info()
    );
}

#[test]
fn test_package_wins_over_checkout() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("node_modules/langchain-prompt-feedback/dist/index.js"));
    touch(&dir.path().join("src/PromptFeedbackChain.ts"));
    touch(&dir.path().join("dist/index.js"));

    let resolved = resolve_chain(dir.path(), None).unwrap();
    assert!(resolved.import_info().contains("installed package"));
}

#[test]
fn test_service_url_wins_over_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("node_modules/langchain-prompt-feedback/dist/index.js"));

    let resolved = resolve_chain(dir.path(), Some("http://localhost:3100")).unwrap();
    assert_eq!(
        resolved.import_info(),
        "remote service at http://localhost:3100"
    );
}

#[test]
fn test_unbuilt_checkout_is_not_usable() {
    // Component source present but never compiled: no dist/ entry to run.
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("src/PromptFeedbackChain.ts"));

    let err = resolve_chain(dir.path(), None).unwrap_err();
    assert!(err.downcast_ref::<AdapterError>().is_some());
}

#[test]
fn test_no_layout_is_import_error_with_guidance() {
    let dir = tempfile::tempdir().unwrap();

    let err = resolve_chain(dir.path(), None).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("not found"), "got: {message}");
    assert!(message.contains("npm install"), "got: {message}");
}
