//! Integration tests for config module public API.

use stencil::config::{
    find_project_root, load_config, load_registry, validate, OutputMode, RepositoryConfig,
    StencilConfig,
};
use stencil::StencilError;
use std::fs;
use tempfile::TempDir;

#[test]
fn public_api_is_accessible() {
    let _config = StencilConfig::default();
    let _mode = OutputMode::Verbose;
    let _repo = RepositoryConfig::new("https://github.com/acme/templates", "vendor");
}

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    let stencil_dir = temp.path().join(".stencil");
    fs::create_dir_all(&stencil_dir).unwrap();
    let checkout = temp.path().join("vendor").join("templates");
    fs::create_dir_all(checkout.join("node")).unwrap();
    fs::write(checkout.join("node").join("template.yaml"), "version: 0.0.1\n").unwrap();
    fs::create_dir_all(temp.path().join("src").join("deep")).unwrap();

    fs::write(
        stencil_dir.join("config.yml"),
        r#"
repositories:
  - url: ssh://git@github.com:22/acme/templates.git
    path: vendor/templates
settings:
  default_output: quiet
"#,
    )
    .unwrap();

    let root = find_project_root(&temp.path().join("src").join("deep")).unwrap();
    assert_eq!(root, temp.path());

    let config = load_config(&root, None).unwrap();
    validate(&config).unwrap();
    assert_eq!(config.settings.default_output, OutputMode::Quiet);

    let registry = load_registry(&config, &root).unwrap();
    let template = registry.get("github.com/acme/templates/node").unwrap();
    assert_eq!(template.directory, checkout.join("node"));
}

#[test]
fn invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("stencil.yml");
    fs::write(
        &path,
        "repositories:\n  - url: hostname:account/repo\n    path: vendor\n",
    )
    .unwrap();

    let err = load_config(temp.path(), Some(&path)).unwrap_err();
    match err {
        StencilError::ConfigValidationError { message } => {
            assert!(message.contains("hostname:account/repo"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("stencil.yml");
    fs::write(&path, "repositories: {url: [\n").unwrap();

    assert!(matches!(
        load_config(temp.path(), Some(&path)),
        Err(StencilError::ConfigParseError { .. })
    ));
}
