// tests/config_test.rs
use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use version_manager::config::{load_config, Config, CONFIG_FILE};
use version_manager::VersionManagerError;

#[test]
fn test_load_from_explicit_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "upstream"
commit_msg_template = "release/{package_version}"

[branches]
production = ["main", "release"]
uat = ["staging"]

[preids]
uat = "pre"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let project = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), project.path()).unwrap();

    assert_eq!(config.remote, "upstream");
    assert_eq!(
        config.commit_msg_template.as_deref(),
        Some("release/{package_version}")
    );
    assert_eq!(config.branches.production, vec!["main", "release"]);
    assert_eq!(config.branches.uat, vec!["staging"]);
    assert_eq!(config.branches.develop, vec!["develop"]);
    assert_eq!(config.preids.uat, "pre");
    assert_eq!(config.preids.develop, "beta");
}

#[test]
fn test_project_file_is_discovered() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(CONFIG_FILE),
        "[branches]\ndevelop = [\"dev\", \"next\"]\n",
    )
    .unwrap();

    let config = load_config(None, project.path()).unwrap();
    assert_eq!(config.branches.develop, vec!["dev", "next"]);
    assert_eq!(config.remote, "origin");
}

#[test]
fn test_explicit_path_wins_over_project_file() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(CONFIG_FILE), "remote = \"project\"\n").unwrap();

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remote = \"explicit\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), project.path()).unwrap();
    assert_eq!(config.remote, "explicit");
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let project = TempDir::new().unwrap();
    let missing = project.path().join("nope.toml");

    let err = load_config(Some(&missing), project.path()).unwrap_err();
    assert!(matches!(err, VersionManagerError::Config(_)));
}

#[test]
fn test_malformed_project_file_is_an_error() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(CONFIG_FILE), "[branches\n").unwrap();

    let err = load_config(None, project.path()).unwrap_err();
    assert!(err.to_string().contains(CONFIG_FILE));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
