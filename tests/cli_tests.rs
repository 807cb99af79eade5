#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::process::Command;

const CARGO_TOML: &str = r#"[package]
name = "petshop"
version = "1.2.3"
edition = "2021"
"#;

const API_YAML: &str = r#"accept: [json]
routes:
  - method: get
    path: /pets/:id
    description: Fetch one pet
"#;

fn routedoc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_routedoc"))
}

#[test]
fn test_cli_init_scaffolds_project() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("demo");

    let status = routedoc()
        .arg("init")
        .arg("--path")
        .arg(&project)
        .arg("--name")
        .arg("demo")
        .arg("--conf")
        .arg("config/settings.toml")
        .status()
        .expect("run cli");
    assert!(status.success());

    assert!(project.join("Cargo.toml").exists());
    assert!(project.join("src").join("main.rs").exists());
    assert!(project.join("api.yaml").exists());
    assert!(project.join("config").join("settings.toml").exists());

    let cargo = fs::read_to_string(project.join("Cargo.toml")).unwrap();
    assert!(cargo.contains("name = \"demo\""));
}

#[test]
fn test_cli_init_refuses_existing_src_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("demo");
    fs::create_dir_all(project.join("src")).unwrap();

    let status = routedoc()
        .arg("init")
        .arg("--path")
        .arg(&project)
        .status()
        .expect("run cli");
    assert!(!status.success());

    let status = routedoc()
        .arg("init")
        .arg("--path")
        .arg(&project)
        .arg("--force")
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(project.join("src").join("main.rs").exists());
}

#[test]
fn test_cli_openapi_writes_json_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Cargo.toml"), CARGO_TOML).unwrap();
    fs::write(dir.path().join("api.yaml"), API_YAML).unwrap();

    let status = routedoc()
        .current_dir(dir.path())
        .arg("openapi")
        .status()
        .expect("run cli");
    assert!(status.success());

    let output = dir.path().join("output.json");
    assert!(output.exists());
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["info"]["title"], "petshop");
    assert_eq!(value["info"]["version"], "1.2.3");
    assert_eq!(
        value["paths"]["/pets/:id"]["parameters"][0]["name"],
        "id"
    );
    serde_json::from_value::<oas3::OpenApiV3Spec>(value).unwrap();
}

#[test]
fn test_cli_openapi_writes_yaml_document_to_given_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Cargo.toml"), CARGO_TOML).unwrap();
    fs::write(dir.path().join("api.yaml"), API_YAML).unwrap();

    let status = routedoc()
        .current_dir(dir.path())
        .arg("openapi")
        .arg("outfile.yml")
        .status()
        .expect("run cli");
    assert!(status.success());

    let yaml = fs::read_to_string(dir.path().join("outfile.yml")).unwrap();
    let value: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["openapi"], "3.1.0");
    serde_json::from_value::<oas3::OpenApiV3Spec>(value).unwrap();
}

#[test]
fn test_cli_openapi_fails_without_cargo_toml() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("api.yaml"), API_YAML).unwrap();

    let output = routedoc()
        .current_dir(dir.path())
        .arg("openapi")
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cargo.toml not found"));
}

#[test]
fn test_cli_openapi_fails_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Cargo.toml"), CARGO_TOML).unwrap();

    let output = routedoc()
        .current_dir(dir.path())
        .arg("openapi")
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("route manifest not found"));
}
