/// End-to-end tests for the CLI
use assert_cmd::Command;
use predicates::prelude::*;

fn sbom_graph() -> Command {
    Command::cargo_bin("sbom-graph").unwrap()
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::sbom_graph;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        sbom_graph()
            .args(["tests/fixtures/router.json", "tests/fixtures/camera.json"])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        sbom_graph().arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        sbom_graph().arg("--version").assert().code(0);
    }

    /// Exit code 2: Missing required file arguments
    #[test]
    fn test_exit_code_no_files() {
        sbom_graph().assert().code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        sbom_graph()
            .args(["-f", "yaml", "tests/fixtures/router.json"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - no loadable documents
    #[test]
    fn test_exit_code_no_loadable_documents() {
        sbom_graph()
            .arg("tests/fixtures/malformed.json")
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - nonexistent file
    #[test]
    fn test_exit_code_nonexistent_file() {
        sbom_graph()
            .arg("/nonexistent/sbom.json")
            .assert()
            .code(3);
    }
}

#[test]
fn test_e2e_summary_output() {
    sbom_graph()
        .args(["tests/fixtures/router.json", "tests/fixtures/camera.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SBOMs loaded: 2"))
        .stdout(predicate::str::contains("Common components across SBOMs: 1"))
        .stdout(predicate::str::contains("sha256:"));
}

#[test]
fn test_e2e_json_output() {
    let assert = sbom_graph()
        .args([
            "-f",
            "json",
            "tests/fixtures/router.json",
            "tests/fixtures/camera.json",
        ])
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["sboms"].as_array().unwrap().len(), 2);
    assert_eq!(value["commonComponents"].as_array().unwrap().len(), 1);

    // Both copies of libc are tagged common.
    let nodes = value["graph"]["nodes"].as_array().unwrap();
    let common_count = nodes
        .iter()
        .filter(|node| node["isCommon"] == serde_json::Value::Bool(true))
        .count();
    assert_eq!(common_count, 2);

    let links = value["graph"]["links"].as_array().unwrap();
    assert!(links.iter().any(|link| link["kind"] == "common"));
    assert!(links.iter().any(|link| link["kind"] == "dependency"));
    assert!(links.iter().any(|link| link["kind"] == "relationship"));
}

#[test]
fn test_e2e_csv_output() {
    sbom_graph()
        .args([
            "-f",
            "csv",
            "tests/fixtures/router.json",
            "tests/fixtures/camera.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "identityKey,sbomFile,sbomId,componentId,componentName,version,sha256",
        ))
        .stdout(predicate::str::contains("router.json"))
        .stdout(predicate::str::contains("camera.json"));
}

#[test]
fn test_e2e_search_mode() {
    sbom_graph()
        .args([
            "-s",
            "busybox",
            "tests/fixtures/router.json",
            "tests/fixtures/camera.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 component(s) matching"))
        .stdout(predicate::str::contains("busybox"));
}

#[test]
fn test_e2e_malformed_file_does_not_abort_batch() {
    sbom_graph()
        .args([
            "tests/fixtures/router.json",
            "tests/fixtures/malformed.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SBOMs loaded: 1"));
}

#[test]
fn test_e2e_type_filter() {
    let assert = sbom_graph()
        .args([
            "-f",
            "json",
            "-t",
            "system",
            "tests/fixtures/router.json",
            "tests/fixtures/camera.json",
        ])
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let nodes = value["graph"]["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|node| node["type"] == "system"));
}

#[test]
fn test_e2e_output_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let out_path = dir.path().join("graph.json");

    sbom_graph()
        .args(["-f", "json", "tests/fixtures/router.json"])
        .args(["-o", out_path.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["sboms"][0]["fileName"], "router.json");
}
