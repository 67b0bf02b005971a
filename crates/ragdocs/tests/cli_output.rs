use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run_ragdocs(config: &str, args: &[&str]) -> Output {
    run_with_config(fixture(config), args)
}

fn run_with_config(config: PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ragdocs"))
        .arg("--color")
        .arg("never")
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RAGDOCS_LOG", "off")
        .output()
        .expect("failed to run ragdocs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn check_reports_summary() {
    let output = run_ragdocs("site.toml", &["check", "--strict"]);
    assert!(output.status.success(), "{output:?}");
    let out = stdout(&output);
    assert!(out.contains("3 entries in 2 categories, 1 documents"), "{out}");
    assert!(!out.contains("warning"));
}

#[test]
fn invalid_config_fails_with_context() {
    let output = run_ragdocs("duplicate.toml", &["check"]);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.starts_with("Error: failed to load site configuration"), "{err}");
    assert!(err.contains("duplicate entry identifier `same`"), "{err}");
}

#[test]
fn search_matches_page_filter() {
    let output = run_ragdocs("site.toml", &["search", "--category", "retrieval", "VECTOR"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("vector [retrieval]"), "{out}");
    assert!(!out.contains("memory"));
    assert!(out.contains("1 of 3 entries match (category: retrieval, term: \"VECTOR\")"));
}

#[test]
fn search_json_and_unknown_category() {
    let output = run_ragdocs("site.toml", &["search", "--category", "bogus", "--json"]);
    assert!(output.status.success());
    let hits: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits.as_array().unwrap().len(), 3);
}

#[test]
fn export_to_stdout() {
    let output = run_ragdocs("site.toml", &["export"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["id"], "vector");
    assert_eq!(value[0]["implementation"], "src/rag/vector-ops/retrieve.js");
}

#[test]
fn build_writes_site() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dist");
    let output = run_ragdocs("site.toml", &["build", "--out", out.to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");
    for file in ["index.html", "viewer.html", "features.json"] {
        assert!(out.join(file).is_file(), "missing {file}");
    }
    let index = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("<title>Fixture Docs</title>"));
    assert!(stdout(&output).contains("no --controller given"));
}

#[test]
fn build_installs_controller() {
    let pkg = tempfile::tempdir().unwrap();
    for file in ["ragdocs_web.js", "ragdocs_web_bg.wasm"] {
        std::fs::write(pkg.path().join(file), file).unwrap();
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dist");
    let output = run_ragdocs(
        "site.toml",
        &[
            "build",
            "--out",
            out.to_str().unwrap(),
            "--controller",
            pkg.path().to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{output:?}");
    assert!(out.join("pkg/ragdocs_web.js").is_file());
    assert!(out.join("pkg/ragdocs_web_bg.wasm").is_file());
    assert!(!stdout(&output).contains("no --controller"));

    let empty = tempfile::tempdir().unwrap();
    let output = run_ragdocs(
        "site.toml",
        &["build", "--out", out.to_str().unwrap(), "--controller", empty.path().to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("failed to install controller"), "{err}");
}

#[test]
fn bundled_site_passes_strict_check() {
    let config = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../site/site.toml");
    let output = run_with_config(config, &["check", "--strict"]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("11 entries in 4 categories, 3 documents"));
}
