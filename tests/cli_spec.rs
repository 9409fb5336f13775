//! Argument handling of the `dsgn` binary. None of these reach the network.

use std::process::{Command, Output};

fn dsgn(args: &[&str]) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    Command::new(env!("CARGO_BIN_EXE_dsgn"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("DESIGN_API_URL", "http://127.0.0.1:1/")
        .env_remove("DESIGN_ASSEMBLY")
        .env_remove("DESIGN_API_KEY")
        .output()
        .expect("Failed to run dsgn")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn help_lists_resources() {
    let output = dsgn(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["platform", "component", "attachment", "variable", "commit"] {
        assert!(stdout.contains(command), "help is missing {}", command);
    }
}

#[test]
fn missing_assembly_is_reported() {
    let output = dsgn(&["platform", "list"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Missing assembly name"));
}

#[test]
fn empty_load_file_fails_before_any_request() {
    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let path = file.path().to_str().expect("temp path is not UTF-8");

    let output = dsgn(&["--assembly", "shop", "load", path]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Missing input file content"), "stderr: {}", err);
}

#[test]
fn variables_must_be_key_value_pairs() {
    let output = dsgn(&["--assembly", "shop", "variable", "add", "PORT"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("expected KEY=VALUE"));
}

#[test]
fn unreachable_service_is_reported() {
    let output = dsgn(&["--assembly", "shop", "commit"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no response"));
}
