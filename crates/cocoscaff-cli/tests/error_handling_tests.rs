//! Exit codes and error messages of the `cocoscaff` binary.

use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn workspace() -> TempDir {
    tempfile::Builder::new()
        .prefix("cocoscaff_")
        .tempdir()
        .unwrap()
}

fn cocoscaff(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("cocoscaff");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("RUST_LOG")
        .env_remove("COCOSCAFF_DEFAULTS__SIMULATOR")
        .env_remove("COCOSCAFF_TEMPLATES__SOURCE_DIR");
    cmd
}

fn installed_workspace() -> TempDir {
    let ws = workspace();
    cocoscaff(ws.path())
        .args(["template", "install"])
        .assert()
        .success();
    ws
}

#[test]
fn test_bad_dut_extension_is_rejected() {
    let ws = installed_workspace();
    cocoscaff(ws.path())
        .args(["new", "--yes", "--name", "adder_tb", "--dut-file", "adder.c"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project settings"))
        .stderr(predicate::str::contains(".v, .sv or .vhdl"));

    assert!(!ws.path().join("adder_tb").exists());
}

#[test]
fn test_unknown_simulator_is_rejected() {
    let ws = installed_workspace();
    cocoscaff(ws.path())
        .args(["new", "-y", "-n", "adder_tb", "-s", "modelsim"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cocoscaff simulators"));
}

#[test]
fn test_missing_template_folder() {
    let ws = workspace();
    cocoscaff(ws.path())
        .args(["new", "--yes", "--name", "adder_tb"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Template folder"))
        .stderr(predicate::str::contains("cocoscaff template install"));

    assert!(!ws.path().join("adder_tb").exists());
}

#[test]
fn test_existing_project_folder() {
    let ws = installed_workspace();
    std::fs::create_dir(ws.path().join("adder_tb")).unwrap();

    cocoscaff(ws.path())
        .args(["new", "--yes", "--name", "adder_tb"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Folder already exists."));
}

#[test]
fn test_interactive_needs_a_terminal() {
    let ws = installed_workspace();
    cocoscaff(ws.path())
        .args(["new", "--name", "adder_tb"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_unknown_config_key() {
    let ws = workspace();
    cocoscaff(ws.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_missing_config_file() {
    let ws = workspace();
    cocoscaff(ws.path())
        .args(["--config", "nope.toml", "simulators"])
        .assert()
        .code(4);
}

#[test]
fn test_template_install_twice_needs_force() {
    let ws = installed_workspace();
    cocoscaff(ws.path())
        .args(["template", "install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cocoscaff(ws.path())
        .args(["template", "install", "--force"])
        .assert()
        .success();
}

#[test]
fn test_init_refuses_overwrite() {
    let ws = workspace();
    cocoscaff(ws.path())
        .args(["init", "--local"])
        .assert()
        .success();
    cocoscaff(ws.path())
        .args(["init", "--local"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_unknown_subcommand() {
    let ws = workspace();
    cocoscaff(ws.path())
        .arg("frobnicate")
        .assert()
        .code(2);
}
