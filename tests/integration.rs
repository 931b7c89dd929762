// Integration testing can be done either by calling library functions directly or by invoking your CLI as a subprocess.
use predicates::prelude::*;
use std::{fs, path::Path};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn writes_default_manifest_into_working_directory() {
    let input = tempfile::tempdir().unwrap();
    touch(input.path(), "a.uasset");
    touch(input.path(), "b.UMAP");
    touch(input.path(), "c.txt");
    touch(input.path(), "sub/d.umap");
    let workdir = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("patchgen").unwrap();

    cmd.current_dir(workdir.path()).arg(input.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("P000.json"))
        .stdout(predicate::str::contains("3 conflict paths"));

    let written = fs::read_to_string(workdir.path().join("P000.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(
        json["conflictsWith"],
        serde_json::json!(["Absolver/a.uasset", "Absolver/b.UMAP", "Absolver/sub/d.umap"])
    );
    assert_eq!(json["devOnly"], serde_json::json!(false));
    assert!(written.starts_with("{\n\t\"name\": \"\",\n\t\"description\": \"\""));
}

#[test]
fn output_and_config_flags() {
    let input = tempfile::tempdir().unwrap();
    touch(input.path(), "Maps/Arena.umap");
    touch(input.path(), "Maps/Arena.uexp");
    let workdir = tempfile::tempdir().unwrap();
    let config = workdir.path().join("patchgen.toml");
    fs::write(
        &config,
        "virtual_root = \"MyGame\"\nallowed_extensions = [\"uexp\"]\ndev_only = true\n",
    )
    .unwrap();
    let output = workdir.path().join("P042.json");
    let mut cmd = assert_cmd::Command::cargo_bin("patchgen").unwrap();

    cmd.arg(input.path())
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output);

    cmd.assert().success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        json["conflictsWith"],
        serde_json::json!(["MyGame/Maps/Arena.uexp"])
    );
    assert_eq!(json["devOnly"], serde_json::json!(true));
}

#[test]
fn missing_folder_fails_without_output() {
    let workdir = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("patchgen").unwrap();

    cmd.current_dir(workdir.path())
        .arg(workdir.path().join("nowhere"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not_a_directory"));

    assert!(!workdir.path().join("P000.json").exists());
}

#[test]
fn help_mentions_config_output_file() {
    let mut cmd = assert_cmd::Command::cargo_bin("patchgen").unwrap();

    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("the config's output_file"));
}
