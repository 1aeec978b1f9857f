use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pixelcanvas_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pixelcanvas").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

fn write_script(home: &TempDir, body: &str) -> std::path::PathBuf {
    let path = home.path().join("script.txt");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn help_prints_about() {
    let home = TempDir::new().unwrap();
    pixelcanvas_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pixel-art drawing canvas with a persistent grid",
        ));
}

#[test]
fn no_flags_prints_usage() {
    let home = TempDir::new().unwrap();
    pixelcanvas_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("--replay FILE"));
}

#[test]
fn info_reports_missing_drawing() {
    let home = TempDir::new().unwrap();
    pixelcanvas_cmd(&home)
        .arg("--info")
        .assert()
        .success()
        .stdout(predicate::str::contains("no stored drawing"));
}

#[test]
fn replay_persists_drawing_on_move() {
    let home = TempDir::new().unwrap();
    let script = write_script(
        &home,
        "# paint the top-left cell red\nswatch 0\nclick 10 10\nmove\n",
    );

    pixelcanvas_cmd(&home)
        .arg("--replay")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("grid 4x4, tool pencil, color #ff0000"));

    assert!(
        home.path()
            .join("data")
            .join("pixelcanvas")
            .join("canvasData.json")
            .exists()
    );

    pixelcanvas_cmd(&home)
        .args(["--info", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grid: 4x4"))
        .stdout(predicate::str::contains(
            "#ff0000 #ffffff #ffffff #ffffff",
        ));
}

#[test]
fn replay_restores_previous_drawing() {
    let home = TempDir::new().unwrap();
    let first = write_script(&home, "density 32x32\ncolor #00ff00\ntool fill\nclick 0 0\nmove\n");
    pixelcanvas_cmd(&home).arg("--replay").arg(&first).assert().success();

    // The eyedropper reads back the restored fill.
    let second = write_script(&home, "tool eyedropper\nclick 500 500\n");
    pixelcanvas_cmd(&home)
        .arg("--replay")
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("grid 32x32, tool eyedropper, color #00ff00"));
}

#[test]
fn clear_removes_stored_drawing() {
    let home = TempDir::new().unwrap();
    let script = write_script(&home, "tool fill\nclick 1 1\nmove\n");
    pixelcanvas_cmd(&home).arg("--replay").arg(&script).assert().success();

    pixelcanvas_cmd(&home)
        .arg("--clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed stored drawing"));

    pixelcanvas_cmd(&home)
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains("No stored drawing"));
}

#[test]
fn bad_script_line_fails() {
    let home = TempDir::new().unwrap();
    let script = write_script(&home, "tool pencil\nclick ten 10\n");
    pixelcanvas_cmd(&home)
        .arg("--replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn config_file_changes_storage_key() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config").join("pixelcanvas");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[storage]\nkey = \"sketch\"\ncompress = \"on\"\n",
    )
    .unwrap();

    let script = write_script(&home, "click 1 1\nmove\n");
    pixelcanvas_cmd(&home).arg("--replay").arg(&script).assert().success();

    pixelcanvas_cmd(&home)
        .arg("--info")
        .assert()
        .success()
        .stdout(predicate::str::contains("sketch.json"))
        .stdout(predicate::str::contains("compressed: yes"));
}
