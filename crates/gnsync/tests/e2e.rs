// End-to-end tests for the gnsync binary.
// None of these reach a real note store.

use std::path::Path;
use std::process::{Command, Output};

fn gnsync(home: &Path, args: &[&str]) -> Output {
    let config = home.join("config.toml");
    if !config.exists() {
        std::fs::write(
            &config,
            "[api]\nbase_url = \"http://127.0.0.1:9/api\"\ntimeout_secs = 2\n",
        )
        .expect("write config");
    }
    Command::new(env!("CARGO_BIN_EXE_gnsync"))
        .arg("--config")
        .arg(&config)
        .arg("--logpath")
        .arg(home.join("logs").join("gnsync.log"))
        .args(args)
        .env("XDG_RUNTIME_DIR", home.join("run"))
        .env("GNSYNC_TOKEN", "test-token")
        .output()
        .expect("failed to run gnsync")
}

#[test]
fn cli_help_displays_correctly() {
    let output = Command::new(env!("CARGO_BIN_EXE_gnsync"))
        .arg("--help")
        .output()
        .expect("failed to run gnsync --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Push a directory of text files"));
    assert!(stdout.contains("--path"));
    assert!(stdout.contains("--mask"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--notebook"));
    assert!(stdout.contains("--logpath"));
    assert!(stdout.contains("--strict-titles"));
}

#[test]
fn missing_path_exits_with_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = gnsync(tmp.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not selected"), "stderr: {stderr}");
}

#[test]
fn nonexistent_path_exits_with_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = tmp.path().join("nope");
    let output = gnsync(tmp.path(), &["--path", &missing.to_string_lossy()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    assert!(tmp.path().join("logs").join("gnsync.log").exists());
}

#[test]
fn missing_token_exits_with_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("empty.toml");
    std::fs::write(&config, "").expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_gnsync"))
        .arg("--config")
        .arg(&config)
        .arg("--logpath")
        .arg(tmp.path().join("gnsync.log"))
        .args(["--path", &tmp.path().to_string_lossy()])
        .env_remove("GNSYNC_TOKEN")
        .output()
        .expect("failed to run gnsync");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("access token"), "stderr: {stderr}");
}

#[test]
fn unreachable_store_aborts_before_touching_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let notes = tmp.path().join("notes");
    std::fs::create_dir(&notes).expect("mkdir");
    std::fs::write(notes.join("idea.txt"), "hello\n").expect("write note");

    let output = gnsync(tmp.path(), &["--path", &notes.to_string_lossy()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Notebook \"notes\""), "stderr: {stderr}");
    assert_eq!(
        std::fs::read_to_string(notes.join("idea.txt")).expect("read note"),
        "hello\n"
    );
}

#[test]
fn init_config_writes_template() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = Command::new(env!("CARGO_BIN_EXE_gnsync"))
        .arg("--init-config")
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .output()
        .expect("failed to run gnsync --init-config");

    assert!(output.status.success());
    let written = tmp.path().join("config").join("gnsync").join("config.toml");
    let text = std::fs::read_to_string(&written).expect("template written");
    assert!(text.contains("[auth]"));
}

#[test]
fn init_config_refuses_to_overwrite_existing_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config_dir = tmp.path().join("config").join("gnsync");
    std::fs::create_dir_all(&config_dir).expect("mkdir");
    let existing = config_dir.join("config.toml");
    let seeded = "[auth]\ntoken = \"my-secret-token\"\n";
    std::fs::write(&existing, seeded).expect("seed config");

    let output = Command::new(env!("CARGO_BIN_EXE_gnsync"))
        .arg("--init-config")
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .output()
        .expect("failed to run gnsync --init-config");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
    assert_eq!(
        std::fs::read_to_string(&existing).expect("read config"),
        seeded
    );
}
