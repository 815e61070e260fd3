//! CLI integration tests for thinkwise-export

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_thinkwise-export"))
}

fn isolated<'a>(cmd: &'a mut Command, dir: &TempDir) -> &'a mut Command {
    cmd.env("THINKWISE_CONFIG", dir.path().join("missing.toml"))
        .env_remove("THINKWISE_LOG_FORMAT")
        .env_remove("THINKWISE_LOG_LEVEL")
}

#[test]
fn test_profile_export_prints_path() {
    let temp_dir = TempDir::new().unwrap();
    let output = isolated(&mut bin(), &temp_dir)
        .args(["--kind", "profile", "--output-dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let path = stdout.trim();
    assert!(path.ends_with("thinkwise-profile-alex-johnson.json"));

    let json = fs::read_to_string(path).unwrap();
    assert!(json.contains("\"version\": \"1.0\""));
    assert!(json.contains("\"name\": \"Alex Johnson\""));
}

#[test]
fn test_questions_without_sessions_exits_4() {
    let temp_dir = TempDir::new().unwrap();
    let output = isolated(&mut bin(), &temp_dir)
        .args(["--kind", "questions", "--output-dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No questions found to export."));
}

#[test]
fn test_questions_with_sample_session() {
    let temp_dir = TempDir::new().unwrap();
    let output = isolated(&mut bin(), &temp_dir)
        .args(["--kind", "questions", "--with-sample-session", "--output-dir"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let csv = fs::read_to_string(stdout.trim()).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("id,type,subject,topic,difficulty,question,image_url,"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output = isolated(&mut bin(), &temp_dir)
        .args(["--kind", "zip"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
