//! End-to-end export through the binary with a stand-in transcoder script
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Writes its last argument and prints a progress line, like a real transcoder run
const FAKE_TRANSCODER: &str = r#"#!/bin/sh
for last in "$@"; do :; done
printf 'frame=1 time=00:00:01.00 bitrate=N/A\r' >&2
echo media > "$last"
"#;

#[test]
fn test_export_end_to_end_with_fake_transcoder() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("fake-ffmpeg");
    std::fs::write(&script, FAKE_TRANSCODER).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::write(home.path().join("talk.mp4"), b"media").unwrap();
    let scratch = home.path().join("scratch");
    std::fs::create_dir(&scratch).unwrap();

    let mut cmd = Command::cargo_bin("cutx").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    for var in ["CUTX_FFMPEG", "CUTX_MODE", "CUTX_TEMP_DIR", "CUTX_LOG_LEVEL", "CUTX_CRF"] {
        cmd.env_remove(var);
    }
    cmd.args([
            "export", "--input", "talk.mp4", "--duration", "60", "--cut", "10-20", "--cut",
            "40-50", "--mode", "precise", "--json", "--temp-dir",
        ])
        .arg(&scratch)
        .arg("--ffmpeg")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""segments": 3"#))
        .stdout(predicate::str::contains(r#""strategy": "precise-reencode""#))
        .stdout(predicate::str::contains(r#""kept_seconds": 40.0"#));

    assert!(home.path().join("talk_edited.mp4").is_file());
    let leftovers = WalkDir::new(&scratch).min_depth(1).into_iter().count();
    assert_eq!(leftovers, 0);
}
