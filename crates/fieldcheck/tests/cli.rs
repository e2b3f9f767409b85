use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn fieldcheck(flags: &[&str], record: &Path, rules: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fieldcheck"))
        .args(flags)
        .arg("validate")
        .arg("--record")
        .arg(record)
        .arg("--rules")
        .arg(rules)
        .arg("--json")
        // No store credentials: lookups are not needed by these rules
        .env_remove("FIELDCHECK_ACCESS_KEY_ID")
        .env_remove("FIELDCHECK_SECRET_ACCESS_KEY")
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .output()
        .unwrap()
}

#[test]
fn test_json_output_stays_parseable_with_logging_enabled() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"email": "not-an-email"}"#);
    let rules = write(&dir, "rules.yml", "email: required|email\nname: required\n");

    for flags in [
        &[][..],
        &["-v"][..],
        &["-d"][..],
        &["--log-level", "debug"][..],
    ] {
        let output = fieldcheck(flags, &record, &rules);
        assert_eq!(output.status.code(), Some(1), "flags {:?}", flags);

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON with {:?}: {}", flags, e));
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"].as_array().map(Vec::len), Some(2));
    }

    // Log lines still reach the user, on stderr
    let output = fieldcheck(&["-v"], &record, &rules);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Verbose mode enabled"));
}

#[test]
fn test_bad_log_level_is_rejected() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", "{}");
    let rules = write(&dir, "rules.json", "{}");

    let output = fieldcheck(&["--log-level", "loud"], &record, &rules);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
