//! Black-box tests of the recsum binary.

use super::test_utils::{write_tree, SHA256_HELLO, SHA256_WORLD};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary inside `cwd` with an isolated home so no user config leaks in.
fn recsum(cwd: &Path, args: &[&str]) -> Output {
    let home = cwd.join(".home");
    fs::create_dir_all(&home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_recsum"))
        .args(args)
        .current_dir(cwd)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RECSUM_LOG")
        .env_remove("RECSUM_LOG_FORMAT")
        .env_remove("RECSUM_LOG_OUTPUT")
        .env_remove("RECSUM_LOG_MODULES")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}

#[test]
fn test_prints_checksum_lines() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("data/a.txt", "hello"), ("data/b.txt", "world")]);

    let output = recsum(temp_dir.path(), &["data"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_lines(&output),
        vec![
            format!("{}  data/a.txt", SHA256_HELLO),
            format!("{}  data/b.txt", SHA256_WORLD),
        ]
    );
}

#[test]
fn test_algorithm_flag() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("h", "hello")]);

    let output = recsum(temp_dir.path(), &["-a", "md5", "h"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["5d41402abc4b2a76b9719d911017c592  h".to_string()]
    );
}

#[cfg(unix)]
#[test]
fn test_failures_go_to_stderr_not_stdout() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("data/a.txt", "hello")]);
    std::os::unix::fs::symlink(
        temp_dir.path().join("data/gone"),
        temp_dir.path().join("data/broken"),
    )
    .unwrap();

    let output = recsum(temp_dir.path(), &["--quiet", "data"]);

    // Per-file failures do not fail the run.
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![format!("{}  data/a.txt", SHA256_HELLO)]
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("data/broken failed with error"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_each_failure_reported_once_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("data/a.txt", "hello")]);
    std::os::unix::fs::symlink(
        temp_dir.path().join("data/gone"),
        temp_dir.path().join("data/broken"),
    )
    .unwrap();

    let output = recsum(temp_dir.path(), &["data", "missing_root"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let count = |needle: &str| stderr.lines().filter(|l| l.contains(needle)).count();
    assert_eq!(count("data/broken"), 1, "stderr: {}", stderr);
    assert_eq!(count("missing_root"), 1, "stderr: {}", stderr);
    assert_eq!(
        stdout_lines(&output),
        vec![format!("{}  data/a.txt", SHA256_HELLO)]
    );
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("data/a.txt", "hello")]);

    let output = recsum(temp_dir.path(), &["-o", "sums.txt", "data"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(temp_dir.path().join("sums.txt")).unwrap();
    assert_eq!(written, format!("{}  data/a.txt\n", SHA256_HELLO));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Output written to 'sums.txt'"));
}

#[test]
fn test_json_format() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a", "world")]);

    let output = recsum(temp_dir.path(), &["--format", "json", "a"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next().unwrap();
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["path"], "a");
    assert_eq!(value["hash"], SHA256_WORLD);
    assert!(value["error"].is_null());
}

#[test]
fn test_missing_root_exits_nonzero_but_hashes_others() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("present", "hello")]);

    let output = recsum(temp_dir.path(), &["missing", "present"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec![format!("{}  present", SHA256_HELLO)]
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

#[test]
fn test_local_config_file_is_used() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("h", "hello")]);
    fs::write(
        temp_dir.path().join("recsum.toml"),
        "[walk]\nalgorithm = \"sha1\"\n",
    )
    .unwrap();

    let output = recsum(temp_dir.path(), &["h"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d  h".to_string()]
    );
}

#[test]
fn test_requires_a_path() {
    let temp_dir = TempDir::new().unwrap();
    let output = recsum(temp_dir.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_version_flag() {
    let temp_dir = TempDir::new().unwrap();
    let output = recsum(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
