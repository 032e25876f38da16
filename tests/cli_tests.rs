use std::io::Write;
use std::process::{Command, Stdio};

fn exe() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vecadd"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn reports_threads_and_time() {
    let out = exe()
        .args([
            "--backend", "host", "--size", "4096", "--threads", "64", "--seed", "1", "--verify",
        ])
        .output()
        .expect("run failed");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Number of Threads Used: 64");
    assert!(lines[1].starts_with("Execution Time: "));
    assert!(lines[1].ends_with(" milliseconds"));
}

#[test]
fn prompts_on_stdin_when_threads_missing() {
    let mut child = exe()
        .args(["--backend", "host", "--size", "1000", "--seed", "2"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn failed");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"100\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("Enter the number of threads: "));
    assert!(stdout.contains("Number of Threads Used: 100"));
}

#[test]
fn non_numeric_threads_fails() {
    let out = exe()
        .args(["--backend", "host", "--size", "64", "--threads", "many"])
        .output()
        .expect("run failed");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("is not a number"));
}

#[test]
fn oversized_group_fails() {
    let out = exe()
        .args(["--backend", "host", "--size", "64", "--threads", "128"])
        .output()
        .expect("run failed");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("exceeds vector length"));
}

#[test]
fn json_report_is_parseable() {
    let out = exe()
        .args([
            "--backend", "host", "--size", "100", "--threads", "32", "--seed", "9", "--json",
            "--verify",
        ])
        .output()
        .expect("run failed");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["backend"], "host");
    assert_eq!(value["vector_len"], 100);
    assert_eq!(value["global_work_size"], 128);
    assert_eq!(value["seed"], 9);
    assert_eq!(value["verified"], true);
}

#[test]
fn lists_host_device() {
    let out = exe()
        .args(["--backend", "host", "--list-devices"])
        .output()
        .expect("run failed");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("[0] host simulation / "));
}

#[test]
fn size_beyond_kernel_int_range_fails_before_allocating() {
    let out = exe()
        .args(["--backend", "host", "--size", "3000000000", "--threads", "64"])
        .output()
        .expect("run failed");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("int range"));
}
