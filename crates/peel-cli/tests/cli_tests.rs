#![allow(missing_docs)]
use peel_core::test_utils::{gzip, tar_of};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_peel(args: &[&str], stdin: Option<&[u8]>) -> Output {
    let peel_bin = env!("CARGO_BIN_EXE_peel");
    let mut child = Command::new(peel_bin)
        .args(args)
        .env_remove("PEEL_CONFIG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run peel");

    let mut pipe = child.stdin.take().expect("stdin is piped");
    pipe.write_all(stdin.unwrap_or_default()).unwrap();
    drop(pipe);

    child.wait_with_output().expect("Failed to wait for peel")
}

fn gzip_tar(files: &[(&str, &[u8])]) -> Vec<u8> {
    gzip(&tar_of(files))
}

#[test]
fn test_decode_stdin_to_stdout() {
    let input = gzip_tar(&[("a.txt", b"hello"), ("b.txt", b"world")]);
    let output = run_peel(&["decode"], Some(&input));

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(output.stdout, b"helloworld");
}

#[test]
fn test_decode_raw_passthrough() {
    let output = run_peel(&["decode", "-"], Some(b"not an archive"));

    assert!(output.status.success());
    assert_eq!(output.stdout, b"not an archive");
}

#[test]
fn test_no_matching_strategy_exits_nonzero() {
    let output = run_peel(
        &["decode", "--chain", "tar,gzip+tar,gzip"],
        Some(b"not an archive"),
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No decoding strategy matched"), "stderr: {stderr}");
}

#[test]
fn test_decode_file_to_file() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("layer.tgz");
    let dest = temp.path().join("payload.bin");
    std::fs::write(&input, gzip_tar(&[("bin/tool", b"#!/bin/sh\n")])).unwrap();

    let output = run_peel(
        &[
            "decode",
            input.to_str().unwrap(),
            "-o",
            dest.to_str().unwrap(),
        ],
        None,
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read(&dest).unwrap(), b"#!/bin/sh\n");
}

#[test]
fn test_strategies_listing() {
    let output = run_peel(&["strategies"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["gzip+tar", "tar", "gzip", "identity"] {
        assert!(stdout.contains(name), "missing {name} in {stdout}");
    }
}
