//! Shared helpers for gocook integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const GO_MOD: &str = "module example.com/app\n\ngo 1.22\n\nrequire golang.org/x/sys v0.20.0\n";
pub const GO_SUM: &str = "golang.org/x/sys v0.20.0 h1:Od9JTbYCk261bKm4M/mw7AklTlFYIa0bIp9BgSm1S8Y=\n\
golang.org/x/sys v0.20.0/go.mod h1:/VUhepiaJMQUp4+oa/7Zr1D23ma6VTLIYjOOTFZPUcA=\n";

pub const MAIN_GO: &str = r#"package main

import (
	"fmt"

	"example.com/app/internal/util"
)

func main() {
	fmt.Println(util.Answer())
}
"#;

pub const SYS_LINUX_GO: &str = r#"//go:build linux

package main

import "golang.org/x/sys/unix"

var pageSize = unix.Getpagesize()
"#;

pub const UTIL_GO: &str = r#"package util

func Answer() int { return 42 }
"#;

pub fn gocook_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gocook"))
}

pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, contents).expect("Failed to write fixture file");
}

/// A small module: one unconstrained file, one linux-only file, one internal package.
pub fn create_module() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(dir.path(), "go.mod", GO_MOD);
    write(dir.path(), "go.sum", GO_SUM);
    write(dir.path(), "main.go", MAIN_GO);
    write(dir.path(), "sys_linux.go", SYS_LINUX_GO);
    write(dir.path(), "internal/util/util.go", UTIL_GO);
    dir
}

pub fn run_gocook(dir: &Path, args: &[&str]) -> Output {
    Command::new(gocook_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("GOCOOK_GO_BINARY")
        .output()
        .expect("Failed to execute gocook")
}

pub fn run_gocook_with_go(dir: &Path, go_binary: &Path, args: &[&str]) -> Output {
    Command::new(gocook_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("GOCOOK_GO_BINARY", go_binary)
        .output()
        .expect("Failed to execute gocook")
}

pub fn prepare_recipe(dir: &Path) -> Vec<u8> {
    let output = run_gocook(dir, &["--prepare", "recipe.json"]);
    assert!(
        output.status.success(),
        "prepare failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    fs::read(dir.join("recipe.json")).expect("Failed to read recipe")
}

/// Writes an executable shell script standing in for `go`.
///
/// The script records its arguments and a copy of every synthesized `.go`
/// file in `capture/` before exiting with `exit_code`.
#[cfg(unix)]
pub fn fake_go(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-go.sh");
    let body = format!(
        "#!/bin/sh\n\
         mkdir -p capture\n\
         echo \"$@\" > capture/args\n\
         for f in *.go; do [ -e \"$f\" ] && cp \"$f\" \"capture/$f\"; done\n\
         exit {}\n",
        exit_code
    );
    fs::write(&script, body).expect("Failed to write fake go");
    let mut perms = fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).expect("Failed to chmod fake go");
    script
}

pub fn go_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.ends_with(".go"))
        .collect();
    names.sort();
    names
}
