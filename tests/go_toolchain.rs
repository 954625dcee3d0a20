//! Prepare and cook against a real Go toolchain
//!
//! Run with `cargo test -- --ignored` on a machine with `go` on PATH. The
//! module only uses the standard library so no network access is needed.

mod support;

use std::fs;
use support::{go_files, prepare_recipe, run_gocook, write};
use tempfile::TempDir;

#[test]
#[ignore = "requires a Go toolchain on PATH"]
fn test_cook_builds_with_real_go() {
    let module = TempDir::new().unwrap();
    write(module.path(), "go.mod", "module example.com/std\n\ngo 1.21\n");
    write(module.path(), "go.sum", "");
    write(
        module.path(),
        "main.go",
        "package main\n\nimport (\n\t\"fmt\"\n\t\"example.com/std/internal/x\"\n)\n\nfunc main() { fmt.Println(x.V) }\n",
    );
    write(
        module.path(),
        "unix.go",
        "//go:build unix\n\npackage main\n\nimport \"syscall\"\n\nvar _ = syscall.Getpid\n",
    );
    write(module.path(), "internal/x/x.go", "package x\n\nconst V = 1\n");

    let recipe = prepare_recipe(module.path());

    let cook_dir = TempDir::new().unwrap();
    fs::write(cook_dir.path().join("recipe.json"), recipe).unwrap();
    let output = run_gocook(cook_dir.path(), &["--cook", "recipe.json"]);
    assert!(
        output.status.success(),
        "cook failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(go_files(cook_dir.path()).is_empty());
}

#[test]
#[ignore = "requires a Go toolchain on PATH"]
fn test_cook_empty_recipe_with_real_go() {
    let cook_dir = TempDir::new().unwrap();
    fs::write(
        cook_dir.path().join("recipe.json"),
        r#"{"importGroups":[],"go.mod":"module example.com/empty\n\ngo 1.21\n","go.sum":""}"#,
    )
    .unwrap();

    let output = run_gocook(cook_dir.path(), &["--cook", "recipe.json"]);
    assert!(output.status.success());
}
