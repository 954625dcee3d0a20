//! Recipe determinism tests
//!
//! A recipe must only change when the import set, the build constraints,
//! go.mod or go.sum change. Anything else would defeat the build cache.

mod support;

use filetime::FileTime;
use gocook::prepare::build_recipe;
use std::fs;
use support::{create_module, prepare_recipe, write};

#[test]
fn test_prepare_is_idempotent() {
    let dir = create_module();
    let first = prepare_recipe(dir.path());
    let second = prepare_recipe(dir.path());
    assert_eq!(first, second);
}

#[test]
fn test_function_body_edits_do_not_change_recipe() {
    let dir = create_module();
    let before = prepare_recipe(dir.path());

    write(
        dir.path(),
        "main.go",
        &support::MAIN_GO.replace("fmt.Println(util.Answer())", "fmt.Println(util.Answer() + 1)"),
    );
    write(
        dir.path(),
        "internal/util/util.go",
        "package util\n\n// Answer is what it always was.\nfunc Answer() int { return 6 * 7 }\n",
    );

    assert_eq!(before, prepare_recipe(dir.path()));
}

#[test]
fn test_new_files_without_new_imports_do_not_change_recipe() {
    let dir = create_module();
    let before = prepare_recipe(dir.path());

    write(dir.path(), "extra.go", "package main\n\nimport \"fmt\"\n\nvar _ = fmt.Sprint\n");
    write(dir.path(), "docs/README.md", "# docs\n");
    write(dir.path(), "consts.go", "package main\n\nconst Name = \"app\"\n");

    assert_eq!(before, prepare_recipe(dir.path()));
}

#[test]
fn test_timestamps_do_not_change_recipe() {
    let dir = create_module();
    let before = prepare_recipe(dir.path());

    let epoch = FileTime::from_unix_time(0, 0);
    for rel in ["main.go", "sys_linux.go", "internal/util/util.go"] {
        filetime::set_file_mtime(dir.path().join(rel), epoch).unwrap();
    }

    assert_eq!(before, prepare_recipe(dir.path()));
}

#[test]
fn test_hidden_directories_do_not_change_recipe() {
    let dir = create_module();
    let before = prepare_recipe(dir.path());

    write(
        dir.path(),
        ".cache/tool/gen.go",
        "package gen\n\nimport \"github.com/never/seen\"\n",
    );
    write(dir.path(), ".scratch.go", "this is not even go");

    assert_eq!(before, prepare_recipe(dir.path()));
}

#[test]
fn test_new_import_changes_recipe() {
    let dir = create_module();
    let before = prepare_recipe(dir.path());

    write(
        dir.path(),
        "extra.go",
        "package main\n\nimport \"github.com/google/uuid\"\n\nvar _ = uuid.New\n",
    );

    assert_ne!(before, prepare_recipe(dir.path()));
}

#[test]
fn test_sort_order_invariants() {
    let dir = create_module();
    write(dir.path(), "a_windows.go", "//go:build windows\n\npackage main\n\nimport (\n\t\"syscall\"\n\t\"golang.org/x/sys/windows\"\n)\n");
    write(dir.path(), "b_darwin.go", "//go:build darwin\n\npackage main\n\nimport \"golang.org/x/sys/unix\"\n");
    write(dir.path(), "z.go", "package main\n\nimport (\n\t\"strings\"\n\t\"bytes\"\n\t\"os\"\n)\n");

    let recipe = build_recipe(dir.path()).unwrap();
    let constraints: Vec<&str> = recipe
        .import_groups
        .iter()
        .map(|g| g.build_constraints.as_str())
        .collect();
    assert_eq!(constraints, vec!["", "darwin", "linux", "windows"]);

    for group in &recipe.import_groups {
        assert!(group.packages.windows(2).all(|w| w[0] < w[1]));
    }
    assert_eq!(
        recipe.import_groups[0].packages,
        vec!["bytes", "fmt", "os", "strings"]
    );
}

#[test]
fn test_recipe_file_inside_tree_is_ignored() {
    let dir = create_module();
    let first = prepare_recipe(dir.path());
    fs::write(dir.path().join("stale.json"), &first).unwrap();
    assert_eq!(first, prepare_recipe(dir.path()));
}

#[test]
fn test_legacy_encoded_bodies_do_not_change_recipe() {
    let dir = create_module();
    let before = prepare_recipe(dir.path());

    let legacy = dir.path().join("testdata/legacy.go");
    fs::create_dir_all(legacy.parent().unwrap()).unwrap();
    fs::write(
        &legacy,
        b"package main\n\nimport \"fmt\"\n\n// caf\xE9\nfunc legacy() { fmt.Println(\"\xA9\") }\n",
    )
    .unwrap();

    assert_eq!(before, prepare_recipe(dir.path()));
}
