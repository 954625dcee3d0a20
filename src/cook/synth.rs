//! Synthetic Go sources that force compilation of a recipe's packages

use crate::golang::{literal, BUILD_CONSTRAINT_PREFIX, SYNTHETIC_PACKAGE};
use crate::recipe::ImportGroup;
use std::fmt::Write;

/// Name of the file carrying the program entry point
pub const ENTRY_FILE: &str = "main.go";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticFile {
    pub name: String,
    pub contents: String,
}

fn render(build_constraints: &str, packages: &[String], with_entry: bool) -> String {
    let mut out = String::new();
    if !build_constraints.is_empty() {
        let _ = write!(out, "{}{}\n\n", BUILD_CONSTRAINT_PREFIX, build_constraints);
    }
    let _ = write!(out, "package {}\n\nimport (\n", SYNTHETIC_PACKAGE);
    for pkg in packages {
        let _ = writeln!(out, "\t_ {}", literal::quote(pkg));
    }
    out.push_str(")\n");
    if with_entry {
        out.push_str("\nfunc main() {}\n");
    }
    out
}

/// Generates one file per import group plus the unconditional entry point.
///
/// The entry point always lives in [`ENTRY_FILE`]. When the first group is
/// unconstrained its imports share that file; any other group at index `i`
/// goes to `main{i}.go`.
pub fn synthesize(groups: &[ImportGroup]) -> Vec<SyntheticFile> {
    let mut files = Vec::with_capacity(groups.len() + 1);

    let merged_first = groups.first().map_or(false, ImportGroup::is_unconstrained);
    let entry_packages: &[String] = if merged_first {
        &groups[0].packages
    } else {
        &[]
    };
    files.push(SyntheticFile {
        name: ENTRY_FILE.to_string(),
        contents: render("", entry_packages, true),
    });

    for (idx, group) in groups.iter().enumerate() {
        if idx == 0 && merged_first {
            continue;
        }
        files.push(SyntheticFile {
            name: format!("main{}.go", idx),
            contents: render(&group.build_constraints, &group.packages, false),
        });
    }

    files
}
