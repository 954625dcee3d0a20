//! Prepare phase: turn a module source tree into a recipe

pub mod aggregate;
pub mod walker;

pub use aggregate::ImportsBuilder;
pub use walker::SourceWalker;

use crate::error::{Error, Result};
use crate::golang::{self, SourceHeader, GO_MOD, GO_SUM};
use crate::recipe::Recipe;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Reads and parses the header of one source file.
pub fn extract_file(path: &Path) -> Result<SourceHeader> {
    let src = fs::read(path).map_err(|e| Error::io("read", path, e))?;
    golang::parse_header_bytes(&src).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        line: e.line,
        column: e.column,
        message: e.message,
    })
}

/// Builds the recipe for the module rooted at `root` without writing it.
pub fn build_recipe(root: &Path) -> Result<Recipe> {
    let start = Instant::now();

    let mod_path = root.join(GO_MOD);
    let go_mod = fs::read_to_string(&mod_path).map_err(|e| Error::io("read", &mod_path, e))?;
    let module_path = golang::parse_module_path(&go_mod).map_err(|e| Error::ModFile {
        path: mod_path.clone(),
        line: e.line,
        message: e.message,
    })?;

    let sum_path = root.join(GO_SUM);
    let go_sum = fs::read_to_string(&sum_path).map_err(|e| Error::io("read", &sum_path, e))?;

    info!(root = %root.display(), module = %module_path, "Preparing recipe");

    let mut builder = ImportsBuilder::new(&module_path);
    let files = SourceWalker::new(root).walk(|path| {
        let header = extract_file(path)?;
        debug!(
            path = %path.display(),
            imports = header.imports.len(),
            constraint = %header.build_constraint,
            "Parsed source header"
        );
        builder.add_file(&header);
        Ok(())
    })?;

    let recipe = Recipe {
        import_groups: builder.finish(),
        go_mod,
        go_sum,
    };

    info!(
        files,
        groups = recipe.import_groups.len(),
        packages = recipe.package_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Recipe prepared"
    );

    Ok(recipe)
}

/// Builds the recipe for `root` and writes it to `output`.
///
/// Nothing is written unless the whole tree was processed successfully.
pub fn prepare(root: &Path, output: &Path) -> Result<Recipe> {
    let recipe = build_recipe(root)?;
    recipe.write(output)?;
    info!(output = %output.display(), "Recipe written");
    Ok(recipe)
}
