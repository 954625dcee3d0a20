//! Cook phase: materialize a recipe and compile its dependencies
//!
//! The phases run strictly in order:
//!
//! 1. `ValidatingRecipe` - load and check the recipe
//! 2. `WritingInputs` - write go.mod, go.sum and the synthetic sources
//! 3. `Building` - run `go build`
//! 4. `CleaningUp` - remove every synthetic source, whatever the build did
//!
//! Failures before `Building` abort immediately. A build failure is held until
//! cleanup has run, and cleanup failures are reported alongside it.

pub mod build;
pub mod synth;

pub use build::GoBuild;
pub use synth::{synthesize, SyntheticFile, ENTRY_FILE};

use crate::error::{CleanupError, Error, Result};
use crate::golang::{GO_MOD, GO_SUM};
use crate::recipe::Recipe;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookPhase {
    ValidatingRecipe,
    WritingInputs,
    Building,
    CleaningUp,
}

impl fmt::Display for CookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CookPhase::ValidatingRecipe => "validating-recipe",
            CookPhase::WritingInputs => "writing-inputs",
            CookPhase::Building => "building",
            CookPhase::CleaningUp => "cleaning-up",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct CookOptions {
    pub go_binary: OsString,
    /// Forwarded as `go build -tags`
    pub tags: Option<String>,
}

impl Default for CookOptions {
    fn default() -> Self {
        Self {
            go_binary: OsString::from("go"),
            tags: None,
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io("write", path, e))
}

/// Removes every file in `paths`, collecting failures instead of stopping.
pub fn remove_all(paths: &[PathBuf]) -> std::result::Result<(), CleanupError> {
    let mut cleanup = CleanupError::new();
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "Removed synthesized file"),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove synthesized file");
                cleanup.push(path, e);
            }
        }
    }
    cleanup.into_result()
}

/// Writes the recipe's inputs into `root` and builds them.
pub fn cook_recipe(root: &Path, recipe: &Recipe, options: &CookOptions) -> Result<()> {
    info!(phase = %CookPhase::WritingInputs, root = %root.display(), "Cook phase");
    write_file(&root.join(GO_MOD), &recipe.go_mod)?;
    write_file(&root.join(GO_SUM), &recipe.go_sum)?;

    let mut written = Vec::new();
    let mut outcome = Ok(());
    for file in synthesize(&recipe.import_groups) {
        let path = root.join(&file.name);
        if let Err(e) = write_file(&path, &file.contents) {
            outcome = Err(e);
            break;
        }
        debug!(path = %path.display(), "Wrote synthesized file");
        written.push(path);
    }

    if outcome.is_ok() {
        info!(phase = %CookPhase::Building, files = written.len(), "Cook phase");
        outcome = GoBuild::new(options.go_binary.clone(), root)
            .with_tags(options.tags.as_deref())
            .run();
    }

    info!(phase = %CookPhase::CleaningUp, files = written.len(), "Cook phase");
    match (outcome, remove_all(&written)) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(cleanup)) => Err(Error::Cleanup(cleanup)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup)) => Err(e.with_cleanup(cleanup)),
    }
}

/// Loads the recipe at `recipe_path` and cooks it in `root`.
pub fn cook(root: &Path, recipe_path: &Path, options: &CookOptions) -> Result<()> {
    info!(phase = %CookPhase::ValidatingRecipe, recipe = %recipe_path.display(), "Cook phase");
    let recipe = Recipe::read(recipe_path)?;
    cook_recipe(root, &recipe, options)?;
    info!(
        groups = recipe.import_groups.len(),
        packages = recipe.package_count(),
        "Dependencies built"
    );
    Ok(())
}
