use super::commands::Mode;
use crate::config::GocookConfig;
use crate::cook;
use crate::error::Error;
use crate::prepare;
use std::path::Path;
use tracing::debug;

/// Prints the error once on stderr; the log only gets a debug record of it.
fn report(err: &Error) -> i32 {
    debug!(error = ?err, "gocook failed");
    eprintln!("error: {}", err);
    1
}

pub fn handle_prepare(root: &Path, output: &Path) -> i32 {
    debug!(root = %root.display(), output = %output.display(), "Handling --prepare");
    match prepare::prepare(root, output) {
        Ok(_) => 0,
        Err(e) => report(&e),
    }
}

pub fn handle_cook(root: &Path, recipe: &Path, tags: Option<&str>, config: &GocookConfig) -> i32 {
    debug!(root = %root.display(), recipe = %recipe.display(), "Handling --cook");
    let options = config.cook_options(tags);
    match cook::cook(root, recipe, &options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

/// Runs the selected mode and returns the process exit code.
pub fn run(mode: Mode, root: &Path, config: &GocookConfig) -> i32 {
    if let Err(e) = config.validate() {
        debug!(error = ?e, "Configuration error");
        eprintln!("error: {}", e);
        return 1;
    }

    match mode {
        Mode::Prepare { output } => handle_prepare(root, &output),
        Mode::Cook { recipe, tags } => handle_cook(root, &recipe, tags.as_deref(), config),
    }
}
