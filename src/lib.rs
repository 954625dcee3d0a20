//! gocook - deterministic Go dependency recipes for container builds
//!
//! A Go container build normally copies the whole source tree before running
//! `go build`, so every source edit invalidates the layer that downloads and
//! compiles dependencies. gocook splits that work in two phases:
//!
//! - **Prepare** walks the module, reads the header of every `.go` file and
//!   records the external imports grouped by `//go:build` constraint, together
//!   with go.mod and go.sum, in a recipe. The recipe is byte-for-byte stable as
//!   long as the import set does not change.
//! - **Cook** runs in a later build stage with only the recipe. It writes
//!   go.mod and go.sum back, generates a program that blank-imports every
//!   recorded package, runs `go build` on it and removes the generated files.
//!
//! # Example Usage
//!
//! ```no_run
//! use gocook::{cook, prepare, CookOptions};
//! use std::path::Path;
//!
//! # fn main() -> gocook::Result<()> {
//! let recipe = prepare::prepare(Path::new("."), Path::new("recipe.json"))?;
//! println!("{} import groups", recipe.import_groups.len());
//!
//! cook::cook(Path::new("/build"), Path::new("recipe.json"), &CookOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`golang`]: header and go.mod parsing, string literal handling
//! - [`prepare`]: source walk and import aggregation
//! - [`recipe`]: the serialized recipe
//! - [`cook`]: source synthesis and the `go build` invocation

pub mod cli;
pub mod config;
pub mod cook;
pub mod error;
pub mod golang;
pub mod prepare;
pub mod recipe;
pub mod util;

pub use config::{ConfigError, GocookConfig};
pub use cook::{CookOptions, CookPhase};
pub use error::{CleanupError, Error, Result};
pub use prepare::{ImportsBuilder, SourceWalker};
pub use recipe::{ImportGroup, Recipe};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
