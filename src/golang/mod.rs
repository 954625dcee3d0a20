//! Go toolchain conventions: file names, constraint comments and source parsing

pub mod header;
pub mod literal;
pub mod modfile;

pub use header::{parse_header, parse_header_bytes, HeaderError, SourceHeader};
pub use modfile::{parse_module_path, ModFileError};

/// Module descriptor file name
pub const GO_MOD: &str = "go.mod";

/// Checksum lock file name
pub const GO_SUM: &str = "go.sum";

/// Extension of source files, without the dot
pub const SOURCE_EXTENSION: &str = "go";

/// Prefix of a build constraint line comment, including the separating space
pub const BUILD_CONSTRAINT_PREFIX: &str = "//go:build ";

/// Package every synthesized file belongs to
pub const SYNTHETIC_PACKAGE: &str = "main";
