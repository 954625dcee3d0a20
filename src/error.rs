//! Error types for the prepare and cook phases

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Conflicting or missing command-line modes
    #[error("{0}")]
    Usage(String),

    #[error("could not {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not walk dir: {0}")]
    Walk(#[from] ignore::Error),

    /// A `.go` file whose header is not syntactically valid
    #[error("failed to parse file at {}:{line}:{column}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("could not parse {}:{line}: {message}", .path.display())]
    ModFile {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid recipe at {}: {message}", .path.display())]
    RecipeFormat { path: PathBuf, message: String },

    #[error("could not run '{command}': {reason}")]
    Build { command: String, reason: BuildFailure },

    #[error(transparent)]
    Cleanup(#[from] CleanupError),

    /// The build failed and removing the synthesized files failed too
    #[error("{build}\n{cleanup}")]
    BuildAndCleanup {
        build: Box<Error>,
        cleanup: CleanupError,
    },
}

impl Error {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Attaches cleanup failures to an earlier error without discarding either.
    pub fn with_cleanup(self, cleanup: CleanupError) -> Self {
        Error::BuildAndCleanup {
            build: Box::new(self),
            cleanup,
        }
    }
}

#[derive(Debug)]
pub enum BuildFailure {
    Spawn(io::Error),
    Exit(ExitStatus),
}

impl fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildFailure::Spawn(e) => write!(f, "{}", e),
            BuildFailure::Exit(status) => write!(f, "{}", status),
        }
    }
}

/// One synthesized file that could not be removed
#[derive(Debug, Error)]
#[error("could not remove {}: {source}", .path.display())]
pub struct RemovalFailure {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Every removal failure from a single cleanup pass, kept individually
#[derive(Debug, Default)]
pub struct CleanupError {
    failures: Vec<RemovalFailure>,
}

impl CleanupError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, source: io::Error) {
        self.failures.push(RemovalFailure {
            path: path.into(),
            source,
        });
    }

    pub fn failures(&self) -> &[RemovalFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// `Ok` when every removal succeeded.
    pub fn into_result(self) -> std::result::Result<(), CleanupError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for CleanupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for CleanupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|f| f as &(dyn std::error::Error + 'static))
    }
}
