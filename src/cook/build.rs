use crate::error::{BuildFailure, Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// `go build` of the synthesized package, with the binary discarded
#[derive(Debug, Clone)]
pub struct GoBuild {
    go_binary: OsString,
    dir: PathBuf,
    tags: Option<String>,
}

impl GoBuild {
    pub fn new(go_binary: impl Into<OsString>, dir: impl Into<PathBuf>) -> Self {
        Self {
            go_binary: go_binary.into(),
            dir: dir.into(),
            tags: None,
        }
    }

    /// Empty tag strings are treated as absent.
    pub fn with_tags(mut self, tags: Option<&str>) -> Self {
        self.tags = tags.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "-o".to_string(),
            NULL_DEVICE.to_string(),
        ];
        if let Some(tags) = &self.tags {
            args.push("-tags".to_string());
            args.push(tags.clone());
        }
        args.push(".".to_string());
        args
    }

    fn display(&self) -> String {
        format!("{} {}", self.go_binary.to_string_lossy(), self.args().join(" "))
    }

    /// Runs the build, inheriting stdout and stderr.
    pub fn run(&self) -> Result<()> {
        let command = self.display();
        info!(command = %command, dir = %self.dir.display(), "Running build");

        let status = Command::new(&self.go_binary)
            .args(self.args())
            .current_dir(&self.dir)
            .status()
            .map_err(|e| Error::Build {
                command: command.clone(),
                reason: BuildFailure::Spawn(e),
            })?;

        debug!(status = %status, "Build finished");
        if status.success() {
            Ok(())
        } else {
            Err(Error::Build {
                command,
                reason: BuildFailure::Exit(status),
            })
        }
    }
}
