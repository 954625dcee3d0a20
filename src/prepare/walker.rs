use crate::error::Result;
use crate::golang::SOURCE_EXTENSION;
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Enumerates the `.go` files of a source tree.
///
/// Hidden entries (names starting with `.`) are skipped, and hidden
/// directories are pruned with everything below them. Ignore files such as
/// `.gitignore` are not consulted.
pub struct SourceWalker {
    root: PathBuf,
}

impl SourceWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Calls `visit` for every candidate source file, stopping at the first error.
    pub fn walk<F>(&self, mut visit: F) -> Result<usize>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let mut visited = 0;

        for result in WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = result?;
            if entry.depth() == 0 {
                continue;
            }
            let is_dir = entry.file_type().map_or(false, |t| t.is_dir());
            if is_dir {
                continue;
            }
            let is_source = entry.path().extension() == Some(OsStr::new(SOURCE_EXTENSION));
            if !is_source {
                trace!(path = %entry.path().display(), "Skipping non-source file");
                continue;
            }

            visit(entry.path())?;
            visited += 1;
        }

        Ok(visited)
    }

    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(|path| {
            files.push(path.to_path_buf());
            Ok(())
        })?;
        Ok(files)
    }
}
