use crate::golang::SourceHeader;
use crate::recipe::ImportGroup;
use std::collections::{BTreeMap, BTreeSet};

/// Accumulates import paths per build constraint over one prepare run.
///
/// Imports of packages inside the module itself (`<module>/...`) are dropped.
/// An import of the bare module path is kept.
#[derive(Debug)]
pub struct ImportsBuilder {
    module_prefix: String,
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl ImportsBuilder {
    pub fn new(module_path: &str) -> Self {
        Self {
            module_prefix: format!("{}/", module_path),
            groups: BTreeMap::new(),
        }
    }

    pub fn is_self_import(&self, path: &str) -> bool {
        path.starts_with(&self.module_prefix)
    }

    /// Records one file's imports. Files without imports leave no trace, not
    /// even an empty group for their constraint.
    pub fn add_file(&mut self, header: &SourceHeader) {
        if header.imports.is_empty() {
            return;
        }

        let external: Vec<String> = header
            .imports
            .iter()
            .filter(|path| !self.is_self_import(path))
            .cloned()
            .collect();
        self.groups
            .entry(header.build_constraint.clone())
            .or_default()
            .extend(external);
    }

    /// Groups ordered by constraint (unconstrained first), packages sorted.
    pub fn finish(self) -> Vec<ImportGroup> {
        self.groups
            .into_iter()
            .map(|(build_constraints, packages)| ImportGroup {
                build_constraints,
                packages: packages.into_iter().collect(),
            })
            .collect()
    }
}
