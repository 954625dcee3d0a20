//! The recipe artifact
//!
//! A recipe captures the external import closure of a module, split by build
//! constraint, together with the verbatim go.mod and go.sum it was prepared
//! against. The serialized form is compact JSON:
//!
//! ```json
//! {"importGroups":[{"packages":["fmt"]},{"buildConstraints":"linux","packages":["golang.org/x/sys/unix"]}],"go.mod":"...","go.sum":"..."}
//! ```
//!
//! Serialization is byte-stable for equal recipes.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "importGroups", deserialize_with = "null_as_empty")]
    pub import_groups: Vec<ImportGroup>,

    #[serde(rename = "go.mod")]
    pub go_mod: String,

    #[serde(rename = "go.sum")]
    pub go_sum: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportGroup {
    /// Empty means the group applies unconditionally
    #[serde(
        rename = "buildConstraints",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub build_constraints: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub packages: Vec<String>,
}

impl ImportGroup {
    pub fn is_unconstrained(&self) -> bool {
        self.build_constraints.is_empty()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Recipe {
    pub fn to_json(&self) -> Vec<u8> {
        // Plain strings and vectors only, serialization cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Parses and structurally validates a recipe. `origin` is only used in errors.
    pub fn from_json(bytes: &[u8], origin: &Path) -> Result<Self> {
        let recipe: Recipe = serde_json::from_slice(bytes).map_err(|e| Error::RecipeFormat {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        recipe.validate(origin)?;
        Ok(recipe)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |message: String| Error::RecipeFormat {
            path: origin.to_path_buf(),
            message,
        };

        for (idx, group) in self.import_groups.iter().enumerate() {
            if group.build_constraints.contains(['\n', '\r']) {
                return Err(invalid(format!(
                    "import group {} has a multi-line build constraint",
                    idx
                )));
            }
            if group.packages.iter().any(|pkg| pkg.is_empty()) {
                return Err(invalid(format!(
                    "import group {} contains an empty package path",
                    idx
                )));
            }
        }
        Ok(())
    }

    pub fn package_count(&self) -> usize {
        self.import_groups.iter().map(|g| g.packages.len()).sum()
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::io("read recipe at", path, e))?;
        let recipe = Self::from_json(&bytes, path)?;
        debug!(
            path = %path.display(),
            groups = recipe.import_groups.len(),
            packages = recipe.package_count(),
            "Loaded recipe"
        );
        Ok(recipe)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()).map_err(|e| Error::io("write recipe to file", path, e))
    }
}
