use camino::{Utf8Path, Utf8PathBuf};
use std::env;

/// Where the recipes file lives.
///
/// Reads from the `MEAL_PLANNER_RECIPES_FILE` environment variable, falling
/// back to `recipes.json` in the working directory when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the JSON file holding every category and recipe.
    pub recipes_file: Utf8PathBuf,
}

impl StoreConfig {
    /// Environment variable consulted by [`StoreConfig::from_env`].
    pub const ENV_VAR: &str = "MEAL_PLANNER_RECIPES_FILE";

    /// The file used when no environment variable is set.
    pub const DEFAULT_FILE: &str = "recipes.json";

    /// Build a config from the environment.
    ///
    /// Priority: `MEAL_PLANNER_RECIPES_FILE`, then [`Self::DEFAULT_FILE`].
    /// An empty variable counts as unset.
    pub fn from_env() -> Self {
        let recipes_file = env::var(Self::ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_FILE.to_owned());
        Self::new(recipes_file)
    }

    /// Build a config from an explicit path (useful for tests and embedders).
    pub fn new(recipes_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            recipes_file: recipes_file.into(),
        }
    }

    pub fn recipes_file(&self) -> &Utf8Path {
        &self.recipes_file
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
