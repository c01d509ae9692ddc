//! Recipe persistence.
//!
//! This module owns the on-disk representation of a [`RecipeCollection`]: a
//! single JSON object mapping category names to arrays of recipes. Every
//! mutation goes through [`RecipeStore`], which writes the whole collection
//! back to disk before returning, so the file never lags behind memory.

use crate::config::StoreConfig;
use crate::model::{Recipe, RecipeCollection};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when reading or changing the recipe collection.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Please fill out both the recipe name and its ingredients.")]
    Validation,

    #[error("Unknown recipe category: {0}")]
    UnknownCategory(String),

    #[error("No recipe at position {index} in {category} (it has {len})")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },

    #[error("Recipes file {path} is not valid: {source}")]
    Corrupt {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode recipes: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to access recipes file: {0}")]
    IoError(#[from] io::Error),
}

/// A JSON file holding every category and its recipes.
///
/// # Examples
///
/// ```no_run
/// use meal_planner::RecipeStore;
///
/// let store = RecipeStore::new("recipes.json");
/// let mut recipes = store.load()?;
/// store.add_recipe(&mut recipes, "30_min", "Chili", "Beans, Tomato, Beef")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecipeStore {
    path: Utf8PathBuf,
}

impl RecipeStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        RecipeStore { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.recipes_file.clone())
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads the collection from disk.
    ///
    /// A missing file is a first run: the default categories are written out
    /// and returned. A file that exists but does not hold a collection is
    /// reported as [`StoreError::Corrupt`] and left untouched.
    pub fn load(&self) -> Result<RecipeCollection, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path, "recipes file missing, creating defaults");
                let collection = RecipeCollection::default();
                self.save(&collection)?;
                return Ok(collection);
            }
            Err(e) => return Err(StoreError::IoError(e)),
        };

        let collection: RecipeCollection =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            path = %self.path,
            categories = collection.len(),
            recipes = collection.recipe_count(),
            "loaded recipes"
        );
        Ok(collection)
    }

    /// Overwrites the file with the whole collection.
    ///
    /// The JSON is written to a temporary file next to the target and then
    /// renamed over it, so readers see either the old or the new contents.
    /// The replacement keeps the old file's permissions, and a symlinked
    /// recipes file is written through to the file it points at.
    pub fn save(&self, collection: &RecipeCollection) -> Result<(), StoreError> {
        let encoded = encode(collection)?;
        let target = self.write_target()?;

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&encoded)?;
        match fs::metadata(&target) {
            Ok(metadata) => file.as_file().set_permissions(metadata.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::IoError(e)),
        }
        file.as_file().sync_all()?;
        file.persist(&target).map_err(|e| StoreError::IoError(e.error))?;

        debug!(path = %self.path, categories = collection.len(), "saved recipes");
        Ok(())
    }

    fn write_target(&self) -> Result<PathBuf, StoreError> {
        match fs::canonicalize(&self.path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(self.path.clone().into_std_path_buf())
            }
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    /// Appends a recipe to the end of `category` and persists the collection.
    ///
    /// `name` is trimmed and `ingredients_text` is split on commas. Both must
    /// be non-empty after trimming; otherwise nothing changes and
    /// [`StoreError::Validation`] is returned.
    pub fn add_recipe(
        &self,
        collection: &mut RecipeCollection,
        category: &str,
        name: &str,
        ingredients_text: &str,
    ) -> Result<Recipe, StoreError> {
        let recipe = validated_recipe(name, ingredients_text)?;
        let recipes = category_mut(collection, category)?;
        recipes.push(recipe.clone());

        if let Err(e) = self.save(collection) {
            if let Some(recipes) = collection.recipes_mut(category) {
                recipes.pop();
            }
            return Err(e);
        }

        info!(category, name = %recipe.name, "added recipe");
        Ok(recipe)
    }

    /// Removes the recipe at `index` in `category`, persists, and returns it.
    pub fn delete_recipe(
        &self,
        collection: &mut RecipeCollection,
        category: &str,
        index: usize,
    ) -> Result<Recipe, StoreError> {
        let recipes = category_mut(collection, category)?;
        check_index(category, index, recipes)?;
        let removed = recipes.remove(index);

        if let Err(e) = self.save(collection) {
            if let Some(recipes) = collection.recipes_mut(category) {
                recipes.insert(index, removed);
            }
            return Err(e);
        }

        info!(category, index, name = %removed.name, "deleted recipe");
        Ok(removed)
    }

    /// Replaces the recipe at `index` in `category` and persists.
    ///
    /// Applies the same trimming, splitting and presence checks as
    /// [`RecipeStore::add_recipe`]. Keys the file carried besides `name` and
    /// `ingredients` are kept. Every other recipe is left as it was.
    pub fn update_recipe(
        &self,
        collection: &mut RecipeCollection,
        category: &str,
        index: usize,
        name: &str,
        ingredients_text: &str,
    ) -> Result<Recipe, StoreError> {
        let mut recipe = validated_recipe(name, ingredients_text)?;
        let recipes = category_mut(collection, category)?;
        check_index(category, index, recipes)?;
        recipe.extra = recipes[index].extra.clone();
        let previous = std::mem::replace(&mut recipes[index], recipe.clone());

        if let Err(e) = self.save(collection) {
            if let Some(recipes) = collection.recipes_mut(category) {
                recipes[index] = previous;
            }
            return Err(e);
        }

        info!(category, index, name = %recipe.name, "updated recipe");
        Ok(recipe)
    }

    /// Category keys in collection order.
    pub fn categories(&self, collection: &RecipeCollection) -> Vec<String> {
        collection.category_names()
    }
}

/// Looks up a single recipe, reporting which part of the address is stale.
pub fn recipe_at<'a>(
    collection: &'a RecipeCollection,
    category: &str,
    index: usize,
) -> Result<&'a Recipe, StoreError> {
    let recipes = collection
        .recipes(category)
        .ok_or_else(|| StoreError::UnknownCategory(category.to_string()))?;
    check_index(category, index, recipes)?;
    Ok(&recipes[index])
}

fn category_mut<'a>(
    collection: &'a mut RecipeCollection,
    category: &str,
) -> Result<&'a mut Vec<Recipe>, StoreError> {
    collection.recipes_mut(category).ok_or_else(|| {
        warn!(category, "unknown recipe category");
        StoreError::UnknownCategory(category.to_string())
    })
}

fn check_index(category: &str, index: usize, recipes: &[Recipe]) -> Result<(), StoreError> {
    if index < recipes.len() {
        Ok(())
    } else {
        warn!(category, index, len = recipes.len(), "recipe index out of range");
        Err(StoreError::IndexOutOfRange {
            category: category.to_string(),
            index,
            len: recipes.len(),
        })
    }
}

fn validated_recipe(name: &str, ingredients_text: &str) -> Result<Recipe, StoreError> {
    if name.trim().is_empty() || ingredients_text.trim().is_empty() {
        warn!("rejected recipe with an empty name or ingredient list");
        return Err(StoreError::Validation);
    }
    Ok(Recipe::from_input(name, ingredients_text))
}

fn encode(collection: &RecipeCollection) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    collection
        .serialize(&mut serializer)
        .map_err(StoreError::Encode)?;
    Ok(buf)
}
