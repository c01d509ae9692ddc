//! UniFFI bindings for the presentation layer (mobile and desktop shells).
//!
//! Everything here is a thin wrapper over [`Session`] that foreign code can
//! hold across calls.
//! Errors are flattened into [`MealPlannerError`] and indices cross the
//! boundary as `u32`.

use crate::config::StoreConfig;
use crate::model::{category_title, Recipe};
use crate::plan::{Day, PlanEntry, PlanError, WeekSelection};
use crate::session::{EditSelection, Session, SessionError};
use crate::store::{RecipeStore, StoreError};
use std::sync::{Arc, Mutex, MutexGuard};

/// Store, session and day-parsing failures as seen from foreign code, each
/// carrying its display text.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum MealPlannerError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Recipe not found: {message}")]
    IndexOutOfRange { message: String },

    #[error("Unknown category: {message}")]
    UnknownCategory { message: String },

    #[error("Unknown day: {message}")]
    UnknownDay { message: String },

    #[error("Corrupt recipes file: {message}")]
    Corrupt { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Not editing: {message}")]
    NotEditing { message: String },
}

impl From<StoreError> for MealPlannerError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::Validation => MealPlannerError::Validation { message },
            StoreError::UnknownCategory(category) => {
                MealPlannerError::UnknownCategory { message: category }
            }
            StoreError::IndexOutOfRange { .. } => MealPlannerError::IndexOutOfRange { message },
            StoreError::Corrupt { .. } | StoreError::Encode(_) => {
                MealPlannerError::Corrupt { message }
            }
            StoreError::IoError(_) => MealPlannerError::IoError { message },
        }
    }
}

impl From<SessionError> for MealPlannerError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Store(e) => e.into(),
            SessionError::NotEditing => MealPlannerError::NotEditing {
                message: e.to_string(),
            },
        }
    }
}

impl From<PlanError> for MealPlannerError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::UnknownDay(day) => MealPlannerError::UnknownDay { message: day },
        }
    }
}

/// FFI-safe representation of a stored recipe.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    /// Position inside its category; pass it back to edit or delete
    pub index: u32,
    pub name: String,
    pub ingredients: Vec<String>,
}

impl FfiRecipe {
    fn new(index: usize, recipe: &Recipe) -> Self {
        FfiRecipe {
            index: index as u32,
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
        }
    }
}

/// A category with its display title and recipes, in listing order.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCategory {
    pub key: String,
    /// e.g. "Under 20 Min" for "under_20_min"
    pub title: String,
    pub recipes: Vec<FfiRecipe>,
}

/// The category picked for one day.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDaySelection {
    pub day: String,
    pub category: String,
}

/// One line of a generated plan.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPlanEntry {
    pub day: String,
    pub category: String,
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    /// True when the category had nothing to draw from
    pub is_placeholder: bool,
    /// Ready-made "<Day>: <recipe name>" text
    pub line: String,
}

impl From<&PlanEntry> for FfiPlanEntry {
    fn from(entry: &PlanEntry) -> Self {
        FfiPlanEntry {
            day: entry.day.to_string(),
            category: entry.category.clone(),
            recipe_name: entry.recipe.name.clone(),
            ingredients: entry.recipe.ingredients.clone(),
            is_placeholder: entry.recipe.is_placeholder(),
            line: entry.to_string(),
        }
    }
}

/// The edit in progress.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEditDraft {
    pub category: String,
    pub index: u32,
    pub name: String,
    pub ingredients: String,
}

impl From<&EditSelection> for FfiEditDraft {
    fn from(edit: &EditSelection) -> Self {
        FfiEditDraft {
            category: edit.category.clone(),
            index: edit.index as u32,
            name: edit.name.clone(),
            ingredients: edit.ingredients.clone(),
        }
    }
}

/// A recipe session exposed across the FFI boundary.
///
/// Each instance owns its own edit state, so one instance per user session.
/// The mutex only exists because UniFFI objects must be `Send + Sync`.
#[derive(uniffi::Object)]
pub struct MealPlanner {
    session: Mutex<Session>,
}

#[uniffi::export]
impl MealPlanner {
    /// Opens (or creates) the recipes file at `path`.
    #[uniffi::constructor]
    pub fn open(path: String) -> Result<Arc<Self>, MealPlannerError> {
        let session = Session::open(RecipeStore::new(path))?;
        Ok(Arc::new(Self::new(session)))
    }

    /// Opens the recipes file named by `MEAL_PLANNER_RECIPES_FILE`, or
    /// `recipes.json` when unset.
    #[uniffi::constructor]
    pub fn open_default() -> Result<Arc<Self>, MealPlannerError> {
        let session = Session::from_config(&StoreConfig::from_env())?;
        Ok(Arc::new(Self::new(session)))
    }

    /// Returns the path of the backing recipes file.
    pub fn path(&self) -> String {
        self.lock().store().path().to_string()
    }

    /// Returns the category keys in display order.
    pub fn categories(&self) -> Vec<String> {
        self.lock().categories()
    }

    /// Returns every category with its recipes, for the recipe manager view.
    pub fn listing(&self) -> Vec<FfiCategory> {
        self.lock()
            .collection()
            .iter()
            .map(|(key, recipes)| FfiCategory {
                key: key.to_string(),
                title: category_title(key),
                recipes: recipes
                    .iter()
                    .enumerate()
                    .map(|(i, r)| FfiRecipe::new(i, r))
                    .collect(),
            })
            .collect()
    }

    /// Returns the recipes of one category.
    pub fn recipes(&self, category: String) -> Result<Vec<FfiRecipe>, MealPlannerError> {
        let session = self.lock();
        let recipes = session
            .collection()
            .recipes(&category)
            .ok_or(MealPlannerError::UnknownCategory { message: category.clone() })?;
        Ok(recipes
            .iter()
            .enumerate()
            .map(|(i, r)| FfiRecipe::new(i, r))
            .collect())
    }

    /// Adds a recipe and returns the success message to show.
    ///
    /// `ingredients` is comma-separated text, e.g. "Chicken breast, Pasta".
    pub fn add_recipe(
        &self,
        category: String,
        name: String,
        ingredients: String,
    ) -> Result<String, MealPlannerError> {
        let recipe = self.lock().add_recipe(&category, &name, &ingredients)?;
        Ok(format!("Added {} to {}!", recipe.name, category))
    }

    /// Deletes a recipe and returns what was removed.
    pub fn delete_recipe(
        &self,
        category: String,
        index: u32,
    ) -> Result<FfiRecipe, MealPlannerError> {
        let removed = self.lock().delete_recipe(&category, index as usize)?;
        Ok(FfiRecipe::new(index as usize, &removed))
    }

    /// Starts editing a recipe; any previous draft is discarded.
    pub fn begin_edit(
        &self,
        category: String,
        index: u32,
    ) -> Result<FfiEditDraft, MealPlannerError> {
        let mut session = self.lock();
        let edit = session.begin_edit(&category, index as usize)?;
        Ok(FfiEditDraft::from(edit))
    }

    /// Replaces both draft fields of the current edit.
    pub fn set_draft(&self, name: String, ingredients: String) -> Result<(), MealPlannerError> {
        let mut session = self.lock();
        session.set_draft_name(name)?;
        session.set_draft_ingredients(ingredients)?;
        Ok(())
    }

    /// Returns the current edit, if any.
    pub fn current_edit(&self) -> Option<FfiEditDraft> {
        self.lock().edit().map(FfiEditDraft::from)
    }

    /// Saves the current draft and returns the stored recipe.
    pub fn save_edit(&self) -> Result<FfiRecipe, MealPlannerError> {
        let mut session = self.lock();
        let index = session
            .edit()
            .map(|edit| edit.index)
            .ok_or(SessionError::NotEditing)?;
        let recipe = session.save_edit()?;
        Ok(FfiRecipe::new(index, &recipe))
    }

    /// Drops the current draft. Returns false if nothing was being edited.
    pub fn cancel_edit(&self) -> bool {
        self.lock().cancel_edit().is_some()
    }

    /// Re-reads the recipes file.
    pub fn reload(&self) -> Result<(), MealPlannerError> {
        self.lock().reload()?;
        Ok(())
    }

    /// Draws a weekly plan.
    ///
    /// Days missing from `selections` use the first category.
    pub fn generate_plan(
        &self,
        selections: Vec<FfiDaySelection>,
    ) -> Result<Vec<FfiPlanEntry>, MealPlannerError> {
        let session = self.lock();
        let mut week = WeekSelection::for_collection(session.collection());
        for selection in selections {
            let day: Day = selection.day.parse()?;
            week.set(day, selection.category);
        }
        Ok(session
            .generate_plan(&week)
            .iter()
            .map(FfiPlanEntry::from)
            .collect())
    }
}

impl MealPlanner {
    fn new(session: Session) -> Self {
        MealPlanner {
            session: Mutex::new(session),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns the seven day names, Monday first.
#[uniffi::export]
pub fn days() -> Vec<String> {
    Day::ALL.iter().map(|day| day.to_string()).collect()
}

/// Splits comma-separated ingredient text the same way the store does.
#[uniffi::export]
pub fn split_ingredients(text: String) -> Vec<String> {
    crate::model::parse_ingredients(&text)
}

/// Returns the display title of a category key.
#[uniffi::export]
pub fn category_display_title(category: String) -> String {
    category_title(&category)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
