//! Per-user session state.
//!
//! A [`Session`] bundles the recipe store, the loaded collection and the
//! single optional edit in progress. Every method performs at most one
//! store mutation and hands the caller whatever it needs to redisplay.
//!
//! ```text
//!            begin_edit                 save_edit / cancel_edit
//!   Idle ──────────────▶ Editing ──────────────────────────────▶ Idle
//!                          │ ▲
//!                          └─┘ begin_edit (replaces the draft)
//! ```

use crate::config::StoreConfig;
use crate::model::{Recipe, RecipeCollection};
use crate::plan::{generate_plan_with_rng, WeekSelection, WeeklyPlan};
use crate::store::{recipe_at, RecipeStore, StoreError};
use rand::Rng;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

mod model;

pub use model::EditSelection;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No recipe is being edited")]
    NotEditing,
}

/// One user's view of the recipe collection.
#[derive(Debug)]
pub struct Session {
    store: RecipeStore,
    collection: RecipeCollection,
    edit: Option<EditSelection>,
}

impl Session {
    /// Loads the collection from `store`, creating the file on first run.
    pub fn open(store: RecipeStore) -> Result<Self, SessionError> {
        let collection = store.load()?;
        Ok(Session {
            store,
            collection,
            edit: None,
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, SessionError> {
        Self::open(RecipeStore::from_config(config))
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn collection(&self) -> &RecipeCollection {
        &self.collection
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.categories(&self.collection)
    }

    /// Re-reads the file, dropping any edit whose target is gone.
    pub fn reload(&mut self) -> Result<&RecipeCollection, SessionError> {
        self.collection = self.store.load()?;
        let vanished = self
            .edit
            .as_ref()
            .is_some_and(|edit| self.collection.get(&edit.category, edit.index).is_none());
        if vanished {
            debug!("edit target vanished on reload");
            self.edit = None;
        }
        Ok(&self.collection)
    }

    pub fn generate_plan(&self, selection: &WeekSelection) -> WeeklyPlan {
        self.generate_plan_with_rng(selection, &mut rand::rng())
    }

    pub fn generate_plan_with_rng<R: Rng + ?Sized>(
        &self,
        selection: &WeekSelection,
        rng: &mut R,
    ) -> WeeklyPlan {
        generate_plan_with_rng(&self.collection, selection, rng)
    }

    pub fn add_recipe(
        &mut self,
        category: &str,
        name: &str,
        ingredients_text: &str,
    ) -> Result<Recipe, SessionError> {
        Ok(self
            .store
            .add_recipe(&mut self.collection, category, name, ingredients_text)?)
    }

    /// Deletes a recipe and keeps the edit session pointing at the right one.
    ///
    /// Deleting the recipe under edit ends the edit. Deleting an earlier
    /// recipe in the same category shifts the edit target down by one.
    pub fn delete_recipe(&mut self, category: &str, index: usize) -> Result<Recipe, SessionError> {
        let removed = self
            .store
            .delete_recipe(&mut self.collection, category, index)?;

        let target = self
            .edit
            .as_ref()
            .filter(|edit| edit.category == category)
            .map(|edit| edit.index.cmp(&index));
        match target {
            Some(Ordering::Equal) => {
                info!(category, index, "edited recipe was deleted, ending edit");
                self.edit = None;
            }
            Some(Ordering::Greater) => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.index -= 1;
                }
            }
            Some(Ordering::Less) | None => {}
        }

        Ok(removed)
    }

    pub fn edit(&self) -> Option<&EditSelection> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Starts editing a recipe, seeding the draft from its stored values.
    ///
    /// Any edit already in progress is replaced without warning.
    pub fn begin_edit(
        &mut self,
        category: &str,
        index: usize,
    ) -> Result<&EditSelection, SessionError> {
        let recipe = recipe_at(&self.collection, category, index)?;
        let selection = EditSelection::new(category, index, recipe);
        debug!(category, index, "editing recipe");
        Ok(self.edit.insert(selection))
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        let edit = self.edit.as_mut().ok_or(SessionError::NotEditing)?;
        edit.name = name.into();
        Ok(())
    }

    pub fn set_draft_ingredients(
        &mut self,
        ingredients: impl Into<String>,
    ) -> Result<(), SessionError> {
        let edit = self.edit.as_mut().ok_or(SessionError::NotEditing)?;
        edit.ingredients = ingredients.into();
        Ok(())
    }

    /// Writes the draft back through the store and returns to idle.
    ///
    /// A blank draft is rejected and the edit stays open so it can be fixed.
    /// If the target no longer exists the edit is dropped and the stale
    /// index is reported.
    pub fn save_edit(&mut self) -> Result<Recipe, SessionError> {
        let edit = self.edit.as_ref().ok_or(SessionError::NotEditing)?;
        let result = self.store.update_recipe(
            &mut self.collection,
            &edit.category,
            edit.index,
            &edit.name,
            &edit.ingredients,
        );

        match result {
            Ok(recipe) => {
                self.edit = None;
                Ok(recipe)
            }
            Err(e @ (StoreError::IndexOutOfRange { .. } | StoreError::UnknownCategory(_))) => {
                self.edit = None;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Throws the draft away without touching the store.
    pub fn cancel_edit(&mut self) -> Option<EditSelection> {
        self.edit.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn open_session(dir: &TempDir) -> Session {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("recipes.json")).unwrap();
        fs::write(
            &path,
            indoc! {r#"
                {
                    "under_20_min": [
                        {"name": "Eggs", "ingredients": ["Eggs", "Salt"]},
                        {"name": "Toast", "ingredients": ["Bread", "Butter"]},
                        {"name": "Salad", "ingredients": ["Lettuce"]}
                    ],
                    "30_min": [],
                    "batch_cooking": []
                }"#},
        )
        .unwrap();
        Session::from_config(&StoreConfig::new(path)).unwrap()
    }

    #[test]
    fn test_open_fresh_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("recipes.json")).unwrap();

        let session = Session::open(RecipeStore::new(path.clone())).unwrap();
        assert_eq!(session.collection(), &RecipeCollection::default());
        assert!(!session.is_editing());
        assert!(path.exists());
    }

    #[test]
    fn test_begin_edit_seeds_draft() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        let edit = session.begin_edit("under_20_min", 1).unwrap();
        assert_eq!(edit.category, "under_20_min");
        assert_eq!(edit.index, 1);
        assert_eq!(edit.name, "Toast");
        assert_eq!(edit.ingredients, "Bread, Butter");
    }

    #[test]
    fn test_begin_edit_replaces_previous_draft() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        session.begin_edit("under_20_min", 0).unwrap();
        session.set_draft_name("Scrambled Eggs").unwrap();
        session.begin_edit("under_20_min", 2).unwrap();

        let edit = session.edit().unwrap();
        assert_eq!(edit.index, 2);
        assert_eq!(edit.name, "Salad");
    }

    #[test]
    fn test_begin_edit_stale_index() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        let result = session.begin_edit("under_20_min", 9);
        assert!(matches!(
            result,
            Err(SessionError::Store(StoreError::IndexOutOfRange { .. }))
        ));
        assert!(!session.is_editing());
    }

    #[test]
    fn test_save_edit_updates_and_clears() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        session.begin_edit("under_20_min", 0).unwrap();
        session.set_draft_name("  Scrambled Eggs ").unwrap();
        session.set_draft_ingredients("Eggs, Butter , Salt").unwrap();
        let saved = session.save_edit().unwrap();

        assert_eq!(saved.name, "Scrambled Eggs");
        assert_eq!(saved.ingredients, vec!["Eggs", "Butter", "Salt"]);
        assert!(!session.is_editing());
        assert_eq!(session.collection().get("under_20_min", 0), Some(&saved));
        assert_eq!(session.store().load().unwrap(), *session.collection());
    }

    #[test]
    fn test_save_edit_blank_draft_keeps_editing() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        session.begin_edit("under_20_min", 0).unwrap();
        session.set_draft_name("   ").unwrap();
        let result = session.save_edit();

        assert!(matches!(result, Err(SessionError::Store(StoreError::Validation))));
        assert!(session.is_editing());
        assert_eq!(session.collection().get("under_20_min", 0).unwrap().name, "Eggs");
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);
        let before = session.collection().clone();

        session.begin_edit("under_20_min", 0).unwrap();
        session.set_draft_name("Something else").unwrap();
        let cancelled = session.cancel_edit().unwrap();

        assert_eq!(cancelled.name, "Something else");
        assert!(!session.is_editing());
        assert_eq!(session.collection(), &before);
        assert_eq!(session.store().load().unwrap(), before);
    }

    #[test]
    fn test_idle_operations_report_not_editing() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        assert!(matches!(session.save_edit(), Err(SessionError::NotEditing)));
        assert!(matches!(session.set_draft_name("x"), Err(SessionError::NotEditing)));
        assert!(matches!(
            session.set_draft_ingredients("x"),
            Err(SessionError::NotEditing)
        ));
        assert!(session.cancel_edit().is_none());
    }

    #[test]
    fn test_deleting_edited_recipe_ends_edit() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        session.begin_edit("under_20_min", 1).unwrap();
        session.delete_recipe("under_20_min", 1).unwrap();

        assert!(!session.is_editing());
        assert!(matches!(session.save_edit(), Err(SessionError::NotEditing)));
    }

    #[test]
    fn test_deleting_earlier_recipe_shifts_edit() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);

        session.begin_edit("under_20_min", 2).unwrap();
        session.set_draft_name("Green Salad").unwrap();
        session.delete_recipe("under_20_min", 0).unwrap();

        assert_eq!(session.edit().unwrap().index, 1);
        let saved = session.save_edit().unwrap();
        assert_eq!(saved.name, "Green Salad");
        assert_eq!(session.collection().get("under_20_min", 1), Some(&saved));
        assert_eq!(session.collection().get("under_20_min", 0).unwrap().name, "Toast");
    }

    #[test]
    fn test_deleting_later_or_other_category_keeps_edit() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);
        session.add_recipe("30_min", "Chili", "Beans").unwrap();

        session.begin_edit("under_20_min", 0).unwrap();
        session.delete_recipe("under_20_min", 2).unwrap();
        session.delete_recipe("30_min", 0).unwrap();

        assert_eq!(session.edit().unwrap().index, 0);
        assert_eq!(session.edit().unwrap().name, "Eggs");
    }

    #[test]
    fn test_save_edit_after_external_removal_drops_edit() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);
        session.begin_edit("under_20_min", 2).unwrap();

        // Another writer trims the category; the in-memory copy is refreshed.
        let mut other = session.store().load().unwrap();
        session.store().delete_recipe(&mut other, "under_20_min", 2).unwrap();
        session.collection = other;

        let result = session.save_edit();
        assert!(matches!(
            result,
            Err(SessionError::Store(StoreError::IndexOutOfRange { index: 2, .. }))
        ));
        assert!(!session.is_editing());
    }

    #[test]
    fn test_reload_drops_vanished_edit() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);
        session.begin_edit("under_20_min", 2).unwrap();

        let mut other = session.store().load().unwrap();
        session.store().delete_recipe(&mut other, "under_20_min", 2).unwrap();

        session.reload().unwrap();
        assert!(!session.is_editing());
        assert_eq!(session.collection().recipes("under_20_min").unwrap().len(), 2);
    }

    #[test]
    fn test_add_and_plan() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(&temp_dir);
        session
            .add_recipe("30_min", "Chili", "Beans, Tomato, Beef")
            .unwrap();

        let plan = session.generate_plan(&WeekSelection::uniform("30_min"));
        assert!(plan.iter().all(|entry| entry.recipe.name == "Chili"));
        assert_eq!(plan.lines()[6], "Sunday: Chili");
    }
}
