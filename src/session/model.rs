use crate::model::Recipe;
use serde::{Deserialize, Serialize};

/// The recipe being edited and its unsaved draft.
///
/// Only lives in memory; it is never written to the recipes file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSelection {
    pub category: String,
    pub index: usize,
    /// Draft name, untrimmed
    pub name: String,
    /// Draft ingredients as comma-separated text
    pub ingredients: String,
}

impl EditSelection {
    pub(crate) fn new(category: &str, index: usize, recipe: &Recipe) -> Self {
        EditSelection {
            category: category.to_string(),
            index,
            name: recipe.name.clone(),
            ingredients: recipe.ingredients_text(),
        }
    }
}
