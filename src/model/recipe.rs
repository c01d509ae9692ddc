use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name shown for a day whose category has no recipes to draw from.
pub const NO_RECIPES_YET: &str = "No recipes yet!";

/// A named dish with an ordered ingredient list.
///
/// The recipe's position inside its category is its only identity; two
/// recipes with identical fields are still distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    /// Keys found in the recipes file besides `name` and `ingredients`,
    /// written back untouched on every save
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Recipe {
            name: name.into(),
            ingredients,
            extra: IndexMap::new(),
        }
    }

    /// Builds a recipe from raw form input: the name is trimmed and the
    /// ingredients text is split on commas.
    ///
    /// No presence check happens here; see [`crate::store::RecipeStore::add_recipe`].
    pub fn from_input(name: &str, ingredients_text: &str) -> Self {
        Recipe {
            name: name.trim().to_string(),
            ingredients: parse_ingredients(ingredients_text),
            extra: IndexMap::new(),
        }
    }

    /// The stand-in recipe used when a category is empty.
    pub fn placeholder() -> Self {
        Recipe {
            name: NO_RECIPES_YET.to_string(),
            ingredients: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == NO_RECIPES_YET && self.ingredients.is_empty()
    }

    /// Ingredients joined back into the comma-separated form used by the
    /// add and edit forms.
    pub fn ingredients_text(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// Splits comma-separated ingredient text into trimmed pieces.
///
/// Empty pieces and duplicates are kept as they are, so `"a,,a"` yields
/// `["a", "", "a"]`.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split(',').map(|piece| piece.trim().to_string()).collect()
}
