mod collection;
mod recipe;

pub use collection::{category_title, RecipeCollection, DEFAULT_CATEGORIES};
pub use recipe::{parse_ingredients, Recipe, NO_RECIPES_YET};
