use super::recipe::Recipe;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Categories created on first run, in display order.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["under_20_min", "30_min", "batch_cooking"];

/// All recipes, grouped by category.
///
/// Category order is the order found in the recipes file (or
/// [`DEFAULT_CATEGORIES`] for a fresh collection) and is preserved when the
/// collection is written back. Within a category, order is insertion order
/// and the index is the key used for editing and deleting.
///
/// # Examples
///
/// ```
/// use meal_planner::RecipeCollection;
///
/// let collection = RecipeCollection::default();
/// assert_eq!(collection.category_names(), vec!["under_20_min", "30_min", "batch_cooking"]);
/// assert!(collection.recipes("30_min").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeCollection {
    categories: IndexMap<String, Vec<Recipe>>,
}

impl Default for RecipeCollection {
    fn default() -> Self {
        RecipeCollection {
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }
}

impl RecipeCollection {
    /// Builds a collection from `(category, recipes)` pairs, keeping their order.
    pub fn from_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Recipe>)>,
        S: Into<String>,
    {
        RecipeCollection {
            categories: categories
                .into_iter()
                .map(|(name, recipes)| (name.into(), recipes))
                .collect(),
        }
    }

    /// Category keys in collection order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn first_category(&self) -> Option<&str> {
        self.categories.keys().next().map(String::as_str)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Recipes of a category, or `None` if the category does not exist.
    pub fn recipes(&self, category: &str) -> Option<&[Recipe]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn get(&self, category: &str, index: usize) -> Option<&Recipe> {
        self.categories.get(category)?.get(index)
    }

    /// Iterates `(category, recipes)` in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Recipe])> {
        self.categories
            .iter()
            .map(|(name, recipes)| (name.as_str(), recipes.as_slice()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of recipes across all categories.
    pub fn recipe_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub(crate) fn recipes_mut(&mut self, category: &str) -> Option<&mut Vec<Recipe>> {
        self.categories.get_mut(category)
    }
}

/// Human readable title for a category key: underscores become spaces and
/// every word is capitalised, so `"under_20_min"` becomes `"Under 20 Min"`.
pub fn category_title(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn eggs() -> Recipe {
        Recipe::new("Eggs", vec!["Eggs".into(), "Salt".into()])
    }

    #[test]
    fn test_default_categories() {
        let collection = RecipeCollection::default();
        assert_eq!(collection.len(), 3);
        assert_eq!(
            collection.categories().collect::<Vec<_>>(),
            vec!["under_20_min", "30_min", "batch_cooking"]
        );
        assert_eq!(collection.first_category(), Some("under_20_min"));
        assert_eq!(collection.recipe_count(), 0);
    }

    #[test]
    fn test_lookup() {
        let collection =
            RecipeCollection::from_categories([("under_20_min", vec![eggs()]), ("30_min", vec![])]);
        assert_eq!(collection.get("under_20_min", 0), Some(&eggs()));
        assert_eq!(collection.get("under_20_min", 1), None);
        assert_eq!(collection.get("missing", 0), None);
        assert!(collection.recipes("missing").is_none());
        assert!(collection.contains_category("30_min"));
    }

    #[test]
    fn test_deserialize_keeps_file_order() {
        let json = indoc! {r#"
            {
                "zebra": [],
                "batch_cooking": [],
                "alpha": [{"name": "Eggs", "ingredients": ["Eggs", "Salt"]}]
            }"#};

        let collection: RecipeCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.category_names(), vec!["zebra", "batch_cooking", "alpha"]);
        assert_eq!(collection.recipes("alpha").unwrap(), &[eggs()]);

        let written = serde_json::to_string(&collection).unwrap();
        assert!(written.find("zebra").unwrap() < written.find("alpha").unwrap());
    }

    #[test]
    fn test_deserialize_rejects_wrong_shape() {
        let result = serde_json::from_str::<RecipeCollection>(r#"{"30_min": [{"title": "x"}]}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<RecipeCollection>(r#"["30_min"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_title() {
        assert_eq!(category_title("under_20_min"), "Under 20 Min");
        assert_eq!(category_title("30_min"), "30 Min");
        assert_eq!(category_title("batch_cooking"), "Batch Cooking");
        assert_eq!(category_title("SOUP"), "Soup");
    }
}
