//! Weekly meal plan generation.
//!
//! A plan assigns one recipe to every day of the week. The caller picks a
//! category per day with a [`WeekSelection`]; [`generate_plan`] then draws a
//! recipe uniformly at random from each chosen category. Draws are
//! independent, so the same recipe may show up on several days.

use crate::model::{Recipe, RecipeCollection};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod model;

pub use model::{PlanEntry, WeeklyPlan};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("Unknown day of the week: {0}")]
    UnknownDay(String),
}

/// The seven fixed days a plan covers, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = PlanError;

    /// Parses a day name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Day::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlanError::UnknownDay(s.to_string()))
    }
}

/// The category chosen for each day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSelection {
    categories: [String; 7],
}

impl WeekSelection {
    /// Every day set to the same category.
    pub fn uniform(category: impl Into<String>) -> Self {
        let category = category.into();
        WeekSelection {
            categories: std::array::from_fn(|_| category.clone()),
        }
    }

    /// The starting selection for a collection: every day on its first
    /// category, which is what an untouched set of day pickers shows.
    pub fn for_collection(collection: &RecipeCollection) -> Self {
        Self::uniform(collection.first_category().unwrap_or_default())
    }

    pub fn set(&mut self, day: Day, category: impl Into<String>) -> &mut Self {
        self.categories[day.position()] = category.into();
        self
    }

    pub fn get(&self, day: Day) -> &str {
        &self.categories[day.position()]
    }

    /// `(day, category)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &str)> {
        Day::ALL
            .into_iter()
            .zip(self.categories.iter().map(String::as_str))
    }
}

/// Draws one recipe per day using the thread-local random generator.
///
/// A day whose category is empty (or missing from the collection) gets
/// [`Recipe::placeholder`] instead. The collection is never modified.
///
/// # Examples
///
/// ```
/// use meal_planner::{generate_plan, RecipeCollection, WeekSelection};
///
/// let recipes = RecipeCollection::default();
/// let plan = generate_plan(&recipes, &WeekSelection::uniform("30_min"));
/// assert!(plan.iter().all(|entry| entry.recipe.is_placeholder()));
/// ```
pub fn generate_plan(collection: &RecipeCollection, selection: &WeekSelection) -> WeeklyPlan {
    generate_plan_with_rng(collection, selection, &mut rand::rng())
}

/// Same as [`generate_plan`], drawing from the supplied random source.
pub fn generate_plan_with_rng<R: Rng + ?Sized>(
    collection: &RecipeCollection,
    selection: &WeekSelection,
    rng: &mut R,
) -> WeeklyPlan {
    let entries = selection
        .iter()
        .map(|(day, category)| {
            let recipe = collection
                .recipes(category)
                .and_then(|recipes| recipes.choose(rng))
                .cloned()
                .unwrap_or_else(Recipe::placeholder);
            PlanEntry {
                day,
                category: category.to_string(),
                recipe,
            }
        })
        .collect();

    WeeklyPlan::new(entries)
}
