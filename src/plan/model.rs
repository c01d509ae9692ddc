use super::Day;
use crate::model::Recipe;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The recipe drawn for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub day: Day,
    /// Category the recipe was drawn from
    pub category: String,
    pub recipe: Recipe,
}

impl fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.day, self.recipe.name)
    }
}

/// One [`PlanEntry`] per day, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    entries: Vec<PlanEntry>,
}

impl WeeklyPlan {
    pub(crate) fn new(entries: Vec<PlanEntry>) -> Self {
        WeeklyPlan { entries }
    }

    pub fn get(&self, day: Day) -> Option<&PlanEntry> {
        self.entries.iter().find(|entry| entry.day == day)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"<Day>: <recipe name>"` for every day.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for WeeklyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl IntoIterator for WeeklyPlan {
    type Item = PlanEntry;
    type IntoIter = std::vec::IntoIter<PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
