uniffi::setup_scaffolding!();

pub mod config;
pub mod ffi;
pub mod model;
pub mod plan;
pub mod session;
pub mod store;

pub use config::StoreConfig;
pub use model::*;
pub use plan::{generate_plan, generate_plan_with_rng, Day, PlanEntry, WeekSelection, WeeklyPlan};
pub use session::{EditSelection, Session, SessionError};
pub use store::{RecipeStore, StoreError};
