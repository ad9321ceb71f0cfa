//! FitTrack shared library
//!
//! The calculation core: goal and nutrition calculators, the reference
//! catalog, the workout plan generator, log and session aggregation, and
//! the personal-record and achievement tracker. Used by the backend and
//! the WASM bindings. Nothing here performs I/O.

pub mod catalog;
pub mod daily_log;
pub mod errors;
pub mod models;
pub mod nutrition;
pub mod nutrition_goals;
pub mod records;
pub mod stats;
pub mod types;
pub mod validation;
pub mod workout_plan;
pub mod workout_session;

// Re-export commonly used items
pub use catalog::Catalog;
pub use errors::{CoreError, CoreResult};
pub use models::*;
pub use nutrition::NutritionFacts;
pub use nutrition_goals::{generate_goals, MacroSplit, NutritionGoals};
pub use types::*;
