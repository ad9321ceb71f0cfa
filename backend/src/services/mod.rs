//! Business logic services
//!
//! Services coordinate the pure calculators in `fittrack_shared` with one
//! owner's stored documents.

pub mod nutrition;
pub mod profile;
pub mod progress;
pub mod workout;

pub use nutrition::{NutritionService, WriteContext};
pub use profile::ProfileService;
pub use progress::ProgressService;
pub use workout::WorkoutService;
