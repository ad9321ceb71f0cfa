//! Static reference data: foods, recipes, exercises and workout templates
//!
//! The tables are built once per process and shared read-only. Logged
//! entries reference them by id.

use crate::models::{Equipment, ExperienceLevel};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Foods
// ============================================================================

/// Food category used for browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Fruits,
    Vegetables,
    Proteins,
    Grains,
    Dairy,
    Fats,
    Snacks,
    Beverages,
}

impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fruits" => Ok(FoodCategory::Fruits),
            "vegetables" => Ok(FoodCategory::Vegetables),
            "proteins" => Ok(FoodCategory::Proteins),
            "grains" => Ok(FoodCategory::Grains),
            "dairy" => Ok(FoodCategory::Dairy),
            "fats" => Ok(FoodCategory::Fats),
            "snacks" => Ok(FoodCategory::Snacks),
            "beverages" => Ok(FoodCategory::Beverages),
            _ => Err(format!("Unknown food category: {}", s)),
        }
    }
}

/// A named household portion, e.g. "1 medium" = 182 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    pub name: String,
    pub grams: f64,
}

/// Nutrient values per declared serving size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub category: FoodCategory,
    pub serving_size_g: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_portions: Vec<Portion>,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub food_id: String,
    pub quantity_g: f64,
}

/// A recipe composed from catalog foods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub servings: f64,
    pub ingredients: Vec<RecipeIngredient>,
}

// ============================================================================
// Exercises
// ============================================================================

/// Exercise category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Sports,
}

impl FromStr for ExerciseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" => Ok(ExerciseCategory::Strength),
            "cardio" => Ok(ExerciseCategory::Cardio),
            "flexibility" => Ok(ExerciseCategory::Flexibility),
            "sports" => Ok(ExerciseCategory::Sports),
            _ => Err(format!("Unknown exercise category: {}", s)),
        }
    }
}

/// Effort level for duration-based exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

/// Exercise reference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_groups: Vec<String>,
    /// Every tag listed here must be available to perform the exercise
    pub equipment: Vec<Equipment>,
    pub difficulty: ExperienceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_rest_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    pub calories_per_minute: f64,
}

impl Exercise {
    pub fn targets_muscle(&self, muscle: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|m| m.eq_ignore_ascii_case(muscle))
    }
}

/// Exercise line in a template, overriding the exercise defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
    pub exercise_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

/// Ordered list of exercises for a ready-made workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exercises: Vec<TemplateExercise>,
}

// ============================================================================
// Catalog
// ============================================================================

/// Read-only lookup tables
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    foods: Vec<Food>,
    recipes: Vec<Recipe>,
    exercises: Vec<Exercise>,
    templates: Vec<WorkoutTemplate>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(builtin_foods(), builtin_recipes(), builtin_exercises(), builtin_templates())
});

impl Catalog {
    pub fn new(
        foods: Vec<Food>,
        recipes: Vec<Recipe>,
        exercises: Vec<Exercise>,
        templates: Vec<WorkoutTemplate>,
    ) -> Self {
        Self {
            foods,
            recipes,
            exercises,
            templates,
        }
    }

    /// The tables bundled with the application, built on first use
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn food(&self, id: &str) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }

    /// Case-insensitive substring match on name or id
    pub fn search_foods(&self, query: &str) -> Vec<&Food> {
        let query = query.trim().to_lowercase();
        self.foods
            .iter()
            .filter(|f| matches_query(&f.name, &f.id, &query))
            .collect()
    }

    pub fn foods_by_category(&self, category: FoodCategory) -> Vec<&Food> {
        self.foods.iter().filter(|f| f.category == category).collect()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Case-insensitive substring match on name or id
    pub fn search_exercises(&self, query: &str) -> Vec<&Exercise> {
        let query = query.trim().to_lowercase();
        self.exercises
            .iter()
            .filter(|e| matches_query(&e.name, &e.id, &query))
            .collect()
    }

    pub fn exercises_by_category(&self, category: ExerciseCategory) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn exercises_by_muscle_group(&self, muscle: &str) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.targets_muscle(muscle))
            .collect()
    }

    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }
}

fn matches_query(name: &str, id: &str, query_lower: &str) -> bool {
    query_lower.is_empty()
        || name.to_lowercase().contains(query_lower)
        || id.contains(query_lower)
}

// ============================================================================
// Built-in tables
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn food(
    id: &str,
    name: &str,
    category: FoodCategory,
    serving_size_g: f64,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    fiber_g: Option<f64>,
    sugar_g: Option<f64>,
    portions: &[(&str, f64)],
) -> Food {
    Food {
        id: id.to_string(),
        name: name.to_string(),
        category,
        serving_size_g,
        calories,
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
        sugar_g,
        common_portions: portions
            .iter()
            .map(|(name, grams)| Portion {
                name: name.to_string(),
                grams: *grams,
            })
            .collect(),
    }
}

fn builtin_foods() -> Vec<Food> {
    use FoodCategory::*;
    vec![
        food("apple", "Apple", Fruits, 100.0, 52.0, 0.3, 14.0, 0.2, Some(2.4), Some(10.4), &[("1 medium", 182.0)]),
        food("banana", "Banana", Fruits, 100.0, 89.0, 1.1, 22.8, 0.3, Some(2.6), Some(12.2), &[("1 medium", 118.0)]),
        food("blueberries", "Blueberries", Fruits, 100.0, 57.0, 0.7, 14.5, 0.3, Some(2.4), Some(10.0), &[("1 cup", 148.0)]),
        food("broccoli", "Broccoli", Vegetables, 100.0, 34.0, 2.8, 6.6, 0.4, Some(2.6), Some(1.7), &[("1 cup chopped", 91.0)]),
        food("spinach", "Spinach", Vegetables, 100.0, 23.0, 2.9, 3.6, 0.4, Some(2.2), Some(0.4), &[("1 cup raw", 30.0)]),
        food("sweet-potato", "Sweet Potato", Vegetables, 100.0, 86.0, 1.6, 20.1, 0.1, Some(3.0), Some(4.2), &[("1 medium", 130.0)]),
        food("chicken-breast", "Chicken Breast", Proteins, 100.0, 165.0, 31.0, 0.0, 3.6, None, None, &[("1 breast", 172.0)]),
        food("salmon", "Salmon Fillet", Proteins, 100.0, 208.0, 20.0, 0.0, 13.0, None, None, &[("1 fillet", 154.0)]),
        food("egg", "Egg", Proteins, 50.0, 72.0, 6.3, 0.4, 4.8, None, Some(0.2), &[("1 large", 50.0)]),
        food("tofu", "Firm Tofu", Proteins, 100.0, 76.0, 8.0, 1.9, 4.8, Some(0.3), None, &[]),
        food("lentils", "Lentils (cooked)", Proteins, 100.0, 116.0, 9.0, 20.1, 0.4, Some(7.9), Some(1.8), &[("1 cup", 198.0)]),
        food("whey-protein", "Whey Protein Powder", Proteins, 30.0, 120.0, 24.0, 3.0, 1.5, None, Some(2.0), &[("1 scoop", 30.0)]),
        food("oats", "Rolled Oats", Grains, 40.0, 150.0, 5.0, 27.0, 2.5, Some(4.0), Some(1.0), &[("1/2 cup", 40.0)]),
        food("brown-rice", "Brown Rice (cooked)", Grains, 100.0, 112.0, 2.3, 23.5, 0.8, Some(1.8), Some(0.4), &[("1 cup", 195.0)]),
        food("white-rice", "White Rice (cooked)", Grains, 100.0, 130.0, 2.7, 28.2, 0.3, Some(0.4), Some(0.1), &[("1 cup", 158.0)]),
        food("whole-wheat-bread", "Whole Wheat Bread", Grains, 28.0, 69.0, 3.6, 12.0, 0.9, Some(1.9), Some(1.6), &[("1 slice", 28.0)]),
        food("greek-yogurt", "Greek Yogurt (plain, nonfat)", Dairy, 170.0, 100.0, 17.0, 6.0, 0.7, None, Some(6.0), &[("1 container", 170.0)]),
        food("milk", "Milk (2%)", Dairy, 244.0, 122.0, 8.1, 11.7, 4.8, None, Some(12.3), &[("1 cup", 244.0)]),
        food("cheddar", "Cheddar Cheese", Dairy, 28.0, 113.0, 7.0, 0.4, 9.3, None, Some(0.1), &[("1 slice", 28.0)]),
        food("avocado", "Avocado", Fats, 100.0, 160.0, 2.0, 8.5, 14.7, Some(6.7), Some(0.7), &[("1/2 fruit", 100.0)]),
        food("olive-oil", "Olive Oil", Fats, 13.5, 119.0, 0.0, 0.0, 13.5, None, None, &[("1 tbsp", 13.5)]),
        food("peanut-butter", "Peanut Butter", Fats, 32.0, 188.0, 8.0, 6.0, 16.0, Some(2.0), Some(3.0), &[("2 tbsp", 32.0)]),
        food("almonds", "Almonds", Snacks, 28.0, 164.0, 6.0, 6.1, 14.2, Some(3.5), Some(1.2), &[("1 handful", 28.0)]),
        food("dark-chocolate", "Dark Chocolate (70%)", Snacks, 28.0, 170.0, 2.2, 13.0, 12.0, Some(3.1), Some(6.8), &[("1 square", 10.0)]),
        food("orange-juice", "Orange Juice", Beverages, 248.0, 112.0, 1.7, 25.8, 0.5, Some(0.5), Some(20.8), &[("1 glass", 248.0)]),
        food("coffee", "Black Coffee", Beverages, 240.0, 2.0, 0.3, 0.0, 0.0, None, None, &[("1 cup", 240.0)]),
    ]
}

fn recipe(id: &str, name: &str, servings: f64, ingredients: &[(&str, f64)]) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        servings,
        ingredients: ingredients
            .iter()
            .map(|(food_id, grams)| RecipeIngredient {
                food_id: food_id.to_string(),
                quantity_g: *grams,
            })
            .collect(),
    }
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "overnight-oats",
            "Overnight Oats",
            1.0,
            &[("oats", 40.0), ("milk", 122.0), ("greek-yogurt", 85.0), ("blueberries", 74.0)],
        ),
        recipe(
            "chicken-rice-bowl",
            "Chicken & Rice Bowl",
            2.0,
            &[
                ("chicken-breast", 250.0),
                ("brown-rice", 300.0),
                ("broccoli", 200.0),
                ("olive-oil", 13.5),
            ],
        ),
        recipe(
            "lentil-spinach-stew",
            "Lentil & Spinach Stew",
            4.0,
            &[("lentils", 600.0), ("spinach", 150.0), ("sweet-potato", 300.0), ("olive-oil", 27.0)],
        ),
    ]
}

struct ExerciseSpec<'a> {
    id: &'a str,
    name: &'a str,
    category: ExerciseCategory,
    muscles: &'a [&'a str],
    equipment: &'a [Equipment],
    difficulty: ExperienceLevel,
    calories_per_minute: f64,
}

impl ExerciseSpec<'_> {
    fn reps(self, sets: u32, reps: &str, rest_seconds: u32) -> Exercise {
        let mut exercise = self.build();
        exercise.default_sets = Some(sets);
        exercise.default_reps = Some(reps.to_string());
        exercise.default_rest_seconds = Some(rest_seconds);
        exercise
    }

    fn timed(self, minutes: u32, intensity: Intensity) -> Exercise {
        let mut exercise = self.build();
        exercise.default_duration_minutes = Some(minutes);
        exercise.intensity = Some(intensity);
        exercise
    }

    fn build(self) -> Exercise {
        Exercise {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            muscle_groups: self.muscles.iter().map(|m| m.to_string()).collect(),
            equipment: self.equipment.to_vec(),
            difficulty: self.difficulty,
            default_sets: None,
            default_reps: None,
            default_rest_seconds: None,
            default_duration_minutes: None,
            intensity: None,
            calories_per_minute: self.calories_per_minute,
        }
    }
}

fn entry<'a>(
    id: &'a str,
    name: &'a str,
    category: ExerciseCategory,
    muscles: &'a [&'a str],
    equipment: &'a [Equipment],
    difficulty: ExperienceLevel,
    calories_per_minute: f64,
) -> ExerciseSpec<'a> {
    ExerciseSpec {
        id,
        name,
        category,
        muscles,
        equipment,
        difficulty,
        calories_per_minute,
    }
}

fn builtin_exercises() -> Vec<Exercise> {
    use Equipment as Eq;
    use ExerciseCategory::*;
    use ExperienceLevel::*;
    vec![
        // Bodyweight strength
        entry("push-up", "Push-up", Strength, &["chest", "triceps", "shoulders"], &[], Beginner, 7.0).reps(3, "10-15", 60),
        entry("bodyweight-squat", "Bodyweight Squat", Strength, &["quadriceps", "glutes"], &[], Beginner, 6.0).reps(3, "12-15", 60),
        entry("lunge", "Walking Lunge", Strength, &["quadriceps", "glutes", "hamstrings"], &[], Beginner, 6.0).reps(3, "10-12", 60),
        entry("glute-bridge", "Glute Bridge", Strength, &["glutes", "hamstrings"], &[], Beginner, 4.0).reps(3, "12-15", 45),
        entry("plank", "Plank", Strength, &["core"], &[], Beginner, 4.0).timed(1, Intensity::Moderate),
        entry("tricep-dip", "Bench Dip", Strength, &["triceps"], &[Eq::Bench], Beginner, 5.0).reps(3, "8-12", 60),
        entry("pull-up", "Pull-up", Strength, &["back", "biceps"], &[Eq::PullUpBar], Intermediate, 8.0).reps(3, "5-8", 90),
        // Free weights
        entry("bench-press", "Barbell Bench Press", Strength, &["chest", "triceps", "shoulders"], &[Eq::Barbell, Eq::Bench], Intermediate, 6.0).reps(4, "6-8", 120),
        entry("barbell-squat", "Barbell Back Squat", Strength, &["quadriceps", "glutes", "core"], &[Eq::Barbell], Intermediate, 8.0).reps(4, "6-8", 150),
        entry("deadlift", "Deadlift", Strength, &["back", "hamstrings", "glutes"], &[Eq::Barbell], Advanced, 8.0).reps(3, "5", 180),
        entry("dumbbell-row", "Dumbbell Row", Strength, &["back", "biceps"], &[Eq::Dumbbells], Beginner, 5.0).reps(3, "8-12", 90),
        entry("dumbbell-press", "Dumbbell Shoulder Press", Strength, &["shoulders", "triceps"], &[Eq::Dumbbells], Beginner, 5.0).reps(3, "8-12", 90),
        entry("dumbbell-curl", "Dumbbell Curl", Strength, &["biceps"], &[Eq::Dumbbells], Beginner, 4.0).reps(3, "10-12", 60),
        entry("goblet-squat", "Goblet Squat", Strength, &["quadriceps", "glutes"], &[Eq::Dumbbells], Beginner, 6.0).reps(3, "10-12", 90),
        entry("kettlebell-swing", "Kettlebell Swing", Strength, &["glutes", "hamstrings", "core"], &[Eq::Kettlebell], Intermediate, 10.0).reps(3, "15-20", 60),
        entry("lat-pulldown", "Lat Pulldown", Strength, &["back", "biceps"], &[Eq::CableMachine], Beginner, 5.0).reps(3, "10-12", 90),
        entry("band-pull-apart", "Band Pull-apart", Strength, &["shoulders", "back"], &[Eq::ResistanceBands], Beginner, 3.0).reps(3, "15-20", 45),
        // Cardio
        entry("burpee", "Burpee", Cardio, &["full body"], &[], Intermediate, 10.0).timed(10, Intensity::High),
        entry("mountain-climber", "Mountain Climber", Cardio, &["core", "shoulders"], &[], Beginner, 8.0).timed(5, Intensity::High),
        entry("jumping-jack", "Jumping Jack", Cardio, &["full body"], &[], Beginner, 8.0).timed(5, Intensity::Moderate),
        entry("brisk-walk", "Brisk Walk", Cardio, &["legs"], &[], Beginner, 4.5).timed(30, Intensity::Low),
        entry("running", "Running", Cardio, &["legs"], &[], Intermediate, 11.0).timed(30, Intensity::Moderate),
        entry("jump-rope", "Jump Rope", Cardio, &["calves", "shoulders"], &[Eq::JumpRope], Beginner, 12.0).timed(10, Intensity::High),
        entry("treadmill-intervals", "Treadmill Intervals", Cardio, &["legs"], &[Eq::Treadmill], Intermediate, 12.0).timed(20, Intensity::High),
        entry("stationary-bike", "Stationary Bike", Cardio, &["legs"], &[Eq::StationaryBike], Beginner, 8.0).timed(30, Intensity::Moderate),
        entry("rowing", "Rowing Machine", Cardio, &["back", "legs", "arms"], &[Eq::RowingMachine], Beginner, 9.0).timed(20, Intensity::Moderate),
        // Flexibility
        entry("yoga-flow", "Yoga Flow", Flexibility, &["full body"], &[Eq::Mat], Beginner, 3.5).timed(20, Intensity::Low),
        entry("hamstring-stretch", "Hamstring Stretch", Flexibility, &["hamstrings"], &[], Beginner, 2.5).timed(5, Intensity::Low),
        entry("hip-flexor-stretch", "Hip Flexor Stretch", Flexibility, &["hips"], &[], Beginner, 2.5).timed(5, Intensity::Low),
        // Sports
        entry("basketball", "Basketball", Sports, &["full body"], &[], Intermediate, 9.0).timed(45, Intensity::High),
        entry("swimming", "Swimming", Sports, &["full body"], &[], Intermediate, 10.0).timed(30, Intensity::Moderate),
    ]
}

fn line(exercise_id: &str, sets: u32, reps: &str, rest_seconds: u32) -> TemplateExercise {
    TemplateExercise {
        exercise_id: exercise_id.to_string(),
        sets: Some(sets),
        reps: Some(reps.to_string()),
        rest_seconds: Some(rest_seconds),
        duration_seconds: None,
    }
}

fn timed_line(exercise_id: &str, sets: u32, duration_seconds: u32, rest_seconds: u32) -> TemplateExercise {
    TemplateExercise {
        exercise_id: exercise_id.to_string(),
        sets: Some(sets),
        reps: None,
        rest_seconds: Some(rest_seconds),
        duration_seconds: Some(duration_seconds),
    }
}

fn builtin_templates() -> Vec<WorkoutTemplate> {
    vec![
        WorkoutTemplate {
            id: "full-body-starter".to_string(),
            name: "Full Body Starter".to_string(),
            description: "Bodyweight circuit for the first weeks of training".to_string(),
            exercises: vec![
                line("push-up", 3, "8-10", 60),
                line("bodyweight-squat", 3, "12-15", 60),
                line("glute-bridge", 3, "12-15", 45),
                timed_line("plank", 3, 30, 45),
            ],
        },
        WorkoutTemplate {
            id: "upper-body-strength".to_string(),
            name: "Upper Body Strength".to_string(),
            description: "Press and pull session with free weights".to_string(),
            exercises: vec![
                line("bench-press", 4, "6-8", 120),
                line("dumbbell-row", 3, "8-12", 90),
                line("dumbbell-press", 3, "8-12", 90),
                line("pull-up", 3, "5-8", 90),
                line("dumbbell-curl", 2, "10-12", 60),
            ],
        },
        WorkoutTemplate {
            id: "lower-body-power".to_string(),
            name: "Lower Body Power".to_string(),
            description: "Heavy squat and hinge day".to_string(),
            exercises: vec![
                line("barbell-squat", 4, "5-6", 150),
                line("deadlift", 3, "5", 180),
                line("lunge", 3, "10-12", 60),
                line("kettlebell-swing", 3, "15", 60),
            ],
        },
        WorkoutTemplate {
            id: "hiit-cardio".to_string(),
            name: "HIIT Cardio".to_string(),
            description: "Short intervals, no equipment".to_string(),
            exercises: vec![
                timed_line("burpee", 4, 40, 20),
                timed_line("mountain-climber", 4, 40, 20),
                timed_line("jumping-jack", 4, 40, 20),
            ],
        },
        WorkoutTemplate {
            id: "mobility-flow".to_string(),
            name: "Mobility Flow".to_string(),
            description: "Recovery day stretching".to_string(),
            exercises: vec![
                timed_line("yoga-flow", 1, 1200, 0),
                timed_line("hamstring-stretch", 2, 60, 15),
                timed_line("hip-flexor-stretch", 2, 60, 15),
            ],
        },
    ]
}
