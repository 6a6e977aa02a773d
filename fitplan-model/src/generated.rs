//! Recipes and workouts produced by the text generation service.

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl Recipe {
    /// Returned when the generated text cannot be parsed.
    pub fn unavailable() -> Self {
        Self {
            title: "Recipe unavailable".to_owned(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Workout {
    pub title: String,
    pub duration_minutes: u32,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn unavailable() -> Self {
        Self {
            title: "Workout unavailable".to_owned(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeRequest {
    pub user_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub meal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkoutRequest {
    pub user_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub focus: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub minutes: Option<u32>,
}
