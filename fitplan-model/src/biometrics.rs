use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Constant term of the Mifflin-St Jeor equation.
    pub fn bmr_offset(self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Intense,
    VeryIntense,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Intense => 1.725,
            ActivityLevel::VeryIntense => 1.9,
        }
    }

    /// Missing or unrecognised levels fall back to sedentary instead of failing.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|v| ActivityLevel::from_str(v.trim()).ok())
            .unwrap_or_default()
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

/// Grams per kilogram of body weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatios {
    pub protein_g_per_kg: f64,
    pub fat_g_per_kg: f64,
}

impl Goal {
    pub fn calorie_offset(self) -> i32 {
        match self {
            Goal::Lose => -500,
            Goal::Maintain => 0,
            Goal::Gain => 300,
        }
    }

    pub fn macro_ratios(self) -> MacroRatios {
        match self {
            Goal::Lose => MacroRatios {
                protein_g_per_kg: 2.2,
                fat_g_per_kg: 0.8,
            },
            Goal::Maintain => MacroRatios {
                protein_g_per_kg: 2.0,
                fat_g_per_kg: 0.9,
            },
            Goal::Gain => MacroRatios {
                protein_g_per_kg: 2.0,
                fat_g_per_kg: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiometricInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
}

impl BiometricInput {
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age: u32,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            weight_kg,
            height_cm,
            age,
            sex,
            activity_level,
        }
    }
}
