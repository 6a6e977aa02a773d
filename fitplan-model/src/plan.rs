use chrono::{DateTime, Utc};

use crate::biometrics::{BiometricInput, Goal};

/// Daily calorie target and macro split for one goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacroPlan {
    pub calories_daily: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fats_g: i32,
}

/// One variant per goal. Every bundle carries all three.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalVariants {
    pub lose: MacroPlan,
    pub maintain: MacroPlan,
    pub gain: MacroPlan,
}

impl GoalVariants {
    pub fn get(&self, goal: Goal) -> &MacroPlan {
        match goal {
            Goal::Lose => &self.lose,
            Goal::Maintain => &self.maintain,
            Goal::Gain => &self.gain,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Goal, &MacroPlan)> {
        [
            (Goal::Lose, &self.lose),
            (Goal::Maintain, &self.maintain),
            (Goal::Gain, &self.gain),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanBundle {
    pub maintenance_calories: i32,
    pub variants: GoalVariants,
}

impl PlanBundle {
    /// Rebuilds a bundle from its variants. Maintenance calories are not
    /// stored separately since they always equal the maintain target.
    pub fn from_variants(variants: GoalVariants) -> Self {
        Self {
            maintenance_calories: variants.maintain.calories_daily,
            variants,
        }
    }

    pub fn active(&self, goal: Goal) -> &MacroPlan {
        self.variants.get(goal)
    }
}

/// A user's biometric snapshot together with the bundle computed from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanProfile {
    pub user_id: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub input: BiometricInput,
    pub goal: Goal,
    pub updated_at: DateTime<Utc>,
    pub target_macros: PlanBundle,
}

impl PlanProfile {
    pub fn new(
        user_id: String,
        input: BiometricInput,
        goal: Goal,
        target_macros: PlanBundle,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            input,
            goal,
            updated_at,
            target_macros,
        }
    }

    pub fn active_plan(&self) -> &MacroPlan {
        self.target_macros.active(self.goal)
    }
}
