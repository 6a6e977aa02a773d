//! Calorie and macro targets from biometric inputs.
//!
//! BMR follows Mifflin-St Jeor, scaled by a fixed activity multiplier to get
//! maintenance calories. Each goal shifts the calorie target and uses its own
//! protein/fat grams per kilogram; carbohydrates take whatever is left.

use crate::biometrics::{ActivityLevel, BiometricInput, Goal};
use crate::plan::{GoalVariants, MacroPlan, PlanBundle};

const KCAL_PER_G_PROTEIN: i32 = 4;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: i32 = 9;

/// Rounds halves towards positive infinity, so -2.5 becomes -2. Values
/// beyond the `i32` range saturate and NaN becomes zero.
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

pub fn bmr(input: &BiometricInput) -> f64 {
    10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * input.age as f64
        + input.sex.bmr_offset()
}

pub fn activity_factor(level: ActivityLevel) -> f64 {
    level.multiplier()
}

pub fn maintenance_calories(input: &BiometricInput) -> i32 {
    round_half_up(bmr(input) * activity_factor(input.activity_level))
}

fn macro_split(weight_kg: f64, maintenance: i32, goal: Goal) -> MacroPlan {
    let calories_daily = maintenance.saturating_add(goal.calorie_offset());
    let ratios = goal.macro_ratios();
    let protein_g = round_half_up(ratios.protein_g_per_kg * weight_kg);
    let fats_g = round_half_up(ratios.fat_g_per_kg * weight_kg);

    // Not clamped: extreme inputs legitimately produce negative carbs.
    let macro_calories = protein_g
        .saturating_mul(KCAL_PER_G_PROTEIN)
        .saturating_add(fats_g.saturating_mul(KCAL_PER_G_FAT));
    let carb_calories = calories_daily.saturating_sub(macro_calories);
    let carbs_g = round_half_up(carb_calories as f64 / KCAL_PER_G_CARBS);

    MacroPlan {
        calories_daily,
        protein_g,
        carbs_g,
        fats_g,
    }
}

pub fn calculate(input: &BiometricInput) -> PlanBundle {
    let maintenance = maintenance_calories(input);
    PlanBundle {
        maintenance_calories: maintenance,
        variants: GoalVariants {
            lose: macro_split(input.weight_kg, maintenance, Goal::Lose),
            maintain: macro_split(input.weight_kg, maintenance, Goal::Maintain),
            gain: macro_split(input.weight_kg, maintenance, Goal::Gain),
        },
    }
}
