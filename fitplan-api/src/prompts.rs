use fitplan_model::{biometrics::Goal, plan::MacroPlan};
use itertools::Itertools;

const DEFAULT_WORKOUT_MINUTES: u32 = 45;

fn goal_description(goal: Goal) -> &'static str {
    match goal {
        Goal::Lose => "lose body fat",
        Goal::Maintain => "maintain current weight",
        Goal::Gain => "gain muscle mass",
    }
}

pub fn recipe_prompt(
    plan: &MacroPlan,
    goal: Goal,
    meal: Option<&str>,
    preferences: Option<&str>,
) -> String {
    let mut lines = vec![
        format!(
            "Create one {} recipe for someone who wants to {}.",
            meal.unwrap_or("meal"),
            goal_description(goal)
        ),
        format!(
            "Their daily targets are {} kcal, {} g protein, {} g carbohydrates and {} g fat.",
            plan.calories_daily, plan.protein_g, plan.carbs_g, plan.fats_g
        ),
    ];
    if let Some(preferences) = preferences.filter(|p| !p.trim().is_empty()) {
        lines.push(format!("Respect these preferences: {}.", preferences.trim()));
    }
    lines.push(
        "Reply only with a JSON object with the keys title, ingredients (array of strings), \
         steps (array of strings), calories, protein_g, carbs_g and fats_g."
            .to_owned(),
    );
    lines.into_iter().join("\n")
}

pub fn workout_prompt(goal: Goal, focus: Option<&str>, minutes: Option<u32>) -> String {
    let mut lines = vec![format!(
        "Design a {} minute workout for someone who wants to {}.",
        minutes.unwrap_or(DEFAULT_WORKOUT_MINUTES),
        goal_description(goal)
    )];
    if let Some(focus) = focus.filter(|f| !f.trim().is_empty()) {
        lines.push(format!("Focus on: {}.", focus.trim()));
    }
    lines.push(
        "Reply only with a JSON object with the keys title, duration_minutes and exercises \
         (array of objects with name, sets, reps and rest_seconds)."
            .to_owned(),
    );
    lines.into_iter().join("\n")
}
