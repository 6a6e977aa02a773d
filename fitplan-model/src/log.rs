use chrono::NaiveDate;
use uuid::Uuid;

use crate::plan::MacroPlan;
use crate::request::ValidationError;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightEntry {
    pub user_id: String,
    pub logged_on: NaiveDate,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewWeightEntry {
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight_kg: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logged_on: Option<NaiveDate>,
}

impl NewWeightEntry {
    pub fn validate(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<WeightEntry, ValidationError> {
        let weight_kg = self
            .weight_kg
            .ok_or(ValidationError::MissingField("weight_kg"))?;
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ValidationError::InvalidField {
                field: "weight_kg",
                reason: "must be greater than zero",
            });
        }
        Ok(WeightEntry {
            user_id: user_id.to_owned(),
            logged_on: self.logged_on.unwrap_or(today),
            weight_kg,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodEntry {
    pub id: Uuid,
    pub user_id: String,
    pub logged_on: NaiveDate,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewFoodEntry {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub calories: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub protein_g: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub carbs_g: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fats_g: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logged_on: Option<NaiveDate>,
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::InvalidField {
            field,
            reason: "must be zero or more",
        }),
        Some(v) => Ok(v),
    }
}

impl NewFoodEntry {
    pub fn validate(&self, user_id: &str, today: NaiveDate) -> Result<FoodEntry, ValidationError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::MissingField("name"))?;

        Ok(FoodEntry {
            id: Uuid::new_v4(),
            user_id: user_id.to_owned(),
            logged_on: self.logged_on.unwrap_or(today),
            name: name.to_owned(),
            calories: non_negative("calories", self.calories)?,
            protein_g: non_negative("protein_g", self.protein_g)?,
            carbs_g: non_negative("carbs_g", self.carbs_g)?,
            fats_g: non_negative("fats_g", self.fats_g)?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacroTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl MacroTotals {
    pub fn of_entries<'a>(entries: impl IntoIterator<Item = &'a FoodEntry>) -> Self {
        entries
            .into_iter()
            .fold(MacroTotals::default(), |acc, entry| MacroTotals {
                calories: acc.calories + entry.calories,
                protein_g: acc.protein_g + entry.protein_g,
                carbs_g: acc.carbs_g + entry.carbs_g,
                fats_g: acc.fats_g + entry.fats_g,
            })
    }

    pub fn remaining(plan: &MacroPlan, consumed: &MacroTotals) -> Self {
        MacroTotals {
            calories: plan.calories_daily as f64 - consumed.calories,
            protein_g: plan.protein_g as f64 - consumed.protein_g,
            carbs_g: plan.carbs_g as f64 - consumed.carbs_g,
            fats_g: plan.fats_g as f64 - consumed.fats_g,
        }
    }
}

/// A day of food entries measured against the active plan, if there is one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailySummary {
    pub date: NaiveDate,
    pub entries: Vec<FoodEntry>,
    pub totals: MacroTotals,
    pub target: Option<MacroPlan>,
    pub remaining: Option<MacroTotals>,
}

impl DailySummary {
    pub fn new(date: NaiveDate, entries: Vec<FoodEntry>, target: Option<MacroPlan>) -> Self {
        let totals = MacroTotals::of_entries(&entries);
        let remaining = target.as_ref().map(|plan| MacroTotals::remaining(plan, &totals));
        Self {
            date,
            entries,
            totals,
            target,
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn food(name: &str, calories: f64, protein_g: f64, carbs_g: f64, fats_g: f64) -> FoodEntry {
        NewFoodEntry {
            name: Some(name.to_owned()),
            calories: Some(calories),
            protein_g: Some(protein_g),
            carbs_g: Some(carbs_g),
            fats_g: Some(fats_g),
            logged_on: None,
        }
        .validate("user-1", date(4))
        .unwrap()
    }

    #[test]
    fn weight_entry_defaults_to_today() {
        let entry = NewWeightEntry {
            weight_kg: Some(71.4),
            logged_on: None,
        }
        .validate("user-1", date(4))
        .unwrap();
        assert_eq!(entry.logged_on, date(4));
        assert_eq!(entry.weight_kg, 71.4);

        let entry = NewWeightEntry {
            weight_kg: Some(71.4),
            logged_on: Some(date(1)),
        }
        .validate("user-1", date(4))
        .unwrap();
        assert_eq!(entry.logged_on, date(1));
    }

    #[test]
    fn weight_entry_validation() {
        let test_data = [
            (None, ValidationError::MissingField("weight_kg")),
            (
                Some(0.0),
                ValidationError::InvalidField {
                    field: "weight_kg",
                    reason: "must be greater than zero",
                },
            ),
            (
                Some(f64::INFINITY),
                ValidationError::InvalidField {
                    field: "weight_kg",
                    reason: "must be greater than zero",
                },
            ),
        ];

        for (i, (weight_kg, expected)) in test_data.into_iter().enumerate() {
            let entry = NewWeightEntry {
                weight_kg,
                logged_on: None,
            };
            assert_eq!(
                entry.validate("user-1", date(4)),
                Err(expected),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn food_entry_validation() {
        let valid = NewFoodEntry {
            name: Some(" Oatmeal ".to_owned()),
            calories: Some(350.0),
            protein_g: Some(12.0),
            carbs_g: Some(60.0),
            fats_g: Some(7.0),
            logged_on: None,
        };
        let entry = valid.validate("user-1", date(4)).unwrap();
        assert_eq!(entry.name, "Oatmeal");
        assert_eq!(entry.logged_on, date(4));

        let test_data = [
            (
                NewFoodEntry {
                    name: None,
                    ..valid.clone()
                },
                ValidationError::MissingField("name"),
            ),
            (
                NewFoodEntry {
                    calories: None,
                    ..valid.clone()
                },
                ValidationError::MissingField("calories"),
            ),
            (
                NewFoodEntry {
                    fats_g: Some(-1.0),
                    ..valid.clone()
                },
                ValidationError::InvalidField {
                    field: "fats_g",
                    reason: "must be zero or more",
                },
            ),
        ];

        for (i, (entry, expected)) in test_data.into_iter().enumerate() {
            assert_eq!(
                entry.validate("user-1", date(4)),
                Err(expected),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn daily_summary_with_target() {
        let entries = vec![
            food("Oatmeal", 350.0, 12.0, 60.0, 7.0),
            food("Chicken salad", 520.0, 45.0, 20.0, 28.0),
        ];
        let target = MacroPlan {
            calories_daily: 2594,
            protein_g: 140,
            carbs_g: 367,
            fats_g: 63,
        };

        let summary = DailySummary::new(date(4), entries, Some(target));
        assert_eq!(
            summary.totals,
            MacroTotals {
                calories: 870.0,
                protein_g: 57.0,
                carbs_g: 80.0,
                fats_g: 35.0,
            }
        );
        assert_eq!(
            summary.remaining,
            Some(MacroTotals {
                calories: 1724.0,
                protein_g: 83.0,
                carbs_g: 287.0,
                fats_g: 28.0,
            })
        );
    }

    #[test]
    fn daily_summary_without_target() {
        let summary = DailySummary::new(date(4), vec![], None);
        assert_eq!(summary.totals, MacroTotals::default());
        assert_eq!(summary.remaining, None);
    }
}
