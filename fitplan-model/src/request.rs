use std::str::FromStr;

#[cfg(feature = "serde")]
use serde_with::{As, DisplayFromStr, PickFirst, Same};

use crate::biometrics::{ActivityLevel, BiometricInput, Goal, Sex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// Body of a plan calculation request. Every field is optional on the wire,
/// numbers may arrive as JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub user_id: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "As::<Option<PickFirst<(Same, DisplayFromStr)>>>")
    )]
    pub weight_kg: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "As::<Option<PickFirst<(Same, DisplayFromStr)>>>")
    )]
    pub height_cm: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "As::<Option<PickFirst<(Same, DisplayFromStr)>>>")
    )]
    pub age: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sex: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub activity_level: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub goal: Option<String>,
}

const MAX_WEIGHT_KG: f64 = 1000.0;
const MAX_HEIGHT_CM: f64 = 300.0;
const MAX_AGE: f64 = 150.0;

fn in_range(field: &'static str, value: Option<f64>, max: f64) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    if !value.is_finite() {
        Err(ValidationError::InvalidField {
            field,
            reason: "must be a finite number",
        })
    } else if value <= 0.0 {
        Err(ValidationError::InvalidField {
            field,
            reason: "must be greater than zero",
        })
    } else if value > max {
        Err(ValidationError::InvalidField {
            field,
            reason: "is outside the supported range",
        })
    } else {
        Ok(value)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl PlanRequest {
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age: u32,
        sex: Sex,
        activity_level: ActivityLevel,
        goal: Goal,
    ) -> Self {
        Self {
            user_id: None,
            weight_kg: Some(weight_kg),
            height_cm: Some(height_cm),
            age: Some(age as f64),
            sex: Some(sex.to_string()),
            activity_level: Some(activity_level.to_string()),
            goal: Some(goal.to_string()),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Checks every field before anything is computed. Only the activity
    /// level is permissive; the rest must be present and well formed.
    pub fn validate(&self) -> Result<(BiometricInput, Goal), ValidationError> {
        let weight_kg = in_range("weight_kg", self.weight_kg, MAX_WEIGHT_KG)?;
        let height_cm = in_range("height_cm", self.height_cm, MAX_HEIGHT_CM)?;
        let age = in_range("age", self.age, MAX_AGE)?;
        if age.fract() != 0.0 {
            return Err(ValidationError::InvalidField {
                field: "age",
                reason: "must be a whole number of years",
            });
        }

        let sex = non_blank(&self.sex).ok_or(ValidationError::MissingField("sex"))?;
        let sex = Sex::from_str(sex).map_err(|_| ValidationError::InvalidField {
            field: "sex",
            reason: "must be male or female",
        })?;

        let activity_level = ActivityLevel::parse_or_default(non_blank(&self.activity_level));

        let goal = match non_blank(&self.goal) {
            None => Goal::default(),
            Some(goal) => Goal::from_str(goal).map_err(|_| ValidationError::InvalidField {
                field: "goal",
                reason: "must be lose, maintain or gain",
            })?,
        };

        Ok((
            BiometricInput::new(weight_kg, height_cm, age as u32, sex, activity_level),
            goal,
        ))
    }

    /// True when both requests would produce the same bundle, whatever goal
    /// they select.
    pub fn same_biometrics(&self, other: &PlanRequest) -> bool {
        match (self.validate(), other.validate()) {
            (Ok((lhs, _)), Ok((rhs, _))) => lhs == rhs,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PlanRequest {
        PlanRequest::new(
            70.0,
            175.0,
            25,
            Sex::Male,
            ActivityLevel::Moderate,
            Goal::Lose,
        )
    }

    #[test]
    fn valid_request_passes() {
        let (input, goal) = valid_request().validate().unwrap();
        assert_eq!(
            input,
            BiometricInput::new(70.0, 175.0, 25, Sex::Male, ActivityLevel::Moderate)
        );
        assert_eq!(goal, Goal::Lose);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let test_data = [
            (
                PlanRequest {
                    weight_kg: None,
                    ..valid_request()
                },
                ValidationError::MissingField("weight_kg"),
            ),
            (
                PlanRequest {
                    height_cm: None,
                    ..valid_request()
                },
                ValidationError::MissingField("height_cm"),
            ),
            (
                PlanRequest {
                    age: None,
                    ..valid_request()
                },
                ValidationError::MissingField("age"),
            ),
            (
                PlanRequest {
                    sex: None,
                    ..valid_request()
                },
                ValidationError::MissingField("sex"),
            ),
            (
                PlanRequest {
                    sex: Some("  ".to_owned()),
                    ..valid_request()
                },
                ValidationError::MissingField("sex"),
            ),
        ];

        for (i, (request, expected)) in test_data.into_iter().enumerate() {
            assert_eq!(request.validate(), Err(expected), "Test case #{}", i);
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let test_data = [
            (
                PlanRequest {
                    weight_kg: Some(0.0),
                    ..valid_request()
                },
                "weight_kg",
            ),
            (
                PlanRequest {
                    height_cm: Some(-170.0),
                    ..valid_request()
                },
                "height_cm",
            ),
            (
                PlanRequest {
                    weight_kg: Some(f64::NAN),
                    ..valid_request()
                },
                "weight_kg",
            ),
            (
                PlanRequest {
                    age: Some(25.5),
                    ..valid_request()
                },
                "age",
            ),
            (
                PlanRequest {
                    weight_kg: Some(2.0e8),
                    ..valid_request()
                },
                "weight_kg",
            ),
            (
                PlanRequest {
                    height_cm: Some(301.0),
                    ..valid_request()
                },
                "height_cm",
            ),
            (
                PlanRequest {
                    age: Some(4_000_000_000.0),
                    ..valid_request()
                },
                "age",
            ),
            (
                PlanRequest {
                    sex: Some("other".to_owned()),
                    ..valid_request()
                },
                "sex",
            ),
            (
                PlanRequest {
                    goal: Some("bulk".to_owned()),
                    ..valid_request()
                },
                "goal",
            ),
        ];

        for (i, (request, expected_field)) in test_data.into_iter().enumerate() {
            match request.validate() {
                Err(ValidationError::InvalidField { field, .. }) => {
                    assert_eq!(field, expected_field, "Test case #{}", i)
                }
                other => panic!("Test case #{}: unexpected result {:?}", i, other),
            }
        }
    }

    #[test]
    fn range_limits_are_inclusive() {
        let request = PlanRequest {
            weight_kg: Some(1000.0),
            height_cm: Some(300.0),
            age: Some(150.0),
            ..valid_request()
        };
        let (input, _) = request.validate().unwrap();
        assert_eq!(input.weight_kg, 1000.0);
        assert_eq!(input.age, 150);
    }

    #[test]
    fn permissive_defaults() {
        let request = PlanRequest {
            activity_level: Some("olympian".to_owned()),
            goal: None,
            ..valid_request()
        };
        let (input, goal) = request.validate().unwrap();
        assert_eq!(input.activity_level, ActivityLevel::Sedentary);
        assert_eq!(goal, Goal::Maintain);

        let request = PlanRequest {
            activity_level: None,
            ..valid_request()
        };
        assert_eq!(
            request.validate().unwrap().0.activity_level,
            ActivityLevel::Sedentary
        );
    }

    #[test]
    fn same_biometrics_ignores_goal() {
        let lose = valid_request();
        let gain = PlanRequest {
            goal: Some("gain".to_owned()),
            ..valid_request()
        };
        let heavier = PlanRequest {
            weight_kg: Some(71.0),
            ..valid_request()
        };

        assert!(lose.same_biometrics(&gain));
        assert!(!lose.same_biometrics(&heavier));
        assert!(!lose.same_biometrics(&PlanRequest::default()));
    }
}
