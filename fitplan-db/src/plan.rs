use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitplan_model::{
    biometrics::{BiometricInput, Goal},
    plan::{GoalVariants, MacroPlan, PlanBundle, PlanProfile},
};
use log::debug;
use sqlx::Connection as SqlxConnection;

use crate::{connection::Connection, parse_column, Error, Result};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    weight_kg: f64,
    height_cm: f64,
    age: i64,
    sex: String,
    activity_level: String,
    goal: String,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct VariantRow {
    goal: String,
    calories_daily: i32,
    protein_g: i32,
    carbs_g: i32,
    fats_g: i32,
}

impl From<&VariantRow> for MacroPlan {
    fn from(row: &VariantRow) -> Self {
        MacroPlan {
            calories_daily: row.calories_daily,
            protein_g: row.protein_g,
            carbs_g: row.carbs_g,
            fats_g: row.fats_g,
        }
    }
}

fn variants_from_rows(user_id: &str, rows: &[VariantRow]) -> Result<GoalVariants> {
    let find = |goal: Goal| -> Result<MacroPlan> {
        for row in rows {
            if parse_column::<Goal>("goal", &row.goal)? == goal {
                return Ok(row.into());
            }
        }
        Err(Error::CorruptedRow(format!(
            "plan for {} has no {} variant",
            user_id, goal
        )))
    };

    Ok(GoalVariants {
        lose: find(Goal::Lose)?,
        maintain: find(Goal::Maintain)?,
        gain: find(Goal::Gain)?,
    })
}

impl ProfileRow {
    fn into_profile(self, variants: GoalVariants) -> Result<PlanProfile> {
        let age = u32::try_from(self.age)
            .map_err(|_| Error::CorruptedRow(format!("unexpected age value {}", self.age)))?;
        let input = BiometricInput::new(
            self.weight_kg,
            self.height_cm,
            age,
            parse_column("sex", &self.sex)?,
            parse_column("activity_level", &self.activity_level)?,
        );

        Ok(PlanProfile::new(
            self.user_id,
            input,
            parse_column("goal", &self.goal)?,
            PlanBundle::from_variants(variants),
            self.updated_at,
        ))
    }
}

#[mockall::automock]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Replaces the user's stored biometrics and all three plan variants.
    async fn store_plan(&self, profile: &PlanProfile) -> Result<()>;
    async fn fetch_plan(&self, user_id: &str) -> Result<Option<PlanProfile>>;
}

#[derive(Clone)]
pub struct PlanRepositoryImpl {
    connection: Connection,
}

impl PlanRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PlanRepository for PlanRepositoryImpl {
    async fn store_plan(&self, profile: &PlanProfile) -> Result<()> {
        let mut conn = self.connection.lock().await;
        let mut tx = conn.begin().await?;

        debug!("Storing profile for {}", profile.user_id);
        sqlx::query(
            "INSERT INTO profiles
                (user_id, weight_kg, height_cm, age, sex, activity_level, goal, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                age = excluded.age,
                sex = excluded.sex,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                updated_at = excluded.updated_at",
        )
        .bind(&profile.user_id)
        .bind(profile.input.weight_kg)
        .bind(profile.input.height_cm)
        .bind(profile.input.age as i64)
        .bind(profile.input.sex.as_ref())
        .bind(profile.input.activity_level.as_ref())
        .bind(profile.goal.as_ref())
        .bind(profile.updated_at)
        .execute(&mut *tx)
        .await?;

        debug!("Storing plan variants for {}", profile.user_id);
        for (goal, plan) in profile.target_macros.variants.iter() {
            sqlx::query(
                "INSERT INTO plan_variants
                    (user_id, goal, calories_daily, protein_g, carbs_g, fats_g)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT (user_id, goal) DO UPDATE SET
                    calories_daily = excluded.calories_daily,
                    protein_g = excluded.protein_g,
                    carbs_g = excluded.carbs_g,
                    fats_g = excluded.fats_g",
            )
            .bind(&profile.user_id)
            .bind(goal.as_ref())
            .bind(plan.calories_daily)
            .bind(plan.protein_g)
            .bind(plan.carbs_g)
            .bind(plan.fats_g)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn fetch_plan(&self, user_id: &str) -> Result<Option<PlanProfile>> {
        let mut conn = self.connection.lock().await;

        let Some(profile) = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, weight_kg, height_cm, age, sex, activity_level, goal, updated_at
            FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        else {
            return Ok(None);
        };

        let variants = sqlx::query_as::<_, VariantRow>(
            "SELECT goal, calories_daily, protein_g, carbs_g, fats_g
            FROM plan_variants WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        let variants = variants_from_rows(user_id, &variants)?;
        profile.into_profile(variants).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use fitplan_model::{
        biometrics::{ActivityLevel, Sex},
        calculator,
    };

    use super::*;

    fn profile(user_id: &str, weight_kg: f64, goal: Goal) -> PlanProfile {
        let input = BiometricInput::new(weight_kg, 175.0, 25, Sex::Male, ActivityLevel::Moderate);
        let bundle = calculator::calculate(&input);
        PlanProfile::new(
            user_id.to_owned(),
            input,
            goal,
            bundle,
            Utc.with_ymd_and_hms(2024, 3, 4, 12, 30, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn stored_plan_reads_back_identically() {
        let repository = PlanRepositoryImpl::new(Connection::in_memory().await.unwrap());
        let stored = profile("user-1", 70.0, Goal::Lose);

        repository.store_plan(&stored).await.unwrap();
        let fetched = repository.fetch_plan("user-1").await.unwrap();

        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn recalculation_replaces_previous_plan() {
        let repository = PlanRepositoryImpl::new(Connection::in_memory().await.unwrap());
        repository
            .store_plan(&profile("user-1", 70.0, Goal::Lose))
            .await
            .unwrap();

        let replacement = profile("user-1", 82.5, Goal::Gain);
        repository.store_plan(&replacement).await.unwrap();

        let fetched = repository.fetch_plan("user-1").await.unwrap().unwrap();
        assert_eq!(fetched, replacement);
        assert_eq!(fetched.active_plan(), &replacement.target_macros.variants.gain);
    }

    #[tokio::test]
    async fn unknown_user_has_no_plan() {
        let repository = PlanRepositoryImpl::new(Connection::in_memory().await.unwrap());
        repository
            .store_plan(&profile("user-1", 70.0, Goal::Maintain))
            .await
            .unwrap();

        assert_eq!(repository.fetch_plan("user-2").await.unwrap(), None);
    }

    #[test]
    fn missing_variant_is_reported() {
        let rows = [VariantRow {
            goal: "maintain".to_owned(),
            calories_daily: 2594,
            protein_g: 140,
            carbs_g: 367,
            fats_g: 63,
        }];

        assert!(matches!(
            variants_from_rows("user-1", &rows),
            Err(Error::CorruptedRow(_))
        ));
    }
}
