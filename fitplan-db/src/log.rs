use async_trait::async_trait;
use chrono::NaiveDate;
use fitplan_model::log::{FoodEntry, WeightEntry};
use log::debug;
use uuid::Uuid;

use crate::{connection::Connection, parse_column, Result};

#[derive(sqlx::FromRow)]
struct FoodRow {
    id: String,
    user_id: String,
    logged_on: NaiveDate,
    name: String,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fats_g: f64,
}

impl TryFrom<FoodRow> for FoodEntry {
    type Error = crate::Error;

    fn try_from(row: FoodRow) -> Result<Self> {
        Ok(FoodEntry {
            id: parse_column::<Uuid>("id", &row.id)?,
            user_id: row.user_id,
            logged_on: row.logged_on,
            name: row.name,
            calories: row.calories,
            protein_g: row.protein_g,
            carbs_g: row.carbs_g,
            fats_g: row.fats_g,
        })
    }
}

#[mockall::automock]
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// One weight per user per day; storing again for the same day replaces it.
    async fn store_weight(&self, entry: &WeightEntry) -> Result<()>;
    async fn fetch_weights(&self, user_id: &str) -> Result<Vec<WeightEntry>>;

    async fn store_food(&self, entry: &FoodEntry) -> Result<()>;
    async fn fetch_food(&self, user_id: &str, date: NaiveDate) -> Result<Vec<FoodEntry>>;
    /// Returns false when there was no such entry for the user.
    async fn delete_food(&self, user_id: &str, id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct LogRepositoryImpl {
    connection: Connection,
}

impl LogRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl LogRepository for LogRepositoryImpl {
    async fn store_weight(&self, entry: &WeightEntry) -> Result<()> {
        debug!("Storing weight for {} on {}", entry.user_id, entry.logged_on);
        sqlx::query(
            "INSERT INTO weight_log (user_id, logged_on, weight_kg) VALUES (?, ?, ?)
            ON CONFLICT (user_id, logged_on) DO UPDATE SET weight_kg = excluded.weight_kg",
        )
        .bind(&entry.user_id)
        .bind(entry.logged_on)
        .bind(entry.weight_kg)
        .execute(&mut *self.connection.lock().await)
        .await?;
        Ok(())
    }

    async fn fetch_weights(&self, user_id: &str) -> Result<Vec<WeightEntry>> {
        let rows: Vec<(String, NaiveDate, f64)> = sqlx::query_as(
            "SELECT user_id, logged_on, weight_kg FROM weight_log
            WHERE user_id = ? ORDER BY logged_on ASC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.connection.lock().await)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, logged_on, weight_kg)| WeightEntry {
                user_id,
                logged_on,
                weight_kg,
            })
            .collect())
    }

    async fn store_food(&self, entry: &FoodEntry) -> Result<()> {
        debug!("Storing food entry {} for {}", entry.id, entry.user_id);
        sqlx::query(
            "INSERT INTO food_log
                (id, user_id, logged_on, name, calories, protein_g, carbs_g, fats_g)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(&entry.user_id)
        .bind(entry.logged_on)
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fats_g)
        .execute(&mut *self.connection.lock().await)
        .await?;
        Ok(())
    }

    async fn fetch_food(&self, user_id: &str, date: NaiveDate) -> Result<Vec<FoodEntry>> {
        sqlx::query_as::<_, FoodRow>(
            "SELECT id, user_id, logged_on, name, calories, protein_g, carbs_g, fats_g
            FROM food_log WHERE user_id = ? AND logged_on = ? ORDER BY rowid ASC",
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&mut *self.connection.lock().await)
        .await?
        .into_iter()
        .map(FoodEntry::try_from)
        .collect()
    }

    async fn delete_food(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM food_log WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id.to_string())
            .execute(&mut *self.connection.lock().await)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
