pub mod connection;
pub mod log;
pub mod plan;
mod schema;
pub mod subscription;

use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupted row: {0}")]
    CorruptedRow(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T> {
    T::from_str(value)
        .map_err(|_| Error::CorruptedRow(format!("unexpected {} value \"{}\"", column, value)))
}
