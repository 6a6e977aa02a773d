use std::{env, sync::Arc};

use dotenv::dotenv;
use log::debug;
use sqlx::{Connection as SqlxConnection, Executor, SqliteConnection};
use tokio::sync::{Mutex, MutexGuard};

use crate::{schema::SCHEMA, Error};

const SETUP_QUERY: &str = "PRAGMA mmap_size = 30000000000;
PRAGMA cache_size = -1000;
PRAGMA page_size = 4096;
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = ON;";

#[derive(Clone)]
pub struct Connection {
    inner: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    /// Opens the database named by `DATABASE_URL`, read from the environment
    /// or a `.env` file.
    pub async fn establish() -> Result<Self, Error> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").map_err(|_| Error::MissingDatabaseUrl)?;
        Self::open(&database_url).await
    }

    pub async fn open(database_url: &str) -> Result<Self, Error> {
        debug!("Opening {}", database_url);
        let mut connection = SqliteConnection::connect(database_url).await?;

        connection.execute(SETUP_QUERY).await?;
        connection.execute(SCHEMA).await?;

        Ok(Self {
            inner: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn in_memory() -> Result<Self, Error> {
        Self::open("sqlite::memory:").await
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.inner.lock().await
    }
}
