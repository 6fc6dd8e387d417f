use chrono::Utc;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool};
use tracing::info;

use crate::models::Birthday;

/// Database connection pool wrapper
///
/// Handles all persistence for birthday records.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// Creates the database file if it does not exist yet.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            Sqlite::create_database(database_url).await?;
        }

        // Single-threaded batch job, one connection is all it gets
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        info!("Database connected and migrations completed");
        Ok(db)
    }

    /// Run database migrations to create tables
    async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS birthdays (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
                day INTEGER NOT NULL CHECK (day BETWEEN 1 AND 31),
                note TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (first_name, last_name)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a birthday record, returning the assigned row id
    ///
    /// Timestamps the record does not carry are stamped with now-UTC.
    /// A duplicate (first_name, last_name) pair surfaces as a
    /// unique-violation database error.
    pub async fn insert_birthday(&self, birthday: &Birthday) -> Result<i64, sqlx::Error> {
        let now = Utc::now();
        let created_at = birthday.created_at.unwrap_or(now);
        let updated_at = birthday.updated_at.unwrap_or(now);

        let result = sqlx::query(
            r#"
            INSERT INTO birthdays (first_name, last_name, month, day, note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&birthday.first_name)
        .bind(&birthday.last_name)
        .bind(birthday.month)
        .bind(birthday.day)
        .bind(&birthday.note)
        .bind(created_at)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get all records whose birthday falls in a given month
    ///
    /// Returns them in store-native order; an empty Vec is a valid outcome.
    pub async fn get_birthdays_for_month(&self, month: i32) -> Result<Vec<Birthday>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, month, day, note, created_at, updated_at
            FROM birthdays
            WHERE month = ?
            "#,
        )
        .bind(month)
        .fetch_all(&self.pool)
        .await
    }
}

/// Check whether a store error is a uniqueness-constraint violation
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}
