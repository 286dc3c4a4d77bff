use crate::db::models::{Category, NewQuestion, Question};
use crate::db::schema::{SQLITE_INIT, SQLITE_SEED_CATEGORIES};
use crate::error::TriviaError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct TriviaStorage {
    pool: SqlitePool,
}

impl TriviaStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the SQLite database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, TriviaError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), TriviaError> {
        self.execute_script(SQLITE_INIT).await
    }

    pub async fn seed_categories(&self) -> Result<(), TriviaError> {
        self.execute_script(SQLITE_SEED_CATEGORIES).await
    }

    async fn execute_script(&self, script: &str) -> Result<(), TriviaError> {
        // sqlx::query runs one statement at a time
        for stmt in script.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// All questions in ascending id order, the stable order pagination relies on.
    pub async fn list_questions(&self) -> Result<Vec<Question>, TriviaError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, TriviaError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn questions_by_category(&self, category: i64) -> Result<Vec<Question>, TriviaError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"SELECT id, question, answer, category, difficulty
               FROM questions WHERE category = ? ORDER BY id"#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_question(&self, id: i64) -> Result<Option<Question>, TriviaError> {
        let row = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, TriviaError> {
        let row = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert inside a transaction. Returns the new row id.
    /// A dropped transaction rolls back, so any error leaves the table untouched.
    pub async fn insert_question(&self, new: NewQuestion) -> Result<i64, TriviaError> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            r#"INSERT INTO questions (question, answer, category, difficulty)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(new.question)
        .bind(new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let id = res.last_insert_rowid();
        debug!(id, "question inserted");
        Ok(id)
    }

    /// Delete by id inside a transaction. Returns false when no row matched.
    pub async fn delete_question(&self, id: i64) -> Result<bool, TriviaError> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }
}
