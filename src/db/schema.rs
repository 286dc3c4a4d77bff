//! SQL DDL for initializing the trivia storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `categories.id` assigned by the seeding side, `type` UNIQUE
/// - `questions.id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - every question column NOT NULL; `category` references `categories(id)`
/// - index on `questions(category)` for per-category listing and quiz pools
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    type TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    category INTEGER NOT NULL REFERENCES categories(id),
    difficulty INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
"#;

/// The six standard trivia categories.
pub const SQLITE_SEED_CATEGORIES: &str = r#"
INSERT OR IGNORE INTO categories (id, type) VALUES
    (1, 'Science'),
    (2, 'Art'),
    (3, 'Geography'),
    (4, 'History'),
    (5, 'Entertainment'),
    (6, 'Sports');
"#;
