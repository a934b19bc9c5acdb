//! SQL DDL for the `articles` table.

/// Postgres schema. `SERIAL` ids are 32-bit; queries cast them to `BIGINT`.
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255),
    content TEXT
)
"#;

/// SQLite schema. `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    title TEXT,
    content TEXT
)
"#;
