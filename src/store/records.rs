//! Category and article listings from the relational store.
//!
//! # Responsibilities
//! - Own the single long-lived SQLite connection
//! - Create the schema on open
//! - Run the two parameterized listing statements
//! - Provide the write helpers used by catalog import
//!
//! # Design Decisions
//! - One statement per listing; NULL parameters select the unfiltered variant
//! - Statements are prepared once per SQL text (`prepare_cached`)
//! - Every bound value passes the query-fragment whitelist first
//! - Connection guarded by a `Mutex`; requests run on the blocking pool

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{SiteError, SiteResult};
use crate::model::{ArticleRef, Category};
use crate::store::sanitize::{sanitize, sanitize_opt, Charset};

const CATEGORIES_SQL: &str = "\
    SELECT c.name, c.color FROM categories c \
    WHERE ?1 IS NULL OR EXISTS ( \
        SELECT 1 FROM article_categories ac \
        WHERE ac.category_name = c.name AND ac.article_name = ?1) \
    ORDER BY c.name";

const ARTICLES_SQL: &str = "\
    SELECT a.name FROM articles a \
    WHERE ?1 IS NULL OR EXISTS ( \
        SELECT 1 FROM article_categories ac \
        WHERE ac.article_name = a.name \
          AND instr(',' || ?1 || ',', ',' || ac.category_name || ',') > 0) \
    ORDER BY a.id DESC \
    LIMIT ?3 OFFSET ?2";

const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
      name TEXT PRIMARY KEY,
      color TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS articles (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS article_categories (
      article_name TEXT NOT NULL REFERENCES articles(name),
      category_name TEXT NOT NULL REFERENCES categories(name),
      PRIMARY KEY (article_name, category_name)
    );
"#;

/// Relational store over one SQLite connection.
#[derive(Debug)]
pub struct RecordStore {
    conn: Mutex<Connection>,
}

impl RecordStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>, statement_cache_capacity: usize) -> SiteResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::from_connection(conn, statement_cache_capacity)
    }

    pub fn open_in_memory() -> SiteResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, 16)
    }

    fn from_connection(conn: Connection, statement_cache_capacity: usize) -> SiteResult<Self> {
        conn.set_prepared_statement_cache_capacity(statement_cache_capacity);
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> SiteResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| SiteError::StoreUnavailable)
    }

    /// All categories when `article` is `None`, otherwise the article's categories.
    pub fn list_categories(&self, article: Option<&str>) -> SiteResult<Vec<Category>> {
        let article = sanitize_opt(article, Charset::QueryFragment)?;
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(CATEGORIES_SQL)?;
        let rows = stmt.query_map(params![article], |row| {
            Ok(Category {
                name: row.get(0)?,
                color: row.get(1)?,
            })
        })?;
        let categories = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// One page of articles, newest first; `filter` is a comma-joined category list.
    pub fn list_articles(
        &self,
        filter: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> SiteResult<Vec<ArticleRef>> {
        if limit == 0 {
            return Err(SiteError::invalid("limit must be positive"));
        }
        let filter = sanitize_opt(filter, Charset::QueryFragment)?;
        let offset = i64::try_from(offset).map_err(|_| SiteError::invalid("offset out of range"))?;
        let limit = i64::try_from(limit).map_err(|_| SiteError::invalid("limit out of range"))?;

        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(ARTICLES_SQL)?;
        let rows = stmt.query_map(params![filter, offset, limit], |row| {
            Ok(ArticleRef { name: row.get(0)? })
        })?;
        let articles = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(articles)
    }

    /// Insert a category or update its color.
    pub fn upsert_category(&self, name: &str, color: &str) -> SiteResult<()> {
        let conn = self.conn()?;
        Writer { conn: &conn }.upsert_category(name, color)
    }

    /// Insert an article as the newest one. Returns `false` when it already exists.
    pub fn insert_article(&self, name: &str) -> SiteResult<bool> {
        let conn = self.conn()?;
        Writer { conn: &conn }.insert_article(name)
    }

    /// Join an article to a category; repeated calls are no-ops.
    pub fn tag_article(&self, article: &str, category: &str) -> SiteResult<()> {
        let conn = self.conn()?;
        Writer { conn: &conn }.tag_article(article, category)
    }

    /// Run `f` inside one transaction. The connection stays locked until it
    /// commits or rolls back, so no request interleaves with it.
    pub fn transaction<T>(&self, f: impl FnOnce(&Writer<'_>) -> SiteResult<T>) -> SiteResult<T> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let value = f(&Writer { conn: &*tx })?;
        tx.commit()?;
        Ok(value)
    }
}

/// Write helpers over a connection the caller has locked.
pub struct Writer<'c> {
    conn: &'c Connection,
}

impl Writer<'_> {
    pub fn upsert_category(&self, name: &str, color: &str) -> SiteResult<()> {
        let name = sanitize(name, Charset::QueryFragment)?;
        self.conn
            .prepare_cached(
                "INSERT INTO categories (name, color) VALUES (?1, ?2) \
                 ON CONFLICT(name) DO UPDATE SET color = excluded.color",
            )?
            .execute(params![name, color])?;
        Ok(())
    }

    pub fn insert_article(&self, name: &str) -> SiteResult<bool> {
        let name = sanitize(name, Charset::QueryFragment)?;
        let existing: Option<i64> = self
            .conn
            .prepare_cached("SELECT id FROM articles WHERE name = ?1")?
            .query_row(params![name], |row| row.get(0))
            .optional()?;
        if existing.is_some() {
            return Ok(false);
        }
        self.conn
            .prepare_cached("INSERT INTO articles (name) VALUES (?1)")?
            .execute(params![name])?;
        Ok(true)
    }

    pub fn tag_article(&self, article: &str, category: &str) -> SiteResult<()> {
        let article = sanitize(article, Charset::QueryFragment)?;
        let category = sanitize(category, Charset::QueryFragment)?;
        self.conn
            .prepare_cached(
                "INSERT OR IGNORE INTO article_categories (article_name, category_name) VALUES (?1, ?2)",
            )?
            .execute(params![article, category])?;
        Ok(())
    }
}
