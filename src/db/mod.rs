mod seed;

use std::collections::BTreeMap;
use std::str::FromStr;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::DbResult;
use crate::models::{NewProject, Project, ACTIVE_STATUS, ALL_CATEGORIES};

pub use seed::{seed_projects, SEED_COUNT};

const CREATE_PROJECTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) > 0),
        description TEXT NOT NULL CHECK (length(description) > 0),
        category TEXT NOT NULL,
        access_level TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'ativo',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const PROJECT_COLUMNS: &str =
    "id, name, description, category, access_level, status, created_at";

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> DbResult<Self> {
        Self::connect(config.database_url()).await
    }

    /// Open (creating if missing) the SQLite file behind `url`
    pub async fn connect(url: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Scoped handle for one unit of work; it returns to the pool when dropped,
    /// whichever way the caller exits.
    pub async fn connection(&self) -> DbResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Create the table if needed and seed it when empty. Returns the number of rows seeded.
    ///
    /// The emptiness check and the inserts share one `BEGIN IMMEDIATE` transaction, so
    /// two processes starting on the same file seed it once between them.
    pub async fn initialize(&self) -> DbResult<usize> {
        let mut conn = self.connection().await?;

        sqlx::query(CREATE_PROJECTS_TABLE)
            .execute(&mut *conn)
            .await?;

        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        match seed_if_empty(&mut conn).await {
            Ok(seeded) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                if seeded > 0 {
                    info!(seeded, "seeded projects table");
                }
                Ok(seeded)
            }
            Err(err) => {
                if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                    warn!(error = %rollback, "rollback after failed seed also failed");
                    conn.detach();
                }
                Err(err)
            }
        }
    }

    // Project operations

    /// Active rows of `category`; only the literal `all` lifts the category filter.
    pub async fn list_projects(&self, category: &str) -> DbResult<Vec<Project>> {
        let mut conn = self.connection().await?;

        let projects = if category == ALL_CATEGORIES {
            sqlx::query_as::<_, Project>(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE status = ? ORDER BY name ASC"
            ))
            .bind(ACTIVE_STATUS)
            .fetch_all(&mut *conn)
            .await?
        } else {
            sqlx::query_as::<_, Project>(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE category = ? AND status = ? ORDER BY name ASC"
            ))
            .bind(category)
            .bind(ACTIVE_STATUS)
            .fetch_all(&mut *conn)
            .await?
        };

        Ok(projects)
    }

    /// Substring match on name or description; an empty term matches every active row.
    pub async fn search_projects(&self, term: &str) -> DbResult<Vec<Project>> {
        let mut conn = self.connection().await?;
        let pattern = format!("%{term}%");

        let projects = sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE (name LIKE ? OR description LIKE ?) AND status = ?
            ORDER BY name ASC
            "#
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(ACTIVE_STATUS)
        .fetch_all(&mut *conn)
        .await?;

        Ok(projects)
    }

    /// Exact id lookup, regardless of status
    pub async fn get_project(&self, id: i64) -> DbResult<Option<Project>> {
        let mut conn = self.connection().await?;

        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(project)
    }

    pub async fn create_project(&self, project: &NewProject) -> DbResult<Project> {
        let mut conn = self.connection().await?;

        let created = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, description, category, access_level)
            VALUES (?, ?, ?, ?)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.category)
        .bind(&project.access_level)
        .fetch_one(&mut *conn)
        .await?;

        Ok(created)
    }

    /// Total rows, active or not
    pub async fn count_projects(&self) -> DbResult<i64> {
        let mut conn = self.connection().await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&mut *conn)
            .await?;

        Ok(total)
    }

    /// Rows per category, active or not
    pub async fn category_stats(&self) -> DbResult<BTreeMap<String, i64>> {
        let mut conn = self.connection().await?;

        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT category, COUNT(*) FROM projects GROUP BY category",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().collect())
    }
}

/// Runs inside the caller's open transaction
async fn seed_if_empty(conn: &mut SqliteConnection) -> DbResult<usize> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&mut *conn)
        .await?;
    if existing > 0 {
        debug!(existing, "projects table already populated, skipping seed");
        return Ok(0);
    }

    let seeds = seed_projects();
    for project in &seeds {
        sqlx::query(
            "INSERT INTO projects (name, description, category, access_level) VALUES (?, ?, ?, ?)",
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.category)
        .bind(&project.access_level)
        .execute(&mut *conn)
        .await?;
    }

    Ok(seeds.len())
}

/// Open the database and make sure the schema and seed rows exist
pub async fn init(config: &Config) -> DbResult<Database> {
    let db = Database::new(config).await?;
    db.initialize().await?;

    Ok(db)
}
