use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        Self(error.to_string())
    }
}

/// Source of the current time; injected so tests control timestamps.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Persistence façade over the single todo-items table.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn add_item(&self, text: &str) -> Result<TodoItem, StoreError>;

    async fn get_item(&self, id: Uuid) -> Result<Option<TodoItem>, StoreError>;

    /// All items, incomplete first, then by creation time ascending.
    async fn list_items(&self) -> Result<Vec<TodoItem>, StoreError>;

    /// `None` if the item does not exist, `Some(false)` if it was already
    /// completed, `Some(true)` if it was completed now.
    async fn complete_item(&self, id: Uuid) -> Result<Option<bool>, StoreError>;

    async fn delete_item(&self, id: Uuid) -> Result<bool, StoreError>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS todo_items (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL,
    created_at TEXT NOT NULL,
    completed_at TEXT NULL
)";

pub struct SqliteTodoRepository {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl SqliteTodoRepository {
    pub fn open(path: &Path, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }
}

fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    // Fixed-width encoding so the stored text orders chronologically.
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError(format!("invalid stored timestamp {raw:?}: {e}")))
}

fn row_to_item(row: &Row<'_>) -> Result<TodoItem, StoreError> {
    let id: String = row.get(0)?;
    let text: String = row.get(1)?;
    let created_at: String = row.get(2)?;
    let completed_at: Option<String> = row.get(3)?;

    Ok(TodoItem {
        id: Uuid::parse_str(&id).map_err(|e| StoreError(format!("invalid stored id: {e}")))?,
        text,
        created_at: decode_timestamp(&created_at)?,
        completed_at: completed_at.as_deref().map(decode_timestamp).transpose()?,
    })
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn add_item(&self, text: &str) -> Result<TodoItem, StoreError> {
        let item = TodoItem {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: self.clock.now_utc(),
            completed_at: None,
        };

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO todo_items (id, text, created_at, completed_at) VALUES (?1, ?2, ?3, NULL)",
            params![
                item.id.to_string(),
                item.text,
                encode_timestamp(item.created_at)
            ],
        )?;

        Ok(item)
    }

    async fn get_item(&self, id: Uuid) -> Result<Option<TodoItem>, StoreError> {
        let conn = self.conn.lock().await;
        let row = conn
            .query_row(
                "SELECT id, text, created_at, completed_at FROM todo_items WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((id, text, created_at, completed_at)) => Ok(Some(TodoItem {
                id: Uuid::parse_str(&id)
                    .map_err(|e| StoreError(format!("invalid stored id: {e}")))?,
                text,
                created_at: decode_timestamp(&created_at)?,
                completed_at: completed_at.as_deref().map(decode_timestamp).transpose()?,
            })),
        }
    }

    async fn list_items(&self) -> Result<Vec<TodoItem>, StoreError> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare(
            "SELECT id, text, created_at, completed_at FROM todo_items
             ORDER BY (completed_at IS NOT NULL), created_at",
        )?;

        let mut items = Vec::new();
        let mut rows = statement.query([])?;
        while let Some(row) = rows.next()? {
            items.push(row_to_item(row)?);
        }

        Ok(items)
    }

    async fn complete_item(&self, id: Uuid) -> Result<Option<bool>, StoreError> {
        let conn = self.conn.lock().await;
        let completed_at = conn
            .query_row(
                "SELECT completed_at FROM todo_items WHERE id = ?1",
                params![id.to_string()],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;

        match completed_at {
            None => Ok(None),
            Some(Some(_)) => Ok(Some(false)),
            Some(None) => {
                conn.execute(
                    "UPDATE todo_items SET completed_at = ?1 WHERE id = ?2",
                    params![encode_timestamp(self.clock.now_utc()), id.to_string()],
                )?;
                Ok(Some(true))
            }
        }
    }

    async fn delete_item(&self, id: Uuid) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let deleted = conn.execute(
            "DELETE FROM todo_items WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(deleted > 0)
    }
}
