use crate::error::{Result, TodoError};
use crate::models::Todo;
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, warn};

/// Database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database file, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Database { conn })
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Database { conn })
    }

    /// Ensure the `todo` table exists. Safe to call on every start.
    pub fn init(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS todo (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                time TEXT,
                completed INTEGER DEFAULT 0
            )",
            [],
        )?;
        debug!("schema ready");
        Ok(())
    }

    // ==================== Todo Operations ====================

    /// Insert a new todo with `completed = 0`.
    ///
    /// The caller has already validated `name` and `time`; the store
    /// accepts whatever it is given.
    pub fn insert_todo(&self, name: &str, time: &str) -> Result<Todo> {
        let rows = self.conn.execute(
            "INSERT INTO todo (name, time, completed) VALUES (?1, ?2, 0)",
            (name, time),
        )?;
        if rows != 1 {
            warn!(rows, "insert affected an unexpected number of rows");
            return Err(TodoError::UnexpectedRowCount {
                expected: 1,
                actual: rows,
            });
        }

        let id = self.conn.last_insert_rowid();
        self.get_todo(id)?.ok_or(TodoError::TodoNotFound(id))
    }

    pub fn get_todo(&self, id: i64) -> Result<Option<Todo>> {
        self.conn
            .query_row(
                "SELECT id, name, time, completed FROM todo WHERE id = ?1",
                [id],
                todo_from_row,
            )
            .optional()
            .map_err(|e| e.into())
    }

    /// All todos in insertion (id) order.
    pub fn list_todos(&self) -> Result<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, time, completed FROM todo ORDER BY id")?;

        let todos = stmt.query_map([], todo_from_row)?;
        todos
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| e.into())
    }

    /// Persist the completion flag for one todo.
    pub fn set_completed(&self, id: i64, completed: bool) -> Result<Todo> {
        let rows = self.conn.execute(
            "UPDATE todo SET completed = ?1 WHERE id = ?2",
            (completed as i64, id),
        )?;
        if rows == 0 {
            return Err(TodoError::TodoNotFound(id));
        }

        self.get_todo(id)?.ok_or(TodoError::TodoNotFound(id))
    }

    /// Delete exactly one todo by id.
    pub fn delete_todo(&self, id: i64) -> Result<()> {
        let rows = self.conn.execute("DELETE FROM todo WHERE id = ?1", [id])?;
        match rows {
            1 => Ok(()),
            0 => Err(TodoError::TodoNotFound(id)),
            n => {
                warn!(rows = n, id, "delete affected an unexpected number of rows");
                Err(TodoError::UnexpectedRowCount {
                    expected: 1,
                    actual: n,
                })
            }
        }
    }

    /// Drop and recreate the `todo` table, discarding all rows.
    pub fn reset(&self) -> Result<()> {
        self.conn.execute("DROP TABLE IF EXISTS todo", [])?;
        self.init()?;
        debug!("table reset");
        Ok(())
    }
}

// ==================== Row Parsers ====================

fn todo_from_row(row: &Row) -> std::result::Result<Todo, rusqlite::Error> {
    Ok(Todo {
        id: row.get(0)?,
        name: row.get(1)?,
        time: row.get(2)?,
        completed: row.get::<_, i64>(3)? != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        db
    }

    #[test]
    fn test_init_is_idempotent() {
        let db = setup();
        db.insert_todo("Buy milk", "21/05/2024 14:30").unwrap();

        // A second init must not touch existing data
        db.init().unwrap();

        let todos = db.list_todos().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].name, "Buy milk");
    }

    #[test]
    fn test_insert_returns_stored_row() {
        let db = setup();
        let todo = db.insert_todo("Buy milk", "21/05/2024 14:30").unwrap();

        assert!(todo.id >= 1);
        assert_eq!(todo.name, "Buy milk");
        assert_eq!(todo.time, "21/05/2024 14:30");
        assert!(!todo.completed);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let db = setup();
        let a = db.insert_todo("A", "01/01/2024 00:00").unwrap();
        let b = db.insert_todo("B", "02/01/2024 00:00").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_list_orders_by_id() {
        let db = setup();
        db.insert_todo("A", "01/01/2024 00:00").unwrap();
        db.insert_todo("B", "02/01/2024 00:00").unwrap();
        db.insert_todo("C", "03/01/2024 00:00").unwrap();

        let ids: Vec<i64> = db.list_todos().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_get_todo_missing() {
        let db = setup();
        assert!(db.get_todo(42).unwrap().is_none());
    }

    #[test]
    fn test_set_completed() {
        let db = setup();
        let todo = db.insert_todo("Test", "21/05/2024 14:30").unwrap();

        let updated = db.set_completed(todo.id, true).unwrap();
        assert!(updated.completed);

        let back = db.set_completed(todo.id, false).unwrap();
        assert!(!back.completed);
    }

    #[test]
    fn test_set_completed_missing() {
        let db = setup();
        let result = db.set_completed(42, true);
        assert!(matches!(result, Err(TodoError::TodoNotFound(42))));
    }

    #[test]
    fn test_delete_removes_only_target() {
        let db = setup();
        let a = db.insert_todo("A", "01/01/2024 00:00").unwrap();
        let b = db.insert_todo("B", "02/01/2024 00:00").unwrap();

        db.delete_todo(a.id).unwrap();

        let todos = db.list_todos().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, b.id);
        assert_eq!(todos[0].name, "B");
        assert_eq!(todos[0].time, "02/01/2024 00:00");
    }

    #[test]
    fn test_delete_missing() {
        let db = setup();
        let result = db.delete_todo(42);
        assert!(matches!(result, Err(TodoError::TodoNotFound(42))));
    }

    #[test]
    fn test_reset_discards_rows() {
        let db = setup();
        db.insert_todo("A", "01/01/2024 00:00").unwrap();
        db.insert_todo("B", "02/01/2024 00:00").unwrap();

        db.reset().unwrap();

        assert!(db.list_todos().unwrap().is_empty());
    }

    #[test]
    fn test_reset_restarts_autoincrement() {
        let db = setup();
        db.insert_todo("A", "01/01/2024 00:00").unwrap();
        db.reset().unwrap();

        let todo = db.insert_todo("B", "02/01/2024 00:00").unwrap();
        assert_eq!(todo.id, 1);
    }
}
