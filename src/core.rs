use crate::db::Database;
use crate::error::{Result, TodoError};
use crate::models::Todo;
use std::path::Path;
use tracing::debug;

/// Presentation-layer state: the current snapshot of all todos plus the
/// store it mirrors. The snapshot is fully replaced after every mutation
/// rather than patched in place.
pub struct TodoList {
    db: Database,
    todos: Vec<Todo>,
}

impl TodoList {
    /// Open the store at `path`, ensure the schema, and load the snapshot.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Database::open(path)?;
        db.init()?;

        let mut list = TodoList {
            db,
            todos: Vec::new(),
        };
        list.reload()?;
        Ok(list)
    }

    /// Current snapshot, in id order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Number of completed todos in the snapshot.
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Replace the snapshot with a fresh read of the whole table.
    pub fn reload(&mut self) -> Result<()> {
        self.todos = self.db.list_todos()?;
        debug!(count = self.todos.len(), "snapshot reloaded");
        Ok(())
    }

    /// Add a new todo.
    ///
    /// Blank names and blank due times are rejected without touching the
    /// store. A failed insert leaves the snapshot at its previous value.
    pub fn add(&mut self, name: &str, time: &str) -> Result<Todo> {
        if name.trim().is_empty() {
            return Err(TodoError::EmptyName);
        }
        if time.trim().is_empty() {
            return Err(TodoError::MissingDue);
        }

        let todo = self.db.insert_todo(name, time)?;
        self.reload()?;
        Ok(todo)
    }

    /// Flip the completion flag of one todo and persist it.
    pub fn toggle(&mut self, id: i64) -> Result<Todo> {
        let completed = match self.todos.iter().find(|t| t.id == id) {
            Some(t) => !t.completed,
            // Snapshot may be stale; fall back to the store
            None => {
                !self
                    .db
                    .get_todo(id)?
                    .ok_or(TodoError::TodoNotFound(id))?
                    .completed
            }
        };

        let todo = self.db.set_completed(id, completed)?;
        self.reload()?;
        Ok(todo)
    }

    /// Delete one todo by id.
    pub fn remove(&mut self, id: i64) -> Result<()> {
        self.db.delete_todo(id)?;
        self.reload()?;
        Ok(())
    }

    /// Drop all todos and start over.
    pub fn reset(&mut self) -> Result<()> {
        self.db.reset()?;
        self.reload()?;
        Ok(())
    }
}
