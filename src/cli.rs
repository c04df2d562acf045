use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tick")]
#[command(about = "SQLite-backed to-do list")]
#[command(version)]
pub struct Cli {
    /// Path to the database file
    #[arg(long, global = true, default_value = "todo.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new todo
    Add {
        /// Todo name
        name: String,
        /// Due date (dd/mm/yyyy), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Due time (HH:MM), defaults to the current time
        #[arg(long)]
        time: Option<String>,
    },

    /// List all todos
    List {
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle a todo's completion flag
    Toggle {
        /// Todo id
        id: i64,
    },

    /// Delete a todo
    Delete {
        /// Todo id
        id: i64,
    },

    /// Drop and recreate the todo table, discarding all todos
    Reset,
}
