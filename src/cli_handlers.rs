use crate::core::TodoList;
use crate::error::{Result, TodoError};
use crate::models;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::path::Path;

/// Date half of a due time, as entered on the command line.
const DATE_FORMAT: &str = "%d/%m/%Y";
/// Time half of a due time, as entered on the command line.
const TIME_FORMAT: &str = "%H:%M";

/// Combine optional `--date` and `--time` arguments into a stored due
/// string. A missing half defaults to the current local date or time.
pub fn compose_due(date: Option<&str>, time: Option<&str>) -> Result<String> {
    let now = Local::now().naive_local();

    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d.trim(), DATE_FORMAT)
            .map_err(|_| TodoError::InvalidDue(d.to_string()))?,
        None => now.date(),
    };
    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t.trim(), TIME_FORMAT)
            .map_err(|_| TodoError::InvalidDue(t.to_string()))?,
        None => now.time(),
    };

    Ok(models::format_due(NaiveDateTime::new(date, time)))
}

/// Handle the add command
pub fn handle_add(db: &Path, name: &str, date: Option<&str>, time: Option<&str>) -> Result<()> {
    let due = compose_due(date, time)?;

    let mut list = TodoList::open_at(db)?;
    let todo = list.add(name, &due)?;

    println!("Added todo #{}: {}", todo.id, todo.name);
    println!("  Due: {}", todo.time);

    Ok(())
}

/// Handle the list command
pub fn handle_list(db: &Path, json: bool) -> Result<()> {
    let list = TodoList::open_at(db)?;

    if json {
        println!("{}", serde_json::to_string_pretty(list.todos())?);
        return Ok(());
    }

    println!("{}/{} Completed", list.completed_count(), list.len());

    if list.is_empty() {
        println!("No todos yet.");
        return Ok(());
    }

    for todo in list.todos() {
        println!(
            "  [#{:>3}] {} {}  ({})",
            todo.id,
            todo.icon(),
            todo.name,
            todo.time
        );
    }

    Ok(())
}

/// Handle the toggle command
pub fn handle_toggle(db: &Path, id: i64) -> Result<()> {
    let mut list = TodoList::open_at(db)?;
    let todo = list.toggle(id)?;

    if todo.completed {
        println!("Completed todo #{}: {}", todo.id, todo.name);
    } else {
        println!("Reopened todo #{}: {}", todo.id, todo.name);
    }
    println!("{}/{} Completed", list.completed_count(), list.len());

    Ok(())
}

/// Handle the delete command
pub fn handle_delete(db: &Path, id: i64) -> Result<()> {
    let mut list = TodoList::open_at(db)?;
    list.remove(id)?;

    println!("Deleted todo #{id}");

    Ok(())
}

/// Handle the reset command
pub fn handle_reset(db: &Path) -> Result<()> {
    let mut list = TodoList::open_at(db)?;
    list.reset()?;

    println!("Todo table reset");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DUE_FORMAT;

    #[test]
    fn test_compose_due_both_given() {
        let due = compose_due(Some("21/05/2024"), Some("14:30")).unwrap();
        assert_eq!(due, "21/05/2024 14:30");
    }

    #[test]
    fn test_compose_due_trims_input() {
        let due = compose_due(Some(" 21/05/2024 "), Some(" 14:30 ")).unwrap();
        assert_eq!(due, "21/05/2024 14:30");
    }

    #[test]
    fn test_compose_due_defaults_parse_back() {
        let due = compose_due(None, None).unwrap();
        assert!(NaiveDateTime::parse_from_str(&due, DUE_FORMAT).is_ok());
    }

    #[test]
    fn test_compose_due_invalid_date() {
        let result = compose_due(Some("2024-05-21"), None);
        assert!(matches!(result, Err(TodoError::InvalidDue(_))));
    }

    #[test]
    fn test_compose_due_invalid_time() {
        let result = compose_due(None, Some("2pm"));
        assert!(matches!(result, Err(TodoError::InvalidDue(_))));
    }
}
