//! Table builder wrapper around comfy-table for consistent list display.

use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

use crate::cli::output::truncate;
use crate::domain::models::{MentorCallNote, Priority, Task};

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| {
            Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)
        }));
    table
}

fn priority_cell(priority: Priority) -> Cell {
    let color = match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    };
    Cell::new(priority.label()).fg(color)
}

pub fn task_table(tasks: &[Task]) -> Table {
    let mut table = list_table(&["key", "name", "priority", "due", "status", "description"]);
    for task in tasks {
        table.add_row(vec![
            Cell::new(task.key.short()),
            Cell::new(truncate(&task.name, 40)),
            priority_cell(task.priority),
            Cell::new(task.due_date.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)),
            if task.completed {
                Cell::new("done").fg(Color::DarkGrey)
            } else {
                Cell::new("open")
            },
            Cell::new(truncate(&task.description, 40)),
        ]);
    }
    table
}

pub fn note_table(notes: &[MentorCallNote]) -> Table {
    let mut table = list_table(&["id", "date", "notes"]);
    for note in notes {
        table.add_row(vec![
            Cell::new(note.id),
            Cell::new(note.due_date.as_str()),
            Cell::new(truncate(&note.description, 60)),
        ]);
    }
    table
}

/// Render the table to string with a count header.
pub fn render_list(entity_name: &str, table: Table, total: usize) -> String {
    if total == 0 {
        return format!("No {entity_name}s found.");
    }
    let count_line = format!(
        "{} {}:",
        style(total).bold(),
        if total == 1 {
            entity_name.to_string()
        } else {
            format!("{entity_name}s")
        }
    );
    format!("{count_line}\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DueDate, TaskKey};
    use chrono::Utc;

    #[test]
    fn test_task_table_shows_short_key_and_date() {
        let task = Task {
            key: TaskKey::new("0123456789abcdef"),
            name: "Write report".to_string(),
            description: String::new(),
            due_date: Some(DueDate::new("2024-01-10")),
            priority: Priority::High,
            completed: false,
            created_at: Utc::now(),
        };
        let rendered = task_table(&[task]).to_string();
        assert!(rendered.contains("01234567"));
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(rendered.contains("2024-01-10"));
        assert!(rendered.contains("High"));
    }

    #[test]
    fn test_render_list_empty() {
        assert_eq!(render_list("note", note_table(&[]), 0), "No notes found.");
    }
}
