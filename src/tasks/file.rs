// TOML task files for non-interactive planning

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{input, Task};

#[derive(Debug, Deserialize)]
struct TaskEntry {
    name: String,

    /// Estimated effort in minutes
    #[serde(alias = "duration")]
    duration_minutes: u32,

    importance: u8,

    /// Optional "YYYY-MM-DD" due date
    #[serde(default)]
    deadline: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TaskFileDoc {
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

/// Load and validate tasks from a TOML file ([[tasks]] array of tables)
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    let doc: TaskFileDoc = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse task file {}", path.display()))?;

    let mut tasks = Vec::with_capacity(doc.tasks.len());
    for (idx, entry) in doc.tasks.into_iter().enumerate() {
        let deadline = match &entry.deadline {
            Some(raw) => input::parse_deadline(raw),
            None => Ok(None),
        }
        .with_context(|| format!("task {} ({:?})", idx + 1, entry.name))?;
        let task = Task::new(&entry.name, entry.duration_minutes, entry.importance, deadline)
            .with_context(|| format!("task {} ({:?})", idx + 1, entry.name))?;
        tasks.push(task);
    }
    Ok(tasks)
}
