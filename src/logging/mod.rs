// Session logging — planner and executor events as daily JSONL
//
// One line per event under ~/.studyhall/session_YYYY-MM-DD.jsonl.
// Front ends log best-effort; a failed write never interrupts a session.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::planner::Schedule;

/// An event recorded over one planning session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A front end opened a session
    SessionStart { front_end: String },
    /// Planner produced a schedule
    Planned {
        scheduled: usize,
        backlogged: usize,
        minutes: u32,
        /// Scheduled task ids, so repeated names stay distinguishable
        task_ids: Vec<String>,
    },
    /// Retrieval bound its lookup strategy for the session
    RetrievalBound { strategy: String },
    /// Corpus documents were chunked into the note index
    CorpusIngested { source: String, chunks: usize },
    /// Executor began narrating
    ExecutionStart { blocks: usize },
    /// Executor finished (skipped = backlog announcements)
    ExecutionDone { blocks: usize, skipped: usize },
}

impl SessionEvent {
    /// Summarize a planned schedule
    pub fn planned(schedule: &Schedule) -> Self {
        SessionEvent::Planned {
            scheduled: schedule.blocks.len(),
            backlogged: schedule.backlog.len(),
            minutes: schedule.scheduled_minutes(),
            task_ids: schedule
                .blocks
                .iter()
                .map(|b| b.task.id.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    ts: String,
    #[serde(flatten)]
    event: &'a SessionEvent,
}

/// Appends session events to a daily JSONL file
pub struct SessionLogger {
    log_dir: PathBuf,
}

impl SessionLogger {
    /// Create a logger writing under ~/.studyhall/
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let log_dir = home.join(".studyhall");
        std::fs::create_dir_all(&log_dir).context("Failed to create ~/.studyhall directory")?;
        Ok(Self { log_dir })
    }

    /// Log an event
    pub fn log(&self, event: SessionEvent) -> Result<()> {
        let ts = Utc::now().to_rfc3339();
        let line = LogLine { ts, event: &event };
        let json = serde_json::to_string(&line).context("Failed to serialize session event")?;

        let path = self.today_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open session log: {}", path.display()))?;
        writeln!(file, "{}", json).context("Failed to write session event")?;
        Ok(())
    }

    /// Path of today's log file
    pub fn today_path(&self) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d").to_string();
        self.log_dir.join(format!("session_{}.jsonl", date))
    }

    /// Logger writing to an arbitrary directory (for testing)
    #[cfg(test)]
    pub fn with_dir(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }
}
