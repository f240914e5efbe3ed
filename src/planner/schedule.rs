// Schedule types — contiguous time blocks for one working day

use chrono::NaiveTime;
use std::fmt;

use crate::tasks::Task;

/// One placed task: [start, end) on the planning day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub task: Task,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl fmt::Display for ScheduleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.task.name
        )
    }
}

/// Output of one planning run: ordered blocks plus whatever did not fit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub day_start: NaiveTime,
    pub blocks: Vec<ScheduleBlock>,
    pub backlog: Vec<Task>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.backlog.is_empty()
    }

    /// Minutes of placed work (backlog excluded)
    pub fn scheduled_minutes(&self) -> u32 {
        self.blocks.iter().map(|b| b.task.duration_minutes).sum()
    }

    /// Deterministic text rendering shared by both front ends
    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str(&block.to_string());
            out.push('\n');
        }
        for task in &self.backlog {
            out.push_str(&format!(
                "BACKLOG: {} ({} min)\n",
                task.name, task.duration_minutes
            ));
        }
        out
    }
}
