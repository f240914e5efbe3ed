// Executor agent — narrates a planned schedule in block order
//
// Execution is simulated. Each block emits a start event, the retrieved
// study note (when an index is attached), a configurable pause, and a
// finish event. Backlogged tasks are announced as skipped at the end.

use std::thread;
use std::time::Duration;

use chrono::NaiveTime;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::planner::Schedule;
use crate::retrieval::NoteIndex;

/// One narration step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExecutionEvent {
    Started { task: String, at: String },
    Note { task: String, text: String },
    Finished { task: String, at: String },
    SkippedBacklog { task: String },
}

impl ExecutionEvent {
    /// Plain-text line shared by every sink
    pub fn to_line(&self) -> String {
        match self {
            ExecutionEvent::Started { task, at } => format!("Starting: {task} at {at}"),
            ExecutionEvent::Note { text, .. } => format!("Study note: {text}"),
            ExecutionEvent::Finished { task, at } => format!("Finished: {task} at {at}"),
            ExecutionEvent::SkippedBacklog { task } => {
                format!("Skipping backlog task: {task}")
            }
        }
    }
}

/// Where narration goes; each front end brings its own sink
pub trait EventSink {
    fn emit(&mut self, event: &ExecutionEvent);

    /// Fill the gap between start and finish of a block
    fn working(&mut self, _task: &str, pause: Duration) {
        thread::sleep(pause);
    }
}

/// Walks a schedule in order; never reorders, never skips a placed block
pub struct Executor {
    pause: Duration,
}

impl Executor {
    pub fn new(pause_ms: u64) -> Self {
        Self {
            pause: Duration::from_millis(pause_ms),
        }
    }

    pub fn run(&self, schedule: &Schedule, notes: Option<&NoteIndex>, sink: &mut dyn EventSink) {
        for block in &schedule.blocks {
            let name = &block.task.name;
            sink.emit(&ExecutionEvent::Started {
                task: name.clone(),
                at: fmt_time(block.start),
            });
            if let Some(index) = notes {
                sink.emit(&ExecutionEvent::Note {
                    task: name.clone(),
                    text: index.retrieve(name),
                });
            }
            if !self.pause.is_zero() {
                sink.working(name, self.pause);
            }
            sink.emit(&ExecutionEvent::Finished {
                task: name.clone(),
                at: fmt_time(block.end),
            });
        }
        for task in &schedule.backlog {
            sink.emit(&ExecutionEvent::SkippedBacklog {
                task: task.name.clone(),
            });
        }
    }
}

fn fmt_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Styled terminal narration with a spinner while a block "runs"
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &ExecutionEvent) {
        let line = event.to_line();
        match event {
            ExecutionEvent::Started { .. } => println!("▶ {}", line.bold()),
            ExecutionEvent::Note { .. } => println!("  {}", line.dark_grey()),
            ExecutionEvent::Finished { .. } => println!("✓ {}", line.green()),
            ExecutionEvent::SkippedBacklog { .. } => println!("⏭ {}", line.yellow()),
        }
    }

    fn working(&mut self, task: &str, pause: Duration) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("  {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(task.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        thread::sleep(pause);
        bar.finish_and_clear();
    }
}

/// Collects narration lines; used by the web front end and tests
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl EventSink for BufferSink {
    fn emit(&mut self, event: &ExecutionEvent) {
        self.lines.push(event.to_line());
    }

    // Nothing to animate and nobody waiting at a terminal
    fn working(&mut self, _task: &str, _pause: Duration) {}
}
