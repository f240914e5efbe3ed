// Interactive task entry and task-file planning

pub mod prompt;

use anyhow::Result;
use crossterm::style::Stylize;
use std::path::Path;
use tracing::warn;

use crate::config::constants::DONE_SENTINEL;
use crate::config::Config;
use crate::executor::{ConsoleSink, Executor};
use crate::logging::{SessionEvent, SessionLogger};
use crate::planner::{Planner, Schedule};
use crate::retrieval::session_index;
use crate::tasks::{self, input, ParseError, Task};
use prompt::Prompt;

/// Run one interactive planning session: collect tasks, plan, narrate
pub fn run_interactive(config: &Config) -> Result<()> {
    let mut prompt = Prompt::new();
    if prompt.is_interactive() {
        println!("{}", "studyhall: plan one study day".bold());
        println!(
            "Enter tasks one by one; type '{}' as the name to finish.",
            DONE_SENTINEL
        );
        println!();
    }

    let collected = collect_tasks(&mut prompt)?;
    if collected.is_empty() {
        println!("No tasks to schedule.");
        return Ok(());
    }

    run_session(config, collected, "cli", true)
}

/// Plan a TOML task file; narrate it too when `execute` is set
pub fn run_taskfile(config: &Config, path: &Path, execute: bool) -> Result<()> {
    let tasks = tasks::file::load_tasks(path)?;
    if tasks.is_empty() {
        println!("No tasks to schedule.");
        return Ok(());
    }
    run_session(config, tasks, "taskfile", execute)
}

fn run_session(config: &Config, tasks: Vec<Task>, front_end: &str, execute: bool) -> Result<()> {
    // Logging is best-effort: a read-only home directory costs the
    // session log, never the session
    let logger = SessionLogger::new()
        .map_err(|err| warn!(error = %err, "session logging disabled"))
        .ok();
    if let Some(l) = &logger {
        let _ = l.log(SessionEvent::SessionStart {
            front_end: front_end.to_string(),
        });
    }

    let schedule = Planner::new(config.day_window()).plan(tasks);
    if let Some(l) = &logger {
        let _ = l.log(SessionEvent::planned(&schedule));
    }
    print_schedule(&schedule);

    if !execute {
        return Ok(());
    }

    let index = session_index(&config.retrieval, logger.as_ref());

    println!();
    println!("{}", "Running executor".bold());
    if let Some(l) = &logger {
        let _ = l.log(SessionEvent::ExecutionStart {
            blocks: schedule.blocks.len(),
        });
    }

    let executor = Executor::new(config.executor.pause_ms);
    executor.run(&schedule, Some(&index), &mut ConsoleSink::new());

    if let Some(l) = &logger {
        let _ = l.log(SessionEvent::ExecutionDone {
            blocks: schedule.blocks.len(),
            skipped: schedule.backlog.len(),
        });
    }
    Ok(())
}

fn collect_tasks(prompt: &mut Prompt) -> Result<Vec<Task>> {
    let mut collected = Vec::new();
    loop {
        let Some(name) = prompt.line("Task name: ")? else {
            break;
        };
        if name.eq_ignore_ascii_case(DONE_SENTINEL) {
            break;
        }
        if name.is_empty() {
            eprintln!("✗ {}", ParseError::EmptyName);
            continue;
        }

        let Some(duration) = prompt.field("Duration (minutes): ", input::parse_duration)? else {
            break;
        };
        let Some(importance) = prompt.field("Importance (1-5): ", input::parse_importance)?
        else {
            break;
        };
        let Some(deadline) =
            prompt.field("Deadline (YYYY-MM-DD, empty for none): ", input::parse_deadline)?
        else {
            break;
        };

        match Task::new(&name, duration, importance, deadline) {
            Ok(task) => {
                println!(
                    "  {}",
                    format!("Added {} ({} min, importance {})", task.name, duration, importance)
                        .dark_grey()
                );
                println!();
                collected.push(task);
            }
            Err(err) => eprintln!("✗ {}", err),
        }
    }
    Ok(collected)
}

fn print_schedule(schedule: &Schedule) {
    println!();
    println!("{}", "Planned schedule".bold());
    print!("{}", schedule.render());
}
