// Deterministic placement of tasks into one working day
//
// Ordering: higher importance first, then earlier deadline (tasks with no
// deadline sort last), then input order. Blocks are placed back to back
// from the day start. A task that exceeds the remaining budget goes to
// the backlog; shorter tasks after it may still be placed. Deadlines only
// order tasks; nothing checks whether a block ends past its deadline.

pub mod schedule;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

use crate::config::constants::{DEFAULT_AVAILABLE_HOURS, DEFAULT_DAY_START};
use crate::tasks::Task;
pub use schedule::{Schedule, ScheduleBlock};

/// Planning window for a single day
#[derive(Debug, Clone, Copy)]
pub struct DayWindow {
    pub start: NaiveTime,
    pub available_minutes: u32,
}

impl DayWindow {
    pub fn new(start: NaiveTime, available_hours: u32) -> Self {
        Self {
            start,
            available_minutes: available_hours * 60,
        }
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        // DEFAULT_DAY_START is a valid "HH:MM" literal
        let start = NaiveTime::parse_from_str(DEFAULT_DAY_START, "%H:%M").unwrap_or_default();
        Self::new(start, DEFAULT_AVAILABLE_HOURS)
    }
}

/// Produces the same schedule for the same task list every time
pub struct Planner {
    window: DayWindow,
}

impl Planner {
    pub fn new(window: DayWindow) -> Self {
        Self { window }
    }

    /// Order tasks by priority and fill the day window front to back
    pub fn plan(&self, tasks: Vec<Task>) -> Schedule {
        let mut ordered = tasks;
        // Stable sort: tasks tied on importance and deadline keep input order
        ordered.sort_by(|a, b| {
            b.importance
                .cmp(&a.importance)
                .then_with(|| deadline_rank(a).cmp(&deadline_rank(b)))
        });

        let mut blocks = Vec::new();
        let mut backlog = Vec::new();
        let mut cursor = self.window.start;
        let mut remaining = self.window.available_minutes;

        for task in ordered {
            if task.duration_minutes > remaining {
                debug!(
                    task = %task.name,
                    minutes = task.duration_minutes,
                    remaining,
                    "task exceeds remaining day budget, backlogged"
                );
                backlog.push(task);
                continue;
            }
            let start = cursor;
            let end = start + Duration::minutes(i64::from(task.duration_minutes));
            remaining -= task.duration_minutes;
            cursor = end;
            blocks.push(ScheduleBlock { task, start, end });
        }

        Schedule {
            day_start: self.window.start,
            blocks,
            backlog,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(DayWindow::default())
    }
}

// Tasks without a deadline sort after every dated task
fn deadline_rank(task: &Task) -> NaiveDate {
    task.deadline.unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn task(name: &str, minutes: u32, importance: u8) -> Task {
        Task::new(name, minutes, importance, None).unwrap()
    }

    fn dated(name: &str, minutes: u32, importance: u8, ymd: (i32, u32, u32)) -> Task {
        let deadline = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        Task::new(name, minutes, importance, Some(deadline)).unwrap()
    }

    fn names(schedule: &Schedule) -> Vec<&str> {
        schedule.blocks.iter().map(|b| b.task.name.as_str()).collect()
    }

    // ── ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn test_higher_importance_first() {
        let planner = Planner::default();
        let schedule = planner.plan(vec![
            task("low", 30, 1),
            task("high", 30, 5),
            task("mid", 30, 3),
        ]);
        assert_eq!(names(&schedule), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_deadline_breaks_importance_ties() {
        let planner = Planner::default();
        let schedule = planner.plan(vec![
            dated("later", 30, 4, (2026, 9, 20)),
            dated("sooner", 30, 4, (2026, 9, 10)),
        ]);
        assert_eq!(names(&schedule), vec!["sooner", "later"]);
    }

    #[test]
    fn test_no_deadline_sorts_after_dated() {
        let planner = Planner::default();
        let schedule = planner.plan(vec![
            task("undated", 30, 4),
            dated("dated", 30, 4, (2026, 12, 31)),
        ]);
        assert_eq!(names(&schedule), vec!["dated", "undated"]);
    }

    #[test]
    fn test_past_deadline_still_scheduled() {
        // A deadline behind today ranks the task sooner; no feasibility check
        let planner = Planner::default();
        let schedule = planner.plan(vec![
            dated("current", 60, 3, (2026, 9, 1)),
            dated("overdue", 120, 3, (2020, 1, 1)),
        ]);
        assert_eq!(names(&schedule), vec!["overdue", "current"]);
        assert_eq!(schedule.blocks[0].end, time(11, 0));
        assert!(schedule.backlog.is_empty());
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let planner = Planner::default();
        let schedule = planner.plan(vec![
            task("first", 20, 3),
            task("second", 20, 3),
            task("third", 20, 3),
        ]);
        assert_eq!(names(&schedule), vec!["first", "second", "third"]);
    }

    // ── placement ─────────────────────────────────────────────────────────────

    #[test]
    fn test_blocks_are_contiguous_from_day_start() {
        let planner = Planner::default();
        let schedule = planner.plan(vec![task("a", 60, 5), task("b", 45, 4), task("c", 30, 3)]);

        assert_eq!(schedule.blocks[0].start, time(9, 0));
        assert_eq!(schedule.blocks[0].end, time(10, 0));
        assert_eq!(schedule.blocks[1].start, time(10, 0));
        assert_eq!(schedule.blocks[1].end, time(10, 45));
        assert_eq!(schedule.blocks[2].start, time(10, 45));
        assert_eq!(schedule.blocks[2].end, time(11, 15));
    }

    #[test]
    fn test_custom_window() {
        let planner = Planner::new(DayWindow::new(time(14, 30), 2));
        let schedule = planner.plan(vec![task("a", 45, 3)]);
        assert_eq!(schedule.blocks[0].start, time(14, 30));
        assert_eq!(schedule.blocks[0].end, time(15, 15));
    }

    #[test]
    fn test_empty_input_gives_empty_schedule() {
        let planner = Planner::default();
        let schedule = planner.plan(vec![]);
        assert!(schedule.is_empty());
    }

    // ── day budget ────────────────────────────────────────────────────────────

    #[test]
    fn test_oversized_task_goes_to_backlog() {
        let planner = Planner::new(DayWindow::new(time(9, 0), 1));
        let schedule = planner.plan(vec![task("marathon", 90, 5), task("quick", 30, 1)]);
        assert_eq!(names(&schedule), vec!["quick"]);
        assert_eq!(schedule.backlog.len(), 1);
        assert_eq!(schedule.backlog[0].name, "marathon");
    }

    #[test]
    fn test_backlogged_task_frees_no_time() {
        // 8h budget: 7h fits, the 2h task does not, the final 1h does
        let planner = Planner::default();
        let schedule = planner.plan(vec![
            task("seven hours", 420, 5),
            task("two hours", 120, 4),
            task("one hour", 60, 3),
        ]);
        assert_eq!(names(&schedule), vec!["seven hours", "one hour"]);
        assert_eq!(schedule.backlog[0].name, "two hours");
        // Placed block still starts where the backlogged task would have
        assert_eq!(schedule.blocks[1].start, time(16, 0));
    }

    #[test]
    fn test_exact_fit_consumes_whole_budget() {
        let planner = Planner::new(DayWindow::new(time(9, 0), 2));
        let schedule = planner.plan(vec![task("a", 60, 5), task("b", 60, 4)]);
        assert_eq!(schedule.blocks.len(), 2);
        assert!(schedule.backlog.is_empty());
        assert_eq!(schedule.scheduled_minutes(), 120);
    }

    // ── determinism ───────────────────────────────────────────────────────────

    #[test]
    fn test_same_input_same_schedule() {
        let planner = Planner::default();
        let tasks = vec![
            dated("Study Machine Learning", 60, 5, (2026, 9, 1)),
            dated("Review Compiler Design", 45, 4, (2026, 9, 1)),
            task("Practice Networking", 30, 3),
        ];
        let first = planner.plan(tasks.clone());
        let second = planner.plan(tasks);
        assert_eq!(first.render(), second.render());
    }
}
