// Field parsers — turn raw prompt answers into validated task fields
//
// Shared by the interactive CLI (one field per prompt) and the web form
// (one task per line). Every rejection is a typed ParseError so callers
// can re-prompt instead of aborting.

use chrono::NaiveDate;

use super::{ParseError, Task, IMPORTANCE_MAX, IMPORTANCE_MIN};

/// Parse a duration answer into whole minutes.
///
/// Accepts plain minutes ("90") plus "90m", "2h" and "1h30m" forms.
pub fn parse_duration(raw: &str) -> Result<u32, ParseError> {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return Err(ParseError::InvalidDuration(raw.trim().to_string()));
    }
    let invalid = || ParseError::InvalidDuration(raw.trim().to_string());

    let minutes = if let Some((hours, rest)) = s.split_once('h') {
        let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
        let rest = rest.trim().trim_end_matches('m');
        let mins: u32 = if rest.is_empty() {
            0
        } else {
            rest.trim().parse().map_err(|_| invalid())?
        };
        if mins >= 60 {
            return Err(invalid());
        }
        hours * 60 + mins
    } else {
        let digits = s.trim_end_matches('m');
        digits.trim().parse().map_err(|_| invalid())?
    };

    if minutes == 0 {
        return Err(ParseError::ZeroDuration);
    }
    Ok(minutes)
}

/// Parse an importance answer (1-5).
pub fn parse_importance(raw: &str) -> Result<u8, ParseError> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidImportance(raw.trim().to_string()))?;
    if !(IMPORTANCE_MIN..=IMPORTANCE_MAX).contains(&value) {
        return Err(ParseError::ImportanceOutOfRange(value));
    }
    Ok(value)
}

/// Parse a deadline answer. Empty input means no deadline.
pub fn parse_deadline(raw: &str) -> Result<Option<NaiveDate>, ParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ParseError::InvalidDeadline(s.to_string()))
}

/// Parse one form line: "name, minutes, importance[, deadline]".
///
/// Task names with commas are not supported in line form; use the
/// interactive prompt or a task file for those.
pub fn parse_task_line(line: &str) -> Result<Task, ParseError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(ParseError::MalformedLine(line.trim().to_string()));
    }
    let duration = parse_duration(parts[1])?;
    let importance = parse_importance(parts[2])?;
    let deadline = if parts.len() == 4 {
        parse_deadline(parts[3])?
    } else {
        None
    };
    Task::new(parts[0], duration, importance, deadline)
}
