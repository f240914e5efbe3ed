// Project-wide constants
//
// Centralised here so schedule defaults and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default start of the planning day ("HH:MM", 24-hour clock).
pub const DEFAULT_DAY_START: &str = "09:00";

/// Default number of plannable hours in a working day.
///
/// Tasks that do not fit inside this window are reported as backlog
/// rather than scheduled past the end of the day.
pub const DEFAULT_AVAILABLE_HOURS: u32 = 8;

/// Default simulated pause per executed block, in milliseconds.
///
/// Execution is a narration, not real work; the pause makes the
/// progression readable in a terminal. Set to 0 to disable.
pub const DEFAULT_PAUSE_MS: u64 = 1000;

/// Default bind address for the web form front end (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8787";

/// Character length of the chunks ingestion splits note documents into.
pub const CHUNK_SIZE: usize = 800;

/// Cosine similarity floor below which an embedding match is rejected
/// and lookup falls through to keyword matching.
pub const DEFAULT_SIMILARITY_FLOOR: f32 = 0.35;

/// Fixed reply when no note matches a task name under any strategy.
pub const NO_NOTE_FOUND: &str = "No relevant notes found.";

/// Input sentinel that ends task entry in the interactive prompt.
pub const DONE_SENTINEL: &str = "done";
