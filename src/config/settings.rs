// Configuration structs

use anyhow::bail;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::*;
use crate::planner::DayWindow;

/// Planner defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Start of the planning day, "HH:MM" 24-hour clock
    #[serde(default = "default_day_start")]
    pub day_start: String,

    /// Plannable hours per day; overflow goes to the backlog
    #[serde(default = "default_available_hours")]
    pub available_hours: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            day_start: DEFAULT_DAY_START.to_string(),
            available_hours: DEFAULT_AVAILABLE_HOURS,
        }
    }
}

/// Executor behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorSettings {
    /// Simulated pause per block in milliseconds (0 disables)
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            pause_ms: DEFAULT_PAUSE_MS,
        }
    }
}

/// Retrieval behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Probe the embedding backend at session start
    #[serde(default = "default_true")]
    pub embeddings: bool,

    /// Cosine floor under which embedding hits defer to keywords
    #[serde(default = "default_similarity_floor")]
    pub similarity_floor: f32,

    /// Optional corpus file or directory ingested at session start
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            embeddings: true,
            similarity_floor: DEFAULT_SIMILARITY_FLOOR,
            corpus_path: None,
        }
    }
}

/// Web front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address, "IP:PORT"
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

fn default_day_start() -> String {
    DEFAULT_DAY_START.to_string()
}

fn default_available_hours() -> u32 {
    DEFAULT_AVAILABLE_HOURS
}

fn default_pause_ms() -> u64 {
    DEFAULT_PAUSE_MS
}

fn default_true() -> bool {
    true
}

fn default_similarity_floor() -> f32 {
    DEFAULT_SIMILARITY_FLOOR
}

fn default_bind_address() -> String {
    DEFAULT_HTTP_ADDR.to_string()
}

/// Full application configuration; every section is optional in TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerSettings,

    #[serde(default)]
    pub executor: ExecutorSettings,

    #[serde(default)]
    pub retrieval: RetrievalSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

impl Config {
    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        if NaiveTime::parse_from_str(&self.planner.day_start, "%H:%M").is_err() {
            bail!(
                "Invalid day_start '{}': expected \"HH:MM\" (e.g. \"09:00\")",
                self.planner.day_start
            );
        }

        if self.planner.available_hours == 0 || self.planner.available_hours > 24 {
            bail!(
                "available_hours ({}) must be between 1 and 24",
                self.planner.available_hours
            );
        }

        if self.executor.pause_ms > 60_000 {
            bail!(
                "pause_ms ({}) is unreasonably high; keep it under a minute",
                self.executor.pause_ms
            );
        }

        if !(0.0..=1.0).contains(&self.retrieval.similarity_floor) {
            bail!(
                "similarity_floor ({}) must be between 0.0 and 1.0",
                self.retrieval.similarity_floor
            );
        }

        if let Some(ref path) = self.retrieval.corpus_path {
            if !path.exists() {
                bail!("corpus_path does not exist: {}", path.display());
            }
        }

        if !self.server.bind_address.contains(':') {
            bail!(
                "Invalid bind address '{}': expected \"IP:PORT\" (e.g. \"127.0.0.1:8787\")",
                self.server.bind_address
            );
        }

        Ok(())
    }

    /// Parsed day start (validated configs cannot fail here)
    pub fn day_start_time(&self) -> NaiveTime {
        NaiveTime::parse_from_str(&self.planner.day_start, "%H:%M").unwrap_or_default()
    }

    /// Planning window derived from the planner section
    pub fn day_window(&self) -> DayWindow {
        DayWindow::new(self.day_start_time(), self.planner.available_hours)
    }
}
