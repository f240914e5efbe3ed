// HTTP front end serving the planning form

mod views;

use anyhow::Result;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveTime;
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::executor::{BufferSink, Executor};
use crate::logging::{SessionEvent, SessionLogger};
use crate::planner::Planner;
use crate::retrieval::{ingest, session_index, NoteIndex};
use crate::tasks::input;

/// Shared state behind every handler
///
/// The note index is session-wide: corpus uploads extend it for all
/// later requests until the server stops.
pub struct AppState {
    config: Config,
    notes: RwLock<NoteIndex>,
    logger: Option<SessionLogger>,
}

impl AppState {
    pub fn new(config: Config, notes: NoteIndex, logger: Option<SessionLogger>) -> Self {
        Self {
            config,
            notes: RwLock::new(notes),
            logger,
        }
    }
}

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/plan", post(handle_plan))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve(config: Config) -> Result<()> {
    let addr: SocketAddr = config.server.bind_address.parse()?;

    let logger = SessionLogger::new()
        .map_err(|err| warn!(error = %err, "session logging disabled"))
        .ok();
    if let Some(l) = &logger {
        let _ = l.log(SessionEvent::SessionStart {
            front_end: "web".to_string(),
        });
    }
    let notes = session_index(&config.retrieval, logger.as_ref());
    let state = Arc::new(AppState::new(config, notes, logger));

    // Corpus uploads above 4MB are rejected outright
    let app = create_router(state)
        .layer(DefaultBodyLimit::max(4 * 1024 * 1024))
        .layer(TraceLayer::new_for_http());

    tracing::info!("studyhall web front end listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<String> {
    Html(views::index_page())
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let notes = state.notes.read().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "retrieval": {
            "strategy": notes.strategy().as_str(),
            "entries": notes.len(),
        },
        "planner": {
            "day_start": state.config.planner.day_start,
            "available_hours": state.config.planner.available_hours,
        },
    }))
}

/// Collected form fields after multipart decoding
#[derive(Default)]
struct PlanForm {
    tasks: String,
    day_start: Option<String>,
    hours: Option<String>,
    uploads: Vec<(String, Vec<u8>)>,
}

async fn read_form(multipart: &mut Multipart) -> Result<PlanForm, MultipartError> {
    let mut form = PlanForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "tasks" => form.tasks = field.text().await?,
            "day_start" => form.day_start = Some(field.text().await?),
            "hours" => form.hours = Some(field.text().await?),
            "corpus" => {
                let file = field.file_name().unwrap_or("notes.txt").to_string();
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.uploads.push((file, bytes.to_vec()));
                }
            }
            // Unknown fields are ignored
            _ => {}
        }
    }
    Ok(form)
}

async fn handle_plan(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(views::problem_page(&format!("Could not read the form: {}", err))),
            )
                .into_response();
        }
    };

    // Problems annotate the page; they never fail the request
    let mut problems = Vec::new();

    let mut window = state.config.day_window();
    if let Some(raw) = trimmed(form.day_start.as_deref()) {
        match NaiveTime::parse_from_str(raw, "%H:%M") {
            Ok(start) => window.start = start,
            Err(_) => problems.push(format!(
                "day start '{}' is not HH:MM; using {}",
                raw, state.config.planner.day_start
            )),
        }
    }
    if let Some(raw) = trimmed(form.hours.as_deref()) {
        match raw.parse::<u32>() {
            Ok(hours) if (1..=24).contains(&hours) => window.available_minutes = hours * 60,
            _ => problems.push(format!(
                "available hours '{}' must be a number between 1 and 24; using {}",
                raw, state.config.planner.available_hours
            )),
        }
    }

    for (name, bytes) in form.uploads {
        // Same extension gate as on-disk corpus ingestion
        if !ingest::is_text_file(Path::new(&name)) {
            problems.push(format!("upload '{}' is not a supported note format; skipped", name));
            continue;
        }
        match String::from_utf8(bytes) {
            Ok(text) if !text.trim().is_empty() => {
                let entries = ingest::entries_from_text(&name, &text);
                let chunks = entries.len();
                state.notes.write().await.extend(entries);
                if let Some(l) = &state.logger {
                    let _ = l.log(SessionEvent::CorpusIngested {
                        source: name.clone(),
                        chunks,
                    });
                }
            }
            Ok(_) => {}
            Err(_) => problems.push(format!("upload '{}' is not plain text; skipped", name)),
        }
    }

    let mut tasks = Vec::new();
    for (lineno, line) in form.tasks.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match input::parse_task_line(line) {
            Ok(task) => tasks.push(task),
            Err(err) => problems.push(format!("line {}: {}", lineno + 1, err)),
        }
    }

    let notes = state.notes.read().await;
    if tasks.is_empty() {
        let page = views::plan_page(None, &[], &problems, notes.strategy(), notes.len());
        return Html(page).into_response();
    }

    let schedule = Planner::new(window).plan(tasks);
    if let Some(l) = &state.logger {
        let _ = l.log(SessionEvent::planned(&schedule));
        let _ = l.log(SessionEvent::ExecutionStart {
            blocks: schedule.blocks.len(),
        });
    }

    let mut sink = BufferSink::new();
    Executor::new(state.config.executor.pause_ms).run(&schedule, Some(&notes), &mut sink);

    if let Some(l) = &state.logger {
        let _ = l.log(SessionEvent::ExecutionDone {
            blocks: schedule.blocks.len(),
            skipped: schedule.backlog.len(),
        });
    }

    let page = views::plan_page(
        Some(&schedule),
        sink.lines(),
        &problems,
        notes.strategy(),
        notes.len(),
    );
    Html(page).into_response()
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
