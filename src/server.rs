use crate::conflicts::classify;
use crate::data::{
    BlockedDay, Dataset, Group, GroupId, GroupTimetable, Holiday, LabeledEntry, ScheduleEntry,
    Subject, Teacher,
};
use crate::error::{ScheduleError, ScheduleResult};
use crate::repair::apply_holiday;
use crate::solver::generate;
use crate::store::Store;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state. The mutex keeps at most one generation or repair in
/// flight against the stored dataset.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

#[derive(Debug)]
pub enum AppError {
    Schedule(ScheduleError),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Schedule(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Schedule(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: err.code().as_str(),
                    message: err.to_string(),
                },
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "BAD_REQUEST",
                    message,
                },
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message,
                },
            ),
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: "INTERNAL_ERROR",
                    message,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

type HandlerResult<T> = Result<Json<T>, AppError>;

#[derive(Debug, Serialize)]
struct Health {
    ok: bool,
}

async fn health() -> Json<Health> {
    Json(Health { ok: true })
}

async fn list_groups(State(state): State<AppState>) -> Json<Vec<Group>> {
    Json(state.store.lock().await.dataset().groups.clone())
}

async fn list_teachers(State(state): State<AppState>) -> Json<Vec<Teacher>> {
    Json(state.store.lock().await.dataset().teachers.clone())
}

async fn list_subjects(State(state): State<AppState>) -> Json<Vec<Subject>> {
    Json(state.store.lock().await.dataset().subjects.clone())
}

async fn list_blocked_days(State(state): State<AppState>) -> Json<Vec<BlockedDay>> {
    Json(state.store.lock().await.dataset().blocked_days.clone())
}

async fn list_holidays(State(state): State<AppState>) -> Json<Vec<Holiday>> {
    Json(state.store.lock().await.dataset().holidays.clone())
}

async fn list_entries(State(state): State<AppState>) -> Json<Vec<ScheduleEntry>> {
    Json(state.store.lock().await.entries().to_vec())
}

async fn load_dataset(State(state): State<AppState>, Json(dataset): Json<Dataset>) -> Json<Dataset> {
    info!(
        "Replacing dataset: {} groups, {} teachers, {} subjects",
        dataset.groups.len(),
        dataset.teachers.len(),
        dataset.subjects.len()
    );
    let mut store = state.store.lock().await;
    store.replace_dataset(dataset);
    Json(store.dataset().clone())
}

/// Runs an engine pass on the blocking pool. Callers keep the store lock held
/// across the await so runs stay serialised.
async fn run_engine<F>(job: F) -> Result<Vec<ScheduleEntry>, AppError>
where
    F: FnOnce() -> ScheduleResult<Vec<ScheduleEntry>> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| AppError::Internal(format!("engine task failed: {e}")))?;
    Ok(result?)
}

async fn generate_handler(State(state): State<AppState>) -> HandlerResult<Vec<ScheduleEntry>> {
    let mut store = state.store.lock().await;
    let dataset = store.dataset().clone();
    let entries = run_engine(move || generate(&dataset, &[]))
        .await
        .inspect_err(|e| warn!("Generation failed: {e:?}"))?;
    info!("Generated {} entries", entries.len());
    store.replace_entries(entries.clone());
    Ok(Json(entries))
}

async fn holiday_handler(
    State(state): State<AppState>,
    Json(holiday): Json<Holiday>,
) -> HandlerResult<Vec<ScheduleEntry>> {
    if !holiday.is_in_calendar() {
        return Err(AppError::BadRequest(format!(
            "holiday {} falls outside the calendar (week {}, day {})",
            holiday.date, holiday.week_number, holiday.day
        )));
    }

    let mut store = state.store.lock().await;
    let dataset = store.dataset().clone();
    let entries = store.entries().to_vec();
    let day_off = holiday.clone();
    let repaired = run_engine(move || apply_holiday(&entries, &day_off, &dataset))
        .await
        .inspect_err(|e| warn!("Holiday repair failed: {e:?}"))?;
    store.record_holiday(holiday);
    store.replace_entries(repaired.clone());
    Ok(Json(repaired))
}

async fn view_handler(State(state): State<AppState>) -> Json<Vec<LabeledEntry>> {
    let store = state.store.lock().await;
    let dataset = store.dataset();
    Json(classify(store.entries(), &dataset.subjects, &dataset.teachers))
}

async fn timetable_handler(
    State(state): State<AppState>,
    Path(group_id): Path<GroupId>,
) -> HandlerResult<GroupTimetable> {
    let store = state.store.lock().await;
    store
        .group_timetable(group_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("group {group_id} not found")))
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/groups", get(list_groups))
        .route("/teachers", get(list_teachers))
        .route("/subjects", get(list_subjects))
        .route("/blocked-days", get(list_blocked_days))
        .route("/holidays", get(list_holidays))
        .route("/schedule", get(list_entries))
        .route("/dataset", put(load_dataset))
        .route("/schedule/generate", post(generate_handler))
        .route("/schedule/holiday", post(holiday_handler))
        .route("/schedule/view", get(view_handler))
        .route("/schedule/groups/:group_id/timetable", get(timetable_handler));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

pub async fn run_server(addr: &str, store: Store) -> std::io::Result<()> {
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}
