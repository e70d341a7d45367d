//! REST API handlers for runhub-server, plus the embedded console.

use std::sync::{RwLockReadGuard, RwLockWriteGuard};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use runhub_core::api::{
    parse_bearer, DeleteRunsRequest, Empty, GetProjectRepoRequest, GetRunRequest,
    StopRunsRequest,
};
use runhub_core::error::{ErrorBody, RunhubError, ServerErrorCode};
use runhub_core::{RepoHead, Run, User};

use crate::fixture::Fixture;
use crate::state::AppState;

// ─── Router ──────────────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/info", post(get_user_data))
        .route("/project/{project}/repos/get", post(get_project_repo))
        .route("/project/{project}/runs/get", post(get_run))
        .route("/project/{project}/runs/stop", post(stop_runs))
        .route("/project/{project}/runs/delete", post(delete_runs))
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Error response in the backend's `{"detail": [...]}` shape.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiFailure {
    fn new(status: StatusCode, code: ServerErrorCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::single(code, msg),
        }
    }

    fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ServerErrorCode::InvalidCredentials,
            "Invalid credentials",
        )
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<RunhubError> for ApiFailure {
    fn from(err: RunhubError) -> Self {
        let status = match &err {
            RunhubError::ProjectNotFound(_)
            | RunhubError::RepoNotFound(_)
            | RunhubError::RunNotFound(_) => StatusCode::NOT_FOUND,
            RunhubError::RunNotFinished(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, ServerErrorCode::ServerError, err.to_string())
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn read(state: &AppState) -> Result<RwLockReadGuard<'_, Fixture>, ApiFailure> {
    state.fixture.read().map_err(|_| {
        ApiFailure::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ServerErrorCode::ServerError,
            "fixture store poisoned",
        )
    })
}

fn write(state: &AppState) -> Result<RwLockWriteGuard<'_, Fixture>, ApiFailure> {
    state.fixture.write().map_err(|_| {
        ApiFailure::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ServerErrorCode::ServerError,
            "fixture store poisoned",
        )
    })
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<User, ApiFailure> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer)
        .ok_or_else(ApiFailure::unauthorized)?;
    read(state)?
        .authenticate(token)
        .ok_or_else(ApiFailure::unauthorized)
}

// ─── Handlers ────────────────────────────────────────────────────────────────

async fn get_user_data(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, ApiFailure> {
    authorize(&state, &headers).map(Json)
}

async fn get_project_repo(
    State(state): State<AppState>,
    Path(project): Path<String>,
    headers: HeaderMap,
    Json(req): Json<GetProjectRepoRequest>,
) -> Result<Json<RepoHead>, ApiFailure> {
    authorize(&state, &headers)?;
    let fixture = read(&state)?;
    let repo = fixture.repo(&project, &req.repo_id)?;
    Ok(Json(repo.head.clone()))
}

async fn get_run(
    State(state): State<AppState>,
    Path(project): Path<String>,
    headers: HeaderMap,
    Json(req): Json<GetRunRequest>,
) -> Result<Json<Run>, ApiFailure> {
    authorize(&state, &headers)?;
    let run = read(&state)?.run(&project, &req.repo_id, &req.run_name)?;
    Ok(Json(run))
}

async fn stop_runs(
    State(state): State<AppState>,
    Path(project): Path<String>,
    headers: HeaderMap,
    Json(req): Json<StopRunsRequest>,
) -> Result<Json<Empty>, ApiFailure> {
    let user = authorize(&state, &headers)?;
    let changed = write(&state)?.stop_runs(&project, &req.repo_id, &req.run_names, req.abort)?;
    info!(
        user = %user.user_name,
        project = %project,
        runs = ?req.run_names,
        abort = req.abort,
        changed,
        "stop runs"
    );
    Ok(Json(Empty {}))
}

async fn delete_runs(
    State(state): State<AppState>,
    Path(project): Path<String>,
    headers: HeaderMap,
    Json(req): Json<DeleteRunsRequest>,
) -> Result<Json<Empty>, ApiFailure> {
    let user = authorize(&state, &headers)?;
    match write(&state)?.delete_runs(&project, &req.repo_id, &req.run_names) {
        Ok(deleted) => {
            info!(user = %user.user_name, project = %project, runs = ?req.run_names, deleted, "delete runs");
            Ok(Json(Empty {}))
        }
        Err(e) => {
            warn!(project = %project, "delete runs refused: {}", e);
            Err(e.into())
        }
    }
}

// ─── Frontend (embedded) ─────────────────────────────────────────────────────

/// Serve the embedded console. Unknown paths get `index.html` so client-side
/// routes survive a reload.
pub async fn serve_frontend(uri: axum::http::Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    let (actual_path, content) = match Assets::get(path) {
        Some(content) => (path, content),
        None => match Assets::get("index.html") {
            Some(content) => ("index.html", content),
            None => return StatusCode::NOT_FOUND.into_response(),
        },
    };

    let mime = mime_guess::from_path(actual_path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(content.data.into_owned()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[derive(rust_embed::Embed)]
#[folder = "../../frontend/dist"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.wasm"]
struct Assets;
