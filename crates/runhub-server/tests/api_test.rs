//! API tests for runhub-server, driven through the router with `oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use runhub_core::api::{self, ApiRequest, GetRunRequest, GetUserDataRequest};
use runhub_core::{ApiError, RunStatus};
use runhub_server::build_router;
use runhub_server::fixture::Fixture;
use runhub_server::state::AppState;

const TOKEN: &str = "runhub-dev-token";

fn app() -> (Router, AppState) {
    let state = AppState::new(Fixture::sample());
    (build_router(state.clone()), state)
}

async fn post(app: &Router, path: &str, token: Option<&str>, body: Value) -> (StatusCode, String) {
    let mut req = Request::post(path).header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, api::bearer(t));
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_user_info_with_valid_token() {
    let (app, _) = app();
    let (status, body) = post(&app, &GetUserDataRequest {}.path(), Some(TOKEN), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let user = api::decode::<GetUserDataRequest>(status.as_u16(), &body).unwrap();
    assert_eq!(user.user_name, "admin");
    assert!(user.token.is_none(), "token must not be echoed back");
}

#[tokio::test]
async fn test_user_info_rejects_bad_or_missing_token() {
    let (app, _) = app();
    for token in [Some("wrong"), None] {
        let (status, body) = post(&app, "/api/users/info", token, json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            api::decode::<GetUserDataRequest>(status.as_u16(), &body).unwrap_err(),
            ApiError::Unauthorized
        );
    }
}

#[tokio::test]
async fn test_get_repo_and_run() {
    let (app, _) = app();
    let (status, body) = post(
        &app,
        "/api/project/main/repos/get",
        Some(TOKEN),
        json!({"repo_id": "trainer"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let repo: runhub_core::RepoHead = serde_json::from_str(&body).unwrap();
    assert_eq!(repo.display_name(), "acme/trainer");

    let (status, body) = post(
        &app,
        "/api/project/main/runs/get",
        Some(TOKEN),
        json!({"repo_id": "trainer", "run_name": "wild-cat-1"}),
    )
    .await;
    let run = api::decode::<GetRunRequest>(status.as_u16(), &body).unwrap();
    assert_eq!(run.status(), RunStatus::Running);
}

#[tokio::test]
async fn test_unknown_run_is_not_found() {
    let (app, _) = app();
    let (status, _) = post(
        &app,
        "/api/project/main/runs/get",
        Some(TOKEN),
        json!({"repo_id": "trainer", "run_name": "ghost"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_abort_updates_fixture() {
    let (app, state) = app();
    let (status, _) = post(
        &app,
        "/api/project/main/runs/stop",
        Some(TOKEN),
        json!({"repo_id": "trainer", "run_names": ["wild-cat-1"], "abort": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let run = state
        .fixture
        .read()
        .unwrap()
        .run("main", "trainer", "wild-cat-1")
        .unwrap();
    assert_eq!(run.status(), RunStatus::Aborted);
}

#[tokio::test]
async fn test_delete_active_run_is_refused_with_message() {
    let (app, _) = app();
    let (status, body) = post(
        &app,
        "/api/project/main/runs/delete",
        Some(TOKEN),
        json!({"repo_id": "trainer", "run_names": ["wild-cat-1"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err = api::decode::<api::DeleteRunsRequest>(status.as_u16(), &body).unwrap_err();
    assert_eq!(err.message(), "Run wild-cat-1 is not finished");
}

#[tokio::test]
async fn test_delete_finished_run() {
    let (app, state) = app();
    let (status, _) = post(
        &app,
        "/api/project/main/runs/delete",
        Some(TOKEN),
        json!({"repo_id": "trainer", "run_names": ["brave-fox-3"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.fixture.read().unwrap().run_count(), 3);
}

#[tokio::test]
async fn test_unknown_paths_fall_back_to_console() {
    let (app, _) = app();
    let resp = app
        .oneshot(
            Request::get("/projects/main/repositories/trainer")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(ct.to_str().unwrap().starts_with("text/html"));
}
