//! Typed requests for the backend REST API.
//!
//! Every endpoint is a `POST` with a JSON body and a bearer token. The
//! project name travels in the path, never in the body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{RepoHead, Run, User};

pub const API_PREFIX: &str = "/api";

pub trait ApiRequest: Serialize {
    type Response: DeserializeOwned;

    /// Path relative to the server origin.
    fn path(&self) -> String;
}

/// Response of endpoints that return nothing useful.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Empty {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GetUserDataRequest {}

impl ApiRequest for GetUserDataRequest {
    type Response = User;

    fn path(&self) -> String {
        format!("{}/users/info", API_PREFIX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GetProjectRepoRequest {
    #[serde(skip)]
    pub project: String,
    pub repo_id: String,
}

impl ApiRequest for GetProjectRepoRequest {
    type Response = RepoHead;

    fn path(&self) -> String {
        project_path(&self.project, "repos/get")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GetRunRequest {
    #[serde(skip)]
    pub project: String,
    pub repo_id: String,
    pub run_name: String,
}

impl ApiRequest for GetRunRequest {
    type Response = Run;

    fn path(&self) -> String {
        project_path(&self.project, "runs/get")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StopRunsRequest {
    #[serde(skip)]
    pub project: String,
    pub repo_id: String,
    pub run_names: Vec<String>,
    #[serde(default)]
    pub abort: bool,
}

impl ApiRequest for StopRunsRequest {
    type Response = Empty;

    fn path(&self) -> String {
        project_path(&self.project, "runs/stop")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeleteRunsRequest {
    #[serde(skip)]
    pub project: String,
    pub repo_id: String,
    pub run_names: Vec<String>,
}

impl ApiRequest for DeleteRunsRequest {
    type Response = Empty;

    fn path(&self) -> String {
        project_path(&self.project, "runs/delete")
    }
}

fn project_path(project: &str, endpoint: &str) -> String {
    format!("{}/project/{}/{}", API_PREFIX, project, endpoint)
}

/// Value of the `Authorization` header.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Pull the token out of an `Authorization` header value.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Decode a response body, or classify the failure.
pub fn decode<R: ApiRequest>(status: u16, body: &str) -> Result<R::Response, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body));
    }
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RunStatus;

    #[test]
    fn test_paths() {
        assert_eq!(GetUserDataRequest {}.path(), "/api/users/info");
        let req = StopRunsRequest {
            project: "main".into(),
            ..Default::default()
        };
        assert_eq!(req.path(), "/api/project/main/runs/stop");
    }

    #[test]
    fn test_project_is_not_in_body() {
        let req = DeleteRunsRequest {
            project: "main".into(),
            repo_id: "r1".into(),
            run_names: vec!["a".into()],
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"repo_id": "r1", "run_names": ["a"]})
        );
        assert_eq!(serde_json::to_string(&GetUserDataRequest {}).unwrap(), "{}");
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer  abc "), Some("abc"));
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Bearer"), None);
    }

    #[test]
    fn test_decode_success_and_empty_body() {
        let run = decode::<GetRunRequest>(
            200,
            r#"{"run_head": {"run_name": "a", "status": "done", "submitted_at": 1}}"#,
        )
        .unwrap();
        assert_eq!(run.status(), RunStatus::Done);
        assert_eq!(decode::<StopRunsRequest>(200, "").unwrap(), Empty {});
    }

    #[test]
    fn test_decode_failure() {
        assert_eq!(
            decode::<GetUserDataRequest>(401, "").unwrap_err(),
            ApiError::Unauthorized
        );
        assert!(matches!(
            decode::<GetUserDataRequest>(200, "not json"),
            Err(ApiError::Decode(_))
        ));
    }
}
