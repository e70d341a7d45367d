//! Error types for runhub-core.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error code carried in the backend's error payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerErrorCode {
    #[default]
    #[serde(rename = "")]
    ServerError,
    InvalidCredentials,
    BackendNotAvailable,
    #[serde(other)]
    Other,
}

/// One entry of `{"detail": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    #[serde(default)]
    pub msg: String,
    #[serde(default, deserialize_with = "code_or_default")]
    pub code: ServerErrorCode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "list_or_message")]
    pub detail: Vec<ErrorDetail>,
}

/// `detail` is a list of entries, or a bare message from plain HTTP exceptions.
#[derive(Deserialize)]
#[serde(untagged)]
enum DetailShape {
    List(Vec<ErrorDetail>),
    Message(String),
}

fn list_or_message<'de, D>(deserializer: D) -> std::result::Result<Vec<ErrorDetail>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<DetailShape>::deserialize(deserializer)? {
        Some(DetailShape::List(list)) => list,
        Some(DetailShape::Message(msg)) => vec![ErrorDetail {
            msg,
            code: ServerErrorCode::default(),
            fields: Vec::new(),
        }],
        None => Vec::new(),
    })
}

fn code_or_default<'de, D>(deserializer: D) -> std::result::Result<ServerErrorCode, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ServerErrorCode>::deserialize(deserializer)?.unwrap_or_default())
}

impl ErrorBody {
    pub fn single(code: ServerErrorCode, msg: impl Into<String>) -> Self {
        Self {
            detail: vec![ErrorDetail {
                msg: msg.into(),
                code,
                fields: Vec::new(),
            }],
        }
    }
}

/// Failure of a request against the backend API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("{msg}")]
    Server {
        status: u16,
        code: ServerErrorCode,
        msg: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail.into_iter().next());

        if let Some(d) = &detail {
            if d.code == ServerErrorCode::InvalidCredentials {
                return ApiError::Unauthorized;
            }
        }

        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            _ => {
                let (code, msg) = match detail {
                    Some(d) if !d.msg.is_empty() => (d.code, d.msg),
                    Some(d) => (d.code, format!("HTTP {}", status)),
                    None if body.trim().is_empty() => {
                        (ServerErrorCode::ServerError, format!("HTTP {}", status))
                    }
                    None => (ServerErrorCode::ServerError, body.trim().to_string()),
                };
                ApiError::Server { status, code, msg }
            }
        }
    }

    /// Whether the failure means the token is not usable.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden)
    }

    /// Text for the "Server error: ..." notification.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Errors raised while loading or serving fixture data.
#[derive(Error, Debug)]
pub enum RunhubError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Run {0} is not finished")]
    RunNotFinished(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RunhubError>;
