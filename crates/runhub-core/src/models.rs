//! Data models shared by the console and the server.

use serde::{Deserialize, Serialize};

use crate::status::RunStatus;

/// Identity returned by the user-info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    #[serde(alias = "username")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_role: Option<String>,
}

/// The credential persisted in client storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthData {
    pub token: String,
}

/// Summary of one job inside a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct JobHead {
    pub job_id: String,
    #[serde(default)]
    pub configuration_path: Option<String>,
    #[serde(default)]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub status: Option<RunStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunHead {
    pub run_name: String,
    pub status: RunStatus,
    /// Milliseconds since the Unix epoch.
    pub submitted_at: i64,
    #[serde(default)]
    pub hub_user_name: Option<String>,
    #[serde(default)]
    pub job_heads: Vec<JobHead>,
}

impl RunHead {
    /// The job whose details the run page shows.
    pub fn first_job(&self) -> Option<&JobHead> {
        self.job_heads.first()
    }
}

/// A run as returned by the backend. Never mutated by the console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Run {
    pub run_head: RunHead,
}

impl Run {
    pub fn status(&self) -> RunStatus {
        self.run_head.status
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "repo_type", rename_all = "lowercase")]
pub enum RepoInfo {
    Remote {
        repo_host_name: String,
        #[serde(default)]
        repo_port: Option<u16>,
        repo_user_name: String,
        repo_name: String,
    },
    Local {
        repo_dir: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoHead {
    pub repo_id: String,
    pub repo_info: RepoInfo,
}

impl RepoHead {
    /// Human readable repository name: `user/name` for remote repos, the
    /// directory name for local ones.
    pub fn display_name(&self) -> String {
        match &self.repo_info {
            RepoInfo::Remote {
                repo_user_name,
                repo_name,
                ..
            } => format!("{}/{}", repo_user_name, repo_name),
            RepoInfo::Local { repo_dir } => {
                let trimmed = repo_dir.trim_end_matches(['/', '\\']);
                trimmed
                    .rsplit(['/', '\\'])
                    .next()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(repo_dir)
                    .to_string()
            }
        }
    }
}

/// One entry of the navigation trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Breadcrumb {
    pub text: String,
    pub href: String,
}

impl Breadcrumb {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}
