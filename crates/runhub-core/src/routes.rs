//! Console URL layout.

pub const PROJECT_LIST: &str = "/projects";
pub const SETTINGS: &str = "/settings";

pub fn project_repositories(project: &str) -> String {
    format!("{}/{}/repositories", PROJECT_LIST, project)
}

pub fn repository_details(project: &str, repo_id: &str) -> String {
    format!("{}/{}", project_repositories(project), repo_id)
}

pub fn run_details(project: &str, repo_id: &str, run_name: &str) -> String {
    format!("{}/runs/{}", repository_details(project, repo_id), run_name)
}

/// Route parameters of the repository page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoRoute {
    pub project: String,
    pub repo_id: String,
}

impl RepoRoute {
    pub fn from_params<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            project: get(RunRoute::PROJECT_PARAM).unwrap_or_default(),
            repo_id: get(RunRoute::REPO_PARAM).unwrap_or_default(),
        }
    }

    pub fn href(&self) -> String {
        repository_details(&self.project, &self.repo_id)
    }
}

/// Route parameters of the run details page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunRoute {
    pub project: String,
    pub repo_id: String,
    pub run_name: String,
}

impl RunRoute {
    pub const PROJECT_PARAM: &'static str = "name";
    pub const REPO_PARAM: &'static str = "repoId";
    pub const RUN_PARAM: &'static str = "runName";

    /// Resolve from a parameter lookup; missing parameters become empty strings.
    pub fn from_params<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            project: get(Self::PROJECT_PARAM).unwrap_or_default(),
            repo_id: get(Self::REPO_PARAM).unwrap_or_default(),
            run_name: get(Self::RUN_PARAM).unwrap_or_default(),
        }
    }

    pub fn repo(&self) -> RepoRoute {
        RepoRoute {
            project: self.project.clone(),
            repo_id: self.repo_id.clone(),
        }
    }

    /// Where a deleted run sends the user.
    pub fn parent(&self) -> String {
        repository_details(&self.project, &self.repo_id)
    }

    pub fn href(&self) -> String {
        run_details(&self.project, &self.repo_id, &self.run_name)
    }
}
