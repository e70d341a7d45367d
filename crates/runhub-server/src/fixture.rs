//! Fixture data backing the development API: users, projects, repos and runs
//! loaded from a YAML (or JSON) file.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use runhub_core::error::{Result, RunhubError};
use runhub_core::{JobHead, RepoHead, RepoInfo, Run, RunHead, RunStatus, User};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<ProjectFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFixture {
    pub name: String,
    #[serde(default)]
    pub repos: Vec<RepoFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoFixture {
    #[serde(flatten)]
    pub head: RepoHead,
    #[serde(default)]
    pub runs: Vec<RunHead>,
}

// ─── Loading ─────────────────────────────────────────────────────────────────

pub fn load_fixture(path: &Path) -> Result<Fixture> {
    let content = fs::read_to_string(path)?;
    let fixture: Fixture = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };
    fixture.validate()?;
    Ok(fixture)
}

pub fn save_fixture(path: &Path, fixture: &Fixture) -> Result<()> {
    let content = serde_yaml::to_string(fixture)?;
    fs::write(path, content)?;
    Ok(())
}

// ─── Queries and commands ────────────────────────────────────────────────────

impl Fixture {
    /// Reject fixtures the API could not serve unambiguously.
    pub fn validate(&self) -> Result<()> {
        for (i, user) in self.users.iter().enumerate() {
            if user.token.as_deref().map_or(true, str::is_empty) {
                return Err(RunhubError::Other(format!(
                    "user {} has no token",
                    user.user_name
                )));
            }
            if self.users[..i].iter().any(|u| u.token == user.token) {
                return Err(RunhubError::Other(format!(
                    "user {} shares a token with another user",
                    user.user_name
                )));
            }
        }
        for (i, project) in self.projects.iter().enumerate() {
            if self.projects[..i].iter().any(|p| p.name == project.name) {
                return Err(RunhubError::Other(format!(
                    "duplicate project {}",
                    project.name
                )));
            }
            for (j, repo) in project.repos.iter().enumerate() {
                if project.repos[..j]
                    .iter()
                    .any(|r| r.head.repo_id == repo.head.repo_id)
                {
                    return Err(RunhubError::Other(format!(
                        "duplicate repo {} in project {}",
                        repo.head.repo_id, project.name
                    )));
                }
                for (k, run) in repo.runs.iter().enumerate() {
                    if repo.runs[..k].iter().any(|r| r.run_name == run.run_name) {
                        return Err(RunhubError::Other(format!(
                            "duplicate run {} in repo {}",
                            run.run_name, repo.head.repo_id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// The user owning `token`, without the token itself.
    pub fn authenticate(&self, token: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.token.as_deref() == Some(token))
            .map(|u| User {
                token: None,
                ..u.clone()
            })
    }

    pub fn repo(&self, project: &str, repo_id: &str) -> Result<&RepoFixture> {
        self.projects
            .iter()
            .find(|p| p.name == project)
            .ok_or_else(|| RunhubError::ProjectNotFound(project.to_string()))?
            .repos
            .iter()
            .find(|r| r.head.repo_id == repo_id)
            .ok_or_else(|| RunhubError::RepoNotFound(repo_id.to_string()))
    }

    fn repo_mut(&mut self, project: &str, repo_id: &str) -> Result<&mut RepoFixture> {
        self.projects
            .iter_mut()
            .find(|p| p.name == project)
            .ok_or_else(|| RunhubError::ProjectNotFound(project.to_string()))?
            .repos
            .iter_mut()
            .find(|r| r.head.repo_id == repo_id)
            .ok_or_else(|| RunhubError::RepoNotFound(repo_id.to_string()))
    }

    pub fn run(&self, project: &str, repo_id: &str, run_name: &str) -> Result<Run> {
        self.repo(project, repo_id)?
            .runs
            .iter()
            .find(|r| r.run_name == run_name)
            .map(|head| Run {
                run_head: head.clone(),
            })
            .ok_or_else(|| RunhubError::RunNotFound(run_name.to_string()))
    }

    /// Move unfinished runs to `aborted` or `stopped`. Finished runs are left
    /// as they are. Fails without changes if any run is unknown.
    pub fn stop_runs(
        &mut self,
        project: &str,
        repo_id: &str,
        run_names: &[String],
        abort: bool,
    ) -> Result<usize> {
        let repo = self.repo_mut(project, repo_id)?;
        ensure_known(repo, run_names)?;

        let target = if abort {
            RunStatus::Aborted
        } else {
            RunStatus::Stopped
        };
        let mut changed = 0;
        for run in repo
            .runs
            .iter_mut()
            .filter(|r| run_names.contains(&r.run_name))
        {
            if !run.status.is_finished() {
                run.status = target;
                for job in &mut run.job_heads {
                    job.status = Some(target);
                }
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Remove finished runs. Fails without changes if any run is unknown or
    /// still active.
    pub fn delete_runs(&mut self, project: &str, repo_id: &str, run_names: &[String]) -> Result<usize> {
        let repo = self.repo_mut(project, repo_id)?;
        ensure_known(repo, run_names)?;

        if let Some(active) = repo
            .runs
            .iter()
            .find(|r| run_names.contains(&r.run_name) && !r.status.can_delete())
        {
            return Err(RunhubError::RunNotFinished(active.run_name.clone()));
        }

        let before = repo.runs.len();
        repo.runs.retain(|r| !run_names.contains(&r.run_name));
        Ok(before - repo.runs.len())
    }

    pub fn run_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|p| &p.repos)
            .map(|r| r.runs.len())
            .sum()
    }

    /// Demo data used when no fixture file is given.
    pub fn sample() -> Self {
        let now = Utc::now().timestamp_millis();
        let minute = 60_000;
        let run = |name: &str, status: RunStatus, age_min: i64, error: Option<&str>| RunHead {
            run_name: name.to_string(),
            status,
            submitted_at: now - age_min * minute,
            hub_user_name: Some("admin".to_string()),
            job_heads: vec![JobHead {
                job_id: format!("{}-0", name),
                configuration_path: Some(".dstack/workflows/train.yml".to_string()),
                instance_type: Some("g5.xlarge".to_string()),
                error_code: error.map(str::to_string),
                status: Some(status),
            }],
        };

        Fixture {
            users: vec![User {
                user_name: "admin".to_string(),
                token: Some("runhub-dev-token".to_string()),
                global_role: Some("admin".to_string()),
            }],
            projects: vec![ProjectFixture {
                name: "main".to_string(),
                repos: vec![RepoFixture {
                    head: RepoHead {
                        repo_id: "trainer".to_string(),
                        repo_info: RepoInfo::Remote {
                            repo_host_name: "github.com".to_string(),
                            repo_port: None,
                            repo_user_name: "acme".to_string(),
                            repo_name: "trainer".to_string(),
                        },
                    },
                    runs: vec![
                        run("wild-cat-1", RunStatus::Running, 12, None),
                        run("quiet-owl-2", RunStatus::Pending, 3, None),
                        run("brave-fox-3", RunStatus::Done, 240, None),
                        run("lazy-eel-4", RunStatus::Failed, 600, Some("container_exited_with_error")),
                    ],
                }],
            }],
        }
    }
}

fn ensure_known(repo: &RepoFixture, run_names: &[String]) -> Result<()> {
    match run_names
        .iter()
        .find(|name| !repo.runs.iter().any(|r| &r.run_name == *name))
    {
        Some(missing) => Err(RunhubError::RunNotFound(missing.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sample_is_valid() {
        let f = Fixture::sample();
        f.validate().unwrap();
        assert_eq!(f.run_count(), 4);
        assert_eq!(
            f.authenticate("runhub-dev-token").map(|u| u.user_name),
            Some("admin".to_string())
        );
        assert!(f.authenticate("nope").is_none());
    }

    #[test]
    fn test_stop_and_abort() {
        let mut f = Fixture::sample();
        let changed = f
            .stop_runs("main", "trainer", &names(&["wild-cat-1", "brave-fox-3"]), false)
            .unwrap();
        assert_eq!(changed, 1);
        let run = f.run("main", "trainer", "wild-cat-1").unwrap();
        assert_eq!(run.status(), RunStatus::Stopped);
        assert_eq!(run.run_head.job_heads[0].status, Some(RunStatus::Stopped));
        assert_eq!(
            f.run("main", "trainer", "brave-fox-3").unwrap().status(),
            RunStatus::Done
        );

        f.stop_runs("main", "trainer", &names(&["quiet-owl-2"]), true)
            .unwrap();
        assert_eq!(
            f.run("main", "trainer", "quiet-owl-2").unwrap().status(),
            RunStatus::Aborted
        );
    }

    #[test]
    fn test_delete_refuses_active_runs() {
        let mut f = Fixture::sample();
        let err = f
            .delete_runs("main", "trainer", &names(&["brave-fox-3", "wild-cat-1"]))
            .unwrap_err();
        assert!(matches!(err, RunhubError::RunNotFinished(n) if n == "wild-cat-1"));
        assert_eq!(f.run_count(), 4);

        assert_eq!(
            f.delete_runs("main", "trainer", &names(&["brave-fox-3"]))
                .unwrap(),
            1
        );
        assert!(matches!(
            f.run("main", "trainer", "brave-fox-3"),
            Err(RunhubError::RunNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_targets() {
        let mut f = Fixture::sample();
        assert!(matches!(
            f.repo("other", "trainer"),
            Err(RunhubError::ProjectNotFound(_))
        ));
        assert!(matches!(
            f.stop_runs("main", "trainer", &names(&["ghost"]), false),
            Err(RunhubError::RunNotFound(_))
        ));
    }

    #[test]
    fn test_save_and_load_round_trip_through_yaml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("hub.yaml");
        save_fixture(&path, &Fixture::sample()).unwrap();
        let loaded = load_fixture(&path).unwrap();
        assert_eq!(loaded.run_count(), 4);
        assert_eq!(loaded.projects[0].repos[0].head.repo_id, "trainer");
    }

    #[test]
    fn test_user_without_token_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("hub.yaml");
        std::fs::write(&path, "users:\n  - user_name: bob\n").unwrap();
        assert!(matches!(load_fixture(&path), Err(RunhubError::Other(_))));
    }

    const AMBIGUOUS: &str = r#"
users:
  - user_name: a
    token: t
  - user_name: b
    token: t
projects:
  - name: main
    repos:
      - repo_id: trainer
        repo_info:
          repo_type: local
          repo_dir: /work/trainer
        runs:
          - run_name: x
            status: done
            submitted_at: 0
          - run_name: y
            status: running
            submitted_at: 0
"#;

    #[test]
    fn test_shared_token_is_rejected() {
        let f: Fixture = serde_yaml::from_str(AMBIGUOUS).unwrap();
        let err = f.validate().unwrap_err();
        assert!(err.to_string().contains("user b shares a token"));
    }

    #[test]
    fn test_duplicate_run_name_is_rejected() {
        let mut f: Fixture = serde_yaml::from_str(AMBIGUOUS).unwrap();
        f.users[1].token = Some("t2".into());
        f.validate().unwrap();

        f.projects[0].repos[0].runs[1].run_name = "x".into();
        let err = f.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate run x in repo trainer"));
    }
}
