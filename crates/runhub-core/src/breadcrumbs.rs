//! Navigation trails for each screen.

use crate::models::{Breadcrumb, RepoHead};
use crate::routes::{self, RepoRoute, RunRoute};

/// Shown in place of the repository name until it has been fetched.
pub const LOADING_TEXT: &str = "Loading...";

pub fn project_list() -> Vec<Breadcrumb> {
    vec![Breadcrumb::new("Projects", routes::PROJECT_LIST)]
}

pub fn settings() -> Vec<Breadcrumb> {
    vec![Breadcrumb::new("Settings", routes::SETTINGS)]
}

/// Projects / {project} / Repositories.
pub fn project_repositories(project: &str) -> Vec<Breadcrumb> {
    let repositories = routes::project_repositories(project);
    let mut crumbs = project_list();
    crumbs.extend([
        Breadcrumb::new(project, repositories.as_str()),
        Breadcrumb::new("Repositories", repositories),
    ]);
    crumbs
}

/// Projects / {project} / Repositories / {repo}.
pub fn repository_details(route: &RepoRoute, repo: Option<&RepoHead>) -> Vec<Breadcrumb> {
    let repo_name = repo
        .map(RepoHead::display_name)
        .unwrap_or_else(|| LOADING_TEXT.to_string());
    let mut crumbs = project_repositories(&route.project);
    crumbs.push(Breadcrumb::new(repo_name, route.href()));
    crumbs
}

/// Projects / {project} / Repositories / {repo} / Runs / {run}.
pub fn run_details(route: &RunRoute, repo: Option<&RepoHead>) -> Vec<Breadcrumb> {
    let mut crumbs = repository_details(&route.repo(), repo);
    crumbs.push(Breadcrumb::new("Runs", route.parent()));
    crumbs.push(Breadcrumb::new(route.run_name.as_str(), route.href()));
    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoInfo;

    fn route() -> RunRoute {
        RunRoute {
            project: "main".into(),
            repo_id: "r1".into(),
            run_name: "wild-cat-1".into(),
        }
    }

    #[test]
    fn test_repo_placeholder_until_loaded() {
        let crumbs = run_details(&route(), None);
        assert_eq!(crumbs.len(), 6);
        assert_eq!(crumbs[3].text, LOADING_TEXT);
        assert_eq!(crumbs[3].href, "/projects/main/repositories/r1");
    }

    #[test]
    fn test_trail_uses_repo_display_name() {
        let repo = RepoHead {
            repo_id: "r1".into(),
            repo_info: RepoInfo::Local {
                repo_dir: "/src/trainer".into(),
            },
        };
        let crumbs = run_details(&route(), Some(&repo));
        let texts: Vec<&str> = crumbs.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Projects", "main", "Repositories", "trainer", "Runs", "wild-cat-1"]
        );
        assert_eq!(crumbs[0].href, "/projects");
        assert_eq!(
            crumbs[5].href,
            "/projects/main/repositories/r1/runs/wild-cat-1"
        );
    }

    #[test]
    fn test_repository_trail_is_prefix_of_run_trail() {
        let run_route = route();
        let repo_crumbs = repository_details(&run_route.repo(), None);
        assert_eq!(repo_crumbs.len(), 4);
        assert_eq!(repo_crumbs[..], run_details(&run_route, None)[..4]);
        assert_eq!(repo_crumbs[..3], project_repositories("main")[..]);
    }

    #[test]
    fn test_project_repositories_trail() {
        let crumbs = project_repositories("main");
        let texts: Vec<&str> = crumbs.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["Projects", "main", "Repositories"]);
        assert_eq!(crumbs[1].href, "/projects/main/repositories");
        assert_eq!(crumbs[2].href, "/projects/main/repositories");
    }
}
