//! Lifecycle commands on the run details page.

use crate::api::{DeleteRunsRequest, StopRunsRequest};
use crate::routes::RunRoute;
use crate::status::RunStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Abort,
    Stop,
    Delete,
}

impl RunAction {
    pub const ALL: [RunAction; 3] = [RunAction::Abort, RunAction::Stop, RunAction::Delete];

    pub fn label(self) -> &'static str {
        match self {
            RunAction::Abort => "Abort",
            RunAction::Stop => "Stop",
            RunAction::Delete => "Delete",
        }
    }

    pub fn allowed_for(self, status: RunStatus) -> bool {
        match self {
            RunAction::Abort => status.can_abort(),
            RunAction::Stop => status.can_stop(),
            RunAction::Delete => status.can_delete(),
        }
    }
}

/// Everything button enablement depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionState {
    /// `None` until the run has loaded.
    pub status: Option<RunStatus>,
    pub stopping: bool,
    pub deleting: bool,
}

impl ActionState {
    pub fn busy(&self) -> bool {
        self.stopping || self.deleting
    }

    pub fn is_disabled(&self, action: RunAction) -> bool {
        match self.status {
            Some(status) => !action.allowed_for(status) || self.busy(),
            None => true,
        }
    }
}

/// The backend request an action issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Stop(StopRunsRequest),
    Delete(DeleteRunsRequest),
}

impl RunAction {
    pub fn request(self, route: &RunRoute) -> ActionRequest {
        let run_names = vec![route.run_name.clone()];
        match self {
            RunAction::Abort | RunAction::Stop => ActionRequest::Stop(StopRunsRequest {
                project: route.project.clone(),
                repo_id: route.repo_id.clone(),
                run_names,
                abort: self == RunAction::Abort,
            }),
            RunAction::Delete => ActionRequest::Delete(DeleteRunsRequest {
                project: route.project.clone(),
                repo_id: route.repo_id.clone(),
                run_names,
            }),
        }
    }
}

/// What the page does once an action's request has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Leave the page for this route.
    Navigate(String),
    /// Reload the run.
    Refetch,
    /// Show an error notification with this text.
    Notify(String),
}

pub fn outcome<E: std::fmt::Display>(
    action: RunAction,
    route: &RunRoute,
    result: Result<(), E>,
) -> ActionOutcome {
    match result {
        Ok(()) if action == RunAction::Delete => ActionOutcome::Navigate(route.parent()),
        Ok(()) => ActionOutcome::Refetch,
        Err(e) => ActionOutcome::Notify(format!("Server error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn route() -> RunRoute {
        RunRoute {
            project: "main".into(),
            repo_id: "r1".into(),
            run_name: "wild-cat-1".into(),
        }
    }

    #[test]
    fn test_everything_disabled_until_run_loads() {
        let state = ActionState::default();
        for a in RunAction::ALL {
            assert!(state.is_disabled(a));
        }
    }

    #[test]
    fn test_disabled_exactly_when_status_disallows_or_busy() {
        for status in RunStatus::ALL {
            for (stopping, deleting) in [(false, false), (true, false), (false, true)] {
                let state = ActionState {
                    status: Some(status),
                    stopping,
                    deleting,
                };
                for a in RunAction::ALL {
                    let expected = !a.allowed_for(status) || stopping || deleting;
                    assert_eq!(state.is_disabled(a), expected, "{a:?} on {status}");
                }
            }
        }
    }

    #[test]
    fn test_abort_and_stop_share_the_stop_endpoint() {
        let ActionRequest::Stop(abort) = RunAction::Abort.request(&route()) else {
            panic!("abort should be a stop request");
        };
        assert!(abort.abort);
        assert_eq!(abort.run_names, vec!["wild-cat-1".to_string()]);

        let ActionRequest::Stop(stop) = RunAction::Stop.request(&route()) else {
            panic!("stop should be a stop request");
        };
        assert!(!stop.abort);
    }

    #[test]
    fn test_successful_delete_navigates_to_repository() {
        let out = outcome::<ApiError>(RunAction::Delete, &route(), Ok(()));
        assert_eq!(
            out,
            ActionOutcome::Navigate("/projects/main/repositories/r1".into())
        );
    }

    #[test]
    fn test_failed_delete_notifies_without_navigating() {
        let out = outcome(
            RunAction::Delete,
            &route(),
            Err(ApiError::Network("connection refused".into())),
        );
        assert_eq!(
            out,
            ActionOutcome::Notify("Server error: Network error: connection refused".into())
        );
    }

    #[test]
    fn test_successful_stop_refetches() {
        assert_eq!(
            outcome::<ApiError>(RunAction::Stop, &route(), Ok(())),
            ActionOutcome::Refetch
        );
    }
}
