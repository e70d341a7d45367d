//! Run lifecycle states and what the console may do in each of them.

use serde::{Deserialize, Serialize};

/// Status of a run as reported by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Submitted,
    Downloading,
    Building,
    Running,
    Uploading,
    Restarting,
    Stopping,
    Stopped,
    Aborting,
    Aborted,
    Terminating,
    Terminated,
    Failed,
    Done,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub const ALL: [RunStatus; 16] = [
        RunStatus::Pending,
        RunStatus::Submitted,
        RunStatus::Downloading,
        RunStatus::Building,
        RunStatus::Running,
        RunStatus::Uploading,
        RunStatus::Restarting,
        RunStatus::Stopping,
        RunStatus::Stopped,
        RunStatus::Aborting,
        RunStatus::Aborted,
        RunStatus::Terminating,
        RunStatus::Terminated,
        RunStatus::Failed,
        RunStatus::Done,
        RunStatus::Unknown,
    ];

    /// The run will not change state again.
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            RunStatus::Failed
                | RunStatus::Done
                | RunStatus::Aborted
                | RunStatus::Stopped
                | RunStatus::Terminated
        )
    }

    pub fn can_abort(self) -> bool {
        !self.is_finished() && self != RunStatus::Aborting
    }

    pub fn can_stop(self) -> bool {
        !self.is_finished() && !matches!(self, RunStatus::Stopping | RunStatus::Aborting)
    }

    pub fn can_delete(self) -> bool {
        self.is_finished()
    }

    pub fn indicator(self) -> StatusIndicator {
        match self {
            RunStatus::Failed => StatusIndicator::Error,
            RunStatus::Done => StatusIndicator::Success,
            RunStatus::Aborted | RunStatus::Stopped | RunStatus::Terminated => {
                StatusIndicator::Stopped
            }
            RunStatus::Pending | RunStatus::Submitted => StatusIndicator::Pending,
            RunStatus::Stopping
            | RunStatus::Aborting
            | RunStatus::Terminating
            | RunStatus::Restarting => StatusIndicator::Loading,
            RunStatus::Downloading
            | RunStatus::Building
            | RunStatus::Running
            | RunStatus::Uploading => StatusIndicator::InProgress,
            RunStatus::Unknown => StatusIndicator::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Submitted => "submitted",
            RunStatus::Downloading => "downloading",
            RunStatus::Building => "building",
            RunStatus::Running => "running",
            RunStatus::Uploading => "uploading",
            RunStatus::Restarting => "restarting",
            RunStatus::Stopping => "stopping",
            RunStatus::Stopped => "stopped",
            RunStatus::Aborting => "aborting",
            RunStatus::Aborted => "aborted",
            RunStatus::Terminating => "terminating",
            RunStatus::Terminated => "terminated",
            RunStatus::Failed => "failed",
            RunStatus::Done => "done",
            RunStatus::Unknown => "unknown",
        }
    }

    /// Label shown next to the status indicator.
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Pending => "Pending",
            RunStatus::Submitted => "Submitted",
            RunStatus::Downloading => "Downloading",
            RunStatus::Building => "Building",
            RunStatus::Running => "Running",
            RunStatus::Uploading => "Uploading",
            RunStatus::Restarting => "Restarting",
            RunStatus::Stopping => "Stopping",
            RunStatus::Stopped => "Stopped",
            RunStatus::Aborting => "Aborting",
            RunStatus::Aborted => "Aborted",
            RunStatus::Terminating => "Terminating",
            RunStatus::Terminated => "Terminated",
            RunStatus::Failed => "Failed",
            RunStatus::Done => "Done",
            RunStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual category of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Error,
    Success,
    Stopped,
    Pending,
    Loading,
    InProgress,
    Info,
}

impl StatusIndicator {
    /// Tailwind classes for the badge text and dot.
    pub fn classes(self) -> (&'static str, &'static str) {
        match self {
            StatusIndicator::Error => ("text-red-400", "bg-red-500"),
            StatusIndicator::Success => ("text-emerald-400", "bg-emerald-500"),
            StatusIndicator::Stopped => ("text-slate-400", "bg-slate-500"),
            StatusIndicator::Pending => ("text-amber-400", "bg-amber-500"),
            StatusIndicator::Loading => ("text-sky-400", "bg-sky-500 animate-pulse"),
            StatusIndicator::InProgress => ("text-blue-400", "bg-blue-500 animate-pulse"),
            StatusIndicator::Info => ("text-slate-300", "bg-slate-600"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_runs_can_only_be_deleted() {
        for status in RunStatus::ALL.into_iter().filter(|s| s.is_finished()) {
            assert!(status.can_delete(), "{status} should be deletable");
            assert!(!status.can_stop(), "{status} should not be stoppable");
            assert!(!status.can_abort(), "{status} should not be abortable");
        }
    }

    #[test]
    fn test_stopping_run_can_still_be_aborted() {
        assert!(RunStatus::Stopping.can_abort());
        assert!(!RunStatus::Stopping.can_stop());
        assert!(!RunStatus::Stopping.can_delete());
    }

    #[test]
    fn test_aborting_run_allows_nothing() {
        let s = RunStatus::Aborting;
        assert!(!s.can_abort() && !s.can_stop() && !s.can_delete());
    }

    #[test]
    fn test_active_run_can_be_stopped_and_aborted() {
        for s in [RunStatus::Submitted, RunStatus::Running, RunStatus::Uploading] {
            assert!(s.can_stop());
            assert!(s.can_abort());
            assert!(!s.can_delete());
        }
    }

    #[test]
    fn test_unrecognised_status_deserializes_as_unknown() {
        let s: RunStatus = serde_json::from_str("\"queued_somewhere\"").unwrap();
        assert_eq!(s, RunStatus::Unknown);
        let s: RunStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(s, RunStatus::Done);
    }

    #[test]
    fn test_indicator_mapping() {
        assert_eq!(RunStatus::Failed.indicator(), StatusIndicator::Error);
        assert_eq!(RunStatus::Done.indicator(), StatusIndicator::Success);
        assert_eq!(RunStatus::Aborted.indicator(), StatusIndicator::Stopped);
        assert_eq!(RunStatus::Running.indicator(), StatusIndicator::InProgress);
        assert_eq!(RunStatus::Stopping.indicator(), StatusIndicator::Loading);
    }

    #[test]
    fn test_display_matches_wire_name() {
        for s in RunStatus::ALL {
            let wire = serde_json::to_string(&s).unwrap();
            assert_eq!(wire, format!("\"{}\"", s));
        }
    }
}
