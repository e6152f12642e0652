//! Lifecycle of a single ad request.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Status of one adapter instance's request.
///
/// ```text
/// Idle -> Requesting -> Fulfilled -> Rendering
///   |          |                \-> Enqueued
///   |          \-> Failed
///   \-> Failed            (configuration checks before any fetch)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Idle,
    Requesting,
    Fulfilled,
    Failed,
    Rendering,
    Enqueued,
}

impl RequestStatus {
    /// Returns true once the request produced a renderable ad.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            RequestStatus::Fulfilled | RequestStatus::Rendering | RequestStatus::Enqueued
        )
    }
}

impl StateMachine for RequestStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RequestStatus::*;
        matches!(
            (self, target),
            (Idle, Requesting)
                | (Idle, Failed)
                | (Requesting, Fulfilled)
                | (Requesting, Failed)
                | (Fulfilled, Rendering)
                | (Fulfilled, Enqueued)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RequestStatus::*;
        match self {
            Idle => vec![Requesting, Failed],
            Requesting => vec![Fulfilled, Failed],
            Fulfilled => vec![Rendering, Enqueued],
            Failed | Rendering | Enqueued => vec![],
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Requesting => "requesting",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Failed => "failed",
            RequestStatus::Rendering => "rendering",
            RequestStatus::Enqueued => "enqueued",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_valid() {
        let status = RequestStatus::Idle
            .transition_to(RequestStatus::Requesting)
            .and_then(|s| s.transition_to(RequestStatus::Fulfilled))
            .and_then(|s| s.transition_to(RequestStatus::Enqueued))
            .unwrap();
        assert_eq!(status, RequestStatus::Enqueued);
        assert!(status.is_terminal());
    }

    #[test]
    fn failed_cannot_become_fulfilled() {
        assert!(RequestStatus::Failed
            .transition_to(RequestStatus::Fulfilled)
            .is_err());
    }

    #[test]
    fn idle_cannot_skip_to_rendering() {
        assert!(RequestStatus::Idle
            .transition_to(RequestStatus::Rendering)
            .is_err());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        use RequestStatus::*;
        for status in [Idle, Requesting, Fulfilled, Failed, Rendering, Enqueued] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn success_statuses() {
        assert!(RequestStatus::Rendering.is_success());
        assert!(RequestStatus::Enqueued.is_success());
        assert!(!RequestStatus::Failed.is_success());
        assert!(!RequestStatus::Requesting.is_success());
    }
}
