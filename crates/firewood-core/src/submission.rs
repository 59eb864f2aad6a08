//! # Submission Flow
//!
//! The order form's submit state machine.
//!
//! ```text
//!                    submit
//!        ┌──────┐ ───────────► ┌────────────┐
//!        │ Idle │              │ Validating │
//!        └──────┘ ◄─────────── └─────┬──────┘
//!           ▲       reject           │ dispatch
//!           │                        ▼
//!           │                 ┌────────────┐
//!           │                 │ Submitting │  control: "Submitting...", disabled
//!           │                 └─────┬──────┘
//!           │          sent ┌───────┴───────┐ transport error
//!           │               ▼               ▼
//!           │        ┌───────────┐    ┌────────┐
//!           └────────│ Succeeded │    │ Failed │
//!            settle  └───────────┘    └────────┘
//!           ◄────────────────────────────┘
//! ```
//!
//! One attempt per submit. There is no retry and no cancellation.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Label of the submit control when idle.
pub const SUBMIT_LABEL: &str = "Submit Order";

/// Label of the submit control while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Notice shown when delivery fails.
pub const SUBMIT_FAILED_NOTICE: &str =
    "There was an error submitting your order. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How the submit control is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

/// Drives [`SubmissionState`] through legal transitions only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionFlow {
    state: SubmissionState,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    fn transition(
        &mut self,
        from: SubmissionState,
        to: SubmissionState,
        action: &'static str,
    ) -> CoreResult<SubmissionState> {
        if self.state != from {
            return Err(CoreError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        self.state = to;
        Ok(to)
    }

    /// Idle → Validating. Refused while a submission is in progress.
    pub fn begin(&mut self) -> CoreResult<SubmissionState> {
        self.transition(SubmissionState::Idle, SubmissionState::Validating, "submit")
    }

    /// Validating → Idle after a validation failure.
    pub fn reject(&mut self) -> CoreResult<SubmissionState> {
        self.transition(SubmissionState::Validating, SubmissionState::Idle, "reject")
    }

    /// Validating → Submitting once the form is valid.
    pub fn dispatch(&mut self) -> CoreResult<SubmissionState> {
        self.transition(
            SubmissionState::Validating,
            SubmissionState::Submitting,
            "dispatch",
        )
    }

    /// Submitting → Succeeded or Failed.
    pub fn complete(&mut self, sent: bool) -> CoreResult<SubmissionState> {
        let to = if sent {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        };
        self.transition(SubmissionState::Submitting, to, "complete")
    }

    /// Succeeded/Failed → Idle. Always the last step of an attempt.
    pub fn settle(&mut self) -> CoreResult<SubmissionState> {
        match self.state {
            SubmissionState::Succeeded | SubmissionState::Failed => {
                self.state = SubmissionState::Idle;
                Ok(self.state)
            }
            state => Err(CoreError::InvalidTransition {
                state,
                action: "settle",
            }),
        }
    }

    pub fn in_flight(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn control(&self) -> SubmitControl {
        if self.in_flight() {
            SubmitControl {
                label: SUBMITTING_LABEL.to_string(),
                disabled: true,
            }
        } else {
            SubmitControl {
                label: SUBMIT_LABEL.to_string(),
                disabled: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_attempt() {
        let mut flow = SubmissionFlow::new();
        flow.begin().unwrap();
        flow.dispatch().unwrap();
        assert_eq!(flow.control().label, "Submitting...");
        assert!(flow.control().disabled);

        assert_eq!(flow.complete(true).unwrap(), SubmissionState::Succeeded);
        assert_eq!(flow.settle().unwrap(), SubmissionState::Idle);
        assert_eq!(flow.control().label, "Submit Order");
        assert!(!flow.control().disabled);
    }

    #[test]
    fn test_failed_attempt_returns_to_idle() {
        let mut flow = SubmissionFlow::new();
        flow.begin().unwrap();
        flow.dispatch().unwrap();
        assert_eq!(flow.complete(false).unwrap(), SubmissionState::Failed);
        assert_eq!(flow.settle().unwrap(), SubmissionState::Idle);
    }

    #[test]
    fn test_validation_failure_returns_to_idle() {
        let mut flow = SubmissionFlow::new();
        flow.begin().unwrap();
        assert_eq!(flow.reject().unwrap(), SubmissionState::Idle);
    }

    #[test]
    fn test_double_submit_is_refused() {
        let mut flow = SubmissionFlow::new();
        flow.begin().unwrap();
        flow.dispatch().unwrap();
        assert!(matches!(
            flow.begin(),
            Err(CoreError::InvalidTransition {
                state: SubmissionState::Submitting,
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_order_steps() {
        let mut flow = SubmissionFlow::new();
        assert!(flow.complete(true).is_err());
        assert!(flow.settle().is_err());
        assert!(flow.dispatch().is_err());
        assert_eq!(flow.state(), SubmissionState::Idle);
    }
}
