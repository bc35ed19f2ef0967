//! Election workflow phases and the guards every mutating call consults.
//!
//! ```text
//! RegisteringVoters ──► ProposalsRegistrationStarted ──► ProposalsRegistrationEnded
//!        (0)                       (1)                             (2)
//!                                                                   │
//!   VotesTallied ◄── VotingSessionEnded ◄── VotingSessionStarted ◄──┘
//!       (5)                 (4)                     (3)
//! ```
//!
//! Phases only move forward, one step at a time, and never leave
//! `VotesTallied`.

use soroban_sdk::contracttype;

use crate::errors::VotingError;

/// Phase of the election. The discriminant is the wire encoding used in
/// status-change notifications and by `current_workflow_status`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum WorkflowStatus {
    RegisteringVoters = 0,
    ProposalsRegistrationStarted = 1,
    ProposalsRegistrationEnded = 2,
    VotingSessionStarted = 3,
    VotingSessionEnded = 4,
    VotesTallied = 5,
}

impl WorkflowStatus {
    /// The phase that follows `self`, or `None` from the terminal phase.
    pub fn next(self) -> Option<WorkflowStatus> {
        match self {
            WorkflowStatus::RegisteringVoters => {
                Some(WorkflowStatus::ProposalsRegistrationStarted)
            }
            WorkflowStatus::ProposalsRegistrationStarted => {
                Some(WorkflowStatus::ProposalsRegistrationEnded)
            }
            WorkflowStatus::ProposalsRegistrationEnded => {
                Some(WorkflowStatus::VotingSessionStarted)
            }
            WorkflowStatus::VotingSessionStarted => Some(WorkflowStatus::VotingSessionEnded),
            WorkflowStatus::VotingSessionEnded => Some(WorkflowStatus::VotesTallied),
            WorkflowStatus::VotesTallied => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

/// Guard for phase-gated operations.
pub fn require_phase(current: WorkflowStatus, expected: WorkflowStatus) -> Result<(), VotingError> {
    if current != expected {
        return Err(VotingError::WrongPhase);
    }
    Ok(())
}

/// Validate the step `from → from.next()` against the current phase and
/// return the phase to move to.
pub fn transition(
    current: WorkflowStatus,
    from: WorkflowStatus,
) -> Result<WorkflowStatus, VotingError> {
    if current != from {
        return Err(VotingError::InvalidTransition);
    }
    current.next().ok_or(VotingError::InvalidTransition)
}
