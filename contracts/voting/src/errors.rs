use common::CommonError;
use soroban_sdk::contracterror;

/// Every way an election call can be rejected.
///
/// Discriminants are part of the contract ABI and must not be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VotingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not the election administrator.
    NotAdministrator = 3,
    /// Caller is not a registered voter.
    NotAVoter = 4,
    AlreadyRegistered = 5,
    AlreadyVoted = 6,
    /// Operation is not allowed in the current workflow phase.
    WrongPhase = 7,
    /// Phase transition requested from the wrong phase.
    InvalidTransition = 8,
    EmptyProposal = 9,
    ProposalNotFound = 10,
    /// Description is longer than `MAX_DESCRIPTION_LEN`.
    ProposalTooLong = 11,
}

impl From<CommonError> for VotingError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => VotingError::NotInitialized,
            CommonError::AlreadyInitialized => VotingError::AlreadyInitialized,
            CommonError::AccessDenied => VotingError::NotAdministrator,
        }
    }
}
