#![no_std]

//! # Voting
//!
//! A single-election ballot contract:
//!
//! - **Administrator**: one owner address registers voters and drives the
//!   workflow; the role can be handed over with `transfer_admin`.
//! - **Six-phase workflow**: RegisteringVoters → ProposalsRegistrationStarted
//!   → ProposalsRegistrationEnded → VotingSessionStarted → VotingSessionEnded
//!   → VotesTallied, strictly forward and one step at a time.
//! - **Proposals**: any registered voter may submit during proposal
//!   registration; index 0 is the `GENESIS` sentinel.
//! - **One vote per voter**, attributable and final.
//! - **Tally**: the first proposal with the strictly highest count wins.

#[cfg(test)]
extern crate std;

pub mod election;
pub mod errors;
pub mod events;
pub mod proposal;
pub mod tally;
pub mod voter;
pub mod workflow;

use soroban_sdk::{contract, contractimpl, log, Address, Env, String};

use common::ownable;
use election::{Applied, Caller, Election};
pub use errors::VotingError;
use proposal::Proposal;
use voter::Voter;
use workflow::WorkflowStatus;

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VotingContract;

#[contractimpl]
impl VotingContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the election with `admin` as its administrator.
    ///
    /// The election starts in `RegisteringVoters` with no voters, no
    /// proposals and the sentinel as winner.
    pub fn initialize(env: Env, admin: Address) -> Result<(), VotingError> {
        if election::exists(&env) {
            return Err(VotingError::AlreadyInitialized);
        }
        ownable::init_owner(&env, &admin)?;
        election::store(&env, &Election::new(&env));

        events::publish_initialized(&env, &admin);
        log!(&env, "election initialized", admin);
        Ok(())
    }

    /// Hand the administrator role to `new_admin`. Allowed in any phase.
    pub fn transfer_admin(
        env: Env,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), VotingError> {
        caller.require_auth();
        Self::require_initialized(&env)?;

        let previous = ownable::transfer_ownership(&env, &caller, &new_admin)?;
        events::publish_admin_transferred(&env, &previous, &new_admin);
        Ok(())
    }

    // ── Voter registry ────────────────────────────────────────────────────────

    /// Register `voter`. Administrator only, during `RegisteringVoters`.
    pub fn register_voter(env: Env, caller: Address, voter: Address) -> Result<(), VotingError> {
        Self::apply(&env, caller, |election, caller| {
            election.register_voter(caller, &voter)
        })?;
        log!(&env, "voter registered", voter);
        Ok(())
    }

    /// Read a voter record. The caller must be a registered voter; unknown
    /// addresses read back as an unregistered record.
    pub fn get_voter(env: Env, caller: Address, voter: Address) -> Result<Voter, VotingError> {
        caller.require_auth();
        let election = election::load(&env)?;
        election.get_voter(&Self::caller(&env, caller), &voter)
    }

    // ── Proposal registry ─────────────────────────────────────────────────────

    /// Submit a proposal and return its index (1 for the first one).
    pub fn submit_proposal(
        env: Env,
        caller: Address,
        description: String,
    ) -> Result<u32, VotingError> {
        Self::apply(&env, caller, |election, caller| {
            election.submit_proposal(caller, description)
        })
    }

    /// Read the proposal at `proposal_id`. The caller must be a registered voter.
    pub fn get_proposal(
        env: Env,
        caller: Address,
        proposal_id: u32,
    ) -> Result<Proposal, VotingError> {
        caller.require_auth();
        let election = election::load(&env)?;
        election.get_proposal(&Self::caller(&env, caller), proposal_id)
    }

    // ── Voting ────────────────────────────────────────────────────────────────

    /// Cast the caller's single vote for `proposal_id`.
    ///
    /// The `GENESIS` sentinel at index 0 is refused with `ProposalNotFound`,
    /// even though `get_proposal(0)` reads it back once proposal
    /// registration has opened.
    pub fn cast_vote(env: Env, caller: Address, proposal_id: u32) -> Result<(), VotingError> {
        Self::apply(&env, caller, |election, caller| {
            election.cast_vote(caller, proposal_id)
        })
    }

    // ── Workflow transitions ──────────────────────────────────────────────────

    /// `RegisteringVoters` → `ProposalsRegistrationStarted`; creates the
    /// `GENESIS` sentinel proposal.
    pub fn start_proposals_registration(
        env: Env,
        caller: Address,
    ) -> Result<WorkflowStatus, VotingError> {
        let status = Self::apply(&env, caller, |election, caller| {
            election.start_proposals_registration(caller)
        })?;
        log!(&env, "workflow advanced", status.code());
        Ok(status)
    }

    /// `ProposalsRegistrationStarted` → `ProposalsRegistrationEnded`.
    pub fn end_proposals_registration(
        env: Env,
        caller: Address,
    ) -> Result<WorkflowStatus, VotingError> {
        let status = Self::apply(&env, caller, |election, caller| {
            election.end_proposals_registration(caller)
        })?;
        log!(&env, "workflow advanced", status.code());
        Ok(status)
    }

    /// `ProposalsRegistrationEnded` → `VotingSessionStarted`.
    pub fn start_voting_session(env: Env, caller: Address) -> Result<WorkflowStatus, VotingError> {
        let status = Self::apply(&env, caller, |election, caller| {
            election.start_voting_session(caller)
        })?;
        log!(&env, "workflow advanced", status.code());
        Ok(status)
    }

    /// `VotingSessionStarted` → `VotingSessionEnded`.
    pub fn end_voting_session(env: Env, caller: Address) -> Result<WorkflowStatus, VotingError> {
        let status = Self::apply(&env, caller, |election, caller| {
            election.end_voting_session(caller)
        })?;
        log!(&env, "workflow advanced", status.code());
        Ok(status)
    }

    /// `VotingSessionEnded` → `VotesTallied`. Computes and returns the
    /// winning proposal id.
    pub fn tally_votes(env: Env, caller: Address) -> Result<u32, VotingError> {
        let winner = Self::apply(&env, caller, |election, caller| election.tally_votes(caller))?;
        log!(&env, "votes tallied", winner);
        Ok(winner)
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn current_workflow_status(env: Env) -> Result<WorkflowStatus, VotingError> {
        Ok(election::load(&env)?.status())
    }

    /// The sentinel (0) until votes are tallied.
    pub fn winning_proposal_id(env: Env) -> Result<u32, VotingError> {
        Ok(election::load(&env)?.winning_proposal_id())
    }

    /// Number of proposals including the sentinel; 0 before proposal
    /// registration opens.
    pub fn proposal_count(env: Env) -> Result<u32, VotingError> {
        Ok(election::load(&env)?.proposal_count())
    }

    pub fn is_administrator(env: Env, who: Address) -> bool {
        ownable::is_owner(&env, &who)
    }

    pub fn is_registered_voter(env: Env, who: Address) -> Result<bool, VotingError> {
        Ok(election::load(&env)?.is_registered_voter(&who))
    }

    pub fn is_initialized(env: Env) -> bool {
        election::exists(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, VotingError> {
        ownable::get_owner(&env).map_err(VotingError::from)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

impl VotingContract {
    fn require_initialized(env: &Env) -> Result<(), VotingError> {
        if !election::exists(env) {
            return Err(VotingError::NotInitialized);
        }
        Ok(())
    }

    fn caller(env: &Env, address: Address) -> Caller {
        let is_admin = ownable::is_owner(env, &address);
        Caller::new(address, is_admin)
    }

    /// Authenticate `caller`, run `op` against the stored election, then
    /// store the header and publish the notification. Nothing is
    /// written when `op` fails.
    fn apply<T, F>(env: &Env, caller: Address, op: F) -> Result<T, VotingError>
    where
        F: FnOnce(&mut Election, &Caller) -> Result<Applied<T>, VotingError>,
    {
        caller.require_auth();
        let mut election = election::load(env)?;
        let caller = Self::caller(env, caller);

        let applied = op(&mut election, &caller)?;

        election::store(env, &election);
        events::publish(env, &applied.event);
        Ok(applied.value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
