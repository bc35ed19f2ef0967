//! The election aggregate and every rule that governs it.
//!
//! [`Election`] is a thin façade over keyed storage. The header (phase,
//! proposal count, winner) sits in instance storage and is loaded into the
//! value; voter and proposal records each have their own persistent key and
//! are read and written through [`voter`] and [`proposal`]. Operations
//! validate every precondition before their first write and return the
//! notification to publish alongside their result, so a rejected call never
//! leaves a partial write behind.

use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use common::ttl;

use crate::errors::VotingError;
use crate::events::ElectionEvent;
use crate::proposal::{self, Proposal, GENESIS_ID};
use crate::tally;
use crate::voter::{self, Voter};
use crate::workflow::{self, WorkflowStatus};

const STATUS: Symbol = symbol_short!("STATUS");
const PROP_CNT: Symbol = symbol_short!("PROP_CNT");
const WINNER: Symbol = symbol_short!("WINNER");

// ── Caller capability ────────────────────────────────────────────────────────

/// An authenticated caller together with its administrator capability.
///
/// Built by the contract boundary after `require_auth`, so the election
/// never has to know how administration is implemented.
#[derive(Clone, Debug)]
pub struct Caller {
    address: Address,
    is_admin: bool,
}

impl Caller {
    pub fn new(address: Address, is_admin: bool) -> Self {
        Caller { address, is_admin }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_administrator(&self) -> bool {
        self.is_admin
    }
}

/// A successful mutation: the value returned to the caller and the
/// notification it produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Applied<T> {
    pub value: T,
    pub event: ElectionEvent,
}

impl<T> Applied<T> {
    fn new(value: T, event: ElectionEvent) -> Self {
        Applied { value, event }
    }
}

// ── Aggregate ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Election {
    env: Env,
    status: WorkflowStatus,
    proposal_count: u32,
    winning_proposal_id: u32,
}

impl Election {
    pub fn new(env: &Env) -> Self {
        Election {
            env: env.clone(),
            status: WorkflowStatus::RegisteringVoters,
            proposal_count: 0,
            winning_proposal_id: GENESIS_ID,
        }
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// The sentinel until votes are tallied.
    pub fn winning_proposal_id(&self) -> u32 {
        self.winning_proposal_id
    }

    /// Includes the sentinel once proposal registration has opened.
    pub fn proposal_count(&self) -> u32 {
        self.proposal_count
    }

    pub fn is_registered_voter(&self, who: &Address) -> bool {
        voter::is_registered_voter(&self.env, who)
    }

    fn require_administrator(caller: &Caller) -> Result<(), VotingError> {
        if !caller.is_administrator() {
            return Err(VotingError::NotAdministrator);
        }
        Ok(())
    }

    fn require_voter(&self, caller: &Caller) -> Result<(), VotingError> {
        if !self.is_registered_voter(caller.address()) {
            return Err(VotingError::NotAVoter);
        }
        Ok(())
    }

    // ── Voter registry ───────────────────────────────────────────────────────

    pub fn register_voter(
        &mut self,
        caller: &Caller,
        who: &Address,
    ) -> Result<Applied<()>, VotingError> {
        Self::require_administrator(caller)?;
        workflow::require_phase(self.status, WorkflowStatus::RegisteringVoters)?;
        voter::register(&self.env, who)?;
        Ok(Applied::new((), ElectionEvent::VoterRegistered(who.clone())))
    }

    /// Any registered voter may read any record, in any phase.
    pub fn get_voter(&self, caller: &Caller, who: &Address) -> Result<Voter, VotingError> {
        self.require_voter(caller)?;
        Ok(voter::lookup(&self.env, who))
    }

    // ── Proposal registry ────────────────────────────────────────────────────

    pub fn submit_proposal(
        &mut self,
        caller: &Caller,
        description: String,
    ) -> Result<Applied<u32>, VotingError> {
        self.require_voter(caller)?;
        workflow::require_phase(self.status, WorkflowStatus::ProposalsRegistrationStarted)?;
        let index = proposal::append(&self.env, self.proposal_count, description)?;
        self.proposal_count = index + 1;
        Ok(Applied::new(index, ElectionEvent::ProposalRegistered(index)))
    }

    pub fn get_proposal(&self, caller: &Caller, index: u32) -> Result<Proposal, VotingError> {
        self.require_voter(caller)?;
        proposal::get(&self.env, self.proposal_count, index)
    }

    // ── Voting ───────────────────────────────────────────────────────────────

    pub fn cast_vote(&mut self, caller: &Caller, index: u32) -> Result<Applied<()>, VotingError> {
        self.require_voter(caller)?;
        workflow::require_phase(self.status, WorkflowStatus::VotingSessionStarted)?;
        if voter::lookup(&self.env, caller.address()).has_voted {
            return Err(VotingError::AlreadyVoted);
        }
        if index == GENESIS_ID {
            return Err(VotingError::ProposalNotFound);
        }
        proposal::get(&self.env, self.proposal_count, index)?;

        voter::record_vote(&self.env, caller.address(), index)?;
        proposal::increment_vote(&self.env, self.proposal_count, index)?;
        Ok(Applied::new(
            (),
            ElectionEvent::Voted(caller.address().clone(), index),
        ))
    }

    // ── Workflow transitions ─────────────────────────────────────────────────

    /// Also seeds the proposal registry with the sentinel.
    pub fn start_proposals_registration(
        &mut self,
        caller: &Caller,
    ) -> Result<Applied<WorkflowStatus>, VotingError> {
        let applied = self.advance(caller, WorkflowStatus::RegisteringVoters)?;
        self.proposal_count = proposal::initialize_registry(&self.env);
        Ok(applied)
    }

    pub fn end_proposals_registration(
        &mut self,
        caller: &Caller,
    ) -> Result<Applied<WorkflowStatus>, VotingError> {
        self.advance(caller, WorkflowStatus::ProposalsRegistrationStarted)
    }

    pub fn start_voting_session(
        &mut self,
        caller: &Caller,
    ) -> Result<Applied<WorkflowStatus>, VotingError> {
        self.advance(caller, WorkflowStatus::ProposalsRegistrationEnded)
    }

    pub fn end_voting_session(
        &mut self,
        caller: &Caller,
    ) -> Result<Applied<WorkflowStatus>, VotingError> {
        self.advance(caller, WorkflowStatus::VotingSessionStarted)
    }

    /// Runs the tally, then moves to `VotesTallied`. Returns the winner.
    pub fn tally_votes(&mut self, caller: &Caller) -> Result<Applied<u32>, VotingError> {
        Self::require_administrator(caller)?;
        let next = workflow::transition(self.status, WorkflowStatus::VotingSessionEnded)?;

        self.winning_proposal_id = tally::compute_winner(&self.env, self.proposal_count);
        let previous = self.status;
        self.status = next;
        Ok(Applied::new(
            self.winning_proposal_id,
            ElectionEvent::WorkflowStatusChange(previous, next),
        ))
    }

    fn advance(
        &mut self,
        caller: &Caller,
        from: WorkflowStatus,
    ) -> Result<Applied<WorkflowStatus>, VotingError> {
        Self::require_administrator(caller)?;
        let next = workflow::transition(self.status, from)?;
        let previous = self.status;
        self.status = next;
        Ok(Applied::new(
            next,
            ElectionEvent::WorkflowStatusChange(previous, next),
        ))
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn exists(env: &Env) -> bool {
    env.storage().instance().has(&STATUS)
}

/// Read the header. Voter and proposal records stay in storage until an
/// operation asks for them.
pub(crate) fn load(env: &Env) -> Result<Election, VotingError> {
    let storage = env.storage().instance();
    let status = storage
        .get(&STATUS)
        .ok_or(VotingError::NotInitialized)?;
    Ok(Election {
        env: env.clone(),
        status,
        proposal_count: storage.get(&PROP_CNT).unwrap_or(0),
        winning_proposal_id: storage.get(&WINNER).unwrap_or(GENESIS_ID),
    })
}

pub(crate) fn store(env: &Env, election: &Election) {
    let storage = env.storage().instance();
    storage.set(&STATUS, &election.status);
    storage.set(&PROP_CNT, &election.proposal_count);
    storage.set(&WINNER, &election.winning_proposal_id);
    ttl::extend_instance(env);
}
