//! Voter registry: which addresses may take part, and how they voted.
//!
//! Each record lives under its own persistent key, `(VOTER, address)`, so the
//! registry grows without bound on entry size.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use common::ttl;

use crate::errors::VotingError;

const VOTER: Symbol = symbol_short!("VOTER");

/// Per-address voting record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    /// Index into the proposal registry. Meaningless until `has_voted`.
    pub voted_proposal_id: u32,
}

impl Voter {
    /// A freshly registered voter who has not voted yet.
    pub fn registered() -> Self {
        Voter {
            is_registered: true,
            has_voted: false,
            voted_proposal_id: 0,
        }
    }

    /// The record reported for an address that was never registered.
    pub fn unregistered() -> Self {
        Voter {
            is_registered: false,
            has_voted: false,
            voted_proposal_id: 0,
        }
    }
}

pub(crate) fn voter_key(who: &Address) -> (Symbol, Address) {
    (VOTER, who.clone())
}

pub(crate) fn store(env: &Env, who: &Address, voter: &Voter) {
    let key = voter_key(who);
    env.storage().persistent().set(&key, voter);
    ttl::extend_persistent(env, &key);
}

pub(crate) fn load(env: &Env, who: &Address) -> Option<Voter> {
    env.storage().persistent().get(&voter_key(who))
}

pub fn is_registered_voter(env: &Env, who: &Address) -> bool {
    load(env, who).map(|v| v.is_registered).unwrap_or(false)
}

/// Insert a new voter. Registration is permanent.
pub(crate) fn register(env: &Env, who: &Address) -> Result<(), VotingError> {
    if is_registered_voter(env, who) {
        return Err(VotingError::AlreadyRegistered);
    }
    store(env, who, &Voter::registered());
    Ok(())
}

/// Look up a record, falling back to the unregistered default.
pub fn lookup(env: &Env, who: &Address) -> Voter {
    load(env, who).unwrap_or(Voter::unregistered())
}

/// Record a ballot. The voter must be registered and must not have voted.
pub(crate) fn record_vote(env: &Env, who: &Address, proposal_id: u32) -> Result<(), VotingError> {
    let mut voter = load(env, who).ok_or(VotingError::NotAVoter)?;
    if voter.has_voted {
        return Err(VotingError::AlreadyVoted);
    }
    voter.has_voted = true;
    voter.voted_proposal_id = proposal_id;
    store(env, who, &voter);
    Ok(())
}
