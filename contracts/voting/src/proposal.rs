//! Proposal registry: an append-only arena indexed from zero.
//!
//! Index 0 holds the `GENESIS` sentinel, written when proposal registration
//! opens. Ballots for it are refused, so it keeps zero votes and can never
//! win a tally against a proposal with at least one vote.
//!
//! Each proposal lives under its own persistent key, `(PROP, index)`. The
//! number of entries is owned by the election header and passed in.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol};

use common::ttl;

use crate::errors::VotingError;

const PROP: Symbol = symbol_short!("PROP");

/// Description of the sentinel proposal at index 0.
pub const GENESIS_DESCRIPTION: &str = "GENESIS";
/// Index of the sentinel proposal, also the default winner.
pub const GENESIS_ID: u32 = 0;

/// Longest accepted description, in bytes.
pub const MAX_DESCRIPTION_LEN: u32 = 256;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u32,
}

pub(crate) fn proposal_key(index: u32) -> (Symbol, u32) {
    (PROP, index)
}

pub(crate) fn store(env: &Env, index: u32, proposal: &Proposal) {
    let key = proposal_key(index);
    env.storage().persistent().set(&key, proposal);
    ttl::extend_persistent(env, &key);
}

pub(crate) fn load(env: &Env, index: u32) -> Option<Proposal> {
    env.storage().persistent().get(&proposal_key(index))
}

/// Descriptions must be non-empty and at most `MAX_DESCRIPTION_LEN` bytes.
pub fn validate_description(description: &String) -> Result<(), VotingError> {
    let len = description.len();
    if len == 0 {
        return Err(VotingError::EmptyProposal);
    }
    if len > MAX_DESCRIPTION_LEN {
        return Err(VotingError::ProposalTooLong);
    }
    Ok(())
}

/// Write the sentinel and return the new registry size.
pub(crate) fn initialize_registry(env: &Env) -> u32 {
    let genesis = Proposal {
        description: String::from_str(env, GENESIS_DESCRIPTION),
        vote_count: 0,
    };
    store(env, GENESIS_ID, &genesis);
    GENESIS_ID + 1
}

/// Append a proposal after the `count` existing ones and return its index.
pub(crate) fn append(env: &Env, count: u32, description: String) -> Result<u32, VotingError> {
    validate_description(&description)?;
    store(
        env,
        count,
        &Proposal {
            description,
            vote_count: 0,
        },
    );
    Ok(count)
}

/// Bounds-checked read against a registry of `count` entries.
pub fn get(env: &Env, count: u32, index: u32) -> Result<Proposal, VotingError> {
    if index >= count {
        return Err(VotingError::ProposalNotFound);
    }
    load(env, index).ok_or(VotingError::ProposalNotFound)
}

/// Add one vote to the proposal at `index`, returning its new count.
pub(crate) fn increment_vote(env: &Env, count: u32, index: u32) -> Result<u32, VotingError> {
    let mut proposal = get(env, count, index)?;
    proposal.vote_count = proposal.vote_count.saturating_add(1);
    store(env, index, &proposal);
    Ok(proposal.vote_count)
}
