#![allow(deprecated)] // events().publish migration to #[contractevent] tracked separately

//! Structured event publishing for the voting contract.
//!
//! Election operations return an [`ElectionEvent`]; the contract publishes
//! it here once the new state has been stored.

use soroban_sdk::{symbol_short, Address, Env};

use crate::workflow::WorkflowStatus;

/// Notification produced by a successful state change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElectionEvent {
    VoterRegistered(Address),
    ProposalRegistered(u32),
    /// `(voter, proposal_id)`
    Voted(Address, u32),
    /// `(previous, new)`
    WorkflowStatusChange(WorkflowStatus, WorkflowStatus),
}

pub fn publish(env: &Env, event: &ElectionEvent) {
    match event {
        ElectionEvent::VoterRegistered(voter) => {
            env.events()
                .publish((symbol_short!("VOTER_REG"),), voter.clone());
        }
        ElectionEvent::ProposalRegistered(proposal_id) => {
            env.events()
                .publish((symbol_short!("PROP_REG"),), *proposal_id);
        }
        ElectionEvent::Voted(voter, proposal_id) => {
            env.events().publish(
                (symbol_short!("VOTED"), voter.clone()),
                *proposal_id,
            );
        }
        ElectionEvent::WorkflowStatusChange(previous, new) => {
            env.events().publish(
                (symbol_short!("WF_CHANGE"),),
                (previous.code(), new.code()),
            );
        }
    }
}

pub fn publish_initialized(env: &Env, admin: &Address) {
    env.events()
        .publish((symbol_short!("INIT"),), admin.clone());
}

pub fn publish_admin_transferred(env: &Env, previous: &Address, new_admin: &Address) {
    env.events().publish(
        (symbol_short!("ADMIN_XFR"),),
        (previous.clone(), new_admin.clone()),
    );
}
