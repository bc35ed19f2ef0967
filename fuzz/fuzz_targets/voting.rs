#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String};
use voting::{
    proposal::MAX_DESCRIPTION_LEN, workflow::WorkflowStatus, VotingContract,
    VotingContractClient,
};

/// Actions covering every mutating entry point. `who` selects from a small
/// pool of addresses where slot 0 is the administrator.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    RegisterVoter { who: u8, caller: u8 },
    /// `size` picks an empty, ordinary or overlong description.
    SubmitProposal { who: u8, size: u8 },
    CastVote { who: u8, proposal: u8 },
    StartProposals { caller: u8 },
    EndProposals { caller: u8 },
    StartVoting { caller: u8 },
    EndVoting { caller: u8 },
    Tally { caller: u8 },
}

const POOL: usize = 6;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(VotingContract, ());
    let client = VotingContractClient::new(&env, &contract_id);

    let users: Vec<Address> = (0..POOL).map(|_| Address::generate(&env)).collect();
    if client.try_initialize(&users[0]).is_err() {
        return;
    }
    let pick = |i: u8| &users[i as usize % POOL];
    let text = String::from_str(&env, "fuzz proposal");
    let empty = String::from_str(&env, "");
    let overlong = String::from_str(&env, &"z".repeat(MAX_DESCRIPTION_LEN as usize + 1));

    let mut last_status = WorkflowStatus::RegisteringVoters;

    for action in actions {
        match action {
            FuzzAction::RegisterVoter { who, caller } => {
                let _ = client.try_register_voter(pick(caller), pick(who));
            }
            FuzzAction::SubmitProposal { who, size } => {
                let description = match size % 3 {
                    0 => &empty,
                    1 => &text,
                    _ => &overlong,
                };
                let _ = client.try_submit_proposal(pick(who), description);
            }
            FuzzAction::CastVote { who, proposal } => {
                let _ = client.try_cast_vote(pick(who), &(proposal as u32));
            }
            FuzzAction::StartProposals { caller } => {
                let _ = client.try_start_proposals_registration(pick(caller));
            }
            FuzzAction::EndProposals { caller } => {
                let _ = client.try_end_proposals_registration(pick(caller));
            }
            FuzzAction::StartVoting { caller } => {
                let _ = client.try_start_voting_session(pick(caller));
            }
            FuzzAction::EndVoting { caller } => {
                let _ = client.try_end_voting_session(pick(caller));
            }
            FuzzAction::Tally { caller } => {
                let _ = client.try_tally_votes(pick(caller));
            }
        }

        // ── Post-action invariant checks ──
        let status = client.current_workflow_status();
        assert!(
            status == last_status || last_status.next() == Some(status),
            "INVARIANT VIOLATION: phase jumped {:?} -> {:?}",
            last_status,
            status
        );
        last_status = status;

        let count = client.proposal_count();
        if status == WorkflowStatus::RegisteringVoters {
            assert_eq!(count, 0, "INVARIANT VIOLATION: proposals before registration");
            continue;
        }

        // Reads need a registered caller; skip until one exists.
        let Some(reader) = users.iter().find(|u| client.is_registered_voter(u)) else {
            continue;
        };

        let mut total: u64 = 0;
        for i in 0..count {
            total += client.get_proposal(reader, &i).vote_count as u64;
        }
        assert_eq!(
            client.get_proposal(reader, &0).vote_count,
            0,
            "INVARIANT VIOLATION: sentinel received a vote"
        );

        let ballots = users
            .iter()
            .filter(|u| client.get_voter(reader, u).has_voted)
            .count() as u64;
        assert_eq!(total, ballots, "INVARIANT VIOLATION: tally drift");

        if status != WorkflowStatus::VotesTallied {
            assert_eq!(client.winning_proposal_id(), 0);
        }
    }
});
