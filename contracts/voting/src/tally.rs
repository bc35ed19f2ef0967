//! Winner selection.

use soroban_sdk::Env;

use crate::proposal::{self, GENESIS_ID};

/// Index of the first strictly highest count.
///
/// Starts from the sentinel (index 0, count 0); a later entry only wins by
/// exceeding the best so far, so the earliest proposal takes ties. An empty
/// input or all-zero counts yield the sentinel.
pub fn winning_index<I>(counts: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let mut best_index = GENESIS_ID;
    let mut best_count = 0u32;
    for (index, count) in (0u32..).zip(counts) {
        if count > best_count {
            best_index = index;
            best_count = count;
        }
    }
    best_index
}

/// Scan the `count` stored proposals in index order.
pub fn compute_winner(env: &Env, count: u32) -> u32 {
    winning_index((0..count).map(|index| {
        proposal::load(env, index)
            .map(|p| p.vote_count)
            .unwrap_or(0)
    }))
}
