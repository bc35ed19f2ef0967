//! # Scenario DSL
//!
//! Given-When-Then election scenarios. Steps speak in election terms
//! (voters, proposals, ballots, phases) and drive a fresh
//! [`VotingTestHarness`] forward one workflow step at a time.
//!
//! ## Example
//!
//! ```rust,ignore
//! Scenario::new("Majority wins")
//!     .given_voters(3)
//!     .given_proposals(&[(0, "Solar panels"), (1, "Bike lanes")])
//!     .when_voting(&[(0, 2), (1, 2), (2, 1)])
//!     .when_tallied()
//!     .then_winner(2)
//!     .then_rejected("no second tally", VotingError::InvalidTransition, |ctx| {
//!         ctx.harness.client.try_tally_votes(&ctx.harness.admin)
//!     })
//!     .run();
//! ```

extern crate std;

use soroban_sdk::{Address, InvokeError};
use std::string::String;
use std::vec::Vec;
use voting::{workflow::WorkflowStatus, VotingError};

use super::invariants::InvariantSet;
use super::{TestEnv, VotingTestHarness};

/// What a generated `try_*` client call returns.
pub type TryCall<T, C> = Result<Result<T, C>, Result<VotingError, InvokeError>>;

// ── Scenario Context ─────────────────────────────────────────────────────────

/// State shared by the steps of one scenario.
pub struct ScenarioContext<'a, 'b> {
    pub harness: &'a VotingTestHarness<'b>,
    /// Voters registered by `given_voters`, in registration order.
    pub voters: Vec<Address>,
    /// Ids returned by `given_proposals`, in submission order.
    pub proposals: Vec<u32>,
}

impl<'a, 'b> ScenarioContext<'a, 'b> {
    fn new(harness: &'a VotingTestHarness<'b>) -> Self {
        Self {
            harness,
            voters: Vec::new(),
            proposals: Vec::new(),
        }
    }

    pub fn voter(&self, index: usize) -> &Address {
        self.voters
            .get(index)
            .unwrap_or_else(|| panic!("scenario has no voter #{}", index))
    }

    /// Step the workflow forward until it reaches `target`.
    ///
    /// Panics when `target` is already behind the current phase.
    pub fn advance_to(&self, target: WorkflowStatus) {
        while self.harness.status().code() < target.code() {
            self.harness.advance();
        }
        assert_eq!(
            self.harness.status(),
            target,
            "cannot move the workflow back to {:?}",
            target
        );
    }
}

/// Fails unless `result` is the contract error `expected`.
pub fn expect_voting_error<T, C>(context: &str, result: TryCall<T, C>, expected: VotingError) {
    match result {
        Err(Ok(actual)) => assert_eq!(
            actual, expected,
            "{}: expected {:?}, got {:?}",
            context, expected, actual
        ),
        Err(Err(invoke)) => panic!("{}: host error {:?}", context, invoke),
        Ok(_) => panic!("{}: expected {:?}, but the call succeeded", context, expected),
    }
}

// ── Scenario Builder ─────────────────────────────────────────────────────────

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

/// An election scenario, run against a freshly initialised contract.
///
/// Given steps run first, then when steps, then the attached invariants
/// over the scenario's voters, then the then steps.
pub struct Scenario {
    name: String,
    given_steps: Vec<StepFn>,
    when_steps: Vec<StepFn>,
    then_steps: Vec<StepFn>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            given_steps: Vec::new(),
            when_steps: Vec::new(),
            then_steps: Vec::new(),
            invariants: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Given ────────────────────────────────────────────────────────────────

    /// Register `n` more voters. Must run while voters are being registered.
    pub fn given_voters(self, n: usize) -> Self {
        self.given(move |ctx| {
            let added = ctx.harness.register_voters(n);
            ctx.voters.extend(added);
        })
    }

    /// Open proposal registration if needed, then submit each
    /// `(voter index, description)` in order.
    pub fn given_proposals(self, proposals: &[(usize, &'static str)]) -> Self {
        let proposals = proposals.to_vec();
        self.given(move |ctx| {
            ctx.advance_to(WorkflowStatus::ProposalsRegistrationStarted);
            for (voter, description) in proposals {
                let id = ctx.harness.submit(ctx.voter(voter), description);
                ctx.proposals.push(id);
            }
        })
    }

    /// Drive the workflow forward to `phase`.
    pub fn given_phase(self, phase: WorkflowStatus) -> Self {
        self.given(move |ctx| ctx.advance_to(phase))
    }

    pub fn given<F>(mut self, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.given_steps.push(Box::new(action));
        self
    }

    // ── When ─────────────────────────────────────────────────────────────────

    /// Open the voting session if needed, then cast each
    /// `(voter index, proposal id)` ballot in order.
    pub fn when_voting(self, ballots: &[(usize, u32)]) -> Self {
        let ballots = ballots.to_vec();
        self.when("ballots are cast", move |ctx| {
            ctx.advance_to(WorkflowStatus::VotingSessionStarted);
            for (voter, proposal_id) in ballots {
                ctx.harness.vote(ctx.voter(voter), proposal_id);
            }
        })
    }

    /// Close whatever phase is open and tally.
    pub fn when_tallied(self) -> Self {
        self.when("votes are tallied", |ctx| {
            ctx.advance_to(WorkflowStatus::VotesTallied)
        })
    }

    pub fn when<F>(mut self, _description: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.when_steps.push(Box::new(action));
        self
    }

    // ── Then ─────────────────────────────────────────────────────────────────

    pub fn then_phase(self, expected: WorkflowStatus) -> Self {
        self.then("workflow phase", move |ctx| {
            assert_eq!(ctx.harness.status(), expected);
        })
    }

    pub fn then_winner(self, expected: u32) -> Self {
        self.then("winning proposal", move |ctx| {
            assert_eq!(ctx.harness.client.winning_proposal_id(), expected);
        })
    }

    pub fn then_vote_count(self, proposal_id: u32, expected: u32) -> Self {
        self.then("vote count", move |ctx| {
            assert_eq!(ctx.harness.proposal(proposal_id).vote_count, expected);
        })
    }

    /// Assert that `call` is refused with `expected`.
    pub fn then_rejected<T, C, F>(self, description: &str, expected: VotingError, call: F) -> Self
    where
        T: 'static,
        C: 'static,
        F: FnOnce(&mut ScenarioContext<'_, '_>) -> TryCall<T, C> + 'static,
    {
        let context: String = description.into();
        self.then(description, move |ctx| {
            expect_voting_error(&context, call(ctx), expected)
        })
    }

    pub fn then<F>(mut self, _description: &str, assertion: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.then_steps.push(Box::new(assertion));
        self
    }

    /// Check `invariants` after the when steps.
    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    /// Execute the scenario. Panics on the first failed step.
    pub fn run(self) {
        let mut env = TestEnv::new();
        let harness = VotingTestHarness::new(&mut env);
        let mut ctx = ScenarioContext::new(&harness);

        for step in self.given_steps {
            step(&mut ctx);
        }
        for step in self.when_steps {
            step(&mut ctx);
        }

        if let Some(invariants) = &self.invariants {
            let snapshot = harness.snapshot(&ctx.voters);
            let violations = invariants.check_all(&snapshot);
            if !violations.is_empty() {
                let mut report = std::format!(
                    "Scenario '{}' broke invariants in {:?}:\n",
                    self.name,
                    snapshot.status
                );
                for (name, msg) in &violations {
                    report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
                }
                panic!("{}", report);
            }
        }

        for step in self.then_steps {
            step(&mut ctx);
        }
    }
}

// ── Batch Scenario Runner ────────────────────────────────────────────────────

/// Run every scenario, returning `(passed, failed)`.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> (usize, usize) {
    let total = scenarios.len();
    let mut failures = 0;

    for scenario in scenarios {
        let name: String = scenario.name().into();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| scenario.run()));
        if result.is_err() {
            std::eprintln!("  ✗ {}", name);
            failures += 1;
        } else {
            std::eprintln!("  ✓ {}", name);
        }
    }

    (total - failures, failures)
}
