use crate::{revision::BeliefRevisionStrategy, BeliefState, CancellationToken, Proposition, Variable};
use anyhow::Result;
use log::trace;
use std::collections::BTreeSet;

/// The planning problem of a single agent: reach a target belief state from an initial one.
pub struct ProblemInstance {
    initial_belief_state: BeliefState,
    target_belief_state: Proposition,
    belief_revision_strategy: Box<dyn BeliefRevisionStrategy>,
}

impl ProblemInstance {
    /// Builds a new problem instance.
    pub fn new(
        initial_belief_state: BeliefState,
        target_belief_state: Proposition,
        belief_revision_strategy: Box<dyn BeliefRevisionStrategy>,
    ) -> Self {
        Self {
            initial_belief_state,
            target_belief_state,
            belief_revision_strategy,
        }
    }

    /// Returns the belief state of the agent before any announcement.
    pub fn initial_belief_state(&self) -> &BeliefState {
        &self.initial_belief_state
    }

    /// Returns the belief state the agent should reach.
    pub fn target_belief_state(&self) -> &Proposition {
        &self.target_belief_state
    }

    /// Returns the strategy the agent uses to revise its beliefs.
    pub fn belief_revision_strategy(&self) -> &dyn BeliefRevisionStrategy {
        self.belief_revision_strategy.as_ref()
    }

    /// Returns the variables involved in the initial and target belief states.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.initial_belief_state
            .iter()
            .chain(std::iter::once(&self.target_belief_state))
            .flat_map(|p| p.variables())
            .collect()
    }

    /// Returns the belief state obtained by revising the initial one by the sentence.
    pub fn revise_by(&self, sentence: &Proposition) -> BeliefState {
        self.belief_revision_strategy
            .revise(&self.initial_belief_state, sentence)
    }

    /// Returns `true` iff the announcement of the sentence solves this problem instance.
    ///
    /// If the target is satisfiable, the revised belief state must be satisfiable and entail the target.
    /// Otherwise, the target is unreachable and the revised belief state must be unsatisfiable.
    /// An empty revised belief state is read as a contradiction.
    pub fn is_solved_by(&self, sentence: &Proposition) -> bool {
        self.is_reached_by(sentence, self.revise_by(sentence))
    }

    /// Same as [`is_solved_by`](Self::is_solved_by), but the revision gives up with a [`KernelError::Cancelled`](crate::KernelError::Cancelled) error once the token is cancelled.
    pub fn is_solved_by_with(
        &self,
        sentence: &Proposition,
        cancellation: &CancellationToken,
    ) -> Result<bool> {
        let revised = self.belief_revision_strategy.revise_with(
            &self.initial_belief_state,
            sentence,
            cancellation,
        )?;
        Ok(self.is_reached_by(sentence, revised))
    }

    fn is_reached_by(&self, sentence: &Proposition, revised: BeliefState) -> bool {
        let result = Proposition::conjunction(revised).unwrap_or(Proposition::Contradiction);
        let solved = if self.target_belief_state.is_satisfiable() {
            result.is_satisfiable() && result.entails(&self.target_belief_state)
        } else {
            result.is_contradiction()
        };
        trace!(
            "{} {} target {}",
            sentence,
            if solved { "reaches" } else { "misses" },
            self.target_belief_state
        );
        solved
    }
}
