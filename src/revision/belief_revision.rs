use super::{ByDistanceComparator, SentenceRevisionStrategy, StateComparator};
use crate::{BeliefState, CancellationToken, KernelError, Models, Proposition, State, VarWeights};
use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use log::debug;

/// A strategy revising a belief state by a new sentence.
pub trait BeliefRevisionStrategy {
    /// Returns the belief state resulting from the revision of `belief_state` by `sentence`.
    fn revise(&self, belief_state: &BeliefState, sentence: &Proposition) -> BeliefState;

    /// Same as [`revise`](Self::revise), but gives up with a [`KernelError::Cancelled`] error once the token is cancelled.
    ///
    /// The default implementation only checks the token before revising.
    fn revise_with(
        &self,
        belief_state: &BeliefState,
        sentence: &Proposition,
        cancellation: &CancellationToken,
    ) -> Result<BeliefState> {
        cancellation.check()?;
        Ok(self.revise(belief_state, sentence))
    }

    /// Returns the comparator this strategy orders states with for the given belief state, if it relies on one.
    fn comparator_for(&self, _belief_state: &BeliefState) -> Option<Box<dyn StateComparator>> {
        None
    }
}

/// Revision keeping the sentence and every proposition of the belief state that is individually consistent with it.
///
/// No minimality is guaranteed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SatisfiabilityBeliefRevisionStrategy;

impl BeliefRevisionStrategy for SatisfiabilityBeliefRevisionStrategy {
    fn revise(&self, belief_state: &BeliefState, sentence: &Proposition) -> BeliefState {
        std::iter::once(sentence)
            .chain(belief_state.iter())
            .filter(|p| p.and(sentence).is_satisfiable())
            .cloned()
            .collect()
    }
}

type ComparatorFactory = dyn Fn(&BeliefState) -> Box<dyn StateComparator>;

/// Minimal-change revision driven by a state comparator.
///
/// The result is the disjunction of the models of the sentence that are minimal according to the comparator built for the belief state.
/// Models are taken over every variable of the belief state and the sentence.
/// An unsatisfiable sentence gives a contradiction.
pub struct ComparatorBeliefRevisionStrategy {
    comparator_factory: Box<ComparatorFactory>,
}

impl ComparatorBeliefRevisionStrategy {
    /// Builds the strategy given a function creating the comparator for a belief state.
    pub fn new<F>(comparator_factory: F) -> Self
    where
        F: Fn(&BeliefState) -> Box<dyn StateComparator> + 'static,
    {
        Self {
            comparator_factory: Box::new(comparator_factory),
        }
    }

    /// Builds the strategy using the Hamming distance.
    pub fn hamming() -> Self {
        Self::new(|k| Box::new(ByDistanceComparator::hamming(k.clone())))
    }

    /// Builds the strategy using the weighted Hamming distance.
    pub fn weighted_hamming(weights: VarWeights) -> Self {
        Self::new(move |k| {
            Box::new(ByDistanceComparator::weighted_hamming(
                k.clone(),
                weights.clone(),
            ))
        })
    }

    /// Builds the strategy using an ordered list of propositions.
    pub fn ordered_sets(ordered_sets: Vec<Proposition>) -> Self {
        Self::new(move |k| {
            Box::new(ByDistanceComparator::ordered_sets(
                k.clone(),
                ordered_sets.clone(),
            ))
        })
    }
}

impl ComparatorBeliefRevisionStrategy {
    fn nearest_models(
        &self,
        belief_state: &BeliefState,
        sentence: &Proposition,
        cancellation: Option<&CancellationToken>,
    ) -> (Vec<State>, bool) {
        let comparator = (self.comparator_factory)(belief_state);
        let closure = Proposition::tautological_closure(
            belief_state
                .iter()
                .chain(std::iter::once(sentence))
                .flat_map(|p| p.variables()),
        );
        let candidates = sentence.and(&closure);
        let mut models = Models::new(&candidates, cancellation);
        let nearest_models = models
            .by_ref()
            .min_set_by(|s0, s1| comparator.compare(s0, s1));
        debug!(
            "revision by {} keeps {} nearest model(s)",
            sentence,
            nearest_models.len()
        );
        (nearest_models, models.was_cancelled())
    }
}

impl BeliefRevisionStrategy for ComparatorBeliefRevisionStrategy {
    fn revise(&self, belief_state: &BeliefState, sentence: &Proposition) -> BeliefState {
        let (nearest_models, _) = self.nearest_models(belief_state, sentence, None);
        BeliefState::from([Proposition::from_states(&nearest_models)])
    }

    fn revise_with(
        &self,
        belief_state: &BeliefState,
        sentence: &Proposition,
        cancellation: &CancellationToken,
    ) -> Result<BeliefState> {
        let (nearest_models, cancelled) =
            self.nearest_models(belief_state, sentence, Some(cancellation));
        if cancelled {
            return Err(anyhow!(KernelError::Cancelled))
                .context("while computing the nearest models of the sentence");
        }
        Ok(BeliefState::from([Proposition::from_states(&nearest_models)]))
    }

    fn comparator_for(&self, belief_state: &BeliefState) -> Option<Box<dyn StateComparator>> {
        Some((self.comparator_factory)(belief_state))
    }
}

/// Revision that first restricts the sentence according to the trust granted to its source, then delegates.
pub struct TrustSensitiveBeliefRevisionStrategy {
    sentence_revision_strategy: Box<dyn SentenceRevisionStrategy>,
    belief_revision_strategy: Box<dyn BeliefRevisionStrategy>,
}

impl TrustSensitiveBeliefRevisionStrategy {
    /// Builds the strategy from the sentence revision and the underlying belief revision.
    pub fn new(
        sentence_revision_strategy: Box<dyn SentenceRevisionStrategy>,
        belief_revision_strategy: Box<dyn BeliefRevisionStrategy>,
    ) -> Self {
        Self {
            sentence_revision_strategy,
            belief_revision_strategy,
        }
    }
}

impl BeliefRevisionStrategy for TrustSensitiveBeliefRevisionStrategy {
    fn revise(&self, belief_state: &BeliefState, sentence: &Proposition) -> BeliefState {
        let trusted = self.sentence_revision_strategy.revise(sentence);
        debug!("sentence {} trusted as {}", sentence, trusted);
        self.belief_revision_strategy.revise(belief_state, &trusted)
    }

    fn revise_with(
        &self,
        belief_state: &BeliefState,
        sentence: &Proposition,
        cancellation: &CancellationToken,
    ) -> Result<BeliefState> {
        let trusted = self.sentence_revision_strategy.revise(sentence);
        self.belief_revision_strategy
            .revise_with(belief_state, &trusted, cancellation)
    }
}
