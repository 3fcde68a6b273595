use crate::{BeliefState, Proposition, State, VarWeights};
use log::trace;
use rustc_hash::FxHashMap;
use std::{cell::RefCell, cmp::Ordering};

/// A total preorder over states, built relative to a belief state.
///
/// States comparing as [`Ordering::Less`] are closer to the belief state.
pub trait StateComparator {
    /// Compares two states.
    fn compare(&self, state1: &State, state2: &State) -> Ordering;

    /// Returns this comparator as a distance-based one, if it is.
    fn as_by_distance(&self) -> Option<&ByDistanceComparator> {
        None
    }
}

/// A function computing the distance between a state and a belief state.
pub trait DistanceMetric {
    /// Returns the distance from the state to the belief state, given the models of the latter.
    fn distance(&self, belief_state: &BeliefState, belief_models: &[State], state: &State) -> usize;
}

/// The Hamming distance: the minimal number of shared variables on which the state disagrees with a model of the belief state.
///
/// If the belief state has no model, every state is at distance `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HammingDistance;

impl DistanceMetric for HammingDistance {
    fn distance(&self, _: &BeliefState, belief_models: &[State], state: &State) -> usize {
        belief_models
            .iter()
            .map(|m| m.hamming_distance(state))
            .min()
            .unwrap_or(0)
    }
}

/// The weighted Hamming distance: same as [`HammingDistance`], but disagreements count for the weight of their variable.
#[derive(Clone, Debug, Default)]
pub struct WeightedHammingDistance(VarWeights);

impl WeightedHammingDistance {
    /// Builds the metric given the variable weights.
    pub fn new(weights: VarWeights) -> Self {
        Self(weights)
    }
}

impl DistanceMetric for WeightedHammingDistance {
    fn distance(&self, _: &BeliefState, belief_models: &[State], state: &State) -> usize {
        belief_models
            .iter()
            .map(|m| m.weighted_hamming_distance(state, &self.0))
            .min()
            .unwrap_or(0)
    }
}

/// An explicit preference order given by an ordered list of propositions.
///
/// The buckets are the belief state itself (bucket `0`), then the given propositions, then a tautology.
/// The distance of a state is the index of the first bucket it is consistent with.
#[derive(Clone, Debug, Default)]
pub struct OrderedSetsDistance(Vec<Proposition>);

impl OrderedSetsDistance {
    /// Builds the metric given the ordered intermediate buckets.
    pub fn new(ordered_sets: Vec<Proposition>) -> Self {
        Self(ordered_sets)
    }
}

impl DistanceMetric for OrderedSetsDistance {
    fn distance(&self, belief_state: &BeliefState, _: &[State], state: &State) -> usize {
        let belief = Proposition::conjunction(belief_state.iter().cloned())
            .unwrap_or(Proposition::Contradiction);
        let state_prop = state.to_proposition();
        std::iter::once(&belief)
            .chain(self.0.iter())
            .position(|bucket| bucket.and(&state_prop).is_satisfiable())
            .unwrap_or(self.0.len() + 1)
    }
}

/// A comparator ordering states by their distance to a belief state.
///
/// The models of the belief state (the conjunction of its propositions, or a contradiction if it is empty) are computed once at creation.
/// Distances are memoized for the lifetime of the comparator.
pub struct ByDistanceComparator {
    belief_state: BeliefState,
    belief_models: Vec<State>,
    metric: Box<dyn DistanceMetric>,
    cached_distances: RefCell<FxHashMap<State, usize>>,
}

impl ByDistanceComparator {
    /// Builds a comparator for the belief state using the given metric.
    pub fn new(belief_state: BeliefState, metric: Box<dyn DistanceMetric>) -> Self {
        let belief_models = Proposition::conjunction(belief_state.iter().cloned())
            .unwrap_or(Proposition::Contradiction)
            .models()
            .collect();
        Self {
            belief_state,
            belief_models,
            metric,
            cached_distances: RefCell::new(FxHashMap::default()),
        }
    }

    /// Builds a comparator using the Hamming distance.
    pub fn hamming(belief_state: BeliefState) -> Self {
        Self::new(belief_state, Box::new(HammingDistance))
    }

    /// Builds a comparator using the weighted Hamming distance.
    pub fn weighted_hamming(belief_state: BeliefState, weights: VarWeights) -> Self {
        Self::new(belief_state, Box::new(WeightedHammingDistance::new(weights)))
    }

    /// Builds a comparator using an ordered list of propositions.
    pub fn ordered_sets(belief_state: BeliefState, ordered_sets: Vec<Proposition>) -> Self {
        Self::new(belief_state, Box::new(OrderedSetsDistance::new(ordered_sets)))
    }

    /// Returns the belief state this comparator is relative to.
    pub fn belief_state(&self) -> &BeliefState {
        &self.belief_state
    }

    /// Returns the distance from the state to the belief state.
    pub fn distance_to(&self, state: &State) -> usize {
        if let Some(d) = self.cached_distances.borrow().get(state) {
            return *d;
        }
        let d = self
            .metric
            .distance(&self.belief_state, &self.belief_models, state);
        trace!("distance to {} is {}", state, d);
        self.cached_distances.borrow_mut().insert(state.clone(), d);
        d
    }
}

impl StateComparator for ByDistanceComparator {
    fn compare(&self, state1: &State, state2: &State) -> Ordering {
        self.distance_to(state1).cmp(&self.distance_to(state2))
    }

    fn as_by_distance(&self) -> Option<&ByDistanceComparator> {
        Some(self)
    }
}
