use super::{
    frontier::{candidate_universe, comparators_of, expanding_frontier_search},
    AnnouncementResolutionStrategy, ProblemInstance,
};
use crate::{revision::StateComparator, CancellationToken, Proposition, State};
use anyhow::Result;
use log::debug;
use std::cmp::Ordering;

/// Widens, for each agent, the set of candidate states following the preorder given by its comparator.
///
/// States the comparator considers equivalent are added together.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedAnnouncementResolutionStrategy;

impl OrderedAnnouncementResolutionStrategy {
    fn tied_classes(comparator: &dyn StateComparator, universe: &[State]) -> Vec<Vec<State>> {
        let mut sorted = universe.to_vec();
        sorted.sort_by(|s1, s2| comparator.compare(s1, s2));
        let mut classes: Vec<Vec<State>> = Vec::new();
        for state in sorted {
            let starts_class = classes
                .last()
                .map_or(true, |c| comparator.compare(&c[0], &state) != Ordering::Equal);
            if starts_class {
                classes.push(vec![state]);
            } else if let Some(class) = classes.last_mut() {
                class.push(state);
            }
        }
        classes
    }
}

impl AnnouncementResolutionStrategy for OrderedAnnouncementResolutionStrategy {
    fn resolve_with(
        &self,
        problem_instances: &[ProblemInstance],
        cancellation: &CancellationToken,
    ) -> Result<Option<Proposition>> {
        let comparators = comparators_of(problem_instances, "ordered")?;
        let universe = candidate_universe(problem_instances, cancellation)?;
        debug!("ordered search over {} candidate state(s)", universe.len());
        let partitions = comparators
            .iter()
            .map(|c| Self::tied_classes(c.as_ref(), &universe))
            .collect::<Vec<_>>();
        expanding_frontier_search(problem_instances, &partitions, cancellation)
    }
}
