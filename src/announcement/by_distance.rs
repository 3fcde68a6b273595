use super::{
    frontier::{candidate_universe, comparators_of, expanding_frontier_search},
    AnnouncementResolutionStrategy, ProblemInstance,
};
use crate::{revision::ByDistanceComparator, CancellationToken, KernelError, Proposition, State};
use anyhow::{anyhow, Result};
use log::debug;
use std::collections::BTreeMap;

/// Widens, for each agent, the set of candidate states by increasing distance to its initial belief state.
///
/// Every problem instance must use a revision strategy whose comparator is distance-based.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByDistanceAnnouncementResolutionStrategy;

impl ByDistanceAnnouncementResolutionStrategy {
    fn distance_classes(comparator: &ByDistanceComparator, universe: &[State]) -> Vec<Vec<State>> {
        let mut classes: BTreeMap<usize, Vec<State>> = BTreeMap::new();
        for state in universe {
            classes
                .entry(comparator.distance_to(state))
                .or_default()
                .push(state.clone());
        }
        classes.into_values().collect()
    }
}

impl AnnouncementResolutionStrategy for ByDistanceAnnouncementResolutionStrategy {
    fn resolve_with(
        &self,
        problem_instances: &[ProblemInstance],
        cancellation: &CancellationToken,
    ) -> Result<Option<Proposition>> {
        let comparators = comparators_of(problem_instances, "by-distance")?;
        let distance_comparators = comparators
            .iter()
            .enumerate()
            .map(|(i, c)| {
                c.as_by_distance().ok_or_else(|| {
                    anyhow!(KernelError::Configuration(format!(
                        "by-distance resolution requires distance-based comparators (problem instance {} has another kind)",
                        i
                    )))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let universe = candidate_universe(problem_instances, cancellation)?;
        debug!("by-distance search over {} candidate state(s)", universe.len());
        let partitions = distance_comparators
            .iter()
            .map(|c| Self::distance_classes(c, &universe))
            .collect::<Vec<_>>();
        expanding_frontier_search(problem_instances, &partitions, cancellation)
    }
}
