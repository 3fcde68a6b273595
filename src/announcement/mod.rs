//! Announcement resolution: searching for one sentence that leads every agent to its target belief state.

mod brute_force;
pub use brute_force::BruteForceAnnouncementResolutionStrategy;

mod by_distance;
pub use by_distance::ByDistanceAnnouncementResolutionStrategy;

mod frontier;

mod ordered;
pub use ordered::OrderedAnnouncementResolutionStrategy;

mod problems;
pub use problems::ProblemInstance;

mod simple;
pub use simple::SimpleAnnouncementResolutionStrategy;

use crate::{CancellationToken, Proposition, Variable};
use anyhow::{Context, Result};
use std::collections::BTreeSet;

/// A strategy searching for a single announcement solving several problem instances at once.
pub trait AnnouncementResolutionStrategy {
    /// Searches for an announcement solving every problem instance.
    ///
    /// `Ok(None)` is returned when the strategy finds no such announcement.
    fn resolve(&self, problem_instances: &[ProblemInstance]) -> Result<Option<Proposition>> {
        self.resolve_with(problem_instances, &CancellationToken::new())
    }

    /// Same as [`resolve`](Self::resolve), but gives up with a [`KernelError::Cancelled`](crate::KernelError::Cancelled) error once the token is cancelled.
    fn resolve_with(
        &self,
        problem_instances: &[ProblemInstance],
        cancellation: &CancellationToken,
    ) -> Result<Option<Proposition>>;
}

/// Returns the variables involved in any of the problem instances.
pub(crate) fn all_variables(problem_instances: &[ProblemInstance]) -> BTreeSet<Variable> {
    problem_instances
        .iter()
        .flat_map(|i| i.variables())
        .collect()
}

/// Returns `true` iff the announcement solves every problem instance.
pub(crate) fn solves_all(
    problem_instances: &[ProblemInstance],
    announcement: &Proposition,
    cancellation: &CancellationToken,
) -> Result<bool> {
    for instance in problem_instances {
        if !instance
            .is_solved_by_with(announcement, cancellation)
            .context("while checking a candidate announcement")?
        {
            return Ok(false);
        }
    }
    Ok(true)
}
