use super::{all_variables, solves_all, AnnouncementResolutionStrategy, ProblemInstance};
use crate::{CancellationToken, Proposition, State};
use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info};

/// Announces the disjunction of the targets, refined by each assignment of the variables it does not mention.
///
/// Targets satisfied by another target are left out of the disjunction.
/// The refinements are tried in turn, and the first one solving every instance is returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleAnnouncementResolutionStrategy;

impl SimpleAnnouncementResolutionStrategy {
    fn base_announcement(problem_instances: &[ProblemInstance]) -> Proposition {
        let targets = problem_instances
            .iter()
            .map(|i| i.target_belief_state().clone())
            .unique()
            .collect::<Vec<_>>();
        let independent_targets = targets
            .iter()
            .filter(|k| {
                targets
                    .iter()
                    .filter(|other| other != k)
                    .all(|other| !k.is_satisfied_by(other))
            })
            .cloned()
            .collect::<Vec<_>>();
        let kept = if independent_targets.is_empty() {
            targets
        } else {
            independent_targets
        };
        Proposition::disjunction(kept).unwrap_or(Proposition::Contradiction)
    }
}

impl AnnouncementResolutionStrategy for SimpleAnnouncementResolutionStrategy {
    fn resolve_with(
        &self,
        problem_instances: &[ProblemInstance],
        cancellation: &CancellationToken,
    ) -> Result<Option<Proposition>> {
        if problem_instances.is_empty() {
            return Ok(Some(Proposition::Tautology));
        }
        let base = Self::base_announcement(problem_instances);
        let base_vars = base.variables();
        let free_vars = all_variables(problem_instances)
            .into_iter()
            .filter(|v| !base_vars.contains(v))
            .collect::<Vec<_>>();
        debug!(
            "base announcement {} refined over {} variable(s)",
            base,
            free_vars.len()
        );
        for refinement in State::permutations_of(free_vars) {
            cancellation
                .check()
                .context("while refining the base announcement")?;
            let announcement = if refinement.is_empty() {
                base.clone()
            } else {
                base.and(&refinement.to_proposition())
            };
            if solves_all(problem_instances, &announcement, cancellation)? {
                info!("simple strategy found announcement {}", announcement);
                return Ok(Some(announcement));
            }
        }
        Ok(None)
    }
}
