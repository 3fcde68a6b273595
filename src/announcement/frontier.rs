use super::{all_variables, ProblemInstance};
use crate::{revision::StateComparator, CancellationToken, KernelError, Proposition, State};
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::collections::BTreeSet;

/// Returns the states an announcement may be built from: the models of the disjunction of the targets, over every variable of the instances.
pub(crate) fn candidate_universe(
    problem_instances: &[ProblemInstance],
    cancellation: &CancellationToken,
) -> Result<Vec<State>> {
    let targets_union = Proposition::disjunction(
        problem_instances
            .iter()
            .map(|i| i.target_belief_state().clone()),
    )
    .unwrap_or(Proposition::Contradiction)
    .and(&Proposition::tautological_closure(all_variables(
        problem_instances,
    )));
    let mut models = targets_union.models_with(cancellation);
    let universe = models.by_ref().collect::<Vec<_>>();
    if models.was_cancelled() {
        return Err(anyhow!(KernelError::Cancelled))
            .context("while computing the models of the target belief states");
    }
    Ok(universe)
}

/// Returns the comparator of each instance, or a configuration error naming the strategy if one instance has none.
pub(crate) fn comparators_of(
    problem_instances: &[ProblemInstance],
    strategy_name: &str,
) -> Result<Vec<Box<dyn StateComparator>>> {
    problem_instances
        .iter()
        .enumerate()
        .map(|(i, instance)| {
            instance
                .belief_revision_strategy()
                .comparator_for(instance.initial_belief_state())
                .ok_or_else(|| {
                    anyhow!(KernelError::Configuration(format!(
                        "{} resolution requires comparator-based belief revision strategies (problem instance {} has none)",
                        strategy_name, i
                    )))
                })
        })
        .collect()
}

/// Searches for an announcement by widening, for each unsolved instance, the set of candidate states it considers.
///
/// `partitions[i]` is the ordered list of classes of candidate states for the instance `i`, closest first.
/// At each step, every unsolved instance moves to its next class: the states of this class that satisfy its target become accepted,
/// while the states of this class and the previous ones that do not satisfy it become rejected.
/// The announcement is the disjunction of the accepted states minus the rejected ones.
/// The search stops with no result as soon as an unsolved instance has no class left.
pub(crate) fn expanding_frontier_search(
    problem_instances: &[ProblemInstance],
    partitions: &[Vec<Vec<State>>],
    cancellation: &CancellationToken,
) -> Result<Option<Proposition>> {
    let mut next_class = vec![0; problem_instances.len()];
    let mut accepted = BTreeSet::new();
    let mut rejected = BTreeSet::new();
    let mut unsolved = (0..problem_instances.len()).collect::<Vec<usize>>();
    let mut announcement = Proposition::Tautology;
    let mut n_steps = 0;
    while !unsolved.is_empty() {
        cancellation
            .check()
            .context("while searching for an announcement")?;
        n_steps += 1;
        for &i in &unsolved {
            let Some(class) = partitions[i].get(next_class[i]) else {
                debug!(
                    "problem instance {} has no candidate left after {} step(s)",
                    i, n_steps
                );
                return Ok(None);
            };
            next_class[i] += 1;
            let target = problem_instances[i].target_belief_state();
            for state in class {
                if target.evaluate(state)? {
                    accepted.insert(state.clone());
                } else {
                    rejected.insert(state.clone());
                }
            }
        }
        announcement = Proposition::from_states(&accepted);
        if !rejected.is_empty() {
            announcement = announcement.and(&Proposition::from_states(&rejected).not());
        }
        unsolved.clear();
        for (i, instance) in problem_instances.iter().enumerate() {
            if !instance
                .is_solved_by_with(&announcement, cancellation)
                .context("while checking the current announcement")?
            {
                unsolved.push(i);
            }
        }
        debug!(
            "step {}: {} accepted state(s), {} rejected state(s), {} unsolved instance(s)",
            n_steps,
            accepted.len(),
            rejected.len(),
            unsolved.len()
        );
    }
    Ok(Some(announcement))
}
