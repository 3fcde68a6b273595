use super::{all_variables, solves_all, AnnouncementResolutionStrategy, ProblemInstance};
use crate::{CancellationToken, Proposition, State};
use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;

/// Tries every disjunction of complete conjunctions of literals over the variables of the instances.
///
/// Candidates are tried by increasing number of terms, the empty disjunction (a contradiction) first.
/// There are `2^(2^n)` candidates for `n` variables: this strategy is only meant as a reference for small problems.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForceAnnouncementResolutionStrategy;

impl BruteForceAnnouncementResolutionStrategy {
    fn candidates(problem_instances: &[ProblemInstance]) -> impl Iterator<Item = Proposition> {
        let terms = State::permutations_of(all_variables(problem_instances))
            .iter()
            .map(State::to_proposition)
            .collect::<Vec<_>>();
        terms
            .into_iter()
            .powerset()
            .map(|subset| Proposition::disjunction(subset).unwrap_or(Proposition::Contradiction))
    }

    /// Returns every candidate announcement solving all the problem instances, in the order they are tried.
    ///
    /// Candidates are pairwise non-equivalent, so the result lists each solution once up to equivalence.
    pub fn all_announcements(
        &self,
        problem_instances: &[ProblemInstance],
        cancellation: &CancellationToken,
    ) -> Result<Vec<Proposition>> {
        let mut announcements = Vec::new();
        for announcement in Self::candidates(problem_instances) {
            cancellation
                .check()
                .context("while enumerating brute force announcements")?;
            if solves_all(problem_instances, &announcement, cancellation)? {
                announcements.push(announcement);
            }
        }
        info!("brute force found {} announcement(s)", announcements.len());
        Ok(announcements)
    }
}

impl AnnouncementResolutionStrategy for BruteForceAnnouncementResolutionStrategy {
    fn resolve_with(
        &self,
        problem_instances: &[ProblemInstance],
        cancellation: &CancellationToken,
    ) -> Result<Option<Proposition>> {
        if problem_instances.is_empty() {
            return Ok(Some(Proposition::Tautology));
        }
        for announcement in Self::candidates(problem_instances) {
            cancellation
                .check()
                .context("while enumerating brute force announcements")?;
            if solves_all(problem_instances, &announcement, cancellation)? {
                info!("brute force found announcement {}", announcement);
                return Ok(Some(announcement));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{revision::SatisfiabilityBeliefRevisionStrategy, BeliefState, KernelError, Variable};

    #[test]
    fn test_unreachable_target() {
        let p: Proposition = Variable::new("p").into();
        let instances = vec![ProblemInstance::new(
            BeliefState::from([p.clone()]),
            p.and(&p.not()),
            Box::new(SatisfiabilityBeliefRevisionStrategy),
        )];
        let announcement = BruteForceAnnouncementResolutionStrategy
            .resolve(&instances)
            .unwrap();
        assert_eq!(Some(Proposition::Contradiction), announcement);
    }

    #[test]
    fn test_no_instance() {
        assert_eq!(
            Some(Proposition::Tautology),
            BruteForceAnnouncementResolutionStrategy.resolve(&[]).unwrap()
        );
    }

    #[test]
    fn test_single_instance() {
        let (p, q): (Proposition, Proposition) = (Variable::new("p").into(), Variable::new("q").into());
        let instances = vec![ProblemInstance::new(
            BeliefState::from([p.clone()]),
            p.and(&q),
            Box::new(SatisfiabilityBeliefRevisionStrategy),
        )];
        let announcement = BruteForceAnnouncementResolutionStrategy
            .resolve(&instances)
            .unwrap()
            .unwrap();
        assert!(instances[0].is_solved_by(&announcement));
        assert_eq!(p.and(&q), announcement);
    }

    #[test]
    fn test_all_announcements() {
        let (p, q): (Proposition, Proposition) = (Variable::new("p").into(), Variable::new("q").into());
        let instances = vec![ProblemInstance::new(
            BeliefState::from([p.clone()]),
            p.and(&q),
            Box::new(SatisfiabilityBeliefRevisionStrategy),
        )];
        let announcements = BruteForceAnnouncementResolutionStrategy
            .all_announcements(&instances, &CancellationToken::new())
            .unwrap();
        assert_eq!(4, announcements.len());
        assert!(announcements.iter().all(|a| instances[0].is_solved_by(a)));
        assert_eq!(
            BruteForceAnnouncementResolutionStrategy.resolve(&instances).unwrap().as_ref(),
            announcements.first()
        );
    }

    #[test]
    fn test_all_announcements_unsolvable() {
        let p: Proposition = Variable::new("p").into();
        let instances = vec![
            ProblemInstance::new(
                BeliefState::from([p.clone()]),
                p.clone(),
                Box::new(SatisfiabilityBeliefRevisionStrategy),
            ),
            ProblemInstance::new(
                BeliefState::from([p.clone()]),
                p.not(),
                Box::new(SatisfiabilityBeliefRevisionStrategy),
            ),
        ];
        let announcements = BruteForceAnnouncementResolutionStrategy
            .all_announcements(&instances, &CancellationToken::new())
            .unwrap();
        assert!(announcements.is_empty());
    }

    #[test]
    fn test_cancelled() {
        let p: Proposition = Variable::new("p").into();
        let instances = vec![ProblemInstance::new(
            BeliefState::from([p.clone()]),
            p.not(),
            Box::new(SatisfiabilityBeliefRevisionStrategy),
        )];
        let token = CancellationToken::new();
        token.cancel();
        let err = BruteForceAnnouncementResolutionStrategy
            .resolve_with(&instances, &token)
            .unwrap_err();
        assert_eq!(Some(&KernelError::Cancelled), err.downcast_ref());
    }
}
