use crusti_pal::{
    announcement::{
        BruteForceAnnouncementResolutionStrategy, ByDistanceAnnouncementResolutionStrategy,
        OrderedAnnouncementResolutionStrategy, SimpleAnnouncementResolutionStrategy,
    },
    revision::{
        BeliefRevisionStrategy, ComparatorBeliefRevisionStrategy,
        SatisfiabilityBeliefRevisionStrategy,
    },
    AnnouncementResolutionStrategy, BeliefState, OperatorKind, ProblemInstance, Proposition,
    Variable, Weighted,
};
use proptest::prelude::*;

const VAR_NAMES: [&str; 3] = ["a", "b", "c"];

#[derive(Clone, Copy, Debug)]
enum Revision {
    Hamming,
    WeightedHamming,
    Satisfiability,
}

impl Revision {
    fn strategy(self) -> Box<dyn BeliefRevisionStrategy> {
        match self {
            Revision::Hamming => Box::new(ComparatorBeliefRevisionStrategy::hamming()),
            Revision::WeightedHamming => Box::new(ComparatorBeliefRevisionStrategy::weighted_hamming(
                VAR_NAMES
                    .iter()
                    .enumerate()
                    .map(|(i, n)| Weighted::new(Variable::new(n), i + 1))
                    .collect(),
            )),
            Revision::Satisfiability => Box::new(SatisfiabilityBeliefRevisionStrategy),
        }
    }
}

fn arb_proposition(n_vars: usize) -> impl Strategy<Value = Proposition> {
    let leaf = (0..n_vars).prop_map(|i| Proposition::from(Variable::new(VAR_NAMES[i])));
    leaf.prop_recursive(3, 8, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|p| p.not()),
            prop::collection::vec(inner.clone(), 2..3)
                .prop_map(|ps| Proposition::operator(OperatorKind::And, ps).unwrap()),
            prop::collection::vec(inner.clone(), 2..3)
                .prop_map(|ps| Proposition::operator(OperatorKind::Or, ps).unwrap()),
            (inner.clone(), inner).prop_map(|(p, q)| p.xor(&q)),
        ]
    })
}

/// Initial beliefs and targets over two or three variables.
fn arb_beliefs_and_targets() -> impl Strategy<Value = Vec<(Proposition, Proposition)>> {
    (2..=3usize).prop_flat_map(|n_vars| {
        prop::collection::vec((arb_proposition(n_vars), arb_proposition(n_vars)), 1..=3)
    })
}

fn instances(specs: &[(Proposition, Proposition)], revisions: &[Revision]) -> Vec<ProblemInstance> {
    specs
        .iter()
        .zip(revisions.iter().cycle())
        .map(|((k, t), r)| ProblemInstance::new(BeliefState::from([k.clone()]), t.clone(), r.strategy()))
        .collect()
}

fn assert_consistent_with_brute_force(
    strategies: &[&dyn AnnouncementResolutionStrategy],
    instances: &[ProblemInstance],
) -> Result<(), TestCaseError> {
    let reference = BruteForceAnnouncementResolutionStrategy.resolve(instances).unwrap();
    if let Some(announcement) = &reference {
        prop_assert!(instances.iter().all(|i| i.is_solved_by(announcement)));
    }
    for strategy in strategies {
        let announcement = strategy.resolve(instances).unwrap();
        if let Some(a) = &announcement {
            for (n, instance) in instances.iter().enumerate() {
                prop_assert!(instance.is_solved_by(a), "instance {} not solved by {}", n, a);
            }
        }
        if reference.is_none() {
            prop_assert!(announcement.is_none(), "found {:?} where none exists", announcement);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_comparator_resolutions_agree_with_brute_force(
        specs in arb_beliefs_and_targets(),
        revisions in prop::collection::vec(
            prop_oneof![Just(Revision::Hamming), Just(Revision::WeightedHamming)],
            1..=3,
        ),
    ) {
        let instances = instances(&specs, &revisions);
        assert_consistent_with_brute_force(
            &[
                &SimpleAnnouncementResolutionStrategy,
                &ByDistanceAnnouncementResolutionStrategy,
                &OrderedAnnouncementResolutionStrategy,
            ],
            &instances,
        )?;
    }

    #[test]
    fn prop_simple_resolution_agrees_with_brute_force(specs in arb_beliefs_and_targets()) {
        let instances = instances(&specs, &[Revision::Satisfiability]);
        assert_consistent_with_brute_force(&[&SimpleAnnouncementResolutionStrategy], &instances)?;
    }
}
