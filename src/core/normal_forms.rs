use super::{Proposition, State, Variable};
use std::collections::{BTreeMap, BTreeSet};

impl Proposition {
    /// Returns an equivalent proposition in full disjunctive normal form: one conjunction of literals per model.
    ///
    /// A proposition with no model gives a contradiction.
    pub fn to_full_dnf(&self) -> Proposition {
        let models = self.models().collect::<Vec<_>>();
        Proposition::from_states(&models)
    }

    /// Returns an equivalent proposition in disjunctive normal form, smaller than the full one.
    ///
    /// Terms assigning the same variables and differing on exactly one of them are merged into a term that drops this variable, until no such pair remains.
    pub fn to_dnf(&self) -> Proposition {
        let mut terms: BTreeMap<Vec<Variable>, BTreeSet<State>> = BTreeMap::new();
        self.models().for_each(|m| {
            terms
                .entry(m.variables().cloned().collect())
                .or_default()
                .insert(m);
        });
        let mut unprocessed = terms.keys().cloned().collect::<BTreeSet<_>>();
        while let Some(key) = unprocessed.iter().max_by_key(|k| k.len()).cloned() {
            let Some((s0, s1)) = terms.get(&key).and_then(find_adjacent_pair) else {
                unprocessed.remove(&key);
                continue;
            };
            if let Some(group) = terms.get_mut(&key) {
                group.remove(&s0);
                group.remove(&s1);
            }
            let merged = s0
                .iter()
                .filter(|(v, b)| s1.get(v) == Some(*b))
                .map(|(v, b)| (v.clone(), b))
                .collect::<State>();
            let merged_key = merged.variables().cloned().collect::<Vec<_>>();
            terms.entry(merged_key.clone()).or_default().insert(merged);
            unprocessed.insert(merged_key);
        }
        Proposition::from_states(terms.values().flatten())
    }
}

fn find_adjacent_pair(states: &BTreeSet<State>) -> Option<(State, State)> {
    states.iter().enumerate().find_map(|(i, s0)| {
        states
            .iter()
            .skip(i + 1)
            .find(|s1| s0.hamming_distance(s1) == 1)
            .map(|s1| (s0.clone(), s1.clone()))
    })
}
