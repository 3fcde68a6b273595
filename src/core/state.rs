use super::{Proposition, VarWeights, Variable};
use std::{collections::BTreeMap, fmt::Display};

/// A (total or partial) assignment of truth values to variables.
///
/// States are used both as nodes of the model search (partial states) and as models (total states).
/// Equality and hashing are defined over the mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State(BTreeMap<Variable, bool>);

impl State {
    /// Builds an empty state, assigning no variable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the truth value assigned to the variable, or `None` if it is unassigned.
    pub fn get(&self, var: &Variable) -> Option<bool> {
        self.0.get(var).copied()
    }

    /// Returns `true` iff the variable is assigned by this state.
    pub fn contains(&self, var: &Variable) -> bool {
        self.0.contains_key(var)
    }

    /// Returns a copy of this state in which the variable is set to the given value.
    pub fn with(&self, var: Variable, value: bool) -> Self {
        let mut map = self.0.clone();
        map.insert(var, value);
        Self(map)
    }

    /// Iterates over the assignments, in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, bool)> + '_ {
        self.0.iter().map(|(v, b)| (v, *b))
    }

    /// Iterates over the assigned variables, in variable order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.0.keys()
    }

    /// Returns the number of assigned variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` iff no variable is assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns every total assignment of the given variables.
    ///
    /// For `n` distinct variables, `2^n` states are returned; in particular, a single empty state is returned when no variable is given.
    pub fn permutations_of<I>(vars: I) -> Vec<State>
    where
        I: IntoIterator<Item = Variable>,
    {
        let mut vars = vars.into_iter().collect::<Vec<_>>();
        vars.sort_unstable();
        vars.dedup();
        vars.into_iter().fold(vec![State::new()], |states, var| {
            states
                .into_iter()
                .flat_map(|s| [s.with(var.clone(), true), s.with(var.clone(), false)])
                .collect()
        })
    }

    /// Returns the number of variables shared by both states that are assigned different values.
    pub fn hamming_distance(&self, other: &State) -> usize {
        self.disagreements(other).count()
    }

    /// Returns the sum of the weights of the shared variables that are assigned different values.
    pub fn weighted_hamming_distance(&self, other: &State, weights: &VarWeights) -> usize {
        self.disagreements(other).map(|v| weights.weight_of(v)).sum()
    }

    fn disagreements<'a>(&'a self, other: &'a State) -> impl Iterator<Item = &'a Variable> + 'a {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller
            .iter()
            .filter(move |(v, b)| larger.get(v).is_some_and(|o| o != *b))
            .map(|(v, _)| v)
    }

    /// Returns `true` iff both states agree on every variable they share.
    pub fn is_consistent_with(&self, other: &State) -> bool {
        self.disagreements(other).next().is_none()
    }

    /// Returns the conjunction of the literals described by this state, or a tautology if the state is empty.
    pub fn to_proposition(&self) -> Proposition {
        Proposition::conjunction(self.iter().map(|(v, b)| {
            let p = Proposition::from(v.clone());
            if b {
                p
            } else {
                p.not()
            }
        }))
        .unwrap_or(Proposition::Tautology)
    }
}

impl FromIterator<(Variable, bool)> for State {
    fn from_iter<T: IntoIterator<Item = (Variable, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (v, b)) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            if !b {
                f.write_str("not ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Weighted;

    fn state(assignments: &[(&str, bool)]) -> State {
        assignments
            .iter()
            .map(|(n, b)| (Variable::new(n), *b))
            .collect()
    }

    #[test]
    fn test_permutations() {
        let vars = ["a", "b", "c", "a"].map(Variable::new);
        let states = State::permutations_of(vars);
        assert_eq!(8, states.len());
        assert!(states.iter().all(|s| s.len() == 3));
        let mut dedup = states.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(8, dedup.len());
    }

    #[test]
    fn test_permutations_no_vars() {
        assert_eq!(vec![State::new()], State::permutations_of(vec![]));
    }

    #[test]
    fn test_hamming_distance_shared_vars_only() {
        let s1 = state(&[("a", true), ("b", true), ("c", false)]);
        let s2 = state(&[("a", false), ("b", true), ("d", true)]);
        assert_eq!(1, s1.hamming_distance(&s2));
        assert_eq!(1, s2.hamming_distance(&s1));
        assert!(!s1.is_consistent_with(&s2));
        assert!(s1.is_consistent_with(&state(&[("b", true), ("e", false)])));
    }

    #[test]
    fn test_weighted_hamming_distance() {
        let s1 = state(&[("a", true), ("b", true), ("c", true)]);
        let s2 = state(&[("a", false), ("b", false), ("c", false)]);
        let weights = [
            Weighted::new(Variable::new("a"), 3),
            Weighted::new(Variable::new("b"), 2),
        ]
        .into_iter()
        .collect::<VarWeights>();
        assert_eq!(5, s1.weighted_hamming_distance(&s2, &weights));
    }

    #[test]
    fn test_display() {
        assert_eq!("{a, not b}", state(&[("b", false), ("a", true)]).to_string());
        assert_eq!("{}", State::new().to_string());
    }

    #[test]
    fn test_to_proposition() {
        let s = state(&[("a", true), ("b", false)]);
        assert_eq!("a and not b", s.to_proposition().to_string());
        assert_eq!(Proposition::Tautology, State::new().to_proposition());
    }
}
