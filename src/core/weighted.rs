use crate::Variable;
use rustc_hash::FxHashMap;

/// A thing with a weight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Weighted<T> {
    weight: usize,
    thing: T,
}

impl<T> Weighted<T> {
    /// Builds a new weighted thing.
    pub fn new(thing: T, weight: usize) -> Self {
        Self { weight, thing }
    }

    /// Returns a reference to the thing.
    pub fn thing(&self) -> &T {
        &self.thing
    }

    /// Consumes this object, returning the underlying thing.
    pub fn into_thing(self) -> T {
        self.thing
    }

    /// Returns the weight of the thing.
    pub fn weight(&self) -> usize {
        self.weight
    }
}

/// A structure used to handle the weights of a set of variables.
///
/// When requesting a variable for which no weight has been associated with, `None` is returned.
/// Distances treat such variables as having a null weight, see [`weight_of`](Self::weight_of).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarWeights {
    weights: FxHashMap<Variable, usize>,
}

impl VarWeights {
    /// Builds a new instance of this structure, with no weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates a weight with a variable, replacing the previous weight if any.
    pub fn add(&mut self, weighted_var: Weighted<Variable>) {
        let weight = weighted_var.weight();
        self.weights.insert(weighted_var.into_thing(), weight);
    }

    /// Returns the weight associated with the variable, or `None` if none.
    pub fn get(&self, var: &Variable) -> Option<usize> {
        self.weights.get(var).copied()
    }

    /// Returns the weight associated with the variable, or `0` if none.
    pub fn weight_of(&self, var: &Variable) -> usize {
        self.get(var).unwrap_or(0)
    }

    /// Iterates over the (weighted) variables which have a weight associated with.
    pub fn iter(&self) -> impl Iterator<Item = Weighted<&Variable>> + '_ {
        self.weights.iter().map(|(v, w)| Weighted::new(v, *w))
    }
}

impl FromIterator<Weighted<Variable>> for VarWeights {
    fn from_iter<I: IntoIterator<Item = Weighted<Variable>>>(iter: I) -> Self {
        let mut var_weights = VarWeights::new();
        iter.into_iter().for_each(|w| var_weights.add(w));
        var_weights
    }
}
