use super::{CancellationToken, Proposition, State, Variable};
use std::{cmp::Ordering, collections::BinaryHeap};

/// A lazy, best-first enumeration of the models of a proposition.
///
/// Nodes of the search are partial states, the root being the empty state.
/// Nodes whose [partial evaluation](Proposition::partial_evaluate) is false cannot be completed into a model and are pruned.
/// The node with the highest truthiness is always expanded first, by assigning the unassigned variable of highest influence.
/// A node is a model once it assigns every variable of the proposition and evaluates to true.
///
/// Each model is produced exactly once; the enumeration cannot be restarted.
pub struct Models<'a> {
    proposition: &'a Proposition,
    branching_order: Vec<Variable>,
    frontier: BinaryHeap<Node>,
    n_created_nodes: usize,
    cancellation: Option<&'a CancellationToken>,
    cancelled: bool,
}

struct Node {
    truthiness: f64,
    value: Option<bool>,
    index: usize,
    state: State,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.truthiness
            .total_cmp(&other.truthiness)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl<'a> Models<'a> {
    pub(crate) fn new(
        proposition: &'a Proposition,
        cancellation: Option<&'a CancellationToken>,
    ) -> Self {
        let mut influences = proposition.influences();
        influences.sort_by(|(_, i0), (_, i1)| i1.total_cmp(i0));
        let mut models = Models {
            proposition,
            branching_order: influences.into_iter().map(|(v, _)| v).collect(),
            frontier: BinaryHeap::new(),
            n_created_nodes: 0,
            cancellation,
            cancelled: false,
        };
        models.push(State::new());
        models
    }

    /// Returns `true` iff the enumeration was stopped by its cancellation token.
    ///
    /// A cancelled enumeration behaves as an exhausted one; this function allows to tell them apart.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn push(&mut self, state: State) {
        let value = self.proposition.partial_evaluate(&state);
        if value == Some(false) {
            return;
        }
        self.frontier.push(Node {
            truthiness: self.proposition.truthiness(&state),
            value,
            index: self.n_created_nodes,
            state,
        });
        self.n_created_nodes += 1;
    }

    fn is_solution(&self, node: &Node) -> bool {
        node.value == Some(true) && node.state.len() == self.branching_order.len()
    }

    fn branch(&mut self, state: &State) {
        if let Some(var) = self
            .branching_order
            .iter()
            .find(|v| !state.contains(v))
            .cloned()
        {
            self.push(state.with(var.clone(), true));
            self.push(state.with(var, false));
        }
    }
}

impl Iterator for Models<'_> {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cancellation.is_some_and(|c| c.is_cancelled()) {
                self.cancelled = true;
                self.frontier.clear();
            }
            let node = self.frontier.pop()?;
            if self.is_solution(&node) {
                return Some(node.state);
            }
            self.branch(&node.state);
        }
    }
}

impl Proposition {
    /// Enumerates the models of this proposition, i.e. the states assigning exactly its variables that make it true.
    pub fn models(&self) -> Models<'_> {
        Models::new(self, None)
    }

    /// Enumerates the models of this proposition, stopping early if the token gets cancelled.
    pub fn models_with<'a>(&'a self, cancellation: &'a CancellationToken) -> Models<'a> {
        Models::new(self, Some(cancellation))
    }

    /// Returns `true` iff this proposition has at least one model.
    pub fn is_satisfiable(&self) -> bool {
        self.models().next().is_some()
    }

    /// Returns `true` iff this proposition has no model.
    pub fn is_contradiction(&self) -> bool {
        !self.is_satisfiable()
    }

    /// Returns `true` iff this proposition is true in every state.
    pub fn is_tautology(&self) -> bool {
        self.not().is_contradiction()
    }

    /// Returns `true` iff every model of this proposition makes `other` true.
    pub fn entails(&self, other: &Proposition) -> bool {
        self.and(&other.not()).is_contradiction()
    }

    /// Returns `true` iff `other` entails this proposition and each model of this proposition is consistent with `other`.
    pub fn is_satisfied_by(&self, other: &Proposition) -> bool {
        other.entails(self)
            && self
                .models()
                .all(|m| m.to_proposition().and(other).is_satisfiable())
    }
}
