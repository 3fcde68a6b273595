use super::{KernelError, State, Variable};
use anyhow::{anyhow, Result};
use itertools::Itertools;
use std::{collections::BTreeSet, fmt::Display, sync::Arc};

/// The logical connectives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    /// Negation (unary).
    Not,
    /// Conjunction (n-ary, associative).
    And,
    /// Disjunction (n-ary, associative).
    Or,
    /// Material implication (binary), written `then`.
    Oif,
    /// Equivalence (binary).
    Iff,
    /// Exclusive disjunction (binary).
    Xor,
    /// Negated conjunction (binary).
    Nand,
}

impl OperatorKind {
    /// Returns the number of operands this kind requires, or `None` for associative kinds, which accept two operands or more.
    pub fn arity(&self) -> Option<usize> {
        match self {
            OperatorKind::Not => Some(1),
            OperatorKind::And | OperatorKind::Or => None,
            OperatorKind::Oif | OperatorKind::Iff | OperatorKind::Xor | OperatorKind::Nand => {
                Some(2)
            }
        }
    }

    /// Returns `true` for the kinds whose nested operands are flattened.
    pub fn is_associative(&self) -> bool {
        self.arity().is_none()
    }

    /// Returns the keyword used to print this connective.
    pub fn keyword(&self) -> &'static str {
        match self {
            OperatorKind::Not => "not",
            OperatorKind::And => "and",
            OperatorKind::Or => "or",
            OperatorKind::Oif => "then",
            OperatorKind::Iff => "iff",
            OperatorKind::Xor => "xor",
            OperatorKind::Nand => "nand",
        }
    }

    fn accepts(&self, n_operands: usize) -> bool {
        match self.arity() {
            Some(n) => n == n_operands,
            None => n_operands >= 2,
        }
    }

    /// Applies the truth table of this connective.
    ///
    /// The number of operands must be accepted by the connective.
    pub(crate) fn operate(&self, operands: &[bool]) -> bool {
        match self {
            OperatorKind::Not => !operands[0],
            OperatorKind::And => operands.iter().all(|b| *b),
            OperatorKind::Or => operands.iter().any(|b| *b),
            OperatorKind::Oif => !operands[0] || operands[1],
            OperatorKind::Iff => operands[0] == operands[1],
            OperatorKind::Xor => operands[0] != operands[1],
            OperatorKind::Nand => !(operands[0] && operands[1]),
        }
    }

    /// Applies the truth table of this connective to operands that may be unknown (`None`).
    ///
    /// The result is known only if every row of the truth table reachable from the operands agrees.
    pub(crate) fn operate_partial(&self, operands: &[Option<bool>]) -> Option<bool> {
        match self {
            OperatorKind::Not => operands[0].map(|b| !b),
            OperatorKind::And => {
                if operands.contains(&Some(false)) {
                    Some(false)
                } else if operands.iter().all(|o| *o == Some(true)) {
                    Some(true)
                } else {
                    None
                }
            }
            OperatorKind::Or => {
                if operands.contains(&Some(true)) {
                    Some(true)
                } else if operands.iter().all(|o| *o == Some(false)) {
                    Some(false)
                } else {
                    None
                }
            }
            _ => {
                let mut outcomes = operands
                    .iter()
                    .map(|o| match o {
                        Some(b) => vec![*b],
                        None => vec![false, true],
                    })
                    .multi_cartesian_product()
                    .map(|row| self.operate(&row));
                let first = outcomes.next()?;
                outcomes.all(|b| b == first).then_some(first)
            }
        }
    }

    /// Applies the relaxed truth table of this connective to operand truthiness values.
    ///
    /// Each operand is read as the probability of being true, operands being independent.
    /// The value only serves as a search priority: floating-point rounding makes it unfit to decide truth.
    pub(crate) fn operate_truthiness(&self, operands: &[f64]) -> f64 {
        match self {
            OperatorKind::Not => 1.0 - operands[0],
            OperatorKind::And => operands.iter().product(),
            OperatorKind::Or => 1.0 - operands.iter().map(|x| 1.0 - x).product::<f64>(),
            _ => {
                let n = operands.len();
                (0..1usize << n)
                    .map(|row| (0..n).map(|i| row & (1 << i) != 0).collect::<Vec<bool>>())
                    .filter(|row| self.operate(row))
                    .map(|row| {
                        row.iter()
                            .zip(operands)
                            .map(|(b, x)| if *b { *x } else { 1.0 - x })
                            .product::<f64>()
                    })
                    .sum()
            }
        }
    }
}

/// An operator node: a connective applied to an ordered list of operands.
///
/// The number of operands always matches the arity of the connective, and associative operators never have an operand of the same kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Operation {
    kind: OperatorKind,
    operands: Arc<[Proposition]>,
}

impl Operation {
    /// Returns the connective of this operation.
    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// Returns the operands of this operation.
    pub fn operands(&self) -> &[Proposition] {
        &self.operands
    }
}

/// A propositional formula.
///
/// Propositions are immutable trees; cloning is cheap since operands are shared.
/// Equality and hashing are structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Proposition {
    /// A variable leaf.
    Variable(Variable),
    /// The leaf that is always true, printed `1`.
    Tautology,
    /// The leaf that is always false, printed `0`.
    Contradiction,
    /// An internal node.
    Operator(Operation),
}

impl From<Variable> for Proposition {
    fn from(value: Variable) -> Self {
        Proposition::Variable(value)
    }
}

impl Proposition {
    /// Builds an operator node.
    ///
    /// Nested operands of associative operators are flattened; an associative operator left with a single operand is replaced by this operand.
    /// An error is returned if the number of operands does not fit the connective.
    pub fn operator(kind: OperatorKind, operands: Vec<Proposition>) -> Result<Proposition> {
        if kind.is_associative() {
            return Self::associative(kind, operands).ok_or_else(|| {
                anyhow!(KernelError::Construction(format!(
                    r#"operator "{}" requires at least one operand"#,
                    kind.keyword()
                )))
            });
        }
        if !kind.accepts(operands.len()) {
            return Err(anyhow!(KernelError::Construction(format!(
                r#"operator "{}" requires {} operand(s), got {}"#,
                kind.keyword(),
                kind.arity().unwrap_or_default(),
                operands.len()
            ))));
        }
        Ok(Self::unchecked(kind, operands))
    }

    fn unchecked(kind: OperatorKind, operands: Vec<Proposition>) -> Proposition {
        Proposition::Operator(Operation {
            kind,
            operands: operands.into(),
        })
    }

    fn associative<I>(kind: OperatorKind, operands: I) -> Option<Proposition>
    where
        I: IntoIterator<Item = Proposition>,
    {
        let mut flattened = operands
            .into_iter()
            .flat_map(|p| match p {
                Proposition::Operator(op) if op.kind == kind => op.operands.to_vec(),
                _ => vec![p],
            })
            .collect::<Vec<_>>();
        match flattened.len() {
            0 => None,
            1 => flattened.pop(),
            _ => Some(Self::unchecked(kind, flattened)),
        }
    }

    /// Builds the conjunction of the operands, or `None` if there is no operand.
    pub fn conjunction<I>(operands: I) -> Option<Proposition>
    where
        I: IntoIterator<Item = Proposition>,
    {
        Self::associative(OperatorKind::And, operands)
    }

    /// Builds the disjunction of the operands, or `None` if there is no operand.
    pub fn disjunction<I>(operands: I) -> Option<Proposition>
    where
        I: IntoIterator<Item = Proposition>,
    {
        Self::associative(OperatorKind::Or, operands)
    }

    /// Builds the disjunction of the literal conjunctions of the states, or a contradiction if there is no state.
    pub fn from_states<'a, I>(states: I) -> Proposition
    where
        I: IntoIterator<Item = &'a State>,
    {
        Self::disjunction(states.into_iter().map(|s| s.to_proposition()))
            .unwrap_or(Proposition::Contradiction)
    }

    /// Builds the conjunction `(v or not v) and ...` over the given variables, or a tautology if there is none.
    ///
    /// Conjoining this formula with another one forces its models to assign every given variable.
    pub fn tautological_closure<I>(vars: I) -> Proposition
    where
        I: IntoIterator<Item = Variable>,
    {
        Self::conjunction(vars.into_iter().map(|v| {
            let p = Proposition::from(v);
            p.or(&p.not())
        }))
        .unwrap_or(Proposition::Tautology)
    }

    /// Returns the negation of this proposition.
    pub fn not(&self) -> Proposition {
        Self::unchecked(OperatorKind::Not, vec![self.clone()])
    }

    /// Returns `self and other`.
    pub fn and(&self, other: &Proposition) -> Proposition {
        Self::associative(OperatorKind::And, [self.clone(), other.clone()])
            .unwrap_or(Proposition::Tautology)
    }

    /// Returns `self or other`.
    pub fn or(&self, other: &Proposition) -> Proposition {
        Self::associative(OperatorKind::Or, [self.clone(), other.clone()])
            .unwrap_or(Proposition::Contradiction)
    }

    /// Returns `self then other`.
    pub fn oif(&self, other: &Proposition) -> Proposition {
        Self::unchecked(OperatorKind::Oif, vec![self.clone(), other.clone()])
    }

    /// Returns `self iff other`.
    pub fn iff(&self, other: &Proposition) -> Proposition {
        Self::unchecked(OperatorKind::Iff, vec![self.clone(), other.clone()])
    }

    /// Returns `self xor other`.
    pub fn xor(&self, other: &Proposition) -> Proposition {
        Self::unchecked(OperatorKind::Xor, vec![self.clone(), other.clone()])
    }

    /// Returns `self nand other`.
    pub fn nand(&self, other: &Proposition) -> Proposition {
        Self::unchecked(OperatorKind::Nand, vec![self.clone(), other.clone()])
    }

    /// Returns the children of this node; leaves have none.
    pub fn children(&self) -> &[Proposition] {
        match self {
            Proposition::Operator(op) => op.operands(),
            _ => &[],
        }
    }

    /// Returns the variables occurring in this proposition.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Proposition::Variable(v) => {
                vars.insert(v.clone());
            }
            Proposition::Tautology | Proposition::Contradiction => {}
            Proposition::Operator(op) => op.operands.iter().for_each(|o| o.collect_variables(vars)),
        }
    }

    /// Computes the truth value of this proposition for the given state.
    ///
    /// An error is returned if the state does not assign a variable this proposition depends on.
    pub fn evaluate(&self, state: &State) -> Result<bool> {
        match self {
            Proposition::Variable(v) => state
                .get(v)
                .ok_or_else(|| anyhow!(KernelError::MissingAssignment(v.clone()))),
            Proposition::Tautology => Ok(true),
            Proposition::Contradiction => Ok(false),
            Proposition::Operator(op) => {
                let values = op
                    .operands
                    .iter()
                    .map(|o| o.evaluate(state))
                    .collect::<Result<Vec<bool>>>()?;
                Ok(op.kind.operate(&values))
            }
        }
    }

    /// Computes the truth value of this proposition for a partial state, or `None` if it cannot be decided yet.
    ///
    /// `Some(b)` guarantees that every completion of the state evaluates to `b`.
    /// The converse does not hold: `p and not p` is undecided for a state that does not assign `p`.
    /// For a state assigning every variable of the proposition, the result is the one of [`evaluate`](Self::evaluate).
    pub fn partial_evaluate(&self, state: &State) -> Option<bool> {
        match self {
            Proposition::Variable(v) => state.get(v),
            Proposition::Tautology => Some(true),
            Proposition::Contradiction => Some(false),
            Proposition::Operator(op) => {
                let values = op
                    .operands
                    .iter()
                    .map(|o| o.partial_evaluate(state))
                    .collect::<Vec<Option<bool>>>();
                op.kind.operate_partial(&values)
            }
        }
    }

    /// Computes the truthiness of this proposition for a (partial) state, a value in `[0, 1]`.
    ///
    /// Assigned variables count for `1` or `0`, unassigned ones for `0.5`.
    /// With exact arithmetic, `1` (resp. `0`) would mean every completion of the state makes the proposition true (resp. false);
    /// since wide formulas round to these values, use [`partial_evaluate`](Self::partial_evaluate) to decide.
    pub fn truthiness(&self, state: &State) -> f64 {
        match self {
            Proposition::Variable(v) => match state.get(v) {
                Some(true) => 1.0,
                Some(false) => 0.0,
                None => 0.5,
            },
            Proposition::Tautology => 1.0,
            Proposition::Contradiction => 0.0,
            Proposition::Operator(op) => {
                let values = op
                    .operands
                    .iter()
                    .map(|o| o.truthiness(state))
                    .collect::<Vec<f64>>();
                op.kind.operate_truthiness(&values)
            }
        }
    }

    /// Returns the influence of each variable, in order of first occurrence.
    ///
    /// A unit of influence is split evenly among the operands of each operator, and summed per variable.
    /// Variables reached through fewer or larger subtrees get higher values.
    pub fn influences(&self) -> Vec<(Variable, f64)> {
        let mut influences = Vec::new();
        self.collect_influences(1.0, &mut influences);
        influences
    }

    fn collect_influences(&self, influence: f64, influences: &mut Vec<(Variable, f64)>) {
        match self {
            Proposition::Variable(v) => match influences.iter_mut().find(|(w, _)| w == v) {
                Some((_, i)) => *i += influence,
                None => influences.push((v.clone(), influence)),
            },
            Proposition::Tautology | Proposition::Contradiction => {}
            Proposition::Operator(op) => {
                let divided = influence / op.operands.len() as f64;
                op.operands
                    .iter()
                    .for_each(|o| o.collect_influences(divided, influences));
            }
        }
    }
}

impl Display for Proposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let write_operand = |f: &mut std::fmt::Formatter<'_>, operand: &Proposition| {
            if operand.children().len() > 1 {
                write!(f, "({})", operand)
            } else {
                write!(f, "{}", operand)
            }
        };
        match self {
            Proposition::Variable(v) => write!(f, "{}", v),
            Proposition::Tautology => f.write_str("1"),
            Proposition::Contradiction => f.write_str("0"),
            Proposition::Operator(op) if op.kind == OperatorKind::Not => {
                write!(f, "{} ", op.kind.keyword())?;
                write_operand(f, &op.operands[0])
            }
            Proposition::Operator(op) => {
                for (i, operand) in op.operands.iter().enumerate() {
                    if i != 0 {
                        write!(f, " {} ", op.kind.keyword())?;
                    }
                    write_operand(f, operand)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> (Proposition, Proposition, Proposition) {
        (
            Variable::new("p").into(),
            Variable::new("q").into(),
            Variable::new("r").into(),
        )
    }

    fn state(assignments: &[(&str, bool)]) -> State {
        assignments
            .iter()
            .map(|(n, b)| (Variable::new(n), *b))
            .collect()
    }

    #[test]
    fn test_display() {
        let (p, q, r) = vars();
        assert_eq!("(not p or q) then r", p.not().or(&q).oif(&r).to_string());
        assert_eq!("(p and q) iff r", p.and(&q).iff(&r).to_string());
        assert_eq!("(p nand q) xor r", p.nand(&q).xor(&r).to_string());
        assert_eq!("p and q and r", p.and(&q).and(&r).to_string());
        assert_eq!("p or q or r", p.or(&q.or(&r)).to_string());
        assert_eq!("not (p and q)", p.and(&q).not().to_string());
        assert_eq!("not not p", p.not().not().to_string());
        assert_eq!("1 and 0", Proposition::Tautology.and(&Proposition::Contradiction).to_string());
    }

    #[test]
    fn test_associative_flattening() {
        let (p, q, r) = vars();
        let nested = Proposition::conjunction([p.and(&q), r.clone()]).unwrap();
        let flat = Proposition::conjunction([p.clone(), q.clone(), r.clone()]).unwrap();
        assert_eq!(flat, nested);
        assert_eq!(flat.to_string(), nested.to_string());
        assert_eq!(3, nested.children().len());
        let mixed = p.and(&q.or(&r));
        assert_eq!(2, mixed.children().len());
    }

    #[test]
    fn test_single_and_empty_associative() {
        let (p, _, _) = vars();
        assert_eq!(Some(p.clone()), Proposition::conjunction([p.clone()]));
        assert_eq!(None, Proposition::disjunction([]));
        let err = Proposition::operator(OperatorKind::Or, vec![]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KernelError>(),
            Some(KernelError::Construction(_))
        ));
    }

    #[test]
    fn test_operator_arity() {
        let (p, q, r) = vars();
        assert!(Proposition::operator(OperatorKind::Not, vec![p.clone()]).is_ok());
        assert!(Proposition::operator(OperatorKind::Xor, vec![p.clone(), q.clone()]).is_ok());
        let err = Proposition::operator(OperatorKind::Iff, vec![p.clone(), q, r]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KernelError>(),
            Some(KernelError::Construction(_))
        ));
        assert!(Proposition::operator(OperatorKind::Not, vec![]).is_err());
    }

    #[test]
    fn test_structural_equality() {
        let (p, q, _) = vars();
        assert_eq!(p.xor(&q), p.xor(&q));
        assert_ne!(p.xor(&q), q.xor(&p));
        let set = [p.xor(&q), p.xor(&q), p.clone()]
            .into_iter()
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(2, set.len());
    }

    #[test]
    fn test_evaluate() {
        let (p, q, r) = vars();
        let s = state(&[("p", true), ("q", false), ("r", true)]);
        assert!(p.and(&q.not()).evaluate(&s).unwrap());
        assert!(!p.and(&q).evaluate(&s).unwrap());
        assert!(p.oif(&r).evaluate(&s).unwrap());
        assert!(!p.oif(&q).evaluate(&s).unwrap());
        assert!(q.oif(&p).evaluate(&s).unwrap());
        assert!(p.iff(&r).evaluate(&s).unwrap());
        assert!(p.xor(&q).evaluate(&s).unwrap());
        assert!(!p.nand(&r).evaluate(&s).unwrap());
        assert!(Proposition::Tautology.evaluate(&State::new()).unwrap());
        assert!(!Proposition::Contradiction.evaluate(&State::new()).unwrap());
    }

    #[test]
    fn test_evaluate_missing_assignment() {
        let (p, q, _) = vars();
        let err = p.or(&q).evaluate(&state(&[("p", true)])).unwrap_err();
        assert_eq!(
            Some(&KernelError::MissingAssignment(Variable::new("q"))),
            err.downcast_ref::<KernelError>()
        );
    }

    #[test]
    fn test_truthiness() {
        let (p, q, _) = vars();
        let s = state(&[("p", true)]);
        assert_eq!(1.0, p.or(&q).truthiness(&s));
        assert_eq!(0.5, p.and(&q).truthiness(&s));
        assert_eq!(0.0, p.not().and(&q).truthiness(&s));
        assert_eq!(0.5, p.xor(&q).truthiness(&s));
        assert_eq!(1.0, q.oif(&p).truthiness(&s));
        assert_eq!(0.75, p.nand(&q).truthiness(&State::new()));
    }

    #[test]
    fn test_partial_evaluate() {
        let (p, q, r) = vars();
        let s = state(&[("p", true)]);
        assert_eq!(Some(true), p.or(&q).partial_evaluate(&s));
        assert_eq!(None, p.and(&q).partial_evaluate(&s));
        assert_eq!(Some(false), p.not().and(&q).partial_evaluate(&s));
        assert_eq!(None, p.xor(&q).partial_evaluate(&s));
        assert_eq!(Some(true), q.oif(&p).partial_evaluate(&s));
        assert_eq!(Some(false), p.nand(&p).partial_evaluate(&s));
        assert_eq!(None, q.iff(&r).partial_evaluate(&s));
        assert_eq!(None, q.and(&q.not()).partial_evaluate(&s));
    }

    #[test]
    fn test_partial_evaluate_wide_disjunction() {
        let vars = (0..60).map(|i| Proposition::from(Variable::new(&format!("a{}", i))));
        let wide = Proposition::disjunction(vars).unwrap();
        assert_eq!(1.0, wide.truthiness(&State::new()));
        assert_eq!(None, wide.partial_evaluate(&State::new()));
        assert_eq!(None, wide.not().partial_evaluate(&State::new()));
    }

    #[test]
    fn test_influences() {
        let (p, q, r) = vars();
        let influences = p.and(&q.or(&r)).influences();
        assert_eq!(
            vec![
                (Variable::new("p"), 0.5),
                (Variable::new("q"), 0.25),
                (Variable::new("r"), 0.25)
            ],
            influences
        );
        assert_eq!(vec![(Variable::new("p"), 1.0)], p.and(&p).influences());
        assert!(Proposition::Tautology.influences().is_empty());
    }

    #[test]
    fn test_variables() {
        let (p, q, _) = vars();
        let vars = p.and(&q.not()).or(&p).variables();
        assert_eq!(
            vec![Variable::new("p"), Variable::new("q")],
            vars.into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_tautological_closure() {
        let closure = Proposition::tautological_closure([Variable::new("a"), Variable::new("b")]);
        assert_eq!("(a or not a) and (b or not b)", closure.to_string());
        assert_eq!(Proposition::Tautology, Proposition::tautological_closure([]));
    }
}
