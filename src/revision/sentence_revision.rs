use crate::{KernelError, Proposition};
use anyhow::{anyhow, Result};

/// A strategy rewriting a received sentence before it is used for belief revision.
pub trait SentenceRevisionStrategy {
    /// Returns the rewritten sentence.
    fn revise(&self, sentence: &Proposition) -> Proposition;
}

/// Restricts a sentence to the union of the trust regions it is consistent with.
///
/// A catch-all region, the negation of the disjunction of the declared ones, is always added.
/// An unsatisfiable sentence is consistent with no region and gives a contradiction.
fn restrict_to_partitions(partitions: &[Proposition], sentence: &Proposition) -> Proposition {
    let catch_all = Proposition::disjunction(partitions.iter().cloned())
        .unwrap_or(Proposition::Contradiction)
        .not();
    Proposition::disjunction(
        partitions
            .iter()
            .chain(std::iter::once(&catch_all))
            .filter(|region| sentence.and(region).is_satisfiable())
            .cloned(),
    )
    .unwrap_or(Proposition::Contradiction)
}

/// Trust given as a fixed set of regions partitioning the possible sentences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionedTrust {
    partitions: Vec<Proposition>,
}

impl PartitionedTrust {
    /// Builds the strategy given its regions.
    ///
    /// An error is returned if no region is given.
    pub fn new(partitions: Vec<Proposition>) -> Result<Self> {
        if partitions.is_empty() {
            return Err(anyhow!(KernelError::Construction(
                "must define at least one partition".to_string()
            )));
        }
        Ok(Self { partitions })
    }

    /// Builds the strategy granting no trust: any satisfiable sentence is rewritten as a tautology.
    pub fn no_trust() -> Self {
        Self {
            partitions: vec![Proposition::Tautology],
        }
    }

    /// Returns the declared regions.
    pub fn partitions(&self) -> &[Proposition] {
        &self.partitions
    }
}

impl SentenceRevisionStrategy for PartitionedTrust {
    fn revise(&self, sentence: &Proposition) -> Proposition {
        restrict_to_partitions(&self.partitions, sentence)
    }
}

/// Complete trust: the sentence is its own only region, so it is kept as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompleteTrust;

impl SentenceRevisionStrategy for CompleteTrust {
    fn revise(&self, sentence: &Proposition) -> Proposition {
        restrict_to_partitions(std::slice::from_ref(sentence), sentence)
    }
}
