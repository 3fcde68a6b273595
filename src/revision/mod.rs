//! Belief revision: how an agent updates its belief state when it receives a sentence.

mod belief_revision;
pub use belief_revision::BeliefRevisionStrategy;
pub use belief_revision::ComparatorBeliefRevisionStrategy;
pub use belief_revision::SatisfiabilityBeliefRevisionStrategy;
pub use belief_revision::TrustSensitiveBeliefRevisionStrategy;

mod comparators;
pub use comparators::ByDistanceComparator;
pub use comparators::DistanceMetric;
pub use comparators::HammingDistance;
pub use comparators::OrderedSetsDistance;
pub use comparators::StateComparator;
pub use comparators::WeightedHammingDistance;

mod sentence_revision;
pub use sentence_revision::CompleteTrust;
pub use sentence_revision::PartitionedTrust;
pub use sentence_revision::SentenceRevisionStrategy;
