//! Public announcements for multi-agent belief revision.
//!
//! Agents hold belief states over propositional variables and revise them when a sentence is announced.
//! Given one problem instance per agent, the resolution strategies of [`announcement`] search for a single sentence
//! leading every agent from its initial belief state to its target.

mod core;
pub use crate::core::BeliefState;
pub use crate::core::CancellationToken;
pub use crate::core::Interner;
pub use crate::core::KernelError;
pub use crate::core::Models;
pub use crate::core::Operation;
pub use crate::core::OperatorKind;
pub use crate::core::Proposition;
pub use crate::core::State;
pub use crate::core::VarWeights;
pub use crate::core::Variable;
pub use crate::core::Weighted;

pub mod revision;

pub mod announcement;
pub use announcement::AnnouncementResolutionStrategy;
pub use announcement::ProblemInstance;
