mod cancellation;
pub use cancellation::CancellationToken;

mod error;
pub use error::KernelError;

mod models;
pub use models::Models;

mod normal_forms;

mod proposition;
pub use proposition::Operation;
pub use proposition::OperatorKind;
pub use proposition::Proposition;

mod state;
pub use state::State;

mod variable;
pub use variable::Interner;
pub use variable::Variable;

mod weighted;
pub use weighted::VarWeights;
pub use weighted::Weighted;

use std::collections::BTreeSet;

/// A belief state (or knowledge base): a set of propositions read as their conjunction.
pub type BeliefState = BTreeSet<Proposition>;
