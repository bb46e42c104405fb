pub mod availability;
pub mod evaluator;
pub mod shuffle;
pub mod state;

pub use evaluator::Verdict;
pub use state::{PuzzleError, PuzzleState, Round, Session};
