pub mod alpha_beta;
pub mod config;
pub mod deepening;
pub mod eval;
pub mod evaluator;
pub mod minimax;
pub mod random;

pub use alpha_beta::{AlphaBeta, BestMove, CancelToken, SearchError};
pub use config::AIConfig;
pub use deepening::DeepeningAI;
pub use eval::{evaluator_named, CompoundEvaluator, CountEvaluator, MobilityEvaluator};
pub use evaluator::Evaluator;
pub use minimax::{Minimax, MinimaxAI};
pub use random::RandomAI;
