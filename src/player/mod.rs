pub mod ai;
pub mod controller;

#[allow(unused_imports)]
pub use ai::{DeepeningAI, MinimaxAI, RandomAI};
pub use controller::PlayerController;
