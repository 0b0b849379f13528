pub mod r#move;
pub mod position;
pub mod types;

pub use position::{Position, BOARD_SIZE};
pub use r#move::Move;
pub use types::{Cell, Player};
