use crate::core::{Move, Position};

/// プレイヤー操作のtrait
pub trait PlayerController {
    fn choose_move(&self, pos: &Position, legal_moves: &[Move]) -> Option<Move>;
    fn name(&self) -> &str;
}
