use super::alpha_beta::BestMove;
use super::evaluator::Evaluator;
use crate::core::{Move, Player, Position};
use crate::logic::{apply_move, legal_moves};
use crate::player::PlayerController;

use std::sync::Arc;

/// 枝刈りなしの全展開ミニマックス。
///
/// ノードの意味論はアルファベータ探索と同一で、刈りだけが無い。
/// 弱い対戦相手として、また枝刈りの等価性検証の基準として使う。
pub struct Minimax {
    evaluator: Arc<dyn Evaluator>,
    depth: u32,
}

impl Minimax {
    pub fn new(evaluator: Arc<dyn Evaluator>, depth: u32) -> Self {
        Self { evaluator, depth }
    }

    /// ルート探索。タイブレークは列挙順で最初に真に良くなった子。
    pub fn search_action(&self, pos: &Position) -> BestMove {
        let moves = legal_moves(pos);
        if moves.is_empty() {
            return BestMove {
                mv: Move::Pass,
                value: 0,
            };
        }

        let maximizing = pos.to_move == Player::White;
        let mut best: Option<BestMove> = None;

        for mv in moves {
            let child = match apply_move(pos, &mv) {
                Ok(child) => child,
                Err(e) => {
                    eprintln!("skipping generated move: {}", e);
                    continue;
                }
            };
            let value = self.search(&child, self.depth.saturating_sub(1), !maximizing);

            let better = match best {
                None => true,
                Some(b) if maximizing => value > b.value,
                Some(b) => value < b.value,
            };
            if better {
                best = Some(BestMove { mv, value });
            }
        }

        best.unwrap_or(BestMove {
            mv: Move::Pass,
            value: 0,
        })
    }

    fn search(&self, pos: &Position, depth: u32, maximizing: bool) -> i32 {
        if depth == 0 {
            return self.evaluator.evaluate(pos);
        }

        let moves = legal_moves(pos);
        if moves.is_empty() {
            let passed = pos.pass();
            if legal_moves(&passed).is_empty() {
                return pos.score();
            }
            return self.search(&passed, depth - 1, !maximizing);
        }

        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        for mv in &moves {
            let child = match apply_move(pos, mv) {
                Ok(child) => child,
                Err(e) => {
                    eprintln!("skipping generated move: {}", e);
                    continue;
                }
            };
            let v = self.search(&child, depth - 1, !maximizing);
            value = if maximizing { value.max(v) } else { value.min(v) };
        }
        value
    }
}

/// Minimaxをそのまま対局相手として使うコントローラ
pub struct MinimaxAI {
    name: String,
    search: Minimax,
}

impl MinimaxAI {
    pub fn new(name: &str, evaluator: Arc<dyn Evaluator>, depth: u32) -> Self {
        Self {
            name: name.to_string(),
            search: Minimax::new(evaluator, depth),
        }
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, pos: &Position, _legal_moves: &[Move]) -> Option<Move> {
        Some(self.search.search_action(pos).mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
