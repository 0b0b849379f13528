use super::evaluator::Evaluator;
use crate::core::{Move, Player, Position};
use crate::logic::{apply_move, legal_moves};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// 探索中断フラグ。Driver側が1回だけ書き、Worker側が各ノード入口で読む。
/// 深さごとの探索は必ず新しいトークンで始める。
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// 時間切れによる中断。障害ではなく、部分結果を全て捨てるための合図。
    #[error("search cancelled")]
    Cancelled,
}

/// ルート探索の結果。内部ノード同士は値のみをやり取りする。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub mv: Move,
    pub value: i32,
}

/// 深さ固定のアルファベータ探索。
///
/// 評価関数と深さ、中断トークン以外の状態は持たない。
/// 白がMax側、黒がMin側で、手番は局面から決まる。
pub struct AlphaBeta {
    evaluator: Arc<dyn Evaluator>,
    depth: u32,
    cancel: CancelToken,
}

impl AlphaBeta {
    pub fn new(evaluator: Arc<dyn Evaluator>, depth: u32, cancel: CancelToken) -> Self {
        Self {
            evaluator,
            depth,
            cancel,
        }
    }

    /// ルート探索。最善の子の指し手と値を返す。
    /// 合法手が無ければ探索せずパスを返す。
    pub fn search_action(&self, pos: &Position) -> Result<BestMove, SearchError> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let moves = legal_moves(pos);
        if moves.is_empty() {
            return Ok(BestMove {
                mv: Move::Pass,
                value: 0,
            });
        }

        let maximizing = pos.to_move == Player::White;
        let mut alpha = i32::MIN;
        let mut beta = i32::MAX;
        let mut best: Option<BestMove> = None;

        for mv in moves {
            let child = match apply_move(pos, &mv) {
                Ok(child) => child,
                Err(e) => {
                    // 生成済みの手で失敗するのはロジック不整合。兄弟の評価は続ける。
                    eprintln!("skipping generated move: {}", e);
                    continue;
                }
            };

            let value = self.search(&child, self.depth.saturating_sub(1), alpha, beta, !maximizing)?;

            let better = match best {
                None => true,
                Some(b) if maximizing => value > b.value,
                Some(b) => value < b.value,
            };
            if better {
                best = Some(BestMove { mv, value });
                if maximizing {
                    alpha = alpha.max(value);
                } else {
                    beta = beta.min(value);
                }
            }
        }

        Ok(best.unwrap_or(BestMove {
            mv: Move::Pass,
            value: 0,
        }))
    }

    /// 内部ノード。depth 0で評価関数、手無しで強制パスか終局、それ以外は
    /// 子を展開してアルファベータで刈る。
    fn search(
        &self,
        pos: &Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        if depth == 0 {
            return Ok(self.evaluator.evaluate(pos));
        }

        let moves = legal_moves(pos);
        if moves.is_empty() {
            let passed = pos.pass();
            if legal_moves(&passed).is_empty() {
                // 両者とも打てない: 終局スコア
                return Ok(pos.score());
            }
            // 強制パス: 同じ盤面で相手の探索へ
            return self.search(&passed, depth - 1, alpha, beta, !maximizing);
        }

        if maximizing {
            let mut value = i32::MIN;
            for mv in &moves {
                let child = match apply_move(pos, mv) {
                    Ok(child) => child,
                    Err(e) => {
                        eprintln!("skipping generated move: {}", e);
                        continue;
                    }
                };
                let v = self.search(&child, depth - 1, alpha, beta, false)?;
                if v > value {
                    value = v;
                    if alpha < value {
                        alpha = value;
                        if alpha >= beta {
                            return Ok(value);
                        }
                    }
                }
            }
            Ok(value)
        } else {
            let mut value = i32::MAX;
            for mv in &moves {
                let child = match apply_move(pos, mv) {
                    Ok(child) => child,
                    Err(e) => {
                        eprintln!("skipping generated move: {}", e);
                        continue;
                    }
                };
                let v = self.search(&child, depth - 1, alpha, beta, true)?;
                if v < value {
                    value = v;
                    if beta > value {
                        beta = value;
                        if alpha >= beta {
                            return Ok(value);
                        }
                    }
                }
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::eval::{CountEvaluator, MobilityEvaluator};
    use super::super::minimax::Minimax;

    fn count() -> Arc<dyn Evaluator> {
        Arc::new(CountEvaluator)
    }

    #[test]
    fn test_depth_one_opening_is_symmetric() {
        let pos = Position::standard_start();
        let search = AlphaBeta::new(count(), 1, CancelToken::new());
        let best = search.search_action(&pos).unwrap();

        let openings = [
            Move::place(3, 5),
            Move::place(4, 6),
            Move::place(5, 3),
            Move::place(6, 4),
        ];
        assert!(openings.contains(&best.mv), "unexpected opening {}", best.mv);
        // Every opening places one disc and flips one: 4 white, 1 black.
        assert_eq!(best.value, 3);
    }

    #[test]
    fn test_root_with_no_moves_passes() {
        // Lone white disc, white to move: no legal move anywhere.
        let mut s = String::from("W");
        s.push('O');
        for _ in 0..63 {
            s.push('E');
        }
        let pos = Position::parse(&s).unwrap();
        let search = AlphaBeta::new(count(), 4, CancelToken::new());
        assert_eq!(search.search_action(&pos).unwrap().mv, Move::Pass);
    }

    #[test]
    fn test_cancelled_token_aborts_immediately() {
        let pos = Position::standard_start();
        let token = CancelToken::new();
        token.cancel();
        let search = AlphaBeta::new(count(), 6, token);
        assert_eq!(search.search_action(&pos), Err(SearchError::Cancelled));
    }

    /// Pruning must never change the chosen move or its value.
    #[test]
    fn test_matches_exhaustive_minimax() {
        // Walk a few plies from the start so both engines see varied positions,
        // always following the alpha-beta choice.
        let evaluators: [Arc<dyn Evaluator>; 2] =
            [Arc::new(CountEvaluator), Arc::new(MobilityEvaluator)];

        for evaluator in evaluators {
            let mut pos = Position::standard_start();
            for _ in 0..6 {
                for depth in 1..=4 {
                    let pruned = AlphaBeta::new(evaluator.clone(), depth, CancelToken::new())
                        .search_action(&pos)
                        .unwrap();
                    let plain = Minimax::new(evaluator.clone(), depth).search_action(&pos);
                    assert_eq!(pruned.mv, plain.mv, "depth {} move diverged", depth);
                    assert_eq!(pruned.value, plain.value, "depth {} value diverged", depth);
                }

                let best = AlphaBeta::new(evaluator.clone(), 3, CancelToken::new())
                    .search_action(&pos)
                    .unwrap();
                pos = match best.mv {
                    Move::Pass => pos.pass(),
                    mv => apply_move(&pos, &mv).unwrap(),
                };
            }
        }
    }

    #[test]
    fn test_forced_pass_uses_opponent_moves() {
        // Row 1 is "O X", black to move. Black has no bracket anywhere,
        // but white can play (1,3) and capture the black disc.
        let mut s = String::from("B");
        s.push_str("OXEEEEEE");
        for _ in 0..56 {
            s.push('E');
        }
        let pos = Position::parse(&s).unwrap();
        assert!(legal_moves(&pos).is_empty());
        assert!(!legal_moves(&pos.pass()).is_empty());

        // Depth 2: forced pass, then white plays (1,3) and owns all 3 discs.
        let engine = AlphaBeta::new(count(), 2, CancelToken::new());
        // Root has no moves at all, so the root answer is a pass action.
        assert_eq!(engine.search_action(&pos).unwrap().mv, Move::Pass);

        // Evaluating the same stuck position as an internal node switches
        // sides instead of treating it as terminal.
        let value = engine.search(&pos, 2, i32::MIN, i32::MAX, false).unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn test_terminal_returns_exact_score() {
        // Full-board-equivalent: three white discs, nobody can move.
        let mut s = String::from("W");
        s.push_str("OOO");
        for _ in 0..61 {
            s.push('E');
        }
        let pos = Position::parse(&s).unwrap();
        let engine = AlphaBeta::new(count(), 5, CancelToken::new());
        let value = engine.search(&pos, 5, i32::MIN, i32::MAX, true).unwrap();
        assert_eq!(value, pos.score());
        assert_eq!(value, 3);
    }
}
