use super::alpha_beta::{AlphaBeta, BestMove, CancelToken, SearchError};
use super::evaluator::Evaluator;
use crate::core::{Move, Position};
use crate::player::PlayerController;

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// 反復深化ドライバ。
///
/// 持ち時間を期限に換算してから、深さを1ずつ増やしながら探索をかけ直す。
/// 深さ1は持ち時間に関係なく必ず完走させるので、答えが無いことはない。
/// 各深さの探索は1本のワーカースレッドに投げ、期限までに返らなければ
/// 中断トークンを立てて前の深さの結果を使い続ける。
pub struct DeepeningAI {
    name: String,
    evaluator: Arc<dyn Evaluator>,
    budget: Duration,
    max_depth: u32,
}

impl DeepeningAI {
    pub fn new(name: &str, evaluator: Arc<dyn Evaluator>, budget: Duration, max_depth: u32) -> Self {
        Self {
            name: name.to_string(),
            evaluator,
            budget,
            max_depth: max_depth.max(1),
        }
    }

    /// 期限まで深さを増やしながら探索し、完走した最深の結果を返す。
    pub fn search(&self, pos: &Position) -> anyhow::Result<BestMove> {
        let deadline = Instant::now() + self.budget;

        // 深さ1は常に同期実行。トークンは誰も立てないので中断は起きない。
        let mut best =
            AlphaBeta::new(self.evaluator.clone(), 1, CancelToken::new()).search_action(pos)?;
        let mut depth = 1;

        while depth < self.max_depth {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            depth += 1;

            // 深さごとに新しいトークン。前の深さの中断状態は持ち越さない。
            let cancel = CancelToken::new();
            let search = AlphaBeta::new(self.evaluator.clone(), depth, cancel.clone());
            let root = pos.clone();
            let (tx, rx) = mpsc::channel();

            thread::spawn(move || {
                let _ = tx.send(search.search_action(&root));
            });

            match rx.recv_timeout(remaining) {
                Ok(Ok(found)) => best = found,
                // 中断された深さの結果は捨てる。再試行はせず、次の深さへ進む
                // かどうかはループ先頭の残り時間が決める。
                Ok(Err(SearchError::Cancelled)) => {}
                Err(RecvTimeoutError::Timeout) => {
                    cancel.cancel();
                    let over = Instant::now().saturating_duration_since(deadline);
                    eprintln!(
                        "Interrupted at depth {}, {} ms over budget",
                        depth,
                        over.as_millis()
                    );
                    // ワーカーは次のノード入口で巻き戻る。結果はもう要らない
                    // ので合流せずに切り離したままにする。
                }
                Err(RecvTimeoutError::Disconnected) => {}
            }
        }

        Ok(best)
    }
}

impl PlayerController for DeepeningAI {
    fn choose_move(&self, pos: &Position, _legal_moves: &[Move]) -> Option<Move> {
        match self.search(pos) {
            Ok(best) => Some(best.mv),
            Err(e) => {
                eprintln!("search failed: {}", e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
