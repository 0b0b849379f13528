use crate::core::{Move, Player, Position};
use crate::logic::{apply_move, is_terminal, legal_moves};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};

/// 対局記録 (JSON保存用)
#[derive(Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 開始局面の65文字表記
    pub start: String,
    pub moves: Vec<Move>,
    pub winner: Option<Player>,
    pub score: i32,
}

pub struct Game {
    pub position: Position,
    pub history: Vec<Move>,
    start_encoding: String,
}

impl Game {
    pub fn new(position: Position) -> Self {
        let start_encoding = position.encode();
        Game {
            position,
            history: Vec::new(),
            start_encoding,
        }
    }

    /// 両者が打てなくなるまで対局する。勝者 (引き分けはNone) を返す。
    ///
    /// 打てない側は自動でパスになる。コントローラが手を返さなければ投了扱い。
    pub fn play(
        &mut self,
        white: &dyn PlayerController,
        black: &dyn PlayerController,
        watch: bool,
    ) -> anyhow::Result<Option<Player>> {
        loop {
            if is_terminal(&self.position) {
                break;
            }

            let current = self.position.to_move;
            let name = match current {
                Player::White => white.name(),
                Player::Black => black.name(),
            };

            if watch {
                let status = format!("{}'s turn ({})", name, current);
                crate::display::render_position(&self.position, Some(&status));

                // 観戦中は q で中断できる
                let timeout = std::time::Duration::from_millis(400);
                if crossterm::event::poll(timeout).unwrap_or(false) {
                    if let Ok(crossterm::event::Event::Key(key)) = crossterm::event::read() {
                        if key.code == crossterm::event::KeyCode::Char('q') {
                            break;
                        }
                    }
                }
            }

            let moves = legal_moves(&self.position);
            if moves.is_empty() {
                // 強制パス
                self.position = self.position.pass();
                self.history.push(Move::Pass);
                continue;
            }

            let controller: &dyn PlayerController = match current {
                Player::White => white,
                Player::Black => black,
            };

            let Some(mv) = controller.choose_move(&self.position, &moves) else {
                // 投了
                return Ok(Some(current.opponent()));
            };

            self.position = apply_move(&self.position, &mv)?;
            self.history.push(mv);
        }

        if watch {
            let result = match self.winner() {
                Some(p) => format!("Game over: {} wins ({})", p, self.position.score()),
                None => "Game over: draw".to_string(),
            };
            crate::display::render_position(&self.position, Some(&result));
        }

        Ok(self.winner())
    }

    /// 石数の多い側が勝ち
    pub fn winner(&self) -> Option<Player> {
        match self.position.score() {
            s if s > 0 => Some(Player::White),
            s if s < 0 => Some(Player::Black),
            _ => None,
        }
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            start: self.start_encoding.clone(),
            moves: self.history.clone(),
            winner: self.winner(),
            score: self.position.score(),
        }
    }
}
