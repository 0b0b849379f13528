use crate::core::{Player, Position};
use crate::game::{Game, GameRecord};
use crate::player::ai::{evaluator_named, AIConfig, DeepeningAI, MinimaxAI, RandomAI};
use crate::player::PlayerController;
use crossterm::{execute, terminal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub enum EngineKind {
    Deepening,
    Minimax,
    Random,
}

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub white: EngineKind,
    pub black: EngineKind,
    pub parallel: bool,
    pub save_records: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Player>,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub white_engine: String,
    pub black_engine: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self {
            total_games: 0,
            white_wins: 0,
            black_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            white_engine: String::new(),
            black_engine: String::new(),
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(Player::White) => self.white_wins += 1,
            Some(Player::Black) => self.black_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

fn make_engine(kind: EngineKind, name: &str) -> Box<dyn PlayerController> {
    let config = AIConfig::get();
    let evaluator = evaluator_named(&config.evaluation.evaluator);
    match kind {
        EngineKind::Deepening => Box::new(DeepeningAI::new(
            name,
            evaluator,
            Duration::from_millis(config.search.selfplay_move_time_ms),
            config.search.max_depth,
        )),
        EngineKind::Minimax => Box::new(MinimaxAI::new(name, evaluator, 3)),
        EngineKind::Random => Box::new(RandomAI::new(name)),
    }
}

fn play_one(config: &SelfPlayConfig) -> anyhow::Result<(GameResult, GameRecord)> {
    let start_time = Instant::now();

    let white = make_engine(config.white, "White AI");
    let black = make_engine(config.black, "Black AI");

    let mut game = Game::new(Position::standard_start());
    let winner = game.play(white.as_ref(), black.as_ref(), false)?;

    let result = GameResult {
        winner,
        moves: game.history.len(),
        time_ms: start_time.elapsed().as_millis(),
    };
    Ok((result, game.record()))
}

pub fn run_selfplay(config: SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();
    stats.white_engine = format!("{:?}", config.white);
    stats.black_engine = format!("{:?}", config.black);

    if config.parallel {
        // 並列実行。進捗表示は省いて結果だけ集計する。
        let outcomes: Vec<anyhow::Result<(GameResult, GameRecord)>> = (0..config.num_games)
            .into_par_iter()
            .map(|_| play_one(&config))
            .collect();

        for (game_num, outcome) in outcomes.into_iter().enumerate() {
            let (result, record) = outcome?;
            stats.add_result(result);
            if config.save_records {
                save_record(&record, game_num + 1)?;
            }
        }
        print_summary(&stats);
        return Ok(stats);
    }

    for game_num in 1..=config.num_games {
        let (result, record) = play_one(&config)?;
        let winner = result.winner;
        let moves = result.moves;
        let elapsed_ms = result.time_ms;
        stats.add_result(result);

        // 逐次実行は対局ごとに進捗を描画する
        execute!(
            std::io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0)
        )?;

        print!("=== Self-Play Progress ===\r\n\r\n");
        print!("Game {}/{} completed\r\n", game_num, config.num_games);
        print!(
            "Result: {} ({} moves, {:.1}s)\r\n\r\n",
            match winner {
                Some(Player::White) => "White wins",
                Some(Player::Black) => "Black wins",
                None => "Draw",
            },
            moves,
            elapsed_ms as f64 / 1000.0
        );

        print!("--- Current Statistics ---\r\n");
        print!(
            "White Wins: {} ({:.1}%)\r\n",
            stats.white_wins,
            stats.white_wins as f64 / stats.total_games as f64 * 100.0
        );
        print!(
            "Black Wins: {} ({:.1}%)\r\n",
            stats.black_wins,
            stats.black_wins as f64 / stats.total_games as f64 * 100.0
        );
        print!(
            "Draws: {} ({:.1}%)\r\n",
            stats.draws,
            stats.draws as f64 / stats.total_games as f64 * 100.0
        );
        print!("Avg Moves: {:.1}\r\n", stats.avg_moves);
        print!("Avg Time: {:.1}s\r\n\r\n", stats.avg_time_ms / 1000.0);

        std::io::Write::flush(&mut std::io::stdout())?;

        if config.save_records {
            save_record(&record, game_num)?;
        }
    }

    println!();
    Ok(stats)
}

fn print_summary(stats: &SelfPlayStats) {
    print!("=== Self-Play Summary ===\r\n");
    print!("Games: {}\r\n", stats.total_games);
    print!(
        "White {} / Black {} / Draw {}\r\n",
        stats.white_wins, stats.black_wins, stats.draws
    );
    print!("Avg Moves: {:.1}\r\n", stats.avg_moves);
    print!("Avg Time: {:.1}s\r\n", stats.avg_time_ms / 1000.0);
}

fn save_record(record: &GameRecord, game_num: usize) -> anyhow::Result<()> {
    let record_dir = "selfplay_records";
    std::fs::create_dir_all(record_dir)?;

    let filename = format!(
        "{}/game_{:04}_{}.json",
        record_dir,
        game_num,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );

    let file = std::fs::File::create(filename)?;
    serde_json::to_writer(file, record)?;
    Ok(())
}
