use othello_aho_ai::core::Position;
use othello_aho_ai::game::Game;
use othello_aho_ai::player::ai::{evaluator_named, AIConfig, DeepeningAI, MinimaxAI, RandomAI};
use othello_aho_ai::player::PlayerController;
use othello_aho_ai::selfplay::{run_selfplay, EngineKind, SelfPlayConfig};

use crossterm::{execute, terminal};
use std::io;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // 引数あり: エンジンモード。局面と持ち時間を受け取り、最善手を1行出力する。
    if !args.is_empty() {
        return run_engine(&args);
    }

    // 引数なし: 対話メニュー
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run_menu();

    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

/// `othello-aho-ai <65文字局面> <持ち時間秒>`
///
/// 局面が不正な長さなら標準初期配置、持ち時間が無ければ設定の既定値に倒す。
fn run_engine(args: &[String]) -> anyhow::Result<()> {
    let config = AIConfig::get();

    let position = match Position::parse(&args[0]) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("{}; falling back to the standard starting position", e);
            Position::standard_start()
        }
    };

    let limit_secs = match args.get(1).map(|s| s.parse::<u64>()) {
        Some(Ok(secs)) => secs,
        _ => {
            let default = config.search.default_time_limit_secs;
            eprintln!("missing or invalid time limit, using {} s", default);
            default
        }
    };

    let evaluator = evaluator_named(&config.evaluation.evaluator);
    let ai = DeepeningAI::new(
        "deepening",
        evaluator,
        Duration::from_secs(limit_secs),
        config.search.max_depth,
    );

    let best = ai.search(&position)?;
    println!("{}", best.mv);
    Ok(())
}

fn run_menu() -> anyhow::Result<()> {
    use crossterm::event::{self, Event, KeyCode};

    print!("=== Othello Engine ===\r\n");

    print!("\r\nSelect mode:\r\n");
    print!("1. Watch: Deepening AI vs Minimax AI\r\n");
    print!("2. Watch: Deepening AI vs Random\r\n");
    print!("3. Self-Play (10 games, sequential)\r\n");
    print!("4. Self-Play (10 games, parallel)\r\n");

    let mode = loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('1') => break "1",
                    KeyCode::Char('2') => break "2",
                    KeyCode::Char('3') => break "3",
                    KeyCode::Char('4') => break "4",
                    KeyCode::Char('q') => return Ok(()),
                    _ => {}
                }
            }
        }
    };

    match mode {
        "1" | "2" => watch_game(mode == "1"),
        _ => {
            let stats = run_selfplay(SelfPlayConfig {
                num_games: 10,
                white: EngineKind::Deepening,
                black: EngineKind::Minimax,
                parallel: mode == "4",
                save_records: true,
            })?;
            print!(
                "\r\nDone: {} games, White {} / Black {} / Draw {}\r\n",
                stats.total_games, stats.white_wins, stats.black_wins, stats.draws
            );
            wait_for_quit()
        }
    }
}

fn watch_game(vs_minimax: bool) -> anyhow::Result<()> {
    let config = AIConfig::get();
    let evaluator = evaluator_named(&config.evaluation.evaluator);

    let white = DeepeningAI::new(
        "Deepening AI",
        evaluator.clone(),
        Duration::from_millis(config.search.selfplay_move_time_ms),
        config.search.max_depth,
    );
    let black: Box<dyn PlayerController> = if vs_minimax {
        Box::new(MinimaxAI::new("Minimax AI", evaluator, 3))
    } else {
        Box::new(RandomAI::new("Random"))
    };

    let mut game = Game::new(Position::standard_start());
    game.play(&white, black.as_ref(), true)?;

    wait_for_quit()
}

fn wait_for_quit() -> anyhow::Result<()> {
    use crossterm::event::{self, Event, KeyCode};

    print!("\r\nPress q to quit\r\n");
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
