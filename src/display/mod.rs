use crate::core::{Cell, Position, BOARD_SIZE};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::stdout;

/// 局面を描画する。白 = O、黒 = X。
pub fn render_position(pos: &Position, status: Option<&str>) {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
    .unwrap();

    print!("=== Othello Engine ===\r\n");
    if let Some(msg) = status {
        print!("{}\r\n", msg.to_string().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    // 列ラベル
    print!("   ");
    for col in 1..=BOARD_SIZE {
        print!("| {} ", col);
    }
    print!("|\r\n");
    print_horizontal_border();

    for row in 1..=BOARD_SIZE {
        print!(" {} ", row);
        for col in 1..=BOARD_SIZE {
            match pos.at(row as i32, col as i32) {
                Cell::White => print!("| {} ", "O".bold()),
                Cell::Black => print!("| {} ", "X".dark_green()),
                Cell::Empty => print!("|   "),
            }
        }
        print!("| {}\r\n", row);
        print_horizontal_border();
    }

    let (white, black, _) = pos.counts();
    print!("\r\nO (White): {}   X (Black): {}\r\n", white, black);
    print!("{} to move\r\n", pos.to_move);

    use std::io::Write;
    out.flush().unwrap();
}

fn print_horizontal_border() {
    print!("---");
    for _ in 1..=BOARD_SIZE {
        print!("|---");
    }
    print!("|\r\n");
}
