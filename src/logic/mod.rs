use crate::core::{Move, Player, Position, BOARD_SIZE};
use thiserror::Error;

/// 8方向 (行差, 列差)
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// 合法手生成で得た手以外を適用したときに出る。探索のロジック不整合を示す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal move {mv}: {reason}")]
pub struct IllegalMove {
    pub mv: Move,
    pub reason: &'static str,
}

/// 合法手生成。空リストはパスを意味する。
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    for row in 1..=BOARD_SIZE as i32 {
        for col in 1..=BOARD_SIZE as i32 {
            if is_candidate(pos, row, col) && is_legal(pos, row, col) {
                moves.push(Move::place(row as usize, col as usize));
            }
        }
    }
    moves
}

/// 手番側が (row, col) に打てるか
pub fn is_legal(pos: &Position, row: i32, col: i32) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| closes_line(pos, row, col, dir))
}

/// 候補マス: 空かつ隣接8マスのどれかに石がある
fn is_candidate(pos: &Position, row: i32, col: i32) -> bool {
    pos.at(row, col).is_empty()
        && DIRECTIONS
            .iter()
            .any(|&(dr, dc)| !pos.at(row + dr, col + dc).is_empty())
}

/// 1方向のスキャン: 隣が相手石で、相手石の列の先に自石があるか。
/// 番兵は常にEmptyなので境界判定は不要。
fn closes_line(pos: &Position, row: i32, col: i32, (dr, dc): (i32, i32)) -> bool {
    let own = pos.to_move.disc();
    let opponent = pos.to_move.opponent().disc();

    let (mut r, mut c) = (row + dr, col + dc);
    if pos.at(r, c) != opponent {
        return false;
    }
    loop {
        r += dr;
        c += dc;
        let cell = pos.at(r, c);
        if cell == own {
            return true;
        }
        if cell != opponent {
            return false;
        }
    }
}

/// 1方向の裏返し対象を集める。挟めていなければ空。
fn flips_in_direction(pos: &Position, row: i32, col: i32, (dr, dc): (i32, i32)) -> Vec<(i32, i32)> {
    let own = pos.to_move.disc();
    let opponent = pos.to_move.opponent().disc();

    let mut run = Vec::new();
    let (mut r, mut c) = (row + dr, col + dc);
    while pos.at(r, c) == opponent {
        run.push((r, c));
        r += dr;
        c += dc;
    }
    if pos.at(r, c) == own && !run.is_empty() {
        run
    } else {
        Vec::new()
    }
}

/// 移動適用。元の局面は変更せず、手番を交代した新しい局面を返す。
pub fn apply_move(pos: &Position, mv: &Move) -> Result<Position, IllegalMove> {
    let (row, col) = match *mv {
        Move::Pass => return Ok(pos.pass()),
        Move::Place { row, col } => (row as i32, col as i32),
    };

    if !(1..=BOARD_SIZE as i32).contains(&row) || !(1..=BOARD_SIZE as i32).contains(&col) {
        return Err(IllegalMove {
            mv: *mv,
            reason: "coordinates outside the board",
        });
    }
    if !pos.at(row, col).is_empty() {
        return Err(IllegalMove {
            mv: *mv,
            reason: "target square is occupied",
        });
    }

    let mover = pos.to_move;
    let mut next = pos.clone();
    next.set(row, col, mover.disc());

    let mut flipped = 0;
    for dir in DIRECTIONS {
        for (r, c) in flips_in_direction(pos, row, col, dir) {
            next.set(r, c, mover.disc());
            flipped += 1;
        }
    }
    if flipped == 0 {
        return Err(IllegalMove {
            mv: *mv,
            reason: "no opponent discs flipped",
        });
    }

    next.to_move = mover.opponent();
    Ok(next)
}

/// 終局判定: 両者とも合法手なし
pub fn is_terminal(pos: &Position) -> bool {
    legal_moves(pos).is_empty() && legal_moves(&pos.pass()).is_empty()
}

/// 指定した側の合法手数 (モビリティ評価用)
pub fn mobility(pos: &Position, player: Player) -> usize {
    if pos.to_move == player {
        legal_moves(pos).len()
    } else {
        legal_moves(&pos.pass()).len()
    }
}
