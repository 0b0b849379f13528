#[cfg(test)]
mod tests {
    use crate::core::{Cell, Move, Player, Position};
    use crate::logic::{apply_move, is_terminal, legal_moves};

    /// The 65-character encoding of the standard starting position.
    const START: &str =
        "WEEEEEEEEEEEEEEEEEEEEEEEEEEEOXEEEEEEXOEEEEEEEEEEEEEEEEEEEEEEEEEEE";

    #[test]
    fn test_standard_start_layout() {
        let pos = Position::standard_start();
        assert_eq!(pos.to_move, Player::White);
        assert_eq!(pos.at(4, 4), Cell::White);
        assert_eq!(pos.at(5, 5), Cell::White);
        assert_eq!(pos.at(4, 5), Cell::Black);
        assert_eq!(pos.at(5, 4), Cell::Black);
        assert_eq!(pos.counts(), (2, 2, 60));
    }

    #[test]
    fn test_encoding_round_trip() {
        let pos = Position::parse(START).unwrap();
        assert_eq!(pos, Position::standard_start());
        assert_eq!(pos.encode(), START);

        // Round-trip survives a few moves as well.
        let mut pos = Position::standard_start();
        for mv in [Move::place(4, 6), Move::place(3, 6), Move::place(3, 5)] {
            pos = apply_move(&pos, &mv).unwrap();
            let encoded = pos.encode();
            assert_eq!(Position::parse(&encoded).unwrap(), pos);
        }
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(Position::parse("WEE").is_err());
        assert!(Position::parse("").is_err());
    }

    #[test]
    fn test_opening_moves_are_the_four_symmetric_squares() {
        let moves = legal_moves(&Position::standard_start());
        let expected = [
            Move::place(3, 5),
            Move::place(4, 6),
            Move::place(5, 3),
            Move::place(6, 4),
        ];
        assert_eq!(moves.len(), 4);
        for mv in expected {
            assert!(moves.contains(&mv), "missing opening move {}", mv);
        }
    }

    #[test]
    fn test_generated_moves_always_apply() {
        // Play a deterministic game to the end, checking the rules invariants
        // at every step: each generated move applies cleanly, places exactly
        // one disc, flips at least one, and keeps the cell total at 64.
        let mut pos = Position::standard_start();
        loop {
            let moves = legal_moves(&pos);
            if moves.is_empty() {
                let passed = pos.pass();
                if legal_moves(&passed).is_empty() {
                    break;
                }
                pos = passed;
                continue;
            }

            let mover = pos.to_move;
            let (white_before, black_before, _) = pos.counts();
            let own_before = match mover {
                Player::White => white_before,
                Player::Black => black_before,
            };

            for mv in &moves {
                assert!(apply_move(&pos, mv).is_ok(), "{} failed to apply", mv);
            }

            let next = apply_move(&pos, &moves[0]).unwrap();
            let (white, black, empty) = next.counts();
            assert_eq!(white + black + empty, 64);
            // One disc placed...
            assert_eq!(white + black, white_before + black_before + 1);
            // ...and at least one flipped.
            let own_after = match mover {
                Player::White => white,
                Player::Black => black,
            };
            assert!(own_after >= own_before + 2, "no disc was flipped by {}", moves[0]);
            assert_eq!(next.to_move, mover.opponent());

            pos = next;
        }
        assert!(is_terminal(&pos));
    }

    #[test]
    fn test_pass_only_flips_the_turn() {
        let pos = Position::standard_start();
        let passed = apply_move(&pos, &Move::Pass).unwrap();
        assert_eq!(passed.to_move, Player::Black);
        assert_eq!(passed.encode()[1..], pos.encode()[1..]);
    }

    #[test]
    fn test_occupied_target_is_illegal() {
        let pos = Position::standard_start();
        let err = apply_move(&pos, &Move::place(4, 4)).unwrap_err();
        assert_eq!(err.mv, Move::place(4, 4));
    }

    #[test]
    fn test_out_of_bounds_is_illegal() {
        let pos = Position::standard_start();
        assert!(apply_move(&pos, &Move::place(0, 4)).is_err());
        assert!(apply_move(&pos, &Move::place(9, 1)).is_err());
    }

    #[test]
    fn test_non_flipping_placement_is_illegal() {
        // (1,1) is empty but far from every opponent disc.
        let pos = Position::standard_start();
        assert!(apply_move(&pos, &Move::place(1, 1)).is_err());
    }

    #[test]
    fn test_opening_flip_result() {
        // White plays (4,6): the black disc at (4,5) flips.
        let pos = Position::standard_start();
        let next = apply_move(&pos, &Move::place(4, 6)).unwrap();
        assert_eq!(next.at(4, 6), Cell::White);
        assert_eq!(next.at(4, 5), Cell::White);
        assert_eq!(next.counts(), (4, 1, 59));
        assert_eq!(next.score(), 3);
        assert_eq!(next.to_move, Player::Black);
    }

    #[test]
    fn test_flip_is_confined_to_closed_lines() {
        // Only the line closed by the placement flips; other opponent discs
        // stay untouched even when they sit next to the mover's discs.
        let mut s = String::from("W");
        s.push_str("OXEEEEEE"); // row 1
        s.push_str("XEEEEEEE"); // row 2
        s.push_str("OEEEEEEE"); // row 3
        for _ in 0..40 {
            s.push('E');
        }
        let pos = Position::parse(&s).unwrap();
        // White plays (1,3): flips (1,2). The (2,1) disc is flanked
        // vertically by (1,1) and (3,1) already, untouched by this move.
        let next = apply_move(&pos, &Move::place(1, 3)).unwrap();
        assert_eq!(next.at(1, 2), Cell::White);
        assert_eq!(next.at(2, 1), Cell::Black);
    }

    #[test]
    fn test_terminal_detection_switches_sides() {
        // Black to move, black is stuck but white is not: not terminal.
        let mut s = String::from("B");
        s.push_str("OXEEEEEE");
        for _ in 0..56 {
            s.push('E');
        }
        let pos = Position::parse(&s).unwrap();
        assert!(legal_moves(&pos).is_empty());
        assert!(!is_terminal(&pos));

        // Nobody can move: terminal.
        let mut s = String::from("W");
        s.push_str("OOO");
        for _ in 0..61 {
            s.push('E');
        }
        let done = Position::parse(&s).unwrap();
        assert!(is_terminal(&done));
    }

    #[test]
    fn test_score_is_white_minus_black() {
        let mut s = String::from("B");
        s.push_str("OOOOXEEE");
        for _ in 0..56 {
            s.push('E');
        }
        let pos = Position::parse(&s).unwrap();
        assert_eq!(pos.score(), 3);
        assert_eq!(pos.counts(), (4, 1, 59));
    }
}
