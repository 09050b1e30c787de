//! Tests for move sequences and their board classification.

use tictactoe_minimax::{BoardStatus, InvalidSequenceKind, Player, Sequence};

#[test]
fn test_filling_a_row_is_classified_as_win() {
    let steps = ["000000000", "x00000000", "xx0000000", "xxx000000"];
    let statuses: Vec<BoardStatus> = steps
        .iter()
        .map(|s| s.parse::<Sequence>().unwrap().to_board().status())
        .collect();

    assert_eq!(
        statuses,
        [
            BoardStatus::NotStarted,
            BoardStatus::InProgress,
            BoardStatus::InProgress,
            BoardStatus::Won(Player::X),
        ]
    );
}

#[test]
fn test_board_and_sequence_agree() {
    let sequence: Sequence = "o0x0x0x0o".parse().unwrap();
    let board = sequence.to_board();
    assert_eq!(board.sequence(), sequence);
    assert_eq!(board.status(), BoardStatus::Won(Player::X));
    assert_eq!(sequence.to_string(), "o0x0x0x0o");
}

#[test]
fn test_sequence_is_a_value_key() {
    use std::collections::HashSet;

    let a: Sequence = "x000o0000".parse().unwrap();
    let b: Sequence = "X000O0000".parse().unwrap();
    let set: HashSet<Sequence> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_rejects_malformed_text() {
    let err = "x000o00000".parse::<Sequence>().unwrap_err();
    assert_eq!(err.kind, InvalidSequenceKind::Length(10));

    let err = "x000-0000".parse::<Sequence>().unwrap_err();
    assert_eq!(err.kind, InvalidSequenceKind::Symbol('-'));
}
