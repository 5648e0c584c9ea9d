// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> char {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return '*';
    }
    let premium = board_layout.premium_at(row, col);
    match (premium.word_multiplier, premium.letter_multiplier) {
        (3, _) => '=',
        (2, _) => '-',
        (_, 3) => '"',
        (_, 2) => '\'',
        _ => ' ',
    }
}

// blanks show in lowercase.
#[inline(always)]
pub fn board_label(
    board_layout: &board_layout::BoardLayout,
    board: &board::Board,
    row: i8,
    col: i8,
) -> char {
    alphabet::cell_label(board.at(row, col)).unwrap_or_else(|| empty_label(board_layout, row, col))
}

fn write_col_header(s: &mut String, cols: i8) {
    s.push_str("  ");
    for c in 0..cols {
        let _ = write!(s, " {}", ((c as u8) + 0x61) as char);
    }
    s.push('\n');
}

fn write_rule(s: &mut String, cols: i8) {
    s.push_str("  +");
    for _ in 1..cols {
        s.push_str("--");
    }
    s.push_str("-+\n");
}

pub fn board_to_string(board_layout: &board_layout::BoardLayout, board: &board::Board) -> String {
    let dim = board.dim();
    let mut s = String::new();
    write_col_header(&mut s, dim.cols);
    write_rule(&mut s, dim.cols);
    for r in 0..dim.rows {
        let _ = write!(s, "{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                s.push(' ');
            }
            s.push(board_label(board_layout, board, r, c));
        }
        let _ = writeln!(s, "|{}", r + 1);
    }
    write_rule(&mut s, dim.cols);
    write_col_header(&mut s, dim.cols);
    s
}

pub fn print_board(board_layout: &board_layout::BoardLayout, board: &board::Board) {
    print!("{}", board_to_string(board_layout, board));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_premiums_and_tiles() {
        let layout = &board_layout::DAILY_BOARD_LAYOUT;
        let mut board = board::Board::new(layout.dim());
        board.place_starting_word(layout, "CAT");
        board.mark_blank(4, 5);
        let s = board_to_string(layout, &board);
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "   a b c d e f g h i");
        assert_eq!(lines[1], "  +-----------------+");
        assert_eq!(lines[2], " 1|=       \"       =|1");
        assert_eq!(lines[6], " 5|\"     C A t     \"|5");
        assert_eq!(lines.len(), 13);

        let empty = board::Board::new(layout.dim());
        assert!(board_to_string(layout, &empty).contains(" 5|\"       *       \"|5"));
    }
}
