// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

const TWS: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
const DWS: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
const TLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
const DLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
const FVS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

pub struct StaticBoardLayout {
    premiums: &'static [Premium],
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

pub enum BoardLayout {
    Static(StaticBoardLayout),
}

impl BoardLayout {
    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        match self {
            BoardLayout::Static(x) => x.dim,
        }
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_row,
        }
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_col,
        }
    }

    #[inline(always)]
    pub fn premium_at(&self, row: i8, col: i8) -> Premium {
        match self {
            BoardLayout::Static(x) => x.premiums[x.dim.at_row_col(row, col)],
        }
    }
}

// the center star doubles the word.
pub static DAILY_BOARD_LAYOUT: BoardLayout = BoardLayout::Static(StaticBoardLayout {
    premiums: &[
        TWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TWS, //
        FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, //
        FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, //
        FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, //
        TLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, TLS, //
        FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, //
        FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, //
        FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, //
        TWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TWS, //
    ],
    dim: matrix::Dim { rows: 9, cols: 9 },
    star_row: 4,
    star_col: 4,
});

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_with(premium: Premium) -> Vec<(i8, i8)> {
        let layout = &DAILY_BOARD_LAYOUT;
        let dim = layout.dim();
        let mut ret = Vec::new();
        for r in 0..dim.rows {
            for c in 0..dim.cols {
                if layout.premium_at(r, c) == premium {
                    ret.push((r, c));
                }
            }
        }
        ret
    }

    #[test]
    fn premium_squares() {
        assert_eq!(cells_with(DLS), vec![(3, 3), (3, 5), (5, 3), (5, 5)]);
        assert_eq!(
            cells_with(TLS),
            vec![
                (0, 4),
                (2, 2),
                (2, 6),
                (4, 0),
                (4, 8),
                (6, 2),
                (6, 6),
                (8, 4)
            ]
        );
        assert_eq!(
            cells_with(DWS),
            vec![(1, 1), (1, 7), (4, 4), (7, 1), (7, 7)]
        );
        assert_eq!(cells_with(TWS), vec![(0, 0), (0, 8), (8, 0), (8, 8)]);
        assert_eq!(cells_with(FVS).len(), 81 - 4 - 8 - 5 - 4);
    }
}
