// Copyright (C) 2020-2026 Andy Kurnia.

// a lane is a full row (across) or a full column (down) of the board.
#[derive(Clone, Copy, Debug)]
pub struct Strider {
    base: i16,
    step: i8,
    len: i8,
}

impl Strider {
    #[inline(always)]
    pub(crate) fn len(&self) -> i8 {
        self.len
    }

    #[inline(always)]
    pub fn at(&self, idx: i8) -> usize {
        ((self.base as isize) + (idx as isize) * (self.step as isize)) as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn across(&self, row: i8) -> Strider {
        Strider {
            base: (row as i16) * (self.cols as i16),
            step: 1,
            len: self.cols,
        }
    }

    #[inline(always)]
    pub fn down(&self, col: i8) -> Strider {
        Strider {
            base: col as i16,
            step: self.cols,
            len: self.rows,
        }
    }

    #[inline(always)]
    pub fn lane(&self, down: bool, lane: i8) -> Strider {
        if down {
            self.down(lane)
        } else {
            self.across(lane)
        }
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn contains(&self, row: i8, col: i8) -> bool {
        (0..self.rows).contains(&row) && (0..self.cols).contains(&col)
    }

    #[inline(always)]
    pub fn num_cells(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    // (row, col) of position idx along a lane.
    #[inline(always)]
    pub fn row_col_in_lane(down: bool, lane: i8, idx: i8) -> (i8, i8) {
        if down { (idx, lane) } else { (lane, idx) }
    }
}
