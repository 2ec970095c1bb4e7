use std::fmt::{self, Debug};
use std::iter::FusedIterator;

use crate::{Cells, BOARD_SIZE};

const _: () = assert!(
    BOARD_SIZE * BOARD_SIZE <= 64,
    "MarkSet stores one bit per cell in a u64"
);

const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

const VALID_BITS: u64 = if NUM_CELLS == 64 {
    u64::MAX
} else {
    (1u64 << NUM_CELLS) - 1
};

/// The marked cells of a board, one bit per cell in row-major order.
///
/// This is what the win detection works on: every line is a mask, and
/// a line is complete when the mask is a subset of the marks.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkSet {
    bits: u64,
}

impl MarkSet {
    /// Creates a new, empty set.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub(crate) const fn from_bits(bits: u64) -> Self {
        Self {
            bits: bits & VALID_BITS,
        }
    }

    /// Collects the marks of a grid.
    pub fn from_cells(cells: &Cells) -> Self {
        crate::positions()
            .filter(|&(row, col)| cells[row][col].is_marked)
            .collect()
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Coordinates outside of the board are never contained.
    pub fn contains(self, row: usize, col: usize) -> bool {
        in_bounds(row, col) && self.bits & bit(row, col) != 0
    }

    /// Are all cells of `other` also in `self`?
    pub fn is_superset(self, other: MarkSet) -> bool {
        self.bits & other.bits == other.bits
    }
}

pub(crate) const fn bit(row: usize, col: usize) -> u64 {
    1u64 << (row * BOARD_SIZE + col)
}

fn in_bounds(row: usize, col: usize) -> bool {
    row < BOARD_SIZE && col < BOARD_SIZE
}

impl Debug for MarkSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::with_capacity(NUM_CELLS * 2);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                s.push(if self.contains(row, col) { '1' } else { '0' });
                s.push(if col + 1 == BOARD_SIZE { '\n' } else { ' ' });
            }
        }
        write!(f, "{}", s)
    }
}

/// Coordinates outside of the board are skipped.
impl FromIterator<(usize, usize)> for MarkSet {
    fn from_iter<T: IntoIterator<Item = (usize, usize)>>(iter: T) -> Self {
        let bits = iter
            .into_iter()
            .filter(|&(row, col)| in_bounds(row, col))
            .fold(0, |bits, (row, col)| bits | bit(row, col));
        Self { bits }
    }
}

/// Iterator produced by [`MarkSet::into_iter()`].
///
/// Yields `(row, col)` pairs in row-major order.
pub struct MarkSetIter {
    bits: u64,
}

impl IntoIterator for MarkSet {
    type Item = (usize, usize);

    type IntoIter = MarkSetIter;

    fn into_iter(self) -> Self::IntoIter {
        MarkSetIter { bits: self.bits }
    }
}

impl Iterator for MarkSetIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let idx = self.bits.trailing_zeros() as usize;
            // Clear the flag corresponding to this coordinate
            self.bits ^= 1u64 << idx;
            Some((idx / BOARD_SIZE, idx % BOARD_SIZE))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for MarkSetIter {}

impl FusedIterator for MarkSetIter {}
