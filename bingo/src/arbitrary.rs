use quickcheck::{Arbitrary, Gen};

use crate::{empty_cells, is_center, positions, Board, Cell, Cells, Line, BOARD_SIZE};

/// A grid with the free cell in place and most other cells marked,
/// so that both winning and losing grids come up often.
#[derive(Clone, Debug)]
pub struct ArbitraryCells(pub Cells);

/// A board built from [`ArbitraryCells`].
#[derive(Clone, Debug)]
pub struct ArbitraryBoard(pub Board);

#[derive(Clone, Debug)]
pub struct ArbitraryLine(pub Line);

const TITLES: [&str; 6] = ["", "Rain", "Someone sneezes", "Dog barks", "Late bus", "  "];

impl Arbitrary for Cell {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            title: String::from(*g.choose(&TITLES).unwrap()),
            // Three in four cells are marked
            is_marked: u8::arbitrary(g) % 4 != 0,
        }
    }
}

impl Arbitrary for ArbitraryCells {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut cells = empty_cells();
        for (row, col) in positions() {
            if !is_center(row, col) {
                cells[row][col] = Cell::arbitrary(g);
            }
        }
        Self(cells)
    }
}

impl Arbitrary for ArbitraryBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let ArbitraryCells(cells) = ArbitraryCells::arbitrary(g);
        let mut board = Board::from_cells("Arbitrary", cells).unwrap();
        board.is_public = bool::arbitrary(g);
        Self(board)
    }
}

impl Arbitrary for ArbitraryLine {
    fn arbitrary(g: &mut Gen) -> Self {
        let idx = usize::arbitrary(g) % BOARD_SIZE;
        Self(
            *g.choose(&[
                Line::Row(idx),
                Line::Column(idx),
                Line::Diagonal,
                Line::AntiDiagonal,
            ])
            .unwrap(),
        )
    }
}
