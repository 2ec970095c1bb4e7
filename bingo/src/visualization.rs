use crate::{Board, BOARD_SIZE};

/// Characters available for a cell's title, not counting the mark indicator.
const TITLE_WIDTH: usize = 10;

/// Draws the board as a grid of boxes.
///
/// Marked cells are prefixed with `■`, titles that don't fit are cut off with `…`.
pub fn visualize_board(board: &Board) -> String {
    let cell_width = TITLE_WIDTH + 2;
    let border = |left: char, middle: char, right: char| {
        let mut line = String::from("   ");
        line.push(left);
        for col in 0..BOARD_SIZE {
            line += &"─".repeat(cell_width);
            line.push(if col + 1 == BOARD_SIZE { right } else { middle });
        }
        line
    };

    let mut result = format!("{}\n   ", board.title);
    for col in 0..BOARD_SIZE {
        result += &format!(" {:^width$}", col, width = cell_width);
    }
    result += "\n";
    result += &border('╭', '┬', '╮');
    for (row, cells_in_row) in board.cells().iter().enumerate() {
        if row > 0 {
            result += "\n";
            result += &border('├', '┼', '┤');
        }
        result += &format!("\n{:>2} │", row);
        for cell in cells_in_row {
            let indicator = if cell.is_marked { '■' } else { ' ' };
            result += &format!(
                "{} {:<width$}│",
                indicator,
                shorten(&cell.title),
                width = TITLE_WIDTH
            );
        }
    }
    result += "\n";
    result += &border('╰', '┴', '╯');
    result
}

fn shorten(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        String::from(title)
    } else {
        let mut short: String = title.chars().take(TITLE_WIDTH - 1).collect();
        short.push('…');
        short
    }
}
