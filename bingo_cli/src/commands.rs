use std::io::Write;

use bingo::{is_center, visualize_board, Board, BoardId, BOARD_SIZE};
use bingo_store::{BoardGateway, Session, PUBLIC_BOARDS_LIMIT};
use clap::Subcommand;
use tracing::debug;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create an empty board
    New {
        title: String,
        /// Let other users browse this board
        #[arg(long, default_value_t = false)]
        public: bool,
    },
    /// List your boards
    List,
    /// List boards shared by any user
    Community {
        #[arg(short, long, default_value_t = PUBLIC_BOARDS_LIMIT)]
        limit: usize,
    },
    /// Show a board
    Show { id: String },
    /// Change the text of a cell, which also unmarks it
    Edit {
        id: String,
        #[arg(value_parser = parse_coordinate)]
        row: usize,
        #[arg(value_parser = parse_coordinate)]
        col: usize,
        title: String,
    },
    /// Mark or unmark a cell
    Mark {
        id: String,
        #[arg(value_parser = parse_coordinate)]
        row: usize,
        #[arg(value_parser = parse_coordinate)]
        col: usize,
    },
    /// Unmark every cell, keeping the text
    Reset { id: String },
    /// Unmark every cell and remove all text
    Clear { id: String },
}

fn parse_coordinate(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a row or column number", s))?;
    if value >= BOARD_SIZE {
        return Err(format!("must be between 0 and {}", BOARD_SIZE - 1));
    }
    Ok(value)
}

/// Runs one command, writing what the user should see to `out`.
pub fn execute<G: BoardGateway>(
    session: &mut Session<G>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    debug!(?command, user = %session.user(), "Executing command");
    match command {
        Command::New { title, public } => {
            if title.trim().is_empty() {
                anyhow::bail!("The board title must not be empty");
            }
            let board = session.create_board(&title, public)?;
            writeln!(out, "{}", visualize_board(board))?;
            if let Some(id) = &board.id {
                writeln!(out, "Created board {}", id)?;
            }
        }
        Command::List => {
            let boards = session.boards()?;
            if boards.is_empty() {
                writeln!(out, "No boards yet. Create your first board to get started!")?;
            }
            for board in boards {
                write_summary(out, &board)?;
                match board.created_at {
                    Some(created_at) => {
                        writeln!(out, "  (created on {})", created_at.format("%b %-d, %Y"))?
                    }
                    None => writeln!(out)?,
                }
            }
        }
        Command::Community { limit } => {
            for board in session.public_boards(limit)? {
                write_summary(out, &board)?;
                let owner = board.owner.as_ref().map_or("Anonymous", |owner| owner.as_str());
                writeln!(out, "  by {}", owner)?;
            }
        }
        Command::Show { id } => {
            let board = session.open(&BoardId::from(id))?;
            writeln!(out, "{}", visualize_board(board))?;
            if board.has_bingo() {
                writeln!(out, "BINGO!")?;
            }
        }
        Command::Edit {
            id,
            row,
            col,
            title,
        } => {
            session.open(&BoardId::from(id))?;
            if session.edit_cell(row, col, &title)? {
                write_open_board(session, out)?;
            } else if is_center(row, col) {
                writeln!(out, "The free cell cannot be edited")?;
            } else {
                writeln!(out, "Cell ({}, {}) is unchanged", row, col)?;
            }
        }
        Command::Mark { id, row, col } => {
            session.open(&BoardId::from(id))?;
            let toggle = session.toggle_mark(row, col)?;
            if !toggle.changed {
                if is_center(row, col) {
                    writeln!(out, "The free cell is always marked")?;
                } else {
                    writeln!(out, "Cell ({}, {}) has no text yet, so it cannot be marked", row, col)?;
                }
                return Ok(());
            }
            write_open_board(session, out)?;
            if toggle.completed_bingo {
                writeln!(out, "BINGO! Congratulations!")?;
            }
        }
        Command::Reset { id } => {
            session.open(&BoardId::from(id))?;
            if session.reset()? {
                write_open_board(session, out)?;
            } else {
                writeln!(out, "Nothing is marked")?;
            }
        }
        Command::Clear { id } => {
            session.open(&BoardId::from(id))?;
            if session.clear()? {
                write_open_board(session, out)?;
            } else {
                writeln!(out, "The board is already empty")?;
            }
        }
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, board: &Board) -> std::io::Result<()> {
    let id = board.id.as_ref().map_or("-", BoardId::as_str);
    write!(out, "{:<20}  {}", id, board.title)
}

fn write_open_board<G: BoardGateway>(
    session: &Session<G>,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if let Some(board) = session.board() {
        writeln!(out, "{}", visualize_board(board))?;
    }
    Ok(())
}
