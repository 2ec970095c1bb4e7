//! Bingo boards: a 5×5 grid of custom text cells around a free center cell,
//! and detection of a fully marked row, column or diagonal.

pub use board::*;
pub use document::*;
pub use errors::*;
pub use identifiers::*;
pub use marks::*;
pub use visualization::*;
pub use win::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod document;
mod errors;
mod identifiers;
mod marks;
mod visualization;
mod win;
