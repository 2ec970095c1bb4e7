//! Persistence for bingo boards, and the editing session that front ends drive.

mod error;
mod gateway;
mod json_dir;
mod memory;
mod session;

pub use error::*;
pub use gateway::{BoardGateway, PUBLIC_BOARDS_LIMIT};
pub use json_dir::*;
pub use memory::*;
pub use session::*;
