use bingo::{BoardId, MalformedBoardData};

/// The error type for [`BoardGateway`](crate::BoardGateway) operations.
#[derive(Debug)]
pub enum PersistenceError {
    /// Reading or writing the store failed.
    Io(std::io::Error),
    /// The stored document is not valid JSON, or has fields of the wrong type.
    Decode {
        id: BoardId,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
    /// The stored document is valid JSON, but not a valid board.
    Malformed {
        id: BoardId,
        source: MalformedBoardData,
    },
    NotFound(BoardId),
    /// The id cannot be used as a key in this store.
    InvalidId(BoardId),
    /// A board operation was attempted on a session without an open board.
    NoOpenBoard,
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Decode { source, .. } => Some(source),
            PersistenceError::Encode(err) => Some(err),
            PersistenceError::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Io(_) => write!(f, "Could not access the board store"),
            PersistenceError::Decode { id, .. } => write!(f, "Could not decode board {}", id),
            PersistenceError::Encode(_) => write!(f, "Could not encode board"),
            PersistenceError::Malformed { id, .. } => write!(f, "Board {} is malformed", id),
            PersistenceError::NotFound(id) => write!(f, "There is no board {}", id),
            PersistenceError::InvalidId(id) => write!(f, "{:?} is not a valid board id", id.as_str()),
            PersistenceError::NoOpenBoard => write!(f, "No board is open"),
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}
