use crate::cancel::Cancelled;
use crate::column::ChunkPos;
use std::error::Error;
use std::fmt;

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Why a column failed to decode. One column's failure never affects its
/// siblings; callers treat the column as absent and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The root tag tree is absent or not a compound. Fatal for this call.
    InvalidInput(String),
    /// A field the detected era requires is not there.
    MissingField {
        field: String,
        pos: Option<ChunkPos>,
    },
    /// A field is there but has the wrong type or shape (bad array length,
    /// palette index out of range, ...).
    MistypedField {
        field: String,
        pos: Option<ChunkPos>,
    },
    /// The caller's cancellation token fired mid-decode.
    Cancelled,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidInput(msg) => write!(f, "invalid chunk input: {}", msg),
            DecodeError::MissingField { field, pos } => {
                write!(f, "{}missing field `{}`", at(pos), field)
            }
            DecodeError::MistypedField { field, pos } => {
                write!(f, "{}field `{}` has the wrong type or shape", at(pos), field)
            }
            DecodeError::Cancelled => write!(f, "decode cancelled"),
        }
    }
}

fn at(pos: &Option<ChunkPos>) -> String {
    match pos {
        Some(pos) => format!("chunk {}: ", pos),
        None => String::new(),
    }
}

impl Error for DecodeError {}

impl From<Cancelled> for DecodeError {
    fn from(_: Cancelled) -> Self {
        DecodeError::Cancelled
    }
}
