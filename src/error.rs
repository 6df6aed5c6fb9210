use crate::catalog::AppId;
use crate::grid::Position;
use thiserror::Error;

/// Startup data could not be turned into a [`crate::catalog::Catalog`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("data file {resource} could not be read: {source}")]
    Missing {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("data file {resource} does not match the app schema: {source}")]
    Malformed {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("data file {resource} lists app id {id} more than once")]
    DuplicateId { resource: String, id: AppId },
}

/// A grid operation referenced a position outside the current bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{op}: position {position} is out of range")]
pub struct IndexError {
    pub op: &'static str,
    pub position: Position,
}

impl IndexError {
    pub fn new(op: &'static str, position: Position) -> Self {
        Self { op, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_names_operation_and_position() {
        let err = IndexError::new("delete", Position::new(0, 5));
        assert_eq!(err.to_string(), "delete: position (0, 5) is out of range");
    }
}
