//! Error types for codec operations.

use std::fmt;

use wire::NodeId;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a graph.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Wire parse error.
    Wire(wire::DecodeError),

    /// Wire emit error.
    Emit(wire::EncodeError),

    /// A type name has no registered descriptor.
    UnknownType { type_name: String },

    /// A reference points at an id no node in the document declares.
    DanglingReference { id: NodeId },

    /// Two nodes in one document declare the same id.
    DuplicateId { id: NodeId },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(err) => write!(f, "wire error: {err}"),
            Self::Emit(err) => write!(f, "emit error: {err}"),
            Self::UnknownType { type_name } => {
                write!(f, "unknown type {type_name:?}")
            }
            Self::DanglingReference { id } => {
                write!(f, "reference to id {id} matches no node in the document")
            }
            Self::DuplicateId { id } => {
                write!(f, "id {id} declared by more than one node")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(err) => Some(err),
            Self::Emit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Emit(err)
    }
}
