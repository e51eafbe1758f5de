//! Error types for wire format operations.

use std::fmt;

/// Result type for wire decode operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors raised while parsing document text into wire nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The text is not well-formed JSON.
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A number could not be represented.
    InvalidNumber { found: String },

    /// An `@id` value is not a positive integer.
    InvalidId { found: String },

    /// An `@ref` value is not a positive integer.
    InvalidRef { found: String },

    /// A reference record carries keys besides `@ref`.
    RefWithExtraKeys { extra: usize },

    /// An `@type` value is not a string.
    InvalidTypeName { found: String },

    /// A record carries `@type` without `@id`.
    TypeWithoutId { type_name: String },

    /// A record key uses the reserved `@` prefix without being a known
    /// marker.
    ReservedKey { key: String },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    DocumentBytes,
    Depth,
}

/// Errors that can occur while emitting document text.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// JSON has no representation for NaN or infinities.
    NonFiniteNumber { value: f64 },

    /// A record entry key uses the reserved `@` prefix.
    ReservedEntryKey { key: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax {
                line,
                column,
                message,
            } => {
                write!(f, "syntax error at line {line} column {column}: {message}")
            }
            Self::InvalidNumber { found } => {
                write!(f, "unrepresentable number: {found}")
            }
            Self::InvalidId { found } => {
                write!(f, "@id must be a positive integer, found {found}")
            }
            Self::InvalidRef { found } => {
                write!(f, "@ref must be a positive integer, found {found}")
            }
            Self::RefWithExtraKeys { extra } => {
                write!(f, "reference record carries {extra} extra key(s)")
            }
            Self::InvalidTypeName { found } => {
                write!(f, "@type must be a string, found {found}")
            }
            Self::TypeWithoutId { type_name } => {
                write!(f, "record typed {type_name:?} carries no @id")
            }
            Self::ReservedKey { key } => {
                write!(f, "unknown reserved key {key:?}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DocumentBytes => "document bytes",
            Self::Depth => "nesting depth",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteNumber { value } => {
                write!(f, "non-finite number {value} has no JSON representation")
            }
            Self::ReservedEntryKey { key } => {
                write!(f, "entry key {key:?} collides with the reserved @ prefix")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_syntax() {
        let err = DecodeError::Syntax {
            line: 3,
            column: 14,
            message: "expected value".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("column 14"));
    }

    #[test]
    fn decode_error_display_invalid_id() {
        let err = DecodeError::InvalidId {
            found: "-4".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("@id"));
        assert!(msg.contains("-4"));
    }

    #[test]
    fn decode_error_display_limits_exceeded() {
        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::Depth,
            limit: 16,
            actual: 17,
        };
        let msg = err.to_string();
        assert!(msg.contains("nesting depth"));
        assert!(msg.contains("17"));
    }

    #[test]
    fn encode_error_display_non_finite() {
        let err = EncodeError::NonFiniteNumber { value: f64::NAN };
        let msg = err.to_string();
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<DecodeError>();
        assert_error::<EncodeError>();
    }
}
