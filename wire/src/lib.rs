//! Textual wire-node format for the gref codec.
//!
//! This crate owns the persisted artifact: a tree of wire nodes rendered as
//! JSON text. It classifies records by their reserved keys (`@id`, `@type`,
//! `@ref`), validates ids, and enforces decode limits. It does not know
//! about schemas or live objects—only the structure of documents.
//!
//! # Design Principles
//!
//! - **Stable wire format** - The format is the contract between encoder and
//!   decoder and the long-lived save artifact; see `WIRE_FORMAT.md`.
//! - **Bounded decoding** - Document size and nesting depth are validated
//!   against [`Limits`] before and during parsing.
//! - **No domain knowledge** - This crate handles node structure, not graph
//!   semantics.
//!
//! # Example
//!
//! ```
//! use wire::{parse_document, Limits, WireNode};
//!
//! let node = parse_document(r#"{"@ref": 3}"#, &Limits::default()).unwrap();
//! assert_eq!(node, WireNode::Ref(3));
//! ```

mod error;
mod limits;
mod node;
mod text;

pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use limits::Limits;
pub use node::{NodeKind, WireNode, ID_KEY, REF_KEY, TYPE_KEY};
pub use text::{emit_document, emit_document_pretty, parse_document};

/// A node identity within one document. Always positive.
pub type NodeId = u64;
