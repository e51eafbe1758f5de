//! Identity-aware object-graph encoding/decoding for the gref codec.
//!
//! This is the main codec crate. It ties graph, registry, and wire together:
//! the encoder walks a live [`graph::Value`] and emits a tree-shaped
//! document in which every registered instance appears exactly once (later
//! encounters become `@ref` nodes), and the decoder rebuilds an isomorphic
//! graph, resolving references — including cycles — against instances it
//! registers *before* descending into their fields.
//!
//! # Features
//!
//! - Shared-reference and cycle preservation for registered instances
//! - Structural pass-through for primitives, arrays, and plain records
//! - Post-restore hooks once an instance's fields are assigned
//! - Bounded decoding via [`wire::Limits`]
//!
//! # Design Principles
//!
//! - **Correctness first** - Identity invariants are documented and tested.
//! - **Explicit state** - Identity/instance maps are per-call values threaded
//!   through the traversal, never shared or global.
//! - **Deterministic** - Same registry and graph produce the same document.
//!
//! # Example
//!
//! ```
//! use codec::{decode, encode};
//! use graph::{Instance, Value};
//! use registry::{SchemaRegistry, TypeDef};
//!
//! fn waypoint() -> Instance {
//!     Instance::new("Waypoint").with("x", 0).with("y", 0).with("next", Value::Null)
//! }
//!
//! let registry = SchemaRegistry::builder()
//!     .register(TypeDef::new("Waypoint", waypoint).field("x").field("y").field("next"))
//!     .build()
//!     .unwrap();
//!
//! let a = waypoint().into_shared();
//! let b = waypoint().into_shared();
//! a.borrow_mut().set("next", Value::from(b.clone()));
//! b.borrow_mut().set("next", Value::from(a.clone()));
//!
//! let text = encode(&registry, &Value::from(a)).unwrap();
//! let restored = decode(&registry, &text, &wire::Limits::default()).unwrap();
//!
//! // The two-instance cycle survives the round trip.
//! let a = restored.as_instance().unwrap();
//! let b = a.borrow().get("next").unwrap().clone();
//! let back = b.as_instance().unwrap().borrow().get("next").unwrap().clone();
//! assert!(restored.ptr_eq(&back));
//! ```

mod decode;
mod encode;
mod error;

pub use decode::{decode, decode_node};
pub use encode::{encode, encode_pretty, encode_to_node};
pub use error::{CodecError, CodecResult};
pub use wire::Limits as WireLimits;
