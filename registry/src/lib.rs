//! Persistent-schema registry and type descriptors for the gref codec.
//!
//! This crate records *what persists*: for each participating type, a stable
//! type name, a zero-argument constructor, the ordered set of field names
//! included in the wire format, and an optional post-restore hook.
//!
//! Registration is two-phase. Types are declared on a [`RegistryBuilder`]
//! during startup; [`RegistryBuilder::build`] validates the declarations and
//! freezes them into an immutable [`SchemaRegistry`], which every encode and
//! decode call then borrows. Nothing can be registered, removed, or mutated
//! after the freeze, so registration can never race with codec use.
//!
//! # Design Principles
//!
//! - **Explicit schemas** - No reflection; every persistent field is named
//!   in a registration call.
//! - **Stable discriminants** - Type names are chosen by the implementer,
//!   not derived from any language mechanism.
//! - **Validated at build** - Configuration mistakes (duplicate names,
//!   reserved field names, lying constructors) fail at startup, never during
//!   a save or load.
//!
//! # Example
//!
//! ```
//! use graph::Instance;
//! use registry::{SchemaRegistry, TypeDef};
//!
//! fn waypoint() -> Instance {
//!     Instance::new("Waypoint").with("x", 0).with("y", 0)
//! }
//!
//! let registry = SchemaRegistry::builder()
//!     .register(TypeDef::new("Waypoint", waypoint).field("x").field("y").field("next"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.fields_of("Waypoint"), ["x", "y", "next"]);
//! ```

mod error;
mod hash;
mod registry;
mod types;

pub use error::{RegistryError, RegistryResult};
pub use hash::registry_hash;
pub use registry::{RegistryBuilder, SchemaRegistry};
pub use types::{Constructor, PostRestoreHook, TypeDef};
