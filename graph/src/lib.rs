//! Live object-graph value model for the gref codec.
//!
//! This crate defines the in-memory shape of everything the codec can
//! persist: primitives, arrays, plain records, and typed instances. Shared
//! structure and reference cycles are expressed through [`Rc`]-backed
//! handles, so two fields can point at the *same* instance and the codec can
//! observe that identity.
//!
//! # Design Principles
//!
//! - **No domain knowledge** - This crate knows nothing about schemas, wire
//!   formats, or game state. It only models values.
//! - **Explicit sharing** - Instances and plain records are shared handles;
//!   arrays and primitives are owned. Identity is visible, never implied.
//! - **Single-threaded by construction** - The `Rc`-based model is `!Send`,
//!   confining one graph to one thread.
//!
//! # Example
//!
//! ```
//! use graph::{Instance, Value};
//!
//! let b = Instance::new("Waypoint").with("x", 8).with("y", 3).into_shared();
//! let a = Instance::new("Waypoint").with("x", 1).with("y", 2).into_shared();
//!
//! // A two-instance reference cycle.
//! a.borrow_mut().set("next", Value::from(b.clone()));
//! b.borrow_mut().set("next", Value::from(a.clone()));
//!
//! let root = Value::from(a.clone());
//! assert!(root.ptr_eq(&Value::from(a)));
//! ```
//!
//! [`Rc`]: std::rc::Rc

mod instance;
mod value;

pub use instance::Instance;
pub use value::{SharedInstance, SharedMap, Value};
