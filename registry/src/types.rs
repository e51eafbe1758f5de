//! Type descriptors: constructors, persistent fields, hooks.

use graph::{Instance, SharedInstance};

/// Zero-argument construction function for one registered type.
///
/// Must produce an instance tagged with the registered type name, populated
/// with the type's default field values. Fields outside the persistent
/// schema keep whatever the constructor put there after a restore.
pub type Constructor = fn() -> Instance;

/// Hook invoked by the decoder once all of an instance's fields have been
/// assigned, e.g. to rebuild internal indices over restored contents.
///
/// Hooks run in traversal post-order during decode: an instance inside a
/// reference cycle may observe ancestors that are not fully populated yet.
pub type PostRestoreHook = fn(&SharedInstance);

/// The registered description of one persistent type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    type_name: String,
    constructor: Constructor,
    fields: Vec<String>,
    post_restore: Option<PostRestoreHook>,
}

impl TypeDef {
    /// Creates a descriptor with no persistent fields.
    ///
    /// A fieldless type is legal: its instances round-trip carrying nothing
    /// beyond identity and type.
    #[must_use]
    pub fn new(type_name: impl Into<String>, constructor: Constructor) -> Self {
        Self {
            type_name: type_name.into(),
            constructor,
            fields: Vec::new(),
            post_restore: None,
        }
    }

    /// Declares a persistent field. Declaration order is the wire order.
    ///
    /// Declaring the same field twice is idempotent.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.fields.contains(&name) {
            self.fields.push(name);
        }
        self
    }

    /// Declares several persistent fields at once, in order.
    #[must_use]
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.field(name);
        }
        self
    }

    /// Attaches a post-restore hook.
    #[must_use]
    pub fn post_restore(mut self, hook: PostRestoreHook) -> Self {
        self.post_restore = Some(hook);
        self
    }

    /// The stable type name this descriptor registers.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Persistent field names in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The construction function.
    #[must_use]
    pub fn constructor(&self) -> Constructor {
        self.constructor
    }

    /// Builds a fresh default instance of this type.
    #[must_use]
    pub fn construct(&self) -> Instance {
        (self.constructor)()
    }

    /// The post-restore hook, if one was attached.
    #[must_use]
    pub fn post_restore_hook(&self) -> Option<PostRestoreHook> {
        self.post_restore
    }
}
