//! Reference and handle kinds
//!
//! These identify things whose lifetime belongs to the host runtime
//! (objects, resources, signals). A Variant only carries the identifier.

use core::fmt;

/// Interned-style name used for method, signal and property identifiers
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StringName(String);

impl StringName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for StringName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StringName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path to a node in the scene tree, optionally followed by `:property`
/// subnames, e.g. `/root/Player/Sprite:texture:size`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodePath(String);

impl NodePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Node names along the path
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let nodes = self.0.split(':').next().unwrap_or("");
        nodes.split('/').filter(|s| !s.is_empty())
    }

    /// Property subnames after the node part
    pub fn subnames(&self) -> impl Iterator<Item = &str> {
        self.0.split(':').skip(1).filter(|s| !s.is_empty())
    }
}

impl From<&str> for NodePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque server-side resource id. Zero is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rid(u64);

impl Rid {
    pub const INVALID: Self = Self(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }

    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RID({})", self.0)
    }
}

/// Instance id of an engine object. Zero is the null object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const NULL: Self = Self(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Object#{}>", self.0)
    }
}

/// Reference to a method bound to an object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Callable {
    object: ObjectId,
    method: StringName,
}

impl Callable {
    pub fn new(object: ObjectId, method: impl Into<StringName>) -> Self {
        Self {
            object,
            method: method.into(),
        }
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn method(&self) -> &StringName {
        &self.method
    }

    pub fn is_null(&self) -> bool {
        self.object.is_null() || self.method.is_empty()
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.object, self.method)
    }
}

/// Reference to a signal declared on an object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signal {
    object: ObjectId,
    name: StringName,
}

impl Signal {
    pub fn new(object: ObjectId, name: impl Into<StringName>) -> Self {
        Self {
            object,
            name: name.into(),
        }
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn name(&self) -> &StringName {
        &self.name
    }

    pub fn is_null(&self) -> bool {
        self.object.is_null() || self.name.is_empty()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::[signal]{}", self.object, self.name)
    }
}
