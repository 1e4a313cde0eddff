//! Variant discriminants
//!
//! The closed set of value kinds a [`Variant`](crate::Variant) can hold.
//! Declaration order is significant: it is the total order used when two
//! Variants of different kinds are compared.

use core::fmt;
use core::mem::size_of;

use crate::math::{
    Aabb, Color, Plane, Quaternion, Rect2, Rect2i, Transform2D, Vector2, Vector2i, Vector3,
    Vector3i, Vector4, Vector4i,
};

/// Maximum width in bytes of an aggregate stored inline in a Variant.
///
/// Host code writing raw payload slots must agree on this value. Wider
/// aggregates (basis, 3D transform, projection) live behind a box.
pub const VARIANT_PAYLOAD_SIZE: usize = 24;

/// Broad grouping of value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantFamily {
    /// Nil, bool, int, float, string
    Atomic,
    /// Fixed-width math aggregates
    Opaque,
    /// Engine handles and heterogeneous containers
    Reference,
    /// Homogeneous typed arrays
    Packed,
}

/// Discriminant of a Variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum VariantType {
    Nil,

    // atomic types
    Bool,
    Int,
    Float,
    String,

    // math types
    Vector2,
    Vector2i,
    Rect2,
    Rect2i,
    Vector3,
    Vector3i,
    Transform2D,
    Vector4,
    Vector4i,
    Plane,
    Quaternion,
    Aabb,
    Basis,
    Transform3D,
    Projection,

    // misc types
    Color,
    StringName,
    NodePath,
    Rid,
    Object,
    Callable,
    Signal,
    Dictionary,
    Array,

    // typed arrays
    PackedByteArray,
    PackedInt32Array,
    PackedInt64Array,
    PackedFloat32Array,
    PackedFloat64Array,
    PackedStringArray,
    PackedVector2Array,
    PackedVector3Array,
    PackedColorArray,
}

impl VariantType {
    /// Number of kinds
    pub const COUNT: usize = 38;

    /// Every kind, in discriminant order
    pub const ALL: [VariantType; Self::COUNT] = [
        Self::Nil,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::String,
        Self::Vector2,
        Self::Vector2i,
        Self::Rect2,
        Self::Rect2i,
        Self::Vector3,
        Self::Vector3i,
        Self::Transform2D,
        Self::Vector4,
        Self::Vector4i,
        Self::Plane,
        Self::Quaternion,
        Self::Aabb,
        Self::Basis,
        Self::Transform3D,
        Self::Projection,
        Self::Color,
        Self::StringName,
        Self::NodePath,
        Self::Rid,
        Self::Object,
        Self::Callable,
        Self::Signal,
        Self::Dictionary,
        Self::Array,
        Self::PackedByteArray,
        Self::PackedInt32Array,
        Self::PackedInt64Array,
        Self::PackedFloat32Array,
        Self::PackedFloat64Array,
        Self::PackedStringArray,
        Self::PackedVector2Array,
        Self::PackedVector3Array,
        Self::PackedColorArray,
    ];

    /// Raw discriminant value
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its raw discriminant
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Engine-facing type name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "String",
            Self::Vector2 => "Vector2",
            Self::Vector2i => "Vector2i",
            Self::Rect2 => "Rect2",
            Self::Rect2i => "Rect2i",
            Self::Vector3 => "Vector3",
            Self::Vector3i => "Vector3i",
            Self::Transform2D => "Transform2D",
            Self::Vector4 => "Vector4",
            Self::Vector4i => "Vector4i",
            Self::Plane => "Plane",
            Self::Quaternion => "Quaternion",
            Self::Aabb => "AABB",
            Self::Basis => "Basis",
            Self::Transform3D => "Transform3D",
            Self::Projection => "Projection",
            Self::Color => "Color",
            Self::StringName => "StringName",
            Self::NodePath => "NodePath",
            Self::Rid => "RID",
            Self::Object => "Object",
            Self::Callable => "Callable",
            Self::Signal => "Signal",
            Self::Dictionary => "Dictionary",
            Self::Array => "Array",
            Self::PackedByteArray => "PackedByteArray",
            Self::PackedInt32Array => "PackedInt32Array",
            Self::PackedInt64Array => "PackedInt64Array",
            Self::PackedFloat32Array => "PackedFloat32Array",
            Self::PackedFloat64Array => "PackedFloat64Array",
            Self::PackedStringArray => "PackedStringArray",
            Self::PackedVector2Array => "PackedVector2Array",
            Self::PackedVector3Array => "PackedVector3Array",
            Self::PackedColorArray => "PackedColorArray",
        }
    }

    /// Family this kind belongs to
    pub const fn family(self) -> VariantFamily {
        match self {
            Self::Nil | Self::Bool | Self::Int | Self::Float | Self::String => VariantFamily::Atomic,
            Self::Vector2
            | Self::Vector2i
            | Self::Rect2
            | Self::Rect2i
            | Self::Vector3
            | Self::Vector3i
            | Self::Transform2D
            | Self::Vector4
            | Self::Vector4i
            | Self::Plane
            | Self::Quaternion
            | Self::Aabb
            | Self::Basis
            | Self::Transform3D
            | Self::Projection
            | Self::Color => VariantFamily::Opaque,
            Self::StringName
            | Self::NodePath
            | Self::Rid
            | Self::Object
            | Self::Callable
            | Self::Signal
            | Self::Dictionary
            | Self::Array => VariantFamily::Reference,
            Self::PackedByteArray
            | Self::PackedInt32Array
            | Self::PackedInt64Array
            | Self::PackedFloat32Array
            | Self::PackedFloat64Array
            | Self::PackedStringArray
            | Self::PackedVector2Array
            | Self::PackedVector3Array
            | Self::PackedColorArray => VariantFamily::Packed,
        }
    }

    /// Whether a Variant of this kind owns a heap allocation.
    ///
    /// Object, callable, signal and RID handles never own their target:
    /// that lifetime belongs to the host runtime.
    pub const fn is_owning(self) -> bool {
        match self {
            Self::String
            | Self::Basis
            | Self::Transform3D
            | Self::Projection
            | Self::StringName
            | Self::NodePath
            | Self::Dictionary
            | Self::Array => true,
            _ => matches!(self.family(), VariantFamily::Packed),
        }
    }

    /// Size of the in-memory value for aggregates stored in place.
    ///
    /// `None` for scalars, handles, heap-backed kinds and boxed aggregates.
    pub const fn inline_payload_size(self) -> Option<usize> {
        match self {
            Self::Vector2 => Some(size_of::<Vector2>()),
            Self::Vector2i => Some(size_of::<Vector2i>()),
            Self::Rect2 => Some(size_of::<Rect2>()),
            Self::Rect2i => Some(size_of::<Rect2i>()),
            Self::Vector3 => Some(size_of::<Vector3>()),
            Self::Vector3i => Some(size_of::<Vector3i>()),
            Self::Transform2D => Some(size_of::<Transform2D>()),
            Self::Vector4 => Some(size_of::<Vector4>()),
            Self::Vector4i => Some(size_of::<Vector4i>()),
            Self::Plane => Some(size_of::<Plane>()),
            Self::Quaternion => Some(size_of::<Quaternion>()),
            Self::Aabb => Some(size_of::<Aabb>()),
            Self::Color => Some(size_of::<Color>()),
            _ => None,
        }
    }

    /// Whether the kind is an aggregate stored in place
    pub const fn is_inline_opaque(self) -> bool {
        self.inline_payload_size().is_some()
    }
}

// Every inline aggregate must fit the shared payload budget.
const _: () = {
    let mut i = 0;
    while i < VariantType::COUNT {
        if let Some(size) = VariantType::ALL[i].inline_payload_size() {
            assert!(size <= VARIANT_PAYLOAD_SIZE);
        }
        i += 1;
    }
};

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_follow_declaration_order() {
        for (i, kind) in VariantType::ALL.iter().enumerate() {
            assert_eq!(kind.index() as usize, i);
            assert_eq!(VariantType::from_index(i as u8), Some(*kind));
        }
        assert_eq!(VariantType::from_index(VariantType::COUNT as u8), None);
        assert!(VariantType::Nil < VariantType::Bool);
        assert!(VariantType::Int < VariantType::String);
        assert!(VariantType::Array < VariantType::PackedByteArray);
    }

    #[test]
    fn test_families() {
        assert_eq!(VariantType::Float.family(), VariantFamily::Atomic);
        assert_eq!(VariantType::Projection.family(), VariantFamily::Opaque);
        assert_eq!(VariantType::Signal.family(), VariantFamily::Reference);
        assert_eq!(VariantType::PackedColorArray.family(), VariantFamily::Packed);
    }

    #[test]
    fn test_ownership() {
        assert!(VariantType::String.is_owning());
        assert!(VariantType::PackedFloat32Array.is_owning());
        assert!(!VariantType::Object.is_owning());
        assert!(!VariantType::Vector3.is_owning());
        assert!(!VariantType::Int.is_owning());
    }

    #[test]
    fn test_inline_sizes() {
        assert_eq!(VariantType::Transform2D.inline_payload_size(), Some(24));
        assert_eq!(VariantType::Aabb.inline_payload_size(), Some(24));
        assert_eq!(VariantType::Vector3.inline_payload_size(), Some(12));
        assert_eq!(VariantType::Basis.inline_payload_size(), None);
        assert!(VariantType::Color.is_inline_opaque());
        assert!(!VariantType::String.is_inline_opaque());
    }

    #[test]
    fn test_names() {
        assert_eq!(VariantType::Aabb.to_string(), "AABB");
        assert_eq!(VariantType::Int.name(), "int");
    }
}
