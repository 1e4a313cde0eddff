//! The Variant value type
//!
//! A tagged union over every [`VariantType`]. Kinds that need heap storage
//! own it through their payload (strings, boxed matrices, containers, packed
//! arrays); everything else is stored inline. Cloning deep-copies owned
//! payloads, and [`Variant::take`] moves a value out leaving `Nil` behind.

use core::fmt;
use std::borrow::Cow;

use crate::collections::{Array, Dictionary};
use crate::handle::{Callable, NodePath, ObjectId, Rid, Signal, StringName};
use crate::kind::{VariantType, VARIANT_PAYLOAD_SIZE};
use crate::math::*;
use crate::text::TextBuffer;

/// Zero-padded byte image of an inline aggregate
pub type OpaquePayload = [u8; VARIANT_PAYLOAD_SIZE];

/// Dynamic value exchanged across the host/guest boundary
#[derive(Debug, Clone, Default)]
pub enum Variant {
    /// Absence of a value
    #[default]
    Nil,

    Bool(bool),
    /// Every integer width widens to i64
    Int(i64),
    /// Both float widths widen to f64
    Float(f64),
    String(TextBuffer),

    Vector2(Vector2),
    Vector2i(Vector2i),
    Rect2(Rect2),
    Rect2i(Rect2i),
    Vector3(Vector3),
    Vector3i(Vector3i),
    Transform2D(Transform2D),
    Vector4(Vector4),
    Vector4i(Vector4i),
    Plane(Plane),
    Quaternion(Quaternion),
    Aabb(Aabb),
    Basis(Box<Basis>),
    Transform3D(Box<Transform3D>),
    Projection(Box<Projection>),

    Color(Color),
    StringName(StringName),
    NodePath(NodePath),
    Rid(Rid),
    Object(ObjectId),
    Callable(Callable),
    Signal(Signal),
    Dictionary(Dictionary),
    Array(Array),

    /// Shares its buffer type with `String`; see [`Variant::as_str`]
    PackedByteArray(TextBuffer),
    PackedInt32Array(Vec<i32>),
    PackedInt64Array(Vec<i64>),
    PackedFloat32Array(Vec<f32>),
    PackedFloat64Array(Vec<f64>),
    PackedStringArray(Vec<String>),
    PackedVector2Array(Vec<Vector2>),
    PackedVector3Array(Vec<Vector3>),
    PackedColorArray(Vec<Color>),
}

impl Variant {
    /// Build a Variant from any supported value
    pub fn new(value: impl Into<Variant>) -> Self {
        value.into()
    }

    /// Active kind
    pub fn get_type(&self) -> VariantType {
        match self {
            Self::Nil => VariantType::Nil,
            Self::Bool(_) => VariantType::Bool,
            Self::Int(_) => VariantType::Int,
            Self::Float(_) => VariantType::Float,
            Self::String(_) => VariantType::String,
            Self::Vector2(_) => VariantType::Vector2,
            Self::Vector2i(_) => VariantType::Vector2i,
            Self::Rect2(_) => VariantType::Rect2,
            Self::Rect2i(_) => VariantType::Rect2i,
            Self::Vector3(_) => VariantType::Vector3,
            Self::Vector3i(_) => VariantType::Vector3i,
            Self::Transform2D(_) => VariantType::Transform2D,
            Self::Vector4(_) => VariantType::Vector4,
            Self::Vector4i(_) => VariantType::Vector4i,
            Self::Plane(_) => VariantType::Plane,
            Self::Quaternion(_) => VariantType::Quaternion,
            Self::Aabb(_) => VariantType::Aabb,
            Self::Basis(_) => VariantType::Basis,
            Self::Transform3D(_) => VariantType::Transform3D,
            Self::Projection(_) => VariantType::Projection,
            Self::Color(_) => VariantType::Color,
            Self::StringName(_) => VariantType::StringName,
            Self::NodePath(_) => VariantType::NodePath,
            Self::Rid(_) => VariantType::Rid,
            Self::Object(_) => VariantType::Object,
            Self::Callable(_) => VariantType::Callable,
            Self::Signal(_) => VariantType::Signal,
            Self::Dictionary(_) => VariantType::Dictionary,
            Self::Array(_) => VariantType::Array,
            Self::PackedByteArray(_) => VariantType::PackedByteArray,
            Self::PackedInt32Array(_) => VariantType::PackedInt32Array,
            Self::PackedInt64Array(_) => VariantType::PackedInt64Array,
            Self::PackedFloat32Array(_) => VariantType::PackedFloat32Array,
            Self::PackedFloat64Array(_) => VariantType::PackedFloat64Array,
            Self::PackedStringArray(_) => VariantType::PackedStringArray,
            Self::PackedVector2Array(_) => VariantType::PackedVector2Array,
            Self::PackedVector3Array(_) => VariantType::PackedVector3Array,
            Self::PackedColorArray(_) => VariantType::PackedColorArray,
        }
    }

    /// Type name of the active kind
    pub fn type_name(&self) -> &'static str {
        self.get_type().name()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Move the value out, leaving `Nil` in its place
    pub fn take(&mut self) -> Variant {
        std::mem::take(self)
    }

    /// Copy-assign: drop the current payload, then deep-copy `source`
    pub fn assign(&mut self, source: &Variant) {
        self.clone_from(source);
    }

    /// Move-assign: drop the current payload, then take `source`'s,
    /// leaving `source` as `Nil`
    pub fn assign_from(&mut self, source: &mut Variant) {
        *self = source.take();
    }

    /// Boolean interpretation used by the logical operators
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Vector2(v) => *v != Vector2::ZERO,
            Self::Vector2i(v) => *v != Vector2i::ZERO,
            Self::Rect2(r) => r.position != Vector2::ZERO || r.size != Vector2::ZERO,
            Self::Rect2i(r) => r.position != Vector2i::ZERO || r.size != Vector2i::ZERO,
            Self::Vector3(v) => *v != Vector3::ZERO,
            Self::Vector3i(v) => *v != Vector3i::ZERO,
            Self::Transform2D(t) => *t != Transform2D::IDENTITY,
            Self::Vector4(v) => *v != Vector4::ZERO,
            Self::Vector4i(v) => *v != Vector4i::ZERO,
            Self::Plane(p) => *p != Plane::default(),
            Self::Quaternion(q) => *q != Quaternion::IDENTITY,
            Self::Aabb(b) => *b != Aabb::default(),
            Self::Basis(b) => **b != Basis::IDENTITY,
            Self::Transform3D(t) => **t != Transform3D::IDENTITY,
            Self::Projection(p) => **p != Projection::IDENTITY,
            Self::Color(c) => *c != Color::default(),
            Self::StringName(s) => !s.is_empty(),
            Self::NodePath(p) => !p.is_empty(),
            Self::Rid(r) => r.is_valid(),
            Self::Object(o) => !o.is_null(),
            Self::Callable(c) => !c.is_null(),
            Self::Signal(s) => !s.is_null(),
            Self::Dictionary(d) => !d.is_empty(),
            Self::Array(a) => !a.is_empty(),
            Self::PackedByteArray(a) => !a.is_empty(),
            Self::PackedInt32Array(a) => !a.is_empty(),
            Self::PackedInt64Array(a) => !a.is_empty(),
            Self::PackedFloat32Array(a) => !a.is_empty(),
            Self::PackedFloat64Array(a) => !a.is_empty(),
            Self::PackedStringArray(a) => !a.is_empty(),
            Self::PackedVector2Array(a) => !a.is_empty(),
            Self::PackedVector3Array(a) => !a.is_empty(),
            Self::PackedColorArray(a) => !a.is_empty(),
        }
    }

    /// Byte image of an inline aggregate, zero-padded to
    /// [`VARIANT_PAYLOAD_SIZE`]. `None` for every other kind.
    pub fn opaque_payload(&self) -> Option<OpaquePayload> {
        fn pad(bytes: &[u8]) -> OpaquePayload {
            let mut out = [0u8; VARIANT_PAYLOAD_SIZE];
            out[..bytes.len()].copy_from_slice(bytes);
            out
        }

        let payload = match self {
            Self::Vector2(v) => pad(bytemuck::bytes_of(&v.to_array())),
            Self::Vector2i(v) => pad(bytemuck::bytes_of(&v.to_array())),
            Self::Vector3(v) => pad(bytemuck::bytes_of(&v.to_array())),
            Self::Vector3i(v) => pad(bytemuck::bytes_of(&v.to_array())),
            Self::Vector4(v) => pad(bytemuck::bytes_of(&v.to_array())),
            Self::Vector4i(v) => pad(bytemuck::bytes_of(&v.to_array())),
            Self::Quaternion(q) => pad(bytemuck::bytes_of(&q.to_array())),
            Self::Transform2D(t) => pad(bytemuck::bytes_of(t)),
            Self::Rect2(r) => pad(bytemuck::bytes_of(r)),
            Self::Rect2i(r) => pad(bytemuck::bytes_of(r)),
            Self::Plane(p) => pad(bytemuck::bytes_of(p)),
            Self::Aabb(b) => pad(bytemuck::bytes_of(b)),
            Self::Color(c) => pad(bytemuck::bytes_of(c)),
            _ => return None,
        };
        Some(payload)
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Variant {
                /// Sign-extends (or reinterprets, for u64/usize) into i64
                #[inline]
                fn from(v: $t) -> Self {
                    Self::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f32> for Variant {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Self::String(TextBuffer::from_text(v))
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Self::String(TextBuffer::from(v))
    }
}

impl From<&String> for Variant {
    fn from(v: &String) -> Self {
        Self::String(TextBuffer::from_text(v))
    }
}

impl From<Cow<'_, str>> for Variant {
    fn from(v: Cow<'_, str>) -> Self {
        Self::String(TextBuffer::from(v.into_owned()))
    }
}

impl From<Box<str>> for Variant {
    fn from(v: Box<str>) -> Self {
        Self::String(TextBuffer::from(String::from(v)))
    }
}

impl<T: Into<Variant>> From<Option<T>> for Variant {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

macro_rules! impl_from_payload {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Variant {
                #[inline]
                fn from(v: $t) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_payload!(
    Vector2 => Vector2,
    Vector2i => Vector2i,
    Rect2 => Rect2,
    Rect2i => Rect2i,
    Vector3 => Vector3,
    Vector3i => Vector3i,
    Transform2D => Transform2D,
    Vector4 => Vector4,
    Vector4i => Vector4i,
    Plane => Plane,
    Quaternion => Quaternion,
    Aabb => Aabb,
    Color => Color,
    StringName => StringName,
    NodePath => NodePath,
    Rid => Rid,
    ObjectId => Object,
    Callable => Callable,
    Signal => Signal,
    Dictionary => Dictionary,
    Array => Array,
    Vec<i32> => PackedInt32Array,
    Vec<i64> => PackedInt64Array,
    Vec<f32> => PackedFloat32Array,
    Vec<f64> => PackedFloat64Array,
    Vec<String> => PackedStringArray,
    Vec<Vector2> => PackedVector2Array,
    Vec<Vector3> => PackedVector3Array,
    Vec<Color> => PackedColorArray,
);

impl From<Basis> for Variant {
    fn from(v: Basis) -> Self {
        Self::Basis(Box::new(v))
    }
}

impl From<Transform3D> for Variant {
    fn from(v: Transform3D) -> Self {
        Self::Transform3D(Box::new(v))
    }
}

impl From<Projection> for Variant {
    fn from(v: Projection) -> Self {
        Self::Projection(Box::new(v))
    }
}

impl From<Vec<u8>> for Variant {
    fn from(v: Vec<u8>) -> Self {
        Self::PackedByteArray(TextBuffer::from_bytes(v))
    }
}

impl From<&[u8]> for Variant {
    fn from(v: &[u8]) -> Self {
        Self::PackedByteArray(TextBuffer::from_bytes(v.to_vec()))
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(v: Vec<Variant>) -> Self {
        Self::Array(Array::from(v))
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<null>"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) => write!(f, "{}", s),
            Self::Vector2(v) => write!(f, "({}, {})", v.x, v.y),
            Self::Vector2i(v) => write!(f, "({}, {})", v.x, v.y),
            Self::Rect2(r) => write!(
                f,
                "[P: ({}, {}), S: ({}, {})]",
                r.position.x, r.position.y, r.size.x, r.size.y
            ),
            Self::Rect2i(r) => write!(
                f,
                "[P: ({}, {}), S: ({}, {})]",
                r.position.x, r.position.y, r.size.x, r.size.y
            ),
            Self::Vector3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::Vector3i(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::Vector4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Self::Vector4i(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Self::Quaternion(q) => write!(f, "({}, {}, {}, {})", q.x, q.y, q.z, q.w),
            Self::Plane(p) => write!(
                f,
                "[N: ({}, {}, {}), D: {}]",
                p.normal.x, p.normal.y, p.normal.z, p.d
            ),
            Self::Aabb(b) => write!(
                f,
                "[P: ({}, {}, {}), S: ({}, {}, {})]",
                b.position.x, b.position.y, b.position.z, b.size.x, b.size.y, b.size.z
            ),
            Self::Transform2D(t) => write!(f, "{}", t),
            Self::Basis(b) => write!(f, "{}", b),
            Self::Transform3D(t) => write!(f, "{}", t),
            Self::Projection(p) => write!(f, "{}", p),
            Self::Color(c) => write!(f, "{}", c),
            Self::StringName(s) => write!(f, "{}", s),
            Self::NodePath(p) => write!(f, "{}", p),
            Self::Rid(r) => write!(f, "{}", r),
            Self::Object(o) => write!(f, "{}", o),
            Self::Callable(c) => write!(f, "{}", c),
            Self::Signal(s) => write!(f, "{}", s),
            Self::Dictionary(d) => write!(f, "{}", d),
            Self::Array(a) => write!(f, "{}", a),
            Self::PackedByteArray(a) => write_list(f, a.as_bytes()),
            Self::PackedInt32Array(a) => write_list(f, a),
            Self::PackedInt64Array(a) => write_list(f, a),
            Self::PackedFloat32Array(a) => write_list(f, a),
            Self::PackedFloat64Array(a) => write_list(f, a),
            Self::PackedStringArray(a) => write_list(f, a),
            Self::PackedVector2Array(a) => {
                let items: Vec<Variant> = a.iter().copied().map(Variant::from).collect();
                write_list(f, &items)
            }
            Self::PackedVector3Array(a) => {
                let items: Vec<Variant> = a.iter().copied().map(Variant::from).collect();
                write_list(f, &items)
            }
            Self::PackedColorArray(a) => write_list(f, a),
        }
    }
}
