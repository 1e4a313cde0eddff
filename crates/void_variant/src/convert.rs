//! Conversion accessors
//!
//! Every accessor is a partial function over the active kind: it succeeds
//! only for the kind(s) it documents and otherwise returns
//! [`VariantError::TypeMismatch`]. There is no implicit coercion between
//! kinds. Integer accessors narrower than 64 bits truncate silently using
//! two's-complement, matching the host ABI.

use crate::collections::{Array, Dictionary};
use crate::error::{Result, VariantError};
use crate::handle::{Callable, NodePath, ObjectId, Rid, Signal, StringName};
use crate::kind::VariantType;
use crate::math::*;
use crate::text::TextBuffer;
use crate::variant::Variant;

impl Variant {
    #[inline]
    fn mismatch(&self, expected: VariantType) -> VariantError {
        VariantError::type_mismatch(expected, self.get_type())
    }

    /// Convert to any [`FromVariant`] target
    pub fn to<T: FromVariant>(&self) -> Result<T> {
        T::from_variant(self)
    }

    /// Bool kind only
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(VariantType::Bool)),
        }
    }

    /// Int kind only
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(i) => Ok(*i),
            _ => Err(self.mismatch(VariantType::Int)),
        }
    }

    /// Float kind only
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Self::Float(f) => Ok(*f),
            _ => Err(self.mismatch(VariantType::Float)),
        }
    }

    // ========== Text and bytes ==========

    /// Shared text buffer of a String or PackedByteArray
    pub fn as_text(&self) -> Result<&TextBuffer> {
        match self {
            Self::String(s) | Self::PackedByteArray(s) => Ok(s),
            _ => Err(self.mismatch(VariantType::String)),
        }
    }

    /// Mutable text buffer of a String or PackedByteArray
    pub fn as_text_mut(&mut self) -> Result<&mut TextBuffer> {
        match self {
            Self::String(s) | Self::PackedByteArray(s) => Ok(s),
            _ => Err(self.mismatch(VariantType::String)),
        }
    }

    /// Zero-copy text view of a String or PackedByteArray.
    ///
    /// Byte arrays holding non-UTF-8 data fail with
    /// [`VariantError::InvalidUtf8`].
    pub fn as_str(&self) -> Result<&str> {
        self.as_text()?
            .to_str()
            .map_err(|_| VariantError::InvalidUtf8 {
                found: self.get_type(),
            })
    }

    /// Read-only bytes of a PackedByteArray
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Self::PackedByteArray(bytes) => Ok(bytes.as_bytes()),
            _ => Err(self.mismatch(VariantType::PackedByteArray)),
        }
    }

    /// Writable span over a PackedByteArray's buffer, for in-place edits
    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8]> {
        match self {
            Self::PackedByteArray(bytes) => Ok(bytes.as_bytes_mut()),
            _ => Err(self.mismatch(VariantType::PackedByteArray)),
        }
    }

    /// Growable byte vector of a PackedByteArray
    pub fn byte_array_mut(&mut self) -> Result<&mut Vec<u8>> {
        match self {
            Self::PackedByteArray(bytes) => Ok(bytes.bytes_mut()),
            _ => Err(self.mismatch(VariantType::PackedByteArray)),
        }
    }

    // ========== Packed numeric arrays ==========

    pub fn f32_array(&self) -> Result<&Vec<f32>> {
        match self {
            Self::PackedFloat32Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedFloat32Array)),
        }
    }

    /// Live float32 sequence, mutable in place
    pub fn f32_array_mut(&mut self) -> Result<&mut Vec<f32>> {
        match self {
            Self::PackedFloat32Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedFloat32Array)),
        }
    }

    pub fn f64_array(&self) -> Result<&Vec<f64>> {
        match self {
            Self::PackedFloat64Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedFloat64Array)),
        }
    }

    /// Live float64 sequence, mutable in place
    pub fn f64_array_mut(&mut self) -> Result<&mut Vec<f64>> {
        match self {
            Self::PackedFloat64Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedFloat64Array)),
        }
    }

    pub fn i32_array(&self) -> Result<&Vec<i32>> {
        match self {
            Self::PackedInt32Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedInt32Array)),
        }
    }

    pub fn i64_array(&self) -> Result<&Vec<i64>> {
        match self {
            Self::PackedInt64Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedInt64Array)),
        }
    }

    pub fn string_array(&self) -> Result<&Vec<String>> {
        match self {
            Self::PackedStringArray(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedStringArray)),
        }
    }

    pub fn vector2_array(&self) -> Result<&Vec<Vector2>> {
        match self {
            Self::PackedVector2Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedVector2Array)),
        }
    }

    pub fn vector3_array(&self) -> Result<&Vec<Vector3>> {
        match self {
            Self::PackedVector3Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedVector3Array)),
        }
    }

    pub fn color_array(&self) -> Result<&Vec<Color>> {
        match self {
            Self::PackedColorArray(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::PackedColorArray)),
        }
    }

    // ========== Containers ==========

    pub fn as_array(&self) -> Result<&Array> {
        match self {
            Self::Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Self::Array(a) => Ok(a),
            _ => Err(self.mismatch(VariantType::Array)),
        }
    }

    pub fn as_dictionary(&self) -> Result<&Dictionary> {
        match self {
            Self::Dictionary(d) => Ok(d),
            _ => Err(self.mismatch(VariantType::Dictionary)),
        }
    }

    pub fn as_dictionary_mut(&mut self) -> Result<&mut Dictionary> {
        match self {
            Self::Dictionary(d) => Ok(d),
            _ => Err(self.mismatch(VariantType::Dictionary)),
        }
    }

    // ========== Handles ==========

    pub fn as_string_name(&self) -> Result<&StringName> {
        match self {
            Self::StringName(s) => Ok(s),
            _ => Err(self.mismatch(VariantType::StringName)),
        }
    }

    pub fn as_node_path(&self) -> Result<&NodePath> {
        match self {
            Self::NodePath(p) => Ok(p),
            _ => Err(self.mismatch(VariantType::NodePath)),
        }
    }

    pub fn as_callable(&self) -> Result<&Callable> {
        match self {
            Self::Callable(c) => Ok(c),
            _ => Err(self.mismatch(VariantType::Callable)),
        }
    }

    pub fn as_signal(&self) -> Result<&Signal> {
        match self {
            Self::Signal(s) => Ok(s),
            _ => Err(self.mismatch(VariantType::Signal)),
        }
    }

    pub fn as_object(&self) -> Result<ObjectId> {
        match self {
            Self::Object(o) => Ok(*o),
            _ => Err(self.mismatch(VariantType::Object)),
        }
    }

    pub fn as_rid(&self) -> Result<Rid> {
        match self {
            Self::Rid(r) => Ok(*r),
            _ => Err(self.mismatch(VariantType::Rid)),
        }
    }
}

macro_rules! impl_math_accessors {
    ($($name:ident => $t:ty),* $(,)?) => {
        impl Variant {
            $(
                #[inline]
                pub fn $name(&self) -> Result<$t> {
                    <$t as FromVariant>::from_variant(self)
                }
            )*
        }
    };
}

impl_math_accessors!(
    as_vector2 => Vector2,
    as_vector2i => Vector2i,
    as_rect2 => Rect2,
    as_rect2i => Rect2i,
    as_vector3 => Vector3,
    as_vector3i => Vector3i,
    as_transform2d => Transform2D,
    as_vector4 => Vector4,
    as_vector4i => Vector4i,
    as_plane => Plane,
    as_quaternion => Quaternion,
    as_aabb => Aabb,
    as_basis => Basis,
    as_transform3d => Transform3D,
    as_projection => Projection,
    as_color => Color,
);

/// Fallible extraction of a typed value from a Variant
pub trait FromVariant: Sized {
    fn from_variant(variant: &Variant) -> Result<Self>;
}

impl FromVariant for Variant {
    fn from_variant(variant: &Variant) -> Result<Self> {
        Ok(variant.clone())
    }
}

impl FromVariant for bool {
    fn from_variant(variant: &Variant) -> Result<Self> {
        variant.as_bool()
    }
}

impl FromVariant for f64 {
    fn from_variant(variant: &Variant) -> Result<Self> {
        variant.as_float()
    }
}

impl FromVariant for f32 {
    fn from_variant(variant: &Variant) -> Result<Self> {
        variant.as_float().map(|f| f as f32)
    }
}

macro_rules! impl_from_variant_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromVariant for $t {
                /// Int kind only; truncates to the target width
                #[inline]
                fn from_variant(variant: &Variant) -> Result<Self> {
                    variant.as_int().map(|i| i as $t)
                }
            }
        )*
    };
}

impl_from_variant_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromVariant for String {
    fn from_variant(variant: &Variant) -> Result<Self> {
        variant.as_str().map(str::to_owned)
    }
}

macro_rules! impl_from_variant_copy {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromVariant for $t {
                fn from_variant(variant: &Variant) -> Result<Self> {
                    match variant {
                        Variant::$variant(v) => Ok(*v),
                        _ => Err(VariantError::type_mismatch(
                            VariantType::$variant,
                            variant.get_type(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_from_variant_copy!(
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
    Rid => Rid,
    ObjectId => Object,
);

macro_rules! impl_from_variant_boxed {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromVariant for $t {
                fn from_variant(variant: &Variant) -> Result<Self> {
                    match variant {
                        Variant::$variant(v) => Ok(**v),
                        _ => Err(VariantError::type_mismatch(
                            VariantType::$variant,
                            variant.get_type(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_from_variant_boxed!(
    Basis => Basis,
    Transform3D => Transform3D,
    Projection => Projection,
);

macro_rules! impl_from_variant_clone {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromVariant for $t {
                fn from_variant(variant: &Variant) -> Result<Self> {
                    match variant {
                        Variant::$variant(v) => Ok(v.clone()),
                        _ => Err(VariantError::type_mismatch(
                            VariantType::$variant,
                            variant.get_type(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_from_variant_clone!(
    StringName => StringName,
    NodePath => NodePath,
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

impl FromVariant for Vec<u8> {
    fn from_variant(variant: &Variant) -> Result<Self> {
        variant.as_bytes().map(<[u8]>::to_vec)
    }
}

macro_rules! impl_try_from_ref {
    ($($t:ty),* $(,)?) => {
        $(
            impl TryFrom<&Variant> for $t {
                type Error = VariantError;

                fn try_from(variant: &Variant) -> Result<Self> {
                    <$t as FromVariant>::from_variant(variant)
                }
            }

            impl TryFrom<Variant> for $t {
                type Error = VariantError;

                fn try_from(variant: Variant) -> Result<Self> {
                    <$t as FromVariant>::from_variant(&variant)
                }
            }
        )*
    };
}

impl_try_from_ref!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String,
);

impl<'a> TryFrom<&'a Variant> for &'a str {
    type Error = VariantError;

    fn try_from(variant: &'a Variant) -> Result<Self> {
        variant.as_str()
    }
}
