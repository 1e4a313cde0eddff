//! Operator evaluation
//!
//! [`Variant::evaluate`] is the single entry point for comparison,
//! arithmetic, bitwise, logical and containment operators. A `None` result
//! means the operator is undefined for that pairing of kinds (or for those
//! values, e.g. integer division by zero).
//!
//! Cross-kind comparisons are resolved before any per-kind rule:
//! equality is always false, inequality always true, and ordering compares
//! the kind discriminants.

use core::cmp::Ordering;
use core::fmt;

use crate::kind::VariantType;
use crate::math::*;
use crate::text::TextBuffer;
use crate::variant::Variant;

/// Operators understood by [`Variant::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Operator {
    // comparison
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    // mathematic
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    Positive,
    Module,
    Power,
    // bitwise
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitOr,
    BitXor,
    BitNegate,
    // logic
    And,
    Or,
    Xor,
    Not,
    // containment
    In,
}

impl Operator {
    pub const COUNT: usize = 25;

    pub const ALL: [Operator; Self::COUNT] = [
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Negate,
        Self::Positive,
        Self::Module,
        Self::Power,
        Self::ShiftLeft,
        Self::ShiftRight,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::BitNegate,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Not,
        Self::In,
    ];

    /// Unary operators ignore their right operand
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Negate | Self::Positive | Self::BitNegate | Self::Not)
    }

    /// Equality and ordering operators
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::Less
                | Self::LessEqual
                | Self::Greater
                | Self::GreaterEqual
        )
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Negate => "unary-",
            Self::Positive => "unary+",
            Self::Module => "%",
            Self::Power => "**",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitNegate => "~",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::In => "in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Variant {
    /// Evaluate `a op b`.
    ///
    /// Returns `None` when the operator is not defined for the operands.
    /// Unary operators read only `a`.
    pub fn evaluate(op: Operator, a: &Variant, b: &Variant) -> Option<Variant> {
        let (ka, kb) = (a.get_type(), b.get_type());

        if ka != kb && op.is_comparison() {
            let result = match op {
                Operator::Equal => false,
                Operator::NotEqual => true,
                Operator::Less => ka < kb,
                Operator::LessEqual => ka <= kb,
                Operator::Greater => ka > kb,
                _ => ka >= kb,
            };
            return Some(Variant::Bool(result));
        }

        match op {
            Operator::Equal => Some(Variant::Bool(same_kind_eq(a, b))),
            Operator::NotEqual => Some(Variant::Bool(!same_kind_eq(a, b))),
            Operator::Less => ordering(a, b).map(|o| Variant::Bool(o == Some(Ordering::Less))),
            Operator::LessEqual => ordering(a, b)
                .map(|o| Variant::Bool(matches!(o, Some(Ordering::Less | Ordering::Equal)))),
            Operator::Greater => {
                ordering(a, b).map(|o| Variant::Bool(o == Some(Ordering::Greater)))
            }
            Operator::GreaterEqual => ordering(a, b)
                .map(|o| Variant::Bool(matches!(o, Some(Ordering::Greater | Ordering::Equal)))),

            Operator::Add => add(a, b),
            Operator::Subtract => subtract(a, b),
            Operator::Multiply => multiply(a, b),
            Operator::Divide => divide(a, b),
            Operator::Module => module(a, b),
            Operator::Power => power(a, b),
            Operator::Negate => negate(a),
            Operator::Positive => positive(a),

            Operator::ShiftLeft => match (a, b) {
                (Variant::Int(x), Variant::Int(y)) => {
                    shift_amount(*y).map(|s| Variant::Int(x << s))
                }
                _ => None,
            },
            Operator::ShiftRight => match (a, b) {
                (Variant::Int(x), Variant::Int(y)) => {
                    shift_amount(*y).map(|s| Variant::Int(x >> s))
                }
                _ => None,
            },
            Operator::BitAnd => int_pair(a, b).map(|(x, y)| Variant::Int(x & y)),
            Operator::BitOr => int_pair(a, b).map(|(x, y)| Variant::Int(x | y)),
            Operator::BitXor => int_pair(a, b).map(|(x, y)| Variant::Int(x ^ y)),
            Operator::BitNegate => match a {
                Variant::Int(x) => Some(Variant::Int(!x)),
                _ => None,
            },

            Operator::And => Some(Variant::Bool(a.is_truthy() && b.is_truthy())),
            Operator::Or => Some(Variant::Bool(a.is_truthy() || b.is_truthy())),
            Operator::Xor => Some(Variant::Bool(a.is_truthy() != b.is_truthy())),
            Operator::Not => Some(Variant::Bool(!a.is_truthy())),

            Operator::In => contains(b, a).map(Variant::Bool),
        }
    }

    /// [`Variant::evaluate`] with the invalid case folded into `false`.
    /// Non-bool results also read as `false`.
    pub fn evaluate_bool(op: Operator, a: &Variant, b: &Variant) -> bool {
        matches!(Self::evaluate(op, a, b), Some(Variant::Bool(true)))
    }
}

impl PartialEq for Variant {
    /// Same kind and structurally equal payloads. `Int(1) != Float(1.0)`.
    fn eq(&self, other: &Self) -> bool {
        self.get_type() == other.get_type() && same_kind_eq(self, other)
    }
}

impl PartialOrd for Variant {
    /// Kinds order by discriminant; values of one kind by their natural
    /// order. Kinds without an order compare only for equality.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (ka, kb) = (self.get_type(), other.get_type());
        if ka != kb {
            return Some(ka.cmp(&kb));
        }
        match ordering(self, other) {
            Some(order) => order,
            None if same_kind_eq(self, other) => Some(Ordering::Equal),
            None => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Structural equality for two values of the same kind
fn same_kind_eq(a: &Variant, b: &Variant) -> bool {
    use Variant as V;
    match (a, b) {
        (V::Nil, V::Nil) => true,
        (V::Bool(x), V::Bool(y)) => x == y,
        (V::Int(x), V::Int(y)) => x == y,
        (V::Float(x), V::Float(y)) => x == y,
        (V::String(x), V::String(y)) => x == y,
        (V::Vector2(x), V::Vector2(y)) => x == y,
        (V::Vector2i(x), V::Vector2i(y)) => x == y,
        (V::Rect2(x), V::Rect2(y)) => x == y,
        (V::Rect2i(x), V::Rect2i(y)) => x == y,
        (V::Vector3(x), V::Vector3(y)) => x == y,
        (V::Vector3i(x), V::Vector3i(y)) => x == y,
        (V::Transform2D(x), V::Transform2D(y)) => x == y,
        (V::Vector4(x), V::Vector4(y)) => x == y,
        (V::Vector4i(x), V::Vector4i(y)) => x == y,
        (V::Plane(x), V::Plane(y)) => x == y,
        (V::Quaternion(x), V::Quaternion(y)) => x == y,
        (V::Aabb(x), V::Aabb(y)) => x == y,
        (V::Basis(x), V::Basis(y)) => x == y,
        (V::Transform3D(x), V::Transform3D(y)) => x == y,
        (V::Projection(x), V::Projection(y)) => x == y,
        (V::Color(x), V::Color(y)) => x == y,
        (V::StringName(x), V::StringName(y)) => x == y,
        (V::NodePath(x), V::NodePath(y)) => x == y,
        (V::Rid(x), V::Rid(y)) => x == y,
        (V::Object(x), V::Object(y)) => x == y,
        (V::Callable(x), V::Callable(y)) => x == y,
        (V::Signal(x), V::Signal(y)) => x == y,
        (V::Dictionary(x), V::Dictionary(y)) => x == y,
        (V::Array(x), V::Array(y)) => x == y,
        (V::PackedByteArray(x), V::PackedByteArray(y)) => x == y,
        (V::PackedInt32Array(x), V::PackedInt32Array(y)) => x == y,
        (V::PackedInt64Array(x), V::PackedInt64Array(y)) => x == y,
        (V::PackedFloat32Array(x), V::PackedFloat32Array(y)) => x == y,
        (V::PackedFloat64Array(x), V::PackedFloat64Array(y)) => x == y,
        (V::PackedStringArray(x), V::PackedStringArray(y)) => x == y,
        (V::PackedVector2Array(x), V::PackedVector2Array(y)) => x == y,
        (V::PackedVector3Array(x), V::PackedVector3Array(y)) => x == y,
        (V::PackedColorArray(x), V::PackedColorArray(y)) => x == y,
        _ => false,
    }
}

/// Natural order within a kind.
///
/// Outer `None`: the kind has no order. Inner `None`: the values are
/// unordered (NaN).
pub(crate) fn ordering(a: &Variant, b: &Variant) -> Option<Option<Ordering>> {
    use Variant as V;
    let order = match (a, b) {
        (V::Bool(x), V::Bool(y)) => x.partial_cmp(y),
        (V::Int(x), V::Int(y)) => x.partial_cmp(y),
        (V::Float(x), V::Float(y)) => x.partial_cmp(y),
        (V::String(x), V::String(y)) => x.as_bytes().partial_cmp(y.as_bytes()),
        (V::Vector2(x), V::Vector2(y)) => x.to_array().partial_cmp(&y.to_array()),
        (V::Vector2i(x), V::Vector2i(y)) => x.to_array().partial_cmp(&y.to_array()),
        (V::Vector3(x), V::Vector3(y)) => x.to_array().partial_cmp(&y.to_array()),
        (V::Vector3i(x), V::Vector3i(y)) => x.to_array().partial_cmp(&y.to_array()),
        (V::Vector4(x), V::Vector4(y)) => x.to_array().partial_cmp(&y.to_array()),
        (V::Vector4i(x), V::Vector4i(y)) => x.to_array().partial_cmp(&y.to_array()),
        (V::StringName(x), V::StringName(y)) => x.partial_cmp(y),
        (V::NodePath(x), V::NodePath(y)) => x.partial_cmp(y),
        (V::Rid(x), V::Rid(y)) => x.partial_cmp(y),
        (V::Object(x), V::Object(y)) => x.partial_cmp(y),
        (V::Array(x), V::Array(y)) => x.partial_cmp(y),
        _ => return None,
    };
    Some(order)
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

fn int_pair(a: &Variant, b: &Variant) -> Option<(i64, i64)> {
    match (a, b) {
        (Variant::Int(x), Variant::Int(y)) => Some((*x, *y)),
        _ => None,
    }
}

/// Both operands as floats when at least one is a float and the other is
/// an int or float
fn float_pair(a: &Variant, b: &Variant) -> Option<(f64, f64)> {
    match (a, b) {
        (Variant::Float(x), Variant::Float(y)) => Some((*x, *y)),
        (Variant::Int(x), Variant::Float(y)) => Some((*x as f64, *y)),
        (Variant::Float(x), Variant::Int(y)) => Some((*x, *y as f64)),
        _ => None,
    }
}

/// Scalar operand usable against a float vector
fn scalar(v: &Variant) -> Option<f32> {
    match v {
        Variant::Int(i) => Some(*i as f32),
        Variant::Float(f) => Some(*f as f32),
        _ => None,
    }
}

fn shift_amount(y: i64) -> Option<u32> {
    if (0..64).contains(&y) {
        Some(y as u32)
    } else {
        None
    }
}

fn zip_i32<const N: usize>(a: [i32; N], b: [i32; N], f: impl Fn(i32, i32) -> i32) -> [i32; N] {
    core::array::from_fn(|i| f(a[i], b[i]))
}

fn checked_zip_i32<const N: usize>(
    a: [i32; N],
    b: [i32; N],
    f: impl Fn(i32, i32) -> Option<i32>,
) -> Option<[i32; N]> {
    let mut out = [0; N];
    for i in 0..N {
        out[i] = f(a[i], b[i])?;
    }
    Some(out)
}

fn concat<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

fn add(a: &Variant, b: &Variant) -> Option<Variant> {
    use Variant as V;
    if let Some((x, y)) = int_pair(a, b) {
        return Some(V::Int(x.wrapping_add(y)));
    }
    if let Some((x, y)) = float_pair(a, b) {
        return Some(V::Float(x + y));
    }
    let result = match (a, b) {
        (V::String(x), V::String(y)) => V::String(x.concat(y)),
        (V::Vector2(x), V::Vector2(y)) => V::Vector2(*x + *y),
        (V::Vector3(x), V::Vector3(y)) => V::Vector3(*x + *y),
        (V::Vector4(x), V::Vector4(y)) => V::Vector4(*x + *y),
        (V::Vector2i(x), V::Vector2i(y)) => {
            V::Vector2i(IVec2::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_add)))
        }
        (V::Vector3i(x), V::Vector3i(y)) => {
            V::Vector3i(IVec3::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_add)))
        }
        (V::Vector4i(x), V::Vector4i(y)) => {
            V::Vector4i(IVec4::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_add)))
        }
        (V::Quaternion(x), V::Quaternion(y)) => V::Quaternion(*x + *y),
        (V::Color(x), V::Color(y)) => V::Color(Color::from(x.to_vec4() + y.to_vec4())),
        (V::Array(x), V::Array(y)) => V::Array(x.concat(y)),
        (V::PackedByteArray(x), V::PackedByteArray(y)) => V::PackedByteArray(x.concat(y)),
        (V::PackedInt32Array(x), V::PackedInt32Array(y)) => V::PackedInt32Array(concat(x, y)),
        (V::PackedInt64Array(x), V::PackedInt64Array(y)) => V::PackedInt64Array(concat(x, y)),
        (V::PackedFloat32Array(x), V::PackedFloat32Array(y)) => {
            V::PackedFloat32Array(concat(x, y))
        }
        (V::PackedFloat64Array(x), V::PackedFloat64Array(y)) => {
            V::PackedFloat64Array(concat(x, y))
        }
        (V::PackedStringArray(x), V::PackedStringArray(y)) => V::PackedStringArray(concat(x, y)),
        (V::PackedVector2Array(x), V::PackedVector2Array(y)) => {
            V::PackedVector2Array(concat(x, y))
        }
        (V::PackedVector3Array(x), V::PackedVector3Array(y)) => {
            V::PackedVector3Array(concat(x, y))
        }
        (V::PackedColorArray(x), V::PackedColorArray(y)) => V::PackedColorArray(concat(x, y)),
        _ => return None,
    };
    Some(result)
}

fn subtract(a: &Variant, b: &Variant) -> Option<Variant> {
    use Variant as V;
    if let Some((x, y)) = int_pair(a, b) {
        return Some(V::Int(x.wrapping_sub(y)));
    }
    if let Some((x, y)) = float_pair(a, b) {
        return Some(V::Float(x - y));
    }
    let result = match (a, b) {
        (V::Vector2(x), V::Vector2(y)) => V::Vector2(*x - *y),
        (V::Vector3(x), V::Vector3(y)) => V::Vector3(*x - *y),
        (V::Vector4(x), V::Vector4(y)) => V::Vector4(*x - *y),
        (V::Vector2i(x), V::Vector2i(y)) => {
            V::Vector2i(IVec2::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_sub)))
        }
        (V::Vector3i(x), V::Vector3i(y)) => {
            V::Vector3i(IVec3::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_sub)))
        }
        (V::Vector4i(x), V::Vector4i(y)) => {
            V::Vector4i(IVec4::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_sub)))
        }
        (V::Quaternion(x), V::Quaternion(y)) => V::Quaternion(*x - *y),
        (V::Color(x), V::Color(y)) => V::Color(Color::from(x.to_vec4() - y.to_vec4())),
        _ => return None,
    };
    Some(result)
}

fn multiply(a: &Variant, b: &Variant) -> Option<Variant> {
    use Variant as V;
    if let Some((x, y)) = int_pair(a, b) {
        return Some(V::Int(x.wrapping_mul(y)));
    }
    if let Some((x, y)) = float_pair(a, b) {
        return Some(V::Float(x * y));
    }
    // transforms and quaternions bind before the vector-by-scalar arms
    let result = match (a, b) {
        (V::Quaternion(x), V::Quaternion(y)) => V::Quaternion(*x * *y),
        (V::Quaternion(q), V::Vector3(v)) => V::Vector3(*q * *v),
        (V::Quaternion(q), s) | (s, V::Quaternion(q)) => V::Quaternion(*q * scalar(s)?),

        (V::Color(x), V::Color(y)) => V::Color(Color::from(x.to_vec4() * y.to_vec4())),
        (V::Color(c), s) | (s, V::Color(c)) => V::Color(Color::from(c.to_vec4() * scalar(s)?)),

        (V::Transform2D(x), V::Transform2D(y)) => V::Transform2D(*x * *y),
        (V::Transform2D(t), V::Vector2(v)) => V::Vector2(t.transform_point(*v)),
        (V::Basis(x), V::Basis(y)) => V::Basis(Box::new(**x * **y)),
        (V::Basis(m), V::Vector3(v)) => V::Vector3(**m * *v),
        (V::Transform3D(x), V::Transform3D(y)) => V::Transform3D(Box::new(**x * **y)),
        (V::Transform3D(t), V::Vector3(v)) => V::Vector3(t.transform_point3(*v)),
        (V::Projection(x), V::Projection(y)) => V::Projection(Box::new(**x * **y)),
        (V::Projection(m), V::Vector4(v)) => V::Vector4(**m * *v),

        (V::Vector2(x), V::Vector2(y)) => V::Vector2(*x * *y),
        (V::Vector3(x), V::Vector3(y)) => V::Vector3(*x * *y),
        (V::Vector4(x), V::Vector4(y)) => V::Vector4(*x * *y),
        (V::Vector2(x), s) | (s, V::Vector2(x)) => V::Vector2(*x * scalar(s)?),
        (V::Vector3(x), s) | (s, V::Vector3(x)) => V::Vector3(*x * scalar(s)?),
        (V::Vector4(x), s) | (s, V::Vector4(x)) => V::Vector4(*x * scalar(s)?),

        (V::Vector2i(x), V::Vector2i(y)) => {
            V::Vector2i(IVec2::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_mul)))
        }
        (V::Vector3i(x), V::Vector3i(y)) => {
            V::Vector3i(IVec3::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_mul)))
        }
        (V::Vector4i(x), V::Vector4i(y)) => {
            V::Vector4i(IVec4::from_array(zip_i32(x.to_array(), y.to_array(), i32::wrapping_mul)))
        }
        (V::Vector2i(x), V::Int(s)) | (V::Int(s), V::Vector2i(x)) => {
            V::Vector2i(IVec2::from_array(x.to_array().map(|c| c.wrapping_mul(*s as i32))))
        }
        (V::Vector3i(x), V::Int(s)) | (V::Int(s), V::Vector3i(x)) => {
            V::Vector3i(IVec3::from_array(x.to_array().map(|c| c.wrapping_mul(*s as i32))))
        }
        (V::Vector4i(x), V::Int(s)) | (V::Int(s), V::Vector4i(x)) => {
            V::Vector4i(IVec4::from_array(x.to_array().map(|c| c.wrapping_mul(*s as i32))))
        }
        (V::Vector2i(x), V::Float(s)) | (V::Float(s), V::Vector2i(x)) => {
            V::Vector2(x.as_vec2() * *s as f32)
        }
        (V::Vector3i(x), V::Float(s)) | (V::Float(s), V::Vector3i(x)) => {
            V::Vector3(x.as_vec3() * *s as f32)
        }
        (V::Vector4i(x), V::Float(s)) | (V::Float(s), V::Vector4i(x)) => {
            V::Vector4(x.as_vec4() * *s as f32)
        }

        _ => return None,
    };
    Some(result)
}

fn divide(a: &Variant, b: &Variant) -> Option<Variant> {
    use Variant as V;
    if let Some((x, y)) = int_pair(a, b) {
        return (y != 0).then(|| V::Int(x.wrapping_div(y)));
    }
    if let Some((x, y)) = float_pair(a, b) {
        return Some(V::Float(x / y));
    }
    let result = match (a, b) {
        (V::Vector2(x), V::Vector2(y)) => V::Vector2(*x / *y),
        (V::Vector3(x), V::Vector3(y)) => V::Vector3(*x / *y),
        (V::Vector4(x), V::Vector4(y)) => V::Vector4(*x / *y),
        (V::Vector2(x), s) => V::Vector2(*x / scalar(s)?),
        (V::Vector3(x), s) => V::Vector3(*x / scalar(s)?),
        (V::Vector4(x), s) => V::Vector4(*x / scalar(s)?),

        (V::Vector2i(x), V::Vector2i(y)) => V::Vector2i(IVec2::from_array(checked_zip_i32(
            x.to_array(),
            y.to_array(),
            nonzero_div,
        )?)),
        (V::Vector3i(x), V::Vector3i(y)) => V::Vector3i(IVec3::from_array(checked_zip_i32(
            x.to_array(),
            y.to_array(),
            nonzero_div,
        )?)),
        (V::Vector4i(x), V::Vector4i(y)) => V::Vector4i(IVec4::from_array(checked_zip_i32(
            x.to_array(),
            y.to_array(),
            nonzero_div,
        )?)),
        (V::Vector2i(x), V::Int(s)) => {
            V::Vector2i(IVec2::from_array(checked_zip_i32(x.to_array(), [narrow_divisor(*s)?; 2], nonzero_div)?))
        }
        (V::Vector3i(x), V::Int(s)) => {
            V::Vector3i(IVec3::from_array(checked_zip_i32(x.to_array(), [narrow_divisor(*s)?; 3], nonzero_div)?))
        }
        (V::Vector4i(x), V::Int(s)) => {
            V::Vector4i(IVec4::from_array(checked_zip_i32(x.to_array(), [narrow_divisor(*s)?; 4], nonzero_div)?))
        }

        (V::Quaternion(q), s) => V::Quaternion(*q / scalar(s)?),
        (V::Color(x), V::Color(y)) => V::Color(Color::from(x.to_vec4() / y.to_vec4())),
        (V::Color(c), s) => V::Color(Color::from(c.to_vec4() / scalar(s)?)),
        _ => return None,
    };
    Some(result)
}

fn nonzero_div(x: i32, y: i32) -> Option<i32> {
    (y != 0).then(|| x.wrapping_div(y))
}

fn nonzero_rem(x: i32, y: i32) -> Option<i32> {
    (y != 0).then(|| x.wrapping_rem(y))
}

/// Int divisor for an integer vector; out of `i32` range is invalid
fn narrow_divisor(s: i64) -> Option<i32> {
    i32::try_from(s).ok()
}

fn module(a: &Variant, b: &Variant) -> Option<Variant> {
    use Variant as V;
    let result = match (a, b) {
        (V::Int(x), V::Int(y)) => {
            if *y == 0 {
                return None;
            }
            V::Int(x.wrapping_rem(*y))
        }
        (V::Vector2i(x), V::Vector2i(y)) => V::Vector2i(IVec2::from_array(checked_zip_i32(
            x.to_array(),
            y.to_array(),
            nonzero_rem,
        )?)),
        (V::Vector3i(x), V::Vector3i(y)) => V::Vector3i(IVec3::from_array(checked_zip_i32(
            x.to_array(),
            y.to_array(),
            nonzero_rem,
        )?)),
        (V::Vector4i(x), V::Vector4i(y)) => V::Vector4i(IVec4::from_array(checked_zip_i32(
            x.to_array(),
            y.to_array(),
            nonzero_rem,
        )?)),
        (V::Vector2i(x), V::Int(s)) => {
            V::Vector2i(IVec2::from_array(checked_zip_i32(x.to_array(), [narrow_divisor(*s)?; 2], nonzero_rem)?))
        }
        (V::Vector3i(x), V::Int(s)) => {
            V::Vector3i(IVec3::from_array(checked_zip_i32(x.to_array(), [narrow_divisor(*s)?; 3], nonzero_rem)?))
        }
        (V::Vector4i(x), V::Int(s)) => {
            V::Vector4i(IVec4::from_array(checked_zip_i32(x.to_array(), [narrow_divisor(*s)?; 4], nonzero_rem)?))
        }
        _ => return None,
    };
    Some(result)
}

fn power(a: &Variant, b: &Variant) -> Option<Variant> {
    if let Some((x, y)) = int_pair(a, b) {
        let exponent = u32::try_from(y).ok()?;
        return Some(Variant::Int(x.wrapping_pow(exponent)));
    }
    float_pair(a, b).map(|(x, y)| Variant::Float(x.powf(y)))
}

fn negate(a: &Variant) -> Option<Variant> {
    use Variant as V;
    let result = match a {
        V::Int(x) => V::Int(x.wrapping_neg()),
        V::Float(x) => V::Float(-x),
        V::Vector2(v) => V::Vector2(-*v),
        V::Vector3(v) => V::Vector3(-*v),
        V::Vector4(v) => V::Vector4(-*v),
        V::Vector2i(v) => V::Vector2i(IVec2::from_array(v.to_array().map(i32::wrapping_neg))),
        V::Vector3i(v) => V::Vector3i(IVec3::from_array(v.to_array().map(i32::wrapping_neg))),
        V::Vector4i(v) => V::Vector4i(IVec4::from_array(v.to_array().map(i32::wrapping_neg))),
        V::Quaternion(q) => V::Quaternion(-*q),
        V::Plane(p) => V::Plane(-*p),
        V::Color(c) => V::Color(Color::from(-c.to_vec4())),
        _ => return None,
    };
    Some(result)
}

fn positive(a: &Variant) -> Option<Variant> {
    match a.get_type() {
        VariantType::Int
        | VariantType::Float
        | VariantType::Vector2
        | VariantType::Vector2i
        | VariantType::Vector3
        | VariantType::Vector3i
        | VariantType::Vector4
        | VariantType::Vector4i
        | VariantType::Quaternion
        | VariantType::Plane
        | VariantType::Color => Some(a.clone()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Containment
// ---------------------------------------------------------------------------

/// Whether `container` holds `item`; `None` when the pairing is undefined
fn contains(container: &Variant, item: &Variant) -> Option<bool> {
    use Variant as V;
    let found = match (container, item) {
        (V::String(haystack), V::String(needle)) => haystack.contains(needle),
        (V::String(haystack), V::StringName(needle)) => {
            haystack.contains(&TextBuffer::from_text(needle.as_str()))
        }
        (V::Array(array), _) => array.contains(item),
        (V::Dictionary(dict), _) => dict.contains_key(item),
        (V::PackedByteArray(bytes), V::Int(x)) => {
            u8::try_from(*x).map_or(false, |byte| bytes.as_bytes().contains(&byte))
        }
        (V::PackedInt32Array(values), V::Int(x)) => {
            i32::try_from(*x).map_or(false, |x| values.contains(&x))
        }
        (V::PackedInt64Array(values), V::Int(x)) => values.contains(x),
        (V::PackedFloat32Array(values), V::Float(x)) => values.contains(&(*x as f32)),
        (V::PackedFloat64Array(values), V::Float(x)) => values.contains(x),
        (V::PackedStringArray(values), V::String(s)) => {
            values.iter().any(|v| v.as_bytes() == s.as_bytes())
        }
        (V::PackedVector2Array(values), V::Vector2(v)) => values.contains(v),
        (V::PackedVector3Array(values), V::Vector3(v)) => values.contains(v),
        (V::PackedColorArray(values), V::Color(c)) => values.contains(c),
        _ => return None,
    };
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{Array, Dictionary};

    fn eval(op: Operator, a: impl Into<Variant>, b: impl Into<Variant>) -> Option<Variant> {
        Variant::evaluate(op, &a.into(), &b.into())
    }

    #[test]
    fn test_cross_kind_comparisons_short_circuit() {
        assert_eq!(eval(Operator::Equal, 1, 1.0), Some(Variant::Bool(false)));
        assert_eq!(eval(Operator::NotEqual, 1, 1.0), Some(Variant::Bool(true)));
        // Int sorts before String regardless of payload
        assert_eq!(eval(Operator::Less, 1000, "a"), Some(Variant::Bool(true)));
        assert_eq!(eval(Operator::Greater, 1000, "a"), Some(Variant::Bool(false)));
        assert_eq!(eval(Operator::GreaterEqual, "a", 1000), Some(Variant::Bool(true)));
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(eval(Operator::Add, 2, 3), Some(Variant::Int(5)));
        assert_eq!(eval(Operator::Add, i64::MAX, 1), Some(Variant::Int(i64::MIN)));
        assert_eq!(eval(Operator::Multiply, i64::MAX, 2), Some(Variant::Int(-2)));
        assert_eq!(eval(Operator::Divide, 7, 2), Some(Variant::Int(3)));
        assert_eq!(eval(Operator::Module, -7, 2), Some(Variant::Int(-1)));
        assert_eq!(eval(Operator::Negate, i64::MIN, Variant::Nil), Some(Variant::Int(i64::MIN)));
    }

    #[test]
    fn test_integer_division_by_zero_is_invalid() {
        assert_eq!(eval(Operator::Divide, 1, 0), None);
        assert_eq!(eval(Operator::Module, 1, 0), None);
        assert_eq!(eval(Operator::Divide, Vector2i::new(4, 4), Vector2i::new(2, 0)), None);
        assert_eq!(eval(Operator::Divide, 1.0, 0.0), Some(Variant::Float(f64::INFINITY)));
    }

    #[test]
    fn test_integer_vector_divisor_out_of_range_is_invalid() {
        let v = Vector2i::new(8, 8);
        // low 32 bits are zero
        assert_eq!(eval(Operator::Divide, v, 1i64 << 32), None);
        assert_eq!(eval(Operator::Module, v, 1i64 << 32), None);
        // low 32 bits read as 2
        assert_eq!(eval(Operator::Divide, v, (1i64 << 32) + 2), None);
        assert_eq!(eval(Operator::Divide, Vector3i::ONE, i64::MIN), None);
        assert_eq!(eval(Operator::Module, Vector4i::splat(5), -(1i64 << 40)), None);

        assert_eq!(eval(Operator::Divide, v, 2), Some(Variant::from(Vector2i::new(4, 4))));
        assert_eq!(
            eval(Operator::Divide, v, i64::from(i32::MIN)),
            Some(Variant::from(Vector2i::ZERO))
        );
        assert_eq!(eval(Operator::Module, Vector3i::splat(7), 4), Some(Variant::from(Vector3i::splat(3))));
    }

    #[test]
    fn test_mixed_numeric_promotes_to_float() {
        assert_eq!(eval(Operator::Add, 1, 0.5), Some(Variant::Float(1.5)));
        assert_eq!(eval(Operator::Multiply, 0.5, 4), Some(Variant::Float(2.0)));
        assert_eq!(eval(Operator::Power, 2, 10), Some(Variant::Int(1024)));
        assert_eq!(eval(Operator::Power, 2, -1), None);
        assert_eq!(eval(Operator::Power, 4.0, 0.5), Some(Variant::Float(2.0)));
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(eval(Operator::ShiftLeft, 1, 4), Some(Variant::Int(16)));
        assert_eq!(eval(Operator::ShiftRight, -16, 2), Some(Variant::Int(-4)));
        assert_eq!(eval(Operator::ShiftLeft, 1, 64), None);
        assert_eq!(eval(Operator::ShiftLeft, 1, -1), None);
        assert_eq!(eval(Operator::BitAnd, 0b1100, 0b1010), Some(Variant::Int(0b1000)));
        assert_eq!(eval(Operator::BitOr, 0b1100, 0b1010), Some(Variant::Int(0b1110)));
        assert_eq!(eval(Operator::BitXor, 0b1100, 0b1010), Some(Variant::Int(0b0110)));
        assert_eq!(eval(Operator::BitNegate, 0, Variant::Nil), Some(Variant::Int(-1)));
        assert_eq!(eval(Operator::BitAnd, "a", "b"), None);
    }

    #[test]
    fn test_logical_uses_truthiness() {
        assert_eq!(eval(Operator::And, 1, "x"), Some(Variant::Bool(true)));
        assert_eq!(eval(Operator::Or, 0, ""), Some(Variant::Bool(false)));
        assert_eq!(eval(Operator::Xor, true, 0), Some(Variant::Bool(true)));
        assert_eq!(eval(Operator::Not, Variant::Nil, Variant::Nil), Some(Variant::Bool(true)));
    }

    #[test]
    fn test_string_operators() {
        assert_eq!(eval(Operator::Add, "foo", "bar"), Some(Variant::from("foobar")));
        assert_eq!(eval(Operator::Less, "a", "b"), Some(Variant::Bool(true)));
        assert_eq!(eval(Operator::In, "oba", "foobar"), Some(Variant::Bool(true)));
        assert_eq!(eval(Operator::Subtract, "foo", "o"), None);
    }

    #[test]
    fn test_vector_math_delegates() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(eval(Operator::Add, a, b), Some(Variant::from(Vector2::new(4.0, 6.0))));
        assert_eq!(eval(Operator::Multiply, a, 2.0), Some(Variant::from(Vector2::new(2.0, 4.0))));
        assert_eq!(eval(Operator::Multiply, 2, a), Some(Variant::from(Vector2::new(2.0, 4.0))));
        assert_eq!(eval(Operator::Less, a, b), Some(Variant::Bool(true)));

        let q = Quaternion::IDENTITY;
        assert_eq!(eval(Operator::Multiply, q, Vector3::X), Some(Variant::from(Vector3::X)));

        let t = Transform2D::from_translation(Vector2::new(1.0, 1.0));
        assert_eq!(
            eval(Operator::Multiply, t, Vector2::ZERO),
            Some(Variant::from(Vector2::new(1.0, 1.0)))
        );
        assert_eq!(eval(Operator::Less, t, t), None);
        let moved = Transform2D::from_translation(Vector2::new(2.0, 2.0));
        assert_eq!(eval(Operator::Multiply, t, t), Some(Variant::from(moved)));
    }

    #[test]
    fn test_containment() {
        let array: Array = [1, 2, 3].into_iter().collect();
        assert_eq!(eval(Operator::In, 2, array.clone()), Some(Variant::Bool(true)));
        assert_eq!(eval(Operator::In, 2.0, array), Some(Variant::Bool(false)));

        let dict: Dictionary = [("key", 1)].into_iter().collect();
        assert_eq!(eval(Operator::In, "key", dict), Some(Variant::Bool(true)));

        assert_eq!(eval(Operator::In, 3, vec![1i32, 3]), Some(Variant::Bool(true)));
        assert_eq!(eval(Operator::In, 256, vec![0u8]), Some(Variant::Bool(false)));
        assert_eq!(eval(Operator::In, "3", vec![1i32, 3]), None);
    }

    #[test]
    fn test_packed_concat() {
        assert_eq!(
            eval(Operator::Add, vec![1.0f32], vec![2.0f32]),
            Some(Variant::from(vec![1.0f32, 2.0]))
        );
        assert_eq!(
            eval(Operator::Add, vec![1u8], vec![2u8]),
            Some(Variant::from(vec![1u8, 2]))
        );
    }

    #[test]
    fn test_nan_is_unordered_but_valid() {
        assert_eq!(eval(Operator::Less, f64::NAN, 1.0), Some(Variant::Bool(false)));
        assert_eq!(eval(Operator::GreaterEqual, f64::NAN, 1.0), Some(Variant::Bool(false)));
        assert_eq!(eval(Operator::Equal, f64::NAN, f64::NAN), Some(Variant::Bool(false)));
    }

    #[test]
    fn test_every_operator_has_a_symbol() {
        for op in Operator::ALL {
            assert!(!op.symbol().is_empty());
        }
        assert_eq!(Operator::ALL.len(), Operator::COUNT);
    }
}
