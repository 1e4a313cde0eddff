//! Fixed-size math aggregates
//!
//! Vectors, quaternions and matrices come straight from `glam`; the few
//! engine shapes glam lacks are plain `#[repr(C)]` structs. All of them are
//! opaque to the Variant core: arithmetic on them is delegated to glam.

use bytemuck::{Pod, Zeroable};
use core::fmt;

pub use glam::{Affine2, Affine3A, IVec2, IVec3, IVec4, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub type Vector2 = Vec2;
pub type Vector2i = IVec2;
pub type Vector3 = Vec3;
pub type Vector3i = IVec3;
pub type Vector4 = Vec4;
pub type Vector4i = IVec4;
pub type Quaternion = Quat;
pub type Basis = Mat3;
pub type Transform3D = Affine3A;
pub type Projection = Mat4;

/// 2D affine transform stored as three columns: basis `x`, basis `y` and
/// `origin`. Laid out as six floats so it stays inline; arithmetic goes
/// through [`Affine2`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Transform2D {
    pub x: Vec2,
    pub y: Vec2,
    pub origin: Vec2,
}

impl Transform2D {
    pub const IDENTITY: Self = Self::new(Vec2::X, Vec2::Y, Vec2::ZERO);

    pub const fn new(x: Vec2, y: Vec2, origin: Vec2) -> Self {
        Self { x, y, origin }
    }

    pub fn from_translation(origin: Vec2) -> Self {
        Self::new(Vec2::X, Vec2::Y, origin)
    }

    /// Columns `[x.x, x.y, y.x, y.y, origin.x, origin.y]`
    pub fn from_cols_array(m: &[f32; 6]) -> Self {
        Self::new(
            Vec2::new(m[0], m[1]),
            Vec2::new(m[2], m[3]),
            Vec2::new(m[4], m[5]),
        )
    }

    pub fn to_cols_array(&self) -> [f32; 6] {
        [self.x.x, self.x.y, self.y.x, self.y.y, self.origin.x, self.origin.y]
    }

    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_cols(self.x, self.y, self.origin)
    }

    pub fn from_affine(affine: Affine2) -> Self {
        Self::new(
            affine.matrix2.x_axis,
            affine.matrix2.y_axis,
            affine.translation,
        )
    }

    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.to_affine().transform_point2(point)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl core::ops::Mul for Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: Transform2D) -> Transform2D {
        Transform2D::from_affine(self.to_affine() * rhs.to_affine())
    }
}

impl From<Affine2> for Transform2D {
    fn from(affine: Affine2) -> Self {
        Self::from_affine(affine)
    }
}

impl From<Transform2D> for Affine2 {
    fn from(t: Transform2D) -> Self {
        t.to_affine()
    }
}

impl fmt::Display for Transform2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[X: ({}, {}), Y: ({}, {}), O: ({}, {})]",
            self.x.x, self.x.y, self.y.x, self.y.y, self.origin.x, self.origin.y
        )
    }
}

/// Axis-aligned 2D rectangle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rect2 {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect2 {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn end(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    pub fn has_point(&self, point: Vec2) -> bool {
        point.cmpge(self.position).all() && point.cmplt(self.end()).all()
    }
}

/// Axis-aligned integer rectangle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rect2i {
    pub position: IVec2,
    pub size: IVec2,
}

impl Rect2i {
    pub fn new(position: IVec2, size: IVec2) -> Self {
        Self { position, size }
    }

    pub fn end(&self) -> IVec2 {
        self.position + self.size
    }
}

/// Plane in Hessian normal form: `normal · p = d`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Signed distance from the plane to a point
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.d
    }
}

impl core::ops::Neg for Plane {
    type Output = Plane;

    fn neg(self) -> Plane {
        Plane::new(-self.normal, -self.d)
    }
}

/// Axis-aligned bounding box
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Aabb {
    pub position: Vec3,
    pub size: Vec3,
}

impl Aabb {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self { position, size }
    }

    pub fn end(&self) -> Vec3 {
        self.position + self.size
    }

    pub fn volume(&self) -> f32 {
        self.size.x * self.size.y * self.size.z
    }
}

/// Linear RGBA color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::from_array(self.to_array())
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::from_vec4(v)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        c.to_vec4()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
