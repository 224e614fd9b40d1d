//! Mathematical types for particle positions and the per-frame pose.
//!
//! `Vec3` is `#[repr(C)]` + `Pod` so a `&[Vec3]` can be handed to the
//! renderer as a flat `x,y,z` float buffer without copying.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - particle position, target, offset
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a vector with all three components equal
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    ///
    /// Both endpoints are exact for finite inputs.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let s = 1.0 - t;
        Self::new(
            self.x * s + other.x * t,
            self.y * s + other.y * t,
            self.z * s + other.z * t,
        )
    }

    /// Largest absolute component.
    #[must_use]
    pub fn max_abs(self) -> f32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// True if every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// 2D Vector - planar hand offset
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Row-major 3x3 matrix (rotation, optionally pre-multiplied by scale).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    /// Rows of the matrix.
    pub rows: [[f32; 3]; 3],
}

impl Mat3 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Rotation from Euler angles (radians) applied in `XYZ` order.
    ///
    /// Produces `Rx * Ry * Rz`, the same matrix a scene graph builds for an
    /// `XYZ` Euler triple.
    #[must_use]
    pub fn from_euler_xyz(x: f32, y: f32, z: f32) -> Self {
        let (b, a) = x.sin_cos();
        let (d, c) = y.sin_cos();
        let (f, e) = z.sin_cos();

        let ae = a * e;
        let af = a * f;
        let be = b * e;
        let bf = b * f;

        Self {
            rows: [
                [c * e, -c * f, d],
                [af + be * d, ae - bf * d, -b * c],
                [bf - ae * d, be + af * d, a * c],
            ],
        }
    }

    /// Multiplies every element by `s`.
    #[must_use]
    pub fn scaled(self, s: f32) -> Self {
        let mut rows = self.rows;
        for row in &mut rows {
            for v in row.iter_mut() {
                *v *= s;
            }
        }
        Self { rows }
    }

    /// Transforms a vector.
    #[inline]
    #[must_use]
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        let r = &self.rows;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rotation + uniform scale, rebuilt once per frame.
///
/// Scale is applied first, then rotation. Both are folded into one matrix so
/// the per-particle cost is a single `Mat3 * Vec3`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    /// Rotation with scale folded in.
    matrix: Mat3,
    /// Uniform scale factor.
    scale: f32,
}

impl RigidTransform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        matrix: Mat3::IDENTITY,
        scale: 1.0,
    };

    /// Creates a transform from Euler XYZ radians and a uniform scale.
    #[must_use]
    pub fn new(rotation: Vec3, scale: f32) -> Self {
        Self {
            matrix: Mat3::from_euler_xyz(rotation.x, rotation.y, rotation.z).scaled(scale),
            scale,
        }
    }

    /// Uniform scale factor.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Applies the transform to a point.
    #[inline]
    #[must_use]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.matrix.mul_vec3(v)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
