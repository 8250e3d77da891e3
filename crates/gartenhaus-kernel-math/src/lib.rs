#![warn(missing_docs)]

//! Math types for the gartenhaus geometry kernel.
//!
//! nalgebra aliases for points and vectors, a homogeneous rigid
//! [`Transform`], and the [`Tolerance`] used when classifying points
//! against planes and discarding sliver cells.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space (millimetres).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit direction vector.
pub type Dir3 = Unit<Vector3<f64>>;

/// The three coordinate axes, used to name extents and rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The primary (layout) axis.
    X,
    /// The secondary axis.
    Y,
    /// The tertiary (vertical) axis.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
        }
    }
}

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        Self::rotation_about_axis(&Dir3::new_unchecked(Vec3::x()), angle)
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        Self::rotation_about_axis(&Dir3::new_unchecked(Vec3::y()), angle)
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        Self::rotation_about_axis(&Dir3::new_unchecked(Vec3::z()), angle)
    }

    /// Rotation about an axis through the origin by `angle` radians
    /// (right-hand rule, Rodrigues' formula).
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        // Snap the round-off of quarter turns so axis-aligned beams stay axis-aligned.
        for i in 0..3 {
            for j in 0..3 {
                let v = m[(i, j)];
                if v.abs() < 1e-15 {
                    m[(i, j)] = 0.0;
                }
            }
        }
        Self { matrix: m }
    }

    /// Rotation by `angle` radians about the axis through `pivot` with direction `axis`.
    pub fn rotation_about_point(pivot: &Point3, axis: &Dir3, angle: f64) -> Self {
        let to_origin = Self::translation(-pivot.x, -pivot.y, -pivot.z);
        let rot = Self::rotation_about_axis(axis, angle);
        let back = Self::translation(pivot.x, pivot.y, pivot.z);
        back.then(&rot).then(&to_origin)
    }

    /// Compose: `self * other`, i.e. `other` is applied first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Distance below which a point is considered on a plane, in mm.
    pub linear: f64,
    /// Volume below which a cell is treated as a sliver, in mm³.
    pub volume: f64,
}

impl Tolerance {
    /// Default kernel tolerances (1e-6 mm, 1e-6 mm³).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        volume: 1e-6,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
