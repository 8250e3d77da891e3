//! Axis-aligned bounding boxes.
//!
//! Used both as the public bounding-box query of [`crate::Solid`] and as the
//! broad-phase filter that skips cell pairs which cannot intersect.

use gartenhaus_kernel_math::{Axis, Point3, Vec3};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut aabb = Self::empty();
        let mut any = false;
        for p in points {
            aabb.include_point(p);
            any = true;
        }
        any.then_some(aabb)
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Expand this AABB to include another box.
    pub fn include_box(&mut self, other: &Aabb3) {
        self.include_point(&other.min);
        self.include_point(&other.max);
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &Aabb3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Test if the interiors overlap by more than `tol` on every axis.
    ///
    /// Boxes that merely share a face cannot produce a boolean change.
    pub fn overlaps_interior(&self, other: &Aabb3, tol: f64) -> bool {
        Axis::ALL.iter().all(|&a| {
            let i = a.index();
            self.min[i] < other.max[i] - tol && self.max[i] > other.min[i] + tol
        })
    }

    /// Size along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Centre point.
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Size along `axis`.
    pub fn len(&self, axis: Axis) -> f64 {
        self.extent()[axis.index()]
    }

    /// Size along X.
    pub fn xlen(&self) -> f64 {
        self.len(Axis::X)
    }

    /// Size along Y.
    pub fn ylen(&self) -> f64 {
        self.len(Axis::Y)
    }

    /// Size along Z.
    pub fn zlen(&self) -> f64 {
        self.len(Axis::Z)
    }

    /// Axis with the strictly largest extent, if one exists.
    ///
    /// Ties (for example a cube) return `None`.
    pub fn longest_axis(&self) -> Option<Axis> {
        let e = self.extent();
        let (x, y, z) = (e.x, e.y, e.z);
        if x > y && x > z {
            Some(Axis::X)
        } else if y > x && y > z {
            Some(Axis::Y)
        } else if z > x && z > y {
            Some(Axis::Z)
        } else {
            None
        }
    }
}
