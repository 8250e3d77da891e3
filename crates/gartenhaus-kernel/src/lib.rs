#![warn(missing_docs)]

//! Solid-modeling kernel for the gartenhaus timber frame.
//!
//! Provides the [`Solid`] type: boxes and extruded rectangular profiles,
//! pure boolean cut/union, rigid transforms, bounding boxes, and export
//! to triangle meshes / STL.
//!
//! A solid is stored as a set of interior-disjoint convex cells, which is
//! exact for the planar, box-like members a timber frame is made of.
//!
//! # Example
//!
//! ```
//! use gartenhaus_kernel::Solid;
//!
//! let beam = Solid::centered_cube(95.0, 2000.0, 95.0);
//! let cutter = Solid::centered_cube(200.0, 95.0, 200.0);
//! let notched = beam.difference(&cutter);
//! let vol = notched.volume();
//! assert!((vol - 95.0 * 95.0 * (2000.0 - 95.0)).abs() < 1e-3);
//! ```

pub mod bbox;
pub mod cell;
pub mod error;
pub mod mesh;
pub mod profile;

pub use bbox::Aabb3;
pub use cell::{ConvexCell, Plane};
pub use error::{KernelError, Result};
pub use gartenhaus_kernel_math as math;
pub use mesh::TriangleMesh;
pub use profile::{Frame, Profile, Rect};

use gartenhaus_kernel_math::{Dir3, Point3, Tolerance, Transform, Vec3};

/// A 3D solid.
///
/// Every operation is pure: transforms and booleans return a new solid.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    cells: Vec<ConvexCell>,
}

impl Solid {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an empty solid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a box with corner at origin and dimensions `(sx, sy, sz)`.
    ///
    /// Non-positive dimensions give an empty solid.
    pub fn cube(sx: f64, sy: f64, sz: f64) -> Self {
        if sx <= 0.0 || sy <= 0.0 || sz <= 0.0 {
            return Self::empty();
        }
        let cells = ConvexCell::parallelepiped(
            Point3::origin(),
            Vec3::x() * sx,
            Vec3::y() * sy,
            Vec3::z() * sz,
        )
        .into_iter()
        .collect();
        Self { cells }
    }

    /// Create a box of size `(sx, sy, sz)` centred on the origin.
    pub fn centered_cube(sx: f64, sy: f64, sz: f64) -> Self {
        Self::cube(sx, sy, sz).translate(-sx / 2.0, -sy / 2.0, -sz / 2.0)
    }

    /// Sweep a planar profile placed in `frame` along the frame normal by `depth`.
    pub fn extrude(profile: &Profile, frame: &Frame, depth: f64) -> Self {
        if depth <= 0.0 {
            return Self::empty();
        }
        let cells = profile
            .rectangles()
            .iter()
            .filter_map(|r| frame.extrude_rect(r, depth))
            .collect();
        Self { cells }
    }

    // =========================================================================
    // CSG boolean operations
    // =========================================================================

    /// Boolean union (self ∪ other).
    ///
    /// Stored as `self + (other − self)` so the cells stay disjoint.
    pub fn union(&self, other: &Solid) -> Solid {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut cells = self.cells.clone();
        cells.extend(other.difference(self).cells);
        Solid { cells }
    }

    /// Boolean difference (self − other).
    pub fn difference(&self, other: &Solid) -> Solid {
        let tol = Tolerance::DEFAULT;
        let Some(tool_box) = other.bounding_box() else {
            return self.clone();
        };
        let mut cells = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            if !cell.aabb().overlaps_interior(&tool_box, tol.linear) {
                cells.push(cell.clone());
                continue;
            }
            let mut pieces = vec![cell.clone()];
            for tool in &other.cells {
                if pieces.is_empty() {
                    break;
                }
                pieces = pieces
                    .into_iter()
                    .flat_map(|p| p.subtract(tool, &tol))
                    .collect();
            }
            cells.extend(pieces);
        }
        Solid { cells }
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Translate the solid by `(x, y, z)`.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Solid {
        self.apply_transform(&Transform::translation(x, y, z))
    }

    /// Translate by vector.
    pub fn translate_vec(&self, v: Vec3) -> Solid {
        self.translate(v.x, v.y, v.z)
    }

    /// Rotate by angles in degrees around X, Y, Z (Z applied first, then Y, then X).
    pub fn rotate(&self, x_deg: f64, y_deg: f64, z_deg: f64) -> Solid {
        let rx = Transform::rotation_x(x_deg.to_radians());
        let ry = Transform::rotation_y(y_deg.to_radians());
        let rz = Transform::rotation_z(z_deg.to_radians());
        self.apply_transform(&rx.then(&ry).then(&rz))
    }

    /// Rotate by `angle_deg` degrees about the axis through `pivot` along `axis`.
    ///
    /// A zero axis leaves the solid unchanged.
    pub fn rotate_about(&self, pivot: Point3, axis: Vec3, angle_deg: f64) -> Solid {
        if axis.norm() < 1e-12 {
            return self.clone();
        }
        let axis = Dir3::new_normalize(axis);
        self.apply_transform(&Transform::rotation_about_point(
            &pivot,
            &axis,
            angle_deg.to_radians(),
        ))
    }

    /// Apply an arbitrary rigid transform.
    pub fn apply_transform(&self, t: &Transform) -> Solid {
        Solid {
            cells: self.cells.iter().map(|c| c.transformed(t)).collect(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if the solid has no geometry.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of convex cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// The convex cells making up the solid.
    pub fn cells(&self) -> &[ConvexCell] {
        &self.cells
    }

    /// Axis-aligned bounding box, or `None` for an empty solid.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        let mut iter = self.cells.iter();
        let mut aabb = *iter.next()?.aabb();
        for cell in iter {
            aabb.include_box(cell.aabb());
        }
        Some(aabb)
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        self.cells.iter().map(ConvexCell::volume).sum()
    }

    /// Tessellate into a triangle mesh (cell faces as fans).
    pub fn to_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        for face in self.cells.iter().flat_map(|c| c.faces()) {
            mesh.push_fan(face.iter().map(|p| [p.x as f32, p.y as f32, p.z as f32]));
        }
        mesh
    }

    /// Export to binary STL bytes.
    pub fn to_stl(&self) -> Result<Vec<u8>> {
        self.to_mesh().to_stl_bytes()
    }

    /// Write STL to file.
    pub fn write_stl(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path, self.to_stl()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn extent(s: &Solid) -> Vec3 {
        s.bounding_box().expect("non-empty").extent()
    }

    #[test]
    fn test_cube_creation() {
        let cube = Solid::cube(10.0, 20.0, 30.0);
        assert!(!cube.is_empty());
        assert_relative_eq!(cube.volume(), 6000.0, epsilon = 1e-9);
        let bb = cube.bounding_box().expect("non-empty");
        assert_eq!(bb.min, Point3::origin());
        assert_eq!(bb.max, Point3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_zero_size_cube_is_empty() {
        assert!(Solid::cube(0.0, 1.0, 1.0).is_empty());
        assert!(Solid::empty().bounding_box().is_none());
    }

    #[test]
    fn test_centered_cube() {
        let bb = Solid::centered_cube(2.0, 4.0, 6.0)
            .bounding_box()
            .expect("non-empty");
        assert_eq!(bb.center(), Point3::origin());
    }

    #[test]
    fn test_difference_through_slot() {
        let beam = Solid::centered_cube(100.0, 10.0, 10.0);
        let cutter = Solid::centered_cube(10.0, 20.0, 20.0);
        let cut = beam.difference(&cutter);
        assert_relative_eq!(cut.volume(), 90.0 * 100.0, epsilon = 1e-6);
        assert_relative_eq!(extent(&cut).x, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_difference_with_empty_tool() {
        let beam = Solid::cube(1.0, 1.0, 1.0);
        assert_eq!(beam.difference(&Solid::empty()).num_cells(), 1);
        assert!(Solid::empty().difference(&beam).is_empty());
    }

    #[test]
    fn test_union_volume_counts_overlap_once() {
        let a = Solid::cube(10.0, 10.0, 10.0);
        let b = Solid::cube(10.0, 10.0, 10.0).translate(5.0, 0.0, 0.0);
        let u = a.union(&b);
        assert_relative_eq!(u.volume(), 1500.0, epsilon = 1e-6);
        assert_relative_eq!(extent(&u).x, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_union_order_does_not_change_bounds() {
        let a = Solid::cube(10.0, 1.0, 1.0);
        let b = Solid::cube(1.0, 10.0, 1.0).translate(3.0, -2.0, 0.5);
        let c = Solid::cube(1.0, 1.0, 10.0).rotate(0.0, 8.0, 0.0);
        let abc = a.union(&b).union(&c);
        let cba = c.union(&b).union(&a);
        let (p, q) = (
            abc.bounding_box().expect("non-empty"),
            cba.bounding_box().expect("non-empty"),
        );
        assert!((p.min - q.min).norm() < 1e-9);
        assert!((p.max - q.max).norm() < 1e-9);
        assert_relative_eq!(abc.volume(), cba.volume(), epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_quarter_turn_swaps_extents() {
        let s = Solid::centered_cube(10.0, 20.0, 30.0).rotate(0.0, 0.0, 90.0);
        let e = extent(&s);
        assert_relative_eq!(e.x, 20.0, epsilon = 1e-9);
        assert_relative_eq!(e.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let s = Solid::cube(2.0, 1.0, 1.0);
        let r = s.rotate_about(Point3::new(2.0, 0.0, 0.0), Vec3::z(), 180.0);
        let bb = r.bounding_box().expect("non-empty");
        assert_relative_eq!(bb.min.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(bb.max.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(bb.min.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extrude_ring_profile() {
        let ring = Profile::rect(95.0, 95.0).with_hole(Rect::centered(40.0, 40.0));
        let s = Solid::extrude(&ring, &Frame::xz(), 30.0);
        assert_relative_eq!(s.volume(), (95.0 * 95.0 - 40.0 * 40.0) * 30.0, epsilon = 1e-6);
        let bb = s.bounding_box().expect("non-empty");
        assert_relative_eq!(bb.min.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(bb.max.y, 30.0, epsilon = 1e-12);
        assert_relative_eq!(bb.zlen(), 95.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mesh_export() {
        let mesh = Solid::cube(1.0, 1.0, 1.0).to_mesh();
        assert_eq!(mesh.num_triangles(), 12);
        assert!(Solid::cube(1.0, 1.0, 1.0).to_stl().is_ok());
        assert!(Solid::empty().to_stl().is_err());
    }
}
