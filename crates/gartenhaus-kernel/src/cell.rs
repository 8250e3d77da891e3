//! Convex polyhedral cells and half-space clipping.
//!
//! A [`crate::Solid`] is a set of interior-disjoint convex cells. Every
//! boolean reduces to clipping one cell against the face planes of another:
//!
//! ```text
//!   A − B = ⋃ᵢ ( A ∩ H₁ ∩ … ∩ Hᵢ₋₁ ∩ ¬Hᵢ )      Hᵢ = inside half-space of face i of B
//! ```
//!
//! Each term is convex, and the terms are pairwise disjoint.

use gartenhaus_kernel_math::{Point3, Tolerance, Transform, Vec3};

use crate::bbox::Aabb3;

/// An oriented plane `normal · p = offset`.
///
/// The inside half-space is `normal · p <= offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing out of the kept half-space.
    pub normal: Vec3,
    /// Signed distance of the plane from the origin along `normal`.
    pub offset: f64,
}

impl Plane {
    /// Plane through `point` with the given (not necessarily unit) normal.
    pub fn through(point: &Point3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            offset: normal.dot(&point.coords),
            normal,
        }
    }

    /// Signed distance of `p` from the plane; positive means outside.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.offset
    }

    /// The same plane with inside and outside swapped.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }
}

/// A closed convex polyhedron stored as outward, counter-clockwise face loops.
#[derive(Debug, Clone)]
pub struct ConvexCell {
    faces: Vec<Vec<Point3>>,
    aabb: Aabb3,
}

impl ConvexCell {
    /// Build a cell from face loops. Returns `None` if the loops cannot bound a volume.
    pub fn from_faces(faces: Vec<Vec<Point3>>) -> Option<Self> {
        if faces.len() < 4 {
            return None;
        }
        let aabb = Aabb3::from_points(faces.iter().flatten())?;
        Some(Self { faces, aabb })
    }

    /// Parallelepiped spanned by `e1`, `e2`, `e3` from `origin`.
    ///
    /// The edge vectors may be given in either handedness.
    pub fn parallelepiped(origin: Point3, e1: Vec3, e2: Vec3, e3: Vec3) -> Option<Self> {
        let (e1, e2) = if e1.cross(&e2).dot(&e3) < 0.0 {
            (e2, e1)
        } else {
            (e1, e2)
        };
        let c = |i: f64, j: f64, k: f64| origin + e1 * i + e2 * j + e3 * k;
        let faces = vec![
            vec![c(0., 0., 0.), c(0., 1., 0.), c(1., 1., 0.), c(1., 0., 0.)],
            vec![c(0., 0., 1.), c(1., 0., 1.), c(1., 1., 1.), c(0., 1., 1.)],
            vec![c(0., 0., 0.), c(1., 0., 0.), c(1., 0., 1.), c(0., 0., 1.)],
            vec![c(0., 1., 0.), c(0., 1., 1.), c(1., 1., 1.), c(1., 1., 0.)],
            vec![c(0., 0., 0.), c(0., 0., 1.), c(0., 1., 1.), c(0., 1., 0.)],
            vec![c(1., 0., 0.), c(1., 1., 0.), c(1., 1., 1.), c(1., 0., 1.)],
        ];
        let cell = Self::from_faces(faces)?;
        (cell.volume() > 0.0).then_some(cell)
    }

    /// Face loops (outward, counter-clockwise).
    pub fn faces(&self) -> &[Vec<Point3>] {
        &self.faces
    }

    /// Cached bounding box.
    pub fn aabb(&self) -> &Aabb3 {
        &self.aabb
    }

    /// Every face-loop vertex; shared corners repeat once per face.
    pub fn points(&self) -> impl Iterator<Item = &Point3> {
        self.faces.iter().flatten()
    }

    /// Apply a rigid transform.
    pub fn transformed(&self, t: &Transform) -> Self {
        let faces: Vec<Vec<Point3>> = self
            .faces
            .iter()
            .map(|f| f.iter().map(|p| t.apply_point(p)).collect())
            .collect();
        let aabb = Aabb3::from_points(faces.iter().flatten()).unwrap_or(self.aabb);
        Self { faces, aabb }
    }

    /// Supporting planes of every non-degenerate face.
    pub fn planes(&self) -> Vec<Plane> {
        self.faces
            .iter()
            .filter_map(|face| {
                let normal = newell_normal(face);
                if normal.norm() < 1e-12 {
                    return None;
                }
                Some(Plane::through(&centroid(face), normal))
            })
            .collect()
    }

    /// Enclosed volume (divergence theorem over fan triangles).
    pub fn volume(&self) -> f64 {
        let r = self.faces[0][0];
        let mut vol = 0.0;
        for face in &self.faces {
            let p0 = face[0] - r;
            for w in face[1..].windows(2) {
                let p1 = w[0] - r;
                let p2 = w[1] - r;
                vol += p0.dot(&p1.cross(&p2));
            }
        }
        vol / 6.0
    }

    /// Keep the part of the cell inside `plane`.
    ///
    /// Returns the cell unchanged when it lies entirely inside (within `tol`)
    /// and `None` when nothing of it is strictly inside.
    pub fn clip(&self, plane: &Plane, tol: f64) -> Option<ConvexCell> {
        let mut any_out = false;
        let mut any_in = false;
        for p in self.points() {
            let d = plane.signed_distance(p);
            if d > tol {
                any_out = true;
            } else if d < -tol {
                any_in = true;
            }
        }
        if !any_out {
            return Some(self.clone());
        }
        if !any_in {
            return None;
        }

        let mut faces = Vec::with_capacity(self.faces.len() + 1);
        let mut cap = Vec::new();
        for face in &self.faces {
            let clipped = clip_polygon(face, plane, tol, &mut cap);
            if clipped.len() >= 3 {
                faces.push(clipped);
            }
        }
        let cap = order_on_plane(cap, &plane.normal, tol);
        if cap.len() >= 3 {
            faces.push(cap);
        }
        Self::from_faces(faces)
    }

    /// Intersection with another convex cell, if it has volume.
    pub fn intersection(&self, other: &ConvexCell, tol: &Tolerance) -> Option<ConvexCell> {
        if !self.aabb.overlaps_interior(&other.aabb, tol.linear) {
            return None;
        }
        let mut probe = self.clone();
        for plane in other.planes() {
            probe = probe.clip(&plane, tol.linear)?;
        }
        (probe.volume() > tol.volume).then_some(probe)
    }

    /// `self − tool` as disjoint convex pieces.
    pub fn subtract(&self, tool: &ConvexCell, tol: &Tolerance) -> Vec<ConvexCell> {
        if self.intersection(tool, tol).is_none() {
            return vec![self.clone()];
        }
        let mut pieces = Vec::new();
        let mut rest = self.clone();
        for plane in tool.planes() {
            if let Some(outside) = rest.clip(&plane.flipped(), tol.linear) {
                if outside.volume() > tol.volume {
                    pieces.push(outside);
                }
            }
            match rest.clip(&plane, tol.linear) {
                Some(inside) => rest = inside,
                None => break,
            }
        }
        pieces
    }
}

/// Sutherland–Hodgman step for one face; points on the plane go to `cap`.
fn clip_polygon(poly: &[Point3], plane: &Plane, tol: f64, cap: &mut Vec<Point3>) -> Vec<Point3> {
    let n = poly.len();
    let mut out: Vec<Point3> = Vec::with_capacity(n + 1);
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let da = plane.signed_distance(&a);
        let db = plane.signed_distance(&b);
        if da <= tol {
            out.push(a);
            if da >= -tol {
                cap.push(a);
            }
        }
        if (da < -tol && db > tol) || (da > tol && db < -tol) {
            let t = da / (da - db);
            let p = a + (b - a) * t;
            out.push(p);
            cap.push(p);
        }
    }
    out.dedup_by(|a, b| (*a - *b).norm() < tol);
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() < tol {
        out.pop();
    }
    out
}

/// Deduplicate coplanar points and sort them counter-clockwise about `normal`.
fn order_on_plane(points: Vec<Point3>, normal: &Vec3, tol: f64) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if unique.iter().all(|q| (p - *q).norm() >= tol) {
            unique.push(p);
        }
    }
    if unique.len() < 3 {
        return Vec::new();
    }
    let c = centroid(&unique);
    let Some(u) = unique
        .iter()
        .map(|p| *p - c)
        .find(|d| d.norm() > tol)
        .map(|d| d.normalize())
    else {
        return Vec::new();
    };
    let v = normal.cross(&u);
    let mut keyed: Vec<(f64, Point3)> = unique
        .into_iter()
        .map(|p| {
            let d = p - c;
            (d.dot(&v).atan2(d.dot(&u)), p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}

fn centroid(points: &[Point3]) -> Point3 {
    let sum = points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

fn newell_normal(face: &[Point3]) -> Vec3 {
    let mut n = Vec3::zeros();
    for (i, a) in face.iter().enumerate() {
        let b = face[(i + 1) % face.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}
