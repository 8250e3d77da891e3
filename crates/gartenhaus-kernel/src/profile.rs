//! Planar rectangular profiles and the frames they are extruded in.

use gartenhaus_kernel_math::{Point3, Vec3};

use crate::cell::ConvexCell;

/// An axis-aligned rectangle in profile `(u, v)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Lower-left corner `(u, v)`.
    pub min: [f64; 2],
    /// Upper-right corner `(u, v)`.
    pub max: [f64; 2],
}

impl Rect {
    /// Rectangle of `width × height` centred on the profile origin.
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            min: [-width / 2.0, -height / 2.0],
            max: [width / 2.0, height / 2.0],
        }
    }

    /// Width along `u`.
    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    /// Height along `v`.
    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    fn contains(&self, u: f64, v: f64) -> bool {
        u > self.min[0] && u < self.max[0] && v > self.min[1] && v < self.max[1]
    }
}

/// A closed planar region: an outer rectangle minus rectangular holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    outer: Rect,
    holes: Vec<Rect>,
}

impl Profile {
    /// Solid `width × height` rectangle centred on the origin.
    pub fn rect(width: f64, height: f64) -> Self {
        Self {
            outer: Rect::centered(width, height),
            holes: Vec::new(),
        }
    }

    /// Add a hole. Holes reaching past the outline are clipped to it, so a
    /// hole as large as the outline leaves nothing of that band.
    pub fn with_hole(mut self, hole: Rect) -> Self {
        self.holes.push(hole);
        self
    }

    /// Outer outline.
    pub fn outer(&self) -> &Rect {
        &self.outer
    }

    /// Decompose into disjoint rectangles covering the region.
    ///
    /// Grid cells between all hole and outline breaks are classified by
    /// their centre, then merged along each row.
    pub fn rectangles(&self) -> Vec<Rect> {
        let breaks = |axis: usize| {
            let lo = self.outer.min[axis];
            let hi = self.outer.max[axis];
            let mut b: Vec<f64> = std::iter::once(lo)
                .chain(std::iter::once(hi))
                .chain(
                    self.holes
                        .iter()
                        .flat_map(|h| [h.min[axis], h.max[axis]])
                        .map(|x| x.clamp(lo, hi)),
                )
                .collect();
            b.sort_by(f64::total_cmp);
            b.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
            b
        };
        let us = breaks(0);
        let vs = breaks(1);

        let mut rects = Vec::new();
        for v in vs.windows(2) {
            let mut run: Option<Rect> = None;
            for u in us.windows(2) {
                let (cu, cv) = ((u[0] + u[1]) / 2.0, (v[0] + v[1]) / 2.0);
                let filled = self.outer.contains(cu, cv)
                    && !self.holes.iter().any(|h| h.contains(cu, cv));
                if !filled {
                    rects.extend(run.take());
                } else if let Some(r) = run.as_mut() {
                    r.max[0] = u[1];
                } else {
                    run = Some(Rect {
                        min: [u[0], v[0]],
                        max: [u[1], v[1]],
                    });
                }
            }
            rects.extend(run.take());
        }
        rects
    }
}

/// A placement for a planar profile: origin, in-plane axes, and extrusion normal.
///
/// The `v` axis is `normal × u`, matching the usual CAD workplane convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Profile origin in world space.
    pub origin: Point3,
    /// In-plane horizontal direction.
    pub u: Vec3,
    /// In-plane vertical direction.
    pub v: Vec3,
    /// Extrusion direction.
    pub normal: Vec3,
}

impl Frame {
    /// Frame at `origin` with in-plane axis `u` and extrusion direction `normal`.
    pub fn new(origin: Point3, u: Vec3, normal: Vec3) -> Self {
        let u = u.normalize();
        let normal = normal.normalize();
        Self {
            origin,
            u,
            v: normal.cross(&u),
            normal,
        }
    }

    /// XZ plane, extruding along +Y (`v` points along −Z).
    pub fn xz() -> Self {
        Self::new(Point3::origin(), Vec3::x(), Vec3::y())
    }

    /// The same frame moved to `origin`.
    pub fn at(self, origin: Point3) -> Self {
        Self { origin, ..self }
    }

    pub(crate) fn extrude_rect(&self, rect: &Rect, depth: f64) -> Option<ConvexCell> {
        let corner = self.origin + self.u * rect.min[0] + self.v * rect.min[1];
        ConvexCell::parallelepiped(
            corner,
            self.u * rect.width(),
            self.v * rect.height(),
            self.normal * depth,
        )
    }
}
