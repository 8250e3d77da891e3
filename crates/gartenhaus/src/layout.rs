//! Fabrication layout: every part turned long-side-along-X, centred, and
//! placed in a row along Y.

use gartenhaus_kernel::math::{Axis, Point3, Tolerance, Vec3};
use gartenhaus_kernel::Solid;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::part::{union_all, PositionedSolid};

/// How a part is turned into its canonical shop orientation.
pub trait OrientationPolicy: Send + Sync {
    /// Rotate `part` so its longest extent runs along X.
    fn canonicalize(&self, part: &PositionedSolid) -> PositionedSolid;

    /// Adjust a part already centred on `row_center`.
    fn correct_residual(&self, part: &PositionedSolid, row_center: Point3) -> PositionedSolid;
}

/// Longest bounding-box extent to X, then an optional tilt fix and lay-flat turn.
///
/// The tilt fix rotates a part taller than `tilt_threshold` by
/// `tilt_correction_deg` about Y, but only when that lowers its rounded
/// height. A part that merely has a tall section (say an upright 110 mm
/// post) is left as it is rather than turned by the roof slope; either way
/// a part still above the threshold is reported with `warn!`.
#[derive(Debug, Clone, PartialEq)]
pub struct LongestAxisPolicy {
    /// Height above which a part counts as still tilted (mm).
    pub tilt_threshold: f64,
    /// Rotation about Y applied to a tilted part (degrees).
    pub tilt_correction_deg: f64,
    /// Turn parts whose Z extent exceeds their Y extent onto their side.
    pub lay_flat: bool,
}

impl Default for LongestAxisPolicy {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl LongestAxisPolicy {
    /// Policy with the thresholds of `cfg`.
    pub fn from_config(cfg: &LayoutConfig) -> Self {
        Self {
            tilt_threshold: cfg.tilt_threshold,
            tilt_correction_deg: cfg.tilt_correction_deg,
            lay_flat: cfg.lay_flat,
        }
    }

    fn rounded_height(part: &PositionedSolid) -> Option<f64> {
        let bb = part.bounding_box()?;
        Some(round2(bb.max.z) - round2(bb.min.z))
    }
}

impl OrientationPolicy for LongestAxisPolicy {
    fn canonicalize(&self, part: &PositionedSolid) -> PositionedSolid {
        let Some(bb) = part.bounding_box() else {
            return part.clone();
        };
        match bb.longest_axis() {
            Some(Axis::Y) => part.rotate_about(Point3::origin(), Vec3::z(), 90.0),
            Some(Axis::Z) => part.rotate_about(Point3::origin(), Vec3::y(), -90.0),
            _ => part.clone(),
        }
    }

    fn correct_residual(&self, part: &PositionedSolid, row_center: Point3) -> PositionedSolid {
        let mut part = part.clone();

        if let Some(height) = Self::rounded_height(&part).filter(|&h| h > self.tilt_threshold) {
            let turned = part.rotate_about(row_center, Vec3::y(), self.tilt_correction_deg);
            // The fixed angle only undoes the roof slope; keep it only where it helps.
            if Self::rounded_height(&turned).is_some_and(|h| h < height) {
                part = turned;
            }
        }

        if self.lay_flat {
            if let Some(bb) = part.bounding_box() {
                if bb.zlen() > bb.ylen() + Tolerance::DEFAULT.linear {
                    part = part.rotate_about(bb.center(), Vec3::x(), 90.0);
                }
            }
        }

        if let Some(h) = Self::rounded_height(&part).filter(|&h| h > self.tilt_threshold) {
            warn!(
                tag = part.tag().unwrap_or("<untagged>"),
                height = h,
                threshold = self.tilt_threshold,
                "part still stands too tall after tilt correction"
            );
        }
        part
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn place(part: &PositionedSolid, index: usize, spacing: f64, policy: &dyn OrientationPolicy) -> PositionedSolid {
    let part = policy.canonicalize(part);
    let Some(bb) = part.bounding_box() else {
        return part;
    };
    let c = bb.center();
    let row_y = index as f64 * spacing;
    let part = part.translate(-c.x, row_y - c.y, -c.z);
    policy.correct_residual(&part, Point3::new(0.0, row_y, 0.0))
}

/// Lay out `parts` in a row along Y, `spacing` apart.
///
/// Parts are independent and are placed in parallel. The row is checked
/// afterwards: if any part reaches into its successor, the spacing was too
/// small and [`Error::LayoutOverlap`] is returned.
pub fn arrange_for_fabrication(
    parts: &[PositionedSolid],
    spacing: f64,
    policy: &dyn OrientationPolicy,
) -> Result<Vec<PositionedSolid>> {
    debug!(parts = parts.len(), spacing, "arranging parts for fabrication");
    let arranged: Vec<PositionedSolid> = parts
        .par_iter()
        .enumerate()
        .map(|(i, part)| place(part, i, spacing, policy))
        .collect();
    check_row(&arranged, spacing)?;
    Ok(arranged)
}

/// [`arrange_for_fabrication`] with the spacing and policy of `cfg`.
pub fn arrange_with_config(parts: &[PositionedSolid], cfg: &LayoutConfig) -> Result<Vec<PositionedSolid>> {
    arrange_for_fabrication(parts, cfg.row_spacing, &LongestAxisPolicy::from_config(cfg))
}

fn check_row(parts: &[PositionedSolid], spacing: f64) -> Result<()> {
    let boxes: Vec<_> = parts.iter().map(PositionedSolid::bounding_box).collect();
    for (index, pair) in boxes.windows(2).enumerate() {
        let (Some(a), Some(b)) = (&pair[0], &pair[1]) else {
            continue;
        };
        let overlap = a.max.y - b.min.y;
        if overlap > Tolerance::DEFAULT.linear {
            return Err(Error::LayoutOverlap {
                index,
                next: index + 1,
                overlap,
                spacing,
            });
        }
    }
    Ok(())
}

/// Union of a laid-out row, for export.
pub fn layout_union(parts: &[PositionedSolid]) -> Result<Solid> {
    union_all(parts.iter().map(|p| p.solid().clone()), "fabrication layout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn beam(x: f64, y: f64, z: f64) -> PositionedSolid {
        PositionedSolid::new(Solid::centered_cube(x, y, z))
    }

    fn extents(parts: &[PositionedSolid]) -> Vec<Vec3> {
        parts
            .iter()
            .map(|p| p.bounding_box().expect("non-empty").extent())
            .collect()
    }

    #[test]
    fn test_long_axis_ends_up_along_x() {
        let parts = vec![
            beam(2000.0, 95.0, 95.0),
            beam(95.0, 2000.0, 95.0).translate(500.0, 500.0, 0.0),
            beam(95.0, 95.0, 2300.0).translate(0.0, 0.0, 1197.5),
        ];
        let laid = arrange_for_fabrication(&parts, 195.0, &LongestAxisPolicy::default()).expect("fits");
        for (i, e) in extents(&laid).iter().enumerate() {
            assert!(e.x > 1999.0, "part {i} not along X: {e:?}");
        }
        for (i, p) in laid.iter().enumerate() {
            let c = p.bounding_box().expect("non-empty").center();
            assert_relative_eq!(c.x, 0.0, epsilon = 1e-9);
            assert_relative_eq!(c.y, 195.0 * i as f64, epsilon = 1e-9);
            assert_relative_eq!(c.z, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_tilted_rafter_is_flattened() {
        let rafter = beam(3000.0, 75.0, 75.0).rotate(0.0, 8.0, 0.0).translate(1050.0, 0.0, 2300.0);
        let laid = arrange_for_fabrication(&[rafter], 195.0, &LongestAxisPolicy::default()).expect("fits");
        let e = laid[0].bounding_box().expect("rafter").extent();
        assert_relative_eq!(e.x, 3000.0, epsilon = 1e-6);
        assert_relative_eq!(e.z, 75.0, epsilon = 1e-6);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let parts = vec![
            beam(95.0, 95.0, 2300.0),
            beam(3000.0, 75.0, 75.0).rotate(0.0, 8.0, 0.0),
            beam(95.0, 120.0, 2000.0).rotate(90.0, 0.0, 0.0),
            beam(95.0, 2500.0, 95.0),
        ];
        let policy = LongestAxisPolicy::default();
        let once = arrange_for_fabrication(&parts, 195.0, &policy).expect("fits");
        let twice = arrange_for_fabrication(&once, 195.0, &policy).expect("fits");
        for (a, b) in once.iter().zip(&twice) {
            let (a, b) = (
                a.bounding_box().expect("part"),
                b.bounding_box().expect("part"),
            );
            assert!((a.min - b.min).norm() < 1e-6);
            assert!((a.max - b.max).norm() < 1e-6);
        }
    }

    #[test]
    fn test_lay_flat_turns_tall_sections() {
        let tall = beam(2000.0, 95.0, 120.0);
        let laid = arrange_for_fabrication(&[tall.clone()], 195.0, &LongestAxisPolicy::default()).expect("fits");
        let e = laid[0].bounding_box().expect("part").extent();
        assert_relative_eq!(e.y, 120.0, epsilon = 1e-9);
        assert_relative_eq!(e.z, 95.0, epsilon = 1e-9);

        let keep = LongestAxisPolicy {
            lay_flat: false,
            ..LongestAxisPolicy::default()
        };
        let laid = arrange_for_fabrication(&[tall], 195.0, &keep).expect("fits");
        assert_relative_eq!(laid[0].bounding_box().expect("part").zlen(), 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tilt_correction_skipped_when_it_does_not_help() {
        // Square and upright, just taller than the threshold: turning it
        // by the roof slope would only make it taller.
        let post = beam(2000.0, 110.0, 110.0);
        let laid = arrange_for_fabrication(&[post], 195.0, &LongestAxisPolicy::default()).expect("fits");
        let e = laid[0].bounding_box().expect("part").extent();
        assert_relative_eq!(e.x, 2000.0, epsilon = 1e-9);
        assert_relative_eq!(e.z, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn test_too_small_spacing_is_an_error() {
        let parts = vec![beam(2000.0, 95.0, 95.0), beam(2000.0, 95.0, 95.0)];
        match arrange_for_fabrication(&parts, 50.0, &LongestAxisPolicy::default()) {
            Err(Error::LayoutOverlap { index, next, overlap, .. }) => {
                assert_eq!((index, next), (0, 1));
                assert_relative_eq!(overlap, 45.0, epsilon = 1e-9);
            }
            other => panic!("expected overlap, got {other:?}"),
        }
        // Exactly touching is fine.
        assert!(arrange_for_fabrication(&parts, 95.0, &LongestAxisPolicy::default()).is_ok());
    }

    #[test]
    fn test_tags_survive_layout() {
        let parts = vec![beam(95.0, 2000.0, 95.0).with_tag("floor_beam_0")];
        let laid = arrange_with_config(&parts, &LayoutConfig::default()).expect("fits");
        assert_eq!(laid[0].tag(), Some("floor_beam_0"));
        assert!(layout_union(&laid).is_ok());
        assert!(layout_union(&[]).is_err());
    }

    #[test]
    fn test_ties_are_left_alone() {
        let cube = beam(100.0, 100.0, 100.0);
        let policy = LongestAxisPolicy::default();
        let turned = policy.canonicalize(&cube);
        let e = turned.bounding_box().expect("cube").extent();
        assert_relative_eq!(e.x, 100.0, epsilon = 1e-12);
    }
}
