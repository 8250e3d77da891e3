//! Straight beams, optionally with a notch joint at each end.
//!
//! Beams are built centred on the origin with their long axis along +Y,
//! width along X and height along Z. Sub-assemblies rotate them into place.

use gartenhaus_kernel::math::Point3;
use gartenhaus_kernel::{Frame, Profile, Rect, Solid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigErrors;
use crate::part::PositionedSolid;

/// Rectangular notch cut into a beam end.
///
/// The cut removes a ring of depth `depth` around a centred
/// `width × height` tenon, which seats in the mating member's socket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotchSpec {
    /// Length of the tenon along the beam axis (mm).
    pub depth: f64,
    /// Tenon width (mm).
    pub width: f64,
    /// Tenon height (mm).
    pub height: f64,
}

impl NotchSpec {
    /// Check the notch against the cross-section it is cut into.
    ///
    /// Parameter names in the returned issues are prefixed with `prefix`.
    pub fn validate(&self, prefix: &str, beam_width: f64, beam_height: f64) -> ConfigErrors {
        let mut errs = ConfigErrors::default();
        errs.positive(&format!("{prefix}.depth"), self.depth);
        errs.positive(&format!("{prefix}.width"), self.width);
        errs.positive(&format!("{prefix}.height"), self.height);
        errs.check(
            self.width < beam_width,
            &format!("{prefix}.width"),
            format!(
                "must be smaller than the beam width ({beam_width}), got {}",
                self.width
            ),
        );
        errs.check(
            self.height < beam_height,
            &format!("{prefix}.height"),
            format!(
                "must be smaller than the beam height ({beam_height}), got {}",
                self.height
            ),
        );
        errs
    }
}

/// Dimensions of one beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSpec {
    /// Shoulder length (mm). A notched beam's tenons extend past it.
    pub length: f64,
    /// Width (mm).
    pub width: f64,
    /// Height (mm).
    pub height: f64,
    /// End notch; `None` gives a plain box.
    pub notch: Option<NotchSpec>,
}

impl BeamSpec {
    /// A beam without notches.
    pub fn plain(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
            notch: None,
        }
    }

    /// A beam with the same notch at both ends.
    pub fn notched(length: f64, width: f64, height: f64, notch: NotchSpec) -> Self {
        Self {
            length,
            width,
            height,
            notch: Some(notch),
        }
    }

    /// Check dimensions, prefixing parameter names with `prefix`.
    pub fn validate(&self, prefix: &str) -> ConfigErrors {
        let mut errs = ConfigErrors::default();
        errs.positive(&format!("{prefix}.length"), self.length);
        errs.positive(&format!("{prefix}.width"), self.width);
        errs.positive(&format!("{prefix}.height"), self.height);
        if let Some(notch) = &self.notch {
            errs.extend(notch.validate(&format!("{prefix}.notch"), self.width, self.height));
        }
        errs
    }
}

/// Build a beam with a notch joint at each end.
///
/// The stock is `length + 2·depth` long; the notch ring is removed from
/// the `depth` past each shoulder, leaving full section over `length` and a
/// centred tenon beyond. A notch as wide or tall as the section cuts clean
/// through and leaves a slotted end; [`NotchSpec::validate`] rejects that.
pub fn build_join_beam(length: f64, width: f64, height: f64, notch: &NotchSpec) -> PositionedSolid {
    let depth = notch.depth;
    let stock = Solid::centered_cube(width, length + 2.0 * depth, height);

    let ring = Profile::rect(width, height).with_hole(Rect::centered(notch.width, notch.height));
    let frame = Frame::xz();
    let cut_far = Solid::extrude(&ring, &frame.at(Point3::new(0.0, length / 2.0, 0.0)), depth);
    let cut_near = Solid::extrude(
        &ring,
        &frame.at(Point3::new(0.0, -length / 2.0 - depth, 0.0)),
        depth,
    );

    debug!(length, width, height, depth, "building join beam");
    PositionedSolid::new(stock.difference(&cut_far).difference(&cut_near))
}

/// Build a plain or notched beam.
pub fn build_beam(spec: &BeamSpec) -> PositionedSolid {
    match &spec.notch {
        Some(notch) => build_join_beam(spec.length, spec.width, spec.height, notch),
        None => PositionedSolid::new(Solid::centered_cube(spec.width, spec.length, spec.height)),
    }
}

/// Evenly spaced members across a span.
///
/// `count = ⌊span / nominal⌋ + 1`; the pitch is chosen so the first and
/// last member sit flush with the span ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudLayout {
    /// Number of members.
    pub count: usize,
    /// Centre-to-centre distance (mm).
    pub pitch: f64,
}

impl StudLayout {
    /// Layout for members of `member_width` across `span` at roughly `nominal` spacing.
    pub fn uniform(span: f64, nominal: f64, member_width: f64) -> Self {
        let count = (span / nominal).floor().max(0.0) as usize + 1;
        let pitch = if count > 1 {
            (span - member_width) / (count - 1) as f64
        } else {
            0.0
        };
        Self { count, pitch }
    }

    /// Offsets of each member from the first.
    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |i| i as f64 * self.pitch)
    }
}

/// Anchor x of a rafter after tilting it by `slope_deg`.
///
/// The uncorrected anchor centres the rafter over the wall footprint
/// (`span`); the tilt shortens its horizontal projection, moving the
/// anchor by `(x − pivot)·(1 − cos θ)` with the pivot at half the rafter length.
pub fn rafter_anchor_x(rafter_length: f64, span: f64, slope_deg: f64, nudge: f64) -> f64 {
    let x = rafter_length / 2.0 - (rafter_length - span) / 2.0;
    let pivot = rafter_length / 2.0;
    x - (x - pivot) * (1.0 - slope_deg.to_radians().cos()) + nudge
}
