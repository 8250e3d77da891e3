//! House dimensions.
//!
//! Every length is in millimetres. All builders read their numbers from a
//! [`HouseConfig`]; nothing below this module hardcodes a dimension.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beam::{NotchSpec, StudLayout};
use crate::error::{ConfigErrors, Result};

/// Rectangular cross-section of a beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Width (mm).
    pub width: f64,
    /// Height (mm).
    pub height: f64,
}

impl Section {
    /// A `width × height` section.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Nominal clear size of a window or door.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    /// Clear width (mm).
    pub width: f64,
    /// Clear height (mm).
    pub height: f64,
}

/// Floor joists and rim beams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    /// Shoulder length of each joist (mm).
    pub beam_length: f64,
    /// Nominal joist spacing (mm).
    pub joist_spacing: f64,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            beam_length: 2000.0,
            joist_spacing: 400.0,
        }
    }
}

/// Wall framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Stud length of the front, back and left walls (mm).
    pub beam_length: f64,
    /// Stud length of the right (door) wall, which carries the roof's high side (mm).
    pub high_beam_length: f64,
    /// Nominal left-wall stud spacing (mm).
    pub stud_spacing: f64,
    /// Distance from the right wall's corner post to the first door jamb (mm).
    pub door_offset: f64,
    /// Length the side-wall top plates add to the floor length (mm).
    pub top_plate_overhang: f64,
    /// Window in the front and back walls.
    pub window: Opening,
    /// Door in the right wall.
    pub door: Opening,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            beam_length: 2000.0,
            high_beam_length: 2300.0,
            stud_spacing: 500.0,
            door_offset: 200.0,
            top_plate_overhang: 500.0,
            window: Opening {
                width: 1095.0,
                height: 1525.0,
            },
            door: Opening {
                width: 1000.0,
                height: 2000.0,
            },
        }
    }
}

/// Roof rafters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofConfig {
    /// Rafter length (mm).
    pub beam_length: f64,
    /// Number of rafters.
    pub rafter_count: usize,
    /// Centre-to-centre rafter spacing along the ridge (mm).
    pub rafter_spacing: f64,
    /// Roof slope (degrees).
    pub slope_deg: f64,
    /// Height of the rafter centre line above the floor (mm).
    pub eave_height: f64,
    /// Final adjustment added to the corrected anchor x (mm).
    pub anchor_nudge: f64,
    /// Rafter cross-section.
    pub section: Section,
}

impl Default for RoofConfig {
    fn default() -> Self {
        Self {
            beam_length: 3000.0,
            rafter_count: 6,
            rafter_spacing: 485.0,
            slope_deg: 8.0,
            eave_height: 2300.0,
            anchor_nudge: 1.0,
            section: Section::new(75.0, 75.0),
        }
    }
}

/// Fabrication layout and inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Row pitch between laid-out parts (mm).
    pub row_spacing: f64,
    /// Height above which a laid-out part counts as still tilted (mm).
    pub tilt_threshold: f64,
    /// Rotation about Y applied to a still-tilted part (degrees).
    pub tilt_correction_deg: f64,
    /// Turn parts so their larger cross-section side lies along Y.
    pub lay_flat: bool,
    /// Largest per-axis difference for two parts to share an inventory bucket (mm).
    pub inventory_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_spacing: 195.0,
            tilt_threshold: 100.0,
            tilt_correction_deg: -8.0,
            lay_flat: true,
            inventory_tolerance: 0.01,
        }
    }
}

/// Complete set of house dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    /// Side of the square floor footprint (mm).
    pub floor_length: f64,
    /// Clearance added around every opening (mm).
    pub safety_spacing: f64,
    /// Unit of the exploded-view offsets (mm).
    pub explode_unit: f64,
    /// Primary beam cross-section.
    pub beam: Section,
    /// End notch of every joint beam.
    pub notch: NotchSpec,
    /// Floor.
    pub floor: FloorConfig,
    /// Walls.
    pub walls: WallConfig,
    /// Roof.
    pub roof: RoofConfig,
    /// Fabrication layout.
    pub layout: LayoutConfig,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            floor_length: 2000.0,
            safety_spacing: 15.0,
            explode_unit: 200.0,
            beam: Section::new(95.0, 95.0),
            notch: NotchSpec {
                depth: 30.0,
                width: 40.0,
                height: 40.0,
            },
            floor: FloorConfig::default(),
            walls: WallConfig::default(),
            roof: RoofConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl HouseConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading house config");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every dimension, collecting all problems at once.
    pub fn validate(&self) -> std::result::Result<(), ConfigErrors> {
        let mut errs = ConfigErrors::default();
        let s = self.safety_spacing;
        errs.positive("floor_length", self.floor_length);
        errs.positive("beam.width", self.beam.width);
        // A negative width would loosen every fit check below.
        let bw = self.beam.width.max(0.0);
        errs.positive("beam.height", self.beam.height);
        errs.non_negative("safety_spacing", s);
        errs.non_negative("explode_unit", self.explode_unit);
        errs.extend(self.notch.validate("notch", self.beam.width, self.beam.height));

        errs.positive("floor.beam_length", self.floor.beam_length);
        errs.positive("floor.joist_spacing", self.floor.joist_spacing);
        self.check_member_spacing(&mut errs, "floor.joist_spacing", self.floor.joist_spacing);

        let w = &self.walls;
        errs.positive("walls.beam_length", w.beam_length);
        errs.positive("walls.high_beam_length", w.high_beam_length);
        errs.positive("walls.stud_spacing", w.stud_spacing);
        self.check_member_spacing(&mut errs, "walls.stud_spacing", w.stud_spacing);
        errs.positive("walls.window.width", w.window.width);
        errs.positive("walls.window.height", w.window.height);
        errs.positive("walls.door.width", w.door.width);
        errs.positive("walls.door.height", w.door.height);
        errs.non_negative("walls.top_plate_overhang", w.top_plate_overhang);

        // Window frame (two jambs plus clearance) must fit between the corner posts,
        // and the sill must stay above the floor.
        errs.check(
            w.window.width + s + 2.0 * bw < self.floor_length,
            "walls.window.width",
            format!(
                "window frame {} mm does not fit the {} mm wall span",
                w.window.width + s + 2.0 * bw,
                self.floor_length
            ),
        );
        errs.check(
            w.window.height + s + bw < w.beam_length,
            "walls.window.height",
            format!(
                "window opening {} mm reaches past the {} mm wall height",
                w.window.height + s + bw,
                w.beam_length
            ),
        );

        errs.check(
            w.door_offset >= bw,
            "walls.door_offset",
            format!("must be at least beam.width ({bw}), got {}", w.door_offset),
        );
        let door_span = w.door_offset + w.door.width + 2.0 * s + bw;
        errs.check(
            door_span < self.floor_length,
            "walls.door.width",
            format!(
                "door frame ends {door_span} mm along a {} mm wall span",
                self.floor_length
            ),
        );
        errs.check(
            w.door.height + s + bw < w.high_beam_length,
            "walls.door.height",
            format!(
                "door header {} mm reaches past the {} mm wall height",
                w.door.height + s + bw,
                w.high_beam_length
            ),
        );

        let r = &self.roof;
        errs.positive("roof.beam_length", r.beam_length);
        errs.positive("roof.section.width", r.section.width);
        errs.positive("roof.section.height", r.section.height);
        errs.positive("roof.eave_height", r.eave_height);
        errs.check(r.rafter_count >= 1, "roof.rafter_count", "at least one rafter is required");
        if r.rafter_count > 1 {
            errs.check(
                r.rafter_spacing > r.section.width,
                "roof.rafter_spacing",
                format!(
                    "must exceed the rafter width ({}), got {}",
                    r.section.width, r.rafter_spacing
                ),
            );
        }
        errs.check(
            r.slope_deg.is_finite() && r.slope_deg.abs() < 90.0,
            "roof.slope_deg",
            format!("must lie strictly between -90 and 90, got {}", r.slope_deg),
        );
        errs.check(
            r.beam_length > self.floor_length + bw,
            "roof.beam_length",
            format!(
                "rafters must span the walls ({} mm), got {}",
                self.floor_length + bw,
                r.beam_length
            ),
        );

        let l = &self.layout;
        errs.positive("layout.row_spacing", l.row_spacing);
        errs.positive("layout.tilt_threshold", l.tilt_threshold);
        errs.check(
            l.tilt_correction_deg.is_finite(),
            "layout.tilt_correction_deg",
            "must be finite",
        );
        errs.non_negative("layout.inventory_tolerance", l.inventory_tolerance);

        errs.into_result()
    }

    /// Joists and studs repeat across the footprint plus both corner
    /// members; neighbours must not touch.
    fn check_member_spacing(&self, errs: &mut ConfigErrors, parameter: &str, nominal: f64) {
        let bw = self.beam.width;
        let span = self.floor_length + 2.0 * bw;
        if !(nominal > 0.0 && bw > 0.0 && span.is_finite() && span > 0.0) {
            return;
        }
        let layout = StudLayout::uniform(span, nominal, bw);
        if layout.count > 1 {
            errs.check(
                layout.pitch > bw,
                parameter,
                format!(
                    "{} members at {:.2} mm pitch collide; the pitch must exceed beam.width ({bw})",
                    layout.count, layout.pitch
                ),
            );
        }
    }
}
