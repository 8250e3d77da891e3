//! Roof: sloped rafters resting on the side-wall top plates.

use gartenhaus_kernel::Solid;
use tracing::debug;

use super::{along_x, cut_all};
use crate::beam::{build_beam, rafter_anchor_x, BeamSpec};
use crate::config::HouseConfig;
use crate::part::{PartList, PositionedSolid};

/// One uncut rafter at `y = 0`, tilted and anchored over the footprint.
pub(crate) fn rafter(cfg: &HouseConfig) -> PositionedSolid {
    let r = &cfg.roof;
    let x = rafter_anchor_x(
        r.beam_length,
        cfg.floor_length + cfg.beam.width,
        r.slope_deg,
        r.anchor_nudge,
    );
    along_x(build_beam(&BeamSpec::plain(
        r.beam_length,
        r.section.width,
        r.section.height,
    )))
    .rotate(0.0, r.slope_deg, 0.0)
    .translate(x, 0.0, r.eave_height)
}

/// Rafters `roof_beam_0 …`, spaced along Y and centred on the ridge,
/// each trimmed by every cut object.
pub fn build(cfg: &HouseConfig, cut_objects: &[Solid]) -> PartList {
    let r = &cfg.roof;
    let u = cfg.explode_unit;
    let first_y = (r.rafter_count.saturating_sub(1)) as f64 * r.rafter_spacing / 2.0;
    debug!(rafters = r.rafter_count, first_y, "building roof");

    let rafter = rafter(cfg);
    (0..r.rafter_count)
        .map(|i| {
            let placed = rafter.translate(0.0, first_y - i as f64 * r.rafter_spacing, 0.0);
            cut_all(&placed, cut_objects)
                .with_tag(format!("roof_beam_{i}"))
                .with_display_offset(0.0, 0.0, 4.9 * u)
        })
        .collect()
}
