//! Left wall: evenly spaced studs under a top plate.

use gartenhaus_kernel::Solid;
use tracing::debug;

use super::{cut_all, join_beam, plate, upright};
use crate::beam::StudLayout;
use crate::config::HouseConfig;
use crate::part::{PartList, PositionedSolid};

/// Studs `left_beam_main`, `left_beam_1`, … followed by `left_beam_top`.
pub fn build(cfg: &HouseConfig, cut_objects: &[Solid]) -> PartList {
    let fl = cfg.floor_length;
    let bw = cfg.beam.width;
    let bl = cfg.walls.beam_length;
    let u = cfg.explode_unit;
    let wall_x = fl + bw;

    let layout = StudLayout::uniform(fl + 2.0 * bw, cfg.walls.stud_spacing, bw);
    debug!(studs = layout.count, pitch = layout.pitch, "building left wall");

    let stud = upright(join_beam(cfg, bl)).translate(wall_x, -fl / 2.0 - bw / 2.0, bl / 2.0 + bw / 2.0);
    let studs: Vec<PositionedSolid> = layout.offsets().map(|dy| stud.translate(0.0, dy, 0.0)).collect();
    let stud_union = studs
        .iter()
        .fold(Solid::empty(), |acc, s| acc.union(s.solid()));

    let top = plate(cfg, fl + cfg.walls.top_plate_overhang)
        .translate(wall_x, 0.0, bl + bw)
        .cut(&stud_union);

    let mut parts: PartList = studs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let tag = if i == 0 {
                "left_beam_main".to_string()
            } else {
                format!("left_beam_{i}")
            };
            cut_all(s, cut_objects)
                .with_tag(tag)
                .with_display_offset(0.0, 0.0, u)
        })
        .collect();
    parts.push(
        cut_all(&top, cut_objects)
            .with_tag("left_beam_top")
            .with_display_offset(0.0, 0.0, 2.0 * u),
    );
    parts
}
