//! Floor: joists between two rim beams.

use gartenhaus_kernel::Solid;
use tracing::debug;

use super::{along_x, cut_all, join_beam, plate};
use crate::beam::StudLayout;
use crate::config::HouseConfig;
use crate::part::{PartList, PositionedSolid};

/// Joists `floor_beam_0 …` followed by `floor_beam_main` (front rim) and
/// `floor_beam_main_2` (back rim).
///
/// Joists run along Y and are spread uniformly across the footprint plus
/// both wall thicknesses; the rims run along X and take the joist tenons.
pub fn build(cfg: &HouseConfig, cut_objects: &[Solid]) -> PartList {
    let fl = cfg.floor_length;
    let bw = cfg.beam.width;
    let u = cfg.explode_unit;

    let layout = StudLayout::uniform(fl + 2.0 * bw, cfg.floor.joist_spacing, bw);
    debug!(joists = layout.count, pitch = layout.pitch, "building floor");

    let joist = join_beam(cfg, cfg.floor.beam_length);
    let joists: Vec<PositionedSolid> = layout
        .offsets()
        .enumerate()
        .map(|(i, dx)| cut_all(&joist.translate(dx, 0.0, 0.0), cut_objects).with_tag(format!("floor_beam_{i}")))
        .collect();
    let joist_union = joists
        .iter()
        .fold(Solid::empty(), |acc, j| acc.union(j.solid()));

    let rim = along_x(plate(cfg, fl + 2.0 * bw)).translate(fl / 2.0 + bw / 2.0, fl / 2.0 + bw / 2.0, 0.0);
    let back_rim = rim.translate(0.0, -fl - bw, 0.0);
    let rims = [
        (rim, "floor_beam_main", 2.0 * u),
        (back_rim, "floor_beam_main_2", -u),
    ]
    .into_iter()
    .map(|(r, tag, dy)| {
        cut_all(&r, cut_objects)
            .cut(&joist_union)
            .with_tag(tag)
            .with_display_offset(0.0, dy, 0.0)
    });

    joists.into_iter().chain(rims).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::test_support::{cfg, overlap};
    use approx::assert_relative_eq;

    #[test]
    fn test_six_joists_and_two_rims() {
        let floor = build(&cfg(), &[]);
        assert_eq!(floor.len(), 8);
        let tags = floor.tags();
        assert_eq!(tags[0], Some("floor_beam_0"));
        assert_eq!(tags[5], Some("floor_beam_5"));
        assert_eq!(tags[6], Some("floor_beam_main"));
        assert_eq!(tags[7], Some("floor_beam_main_2"));
    }

    #[test]
    fn test_joist_pitch() {
        let floor = build(&cfg(), &[]);
        let xs: Vec<f64> = floor
            .iter()
            .take(6)
            .map(|p| p.bounding_box().expect("joist").center().x)
            .collect();
        assert_relative_eq!(xs[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(xs[5], 2095.0, epsilon = 1e-9);
        assert_relative_eq!(xs[1] - xs[0], 419.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rims_take_every_joist_tenon() {
        let floor = build(&cfg(), &[]);
        let full = 95.0 * 95.0 * 2190.0;
        for tag in ["floor_beam_main", "floor_beam_main_2"] {
            let rim = floor.get_by_tag(tag).expect("rim");
            assert_relative_eq!(rim.volume(), full - 6.0 * 40.0 * 40.0 * 30.0, epsilon = 1e-3);
        }
        let main = floor.get_by_tag("floor_beam_main").expect("rim");
        let joist = floor.get_by_tag("floor_beam_0").expect("joist");
        assert!(overlap(main.solid(), joist.solid()) < 1e-3);
        assert_relative_eq!(main.display_offset().y, 400.0, epsilon = 1e-12);
    }
}
