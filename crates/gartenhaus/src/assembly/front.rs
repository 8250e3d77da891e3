//! Front and back walls: a top beam over a framed window opening.

use gartenhaus_kernel::Solid;
use tracing::debug;

use super::{along_x, cut_all, join_beam, upright};
use crate::config::HouseConfig;
use crate::part::{PartList, PositionedSolid};

const FRONT_TAGS: [&str; 4] = [
    "front_beam",
    "window_beam_left",
    "window_beam_right",
    "window_beam_bottom",
];

const BACK_TAGS: [&str; 4] = [
    "back_beam",
    "back_window_beam_left",
    "back_window_beam_right",
    "back_window_beam_bottom",
];

/// Top beam, left jamb, right jamb and sill, on the front wall line.
///
/// The jambs stand `window.width + safety_spacing` apart (clear) and the
/// sill sits `window.height + safety_spacing` below the top beam's axis.
fn window_frame(cfg: &HouseConfig) -> [PositionedSolid; 4] {
    let fl = cfg.floor_length;
    let bw = cfg.beam.width;
    let s = cfg.safety_spacing;
    let bl = cfg.walls.beam_length;
    let window = cfg.walls.window;
    let wall_y = fl / 2.0 + bw / 2.0;
    let mid_x = fl / 2.0 + bw / 2.0;

    let top = along_x(join_beam(cfg, fl)).translate(mid_x, wall_y, bl + bw);
    let right = upright(join_beam(cfg, bl)).translate(
        fl / 2.0 - window.width / 2.0 - s / 2.0,
        wall_y,
        bl / 2.0 + bw / 2.0,
    );
    let left = right.translate(bw + s + window.width, 0.0, 0.0);
    let sill = along_x(join_beam(cfg, window.width + s)).translate(
        mid_x,
        wall_y,
        bl + bw - window.height - s,
    );

    let top = top.cut_part(&right).cut_part(&left);
    let right = right.cut_part(&sill);
    let left = left.cut_part(&sill);
    [top, left, right, sill]
}

fn finish(
    frame: [PositionedSolid; 4],
    cut_objects: &[Solid],
    tags: [&str; 4],
    offsets: [[f64; 3]; 4],
) -> PartList {
    frame
        .iter()
        .zip(tags)
        .zip(offsets)
        .map(|((part, tag), [x, y, z])| {
            cut_all(part, cut_objects)
                .with_tag(tag)
                .with_display_offset(x, y, z)
        })
        .collect()
}

/// Front wall: `[front_beam, window_beam_left, window_beam_right, window_beam_bottom]`.
pub fn build_front(cfg: &HouseConfig, cut_objects: &[Solid]) -> PartList {
    let u = cfg.explode_unit;
    debug!(cut_objects = cut_objects.len(), "building front wall");
    finish(
        window_frame(cfg),
        cut_objects,
        FRONT_TAGS,
        [
            [0.0, 0.0, 2.9 * u],
            [u / 2.0, 0.0, u],
            [-u / 2.0, 0.0, u],
            [0.0, 0.0, 0.0],
        ],
    )
}

/// Back wall: the front frame moved to the opposite side of the footprint.
pub fn build_back(cfg: &HouseConfig, cut_objects: &[Solid]) -> PartList {
    let u = cfg.explode_unit;
    let shift = -(cfg.floor_length + cfg.beam.width);
    debug!(cut_objects = cut_objects.len(), shift, "building back wall");
    finish(
        window_frame(cfg).map(|p| p.translate(0.0, shift, 0.0)),
        cut_objects,
        BACK_TAGS,
        [
            [0.0, -2.0 * u, 2.9 * u],
            [u, -2.0 * u, u],
            [-u / 2.0, -2.0 * u, u],
            [u / 2.0, -2.0 * u, u],
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::test_support::{cfg, overlap};
    use approx::assert_relative_eq;
    use gartenhaus_kernel::math::Vec3;

    #[test]
    fn test_front_parts_and_tags() {
        let front = build_front(&cfg(), &[]);
        assert_eq!(
            front.tags(),
            FRONT_TAGS.iter().map(|t| Some(*t)).collect::<Vec<_>>()
        );
        for part in &front {
            assert!(part.volume() > 0.0);
        }
    }

    #[test]
    fn test_window_clear_opening() {
        let front = build_front(&cfg(), &[]);
        let right = front.get_by_tag("window_beam_right").expect("tagged");
        let left = front.get_by_tag("window_beam_left").expect("tagged");
        let gap = left.bounding_box().expect("jamb").min.x - right.bounding_box().expect("jamb").max.x;
        assert_relative_eq!(gap, 1095.0 + 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sill_fills_the_opening() {
        let front = build_front(&cfg(), &[]);
        let sill = front
            .get_by_tag("window_beam_bottom")
            .and_then(|p| p.bounding_box())
            .expect("sill");
        // Shoulder spans the clear opening; tenons reach 30 mm into each jamb.
        assert_relative_eq!(sill.xlen(), 1110.0 + 60.0, epsilon = 1e-9);
        assert_relative_eq!(sill.center().z, 2000.0 + 95.0 - 1525.0 - 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_members_do_not_overlap() {
        let front = build_front(&cfg(), &[]);
        let parts: Vec<&PositionedSolid> = front.iter().collect();
        for (i, a) in parts.iter().enumerate() {
            for b in &parts[i + 1..] {
                assert!(overlap(a.solid(), b.solid()) < 1e-3);
            }
        }
    }

    #[test]
    fn test_back_is_translated_front() {
        let c = cfg();
        let front = build_front(&c, &[]);
        let back = build_back(&c, &[]);
        assert_eq!(back.len(), 4);
        for (f, b) in front.iter().zip(&back) {
            let (fb, bb) = (
                f.bounding_box().expect("front part"),
                b.bounding_box().expect("back part"),
            );
            assert_relative_eq!(bb.center().y, fb.center().y - 2095.0, epsilon = 1e-9);
            assert_relative_eq!(b.volume(), f.volume(), epsilon = 1e-6);
        }
        assert_eq!(back.as_slice()[0].tag(), Some("back_beam"));
        assert_eq!(
            back.as_slice()[1].display_offset(),
            Vec3::new(200.0, -400.0, 200.0)
        );
    }

    #[test]
    fn test_cut_objects_are_removed() {
        let c = cfg();
        let block = Solid::centered_cube(400.0, 400.0, 400.0).translate(445.0, 1047.5, 1000.0);
        let front = build_front(&c, std::slice::from_ref(&block));
        let right = front.get_by_tag("window_beam_right").expect("tagged");
        assert!(overlap(right.solid(), &block) < 1e-6);
        assert_relative_eq!(
            right.volume(),
            build_front(&c, &[]).as_slice()[2].volume() - 95.0 * 95.0 * 400.0,
            epsilon = 1e-3
        );
    }
}
