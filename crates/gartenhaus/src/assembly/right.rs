//! Right wall: corner studs, a framed door and the high top plate.

use gartenhaus_kernel::Solid;
use tracing::debug;

use super::{cut_all, join_beam, plate, upright};
use crate::config::HouseConfig;
use crate::part::PartList;

/// `[right_beam_right, right_beam_left, right_beam_door_left,
/// right_beam_door_right, right_beam_top, right_beam_door_top]`.
///
/// The door jambs stand `door.width + 2·safety_spacing` apart (clear),
/// the first one `door_offset` from the back corner post.
pub fn build(cfg: &HouseConfig, cut_objects: &[Solid]) -> PartList {
    let fl = cfg.floor_length;
    let bw = cfg.beam.width;
    let s = cfg.safety_spacing;
    let u = cfg.explode_unit;
    let bl = cfg.walls.high_beam_length;
    let door = cfg.walls.door;
    let offset = cfg.walls.door_offset;
    debug!(door_width = door.width, door_height = door.height, "building right wall");

    let stud = upright(join_beam(cfg, bl));
    let z = bl / 2.0 + bw / 2.0;
    let right = stud.translate(0.0, fl / 2.0 + bw / 2.0, z);
    let left = stud.translate(0.0, -fl / 2.0 - bw / 2.0, z);
    let door_right = left.translate(0.0, offset, 0.0);
    let door_left = door_right.translate(0.0, door.width + 2.0 * s + bw, 0.0);
    let header = join_beam(cfg, door.width + 2.0 * s).translate(
        0.0,
        -fl / 2.0 + door.width / 2.0 + offset + s,
        door.height + bw + s,
    );
    let top = plate(cfg, fl + cfg.walls.top_plate_overhang).translate(0.0, 0.0, bl + bw);

    let door_left = door_left.cut_part(&header);
    let door_right = door_right.cut_part(&header);
    let studs = right
        .union(&left)
        .union(&door_left)
        .union(&door_right);
    let top = top.cut_part(&studs);

    [
        (right, "right_beam_right", [0.0, 0.0, u]),
        (left, "right_beam_left", [0.0, 0.0, u]),
        (door_left, "right_beam_door_left", [0.0, u, u]),
        (door_right, "right_beam_door_right", [0.0, 0.0, u]),
        (top, "right_beam_top", [0.0, 0.0, 2.8 * u]),
        (header, "right_beam_door_top", [0.0, u / 2.0, u]),
    ]
    .into_iter()
    .map(|(part, tag, [x, y, z])| {
        cut_all(&part, cut_objects)
            .with_tag(tag)
            .with_display_offset(x, y, z)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::test_support::{cfg, overlap};
    use approx::assert_relative_eq;

    #[test]
    fn test_six_tagged_parts() {
        let right = build(&cfg(), &[]);
        assert_eq!(right.len(), 6);
        assert_eq!(right.tags()[4], Some("right_beam_top"));
        assert!(right.iter().all(|p| p.volume() > 0.0));
    }

    #[test]
    fn test_door_clear_opening() {
        let right = build(&cfg(), &[]);
        let jamb = |tag: &str| {
            right
                .get_by_tag(tag)
                .and_then(|p| p.bounding_box())
                .expect("door jamb")
        };
        let gap = jamb("right_beam_door_left").min.y - jamb("right_beam_door_right").max.y;
        assert_relative_eq!(gap, 1000.0 + 2.0 * 15.0, epsilon = 1e-9);

        let header = jamb("right_beam_door_top");
        // Clear height above the floor beams' top face.
        assert_relative_eq!(header.min.z - 47.5, 2000.0 + 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_header_seats_in_jambs() {
        let right = build(&cfg(), &[]);
        let corner = right.get_by_tag("right_beam_right").expect("corner");
        let jamb = right.get_by_tag("right_beam_door_left").expect("jamb");
        assert_relative_eq!(
            corner.volume() - jamb.volume(),
            40.0 * 40.0 * 30.0,
            epsilon = 1e-3
        );
        let header = right.get_by_tag("right_beam_door_top").expect("header");
        assert!(overlap(header.solid(), jamb.solid()) < 1e-3);
    }

    #[test]
    fn test_top_plate_sits_on_the_studs() {
        let right = build(&cfg(), &[]);
        let top = right
            .get_by_tag("right_beam_top")
            .and_then(|p| p.bounding_box())
            .expect("top plate");
        assert_relative_eq!(top.min.z, 2300.0 + 95.0 / 2.0, epsilon = 1e-9);
        assert_relative_eq!(top.ylen(), 2500.0, epsilon = 1e-9);
    }
}
