//! End-to-end checks on the default house.

use std::sync::OnceLock;

use approx::assert_relative_eq;
use gartenhaus::beam::rafter_anchor_x;
use gartenhaus::kernel::math::Vec3;
use gartenhaus::kernel::Solid;
use gartenhaus::{
    arrange_for_fabrication, arrange_with_config, build_beam, build_house, build_house_with_graph,
    build_inventory, AssemblyKind, BeamSpec, CutGraph, Error, House, HouseConfig, LongestAxisPolicy,
    NotchSpec, PositionedSolid,
};

fn house() -> &'static House {
    static HOUSE: OnceLock<House> = OnceLock::new();
    HOUSE.get_or_init(|| build_house(&HouseConfig::default()).expect("default house builds"))
}

fn laid_out() -> &'static Vec<PositionedSolid> {
    static PARTS: OnceLock<Vec<PositionedSolid>> = OnceLock::new();
    PARTS.get_or_init(|| {
        arrange_with_config(&house().all_parts(), &HouseConfig::default().layout).expect("row fits")
    })
}

#[test]
fn part_counts_per_assembly() {
    let counts: Vec<(AssemblyKind, usize)> = AssemblyKind::PART_ORDER
        .iter()
        .map(|&k| (k, house().assembly(k).map_or(0, |l| l.len())))
        .collect();
    assert_eq!(
        counts,
        vec![
            (AssemblyKind::Right, 6),
            (AssemblyKind::Floor, 8),
            (AssemblyKind::Left, 6),
            (AssemblyKind::Front, 4),
            (AssemblyKind::Back, 4),
            (AssemblyKind::Roof, 6),
        ]
    );
    assert_eq!(house().part_count(), 34);
}

#[test]
fn front_wall_frames_the_window() {
    let front = house().assembly(AssemblyKind::Front).expect("front wall");
    assert_eq!(
        front.tags(),
        vec![
            Some("front_beam"),
            Some("window_beam_left"),
            Some("window_beam_right"),
            Some("window_beam_bottom"),
        ]
    );
    assert!(front.iter().all(|p| p.volume() > 0.0));

    let jamb = |tag: &str| {
        front
            .get_by_tag(tag)
            .and_then(|p| p.bounding_box())
            .expect("window jamb")
    };
    let gap = jamb("window_beam_left").min.x - jamb("window_beam_right").max.x;
    assert_relative_eq!(gap, 1110.0, epsilon = 1e-9);
}

#[test]
fn left_wall_has_five_studs_and_a_plate() {
    let left = house().assembly(AssemblyKind::Left).expect("left wall");
    assert_eq!(left.len(), 6);
    assert_eq!(left.tags().last().copied().flatten(), Some("left_beam_top"));
}

#[test]
fn every_part_keeps_volume_and_a_tag() {
    for part in house().all_parts() {
        assert!(part.volume() > 1.0, "{:?} lost its volume", part.tag());
        assert!(part.tag().is_some());
    }
}

#[test]
fn cuts_remove_all_interference() {
    let parts = house().all_parts();
    let sum: f64 = parts.iter().map(PositionedSolid::volume).sum();
    let full = house().full_model().expect("full model");
    assert_relative_eq!(full.volume(), sum, epsilon = 1.0);
}

#[test]
fn skipping_the_cut_graph_leaves_overlaps() {
    let raw = build_house_with_graph(&HouseConfig::default(), &CutGraph::empty()).expect("builds");
    let parts = raw.all_parts();
    let sum: f64 = parts.iter().map(PositionedSolid::volume).sum();
    let full = raw.full_model().expect("full model");
    assert!(sum - full.volume() > 1000.0);
}

#[test]
fn exploded_model_is_spread_out() {
    let full = house().full_model().expect("full model");
    let exploded = house().exploded_model().expect("exploded model");
    let (f, e) = (
        full.bounding_box().expect("full"),
        exploded.bounding_box().expect("exploded"),
    );
    assert!(e.zlen() > f.zlen() + 900.0);
    assert!(e.ylen() > f.ylen());
}

#[test]
fn union_order_does_not_change_bounds() {
    let parts = house().all_parts();
    let forward = house().full_model().expect("full model");
    let backward = parts
        .iter()
        .rev()
        .fold(Solid::empty(), |acc, p| acc.union(p.solid()));
    let (a, b) = (
        forward.bounding_box().expect("forward"),
        backward.bounding_box().expect("backward"),
    );
    assert!((a.min - b.min).norm() < 1e-6);
    assert!((a.max - b.max).norm() < 1e-6);
}

#[test]
fn roof_anchor_correction() {
    let theta = 8.0_f64.to_radians();
    let x = 3000.0 / 2.0 - (3000.0 - 2095.0) / 2.0;
    let corrected = x - (x - 1500.0) * (1.0 - theta.cos());
    assert_relative_eq!(rafter_anchor_x(3000.0, 2095.0, 8.0, 0.0), corrected, epsilon = 1e-12);
}

#[test]
fn layout_is_idempotent() {
    let once = laid_out();
    let twice = arrange_with_config(once, &HouseConfig::default().layout).expect("row fits");
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
fn inventory_of_the_default_house() {
    let inventory = build_inventory(laid_out());
    assert_eq!(inventory.total(), house().part_count());
    let keys: Vec<(String, usize)> = inventory.iter().collect();
    assert_eq!(
        keys,
        vec![
            ("2360.00x95.00x95.00".to_string(), 4),
            ("2500.00x95.00x95.00".to_string(), 2),
            ("1090.00x95.00x95.00".to_string(), 1),
            ("2060.00x95.00x95.00".to_string(), 17),
            ("2190.00x95.00x95.00".to_string(), 2),
            ("1170.00x95.00x95.00".to_string(), 2),
            ("3000.00x75.00x75.00".to_string(), 6),
        ]
    );
}

#[test]
fn identical_beams_share_a_bucket_whatever_their_placement() {
    let notch = NotchSpec {
        depth: 30.0,
        width: 40.0,
        height: 40.0,
    };
    let beam = build_beam(&BeamSpec::notched(2000.0, 95.0, 120.0, notch));
    let placed = vec![
        beam.clone(),
        beam.rotate(0.0, 0.0, 90.0).translate(300.0, -40.0, 7.0),
        beam.rotate(90.0, 0.0, 0.0),
        beam.rotate(0.0, 90.0, 0.0).translate(0.0, 0.0, 1500.0),
        beam.rotate_about(gartenhaus::kernel::math::Point3::new(5.0, 5.0, 5.0), Vec3::x(), -90.0),
    ];
    let laid = arrange_for_fabrication(&placed, 195.0, &LongestAxisPolicy::default()).expect("row fits");
    let inventory = build_inventory(&laid);
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.get("2060.00x120.00x95.00"), Some(5));
}

#[test]
fn tight_row_spacing_is_rejected() {
    let err = arrange_for_fabrication(&house().all_parts(), 50.0, &LongestAxisPolicy::default())
        .expect_err("parts overlap");
    assert!(matches!(err, Error::LayoutOverlap { index: 0, next: 1, .. }));
}

#[test]
fn bad_dimensions_fail_before_building() {
    let mut cfg = HouseConfig::default();
    cfg.walls.window.width = 2000.0;
    cfg.notch.depth = 0.0;
    match build_house(&cfg) {
        Err(Error::Config(errs)) => {
            let params: Vec<&str> = errs.issues.iter().map(|i| i.parameter.as_str()).collect();
            assert!(params.contains(&"walls.window.width"));
            assert!(params.contains(&"notch.depth"));
        }
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn colliding_studs_and_joists_fail_before_building() {
    for (studs, joists, param) in [(50.0, 400.0, "walls.stud_spacing"), (500.0, 50.0, "floor.joist_spacing")] {
        let mut cfg = HouseConfig::default();
        cfg.walls.stud_spacing = studs;
        cfg.floor.joist_spacing = joists;
        match build_house(&cfg) {
            Err(Error::Config(errs)) => {
                let params: Vec<&str> = errs.issues.iter().map(|i| i.parameter.as_str()).collect();
                assert_eq!(params, vec![param]);
            }
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }
}
