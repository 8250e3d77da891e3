//! Sub-assembly builders.
//!
//! Each builder places beams relative to the square floor footprint, cuts
//! opening frames against their headers and sills, and finally cuts every
//! member against the solids of the assemblies it depends on (the
//! `cut_objects`, one union per producer). Every returned part is tagged
//! and carries its exploded-view offset.
//!
//! Coordinates: the footprint's corner posts sit on `x ∈ {0, floor_length +
//! beam_width}` and `y = ±(floor_length + beam_width) / 2`; the floor beams
//! are centred on `z = 0`.

pub mod floor;
pub mod front;
pub mod left;
pub mod right;
pub mod roof;

use std::fmt;

use gartenhaus_kernel::Solid;
use serde::{Deserialize, Serialize};

use crate::beam::build_join_beam;
use crate::config::HouseConfig;
use crate::part::{PartList, PositionedSolid};

/// One structural group of the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyKind {
    /// Joists and rim beams.
    Floor,
    /// Front wall with the window.
    Front,
    /// Back wall, a translated copy of the front.
    Back,
    /// Left wall: studs and top plate.
    Left,
    /// Right wall with the door; carries the roof's high side.
    Right,
    /// Rafters.
    Roof,
}

impl AssemblyKind {
    /// Every kind, in declaration order.
    pub const ALL: [AssemblyKind; 6] = [
        AssemblyKind::Floor,
        AssemblyKind::Front,
        AssemblyKind::Back,
        AssemblyKind::Left,
        AssemblyKind::Right,
        AssemblyKind::Roof,
    ];

    /// Order in which a finished house lists its parts.
    pub const PART_ORDER: [AssemblyKind; 6] = [
        AssemblyKind::Right,
        AssemblyKind::Floor,
        AssemblyKind::Left,
        AssemblyKind::Front,
        AssemblyKind::Back,
        AssemblyKind::Roof,
    ];

    /// Lower-case name, also the tag prefix of the assembly's parts.
    pub fn name(self) -> &'static str {
        match self {
            AssemblyKind::Floor => "floor",
            AssemblyKind::Front => "front",
            AssemblyKind::Back => "back",
            AssemblyKind::Left => "left",
            AssemblyKind::Right => "right",
            AssemblyKind::Roof => "roof",
        }
    }

    /// Run this assembly's builder.
    pub fn build(self, cfg: &HouseConfig, cut_objects: &[Solid]) -> PartList {
        match self {
            AssemblyKind::Floor => floor::build(cfg, cut_objects),
            AssemblyKind::Front => front::build_front(cfg, cut_objects),
            AssemblyKind::Back => front::build_back(cfg, cut_objects),
            AssemblyKind::Left => left::build(cfg, cut_objects),
            AssemblyKind::Right => right::build(cfg, cut_objects),
            AssemblyKind::Roof => roof::build(cfg, cut_objects),
        }
    }
}

impl fmt::Display for AssemblyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Joint beam of `length` with the configured section and notch, along +Y.
pub(crate) fn join_beam(cfg: &HouseConfig, length: f64) -> PositionedSolid {
    build_join_beam(length, cfg.beam.width, cfg.beam.height, &cfg.notch)
}

/// Plain box of the configured section, `length` along +Y.
pub(crate) fn plate(cfg: &HouseConfig, length: f64) -> PositionedSolid {
    PositionedSolid::new(Solid::centered_cube(cfg.beam.width, length, cfg.beam.height))
}

/// Turn a +Y beam to run along X.
pub(crate) fn along_x(part: PositionedSolid) -> PositionedSolid {
    part.rotate(0.0, 0.0, -90.0)
}

/// Stand a +Y beam upright.
pub(crate) fn upright(part: PositionedSolid) -> PositionedSolid {
    part.rotate(-90.0, 0.0, 0.0)
}

/// Cut `part` by every tool in order.
pub(crate) fn cut_all(part: &PositionedSolid, tools: &[Solid]) -> PositionedSolid {
    tools.iter().fold(part.clone(), |acc, tool| acc.cut(tool))
}
