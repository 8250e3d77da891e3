#![warn(missing_docs)]

//! Parametric timber-frame garden house.
//!
//! Builds a small house from notched joint beams: floor, four walls and a
//! sloped roof, each sub-assembly cut against the ones it meets so members
//! interlock without overlap. From the finished part set it derives the
//! assembled model, an exploded view, a fabrication layout with every part
//! in a canonical orientation, and an inventory of distinct part shapes.
//!
//! # Example
//!
//! ```no_run
//! use gartenhaus::{build_house, build_inventory, arrange_with_config, HouseConfig};
//!
//! let cfg = HouseConfig::default();
//! let house = build_house(&cfg)?;
//! let parts = arrange_with_config(&house.all_parts(), &cfg.layout)?;
//! let inventory = build_inventory(&parts);
//! assert_eq!(inventory.total(), house.part_count());
//! # Ok::<(), gartenhaus::Error>(())
//! ```

pub mod assembly;
pub mod beam;
pub mod config;
pub mod error;
pub mod house;
pub mod inventory;
pub mod layout;
pub mod part;
pub mod pipeline;

pub use assembly::AssemblyKind;
pub use beam::{build_beam, build_join_beam, BeamSpec, NotchSpec, StudLayout};
pub use config::HouseConfig;
pub use error::{ConfigErrors, ConfigIssue, Error, Result};
pub use gartenhaus_kernel as kernel;
pub use house::House;
pub use inventory::{build_inventory, build_inventory_with_tolerance, Inventory};
pub use layout::{arrange_for_fabrication, arrange_with_config, layout_union, LongestAxisPolicy, OrientationPolicy};
pub use part::{PartList, PositionedSolid};
pub use pipeline::{build_house, build_house_with_graph, CutGraph};
