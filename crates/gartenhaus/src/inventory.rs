//! Bill of materials: laid-out parts grouped by bounding-box dimensions.
//!
//! Run this on the output of the fabrication layout. Before layout the
//! same beam can show up as `95x2060x95` or `2060x95x95` depending on how it
//! sits in the house.

use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::part::PositionedSolid;

/// Largest per-axis difference (mm) for two parts to count as one shape.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// One distinct part shape and how often it occurs.
#[derive(Debug, Clone, PartialEq)]
struct InventoryEntry {
    /// Extents along X, Y and Z of the first part seen with this shape.
    dims: [f64; 3],
    count: usize,
}

impl InventoryEntry {
    /// `"{x:.2}x{y:.2}x{z:.2}"`, axis order preserved.
    fn key(&self) -> String {
        dims_key(&self.dims)
    }
}

fn dims_key(d: &[f64; 3]) -> String {
    format!("{:.2}x{:.2}x{:.2}", d[0], d[1], d[2])
}

/// Part counts per distinct shape, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    tolerance: f64,
    entries: Vec<InventoryEntry>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl Inventory {
    /// Empty inventory matching shapes within `tolerance`.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            entries: Vec::new(),
        }
    }

    /// Count one part of the given extents.
    ///
    /// It joins the first entry whose dimensions are all within the
    /// tolerance, or whose key reads the same; otherwise it opens a new one.
    pub fn add_dims(&mut self, dims: [f64; 3]) {
        let key = dims_key(&dims);
        let tol = self.tolerance;
        let found = self.entries.iter_mut().find(|e| {
            e.dims.iter().zip(&dims).all(|(a, b)| (a - b).abs() <= tol) || e.key() == key
        });
        match found {
            Some(entry) => entry.count += 1,
            None => self.entries.push(InventoryEntry { dims, count: 1 }),
        }
    }

    /// Count one part. A part without geometry counts as `0x0x0`.
    pub fn add(&mut self, part: &PositionedSolid) {
        self.add_dims(part_dims(part));
    }

    /// Distinct shapes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No parts counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of parts counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Count for a formatted key.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.key() == key).map(|e| e.count)
    }

    /// `(key, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (String, usize)> + '_ {
        self.entries.iter().map(|e| (e.key(), e.count))
    }

    /// Pretty-printed JSON object, keys in first-seen order.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in self.iter() {
            map.serialize_entry(&key, &count)?;
        }
        map.end()
    }
}

fn part_dims(part: &PositionedSolid) -> [f64; 3] {
    part.bounding_box()
        .map(|bb| [bb.xlen(), bb.ylen(), bb.zlen()])
        .unwrap_or([0.0; 3])
}

/// Inventory of laid-out parts with [`DEFAULT_TOLERANCE`].
pub fn build_inventory(parts: &[PositionedSolid]) -> Inventory {
    build_inventory_with_tolerance(parts, DEFAULT_TOLERANCE)
}

/// Inventory of laid-out parts, matching shapes within `tolerance`.
pub fn build_inventory_with_tolerance(parts: &[PositionedSolid], tolerance: f64) -> Inventory {
    let dims: Vec<[f64; 3]> = parts.par_iter().map(part_dims).collect();
    let mut inventory = Inventory::new(tolerance);
    for d in dims {
        inventory.add_dims(d);
    }
    inventory
}
