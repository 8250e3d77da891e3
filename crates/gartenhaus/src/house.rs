//! The finished house: six part lists and the models composed from them.

use std::collections::BTreeMap;

use gartenhaus_kernel::Solid;
use tracing::debug;

use crate::assembly::AssemblyKind;
use crate::error::Result;
use crate::part::{PartList, PositionedSolid};

/// Part lists of every built sub-assembly.
#[derive(Debug, Clone, Default)]
pub struct House {
    assemblies: BTreeMap<AssemblyKind, PartList>,
}

impl House {
    /// Wrap built assemblies.
    pub fn new(assemblies: BTreeMap<AssemblyKind, PartList>) -> Self {
        Self { assemblies }
    }

    /// Parts of one assembly.
    pub fn assembly(&self, kind: AssemblyKind) -> Option<&PartList> {
        self.assemblies.get(&kind)
    }

    /// Every part, grouped right, floor, left, front, back, roof.
    pub fn all_parts(&self) -> Vec<PositionedSolid> {
        AssemblyKind::PART_ORDER
            .iter()
            .filter_map(|k| self.assemblies.get(k))
            .flat_map(|list| list.iter().cloned())
            .collect()
    }

    /// Total number of parts.
    pub fn part_count(&self) -> usize {
        self.assemblies.values().map(PartList::len).sum()
    }

    /// The house as built: union of every part in place.
    pub fn full_model(&self) -> Result<Solid> {
        debug!(parts = self.part_count(), "composing full model");
        PartList::from(self.all_parts()).union()
    }

    /// Every part moved by its display offset, then unioned.
    pub fn exploded_model(&self) -> Result<Solid> {
        debug!(parts = self.part_count(), "composing exploded model");
        PartList::from(self.all_parts()).exploded_union()
    }
}
