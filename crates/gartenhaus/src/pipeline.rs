//! Cut dependencies between sub-assemblies and the staged build.
//!
//! An assembly that is cut against another may only be built once that
//! producer is final. [`CutGraph`] records these edges explicitly and layers
//! the assemblies into stages; assemblies within one stage share no edge
//! and are built concurrently.

use std::collections::BTreeMap;

use gartenhaus_kernel::math::Tolerance;
use gartenhaus_kernel::Solid;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::assembly::AssemblyKind;
use crate::config::HouseConfig;
use crate::error::{Error, Result};
use crate::house::House;
use crate::part::PartList;

/// Which assemblies each assembly is cut against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutGraph {
    producers: BTreeMap<AssemblyKind, Vec<AssemblyKind>>,
}

impl Default for CutGraph {
    fn default() -> Self {
        Self::standard()
    }
}

impl CutGraph {
    /// All six assemblies, no edges.
    pub fn empty() -> Self {
        Self {
            producers: AssemblyKind::ALL.iter().map(|&k| (k, Vec::new())).collect(),
        }
    }

    /// The house's joinery: side walls are cut against the front and back
    /// walls; floor and roof against all four walls.
    pub fn standard() -> Self {
        use AssemblyKind::*;
        let mut graph = Self::empty();
        for dependent in [Left, Right] {
            for producer in [Front, Back] {
                graph.add_dependency(dependent, producer);
            }
        }
        for dependent in [Floor, Roof] {
            for producer in [Right, Left, Front, Back] {
                graph.add_dependency(dependent, producer);
            }
        }
        graph
    }

    /// Cut `dependent` against `producer`. Adding an edge twice is a no-op.
    pub fn add_dependency(&mut self, dependent: AssemblyKind, producer: AssemblyKind) -> &mut Self {
        let list = self.producers.entry(dependent).or_default();
        if !list.contains(&producer) {
            list.push(producer);
        }
        self
    }

    /// Producers of `kind`, in the order their cuts are applied.
    pub fn dependencies(&self, kind: AssemblyKind) -> &[AssemblyKind] {
        self.producers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kahn layering: every assembly lands in the first stage after all of
    /// its producers. Fails on a cycle.
    pub fn stages(&self) -> Result<Vec<Vec<AssemblyKind>>> {
        let mut remaining: Vec<AssemblyKind> = self.producers.keys().copied().collect();
        let mut done: Vec<AssemblyKind> = Vec::new();
        let mut stages = Vec::new();

        while !remaining.is_empty() {
            let (ready, blocked): (Vec<_>, Vec<_>) = remaining
                .iter()
                .copied()
                .partition(|&k| self.dependencies(k).iter().all(|p| done.contains(p)));
            if ready.is_empty() {
                return Err(Error::CutCycle { remaining: blocked });
            }
            done.extend(&ready);
            stages.push(ready);
            remaining = blocked;
        }
        Ok(stages)
    }
}

/// Build the house with the standard cut graph.
pub fn build_house(cfg: &HouseConfig) -> Result<House> {
    build_house_with_graph(cfg, &CutGraph::standard())
}

/// Validate `cfg`, then build every assembly stage by stage.
pub fn build_house_with_graph(cfg: &HouseConfig, graph: &CutGraph) -> Result<House> {
    cfg.validate()?;
    let stages = graph.stages()?;

    let mut built: BTreeMap<AssemblyKind, PartList> = BTreeMap::new();
    let mut unions: BTreeMap<AssemblyKind, Solid> = BTreeMap::new();

    for (n, stage) in stages.iter().enumerate() {
        info!(stage = n, assemblies = ?stage, "building stage");
        let results: Vec<Result<(AssemblyKind, PartList, Solid)>> = stage
            .par_iter()
            .map(|&kind| {
                let cut_objects = graph
                    .dependencies(kind)
                    .iter()
                    .map(|&producer| {
                        unions.get(&producer).cloned().ok_or(Error::MissingDependency {
                            assembly: kind,
                            missing: producer,
                        })
                    })
                    .collect::<Result<Vec<Solid>>>()?;
                let parts = kind.build(cfg, &cut_objects);
                verify_parts(kind, &parts)?;
                let union = parts.union()?;
                debug!(assembly = %kind, parts = parts.len(), cells = union.num_cells(), "assembly built");
                Ok((kind, parts, union))
            })
            .collect();

        for result in results {
            let (kind, parts, union) = result?;
            built.insert(kind, parts);
            unions.insert(kind, union);
        }
    }

    let house = House::new(built);
    info!(parts = house.part_count(), "house built");
    Ok(house)
}

/// Every part must keep some volume after its cuts.
pub fn verify_parts(kind: AssemblyKind, parts: &PartList) -> Result<()> {
    if parts.is_empty() {
        return Err(Error::EmptyPartList {
            context: format!("{kind} assembly"),
        });
    }
    for (index, part) in parts.iter().enumerate() {
        if part.solid().is_empty() || part.volume() <= Tolerance::DEFAULT.volume {
            return Err(Error::DegeneratePart {
                assembly: kind,
                index,
                tag: part.tag().unwrap_or("<untagged>").to_string(),
            });
        }
    }
    Ok(())
}
