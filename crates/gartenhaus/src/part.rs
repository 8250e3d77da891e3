//! Positioned solids: a shape together with its exploded-view offset and tag.

use gartenhaus_kernel::math::{Point3, Vec3};
use gartenhaus_kernel::{Aabb3, Solid};

use crate::error::{Error, Result};

/// A solid paired with its exploded-view offset and an optional identifier.
///
/// Immutable: every operation returns a new value. Transforms keep the tag
/// and offset; booleans keep the left operand's offset and drop the tag,
/// so the caller re-tags parts whose identity matters downstream.
#[derive(Debug, Clone, Default)]
pub struct PositionedSolid {
    solid: Solid,
    display_offset: Vec3,
    tag: Option<String>,
}

impl PositionedSolid {
    /// Wrap a solid with zero offset and no tag.
    pub fn new(solid: Solid) -> Self {
        Self {
            solid,
            display_offset: Vec3::zeros(),
            tag: None,
        }
    }

    /// Same part, tagged.
    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..self
        }
    }

    /// Same part with the given exploded-view offset.
    pub fn with_display_offset(self, x: f64, y: f64, z: f64) -> Self {
        Self {
            display_offset: Vec3::new(x, y, z),
            ..self
        }
    }

    /// The shape in its assembled position.
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Exploded-view offset. Never used for structural placement.
    pub fn display_offset(&self) -> Vec3 {
        self.display_offset
    }

    /// Part identifier, if tagged.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn map_solid(&self, solid: Solid) -> Self {
        Self {
            solid,
            display_offset: self.display_offset,
            tag: self.tag.clone(),
        }
    }

    /// Translate the shape.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Self {
        self.map_solid(self.solid.translate(x, y, z))
    }

    /// Rotate the shape by `angle_deg` about `axis` through `pivot`.
    pub fn rotate_about(&self, pivot: Point3, axis: Vec3, angle_deg: f64) -> Self {
        self.map_solid(self.solid.rotate_about(pivot, axis, angle_deg))
    }

    /// Rotate about the origin (Z first, then Y, then X).
    pub fn rotate(&self, x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        self.map_solid(self.solid.rotate(x_deg, y_deg, z_deg))
    }

    /// Remove `tool` from this part.
    pub fn cut(&self, tool: &Solid) -> Self {
        Self {
            solid: self.solid.difference(tool),
            display_offset: self.display_offset,
            tag: None,
        }
    }

    /// Remove another part from this one.
    pub fn cut_part(&self, tool: &PositionedSolid) -> Self {
        self.cut(&tool.solid)
    }

    /// Merge another part into this one.
    pub fn union(&self, other: &PositionedSolid) -> Self {
        Self {
            solid: self.solid.union(&other.solid),
            display_offset: self.display_offset,
            tag: None,
        }
    }

    /// The shape moved by its display offset.
    pub fn exploded(&self) -> Solid {
        self.solid.translate_vec(self.display_offset)
    }

    /// Bounding box of the assembled shape.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        self.solid.bounding_box()
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        self.solid.volume()
    }
}

/// Ordered output of one sub-assembly.
#[derive(Debug, Clone, Default)]
pub struct PartList {
    parts: Vec<PositionedSolid>,
}

impl PartList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part.
    pub fn push(&mut self, part: PositionedSolid) {
        self.parts.push(part);
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// No parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PositionedSolid> {
        self.parts.iter()
    }

    /// The parts as a slice.
    pub fn as_slice(&self) -> &[PositionedSolid] {
        &self.parts
    }

    /// Part tags in order; untagged parts show as `None`.
    pub fn tags(&self) -> Vec<Option<&str>> {
        self.parts.iter().map(PositionedSolid::tag).collect()
    }

    /// First part carrying `tag`.
    pub fn get_by_tag(&self, tag: &str) -> Option<&PositionedSolid> {
        self.parts.iter().find(|p| p.tag() == Some(tag))
    }

    /// Ordered union of the assembled shapes.
    pub fn union(&self) -> Result<Solid> {
        union_all(self.parts.iter().map(|p| p.solid.clone()), "part list")
    }

    /// Ordered union of the exploded shapes.
    pub fn exploded_union(&self) -> Result<Solid> {
        union_all(self.parts.iter().map(PositionedSolid::exploded), "exploded part list")
    }
}

impl FromIterator<PositionedSolid> for PartList {
    fn from_iter<I: IntoIterator<Item = PositionedSolid>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<PositionedSolid>> for PartList {
    fn from(parts: Vec<PositionedSolid>) -> Self {
        Self { parts }
    }
}

impl IntoIterator for PartList {
    type Item = PositionedSolid;
    type IntoIter = std::vec::IntoIter<PositionedSolid>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

impl<'a> IntoIterator for &'a PartList {
    type Item = &'a PositionedSolid;
    type IntoIter = std::slice::Iter<'a, PositionedSolid>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Left fold with boolean union; an empty input is an error.
pub fn union_all(solids: impl IntoIterator<Item = Solid>, context: &str) -> Result<Solid> {
    let mut iter = solids.into_iter();
    let first = iter.next().ok_or_else(|| Error::EmptyPartList {
        context: context.to_string(),
    })?;
    Ok(iter.fold(first, |acc, s| acc.union(&s)))
}
