//! Category layers: one per distinct attribute value.

use std::collections::BTreeMap;

use super::trajectories::Trajectories;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::render::Marker;

/// Marker assigned to each attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkerTable {
    markers: BTreeMap<usize, Marker>,
}

impl MarkerTable {
    /// Explicit `(attribute, marker)` pairs, for attribute values that are not
    /// small consecutive integers.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, Marker)>) -> Self {
        Self { markers: pairs.into_iter().collect() }
    }

    /// Parse marker symbols positionally: entry `i` serves attribute `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMarker`] for an unknown symbol.
    pub fn parse<S: AsRef<str>>(symbols: &[S]) -> Result<Self> {
        let markers = symbols.iter().map(|s| s.as_ref().parse()).collect::<Result<Vec<Marker>>>()?;
        Ok(markers.into())
    }

    /// Marker for `attribute`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMarker`] when no entry exists.
    pub fn get(&self, attribute: usize) -> Result<Marker> {
        self.markers
            .get(&attribute)
            .copied()
            .ok_or(Error::MissingMarker { attribute, available: self.markers.len() })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl From<Vec<Marker>> for MarkerTable {
    fn from(markers: Vec<Marker>) -> Self {
        Self::from_pairs(markers.into_iter().enumerate())
    }
}

impl From<&[Marker]> for MarkerTable {
    fn from(markers: &[Marker]) -> Self {
        Self::from_pairs(markers.iter().copied().enumerate())
    }
}

impl<const N: usize> From<[Marker; N]> for MarkerTable {
    fn from(markers: [Marker; N]) -> Self {
        Self::from_pairs(markers.into_iter().enumerate())
    }
}

/// Indices of the points carrying each distinct attribute value.
///
/// Keys are ascending; each member list is in ascending point order.
#[must_use]
pub fn partition(attributes: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (point, &attribute) in attributes.iter().enumerate() {
        groups.entry(attribute).or_default().push(point);
    }
    groups
}

/// Points sharing one attribute value, drawn with one marker.
///
/// Marker and colors are fixed at construction; only the offsets change
/// from frame to frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    attribute: usize,
    marker: Marker,
    members: Vec<usize>,
    colors: Vec<Rgba>,
    offsets: Vec<Point>,
}

impl Layer {
    pub(crate) fn new(
        attribute: usize,
        marker: Marker,
        members: Vec<usize>,
        colors: Vec<Rgba>,
        trajectories: &Trajectories,
    ) -> Self {
        let offsets = trajectories.slice(&members, 0).collect();
        Self { attribute, marker, members, colors, offsets }
    }

    /// Replace the offsets with the members' positions at `step`.
    pub(crate) fn set_offsets(&mut self, trajectories: &Trajectories, step: usize) {
        self.offsets.clear();
        self.offsets.extend(trajectories.slice(&self.members, step));
    }

    /// Attribute value shared by the layer.
    #[must_use]
    pub const fn attribute(&self) -> usize {
        self.attribute
    }

    /// Marker shape.
    #[must_use]
    pub const fn marker(&self) -> Marker {
        self.marker
    }

    /// Point indices, ascending.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Per-member colors.
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Per-member positions for the current frame, in data coordinates.
    #[must_use]
    pub fn offsets(&self) -> &[Point] {
        &self.offsets
    }

    /// Number of points in the layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the layer has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
