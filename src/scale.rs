//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties: trajectory coordinates
//! to pixel positions, and point labels to colors.

use std::collections::BTreeMap;

use trueno::Vector;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        // Halved so domains wider than f32::MAX keep a finite span
        let t = (value * 0.5 - self.domain_min * 0.5)
            / (self.domain_max * 0.5 - self.domain_min * 0.5);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Min and max of the finite values in `data`.
///
/// Returns `None` when no finite value is present.
#[must_use]
pub fn finite_extent(data: &[f32]) -> Option<(f32, f32)> {
    let finite: Vec<f32> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    let values = Vector::from_vec(finite);
    Some((values.min().ok()?, values.max().ok()?))
}

/// Pad an extent by `fraction` of its span on both sides.
///
/// A zero-width extent is widened by half a unit or 0.1% of its magnitude,
/// whichever is larger, so it still maps to a non-degenerate scale at any
/// f32 magnitude. Results are clamped to the finite f32 range.
fn padded((min, max): (f32, f32), fraction: f32) -> (f32, f32) {
    let half_span = max * 0.5 - min * 0.5;
    let pad = if half_span < f32::EPSILON / 2.0 {
        (min.abs().max(max.abs()) * 1e-3).max(0.5)
    } else {
        half_span * (2.0 * fraction)
    };
    ((min - pad).max(f32::MIN), (max + pad).min(f32::MAX))
}

/// Fixed mapping from data space to pixel space for a whole animation.
///
/// The y axis is flipped so larger values are drawn higher up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x: LinearScale,
    y: LinearScale,
    plot_area: Rect,
}

impl Viewport {
    /// Fit a viewport around every finite coordinate in `xs` and `ys`.
    ///
    /// Without any finite coordinate the viewport covers the unit square.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot area is degenerate.
    pub fn fit(xs: &[f32], ys: &[f32], plot_area: Rect, padding: f32) -> Result<Self> {
        let x_domain = padded(finite_extent(xs).unwrap_or((0.0, 1.0)), padding);
        let y_domain = padded(finite_extent(ys).unwrap_or((0.0, 1.0)), padding);

        Ok(Self {
            x: LinearScale::new(x_domain, (plot_area.x, plot_area.right()))?,
            y: LinearScale::new(y_domain, (plot_area.bottom(), plot_area.y))?,
            plot_area,
        })
    }

    /// Map a data point to pixel coordinates.
    #[must_use]
    pub fn project(&self, point: Point) -> Point {
        Point::new(self.x.scale(point.x), self.y.scale(point.y))
    }

    /// Pixel rectangle the data is drawn into.
    #[must_use]
    pub const fn plot_area(&self) -> Rect {
        self.plot_area
    }

    /// Data-space x and y domains.
    #[must_use]
    pub fn domains(&self) -> ((f32, f32), (f32, f32)) {
        (self.x.domain(), self.y.domain())
    }
}

/// Color scale interpolating between evenly spaced color stops.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Create a viridis color scale (perceptually uniform).
    #[must_use]
    pub fn viridis(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain,
        )
        .ok()
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = ((t * segment_count as f32).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

/// Palette used to color points by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Palette {
    /// The ten qualitative "tab10" colors, reused cyclically.
    #[default]
    Tab10,
    /// Viridis, spread evenly over the distinct labels.
    Viridis,
}

impl Palette {
    const TAB10: [Rgba; 10] = [
        Rgba::rgb(31, 119, 180),
        Rgba::rgb(255, 127, 14),
        Rgba::rgb(44, 160, 44),
        Rgba::rgb(214, 39, 40),
        Rgba::rgb(148, 103, 189),
        Rgba::rgb(140, 86, 75),
        Rgba::rgb(227, 119, 194),
        Rgba::rgb(127, 127, 127),
        Rgba::rgb(188, 189, 34),
        Rgba::rgb(23, 190, 207),
    ];

    /// Color for the label at `rank` among `count` distinct labels.
    #[must_use]
    pub fn color(self, rank: usize, count: usize) -> Rgba {
        match self {
            Self::Tab10 => Self::TAB10[rank % Self::TAB10.len()],
            Self::Viridis => {
                let last = count.saturating_sub(1).max(1) as f32;
                ColorScale::viridis((0.0, last))
                    .map_or(Self::TAB10[0], |scale| scale.scale(rank as f32))
            }
        }
    }
}

/// Label-to-color lookup shared by every layer of an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelColors {
    mapping: BTreeMap<i64, Rgba>,
}

impl LabelColors {
    /// Assign colors to the distinct labels in ascending order.
    #[must_use]
    pub fn new(labels: &[i64], palette: Palette) -> Self {
        let mut mapping: BTreeMap<i64, Rgba> = labels.iter().map(|&l| (l, Rgba::BLACK)).collect();
        let count = mapping.len();
        for (rank, color) in mapping.values_mut().enumerate() {
            *color = palette.color(rank, count);
        }
        Self { mapping }
    }

    /// Color of `label`, or black for a label that was not seen.
    #[must_use]
    pub fn color(&self, label: i64) -> Rgba {
        self.mapping.get(&label).copied().unwrap_or(Rgba::BLACK)
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether no labels were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
