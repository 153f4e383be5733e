//! Animated categorical scatter plot.
//!
//! Points are split into one [`Layer`] per attribute value. Each layer keeps
//! its marker and per-point colors for the whole animation; advancing to a
//! frame only replaces the layer offsets with a time slice of the
//! trajectories.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use super::layer::{partition, Layer, MarkerTable};
use super::trajectories::Trajectories;
use crate::animation::Animation;
use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::scale::{LabelColors, Palette, Viewport};

/// Per-frame layer state for a set of trajectories.
#[derive(Debug, Clone)]
pub struct AnimatedScatter<'a> {
    trajectories: &'a Trajectories,
    layers: BTreeMap<usize, Layer>,
    frame: usize,
}

impl<'a> AnimatedScatter<'a> {
    /// Build one layer per distinct attribute, positioned at frame 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when `labels` or `attributes` do not
    /// have one entry per point, and [`Error::MissingMarker`] when an
    /// attribute has no marker.
    pub fn new(
        trajectories: &'a Trajectories,
        labels: &[i64],
        attributes: &[usize],
        markers: &MarkerTable,
        palette: Palette,
    ) -> Result<Self> {
        let points = trajectories.points();
        check_len("labels", points, labels.len())?;
        check_len("attributes", points, attributes.len())?;

        let colors = LabelColors::new(labels, palette);
        let mut layers = BTreeMap::new();
        for (attribute, members) in partition(attributes) {
            let marker = markers.get(attribute)?;
            let layer_colors = members.iter().map(|&point| colors.color(labels[point])).collect();
            debug!("layer {attribute}: {} points with marker {marker:?}", members.len());
            layers.insert(
                attribute,
                Layer::new(attribute, marker, members, layer_colors, trajectories),
            );
        }

        Ok(Self { trajectories, layers, frame: 0 })
    }

    /// Move every layer to `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameOutOfRange`] when `frame` is not below
    /// [`frame_count`](Self::frame_count).
    pub fn update(&mut self, frame: usize) -> Result<&BTreeMap<usize, Layer>> {
        let frame_count = self.frame_count();
        if frame >= frame_count {
            return Err(Error::FrameOutOfRange { frame, frame_count });
        }

        trace!("frame {frame}/{frame_count}");
        for layer in self.layers.values_mut() {
            layer.set_offsets(self.trajectories, frame);
        }
        self.frame = frame;
        Ok(&self.layers)
    }

    /// Rasterize the current offsets, layers in ascending attribute order.
    ///
    /// Points with a non-finite coordinate are skipped.
    pub fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, marker_size: f32) {
        for layer in self.layers.values() {
            for (&offset, &color) in layer.offsets().iter().zip(layer.colors()) {
                if offset.is_finite() {
                    layer.marker().draw(fb, viewport.project(offset), marker_size, color);
                }
            }
        }
    }

    /// Layers keyed by attribute value.
    #[must_use]
    pub fn layers(&self) -> &BTreeMap<usize, Layer> {
        &self.layers
    }

    /// Layer for one attribute value.
    #[must_use]
    pub fn layer(&self, attribute: usize) -> Option<&Layer> {
        self.layers.get(&attribute)
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of frames, one per time step.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.trajectories.steps()
    }

    /// Frame the offsets currently show.
    #[must_use]
    pub const fn current_frame(&self) -> usize {
        self.frame
    }

    /// The trajectories being animated.
    #[must_use]
    pub const fn trajectories(&self) -> &'a Trajectories {
        self.trajectories
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::ShapeMismatch { what, expected, actual })
    }
}

/// Builder for animated scatter plots.
///
/// ```no_run
/// use trajectory_anim::prelude::*;
///
/// let traj = Trajectories::from_fn(3, 2, |p, t| Point::new(p as f32, t as f32))?;
/// let mut animation = ScatterAnimation::new(&traj)
///     .labels(&[1, 2, 3])
///     .attributes(&[0, 0, 1])
///     .markers(MarkerTable::parse(&["o", "x"])?)
///     .interval_ms(200)
///     .build()?;
/// animation.save("points.png")?;
/// # Ok::<(), trajectory_anim::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScatterAnimation<'a> {
    trajectories: &'a Trajectories,
    labels: Vec<i64>,
    attributes: Vec<usize>,
    markers: MarkerTable,
    config: AnimationConfig,
    save_path: Option<PathBuf>,
}

impl<'a> ScatterAnimation<'a> {
    /// Start a builder over `trajectories`.
    #[must_use]
    pub fn new(trajectories: &'a Trajectories) -> Self {
        Self {
            trajectories,
            labels: Vec::new(),
            attributes: Vec::new(),
            markers: MarkerTable::default(),
            config: AnimationConfig::default(),
            save_path: None,
        }
    }

    /// Set one label per point (colors).
    #[must_use]
    pub fn labels(mut self, labels: &[i64]) -> Self {
        self.labels = labels.to_vec();
        self
    }

    /// Set one attribute per point (marker and layer).
    #[must_use]
    pub fn attributes(mut self, attributes: &[usize]) -> Self {
        self.attributes = attributes.to_vec();
        self
    }

    /// Set the attribute-to-marker table.
    #[must_use]
    pub fn markers(mut self, markers: impl Into<MarkerTable>) -> Self {
        self.markers = markers.into();
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: AnimationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Set the delay between frames in milliseconds.
    #[must_use]
    pub fn interval_ms(mut self, interval_ms: u64) -> Self {
        self.config.interval_ms = interval_ms;
        self
    }

    /// Set the marker diameter in pixels.
    #[must_use]
    pub fn marker_size(mut self, size: f32) -> Self {
        self.config.marker_size = size;
        self
    }

    /// Set the label palette.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    /// Save the animation to `path` as part of [`build`](Self::build).
    #[must_use]
    pub fn save_to(mut self, path: impl AsRef<Path>) -> Self {
        self.save_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Validate the inputs, build the layers and, if a save path was set,
    /// write the animation.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or input shapes are invalid, an
    /// attribute has no marker, or the file cannot be written.
    pub fn build(self) -> Result<Animation<'a>> {
        self.config.validate()?;
        let scatter = AnimatedScatter::new(
            self.trajectories,
            &self.labels,
            &self.attributes,
            &self.markers,
            self.config.palette,
        )?;

        let mut animation = Animation::new(scatter, self.config)?;
        if let Some(path) = self.save_path {
            animation.save(path)?;
        }
        Ok(animation)
    }
}

/// Animate `trajectories` with default settings.
///
/// Equivalent to [`ScatterAnimation`] with the given inputs; when
/// `save_path` is set the animation is also written there as an animated PNG.
///
/// # Errors
///
/// See [`ScatterAnimation::build`].
pub fn animate_scatter<'a>(
    trajectories: &'a Trajectories,
    labels: &[i64],
    attributes: &[usize],
    markers: impl Into<MarkerTable>,
    save_path: Option<&Path>,
) -> Result<Animation<'a>> {
    let builder =
        ScatterAnimation::new(trajectories).labels(labels).attributes(attributes).markers(markers);
    match save_path {
        Some(path) => builder.save_to(path).build(),
        None => builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::geometry::{Point, Rect};
    use crate::render::Marker;
    use proptest::prelude::*;

    fn scenario() -> Trajectories {
        // n=3, t=2
        Trajectories::from_paths(&[
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![Point::new(2.0, 0.0), Point::new(3.0, -1.0)],
            vec![Point::new(4.0, 4.0), Point::new(5.0, 6.0)],
        ])
        .unwrap()
    }

    fn scatter(traj: &Trajectories) -> AnimatedScatter<'_> {
        let markers = MarkerTable::parse(&["o", "x"]).unwrap();
        AnimatedScatter::new(traj, &[1, 2, 3], &[0, 0, 1], &markers, Palette::Tab10).unwrap()
    }

    #[test]
    fn test_scenario_layers() {
        let traj = scenario();
        let scatter = scatter(&traj);

        assert_eq!(scatter.layer_count(), 2);
        let circles = scatter.layer(0).unwrap();
        assert_eq!(circles.marker(), Marker::Circle);
        assert_eq!(circles.members(), &[0, 1]);
        let crosses = scatter.layer(1).unwrap();
        assert_eq!(crosses.marker(), Marker::Cross);
        assert_eq!(crosses.members(), &[2]);
    }

    #[test]
    fn test_scenario_frames() {
        let traj = scenario();
        let mut scatter = scatter(&traj);

        assert_eq!(
            scatter.layer(0).unwrap().offsets(),
            &[Point::new(0.0, 0.0), Point::new(2.0, 0.0)]
        );
        assert_eq!(scatter.layer(1).unwrap().offsets(), &[Point::new(4.0, 4.0)]);

        let layers = scatter.update(1).unwrap();
        assert_eq!(layers[&0].offsets(), &[Point::new(1.0, 1.0), Point::new(3.0, -1.0)]);
        assert_eq!(layers[&1].offsets(), &[Point::new(5.0, 6.0)]);
        assert_eq!(scatter.current_frame(), 1);
    }

    #[test]
    fn test_colors_fixed_across_frames() {
        let traj = scenario();
        let mut scatter = scatter(&traj);
        let before = scatter.layer(0).unwrap().colors().to_vec();
        scatter.update(1).unwrap();
        assert_eq!(scatter.layer(0).unwrap().colors(), before.as_slice());
        assert_eq!(before, vec![Palette::Tab10.color(0, 3), Palette::Tab10.color(1, 3)]);
    }

    #[test]
    fn test_same_label_same_color_across_layers() {
        let traj = scenario();
        let markers = MarkerTable::parse(&["o", "x"]).unwrap();
        let scatter =
            AnimatedScatter::new(&traj, &[9, 4, 9], &[0, 1, 1], &markers, Palette::Tab10).unwrap();
        assert_eq!(scatter.layer(0).unwrap().colors()[0], scatter.layer(1).unwrap().colors()[1]);
    }

    #[test]
    fn test_frame_out_of_range() {
        let traj = scenario();
        let mut scatter = scatter(&traj);
        assert!(matches!(
            scatter.update(2),
            Err(Error::FrameOutOfRange { frame: 2, frame_count: 2 })
        ));
        assert_eq!(scatter.current_frame(), 0);
    }

    #[test]
    fn test_label_length_mismatch() {
        let traj = scenario();
        let markers = MarkerTable::parse(&["o", "x"]).unwrap();
        let err = AnimatedScatter::new(&traj, &[1, 2], &[0, 0, 1], &markers, Palette::Tab10)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { what: "labels", expected: 3, actual: 2 }));
    }

    #[test]
    fn test_attribute_length_mismatch() {
        let traj = scenario();
        let markers = MarkerTable::parse(&["o", "x"]).unwrap();
        let err = AnimatedScatter::new(&traj, &[1, 2, 3], &[0, 0, 1, 1], &markers, Palette::Tab10)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { what: "attributes", .. }));
    }

    #[test]
    fn test_attribute_without_marker() {
        let traj = scenario();
        let markers = MarkerTable::parse(&["o"]).unwrap();
        let err = AnimatedScatter::new(&traj, &[1, 2, 3], &[0, 0, 1], &markers, Palette::Tab10)
            .unwrap_err();
        assert!(matches!(err, Error::MissingMarker { attribute: 1, available: 1 }));
    }

    #[test]
    fn test_draw_uses_layer_colors() {
        let traj = scenario();
        let scatter = scatter(&traj);
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        let viewport =
            Viewport::fit(&traj.axis_values(0), &traj.axis_values(1), area, 0.1).unwrap();
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);
        scatter.draw(&mut fb, &viewport, 5.0);

        for layer in scatter.layers().values() {
            for (&offset, &color) in layer.offsets().iter().zip(layer.colors()) {
                let px = viewport.project(offset);
                assert_eq!(fb.get_pixel(px.x.round() as u32, px.y.round() as u32), Some(color));
            }
        }
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        let traj = scenario();
        let result = ScatterAnimation::new(&traj)
            .labels(&[1, 2, 3])
            .attributes(&[0, 0, 1])
            .markers([Marker::Circle, Marker::Cross])
            .interval_ms(0)
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_layer_count_matches_distinct_attributes(
            attributes in prop::collection::vec(0usize..6, 0..40),
            steps in 1usize..5,
        ) {
            let n = attributes.len();
            let traj =
                Trajectories::from_fn(n, steps, |p, t| Point::new(p as f32, t as f32)).unwrap();
            let labels: Vec<i64> = (0..n as i64).collect();
            let markers = MarkerTable::from(vec![Marker::Circle; 6]);
            let scatter =
                AnimatedScatter::new(&traj, &labels, &attributes, &markers, Palette::Tab10)
                    .unwrap();

            let distinct: std::collections::BTreeSet<usize> = attributes.iter().copied().collect();
            prop_assert_eq!(scatter.layer_count(), distinct.len());
            prop_assert_eq!(scatter.layers().values().map(Layer::len).sum::<usize>(), n);
        }

        #[test]
        fn prop_offsets_equal_time_slice(
            attributes in prop::collection::vec(0usize..3, 1..20),
            steps in 1usize..6,
            seed in any::<u32>(),
        ) {
            let n = attributes.len();
            let traj = Trajectories::from_fn(n, steps, |p, t| {
                let v = seed.wrapping_mul(31).wrapping_add((p * 97 + t * 13) as u32) as f32;
                Point::new(v.sin() * 100.0, v.cos() * 50.0)
            }).unwrap();
            let labels = vec![0i64; n];
            let markers = MarkerTable::from(vec![Marker::Circle, Marker::Square, Marker::Star]);
            let mut scatter =
                AnimatedScatter::new(&traj, &labels, &attributes, &markers, Palette::Tab10)
                    .unwrap();

            for frame in 0..steps {
                let layers = scatter.update(frame).unwrap();
                for layer in layers.values() {
                    for (&point, &offset) in layer.members().iter().zip(layer.offsets()) {
                        prop_assert_eq!(Some(offset), traj.position(point, frame));
                        prop_assert_eq!(attributes[point], layer.attribute());
                    }
                }
            }
        }
    }
}
