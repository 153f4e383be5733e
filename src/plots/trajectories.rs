//! Point trajectories over discrete time steps.

use crate::error::{Error, Result};
use crate::geometry::Point;

/// Coordinate tensor of shape `points x 2 x steps`.
///
/// Stored row-major as `[point][axis][step]` with axis 0 = x and axis 1 = y,
/// so one point's x track is a contiguous run of `steps` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectories {
    data: Vec<f32>,
    points: usize,
    steps: usize,
}

impl Trajectories {
    /// Wrap a flat `[point][axis][step]` buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `steps` is zero, and
    /// [`Error::ShapeMismatch`] when `data.len() != points * 2 * steps` or
    /// that product overflows.
    pub fn from_vec(data: Vec<f32>, points: usize, steps: usize) -> Result<Self> {
        if steps == 0 {
            return Err(Error::EmptyData);
        }

        let expected = tensor_len(points, steps, data.len())?;
        if data.len() != expected {
            return Err(Error::ShapeMismatch { what: "coordinates", expected, actual: data.len() });
        }

        Ok(Self { data, points, steps })
    }

    /// Build from a function of `(point, step)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `steps` is zero, and
    /// [`Error::ShapeMismatch`] when `points * 2 * steps` overflows.
    pub fn from_fn(
        points: usize,
        steps: usize,
        mut f: impl FnMut(usize, usize) -> Point,
    ) -> Result<Self> {
        if steps == 0 {
            return Err(Error::EmptyData);
        }

        let mut data = vec![0.0; tensor_len(points, steps, 0)?];
        for point in 0..points {
            for step in 0..steps {
                let p = f(point, step);
                data[(point * 2) * steps + step] = p.x;
                data[(point * 2 + 1) * steps + step] = p.y;
            }
        }
        Self::from_vec(data, points, steps)
    }

    /// Build from one path per point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for no paths or empty paths, and
    /// [`Error::ShapeMismatch`] when paths differ in length.
    pub fn from_paths(paths: &[Vec<Point>]) -> Result<Self> {
        let steps = paths.first().map_or(0, Vec::len);
        if let Some(path) = paths.iter().find(|p| p.len() != steps) {
            return Err(Error::ShapeMismatch { what: "path", expected: steps, actual: path.len() });
        }
        Self::from_fn(paths.len(), steps, |point, step| paths[point][step])
    }

    /// Number of points (`n`).
    #[must_use]
    pub const fn points(&self) -> usize {
        self.points
    }

    /// Number of time steps (`t`).
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Position of `point` at `step`, or `None` when either is out of range.
    #[must_use]
    pub fn position(&self, point: usize, step: usize) -> Option<Point> {
        (point < self.points && step < self.steps).then(|| self.at(point, step))
    }

    /// Positions of `members` at `step`, in member order.
    ///
    /// Every member and `step` must be in range.
    pub(crate) fn slice<'s>(
        &'s self,
        members: &'s [usize],
        step: usize,
    ) -> impl Iterator<Item = Point> + 's {
        members.iter().map(move |&point| self.at(point, step))
    }

    /// Every value on one axis (0 = x, 1 = y) across all points and steps.
    #[must_use]
    pub fn axis_values(&self, axis: usize) -> Vec<f32> {
        self.data
            .chunks_exact(self.steps)
            .skip(axis)
            .step_by(2)
            .flatten()
            .copied()
            .collect()
    }

    /// Number of positions with a NaN or infinite coordinate.
    #[must_use]
    pub fn non_finite_count(&self) -> usize {
        (0..self.points)
            .flat_map(|point| (0..self.steps).map(move |step| (point, step)))
            .filter(|&(point, step)| !self.at(point, step).is_finite())
            .count()
    }

    #[inline]
    fn at(&self, point: usize, step: usize) -> Point {
        let x = self.data[(point * 2) * self.steps + step];
        let y = self.data[(point * 2 + 1) * self.steps + step];
        Point::new(x, y)
    }
}

/// `points * 2 * steps`, the number of coordinates in the tensor.
///
/// An overflowing shape is reported against `actual` with `expected`
/// saturated to `usize::MAX`.
fn tensor_len(points: usize, steps: usize, actual: usize) -> Result<usize> {
    points.checked_mul(2).and_then(|n| n.checked_mul(steps)).ok_or(Error::ShapeMismatch {
        what: "coordinates",
        expected: usize::MAX,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_layout() {
        // 2 points, 3 steps: [p0x.., p0y.., p1x.., p1y..]
        let data = vec![
            0.0, 1.0, 2.0, 10.0, 11.0, 12.0, //
            5.0, 6.0, 7.0, 50.0, 60.0, 70.0,
        ];
        let traj = Trajectories::from_vec(data, 2, 3).unwrap();

        assert_eq!(traj.points(), 2);
        assert_eq!(traj.steps(), 3);
        assert_eq!(traj.position(0, 1), Some(Point::new(1.0, 11.0)));
        assert_eq!(traj.position(1, 2), Some(Point::new(7.0, 70.0)));
        assert_eq!(traj.position(2, 0), None);
        assert_eq!(traj.position(0, 3), None);
    }

    #[test]
    fn test_from_vec_wrong_length() {
        let err = Trajectories::from_vec(vec![0.0; 11], 2, 3).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { expected: 12, actual: 11, .. }));
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(Trajectories::from_vec(vec![], 3, 0), Err(Error::EmptyData)));
        assert!(matches!(
            Trajectories::from_fn(usize::MAX, 0, |_, _| Point::ORIGIN),
            Err(Error::EmptyData)
        ));
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        let err = Trajectories::from_vec(vec![], usize::MAX / 2 + 1, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch { what: "coordinates", expected: usize::MAX, actual: 0 }
        ));

        let err = Trajectories::from_vec(vec![0.0; 4], 2, usize::MAX / 3).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { actual: 4, .. }));

        let mut calls = 0;
        let result = Trajectories::from_fn(usize::MAX, 2, |_, _| {
            calls += 1;
            Point::ORIGIN
        });
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_zero_points_allowed() {
        let traj = Trajectories::from_vec(vec![], 0, 4).unwrap();
        assert_eq!(traj.points(), 0);
        assert!(traj.axis_values(0).is_empty());
    }

    #[test]
    fn test_from_fn_matches_position() {
        let traj =
            Trajectories::from_fn(3, 4, |p, t| Point::new(p as f32, t as f32 * 2.0)).unwrap();
        for p in 0..3 {
            for t in 0..4 {
                assert_eq!(traj.position(p, t), Some(Point::new(p as f32, t as f32 * 2.0)));
            }
        }
    }

    #[test]
    fn test_from_paths() {
        let paths = vec![
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![Point::new(5.0, 5.0), Point::new(6.0, 4.0)],
        ];
        let traj = Trajectories::from_paths(&paths).unwrap();
        assert_eq!(traj.position(1, 1), Some(Point::new(6.0, 4.0)));

        let ragged = vec![vec![Point::ORIGIN; 2], vec![Point::ORIGIN; 3]];
        assert!(matches!(
            Trajectories::from_paths(&ragged),
            Err(Error::ShapeMismatch { what: "path", .. })
        ));
        assert!(matches!(Trajectories::from_paths(&[]), Err(Error::EmptyData)));
    }

    #[test]
    fn test_slice_members() {
        let traj = Trajectories::from_fn(4, 2, |p, t| Point::new(p as f32, t as f32)).unwrap();
        let picked: Vec<Point> = traj.slice(&[3, 1], 1).collect();
        assert_eq!(picked, vec![Point::new(3.0, 1.0), Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_axis_values() {
        let traj =
            Trajectories::from_fn(2, 2, |p, t| Point::new((p * 10 + t) as f32, -1.0)).unwrap();
        assert_eq!(traj.axis_values(0), vec![0.0, 1.0, 10.0, 11.0]);
        assert_eq!(traj.axis_values(1), vec![-1.0; 4]);
    }

    #[test]
    fn test_non_finite_count() {
        let traj = Trajectories::from_fn(2, 3, |p, t| {
            if p == 1 && t > 0 {
                Point::new(f32::NAN, 0.0)
            } else {
                Point::ORIGIN
            }
        })
        .unwrap();
        assert_eq!(traj.non_finite_count(), 2);
    }
}
