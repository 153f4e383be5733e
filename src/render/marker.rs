//! Marker shapes.
//!
//! Symbols follow the usual plotting conventions (`"o"`, `"x"`, `"^"`, ...),
//! so marker lists can be written as plain strings.

use std::f32::consts::{FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

use super::primitives::{draw_circle, draw_thick_line, fill_polygon};
use crate::color::Rgba;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

/// Shape used to draw every point of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    /// `"."`: small dot.
    Point,
    /// `","`: single pixel.
    Pixel,
    /// `"o"`: filled circle.
    Circle,
    /// `"s"`: filled square.
    Square,
    /// `"D"`: filled diamond.
    Diamond,
    /// `"d"`: narrow filled diamond.
    ThinDiamond,
    /// `"^"`: triangle pointing up.
    TriangleUp,
    /// `"v"`: triangle pointing down.
    TriangleDown,
    /// `"<"`: triangle pointing left.
    TriangleLeft,
    /// `">"`: triangle pointing right.
    TriangleRight,
    /// `"x"`: diagonal cross stroke.
    Cross,
    /// `"+"`: upright plus stroke.
    Plus,
    /// `"X"`: filled diagonal cross.
    FilledCross,
    /// `"P"`: filled plus.
    FilledPlus,
    /// `"*"`: five-pointed star.
    Star,
}

impl Marker {
    /// Every supported marker.
    pub const ALL: [Self; 15] = [
        Self::Point,
        Self::Pixel,
        Self::Circle,
        Self::Square,
        Self::Diamond,
        Self::ThinDiamond,
        Self::TriangleUp,
        Self::TriangleDown,
        Self::TriangleLeft,
        Self::TriangleRight,
        Self::Cross,
        Self::Plus,
        Self::FilledCross,
        Self::FilledPlus,
        Self::Star,
    ];

    /// The symbol this marker is parsed from.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Point => ".",
            Self::Pixel => ",",
            Self::Circle => "o",
            Self::Square => "s",
            Self::Diamond => "D",
            Self::ThinDiamond => "d",
            Self::TriangleUp => "^",
            Self::TriangleDown => "v",
            Self::TriangleLeft => "<",
            Self::TriangleRight => ">",
            Self::Cross => "x",
            Self::Plus => "+",
            Self::FilledCross => "X",
            Self::FilledPlus => "P",
            Self::Star => "*",
        }
    }

    /// Draw the marker centred on `center`, `size` pixels across.
    pub fn draw(self, fb: &mut Framebuffer, center: Point, size: f32, color: Rgba) {
        let r = (size / 2.0).max(0.5);
        let stroke = (size / 4.0).round().max(1.0) as u32;
        let at = |dx: f32, dy: f32| Point::new(center.x + dx, center.y + dy);

        match self {
            Self::Pixel => {
                if center.x >= 0.0 && center.y >= 0.0 {
                    fb.set_pixel(center.x as u32, center.y as u32, color);
                }
            }
            Self::Point => draw_circle(fb, round(center.x), round(center.y), round(r / 2.0), color),
            Self::Circle => draw_circle(fb, round(center.x), round(center.y), round(r), color),
            Self::Square => fill_polygon(fb, &[at(-r, -r), at(r, -r), at(r, r), at(-r, r)], color),
            Self::Diamond => {
                fill_polygon(fb, &[at(0.0, -r), at(r, 0.0), at(0.0, r), at(-r, 0.0)], color);
            }
            Self::ThinDiamond => {
                let w = r * 0.6;
                fill_polygon(fb, &[at(0.0, -r), at(w, 0.0), at(0.0, r), at(-w, 0.0)], color);
            }
            Self::TriangleUp => fill_polygon(fb, &[at(0.0, -r), at(r, r), at(-r, r)], color),
            Self::TriangleDown => fill_polygon(fb, &[at(-r, -r), at(r, -r), at(0.0, r)], color),
            Self::TriangleLeft => fill_polygon(fb, &[at(-r, 0.0), at(r, -r), at(r, r)], color),
            Self::TriangleRight => fill_polygon(fb, &[at(-r, -r), at(r, 0.0), at(-r, r)], color),
            Self::Cross => {
                draw_thick_line(fb, at(-r, -r), at(r, r), stroke, color);
                draw_thick_line(fb, at(-r, r), at(r, -r), stroke, color);
            }
            Self::Plus => {
                draw_thick_line(fb, at(-r, 0.0), at(r, 0.0), stroke, color);
                draw_thick_line(fb, at(0.0, -r), at(0.0, r), stroke, color);
            }
            Self::FilledCross => {
                fill_polygon(fb, &plus_outline(center, r, r / 3.0, FRAC_PI_4), color);
            }
            Self::FilledPlus => fill_polygon(fb, &plus_outline(center, r, r / 3.0, 0.0), color),
            Self::Star => fill_polygon(fb, &star_outline(center, r, r * 0.38), color),
        }
    }
}

#[inline]
fn round(v: f32) -> i32 {
    v.round() as i32
}

/// Twelve-vertex outline of a plus with arm half-width `w`, rotated by `angle`.
fn plus_outline(center: Point, r: f32, w: f32, angle: f32) -> Vec<Point> {
    let (sin, cos) = angle.sin_cos();
    [
        (-w, -r),
        (w, -r),
        (w, -w),
        (r, -w),
        (r, w),
        (w, w),
        (w, r),
        (-w, r),
        (-w, w),
        (-r, w),
        (-r, -w),
        (-w, -w),
    ]
    .iter()
    .map(|&(x, y)| Point::new(center.x + x * cos - y * sin, center.y + x * sin + y * cos))
    .collect()
}

/// Ten-vertex outline of a five-pointed star with its first tip pointing up.
fn star_outline(center: Point, outer: f32, inner: f32) -> Vec<Point> {
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let theta = -PI / 2.0 + i as f32 * PI / 5.0;
            Point::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect()
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.symbol() == s)
            .ok_or_else(|| Error::InvalidMarker(s.to_string()))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(40, 40).unwrap();
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("o".parse::<Marker>().unwrap(), Marker::Circle);
        assert_eq!("x".parse::<Marker>().unwrap(), Marker::Cross);
        assert_eq!("^".parse::<Marker>().unwrap(), Marker::TriangleUp);
        assert_eq!("D".parse::<Marker>().unwrap(), Marker::Diamond);
        assert_eq!("d".parse::<Marker>().unwrap(), Marker::ThinDiamond);
    }

    #[test]
    fn test_parse_unknown_symbol() {
        let err = "q".parse::<Marker>().unwrap_err();
        assert!(matches!(err, Error::InvalidMarker(ref s) if s == "q"));
        assert!("".parse::<Marker>().is_err());
    }

    #[test]
    fn test_symbols_are_unique() {
        for marker in Marker::ALL {
            assert_eq!(marker.symbol().parse::<Marker>().unwrap(), marker);
            assert_eq!(marker.to_string(), marker.symbol());
        }
    }

    #[test]
    fn test_every_marker_covers_its_centre() {
        for marker in Marker::ALL {
            let mut fb = canvas();
            marker.draw(&mut fb, Point::new(20.0, 20.0), 9.0, Rgba::RED);
            assert_eq!(fb.get_pixel(20, 20), Some(Rgba::RED), "marker {marker}");
        }
    }

    #[test]
    fn test_markers_stay_within_size() {
        for marker in Marker::ALL {
            let mut fb = canvas();
            marker.draw(&mut fb, Point::new(20.0, 20.0), 9.0, Rgba::RED);
            for (x, y) in [(13, 13), (27, 27), (20, 13), (13, 20)] {
                assert_eq!(fb.get_pixel(x, y), Some(Rgba::WHITE), "marker {marker} at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_circle_and_square_differ() {
        let mut circle = canvas();
        let mut square = canvas();
        Marker::Circle.draw(&mut circle, Point::new(20.0, 20.0), 12.0, Rgba::BLUE);
        Marker::Square.draw(&mut square, Point::new(20.0, 20.0), 12.0, Rgba::BLUE);
        assert_ne!(circle, square);
        assert!(square.count_color(Rgba::BLUE) > circle.count_color(Rgba::BLUE));
    }

    #[test]
    fn test_marker_off_canvas_is_clipped() {
        for marker in Marker::ALL {
            let mut fb = canvas();
            marker.draw(&mut fb, Point::new(-100.0, -100.0), 9.0, Rgba::RED);
            assert_eq!(fb.count_color(Rgba::RED), 0, "marker {marker}");
        }
    }
}
