//! Primitive rendering functions.
//!
//! Rasterization of the shapes markers and axes are built from.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

/// Draw a line using Bresenham's algorithm (non-antialiased).
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a line `width` pixels wide by offsetting parallel Bresenham lines
/// across the minor axis.
pub fn draw_thick_line(
    fb: &mut Framebuffer,
    from: Point,
    to: Point,
    width: u32,
    color: Rgba,
) {
    let width = width.max(1) as i32;
    let steep = (to.y - from.y).abs() > (to.x - from.x).abs();
    let first = -(width - 1) / 2;

    for offset in first..first + width {
        let (ox, oy) = if steep { (offset, 0) } else { (0, offset) };
        draw_line(
            fb,
            from.x.round() as i32 + ox,
            from.y.round() as i32 + oy,
            to.x.round() as i32 + ox,
            to.y.round() as i32 + oy,
            color,
        );
    }
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: Rect, color: Rgba, thickness: u32) {
    let thickness = thickness.max(1);
    let x = rect.x.max(0.0) as u32;
    let y = rect.y.max(0.0) as u32;
    let width = rect.width.max(0.0) as u32;
    let height = rect.height.max(0.0) as u32;

    // Top, bottom, left, right
    fb.fill_rect(x, y, width, thickness, color);
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
        if width > thickness {
            let right = x + width - thickness;
            fb.fill_rect(right, y + thickness, thickness, height - 2 * thickness, color);
        }
    }
}

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        draw_horizontal_line(fb, cx - x, cx + x, cy + y, color);
        draw_horizontal_line(fb, cx - x, cx + x, cy - y, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy + x, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Fill a simple polygon with the even-odd scanline rule.
///
/// Pixel centres are sampled at `(x + 0.5, y + 0.5)`.
pub fn fill_polygon(fb: &mut Framebuffer, vertices: &[Point], color: Rgba) {
    if vertices.len() < 3 {
        return;
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v.y), hi.max(v.y)));
    let first_row = min_y.floor().max(0.0) as i32;
    let last_row = max_y.ceil().min(fb.height() as f32) as i32;

    let mut crossings = Vec::with_capacity(vertices.len());
    for row in first_row..last_row {
        let sample_y = row as f32 + 0.5;
        crossings.clear();

        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            if (a.y <= sample_y) != (b.y <= sample_y) {
                crossings.push(a.x + (sample_y - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil() as i32;
            let end = (span[1] - 0.5).floor() as i32;
            draw_horizontal_line(fb, start, end, row, color);
        }
    }
}

/// Draw an inclusive horizontal span, clipped to the framebuffer.
#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).max(0).min(fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}
