// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Pixel surfaces and the primitive drawing algorithms.
//!
//! Every primitive funnels through `set_pixel`, which drops writes outside the
//! buffer. Shapes can therefore be drawn unclipped and partly off-screen.
//! Coordinates are `i32` so negative positions are representable.

use crate::{
    algorithm::{catmull_rom, cubic_bezier, quadratic_bezier},
    render::{sprite::Drawable, style::Color},
    util::{deg_to_rad, Vector2f, Vector2u},
};

pub const QUADRATIC_SEGMENTS: usize = 20;
pub const CUBIC_SEGMENTS: usize = 30;
pub const SPLINE_SEGMENTS: usize = 10;
const MIN_ARC_SEGMENTS: usize = 10;

/// Anything owning a dense row-major `width * height` pixel buffer.
pub trait RenderTarget {
    fn size(&self) -> Vector2u;

    fn pixels(&self) -> &[Color];

    fn pixels_mut(&mut self) -> &mut [Color];

    fn width(&self) -> u32 {
        self.size().x
    }

    fn height(&self) -> u32 {
        self.size().y
    }

    fn clear(&mut self, color: Color) {
        self.pixels_mut().fill(color);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let size = self.size();
        if x < 0 || y < 0 || x as u32 >= size.x || y as u32 >= size.y {
            return;
        }
        let idx = y as usize * size.x as usize + x as usize;
        if let Some(p) = self.pixels_mut().get_mut(idx) {
            *p = color;
        }
    }

    /// Black outside the buffer.
    fn get_pixel(&self, x: i32, y: i32) -> Color {
        let size = self.size();
        if x < 0 || y < 0 || x as u32 >= size.x || y as u32 >= size.y {
            return Color::BLACK;
        }
        let idx = y as usize * size.x as usize + x as usize;
        self.pixels().get(idx).copied().unwrap_or(Color::BLACK)
    }

    /// Render a drawable onto this target.
    fn draw(&mut self, drawable: &dyn Drawable)
    where
        Self: Sized,
    {
        drawable.draw(self);
    }

    /// Bresenham, both end points included.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Connect consecutive points, truncating to the pixel grid.
    fn draw_polyline(&mut self, points: &[Vector2f], color: Color) {
        for w in points.windows(2) {
            let (a, b) = (w[0].to_i32(), w[1].to_i32());
            self.draw_line(a.x, a.y, b.x, b.y, color);
        }
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        let (r, b) = (x + width - 1, y + height - 1);
        self.draw_line(x, y, r, y, color);
        self.draw_line(x, b, r, b, color);
        self.draw_line(x, y, x, b, color);
        self.draw_line(r, y, r, b, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        for py in y..y + height {
            for px in x..x + width {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Midpoint circle, eight-way symmetric.
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let (mut x, mut y, mut err) = (radius, 0, 0);
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.set_pixel(cx + px, cy + py, color);
            }
            y += 1;
            err += 1 + 2 * y;
            if 2 * (err - x) + 1 > 0 {
                x -= 1;
                err += 1 - 2 * x;
            }
        }
    }

    /// Every pixel with `x² + y² <= r²`.
    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let r2 = radius as i64 * radius as i64;
        for y in -radius..=radius {
            for x in -radius..=radius {
                if (x as i64 * x as i64 + y as i64 * y as i64) <= r2 {
                    self.set_pixel(cx + x, cy + y, color);
                }
            }
        }
    }

    /// Two-region midpoint ellipse.
    fn draw_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Color) {
        if rx < 0 || ry < 0 {
            return;
        }
        let (rx2, ry2) = (rx as i64 * rx as i64, ry as i64 * ry as i64);
        let (mut x, mut y) = (0i64, ry as i64);
        let plot4 = |t: &mut Self, x: i64, y: i64| {
            let (x, y) = (x as i32, y as i32);
            t.set_pixel(cx + x, cy + y, color);
            t.set_pixel(cx - x, cy + y, color);
            t.set_pixel(cx + x, cy - y, color);
            t.set_pixel(cx - x, cy - y, color);
        };

        let mut d1 = ry2 - rx2 * ry as i64 + rx2 / 4;
        let mut dx = 2 * ry2 * x;
        let mut dy = 2 * rx2 * y;
        while dx < dy {
            plot4(self, x, y);
            x += 1;
            dx += 2 * ry2;
            if d1 < 0 {
                d1 += dx + ry2;
            } else {
                y -= 1;
                dy -= 2 * rx2;
                d1 += dx - dy + ry2;
            }
        }

        let xf = x as f64 + 0.5;
        let ym = (y - 1) as f64;
        let mut d2 = (ry2 as f64 * xf * xf + rx2 as f64 * ym * ym - (rx2 * ry2) as f64) as i64;
        while y >= 0 {
            plot4(self, x, y);
            y -= 1;
            dy -= 2 * rx2;
            if d2 > 0 {
                d2 += rx2 - dy;
            } else {
                x += 1;
                dx += 2 * ry2;
                d2 += dx - dy + rx2;
            }
        }
    }

    /// Per scanline x-extent from `(x/rx)² + (y/ry)² <= 1`.
    fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Color) {
        if rx < 0 || ry < 0 {
            return;
        }
        if ry == 0 {
            self.draw_line(cx - rx, cy, cx + rx, cy, color);
            return;
        }
        let (rx2, ry2) = ((rx as f32).powi(2), (ry as f32).powi(2));
        for y in -ry..=ry {
            let x_max = (rx2 * (1.0 - (y * y) as f32 / ry2)).max(0.0).sqrt() as i32;
            for x in -x_max..=x_max {
                self.set_pixel(cx + x, cy + y, color);
            }
        }
    }

    /// Angles in degrees, sampled into at least ten straight segments.
    fn draw_arc(&mut self, cx: i32, cy: i32, radius: i32, start: f32, end: f32, color: Color) {
        let (s, e) = (deg_to_rad(start), deg_to_rad(end));
        let segments = ((end - start).abs() / 5.0) as usize;
        let segments = segments.max(MIN_ARC_SEGMENTS);
        let step = (e - s) / segments as f32;
        let r = radius as f32;
        let at = |a: f32| (cx + (a.cos() * r) as i32, cy + (a.sin() * r) as i32);

        let mut prev = at(s);
        for i in 1..=segments {
            let next = at(s + i as f32 * step);
            self.draw_line(prev.0, prev.1, next.0, next.1, color);
            prev = next;
        }
    }

    fn draw_bezier_quadratic(&mut self, p0: Vector2f, p1: Vector2f, p2: Vector2f, color: Color) {
        self.draw_bezier_quadratic_segments(p0, p1, p2, color, QUADRATIC_SEGMENTS);
    }

    fn draw_bezier_quadratic_segments(
        &mut self,
        p0: Vector2f,
        p1: Vector2f,
        p2: Vector2f,
        color: Color,
        segments: usize,
    ) {
        self.draw_polyline(&quadratic_bezier(p0, p1, p2, segments), color);
    }

    fn draw_bezier_cubic(
        &mut self,
        p0: Vector2f,
        p1: Vector2f,
        p2: Vector2f,
        p3: Vector2f,
        color: Color,
    ) {
        self.draw_bezier_cubic_segments(p0, p1, p2, p3, color, CUBIC_SEGMENTS);
    }

    fn draw_bezier_cubic_segments(
        &mut self,
        p0: Vector2f,
        p1: Vector2f,
        p2: Vector2f,
        p3: Vector2f,
        color: Color,
        segments: usize,
    ) {
        self.draw_polyline(&cubic_bezier(p0, p1, p2, p3, segments), color);
    }

    /// Catmull-Rom through `points[1..len-1]`; needs at least four points.
    fn draw_spline(&mut self, points: &[Vector2f], color: Color) {
        self.draw_spline_segments(points, color, SPLINE_SEGMENTS);
    }

    fn draw_spline_segments(&mut self, points: &[Vector2f], color: Color, segments: usize) {
        self.draw_polyline(&catmull_rom(points, segments), color);
    }

    /// Scanline fill between sorted pairs of edge crossings.
    /// Only correct for convex input, concave input mis-renders without failing.
    fn fill_convex_polygon(&mut self, points: &[Vector2f], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((points[0].y, points[0].y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in (min_y as i32)..=(max_y as i32) {
            let yf = y as f32;
            crossings.clear();
            for (i, p1) in points.iter().enumerate() {
                let p2 = points[(i + 1) % points.len()];
                if (p1.y <= yf && p2.y > yf) || (p2.y <= yf && p1.y > yf) {
                    crossings.push(p1.x + (yf - p1.y) / (p2.y - p1.y) * (p2.x - p1.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                for x in (pair[0] as i32)..=(pair[1] as i32) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Even-odd test at each pixel centre of the bounding box.
    /// Handles concave and self-intersecting polygons.
    fn fill_polygon(&mut self, points: &[Vector2f], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (mut min, mut max) = (points[0], points[0]);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        for y in (min.y as i32)..=(max.y as i32) {
            for x in (min.x as i32)..=(max.x as i32) {
                if point_in_polygon(points, x as f32 + 0.5, y as f32 + 0.5) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Closed outline.
    fn draw_polygon(&mut self, points: &[Vector2f], color: Color) {
        if points.len() < 2 {
            return;
        }
        for (i, p1) in points.iter().enumerate() {
            let p2 = points[(i + 1) % points.len()];
            let (a, b) = (p1.to_i32(), p2.to_i32());
            self.draw_line(a.x, a.y, b.x, b.y, color);
        }
    }

    /// Quad offset by half the thickness along the unit perpendicular, filled convex.
    fn draw_thick_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
        thickness: i32,
    ) {
        if thickness <= 1 {
            self.draw_line(x0, y0, x1, y1, color);
            return;
        }
        let (dx, dy) = ((x1 - x0) as f32, (y1 - y0) as f32);
        let len = dx.hypot(dy);
        if len < 0.001 {
            return;
        }
        let half = thickness as f32 / 2.0;
        let off = Vector2f::new(-dy / len, dx / len) * half;
        let a = Vector2f::new(x0 as f32, y0 as f32);
        let b = Vector2f::new(x1 as f32, y1 as f32);
        self.fill_convex_polygon(&[a - off, a + off, b + off, b - off], color);
    }
}

/// Ray-casting even-odd containment.
pub fn point_in_polygon(points: &[Vector2f], px: f32, py: f32) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, pi) in points.iter().enumerate() {
        let pj = points[j];
        if (pi.y > py) != (pj.y > py) && px < (pj.x - pi.x) * (py - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Off-screen render target.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Reallocate to a new size, contents become black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Color::BLACK);
    }
}

impl RenderTarget for PixelBuffer {
    fn size(&self) -> Vector2u {
        Vector2u::new(self.width, self.height)
    }

    fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LineCounter {
        buf: PixelBuffer,
        lines: usize,
    }

    impl RenderTarget for LineCounter {
        fn size(&self) -> Vector2u {
            self.buf.size()
        }

        fn pixels(&self) -> &[Color] {
            self.buf.pixels()
        }

        fn pixels_mut(&mut self) -> &mut [Color] {
            self.buf.pixels_mut()
        }

        fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32, _color: Color) {
            self.lines += 1;
        }
    }

    #[test]
    fn arc_segments_grow_with_span() {
        let mut t = LineCounter {
            buf: PixelBuffer::new(4, 4),
            lines: 0,
        };
        t.draw_arc(2, 2, 10, 0.0, 30.0, Color::WHITE);
        assert_eq!(t.lines, MIN_ARC_SEGMENTS);

        t.lines = 0;
        t.draw_arc(2, 2, 10, 0.0, 360.0, Color::WHITE);
        assert_eq!(t.lines, 72);
        assert!(t.lines > MIN_ARC_SEGMENTS);

        t.lines = 0;
        t.draw_arc(2, 2, 10, 90.0, -90.0, Color::WHITE);
        assert_eq!(t.lines, 36);
    }

    fn lit(buf: &PixelBuffer) -> Vec<(i32, i32)> {
        let mut v = vec![];
        for y in 0..buf.height() as i32 {
            for x in 0..buf.width() as i32 {
                if buf.get_pixel(x, y) != Color::BLACK {
                    v.push((x, y));
                }
            }
        }
        v
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut buf = PixelBuffer::new(4, 3);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MAX, i32::MIN)] {
            buf.set_pixel(x, y, Color::WHITE);
            assert_eq!(buf.get_pixel(x, y), Color::BLACK);
        }
        assert!(lit(&buf).is_empty());
        assert_eq!(buf.pixels().len(), 12);
    }

    #[test]
    fn line_includes_both_ends() {
        let mut buf = PixelBuffer::new(10, 10);
        buf.draw_line(7, 2, 1, 5, Color::RED);
        assert_eq!(buf.get_pixel(7, 2), Color::RED);
        assert_eq!(buf.get_pixel(1, 5), Color::RED);
        // one pixel per column for a shallow line
        assert_eq!(lit(&buf).len(), 7);

        let mut single = PixelBuffer::new(3, 3);
        single.draw_line(1, 1, 1, 1, Color::RED);
        assert_eq!(lit(&single), vec![(1, 1)]);
    }

    #[test]
    fn line_is_clipped() {
        let mut buf = PixelBuffer::new(5, 5);
        buf.draw_line(-10, 2, 20, 2, Color::GREEN);
        assert_eq!(lit(&buf).len(), 5);
    }

    #[test]
    fn rects() {
        let mut buf = PixelBuffer::new(6, 6);
        buf.draw_rect(1, 1, 4, 3, Color::WHITE);
        assert_eq!(lit(&buf).len(), 10);
        assert_eq!(buf.get_pixel(2, 2), Color::BLACK);
        buf.fill_rect(1, 1, 4, 3, Color::WHITE);
        assert_eq!(lit(&buf).len(), 12);
    }

    #[test]
    fn circles() {
        let mut buf = PixelBuffer::new(11, 11);
        buf.draw_circle(5, 5, 4, Color::WHITE);
        for (x, y) in [(9, 5), (1, 5), (5, 9), (5, 1)] {
            assert_eq!(buf.get_pixel(x, y), Color::WHITE);
        }
        assert_eq!(buf.get_pixel(5, 5), Color::BLACK);

        let mut fill = PixelBuffer::new(11, 11);
        fill.fill_circle(5, 5, 2, Color::WHITE);
        // lattice points with x²+y² <= 4
        assert_eq!(lit(&fill).len(), 13);
    }

    #[test]
    fn ellipses() {
        let mut buf = PixelBuffer::new(21, 11);
        buf.draw_ellipse(10, 5, 8, 4, Color::WHITE);
        for (x, y) in [(18, 5), (2, 5), (10, 1), (10, 9)] {
            assert_eq!(buf.get_pixel(x, y), Color::WHITE, "({x},{y})");
        }
        let mut fill = PixelBuffer::new(21, 11);
        fill.fill_ellipse(10, 5, 8, 4, Color::WHITE);
        assert_eq!(fill.get_pixel(10, 5), Color::WHITE);
        assert_eq!(fill.get_pixel(2, 5), Color::WHITE);
        assert_eq!(fill.get_pixel(2, 1), Color::BLACK);

        let mut flat = PixelBuffer::new(5, 5);
        flat.fill_ellipse(2, 2, 2, 0, Color::WHITE);
        assert_eq!(lit(&flat).len(), 5);
    }

    #[test]
    fn arc_quarter() {
        let mut buf = PixelBuffer::new(12, 12);
        buf.draw_arc(0, 0, 10, 0.0, 90.0, Color::WHITE);
        assert_eq!(buf.get_pixel(10, 0), Color::WHITE);
        assert_eq!(buf.get_pixel(0, 10), Color::WHITE);
        assert_eq!(buf.get_pixel(3, 3), Color::BLACK);
    }

    #[test]
    fn curves_reach_endpoints() {
        let mut buf = PixelBuffer::new(20, 20);
        buf.draw_bezier_quadratic(
            Vector2f::new(0.0, 0.0),
            Vector2f::new(10.0, 19.0),
            Vector2f::new(19.0, 0.0),
            Color::WHITE,
        );
        assert_eq!(buf.get_pixel(0, 0), Color::WHITE);
        assert_eq!(buf.get_pixel(19, 0), Color::WHITE);

        buf.clear(Color::BLACK);
        buf.draw_bezier_cubic(
            Vector2f::new(0.0, 19.0),
            Vector2f::new(5.0, 0.0),
            Vector2f::new(14.0, 0.0),
            Vector2f::new(19.0, 19.0),
            Color::WHITE,
        );
        assert_eq!(buf.get_pixel(0, 19), Color::WHITE);
        assert_eq!(buf.get_pixel(19, 19), Color::WHITE);
    }

    #[test]
    fn spline_skips_outer_points() {
        let mut buf = PixelBuffer::new(20, 5);
        let pts = [
            Vector2f::new(0.0, 2.0),
            Vector2f::new(5.0, 2.0),
            Vector2f::new(10.0, 2.0),
            Vector2f::new(15.0, 2.0),
        ];
        buf.draw_spline(&pts, Color::WHITE);
        assert_eq!(buf.get_pixel(5, 2), Color::WHITE);
        assert_eq!(buf.get_pixel(10, 2), Color::WHITE);
        assert_eq!(buf.get_pixel(0, 2), Color::BLACK);
        assert_eq!(buf.get_pixel(15, 2), Color::BLACK);

        let mut none = PixelBuffer::new(20, 5);
        none.draw_spline(&pts[..3], Color::WHITE);
        assert!(lit(&none).is_empty());
    }

    #[test]
    fn polygon_fills_agree_on_convex_input() {
        let square = [
            Vector2f::new(1.0, 1.0),
            Vector2f::new(5.0, 1.0),
            Vector2f::new(5.0, 5.0),
            Vector2f::new(1.0, 5.0),
        ];
        let mut a = PixelBuffer::new(8, 8);
        a.fill_polygon(&square, Color::WHITE);
        assert_eq!(lit(&a).len(), 16);
        let mut b = PixelBuffer::new(8, 8);
        b.fill_convex_polygon(&square, Color::WHITE);
        assert!(lit(&a).iter().all(|p| lit(&b).contains(p)));
    }

    #[test]
    fn even_odd_handles_concave() {
        // U shape, the notch stays empty
        let u = [
            Vector2f::new(0.0, 0.0),
            Vector2f::new(3.0, 0.0),
            Vector2f::new(3.0, 6.0),
            Vector2f::new(6.0, 6.0),
            Vector2f::new(6.0, 0.0),
            Vector2f::new(9.0, 0.0),
            Vector2f::new(9.0, 9.0),
            Vector2f::new(0.0, 9.0),
        ];
        let mut buf = PixelBuffer::new(10, 10);
        buf.fill_polygon(&u, Color::WHITE);
        assert_eq!(buf.get_pixel(4, 2), Color::BLACK);
        assert_eq!(buf.get_pixel(1, 2), Color::WHITE);
        assert_eq!(buf.get_pixel(4, 7), Color::WHITE);
    }

    #[test]
    fn thick_line() {
        let mut buf = PixelBuffer::new(12, 12);
        buf.draw_thick_line(1, 6, 10, 6, Color::WHITE, 4);
        // scanlines 4..8, the bottom edge row is not crossed
        for y in 4..8 {
            assert_eq!(buf.get_pixel(5, y), Color::WHITE, "y={y}");
        }
        assert_eq!(buf.get_pixel(5, 1), Color::BLACK);

        let mut thin = PixelBuffer::new(12, 12);
        thin.draw_thick_line(1, 6, 10, 6, Color::WHITE, 1);
        assert_eq!(lit(&thin).len(), 10);

        let mut dot = PixelBuffer::new(4, 4);
        dot.draw_thick_line(2, 2, 2, 2, Color::WHITE, 3);
        assert!(lit(&dot).is_empty());
    }

    #[test]
    fn polygon_outline_closes() {
        let mut buf = PixelBuffer::new(6, 6);
        let tri = [Vector2f::new(0.0, 0.0), Vector2f::new(4.0, 0.0), Vector2f::new(0.0, 4.0)];
        buf.draw_polygon(&tri, Color::WHITE);
        assert_eq!(buf.get_pixel(0, 2), Color::WHITE);
        assert_eq!(buf.get_pixel(2, 2), Color::WHITE);
        assert_eq!(buf.get_pixel(2, 0), Color::WHITE);
    }
}
