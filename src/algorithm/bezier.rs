// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Bezier curves.
//!
//! Quadratic and cubic curves use their closed-form Bernstein polynomials.
//! Curves of any order fall back to de Casteljau's algorithm.

use crate::util::Vector2f;

/// Point on a quadratic curve at `t` in [0, 1].
pub fn quadratic_point(p0: Vector2f, p1: Vector2f, p2: Vector2f, t: f32) -> Vector2f {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Point on a cubic curve at `t` in [0, 1].
pub fn cubic_point(p0: Vector2f, p1: Vector2f, p2: Vector2f, p3: Vector2f, t: f32) -> Vector2f {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// `segments + 1` points from `p0` to `p2` inclusive. Zero segments is treated as one.
pub fn quadratic_bezier(p0: Vector2f, p1: Vector2f, p2: Vector2f, segments: usize) -> Vec<Vector2f> {
    let n = segments.max(1);
    (0..=n)
        .map(|i| quadratic_point(p0, p1, p2, i as f32 / n as f32))
        .collect()
}

/// `segments + 1` points from `p0` to `p3` inclusive. Zero segments is treated as one.
pub fn cubic_bezier(
    p0: Vector2f,
    p1: Vector2f,
    p2: Vector2f,
    p3: Vector2f,
    segments: usize,
) -> Vec<Vector2f> {
    let n = segments.max(1);
    (0..=n)
        .map(|i| cubic_point(p0, p1, p2, p3, i as f32 / n as f32))
        .collect()
}

/// de Casteljau evaluation of an arbitrary order curve. Returns `None` for no control points.
pub fn bezier_point(points: &[Vector2f], t: f32) -> Option<Vector2f> {
    let mut tmp = points.to_vec();
    let count = tmp.len();
    if count == 0 {
        return None;
    }
    for i in 1..count {
        for j in 0..(count - i) {
            tmp[j] = tmp[j] * (1.0 - t) + tmp[j + 1] * t;
        }
    }
    Some(tmp[0])
}

/// Fill `out_points` with uniformly spaced samples, first and last land on the end points.
pub fn sample_bezier(points: &[Vector2f], out_points: &mut [Vector2f]) {
    if points.is_empty() || out_points.is_empty() {
        return;
    }
    let step = if out_points.len() > 1 {
        1.0 / (out_points.len() - 1) as f32
    } else {
        0.0
    };
    for (i, item) in out_points.iter_mut().enumerate() {
        if let Some(p) = bezier_point(points, i as f32 * step) {
            *item = p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector2f, b: Vector2f) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn quadratic_hits_endpoints() {
        let pts = quadratic_bezier(
            Vector2f::new(0.0, 0.0),
            Vector2f::new(5.0, 10.0),
            Vector2f::new(10.0, 0.0),
            20,
        );
        assert_eq!(pts.len(), 21);
        assert!(close(pts[0], Vector2f::new(0.0, 0.0)));
        assert!(close(pts[20], Vector2f::new(10.0, 0.0)));
        assert!(close(pts[10], Vector2f::new(5.0, 5.0)));
    }

    #[test]
    fn closed_form_matches_de_casteljau() {
        let ctrl = [
            Vector2f::new(0.0, 0.0),
            Vector2f::new(3.0, 9.0),
            Vector2f::new(7.0, -4.0),
            Vector2f::new(10.0, 2.0),
        ];
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let a = cubic_point(ctrl[0], ctrl[1], ctrl[2], ctrl[3], t);
            let b = bezier_point(&ctrl, t).unwrap();
            assert!(close(a, b), "t={t}: {a:?} vs {b:?}");
        }
        assert_eq!(bezier_point(&[], 0.5), None);
    }

    #[test]
    fn sample_fills_slice() {
        let ctrl = [Vector2f::new(0.0, 0.0), Vector2f::new(8.0, 8.0)];
        let mut out = [Vector2f::default(); 5];
        sample_bezier(&ctrl, &mut out);
        assert!(close(out[2], Vector2f::new(4.0, 4.0)));
        assert!(close(out[4], Vector2f::new(8.0, 8.0)));
    }
}
