// TermRaster
// copyright zipxing@hotmail.com 2022～2025

use rstest::rstest;
use term_raster::{
    Canvas, FloatRect, RenderMode, Transform, Transformable, Vector2f, Vector2i, View,
};

fn close(a: Vector2f, b: Vector2f) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
}

#[rstest]
#[case(0.0, FloatRect::new(0.0, 0.0, 1.0, 1.0))]
#[case(30.0, FloatRect::new(0.0, 0.0, 1.0, 1.0))]
#[case(-75.0, FloatRect::new(0.25, 0.0, 0.5, 1.0))]
#[case(190.0, FloatRect::new(0.5, 0.5, 0.5, 0.5))]
fn pixel_world_round_trip(#[case] rotation: f32, #[case] viewport: FloatRect) {
    let mut c = Canvas::new(160, 96, RenderMode::Braille);
    let mut v = View::new(Vector2f::new(10.0, -5.0), Vector2f::new(40.0, 24.0));
    v.set_rotation(rotation);
    v.set_viewport(viewport);
    c.set_view(v);

    for y in (0..96).step_by(7) {
        for x in (0..160).step_by(9) {
            let p = Vector2i::new(x, y);
            let back = c.map_coords_to_pixel(c.map_pixel_to_coords(p));
            assert!(
                (back.x - p.x).abs() <= 1 && (back.y - p.y).abs() <= 1,
                "{:?} came back as {:?}",
                p,
                back
            );
        }
    }
}

#[test]
fn view_center_maps_to_viewport_center() {
    let c = Canvas::new(100, 60, RenderMode::Quarter);
    let mut v = View::new(Vector2f::new(7.0, 3.0), Vector2f::new(20.0, 20.0));
    v.set_rotation(45.0);
    assert_eq!(c.map_coords_to_pixel_with(Vector2f::new(7.0, 3.0), &v), Vector2i::new(50, 30));
    v.set_viewport(FloatRect::new(0.0, 0.0, 0.5, 0.5));
    assert_eq!(c.map_coords_to_pixel_with(Vector2f::new(7.0, 3.0), &v), Vector2i::new(25, 15));
}

#[test]
fn zoom_and_move_change_mapping() {
    let c = Canvas::new(100, 100, RenderMode::Ascii);
    let mut v = View::from_rect(FloatRect::new(0.0, 0.0, 100.0, 100.0));
    v.zoom(0.5);
    assert_eq!(v.size(), Vector2f::new(50.0, 50.0));
    assert_eq!(c.map_coords_to_pixel_with(Vector2f::new(75.0, 75.0), &v), Vector2i::new(100, 100));
    v.move_by(Vector2f::new(10.0, 0.0));
    assert_eq!(v.center(), Vector2f::new(60.0, 50.0));
    assert_eq!(c.map_coords_to_pixel_with(Vector2f::new(60.0, 50.0), &v), Vector2i::new(50, 50));
}

#[test]
fn transform_inverse_round_trip() {
    let mut t = Transform::IDENTITY;
    t.translate(12.0, -4.0).rotate(33.0).scale(2.0, 0.5);
    let inv = t.get_inverse();
    for p in [
        Vector2f::new(0.0, 0.0),
        Vector2f::new(3.5, -8.0),
        Vector2f::new(-100.0, 42.0),
    ] {
        assert!(close(inv.transform_point(t.transform_point(p)), p));
    }
    let id = t * inv;
    assert!(close(id.transform_point(Vector2f::new(5.0, 6.0)), Vector2f::new(5.0, 6.0)));
}

#[test]
fn transformable_origin_pivot() {
    let mut t = Transformable::new();
    t.set_origin(Vector2f::new(5.0, 5.0));
    t.set_position(Vector2f::new(100.0, 100.0));
    t.set_rotation(90.0);
    // the origin lands on the position, rotation pivots around it
    assert!(close(t.transform_point(Vector2f::new(5.0, 5.0)), Vector2f::new(100.0, 100.0)));
    assert!(close(t.transform_point(Vector2f::new(15.0, 5.0)), Vector2f::new(100.0, 110.0)));
    let local = t.inverse_transform_point(Vector2f::new(100.0, 110.0));
    assert!(close(local, Vector2f::new(15.0, 5.0)));
}
