// TermRaster
// copyright zipxing@hotmail.com 2022～2025

use rstest::rstest;
use std::cell::RefCell;
use term_raster::{
    render::glyph::{self, encode_cell},
    Canvas, CircleShape, Color, Drawable, Layer, PixelBuffer, RenderMode, RenderQueue,
    RenderTarget, Shape, Vector2f,
};

#[rstest]
#[case(RenderMode::Braille, '\u{2800}', '\u{28FF}')]
#[case(RenderMode::Block, '▀', '▀')]
#[case(RenderMode::Quarter, ' ', '█')]
#[case(RenderMode::Ascii, ' ', '@')]
fn blank_and_full_cells(#[case] mode: RenderMode, #[case] off: char, #[case] on: char) {
    let (cw, ch) = mode.cell_size();
    let mut buf = PixelBuffer::new(cw, ch);
    assert_eq!(encode_cell(mode, &buf, 0, 0).ch, off);
    buf.clear(Color::WHITE);
    let cell = encode_cell(mode, &buf, 0, 0);
    assert_eq!(cell.ch, on);
    assert_eq!(cell.fg, Color::WHITE);
}

#[test]
fn block_blank_cell_is_black_on_black() {
    let buf = PixelBuffer::new(1, 2);
    let cell = encode_cell(RenderMode::Block, &buf, 0, 0);
    assert_eq!((cell.fg, cell.bg), (Color::BLACK, Some(Color::BLACK)));
}

#[rstest]
#[case(RenderMode::Braille, (81, 25))]
#[case(RenderMode::Block, (161, 49))]
#[case(RenderMode::Quarter, (81, 49))]
#[case(RenderMode::Ascii, (161, 97))]
fn grid_rounds_up(#[case] mode: RenderMode, #[case] grid: (u32, u32)) {
    let c = Canvas::new(161, 97, mode);
    assert_eq!(c.grid_size(), grid);
    let out = c.render();
    assert_eq!(out.lines().count(), grid.1 as usize);
}

#[test]
fn braille_frame_end_to_end() {
    let mut c = Canvas::new(4, 4, RenderMode::Braille);
    c.set_pixel(0, 0, Color::WHITE);
    c.set_pixel(1, 1, Color::WHITE);
    let expected = "\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m\u{2811}\u{2800}\x1b[0m\n";
    assert_eq!(c.render(), expected);
    assert_eq!(c.grid_size(), (2, 1));

    let mut c = Canvas::new(4, 8, RenderMode::Braille);
    c.set_pixel(0, 0, Color::WHITE);
    c.set_pixel(1, 1, Color::WHITE);
    let blank = "\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m\u{2800}\u{2800}\x1b[0m\n";
    assert_eq!(c.render(), format!("{}{}", expected, blank));
}

#[test]
fn out_of_bounds_drawing_is_ignored() {
    let mut c = Canvas::new(16, 16, RenderMode::Quarter);
    c.set_pixel(-1, 0, Color::RED);
    c.set_pixel(16, 3, Color::RED);
    c.set_pixel(3, 1000, Color::RED);
    c.draw_line(-100, -100, 100, 100, Color::GREEN);
    c.fill_circle(0, 0, 40, Color::BLUE);
    c.draw_ellipse(-5, 20, 30, 12, Color::YELLOW);
    c.fill_rect(-8, -8, 4, 4, Color::RED);
    assert_eq!(c.get_pixel(-1, 0), Color::BLACK);
    assert_eq!(c.get_pixel(16, 16), Color::BLACK);
    assert_eq!(c.pixels().len(), 256);
    assert_eq!(c.get_pixel(15, 15), Color::BLUE);
}

struct Tagged<'a> {
    tag: char,
    log: &'a RefCell<String>,
}

impl Drawable for Tagged<'_> {
    fn draw(&self, target: &mut dyn RenderTarget) {
        self.log.borrow_mut().push(self.tag);
        target.set_pixel(0, 0, Color::rgb(self.tag as u8, 0, 0));
    }
}

#[test]
fn queue_draws_in_z_order() {
    let log = RefCell::new(String::new());
    let a = Tagged { tag: 'A', log: &log };
    let b = Tagged { tag: 'B', log: &log };
    let c = Tagged { tag: 'C', log: &log };
    let mut q = RenderQueue::new();
    q.add(&a, 0);
    q.add(&b, 0);
    q.add(&c, 5);
    q.render(&mut PixelBuffer::new(1, 1));
    assert_eq!(*log.borrow(), "ABC");
    q.clear();
    log.borrow_mut().clear();

    q.add(&c, 10);
    q.add(&a, 0);
    q.add(&b, 5);
    let mut canvas = Canvas::new(2, 4, RenderMode::Braille);
    canvas.compose(&mut q, None);
    assert_eq!(*log.borrow(), "ABC");
    assert_eq!(canvas.get_pixel(0, 0), Color::rgb(b'C', 0, 0));
    assert!(q.is_empty());
}

#[test]
fn equal_z_keeps_insertion_order() {
    let log = RefCell::new(String::new());
    let items: Vec<Tagged> = "xyz".chars().map(|tag| Tagged { tag, log: &log }).collect();
    let top = Tagged { tag: 'T', log: &log };
    let mut q = RenderQueue::new();
    q.add_layer(&top, Layer::UI);
    for it in &items {
        q.add_layer(it, Layer::Entities);
    }
    q.render(&mut PixelBuffer::new(1, 1));
    assert_eq!(*log.borrow(), "xyzT");
}

#[test]
fn shape_queue_on_canvas() {
    let mut c = Canvas::new(40, 40, RenderMode::Braille);
    let mut back = CircleShape::new(10.0);
    back.set_fill_color(Color::RED);
    back.set_position(Vector2f::new(10.0, 10.0));
    let mut front = CircleShape::new(5.0);
    front.set_fill_color(Color::GREEN);
    front.set_position(Vector2f::new(15.0, 15.0));

    let mut q = RenderQueue::new();
    q.add_layer(&front, Layer::Player);
    q.add_layer(&back, Layer::Background);
    c.compose(&mut q, Some(Color::BLACK));
    assert_eq!(c.get_pixel(20, 20), Color::GREEN);
    assert_eq!(c.get_pixel(14, 20), Color::RED);
    assert_eq!(c.get_pixel(1, 1), Color::BLACK);
    assert!(c.render().contains(glyph::RESET));
}
