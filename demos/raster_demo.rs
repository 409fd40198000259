// TermRaster
// copyright zipxing@hotmail.com 2022～2025

/// raster-demo: draws a small animated scene with every render mode.
///
/// Usage:
/// raster-demo                      # braille, runs until Ctrl+C
/// raster-demo --mode quarter --fps 20
/// raster-demo --config demo.toml --frames 300
///
use clap::Parser;
use log::{info, warn};
use rand::Rng;
use std::{
    path::PathBuf,
    thread,
    time::Instant,
};
use term_raster::{
    init::load_config, log::init_log, Canvas, CircleShape, Color, Drawable, Layer, Line,
    RasterConfig, RectangleShape, RenderMode, RenderQueue, RenderTarget, Shape, Vector2f,
    Vector2i, View,
};

#[derive(Parser, Debug)]
#[command(name = "raster-demo", about = "terminal raster demo")]
struct Args {
    /// braille | block | quarter | ascii
    #[arg(short, long)]
    mode: Option<RenderMode>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// frame rate cap
    #[arg(long)]
    fps: Option<u32>,
}

struct Starfield {
    stars: Vec<(Vector2i, Color)>,
}

impl Starfield {
    fn new(width: u32, height: u32, count: usize) -> Self {
        let mut rng = rand::rng();
        let stars = (0..count)
            .map(|_| {
                let p = Vector2i::new(
                    rng.random_range(0..width.max(1)) as i32,
                    rng.random_range(0..height.max(1)) as i32,
                );
                let v = rng.random_range(60..=255u8);
                (p, Color::rgb(v, v, v))
            })
            .collect();
        Self { stars }
    }

    fn twinkle(&mut self, frame: u64) {
        for (i, (_, c)) in self.stars.iter_mut().enumerate() {
            if (i as u64 + frame) % 17 == 0 {
                let v = 255 - c.r / 2;
                *c = Color::rgb(v, v, v);
            }
        }
    }
}

impl Drawable for Starfield {
    fn draw(&self, target: &mut dyn RenderTarget) {
        for (p, c) in &self.stars {
            target.set_pixel(p.x, p.y, *c);
        }
    }
}

struct Curves {
    w: f32,
    h: f32,
    phase: f32,
}

impl Drawable for Curves {
    fn draw(&self, target: &mut dyn RenderTarget) {
        let (w, h, s) = (self.w, self.h, self.phase.sin());
        target.draw_bezier_cubic(
            Vector2f::new(0.0, h * 0.9),
            Vector2f::new(w * 0.3, h * (0.5 + 0.4 * s)),
            Vector2f::new(w * 0.7, h * (0.5 - 0.4 * s)),
            Vector2f::new(w - 1.0, h * 0.9),
            Color::ORANGE,
        );
        let pts: Vec<Vector2f> = (0..8)
            .map(|i| {
                let x = w * i as f32 / 7.0;
                let y = h * 0.15 + (self.phase + i as f32).cos() * h * 0.08;
                Vector2f::new(x, y)
            })
            .collect();
        target.draw_spline(&pts, Color::MAGENTA);
        target.draw_arc(
            (w / 2.0) as i32,
            (h / 2.0) as i32,
            (h * 0.45) as i32,
            self.phase.to_degrees(),
            self.phase.to_degrees() + 120.0,
            Color::GREEN,
        );
    }
}

struct Scene {
    stars: Starfield,
    camera: View,
    planets: Vec<CircleShape>,
    hud: RectangleShape,
}

impl Scene {
    fn new(canvas: &Canvas) -> Self {
        let (w, h) = (canvas.width(), canvas.height());
        let aspect = h as f32 / w.max(1) as f32;
        let camera = View::new(Vector2f::new(0.0, 0.0), Vector2f::new(200.0, 200.0 * aspect));
        let planets = [(6.0, Color::CYAN), (4.0, Color::YELLOW), (3.0, Color::PINK)]
            .into_iter()
            .map(|(r, c)| {
                let mut p = CircleShape::new(r * w as f32 / 160.0);
                p.set_fill_color(c);
                p.set_outline_color(Color::WHITE);
                p.set_outline_thickness(1.0);
                let rr = p.radius();
                p.set_origin(Vector2f::new(rr, rr));
                p
            })
            .collect();
        let mut hud = RectangleShape::new(Vector2f::new(w as f32 * 0.25, h as f32 * 0.06));
        hud.set_fill_color(Color::DARK_GRAY);
        hud.set_position(Vector2f::new(2.0, 2.0));
        Self {
            stars: Starfield::new(w, h, (w * h / 60) as usize),
            camera,
            planets,
            hud,
        }
    }

    fn update(&mut self, canvas: &Canvas, frame: u64) {
        self.stars.twinkle(frame);
        self.camera.rotate(0.5);
        let t = frame as f32 * 0.05;
        for (i, p) in self.planets.iter_mut().enumerate() {
            let r = 25.0 + 25.0 * i as f32;
            let speed = 1.0 / (i as f32 + 1.0);
            let world = Vector2f::new((t * speed).cos() * r, (t * speed).sin() * r);
            let px = canvas.map_coords_to_pixel_with(world, &self.camera);
            p.set_position(Vector2f::new(px.x as f32, px.y as f32));
        }
    }
}

fn main() -> term_raster::Result<()> {
    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => RasterConfig::default(),
    };
    if let Some(m) = args.mode {
        cfg.render_mode = m;
    }
    if let Some(fps) = args.fps {
        cfg.frame_rate = fps;
    }
    if let Err(e) = init_log(cfg.level_filter(), &cfg.log_file) {
        eprintln!("logging disabled: {}", e);
    }
    term_raster::init_raster_config(cfg.clone());
    info!("raster-demo start {:?}", cfg);

    let _guard = Canvas::init_display()?;
    let mut canvas = Canvas::create_fullscreen(cfg.render_mode)?;
    let mut scene = Scene::new(&canvas);
    let tick = cfg.frame_duration();
    let mut frame = 0u64;

    while args.frames.map_or(true, |n| frame < n) {
        let start = Instant::now();
        if Canvas::was_resized() {
            canvas = Canvas::create_fullscreen(cfg.render_mode)?;
            scene = Scene::new(&canvas);
        }
        scene.update(&canvas, frame);

        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        let curves = Curves {
            w,
            h,
            phase: frame as f32 * 0.04,
        };
        let center = canvas.map_coords_to_pixel_with(Vector2f::new(0.0, 0.0), &scene.camera);
        let mut beam = Line::new(
            Vector2f::new(center.x as f32, center.y as f32),
            scene.planets[0].position(),
            Color::BLUE,
        );
        beam.set_thickness(2.0);

        let mut queue = RenderQueue::new();
        queue.add_layer(&scene.stars, Layer::Background);
        queue.add_layer(&curves, Layer::BackgroundDecor);
        queue.add_layer(&beam, Layer::Effects);
        for p in &scene.planets {
            queue.add_layer(p, Layer::Entities);
        }
        queue.add_layer(&scene.hud, Layer::UI);
        if let Err(e) = canvas.display_queue(&mut queue, Some(Color::BLACK)) {
            warn!("frame {} dropped: {}", frame, e);
        }

        frame += 1;
        if let Some(rest) = tick.checked_sub(start.elapsed()) {
            thread::sleep(rest);
        }
    }
    info!("raster-demo done after {} frames", frame);
    Ok(())
}
