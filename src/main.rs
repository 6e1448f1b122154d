// What you SEE:
// • Your camera, mirrored and dimmed, fills the window.
// • Pinch a finger to paint with it; each finger has its own color.
// • Release a pinky pinch on the first hand to wipe the painting.
// • S starts hand tracking, X stops it, ESC quits.
// • With the built-in simulator: hold Left Mouse to pinch, 1-4 pick the finger, Tab switches hand.

use pinch_paint::camera::{BlankSource, CameraCapture, FrameSource};
use pinch_paint::config::{Config, TrackerKind};
use pinch_paint::draw::{Drawer, draw_text_5x7, rasterize};
use pinch_paint::error::Error;
use pinch_paint::lifecycle::Lifecycle;
use pinch_paint::paint::ColorMap;
use pinch_paint::process::ProcessTracker;
use pinch_paint::sim::{SimDriver, SimTracker};
use pinch_paint::sketch::Sketch;
use pinch_paint::tracker::HandTracker;
use pinch_paint::types::{Canvas, FrameBuffer, Rgb};
use std::time::{Duration, Instant};

const FINGER_NAMES: [&str; 4] = ["INDEX", "MIDDLE", "RING", "PINKY"];

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(std::env::args().skip(1))?;
    log::debug!("{config:?}");
    let (w, h) = (config.width, config.height);
    let canvas = Canvas { width: w as f32, height: h as f32 };

    /* --- Frame source + window --- */
    let mut source: Box<dyn FrameSource> = match config.camera {
        Some(index) => Box::new(CameraCapture::new(index, w as u32, h as u32)?),
        None => {
            log::info!("running without a camera");
            Box::new(BlankSource::new(w, h))
        }
    };
    let mut drawer = Drawer::new("Pinch Paint", w, h, config.fps)?;

    /* --- Hand tracker behind the start/stop controller --- */
    let (tracker, mut sim): (Box<dyn HandTracker>, Option<SimDriver>) = match &config.tracker {
        TrackerKind::Sim => {
            let (tracker, driver) = SimTracker::new(canvas);
            (Box::new(tracker) as Box<dyn HandTracker>, Some(driver))
        }
        TrackerKind::Process { program, args } => {
            (Box::new(ProcessTracker::new(program.clone(), args.clone())) as Box<dyn HandTracker>, None)
        }
    };
    let mut lifecycle = Lifecycle::new(tracker);
    if config.autostart {
        lifecycle.start()?;
    }

    /* --- The sketch owns the painting; `screen` is what you actually see --- */
    let mut sketch = Sketch::new(canvas, ColorMap::default(), config.video_opacity);
    let mut screen = FrameBuffer::filled(w, h, Rgb::BLACK);

    /* --- FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Start/stop buttons */
        if drawer.start_pressed() {
            // Start failures are logged; the painting stays up.
            if let Err(e) = lifecycle.start() {
                log::error!("{e}");
            }
        }
        if drawer.stop_pressed() {
            lifecycle.stop();
        }

        /* 2) Simulated hands publish like any other tracker */
        let sim_input = drawer.sim_input();
        if let Some(driver) = sim.as_mut() {
            driver.feed(&sim_input);
        }

        /* 3) Pull whatever the tracker last published, then tick */
        let video = source.next_frame()?;
        let snapshot = lifecycle.snapshot();
        let cmds = sketch.tick(snapshot.as_deref());
        rasterize(&cmds, &video, &mut screen)?;

        /* 4) HUD */
        let status = if lifecycle.is_running() { "RUNNING" } else { "STOPPED" };
        let hud = match sim {
            Some(_) => format!(
                "{status} | HAND {} {} | DOTS: {} | {hud_fps_text}",
                sim_input.hand,
                FINGER_NAMES[sim_input.finger],
                sketch.buffer().len()
            ),
            None => format!("{status} | DOTS: {} | {hud_fps_text}", sketch.buffer().len()),
        };
        draw_text_5x7(&mut screen, 8, 8, &hud, Rgb::WHITE);
        draw_text_5x7(&mut screen, 8, h as i32 - 16, "S: START  X: STOP  ESC: QUIT", Rgb::WHITE);

        /* 5) Present */
        drawer.present(&screen)?;

        /* 6) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::info!("FPS: {fps:.1}, dots: {}", sketch.buffer().len());
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    lifecycle.stop();
    Ok(())
}
