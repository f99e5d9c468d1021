//! Gift Catch entry point
//!
//! Headless host: plays one round with an autopilot pointer sweeping the
//! sleigh back and forth, then prints the round summary as JSON.
//!
//! Usage: `gift-catch [settings.json]`

use std::path::Path;
use std::thread;
use std::time::Instant;

use gift_catch::platform::BufferSurface;
use gift_catch::{GameError, GameView, PointerEvent, RoundTimer, Settings, TintedSprites};

/// Portrait phone-sized view
const VIEW_WIDTH: u32 = 1080;
const VIEW_HEIGHT: u32 = 1920;

/// Seconds between presses of the speed button
const SPEED_CHANGE_SECS: u64 = 20;

fn main() {
    env_logger::init();
    log::info!("Gift Catch (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::default(),
    };
    let tick_interval = settings.tick_interval();
    let timer = RoundTimer::new(settings.round_duration());

    let surface = BufferSurface::new();
    let frames = surface.handle();
    let mut view = GameView::new(settings, Box::new(TintedSprites), Box::new(surface))?;
    view.resize(VIEW_WIDTH, VIEW_HEIGHT)?;
    view.start()?;

    let started = Instant::now();
    let mut last_second = None;
    view.pointer(PointerEvent::down(VIEW_WIDTH as f32 / 2.0, VIEW_HEIGHT as f32 - 100.0));
    while !timer.is_finished(started.elapsed()) {
        let elapsed = started.elapsed();

        let phase = (elapsed.as_secs_f32() * 1.3).sin();
        let x = VIEW_WIDTH as f32 / 2.0 * (1.0 + phase);
        view.pointer(PointerEvent::moved(x, VIEW_HEIGHT as f32 - 100.0));

        let seconds = timer.seconds_remaining(elapsed);
        if last_second != Some(seconds) {
            last_second = Some(seconds);
            if seconds % 10 == 0 {
                log::info!(
                    "{} | Score: {} | {} frames",
                    timer.label(elapsed),
                    view.score(),
                    frames.frames_posted()
                );
            }
            let played = timer.duration().as_secs().saturating_sub(seconds);
            if played > 0 && played % SPEED_CHANGE_SECS == 0 {
                view.cycle_speed();
                log::info!("{}", view.speed_label());
            }
        }

        thread::sleep(tick_interval);
    }
    view.pointer(PointerEvent::up(0.0, 0.0));

    let summary = view.finish()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    log::info!("{}", summary.headline());
    Ok(())
}
