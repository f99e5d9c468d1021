//! The game view: simulation clock and lifecycle
//!
//! While running, a dedicated thread owns the whole [`Session`] (state,
//! sprites, surface, command inbox) and ticks it every `tick_interval`:
//! drain commands, update, render, post, sleep. Pausing clears the running
//! flag and joins the thread, which hands the session back, so in-flight
//! entities survive pause/resume untouched. Host calls made while running
//! travel through a channel; while idle they apply directly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::assets::{Sprite, SpriteKind, SpriteProvider, SpriteSet, acquire_checked};
use crate::error::GameError;
use crate::input::{PointerEvent, apply_pointer};
use crate::platform::Surface;
use crate::renderer::render;
use crate::round::{RoundSummary, SpeedSelector};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, TickReport, tick};

/// Host-side request for the simulation
#[derive(Debug)]
enum Command {
    Pointer(PointerEvent),
    SetSpeed(f32),
    Resize {
        width: u32,
        height: u32,
        background: Sprite,
    },
}

/// Everything the loop thread owns while running
struct Session {
    state: GameState,
    sprites: SpriteSet,
    surface: Box<dyn Surface>,
    inbox: Receiver<Command>,
    /// Zero point of the simulation timeline
    origin: Instant,
    score: Arc<AtomicU64>,
}

impl Session {
    fn apply(&mut self, command: Command) {
        match command {
            Command::Pointer(event) => {
                apply_pointer(&mut self.state.basket, self.state.view.width, &event);
            }
            Command::SetSpeed(speed) => {
                log::debug!("Speed multiplier set to {speed}x");
                self.state.speed_multiplier = speed;
            }
            Command::Resize {
                width,
                height,
                background,
            } => {
                self.state.resize(width as f32, height as f32);
                self.sprites.background = background;
                self.surface.resize(width, height);
            }
        }
    }

    fn drain_inbox(&mut self) {
        while let Ok(command) = self.inbox.try_recv() {
            self.apply(command);
        }
    }

    /// One update+render pass; `None` if the canvas could not be locked
    fn frame(&mut self) -> Option<TickReport> {
        self.drain_inbox();
        let input = TickInput {
            now: self.origin.elapsed(),
        };
        let Session {
            state,
            sprites,
            surface,
            ..
        } = self;
        let report = match surface.lock_canvas() {
            Some(canvas) => {
                let report = tick(state, &input);
                render(canvas, state, sprites);
                Some(report)
            }
            None => None,
        };
        if report.is_some() {
            surface.unlock_and_post();
            self.score.store(self.state.score, Ordering::Release);
        }
        report
    }
}

/// Body of the simulation thread
fn run_loop(mut session: Session, running: Arc<AtomicBool>, interval: Duration) -> Session {
    log::info!("Simulation loop started");
    while running.load(Ordering::Acquire) {
        if !session.surface.is_valid() {
            thread::yield_now();
            continue;
        }
        if let Some(report) = session.frame() {
            if report.gifts_caught + report.power_ups_caught > 0 {
                log::debug!(
                    "Tick {}: caught {} gifts, {} power-ups (score {})",
                    session.state.time_ticks,
                    report.gifts_caught,
                    report.power_ups_caught,
                    session.state.score
                );
            }
        }
        thread::sleep(interval);
    }
    log::info!("Simulation loop stopped");
    session
}

/// A playable game view: owns the simulation and drives it on its own thread
pub struct GameView {
    settings: Settings,
    provider: Box<dyn SpriteProvider>,
    outbox: Sender<Command>,
    /// Present while idle
    session: Option<Session>,
    /// Present while running
    worker: Option<JoinHandle<Session>>,
    running: Arc<AtomicBool>,
    score: Arc<AtomicU64>,
    speed: SpeedSelector,
}

impl GameView {
    /// Build a view; fails if any sprite cannot be acquired
    pub fn new(
        settings: Settings,
        provider: Box<dyn SpriteProvider>,
        surface: Box<dyn Surface>,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let sprites = SpriteSet::load(provider.as_ref())?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New game view (seed {seed})");

        let (outbox, inbox) = mpsc::channel();
        let score = Arc::new(AtomicU64::new(0));
        let session = Session {
            state: GameState::with_settings(&settings, seed),
            sprites,
            surface,
            inbox,
            origin: Instant::now(),
            score: score.clone(),
        };
        let speed = SpeedSelector::new(&settings.speed_steps);

        Ok(Self {
            settings,
            provider,
            outbox,
            session: Some(session),
            worker: None,
            running: Arc::new(AtomicBool::new(false)),
            score,
            speed,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn dispatch(&mut self, command: Command) {
        match self.session.as_mut() {
            Some(session) => session.apply(command),
            None => {
                // The receiver lives in the session, so this only fails if the
                // loop thread died; pause() reports that.
                if self.outbox.send(command).is_err() {
                    log::warn!("Simulation loop is gone; command dropped");
                }
            }
        }
    }

    /// Adopt new view dimensions; acquires a matching background sprite
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), GameError> {
        let background = acquire_checked(
            self.provider.as_ref(),
            SpriteKind::Background,
            width,
            height,
        )?;
        log::info!("View resized to {width}x{height}");
        self.dispatch(Command::Resize {
            width,
            height,
            background,
        });
        Ok(())
    }

    /// Feed a pointer event (drags the sleigh)
    pub fn pointer(&mut self, event: PointerEvent) {
        self.dispatch(Command::Pointer(event));
    }

    /// Set the fall-speed multiplier directly; the speed button follows
    pub fn set_speed_multiplier(&mut self, speed: f32) {
        if !speed.is_finite() || speed <= 0.0 {
            log::warn!("Ignoring speed multiplier {speed}");
            return;
        }
        self.speed.set(speed);
        self.dispatch(Command::SetSpeed(speed));
    }

    /// Advance the speed button to its next step and apply it
    pub fn cycle_speed(&mut self) -> f32 {
        let speed = self.speed.cycle();
        self.dispatch(Command::SetSpeed(speed));
        speed
    }

    /// Caption for the speed button
    pub fn speed_label(&self) -> String {
        self.speed.label()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Launch the simulation loop
    pub fn start(&mut self) -> Result<(), GameError> {
        let Some(session) = self.session.take() else {
            if self.worker.is_none() {
                return Err(GameError::LoopPanicked);
            }
            log::warn!("start() called while the loop is already running");
            return Ok(());
        };
        self.running.store(true, Ordering::Release);
        let running = self.running.clone();
        let interval = self.settings.tick_interval();
        let worker = thread::Builder::new()
            .name("gift-catch-sim".into())
            .spawn(move || run_loop(session, running, interval))?;
        self.worker = Some(worker);
        Ok(())
    }

    /// Stop the loop and wait for the thread to exit
    pub fn pause(&mut self) -> Result<(), GameError> {
        let Some(worker) = self.worker.take() else {
            if self.session.is_none() {
                return Err(GameError::LoopPanicked);
            }
            log::warn!("pause() called while the loop is not running");
            return Ok(());
        };
        self.running.store(false, Ordering::Release);
        let mut session = worker.join().map_err(|_| {
            log::error!("Simulation loop panicked");
            GameError::LoopPanicked
        })?;
        // Commands the loop never got to must land before anything sent
        // while paused
        session.drain_inbox();
        self.score.store(session.state.score, Ordering::Release);
        self.session = Some(session);
        Ok(())
    }

    /// Relaunch a fresh loop on the preserved state
    pub fn resume(&mut self) -> Result<(), GameError> {
        self.start()
    }

    /// Latest published score (authoritative once paused)
    pub fn score(&self) -> u64 {
        self.score.load(Ordering::Acquire)
    }

    /// Simulation state, available only while paused
    pub fn state(&self) -> Option<&GameState> {
        self.session.as_ref().map(|s| &s.state)
    }

    /// Stop the loop and collect the round result
    pub fn finish(mut self) -> Result<RoundSummary, GameError> {
        self.pause()?;
        let state = self.state().ok_or(GameError::LoopPanicked)?;
        let summary = RoundSummary::from_state(state);
        log::info!("Round finished: {}", summary.headline());
        Ok(summary)
    }
}

impl Drop for GameView {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.running.store(false, Ordering::Release);
            let _ = worker.join();
        }
    }
}
