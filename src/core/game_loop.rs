//! Game loop orchestrator.
//!
//! One [`GameLoop::frame`] call per display refresh runs every component in a
//! fixed order: clock, fixed-step scoring, world scroll and spawns, clouds,
//! players, collisions, game-over check, palette fade. The host schedules
//! frames and stops calling once the loop's [`CancelToken`] fires.

use super::clock::Clock;
use super::constants::{
    FRAMES_PER_SCORE_POINT, MIN_SURFACE_HEIGHT, MIN_SURFACE_WIDTH, PLAYER_COUNT,
};
use super::game_state::GameState;
use crate::assets::{Assets, SpriteId};
use crate::collision::detect_collisions;
use crate::input::HeldKeys;
use crate::palette::ColorPair;
use crate::player::{update_players, ControlBindings};
use crate::world::{
    next_obstacle_interval, populate_initial_clouds, scroll_clouds, scroll_world,
    tick_cloud_spawner, tick_obstacle_spawner, SpawnOutcome,
};
use log::{debug, error, info, trace, warn};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Drawable area the host offers, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u16,
    pub height: u16,
}

/// Why the loop refused to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// The host could not provide a drawing surface at all.
    SurfaceUnavailable,
    /// The surface exists but cannot fit the canvas.
    SurfaceTooSmall { width: u16, height: u16 },
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceUnavailable => write!(f, "no drawing surface available"),
            Self::SurfaceTooSmall { width, height } => write!(
                f,
                "surface {}x{} is smaller than the required {}x{}",
                width, height, MIN_SURFACE_WIDTH, MIN_SURFACE_HEIGHT
            ),
        }
    }
}

impl std::error::Error for StartError {}

/// Stop handle for one armed session. Cancelling is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What the presentation layer needs after a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub score: u64,
    /// Sky and floor colours after interpolation.
    pub colors: ColorPair,
    pub game_over: bool,
    /// Set only on the frame where the last player died.
    pub game_over_started: bool,
    pub fixed_steps: u32,
}

/// Owns the game state and sequences every component once per frame.
pub struct GameLoop<R: Rng> {
    state: GameState,
    clock: Clock,
    assets: Assets,
    bindings: [ControlBindings; PLAYER_COUNT],
    rng: R,
    token: Option<CancelToken>,
    sessions: u32,
    /// Sprites already reported as missing.
    warned: HashSet<SpriteId>,
    /// Wall-clock time of the last palette update.
    palette_ms: Option<f64>,
}

impl<R: Rng> GameLoop<R> {
    /// An idle loop: players lined up, nothing armed.
    pub fn new(assets: Assets, bindings: [ControlBindings; PLAYER_COUNT], rng: R) -> Self {
        Self {
            state: GameState::new(&bindings),
            clock: Clock::new(),
            assets,
            bindings,
            rng,
            token: None,
            sessions: 0,
            warned: HashSet::new(),
            palette_ms: None,
        }
    }

    /// Reset everything and arm a new session.
    ///
    /// Fails without touching the current state when the surface is missing
    /// or too small. Any previous session is cancelled first.
    pub fn start(&mut self, surface: Option<SurfaceSize>) -> Result<CancelToken, StartError> {
        if let Err(err) = check_surface(surface) {
            error!("Refusing to start: {}", err);
            return Err(err);
        }

        self.stop();

        self.state = GameState::new(&self.bindings);
        self.clock.reset();
        self.palette_ms = None;
        self.state.next_obstacle_time = next_obstacle_interval(&mut self.rng, self.state.speed);
        let outcome = populate_initial_clouds(&mut self.state, &self.assets, &mut self.rng);
        self.note_spawn(outcome);

        self.sessions += 1;
        if self.sessions == 1 {
            info!("Session started");
        } else {
            info!("Session restarted (#{})", self.sessions);
        }

        let token = CancelToken::new();
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Same as [`start`](Self::start); restart and a fresh start share one
    /// reset path.
    pub fn restart(&mut self, surface: Option<SurfaceSize>) -> Result<CancelToken, StartError> {
        self.start(surface)
    }

    /// Cancel the armed session, if any.
    pub fn stop(&mut self) {
        if let Some(token) = &self.token {
            if token.cancel() {
                debug!("Loop stopped at score {}", self.state.score);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// True once any session has been armed.
    pub fn has_started(&self) -> bool {
        self.sessions > 0
    }

    /// Run one frame at wall-clock `now_ms`. Returns `None` when the loop is
    /// not armed.
    pub fn frame(&mut self, now_ms: f64, keys: &HeldKeys) -> Option<FrameReport> {
        if !self.is_running() {
            return None;
        }

        let tick = self.clock.advance(now_ms);
        self.state.delta = tick.delta;

        for _ in 0..tick.fixed_steps {
            self.fixed_step();
        }

        if self.state.is_active() {
            scroll_world(&mut self.state);
            let outcome = tick_obstacle_spawner(&mut self.state, &self.assets, &mut self.rng);
            self.note_spawn(outcome);

            scroll_clouds(&mut self.state.clouds, self.state.delta);
            let outcome = tick_cloud_spawner(&mut self.state, &self.assets, &mut self.rng);
            self.note_spawn(outcome);
        }

        update_players(&mut self.state.players, keys, self.state.delta);
        detect_collisions(&mut self.state.players, &self.state.obstacles);

        let mut game_over_started = false;
        if self.state.is_active() && self.state.all_players_dead() {
            self.state.game_over = true;
            game_over_started = true;
            info!("Game over: score {}", self.state.score);
            self.stop();
        }

        self.advance_palette(now_ms);

        Some(FrameReport {
            score: self.state.score,
            colors: self.state.colors(),
            game_over: self.state.game_over,
            game_over_started,
            fixed_steps: tick.fixed_steps,
        })
    }

    /// Feed wall-clock time to the palette fade. Works whether or not the
    /// loop is armed, so a fade caught by game over still settles.
    pub fn advance_palette(&mut self, now_ms: f64) {
        if !now_ms.is_finite() {
            return;
        }
        let elapsed = self.palette_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.palette_ms = Some(now_ms);
        self.state.gradient.advance(elapsed);
    }

    fn fixed_step(&mut self) {
        if !self.state.is_active() {
            return;
        }

        self.state.frame_counter += 1;
        if self.state.frame_counter % FRAMES_PER_SCORE_POINT != 0 {
            return;
        }

        let tier = self.state.gradient.target();
        if self.state.add_score_point() {
            debug!("Speed {} at score {}", self.state.speed, self.state.score);
        }
        if self.state.gradient.target() != tier {
            debug!(
                "Palette tier {} at score {}",
                self.state.gradient.target(),
                self.state.score
            );
        }
    }

    fn note_spawn(&mut self, outcome: SpawnOutcome) {
        match outcome {
            SpawnOutcome::Spawned | SpawnOutcome::Waiting => {}
            SpawnOutcome::NotReady(sprite) => {
                if self.warned.insert(sprite) {
                    warn!("Sprite {:?} not loaded; skipping its spawns", sprite);
                }
            }
        }
        if outcome == SpawnOutcome::Spawned {
            trace!(
                "Spawned: {} obstacles, {} clouds",
                self.state.obstacles.len(),
                self.state.clouds.len()
            );
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn bindings(&self) -> &[ControlBindings; PLAYER_COUNT] {
        &self.bindings
    }
}

fn check_surface(surface: Option<SurfaceSize>) -> Result<(), StartError> {
    let size = surface.ok_or(StartError::SurfaceUnavailable)?;
    if size.width < MIN_SURFACE_WIDTH || size.height < MIN_SURFACE_HEIGHT {
        return Err(StartError::SurfaceTooSmall {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}
