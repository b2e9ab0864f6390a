use super::constants::*;
use crate::palette::{tier_for_score, ColorPair, GradientTransition};
use crate::player::{ControlBindings, Player};
use crate::world::{Cloud, Floor, Obstacle};

/// Scroll speed for a score: one tier per 60 points, capped.
pub fn speed_for_score(score: u64) -> f64 {
    (BASE_SPEED + (score / SCORE_PER_SPEED_TIER) as f64).min(MAX_SPEED)
}

/// Everything the simulation mutates. Owned by the game loop and lent to
/// each component per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub players: Vec<Player>,
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub floor: Floor,

    // -- Progression --
    /// Shared scroll speed (floor, obstacles, cloud base).
    pub speed: f64,
    pub score: u64,
    /// Fixed steps taken while active.
    pub frame_counter: u64,
    pub gradient: GradientTransition,

    // -- Timing --
    /// Normalized delta of the current frame.
    pub delta: f64,
    pub obstacle_timer: f64,
    pub next_obstacle_time: f64,
    pub cloud_timer: f64,

    pub game_over: bool,
}

impl GameState {
    /// Fresh state: players lined up, world empty, counters zeroed.
    pub fn new(bindings: &[ControlBindings; PLAYER_COUNT]) -> Self {
        Self {
            players: Player::lineup(bindings),
            obstacles: Vec::new(),
            clouds: Vec::new(),
            floor: Floor::default(),

            speed: BASE_SPEED,
            score: 0,
            frame_counter: 0,
            gradient: GradientTransition::new(),

            delta: 0.0,
            obstacle_timer: 0.0,
            next_obstacle_time: 0.0,
            cloud_timer: 0.0,

            game_over: false,
        }
    }

    /// Not game over.
    pub fn is_active(&self) -> bool {
        !self.game_over
    }

    pub fn all_players_dead(&self) -> bool {
        self.players.iter().all(|p| p.is_dead)
    }

    pub fn living_players(&self) -> usize {
        self.players.iter().filter(|p| !p.is_dead).count()
    }

    /// Award one point and update the speed and palette tiers that depend
    /// on the score. Returns true if the speed tier changed.
    pub fn add_score_point(&mut self) -> bool {
        self.score += 1;

        self.gradient.retarget(tier_for_score(self.score));

        let speed = speed_for_score(self.score);
        let changed = speed != self.speed;
        self.speed = speed;
        changed
    }

    pub fn colors(&self) -> ColorPair {
        self.gradient.colors()
    }
}
