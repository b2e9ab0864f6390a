//! Simulation core: timing, state, orchestration and settings.

pub mod clock;
pub mod config;
pub mod constants;
pub mod game_loop;
pub mod game_state;

pub use clock::{Clock, ClockTick};
pub use config::Config;
pub use game_loop::{CancelToken, FrameReport, GameLoop, StartError, SurfaceSize};
pub use game_state::{speed_for_score, GameState};
