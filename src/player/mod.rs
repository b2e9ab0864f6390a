//! Players: per-player run/jump/crouch/dead state and the controller that
//! advances it from held-key state.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
