//! Scrolling world: floor, obstacles, clouds, and the spawner that feeds them.

pub mod scroller;
pub mod spawner;
pub mod types;

pub use scroller::*;
pub use spawner::*;
pub use types::*;
