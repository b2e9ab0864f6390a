//! Dino Link - two-player endless runner for the terminal.
//!
//! The simulation (`core`, `player`, `world`, `collision`, `palette`) has no
//! terminal dependency and is driven one frame at a time through
//! [`core::GameLoop`]. `app` and `ui` host it in a crossterm/ratatui terminal.

pub mod app;
pub mod assets;
pub mod collision;
pub mod core;
pub mod input;
pub mod palette;
pub mod player;
pub mod ui;
pub mod utils;
pub mod world;
