//! Grid snake with a sprite-rendered segmented body.
//!
//! The gameplay core (`chain`, `collision`, `food`, `state`, `speed`, `game`,
//! `session`) never touches macroquad directly; the adapters (`audio`,
//! `input`, `render`, `ui`) translate between it and the engine.

pub mod audio;
pub mod chain;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod session;
pub mod speed;
pub mod state;
pub mod ui;

pub use error::{Error, Result};
