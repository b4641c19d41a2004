//! Grid snake: a discrete-step simulation driven by a paced worker thread.
//!
//! [`game::GridState`] owns the board and implements the step transition.
//! [`engine::GameLoop`] runs it on its own thread and reports what happened
//! through [`engine::GameEvent`] messages. Everything terminal-specific lives
//! in the binary and the [`renderer`] module.

pub mod config;
pub mod engine;
pub mod food;
pub mod game;
pub mod input;
pub mod pacing;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
