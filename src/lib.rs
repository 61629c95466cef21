//! Lotto ticket simulator.
//!
//! Generates tickets of 15 numbers in a 3x10 grid layout, draws numbers
//! 1-99 one at a time on a timer, tracks matches and detects full-row wins,
//! and renders the boards to a PNG snapshot.

pub mod board_renderer;
pub mod config;
pub mod draw_engine;
pub mod draw_loop;
pub mod error;
pub mod game;
pub mod grid;
pub mod random_source;
pub mod ticket;
pub mod win_detector;
