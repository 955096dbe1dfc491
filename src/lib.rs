//! Minefield - Terminal Minesweeper Library
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod board;
pub mod board_generation;
pub mod board_logic;
pub mod build_info;
pub mod constants;
pub mod input;
pub mod session;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
