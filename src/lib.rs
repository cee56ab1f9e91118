pub mod audio;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod effects;
pub mod error;
pub mod game;
pub mod gamepad;
pub mod input;
pub mod pos;
pub mod powerup;
pub mod scores;
pub mod session;
pub mod spawn;
