pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
