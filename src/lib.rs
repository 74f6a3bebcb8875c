pub mod art;
pub mod audio;
pub mod bouquet;
pub mod canvas;
pub mod config;
pub mod dialogue;
pub mod enemy_ai;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod particles;
pub mod physics;
pub mod progress;
pub mod reward;
pub mod screens;
pub mod session;
pub mod state;
pub mod story;
