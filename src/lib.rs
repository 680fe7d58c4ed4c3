pub mod app;
pub mod canvas;
pub mod color;
pub mod config;
pub mod pattern;
pub mod render;
pub mod terminal;
