pub mod app;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod render;
pub mod snake;
pub mod term;

pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);
pub type TermInt = u16;
