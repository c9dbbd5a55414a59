//! Robot Commander - programmable robot teaching game

pub mod command;
pub mod core;
pub mod robot;
pub mod simulation;
pub mod ui;
pub mod world;
