//! Simulation core for a single-level side-scrolling platformer.
//!
//! Everything in the library is deterministic and free of terminal I/O; the
//! binary wraps it with input, rendering and a frame limiter.

pub mod collectable;
pub mod collision;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod map;
pub mod player;
pub mod projectile;
pub mod world;
