//! Blastwave Simulation Library
//!
//! A headless side-scrolling shooter simulation. The engine advances a
//! fixed-timestep world of raiders, projectiles, buffs and a boss, and
//! reports what happened through drained event batches. Rendering, audio
//! and window handling live elsewhere; this crate is the game itself.

pub mod config;
pub mod util;
pub mod game;
pub mod pilot;
