pub mod movement;
pub mod collision;
pub mod spawning;
pub mod weapons;
