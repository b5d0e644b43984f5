pub mod constants;
pub mod state;
pub mod clock;
pub mod stage;
pub mod events;
pub mod input;
pub mod systems;
pub mod engine;
pub mod perf;
