pub mod config;
pub mod game;
pub mod math;
pub mod renderer;
pub mod sim;
pub mod world;

pub use config::Settings;
pub use game::{Game, RaycastGame};
