pub mod analyzer;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod field;
pub mod input;
pub mod ripple;
pub mod scheduler;
pub mod snapshot;
pub mod transport;

pub static SURFACE_WGSL: &str = include_str!("../shaders/surface.wgsl");

pub use analyzer::*;
pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use input::*;
pub use ripple::*;
pub use scheduler::*;
pub use snapshot::*;
pub use transport::*;
