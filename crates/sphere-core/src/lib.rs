pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod input;
pub mod label;
pub mod render_loop;
pub mod sampler;
pub mod spectrum;
pub mod track;

pub use camera::*;
pub use config::*;
pub use error::{Error, TrackError};
pub use field::*;
pub use input::*;
pub use label::*;
pub use render_loop::*;
pub use sampler::SphereSampler;
pub use spectrum::*;
pub use track::*;
