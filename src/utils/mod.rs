mod config;
mod error;
mod pacer;
mod topology;

pub use config::{parse_int, usage, Config, ConfigError, ConfigResult};
pub use error::{WorldError, WorldResult};
pub use pacer::GenerationPacer;
pub use topology::Topology;
