#![warn(clippy::all)]

mod utils;
mod world;

pub use utils::{
    parse_int, usage, Config, ConfigError, ConfigResult, GenerationPacer, Topology, WorldError,
    WorldResult,
};
pub use world::{init, render, Grid, InitMode, World, ALIVE, DEAD};
