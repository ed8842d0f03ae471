#![warn(clippy::all)]

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use gol_world::{usage, Config, GenerationPacer, World};
use log::{debug, info};

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprint!("\n{}", usage(&program));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(config.log_level())
        .env()
        .init()
    {
        eprintln!("warning: cannot initialize logger: {e}");
    }

    if config.show_help {
        print!("{}", usage(&program));
        return ExitCode::SUCCESS;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    info!("Starting {} v{} ...", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    debug!("{config}");

    let mut world = config.world().context("cannot create world")?;
    let (w, h) = world.size();
    info!(
        "{w}x{h} {} world, init mode {}, population {}",
        world.topology(),
        config.init_mode,
        world.population()
    );

    let mut out = BufWriter::new(io::stdout().lock());
    let mut pacer = GenerationPacer::new(config.max_fps);
    while config.generations.map_or(true, |n| world.generation() < n) {
        match print_generation(&mut out, &world) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                info!("output closed at generation {}", world.generation());
                return Ok(());
            }
            result => result.context("cannot write generation")?,
        }
        world.step();
        pacer.delay();
    }

    info!(
        "finished after {} generations, population {}",
        world.generation(),
        world.population()
    );
    if world.generation() > 0 {
        info!("{:.1} generations/s", pacer.fps());
    }
    Ok(())
}

/// Current generation followed by an empty line.
fn print_generation(out: &mut impl Write, world: &World) -> io::Result<()> {
    for line in world.render() {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    out.flush()
}
