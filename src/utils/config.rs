use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{InitMode, Topology, World, WorldError, WorldResult};

/// Error encountered while reading the command line or the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("option {0} requires a value")]
    MissingValue(String),
    #[error("invalid number for {option}: {value:?}")]
    InvalidNumber { option: String, value: String },
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("cannot read config file {}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file {} has no line {line}", path.display())]
    MissingLine { path: PathBuf, line: usize },
    #[error(transparent)]
    World(#[from] WorldError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Command-line options: `(short, long, takes_value)`.
const OPTIONS: [(char, &str, bool); 9] = [
    ('h', "help", false),
    ('x', "size_x", true),
    ('y', "size_y", true),
    ('i', "init", true),
    ('t', "topology", true),
    ('s', "seed", true),
    ('g', "generations", true),
    ('f', "fps", true),
    ('v', "verbose", false),
];

/// Validated settings of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub show_help: bool,
    pub width: i64,
    pub height: i64,
    pub init_mode: InitMode,
    pub topology: Topology,
    /// Seed of the random initializer; `None` means system entropy.
    pub seed: Option<u64>,
    /// Number of generations to print; `None` runs until interrupted.
    pub generations: Option<u64>,
    /// Upper bound on generations per second, `0` for no limit.
    pub max_fps: f64,
    /// Number of `-v` flags given.
    pub verbosity: u8,
    pub cfg_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_help: false,
            width: 10,
            height: 10,
            init_mode: InitMode::Default,
            topology: Topology::Torus,
            seed: None,
            generations: None,
            max_fps: 10.,
            verbosity: 0,
            cfg_file: None,
        }
    }
}

impl Config {
    /// Parse command-line arguments (without the program name).
    ///
    /// If a config file is given as the only positional argument, its values
    /// take precedence over the flags. Init mode and topology names are only
    /// resolved once the file is read, and not at all when help is requested.
    pub fn from_args<I, S>(args: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut init_name = None;
        let mut topology_name = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let Some((option, inline_value)) = split_option(&arg) else {
                if config.cfg_file.is_some() {
                    return Err(ConfigError::UnexpectedArgument(arg));
                }
                config.cfg_file = Some(PathBuf::from(arg));
                continue;
            };

            let &(short, long, takes_value) = OPTIONS
                .iter()
                .find(|(short, long, _)| option.matches(*short, long))
                .ok_or_else(|| ConfigError::UnknownOption(arg.clone()))?;
            let value = match (takes_value, inline_value) {
                (false, None) => String::new(),
                (false, Some(_)) => return Err(ConfigError::UnexpectedArgument(arg.clone())),
                (true, Some(value)) => value.to_owned(),
                (true, None) => args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(format!("--{long}")))?,
            };

            match short {
                'h' => config.show_help = true,
                'x' => config.width = parse_number(long, &value)?,
                'y' => config.height = parse_number(long, &value)?,
                'i' => init_name = Some(value),
                't' => topology_name = Some(value),
                's' => config.seed = Some(parse_number(long, &value)?),
                'g' => config.generations = Some(parse_number(long, &value)?),
                'f' => config.max_fps = parse_fps(&value)?,
                'v' => config.verbosity = config.verbosity.saturating_add(1),
                _ => unreachable!("option table and handlers disagree"),
            }
        }

        if let Some(path) = config.cfg_file.clone() {
            let data = read_file(&path)?;
            let file = ConfigFile::parse(&path, &data)?;
            config.width = file.width;
            config.height = file.height;
            init_name = Some(file.init_mode.to_owned());
            if let Some(topology) = file.topology {
                topology_name = Some(topology.to_owned());
            }
        }

        if !config.show_help {
            config.check()?;
            if let Some(name) = topology_name {
                config.topology = name.parse()?;
            }
            if let Some(name) = init_name {
                config.init_mode = name.parse()?;
            }
        }
        Ok(config)
    }

    /// Read the four-line config file: width, height, init mode and topology.
    ///
    /// The topology line may be missing, in which case the current topology
    /// is kept.
    pub fn load_file(&mut self, path: &Path) -> ConfigResult<()> {
        let data = read_file(path)?;
        self.apply_file(path, &data)
    }

    fn apply_file(&mut self, path: &Path, data: &str) -> ConfigResult<()> {
        let file = ConfigFile::parse(path, data)?;
        let init_mode = file.init_mode.parse()?;
        if let Some(topology) = file.topology {
            self.topology = topology.parse()?;
        }
        self.width = file.width;
        self.height = file.height;
        self.init_mode = init_mode;
        Ok(())
    }

    fn check(&self) -> WorldResult<()> {
        if self.width > 0 && self.height > 0 {
            Ok(())
        } else {
            Err(WorldError::InvalidDimension {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Build the world described by this config.
    pub fn world(&self) -> WorldResult<World> {
        World::new(
            self.width,
            self.height,
            self.topology,
            self.init_mode,
            self.seed,
        )
    }

    /// Log level selected by the number of `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Contents of a config file, with the names not yet resolved.
struct ConfigFile<'a> {
    width: i64,
    height: i64,
    init_mode: &'a str,
    /// `None` if the line is missing or empty.
    topology: Option<&'a str>,
}

impl<'a> ConfigFile<'a> {
    fn parse(path: &Path, data: &'a str) -> ConfigResult<Self> {
        let mut lines = data.lines().map(str::trim);
        let mut next_line = |line: usize| {
            lines.next().ok_or_else(|| ConfigError::MissingLine {
                path: path.to_owned(),
                line,
            })
        };

        let file = Self {
            width: parse_number("size_x", next_line(1)?)?,
            height: parse_number("size_y", next_line(2)?)?,
            init_mode: next_line(3)?,
            topology: next_line(4).ok().filter(|line| !line.is_empty()),
        };
        log::debug!("loaded config file {}", path.display());
        Ok(file)
    }
}

fn read_file(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_owned(),
        source,
    })
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "config {{")?;
        writeln!(f, "\tshow help   = {}", self.show_help)?;
        writeln!(f, "\tsize_x      = {}", self.width)?;
        writeln!(f, "\tsize_y      = {}", self.height)?;
        writeln!(f, "\tinit_mode   = {}", self.init_mode)?;
        writeln!(f, "\ttopology    = {}", self.topology)?;
        match self.seed {
            Some(seed) => writeln!(f, "\tseed        = {seed}")?,
            None => writeln!(f, "\tseed        = <entropy>")?,
        }
        match self.generations {
            Some(n) => writeln!(f, "\tgenerations = {n}")?,
            None => writeln!(f, "\tgenerations = <unlimited>")?,
        }
        writeln!(f, "\tmax_fps     = {}", self.max_fps)?;
        match &self.cfg_file {
            Some(path) => writeln!(f, "\tcfg_file    = {}", path.display())?,
            None => writeln!(f, "\tcfg_file    = <none>")?,
        }
        write!(f, "}}")
    }
}

/// Usage text listing the options and the accepted names.
pub fn usage(program: &str) -> String {
    let mut s = format!(
        "Usage: {program}\n\
         \t[-h|--help]\n\
         \t[-x|--size_x <num>]\n\
         \t[-y|--size_y <num>]\n\
         \t[-i|--init <init_mode>]\n\
         \t[-t|--topology <topology>]\n\
         \t[-s|--seed <num>]\n\
         \t[-g|--generations <num>]\n\
         \t[-f|--fps <num>]\n\
         \t[-v|--verbose]...\n\
         \t[<config_file.txt>]\n"
    );
    s.push_str("\ninitialization modes:\n");
    for name in InitMode::NAMES {
        s.push_str(&format!("\t{name}\n"));
    }
    s.push_str("\ntopologies:\n");
    for name in Topology::NAMES {
        s.push_str(&format!("\t{name}\n"));
    }
    s.push_str(
        "\nThe config file holds width, height, init mode and topology, one per line.\n\
         Data from the config file has preference over flags.\n",
    );
    s
}

/// Option name as written on the command line.
enum OptionName<'a> {
    Short(char),
    Long(&'a str),
}

impl OptionName<'_> {
    fn matches(&self, short: char, long: &str) -> bool {
        match self {
            Self::Short(c) => *c == short,
            Self::Long(name) => *name == long,
        }
    }
}

/// Splits `--name=value`, `--name`, `-xVALUE` and `-x` into the option name
/// and the value given in the same argument.
///
/// Returns `None` for positional arguments (including a lone `-`).
fn split_option(arg: &str) -> Option<(OptionName<'_>, Option<&str>)> {
    if let Some(long) = arg.strip_prefix("--") {
        return Some(match long.split_once('=') {
            Some((name, value)) => (OptionName::Long(name), Some(value)),
            None => (OptionName::Long(long), None),
        });
    }
    let short = arg.strip_prefix('-')?;
    let mut chars = short.chars();
    let c = chars.next()?;
    let rest = chars.as_str();
    Some((OptionName::Short(c), (!rest.is_empty()).then_some(rest)))
}

/// Parses an integer the way `strtol` with base 0 does: an optional sign,
/// then `0x` for hexadecimal, a leading `0` for octal, decimal otherwise.
pub fn parse_int(s: &str) -> Option<i128> {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = i128::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

fn parse_number<T: TryFrom<i128>>(option: &str, value: &str) -> ConfigResult<T> {
    parse_int(value)
        .and_then(|x| T::try_from(x).ok())
        .ok_or_else(|| ConfigError::InvalidNumber {
            option: option.to_owned(),
            value: value.to_owned(),
        })
}

fn parse_fps(value: &str) -> ConfigResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|fps| fps.is_finite() && *fps >= 0.)
        .ok_or_else(|| ConfigError::InvalidNumber {
            option: "fps".to_owned(),
            value: value.to_owned(),
        })
}
