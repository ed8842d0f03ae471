use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Grid;
use crate::WorldError;

/// Probability of a cell being alive after random initialization.
pub const RANDOM_FILL_RATE: f64 = 0.5;

/// Top-left corner `(row, col)` of the glider's bounding box.
pub const GLIDER_OFFSET: (usize, usize) = (1, 1);

/// Glider heading towards increasing rows and columns.
const GLIDER: [&str; 3] = [".#.", "..#", "###"];

/// Pattern the field starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InitMode {
    /// Every cell is dead.
    #[default]
    Default,
    /// A single glider near the origin.
    Glider,
    /// Every cell is alive with probability [`RANDOM_FILL_RATE`].
    Random,
}

impl InitMode {
    pub const NAMES: [&'static str; 3] = ["default", "glider", "random"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Glider => "glider",
            Self::Random => "random",
        }
    }

    /// Builds the initial field.
    ///
    /// `seed` is only used by [`InitMode::Random`]; if `None`, the seed is
    /// taken from system entropy.
    ///
    /// # Panics
    ///
    /// Same as [`Grid::blank`].
    pub fn fill(self, width: usize, height: usize, seed: Option<u64>) -> Grid {
        match self {
            Self::Default => Grid::blank(width, height),
            Self::Glider => glider(width, height),
            Self::Random => random(width, height, seed, RANDOM_FILL_RATE),
        }
    }
}

impl FromStr for InitMode {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "glider" => Ok(Self::Glider),
            "random" => Ok(Self::Random),
            _ => Err(WorldError::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for InitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Places a glider at [`GLIDER_OFFSET`], dropping the cells that do not fit.
///
/// # Panics
///
/// Same as [`Grid::blank`].
pub fn glider(width: usize, height: usize) -> Grid {
    let mut grid = Grid::blank(width, height);
    let (row0, col0) = GLIDER_OFFSET;
    for (dr, line) in GLIDER.iter().enumerate() {
        for (dc, c) in line.bytes().enumerate() {
            let (row, col) = (row0 + dr, col0 + dc);
            if c == b'#' && row < height && col < width {
                grid.set(row, col, true);
            }
        }
    }
    grid
}

/// Fills the field in row-major order, so the same seed always gives the
/// same field.
///
/// # Panics
///
/// Same as [`Grid::blank`], or if `fill_rate` is outside `0..=1`.
pub fn random(width: usize, height: usize, seed: Option<u64>, fill_rate: f64) -> Grid {
    let mut rng = if let Some(x) = seed {
        ChaCha8Rng::seed_from_u64(x)
    } else {
        ChaCha8Rng::from_entropy()
    };
    let mut grid = Grid::blank(width, height);
    for row in 0..height {
        for col in 0..width {
            grid.set(row, col, rng.gen_bool(fill_rate));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 42;

    #[test]
    fn test_default_is_blank() {
        let grid = InitMode::Default.fill(7, 5, Some(SEED));
        assert_eq!(grid, Grid::blank(7, 5));
    }

    #[test]
    fn test_glider_shape() {
        let grid = glider(5, 5);
        let expected = Grid::parse(
            "
            .....
            ..#..
            ...#.
            .###.
            .....
            "
            .replace(' ', "")
            .as_str(),
        )
        .unwrap();
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_glider_is_clipped() {
        assert_eq!(glider(4, 4).population(), 5);

        let grid = glider(3, 3);
        assert_eq!(grid.population(), 1);
        assert!(grid.get(1, 2));

        assert_eq!(glider(1, 1).population(), 0);
        assert_eq!(glider(2, 8).population(), 1);
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = random(33, 17, Some(SEED), RANDOM_FILL_RATE);
        let b = InitMode::Random.fill(33, 17, Some(SEED));
        assert_eq!(a, b);
        assert_ne!(a, random(33, 17, Some(SEED + 1), RANDOM_FILL_RATE));
    }

    #[test]
    fn test_random_fill_rate() {
        let n = 256;
        let grid = random(n, n, Some(SEED), RANDOM_FILL_RATE);
        let ratio = grid.population() as f64 / (n * n) as f64;
        assert!((ratio - RANDOM_FILL_RATE).abs() < 0.02, "ratio={}", ratio);

        assert_eq!(random(n, 3, None, 0.).population(), 0);
        assert_eq!(random(n, 3, None, 1.).population(), n * 3);
    }

    #[test]
    fn test_parse_names() {
        for name in InitMode::NAMES {
            assert_eq!(name.parse::<InitMode>().unwrap().name(), name);
        }
        assert_eq!(
            "explode".parse::<InitMode>(),
            Err(WorldError::InvalidMode("explode".to_owned()))
        );
    }
}
