mod draw;
mod grid;
pub mod init;

pub use draw::{render, ALIVE, DEAD};
pub use grid::Grid;
pub use init::InitMode;

use crate::{Topology, WorldError, WorldResult};

/// Finite Game of Life field (B3/S23) with a fixed topology.
///
/// Two buffers are kept: `cells_curr` is the visible generation and
/// `cells_next` is overwritten by every [`World::step`] before the two are
/// swapped, so a generation is always computed from the complete previous one.
#[derive(Clone, Debug)]
pub struct World {
    cells_curr: Grid,
    cells_next: Grid,
    topology: Topology,
    generation: u64,
}

impl World {
    /// Create a field `width x height` filled according to `init_mode`.
    ///
    /// `seed` - random seed for [`InitMode::Random`] (if `None`, then random
    /// seed is generated)
    ///
    /// Fails with [`WorldError::InvalidDimension`] unless both sides are
    /// positive and `width * height` fits in `usize`.
    pub fn new(
        width: i64,
        height: i64,
        topology: Topology,
        init_mode: InitMode,
        seed: Option<u64>,
    ) -> WorldResult<Self> {
        let (w, h) = match (usize::try_from(width), usize::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 && w.checked_mul(h).is_some() => (w, h),
            _ => return Err(WorldError::InvalidDimension { width, height }),
        };
        log::debug!("creating {w}x{h} {topology} world, init mode {init_mode}");
        Ok(Self::from_grid(init_mode.fill(w, h, seed), topology))
    }

    /// Same as [`World::new`], but topology and init mode are given by name.
    pub fn from_names(
        width: i64,
        height: i64,
        topology: &str,
        init_mode: &str,
        seed: Option<u64>,
    ) -> WorldResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimension { width, height });
        }
        Self::new(width, height, topology.parse()?, init_mode.parse()?, seed)
    }

    /// Wrap an existing field; the world takes its size from `grid`.
    pub fn from_grid(grid: Grid, topology: Topology) -> Self {
        let (w, h) = grid.size();
        Self {
            cells_curr: grid,
            cells_next: Grid::blank(w, h),
            topology,
            generation: 0,
        }
    }

    /// The current generation.
    pub fn grid(&self) -> &Grid {
        &self.cells_curr
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        self.cells_curr.size()
    }

    /// Number of steps made since creation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells_curr.get(row, col)
    }

    pub fn population(&self) -> usize {
        self.cells_curr.population()
    }

    pub fn count_live_neighbors(&self, row: usize, col: usize) -> usize {
        self.topology.count_live_neighbors(&self.cells_curr, row, col)
    }

    pub fn render(&self) -> Vec<String> {
        render(&self.cells_curr)
    }

    /// Advance the field by one generation.
    pub fn step(&mut self) {
        let (w, h) = self.size();
        for row in 0..h {
            for col in 0..w {
                let neibs = self.topology.count_live_neighbors(&self.cells_curr, row, col);
                let next = if self.cells_curr.get(row, col) {
                    neibs == 2 || neibs == 3
                } else {
                    neibs == 3
                };
                self.cells_next.cells_mut()[row * w + col] = next;
            }
        }
        std::mem::swap(&mut self.cells_next, &mut self.cells_curr);
        self.generation += 1;
        log::trace!(
            "generation {}: population {}",
            self.generation,
            self.population()
        );
    }

    /// Advance the field by `n` generations.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }
}
