use std::{fmt, str::FromStr};

use crate::{Grid, WorldError};

/// Relative positions of the eight cells around a cell, as `(d_row, d_col)`.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Describes how the edges of the field behave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Bounds of the field are stitched together.
    #[default]
    Torus,
    /// Cells beyond the bounds of the field are always dead.
    Limited,
}

impl Topology {
    pub const NAMES: [&'static str; 2] = ["toroidal", "limited"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Torus => "toroidal",
            Self::Limited => "limited",
        }
    }

    /// Number of alive cells among the eight neighbors of `(row, col)`.
    ///
    /// On a torus narrower than 3 cells, several offsets may land on the same
    /// cell; such a cell is counted once, and `(row, col)` itself never is.
    pub fn count_live_neighbors(self, grid: &Grid, row: usize, col: usize) -> usize {
        let (h, w) = (grid.height() as isize, grid.width() as isize);
        let (row, col) = (row as isize, col as isize);
        debug_assert!(row < h && col < w);

        let mut neibs = [(0, 0); 8];
        let mut len = 0;
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let (r, c) = (row + dr, col + dc);
            let pos = match self {
                Self::Torus => (r.rem_euclid(h), c.rem_euclid(w)),
                Self::Limited if (0..h).contains(&r) && (0..w).contains(&c) => (r, c),
                Self::Limited => continue,
            };
            if pos != (row, col) && !neibs[..len].contains(&pos) {
                neibs[len] = pos;
                len += 1;
            }
        }
        neibs[..len]
            .iter()
            .filter(|&&(r, c)| grid.get(r as usize, c as usize))
            .count()
    }
}

impl FromStr for Topology {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toroidal" | "torus" => Ok(Self::Torus),
            "limited" => Ok(Self::Limited),
            _ => Err(WorldError::InvalidTopology(s.to_owned())),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::blank(width, height);
        for &(row, col) in alive {
            grid.set(row, col, true);
        }
        grid
    }

    #[test]
    fn test_corner_wraps_only_on_torus() {
        let (w, h) = (6, 4);
        let grid = grid_with(w, h, &[(0, 0), (h - 1, w - 1)]);
        assert_eq!(Topology::Torus.count_live_neighbors(&grid, 0, 0), 1);
        assert_eq!(Topology::Limited.count_live_neighbors(&grid, 0, 0), 0);
    }

    #[test]
    fn test_full_interior_has_eight() {
        let mut grid = Grid::blank(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                grid.set(row, col, true);
            }
        }
        for topology in [Topology::Torus, Topology::Limited] {
            assert_eq!(topology.count_live_neighbors(&grid, 1, 1), 8);
        }
        assert_eq!(Topology::Limited.count_live_neighbors(&grid, 0, 0), 3);
        assert_eq!(Topology::Limited.count_live_neighbors(&grid, 0, 1), 5);
        assert_eq!(Topology::Torus.count_live_neighbors(&grid, 0, 0), 8);
    }

    #[test]
    fn test_cell_is_never_its_own_neighbor() {
        let single = grid_with(1, 1, &[(0, 0)]);
        assert_eq!(Topology::Torus.count_live_neighbors(&single, 0, 0), 0);

        let strip = grid_with(5, 1, &[(0, 2)]);
        assert_eq!(Topology::Torus.count_live_neighbors(&strip, 0, 2), 0);
        // the right neighbor is reached through three offsets but counted once
        assert_eq!(Topology::Torus.count_live_neighbors(&strip, 0, 1), 1);
    }

    #[test]
    fn test_narrow_torus_counts_distinct_cells() {
        let square = grid_with(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(Topology::Torus.count_live_neighbors(&square, row, col), 3);
        }

        let column = grid_with(1, 4, &[(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(Topology::Torus.count_live_neighbors(&column, 0, 0), 2);

        let two_wide = grid_with(2, 5, &[(1, 0), (1, 1), (2, 0), (2, 1)]);
        assert_eq!(Topology::Torus.count_live_neighbors(&two_wide, 1, 0), 3);
        assert_eq!(Topology::Torus.count_live_neighbors(&two_wide, 0, 1), 2);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("toroidal".parse::<Topology>(), Ok(Topology::Torus));
        assert_eq!("torus".parse::<Topology>(), Ok(Topology::Torus));
        assert_eq!("limited".parse::<Topology>(), Ok(Topology::Limited));
        assert_eq!(
            "diagonal".parse::<Topology>(),
            Err(WorldError::InvalidTopology("diagonal".to_owned()))
        );
        for name in Topology::NAMES {
            assert_eq!(name.parse::<Topology>().unwrap().name(), name);
        }
    }

    proptest! {
        /// Compares both topologies against a brute-force count over all
        /// cells of the grid.
        #[test]
        fn test_count_matches_brute_force(
            width in 1..8usize,
            height in 1..8usize,
            cells in proptest::collection::vec(any::<bool>(), 64),
            row in 0..8usize,
            col in 0..8usize,
        ) {
            let (row, col) = (row % height, col % width);
            let mut grid = Grid::blank(width, height);
            for r in 0..height {
                for c in 0..width {
                    grid.set(r, c, cells[r * 8 + c]);
                }
            }

            let mut limited = 0;
            for r in 0..height {
                for c in 0..width {
                    let (dr, dc) = (r.abs_diff(row), c.abs_diff(col));
                    if (r, c) != (row, col) && dr <= 1 && dc <= 1 && grid.get(r, c) {
                        limited += 1;
                    }
                }
            }
            prop_assert_eq!(Topology::Limited.count_live_neighbors(&grid, row, col), limited);

            // on a torus a cell is near if it is at most one step away, going
            // either way around
            let near = |a: usize, b: usize, n: usize| {
                let d = a.abs_diff(b);
                d <= 1 || d == n - 1
            };
            let mut distinct = 0;
            for r in 0..height {
                for c in 0..width {
                    let is_neib = (r, c) != (row, col) && near(r, row, height) && near(c, col, width);
                    if is_neib && grid.get(r, c) {
                        distinct += 1;
                    }
                }
            }
            let torus = Topology::Torus.count_live_neighbors(&grid, row, col);
            prop_assert_eq!(torus, distinct);
            if width >= 3 && height >= 3 {
                let mut expected = 0;
                for (dr, dc) in NEIGHBOR_OFFSETS {
                    let r = (row as isize + dr).rem_euclid(height as isize) as usize;
                    let c = (col as isize + dc).rem_euclid(width as isize) as usize;
                    expected += grid.get(r, c) as usize;
                }
                prop_assert_eq!(torus, expected);
            }
        }
    }
}
