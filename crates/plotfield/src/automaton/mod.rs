//! Grid-based cellular automaton with synchronous generation stepping.
//!
//! The automaton follows the standard birth/survival rule (B3/S23) over an
//! 8-neighborhood with non-wrapping borders. Each step is computed from a
//! snapshot of the current generation so the result is independent of cell
//! scan order.
use crate::error::{Error, Result};

pub mod patterns;

/// A fixed-size grid of binary cells with a generation counter.
///
/// Dimensions are immutable after construction. The grid is only mutated
/// through [`Automaton`]; accessors hand out copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    generation: u64,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the cell at (x, y) is alive. Out-of-bounds reads are dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[self.idx(x, y)]
    }

    pub fn living_cells(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
                    continue;
                }
                if self.cells[self.idx(nx as usize, ny as usize)] {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Cellular automaton simulator owning a [`Grid`].
#[derive(Clone, Debug)]
pub struct Automaton {
    grid: Grid,
}

impl Automaton {
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Validation(
                "grid dimensions must be non-zero".into(),
            ));
        }
        Ok(Self {
            grid: Grid::new(width, height),
        })
    }

    /// Advances the grid by one generation.
    ///
    /// Every next state is computed from the pre-step snapshot; cells
    /// updated earlier in the scan are never read by later cells.
    pub fn step(&mut self) {
        let snapshot = self.grid.clone();
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let neighbors = snapshot.live_neighbors(x, y);
                let alive = snapshot.is_alive(x, y);
                let idx = self.grid.idx(x, y);
                self.grid.cells[idx] = matches!((alive, neighbors), (true, 2) | (_, 3));
            }
        }
        self.grid.generation += 1;
    }

    /// Overlays a 0/1 pattern matrix at the given offset.
    ///
    /// Cells whose target falls outside the grid are silently clipped.
    pub fn load_pattern(&mut self, pattern: &[Vec<u8>], offset_x: isize, offset_y: isize) {
        for (row, cells) in pattern.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let x = offset_x + col as isize;
                let y = offset_y + row as isize;
                if x < 0 || y < 0 {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);
                if x >= self.grid.width || y >= self.grid.height {
                    continue;
                }
                let idx = self.grid.idx(x, y);
                self.grid.cells[idx] = value != 0;
            }
        }
    }

    /// Returns a copy of the current grid.
    pub fn grid(&self) -> Grid {
        self.grid.clone()
    }

    pub fn count_living_cells(&self) -> usize {
        self.grid.living_cells()
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference step scanning cells in reverse, used to verify that the
    /// real implementation is independent of scan order.
    fn step_reversed(grid: &Grid) -> Vec<bool> {
        let snapshot = grid.clone();
        let mut next = vec![false; grid.width * grid.height];
        for y in (0..grid.height).rev() {
            for x in (0..grid.width).rev() {
                let neighbors = snapshot.live_neighbors(x, y);
                let alive = snapshot.is_alive(x, y);
                next[y * grid.width + x] = matches!((alive, neighbors), (true, 2) | (_, 3));
            }
        }
        next
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Automaton::try_new(0, 10).is_err());
        assert!(Automaton::try_new(10, 0).is_err());
    }

    #[test]
    fn generation_counter_increases_per_step() {
        let mut life = Automaton::try_new(4, 4).unwrap();
        assert_eq!(life.generation(), 0);
        life.step();
        life.step();
        assert_eq!(life.generation(), 2);
    }

    #[test]
    fn step_is_scan_order_independent() {
        let mut life = Automaton::try_new(12, 12).unwrap();
        life.load_pattern(&patterns::r_pentomino(), 4, 4);

        for _ in 0..8 {
            let expected = step_reversed(&life.grid());
            life.step();
            let grid = life.grid();
            let forward: Vec<bool> = (0..grid.height())
                .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
                .map(|(x, y)| grid.is_alive(x, y))
                .collect();
            assert_eq!(forward, expected);
        }
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut life = Automaton::try_new(5, 5).unwrap();
        life.load_pattern(&patterns::blinker(), 2, 2);
        let initial = life.grid();

        // Horizontal at (2,2),(3,2),(4,2) becomes vertical after one step.
        life.step();
        let mid = life.grid();
        assert!(mid.is_alive(3, 1));
        assert!(mid.is_alive(3, 2));
        assert!(mid.is_alive(3, 3));
        assert_eq!(mid.living_cells(), 3);

        life.step();
        let back = life.grid();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(back.is_alive(x, y), initial.is_alive(x, y));
            }
        }
    }

    #[test]
    fn glider_translates_by_one_after_four_steps() {
        let mut life = Automaton::try_new(10, 10).unwrap();
        life.load_pattern(&patterns::glider(), 1, 1);
        let before = life.grid();

        for _ in 0..4 {
            life.step();
        }
        let after = life.grid();

        assert_eq!(after.living_cells(), before.living_cells());
        for y in 0..9 {
            for x in 0..9 {
                assert_eq!(before.is_alive(x, y), after.is_alive(x + 1, y + 1));
            }
        }
    }

    #[test]
    fn block_is_a_still_life() {
        let mut life = Automaton::try_new(6, 6).unwrap();
        life.load_pattern(&patterns::block(), 2, 2);
        let before = life.grid();
        life.step();
        let after = life.grid();
        assert_eq!(before.living_cells(), after.living_cells());
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(before.is_alive(x, y), after.is_alive(x, y));
            }
        }
    }

    #[test]
    fn out_of_bounds_pattern_cells_are_clipped() {
        let mut life = Automaton::try_new(4, 4).unwrap();
        life.load_pattern(&patterns::glider(), 2, 2);
        assert!(life.count_living_cells() < 5);

        life.load_pattern(&patterns::blinker(), -1, 0);
        // Only the in-bounds tail of the blinker lands.
        assert!(life.grid().is_alive(0, 0) || life.grid().is_alive(1, 0));
    }

    #[test]
    fn grid_accessor_returns_a_copy() {
        let mut life = Automaton::try_new(5, 5).unwrap();
        life.load_pattern(&patterns::blinker(), 1, 2);
        let copy = life.grid();
        life.step();
        // Stepping the automaton must not affect the earlier copy.
        assert_eq!(copy.generation(), 0);
        assert!(copy.is_alive(1, 2));
    }
}
