//! The simulation passes and their per-tick orchestration.
//!
//! A tick is three strictly ordered phases over the double-buffered grid:
//! the migration pass relocates substance cells and swaps its result in, the
//! next buffer is cleared to the `Empty` sentinel, and the transition pass
//! rebuilds every cell (interleaving the clearance check ahead of each cell's
//! rules) before the final swap. Nothing observes the grid mid-tick.

use rand::{Rng, RngCore};

pub mod excretion;
pub mod migration;
pub mod transition;

pub use excretion::Schedule;

use crate::cell::Cell;
use crate::config::{ConfigError, ConfigResult, Params};
use crate::grid::Grid;
use crate::rule::RuleTable;
use crate::stats::StateCounts;

/// Draws a uniform sample from `[0, 1)`.
#[inline]
pub(crate) fn uniform(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Draws a single-cell offset in `{-1, 0, +1}`, middle value twice as likely.
#[inline]
pub(crate) fn unit_offset(rng: &mut dyn RngCore) -> isize {
    (uniform(rng) * 2.0 - 1.0).round() as isize
}

/// A running simulation: the grid, the immutable rule table, the validated
/// parameters, and the tick counter.
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    rules: RuleTable,
    params: Params,
    generation: u64,
}

impl Simulation {
    /// Creates a simulation over an initialized grid.
    ///
    /// The grid must already be fully populated with concrete states and must
    /// agree with the configured dimension.
    pub fn new(grid: Grid, rules: RuleTable, params: Params) -> ConfigResult<Self> {
        if grid.size() != params.size {
            return Err(ConfigError::GridSizeMismatch {
                expected: params.size,
                actual: grid.size(),
            });
        }
        Ok(Self {
            grid,
            rules,
            params,
            generation: 0,
        })
    }

    /// Read-only view of the current grid, for rendering and statistics.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns how many ticks have completed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self, rng: &mut dyn RngCore) {
        // Counts feeding the clearance denominators come from the state the
        // tick started with, before anything moves.
        let counts = StateCounts::scan(&self.grid);

        migration::step(&mut self.grid, Cell::Substance, &self.params, rng);
        self.grid.clear_next();

        let clearance = self.params.clearance.probability(self.generation);
        let size = self.grid.size();
        for y in 0..size {
            for x in 0..size {
                if clearance > 0.0 {
                    excretion::clear_cell(&mut self.grid, x, y, clearance, &counts, rng);
                }
                transition::apply(&self.rules, &mut self.grid, x, y, rng);
            }
        }
        self.grid.swap();
        self.generation += 1;
    }
}
