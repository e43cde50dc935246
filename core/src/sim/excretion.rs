//! The clearance pass: slow removal of substance from the body.
//!
//! Clearance is inert until a configured start tick. From then on, every
//! interval-th tick re-evaluates a probability that approaches 1 along
//! `1 - 0.5^k`, and each affected cell is tested against that probability
//! scaled down by the live population of its state. The `+1` in every
//! denominator guards the empty-population case.

use rand::RngCore;

use super::uniform;
use crate::cell::Cell;
use crate::grid::Grid;
use crate::stats::StateCounts;

/// Removal-speed scale for toxic cells.
const TOXIC_RATE_SCALE: f64 = 0.2;
/// Removal-speed scale for weakened blood cells.
const WEAK_RATE_SCALE: f64 = 0.02;

/// When and how strongly clearance applies.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// First tick at which clearance may fire.
    pub start: u64,
    /// Ticks between re-evaluations; clearance fires only on these ticks.
    pub interval: u64,
}

impl Default for Schedule {
    /// 120 simulated minutes until clearance starts, re-evaluated every 5
    /// minutes, at 10 ticks per minute.
    fn default() -> Self {
        Self {
            start: 1200,
            interval: 50,
        }
    }
}

impl Schedule {
    /// A schedule that never clears anything.
    pub const fn never() -> Self {
        Self {
            start: u64::MAX,
            interval: u64::MAX,
        }
    }

    /// Returns the clearance probability for the given tick.
    pub fn probability(&self, tick: u64) -> f64 {
        if self.interval == 0 || tick < self.start || tick % self.interval != 0 {
            return 0.0;
        }
        1.0 - 0.5_f64.powi(((tick - self.start) / self.interval) as i32)
    }
}

/// Tests one cell against the clearance probability, mutating the current
/// buffer in place.
///
/// `counts` must be the per-state totals from the top of the tick; the live
/// population of a state normalizes its removal rate.
pub(crate) fn clear_cell(
    grid: &mut Grid,
    x: usize,
    y: usize,
    probability: f64,
    counts: &StateCounts,
    rng: &mut dyn RngCore,
) {
    let state = grid.get(x, y);
    let replacement = if state == Cell::Toxic
        && uniform(rng) <= probability / (TOXIC_RATE_SCALE * (counts.toxic + 1) as f64)
    {
        Cell::Oxygen
    } else if state == Cell::Weak
        && uniform(rng) <= probability / (WEAK_RATE_SCALE * (counts.weak + 1) as f64)
    {
        Cell::Blood
    } else if state == Cell::Substance
        && uniform(rng) <= probability / (counts.substance + 1) as f64
    {
        Cell::Cavity
    } else {
        return;
    };
    grid.set(x, y, replacement);
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn test_schedule_is_inert_before_start() {
        let schedule = Schedule::default();
        assert_eq!(0.0, schedule.probability(0));
        assert_eq!(0.0, schedule.probability(1150));
        // The start tick itself still evaluates to 1 - 0.5^0 = 0.
        assert_eq!(0.0, schedule.probability(1200));
    }

    #[test]
    fn test_schedule_rises_on_interval_ticks() {
        let schedule = Schedule::default();
        assert_eq!(0.5, schedule.probability(1250));
        assert_eq!(0.75, schedule.probability(1300));
        // Off-interval ticks stay inert even late in the run.
        assert_eq!(0.0, schedule.probability(1251));
        assert_eq!(0.0, schedule.probability(9999));
    }

    #[test]
    fn test_never_schedule() {
        assert_eq!(0.0, Schedule::never().probability(u64::MAX - 1));
    }

    #[test]
    fn test_clearance_replaces_states() {
        let mut grid = Grid::filled(3, Cell::Cavity);
        grid.set(0, 0, Cell::Toxic);
        grid.set(1, 0, Cell::Weak);
        grid.set(2, 0, Cell::Substance);
        let counts = StateCounts::scan(&grid);

        // 0.0 draws always pass any positive probability.
        let mut rng = StepRng::new(0, 0);
        for x in 0..3 {
            clear_cell(&mut grid, x, 0, 0.5, &counts, &mut rng);
        }
        assert_eq!(Cell::Oxygen, grid.get(0, 0));
        assert_eq!(Cell::Blood, grid.get(1, 0));
        assert_eq!(Cell::Cavity, grid.get(2, 0));

        // Other states never clear.
        clear_cell(&mut grid, 1, 1, 0.5, &counts, &mut rng);
        assert_eq!(Cell::Cavity, grid.get(1, 1));
    }
}
