//! The rule-engine pass: one cell of the next grid at a time.
//!
//! Each cell first tries the ordered rule table, then (for substance and
//! toxic cells) a handful of specialized interaction rules, and finally falls
//! back to copying itself unchanged. The secondary rules may also write the
//! cell's left neighbor, so a parallel implementation of this pass would have
//! to serialize those writes; the engine runs it strictly row-major.

use rand::RngCore;

use super::{uniform, unit_offset};
use crate::cell::Cell;
use crate::grid::Grid;
use crate::neighborhood::{self, clamp};
use crate::rule::RuleTable;

/// Probability that a substance cell drifts left along a solvent channel.
const SUBSTANCE_DRIFT_PROB: f64 = 0.5;
/// Probability of abandoning the local walk for a jump into the vascular half.
const ESCAPE_JUMP_PROB: f64 = 0.05;
/// Probability that a toxic cell actually relocates after finding a target.
const TOXIC_MOVE_PROB: f64 = 0.4;
/// Walk iterations granted to a toxic cell hunting for blood.
const MAX_WALK_TRIES: u32 = 9;

/// Counts of the states a secondary rule cares about, over one clamped 3×3
/// neighborhood. Border cells count their replicated edge neighbors more than
/// once, matching the clamped lookup.
#[derive(Debug, Default, Copy, Clone)]
struct Tally {
    solvent: u32,
    tissue: u32,
    blood: u32,
    weak: u32,
    oxygen: u32,
}

impl Tally {
    fn scan(grid: &Grid, x: usize, y: usize) -> Self {
        let mut tally = Self::default();
        for &(cx, cy) in neighborhood::moore(x, y, grid.size()).iter() {
            match grid.get(cx, cy) {
                Cell::Solvent => tally.solvent += 1,
                Cell::Tissue => tally.tissue += 1,
                Cell::Blood => tally.blood += 1,
                Cell::Weak => tally.weak += 1,
                Cell::Oxygen => tally.oxygen += 1,
                _ => (),
            }
        }
        tally
    }
}

/// Computes the next state of the cell at `(x, y)`.
///
/// Must be called for every cell in row-major order within a pass; the
/// leftward-drift rules read and write next-buffer cells the pass has already
/// visited.
pub fn apply(rules: &RuleTable, grid: &mut Grid, x: usize, y: usize, rng: &mut dyn RngCore) {
    let size = grid.size();

    // 1. First full table match wins, unless an earlier cell's side effect
    //    already claimed this spot.
    if let Some(output) = rules.find_match(grid, x, y) {
        if grid.next(x, y) == Cell::Empty {
            grid.set_next(x, y, output);
        }
    }

    // 2. Specialized rules for the substance and its toxic form.
    let center = grid.get(x, y);
    if center == Cell::Substance || center == Cell::Toxic {
        let near = Tally::scan(grid, x, y);
        let left = clamp(x as isize - 1, size);

        if near.solvent > 1
            && near.tissue > 0
            && center == Cell::Substance
            && grid.next(x, y) == Cell::Empty
        {
            // Acid forms where substance sits on a tissue/solvent boundary.
            grid.set_next(x, y, Cell::Toxic);
        } else if center == Cell::Substance
            && near.solvent > 1
            && grid.next(x, y) != Cell::Substance
            && grid.next(left, y) != Cell::Substance
        {
            // Drift left along the solvent channel, carrying the displaced
            // value back here. Column 0 clamps onto itself and stays put.
            if uniform(rng) < SUBSTANCE_DRIFT_PROB {
                let displaced = grid.next(left, y);
                grid.set_next(x, y, displaced);
                grid.set_next(left, y, Cell::Substance);
            }
        } else if center == Cell::Toxic {
            if near.blood > 0 || near.weak > 0 {
                // Walk single-cell steps hunting for blood. The first
                // candidate is drawn before the loop test, and the escape
                // jump lands before the try cap is checked, so the final
                // candidate may not be blood at all.
                let mut tx = clamp(x as isize + unit_offset(rng), size);
                let mut ty = clamp(y as isize + unit_offset(rng), size);
                let mut tries = 0;
                while grid.get(tx, ty) != Cell::Blood {
                    tx = clamp(x as isize + unit_offset(rng), size);
                    ty = clamp(y as isize + unit_offset(rng), size);
                    if uniform(rng) < ESCAPE_JUMP_PROB {
                        tx = clamp(
                            (uniform(rng) * size as f64 / 2.0 - 1.0).round() as isize,
                            size,
                        );
                        ty = clamp(y as isize + (uniform(rng) * 6.0 - 3.0).round() as isize, size);
                    }
                    if tries >= MAX_WALK_TRIES {
                        break;
                    }
                    tries += 1;
                }
                if uniform(rng) < TOXIC_MOVE_PROB
                    && grid.next(x, y) != Cell::Toxic
                    && grid.next(tx, ty) != Cell::Toxic
                {
                    // The vacated spot heals to blood when enough circulation
                    // surrounds it, and scars to tissue otherwise.
                    let supported = (near.blood + near.oxygen + near.weak) as i64
                        >= near.tissue as i64 - 2;
                    let vacated = if supported { Cell::Blood } else { Cell::Tissue };
                    grid.set_next(x, y, vacated);
                    grid.set_next(tx, ty, Cell::Toxic);
                }
            } else if grid.next(x, y) != Cell::Toxic && grid.next(left, y) != Cell::Toxic {
                // No blood or weakness in reach: drift left.
                let displaced = grid.next(left, y);
                grid.set_next(left, y, Cell::Toxic);
                grid.set_next(x, y, displaced);
            }
        }
    }

    // 3. Fallback: anything still undecided is copied unchanged.
    if grid.next(x, y) == Cell::Empty {
        grid.set_next(x, y, grid.get(x, y));
    }
}

/// Runs the rule pass over every cell and swaps the result in.
///
/// The caller is responsible for having run the migration pass first if this
/// is part of a full tick; see [`super::Simulation::tick`].
pub fn step(rules: &RuleTable, grid: &mut Grid, rng: &mut dyn RngCore) {
    grid.clear_next();
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            apply(rules, grid, x, y, rng);
        }
    }
    grid.swap();
}
