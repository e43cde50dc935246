//! The migration pass: a fullness-modulated random walk of substance cells.
//!
//! Every cell is carried over into the next buffer; cells of the moving state
//! additionally get one chance to relocate within the step radius, but only
//! into space that is free cavity in both buffers. Cells are relocated, never
//! created or destroyed.

use rand::RngCore;

use super::uniform;
use crate::cell::Cell;
use crate::config::Params;
use crate::grid::Grid;
use crate::neighborhood::clamp;

/// Runs one relocation pass for cells of the `mover` state and swaps the
/// result in.
pub fn step(grid: &mut Grid, mover: Cell, params: &Params, rng: &mut dyn RngCore) {
    let size = grid.size();
    let radius = params.step_radius as f64;
    let span = 2.0 * radius;
    let move_probability = params.move_probability();

    for y in 0..size {
        for x in 0..size {
            // Baseline carry-over, protecting cells a previous relocation in
            // this pass already wrote.
            if grid.next(x, y) != mover {
                grid.set_next(x, y, grid.get(x, y));
            }

            if grid.get(x, y) == mover && uniform(rng) <= move_probability {
                let ty = clamp(y as isize + (uniform(rng) * span - radius).round() as isize, size);
                let tx = clamp(x as isize + (uniform(rng) * span - radius).round() as isize, size);

                // Commit only into space that is free cavity in both buffers;
                // otherwise the draw is discarded and the cell stays.
                if grid.get(tx, ty) != Cell::Cavity || grid.next(tx, ty) != Cell::Cavity {
                    continue;
                }
                grid.set_next(x, y, Cell::Cavity);
                grid.set_next(tx, ty, mover);
            }
        }
    }
    grid.swap();
}
