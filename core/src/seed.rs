//! Initial grid population.
//!
//! Builds the two-region starting state the engine consumes: tissue laced
//! with blood veins on the left half, cavity with pooled solvent on the
//! right, and a substance dose scattered over the cavity. Every cell ends up
//! in a concrete state; the engine never sees `Empty` here.

use rand::RngCore;
use rand_distr::{Distribution, Exp};

use crate::cell::Cell;
use crate::config::{ConfigError, ConfigResult};
use crate::grid::Grid;
use crate::neighborhood::clamp;
use crate::sim::uniform;

/// Fraction of the cavity half seeded as solvent.
const SOLVENT_DENSITY: f64 = 0.01;
/// A boundary cell extends tissue only when its draw exceeds this.
const BOUNDARY_GAP_PROB: f64 = 0.65;
/// Veins laid down per row.
const VEINS_PER_ROW: usize = 6;
/// Probability that a vein follows the row above instead of jumping.
const VEIN_FOLLOW_PROB: f64 = 0.975;
/// Mean of the exponential drift a following vein makes per row.
const VEIN_DRIFT_MEAN: f64 = 0.8;
/// A vein widens right/down unless its draw falls below this.
const VEIN_WIDEN_SKIP_PROB: f64 = 0.3;
/// Fraction of blood that carries bound oxygen.
const OXYGEN_BOUND_FRACTION: f64 = 0.2;
/// Blood volume per kilogram of body weight, in liters.
const BLOOD_LITERS_PER_KG: f64 = 0.08;
/// Density of the ingested carrier paste, g/ml.
const CARRIER_DENSITY: f64 = 1.3;
/// Density of the substance, g/l.
const SUBSTANCE_DENSITY: f64 = 1.696;

/// The ingested dose, in physical terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Dose {
    /// Body weight in kilograms.
    pub body_weight_kg: f64,
    /// Substance concentration of the carrier, in parts per million.
    pub ppm: u32,
    /// Ingested carrier volume in milliliters.
    pub ingested_ml: f64,
}

impl Dose {
    /// Creates a dose, rejecting non-physical values.
    pub fn new(body_weight_kg: f64, ppm: u32, ingested_ml: f64) -> ConfigResult<Self> {
        if !body_weight_kg.is_finite() || body_weight_kg <= 0.0 {
            return Err(ConfigError::BodyWeight);
        }
        if !ingested_ml.is_finite() || ingested_ml < 0.0 {
            return Err(ConfigError::IngestedVolume);
        }
        Ok(Self {
            body_weight_kg,
            ppm,
            ingested_ml,
        })
    }
}

impl Default for Dose {
    fn default() -> Self {
        Self::new(40.0, 1500, 50.0).unwrap()
    }
}

/// What seeding actually placed, for later saturation reporting.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Blood cells laid down, counting those then converted to oxygen.
    pub blood: u64,
    /// Blood cells converted to bound oxygen.
    pub oxygen: u64,
    /// Substance cells placed.
    pub substance: u64,
}

/// Populates a fresh grid.
///
/// Panics if `size < 2`; the two-region split needs at least one column per
/// half. Dimension validation belongs to [`crate::config::Params`].
pub fn seed(size: usize, dose: &Dose, rng: &mut dyn RngCore) -> (Grid, SeedReport) {
    assert!(size >= 2, "grid too small to split into two regions");
    let half = size / 2;
    let at = |x: usize, y: usize| y * size + x;
    let mut cells = vec![Cell::Empty; size * size];

    // Two-region base: tissue left, cavity right, jagged along the boundary,
    // with solvent sprinkled over the cavity.
    for y in 0..size {
        for x in 0..size {
            let state = if x >= half {
                if cells[at(x - 1, y)] == Cell::Tissue && uniform(rng) > BOUNDARY_GAP_PROB {
                    Cell::Tissue
                } else {
                    Cell::Cavity
                }
            } else {
                Cell::Tissue
            };
            cells[at(x, y)] = state;
            if x > half && uniform(rng) < SOLVENT_DENSITY {
                cells[at(x, y)] = Cell::Solvent;
            }
        }
    }

    // Veins: each row's vein sits near the one above it, drifting by the
    // difference of two exponential draws, with an occasional fresh jump.
    let drift = Exp::new(1.0 / VEIN_DRIFT_MEAN).expect("exponential rate is positive");
    let mut last_x = [0usize; VEINS_PER_ROW];
    for slot in last_x.iter_mut() {
        *slot = clamp((uniform(rng) * half as f64) as isize, size);
    }
    for y in 0..size {
        for vein in last_x.iter_mut() {
            let proposed = if uniform(rng) < VEIN_FOLLOW_PROB {
                drift.sample(&mut *rng) as isize + *vein as isize
                    - drift.sample(&mut *rng) as isize
            } else {
                (uniform(rng) * half as f64) as isize
            };
            let x = clamp(proposed, size) % half;
            *vein = x;

            cells[at(x, y)] = Cell::Blood;
            cells[at(clamp(x as isize - 1, size), y)] = Cell::Blood;
            if uniform(rng) > VEIN_WIDEN_SKIP_PROB {
                cells[at(clamp(x as isize + 1, size), y)] = Cell::Blood;
            }
            if uniform(rng) > VEIN_WIDEN_SKIP_PROB {
                cells[at(x, clamp(y as isize + 1, size))] = Cell::Blood;
            }
        }
    }

    // Bind oxygen into the veins until the configured fraction is met.
    let mut blood = 0u64;
    let mut oxygen = 0u64;
    for y in 0..size {
        for x in 0..half {
            if cells[at(x, y)] == Cell::Blood {
                blood += 1;
                if (oxygen as f64) < OXYGEN_BOUND_FRACTION * blood as f64 {
                    cells[at(x, y)] = Cell::Oxygen;
                    oxygen += 1;
                }
            }
        }
    }

    // Scatter the dose over the cavity half, keeping the placed/visited ratio
    // tracking the target density.
    let blood_volume = dose.body_weight_kg * BLOOD_LITERS_PER_KG * 1000.0;
    let dose_fraction = 1000.0 * (dose.ppm as f64 * CARRIER_DENSITY) * (dose.ingested_ml / 1000.0)
        / SUBSTANCE_DENSITY
        / (1000.0 * blood_volume);
    let target = (blood as f64 * dose_fraction) as u64;
    let area_fraction = target as f64 / ((size * size) as f64 / 2.0);

    let mut placed = 0u64;
    let mut visited = 0u64;
    for y in 0..size {
        for _ in half..size {
            visited += 1;
            if (placed as f64) < area_fraction * visited as f64 {
                // Draw a cavity column, then probe rightward (wrapping within
                // the half) for a spot not already holding substance.
                let mut col = clamp((uniform(rng) * half as f64 + half as f64) as isize, size);
                let mut probes = 0;
                while cells[at(col, y)] == Cell::Substance && probes < size - half {
                    col = if col + 1 >= size { half } else { col + 1 };
                    probes += 1;
                }
                if cells[at(col, y)] != Cell::Substance {
                    cells[at(col, y)] = Cell::Substance;
                    placed += 1;
                }
            }
        }
    }

    let report = SeedReport {
        blood,
        oxygen,
        substance: placed,
    };
    (Grid::from_cells(size, cells), report)
}
