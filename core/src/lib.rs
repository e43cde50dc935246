//! Probabilistic cellular automaton of substance diffusion and reaction
//! through a two-region tissue/cavity grid.
//!
//! The engine is a pure in-memory step function over a double-buffered square
//! grid: a migration pass relocates substance cells under load-dependent
//! probabilities, then an ordered pattern-rule pass rebuilds every cell. All
//! randomness flows through an injected [`rand::RngCore`], so a seeded source
//! reproduces a run exactly.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod cell;
pub mod config;
pub mod grid;
pub mod neighborhood;
pub mod rule;
pub mod seed;
pub mod sim;
pub mod stats;

pub mod prelude {
    //! Re-exports of the types most callers need.
    pub use crate::cell::{Cell, Pattern};
    pub use crate::config::{ConfigError, ConfigResult, Params};
    pub use crate::grid::Grid;
    pub use crate::rule::{Rule, RuleTable};
    pub use crate::seed::{seed, Dose, SeedReport};
    pub use crate::sim::{Schedule, Simulation};
    pub use crate::stats::StateCounts;
}

#[cfg(test)]
mod tests;
