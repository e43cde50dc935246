//! Command-line front end for the diffusion automaton.
//!
//! Seeds a two-region grid, runs the tick loop, and prints periodic
//! statistics; `--draw` additionally dumps the grid to the terminal using the
//! per-state colors.

use anyhow::Result;
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use diffcell_core::prelude::*;

/// Simulation ticks per simulated minute.
const TICKS_PER_MINUTE: u64 = 10;
/// Scales a ppm concentration down to milligrams per gram of carrier.
const PPM_MG_DIVIDER: f64 = 1000.0;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Substance diffusion through a tissue/cavity grid")]
struct Args {
    /// Grid dimension N.
    #[arg(long, value_name = "CELLS", default_value_t = 100)]
    size: usize,
    /// Cavity fullness in [0, 1]; fuller means slower substance movement.
    #[arg(short = 'f', long, default_value_t = 0.25)]
    fullness: f64,
    /// Maximum per-axis relocation distance per tick.
    #[arg(long, value_name = "CELLS", default_value_t = 2)]
    step_radius: usize,
    /// Body weight in kilograms.
    #[arg(short = 'w', long, default_value_t = 40.0)]
    weight: f64,
    /// Substance concentration of the carrier in ppm.
    #[arg(short = 'p', long, default_value_t = 1500)]
    ppm: u32,
    /// Ingested carrier volume in milliliters.
    #[arg(short = 'e', long, default_value_t = 50.0)]
    eaten: f64,
    /// Number of ticks to simulate.
    #[arg(short = 't', long, default_value_t = 2400)]
    ticks: u64,
    /// Seed for the random source; omitted means an entropy seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks between statistics reports.
    #[arg(long, value_name = "TICKS", default_value_t = 200)]
    report_every: u64,
    /// Dump the grid to the terminal at every report.
    #[arg(long)]
    draw: bool,
}

fn main() -> Result<()> {
    simple_logger::init()?;
    let args = Args::parse();

    let params = Params::new(args.size, args.fullness, args.step_radius)?;
    let dose = Dose::new(args.weight, args.ppm, args.eaten)?;
    let mut rng = match args.seed {
        Some(value) => SmallRng::seed_from_u64(value),
        None => SmallRng::from_entropy(),
    };

    let (grid, seeded) = seed(args.size, &dose, &mut rng);
    let mut sim = Simulation::new(grid, RuleTable::reactions(), params)?;
    info!(
        "Starting diffcell v{}: {}x{} grid, {} substance cells seeded",
        env!("CARGO_PKG_VERSION"),
        args.size,
        args.size,
        seeded.substance
    );

    for _ in 0..args.ticks {
        if sim.generation() % args.report_every.max(1) == 0 {
            report(&sim, &seeded, &dose);
            if args.draw {
                draw(sim.grid());
            }
        }
        sim.tick(&mut rng);
    }
    report(&sim, &seeded, &dose);
    Ok(())
}

/// Prints the figures the run is usually watched for.
fn report(sim: &Simulation, seeded: &SeedReport, dose: &Dose) {
    let counts = StateCounts::scan(sim.grid());
    let minutes = sim.generation() / TICKS_PER_MINUTE;
    let circulating = counts.circulating_blood().max(1);
    let oxygen_share = 100.0 * counts.oxygen as f64 / circulating as f64;
    let saturation =
        (100.0 * counts.oxygen as f64 / seeded.oxygen.max(1) as f64).min(100.0);
    let burden = (counts.toxic as f64 * dose.ppm as f64 / PPM_MG_DIVIDER)
        / seeded.substance.max(1) as f64
        / dose.body_weight_kg;

    println!("---------------- {:4} min (tick {}) ----------------", minutes, sim.generation());
    println!("oxygen: {:.2} % of circulating blood", oxygen_share);
    println!("oxygen saturation: {:.2} %", saturation);
    println!("substance burden in tissue: {:.4} mg/kg", burden);
}

/// Dumps the grid as truecolor background blocks.
fn draw(grid: &Grid) {
    let mut out = String::new();
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            let [r, g, b] = grid.get(x, y).color();
            out.push_str(&format!("\x1b[48;2;{};{};{}m  ", r, g, b));
        }
        out.push_str("\x1b[0m\n");
    }
    print!("{}", out);
}
