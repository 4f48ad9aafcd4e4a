use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use rs_layout::io::{read_i32_file, snapshot_path, start_iteration_from_name, write_positions};
use rs_layout::layout::Layout;
use rs_layout::utils::{LayoutConfig, DEFAULT_SEED};

/// Computes a 3D force-directed layout for a graph stored as binary links.
#[derive(Parser, Debug)]
#[command(name = "rs_layout")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Signed little-endian i32 edge list
    #[arg(short, long, default_value = "./links.bin")]
    links: PathBuf,

    /// Initial positions, three i32 values per body
    #[arg(short, long)]
    positions: Option<PathBuf>,

    /// Body weights, one i32 value per body
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Output file for the final positions
    #[arg(short, long, default_value = "./positions.bin")]
    save: PathBuf,

    /// Write a snapshot every N iterations (0 disables snapshots)
    #[arg(short = 'i', long, alias = "save_interval", default_value_t = 10)]
    save_interval: u64,

    /// Stop after this many iterations even if the layout has not converged
    #[arg(short, long, alias = "max_iterations", default_value_t = 10000)]
    max_iterations: u64,

    /// Log timings and per-step movement
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[arg(long, allow_negative_numbers = true)]
    gravity: Option<f64>,

    #[arg(long)]
    theta: Option<f64>,

    #[arg(long)]
    drag_coeff: Option<f64>,

    #[arg(long)]
    spring_coeff: Option<f64>,

    #[arg(long)]
    spring_length: Option<f64>,

    #[arg(long)]
    time_step: Option<f64>,

    #[arg(long)]
    stable_threshold: Option<f64>,
}

impl Cli {
    fn config(&self) -> LayoutConfig {
        LayoutConfig::new(
            self.gravity,
            self.theta,
            self.drag_coeff,
            self.spring_coeff,
            self.spring_length,
            self.time_step,
            self.stable_threshold,
        )
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Loads the graph, iterates until convergence or the iteration budget, and
/// writes the final positions. Returns the iteration the loop stopped at.
fn run(cli: &Cli) -> anyhow::Result<u64> {
    let links = read_i32_file(&cli.links)
        .with_context(|| format!("Failed to load links from {}", cli.links.display()))?;
    let positions = cli
        .positions
        .as_ref()
        .map(|path| read_i32_file(path).with_context(|| format!("Failed to load positions from {}", path.display())))
        .transpose()?;
    let weights = cli
        .weights
        .as_ref()
        .map(|path| read_i32_file(path).with_context(|| format!("Failed to load weights from {}", path.display())))
        .transpose()?;

    let start = cli.positions.as_deref().map(start_iteration_from_name).unwrap_or(0);

    let load_started = Instant::now();
    let mut builder = Layout::builder(&links).config(cli.config()).seed(cli.seed);
    if let Some(positions) = positions.as_deref() {
        builder = builder.positions(positions);
    }
    if let Some(weights) = weights.as_deref() {
        builder = builder.weights(weights);
    }
    let mut layout = builder.build().context("Failed to build layout")?;

    info!(
        "Start iteration = {}, maximum iterations = {}, bodies = {}",
        start,
        cli.max_iterations,
        layout.body_count()
    );
    info!("Time spent on load layout = {}ms", load_started.elapsed().as_millis());

    let loop_started = Instant::now();
    let mut iteration = start;
    while iteration < cli.max_iterations {
        let step_started = Instant::now();
        let converged = layout.step();
        info!("Time spent on step({}) = {}ms", iteration, step_started.elapsed().as_millis());

        if converged {
            info!("Converged at iteration {} (movement {:.6})", iteration, layout.last_movement());
            break;
        }

        if cli.save_interval > 0 && iteration % cli.save_interval == 0 {
            let path = snapshot_path(&cli.save, iteration);
            write_positions(&path, layout.bodies())
                .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        }
        iteration += 1;
    }
    info!(
        "Total time spent on iterations({}) = {}ms",
        iteration,
        loop_started.elapsed().as_millis()
    );

    write_positions(&cli.save, layout.bodies())
        .with_context(|| format!("Failed to write positions to {}", cli.save.display()))?;
    Ok(iteration)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
