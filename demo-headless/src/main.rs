use circulation_core::{
    run, run_checked, Domain, EulerianConfig, EulerianSimulator, EulerianState, GaussianSource,
    LagrangianConfig, LagrangianSimulator, LagrangianState, SimulationError,
};
use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Which representation(s) to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Eulerian,
    Lagrangian,
    Both,
}

/// Headless meridional circulation demo
#[derive(Parser, Debug)]
#[command(name = "circulation-demo")]
#[command(about = "Grid and particle advection through a single-cell meridional circulation", long_about = None)]
struct Args {
    /// Simulator(s) to run
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Number of steps (default: 200 for the grid, 500 for particles)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Timestep
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Grid nodes along latitude
    #[arg(long, default_value_t = 50)]
    n_lat: usize,

    /// Grid nodes along altitude
    #[arg(long, default_value_t = 30)]
    n_alt: usize,

    /// Number of particles
    #[arg(short, long, default_value_t = 1000)]
    particles: usize,

    /// Seed for the initial particle positions
    #[arg(long)]
    seed: Option<u64>,

    /// Report every N steps
    #[arg(short, long, default_value_t = 50)]
    report_interval: u64,

    /// Disable the equatorial heating source
    #[arg(long)]
    no_source: bool,

    /// Refuse grid configurations above this Courant number
    #[arg(long)]
    max_courant: Option<f64>,

    /// Check invariants after every step and fail on the first violation
    #[arg(short, long)]
    validate: bool,
}

fn report_grid(sim: &EulerianSimulator, n: u64, state: &EulerianState) {
    let (a, l) = sim.mesh().nearest_node(0.0, 15.0);
    println!(
        "[grid] step {:>5}  t={:>7.2}  max|f|={:>10.6}  f(0°,15km)={:>10.6}  finite={}",
        n,
        state.time,
        state.field.max_abs(),
        state.field.get(a, l),
        state.field.is_finite()
    );
}

fn report_particles(domain: &Domain, n: u64, state: &LagrangianState) {
    let centroid = state.centroid();
    println!(
        "[particles] step {:>5}  t={:>7.2}  centroid=({:>7.2}°, {:>6.2} km)  on edges={}",
        n,
        state.time,
        centroid.x,
        centroid.y,
        state.count_on_edges(domain)
    );
}

fn run_grid(args: &Args) -> Result<(), SimulationError> {
    let config = EulerianConfig {
        n_lat: args.n_lat,
        n_alt: args.n_alt,
        dt: args.dt,
        source: if args.no_source {
            None
        } else {
            Some(GaussianSource::equatorial())
        },
        max_courant: args.max_courant,
    };
    let sim = EulerianSimulator::new(config)?;
    let steps = args.steps.unwrap_or(200);
    let interval = args.report_interval.max(1);

    println!(
        "=== Eulerian grid: {}x{} (alt x lat), dt={}, {} steps, Courant={:.4} ===",
        args.n_alt,
        args.n_lat,
        args.dt,
        steps,
        sim.courant_number()
    );

    let observe = |n: u64, state: &EulerianState| {
        if n.is_multiple_of(interval) || n == steps {
            report_grid(&sim, n, state);
        }
    };

    let state = if args.validate {
        run_checked(&sim, sim.initialize(), steps, observe)?
    } else {
        run(&sim, sim.initialize(), steps, observe)
    };

    if !state.field.is_bounded(1e6) {
        println!("WARNING: field is unbounded; reduce dt (Courant {:.3})", sim.courant_number());
    }
    println!();
    Ok(())
}

fn run_particles(args: &Args) -> Result<(), SimulationError> {
    let config = LagrangianConfig {
        n_particles: args.particles,
        dt: args.dt,
        seed: args.seed,
    };
    let sim = LagrangianSimulator::new(config)?;
    let steps = args.steps.unwrap_or(500);
    let interval = args.report_interval.max(1);
    let domain = *sim.domain();

    println!(
        "=== Lagrangian particles: {} particles, dt={}, {} steps ===",
        args.particles, args.dt, steps
    );

    let initial = sim.initialize();
    report_particles(&domain, 0, &initial);

    let observe = |n: u64, state: &LagrangianState| {
        if n.is_multiple_of(interval) || n == steps {
            report_particles(&domain, n, state);
        }
    };

    if args.validate {
        run_checked(&sim, initial, steps, observe)?;
    } else {
        run(&sim, initial, steps, observe);
    }
    println!();
    Ok(())
}

/// Log filter from `RUST_LOG` directives, falling back to `warn` so stability warnings stay visible.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let args = Args::parse();

    println!("=== Meridional Circulation Demo ===\n");

    let result = match args.mode {
        Mode::Eulerian => run_grid(&args),
        Mode::Lagrangian => run_particles(&args),
        Mode::Both => run_grid(&args).and_then(|()| run_particles(&args)),
    };

    match result {
        Ok(()) => {
            if args.validate {
                println!("All invariants held.");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_filter_shows_warnings() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_env_directives_override_default() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
