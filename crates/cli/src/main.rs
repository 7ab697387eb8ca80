use std::process::ExitCode;

use clap::Parser;
use kutta_core::{Config, GridError, config::ConfigError};
use kutta_solvers::{
    output, shooting,
    transient::rk4::{self, Integrator},
};
use log::{LevelFilter, error, info};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use thiserror::Error;

use args::KuttaArgs;

mod args;
mod pendulum;
mod settings;

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to load configuration")]
    Settings(#[from] settings::Error),

    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("invalid time grid")]
    Grid(#[from] GridError),

    #[error("invalid problem")]
    Problem(#[from] kutta_core::Error),

    #[error("shooting failed")]
    Shooting(#[from] shooting::Error),

    #[error("integration failed")]
    Integration(#[from] rk4::Error),

    #[error("failed to write results")]
    Output(#[from] output::Error),
}

fn main() -> ExitCode {
    let args = KuttaArgs::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logging unavailable: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &KuttaArgs) -> Result<(), AppError> {
    info!("kutta v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => settings::load(path)?,
        None => Config::default(),
    };
    config.validate()?;

    let (mut system, mut params) = pendulum::problem()?;
    config.check_problem(&system, &params)?;

    let mut integrator = Integrator::new(config.time_grid()?);
    if let Some(exit) = config.exit {
        integrator = integrator.with_exit_condition(pendulum::exit_condition(exit.lookahead));
    }

    if let Some(bisection) = &config.bisection {
        info!(
            "bisection requested on {} {}",
            bisection.mode, bisection.target_index
        );
        shooting::solve_unobserved(
            &integrator,
            &mut system,
            &mut params,
            &pendulum::shooting_target,
            bisection,
        )?;
    }

    info!("solving the differential equations with RK4");
    let solution = integrator.run(&system, &params)?;
    if let Some(j) = solution.triggered_at {
        info!(
            "exit condition met at t = {}; stopping after {} points",
            solution.times[j], solution.exit_index
        );
    }

    output::write_file(&args.output, &system, &solution, config.output_precision)?;

    Ok(())
}
