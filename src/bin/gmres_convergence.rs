//! Experiment Runner for GMRES convergence.
//!
//! For each system size `n`, solves the tridiagonal test problem with `m = n/2`
//! GMRES steps and records the relative residual `||r_j|| / ||b||` after every
//! step, one CSV row per (n, iteration) pair.

use anyhow::{Result, ensure};
use clap::Parser;
use krylov_arnoldi::{
    gmres,
    utils::fixtures::{tridiagonal_matrix, tridiagonal_rhs},
};
use serde::Serialize;
use std::path::PathBuf;

/// Command-line arguments for the GMRES convergence runner.
#[derive(Parser, Debug)]
#[clap(
    name = "gmres-convergence",
    about = "Records the GMRES residual history on tridiagonal systems of several sizes."
)]
struct ConvergenceArgs {
    /// System sizes to run, comma separated.
    #[clap(long, value_delimiter = ',', default_value = "8,16,32,64,128,256")]
    sizes: Vec<usize>,
    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// A single row of the output CSV file.
#[derive(Debug, Serialize)]
struct ConvergenceResult {
    /// Dimension of the linear system.
    n: usize,
    /// GMRES step; 0 is the initial residual.
    iteration: usize,
    /// Residual norm relative to ||b||.
    relative_residual: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = ConvergenceArgs::parse();
    ensure!(
        args.sizes.iter().all(|&n| n >= 2),
        "Every system size must be at least 2, got {:?}",
        args.sizes
    );

    let mut writer = csv::Writer::from_path(&args.output)?;

    for &n in &args.sizes {
        let m = n / 2;
        let a = tridiagonal_matrix(n);
        let b = tridiagonal_rhs(n);

        let output = gmres(a.as_ref(), b.as_ref(), m)?;
        let history = output.relative_residuals();
        log::info!(
            "n = {}: {} steps, final relative residual {:e}",
            n,
            output.iterations,
            history.last().copied().unwrap_or(0.0)
        );

        for (iteration, relative_residual) in history.into_iter().enumerate() {
            writer.serialize(ConvergenceResult {
                n,
                iteration,
                relative_residual,
            })?;
        }
    }

    writer.flush()?;
    log::info!("GMRES convergence results saved to {:?}.", &args.output);
    Ok(())
}
