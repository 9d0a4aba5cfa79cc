//! Command-line driver for the Arnoldi iteration.
//!
//! Runs the iteration on a matrix and seed vector read from text files, or on the
//! built-in 10×10 reference problem when no files are given, and prints the basis
//! `Q` followed by the Hessenberg matrix `H`.

use anyhow::{Context, Result};
use clap::Parser;
use krylov_arnoldi::{
    Termination, arnoldi,
    utils::{
        data_loader::{load_dense_matrix, load_vector},
        fixtures::{REFERENCE_DEGREE, reference_matrix, reference_seed},
        metrics::{arnoldi_relation_residual, orthogonality_loss},
        report::write_matrix,
    },
};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Command-line arguments for the Arnoldi driver.
#[derive(Parser, Debug)]
#[clap(
    name = "arnoldi",
    about = "Computes an orthonormal Krylov basis Q and the upper Hessenberg matrix H."
)]
struct ArnoldiArgs {
    /// Path to a whitespace-separated square matrix, one row per line.
    #[clap(long, value_name = "PATH", requires = "seed")]
    matrix: Option<PathBuf>,
    /// Path to the whitespace-separated seed vector.
    #[clap(long, value_name = "PATH", requires = "matrix")]
    seed: Option<PathBuf>,
    /// Requested Krylov subspace dimension.
    #[clap(long, default_value_t = REFERENCE_DEGREE)]
    m: usize,
    /// Number of decimals printed for each entry.
    #[clap(long, default_value_t = 6)]
    precision: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = ArnoldiArgs::parse();

    let (a, u) = match (&args.matrix, &args.seed) {
        (Some(matrix_path), Some(seed_path)) => {
            let a = load_dense_matrix(matrix_path)
                .with_context(|| format!("Failed to load matrix from {:?}", matrix_path))?;
            let u = load_vector(seed_path)
                .with_context(|| format!("Failed to load seed vector from {:?}", seed_path))?;
            (a, u)
        }
        _ => {
            log::info!("No input files given; using the built-in 10x10 reference problem.");
            (reference_matrix(), reference_seed())
        }
    };

    log::info!(
        "Running Arnoldi on a {}x{} matrix with m = {}",
        a.nrows(),
        a.ncols(),
        args.m
    );
    let output = arnoldi(a.as_ref(), u.as_ref(), args.m)?;

    match output.termination {
        Termination::Completed => log::info!("Completed {} steps.", output.steps_taken),
        Termination::Breakdown => log::warn!(
            "Breakdown after {} of {} steps: an invariant subspace was found.",
            output.steps_taken,
            args.m
        ),
        Termination::Stopped => log::warn!("Stopped after {} steps.", output.steps_taken),
    }
    log::info!(
        "Orthogonality loss ||I - Q^T Q||_F = {:e}",
        orthogonality_loss(output.q.as_ref())
    );
    log::info!(
        "Arnoldi relation residual ||AQ - QH||_F = {:e}",
        arnoldi_relation_residual(&a, &output)?
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_matrix(&mut out, output.q.as_ref(), args.precision)?;
    writeln!(out)?;
    write_matrix(&mut out, output.h.as_ref(), args.precision)?;
    out.flush()?;

    Ok(())
}
