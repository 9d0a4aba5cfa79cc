//! Experiment Runner for Orthogonality Analysis.
//!
//! This executable measures how well the modified Gram-Schmidt sweep keeps the
//! Arnoldi basis orthonormal as the subspace dimension grows. For every `m` in the
//! requested range it records the loss of orthogonality `||I - Q^T Q||_F` and the
//! residual of the Arnoldi relation `||AQ - QH||_F` on a random dense problem.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use faer::{Col, Mat};
use krylov_arnoldi::{
    arnoldi,
    utils::metrics::{arnoldi_relation_residual, orthogonality_loss},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::path::PathBuf;

/// Defines how the random test matrix is conditioned.
#[derive(ValueEnum, Clone, Debug, Copy)]
enum ProblemScenario {
    /// Uniform entries in [-1, 1] plus a diagonal shift of `n`, strongly
    /// diagonally dominant.
    WellConditioned,
    /// Uniform entries in [-1, 1] with columns graded over eight orders of
    /// magnitude.
    IllConditioned,
}

/// Command-line arguments for the orthogonality analysis runner.
#[derive(Parser, Debug)]
#[clap(
    name = "orthogonality-runner",
    about = "Runs an analysis of the Arnoldi basis orthogonality as the subspace grows."
)]
struct OrthoArgs {
    /// The conditioning scenario for the test problem.
    #[clap(long, value_enum)]
    scenario: ProblemScenario,
    /// Dimension of the test matrix.
    #[clap(long, default_value_t = 200)]
    n: usize,
    /// Minimum subspace dimension (m) to test.
    #[clap(long, default_value_t = 10)]
    m_min: usize,
    /// Maximum subspace dimension (m) to test.
    #[clap(long, default_value_t = 150)]
    m_max: usize,
    /// Step size for iterating m.
    #[clap(long, default_value_t = 10)]
    m_step: usize,
    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// A single row of the output CSV file.
#[derive(Debug, Serialize)]
struct OrthogonalityResult {
    /// The requested subspace dimension.
    m: usize,
    /// Steps actually performed (smaller than `m` after a breakdown).
    steps_taken: usize,
    /// Whether the run ended with a breakdown.
    breakdown: bool,
    /// Orthogonality loss of the returned basis, ||I - Q^T Q||_F.
    ortho_loss: f64,
    /// Residual of the Arnoldi relation, ||AQ - QH||_F.
    relation_residual: f64,
}

/// Creates a random dense matrix with the conditioning of the given scenario.
fn create_dense_problem(n: usize, scenario: ProblemScenario, rng: &mut StdRng) -> Mat<f64> {
    let mut a = Mat::from_fn(n, n, |_, _| rng.random_range(-1.0..1.0));
    match scenario {
        ProblemScenario::WellConditioned => {
            for i in 0..n {
                a[(i, i)] += n as f64;
            }
        }
        ProblemScenario::IllConditioned => {
            for j in 0..n {
                let scale = 10f64.powf(-8.0 * j as f64 / (n - 1).max(1) as f64);
                for i in 0..n {
                    a[(i, j)] *= scale;
                }
            }
        }
    }
    a
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = OrthoArgs::parse();
    log::info!(
        "Starting orthogonality analysis for scenario: {:?}, n = {}",
        args.scenario,
        args.n
    );

    let mut rng = StdRng::seed_from_u64(42); // For reproducible results.
    let a = create_dense_problem(args.n, args.scenario, &mut rng);
    let u = Col::from_fn(args.n, |_| rng.random::<f64>());

    let mut writer = csv::Writer::from_path(&args.output)?;

    for m in (args.m_min..=args.m_max).step_by(args.m_step.max(1)) {
        if m == 0 {
            continue;
        }
        log::info!("Running for m = {}...", m);

        let output = arnoldi(a.as_ref(), u.as_ref(), m)?;
        if output.is_breakdown() {
            log::warn!("Breakdown at step {} for m = {}.", output.steps_taken, m);
        }

        writer.serialize(OrthogonalityResult {
            m,
            steps_taken: output.steps_taken,
            breakdown: output.is_breakdown(),
            ortho_loss: orthogonality_loss(output.q.as_ref()),
            relation_residual: arnoldi_relation_residual(&a, &output)?,
        })?;
    }

    writer.flush()?;
    log::info!(
        "Orthogonality analysis complete. Results saved to {:?}.",
        &args.output
    );
    Ok(())
}
