//! Plain-text rendering of matrices for the command-line tools.

use faer::MatRef;
use std::io::{self, Write};

/// Writes `matrix` one row per line, entries as signed fixed-point numbers with
/// `precision` decimals, separated by a single space.
pub fn write_matrix<W: Write>(
    writer: &mut W,
    matrix: MatRef<'_, f64>,
    precision: usize,
) -> io::Result<()> {
    for i in 0..matrix.nrows() {
        let row = (0..matrix.ncols())
            .map(|j| format!("{:+.*}", precision, matrix[(i, j)]))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{row}")?;
    }
    Ok(())
}
