//! This module provides utilities for loading dense problems from text files.
//!
//! The format is deliberately plain: numbers separated by whitespace. A matrix file
//! holds one row per line. A vector file holds its entries separated by any
//! whitespace, so both a single row and a single column are accepted. Blank lines
//! and lines starting with `#` are ignored in both.

use faer::{Col, Mat};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use thiserror::Error;

/// Represents all possible errors that can occur during data loading and parsing.
#[derive(Error, Debug)]
pub enum DataLoaderError {
    /// Wraps a standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Occurs when a token cannot be parsed into a float.
    #[error("Parse error: Failed to parse float from '{0}'")]
    ParseFloat(String),
    /// Occurs when a matrix row has a different number of entries than the first row.
    #[error("Format error: line {line} has {found} entries, expected {expected}.")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Occurs when the input contains no numbers at all.
    #[error("Format error: no numeric data found.")]
    Empty,
    /// Occurs when a loaded matrix is not square.
    #[error("Format error: matrix must be square, got {nrows}x{ncols}.")]
    NotSquare { nrows: usize, ncols: usize },
}

/// Yields `(line_number, line)` for every non-blank, non-comment line.
fn data_lines(
    reader: impl BufRead,
) -> impl Iterator<Item = Result<(usize, String), DataLoaderError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    None
                } else {
                    Some(Ok((idx + 1, trimmed.to_string())))
                }
            }
            Err(e) => Some(Err(DataLoaderError::from(e))),
        })
}

fn parse_token(token: &str) -> Result<f64, DataLoaderError> {
    token
        .parse::<f64>()
        .map_err(|_| DataLoaderError::ParseFloat(token.to_string()))
}

/// Parses a dense square matrix, one row per line.
pub fn parse_dense_matrix(reader: impl BufRead) -> Result<Mat<f64>, DataLoaderError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for entry in data_lines(reader) {
        let (line, text) = entry?;
        let row = text
            .split_whitespace()
            .map(parse_token)
            .collect::<Result<Vec<f64>, _>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(DataLoaderError::RaggedRow {
                    line,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if nrows == 0 || ncols == 0 {
        return Err(DataLoaderError::Empty);
    }
    if nrows != ncols {
        return Err(DataLoaderError::NotSquare { nrows, ncols });
    }

    Ok(Mat::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

/// Parses a vector whose entries are separated by arbitrary whitespace.
pub fn parse_vector(reader: impl BufRead) -> Result<Col<f64>, DataLoaderError> {
    let mut values = Vec::new();
    for entry in data_lines(reader) {
        let (_, text) = entry?;
        for token in text.split_whitespace() {
            values.push(parse_token(token)?);
        }
    }

    if values.is_empty() {
        return Err(DataLoaderError::Empty);
    }
    Ok(Col::from_fn(values.len(), |i| values[i]))
}

/// Loads a dense square matrix from a text file.
pub fn load_dense_matrix(path: impl AsRef<Path>) -> Result<Mat<f64>, DataLoaderError> {
    let file = File::open(path)?;
    parse_dense_matrix(BufReader::new(file))
}

/// Loads a vector from a text file.
pub fn load_vector(path: impl AsRef<Path>) -> Result<Col<f64>, DataLoaderError> {
    let file = File::open(path)?;
    parse_vector(BufReader::new(file))
}
