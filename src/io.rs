//! ```text
//! H W
//! c v<TAB>c v<TAB>...
//! ```
//!
//! One line per row, columns 1-based and strictly ascending.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LoadError;
use crate::matrix::SparseMatrix;

pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> Result<SparseMatrix<f64>, LoadError> {
    let f = File::open(path)?;
    read_matrix(BufReader::new(f))
}

pub fn read_matrix<R: BufRead>(reader: R) -> Result<SparseMatrix<f64>, LoadError> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| LoadError::Header(String::new()))?;
    let (height, width) = parse_header(&header)?;

    let mut m = SparseMatrix::new(height, width);
    for r in 0..height {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(LoadError::MissingRows {
                    expected: height,
                    found: r,
                })
            }
        };

        let mut prev = 0;
        for token in line.split('\t').map(str::trim).filter(|t| !t.is_empty()) {
            let (col, value) = parse_entry(token).ok_or_else(|| LoadError::Entry {
                row: r + 1,
                token: token.to_string(),
            })?;
            if col == 0 || col > width {
                return Err(LoadError::ColumnRange {
                    row: r + 1,
                    col,
                    width,
                });
            }
            if col <= prev {
                return Err(LoadError::Unsorted { row: r + 1, col, prev });
            }
            prev = col;

            m.append(r, col - 1, value);
        }
    }
    Ok(m)
}

fn parse_header(line: &str) -> Result<(usize, usize), LoadError> {
    let mut fields = line.split_whitespace().map(str::parse::<usize>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(h)), Some(Ok(w)), None) => Ok((h, w)),
        _ => Err(LoadError::Header(line.to_string())),
    }
}

fn parse_entry(token: &str) -> Option<(usize, f64)> {
    let mut fields = token.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(c), Some(v), None) => Some((c.parse().ok()?, v.parse().ok()?)),
        _ => None,
    }
}
