use std::env;
use std::time::Instant;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| "matrix.txt".to_string());

    let a = mlu::io::read_matrix_file(&path).with_context(|| format!("reading {}", path))?;
    println!("{} x {}", a.height(), a.width());

    let nnz = a.nnz();
    println!("nonzeros before: {}", nnz);

    let now = Instant::now();
    let lups = mlu::factorize(&a).context("factorization failed")?;
    let elapsed = now.elapsed();

    println!("nonzeros after: {}", lups.nnz());
    println!("fill-in: {}", lups.fill_in(nnz));
    println!("factorization time: {:.6} s", elapsed.as_secs_f64());

    Ok(())
}
