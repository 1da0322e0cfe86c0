//! Compute Fibonacci numbers modulo 10007 with matrix powers
//!
//! Run with: cargo run --example fibonacci -- 1000000

use modmat::{power, strassen, DenseMatrix, ModmatError};

fn main() -> Result<(), ModmatError> {
    let n: i64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(90);

    // [[1, 1], [1, 0]]^n = [[F(n+1), F(n)], [F(n), F(n-1)]]
    let q = DenseMatrix::from_values(2, 2, &[1, 1, 1, 0])?;
    let start = std::time::Instant::now();
    let result = power(&q, n)?;
    let elapsed = start.elapsed();

    match result.get(0, 1) {
        Some(fib) if n > 0 => println!("F({n}) mod {} = {fib}", modmat::MODULUS),
        _ => println!("F({n}) is not defined by this example"),
    }
    println!("Computed in {elapsed:.2?}");

    // Same square through Strassen for comparison
    let squared = strassen(&q, &q)?;
    println!("Q^2 via Strassen: {:?}", squared.as_raw());

    Ok(())
}
