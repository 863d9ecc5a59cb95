//! Eigenvalues of a small symmetric matrix, with convergence details

use qr_eigen::{QRIterationConfig, matrix_from_rows, qr_iteration};

fn main() {
    let a = matrix_from_rows(&[
        vec![4.0, 1.0, -2.0, 2.0],
        vec![1.0, 2.0, 0.0, 1.0],
        vec![-2.0, 0.0, 3.0, -2.0],
        vec![2.0, 1.0, -2.0, -1.0],
    ])
    .expect("rows have equal length");

    let result = qr_iteration(&a, QRIterationConfig::default()).expect("matrix is square");

    println!(
        "converged: {} after {} iterations",
        result.converged, result.iterations
    );
    for (i, ev) in result.eigenvalues.iter().enumerate() {
        println!("  lambda[{}] = {:.8}", i, ev);
    }

    println!("final iterate:");
    let n = result.eigenvalues.len();
    for i in 0..n {
        let row: Vec<String> = (0..n)
            .map(|j| format!("{:>12.3e}", result.matrix[[i, j]]))
            .collect();
        println!("  [{}]", row.join(", "));
    }
}
