//! Matrix helpers shared by the decomposition and the iteration

pub mod matrix;
pub mod norms;
pub mod validation;

pub use matrix::{
    allclose, diagonal, identity, matmul, matrix_from_rows, max_abs_diff, trace, transpose,
};
pub use norms::{norm_2, norm_frobenius, norm_max};
pub use validation::{is_orthogonal, is_upper_triangular, validate_qr};
