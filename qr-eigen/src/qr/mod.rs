//! Householder QR decomposition

pub mod decompose;
pub mod householder;

pub use decompose::{HouseholderQR, QRDecomposition, qr_decompose};
