//! Weight initialization.

use rand::Rng;

use crate::matrix::Matrix;

/// Xavier (Glorot) uniform initialization for a `rows` x `cols` weight matrix.
///
/// Entries are drawn i.i.d. from `U(-limit, limit)` with
/// `limit = sqrt(6 / (fan_in + fan_out))`, where `fan_in = cols` (inputs to
/// the layer) and `fan_out = rows` (units in the layer). Bias columns are not
/// handled here; the network starts them at zero.
pub fn xavier_uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    let limit = (6.0 / (rows + cols) as f64).sqrt();
    Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-limit..limit))
}
