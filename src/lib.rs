//! A from-scratch dense-matrix neural network crate.
//!
//! `matnet` pairs a small row-major `f64` matrix engine with a
//! fully-connected feed-forward network: a hardcoded softmax + cross-entropy
//! output head, manual backpropagation, and mini-batch SGD with per-epoch
//! shuffling. There is no autograd, no GPU, and no layer zoo; the point is a
//! readable reference implementation with exact, reproducible numerics.
//!
//! # Design
//!
//! - Value semantics: every matrix operation returns a new matrix; training
//!   is the only thing that mutates a network, and only between batches.
//! - Clear contracts: shapes are explicit and validated at the API boundary
//!   with [`Result`]; hot-path element access is `debug_assert!`ed.
//! - Reproducibility: weight init and shuffling draw from injectable RNGs,
//!   so `with_seed` + `Shuffle::Seeded` make whole runs deterministic.
//! - Exact snapshots: JSON serialization round-trips every parameter at full
//!   `f64` precision; nothing is quantized.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f64`.
//! - Matrices are flat row-major buffers with explicit `(rows, cols)`.
//! - Weight `W_i` has shape `(n_{i+1}, n_i)`; bias `b_i` is `(n_{i+1}, 1)`.
//! - Single samples flow through the network as n x 1 column matrices.

//! # Quick start
//!
//! ```rust
//! use matnet::{Activation, Network, Sample, Shuffle, TrainConfig};
//!
//! # fn main() -> matnet::Result<()> {
//! // XOR, one-hot encoded: class 0 = false, class 1 = true.
//! let samples = vec![
//!     Sample::new(vec![0.0, 0.0], vec![1.0, 0.0]),
//!     Sample::new(vec![0.0, 1.0], vec![0.0, 1.0]),
//!     Sample::new(vec![1.0, 0.0], vec![0.0, 1.0]),
//!     Sample::new(vec![1.0, 1.0], vec![1.0, 0.0]),
//! ];
//!
//! let mut net = Network::with_seed(&[2, 8, 2], Activation::ReLU, 0)?;
//! let history = net.train(
//!     &samples,
//!     TrainConfig {
//!         learning_rate: 0.5,
//!         epochs: 200,
//!         batch_size: 4,
//!         shuffle: Shuffle::Seeded(0),
//!     },
//!     None,
//! )?;
//! assert_eq!(history.len(), 200);
//! # Ok(())
//! # }
//! ```

//! # Inference and snapshots
//!
//! ```rust
//! use matnet::{Activation, Matrix, Network};
//!
//! # fn main() -> matnet::Result<()> {
//! let net = Network::with_seed(&[2, 4, 3], Activation::Tanh, 7)?;
//!
//! let input = Matrix::from_column(&[0.5, -0.25]);
//! let probs = net.predict(&input)?;
//! assert!((probs.as_slice().iter().sum::<f64>() - 1.0).abs() < 1e-10);
//!
//! let reloaded = Network::load(net.save()?)?;
//! assert_eq!(reloaded.predict(&input)?, probs);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod data;
pub mod error;
pub mod init;
pub mod loss;
pub mod matrix;
pub mod metrics;
pub mod network;
pub mod serde_model;
pub mod train;

pub use activation::Activation;
pub use data::{one_hot, Sample};
pub use error::{Error, Result, Shape};
pub use matrix::Matrix;
pub use metrics::argmax;
pub use network::{ForwardTrace, Gradients, Network};
pub use serde_model::{MatrixRecord, NetworkSnapshot};
pub use train::{EpochReport, Shuffle, TrainConfig};
