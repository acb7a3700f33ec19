//! Mini-batch stochastic gradient descent.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::Sample;
use crate::matrix::Matrix;
use crate::metrics::argmax;
use crate::network::Network;
use crate::{Error, Result};

/// Epoch-order policy for the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shuffle {
    /// Visit samples in the order given, every epoch.
    None,
    /// Fresh entropy-seeded permutation per epoch.
    Random,
    /// Deterministic permutations drawn from a fixed seed.
    Seeded(u64),
}

/// Hyperparameters for [`Network::train`].
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    /// Upper bound per batch; the final batch of an epoch may be smaller.
    pub batch_size: usize,
    pub shuffle: Shuffle,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-2,
            epochs: 10,
            batch_size: 32,
            shuffle: Shuffle::Random,
        }
    }
}

/// Averaged metrics for one completed epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// 0-based epoch index.
    pub epoch: usize,
    /// Mean cross-entropy over all samples.
    pub loss: f64,
    /// Fraction of samples whose predicted argmax matched the target argmax.
    pub accuracy: f64,
}

impl Network {
    /// Train with mini-batch SGD, one optional observer call per epoch.
    ///
    /// Every epoch visits each sample exactly once, in (optionally shuffled)
    /// permutation order, partitioned into consecutive batches of at most
    /// `cfg.batch_size`. A batch's gradients are fully accumulated before any
    /// parameter moves, then applied as
    /// `param -= (lr / batch_len) · accumulated`, where `batch_len` is the
    /// realized length so an undersized tail batch is averaged correctly.
    ///
    /// Returns one [`EpochReport`] per epoch. Bad hyperparameters are
    /// [`Error::InvalidConfig`]; empty or misshapen samples are
    /// [`Error::InvalidData`]. Both are checked before anything mutates.
    pub fn train(
        &mut self,
        samples: &[Sample],
        cfg: TrainConfig,
        mut on_epoch: Option<&mut dyn FnMut(&EpochReport)>,
    ) -> Result<Vec<EpochReport>> {
        if samples.is_empty() {
            return Err(Error::InvalidData("samples must not be empty".to_owned()));
        }
        let input_dim = self.topology()[0];
        let output_dim = self.topology()[self.topology().len() - 1];
        for (i, s) in samples.iter().enumerate() {
            if s.input.len() != input_dim {
                return Err(Error::InvalidData(format!(
                    "sample {i} input len {} does not match input layer {input_dim}",
                    s.input.len()
                )));
            }
            if s.target.len() != output_dim {
                return Err(Error::InvalidData(format!(
                    "sample {i} target len {} does not match output layer {output_dim}",
                    s.target.len()
                )));
            }
        }
        if cfg.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }
        if cfg.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be > 0".to_owned()));
        }
        if !(cfg.learning_rate.is_finite() && cfg.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(
                "learning_rate must be finite and > 0".to_owned(),
            ));
        }

        // Columns are fixed for the whole run; only the visit order changes.
        let inputs: Vec<Matrix> = samples
            .iter()
            .map(|s| Matrix::from_column(&s.input))
            .collect();
        let targets: Vec<Matrix> = samples
            .iter()
            .map(|s| Matrix::from_column(&s.target))
            .collect();

        let mut order: Vec<usize> = (0..samples.len()).collect();
        let mut shuffle_rng = match cfg.shuffle {
            Shuffle::None => None,
            Shuffle::Random => Some(StdRng::from_entropy()),
            Shuffle::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        };

        let mut history = Vec::with_capacity(cfg.epochs);
        for epoch in 0..cfg.epochs {
            if let Some(rng) = shuffle_rng.as_mut() {
                order.shuffle(rng);
            }

            let mut epoch_loss = 0.0;
            let mut correct = 0usize;
            for batch in order.chunks(cfg.batch_size) {
                let mut acc_dw: Vec<Matrix> = self
                    .weights()
                    .iter()
                    .map(|w| Matrix::zeros(w.rows(), w.cols()))
                    .collect();
                let mut acc_db: Vec<Matrix> = self
                    .biases()
                    .iter()
                    .map(|b| Matrix::zeros(b.rows(), 1))
                    .collect();

                for &idx in batch {
                    let trace = self.forward(&inputs[idx])?;
                    if argmax(trace.output().as_slice()) == argmax(targets[idx].as_slice()) {
                        correct += 1;
                    }
                    let grads = self.backprop_from_trace(&trace, &targets[idx])?;
                    epoch_loss += grads.loss;
                    for i in 0..acc_dw.len() {
                        acc_dw[i] = acc_dw[i].add(&grads.d_weights[i])?;
                        acc_db[i] = acc_db[i].add(&grads.d_biases[i])?;
                    }
                }

                // Parameters move only after the whole batch is accumulated.
                self.sgd_step(&acc_dw, &acc_db, cfg.learning_rate / batch.len() as f64)?;
            }

            let n = samples.len() as f64;
            let report = EpochReport {
                epoch,
                loss: epoch_loss / n,
                accuracy: correct as f64 / n,
            };
            log::debug!(
                "epoch {}: loss {:.6}, accuracy {:.4}",
                report.epoch,
                report.loss,
                report.accuracy
            );
            if let Some(cb) = on_epoch.as_mut() {
                cb(&report);
            }
            history.push(report);
        }
        Ok(history)
    }
}
