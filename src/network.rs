//! The fully-connected network: construction, inference, gradients.
//!
//! A `Network` is an ordered topology `n0..nL` with one weight matrix and one
//! bias column per layer transition. Hidden layers share a single
//! [`Activation`]; the output layer is always softmax, paired with
//! cross-entropy in the backward pass. That coupling is hardcoded: the output
//! delta `a_L - target` is only the correct gradient for this pairing, and it
//! additionally requires each target to sum to 1.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::Activation;
use crate::init;
use crate::loss;
use crate::matrix::Matrix;
use crate::{Error, Result};

/// A feed-forward network with dense layers.
///
/// Weights `W_i` have shape `(n_{i+1}, n_i)` and biases `b_i` shape
/// `(n_{i+1}, 1)`. Construction draws weights from Xavier-uniform and zeroes
/// the biases; [`from_parts`](Network::from_parts) adopts explicit parameters
/// instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    topology: Vec<usize>,
    hidden: Activation,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
}

/// Everything the forward pass computed, kept for backpropagation.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    /// Pre-activations `z_i`, one per layer transition.
    zs: Vec<Matrix>,
    /// `a_0` (the input) through `a_L` (the softmax output).
    activations: Vec<Matrix>,
}

impl ForwardTrace {
    /// The softmax output column `a_L`.
    #[inline]
    pub fn output(&self) -> &Matrix {
        &self.activations[self.activations.len() - 1]
    }

    /// Activations per layer, `[0]` being the input column.
    #[inline]
    pub fn activations(&self) -> &[Matrix] {
        &self.activations
    }

    /// Pre-activation columns, one per layer transition.
    #[inline]
    pub fn pre_activations(&self) -> &[Matrix] {
        &self.zs
    }
}

/// Per-parameter gradients from one backward pass, plus the sample loss.
///
/// `d_weights[i]` and `d_biases[i]` are shaped exactly like the network's
/// `W_i` and `b_i`, so they can be accumulated and applied positionally.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub d_weights: Vec<Matrix>,
    pub d_biases: Vec<Matrix>,
    pub loss: f64,
}

impl Network {
    /// A freshly initialized network with entropy-seeded weights.
    ///
    /// `topology` lists layer sizes from input to output and needs at least
    /// two entries, all non-zero; anything else is
    /// [`Error::InvalidConfig`].
    pub fn new(topology: &[usize], hidden: Activation) -> Result<Self> {
        Self::with_rng(topology, hidden, &mut rand::thread_rng())
    }

    /// Like [`new`](Network::new) with a deterministic seed.
    pub fn with_seed(topology: &[usize], hidden: Activation, seed: u64) -> Result<Self> {
        Self::with_rng(topology, hidden, &mut StdRng::seed_from_u64(seed))
    }

    /// Like [`new`](Network::new) drawing from a caller-supplied source.
    pub fn with_rng<R: Rng + ?Sized>(
        topology: &[usize],
        hidden: Activation,
        rng: &mut R,
    ) -> Result<Self> {
        Self::validate_topology(topology)?;
        let mut weights = Vec::with_capacity(topology.len() - 1);
        let mut biases = Vec::with_capacity(topology.len() - 1);
        for pair in topology.windows(2) {
            weights.push(init::xavier_uniform(pair[1], pair[0], rng));
            biases.push(Matrix::zeros(pair[1], 1));
        }
        Ok(Self {
            topology: topology.to_vec(),
            hidden,
            weights,
            biases,
        })
    }

    /// Assemble a network from explicit parameters.
    ///
    /// Every matrix must match the topology (`W_i` is `n_{i+1}` x `n_i`,
    /// `b_i` is `n_{i+1}` x 1), else [`Error::InvalidConfig`]. Snapshot
    /// loading and tests go through here.
    pub fn from_parts(
        topology: Vec<usize>,
        hidden: Activation,
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
    ) -> Result<Self> {
        Self::validate_topology(&topology)?;
        let transitions = topology.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(Error::InvalidConfig(format!(
                "expected {transitions} weight and bias matrices, got {} and {}",
                weights.len(),
                biases.len()
            )));
        }
        for i in 0..transitions {
            let expected = (topology[i + 1], topology[i]);
            if weights[i].shape() != expected {
                return Err(Error::InvalidConfig(format!(
                    "weight {i} has shape {:?}, expected {expected:?}",
                    weights[i].shape()
                )));
            }
            let expected = (topology[i + 1], 1);
            if biases[i].shape() != expected {
                return Err(Error::InvalidConfig(format!(
                    "bias {i} has shape {:?}, expected {expected:?}",
                    biases[i].shape()
                )));
            }
        }
        Ok(Self {
            topology,
            hidden,
            weights,
            biases,
        })
    }

    /// Layer sizes from input to output.
    #[inline]
    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    /// The activation shared by all hidden layers.
    #[inline]
    pub fn hidden_activation(&self) -> Activation {
        self.hidden
    }

    /// Weight matrices, one per layer transition.
    #[inline]
    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    /// Bias columns, one per layer transition.
    #[inline]
    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    /// Run the network on one `n0` x 1 input column, keeping the full trace.
    ///
    /// Each transition computes `z_i = W_i · a_i + b_i`; hidden layers apply
    /// the shared activation elementwise and the last layer applies softmax.
    /// A wrongly shaped input is [`Error::InvalidData`].
    pub fn forward(&self, input: &Matrix) -> Result<ForwardTrace> {
        self.check_input(input)?;
        let hidden = self.hidden;
        let last = self.weights.len() - 1;

        let mut zs = Vec::with_capacity(self.weights.len());
        let mut activations = Vec::with_capacity(self.weights.len() + 1);
        activations.push(input.clone());
        for (i, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            let z = w.matmul(&activations[i])?.add_broadcast_column(b)?;
            let a = if i == last {
                Matrix::from_column(&loss::softmax(z.as_slice()))
            } else {
                z.map(|x| hidden.forward(x))
            };
            zs.push(z);
            activations.push(a);
        }
        Ok(ForwardTrace { zs, activations })
    }

    /// Class probabilities for one input column, discarding the trace.
    pub fn predict(&self, input: &Matrix) -> Result<Matrix> {
        Ok(self.forward(input)?.output().clone())
    }

    /// Gradients of the cross-entropy loss for one sample.
    ///
    /// `target` must be an `nL` x 1 column summing to 1 (one-hot or a soft
    /// label mixture); a wrongly shaped target is [`Error::InvalidData`].
    pub fn backward(&self, input: &Matrix, target: &Matrix) -> Result<Gradients> {
        self.check_target(target)?;
        let trace = self.forward(input)?;
        self.backprop_from_trace(&trace, target)
    }

    /// Delta recursion over an existing trace.
    ///
    /// Shared with the training loop so one forward pass per sample serves
    /// both the accuracy count and the gradients.
    pub(crate) fn backprop_from_trace(
        &self,
        trace: &ForwardTrace,
        target: &Matrix,
    ) -> Result<Gradients> {
        let output = trace.output();
        let loss = loss::cross_entropy(output.as_slice(), target.as_slice());

        let transitions = self.weights.len();
        let mut d_weights = Vec::with_capacity(transitions);
        let mut d_biases = Vec::with_capacity(transitions);

        // Softmax and cross-entropy collapse to this difference at the output.
        let mut delta = output.sub(target)?;
        for i in (0..transitions).rev() {
            d_weights.push(delta.matmul(&trace.activations[i].transpose())?);
            d_biases.push(delta.clone());
            if i > 0 {
                // Derivative of the hidden activation at the pre-activation.
                let carried = self.weights[i].transpose().matmul(&delta)?;
                let slope = trace.zs[i - 1].map(|x| self.hidden.derivative(x));
                delta = carried.hadamard(&slope)?;
            }
        }
        d_weights.reverse();
        d_biases.reverse();
        Ok(Gradients {
            d_weights,
            d_biases,
            loss,
        })
    }

    /// Apply one descent step, `param -= step · d_param`, positionally.
    ///
    /// `step` already folds in the learning rate and any batch averaging.
    pub(crate) fn sgd_step(
        &mut self,
        d_weights: &[Matrix],
        d_biases: &[Matrix],
        step: f64,
    ) -> Result<()> {
        debug_assert_eq!(d_weights.len(), self.weights.len());
        debug_assert_eq!(d_biases.len(), self.biases.len());
        for i in 0..self.weights.len() {
            self.weights[i] = self.weights[i].sub(&d_weights[i].scale(step))?;
            self.biases[i] = self.biases[i].sub(&d_biases[i].scale(step))?;
        }
        Ok(())
    }

    pub(crate) fn check_target(&self, target: &Matrix) -> Result<()> {
        let outputs = self.topology[self.topology.len() - 1];
        if target.shape() != (outputs, 1) {
            return Err(Error::InvalidData(format!(
                "target must be a {outputs}x1 column, got {}x{}",
                target.rows(),
                target.cols()
            )));
        }
        Ok(())
    }

    fn check_input(&self, input: &Matrix) -> Result<()> {
        if input.shape() != (self.topology[0], 1) {
            return Err(Error::InvalidData(format!(
                "input must be a {}x1 column, got {}x{}",
                self.topology[0],
                input.rows(),
                input.cols()
            )));
        }
        Ok(())
    }

    fn validate_topology(topology: &[usize]) -> Result<()> {
        if topology.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "topology needs an input and an output layer, got {} entries",
                topology.len()
            )));
        }
        if let Some(pos) = topology.iter().position(|&n| n == 0) {
            return Err(Error::InvalidConfig(format!("layer {pos} has zero units")));
        }
        Ok(())
    }
}
