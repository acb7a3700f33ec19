//! Hidden-layer activation functions.
//!
//! Activations are scalar maps applied elementwise to pre-activation columns.
//! `derivative` is always evaluated at the pre-activation input, never at the
//! activated output, so custom functions only need the textbook definition of
//! their gradient.

/// Sigmoid inputs are clamped to this magnitude before exponentiation, which
/// keeps `exp` comfortably inside `f64` range.
const SIGMOID_CLAMP: f64 = 500.0;

/// A hidden-layer activation, selected per network.
///
/// The `Custom` variant carries plain `fn` pointers, so it is `Copy` and
/// comparable (by function address), but it has no serialized
/// [`name`](Activation::name).
#[derive(Debug, Clone, Copy)]
pub enum Activation {
    /// `max(0, x)`. The derivative at exactly `x == 0` is defined as `0`.
    ReLU,
    /// `1 / (1 + e^-x)`, with the input clamped to `±500`.
    Sigmoid,
    /// Hyperbolic tangent.
    Tanh,
    /// A user-supplied pair of scalar functions.
    Custom {
        forward: fn(f64) -> f64,
        derivative: fn(f64) -> f64,
    },
}

impl PartialEq for Activation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Activation::ReLU, Activation::ReLU)
            | (Activation::Sigmoid, Activation::Sigmoid)
            | (Activation::Tanh, Activation::Tanh) => true,
            // Function addresses are stable for copies of one value but not
            // guaranteed unique per function across codegen units.
            (
                Activation::Custom {
                    forward: lf,
                    derivative: ld,
                },
                Activation::Custom {
                    forward: rf,
                    derivative: rd,
                },
            ) => std::ptr::fn_addr_eq(*lf, *rf) && std::ptr::fn_addr_eq(*ld, *rd),
            _ => false,
        }
    }
}

impl Activation {
    /// Evaluate the activation at `x`.
    #[inline]
    pub fn forward(&self, x: f64) -> f64 {
        match self {
            Activation::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => {
                let x = x.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP);
                1.0 / (1.0 + (-x).exp())
            }
            Activation::Tanh => x.tanh(),
            Activation::Custom { forward, .. } => forward(x),
        }
    }

    /// Evaluate the derivative at the pre-activation `x`.
    #[inline]
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => {
                let s = self.forward(x);
                s * (1.0 - s)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::Custom { derivative, .. } => derivative(x),
        }
    }

    /// Stable identifier used in serialized snapshots.
    ///
    /// `Custom` activations have no identifier and cannot be persisted.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Activation::ReLU => Some("relu"),
            Activation::Sigmoid => Some("sigmoid"),
            Activation::Tanh => Some("tanh"),
            Activation::Custom { .. } => None,
        }
    }

    /// Inverse of [`name`](Activation::name) for the built-in variants.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "relu" => Some(Activation::ReLU),
            "sigmoid" => Some(Activation::Sigmoid),
            "tanh" => Some(Activation::Tanh),
            _ => None,
        }
    }
}
