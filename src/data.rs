//! Training data containers.

/// One training example: an input vector paired with a target distribution.
///
/// Targets for the softmax/cross-entropy head must sum to 1 per sample.
/// One-hot rows built with [`one_hot`] satisfy that by construction; soft
/// label mixtures are equally valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Self {
        Self { input, target }
    }

    pub fn from_slices(input: &[f64], target: &[f64]) -> Self {
        Self {
            input: input.to_vec(),
            target: target.to_vec(),
        }
    }
}

/// A length-`classes` vector that is 1.0 at `class` and 0.0 elsewhere.
///
/// # Panics
///
/// Panics if `class >= classes`.
pub fn one_hot(class: usize, classes: usize) -> Vec<f64> {
    assert!(
        class < classes,
        "one_hot class {class} out of range for {classes} classes"
    );
    let mut v = vec![0.0; classes];
    v[class] = 1.0;
    v
}
