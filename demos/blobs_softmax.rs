use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use matnet::{Activation, Matrix, Network, Sample, Shuffle, TrainConfig, argmax, one_hot};

fn main() -> matnet::Result<()> {
    // Tiny synthetic 3-class dataset in 2D: one noisy blob per class.
    let mut rng = StdRng::seed_from_u64(0);
    let centers = [[-1.0_f64, -1.0], [1.0, -1.0], [0.0, 1.0]];
    let n_per_class = 128;

    let mut samples = Vec::with_capacity(3 * n_per_class);
    for (class, center) in centers.iter().enumerate() {
        for _ in 0..n_per_class {
            // Uniform noise is good enough for a learning example.
            let x0 = center[0] + rng.gen_range(-0.3..0.3);
            let x1 = center[1] + rng.gen_range(-0.3..0.3);
            samples.push(Sample::new(vec![x0, x1], one_hot(class, 3)));
        }
    }

    let mut net = Network::with_seed(&[2, 16, 3], Activation::ReLU, 0)?;
    let history = net.train(
        &samples,
        TrainConfig {
            learning_rate: 0.05,
            epochs: 200,
            batch_size: 32,
            shuffle: Shuffle::Seeded(0),
        },
        None,
    )?;

    let last = &history[history.len() - 1];
    println!(
        "train: loss={:.6} accuracy={:.4}",
        last.loss, last.accuracy
    );

    // Re-score the training set with fresh predictions.
    let mut correct = 0;
    for s in &samples {
        let probs = net.predict(&Matrix::from_column(&s.input))?;
        if argmax(probs.as_slice()) == argmax(&s.target) {
            correct += 1;
        }
    }
    println!(
        "evaluate: accuracy={:.4}",
        correct as f64 / samples.len() as f64
    );
    Ok(())
}
