//! End-to-end mini-batch SGD on XOR, plus snapshot fidelity after training.

use matnet::{argmax, one_hot, Activation, Matrix, Network, Sample, Shuffle, TrainConfig};

fn xor_samples() -> Vec<Sample> {
    vec![
        Sample::new(vec![0.0, 0.0], one_hot(0, 2)),
        Sample::new(vec![0.0, 1.0], one_hot(1, 2)),
        Sample::new(vec![1.0, 0.0], one_hot(1, 2)),
        Sample::new(vec![1.0, 1.0], one_hot(0, 2)),
    ]
}

fn xor_config() -> TrainConfig {
    TrainConfig {
        learning_rate: 0.5,
        epochs: 300,
        batch_size: 4,
        shuffle: Shuffle::Seeded(0),
    }
}

#[test]
fn xor_trains_to_above_chance_accuracy() {
    let samples = xor_samples();
    let mut net = Network::with_seed(&[2, 8, 2], Activation::ReLU, 0).unwrap();

    let history = net.train(&samples, xor_config(), None).unwrap();

    assert_eq!(history.len(), 300);
    let first = &history[0];
    let last = &history[history.len() - 1];
    assert!(
        last.loss < first.loss,
        "loss should trend down, got {} -> {}",
        first.loss,
        last.loss
    );
    assert!(
        last.accuracy >= 0.75,
        "final accuracy {} below 3/4",
        last.accuracy
    );

    // The reported accuracy must agree with fresh predictions.
    let correct = samples
        .iter()
        .filter(|s| {
            let probs = net.predict(&Matrix::from_column(&s.input)).unwrap();
            argmax(probs.as_slice()) == argmax(&s.target)
        })
        .count();
    assert!(correct >= 3, "only {correct} of 4 XOR patterns classified");
}

fn trained_xor_net(seed: u64) -> Network {
    let mut net = Network::with_seed(&[2, 8, 2], Activation::ReLU, seed).unwrap();
    net.train(&xor_samples(), xor_config(), None).unwrap();
    net
}

fn assert_predictions_match(original: &Network, reloaded: &Network) {
    for s in &xor_samples() {
        let input = Matrix::from_column(&s.input);
        let expected = original.predict(&input).unwrap();
        let got = reloaded.predict(&input).unwrap();
        for (a, b) in got.as_slice().iter().zip(expected.as_slice()) {
            assert!(
                (a - b).abs() < 1e-10,
                "reloaded prediction drifted: {a} vs {b}"
            );
        }
    }
}

#[test]
fn trained_network_survives_a_snapshot_round_trip() {
    let net = trained_xor_net(1);
    let reloaded = Network::load(net.save().unwrap()).unwrap();
    assert_predictions_match(&net, &reloaded);
}

#[cfg(feature = "serde")]
#[test]
fn trained_network_survives_a_json_round_trip() {
    let net = trained_xor_net(1);
    let reloaded = Network::from_json_str(&net.to_json_string_pretty().unwrap()).unwrap();
    assert_predictions_match(&net, &reloaded);
}
