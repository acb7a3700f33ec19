use matnet::{Activation, Matrix, Network, Sample, Shuffle, TrainConfig, argmax, one_hot};

fn main() -> matnet::Result<()> {
    let samples = vec![
        Sample::new(vec![0.0, 0.0], one_hot(0, 2)),
        Sample::new(vec![0.0, 1.0], one_hot(1, 2)),
        Sample::new(vec![1.0, 0.0], one_hot(1, 2)),
        Sample::new(vec![1.0, 1.0], one_hot(0, 2)),
    ];

    let mut net = Network::with_seed(&[2, 8, 2], Activation::ReLU, 0)?;

    let mut progress = |report: &matnet::EpochReport| {
        if report.epoch % 50 == 0 {
            println!(
                "epoch {:>3}: loss={:.6} accuracy={:.2}",
                report.epoch, report.loss, report.accuracy
            );
        }
    };
    let history = net.train(
        &samples,
        TrainConfig {
            learning_rate: 0.5,
            epochs: 300,
            batch_size: 4,
            shuffle: Shuffle::Seeded(0),
        },
        Some(&mut progress),
    )?;

    let last = &history[history.len() - 1];
    println!(
        "final: loss={:.6} accuracy={:.2}",
        last.loss, last.accuracy
    );

    for s in &samples {
        let probs = net.predict(&Matrix::from_column(&s.input))?;
        println!(
            "{:?} -> class {} (p={:.4})",
            s.input,
            argmax(probs.as_slice()),
            probs.as_slice()[argmax(probs.as_slice())]
        );
    }
    Ok(())
}
