#[cfg(not(feature = "serde"))]
fn main() {
    println!("enable the `serde` feature: cargo run --example save_load_json --features serde");
}

#[cfg(feature = "serde")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use matnet::{Activation, Matrix, Network, Sample, Shuffle, TrainConfig, one_hot};

    let samples = vec![
        Sample::new(vec![0.0, 0.0], one_hot(0, 2)),
        Sample::new(vec![0.0, 1.0], one_hot(1, 2)),
        Sample::new(vec![1.0, 0.0], one_hot(1, 2)),
        Sample::new(vec![1.0, 1.0], one_hot(0, 2)),
    ];

    let mut net = Network::with_seed(&[2, 8, 2], Activation::ReLU, 0)?;
    net.train(
        &samples,
        TrainConfig {
            learning_rate: 0.5,
            epochs: 200,
            batch_size: 4,
            shuffle: Shuffle::Seeded(0),
        },
        None,
    )?;

    // The library only produces/consumes JSON strings; files are ours.
    let path = "target/matnet_network.json";
    std::fs::write(path, net.to_json_string_pretty()?)?;

    let loaded = Network::from_json_str(&std::fs::read_to_string(path)?)?;
    let input = Matrix::from_column(&[1.0, 0.0]);
    assert_eq!(loaded.predict(&input)?, net.predict(&input)?);
    println!("saved, reloaded, and verified predictions: {path}");
    Ok(())
}
