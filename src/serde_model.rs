//! Network snapshots and their JSON form (feature: `serde`).
//!
//! Snapshots are decoupled from the internal `Network`/`Matrix` structs so
//! the persisted layout stays stable even if the internals change. All
//! deserialization validates topology arity, per-matrix dimensions, data
//! lengths, activation names, and that every parameter is finite.
//!
//! The JSON layout is language-neutral: `layerSizes`, `hiddenActivation`
//! (a lowercase name), and per-matrix `{rows, cols, data}` records with
//! row-major `data`. Values round-trip exactly; nothing is quantized.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::matrix::Matrix;
use crate::network::Network;
use crate::{Error, Result};

/// One matrix as persisted: dimensions plus the row-major buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRecord {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

/// A complete, self-describing network snapshot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSnapshot {
    pub layer_sizes: Vec<usize>,
    pub hidden_activation: String,
    pub weights: Vec<MatrixRecord>,
    pub biases: Vec<MatrixRecord>,
}

impl From<&Matrix> for MatrixRecord {
    fn from(m: &Matrix) -> Self {
        Self {
            rows: m.rows(),
            cols: m.cols(),
            data: m.as_slice().to_vec(),
        }
    }
}

impl MatrixRecord {
    fn validate(&self, what: &str) -> Result<()> {
        let expected = self
            .rows
            .checked_mul(self.cols)
            .ok_or_else(|| Error::Deserialization(format!("{what} shape overflows")))?;
        if self.data.len() != expected {
            return Err(Error::Deserialization(format!(
                "{what} data length {} does not match {} x {}",
                self.data.len(),
                self.rows,
                self.cols
            )));
        }
        if self.data.iter().any(|v| !v.is_finite()) {
            return Err(Error::Deserialization(format!(
                "{what} must contain only finite values"
            )));
        }
        Ok(())
    }
}

impl NetworkSnapshot {
    /// Check the snapshot describes a well-formed network.
    pub fn validate(&self) -> Result<()> {
        if self.layer_sizes.len() < 2 {
            return Err(Error::Deserialization(format!(
                "layerSizes needs at least two entries, got {}",
                self.layer_sizes.len()
            )));
        }
        if let Some(pos) = self.layer_sizes.iter().position(|&n| n == 0) {
            return Err(Error::Deserialization(format!("layer {pos} has zero units")));
        }

        let transitions = self.layer_sizes.len() - 1;
        if self.weights.len() != transitions || self.biases.len() != transitions {
            return Err(Error::Deserialization(format!(
                "expected {transitions} weight and bias records, got {} and {}",
                self.weights.len(),
                self.biases.len()
            )));
        }

        for i in 0..transitions {
            let w = &self.weights[i];
            if (w.rows, w.cols) != (self.layer_sizes[i + 1], self.layer_sizes[i]) {
                return Err(Error::Deserialization(format!(
                    "weight {i} is {}x{}, layerSizes imply {}x{}",
                    w.rows,
                    w.cols,
                    self.layer_sizes[i + 1],
                    self.layer_sizes[i]
                )));
            }
            w.validate(&format!("weight {i}"))?;

            let b = &self.biases[i];
            if (b.rows, b.cols) != (self.layer_sizes[i + 1], 1) {
                return Err(Error::Deserialization(format!(
                    "bias {i} is {}x{}, layerSizes imply {}x1",
                    b.rows,
                    b.cols,
                    self.layer_sizes[i + 1]
                )));
            }
            b.validate(&format!("bias {i}"))?;
        }

        if Activation::from_name(&self.hidden_activation).is_none() {
            return Err(Error::Deserialization(format!(
                "unknown activation {:?}",
                self.hidden_activation
            )));
        }
        Ok(())
    }
}

impl TryFrom<&Network> for NetworkSnapshot {
    type Error = Error;

    fn try_from(net: &Network) -> std::result::Result<Self, Self::Error> {
        let name = net.hidden_activation().name().ok_or_else(|| {
            Error::InvalidConfig("custom activations have no serialized name".to_owned())
        })?;
        Ok(Self {
            layer_sizes: net.topology().to_vec(),
            hidden_activation: name.to_owned(),
            weights: net.weights().iter().map(MatrixRecord::from).collect(),
            biases: net.biases().iter().map(MatrixRecord::from).collect(),
        })
    }
}

impl TryFrom<NetworkSnapshot> for Network {
    type Error = Error;

    fn try_from(snapshot: NetworkSnapshot) -> std::result::Result<Self, Self::Error> {
        snapshot.validate().map_err(|e| {
            log::warn!("rejecting network snapshot: {e}");
            e
        })?;

        let hidden = Activation::from_name(&snapshot.hidden_activation).ok_or_else(|| {
            Error::Deserialization(format!(
                "unknown activation {:?}",
                snapshot.hidden_activation
            ))
        })?;
        let weights = records_to_matrices(snapshot.weights)?;
        let biases = records_to_matrices(snapshot.biases)?;

        // validate() pinned every shape already; a failure here would mean
        // the snapshot and topology disagree in a way it missed.
        Network::from_parts(snapshot.layer_sizes, hidden, weights, biases)
            .map_err(|e| Error::Deserialization(format!("snapshot inconsistent: {e}")))
    }
}

fn records_to_matrices(records: Vec<MatrixRecord>) -> Result<Vec<Matrix>> {
    records
        .into_iter()
        .map(|r| {
            Matrix::from_flat(r.rows, r.cols, r.data)
                .map_err(|e| Error::Deserialization(format!("bad matrix record: {e}")))
        })
        .collect()
}

impl Network {
    /// Capture the current parameters as a snapshot.
    ///
    /// Fails with [`Error::InvalidConfig`] when the hidden activation is
    /// [`Activation::Custom`], which has no serialized name.
    pub fn save(&self) -> Result<NetworkSnapshot> {
        NetworkSnapshot::try_from(self)
    }

    /// Reconstruct a network from a snapshot, adopting its parameters
    /// wholesale.
    ///
    /// The snapshot is fully validated first; any inconsistency is
    /// [`Error::Deserialization`]. A reloaded network predicts identically
    /// to the one that was saved.
    pub fn load(snapshot: NetworkSnapshot) -> Result<Self> {
        Self::try_from(snapshot)
    }
}

#[cfg(feature = "serde")]
impl Network {
    /// Serialize to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        let snapshot = self.save()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| Error::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Serialize to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let snapshot = self.save()?;
        serde_json::to_string(&snapshot)
            .map_err(|e| Error::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Parse a network from a JSON snapshot string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let snapshot: NetworkSnapshot = serde_json::from_str(s)
            .map_err(|e| Error::Deserialization(format!("failed to parse network json: {e}")))?;
        Self::load(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_net() -> Network {
        Network::with_seed(&[3, 4, 2], Activation::Tanh, 17).unwrap()
    }

    #[test]
    fn snapshot_round_trip_preserves_every_parameter() {
        let net = small_net();
        let reloaded = Network::load(net.save().unwrap()).unwrap();
        assert_eq!(net, reloaded);

        let input = Matrix::from_column(&[0.2, -0.4, 0.6]);
        assert_eq!(
            net.predict(&input).unwrap(),
            reloaded.predict(&input).unwrap()
        );
    }

    #[test]
    fn save_rejects_custom_activations() {
        fn id(x: f64) -> f64 {
            x
        }
        fn one(_: f64) -> f64 {
            1.0
        }
        let net = Network::with_seed(
            &[2, 2],
            Activation::Custom {
                forward: id,
                derivative: one,
            },
            0,
        )
        .unwrap();
        assert!(matches!(net.save(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_record_count_mismatch() {
        let mut snapshot = small_net().save().unwrap();
        snapshot.weights.pop();
        assert!(matches!(
            Network::load(snapshot),
            Err(Error::Deserialization(_))
        ));
    }

    #[test]
    fn validate_rejects_shape_disagreement() {
        let mut snapshot = small_net().save().unwrap();
        snapshot.weights[0].rows = 5;
        snapshot.weights[0].data = vec![0.0; 5 * 3];
        assert!(matches!(
            Network::load(snapshot),
            Err(Error::Deserialization(_))
        ));
    }

    #[test]
    fn validate_rejects_data_length_mismatch() {
        let mut snapshot = small_net().save().unwrap();
        snapshot.biases[1].data.push(0.0);
        assert!(matches!(
            Network::load(snapshot),
            Err(Error::Deserialization(_))
        ));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        for poison in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut snapshot = small_net().save().unwrap();
            snapshot.weights[0].data[0] = poison;
            assert!(matches!(
                Network::load(snapshot),
                Err(Error::Deserialization(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_unknown_activation_and_bad_topology() {
        let mut snapshot = small_net().save().unwrap();
        snapshot.hidden_activation = "swish".to_owned();
        assert!(matches!(
            Network::load(snapshot),
            Err(Error::Deserialization(_))
        ));

        let mut snapshot = small_net().save().unwrap();
        snapshot.layer_sizes = vec![3];
        assert!(matches!(
            Network::load(snapshot),
            Err(Error::Deserialization(_))
        ));
    }
}

#[cfg(all(test, feature = "serde"))]
mod json_tests {
    use super::*;

    fn fixture_net() -> Network {
        let w0 = Matrix::from_flat(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b0 = Matrix::from_flat(3, 1, vec![0.1, 0.2, 0.3]).unwrap();
        let w1 = Matrix::from_flat(2, 3, vec![-1.0, -2.0, -3.0, -4.0, -5.0, -6.0]).unwrap();
        let b1 = Matrix::from_flat(2, 1, vec![0.5, -0.5]).unwrap();
        Network::from_parts(vec![2, 3, 2], Activation::ReLU, vec![w0, w1], vec![b0, b1]).unwrap()
    }

    #[test]
    fn golden_json_is_stable_and_round_trips() {
        let net = fixture_net();
        let json = net.to_json_string_pretty().unwrap();

        let golden = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/golden/network.json"
        ))
        .trim_end();
        assert_eq!(json, golden);

        let loaded = Network::from_json_str(golden).unwrap();
        assert_eq!(loaded, net);
        assert_eq!(loaded.to_json_string_pretty().unwrap(), golden);
    }

    #[test]
    fn compact_json_round_trips_exactly() {
        let net = fixture_net();
        let reloaded = Network::from_json_str(&net.to_json_string().unwrap()).unwrap();
        assert_eq!(reloaded, net);
    }

    #[test]
    fn parse_rejects_missing_fields_and_garbage() {
        let missing = r#"{"layerSizes":[2,2],"hiddenActivation":"relu","weights":[]}"#;
        assert!(matches!(
            Network::from_json_str(missing),
            Err(Error::Deserialization(_))
        ));

        assert!(matches!(
            Network::from_json_str("not json at all"),
            Err(Error::Deserialization(_))
        ));
    }
}
