use std::fmt;

/// Shape of a matrix operand, as `(rows, cols)`.
pub type Shape = (usize, usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Construction data length does not match `rows * cols`.
    ShapeMismatch { rows: usize, cols: usize, len: usize },
    /// `add`/`sub` operands have different shapes.
    AddSubShapeMismatch { left: Shape, right: Shape },
    /// Matrix product inner dimensions disagree.
    MulShapeMismatch { left: Shape, right: Shape },
    /// Elementwise product operands have different shapes.
    HadamardShapeMismatch { left: Shape, right: Shape },
    /// Broadcast vector is not a column of matching height.
    BroadcastShapeMismatch { left: Shape, right: Shape },
    /// A snapshot could not be turned back into a network.
    Deserialization(String),
    InvalidConfig(String),
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch { rows, cols, len } => write!(
                f,
                "shape mismatch: {rows}x{cols} needs {} values, got {len}",
                rows * cols
            ),
            Error::AddSubShapeMismatch { left, right } => write!(
                f,
                "add/sub shape mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Error::MulShapeMismatch { left, right } => write!(
                f,
                "mul shape mismatch: {}x{} cannot multiply {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Error::HadamardShapeMismatch { left, right } => write!(
                f,
                "hadamard shape mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Error::BroadcastShapeMismatch { left, right } => write!(
                f,
                "broadcast shape mismatch: {}x{} cannot take column {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Error::Deserialization(msg) => write!(f, "deserialization error: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
