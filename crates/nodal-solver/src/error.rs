//! Error types for nodal-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The assembled system has no unique solution: a node with no path to
    /// ground, two voltage sources conflicting on the same node pair, or a
    /// redundant constraint.
    #[error("singular matrix: the circuit has no unique solution")]
    SingularMatrix,

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("circuit operates at {omega} rad/s; use the AC solver")]
    AcCircuit { omega: f64 },

    #[error("circuit is DC; use the DC solver")]
    DcCircuit,
}

pub type Result<T> = std::result::Result<T, Error>;
