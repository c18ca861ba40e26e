//! Error types for nodal-core.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("node {second:?} declared as ground, but {first:?} is already the reference node")]
    DuplicateGround { first: String, second: String },

    #[error("no ground node declared")]
    NoGround,

    #[error("element {element:?} references a node that was never declared")]
    UnknownNode { element: String },

    #[error(
        "source {element:?} at {actual} rad/s conflicts with the circuit frequency {expected} rad/s"
    )]
    FrequencyConflict {
        element: String,
        expected: f64,
        actual: f64,
    },

    #[error("element {element:?} connects node {node:?} to itself")]
    DegenerateElement { element: String, node: String },

    #[error("resistor {element:?} has zero resistance; model an intended short as a 0 V source")]
    ZeroResistance { element: String },

    #[error("element {element:?} has non-positive value {value}")]
    NonPositiveValue { element: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
