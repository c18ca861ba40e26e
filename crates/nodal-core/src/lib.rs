//! Circuit model and MNA matrix structures for nodal analysis.
//!
//! This crate provides the fundamental data structures for describing passive
//! linear circuits (nodes, elements, the builder/finalized circuit pair) and
//! the Modified Nodal Analysis (MNA) systems they assemble into. Solving the
//! assembled systems lives in `nodal-solver`.

pub mod circuit;
pub mod element;
pub mod error;
pub mod mna;
pub mod node;

pub use circuit::{Circuit, CircuitBuilder};
pub use element::Element;
pub use error::{Error, Result};
pub use mna::{ComplexMna, MnaSystem};
pub use node::{Node, NodeId};
