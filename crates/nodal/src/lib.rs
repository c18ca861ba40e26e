//! # Nodal
//!
//! A nodal-analysis engine for passive linear circuits.
//!
//! Circuits are described as element lists (resistors, capacitors, inductors,
//! independent sources) over labelled nodes; the engine assembles the
//! Modified Nodal Analysis (MNA) system and solves for node voltages and
//! source branch currents. DC circuits solve over a real conductance matrix,
//! AC circuits over a complex admittance matrix at the single frequency fixed
//! by their sources.
//!
//! ## Quick start
//!
//! ```rust
//! use nodal::prelude::*;
//!
//! // 10 V source across two equal resistors in series.
//! let mut builder = CircuitBuilder::new();
//! let gnd = builder.add_ground("0").unwrap();
//! let n1 = builder.add_node("1");
//! let n2 = builder.add_node("2");
//! builder.add_voltage_source("V1", n1, gnd, 10.0, 0.0).unwrap();
//! builder.add_resistor("R1", n1, n2, 1e3).unwrap();
//! builder.add_resistor("R2", n2, gnd, 1e3).unwrap();
//!
//! let circuit = builder.finalize().unwrap();
//! let solution = solve_dc(&circuit).unwrap();
//!
//! assert!((solution.voltage("2").unwrap() - 5.0).abs() < 1e-10);
//! ```

pub use nodal_core as core;
pub use nodal_solver as solver;

// Convenient re-exports from nodal_core
pub use nodal_core::{
    Circuit, CircuitBuilder, ComplexMna, Element, Error as CoreError, MnaSystem, Node, NodeId,
};

// Convenient re-exports from nodal_solver
pub use nodal_solver::{
    AcSolution, DcSolution, Error as SolverError, Solution, solve, solve_ac, solve_dc,
};

/// Re-export of nalgebra's dynamic matrix and vector types.
pub use nalgebra::{DMatrix, DVector};

/// Re-export of num_complex's Complex type.
pub use num_complex::Complex;

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use nodal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Circuit, CircuitBuilder, Element, Node, NodeId};

    pub use crate::{AcSolution, DcSolution, Solution, solve, solve_ac, solve_dc};

    pub use crate::{Complex, DMatrix, DVector};
}
