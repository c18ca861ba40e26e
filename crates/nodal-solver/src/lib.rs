//! DC and AC nodal-analysis solvers.
//!
//! Takes a finalized [`Circuit`](nodal_core::Circuit), assembles its MNA
//! system, solves it with dense LU, and maps the solution vector back onto
//! labelled node voltages and source branch currents.

pub mod analysis;
pub mod error;
pub mod linear;
pub mod solution;

pub use analysis::{solve, solve_ac, solve_dc};
pub use error::{Error, Result};
pub use solution::{AcSolution, DcSolution, Solution};
