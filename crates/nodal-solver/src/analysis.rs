//! DC and AC analysis entry points.
//!
//! Each call assembles a fresh MNA system from the finalized circuit,
//! delegates to the dense LU primitives in [`crate::linear`], and maps the
//! solution vector back onto labelled node voltages and branch currents.
//! Nothing is cached across calls.

use indexmap::IndexMap;
use nodal_core::Circuit;

use crate::error::{Error, Result};
use crate::linear::{solve_complex, solve_dense};
use crate::solution::{AcSolution, DcSolution, Solution};

/// Solve a DC circuit for its node voltages and branch currents.
///
/// Fails with [`Error::AcCircuit`] if the circuit's sources fixed a nonzero
/// frequency, and with [`Error::SingularMatrix`] if the system has no unique
/// solution (e.g. a node with no path to ground).
pub fn solve_dc(circuit: &Circuit) -> Result<DcSolution> {
    if !circuit.is_dc() {
        return Err(Error::AcCircuit {
            omega: circuit.omega(),
        });
    }

    let mna = circuit.assemble_dc();
    let x = solve_dense(mna.matrix(), mna.rhs())?;
    let n = circuit.num_nodes();

    let mut node_voltages = IndexMap::with_capacity(n + 1);
    for node in circuit.nodes() {
        // Ground is not solved for; report it as 0 by construction.
        let v = match circuit.matrix_index(node.id()) {
            Some(idx) => x[idx],
            None => 0.0,
        };
        node_voltages.insert(node.label().to_string(), v);
    }

    let mut branch_currents = IndexMap::new();
    for (position, element) in circuit.elements().iter().enumerate() {
        if let Some(b) = circuit.branch_index(position) {
            branch_currents.insert(element.name().to_string(), x[n + b]);
        }
    }

    Ok(DcSolution {
        node_voltages,
        branch_currents,
    })
}

/// Solve an AC circuit for its node phasors and branch currents at the
/// operating frequency fixed by its sources.
pub fn solve_ac(circuit: &Circuit) -> Result<AcSolution> {
    if circuit.is_dc() {
        return Err(Error::DcCircuit);
    }

    let mna = circuit.assemble_ac();
    let x = solve_complex(mna.matrix(), mna.rhs())?;
    let n = circuit.num_nodes();

    let mut node_voltages = IndexMap::with_capacity(n + 1);
    for node in circuit.nodes() {
        let v = match circuit.matrix_index(node.id()) {
            Some(idx) => x[idx],
            None => num_complex::Complex::new(0.0, 0.0),
        };
        node_voltages.insert(node.label().to_string(), v);
    }

    let mut branch_currents = IndexMap::new();
    for (position, element) in circuit.elements().iter().enumerate() {
        if let Some(b) = circuit.branch_index(position) {
            branch_currents.insert(element.name().to_string(), x[n + b]);
        }
    }

    Ok(AcSolution {
        node_voltages,
        branch_currents,
    })
}

/// Solve a circuit, dispatching on its operating frequency.
pub fn solve(circuit: &Circuit) -> Result<Solution> {
    if circuit.is_dc() {
        Ok(Solution::Dc(solve_dc(circuit)?))
    } else {
        Ok(Solution::Ac(solve_ac(circuit)?))
    }
}
