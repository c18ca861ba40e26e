//! Modified Nodal Analysis (MNA) matrix structures.
//!
//! Both systems share the same layout: rows/columns `0..num_nodes` are node
//! voltage unknowns (ground excluded), `num_nodes..size` are branch-current
//! unknowns for voltage sources and DC inductors. Ground terminals are passed
//! as `None` and their stamps dropped, since the reference node is fixed at
//! 0 V and not part of the unknown vector.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

/// Real MNA system Ax = b for DC analysis.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    num_nodes: usize,
    num_branches: usize,
}

impl MnaSystem {
    /// Create a zeroed system for `num_nodes` non-ground nodes and
    /// `num_branches` branch-current unknowns.
    pub fn new(num_nodes: usize, num_branches: usize) -> Self {
        let size = num_nodes + num_branches;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_branches,
        }
    }

    /// Total size of the system (nodes + branch currents).
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_branches
    }

    /// Number of node voltage unknowns.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of branch-current unknowns.
    pub fn num_branches(&self) -> usize {
        self.num_branches
    }

    /// Stamp a conductance between two nodes.
    ///
    /// For a conductance G between nodes i and j:
    /// A[i,i] += G, A[j,j] += G, A[i,j] -= G, A[j,i] -= G.
    pub fn stamp_conductance(&mut self, node_i: Option<usize>, node_j: Option<usize>, g: f64) {
        if let Some(i) = node_i {
            self.matrix[(i, i)] += g;
        }
        if let Some(j) = node_j {
            self.matrix[(j, j)] += g;
        }
        if let (Some(i), Some(j)) = (node_i, node_j) {
            self.matrix[(i, j)] -= g;
            self.matrix[(j, i)] -= g;
        }
    }

    /// Stamp a current source. Positive current flows from node i through the
    /// source to node j, i.e. it is injected into node j.
    pub fn stamp_current_source(
        &mut self,
        node_i: Option<usize>,
        node_j: Option<usize>,
        current: f64,
    ) {
        if let Some(i) = node_i {
            self.rhs[i] -= current;
        }
        if let Some(j) = node_j {
            self.rhs[j] += current;
        }
    }

    /// Stamp a voltage constraint V(pos) - V(neg) = voltage using branch
    /// variable `branch_idx` (0-based, offset past the node block).
    ///
    /// The branch unknown is the current flowing from the positive terminal
    /// through the element to the negative terminal. A DC inductor stamps
    /// through here with voltage 0.
    pub fn stamp_voltage_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        branch_idx: usize,
        voltage: f64,
    ) {
        let row = self.num_nodes + branch_idx;

        if let Some(i) = node_pos {
            self.matrix[(i, row)] += 1.0;
            self.matrix[(row, i)] += 1.0;
        }
        if let Some(j) = node_neg {
            self.matrix[(j, row)] -= 1.0;
            self.matrix[(row, j)] -= 1.0;
        }

        self.rhs[row] = voltage;
    }

    /// Get a reference to the coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Get a reference to the RHS vector.
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }
}

/// Complex MNA system Ax = b for AC analysis.
///
/// Same block structure as [`MnaSystem`], over complex admittances and
/// phasor sources.
#[derive(Debug, Clone)]
pub struct ComplexMna {
    matrix: DMatrix<Complex<f64>>,
    rhs: DVector<Complex<f64>>,
    num_nodes: usize,
    num_branches: usize,
}

impl ComplexMna {
    /// Create a zeroed complex system.
    pub fn new(num_nodes: usize, num_branches: usize) -> Self {
        let size = num_nodes + num_branches;
        Self {
            matrix: DMatrix::from_element(size, size, Complex::new(0.0, 0.0)),
            rhs: DVector::from_element(size, Complex::new(0.0, 0.0)),
            num_nodes,
            num_branches,
        }
    }

    /// Total size of the system.
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_branches
    }

    /// Number of node voltage unknowns.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of branch-current unknowns.
    pub fn num_branches(&self) -> usize {
        self.num_branches
    }

    /// Stamp a complex admittance Y between two nodes.
    pub fn stamp_admittance(
        &mut self,
        node_i: Option<usize>,
        node_j: Option<usize>,
        y: Complex<f64>,
    ) {
        if let Some(i) = node_i {
            self.matrix[(i, i)] += y;
        }
        if let Some(j) = node_j {
            self.matrix[(j, j)] += y;
        }
        if let (Some(i), Some(j)) = (node_i, node_j) {
            self.matrix[(i, j)] -= y;
            self.matrix[(j, i)] -= y;
        }
    }

    /// Stamp a phasor current source, same convention as
    /// [`MnaSystem::stamp_current_source`].
    pub fn stamp_current_source(
        &mut self,
        node_i: Option<usize>,
        node_j: Option<usize>,
        current: Complex<f64>,
    ) {
        if let Some(i) = node_i {
            self.rhs[i] -= current;
        }
        if let Some(j) = node_j {
            self.rhs[j] += current;
        }
    }

    /// Stamp a phasor voltage source, same convention as
    /// [`MnaSystem::stamp_voltage_source`].
    pub fn stamp_voltage_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        branch_idx: usize,
        voltage: Complex<f64>,
    ) {
        let row = self.num_nodes + branch_idx;
        let one = Complex::new(1.0, 0.0);

        if let Some(i) = node_pos {
            self.matrix[(i, row)] += one;
            self.matrix[(row, i)] += one;
        }
        if let Some(j) = node_neg {
            self.matrix[(j, row)] -= one;
            self.matrix[(row, j)] -= one;
        }

        self.rhs[row] = voltage;
    }

    /// Get a reference to the coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<Complex<f64>> {
        &self.matrix
    }

    /// Get a reference to the RHS vector.
    pub fn rhs(&self) -> &DVector<Complex<f64>> {
        &self.rhs
    }
}
