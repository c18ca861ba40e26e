//! Solution types: node voltages and source branch currents keyed by label.

use std::f64::consts::PI;

use indexmap::IndexMap;
use num_complex::Complex;

/// Result of a DC analysis.
///
/// Voltages are keyed by node label (the ground node is included at 0 V);
/// branch currents are keyed by element name for voltage sources and
/// inductors, and measure the current flowing from the element's positive
/// terminal through it to the negative terminal.
#[derive(Debug, Clone)]
pub struct DcSolution {
    pub(crate) node_voltages: IndexMap<String, f64>,
    pub(crate) branch_currents: IndexMap<String, f64>,
}

impl DcSolution {
    /// Voltage at a node, by label.
    pub fn voltage(&self, label: &str) -> Option<f64> {
        self.node_voltages.get(label).copied()
    }

    /// Voltage difference V(pos) - V(neg) between two nodes.
    pub fn voltage_diff(&self, pos: &str, neg: &str) -> Option<f64> {
        Some(self.voltage(pos)? - self.voltage(neg)?)
    }

    /// Branch current through a voltage source or inductor, by name.
    pub fn current(&self, name: &str) -> Option<f64> {
        self.branch_currents.get(name).copied()
    }

    /// Iterate over (label, voltage) pairs in node registration order.
    pub fn voltages(&self) -> impl Iterator<Item = (&str, f64)> {
        self.node_voltages.iter().map(|(l, &v)| (l.as_str(), v))
    }

    /// Iterate over (name, current) pairs in element declaration order.
    pub fn currents(&self) -> impl Iterator<Item = (&str, f64)> {
        self.branch_currents.iter().map(|(n, &i)| (n.as_str(), i))
    }
}

/// Result of an AC analysis: phasors at the circuit's operating frequency.
#[derive(Debug, Clone)]
pub struct AcSolution {
    pub(crate) node_voltages: IndexMap<String, Complex<f64>>,
    pub(crate) branch_currents: IndexMap<String, Complex<f64>>,
}

impl AcSolution {
    /// Complex voltage at a node, by label.
    pub fn voltage(&self, label: &str) -> Option<Complex<f64>> {
        self.node_voltages.get(label).copied()
    }

    /// Voltage magnitude at a node.
    pub fn magnitude(&self, label: &str) -> Option<f64> {
        self.voltage(label).map(|v| v.norm())
    }

    /// Voltage phase at a node, in degrees.
    pub fn phase_deg(&self, label: &str) -> Option<f64> {
        self.voltage(label).map(|v| v.arg() * 180.0 / PI)
    }

    /// Complex branch current through a voltage source, by name.
    pub fn current(&self, name: &str) -> Option<Complex<f64>> {
        self.branch_currents.get(name).copied()
    }

    /// Iterate over (label, phasor) pairs in node registration order.
    pub fn voltages(&self) -> impl Iterator<Item = (&str, Complex<f64>)> {
        self.node_voltages.iter().map(|(l, &v)| (l.as_str(), v))
    }

    /// Iterate over (name, phasor current) pairs in declaration order.
    pub fn currents(&self) -> impl Iterator<Item = (&str, Complex<f64>)> {
        self.branch_currents.iter().map(|(n, &i)| (n.as_str(), i))
    }
}

/// Result of [`solve`](crate::solve): DC or AC depending on the circuit's
/// operating frequency.
#[derive(Debug, Clone)]
pub enum Solution {
    Dc(DcSolution),
    Ac(AcSolution),
}

impl Solution {
    /// Get the DC solution, if this was a DC analysis.
    pub fn as_dc(&self) -> Option<&DcSolution> {
        match self {
            Solution::Dc(sol) => Some(sol),
            Solution::Ac(_) => None,
        }
    }

    /// Get the AC solution, if this was an AC analysis.
    pub fn as_ac(&self) -> Option<&AcSolution> {
        match self {
            Solution::Ac(sol) => Some(sol),
            Solution::Dc(_) => None,
        }
    }
}
