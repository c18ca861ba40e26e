//! Circuit element variants and their admittance models.

use num_complex::Complex;

use crate::node::NodeId;

/// A two-terminal circuit element.
///
/// The element set is closed by physics, so stamping dispatches over an
/// exhaustive match rather than trait objects. Sources carry the angular
/// frequency ω in rad/s they operate at; ω = 0 means DC.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Resistor {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        /// Resistance in ohms.
        resistance: f64,
    },
    Capacitor {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        /// Capacitance in farads.
        capacitance: f64,
    },
    Inductor {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        /// Inductance in henries.
        inductance: f64,
    },
    VoltageSource {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        /// Source voltage in volts.
        voltage: f64,
        /// Angular frequency in rad/s (0 = DC).
        omega: f64,
    },
    CurrentSource {
        name: String,
        node_pos: NodeId,
        node_neg: NodeId,
        /// Source current in amperes. Positive current flows from `node_pos`
        /// through the source to `node_neg`, i.e. it is injected into
        /// `node_neg`.
        current: f64,
        /// Angular frequency in rad/s (0 = DC).
        omega: f64,
    },
}

impl Element {
    /// Get the element's name.
    pub fn name(&self) -> &str {
        match self {
            Element::Resistor { name, .. }
            | Element::Capacitor { name, .. }
            | Element::Inductor { name, .. }
            | Element::VoltageSource { name, .. }
            | Element::CurrentSource { name, .. } => name,
        }
    }

    /// Get the positive terminal node.
    pub fn node_pos(&self) -> NodeId {
        match self {
            Element::Resistor { node_pos, .. }
            | Element::Capacitor { node_pos, .. }
            | Element::Inductor { node_pos, .. }
            | Element::VoltageSource { node_pos, .. }
            | Element::CurrentSource { node_pos, .. } => *node_pos,
        }
    }

    /// Get the negative terminal node.
    pub fn node_neg(&self) -> NodeId {
        match self {
            Element::Resistor { node_neg, .. }
            | Element::Capacitor { node_neg, .. }
            | Element::Inductor { node_neg, .. }
            | Element::VoltageSource { node_neg, .. }
            | Element::CurrentSource { node_neg, .. } => *node_neg,
        }
    }

    /// Check whether this element is an independent source.
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            Element::VoltageSource { .. } | Element::CurrentSource { .. }
        )
    }

    /// The operating frequency this source dictates, if it is a source.
    pub fn source_omega(&self) -> Option<f64> {
        match self {
            Element::VoltageSource { omega, .. } | Element::CurrentSource { omega, .. } => {
                Some(*omega)
            }
            _ => None,
        }
    }

    /// Number of auxiliary branch-current unknowns this element needs at
    /// operating frequency `omega`.
    ///
    /// Voltage sources always take one. Inductors take one at DC, where they
    /// are zero-impedance branches that cannot be expressed as an admittance.
    pub fn num_branch_vars(&self, omega: f64) -> usize {
        match self {
            Element::VoltageSource { .. } => 1,
            Element::Inductor { .. } if omega == 0.0 => 1,
            _ => 0,
        }
    }

    /// Complex admittance at `omega`, if this element stamps as a plain
    /// node-to-node admittance.
    ///
    /// Resistors are `1/R` at any frequency. Capacitors are `jωC` (0 at DC,
    /// an open circuit). Inductors are `1/(jωL)` for ω > 0; at DC they need
    /// a branch variable instead and return `None`.
    pub fn admittance(&self, omega: f64) -> Option<Complex<f64>> {
        match self {
            Element::Resistor { resistance, .. } => Some(Complex::new(1.0 / resistance, 0.0)),
            Element::Capacitor { capacitance, .. } => Some(Complex::new(0.0, omega * capacitance)),
            Element::Inductor { inductance, .. } if omega > 0.0 => {
                Some(Complex::new(0.0, -1.0 / (omega * inductance)))
            }
            _ => None,
        }
    }
}
