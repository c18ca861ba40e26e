//! Circuit construction, finalization, and MNA assembly.
//!
//! A circuit is built incrementally with a [`CircuitBuilder`], then frozen
//! with [`CircuitBuilder::finalize`] into an immutable [`Circuit`]. The
//! finalized circuit assembles a fresh MNA system on every call, so repeated
//! solves are deterministic and concurrent solves over independent circuits
//! need no locking.

use indexmap::IndexMap;
use num_complex::Complex;

use crate::element::Element;
use crate::error::{Error, Result};
use crate::mna::{ComplexMna, MnaSystem};
use crate::node::{Node, NodeId};

/// Incremental circuit builder.
///
/// All sources in a circuit must share one angular frequency; the first
/// source added fixes it (0 rad/s for DC). Reactive elements do not
/// participate in the frequency check: a capacitor in a DC circuit is simply
/// an open circuit.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    /// Label → node, in registration order.
    nodes: IndexMap<String, Node>,
    ground: Option<NodeId>,
    elements: Vec<Element>,
    /// Operating frequency fixed by the first source, rad/s.
    omega: Option<f64>,
}

impl CircuitBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, returning its handle.
    ///
    /// Repeated registration of the same label returns the original handle.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(node) = self.nodes.get(&label) {
            return node.id();
        }
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.insert(label.clone(), Node::new(id, label));
        id
    }

    /// Register `label` as the reference (ground) node.
    ///
    /// Idempotent for the same label; declaring a second, different ground
    /// fails with [`Error::DuplicateGround`].
    pub fn add_ground(&mut self, label: impl Into<String>) -> Result<NodeId> {
        let id = self.add_node(label);
        match self.ground {
            None => {
                self.node_mut(id).set_ground();
                self.ground = Some(id);
                Ok(id)
            }
            Some(existing) if existing == id => Ok(id),
            Some(existing) => Err(Error::DuplicateGround {
                first: self.label_of(existing).to_string(),
                second: self.label_of(id).to_string(),
            }),
        }
    }

    /// Append an element, validating its terminals, value, and frequency.
    pub fn add_element(&mut self, element: Element) -> Result<()> {
        let name = element.name().to_string();
        let (pos, neg) = (element.node_pos(), element.node_neg());

        if pos.index() >= self.nodes.len() || neg.index() >= self.nodes.len() {
            return Err(Error::UnknownNode { element: name });
        }
        if pos == neg {
            return Err(Error::DegenerateElement {
                element: name,
                node: self.label_of(pos).to_string(),
            });
        }

        match &element {
            Element::Resistor { resistance, .. } if *resistance <= 0.0 => {
                return Err(Error::ZeroResistance { element: name });
            }
            Element::Capacitor {
                capacitance: value, ..
            }
            | Element::Inductor {
                inductance: value, ..
            } if *value <= 0.0 => {
                return Err(Error::NonPositiveValue {
                    element: name,
                    value: *value,
                });
            }
            _ => {}
        }

        // Sources must agree on one frequency; the first one fixes it.
        if let Some(actual) = element.source_omega() {
            match self.omega {
                None => self.omega = Some(actual),
                Some(expected) if expected == actual => {}
                Some(expected) => {
                    return Err(Error::FrequencyConflict {
                        element: name,
                        expected,
                        actual,
                    });
                }
            }
        }

        self.elements.push(element);
        Ok(())
    }

    /// Add a resistor between `node_pos` and `node_neg`.
    pub fn add_resistor(
        &mut self,
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        ohms: f64,
    ) -> Result<()> {
        self.add_element(Element::Resistor {
            name: name.into(),
            node_pos,
            node_neg,
            resistance: ohms,
        })
    }

    /// Add a capacitor between `node_pos` and `node_neg`.
    pub fn add_capacitor(
        &mut self,
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        farads: f64,
    ) -> Result<()> {
        self.add_element(Element::Capacitor {
            name: name.into(),
            node_pos,
            node_neg,
            capacitance: farads,
        })
    }

    /// Add an inductor between `node_pos` and `node_neg`.
    pub fn add_inductor(
        &mut self,
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        henries: f64,
    ) -> Result<()> {
        self.add_element(Element::Inductor {
            name: name.into(),
            node_pos,
            node_neg,
            inductance: henries,
        })
    }

    /// Add an independent voltage source at angular frequency `omega`
    /// (0 for DC).
    pub fn add_voltage_source(
        &mut self,
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        volts: f64,
        omega: f64,
    ) -> Result<()> {
        self.add_element(Element::VoltageSource {
            name: name.into(),
            node_pos,
            node_neg,
            voltage: volts,
            omega,
        })
    }

    /// Add an independent current source at angular frequency `omega`
    /// (0 for DC). Positive current is injected into `node_neg`.
    pub fn add_current_source(
        &mut self,
        name: impl Into<String>,
        node_pos: NodeId,
        node_neg: NodeId,
        amps: f64,
        omega: f64,
    ) -> Result<()> {
        self.add_element(Element::CurrentSource {
            name: name.into(),
            node_pos,
            node_neg,
            current: amps,
            omega,
        })
    }

    /// Freeze the circuit, assigning matrix indices.
    ///
    /// Non-ground nodes get matrix indices in first-appearance order; voltage
    /// sources (and inductors, when the circuit is DC) get branch indices in
    /// declaration order. Fails with [`Error::NoGround`] if no reference node
    /// was declared.
    pub fn finalize(self) -> Result<Circuit> {
        let ground = self.ground.ok_or(Error::NoGround)?;
        let omega = self.omega.unwrap_or(0.0);

        let mut node_index = vec![None; self.nodes.len()];
        let mut num_nodes = 0;
        for node in self.nodes.values() {
            if !node.is_ground() {
                node_index[node.id().index()] = Some(num_nodes);
                num_nodes += 1;
            }
        }

        let mut branch_index = Vec::with_capacity(self.elements.len());
        let mut num_branches = 0;
        for element in &self.elements {
            if element.num_branch_vars(omega) > 0 {
                branch_index.push(Some(num_branches));
                num_branches += 1;
            } else {
                branch_index.push(None);
            }
        }

        Ok(Circuit {
            nodes: self.nodes,
            ground,
            elements: self.elements,
            omega,
            node_index,
            branch_index,
            num_nodes,
            num_branches,
        })
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_index_mut(id.index())
            .map(|(_, node)| node)
            .expect("node id issued by this builder")
    }

    fn label_of(&self, id: NodeId) -> &str {
        self.nodes
            .get_index(id.index())
            .map(|(label, _)| label.as_str())
            .expect("node id issued by this builder")
    }
}

/// An immutable, finalized circuit ready for assembly and solving.
#[derive(Debug, Clone)]
pub struct Circuit {
    nodes: IndexMap<String, Node>,
    ground: NodeId,
    elements: Vec<Element>,
    omega: f64,
    /// NodeId index → matrix index (None for ground).
    node_index: Vec<Option<usize>>,
    /// Element position → branch-current index.
    branch_index: Vec<Option<usize>>,
    num_nodes: usize,
    num_branches: usize,
}

impl Circuit {
    /// Operating angular frequency in rad/s (0 = DC).
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Whether this is a DC circuit.
    pub fn is_dc(&self) -> bool {
        self.omega == 0.0
    }

    /// Number of non-ground nodes (node voltage unknowns).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of branch-current unknowns.
    pub fn num_branches(&self) -> usize {
        self.num_branches
    }

    /// Dimension of the assembled system.
    pub fn dim(&self) -> usize {
        self.num_nodes + self.num_branches
    }

    /// The reference node.
    pub fn ground(&self) -> NodeId {
        self.ground
    }

    /// Matrix index of a node (None for ground).
    pub fn matrix_index(&self, id: NodeId) -> Option<usize> {
        self.node_index.get(id.index()).copied().flatten()
    }

    /// Branch-current index of the element at `position` in declaration
    /// order, if it has one.
    pub fn branch_index(&self, position: usize) -> Option<usize> {
        self.branch_index.get(position).copied().flatten()
    }

    /// Look up a node handle by label.
    pub fn node(&self, label: &str) -> Option<NodeId> {
        self.nodes.get(label).map(Node::id)
    }

    /// Label of a node.
    pub fn label(&self, id: NodeId) -> &str {
        self.nodes
            .get_index(id.index())
            .map(|(label, _)| label.as_str())
            .expect("node id issued by this circuit's builder")
    }

    /// Iterate over all nodes (including ground) in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// The elements in declaration order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Assemble the real MNA system for DC analysis.
    ///
    /// Capacitors are open circuits and stamp nothing; inductors are
    /// zero-impedance branches stamped as 0 V constraints.
    pub fn assemble_dc(&self) -> MnaSystem {
        let mut mna = MnaSystem::new(self.num_nodes, self.num_branches);

        for (position, element) in self.elements.iter().enumerate() {
            let i = self.matrix_index(element.node_pos());
            let j = self.matrix_index(element.node_neg());

            match element {
                Element::Resistor { resistance, .. } => {
                    mna.stamp_conductance(i, j, 1.0 / resistance);
                }
                Element::Capacitor { .. } => {}
                Element::Inductor { .. } => {
                    let b = self.branch_index[position].expect("DC inductor has a branch index");
                    mna.stamp_voltage_source(i, j, b, 0.0);
                }
                Element::VoltageSource { voltage, .. } => {
                    let b = self.branch_index[position].expect("voltage source has a branch index");
                    mna.stamp_voltage_source(i, j, b, *voltage);
                }
                Element::CurrentSource { current, .. } => {
                    mna.stamp_current_source(i, j, *current);
                }
            }
        }

        mna
    }

    /// Assemble the complex MNA system for AC analysis at the circuit's
    /// operating frequency.
    ///
    /// Resistors, capacitors, and inductors stamp their complex admittance;
    /// voltage sources take branch rows with their phasor value.
    pub fn assemble_ac(&self) -> ComplexMna {
        let mut mna = ComplexMna::new(self.num_nodes, self.num_branches);

        for (position, element) in self.elements.iter().enumerate() {
            let i = self.matrix_index(element.node_pos());
            let j = self.matrix_index(element.node_neg());

            match element {
                Element::VoltageSource { voltage, .. } => {
                    let b = self.branch_index[position].expect("voltage source has a branch index");
                    mna.stamp_voltage_source(i, j, b, Complex::new(*voltage, 0.0));
                }
                Element::CurrentSource { current, .. } => {
                    mna.stamp_current_source(i, j, Complex::new(*current, 0.0));
                }
                _ => {
                    if let Some(y) = element.admittance(self.omega) {
                        mna.stamp_admittance(i, j, y);
                    }
                }
            }
        }

        mna
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_idempotent() {
        let mut builder = CircuitBuilder::new();
        let a = builder.add_node("1");
        let b = builder.add_node("2");
        let a_again = builder.add_node("1");

        assert_eq!(a, a_again);
        assert_ne!(a, b);
    }

    #[test]
    fn test_duplicate_ground() {
        let mut builder = CircuitBuilder::new();
        let g = builder.add_ground("0").unwrap();
        assert_eq!(builder.add_ground("0").unwrap(), g);

        builder.add_node("1");
        let err = builder.add_ground("1").unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateGround {
                first: "0".into(),
                second: "1".into(),
            }
        );
    }

    #[test]
    fn test_no_ground() {
        let mut builder = CircuitBuilder::new();
        builder.add_node("1");
        assert_eq!(builder.finalize().unwrap_err(), Error::NoGround);
    }

    #[test]
    fn test_unknown_node() {
        let mut builder = CircuitBuilder::new();
        let n1 = builder.add_node("1");
        let err = builder
            .add_resistor("R1", n1, NodeId::new(7), 1000.0)
            .unwrap_err();
        assert_eq!(err, Error::UnknownNode { element: "R1".into() });
    }

    #[test]
    fn test_degenerate_element() {
        let mut builder = CircuitBuilder::new();
        let n1 = builder.add_node("1");
        let err = builder.add_resistor("R1", n1, n1, 1000.0).unwrap_err();
        assert_eq!(
            err,
            Error::DegenerateElement {
                element: "R1".into(),
                node: "1".into(),
            }
        );
    }

    #[test]
    fn test_zero_resistance() {
        let mut builder = CircuitBuilder::new();
        let g = builder.add_ground("0").unwrap();
        let n1 = builder.add_node("1");
        let err = builder.add_resistor("R1", n1, g, 0.0).unwrap_err();
        assert_eq!(err, Error::ZeroResistance { element: "R1".into() });
    }

    #[test]
    fn test_non_positive_reactive_value() {
        let mut builder = CircuitBuilder::new();
        let g = builder.add_ground("0").unwrap();
        let n1 = builder.add_node("1");

        let err = builder.add_capacitor("C1", n1, g, -1e-6).unwrap_err();
        assert_eq!(
            err,
            Error::NonPositiveValue {
                element: "C1".into(),
                value: -1e-6,
            }
        );

        let err = builder.add_inductor("L1", n1, g, 0.0).unwrap_err();
        assert_eq!(
            err,
            Error::NonPositiveValue {
                element: "L1".into(),
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_frequency_conflict() {
        let mut builder = CircuitBuilder::new();
        let g = builder.add_ground("0").unwrap();
        let n1 = builder.add_node("1");
        let n2 = builder.add_node("2");

        builder.add_voltage_source("V1", n1, g, 5.0, 1000.0).unwrap();

        // DC source in an AC circuit is a conflict
        let err = builder
            .add_current_source("I1", g, n2, 0.001, 0.0)
            .unwrap_err();
        assert_eq!(
            err,
            Error::FrequencyConflict {
                element: "I1".into(),
                expected: 1000.0,
                actual: 0.0,
            }
        );

        // Reactive elements never participate in the check
        builder.add_capacitor("C1", n2, g, 1e-6).unwrap();
    }

    #[test]
    fn test_matrix_index_assignment() {
        let mut builder = CircuitBuilder::new();
        let n1 = builder.add_node("in");
        let g = builder.add_ground("0").unwrap();
        let n2 = builder.add_node("out");
        builder.add_resistor("R1", n1, n2, 1000.0).unwrap();
        builder.add_resistor("R2", n2, g, 1000.0).unwrap();

        let circuit = builder.finalize().unwrap();

        // First-appearance order, skipping ground
        assert_eq!(circuit.matrix_index(n1), Some(0));
        assert_eq!(circuit.matrix_index(g), None);
        assert_eq!(circuit.matrix_index(n2), Some(1));
        assert_eq!(circuit.num_nodes(), 2);
        assert_eq!(circuit.num_branches(), 0);
        assert_eq!(circuit.dim(), 2);
    }

    #[test]
    fn test_branch_assignment_dc_vs_ac() {
        // At DC the inductor takes a branch; at AC it does not.
        let build = |omega: f64| {
            let mut builder = CircuitBuilder::new();
            let g = builder.add_ground("0").unwrap();
            let n1 = builder.add_node("1");
            let n2 = builder.add_node("2");
            builder.add_voltage_source("V1", n1, g, 1.0, omega).unwrap();
            builder.add_inductor("L1", n1, n2, 1e-3).unwrap();
            builder.add_resistor("R1", n2, g, 50.0).unwrap();
            builder.finalize().unwrap()
        };

        let dc = build(0.0);
        assert_eq!(dc.num_branches(), 2);
        assert_eq!(dc.branch_index(0), Some(0)); // V1
        assert_eq!(dc.branch_index(1), Some(1)); // L1

        let ac = build(1e3);
        assert_eq!(ac.num_branches(), 1);
        assert_eq!(ac.branch_index(0), Some(0)); // V1
        assert_eq!(ac.branch_index(1), None); // L1 stamps an admittance
    }

    #[test]
    fn test_assemble_dc_divider() {
        let mut builder = CircuitBuilder::new();
        let g = builder.add_ground("0").unwrap();
        let n1 = builder.add_node("1");
        let n2 = builder.add_node("2");
        builder.add_voltage_source("V1", n1, g, 10.0, 0.0).unwrap();
        builder.add_resistor("R1", n1, n2, 1000.0).unwrap();
        builder.add_resistor("R2", n2, g, 1000.0).unwrap();

        let circuit = builder.finalize().unwrap();
        let mna = circuit.assemble_dc();

        assert_eq!(mna.size(), 3);
        let a = mna.matrix();
        let tol = 1e-12;
        assert!((a[(0, 0)] - 0.001).abs() < tol);
        assert!((a[(1, 1)] - 0.002).abs() < tol);
        assert!((a[(0, 1)] + 0.001).abs() < tol);
        // Branch row for V1
        assert_eq!(a[(0, 2)], 1.0);
        assert_eq!(a[(2, 0)], 1.0);
        assert_eq!(mna.rhs()[2], 10.0);
    }

    #[test]
    fn test_assemble_ac_capacitor() {
        let mut builder = CircuitBuilder::new();
        let g = builder.add_ground("0").unwrap();
        let n1 = builder.add_node("1");
        builder.add_current_source("I1", g, n1, 1.0, 1e3).unwrap();
        builder.add_capacitor("C1", n1, g, 1e-6).unwrap();

        let circuit = builder.finalize().unwrap();
        assert!(!circuit.is_dc());

        let mna = circuit.assemble_ac();
        assert_eq!(mna.size(), 1);
        // jωC on the diagonal, current injected into node 1
        assert_eq!(mna.matrix()[(0, 0)], Complex::new(0.0, 1e-3));
        assert_eq!(mna.rhs()[0], Complex::new(1.0, 0.0));
    }
}
