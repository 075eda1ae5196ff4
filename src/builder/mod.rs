//! The graph sink: walks a finished arena and emits neutral atom/bond
//! records through the [`MolBuilder`] trait.
//!
//! The sink owns the element-code translation table: single WLN letters map
//! to fixed atomic numbers with per-symbol implicit-hydrogen and charge
//! rules, periodic `*` symbols resolve through the element table. The core
//! never imports concrete chemistry types; hosts adapt by implementing
//! `MolBuilder`.

use crate::core::AtomId;
use crate::core::error::ParseErrorKind;
use crate::core::graph::{CODE_ELEMENT, WlnGraph};
use crate::elements;

/// Abstract molecular-graph consumer.
///
/// Atom ids are sequential from zero in emission order; bond records refer
/// to them. `sanitize` runs once after all records are delivered.
pub trait MolBuilder {
    /// Receives one atom record.
    fn new_atom(&mut self, atomic_number: u8, charge: i32, implicit_hydrogens: u8, aromatic: bool);
    /// Receives one bond record between previously emitted atoms.
    fn new_bond(&mut self, parent: usize, child: usize, order: u8, aromatic: bool);
    /// Receives the atom ids of one ring system, as an aromatic-perception
    /// hint.
    fn ring_hint(&mut self, _atom_ids: &[usize]) {}
    /// Finalises the molecule.
    fn sanitize(&mut self) {}
}

/// An emitted atom record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    pub id: usize,
    pub atomic_number: u8,
    pub charge: i32,
    pub implicit_hydrogens: u8,
    pub aromatic: bool,
}

/// An emitted bond record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub parent: usize,
    pub child: usize,
    pub order: u8,
    pub aromatic: bool,
}

/// The default sink: a neutral record stream any chemistry toolkit can walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularGraph {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// Atom-id lists per ring system.
    pub rings: Vec<Vec<usize>>,
    /// Structured notes from lenient-mode rewrites and heteroatom checks.
    pub warnings: Vec<String>,
}

impl MolecularGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the graph as Graphviz, one arrow per bond order, aromatic
    /// bonds in red.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph WLNdigraph {\n  rankdir = LR;\n");
        for atom in &self.atoms {
            let color = if atom.aromatic { ",color=green" } else { "" };
            out.push_str(&format!(
                "  {} [shape=circle,label=\"{}\"{}];\n",
                atom.id, atom.atomic_number, color
            ));
        }
        for bond in &self.bonds {
            for _ in 0..bond.order {
                if bond.aromatic {
                    out.push_str(&format!("  {} -> {} [color=red]\n", bond.parent, bond.child));
                } else {
                    out.push_str(&format!("  {} -> {}\n", bond.parent, bond.child));
                }
            }
        }
        out.push_str("}\n");
        out
    }
}

impl MolBuilder for MolecularGraph {
    fn new_atom(&mut self, atomic_number: u8, charge: i32, implicit_hydrogens: u8, aromatic: bool) {
        let id = self.atoms.len();
        self.atoms.push(Atom {
            id,
            atomic_number,
            charge,
            implicit_hydrogens,
            aromatic,
        });
    }

    fn new_bond(&mut self, parent: usize, child: usize, order: u8, aromatic: bool) {
        self.bonds.push(Bond {
            parent,
            child,
            order,
            aromatic,
        });
    }

    fn ring_hint(&mut self, atom_ids: &[usize]) {
        self.rings.push(atom_ids.to_vec());
    }
}

/// Walks the arena and emits every atom, bond, and ring hint.
pub(crate) fn emit<B: MolBuilder>(graph: &WlnGraph, builder: &mut B) -> Result<(), ParseErrorKind> {
    for index in 0..graph.symbols.len() {
        let (atomic_number, charge, implicit_hydrogens) = classify(graph, AtomId(index))?;
        let aromatic = graph.symbols[index].aromatic;
        builder.new_atom(atomic_number, charge, implicit_hydrogens, aromatic);
    }
    for edge in &graph.edges {
        builder.new_bond(edge.parent.0, edge.child.0, edge.order, edge.aromatic);
    }
    for ring in &graph.rings {
        let mut ids: Vec<usize> = ring.locants.values().map(|atom| atom.0).collect();
        ids.sort_unstable();
        ids.dedup();
        builder.ring_hint(&ids);
    }
    builder.sanitize();
    Ok(())
}

/// Translates one symbol into (atomic number, charge, implicit hydrogens).
fn classify(graph: &WlnGraph, id: AtomId) -> Result<(u8, i32, u8), ParseErrorKind> {
    let sym = graph.symbol(id);
    let num_edges = sym.num_edges;

    let (atomic_number, mut charge, mut hydrogens) = match sym.code {
        b'H' => (1, 0, 0),
        b'B' => (5, 0, 0),
        b'1' | b'C' => (6, 0, sym.free_valence()),
        b'X' => (6, 0, 0),
        b'Y' => {
            let hydrogens = if sym.ring.is_none() && num_edges < 4 { 1 } else { 0 };
            (6, 0, hydrogens)
        }
        b'N' => {
            let ceiling = if sym.ring.is_some() { 3 } else { sym.allowed_edges };
            (7, 0, ceiling.saturating_sub(num_edges))
        }
        b'M' => (7, 0, 1),
        b'Z' => (7, 0, 2),
        b'K' => (7, 1, 0),
        b'O' => {
            let charge = match num_edges {
                0 => -2,
                1 => -1,
                _ => 0,
            };
            (8, charge, 0)
        }
        b'Q' => (8, if num_edges == 0 { -1 } else { 0 }, 1),
        b'F' => (9, if num_edges == 0 { -1 } else { 0 }, 0),
        b'P' => (15, 0, if num_edges % 2 == 0 { 1 } else { 0 }),
        b'S' => (16, 0, if num_edges % 2 != 0 { 1 } else { 0 }),
        b'G' => (17, if num_edges == 0 { -1 } else { 0 }, 0),
        b'E' => (35, if num_edges == 0 { -1 } else { 0 }, 0),
        b'I' => (53, if num_edges == 0 { -1 } else { 0 }, 0),
        CODE_ELEMENT => {
            let record = sym
                .element
                .as_deref()
                .and_then(elements::lookup)
                .ok_or_else(|| {
                    ParseErrorKind::InvalidState(
                        "periodic element symbol missing from the table".into(),
                    )
                })?;
            (record.number, 0, 0)
        }
        other => {
            return Err(ParseErrorKind::InvalidState(format!(
                "unrecognised symbol '{}' in graph emission",
                other as char
            )));
        }
    };

    // ionic notation overrides any derived formal charge
    if sym.charge != 0 {
        charge = sym.charge;
        if charge < 0 && hydrogens > 0 {
            // let the charge relax a hydrogen
            hydrogens -= 1;
        }
    }
    Ok((atomic_number, charge, hydrogens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParseOptions;
    use crate::parser;

    fn emitted(notation: &str) -> MolecularGraph {
        let mut graph = parser::parse(notation, &ParseOptions::default()).unwrap();
        crate::post::run(&mut graph).unwrap();
        let mut out = MolecularGraph::new();
        emit(&graph, &mut out).unwrap();
        out
    }

    fn heavy_atoms(graph: &MolecularGraph) -> usize {
        graph.atoms.iter().filter(|a| a.atomic_number > 1).count()
    }

    #[test]
    fn methane_chain_fills_hydrogens() {
        let out = emitted("1");
        assert_eq!(out.atoms.len(), 1);
        assert_eq!(out.atoms[0].atomic_number, 6);
        assert_eq!(out.atoms[0].implicit_hydrogens, 4);
        assert!(out.bonds.is_empty());
    }

    #[test]
    fn methanol_splits_hydrogens_by_symbol() {
        let out = emitted("Q1");
        assert_eq!(out.atoms.len(), 2);
        let oxygen = out.atoms.iter().find(|a| a.atomic_number == 8).unwrap();
        let carbon = out.atoms.iter().find(|a| a.atomic_number == 6).unwrap();
        assert_eq!(oxygen.implicit_hydrogens, 1);
        assert_eq!(oxygen.charge, 0);
        assert_eq!(carbon.implicit_hydrogens, 3);
    }

    #[test]
    fn terminal_oxygen_resolves_its_hanging_valence() {
        let out = emitted("1O");
        let oxygen = out.atoms.iter().find(|a| a.atomic_number == 8).unwrap();
        // the hanging-valence pass raised C-O to C=O, so no anion remains
        assert_eq!(oxygen.charge, 0);
        assert_eq!(out.bonds.iter().filter(|b| b.order == 2).count(), 1);
    }

    #[test]
    fn benzene_emits_aromatic_ring_hint() {
        let out = emitted("L6J");
        assert_eq!(out.atoms.len(), 6);
        assert!(out.atoms.iter().all(|a| a.aromatic));
        assert!(out.atoms.iter().all(|a| a.implicit_hydrogens == 1));
        assert_eq!(out.rings.len(), 1);
        assert_eq!(out.rings[0].len(), 6);
        assert_eq!(out.bonds.iter().filter(|b| b.order == 2).count(), 3);
    }

    #[test]
    fn amine_nitrogen_fills_to_three() {
        let out = emitted("Z1");
        let nitrogen = out.atoms.iter().find(|a| a.atomic_number == 7).unwrap();
        assert_eq!(nitrogen.implicit_hydrogens, 2);
        assert_eq!(nitrogen.charge, 0);
    }

    #[test]
    fn periodic_element_resolves_atomic_number() {
        let out = emitted("-SN-1");
        let tin = out.atoms.iter().find(|a| a.atomic_number == 50).unwrap();
        assert_eq!(tin.implicit_hydrogens, 0);
        assert_eq!(heavy_atoms(&out), 2);
    }

    #[test]
    fn explicit_hydrogens_emit_as_atoms() {
        let out = emitted("ZH");
        // ammonia: N with two implicit H plus the explicit one
        assert_eq!(out.atoms.len(), 2);
        let nitrogen = out.atoms.iter().find(|a| a.atomic_number == 7).unwrap();
        assert_eq!(nitrogen.implicit_hydrogens, 2);
        assert_eq!(out.atoms.iter().filter(|a| a.atomic_number == 1).count(), 1);
    }

    #[test]
    fn custom_builder_receives_the_stream() {
        #[derive(Default)]
        struct Counter {
            atoms: usize,
            bonds: usize,
            rings: usize,
            sanitized: bool,
        }
        impl MolBuilder for Counter {
            fn new_atom(&mut self, _: u8, _: i32, _: u8, _: bool) {
                self.atoms += 1;
            }
            fn new_bond(&mut self, _: usize, _: usize, _: u8, _: bool) {
                self.bonds += 1;
            }
            fn ring_hint(&mut self, _: &[usize]) {
                self.rings += 1;
            }
            fn sanitize(&mut self) {
                self.sanitized = true;
            }
        }

        let mut graph = parser::parse("L6J", &ParseOptions::default()).unwrap();
        crate::post::run(&mut graph).unwrap();
        let mut counter = Counter::default();
        emit(&graph, &mut counter).unwrap();
        assert_eq!(counter.atoms, 6);
        assert_eq!(counter.bonds, 6);
        assert_eq!(counter.rings, 1);
        assert!(counter.sanitized);
    }

    #[test]
    fn dot_dump_contains_every_atom() {
        let out = emitted("L6J");
        let dot = out.to_dot();
        assert!(dot.starts_with("digraph WLNdigraph {"));
        assert_eq!(dot.matches("shape=circle").count(), 6);
        assert!(dot.contains("color=red"));
    }
}
