//! The atom/edge/ring arena backing a single parse.
//!
//! All records live by value in growable pools owned by [`WlnGraph`]; every
//! cross-reference is a dense index handle. Each bond is modelled exactly
//! once in a central edge vector with a parent-to-child orientation (the
//! ring walk and several post-passes depend on that direction), and both
//! endpoints keep the edge id in their incident lists, so reverse traversal
//! is endpoint symmetry rather than duplicated bookkeeping.

use std::collections::{BTreeMap, HashMap};

use super::error::ParseErrorKind;
use super::{
    AtomId, EdgeId, Locant, MAX_EDGES, MAX_EDGES_PER_ATOM, MAX_RINGS, MAX_SYMBOLS, RingId,
};

/// Code byte marking a packed alkyl chain (length in `chain_len`).
pub(crate) const CODE_CHAIN: u8 = b'#';
/// Code byte marking a periodic-table element (symbol in `element`).
pub(crate) const CODE_ELEMENT: u8 = b'*';
/// Code byte marking an unresolved multiplier carbon.
pub(crate) const CODE_MULTIPLIER: u8 = b'c';

/// One parsed WLN symbol: an atom record plus its parser-facing metadata.
#[derive(Debug, Clone)]
pub(crate) struct Symbol {
    /// Raw WLN code byte, or one of the `CODE_*` markers.
    pub code: u8,
    /// Two-letter element payload when `code == CODE_ELEMENT`.
    pub element: Option<String>,
    /// Packed chain length when `code == CODE_CHAIN`.
    pub chain_len: u16,
    /// Valence ceiling; the sum of incident bond orders may never pass it.
    pub allowed_edges: u8,
    /// Current sum of incident bond orders.
    pub num_edges: u8,
    /// Accumulated formal charge (ionic and inline markers).
    pub charge: i32,
    pub aromatic: bool,
    /// The ring this atom was first placed in, if any.
    pub ring: Option<RingId>,
    /// Parser back-pointer to the atom this one was bonded from.
    pub previous: Option<AtomId>,
    /// Incident edge ids, both orientations, in creation order.
    pub edges: Vec<EdgeId>,
}

impl Symbol {
    /// Whether another single bond still fits under the valence ceiling.
    pub fn is_open(&self) -> bool {
        self.num_edges < self.allowed_edges
    }

    /// Remaining bond-order capacity.
    pub fn free_valence(&self) -> u8 {
        self.allowed_edges.saturating_sub(self.num_edges)
    }
}

/// A bond, stored once, oriented from `parent` to `child`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub parent: AtomId,
    pub child: AtomId,
    /// Bond order, 1..=3.
    pub order: u8,
    pub aromatic: bool,
}

impl Edge {
    /// The endpoint opposite `atom`.
    pub fn other(&self, atom: AtomId) -> AtomId {
        if self.parent == atom { self.child } else { self.parent }
    }
}

/// A built ring system: the shared locant path of all fused components.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ring {
    /// Total distinct atoms on the locant path.
    pub size: usize,
    /// Count of atoms flagged aromatic during the build.
    pub aromatic_atoms: usize,
    /// Locant to atom, the forward map ring notation addresses.
    pub locants: BTreeMap<Locant, AtomId>,
    /// Atom to locant, scoped to this ring.
    pub locant_of: HashMap<AtomId, Locant>,
    /// Fused sub-rings as (size, start locant), in notation order.
    pub components: Vec<(usize, Locant)>,
    /// Per-component aromaticity.
    pub aromaticity: Vec<bool>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Arena owning every symbol, edge, and ring of one parse.
#[derive(Debug)]
pub(crate) struct WlnGraph {
    pub symbols: Vec<Symbol>,
    pub edges: Vec<Edge>,
    pub rings: Vec<Ring>,
    /// 0-based source offset of each atom's defining character, for ionic
    /// charge back-references.
    positions: HashMap<usize, AtomId>,
    /// Structured replacements for the reference implementation's stderr
    /// warnings.
    pub warnings: Vec<String>,
    lenient: bool,
}

impl WlnGraph {
    pub fn new(lenient: bool) -> Self {
        Self {
            symbols: Vec::new(),
            edges: Vec::new(),
            rings: Vec::new(),
            positions: HashMap::new(),
            warnings: Vec::new(),
            lenient,
        }
    }

    pub fn symbol(&self, id: AtomId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn symbol_mut(&mut self, id: AtomId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn ring(&self, id: RingId) -> &Ring {
        &self.rings[id.0]
    }

    pub fn ring_mut(&mut self, id: RingId) -> &mut Ring {
        &mut self.rings[id.0]
    }

    /// Allocates a fresh symbol with no edges and no charge.
    pub fn add_symbol(&mut self, code: u8, allowed_edges: u8) -> Result<AtomId, ParseErrorKind> {
        if self.symbols.len() >= MAX_SYMBOLS {
            return Err(ParseErrorKind::CapacityExceeded("symbol pool"));
        }
        let id = AtomId(self.symbols.len());
        self.symbols.push(Symbol {
            code,
            element: None,
            chain_len: 0,
            allowed_edges,
            num_edges: 0,
            charge: 0,
            aromatic: false,
            ring: None,
            previous: None,
            edges: Vec::new(),
        });
        Ok(id)
    }

    /// Allocates a fresh ring record.
    pub fn add_ring(&mut self) -> Result<RingId, ParseErrorKind> {
        if self.rings.len() >= MAX_RINGS {
            return Err(ParseErrorKind::CapacityExceeded("ring pool"));
        }
        let id = RingId(self.rings.len());
        self.rings.push(Ring::new());
        Ok(id)
    }

    /// Creates a single bond from `parent` to `child`.
    ///
    /// Mirrors edge allocation in the reference reader: self-bonds and
    /// duplicate bonds are rejected, both endpoints are charged one unit of
    /// valence, and the child's `previous` back-pointer is set for look-back.
    pub fn add_edge(&mut self, child: AtomId, parent: AtomId) -> Result<EdgeId, ParseErrorKind> {
        if child == parent {
            return Err(ParseErrorKind::InvalidState(
                "making a bond to self is impossible".into(),
            ));
        }
        if self.search_edge(child, parent).is_some() {
            return Err(ParseErrorKind::InvalidState(
                "trying to bond already bonded symbols".into(),
            ));
        }
        if self.edges.len() >= MAX_EDGES {
            return Err(ParseErrorKind::CapacityExceeded("edge pool"));
        }
        if self.symbol(child).edges.len() >= MAX_EDGES_PER_ATOM
            || self.symbol(parent).edges.len() >= MAX_EDGES_PER_ATOM
        {
            return Err(ParseErrorKind::CapacityExceeded("per-atom edge slots"));
        }

        self.ensure_capacity(child, 1)?;
        self.ensure_capacity(parent, 1)?;

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            parent,
            child,
            order: 1,
            aromatic: false,
        });
        self.symbol_mut(parent).edges.push(id);
        self.symbol_mut(parent).num_edges += 1;
        let child_sym = self.symbol_mut(child);
        child_sym.edges.push(id);
        child_sym.num_edges += 1;
        child_sym.previous = Some(parent);
        Ok(id)
    }

    /// Raises an edge's order by `n`, charging both endpoints.
    pub fn unsaturate(&mut self, id: EdgeId, n: u8) -> Result<(), ParseErrorKind> {
        let (child, parent) = {
            let edge = self.edge(id);
            (edge.child, edge.parent)
        };
        self.ensure_capacity(child, n)?;
        self.ensure_capacity(parent, n)?;
        self.edges[id.0].order += n;
        self.symbol_mut(child).num_edges += n;
        self.symbol_mut(parent).num_edges += n;
        Ok(())
    }

    /// Lowers an edge's order by `n`; a no-op on single bonds.
    pub fn saturate(&mut self, id: EdgeId, n: u8) {
        if self.edges[id.0].order < 2 {
            return;
        }
        let (child, parent) = {
            let edge = self.edge(id);
            (edge.child, edge.parent)
        };
        self.edges[id.0].order -= n;
        self.symbol_mut(child).num_edges -= n;
        self.symbol_mut(parent).num_edges -= n;
    }

    /// Finds the edge between two atoms in either orientation.
    pub fn search_edge(&self, a: AtomId, b: AtomId) -> Option<EdgeId> {
        self.symbols
            .get(a.0)?
            .edges
            .iter()
            .copied()
            .find(|&id| self.edge(id).other(a) == b)
    }

    /// Outgoing bonds of `id` (edges where `id` is the parent), in creation
    /// order.
    pub fn children(&self, id: AtomId) -> impl Iterator<Item = (EdgeId, AtomId)> + '_ {
        self.symbol(id)
            .edges
            .iter()
            .copied()
            .filter_map(move |eid| {
                let edge = self.edge(eid);
                (edge.parent == id).then_some((eid, edge.child))
            })
    }

    /// First outgoing bond of `id`, if any.
    pub fn first_child(&self, id: AtomId) -> Option<(EdgeId, AtomId)> {
        self.children(id).next()
    }

    /// Counts branch occupancy the way the reference reader does: outgoing
    /// bonds plus the incoming parent link, saturating at the ceiling once
    /// the atom is valence-full.
    pub fn count_children(&self, id: AtomId) -> usize {
        let sym = self.symbol(id);
        let mut count = self.children(id).count();
        if sym.previous.is_some() {
            count += 1;
        }
        if sym.num_edges == sym.allowed_edges {
            return sym.num_edges as usize;
        }
        count
    }

    /// Seats an atom at a ring locant, maintaining both maps and the atom's
    /// ring membership (first ring wins, so spiro atoms stay with the ring
    /// that created them).
    pub fn assign_locant(&mut self, ring: RingId, loc: Locant, atom: AtomId) {
        let record = &mut self.rings[ring.0];
        record.locants.insert(loc, atom);
        record.locant_of.insert(atom, loc);
        let sym = &mut self.symbols[atom.0];
        if sym.ring.is_none() {
            sym.ring = Some(ring);
        }
    }

    /// Records the defining source offset of an atom.
    pub fn record_position(&mut self, offset: usize, id: AtomId) {
        self.positions.insert(offset, id);
    }

    /// Looks up the atom defined at a source offset.
    pub fn atom_at_position(&self, offset: usize) -> Option<AtomId> {
        self.positions.get(&offset).copied()
    }

    /// Verifies that `extra` more units of bond order fit on `id`, applying
    /// the lenient-mode symbol rewrites when they can recover the overflow.
    fn ensure_capacity(&mut self, id: AtomId, extra: u8) -> Result<(), ParseErrorKind> {
        loop {
            let sym = self.symbol(id);
            if sym.num_edges + extra <= sym.allowed_edges {
                return Ok(());
            }
            let (code, edges, cap) = (sym.code, sym.num_edges + extra, sym.allowed_edges);
            if !self.raise_branching(id) {
                return Err(ParseErrorKind::ValenceExceeded {
                    code: code as char,
                    edges,
                    cap,
                });
            }
        }
    }

    /// Lenient-mode symbol rewrites: `M` to `N`, acyclic `N` to `K`, and the
    /// ceiling-neutral `Y` to `X`.
    ///
    /// Returns whether the ceiling grew, so the caller may re-check. `Y` to
    /// `X` cannot recover a failing bond (both ceilings are 4); the rewrite
    /// is still recorded because it widens the default-methyl fill.
    fn raise_branching(&mut self, id: AtomId) -> bool {
        if !self.lenient {
            return false;
        }
        let sym = self.symbol(id);
        match sym.code {
            b'M' => {
                self.warnings
                    .push("M branches are exceeding 2, raising to N".into());
                let sym = self.symbol_mut(id);
                sym.code = b'N';
                sym.allowed_edges += 1;
                true
            }
            b'N' if sym.ring.is_none() => {
                self.warnings
                    .push("N branches are exceeding 3, raising to K".into());
                let sym = self.symbol_mut(id);
                sym.code = b'K';
                sym.allowed_edges += 1;
                true
            }
            b'Y' => {
                self.warnings
                    .push("Y branches are exceeding its contraction, raising to X".into());
                self.symbol_mut(id).code = b'X';
                false
            }
            _ => false,
        }
    }
}
