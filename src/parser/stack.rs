//! The branch stack: open rings and open branching atoms, in one stack.
//!
//! Frames are a tagged choice of ring or branching atom. The stack keeps
//! cached nearest-to-top lookups for each kind because the main parser
//! constantly asks "which ring is active" and "which branch can still take a
//! bond" without caring what sits between.

use crate::core::graph::WlnGraph;
use crate::core::{AtomId, RingId};

/// One open scope: a ring whose locants are addressable, or a branching atom
/// awaiting more substituents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    Ring(RingId),
    Branch(AtomId),
}

/// Stack of open rings and branching atoms.
#[derive(Debug, Default)]
pub(crate) struct BranchStack {
    frames: Vec<Frame>,
    ring: Option<RingId>,
    branch: Option<AtomId>,
}

impl BranchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Nearest-to-top open ring.
    pub fn ring(&self) -> Option<RingId> {
        self.ring
    }

    /// Nearest-to-top branching atom.
    pub fn branch(&self) -> Option<AtomId> {
        self.branch
    }

    pub fn top(&self) -> Option<Frame> {
        self.frames.last().copied()
    }

    pub fn push_ring(&mut self, id: RingId) {
        self.frames.push(Frame::Ring(id));
        self.ring = Some(id);
    }

    pub fn push_branch(&mut self, id: AtomId) {
        self.frames.push(Frame::Branch(id));
        self.branch = Some(id);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.ring = None;
        self.branch = None;
    }

    /// Pops branch frames until a ring frame is on top (or the stack empties).
    pub fn pop_to_ring(&mut self) {
        while matches!(self.top(), Some(Frame::Branch(_))) {
            self.pop();
        }
    }

    /// Pops ring frames until a branch frame is on top (or the stack empties).
    pub fn pop_to_branch(&mut self) {
        while matches!(self.top(), Some(Frame::Ring(_))) {
            self.pop();
        }
    }

    /// Pops saturated branch frames and returns the first branching atom that
    /// can still be bonded to, stopping at ring frames.
    ///
    /// A `Y` counts as saturated once it holds three children; everything
    /// else is popped when its bond-order total reaches the ceiling.
    pub fn next_branch_symbol(&mut self, graph: &WlnGraph) -> Option<AtomId> {
        while let Some(frame) = self.top() {
            match frame {
                Frame::Ring(_) => return None,
                Frame::Branch(id) => {
                    let sym = graph.symbol(id);
                    let y_saturated = sym.code == b'Y' && graph.count_children(id) == 3;
                    if y_saturated || sym.num_edges == sym.allowed_edges {
                        self.pop();
                    } else {
                        return Some(id);
                    }
                }
            }
        }
        None
    }

    fn recompute(&mut self) {
        self.ring = None;
        self.branch = None;
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Ring(id) if self.ring.is_none() => self.ring = Some(*id),
                Frame::Branch(id) if self.branch.is_none() => self.branch = Some(*id),
                _ => {}
            }
        }
    }
}
