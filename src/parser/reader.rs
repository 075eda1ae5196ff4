//! The main character-driven state machine over a WLN string.
//!
//! Each character's meaning depends on parser state: whether a ring block is
//! open, whether a locant is pending after a space, what sits on the branch
//! stack, and whether an ionic clear has reset the chain. The reader owns
//! all of that state, delegates ring-block substrings to the ring builder,
//! and applies ionic charges once the walk completes.

use super::ionic;
use super::ring;
use super::stack::{BranchStack, Frame};
use crate::core::error::{ParseError, ParseErrorKind};
use crate::core::graph::{CODE_CHAIN, CODE_ELEMENT, CODE_MULTIPLIER, WlnGraph};
use crate::core::{
    AtomId, EdgeId, LOCANT_WIDENING, Locant, MAX_CHAIN, ParseOptions, RingId,
};
use crate::elements;
use crate::post::charges;
use crate::post::expand::add_methyl;

/// Parses a full WLN string into a graph arena.
///
/// No post-processing is applied here beyond ionic charge assignment; the
/// caller runs the expansion passes and the sink.
pub(crate) fn parse(notation: &str, options: &ParseOptions) -> Result<WlnGraph, ParseError> {
    Parser::new(notation, options).run()
}

struct Parser<'a> {
    notation: &'a str,
    bytes: &'a [u8],
    options: ParseOptions,
    graph: WlnGraph,
    stack: BranchStack,
    prev: Option<AtomId>,
    curr: Option<AtomId>,
    ring: Option<RingId>,
    wrap_ring: Option<RingId>,
    charges: Vec<(usize, i32)>,
    /// True at the start of the string and after every ionic clear.
    cleared: bool,
    pending_locant: bool,
    pending_closure: bool,
    pending_inline_ring: bool,
    pending_spiro: bool,
    pending_ring_in_ring: bool,
    pending_unsaturate: u8,
    /// Last ring locant seen; 0 when none, `b'0'` for the charge marker.
    on_locant: Locant,
    /// Set while a ring block legitimately contains a non-closing `J`.
    j_skips: bool,
    block_start: usize,
    i: usize,
}

impl<'a> Parser<'a> {
    fn new(notation: &'a str, options: &ParseOptions) -> Self {
        Self {
            notation,
            bytes: notation.as_bytes(),
            options: *options,
            graph: WlnGraph::new(options.lenient),
            stack: BranchStack::new(),
            prev: None,
            curr: None,
            ring: None,
            wrap_ring: None,
            charges: Vec::new(),
            cleared: true,
            pending_locant: false,
            pending_closure: false,
            pending_inline_ring: false,
            pending_spiro: false,
            pending_ring_in_ring: false,
            pending_unsaturate: 0,
            on_locant: 0,
            j_skips: false,
            block_start: 0,
            i: 0,
        }
    }

    fn run(mut self) -> Result<WlnGraph, ParseError> {
        let scan = ionic::scan(self.notation);
        self.charges = scan.charges;

        while self.i < self.bytes.len() {
            if scan.terminus == Some(self.i) {
                break;
            }
            self.step(self.bytes[self.i])?;
            self.i += 1;
        }
        self.finish()
    }

    // --- small helpers -------------------------------------------------

    fn fail(&self, kind: ParseErrorKind) -> ParseError {
        kind.at(self.i)
    }

    fn invalid(&self, message: impl Into<String>) -> ParseError {
        self.fail(ParseErrorKind::InvalidState(message.into()))
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.i + ahead).copied()
    }

    fn new_atom(&mut self, code: u8, allowed: u8) -> Result<AtomId, ParseError> {
        let atom = self
            .graph
            .add_symbol(code, allowed)
            .map_err(|k| self.fail(k))?;
        self.graph.record_position(self.i, atom);
        Ok(atom)
    }

    /// Creates the bond and consumes any pending unsaturation.
    fn bond_direct(&mut self, child: AtomId, parent: AtomId) -> Result<EdgeId, ParseError> {
        let edge = self.graph.add_edge(child, parent).map_err(|k| self.fail(k))?;
        if self.pending_unsaturate > 0 {
            let n = std::mem::take(&mut self.pending_unsaturate);
            self.graph.unsaturate(edge, n).map_err(|k| self.fail(k))?;
        }
        Ok(edge)
    }

    /// Bonds `curr` to `prev` (when set); ring frames stacked above an
    /// addressed branch atom are discarded first.
    fn attach_to_prev(&mut self, curr: AtomId) -> Result<Option<EdgeId>, ParseError> {
        let Some(prev) = self.prev else {
            return Ok(None);
        };
        if Some(prev) == self.stack.branch() {
            self.stack.pop_to_branch();
        }
        self.bond_direct(curr, prev).map(Some)
    }

    /// Handles a letter in the pending-locant state: fetch the ring atom and
    /// remember the locant for whatever follows.
    fn ring_locant_target(&mut self, ch: Locant) -> Result<(), ParseError> {
        if !self.pending_inline_ring {
            let ring = self
                .stack
                .ring()
                .ok_or_else(|| self.invalid("locant named without an open ring"))?;
            self.ring = Some(ring);
            let atom = self
                .graph
                .ring(ring)
                .locants
                .get(&ch)
                .copied()
                .ok_or_else(|| {
                    self.fail(ParseErrorKind::LocantOutOfRange(
                        "accessing locants out of range".into(),
                    ))
                })?;
            self.curr = Some(atom);
            self.prev = Some(atom);
        }
        self.pending_locant = false;
        self.on_locant = ch;
        Ok(())
    }

    fn plain_atom(&mut self, ch: u8, allowed: u8, clear_pending: bool) -> Result<(), ParseError> {
        self.on_locant = 0;
        let curr = self.new_atom(ch, allowed)?;
        self.curr = Some(curr);
        self.attach_to_prev(curr)?;
        if clear_pending {
            self.pending_unsaturate = 0;
        }
        self.prev = Some(curr);
        self.cleared = false;
        Ok(())
    }

    fn branching_atom(&mut self, ch: u8, allowed: u8, clear_pending: bool) -> Result<(), ParseError> {
        self.on_locant = 0;
        let curr = self.new_atom(ch, allowed)?;
        self.curr = Some(curr);
        self.attach_to_prev(curr)?;
        if clear_pending {
            self.pending_unsaturate = 0;
        }
        self.stack.push_branch(curr);
        self.prev = Some(curr);
        self.cleared = false;
        Ok(())
    }

    /// Terminators hop `prev` back to the nearest unsaturated branch atom.
    fn terminal_atom(&mut self, ch: u8, allowed: u8) -> Result<(), ParseError> {
        self.on_locant = 0;
        let curr = self.new_atom(ch, allowed)?;
        self.curr = Some(curr);
        self.attach_to_prev(curr)?;
        self.pending_unsaturate = 0;
        self.prev = self.stack.next_branch_symbol(&self.graph).or(Some(curr));
        self.cleared = false;
        Ok(())
    }

    // --- per-character handlers ----------------------------------------

    fn step(&mut self, ch: u8) -> Result<(), ParseError> {
        match ch {
            b'0' => self.on_zero(),
            b'1'..=b'9' => self.on_digit(ch),
            b'A' => self.on_locant_only(ch),
            b'B' => self.on_simple(ch),
            b'C' => self.on_multiplier_carbon(ch),
            b'D' => self.on_chelate_open(ch),
            b'E' | b'G' | b'F' | b'I' => self.on_halogen(ch),
            b'H' => self.on_hydrogen(ch),
            b'J' => self.on_ring_close(ch),
            b'K' => self.on_simple(ch),
            b'L' | b'T' => self.on_ring_open(ch),
            b'M' => self.on_simple(ch),
            b'N' => self.on_nitrogen(ch),
            b'O' => self.on_simple(ch),
            b'P' | b'S' => self.on_simple(ch),
            b'Q' => self.on_simple(ch),
            b'R' => self.on_benzene(ch),
            b'U' => self.on_unsaturate(ch),
            b'V' => self.on_simple(ch),
            b'W' => self.on_dioxo(ch),
            b'X' => self.on_quaternary(ch),
            b'Y' => self.on_tertiary(ch),
            b'Z' => self.on_simple(ch),
            b' ' => self.on_space(),
            b'&' => self.on_pop(),
            b'-' => self.on_dash(),
            b'/' => self.on_slash(),
            other => Err(self.fail(ParseErrorKind::InvalidCharacter(other as char))),
        }
    }

    fn on_zero(&mut self) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            if let Some(prev) = self.prev {
                if self.graph.symbol(prev).ring.is_none() {
                    self.graph.symbol_mut(prev).charge += 1;
                }
            }
            self.prev = None;
            self.on_locant = b'0';
            self.pending_locant = false;
            Ok(())
        } else {
            Err(self.invalid(
                "a lone zero mark is not allowed without positive numerals either side",
            ))
        }
    }

    fn on_digit(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            if self.i > 0 && self.bytes[self.i - 1] == b' ' {
                self.j_skips = true;
            }
            return Ok(());
        }
        if self.pending_locant {
            return Err(self.invalid("multipliers are not currently supported"));
        }
        if self.pending_ring_in_ring && self.pending_inline_ring {
            return self.wrap_macro_ring();
        }

        self.on_locant = 0;
        let chain = self.new_atom(CODE_CHAIN, 4)?;
        self.curr = Some(chain);
        self.attach_to_prev(chain)?;

        let mut value = (ch - b'0') as u32;
        while let Some(digit) = self.peek(1).filter(|b| b.is_ascii_digit()) {
            value = value * 10 + (digit - b'0') as u32;
            self.i += 1;
            if value > MAX_CHAIN as u32 {
                return Err(self.fail(ParseErrorKind::CapacityExceeded("carbon chain")));
            }
        }
        self.graph.symbol_mut(chain).chain_len = value as u16;

        self.prev = Some(chain);
        self.cleared = false;
        Ok(())
    }

    fn on_locant_only(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
        } else {
            return Err(self.invalid("locant only symbol used in atomic definition"));
        }
        self.cleared = false;
        Ok(())
    }

    /// The common atom letters: fixed ceiling plus a branching or terminal
    /// role.
    fn on_simple(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        match ch {
            b'B' => self.branching_atom(ch, 3, false),
            b'K' => self.branching_atom(ch, 4, false),
            b'P' => self.branching_atom(ch, 5, false),
            b'S' => self.branching_atom(ch, 6, false),
            b'M' => self.plain_atom(ch, 2, true),
            b'O' => self.plain_atom(ch, 2, false),
            b'V' => self.plain_atom(ch, 2, false),
            b'Q' => self.terminal_atom(ch, 1),
            b'Z' => self.terminal_atom(ch, 1),
            _ => Err(self.fail(ParseErrorKind::InvalidCharacter(ch as char))),
        }
    }

    fn on_halogen(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        self.terminal_atom(ch, 1)
    }

    fn on_nitrogen(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        self.on_locant = 0;
        let curr = self.new_atom(ch, 3)?;
        self.curr = Some(curr);
        if let Some(prev) = self.prev {
            // A dioxo anchor grows nitrogen's ceiling by one.
            if self.graph.symbol(prev).code == b'W' {
                self.graph.symbol_mut(curr).allowed_edges += 1;
            }
        }
        self.attach_to_prev(curr)?;
        self.pending_unsaturate = 0;
        self.stack.push_branch(curr);
        self.prev = Some(curr);
        self.cleared = false;
        Ok(())
    }

    fn on_tertiary(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            return Err(self.invalid(
                "'Y' cannot be a locant assignment, please expand [A-W] with &",
            ));
        }
        self.branching_atom(ch, 4, true)
    }

    fn on_quaternary(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            return Err(self.invalid(
                "'X' locant assignments produce uncertain structures and are not supported",
            ));
        }
        self.branching_atom(ch, 4, false)
    }

    fn on_multiplier_carbon(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        self.on_locant = 0;
        let curr = self.new_atom(CODE_MULTIPLIER, 4)?;
        self.curr = Some(curr);
        // A trailing C has nothing to multiply into and stays unbound.
        if self.prev.is_some() && self.i < self.bytes.len() - 1 {
            self.attach_to_prev(curr)?;
        }
        self.prev = Some(curr);
        self.cleared = false;
        Ok(())
    }

    fn on_dioxo(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        self.on_locant = 0;
        let curr = self.new_atom(ch, 3)?;
        self.curr = Some(curr);
        if let Some(prev) = self.prev {
            if self.graph.symbol(prev).code == b'N' {
                self.graph.symbol_mut(prev).allowed_edges += 1;
            }
            if self.pending_unsaturate > 0 {
                return Err(
                    self.invalid("a bond unsaturation followed by dioxo is undefined notation")
                );
            }
            if Some(prev) == self.stack.branch() {
                self.stack.pop_to_branch();
            }
            let edge = self.graph.add_edge(curr, prev).map_err(|k| self.fail(k))?;
            // at minimum the dioxo must take three bonds
            self.graph.unsaturate(edge, 2).map_err(|k| self.fail(k))?;
        } else {
            self.pending_unsaturate = 2;
        }
        if self.prev.is_none() {
            self.prev = Some(curr);
        } else {
            self.prev = self.stack.next_branch_symbol(&self.graph);
        }
        self.cleared = false;
        Ok(())
    }

    fn on_hydrogen(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        self.on_locant = 0;
        let curr = self.new_atom(ch, 1)?;
        self.curr = Some(curr);
        if let Some(prev) = self.prev {
            self.attach_to_prev(curr)?;
            // an explicit hydrogen lets Z grow past its amine ceiling
            if self.graph.symbol(prev).code == b'Z' {
                self.graph.symbol_mut(prev).allowed_edges += 1;
            }
        }
        match self.prev {
            Some(prev) if self.graph.symbol(prev).is_open() => {
                self.curr = Some(prev);
            }
            _ => {
                self.prev = self.stack.next_branch_symbol(&self.graph);
            }
        }
        if self.prev.is_none() {
            self.prev = self.curr;
        }
        self.cleared = false;
        Ok(())
    }

    fn on_unsaturate(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            return self.ring_locant_target(ch);
        }
        if self.cleared {
            return Err(self.invalid("floating double bond after ionic clear"));
        }
        self.on_locant = 0;
        self.pending_unsaturate += 1;
        Ok(())
    }

    fn on_ring_open(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        if self.peek(1) == Some(b'-') && matches!(self.peek(2), Some(b'T') | Some(b'L')) {
            self.pending_ring_in_ring = true;
            self.i += 1;
            self.pending_inline_ring = true;
            self.cleared = false;
            return Ok(());
        }
        if self.cleared {
            self.pending_inline_ring = true;
        }
        if !self.pending_inline_ring {
            return Err(self.invalid("ring notation started without '-' denotion"));
        }
        self.pending_inline_ring = false;
        self.block_start = self.i;
        self.pending_closure = true;
        self.cleared = false;
        Ok(())
    }

    fn on_chelate_open(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        if self.peek(1) == Some(b'-') && matches!(self.peek(2), Some(b'T') | Some(b'L')) {
            self.pending_ring_in_ring = true;
            self.i += 1;
            self.pending_inline_ring = true;
            self.cleared = false;
            return Ok(());
        }
        if self.i == 0 {
            self.pending_inline_ring = true;
        }
        if !self.pending_inline_ring {
            return Err(self.invalid("chelating ring notation started without '-' denotion"));
        }
        self.pending_inline_ring = false;
        self.block_start = self.i;
        self.pending_closure = true;
        self.cleared = false;
        Ok(())
    }

    fn on_ring_close(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure && self.j_skips {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        let closes = self.pending_closure
            && (self.i == self.bytes.len() - 1
                || (matches!(self.peek(1), Some(b' ') | Some(b'&'))
                    && self.i > 0
                    && self.bytes[self.i - 1] != b' '));
        if closes {
            let block_start = self.block_start;
            let notation = self.notation;
            let block = &notation[block_start..=self.i];
            let ring_id = self.graph.add_ring().map_err(|k| self.fail(k))?;

            if self.pending_spiro {
                let prev = self
                    .prev
                    .ok_or_else(|| self.invalid("spiro attachment without a previous atom"))?;
                if self.on_locant == 0 {
                    return Err(self.invalid("spiro attachment without a locant"));
                }
                // Pre-seat the shared atom, shifting a double bond away when
                // the position cannot take two more ring bonds.
                if self.graph.symbol(prev).free_valence() < 2 {
                    self.shift_spiro_double_bond(prev)?;
                }
                let loc = self.on_locant;
                self.graph.ring_mut(ring_id).locants.insert(loc, prev);
                ring::form_ring(&mut self.graph, ring_id, block, block_start, Some(loc))?;
            } else {
                ring::form_ring(&mut self.graph, ring_id, block, block_start, None)?;
            }

            if self.pending_ring_in_ring && self.wrap_ring.is_none() {
                self.wrap_ring = Some(ring_id);
            }
            self.stack.push_ring(ring_id);
            self.ring = Some(ring_id);
            self.block_start = 0;

            if self.pending_spiro {
                self.pending_spiro = false;
            } else if let Some(prev) = self.prev {
                if self.on_locant != 0 && self.on_locant != b'0' {
                    let target = self
                        .graph
                        .ring(ring_id)
                        .locants
                        .get(&self.on_locant)
                        .copied()
                        .ok_or_else(|| {
                            self.fail(ParseErrorKind::LocantOutOfRange(
                                "attaching inline ring with out of bounds locant assignment".into(),
                            ))
                        })?;
                    self.bond_direct(target, prev)?;
                }
            }

            self.on_locant = 0;
            self.pending_closure = false;
        }
        self.cleared = false;
        Ok(())
    }

    /// Saturates the first double bond on the spiro atom and re-places it
    /// between the shifted neighbour and its next locant (wrapping to `A`).
    fn shift_spiro_double_bond(&mut self, prev: AtomId) -> Result<(), ParseError> {
        let outer = self
            .stack
            .ring()
            .ok_or_else(|| self.invalid("spiro attachment outside a ring"))?;
        let double = self
            .graph
            .children(prev)
            .find(|&(edge, _)| self.graph.edge(edge).order == 2);
        let Some((edge, shift)) = double else {
            return Err(self.fail(ParseErrorKind::ValenceExceeded {
                code: self.graph.symbol(prev).code as char,
                edges: self.graph.symbol(prev).num_edges + 2,
                cap: self.graph.symbol(prev).allowed_edges,
            }));
        };
        self.graph.saturate(edge, 1);

        let record = self.graph.ring(outer);
        let loc = record.locant_of.get(&shift).copied().ok_or_else(|| {
            self.fail(ParseErrorKind::RingClosure(
                "spiro double bond shifted onto a non-ring atom".into(),
            ))
        })?;
        let mut next_loc = loc + 1;
        if crate::core::locant_index(next_loc) > record.size {
            next_loc = b'A';
        }
        let neighbour = record.locants.get(&next_loc).copied().ok_or_else(|| {
            self.fail(ParseErrorKind::LocantOutOfRange(
                "spiro double bond has no next locant to move to".into(),
            ))
        })?;
        let moved = self
            .graph
            .search_edge(neighbour, shift)
            .ok_or_else(|| {
                self.fail(ParseErrorKind::RingClosure(
                    "spiro double bond has no adjacent ring bond".into(),
                ))
            })?;
        self.graph.unsaturate(moved, 1).map_err(|k| self.fail(k))
    }

    fn on_benzene(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_locant {
            self.ring_locant_target(ch)?;
            self.cleared = false;
            return Ok(());
        }
        self.on_locant = 0;
        let ring_id = self.graph.add_ring().map_err(|k| self.fail(k))?;
        ring::form_ring(&mut self.graph, ring_id, "L6J", self.i, None)?;
        self.stack.push_ring(ring_id);
        self.ring = Some(ring_id);

        let target = self.graph.ring(ring_id).locants[&b'A'];
        self.curr = Some(target);
        if let Some(prev) = self.prev {
            self.bond_direct(target, prev)?;
        }
        self.graph.record_position(self.i, target);
        self.prev = Some(target);
        self.cleared = false;
        Ok(())
    }

    fn on_space(&mut self) -> Result<(), ParseError> {
        if self.pending_closure {
            self.j_skips = false;
            return Ok(());
        }
        if !self.stack.is_empty() && !self.pending_inline_ring {
            self.stack.pop_to_ring();
        }
        if self.peek(1) == Some(b'&') || self.stack.ring().is_some() {
            self.pending_locant = true;

            // a bare ring locant before another field is an implied methyl
            if self.on_locant != 0 && !self.pending_inline_ring {
                self.attach_implied_methyl()?;
                self.on_locant = 0;
            }
        } else if !self.options.lenient {
            return Err(self.invalid("space used outside ring and ionic notation"));
        }
        Ok(())
    }

    fn attach_implied_methyl(&mut self) -> Result<(), ParseError> {
        let target = self
            .stack
            .ring()
            .and_then(|r| self.graph.ring(r).locants.get(&self.on_locant).copied())
            .ok_or_else(|| self.invalid("could not attach implied methyl to ring"))?;
        add_methyl(&mut self.graph, target).map_err(|k| self.fail(k))?;
        Ok(())
    }

    fn on_pop(&mut self) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_inline_ring {
            // spiro notation open
            self.pending_spiro = true;
            return Ok(());
        }
        if self.pending_locant {
            // ionic clear: reset the chain for a new fragment
            self.prev = None;
            self.curr = None;
            self.ring = None;
            self.pending_locant = false;
            self.cleared = true;
            self.stack.clear();
            return Ok(());
        }
        if self.on_locant != 0 {
            if let (Some(curr), Some(ring)) = (self.curr, self.ring) {
                if self.graph.ring(ring).locants.get(&self.on_locant) == Some(&curr) {
                    self.on_locant += LOCANT_WIDENING;
                    let expanded = self
                        .graph
                        .ring(ring)
                        .locants
                        .get(&self.on_locant)
                        .copied()
                        .ok_or_else(|| {
                            self.fail(ParseErrorKind::LocantOutOfRange(
                                "could not fetch expanded locant position - out of range".into(),
                            ))
                        })?;
                    self.curr = Some(expanded);
                    self.prev = Some(expanded);
                }
            }
            return Ok(());
        }
        if self.peek(1) == Some(b' ') {
            // this must be a ring pop, no matter what
            if self.stack.is_empty() || self.stack.ring().is_none() {
                return Err(self.invalid(
                    "'&' followed by a space indicates a ring pop, are there any rings?",
                ));
            }
            self.stack.pop_to_ring();
            self.stack.pop();
            self.ring = self.stack.ring();
            self.prev = self
                .stack
                .next_branch_symbol(&self.graph)
                .or(self.stack.branch());
            return Ok(());
        }
        if self.stack.is_empty() {
            return Err(self.invalid("popping too many rings|symbols, check '&' count"));
        }
        match self.stack.top() {
            Some(Frame::Ring(_)) => {
                self.stack.pop();
                self.prev = self
                    .stack
                    .next_branch_symbol(&self.graph)
                    .or(self.stack.branch());
                self.ring = self.stack.ring();
            }
            Some(Frame::Branch(top)) => {
                if self.prev == Some(top) {
                    match self.graph.symbol(top).code {
                        // methyl contractions
                        b'Y' => {
                            if self.graph.count_children(top) < 3 {
                                add_methyl(&mut self.graph, top).map_err(|k| self.fail(k))?;
                                self.prev = self.stack.next_branch_symbol(&self.graph);
                            } else {
                                self.stack.pop();
                                self.prev = self.stack.branch();
                            }
                        }
                        b'X' | b'K' => {
                            if self.graph.symbol(top).is_open() {
                                add_methyl(&mut self.graph, top).map_err(|k| self.fail(k))?;
                                self.prev = self.stack.next_branch_symbol(&self.graph);
                            } else {
                                self.stack.pop();
                                self.prev = self.stack.branch();
                            }
                        }
                        _ => {
                            self.stack.pop();
                            self.prev = self
                                .stack
                                .next_branch_symbol(&self.graph)
                                .or(self.stack.branch());
                        }
                    }
                } else {
                    // a closure is done; return to the first open symbol
                    self.prev = self.stack.next_branch_symbol(&self.graph);
                    if matches!(self.stack.top(), Some(Frame::Ring(_))) {
                        self.stack.pop();
                    }
                    if self.prev.is_none() {
                        self.prev = self.stack.branch();
                    }
                }
            }
            None => {
                return Err(self.invalid("popping too many rings|symbols, check '&' count"));
            }
        }
        Ok(())
    }

    fn on_dash(&mut self) -> Result<(), ParseError> {
        if self.pending_closure {
            return Ok(());
        }
        if self.pending_inline_ring {
            if self.pending_ring_in_ring {
                return self.wrap_macro_ring();
            }
            return Err(self.invalid("only one pending ring can be active, check closures"));
        }

        let mut special = String::new();
        let mut gap = 0usize;
        let mut found_next = false;
        let mut j = self.i + 1;
        while j < self.bytes.len() {
            match self.bytes[j] {
                b' ' => break,
                b'-' => {
                    found_next = true;
                    break;
                }
                other => {
                    special.push(other as char);
                    gap += 1;
                    j += 1;
                }
            }
        }

        if !found_next {
            self.pending_inline_ring = true;
            let _ = self.stack.next_branch_symbol(&self.graph);
            if self.stack.branch().is_some() && self.prev.is_none() {
                while self.stack.top().is_some()
                    && self.stack.top() != self.stack.branch().map(Frame::Branch)
                {
                    self.stack.pop();
                }
                self.prev = self.stack.next_branch_symbol(&self.graph);
            }
            self.cleared = false;
            return Ok(());
        }

        let curr = match gap {
            1 => {
                let code = special.as_bytes()[0];
                let ceiling = elements::hypervalent_ceiling(code).ok_or_else(|| {
                    self.invalid(format!(
                        "character {} does not need - notation for valence expansion",
                        code as char
                    ))
                })?;
                self.graph
                    .add_symbol(code, ceiling)
                    .map_err(|k| self.fail(k))?
            }
            2 => {
                if elements::lookup(&special).is_none() {
                    return Err(self.invalid(format!(
                        "invalid element symbol in special definition - {special}"
                    )));
                }
                let atom = self
                    .graph
                    .add_symbol(CODE_ELEMENT, 8)
                    .map_err(|k| self.fail(k))?;
                self.graph.symbol_mut(atom).element = Some(special);
                if self.on_locant == b'0' {
                    self.graph.symbol_mut(atom).charge += 1;
                }
                atom
            }
            other => {
                return Err(self.invalid(format!(
                    "special '-' must be either 1 or 2 symbols - {other} seen"
                )));
            }
        };
        self.curr = Some(curr);
        self.attach_to_prev(curr)?;
        self.on_locant = 0;
        self.stack.push_branch(curr);

        self.i += gap + 1;
        self.graph.record_position(self.i - gap, curr);
        self.pending_unsaturate = 0;
        self.prev = Some(curr);
        self.cleared = false;
        Ok(())
    }

    /// Closes a ring-in-ring: bond the current chain back to the wrap ring's
    /// remembered locant and skip ahead to the block's `J`.
    fn wrap_macro_ring(&mut self) -> Result<(), ParseError> {
        if self.on_locant != b'0' {
            let wrap = self
                .wrap_ring
                .ok_or_else(|| self.invalid("cannot access looping ring structure"))?;
            let target = self
                .graph
                .ring(wrap)
                .locants
                .get(&self.on_locant)
                .copied()
                .ok_or_else(|| self.invalid("cannot access looping ring structure"))?;
            self.curr = Some(target);
            if self.prev.is_none() {
                return Err(self.invalid("ring wrap without a previous atom"));
            }
            self.attach_to_prev(target)?;
            self.on_locant = 0;
        }
        while self.i < self.bytes.len() && self.bytes[self.i] != b'J' {
            self.i += 1;
        }
        self.pending_ring_in_ring = false;
        self.pending_inline_ring = false;
        self.cleared = false;
        Ok(())
    }

    fn on_slash(&mut self) -> Result<(), ParseError> {
        if self.pending_closure {
            self.j_skips = true;
            return Ok(());
        }
        Err(self.invalid("multipliers are not currently supported"))
    }

    fn finish(mut self) -> Result<WlnGraph, ParseError> {
        let end = self.bytes.len();

        // trailing bare ring locant carries an implied methyl
        if self.on_locant != 0
            && self.on_locant != b'0'
            && !self.pending_inline_ring
            && !self.stack.is_empty()
        {
            self.attach_implied_methyl()
                .map_err(|e| e.kind.at(end.saturating_sub(1)))?;
            self.on_locant = 0;
        }

        if self.pending_closure {
            return Err(ParseErrorKind::RingClosure("expected 'J' to close ring".into()).at(end));
        }
        if self.pending_locant {
            return Err(
                ParseErrorKind::InvalidState("expected locant to attach to ring".into()).at(end),
            );
        }
        if self.pending_inline_ring {
            return Err(
                ParseErrorKind::InvalidState("expected inline ring to be defined".into()).at(end),
            );
        }
        if self.pending_spiro {
            return Err(
                ParseErrorKind::InvalidState("expected spiro ring to be defined".into()).at(end),
            );
        }
        if self.pending_ring_in_ring {
            return Err(ParseErrorKind::MacroRing.at(end));
        }

        charges::apply(&mut self.graph, &self.charges).map_err(|k| k.at(end))?;
        Ok(self.graph)
    }
}
