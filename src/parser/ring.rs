//! Ring-block scanner: turns the text between `L`/`T`/`D` and its closing
//! `J` into a [`RingForm`] and drives the cyclic builder with it.
//!
//! The block grammar is positional. A locant letter set by a space (or the
//! implied `A` position) addresses where the next heteroatom, unsaturation,
//! bridge, or broken-locant modifier lands; digits add fused components;
//! `&` either widens the previous locant by 23 or opens the trailing
//! aromaticity list. The scanner allocates heteroatoms straight into the
//! ring's locant map so the builder can chain around them.

use std::collections::BTreeSet;

use super::cyclic;
use crate::core::error::{ParseError, ParseErrorKind};
use crate::core::graph::{CODE_ELEMENT, WlnGraph};
use crate::core::{
    LOCANT_WIDENING, Locant, MAX_LOCANT, RingId, locant_from_index, relative_position,
};
use crate::elements;

/// Everything a ring block declares, collected before any cycle is formed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RingForm {
    /// Fused sub-rings as (size, start locant), in notation order.
    pub components: Vec<(usize, Locant)>,
    /// Per-component aromaticity; padded at `J` when left implicit.
    pub aromaticity: Vec<bool>,
    /// Locants declared by a multicyclic `<n>ABC...` prefix.
    pub multicyclic: Vec<Locant>,
    /// Flattened `/XY` pairs, bonded out of turn during the build.
    pub pseudo: Vec<Locant>,
    /// Broken (relative) positions created by `-` locant modifiers.
    pub broken: BTreeSet<Locant>,
    /// Positions whose connection budget is pre-decremented.
    pub bridges: BTreeSet<Locant>,
    /// Explicit total size from a multicyclic suffix letter.
    pub size_spec: Option<Locant>,
    /// Opened with `T` or `D`; controls heteroatom warnings.
    pub heterocyclic: bool,
    /// Opened with `D`.
    pub chelate: bool,
    /// In-ring `U` double-bond requests as locant pairs.
    pub unsaturations: Vec<(Locant, Locant)>,
    /// In-ring `H` saturation requests as locant pairs.
    pub saturations: Vec<(Locant, Locant)>,
    /// Pi-bond charges registered by `0` markers.
    pub post_charges: Vec<(Locant, i32)>,
}

/// Parses one ring block and materialises the ring into the graph.
///
/// `block` spans the opening `L`/`T`/`D` through the closing `J`; `start` is
/// its offset inside the full notation, used for diagnostics and source
/// positions. `spiro` names a pre-seated locant the scanner must skip over.
///
/// Returns the final ring size.
pub(crate) fn form_ring(
    graph: &mut WlnGraph,
    ring: RingId,
    block: &str,
    start: usize,
    spiro: Option<Locant>,
) -> Result<usize, ParseError> {
    let scanner = BlockScanner {
        graph: &mut *graph,
        ring,
        spiro,
        bytes: block.as_bytes(),
        start,
        form: RingForm::default(),
        warned: false,
        state_multi: 0,
        state_pseudo: false,
        state_aromatics: false,
        implied_used: false,
        expected_locants: 0,
        evaluating_break: false,
        positional: 0,
        last_locant_position: None,
        i: 0,
    };
    let (form, warned) = scanner.scan()?;
    if warned {
        graph.warnings.push(
            "heterocyclic ring notation required for inter atom assignment, \
             change starting 'L' to 'T'"
                .into(),
        );
    }

    let end = start + block.len().saturating_sub(1);
    let size = cyclic::build(graph, ring, &form).map_err(|kind| kind.at(end))?;

    let record = graph.ring_mut(ring);
    record.size = size;
    record.components = form.components.clone();
    record.aromaticity = form.aromaticity.clone();

    for &(loc, delta) in &form.post_charges {
        let atom = graph
            .ring(ring)
            .locants
            .get(&loc)
            .copied()
            .ok_or_else(|| {
                ParseErrorKind::LocantOutOfRange(
                    "pi-bond charge names a position outside the ring".into(),
                )
                .at(end)
            })?;
        graph.symbol_mut(atom).charge += delta;
    }

    post_unsaturate(graph, ring, &form.unsaturations, size).map_err(|k| k.at(end))?;
    post_saturate(graph, ring, &form.saturations, size).map_err(|k| k.at(end))?;
    Ok(size)
}

/// Applies in-ring `U` requests: raises each named bond and strips it from
/// aromatic consideration. A pair running past the last locant wraps onto
/// the closing `A` bond.
fn post_unsaturate(
    graph: &mut WlnGraph,
    ring: RingId,
    bonds: &[(Locant, Locant)],
    size: usize,
) -> Result<(), ParseErrorKind> {
    for &(mut loc_1, mut loc_2) in bonds {
        if loc_2 > locant_from_index(size) {
            loc_1 = b'A';
            loc_2 -= 1;
        }
        let edge = locant_edge(graph, ring, loc_1, loc_2)?;
        graph.unsaturate(edge, 1)?;
        graph.edge_mut(edge).aromatic = false;
    }
    Ok(())
}

/// Applies in-ring `H` requests: strips the named bond from aromatic
/// consideration without touching its order.
fn post_saturate(
    graph: &mut WlnGraph,
    ring: RingId,
    bonds: &[(Locant, Locant)],
    size: usize,
) -> Result<(), ParseErrorKind> {
    for &(mut loc_1, mut loc_2) in bonds {
        if loc_2 > locant_from_index(size) {
            loc_1 = b'A';
            loc_2 -= 1;
        }
        let edge = locant_edge(graph, ring, loc_1, loc_2)?;
        graph.edge_mut(edge).aromatic = false;
    }
    Ok(())
}

fn locant_edge(
    graph: &WlnGraph,
    ring: RingId,
    loc_1: Locant,
    loc_2: Locant,
) -> Result<crate::core::EdgeId, ParseErrorKind> {
    let record = graph.ring(ring);
    let a = record.locants.get(&loc_1).copied();
    let b = record.locants.get(&loc_2).copied();
    a.zip(b)
        .and_then(|(a, b)| graph.search_edge(a, b))
        .ok_or_else(|| {
            ParseErrorKind::RingClosure("failed on post ring bond (un)/saturation".into())
        })
}

struct BlockScanner<'a, 'g> {
    graph: &'g mut WlnGraph,
    ring: RingId,
    spiro: Option<Locant>,
    bytes: &'a [u8],
    start: usize,
    form: RingForm,
    warned: bool,
    /// 0 closed, 1 reading multicyclic locants, 2 expecting the size letter,
    /// 3 size read.
    state_multi: u8,
    state_pseudo: bool,
    state_aromatics: bool,
    implied_used: bool,
    expected_locants: u8,
    evaluating_break: bool,
    /// Current positional locant; 0 when unset.
    positional: Locant,
    last_locant_position: Option<usize>,
    i: usize,
}

impl BlockScanner<'_, '_> {
    fn scan(mut self) -> Result<(RingForm, bool), ParseError> {
        while self.i < self.bytes.len() {
            let ch = self.bytes[self.i];
            match ch {
                b' ' => self.on_space()?,
                b'&' => self.on_widen()?,
                b'/' => self.on_pseudo_open()?,
                b'-' => self.on_dash()?,
                b'0' => self.on_pi_charge()?,
                b'1'..=b'9' => self.on_digit(ch)?,
                b'L' => self.on_carbocyclic(ch)?,
                b'T' => self.on_heterocyclic(ch)?,
                b'J' => self.on_close(ch)?,
                b'A'..=b'Z' => self.on_letter(ch)?,
                other => {
                    return Err(ParseErrorKind::InvalidCharacter(other as char).at(self.offset()));
                }
            }
            self.i += 1;
        }
        Ok((self.form, self.warned))
    }

    fn offset(&self) -> usize {
        self.start + self.i
    }

    fn fail(&self, kind: ParseErrorKind) -> ParseError {
        kind.at(self.offset())
    }

    fn invalid(&self, message: impl Into<String>) -> ParseError {
        self.fail(ParseErrorKind::InvalidState(message.into()))
    }

    fn aromatics_reject(&self, ch: u8) -> ParseError {
        self.invalid(format!(
            "character '{}' cannot be in the aromaticity assignment block",
            ch as char
        ))
    }

    /// Whether a bare letter between spaces (or before the trailing `TJ`)
    /// declares a bridge locant.
    fn bridge_position(&self) -> bool {
        self.i > 0
            && self.i + 1 < self.bytes.len()
            && self.bytes[self.i - 1] == b' '
            && matches!(self.bytes[self.i + 1], b' ' | b'T' | b'J')
    }

    fn after_space(&self) -> bool {
        self.i > 0 && self.bytes[self.i - 1] == b' '
    }

    /// Folds a pending `-` break into whichever list the surrounding state
    /// selects; bridge fallback only where the original grammar allows it.
    fn resolve_break(&mut self, multi: bool, pseudo: bool, bridge_fallback: bool) {
        if !self.evaluating_break {
            return;
        }
        self.form.broken.insert(self.positional);
        if multi {
            if let Some(last) = self.form.multicyclic.last_mut() {
                *last = self.positional;
            }
        } else if pseudo {
            if let Some(last) = self.form.pseudo.last_mut() {
                *last = self.positional;
            }
        } else if bridge_fallback {
            self.form.bridges.insert(self.positional);
        }
        self.evaluating_break = false;
    }

    fn on_space(&mut self) -> Result<(), ParseError> {
        if self.state_multi == 3 {
            self.state_multi = 0;
        }
        if self.evaluating_break {
            self.form.broken.insert(self.positional);
            if self.state_multi >= 1 {
                if let Some(last) = self.form.multicyclic.last_mut() {
                    *last = self.positional;
                }
                self.state_multi = 2;
            } else if self.state_pseudo {
                if let Some(last) = self.form.pseudo.last_mut() {
                    *last = self.positional;
                }
            } else {
                self.form.bridges.insert(self.positional);
            }
            self.evaluating_break = false;
        }
        if self.expected_locants > 0 {
            return Err(self.invalid(format!(
                "{} locants expected before space character",
                self.expected_locants
            )));
        } else if self.state_multi == 1 {
            self.state_multi = 2;
        }
        self.state_pseudo = false;
        self.positional = 0;
        Ok(())
    }

    fn on_widen(&mut self) -> Result<(), ParseError> {
        if self.state_aromatics {
            self.form.aromaticity.push(true);
            return Ok(());
        }
        if self.state_multi == 3 {
            let spec = self.form.size_spec.unwrap_or(0);
            if spec as usize + LOCANT_WIDENING as usize > MAX_LOCANT as usize {
                return Err(self.fail(ParseErrorKind::LocantOutOfRange(
                    "expanded ring size is exceeding the 252 locant space".into(),
                )));
            }
            self.form.size_spec = Some(spec + LOCANT_WIDENING);
        } else if self.state_pseudo {
            if let Some(last) = self.form.pseudo.last_mut() {
                if *last as usize + LOCANT_WIDENING as usize > MAX_LOCANT as usize {
                    return Err(self.fail(ParseErrorKind::LocantOutOfRange(
                        "expanded pseudo locant is exceeding the 252 locant space".into(),
                    )));
                }
                *last += LOCANT_WIDENING;
            }
        } else if self.positional != 0 {
            // Only an immediate extension widens the branch locant; anything
            // else starts the aromaticity list.
            if self.last_locant_position == Some(self.i.wrapping_sub(1)) {
                if self.positional as usize + LOCANT_WIDENING as usize > MAX_LOCANT as usize {
                    return Err(self.fail(ParseErrorKind::LocantOutOfRange(
                        "expanded locant is exceeding the 252 locant space".into(),
                    )));
                }
                self.positional += LOCANT_WIDENING;
            } else {
                self.state_aromatics = true;
                self.form.aromaticity.push(true);
            }
        } else {
            self.state_aromatics = true;
            self.form.aromaticity.push(true);
        }
        Ok(())
    }

    fn on_pseudo_open(&mut self) -> Result<(), ParseError> {
        if self.state_aromatics {
            return Err(self.aromatics_reject(b'/'));
        }
        self.expected_locants = 2;
        self.state_pseudo = true;
        Ok(())
    }

    fn on_pi_charge(&mut self) -> Result<(), ParseError> {
        // The minus charge lands on the first position after the preceding
        // components; single-component rings hard-code locant B.
        if self.form.components.is_empty() {
            return Err(self.invalid("pi-bond charge marked before any ring component"));
        }
        if self.form.components.len() == 1 {
            self.form.post_charges.push((b'B', -1));
        } else {
            let track: usize = self.form.components[..self.form.components.len() - 1]
                .iter()
                .map(|component| component.0)
                .sum();
            self.form
                .post_charges
                .push((locant_from_index(track + 1), -1));
        }
        Ok(())
    }

    fn on_digit(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.state_aromatics {
            return Err(self.aromatics_reject(ch));
        }
        let multi = self.state_multi == 1;
        let pseudo = self.state_pseudo;
        self.resolve_break(multi, pseudo, false);

        if self.i > 1 && self.bytes[self.i - 1] == b' ' {
            self.state_multi = 1;
            self.expected_locants = ch - b'0';
        } else {
            let loc = if self.positional != 0 {
                self.positional
            } else {
                b'A'
            };
            self.form.components.push(((ch - b'0') as usize, loc));
            self.positional = 0;
        }
        Ok(())
    }

    /// Consumes one expected multicyclic/pseudo locant letter; returns
    /// whether the letter was eaten.
    fn consume_expected(&mut self, ch: u8) -> Result<bool, ParseError> {
        if self.expected_locants == 0 {
            return Ok(false);
        }
        if self.state_multi >= 1 {
            self.form.multicyclic.push(ch);
        } else if self.state_pseudo {
            self.form.pseudo.push(ch);
        } else {
            return Err(self.invalid("unhandled locant rule"));
        }
        self.positional = ch;
        self.expected_locants -= 1;
        Ok(true)
    }

    fn on_letter(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.i == 0 && ch == b'D' {
            self.form.chelate = true;
            self.form.heterocyclic = true;
            return Ok(());
        }
        if self.state_aromatics {
            return Err(self.aromatics_reject(ch));
        }
        let multi = self.state_multi == 1 && self.expected_locants > 0;
        let pseudo = self.state_pseudo && self.expected_locants > 0;
        self.resolve_break(multi, pseudo, false);

        if self.consume_expected(ch)? {
            return Ok(());
        }
        if self.state_multi == 2 {
            self.form.size_spec = Some(ch);
            self.state_multi = 3;
            return Ok(());
        }
        if self.positional != 0 {
            return self.place_symbol(ch);
        }
        if self.bridge_position() {
            if self.form.components.is_empty() {
                return Err(self.invalid("assigning bridge locants without a ring"));
            }
            self.form.bridges.insert(ch);
            return Ok(());
        }
        if self.after_space() {
            self.positional = ch;
            self.last_locant_position = Some(self.i);
            return Ok(());
        }
        self.implied_used = true;
        self.positional = b'A';
        self.place_symbol(ch)
    }

    fn on_carbocyclic(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.state_aromatics {
            return Err(self.aromatics_reject(ch));
        }
        let multi = self.state_multi == 1 && self.expected_locants > 0;
        let pseudo = self.state_pseudo && self.expected_locants > 0;
        self.resolve_break(multi, pseudo, false);

        if self.i == 0 {
            self.form.heterocyclic = false;
            return Ok(());
        }
        if self.consume_expected(ch)? {
            return Ok(());
        }
        if self.state_multi == 2 {
            self.form.size_spec = Some(ch);
            self.state_multi = 3;
            return Ok(());
        }
        if self.bridge_position() {
            if self.form.components.is_empty() {
                return Err(self.invalid("assigning bridge locants without a ring"));
            }
            self.form.bridges.insert(ch);
            return Ok(());
        }
        if self.after_space() {
            self.positional = ch;
            self.last_locant_position = Some(self.i);
            return Ok(());
        }
        Err(self.invalid("symbol 'L' is in an unhandled state"))
    }

    fn on_heterocyclic(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.state_aromatics {
            self.form.aromaticity.push(false);
            return Ok(());
        }
        let multi = self.state_multi >= 1 && self.expected_locants > 0;
        let pseudo = self.state_pseudo && self.expected_locants > 0;
        self.resolve_break(multi, pseudo, true);

        if self.i == 0 {
            self.form.heterocyclic = true;
            return Ok(());
        }
        if self.consume_expected(ch)? {
            return Ok(());
        }
        if self.state_multi == 2 {
            self.form.size_spec = Some(ch);
            self.state_multi = 3;
            return Ok(());
        }
        if self.bridge_position() {
            if self.form.components.is_empty() {
                return Err(self.invalid("assigning bridge locants without a ring"));
            }
            self.form.bridges.insert(ch);
            return Ok(());
        }
        if self.after_space() && self.bytes.get(self.i + 1) != Some(&b'J') {
            self.positional = ch;
            self.last_locant_position = Some(self.i);
            return Ok(());
        }
        self.state_aromatics = true;
        self.form.aromaticity.push(false);
        Ok(())
    }

    fn on_close(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.state_aromatics {
            self.state_aromatics = false;
        }
        let multi = self.state_multi >= 1 && self.expected_locants > 0;
        let pseudo = self.state_pseudo && self.expected_locants > 0;
        self.resolve_break(multi, pseudo, true);

        if self.i == self.bytes.len() - 1 {
            if self.form.components.is_empty() {
                return Err(self.fail(ParseErrorKind::RingClosure(
                    "error in reading ring components, check numerals in ring notation".into(),
                )));
            }
            if self.form.aromaticity.len() == 1 && !self.form.aromaticity[0] {
                while self.form.aromaticity.len() < self.form.components.len() {
                    self.form.aromaticity.push(false);
                }
            } else if self.form.aromaticity.is_empty() {
                while self.form.aromaticity.len() < self.form.components.len() {
                    self.form.aromaticity.push(true);
                }
            }
            if self.form.components.len() != self.form.aromaticity.len() {
                return Err(self.fail(ParseErrorKind::RingClosure(format!(
                    "mismatch between number of rings and aromatic assignments - {} vs expected {}",
                    self.form.aromaticity.len(),
                    self.form.components.len()
                ))));
            }
            return Ok(());
        }
        if self.consume_expected(ch)? {
            return Ok(());
        }
        if self.state_multi == 2 {
            self.form.size_spec = Some(ch);
            self.state_multi = 3;
            return Ok(());
        }
        if self.bridge_position() {
            if self.form.components.is_empty() {
                return Err(self.invalid("assigning bridge locants without a ring"));
            }
            self.form.bridges.insert(ch);
            return Ok(());
        }
        if self.after_space() {
            self.positional = ch;
            self.last_locant_position = Some(self.i);
            return Ok(());
        }
        Err(self.invalid("symbol 'J' is in an unhandled state"))
    }

    fn on_dash(&mut self) -> Result<(), ParseError> {
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
        // Inside a locant list the dash can only be a break modifier.
        if (self.state_multi != 0 || self.state_pseudo) && self.expected_locants > 0 {
            gap = 0;
        }

        if found_next {
            match gap {
                0 => self.break_positional(),
                1 => {
                    if !self.implied_used && self.positional == 0 {
                        self.implied_used = true;
                        self.positional = b'A';
                    }
                    if self.settle_element_position() {
                        let code = special.as_bytes()[0];
                        let ceiling = elements::hypervalent_ceiling(code).ok_or_else(|| {
                            self.invalid(format!(
                                "character {} does not need - notation for valence expansion",
                                code as char
                            ))
                        })?;
                        let atom = self
                            .graph
                            .add_symbol(code, ceiling)
                            .map_err(|k| k.at(self.offset()))?;
                        self.graph.assign_locant(self.ring, self.positional, atom);
                        self.graph.record_position(self.start + self.i + 1, atom);
                    }
                    self.i += 2;
                    Ok(())
                }
                2 => {
                    if !self.implied_used && self.positional == 0 {
                        self.implied_used = true;
                        self.positional = b'A';
                    }
                    if special.as_bytes()[0].is_ascii_digit() {
                        if !special.bytes().all(|b| b.is_ascii_digit()) {
                            return Err(self.invalid(
                                "mixing numerical and alphabetical special definitions \
                                 is not allowed",
                            ));
                        }
                        let size: usize = special
                            .parse()
                            .map_err(|_| self.invalid("unreadable big-ring size"))?;
                        let loc = if self.positional != 0 {
                            self.positional
                        } else {
                            b'A'
                        };
                        self.form.components.push((size, loc));
                        self.positional = 0;
                    } else if self.settle_element_position() {
                        if elements::lookup(&special).is_none() {
                            return Err(self.invalid(format!(
                                "invalid element symbol in special definition - {special}"
                            )));
                        }
                        let atom = self
                            .graph
                            .add_symbol(CODE_ELEMENT, 8)
                            .map_err(|k| k.at(self.offset()))?;
                        self.graph.symbol_mut(atom).element = Some(special);
                        self.graph.assign_locant(self.ring, self.positional, atom);
                        self.graph.record_position(self.start + self.i + 1, atom);
                    }
                    self.i += 3;
                    Ok(())
                }
                _ => Err(self.invalid(format!(
                    "{gap} numerals incased in '-' brackets is unreasonable for WLN to create"
                ))),
            }
        } else if self.i > 0 && self.bytes[self.i - 1] == b'&' {
            self.state_aromatics = true;
            Ok(())
        } else {
            self.break_positional()
        }
    }

    /// Turns the current positional locant into a broken (relative)
    /// position; repeated breaks step a further 46 across.
    fn break_positional(&mut self) -> Result<(), ParseError> {
        self.evaluating_break = true;
        if self.positional == 0 {
            return Err(self.invalid("trying to branch out character without starting point"));
        }
        if self.positional < 128 {
            self.positional = relative_position(self.positional).ok_or_else(|| {
                self.fail(ParseErrorKind::LocantOutOfRange(
                    "relative position is exceeding the 252 allowed space".into(),
                ))
            })?;
        } else {
            if self.positional as usize + 46 > MAX_LOCANT as usize {
                return Err(self.fail(ParseErrorKind::LocantOutOfRange(
                    "branching locants are exceeding the 252 space restriction".into(),
                )));
            }
            self.positional += 46;
        }
        self.last_locant_position = Some(self.i);
        Ok(())
    }

    /// Spiro/taken-position dance for `-X-` and `-XX-` assignments; returns
    /// whether an atom should actually be placed.
    fn settle_element_position(&mut self) -> bool {
        if let Some(spiro) = self.spiro {
            if self.positional == spiro {
                self.positional += 1;
                return false;
            }
            if self
                .graph
                .ring(self.ring)
                .locants
                .contains_key(&self.positional)
            {
                self.positional += 1;
                if self.positional == spiro {
                    self.positional += 1;
                    return false;
                }
            }
        } else if self
            .graph
            .ring(self.ring)
            .locants
            .contains_key(&self.positional)
        {
            self.positional += 1;
        }
        true
    }

    /// Advances past an occupied position, then skips a spiro seat; returns
    /// whether an atom should actually be placed.
    fn settle_symbol_position(&mut self) -> bool {
        if self
            .graph
            .ring(self.ring)
            .locants
            .contains_key(&self.positional)
        {
            self.positional += 1;
        }
        if self.spiro == Some(self.positional) {
            self.positional += 1;
            return false;
        }
        true
    }

    fn place_atom(&mut self, ch: u8, allowed: u8) -> Result<(), ParseError> {
        let atom = self
            .graph
            .add_symbol(ch, allowed)
            .map_err(|k| k.at(self.offset()))?;
        self.graph.assign_locant(self.ring, self.positional, atom);
        self.graph.record_position(self.offset(), atom);
        Ok(())
    }

    /// Assigns one in-ring symbol at the current positional locant.
    fn place_symbol(&mut self, ch: u8) -> Result<(), ParseError> {
        if self.spiro == Some(self.positional) {
            self.positional += 1;
            return Ok(());
        }
        match ch {
            b'D' => {
                // Open chelating bond; only chelate blocks may write it.
                if !self.form.chelate {
                    return Err(self.invalid(
                        "D is not allowed as an atom assignment within ring notation",
                    ));
                }
                Ok(())
            }
            b'S' | b'P' => {
                if !self.form.heterocyclic {
                    self.warned = true;
                }
                if !self.settle_symbol_position() {
                    return Ok(());
                }
                self.place_atom(ch, if ch == b'P' { 5 } else { 6 })
            }
            b'Y' | b'X' | b'K' => {
                if !self.form.heterocyclic && ch == b'K' {
                    self.warned = true;
                }
                if !self.settle_symbol_position() {
                    return Ok(());
                }
                self.place_atom(ch, 4)
            }
            b'Z' | b'N' | b'B' => {
                if !self.form.heterocyclic {
                    self.warned = true;
                }
                if !self.settle_symbol_position() {
                    return Ok(());
                }
                self.place_atom(ch, 3)
            }
            b'M' | b'O' | b'V' => {
                if !self.form.heterocyclic && (ch == b'M' || ch == b'O') {
                    self.warned = true;
                }
                if self
                    .graph
                    .ring(self.ring)
                    .locants
                    .contains_key(&self.positional)
                {
                    self.positional += 1;
                }
                self.place_atom(ch, 2)
            }
            b'U' => {
                // `U- <loc>` names an explicit double-bond target, with `&`
                // widening; bare U bonds to the next position.
                if self.i + 3 < self.bytes.len()
                    && self.bytes[self.i + 1] == b'-'
                    && self.bytes[self.i + 2] == b' '
                {
                    let mut k = 1usize;
                    let mut dloc = self.bytes[self.i + 3];
                    while self.bytes.get(self.i + 3 + k) == Some(&b'&') {
                        if dloc as usize + LOCANT_WIDENING as usize > MAX_LOCANT as usize {
                            return Err(self.fail(ParseErrorKind::LocantOutOfRange(
                                "expanded double-bond locant is exceeding the 252 space".into(),
                            )));
                        }
                        dloc += LOCANT_WIDENING;
                        k += 1;
                    }
                    self.form.unsaturations.push((self.positional, dloc));
                    self.i += 2 + k;
                } else {
                    self.form
                        .unsaturations
                        .push((self.positional, self.positional + 1));
                }
                Ok(())
            }
            b'W' => {
                if !self.form.heterocyclic {
                    self.warned = true;
                }
                let anchor = match self
                    .graph
                    .ring(self.ring)
                    .locants
                    .get(&self.positional)
                    .copied()
                {
                    Some(atom) => atom,
                    None => {
                        let atom = self
                            .graph
                            .add_symbol(b'C', 2)
                            .map_err(|k| k.at(self.offset()))?;
                        self.graph.assign_locant(self.ring, self.positional, atom);
                        atom
                    }
                };
                if self.graph.symbol(anchor).code == b'N' {
                    self.graph.symbol_mut(anchor).allowed_edges += 1;
                }
                let dioxo = self
                    .graph
                    .add_symbol(b'W', 3)
                    .map_err(|k| k.at(self.offset()))?;
                let edge = self
                    .graph
                    .add_edge(dioxo, anchor)
                    .map_err(|k| k.at(self.offset()))?;
                self.graph
                    .unsaturate(edge, 2)
                    .map_err(|k| k.at(self.offset()))?;
                self.graph.record_position(self.offset(), anchor);
                Ok(())
            }
            b'H' => {
                // Strips the bond from aromatic consideration.
                self.form
                    .saturations
                    .push((self.positional, self.positional + 1));
                Ok(())
            }
            other => Err(self.invalid(format!(
                "{} is not allowed as an atom assignment within ring notation",
                other as char
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::WlnGraph;

    fn scan_block(block: &str) -> (WlnGraph, RingForm) {
        let mut graph = WlnGraph::new(false);
        let ring = graph.add_ring().unwrap();
        let scanner = BlockScanner {
            graph: &mut graph,
            ring,
            spiro: None,
            bytes: block.as_bytes(),
            start: 0,
            form: RingForm::default(),
            warned: false,
            state_multi: 0,
            state_pseudo: false,
            state_aromatics: false,
            implied_used: false,
            expected_locants: 0,
            evaluating_break: false,
            positional: 0,
            last_locant_position: None,
            i: 0,
        };
        let (form, _) = scanner.scan().unwrap();
        (graph, form)
    }

    #[test]
    fn benzene_block_is_one_aromatic_component() {
        let (_, form) = scan_block("L6J");
        assert_eq!(form.components, vec![(6, b'A')]);
        assert_eq!(form.aromaticity, vec![true]);
        assert!(!form.heterocyclic);
    }

    #[test]
    fn trailing_t_marks_saturation() {
        let (_, form) = scan_block("L6TJ");
        assert_eq!(form.aromaticity, vec![false]);
    }

    #[test]
    fn fused_components_accumulate() {
        let (_, form) = scan_block("L66J");
        assert_eq!(form.components, vec![(6, b'A'), (6, b'A')]);
        assert_eq!(form.aromaticity, vec![true, true]);
    }

    #[test]
    fn heteroatoms_land_on_locants() {
        let (graph, form) = scan_block("T6N DOTJ");
        assert!(form.heterocyclic);
        assert_eq!(form.aromaticity, vec![false]);
        let ring = graph.ring(RingId(0));
        let n = ring.locants[&b'A'];
        let o = ring.locants[&b'D'];
        assert_eq!(graph.symbol(n).code, b'N');
        assert_eq!(graph.symbol(o).code, b'O');
    }

    #[test]
    fn bare_letter_between_spaces_is_a_bridge() {
        let (_, form) = scan_block("L55 ATJ");
        assert_eq!(form.components, vec![(5, b'A'), (5, b'A')]);
        assert!(form.bridges.contains(&b'A'));
        assert_eq!(form.aromaticity, vec![false, false]);
    }

    #[test]
    fn multicyclic_prefix_reads_count_locants_and_size() {
        let (_, form) = scan_block("T666 2AE NJ");
        assert_eq!(form.components, vec![(6, b'A'), (6, b'A'), (6, b'A')]);
        assert_eq!(form.multicyclic, vec![b'A', b'E']);
        // The size letter follows the multicyclic list after a space.
        assert_eq!(form.size_spec, Some(b'N'));
        assert_eq!(form.aromaticity, vec![true, true, true]);
    }

    #[test]
    fn pseudo_pairs_flatten_in_order() {
        let (_, form) = scan_block("L66/AC J");
        assert_eq!(form.pseudo, vec![b'A', b'C']);
    }

    #[test]
    fn in_ring_unsaturation_targets_next_locant() {
        let (_, form) = scan_block("L6UTJ");
        assert_eq!(form.unsaturations, vec![(b'A', b'B')]);
        assert_eq!(form.aromaticity, vec![false]);
    }

    #[test]
    fn explicit_unsaturation_target_with_dash_space() {
        let (_, form) = scan_block("L C555 A DU- EJ");
        assert_eq!(form.components, vec![(5, b'C'), (5, b'A'), (5, b'A')]);
        assert!(form.bridges.contains(&b'A'));
        assert_eq!(form.unsaturations, vec![(b'D', b'E')]);
    }

    #[test]
    fn big_ring_component_in_dashes() {
        let (_, form) = scan_block("L-12-TJ");
        assert_eq!(form.components, vec![(12, b'A')]);
    }

    #[test]
    fn broken_locant_registers_relative_position() {
        let (_, form) = scan_block("L66 B- CJ");
        assert!(form.broken.contains(&relative_position(b'B').unwrap()));
    }

    #[test]
    fn periodic_element_lands_in_ring() {
        let (graph, _) = scan_block("T5 A-SN-TJ");
        let ring = graph.ring(RingId(0));
        let tin = ring.locants[&b'A'];
        assert_eq!(graph.symbol(tin).code, CODE_ELEMENT);
        assert_eq!(graph.symbol(tin).element.as_deref(), Some("SN"));
        assert_eq!(graph.symbol(tin).allowed_edges, 8);
    }

    #[test]
    fn pi_charge_lands_after_preceding_components() {
        let (_, form) = scan_block("T5 0J");
        assert_eq!(form.post_charges, vec![(b'B', -1)]);
    }

    #[test]
    fn aromaticity_mismatch_is_rejected() {
        let mut graph = WlnGraph::new(false);
        let ring = graph.add_ring().unwrap();
        let scanner = BlockScanner {
            graph: &mut graph,
            ring,
            spiro: None,
            bytes: b"L66T&TJ",
            start: 0,
            form: RingForm::default(),
            warned: false,
            state_multi: 0,
            state_pseudo: false,
            state_aromatics: false,
            implied_used: false,
            expected_locants: 0,
            evaluating_break: false,
            positional: 0,
            last_locant_position: None,
            i: 0,
        };
        // T&T gives three aromaticity entries for two components.
        let result = scanner.scan();
        assert!(result.is_err());
    }
}
