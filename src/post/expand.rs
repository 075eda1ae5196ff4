//! Structural expansion passes: packed chains, dioxo groups, multiplier
//! carbons, default methyls, carbonyl expansion, and hanging valences.
//!
//! These run after Kekulé assignment; the only earlier pass is chain
//! materialisation, which happens before anything inspects neighbours.

use crate::core::error::ParseErrorKind;
use crate::core::graph::{CODE_CHAIN, CODE_MULTIPLIER, WlnGraph};
use crate::core::{AtomId, EdgeId, MAX_EDGES_PER_ATOM};

/// Attaches an implicit methyl (carbon plus three explicit hydrogens) to
/// `head`.
pub(crate) fn add_methyl(graph: &mut WlnGraph, head: AtomId) -> Result<EdgeId, ParseErrorKind> {
    let carbon = graph.add_symbol(b'C', 4)?;
    for _ in 0..3 {
        let hydrogen = graph.add_symbol(b'H', 1)?;
        graph.add_edge(hydrogen, carbon)?;
    }
    graph.add_edge(carbon, head)
}

/// Materialises every packed `#` chain into explicit carbons.
///
/// The head keeps its incoming bond; outgoing bonds move to the new tail,
/// which is where the parser's `prev` pointed while the chain was live.
pub(crate) fn expand_chains(graph: &mut WlnGraph) -> Result<(), ParseErrorKind> {
    let stop = graph.symbols.len();
    for idx in 0..stop {
        let head = AtomId(idx);
        if graph.symbol(head).code != CODE_CHAIN {
            continue;
        }
        let length = graph.symbol(head).chain_len.max(1) as usize;
        {
            let sym = graph.symbol_mut(head);
            sym.code = b'1';
            sym.chain_len = 0;
        }
        if length == 1 {
            continue;
        }

        let outgoing: Vec<EdgeId> = graph.children(head).map(|(edge, _)| edge).collect();
        for &edge in &outgoing {
            let order = graph.edge(edge).order;
            let sym = graph.symbol_mut(head);
            sym.edges.retain(|&e| e != edge);
            sym.num_edges -= order;
        }

        let mut tail = head;
        for _ in 1..length {
            let carbon = graph.add_symbol(b'1', 4)?;
            graph.add_edge(carbon, tail)?;
            tail = carbon;
        }

        for &edge in &outgoing {
            let (order, child) = {
                let record = graph.edge(edge);
                (record.order, record.child)
            };
            if graph.symbol(tail).edges.len() >= MAX_EDGES_PER_ATOM {
                return Err(ParseErrorKind::CapacityExceeded("per-atom edge slots"));
            }
            let tail_sym = graph.symbol(tail);
            if tail_sym.num_edges + order > tail_sym.allowed_edges {
                return Err(ParseErrorKind::ValenceExceeded {
                    code: '1',
                    edges: tail_sym.num_edges + order,
                    cap: tail_sym.allowed_edges,
                });
            }
            graph.edge_mut(edge).parent = tail;
            let tail_sym = graph.symbol_mut(tail);
            tail_sym.edges.push(edge);
            tail_sym.num_edges += order;
            if graph.symbol(child).previous == Some(head) {
                graph.symbol_mut(child).previous = Some(tail);
            }
        }
    }
    Ok(())
}

/// Rewrites a `W` symbol into its dioxo expansion.
///
/// The order-3 bond drops to a double, the `W` itself becomes the first
/// oxygen, and a second oxygen lands on the anchor (double-bonded only if
/// the anchor still has room). Nitrogen anchors pick up a +1 charge.
fn add_dioxo(graph: &mut WlnGraph, head: AtomId) -> Result<(), ParseErrorKind> {
    let bound = match graph.first_child(head) {
        Some((edge, child)) => Some((edge, child)),
        None => graph
            .symbol(head)
            .previous
            .and_then(|parent| graph.search_edge(head, parent).map(|edge| (edge, parent))),
    };
    let Some((edge, anchor)) = bound else {
        return Err(ParseErrorKind::InvalidState("dioxo seems to be unbound".into()));
    };
    if graph.edge(edge).order != 3 {
        return Err(ParseErrorKind::InvalidState("dioxo seems to be unbound".into()));
    }

    {
        let sym = graph.symbol_mut(head);
        sym.code = b'O';
        sym.allowed_edges = 2;
    }
    graph.saturate(edge, 1);

    let oxygen = graph.add_symbol(b'O', 2)?;
    let second = graph.add_edge(oxygen, anchor)?;
    if graph.symbol(anchor).is_open() {
        graph.unsaturate(second, 1)?;
    }
    if graph.symbol(anchor).code == b'N' {
        graph.symbol_mut(anchor).charge += 1;
    }
    Ok(())
}

/// Raises the bonds around a multiplier carbon.
///
/// The forward bond takes a triple when it can saturate its far end (or has
/// two spare valences); otherwise the raise splits across both sides.
/// Chain carbons cap their contribution at one.
fn multiply_carbon(graph: &mut WlnGraph, sym: AtomId) -> Result<(), ParseErrorKind> {
    let back = graph.symbol(sym).previous;
    let forward = graph.first_child(sym);
    let (Some(back), Some((fedge, forward))) = (back, forward) else {
        return Err(ParseErrorKind::InvalidState(
            "multiplier carbon must have surrounding symbols, use H to resolve?".into(),
        ));
    };
    let Some(bedge) = graph.search_edge(sym, back) else {
        return Err(ParseErrorKind::InvalidState(
            "multiplier carbon must have surrounding symbols, use H to resolve?".into(),
        ));
    };

    let back_sym = graph.symbol(back);
    let forward_sym = graph.symbol(forward);
    let mut back_spare = back_sym.free_valence();
    let mut forward_spare = forward_sym.free_valence();

    // alkyl chains never take the multiplied bond themselves
    if matches!(back_sym.code, b'1' | CODE_CHAIN) {
        back_spare = 1;
    }
    if matches!(forward_sym.code, b'1' | CODE_CHAIN) {
        forward_spare = 1;
    }

    // a triple bond that fully saturates an end is always taken
    if forward_sym.num_edges == 1 && forward_sym.num_edges + 2 == forward_sym.allowed_edges {
        graph.unsaturate(fedge, 2)?;
    } else if back_sym.num_edges == 1 && back_sym.num_edges + 2 == back_sym.allowed_edges {
        graph.unsaturate(bedge, 2)?;
    } else if forward_spare >= 2 {
        graph.unsaturate(fedge, 2)?;
    } else if forward_spare == 1 && back_spare >= 1 {
        graph.unsaturate(bedge, 1)?;
        graph.unsaturate(fedge, 1)?;
    }
    Ok(())
}

/// Fills `X`/`K` to their ceiling and `Y` to three children with implicit
/// methyls.
fn resolve_methyls(graph: &mut WlnGraph, target: AtomId) -> Result<(), ParseErrorKind> {
    match graph.symbol(target).code {
        b'X' | b'K' => {
            while graph.symbol(target).is_open() {
                add_methyl(graph, target)?;
            }
        }
        b'Y' => {
            while graph.count_children(target) < 3 {
                add_methyl(graph, target)?;
            }
        }
        other => {
            return Err(ParseErrorKind::InvalidState(format!(
                "resolving methyls performed on invalid symbol: {}",
                other as char
            )));
        }
    }
    Ok(())
}

/// Expands `V` into a carbon with a double-bonded oxygen.
fn expand_carbonyl(graph: &mut WlnGraph, sym: AtomId) -> Result<(), ParseErrorKind> {
    {
        let record = graph.symbol_mut(sym);
        record.code = b'C';
        record.allowed_edges = 4;
    }
    let oxygen = graph.add_symbol(b'O', 2)?;
    let edge = graph.add_edge(oxygen, sym)?;
    graph.unsaturate(edge, 1)
}

/// Raises the single bond on every one-edged, uncharged `O`/`N`/`P`/`S`
/// until one endpoint reaches its ceiling.
fn resolve_hanging_bonds(graph: &mut WlnGraph) -> Result<(), ParseErrorKind> {
    let stop = graph.symbols.len();
    for idx in 0..stop {
        let sym = AtomId(idx);
        let record = graph.symbol(sym);
        if matches!(record.code, b'O' | b'N' | b'P' | b'S')
            && record.num_edges == 1
            && record.charge == 0
        {
            if let Some((edge, child)) = graph.first_child(sym) {
                if graph.edge(edge).order == 1 {
                    while graph.symbol(sym).is_open() && graph.symbol(child).is_open() {
                        graph.unsaturate(edge, 1)?;
                    }
                }
            }
        } else {
            let children: Vec<(EdgeId, AtomId)> = graph.children(sym).collect();
            for (edge, child) in children {
                let child_sym = graph.symbol(child);
                if matches!(child_sym.code, b'O' | b'P' | b'N' | b'S')
                    && child_sym.num_edges == 1
                    && child_sym.charge == 0
                {
                    while graph.symbol(sym).is_open() && graph.symbol(child).is_open() {
                        graph.unsaturate(edge, 1)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Runs the symbol-expansion sequence: dioxo and multiplier carbons first,
/// then default methyls and carbonyls over the grown pool, then hanging
/// valences.
pub(crate) fn expand_symbols(graph: &mut WlnGraph) -> Result<(), ParseErrorKind> {
    let stop = graph.symbols.len();
    for idx in 0..stop {
        let sym = AtomId(idx);
        if graph.symbol(sym).code == b'W' {
            add_dioxo(graph, sym)?;
        }
        if graph.symbol(sym).code == CODE_MULTIPLIER {
            graph.symbol_mut(sym).code = b'C';
            multiply_carbon(graph, sym)?;
        }
    }

    let stop = graph.symbols.len();
    for idx in 0..stop {
        let sym = AtomId(idx);
        match graph.symbol(sym).code {
            b'Y' | b'X' | b'K' => resolve_methyls(graph, sym)?,
            b'V' => expand_carbonyl(graph, sym)?,
            _ => {}
        }
    }

    resolve_hanging_bonds(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParseOptions;
    use crate::parser;

    fn expanded(notation: &str) -> WlnGraph {
        let mut graph = parser::parse(notation, &ParseOptions::default()).unwrap();
        crate::post::run(&mut graph).unwrap();
        graph
    }

    fn count_code(graph: &WlnGraph, code: u8) -> usize {
        graph.symbols.iter().filter(|s| s.code == code).count()
    }

    #[test]
    fn chains_materialise_with_moved_tail_bonds() {
        let graph = expanded("2Q");
        // two carbons and the hydroxyl oxygen
        assert_eq!(graph.symbols.len(), 3);
        let tail_bond = graph
            .edges
            .iter()
            .find(|e| graph.symbol(e.child).code == b'Q')
            .unwrap();
        // Q hangs off the tail carbon, not the head
        assert_eq!(tail_bond.parent, AtomId(2));
    }

    #[test]
    fn dioxo_on_nitrogen_charge_separates() {
        let graph = expanded("WN1");
        // W became O; a second O was allocated
        assert_eq!(count_code(&graph, b'O'), 2);
        let nitrogen = graph
            .symbols
            .iter()
            .position(|s| s.code == b'N')
            .map(AtomId)
            .unwrap();
        assert_eq!(graph.symbol(nitrogen).charge, 1);

        let mut orders: Vec<u8> = graph
            .children(nitrogen)
            .map(|(e, _)| graph.edge(e).order)
            .collect();
        if let Some(parent) = graph.symbol(nitrogen).previous {
            if let Some(e) = graph.search_edge(nitrogen, parent) {
                orders.push(graph.edge(e).order);
            }
        }
        orders.sort_unstable();
        // one single oxygen, one chain bond, one double oxygen
        assert_eq!(orders, vec![1, 1, 2]);
    }

    #[test]
    fn default_methyls_fill_y_to_three_children() {
        let graph = expanded("QY");
        // Q, Y, two methyl carbons, six explicit hydrogens
        assert_eq!(graph.symbols.len(), 10);
        let y = AtomId(1);
        assert_eq!(graph.count_children(y), 3);
    }

    #[test]
    fn default_methyls_fill_x_to_ceiling() {
        let graph = expanded("1X");
        let x = AtomId(1);
        assert_eq!(graph.symbol(x).num_edges, 4);
        // three methyls were added
        assert_eq!(count_code(&graph, b'C'), 3);
    }

    #[test]
    fn carbonyl_expansion_adds_a_double_bonded_oxygen() {
        let graph = expanded("1VO2");
        // C + (C=O) + O + C-C + carbonyl O
        assert_eq!(graph.symbols.len(), 6);
        let doubles: Vec<_> = graph.edges.iter().filter(|e| e.order == 2).collect();
        assert_eq!(doubles.len(), 1);
        assert_eq!(graph.symbol(doubles[0].child).code, b'O');
    }

    #[test]
    fn hanging_oxygen_takes_a_double_bond() {
        // a lone O after a carbon chain resolves to a carbonyl-like bond
        let graph = expanded("1VQ");
        // acetic acid: the V oxygen is double bonded, the Q stays single
        let nondoubled = graph
            .symbols
            .iter()
            .filter(|s| s.code == b'Q')
            .all(|s| s.num_edges == 1);
        assert!(nondoubled);
    }

    #[test]
    fn multiplier_carbon_prefers_the_forward_triple() {
        // methyl cyanide: 1 C N with the multiplier carbon in the middle
        let graph = expanded("1CN");
        let triple = graph.edges.iter().find(|e| e.order == 3).unwrap();
        assert_eq!(graph.symbol(triple.child).code, b'N');
        let nitrogen = triple.child;
        assert_eq!(graph.symbol(nitrogen).num_edges, 3);
    }
}
