//! Applies ionic charge assignments collected by the splitter.
//!
//! Charge indices are 1-based WLN positions; each must resolve through the
//! arena's source-position map to the atom written at that character.

use crate::core::error::ParseErrorKind;
use crate::core::graph::WlnGraph;

/// Adds each (position, delta) pair onto the referenced atom.
pub(crate) fn apply(
    graph: &mut WlnGraph,
    charges: &[(usize, i32)],
) -> Result<(), ParseErrorKind> {
    for &(position, delta) in charges {
        let atom = position
            .checked_sub(1)
            .and_then(|offset| graph.atom_at_position(offset))
            .ok_or(ParseErrorKind::ChargeIndex(position))?;
        graph.symbol_mut(atom).charge += delta;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charges_land_on_recorded_positions() {
        let mut graph = WlnGraph::new(false);
        let atom = graph.add_symbol(b'N', 3).unwrap();
        graph.record_position(2, atom);

        apply(&mut graph, &[(3, 1)]).unwrap();
        assert_eq!(graph.symbol(atom).charge, 1);

        apply(&mut graph, &[(3, -1), (3, -1)]).unwrap();
        assert_eq!(graph.symbol(atom).charge, -1);
    }

    #[test]
    fn unknown_position_is_a_charge_index_error() {
        let mut graph = WlnGraph::new(false);
        let err = apply(&mut graph, &[(4, 1)]).unwrap_err();
        assert_eq!(err, ParseErrorKind::ChargeIndex(4));
    }
}
