//! Post-processing passes over a parsed arena.
//!
//! Pass order is fixed: packed chains materialise first, Kekulé runs before
//! symbol expansion so ring heteroatoms can still accept a double bond ahead
//! of their default-methyl fill, and hanging-valence resolution runs last.

pub(crate) mod charges;
pub(crate) mod expand;
pub(crate) mod kekulize;

use crate::core::error::ParseErrorKind;
use crate::core::graph::WlnGraph;

/// Runs every post-pass in order.
pub(crate) fn run(graph: &mut WlnGraph) -> Result<(), ParseErrorKind> {
    expand::expand_chains(graph)?;
    kekulize::kekulize(graph)?;
    expand::expand_symbols(graph)?;
    Ok(())
}
