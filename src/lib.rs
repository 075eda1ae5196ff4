#![doc = include_str!("../README.md")]

mod builder;
mod core;
mod elements;
mod parser;
mod post;

pub use crate::builder::{Atom, Bond, MolBuilder, MolecularGraph};
pub use crate::core::ParseOptions;
pub use crate::core::error::{ParseError, ParseErrorKind, WlnError};

/// Reads a WLN string into a neutral molecular graph with default options.
pub fn read_wln(notation: &str) -> Result<MolecularGraph, WlnError> {
    read_wln_with_options(notation, &ParseOptions::default())
}

/// Reads a WLN string into a neutral molecular graph.
///
/// # Errors
///
/// Returns [`WlnError::Parse`] on any notation failure; no partial graph is
/// exposed.
pub fn read_wln_with_options(
    notation: &str,
    options: &ParseOptions,
) -> Result<MolecularGraph, WlnError> {
    let mut molecule = MolecularGraph::new();
    let warnings = read_wln_into(notation, options, &mut molecule)?;
    molecule.warnings = warnings;
    Ok(molecule)
}

/// Reads a WLN string and streams the result into a caller-supplied
/// [`MolBuilder`], returning any structured warnings.
///
/// This is the host-chemistry-library entry point: implement the builder
/// over your atom/bond types and the core never needs to know about them.
///
/// # Errors
///
/// Returns [`WlnError::Parse`] on any notation failure and
/// [`WlnError::ElementTable`] if the embedded periodic table cannot load.
pub fn read_wln_into<B: MolBuilder>(
    notation: &str,
    options: &ParseOptions,
    builder: &mut B,
) -> Result<Vec<String>, WlnError> {
    elements::ensure_loaded().map_err(WlnError::ElementTable)?;

    let mut graph = parser::parse(notation, options)?;
    post::run(&mut graph).map_err(|kind| ParseError {
        kind,
        offset: notation.len(),
    })?;
    builder::emit(&graph, builder).map_err(|kind| ParseError {
        kind,
        offset: notation.len(),
    })?;
    Ok(graph.warnings)
}
