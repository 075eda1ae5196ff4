//! Error types describing the failure modes of WLN reading.
//!
//! Every parser action reports failure as a [`ParseErrorKind`] positioned at
//! a 0-based string offset; the top-level reader surfaces a single
//! [`WlnError`] so that library consumers keep ergonomic `Result` signatures
//! while still being able to render the classic caret diagnostic.

use thiserror::Error;

/// Root error emitted by every fallible entry point of the reader.
#[derive(Debug, Error)]
pub enum WlnError {
    /// The notation could not be parsed; no partial graph is exposed.
    #[error("failed to read WLN notation")]
    Parse(#[from] ParseError),

    /// The embedded periodic-element table failed to deserialize.
    #[error("failed to load the periodic element table: {0}")]
    ElementTable(String),
}

impl WlnError {
    /// Renders the multi-line caret diagnostic for parse failures.
    ///
    /// Returns `None` for error variants that carry no string offset.
    pub fn diagnostic(&self, notation: &str) -> Option<String> {
        match self {
            WlnError::Parse(err) => Some(err.diagnostic(notation)),
            WlnError::ElementTable(_) => None,
        }
    }
}

/// A parse failure pinned to the offending position in the input string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// 0-based byte offset of the offending character.
    pub offset: usize,
}

impl ParseError {
    /// Renders the diagnostic in the form
    ///
    /// ```text
    /// Fatal: <original string>
    ///        <caret at offset>
    /// <message>
    /// ```
    pub fn diagnostic(&self, notation: &str) -> String {
        let mut out = String::with_capacity(notation.len() * 2 + 64);
        out.push_str("Fatal: ");
        out.push_str(notation);
        out.push_str("\n       ");
        for _ in 0..self.offset {
            out.push(' ');
        }
        out.push_str("^\n");
        out.push_str(&self.kind.to_string());
        out.push('\n');
        out
    }
}

/// Classified parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A character outside the WLN alphabet, or an element symbol the
    /// periodic table does not define.
    #[error("unallowed character '{0}', alphabet is [A-Z][0-9][&-/' ']")]
    InvalidCharacter(char),

    /// A character that is legal in isolation but not in the current parser
    /// state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Adding or upgrading a bond would push an atom past its valence
    /// ceiling.
    #[error("wln character [{code}] is exceeding allowed connections {edges}/{cap}")]
    ValenceExceeded {
        /// WLN code of the offending atom.
        code: char,
        /// Bond-order total the operation would reach.
        edges: u8,
        /// The atom's valence ceiling.
        cap: u8,
    },

    /// A ring block that cannot be closed into a consistent cycle system.
    #[error("ring closure failed: {0}")]
    RingClosure(String),

    /// A locant outside the ring, or past the 252-value locant space.
    #[error("locant out of range: {0}")]
    LocantOutOfRange(String),

    /// An arena pool or per-parse resource bound was exhausted.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(&'static str),

    /// An ionic charge index that references no parsed atom position.
    #[error("ionic charge index {0} does not reference a parsed atom")]
    ChargeIndex(usize),

    /// A ring-in-ring opening left unclosed at end of input.
    #[error("ring-in-ring notation was not closed")]
    MacroRing,
}

impl ParseErrorKind {
    /// Pins the failure to a string offset.
    pub(crate) fn at(self, offset: usize) -> ParseError {
        ParseError { kind: self, offset }
    }
}
