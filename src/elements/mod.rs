//! Periodic-element definitions for `-XX-` notation and hypervalent ceilings.
//!
//! The element table is embedded as a TOML document and deserialized once on
//! first access. Two-letter WLN symbols (`-NA-`, `-FE-`, ...) resolve to an
//! atomic number here; single letters wrapped in dashes (`-S-`, `-P-`, ...)
//! are hypervalent rewrites of ordinary symbols and only widen a valence
//! ceiling.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

mod table;

/// One entry of the embedded periodic table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ElementRecord {
    /// Two-letter WLN spelling, e.g. `FE`.
    pub wln: String,
    /// Conventional element symbol, e.g. `Fe`.
    pub symbol: String,
    /// Atomic number.
    pub number: u8,
}

#[derive(Debug, Deserialize)]
struct ElementTable {
    #[serde(rename = "element")]
    elements: Vec<ElementRecord>,
}

static ELEMENTS: LazyLock<Result<HashMap<String, ElementRecord>, String>> = LazyLock::new(|| {
    let table: ElementTable =
        toml::from_str(table::ELEMENT_TABLE_TOML).map_err(|e| e.to_string())?;
    Ok(table
        .elements
        .into_iter()
        .map(|record| (record.wln.clone(), record))
        .collect())
});

/// Confirms the embedded table deserializes, reporting the TOML error text
/// otherwise.
pub(crate) fn ensure_loaded() -> Result<(), String> {
    ELEMENTS.as_ref().map(|_| ()).map_err(|e| e.clone())
}

/// Resolves a two-letter WLN element spelling.
pub(crate) fn lookup(wln: &str) -> Option<&'static ElementRecord> {
    ELEMENTS.as_ref().ok()?.get(wln)
}

/// Valence ceiling granted to a single letter wrapped in dashes, or `None`
/// when the letter takes no hypervalent form.
pub(crate) fn hypervalent_ceiling(code: u8) -> Option<u8> {
    match code {
        b'O' => Some(3),
        b'P' | b'S' => Some(8),
        // allows e.g. FCl6
        b'G' | b'E' | b'I' | b'F' | b'B' => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_deserializes() {
        assert_eq!(ensure_loaded(), Ok(()));
    }

    #[test]
    fn table_covers_expected_symbols() {
        let iron = lookup("FE").unwrap();
        assert_eq!(iron.symbol, "Fe");
        assert_eq!(iron.number, 26);

        // K is taken by in-chain nitrogen, so potassium spells KA.
        assert_eq!(lookup("KA").unwrap().number, 19);
        assert_eq!(lookup("SN").unwrap().number, 50);
        assert_eq!(lookup("WT").unwrap().number, 74);
        assert_eq!(lookup("OG").unwrap().number, 118);
        assert!(lookup("XX").is_none());
    }

    #[test]
    fn table_has_one_entry_per_spelling() {
        let table = ELEMENTS.as_ref().unwrap();
        assert_eq!(table.len(), 108);
    }

    #[test]
    fn hypervalent_ceilings_match_notation_rules() {
        assert_eq!(hypervalent_ceiling(b'O'), Some(3));
        assert_eq!(hypervalent_ceiling(b'P'), Some(8));
        assert_eq!(hypervalent_ceiling(b'S'), Some(8));
        assert_eq!(hypervalent_ceiling(b'G'), Some(6));
        assert_eq!(hypervalent_ceiling(b'C'), None);
    }
}
