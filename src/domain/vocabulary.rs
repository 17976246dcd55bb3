// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// Maps every character a composite sequence can contain to a
// token id, and back.
//
// Characters come from two places:
//   - the amino-acid alphabet observed in the corpora
//   - five reserved control symbols (ControlSymbols)
//
// The pad symbol is special: it ALWAYS maps to id 0, so a
// zero-filled tensor is all padding. Every other character
// gets a distinct non-zero id. The ordering rules live in
// data::vocab_builder; this type only stores the result and
// is immutable once built.
//
// Reference: Rust Book §8 (Collections)

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::error::SamplerError;

/// Token id reserved for padding.
pub const PAD_ID: u32 = 0;

/// Reserved characters used to structure composite sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSymbols {
    /// Marks the beginning of a composite sequence
    pub start: char,
    /// Marks the end of a full composite sequence
    pub end: char,
    /// Separates the first and second season segments
    pub delim0: char,
    /// Separates the second and third season segments
    pub delim1: char,
    /// Right-padding for sliced training rows (id 0)
    pub pad: char,
}

impl Default for ControlSymbols {
    fn default() -> Self {
        Self {
            start:  '$',
            end:    '%',
            delim0: '&',
            delim1: '@',
            pad:    '_',
        }
    }
}

impl ControlSymbols {
    /// Start, end, delim0, delim1, in enumeration order.
    /// Pad is not listed because it is pinned to id 0.
    pub fn enumerated(&self) -> [char; 4] {
        [self.start, self.end, self.delim0, self.delim1]
    }
}

/// Bidirectional character ↔ token id mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    symbols: ControlSymbols,

    /// Ordered so JSON output is stable
    to_id: BTreeMap<char, u32>,

    #[serde(skip)]
    to_char: HashMap<u32, char>,
}

impl Vocabulary {
    /// Build from the pad-less character order: the n-th character gets id n + 1.
    /// Duplicates keep their first id; the pad character is forced to PAD_ID.
    pub(crate) fn from_ordered(symbols: ControlSymbols, ordered: &[char]) -> Self {
        let mut to_id   = BTreeMap::new();
        let mut to_char = HashMap::new();

        to_id.insert(symbols.pad, PAD_ID);
        to_char.insert(PAD_ID, symbols.pad);

        let mut next_id = PAD_ID + 1;
        for &c in ordered {
            if to_id.contains_key(&c) {
                continue;
            }
            to_id.insert(c, next_id);
            to_char.insert(next_id, c);
            next_id += 1;
        }

        Self { symbols, to_id, to_char }
    }

    /// The control symbols this vocabulary was built with
    pub fn symbols(&self) -> &ControlSymbols {
        &self.symbols
    }

    /// Token id of the pad character (always 0)
    pub fn pad_id(&self) -> u32 {
        PAD_ID
    }

    /// Number of ids, pad included (the embedding table size)
    pub fn len(&self) -> usize {
        self.to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_id.is_empty()
    }

    /// Token id for a character
    pub fn id(&self, c: char) -> Option<u32> {
        self.to_id.get(&c).copied()
    }

    /// Character for a token id
    pub fn symbol(&self, id: u32) -> Option<char> {
        self.to_char.get(&id).copied()
    }

    /// Encode a string character by character
    pub fn encode(&self, text: &str) -> Result<Vec<u32>, SamplerError> {
        text.chars()
            .map(|c| self.id(c).ok_or(SamplerError::UnknownSymbol(c)))
            .collect()
    }

    /// Decode token ids back into a string
    pub fn decode(&self, ids: &[u32]) -> Result<String, SamplerError> {
        ids.iter()
            .map(|&id| self.symbol(id).ok_or(SamplerError::UnknownToken(id)))
            .collect()
    }

    /// Iterate over (character, id) pairs in character order
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.to_id.iter().map(|(c, id)| (*c, *id))
    }
}
