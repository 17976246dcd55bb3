// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Builds the shared Vocabulary from the alphabets of BOTH
// corpora plus the control symbols.
//
// Id assignment order (deterministic across runs):
//
//   id 0      pad symbol
//   id 1..    alphabet characters, sorted ascending
//   next ids  start, end, delim0, delim1 (in that order)
//
// Collisions:
//   - the pad character never gets a non-zero id, even if it
//     appears in the alphabet
//   - a control symbol that is already an alphabet character
//     keeps the alphabet id; a warning is logged because the
//     composite sequences become ambiguous
//
// Reference: Rust Book §8 (Collections)

use std::collections::BTreeSet;

use crate::domain::vocabulary::{ControlSymbols, Vocabulary};

/// Build a vocabulary over `alphabet` plus `symbols`.
pub fn build_vocabulary(alphabet: &BTreeSet<char>, symbols: ControlSymbols) -> Vocabulary {
    if alphabet.contains(&symbols.pad) {
        tracing::warn!(
            "Pad symbol {:?} also occurs in the sequence alphabet; it will decode as padding",
            symbols.pad
        );
    }

    let mut ordered: Vec<char> = alphabet
        .iter()
        .copied()
        .filter(|c| *c != symbols.pad)
        .collect();

    for control in colliding_controls(alphabet, &symbols) {
        tracing::warn!(
            "Control symbol {:?} collides with an existing vocabulary entry; keeping the earlier id",
            control
        );
    }
    ordered.extend(symbols.enumerated());

    let vocab = Vocabulary::from_ordered(symbols, &ordered);
    tracing::debug!("Built vocabulary with {} entries (pad included)", vocab.len());
    vocab
}

/// Control symbols that will not get an id of their own: those equal to
/// the pad, to an alphabet character, or to an earlier control symbol.
pub fn colliding_controls(alphabet: &BTreeSet<char>, symbols: &ControlSymbols) -> Vec<char> {
    let mut taken = alphabet.clone();
    taken.insert(symbols.pad);

    symbols
        .enumerated()
        .into_iter()
        .filter(|c| !taken.insert(*c))
        .collect()
}

/// Union the alphabets of several corpora.
pub fn merge_alphabets<'a, I>(alphabets: I) -> BTreeSet<char>
where
    I: IntoIterator<Item = &'a BTreeSet<char>>,
{
    alphabets.into_iter().flatten().copied().collect()
}
