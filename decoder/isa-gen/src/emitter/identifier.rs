use crate::ir;

use std::collections::BTreeSet;

/// `<mnemonic>_<mask>_<value>`, mask and value as zero padded lowercase hex.
///
/// `digits` must cover the word width or two encodings could print the same.
pub fn dispatch_id(mnemonic: &str, pattern: ir::MatchPattern, digits: usize) -> String {
    format!(
        "{mnemonic}_{mask:0digits$x}_{value:0digits$x}",
        mask = pattern.mask,
        value = pattern.value,
    )
}

/// `"add"` and `"ADD"` both become `"Add"`.
pub fn canonicalize(mnemonic: &str) -> String {
    let mut chars = mnemonic.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Distinct canonical mnemonics seen during one generation run.
///
/// Passed into and returned from the emitters rather than living in a
/// global, so two runs never share state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MnemonicSet {
    names: BTreeSet<Box<str>>,
}

impl MnemonicSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the mnemonic was not yet present.
    pub fn register(&mut self, mnemonic: &str) -> bool {
        self.names.insert(canonicalize(mnemonic).into())
    }

    pub fn contains(&self, mnemonic: &str) -> bool {
        self.names.contains(canonicalize(mnemonic).as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Lookup table size, including the slot reserved for unmatched words.
    pub fn table_len(&self) -> usize {
        self.names.len() + 1
    }

    /// Sorted canonical names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }

    /// Slot of `mnemonic` in a table whose slot 0 is the sentinel.
    pub fn slot(&self, mnemonic: &str) -> Option<usize> {
        let canonical = canonicalize(mnemonic);
        self.names
            .iter()
            .position(|n| n.as_ref() == canonical)
            .map(|ndx| ndx + 1)
    }
}
