//! Symbol-to-code lookup table.

use crate::freq::NUM_SYMBOLS;
use crate::huffman::HuffmanTree;
use std::fmt;

/// Direct-address table of bit-string codes, indexed by byte value.
///
/// Unused symbols map to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    codes: [String; NUM_SYMBOLS],
}

impl LookupTable {
    pub fn new() -> Self {
        Self {
            codes: std::array::from_fn(|_| String::new()),
        }
    }

    /// Build a table holding every code of `tree`.
    pub fn from_huffman_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();
        table.populate_from_huffman_tree(tree);
        table
    }

    /// Record each leaf's root-to-leaf path as its code.
    pub fn populate_from_huffman_tree(&mut self, tree: &HuffmanTree) {
        for (symbol, path) in tree.codes() {
            self.set_encoding(symbol, path);
        }
    }

    pub fn set_encoding(&mut self, symbol: u8, code: impl Into<String>) {
        self.codes[usize::from(symbol)] = code.into();
    }

    /// Code for `symbol`, or `""` if none was assigned.
    pub fn get_encoding(&self, symbol: u8) -> &str {
        &self.codes[usize::from(symbol)]
    }

    /// Assigned `(symbol, code)` entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        (0..=u8::MAX)
            .zip(self.codes.iter())
            .filter(|(_, code)| !code.is_empty())
            .map(|(symbol, code)| (symbol, code.as_str()))
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Character Lookup Table:")?;
        for (symbol, code) in self.iter() {
            writeln!(f, "{:?} : {}", char::from(symbol), code)?;
        }
        Ok(())
    }
}
