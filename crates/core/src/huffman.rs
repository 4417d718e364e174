//! Huffman encoding tree.
//!
//! The tree is built greedily from a [`FreqTable`]: the two lowest-frequency
//! nodes are merged until a single root remains. A symbol's code is the path
//! from the root to its leaf, `0` for the first child and `1` for the second.
//!
//! # Tie-breaking
//!
//! Nodes with equal frequency are ordered so that construction is fully
//! deterministic:
//! - leaves come before internal nodes,
//! - leaves order by symbol value ascending,
//! - internal nodes order by creation (older first).
//!
//! The first node extracted becomes the `0` child of the merged node, the
//! second becomes the `1` child.
//!
//! # Degenerate inputs
//!
//! - No symbols: the empty tree (no root).
//! - One distinct symbol: an internal root whose `0` child is the only leaf,
//!   giving that symbol the one-bit code `0`.
//!
//! # Text form
//!
//! [`HuffmanTree::serialize`] writes `<symbol><path>` for every leaf in
//! pre-order, e.g. `A0B10C11`. Symbols are bytes mapped one-to-one onto the
//! first 256 Unicode scalars. The digits `0` and `1` cannot be written as
//! symbols because they would merge into the path.

use crate::error::{HuffmanError, Result};
use crate::freq::{FreqTable, NUM_SYMBOLS};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

/// A node of the encoding tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        /// Child reached by bit `0`
        zero: Option<Box<HuffNode>>,
        /// Child reached by bit `1`
        one: Option<Box<HuffNode>>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, freq: u64) -> Self {
        HuffNode::Leaf { symbol, freq }
    }

    /// Merge two nodes under a new internal node carrying their summed frequency.
    pub fn merge(zero: HuffNode, one: HuffNode) -> Self {
        HuffNode::Internal {
            freq: zero.freq() + one.freq(),
            zero: Some(Box::new(zero)),
            one: Some(Box::new(one)),
        }
    }

    fn vacant() -> Self {
        HuffNode::Internal {
            freq: 0,
            zero: None,
            one: None,
        }
    }

    pub fn freq(&self) -> u64 {
        match self {
            HuffNode::Leaf { freq, .. } | HuffNode::Internal { freq, .. } => *freq,
        }
    }

    /// Symbol held by a leaf; `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Child selected by `bit`, if present.
    pub fn child(&self, bit: bool) -> Option<&HuffNode> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { zero, one, .. } => {
                if bit {
                    one.as_deref()
                } else {
                    zero.as_deref()
                }
            }
        }
    }
}

/// Priority-queue entry used during construction.
///
/// Ordered by frequency, then by [`Rank`].
struct HeapEntry {
    rank: Rank,
    node: HuffNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    // Declaration order matters: leaves sort before internal nodes.
    Leaf(u8),
    Internal(u64),
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .freq()
            .cmp(&other.node.freq())
            .then(self.rank.cmp(&other.rank))
    }
}

/// Build the encoding tree for the symbols counted in `freq_table`.
pub fn create_encoding_tree(freq_table: &FreqTable) -> HuffmanTree {
    let mut heap: BinaryHeap<Reverse<HeapEntry>> = freq_table
        .iter()
        .map(|(symbol, freq)| {
            Reverse(HeapEntry {
                rank: Rank::Leaf(symbol),
                node: HuffNode::leaf(symbol, freq),
            })
        })
        .collect();

    if heap.len() == 1 {
        if let Some(Reverse(only)) = heap.pop() {
            let freq = only.node.freq();
            return HuffmanTree::from_root(HuffNode::Internal {
                freq,
                zero: Some(Box::new(only.node)),
                one: None,
            });
        }
    }

    let mut created = 0u64;
    while heap.len() > 1 {
        let (Some(Reverse(zero)), Some(Reverse(one))) = (heap.pop(), heap.pop()) else {
            break;
        };
        heap.push(Reverse(HeapEntry {
            rank: Rank::Internal(created),
            node: HuffNode::merge(zero.node, one.node),
        }));
        created += 1;
    }

    HuffmanTree {
        root: heap.pop().map(|Reverse(entry)| entry.node),
    }
}

/// A Huffman encoding tree; the empty tree has no root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<HuffNode>,
}

impl HuffmanTree {
    /// The empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Wrap an already-built node as a tree.
    pub fn from_root(root: HuffNode) -> Self {
        Self { root: Some(root) }
    }

    /// Shorthand for [`create_encoding_tree`].
    pub fn from_freq_table(freq_table: &FreqTable) -> Self {
        create_encoding_tree(freq_table)
    }

    pub fn root(&self) -> Option<&HuffNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Every leaf as `(symbol, frequency, path)`, in pre-order (`0` before `1`).
    fn leaves(&self) -> Vec<(u8, u64, String)> {
        let mut out = Vec::new();
        let mut stack: Vec<(&HuffNode, String)> = Vec::new();
        if let Some(root) = &self.root {
            stack.push((root, String::new()));
        }

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, freq } => out.push((*symbol, *freq, path)),
                HuffNode::Internal { zero, one, .. } => {
                    // Push `1` first so `0` is visited first.
                    if let Some(one) = one {
                        stack.push((&**one, format!("{path}1")));
                    }
                    if let Some(zero) = zero {
                        stack.push((&**zero, format!("{path}0")));
                    }
                }
            }
        }
        out
    }

    /// `(symbol, code)` for every leaf, in pre-order.
    pub fn codes(&self) -> Vec<(u8, String)> {
        self.leaves()
            .into_iter()
            .map(|(symbol, _, path)| (symbol, path))
            .collect()
    }

    /// Frequency stored on the leaf for `symbol`, or `None` if it is not in the tree.
    pub fn get_char_count(&self, symbol: u8) -> Option<u64> {
        self.leaves()
            .into_iter()
            .find(|(s, _, _)| *s == symbol)
            .map(|(_, freq, _)| freq)
    }

    /// Path from the root to the leaf for `symbol`.
    ///
    /// `Some("")` means the root itself is that leaf; `None` means the symbol
    /// is not in the tree.
    pub fn get_char_path(&self, symbol: u8) -> Option<String> {
        self.leaves()
            .into_iter()
            .find(|(s, _, _)| *s == symbol)
            .map(|(_, _, path)| path)
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest code; 0 for the empty tree or a bare leaf.
    pub fn depth(&self) -> usize {
        self.leaves()
            .iter()
            .map(|(_, _, path)| path.len())
            .max()
            .unwrap_or(0)
    }

    /// Write the tree as concatenated `<symbol><path>` tuples in pre-order.
    ///
    /// Frequencies are not part of the text form.
    ///
    /// # Errors
    /// Returns `HuffmanError::UnserializableSymbol` if a leaf holds `'0'` or `'1'`.
    pub fn serialize(&self) -> Result<String> {
        let mut out = String::new();
        for (symbol, _, path) in self.leaves() {
            if symbol == b'0' || symbol == b'1' {
                return Err(HuffmanError::UnserializableSymbol { symbol }.into());
            }
            out.push(char::from(symbol));
            out.push_str(&path);
        }
        Ok(out)
    }

    /// Rebuild a tree from the text written by [`serialize`](Self::serialize).
    ///
    /// Reads one symbol, then the maximal run of `0`/`1` as its path, and
    /// repeats. Intermediate nodes are created as needed; all frequencies are
    /// zero. Empty text gives the empty tree.
    ///
    /// # Errors
    /// Returns `HuffmanError::MalformedSerialization` if the text starts with a
    /// path digit, holds a symbol above U+00FF, repeats a symbol, or places a
    /// leaf on or below another leaf.
    pub fn deserialize(text: &str) -> Result<Self> {
        let mut tree = HuffmanTree::new();
        let mut seen = [false; NUM_SYMBOLS];
        let mut chars = text.chars().enumerate().peekable();

        while let Some((position, c)) = chars.next() {
            let malformed = |reason: &'static str| HuffmanError::MalformedSerialization { position, reason };

            if c == '0' || c == '1' {
                return Err(malformed("expected a symbol, found a path digit").into());
            }
            let symbol = u8::try_from(c).map_err(|_| malformed("symbol outside U+0000..=U+00FF"))?;
            if seen[usize::from(symbol)] {
                return Err(malformed("symbol appears twice").into());
            }
            seen[usize::from(symbol)] = true;

            let mut path = Vec::new();
            while let Some(&(_, step)) = chars.peek() {
                match step {
                    '0' => path.push(false),
                    '1' => path.push(true),
                    _ => break,
                }
                chars.next();
            }

            tree.create_path(symbol, &path).map_err(malformed)?;
        }

        Ok(tree)
    }

    /// Place a leaf for `symbol` at `path`, creating internal nodes on the way.
    fn create_path(&mut self, symbol: u8, path: &[bool]) -> std::result::Result<(), &'static str> {
        let mut node = self.root.get_or_insert_with(HuffNode::vacant);

        for &step in path {
            match node {
                HuffNode::Leaf { .. } => return Err("path runs through an existing leaf"),
                HuffNode::Internal { zero, one, .. } => {
                    let slot = if step { one } else { zero };
                    node = slot.get_or_insert_with(|| Box::new(HuffNode::vacant())).as_mut();
                }
            }
        }

        if !matches!(*node, HuffNode::Internal { zero: None, one: None, .. }) {
            return Err("position already occupied");
        }
        *node = HuffNode::leaf(symbol, 0);
        Ok(())
    }
}

impl fmt::Display for HuffmanTree {
    /// Indented structure, one node per line, `0` subtree first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(&HuffNode, usize, String)> = Vec::new();
        if let Some(root) = &self.root {
            stack.push((root, 0, String::new()));
        }

        while let Some((node, level, path)) = stack.pop() {
            let indent = "--".repeat(level);
            match node {
                HuffNode::Leaf { symbol, freq } => {
                    writeln!(f, "{indent}Char: {:?}, count: {freq}. Path: {path}", char::from(*symbol))?;
                }
                HuffNode::Internal { freq, zero, one } => {
                    writeln!(f, "{indent}Internal, count: {freq}. Path: {path}")?;
                    if let Some(one) = one {
                        stack.push((&**one, level + 1, format!("{path}1")));
                    }
                    if let Some(zero) = zero {
                        stack.push((&**zero, level + 1, format!("{path}0")));
                    }
                }
            }
        }
        Ok(())
    }
}
