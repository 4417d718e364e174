//! Error types for huffdex.
//!
//! All fallible operations return structured errors rather than panicking.
//! Lookups that simply find nothing (`Hashtable::get`, `HuffmanTree::get_char_path`)
//! are not errors and return `Option` instead.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Hashtable: removing a key that is not stored
/// - Bit sequence: indexing past the stored bits
/// - Huffman: tree construction, serialization, encode/decode failures
/// - Music index: library layout or release date problems
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Hashtable operation failed (e.g., removing an absent key)
    #[error("hashtable error: {0}")]
    Hashtable(#[from] HashtableError),

    /// Bit sequence operation failed (e.g., reading past the last bit)
    #[error("bit sequence error: {0}")]
    BitSeq(#[from] BitSeqError),

    /// Huffman codec error (e.g., malformed tree text, decode failure)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Music index error (e.g., missing details.txt)
    #[error("music index error: {0}")]
    MusicIndex(#[from] MusicIndexError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Hashtable errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashtableError {
    /// No pair with this key is stored in any bucket
    #[error("key {key:?} not found")]
    KeyNotFound { key: String },
}

/// Bit sequence errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitSeqError {
    /// Requested bit index is not below the stored bit count
    #[error("bit index {index} out of range for sequence of {len} bits")]
    IndexOutOfRange { index: usize, len: usize },

    /// Backing words cannot hold the claimed bit count
    #[error("bit length {len} does not fit in {words} words")]
    LengthMismatch { len: usize, words: usize },
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// Operation needs at least one symbol in the tree
    #[error("empty tree: nothing to decode with")]
    EmptyTree,

    /// A bit selected a child that does not exist
    #[error("bit at position {position} runs off the tree")]
    RanOffTree { position: usize },

    /// The bit sequence ended in the middle of a code
    #[error("bit sequence ends inside a code at position {position}")]
    TruncatedCode { position: usize },

    /// Symbol cannot be written in the `<symbol><path>` text form
    #[error("symbol {symbol:#04x} cannot be serialized (collides with path digits)")]
    UnserializableSymbol { symbol: u8 },

    /// Tree text does not follow the `<symbol><path>` grammar
    #[error("malformed tree text at position {position}: {reason}")]
    MalformedSerialization { position: usize, reason: &'static str },

    /// Decoded bytes are not valid UTF-8
    #[error("decoded message is not valid UTF-8")]
    InvalidUtf8,
}

/// Music index errors.
#[derive(Debug, Error)]
pub enum MusicIndexError {
    /// Album folder has no details.txt
    #[error("missing details file: {0}")]
    MissingDetails(PathBuf),

    /// Release date is not in YYYY-MM form
    #[error("invalid release date {0:?}: expected YYYY-MM")]
    InvalidReleaseDate(String),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
