//! huffdex-core: chaining hashtable and Huffman message codec
//!
//! This library provides the core components for:
//! - Storing string-keyed values in a separate-chaining hashtable that grows 9x
//! - Compressing messages with a deterministic Huffman code
//! - Packing codes into a compact bit sequence and decoding them back
//! - Indexing a music library by album release date
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `hashtable`: Separate-chaining table with FNV hashing
//! - `bitseq`: Growable bit sequence over 16-bit words
//! - `freq`: Per-symbol frequency counts
//! - `huffman`: Tree construction, lookup and text serialization
//! - `lookup`: Symbol to code table
//! - `codec`: Encoder/decoder pipeline and the `SecretMessage` carrier
//! - `music_index`: Album index built on `hashtable`
//! - `metrics`: Observable codec and table behavior
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: Identical input always yields identical trees, codes and bucket layout
//! - **Observable**: Metrics for compression and table shape

pub mod bitseq;
pub mod codec;
pub mod error;
pub mod freq;
pub mod hashtable;
pub mod huffman;
pub mod lookup;
pub mod metrics;
pub mod music_index;

// Re-export commonly used types
pub use bitseq::BitSeq;
pub use codec::{Decoder, Encoder, SecretMessage};
pub use error::{Error, Result};
pub use freq::FreqTable;
pub use hashtable::{Hashtable, KeyValuePair};
pub use huffman::{create_encoding_tree, HuffNode, HuffmanTree};
pub use lookup::LookupTable;
pub use music_index::{create_index, Album, MusicIndex, ReleaseDate, Track};
