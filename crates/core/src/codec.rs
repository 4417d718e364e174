//! Message encoding and decoding.
//!
//! Encoding runs the full pipeline on one message:
//! frequency table -> Huffman tree -> lookup table -> packed bits.
//! The resulting [`SecretMessage`] carries only the tree and the bits; that
//! pair is all a [`Decoder`] needs to recover the message.
//!
//! # Example
//! ```
//! use huffdex_core::codec::Encoder;
//!
//! let mut encoder = Encoder::new();
//! let message = encoder.encode("bike");
//! assert_eq!(message.bits.get_bits_as_string(), "00101101");
//! assert_eq!(message.decode().unwrap(), b"bike");
//! ```

use crate::bitseq::BitSeq;
use crate::error::{HuffmanError, Result};
use crate::freq::FreqTable;
use crate::huffman::{create_encoding_tree, HuffmanTree};
use crate::lookup::LookupTable;

/// An encoded message together with the tree that encoded it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretMessage {
    pub bits: BitSeq,
    pub tree: HuffmanTree,
}

impl SecretMessage {
    pub fn new(bits: BitSeq, tree: HuffmanTree) -> Self {
        Self { bits, tree }
    }

    /// Decode with the carried tree.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Decoder::new(&self.tree).decode(&self.bits)
    }

    /// Text transport form: `(serialized tree, bit string)`.
    pub fn to_parts(&self) -> Result<(String, String)> {
        Ok((self.tree.serialize()?, self.bits.get_bits_as_string()))
    }

    /// Rebuild a message from the output of [`to_parts`](Self::to_parts).
    ///
    /// Spaces and any other non-bit characters in `bit_text` are ignored.
    pub fn from_parts(tree_text: &str, bit_text: &str) -> Result<Self> {
        let tree = HuffmanTree::deserialize(tree_text)?;
        let mut bits = BitSeq::new();
        bits.pack_bits(bit_text);
        Ok(Self { bits, tree })
    }
}

/// Runs the encoding pipeline and keeps every intermediate table of the
/// most recent run for inspection.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    freq_table: FreqTable,
    huffman_tree: HuffmanTree,
    lookup_table: LookupTable,
    encoded_bits: BitSeq,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `message`.
    ///
    /// An empty message yields the empty tree and no bits.
    pub fn encode(&mut self, message: impl AsRef<[u8]>) -> SecretMessage {
        let message = message.as_ref();

        self.freq_table = FreqTable::from_bytes(message);
        self.huffman_tree = create_encoding_tree(&self.freq_table);
        self.lookup_table = LookupTable::from_huffman_tree(&self.huffman_tree);

        let mut bits = BitSeq::new();
        for &symbol in message {
            bits.pack_bits(self.lookup_table.get_encoding(symbol));
        }
        self.encoded_bits = bits.clone();

        SecretMessage::new(bits, self.huffman_tree.clone())
    }

    pub fn freq_table(&self) -> &FreqTable {
        &self.freq_table
    }

    pub fn huffman_tree(&self) -> &HuffmanTree {
        &self.huffman_tree
    }

    pub fn lookup_table(&self) -> &LookupTable {
        &self.lookup_table
    }

    pub fn encoded_bits(&self) -> &BitSeq {
        &self.encoded_bits
    }
}

/// Walks a Huffman tree to turn bits back into symbols.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    tree: &'a HuffmanTree,
}

impl<'a> Decoder<'a> {
    pub fn new(tree: &'a HuffmanTree) -> Self {
        Self { tree }
    }

    /// Decode `bits`, emitting a symbol at every leaf and restarting at the root.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyTree` if there are bits but the tree has no root
    /// - `HuffmanError::RanOffTree` if a bit selects a missing child
    /// - `HuffmanError::TruncatedCode` if the bits stop partway down a code
    pub fn decode(&self, bits: &BitSeq) -> Result<Vec<u8>> {
        if bits.is_empty() {
            return Ok(Vec::new());
        }
        let root = self.tree.root().ok_or(HuffmanError::EmptyTree)?;

        let mut out = Vec::new();
        let mut node = root;
        let mut code_start = 0;

        for (position, bit) in bits.iter().enumerate() {
            node = node
                .child(bit)
                .ok_or(HuffmanError::RanOffTree { position })?;

            if let Some(symbol) = node.symbol() {
                out.push(symbol);
                node = root;
                code_start = position + 1;
            }
        }

        if code_start != bits.len() {
            return Err(HuffmanError::TruncatedCode {
                position: code_start,
            }
            .into());
        }
        Ok(out)
    }

    /// Decode and check that the result is UTF-8 text.
    pub fn decode_to_string(&self, bits: &BitSeq) -> Result<String> {
        let bytes = self.decode(bits)?;
        String::from_utf8(bytes).map_err(|_| HuffmanError::InvalidUtf8.into())
    }
}
