//! Growable bit sequence packed into 16-bit words.
//!
//! `BitSeq` stores encoded Huffman messages. Bits are packed MSB-first:
//! bit 0 of the sequence is the most significant bit of the first word.
//!
//! # Padding Rules
//! - The last word may be partially filled; its unused low bits stay zero.
//! - The exact bit count is tracked separately, so padding never shows up in
//!   `get_bit`, iteration or the string form.
//!
//! # Example
//! ```
//! use huffdex_core::bitseq::BitSeq;
//!
//! let mut bits = BitSeq::new();
//! bits.pack_bits("1111");
//! bits.pack_bits("110");
//!
//! assert_eq!(bits.get_bits_as_string(), "1111110");
//! assert!(bits.get_bit(4).unwrap());
//! ```

use crate::error::{BitSeqError, Result};
use std::fmt;
use std::iter::FusedIterator;

/// Number of bits held by one backing word.
pub const WORD_BITS: usize = 16;

/// A sequence of bits with exact length tracking.
///
/// # Invariants
/// - `words.len() == len.div_ceil(WORD_BITS)`
/// - Bits at positions `>= len` in the last word are zero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSeq {
    /// Packed storage, MSB-first within each word
    words: Vec<u16>,
    /// Number of valid bits
    len: usize,
}

impl BitSeq {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
        }
    }

    /// Rebuild a sequence from raw words and an exact bit count.
    ///
    /// # Errors
    /// Returns `BitSeqError::LengthMismatch` if `len` needs a different number
    /// of words than supplied. Padding bits past `len` are cleared.
    pub fn from_words(mut words: Vec<u16>, len: usize) -> Result<Self> {
        if words.len() != len.div_ceil(WORD_BITS) {
            return Err(BitSeqError::LengthMismatch {
                len,
                words: words.len(),
            }
            .into());
        }

        let used = len % WORD_BITS;
        if used != 0 {
            if let Some(last) = words.last_mut() {
                *last &= !(u16::MAX >> used);
            }
        }

        Ok(Self { words, len })
    }

    /// Append one bit.
    pub fn push_bit(&mut self, bit: bool) {
        let offset = self.len % WORD_BITS;

        // Current word is full (or there is none yet)
        if offset == 0 {
            self.words.push(0);
        }

        if bit {
            if let Some(word) = self.words.last_mut() {
                *word |= 1 << (WORD_BITS - 1 - offset);
            }
        }

        self.len += 1;
    }

    /// Append every `'0'`/`'1'` in `bit_chars`; anything else is skipped.
    pub fn pack_bits(&mut self, bit_chars: &str) {
        for c in bit_chars.chars() {
            match c {
                '0' => self.push_bit(false),
                '1' => self.push_bit(true),
                _ => {}
            }
        }
    }

    /// Read the bit at 0-based position `index`.
    ///
    /// # Errors
    /// Returns `BitSeqError::IndexOutOfRange` if `index >= len()`.
    pub fn get_bit(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(BitSeqError::IndexOutOfRange {
                index,
                len: self.len,
            }
            .into());
        }
        Ok(self.bit_unchecked(index))
    }

    fn bit_unchecked(&self, index: usize) -> bool {
        let word = self.words[index / WORD_BITS];
        (word >> (WORD_BITS - 1 - index % WORD_BITS)) & 1 == 1
    }

    /// Render exactly `len()` bits, with a space after every full word.
    ///
    /// A 20-bit sequence renders as 16 digits, a space, then 4 digits.
    pub fn get_bits_as_string(&self) -> String {
        let mut out = String::with_capacity(self.len + self.len / WORD_BITS);
        for (i, bit) in self.iter().enumerate() {
            if i > 0 && i % WORD_BITS == 0 {
                out.push(' ');
            }
            out.push(if bit { '1' } else { '0' });
        }
        out
    }

    /// Return the number of valid bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing words, including padding in the last one.
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            seq: self,
            position: 0,
        }
    }
}

impl fmt::Display for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_bits_as_string())
    }
}

impl<'a> IntoIterator for &'a BitSeq {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reads bits of a [`BitSeq`] front to back.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    seq: &'a BitSeq,
    /// Next bit to yield
    position: usize,
}

impl Bits<'_> {
    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.position >= self.seq.len {
            return None;
        }
        let bit = self.seq.bit_unchecked(self.position);
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}
