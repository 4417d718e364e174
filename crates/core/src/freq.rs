//! Per-symbol occurrence counts.

use std::fmt;

/// Number of distinct byte symbols.
pub const NUM_SYMBOLS: usize = 256;

/// Direct-address table of symbol frequencies, indexed by byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqTable {
    counts: [u64; NUM_SYMBOLS],
}

impl FreqTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_SYMBOLS],
        }
    }

    /// Create a table populated from `input`.
    pub fn from_bytes(input: impl AsRef<[u8]>) -> Self {
        let mut table = Self::new();
        table.populate(input);
        table
    }

    /// Add one to the count of every byte in `input`.
    pub fn populate(&mut self, input: impl AsRef<[u8]>) {
        for &byte in input.as_ref() {
            self.counts[usize::from(byte)] += 1;
        }
    }

    /// Reset every count to zero.
    pub fn clear(&mut self) {
        self.counts = [0; NUM_SYMBOLS];
    }

    pub fn get_char_count(&self, symbol: u8) -> u64 {
        self.counts[usize::from(symbol)]
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Non-zero `(symbol, count)` entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .zip(self.counts.iter().copied())
            .filter(|&(_, count)| count > 0)
    }
}

impl Default for FreqTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FreqTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frequency:")?;
        for (symbol, count) in self.iter() {
            writeln!(f, "{:?} : {}", char::from(symbol), count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let table = FreqTable::new();
        assert_eq!(table.get_char_count(b'a'), 0);
        assert_eq!(table.get_char_count(b'A'), 0);
        assert_eq!(table.distinct_symbols(), 0);
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_start_populated() {
        let table = FreqTable::from_bytes("AaBbCcAaAa");
        assert_eq!(table.get_char_count(b'a'), 3);
        assert_eq!(table.get_char_count(b'A'), 3);
        assert_eq!(table.get_char_count(b'B'), 1);
        assert_eq!(table.get_char_count(b'b'), 1);
        assert_eq!(table.get_char_count(b'C'), 1);
        assert_eq!(table.get_char_count(b'c'), 1);
        assert_eq!(table.get_char_count(b'q'), 0);
        assert_eq!(table.get_char_count(b'X'), 0);
    }

    #[test]
    fn test_clear() {
        let mut table = FreqTable::from_bytes("AaBbCcAaAa");
        table.clear();
        for symbol in [b'a', b'A', b'B', b'b', b'C', b'c'] {
            assert_eq!(table.get_char_count(symbol), 0);
        }
        assert_eq!(table, FreqTable::new());
    }

    #[test]
    fn test_populate_accumulates() {
        let mut table = FreqTable::new();
        table.populate("ab");
        table.populate("b");
        assert_eq!(table.get_char_count(b'a'), 1);
        assert_eq!(table.get_char_count(b'b'), 2);
    }

    #[test]
    fn test_counts_sentence() {
        let table = FreqTable::from_bytes("A DEAD DAD CEDED A BAD BABE A BEADED ABACA BED");
        assert_eq!(table.get_char_count(b'A'), 11);
        assert_eq!(table.get_char_count(b'B'), 6);
        assert_eq!(table.get_char_count(b'C'), 2);
        assert_eq!(table.get_char_count(b'D'), 10);
        assert_eq!(table.get_char_count(b'E'), 7);
        assert_eq!(table.get_char_count(b'F'), 0);
        assert_eq!(table.get_char_count(b' '), 10);
        assert_eq!(table.distinct_symbols(), 6);
        assert_eq!(table.total(), 46);
    }

    #[test]
    fn test_full_byte_range() {
        let all: Vec<u8> = (0..=u8::MAX).collect();
        let table = FreqTable::from_bytes(&all);
        assert_eq!(table.distinct_symbols(), 256);
        assert_eq!(table.get_char_count(0), 1);
        assert_eq!(table.get_char_count(255), 1);
    }

    #[test]
    fn test_iter_ascending() {
        let table = FreqTable::from_bytes("cab");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(b'a', 1), (b'b', 1), (b'c', 1)]);
    }

    #[test]
    fn test_display() {
        let text = FreqTable::from_bytes("aab").to_string();
        assert_eq!(text, "Frequency:\n'a' : 2\n'b' : 1\n");
    }
}
