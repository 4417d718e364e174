//! Metrics collection and reporting.
//!
//! This module provides observable insights into what the codec and the
//! hashtable are doing:
//! - Bytes in, bits out, and the resulting compression ratio
//! - Shape of the Huffman tree (distinct symbols, depth)
//! - Timing information
//! - Bucket occupancy of a hashtable
//!
//! # Design
//!
//! Metrics are plain structs updated explicitly by the caller; nothing here
//! is global or thread-safe. For multi-threaded use, keep per-thread metrics
//! and merge them at the end.

use crate::codec::SecretMessage;
use std::fmt;
use std::time::{Duration, Instant};

/// Counters and timings for a batch of encode/decode runs.
#[derive(Debug, Clone)]
pub struct CodecMetrics {
    // === Timing ===
    /// When collection started
    pub start_time: Instant,

    /// When collection ended (set on completion)
    pub end_time: Option<Instant>,

    // === Encoding ===
    /// Messages encoded
    pub messages_encoded: u64,

    /// Total raw message bytes fed to the encoder
    pub input_bytes: u64,

    /// Total bits produced by the encoder
    pub encoded_bits: u64,

    /// Largest number of distinct symbols seen in one message
    pub max_distinct_symbols: usize,

    /// Deepest Huffman tree built
    pub max_tree_depth: usize,

    // === Decoding ===
    /// Messages decoded successfully
    pub messages_decoded: u64,

    /// Total bytes produced by the decoder
    pub output_bytes: u64,

    /// Decode attempts that failed
    pub decode_failures: u64,
}

impl CodecMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            messages_encoded: 0,
            input_bytes: 0,
            encoded_bits: 0,
            max_distinct_symbols: 0,
            max_tree_depth: 0,
            messages_decoded: 0,
            output_bytes: 0,
            decode_failures: 0,
        }
    }

    /// Record one finished encode of a `raw_len`-byte message.
    pub fn record_encode(&mut self, raw_len: usize, message: &SecretMessage) {
        self.messages_encoded += 1;
        self.input_bytes += raw_len as u64;
        self.encoded_bits += message.bits.len() as u64;
        self.max_distinct_symbols = self.max_distinct_symbols.max(message.tree.leaf_count());
        self.max_tree_depth = self.max_tree_depth.max(message.tree.depth());
    }

    /// Record one decode attempt.
    pub fn record_decode(&mut self, decoded_len: Option<usize>) {
        match decoded_len {
            Some(len) => {
                self.messages_decoded += 1;
                self.output_bytes += len as u64;
            }
            None => self.decode_failures += 1,
        }
    }

    /// Mark collection as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (encoded bits / raw bits).
    ///
    /// Returns 0.0 if nothing was encoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / (self.input_bytes * 8) as f64
        }
    }

    /// Average code length in bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_bytes as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Codec Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Encoding ===");
        println!("Messages: {}", self.messages_encoded);
        println!("Input: {} bytes", self.input_bytes);
        println!("Encoded: {} bits ({} bytes packed)", self.encoded_bits, self.encoded_bits.div_ceil(8));
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Bits/symbol: {:.3}", self.bits_per_symbol());
        println!("Max distinct symbols: {}", self.max_distinct_symbols);
        println!("Max tree depth: {}", self.max_tree_depth);
        println!();

        println!("=== Decoding ===");
        println!("Messages: {}", self.messages_decoded);
        println!("Output: {} bytes", self.output_bytes);
        println!("Failures: {}", self.decode_failures);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.decode_failures == 0 && self.input_bytes == self.output_bytes {
            println!("✓ Round trip completed successfully");
            println!(
                "  {} messages, {} bytes in {} ms",
                self.messages_encoded,
                self.input_bytes,
                self.duration().as_millis()
            );
        } else if self.decode_failures > 0 {
            println!("✗ Round trip failed: {} decode failures", self.decode_failures);
        } else {
            println!("✗ Round trip failed: size mismatch ({} != {})", self.input_bytes, self.output_bytes);
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             messages_encoded={}\n\
             input_bytes={}\n\
             encoded_bits={}\n\
             compression_ratio={:.4}\n\
             max_distinct_symbols={}\n\
             max_tree_depth={}\n\
             messages_decoded={}\n\
             output_bytes={}\n\
             decode_failures={}\n",
            self.duration().as_millis(),
            self.messages_encoded,
            self.input_bytes,
            self.encoded_bits,
            self.compression_ratio(),
            self.max_distinct_symbols,
            self.max_tree_depth,
            self.messages_decoded,
            self.output_bytes,
            self.decode_failures,
        )
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of a hashtable's bucket occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub num_buckets: usize,
    pub num_elements: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Buckets holding no pairs
    pub empty_buckets: usize,
    /// Resizes performed since creation
    pub resizes: usize,
}

impl TableStats {
    /// Elements stored divided by bucket count.
    pub fn load_factor(&self) -> f64 {
        if self.num_buckets == 0 {
            0.0
        } else {
            self.num_elements as f64 / self.num_buckets as f64
        }
    }

    /// Export stats as a simple text format.
    pub fn export_text(&self) -> String {
        format!(
            "num_buckets={}\n\
             num_elements={}\n\
             load_factor={:.4}\n\
             longest_chain={}\n\
             empty_buckets={}\n\
             resizes={}\n",
            self.num_buckets,
            self.num_elements,
            self.load_factor(),
            self.longest_chain,
            self.empty_buckets,
            self.resizes,
        )
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements in {} buckets (load {:.2}, longest chain {}, {} empty, {} resizes)",
            self.num_elements,
            self.num_buckets,
            self.load_factor(),
            self.longest_chain,
            self.empty_buckets,
            self.resizes
        )
    }
}
