//! Sample message generation for the demo command.
//!
//! When no message is given, we generate messages with interesting
//! compression characteristics: mix of skewed and flat symbol distributions.
//!
//! # Design
//!
//! Each generated message is one of:
//! - Prose built from a small word list (skewed, text-like)
//! - Long runs of a few letters (very skewed, short codes)
//! - Uniformly random printable ASCII (flat, little to gain)
//!
//! This makes the compression behavior visible in metrics.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "the", "secret", "message", "is", "hidden", "in", "plain", "sight", "a", "bike", "tree", "leaf", "bucket",
    "key", "value", "and", "of", "to", "album", "released",
];

/// Generate `count` messages of at most `max_len` bytes each.
///
/// The same `seed` always produces the same messages.
pub fn generate_messages(seed: u64, count: usize, max_len: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..=max_len);
            generate_message(&mut rng, len)
        })
        .collect()
}

/// Generate one message of exactly `len` bytes.
pub fn generate_message(rng: &mut ChaCha8Rng, len: usize) -> String {
    let mut message = String::with_capacity(len);

    match rng.gen_range(0..10) {
        // 50% prose
        0..=4 => {
            while message.len() < len {
                if !message.is_empty() {
                    message.push(' ');
                }
                message.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
            }
        }

        // 30% runs
        5..=7 => {
            let letters: Vec<char> = (0..rng.gen_range(1..=3))
                .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
                .collect();
            while message.len() < len {
                let letter = letters[rng.gen_range(0..letters.len())];
                let run = rng.gen_range(1..=12);
                message.extend(std::iter::repeat(letter).take(run));
            }
        }

        // 20% flat
        _ => {
            while message.len() < len {
                message.push(char::from(rng.gen_range(b' '..=b'~')));
            }
        }
    }

    // All characters are ASCII, so truncation lands on a char boundary.
    message.truncate(len);
    message
}
