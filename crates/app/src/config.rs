//! Configuration for the huffdex application.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including randomized defaults that are reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it then runs the `demo`
//! command with seeded random messages. All defaults are printed with
//! `--print-config` so runs are reproducible.

use huffdex_core::music_index::{ReleaseDate, DEFAULT_END, DEFAULT_START};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Where the `encode` command reads its message from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    Text(String),
    File(PathBuf),
}

/// The operation to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Encode one message and print its tree and bits
    Encode { source: MessageSource },

    /// Decode a tree/bits pair produced by `encode`
    Decode { tree: String, bits: String },

    /// Round-trip a batch of generated messages
    Demo { count: usize, max_len: usize },

    /// Index a music library and optionally write a playlist
    Index {
        library: PathBuf,
        out: Option<PathBuf>,
        start: ReleaseDate,
        end: ReleaseDate,
    },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    /// Seed for generated messages
    pub seed: u64,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

/// Take the value following a flag.
fn value<'a>(args: &'a [String], i: &mut usize, what: &str) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires {what}"))
}

fn parse_date(s: &str) -> Result<ReleaseDate, String> {
    s.parse().map_err(|e| format!("{e}"))
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// The first argument may name a command (`encode`, `decode`, `demo`,
    /// `index`); without one, `demo` runs. If no seed is given, a time-based
    /// seed is used and the randomized demo sizes follow from it.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let (name, flags) = match args.first() {
            Some(first) if !first.starts_with('-') => (first.as_str(), &args[1..]),
            _ => ("demo", args),
        };

        let mut text: Option<String> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut tree: Option<String> = None;
        let mut bits: Option<String> = None;
        let mut seed: Option<u64> = None;
        let mut count: Option<usize> = None;
        let mut max_len: Option<usize> = None;
        let mut library: Option<PathBuf> = None;
        let mut out: Option<PathBuf> = None;
        let mut start: Option<ReleaseDate> = None;
        let mut end: Option<ReleaseDate> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < flags.len() {
            match flags[i].as_str() {
                "--text" => text = Some(value(flags, &mut i, "a message")?.to_string()),
                "--in" => input_file = Some(PathBuf::from(value(flags, &mut i, "a path")?)),
                "--tree" => tree = Some(value(flags, &mut i, "tree text")?.to_string()),
                "--bits" => bits = Some(value(flags, &mut i, "a bit string")?.to_string()),
                "--seed" => {
                    seed = Some(value(flags, &mut i, "a number")?.parse().map_err(|_| "invalid seed")?);
                }
                "--count" => {
                    count = Some(value(flags, &mut i, "a number")?.parse().map_err(|_| "invalid count")?);
                }
                "--len" => {
                    max_len = Some(value(flags, &mut i, "a number")?.parse().map_err(|_| "invalid len")?);
                }
                "--library" => library = Some(PathBuf::from(value(flags, &mut i, "a path")?)),
                "--out" => out = Some(PathBuf::from(value(flags, &mut i, "a path")?)),
                "--start" => start = Some(parse_date(value(flags, &mut i, "a date")?)?),
                "--end" => end = Some(parse_date(value(flags, &mut i, "a date")?)?),
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => {
                    return Err(format!("unknown argument: {other}"));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        // Generate defaults using seed
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let command = match name {
            "encode" => {
                let source = match (text, input_file) {
                    (Some(t), None) => MessageSource::Text(t),
                    (None, Some(p)) => MessageSource::File(p),
                    (Some(_), Some(_)) => return Err("encode takes --text or --in, not both".to_string()),
                    (None, None) => return Err("encode requires --text or --in".to_string()),
                };
                Command::Encode { source }
            }
            "decode" => Command::Decode {
                tree: tree.ok_or("decode requires --tree")?,
                bits: bits.ok_or("decode requires --bits")?,
            },
            "demo" => Command::Demo {
                count: count.unwrap_or_else(|| rng.gen_range(3..=8)),
                max_len: max_len.unwrap_or_else(|| rng.gen_range(20..=200)),
            },
            "index" => {
                let start = match start {
                    Some(date) => date,
                    None => parse_date(DEFAULT_START)?,
                };
                let end = match end {
                    Some(date) => date,
                    None => parse_date(DEFAULT_END)?,
                };
                if start > end {
                    return Err(format!("--start {start} is after --end {end}"));
                }
                Command::Index {
                    library: library.ok_or("index requires --library")?,
                    out,
                    start,
                    end,
                }
            }
            other => return Err(format!("unknown command: {other}")),
        };

        Ok(Config {
            command,
            seed,
            print_config,
            print_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.command {
            Command::Encode { source } => {
                println!("Command: encode");
                match source {
                    MessageSource::Text(text) => println!("Message: {text:?}"),
                    MessageSource::File(path) => println!("Input file: {}", path.display()),
                }
            }
            Command::Decode { tree, bits } => {
                println!("Command: decode");
                println!("Tree: {tree:?}");
                println!("Bits: {} chars", bits.len());
            }
            Command::Demo { count, max_len } => {
                println!("Command: demo");
                println!("Seed: {}", self.seed);
                println!("Messages: {count}");
                println!("Max message length: {max_len} bytes");
            }
            Command::Index { library, out, start, end } => {
                println!("Command: index");
                println!("Library: {}", library.display());
                match out {
                    Some(dir) => println!("Playlist dir: {}", dir.display()),
                    None => println!("Playlist dir: (none)"),
                }
                println!("Range: {start} through {end}");
            }
        }
        println!("Metrics: {}", if self.print_metrics { "on" } else { "off" });
        println!();
    }
}

fn print_help() {
    println!("huffdex: Huffman message codec and music library index");
    println!();
    println!("USAGE:");
    println!("    huffdex [COMMAND] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    encode                  Encode a message, print tree and bits");
    println!("    decode                  Decode a tree/bits pair");
    println!("    demo                    Round-trip seeded random messages (default)");
    println!("    index                   Index a music library by release date");
    println!();
    println!("OPTIONS:");
    println!("    --text <S>              Message to encode");
    println!("    --in <PATH>             File to encode");
    println!("    --tree <S>              Tree text for decode");
    println!("    --bits <S>              Bit string for decode (spaces ignored)");
    println!();
    println!("    --seed <N>              Random seed for determinism");
    println!("    --count <N>             Demo message count (default: random 3-8)");
    println!("    --len <N>               Demo max message length (default: random 20-200)");
    println!();
    println!("    --library <DIR>         Music library root (<artist>/<album>/details.txt)");
    println!("    --out <DIR>             Write a playlist folder under DIR");
    println!("    --start <YYYY-MM>       First release date in playlist (default: {DEFAULT_START})");
    println!("    --end <YYYY-MM>         Last release date in playlist (default: {DEFAULT_END})");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffdex                                          # Demo with random defaults");
    println!("    huffdex demo --seed 42                           # Deterministic demo");
    println!("    huffdex encode --text bike                       # Prints tree and bits");
    println!("    huffdex decode --tree b00e01i10k11 --bits 00101101");
    println!("    huffdex index --library MyMusic --out MyPlaylists --start 2004-01 --end 2004-12");
    println!();
}
