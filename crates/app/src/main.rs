//! huffdex command-line front end.

mod config;
mod input_gen;

use config::{Command, Config, MessageSource};
use huffdex_core::codec::{Decoder, Encoder, SecretMessage};
use huffdex_core::hashtable::Hashtable;
use huffdex_core::metrics::CodecMetrics;
use huffdex_core::music_index::{create_index, ReleaseDate};
use huffdex_core::Result;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            std::process::exit(2);
        }
    };

    if config.print_config {
        config.print();
    }

    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    match &config.command {
        Command::Encode { source } => encode(source, config.print_metrics),
        Command::Decode { tree, bits } => decode(tree, bits),
        Command::Demo { count, max_len } => demo(config.seed, *count, *max_len, config.print_metrics),
        Command::Index { library, out, start, end } => index(library, out.as_deref(), start, end, config.print_metrics),
    }
}

fn encode(source: &MessageSource, print_metrics: bool) -> Result<()> {
    let input = match source {
        MessageSource::Text(text) => text.clone().into_bytes(),
        MessageSource::File(path) => std::fs::read(path)?,
    };

    let mut metrics = CodecMetrics::new();
    let mut encoder = Encoder::new();
    let message = encoder.encode(&input);
    metrics.record_encode(input.len(), &message);
    metrics.complete();

    let (tree_text, bit_text) = message.to_parts()?;
    println!("Tree: {tree_text}");
    println!("Bits: {bit_text}");

    if print_metrics {
        println!();
        print!("{}", encoder.lookup_table());
        metrics.print_summary();
    }
    Ok(())
}

fn decode(tree_text: &str, bit_text: &str) -> Result<()> {
    let message = SecretMessage::from_parts(tree_text, bit_text)?;
    let decoded = Decoder::new(&message.tree).decode_to_string(&message.bits)?;
    println!("{decoded}");
    Ok(())
}

fn demo(seed: u64, count: usize, max_len: usize, print_metrics: bool) -> Result<()> {
    println!("Running demo: {count} messages, seed {seed}");

    let mut metrics = CodecMetrics::new();
    let mut sent: Hashtable<SecretMessage> = Hashtable::new();

    for (i, input) in input_gen::generate_messages(seed, count, max_len).iter().enumerate() {
        let message = Encoder::new().encode(input);
        metrics.record_encode(input.len(), &message);

        // Ship through the text form when the tree allows it.
        let received = match message.to_parts() {
            Ok((tree_text, bit_text)) => SecretMessage::from_parts(&tree_text, &bit_text)?,
            Err(e) => {
                eprintln!("  [{i}] {e}; decoding in memory");
                message.clone()
            }
        };

        let decoded = received.decode().ok().filter(|bytes| bytes == input.as_bytes());
        metrics.record_decode(decoded.as_ref().map(Vec::len));
        println!(
            "  [{i}] {} bytes -> {} bits {}",
            input.len(),
            message.bits.len(),
            if decoded.is_some() { "ok" } else { "MISMATCH" }
        );

        sent.put(format!("msg-{i}"), message);
    }
    metrics.complete();

    if print_metrics {
        metrics.print_summary();
        println!("=== Message Table ===");
        println!("{}", sent.stats());
        println!();
    }
    metrics.print_result();
    Ok(())
}

fn index(library: &Path, out: Option<&Path>, start: &ReleaseDate, end: &ReleaseDate, print_metrics: bool) -> Result<()> {
    let (music_index, warnings) = create_index(library)?;
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }

    print!("{music_index}");
    println!(
        "Indexed {} albums across {} release dates",
        music_index.num_albums(),
        music_index.num_dates()
    );
    if print_metrics {
        println!("Table: {}", music_index.table().stats());
    }

    if let Some(out) = out {
        let playlist = music_index.write_playlist(out, start, end)?;
        println!(
            "Playlist: {} albums, {} tracks -> {}",
            playlist.albums,
            playlist.tracks,
            playlist.dir.display()
        );
    }
    Ok(())
}
