//! Integration tests for the full huffdex pipeline.
//!
//! These tests verify end-to-end behavior: message -> frequency table ->
//! tree -> bits -> text transport -> tree + bits -> message, plus the
//! hashtable and music index working together.

use huffdex_core::{
    codec::{Decoder, Encoder, SecretMessage},
    hashtable::Hashtable,
    metrics::CodecMetrics,
    music_index::{create_index, ReleaseDate, DETAILS_FILE},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;

/// Encode, move through the text form, decode.
#[test]
fn test_full_pipeline_text_transport() {
    let input = "hello world! this is a test of the full pipeline with some repetition: aaaaaaaaaa bbbbbbbbbb";

    let mut encoder = Encoder::new();
    let message = encoder.encode(input);

    let (tree_text, bit_text) = message.to_parts().expect("serialization failed");
    println!("Tree: {tree_text}");
    println!("Bits: {bit_text}");

    let received = SecretMessage::from_parts(&tree_text, &bit_text).expect("deserialization failed");
    let decoded = Decoder::new(&received.tree)
        .decode_to_string(&received.bits)
        .expect("decode failed");

    assert_eq!(decoded, input, "output doesn't match input");
}

/// Known encodings stay stable.
#[test]
fn test_known_encodings() {
    let bike = Encoder::new().encode("bike");
    assert_eq!(bike.bits.to_string(), "00101101");

    let skewed = Encoder::new().encode("BACADAEAFABBAAAGAH");
    assert_eq!(
        skewed.bits.to_string(),
        "1110100001001010 1001011011111100 0110001101"
    );
    assert_eq!(
        skewed.tree.serialize().expect("serialize failed"),
        "A0C1000D1001E1010F1011G1100H1101B111"
    );
}

/// Test with all symbols present (full 256-byte alphabet).
#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255).collect();
    let message = Encoder::new().encode(&input);

    // Every symbol appears once, so every code is 8 bits long.
    assert_eq!(message.tree.leaf_count(), 256);
    assert_eq!(message.tree.depth(), 8);
    assert_eq!(message.bits.len(), 256 * 8);

    assert_eq!(message.decode().expect("decode failed"), input);
}

/// Seeded random messages round trip through the codec.
#[test]
fn test_seeded_messages() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let alphabet = b"abcdefghijklmnopqrstuvwxyz .,!?";

    for _ in 0..50 {
        let len = rng.gen_range(0..400);
        let input: Vec<u8> = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();

        let message = Encoder::new().encode(&input);
        assert_eq!(message.decode().expect("decode failed"), input);
        assert!(message.bits.len() <= input.len() * 8);
    }
}

/// Metrics follow a batch of encode/decode runs.
#[test]
fn test_metrics_over_pipeline() {
    let mut metrics = CodecMetrics::new();
    let inputs = ["bike", "BACADAEAFABBAAAGAH", "aaaa"];

    for input in inputs {
        let message = Encoder::new().encode(input);
        metrics.record_encode(input.len(), &message);
        let decoded = message.decode().ok();
        metrics.record_decode(decoded.as_ref().map(Vec::len));
    }
    metrics.complete();

    assert_eq!(metrics.messages_encoded, 3);
    assert_eq!(metrics.messages_decoded, 3);
    assert_eq!(metrics.decode_failures, 0);
    assert_eq!(metrics.input_bytes, 26);
    assert_eq!(metrics.encoded_bits, 8 + 42 + 4);
    assert!(metrics.compression_ratio() < 1.0);
}

/// Bucket count goes 3 -> 27 on the ninth put and every key stays reachable.
#[test]
fn test_hashtable_growth() {
    let mut table = Hashtable::with_buckets(3);

    for i in 0..8 {
        table.put(format!("key{i}"), i);
    }
    assert_eq!(table.num_buckets(), 3);

    table.put("key8", 8);
    assert_eq!(table.num_buckets(), 27);
    assert_eq!(table.stats().resizes, 1);

    for i in 0..9 {
        assert_eq!(table.get(&format!("key{i}")), Some(&i));
    }
}

/// Scan a library, write a playlist, and ship the index listing through the codec.
#[test]
fn test_music_library_to_playlist() {
    let library = tempfile::tempdir().expect("tempdir failed");
    let out = tempfile::tempdir().expect("tempdir failed");

    let albums = [
        ("Wilco", "Yankee Hotel Foxtrot", "2002-04"),
        ("Wilco", "A Ghost Is Born", "2004-06"),
        ("Spoon", "Gimme Fiction", "2005-05"),
        ("Spoon", "Kill the Moonlight", "2002-08"),
    ];
    for (artist, album, date) in albums {
        let dir = library.path().join(artist).join(album);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DETAILS_FILE), format!("{date}\n")).unwrap();
        fs::write(dir.join("01 Intro.m4p"), album).unwrap();
    }

    let (index, warnings) = create_index(library.path()).expect("scan failed");
    assert!(warnings.is_empty());
    assert_eq!(index.num_dates(), 4);

    let start: ReleaseDate = "2002-01".parse().unwrap();
    let end: ReleaseDate = "2002-12".parse().unwrap();
    let playlist = index.write_playlist(out.path(), &start, &end).expect("playlist failed");

    assert_eq!(playlist.albums, 2);
    let mut written: Vec<_> = fs::read_dir(&playlist.dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    written.sort();
    assert_eq!(
        written,
        vec![
            "2002-04_Wilco_Yankee Hotel Foxtrot_01 Intro.m4p",
            "2002-08_Spoon_Kill the Moonlight_01 Intro.m4p",
        ]
    );

    let listing = index.to_string();
    let message = Encoder::new().encode(&listing);
    let decoded = Decoder::new(&message.tree)
        .decode_to_string(&message.bits)
        .expect("decode failed");
    assert_eq!(decoded, listing);
}
