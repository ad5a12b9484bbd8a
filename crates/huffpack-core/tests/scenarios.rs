use huffpack_core::container::{decode, encode, inspect};
use huffpack_core::{CodecConfig, ErrorKind, HuffmanCodec};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

#[test]
fn test_empty_input() {
    let codec = HuffmanCodec::new();
    let report = codec.compress(b"");

    let info = inspect(&report.output).unwrap();
    assert_eq!(info.original_length, 0);
    assert_eq!(info.symbols, 0);
    assert_eq!(info.payload_bytes, 0);

    assert_eq!(report.stats.original_size, 0);
    assert_eq!(report.stats.entropy, 0.0);
    assert_eq!(report.stats.compressed_size, report.output.len() as u64);

    let back = codec.decompress(&report.output).unwrap();
    assert!(back.output.is_empty());
    assert_eq!(back.stats.decoded_bytes, Some(0));
}

#[test]
fn test_single_repeated_byte() {
    let input = b"AAAAAAAAAA";
    let encoded = encode(input, &CodecConfig::default());
    // one bit per occurrence, two payload bytes
    assert_eq!(encoded.payload_bits, 10);

    let info = inspect(&encoded.bytes).unwrap();
    assert_eq!(info.symbols, 1);
    assert_eq!(info.payload_bytes, 2);
    assert_eq!(info.padding, 6);

    let report = HuffmanCodec::new().compress(input);
    assert_eq!(report.stats.entropy, 0.0);
    assert_eq!(decode(&report.output).unwrap().data, input);
}

#[test]
fn test_abracadabra() {
    let input = b"ABRACADABRA";
    let report = HuffmanCodec::new().compress(input);

    assert!((report.stats.entropy - 2.04).abs() < 0.01);

    let encoded = encode(input, &CodecConfig::default());
    assert!(encoded.payload_bits < 88);

    // header dominates a tiny input
    let ratio = report.stats.ratio.unwrap();
    assert!(ratio < 1.0);
    assert!((ratio - 11.0 / report.output.len() as f64).abs() < 1e-12);

    let back = HuffmanCodec::new().decompress(&report.output).unwrap();
    assert_eq!(back.output, input);
}

#[test]
fn test_random_megabyte() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut input = vec![0u8; 1 << 20];
    rng.fill_bytes(&mut input);

    let codec = HuffmanCodec::new();
    let report = codec.compress(&input);

    assert!((report.stats.entropy - 8.0).abs() < 0.01);
    let ratio = report.stats.ratio.unwrap();
    assert!(ratio > 0.95 && ratio <= 1.0, "ratio = {ratio}");

    let back = codec.decompress(&report.output).unwrap();
    assert_eq!(back.output, input);
}

#[test]
fn test_truncated_container_fails() {
    let report = HuffmanCodec::new().compress(b"ABRACADABRA");
    let truncated = &report.output[..report.output.len() - 1];
    let err = HuffmanCodec::new().decompress(truncated).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptFormat);
}

#[test]
fn test_skewed_text_compresses() {
    let input = "the quick brown fox jumps over the lazy dog. ".repeat(200);
    let report = HuffmanCodec::new().compress(input.as_bytes());
    assert!(report.stats.ratio.unwrap() > 1.5);
    assert_eq!(decode(&report.output).unwrap().data, input.as_bytes());
}

#[test]
fn test_parallel_invocations() {
    let codec = HuffmanCodec::new();
    let inputs: Vec<Vec<u8>> = (0..8u8)
        .map(|i| (0..4096u32).map(|n| (n % (i as u32 + 2)) as u8).collect())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let codec = &codec;
                scope.spawn(move || {
                    let report = codec.compress(input);
                    codec.decompress(&report.output).unwrap().output
                })
            })
            .collect();

        for (handle, input) in handles.into_iter().zip(&inputs) {
            assert_eq!(&handle.join().unwrap(), input);
        }
    });
}
