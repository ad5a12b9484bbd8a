//! Compression statistics

use serde::Serialize;

use crate::frequency::Histogram;

/// Per-invocation statistics, serialized with camelCase keys
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Length of the uncompressed data in bytes
    pub original_size: u64,
    /// Total container length in bytes, header included
    pub compressed_size: u64,
    /// `original_size / compressed_size`, `None` when the container is empty
    pub ratio: Option<f64>,
    /// Zero-order entropy of the source, bits per symbol
    pub entropy: f64,
    /// Symbols reproduced by a decompression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_bytes: Option<u64>,
}

impl Stats {
    pub fn new(original_size: u64, compressed_size: u64, histogram: &Histogram) -> Self {
        let ratio = (compressed_size > 0).then(|| original_size as f64 / compressed_size as f64);
        Self {
            original_size,
            compressed_size,
            ratio,
            entropy: shannon_entropy(histogram),
            decoded_bytes: None,
        }
    }

    /// Attach the decoded symbol count
    pub fn with_decoded_bytes(mut self, decoded: u64) -> Self {
        self.decoded_bytes = Some(decoded);
        self
    }
}

/// Shannon entropy over the non-zero symbols of `histogram`.
///
/// Empty and single-symbol histograms yield 0.
pub fn shannon_entropy(histogram: &Histogram) -> f64 {
    let total = histogram.total() as f64;
    if total == 0.0 {
        return 0.0;
    }

    let entropy: f64 = histogram
        .symbols()
        .map(|(_, count)| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();

    // a single symbol sums to -0.0
    if entropy > 0.0 {
        entropy
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_edge_cases() {
        assert_eq!(shannon_entropy(&Histogram::empty()), 0.0);
        assert_eq!(shannon_entropy(&Histogram::from_bytes(b"AAAAAAAAAA")), 0.0);
    }

    #[test]
    fn test_entropy_uniform() {
        assert!((shannon_entropy(&Histogram::from_bytes(b"ab")) - 1.0).abs() < 1e-12);
        let all: Vec<u8> = (0..=255u8).collect();
        assert!((shannon_entropy(&Histogram::from_bytes(&all)) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_abracadabra() {
        let entropy = shannon_entropy(&Histogram::from_bytes(b"ABRACADABRA"));
        assert!((entropy - 2.0404).abs() < 1e-3, "entropy = {entropy}");
    }

    #[test]
    fn test_ratio_absent_for_empty_container() {
        let stats = Stats::new(0, 0, &Histogram::empty());
        assert_eq!(stats.ratio, None);
    }

    #[test]
    fn test_ratio() {
        let stats = Stats::new(100, 40, &Histogram::from_bytes(b"x"));
        assert_eq!(stats.ratio, Some(2.5));
        assert_eq!(stats.decoded_bytes, None);
        assert_eq!(stats.with_decoded_bytes(100).decoded_bytes, Some(100));
    }

    #[test]
    fn test_json_keys() {
        let stats = Stats::new(11, 69, &Histogram::from_bytes(b"ABRACADABRA"));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["originalSize"], 11);
        assert_eq!(json["compressedSize"], 69);
        assert!(json["ratio"].is_f64());
        assert!(json["entropy"].is_f64());
        assert!(json.get("decodedBytes").is_none());

        let json = serde_json::to_value(stats.with_decoded_bytes(11)).unwrap();
        assert_eq!(json["decodedBytes"], 11);
    }

    #[test]
    fn test_json_null_ratio() {
        let stats = Stats::new(0, 0, &Histogram::empty());
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"originalSize":0,"compressedSize":0,"ratio":null,"entropy":0.0}"#
        );
    }
}
