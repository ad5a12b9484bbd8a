//! HuffPack - byte-oriented Huffman compression
//!
//! A canonical Huffman codec with a self-describing container format.
//!
//! # Key Features
//!
//! - **Canonical Trees**: Deterministic tie-breaking, so only the histogram is stored
//! - **Self-Describing Container**: Magic, version, symbol table and padding in the header
//! - **Corruption Detection**: Exact bit accounting plus an optional CRC-32C
//! - **Statistics**: Sizes, ratio and zero-order entropy per invocation
//!
//! # Example
//!
//! ```rust
//! use huffpack_core::{compress, decompress, HuffmanCodec};
//!
//! // Simple one-shot compression
//! let compressed = compress(b"ABRACADABRA");
//! let decompressed = decompress(&compressed)?;
//! assert_eq!(decompressed, b"ABRACADABRA");
//!
//! // With statistics
//! let codec = HuffmanCodec::new();
//! let report = codec.compress(b"ABRACADABRA");
//! assert_eq!(report.stats.original_size, 11);
//! assert_eq!(report.stats.compressed_size, report.output.len() as u64);
//! # Ok::<(), huffpack_core::Error>(())
//! ```

pub mod bits;
pub mod code;
pub mod container;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod tree;

mod file;

use std::path::Path;

// Re-exports
pub use code::CodeTable;
pub use container::{ContainerHeader, ContainerInfo, Flags};
pub use error::{Error, ErrorKind, Result};
pub use frequency::Histogram;
pub use stats::Stats;
pub use tree::HuffmanTree;

/// Container magic bytes
pub const MAGIC: [u8; 4] = *b"HUFF";

/// Container format version
pub const VERSION: u8 = 1;

/// Compress data with the default configuration
pub fn compress(input: &[u8]) -> Vec<u8> {
    container::encode(input, &CodecConfig::default()).bytes
}

/// Decompress a HuffPack container
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    container::decode(input).map(|decoded| decoded.data)
}

/// Codec configuration
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Store a CRC-32C of the payload
    pub checksum: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { checksum: true }
    }
}

/// Codec operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Compress => "compress",
            Operation::Decompress => "decompress",
        }
    }
}

/// Output of one operation together with its statistics
#[derive(Debug, Clone)]
pub struct Report {
    pub output: Vec<u8>,
    pub stats: Stats,
}

/// HuffPack codec
///
/// Holds configuration only; every call is independent, so one codec can
/// be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    /// Create a codec with default configuration
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Create a codec with custom configuration
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress data and report statistics
    pub fn compress(&self, input: &[u8]) -> Report {
        let encoded = container::encode(input, &self.config);
        let stats = Stats::new(
            input.len() as u64,
            encoded.bytes.len() as u64,
            &encoded.histogram,
        );
        Report {
            output: encoded.bytes,
            stats,
        }
    }

    /// Decompress a container and report statistics
    pub fn decompress(&self, input: &[u8]) -> Result<Report> {
        let decoded = container::decode(input)?;
        let stats = Stats::new(
            decoded.data.len() as u64,
            input.len() as u64,
            &decoded.histogram,
        )
        .with_decoded_bytes(decoded.data.len() as u64);
        Ok(Report {
            output: decoded.data,
            stats,
        })
    }

    /// Run `operation` from `input` to `output`.
    ///
    /// The output file is only created once the whole result is in memory,
    /// so a failed decode never leaves a partial file behind.
    pub fn run(&self, operation: Operation, input: &Path, output: &Path) -> Result<Stats> {
        let data = file::read_input(input)?;

        let report = match operation {
            Operation::Compress => self.compress(&data),
            Operation::Decompress => self.decompress(&data)?,
        };

        file::write_output(output, &report.output)?;
        log::info!(
            "{} {} -> {}: {} -> {} bytes",
            operation.as_str(),
            input.display(),
            output.display(),
            data.len(),
            report.output.len()
        );
        Ok(report.stats)
    }

    /// Compress the file at `input` into `output`
    pub fn compress_file(&self, input: &Path, output: &Path) -> Result<Stats> {
        self.run(Operation::Compress, input, output)
    }

    /// Decompress the container at `input` into `output`
    pub fn decompress_file(&self, input: &Path, output: &Path) -> Result<Stats> {
        self.run(Operation::Decompress, input, output)
    }

    /// Read and validate a container header from a file
    pub fn inspect_file(&self, input: &Path) -> Result<ContainerInfo> {
        let data = file::read_input(input)?;
        container::inspect(&data)
    }
}
