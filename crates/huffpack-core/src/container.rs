//! Container format for HuffPack
//!
//! ```text
//! ┌─────────┬─────────┬───────┬──────────────┬──────────────┬──────────────────┬─────────┬───────────┬──────────┐
//! │ Magic   │ Version │ Flags │ Original len │ Symbol count │ Symbol table     │ Padding │ CRC-32C   │ Payload  │
//! │ 4 bytes │ 1 byte  │ 1 byte│ u64 LE       │ u16 LE       │ n × (u8, u64 LE) │ 1 byte  │ u32 LE    │ N bytes  │
//! └─────────┴─────────┴───────┴──────────────┴──────────────┴──────────────────┴─────────┴───────────┴──────────┘
//!
//! Symbol table: ascending byte value, non-zero frequencies only.
//! CRC-32C covers the payload and is present iff CHECKSUM_PRESENT is set.
//! Payload: MSB-first code words, final byte zero-padded.
//! ```

use bitflags::bitflags;
use serde::Serialize;

use crate::bits::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::frequency::{Histogram, ALPHABET_SIZE};
use crate::tree::HuffmanTree;
use crate::{CodecConfig, Error, Result, MAGIC, VERSION};

bitflags! {
    /// Container flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// CRC-32C of the payload follows the padding byte
        const CHECKSUM_PRESENT = 0b0000_0001;
    }
}

/// Bytes before the symbol table: magic, version, flags, length, count
const PREFIX_LEN: usize = 4 + 1 + 1 + 8 + 2;

/// Bytes per symbol table entry
const ENTRY_LEN: usize = 1 + 8;

/// Container header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u8,
    pub flags: Flags,
    pub original_len: u64,
    pub histogram: Histogram,
    pub padding: u8,
    pub checksum: Option<u32>,
}

impl ContainerHeader {
    /// Serialized size in bytes
    pub fn encoded_len(&self) -> usize {
        let checksum = if self.flags.contains(Flags::CHECKSUM_PRESENT) { 4 } else { 0 };
        PREFIX_LEN + self.histogram.distinct() * ENTRY_LEN + 1 + checksum
    }

    /// Serialize header, magic included
    pub fn serialize(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&MAGIC);
        buf.push(self.version);
        buf.push(self.flags.bits());
        buf.extend_from_slice(&self.original_len.to_le_bytes());
        buf.extend_from_slice(&(self.histogram.distinct() as u16).to_le_bytes());

        for (symbol, count) in self.histogram.symbols() {
            buf.push(symbol);
            buf.extend_from_slice(&count.to_le_bytes());
        }

        buf.push(self.padding);

        if self.flags.contains(Flags::CHECKSUM_PRESENT) {
            buf.extend_from_slice(&self.checksum.unwrap_or_default().to_le_bytes());
        }
    }

    /// Parse and validate a header, returning it with its length in bytes
    pub fn parse(buf: &[u8]) -> Result<(Self, usize)> {
        let mut reader = HeaderReader::new(buf);

        let magic = reader.read_array::<4>("magic")?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let version = reader.read_u8("version")?;
        if version != VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let raw_flags = reader.read_u8("flags")?;
        let flags = Flags::from_bits(raw_flags)
            .ok_or_else(|| Error::corrupt(format!("unknown flag bits {raw_flags:#010b}")))?;

        let original_len = reader.read_u64("original length")?;

        let symbol_count = reader.read_u16("symbol count")? as usize;
        if symbol_count > ALPHABET_SIZE {
            return Err(Error::corrupt(format!(
                "symbol table claims {symbol_count} entries"
            )));
        }

        let mut entries = Vec::with_capacity(symbol_count);
        for _ in 0..symbol_count {
            let symbol = reader.read_u8("symbol table")?;
            let count = reader.read_u64("symbol table")?;
            entries.push((symbol, count));
        }
        let histogram = Histogram::from_entries(entries)?;

        match histogram.checked_total() {
            Some(total) if total == original_len => {}
            Some(total) => {
                return Err(Error::corrupt(format!(
                    "symbol table sums to {total} but original length is {original_len}"
                )))
            }
            None => return Err(Error::corrupt("symbol table frequencies overflow")),
        }

        let padding = reader.read_u8("padding")?;
        if padding > 7 {
            return Err(Error::corrupt(format!("padding of {padding} bits")));
        }

        let checksum = if flags.contains(Flags::CHECKSUM_PRESENT) {
            Some(reader.read_u32("checksum")?)
        } else {
            None
        };

        let header = Self {
            version,
            flags,
            original_len,
            histogram,
            padding,
            checksum,
        };
        Ok((header, reader.position()))
    }

    /// Check padding and checksum against the payload that follows the header
    pub fn validate_payload(&self, payload: &[u8]) -> Result<()> {
        if payload.is_empty() && self.padding > 0 {
            return Err(Error::corrupt("padding declared for an empty payload"));
        }

        if let Some(expected) = self.checksum {
            let actual = crc32c::crc32c(payload);
            if actual != expected {
                return Err(Error::ChecksumMismatch { expected, actual });
            }
        }

        Ok(())
    }

    /// Payload bits carrying code words
    pub fn valid_bits(&self, payload: &[u8]) -> u64 {
        (payload.len() as u64 * 8).saturating_sub(self.padding as u64)
    }
}

/// Cursor over header bytes
struct HeaderReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_array<const N: usize>(&mut self, field: &str) -> Result<[u8; N]> {
        let end = self.pos + N;
        if end > self.buf.len() {
            return Err(Error::corrupt(format!("header truncated in {field}")));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(out)
    }

    fn read_u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.read_array::<1>(field)?[0])
    }

    fn read_u16(&mut self, field: &str) -> Result<u16> {
        self.read_array(field).map(u16::from_le_bytes)
    }

    fn read_u32(&mut self, field: &str) -> Result<u32> {
        self.read_array(field).map(u32::from_le_bytes)
    }

    fn read_u64(&mut self, field: &str) -> Result<u64> {
        self.read_array(field).map(u64::from_le_bytes)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Result of encoding one input
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Complete container bytes
    pub bytes: Vec<u8>,
    /// Histogram of the input
    pub histogram: Histogram,
    /// Code word bits in the payload, padding excluded
    pub payload_bits: u64,
}

/// Result of decoding one container
#[derive(Debug, Clone)]
pub struct Decoded {
    pub data: Vec<u8>,
    /// Histogram recovered from the header
    pub histogram: Histogram,
}

/// Encode `input` into a self-describing container
pub fn encode(input: &[u8], config: &CodecConfig) -> Encoded {
    let histogram = Histogram::from_bytes(input);

    let (payload, padding, payload_bits) = match HuffmanTree::build(&histogram) {
        Some(tree) => {
            let table = CodeTable::from_tree(&tree);
            let payload_bits = table.encoded_bits(&histogram);
            log::debug!(
                "encoding {} bytes: {} symbols, max code length {}, {} payload bits",
                input.len(),
                histogram.distinct(),
                table.max_len(),
                payload_bits
            );

            let mut writer = BitWriter::with_capacity(payload_bits as usize);
            for &byte in input {
                writer.write_bits(&table[byte]);
            }
            let (payload, padding) = writer.finish();
            (payload, padding, payload_bits)
        }
        None => (Vec::new(), 0, 0),
    };

    let mut flags = Flags::empty();
    if config.checksum {
        flags |= Flags::CHECKSUM_PRESENT;
    }

    let header = ContainerHeader {
        version: VERSION,
        flags,
        original_len: input.len() as u64,
        checksum: config.checksum.then(|| crc32c::crc32c(&payload)),
        histogram,
        padding,
    };

    let mut bytes = Vec::with_capacity(header.encoded_len() + payload.len());
    header.serialize(&mut bytes);
    bytes.extend_from_slice(&payload);

    Encoded {
        bytes,
        histogram: header.histogram,
        payload_bits,
    }
}

/// Decode a container back to the original bytes
pub fn decode(container: &[u8]) -> Result<Decoded> {
    let (header, header_len) = ContainerHeader::parse(container)?;
    let payload = &container[header_len..];
    header.validate_payload(payload)?;

    let valid_bits = header.valid_bits(payload);
    let original_len = header.original_len;
    if original_len > valid_bits {
        return Err(Error::corrupt(format!(
            "{original_len} symbols cannot fit in {valid_bits} payload bits"
        )));
    }

    log::debug!(
        "decoding {} symbols from {} payload bits ({} header bytes)",
        original_len,
        valid_bits,
        header_len
    );

    let mut reader = BitReader::new(payload, valid_bits as usize);
    let mut data = Vec::with_capacity(original_len as usize);

    if let Some(tree) = HuffmanTree::build(&header.histogram) {
        for decoded in 0..original_len {
            let symbol = tree.decode_symbol(&mut reader).map_err(|err| match err {
                Error::CorruptFormat(msg) => Error::corrupt(format!(
                    "{msg} after {decoded} of {original_len} symbols"
                )),
                other => other,
            })?;
            data.push(symbol);
        }
    }

    if reader.remaining() > 0 {
        return Err(Error::corrupt(format!(
            "{} unused payload bits after the final symbol",
            reader.remaining()
        )));
    }

    Ok(Decoded {
        data,
        histogram: header.histogram,
    })
}

/// Header summary of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInfo {
    pub version: u8,
    pub flags: Vec<String>,
    pub original_length: u64,
    pub symbols: usize,
    pub padding: u8,
    pub header_bytes: usize,
    pub payload_bytes: usize,
    pub checksum: Option<String>,
}

/// Parse and validate the header without decoding the payload
pub fn inspect(container: &[u8]) -> Result<ContainerInfo> {
    let (header, header_len) = ContainerHeader::parse(container)?;
    let payload = &container[header_len..];
    header.validate_payload(payload)?;

    Ok(ContainerInfo {
        version: header.version,
        flags: header
            .flags
            .iter_names()
            .map(|(name, _)| name.to_string())
            .collect(),
        original_length: header.original_len,
        symbols: header.histogram.distinct(),
        padding: header.padding,
        header_bytes: header_len,
        payload_bytes: payload.len(),
        checksum: header.checksum.map(|c| hex::encode(c.to_be_bytes())),
    })
}
