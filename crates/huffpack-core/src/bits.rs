//! MSB-first bit packing

use bitvec::prelude::*;

/// Accumulates bits MSB-first into a growable byte buffer
#[derive(Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    /// Writer with room for `bits` bits before reallocating
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append a whole code word
    #[inline]
    pub fn write_bits(&mut self, code: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(code);
    }

    /// Bits written so far
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Pad the final partial byte with zeros.
    ///
    /// Returns the packed bytes and the number of pad bits (0-7).
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let padding = (8 - self.bits.len() % 8) % 8;
        let padded = self.bits.len() + padding;
        self.bits.resize(padded, false);
        (self.bits.into_vec(), padding as u8)
    }
}

/// Reads bits MSB-first from a byte buffer, stopping at the last valid bit
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Reader over the first `valid_bits` bits of `bytes`.
    ///
    /// `valid_bits` is clamped to the buffer length, so trailing pad bits
    /// only need to be excluded by the caller.
    pub fn new(bytes: &'a [u8], valid_bits: usize) -> Self {
        let all = bytes.view_bits::<Msb0>();
        let end = valid_bits.min(all.len());
        Self {
            bits: &all[..end],
            pos: 0,
        }
    }

    /// Next bit, or `None` once the valid bits are exhausted
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.pos).map(|bit| *bit)?;
        self.pos += 1;
        Some(bit)
    }

    /// Valid bits not yet consumed
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    /// Bits consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }
}
