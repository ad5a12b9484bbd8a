//! Byte frequency analysis

use crate::{Error, Result};

/// Number of symbols in the byte alphabet
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts over the 256-symbol byte alphabet
#[derive(Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; ALPHABET_SIZE],
}

impl Histogram {
    /// Histogram with every count at zero
    pub fn empty() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `data` in a single pass
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Rebuild a histogram from stored `(symbol, count)` pairs.
    ///
    /// Pairs must be strictly ascending by symbol and carry non-zero counts,
    /// which is the order [`Histogram::symbols`] yields them in.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut previous: Option<u8> = None;

        for (symbol, count) in entries {
            if count == 0 {
                return Err(Error::corrupt(format!(
                    "symbol table entry {symbol:#04x} has zero frequency"
                )));
            }
            if previous.is_some_and(|prev| symbol <= prev) {
                return Err(Error::corrupt(format!(
                    "symbol table entry {symbol:#04x} is out of order"
                )));
            }
            counts[symbol as usize] = count;
            previous = Some(symbol);
        }

        Ok(Self { counts })
    }

    /// Count for a single symbol
    #[inline]
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, `None` on overflow
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }

    /// Sum of all counts
    ///
    /// Histograms built from in-memory data never overflow; use
    /// [`Histogram::checked_total`] on untrusted tables.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Number of symbols with a non-zero count
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero `(symbol, count)` pairs in ascending symbol order
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.symbols()).finish()
    }
}
