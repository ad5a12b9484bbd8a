//! Code table derivation

use bitvec::prelude::*;

use crate::frequency::{Histogram, ALPHABET_SIZE};
use crate::tree::{HuffmanTree, Node};

/// Code word, first bit is the first edge taken from the root
pub type Code = BitVec<u8, Msb0>;

/// Byte value to code word mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Derive codes depth-first: left edges append `0`, right edges `1`.
    ///
    /// A single-leaf tree gets the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes: [Option<Code>; ALPHABET_SIZE] = std::array::from_fn(|_| None);

        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes[*symbol as usize] = Some(bitvec![u8, Msb0; 0]);
            }
            root => {
                let mut path = Code::new();
                assign(root, &mut path, &mut codes);
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol as usize].as_deref()
    }

    /// Code length in bits, 0 for symbols without a code
    pub fn code_len(&self, symbol: u8) -> usize {
        self.codes[symbol as usize].as_ref().map_or(0, |code| code.len())
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// `(symbol, code)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|code| (symbol as u8, code)))
    }

    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Total payload bits needed to encode data with this histogram
    pub fn encoded_bits(&self, histogram: &Histogram) -> u64 {
        histogram
            .symbols()
            .map(|(symbol, count)| count * self.code_len(symbol) as u64)
            .sum()
    }

    /// No code is a prefix of another
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<_> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(*a))
        })
    }
}

impl std::ops::Index<u8> for CodeTable {
    type Output = BitSlice<u8, Msb0>;

    /// Code for `symbol`, panicking if the tree had no leaf for it
    fn index(&self, symbol: u8) -> &Self::Output {
        match self.get(symbol) {
            Some(code) => code,
            None => panic!("no code for symbol {symbol:#04x}"),
        }
    }
}

fn assign(node: &Node, path: &mut Code, codes: &mut [Option<Code>; ALPHABET_SIZE]) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(path.clone());
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            assign(left, path, codes);
            path.pop();

            path.push(true);
            assign(right, path, codes);
            path.pop();
        }
    }
}
