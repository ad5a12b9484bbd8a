//! Canonical Huffman tree construction
//!
//! The tree is rebuilt on decode from the stored histogram alone, so the
//! merge order must be identical on both sides. Nodes are ranked by
//! `(weight, order)`: leaves take orders `0..n` in ascending byte value,
//! each merged node takes the next free order. The first node extracted in
//! a merge becomes the left (`0`) child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::bits::BitReader;
use crate::frequency::Histogram;
use crate::{Error, Result};

/// Huffman tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Heap slot ordered as a min-priority queue on `(weight, order)`
struct Ranked {
    weight: u64,
    order: usize,
    node: Node,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap
        (other.weight, other.order).cmp(&(self.weight, self.order))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical Huffman tree for one histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the canonical tree, `None` when the histogram is empty
    pub fn build(histogram: &Histogram) -> Option<Self> {
        let mut heap: BinaryHeap<Ranked> = histogram
            .symbols()
            .enumerate()
            .map(|(order, (symbol, weight))| Ranked {
                weight,
                order,
                node: Node::Leaf { symbol, weight },
            })
            .collect();

        let mut next_order = heap.len();

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = Node::merge(left.node, right.node);
            heap.push(Ranked {
                weight: node.weight(),
                order: next_order,
                node,
            });
            next_order += 1;
        }

        let root = heap.pop()?.node;
        log::trace!(
            "built huffman tree: {} leaves, depth {}",
            root.leaf_count(),
            root.depth()
        );
        Some(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True for the degenerate one-leaf tree
    pub fn is_single_symbol(&self) -> bool {
        matches!(self.root, Node::Leaf { .. })
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Decode one symbol by walking from the root.
    ///
    /// A single-leaf tree consumes exactly one `0` bit per symbol.
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut node = &self.root;

        if let Node::Leaf { symbol, .. } = node {
            return match reader.read_bit() {
                Some(false) => Ok(*symbol),
                Some(true) => Err(Error::corrupt(format!(
                    "invalid code bit at position {}",
                    reader.position() - 1
                ))),
                None => Err(exhausted()),
            };
        }

        loop {
            match node {
                Node::Leaf { symbol, .. } => return Ok(*symbol),
                Node::Internal { left, right, .. } => {
                    node = match reader.read_bit() {
                        Some(false) => left,
                        Some(true) => right,
                        None => return Err(exhausted()),
                    };
                }
            }
        }
    }
}

fn exhausted() -> Error {
    Error::corrupt("bitstream exhausted")
}
