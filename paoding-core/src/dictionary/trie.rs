//! Character trie backing the dictionary
//!
//! Nodes live in one contiguous vector and refer to each other by index, so a
//! matcher can hold a [`NodeId`] while walking without borrowing the trie
//! mutably.

use std::collections::HashMap;

/// Index of a node inside a [`Trie`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes: char -> node index
    children: HashMap<char, u32>,
    /// Entry index when this node terminates a word
    entry: Option<u32>,
}

/// Prefix tree keyed by characters
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create a trie holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// The root node; matches the empty prefix
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Insert `word`, returning the previous entry index stored for it
    pub(crate) fn insert(&mut self, word: &str, entry: u32) -> Option<u32> {
        let mut current = 0u32;

        for ch in word.chars() {
            current = match self.nodes[current as usize].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current as usize].children.insert(ch, child);
                    child
                }
            };
        }

        self.nodes[current as usize].entry.replace(entry)
    }

    /// Follow the edge labelled `ch` from `node`
    #[inline]
    pub fn step(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.nodes[node.0 as usize]
            .children
            .get(&ch)
            .map(|&child| NodeId(child))
    }

    /// Entry index stored at `node`, if it terminates a word
    #[inline]
    pub fn entry_at(&self, node: NodeId) -> Option<u32> {
        self.nodes[node.0 as usize].entry
    }

    /// Whether some longer word continues past `node`
    #[inline]
    pub fn has_children(&self, node: NodeId) -> bool {
        !self.nodes[node.0 as usize].children.is_empty()
    }

    /// Walk the whole of `word` from the root
    pub fn find(&self, word: &str) -> Option<NodeId> {
        word.chars()
            .try_fold(self.root(), |node, ch| self.step(node, ch))
    }
}
