//! Nodes of the dependency tree and the raw parser-output record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The relation label of the synthetic root node.
pub const TOP_LABEL: &str = "TOP";

/// A stable, opaque identifier for a tree node.
///
/// Ids are handed out once, at tree construction, and survive every
/// structural edit. Removing nodes never renumbers the survivors; positional
/// addresses are derived from the tree's order vector instead (see
/// [`DependencyTree::address`](crate::DependencyTree::address)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One position in the dependency tree.
///
/// Everything except `consumed` comes from the parser (possibly rewritten by
/// a transformation). The `consumed` flag belongs to the rule engine: it is
/// cleared at the start of every analysis run and set when a rule finishes
/// with the node, so that complete coverage can be checked afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The relation label connecting this word to its head
    /// (e.g. `nsubj`, `dobj`, `det`; `TOP` for the synthetic root).
    pub label: String,
    /// The governing node, or `None` for the root.
    pub head: Option<NodeId>,
    /// Fine-grained part-of-speech tag (e.g. `VBD`, `NNS`, `PRP$`).
    pub fine_tag: String,
    /// Coarse-grained part-of-speech tag (e.g. `VERB`, `NOUN`, `ADJ`).
    pub coarse_tag: String,
    /// The literal word, or `None` for the root.
    pub word: Option<String>,
    /// Set by the rule engine once a rule has processed this node.
    pub consumed: bool,
}

impl Node {
    /// The node's surface form; empty for the synthetic root.
    pub fn surface(&self) -> &str {
        self.word.as_deref().unwrap_or("")
    }

    /// Whether this is the synthetic TOP root.
    pub fn is_root(&self) -> bool {
        self.label == TOP_LABEL
    }
}

/// One row of parser output, as handed over by the (out-of-scope) dependency
/// parser adapter.
///
/// Addresses must be contiguous from 0, with address 0 reserved for the
/// synthetic root (`label = "TOP"`, no head, no word). Dependent lists from
/// the parser are not part of this record: children are recomputed from the
/// head links, which makes head/children inconsistencies unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRelation {
    pub address: usize,
    #[serde(default)]
    pub head: Option<usize>,
    pub label: String,
    #[serde(default)]
    pub fine_tag: String,
    #[serde(default)]
    pub coarse_tag: String,
    #[serde(default)]
    pub word: Option<String>,
}

impl RawRelation {
    /// The synthetic root record at address 0.
    pub fn top() -> Self {
        RawRelation {
            address: 0,
            head: None,
            label: TOP_LABEL.to_string(),
            fine_tag: TOP_LABEL.to_string(),
            coarse_tag: TOP_LABEL.to_string(),
            word: None,
        }
    }

    /// A word node with empty tags. Use [`RawRelation::tagged`] to add them.
    pub fn new(address: usize, head: usize, label: impl Into<String>, word: impl Into<String>) -> Self {
        RawRelation {
            address,
            head: Some(head),
            label: label.into(),
            fine_tag: String::new(),
            coarse_tag: String::new(),
            word: Some(word.into()),
        }
    }

    /// Attach part-of-speech tags.
    pub fn tagged(mut self, fine_tag: impl Into<String>, coarse_tag: impl Into<String>) -> Self {
        self.fine_tag = fine_tag.into();
        self.coarse_tag = coarse_tag.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_relation_roundtrips_through_json() {
        let rel = RawRelation::new(2, 1, "nsubj", "cat").tagged("NN", "NOUN");
        let json = serde_json::to_string(&rel).unwrap();
        let back: RawRelation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rel);
    }

    #[test]
    fn top_record_has_no_word() {
        let top = RawRelation::top();
        assert_eq!(top.address, 0);
        assert_eq!(top.head, None);
        assert_eq!(top.label, TOP_LABEL);
        assert_eq!(top.word, None);
    }
}
