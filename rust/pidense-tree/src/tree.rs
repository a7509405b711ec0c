//! The dependency-tree arena.
//!
//! Nodes live in slots indexed by their [`NodeId`]; a separate order vector
//! carries the positional (surface) order of the sentence. Removing nodes
//! empties their slots and shrinks the order vector, so derived addresses
//! stay contiguous while every surviving id stays valid.

use std::ops::{Index, IndexMut};

use crate::error::TreeError;
use crate::node::{Node, NodeId, RawRelation, TOP_LABEL};

/// A sentence's dependency tree.
///
/// Invariants, established by [`DependencyTree::from_relations`] and
/// preserved by every operation except a transformation that violates its
/// documented precondition:
///
/// - exactly one root (label `TOP`, no head), at position 0;
/// - every other node's head resolves to a live node ([`validate`] checks
///   this; [`remove`] documents the one way to break it).
///
/// [`validate`]: DependencyTree::validate
/// [`remove`]: DependencyTree::remove
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyTree {
    slots: Vec<Option<Node>>,
    order: Vec<NodeId>,
}

impl DependencyTree {
    /// Build a tree from parser output, validating the structural invariants:
    /// contiguous addresses, a single synthetic root at address 0, every head
    /// in range and distinct from its dependent.
    pub fn from_relations(relations: Vec<RawRelation>) -> Result<Self, TreeError> {
        if relations.is_empty() {
            return Err(TreeError::Empty);
        }

        for (position, rel) in relations.iter().enumerate() {
            if rel.address != position {
                return Err(TreeError::AddressMismatch {
                    address: rel.address,
                    expected: position,
                });
            }
        }

        let root = &relations[0];
        if root.label != TOP_LABEL || root.head.is_some() || root.word.is_some() {
            return Err(TreeError::MissingRoot);
        }

        for (address, rel) in relations.iter().enumerate().skip(1) {
            if rel.label == TOP_LABEL {
                return Err(TreeError::DuplicateRoot { address });
            }
            match rel.head {
                None => return Err(TreeError::HeadlessNode { address }),
                Some(head) if head >= relations.len() => {
                    return Err(TreeError::HeadOutOfRange { address, head });
                }
                Some(head) if head == address => {
                    return Err(TreeError::SelfHead { address });
                }
                Some(_) => {}
            }
        }

        let slots = relations
            .into_iter()
            .map(|rel| {
                Some(Node {
                    label: rel.label,
                    head: rel.head.map(|h| NodeId(h as u32)),
                    fine_tag: rel.fine_tag,
                    coarse_tag: rel.coarse_tag,
                    word: rel.word,
                    consumed: false,
                })
            })
            .collect::<Vec<_>>();
        let order = (0..slots.len() as u32).map(NodeId).collect();

        Ok(DependencyTree { slots, order })
    }

    /// The synthetic root. Position 0 always holds it: transformations only
    /// ever remove word nodes.
    pub fn root(&self) -> NodeId {
        self.order[0]
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live node ids in positional order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// The node behind `id`, if it has not been removed.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    /// The positional address of a live node: its index in the order vector.
    /// Addresses are contiguous from 0 and change when earlier nodes are
    /// removed; ids do not.
    pub fn address(&self, id: NodeId) -> usize {
        self.order
            .iter()
            .position(|&other| other == id)
            .unwrap_or_else(|| panic!("node {id} has been removed from the tree"))
    }

    /// The node at a positional address, if any.
    pub fn node_at(&self, position: usize) -> Option<NodeId> {
        self.order.get(position).copied()
    }

    /// The node immediately after `id` in surface order.
    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_at(self.address(id) + 1)
    }

    /// The node immediately before `id` in surface order.
    pub fn previous_of(&self, id: NodeId) -> Option<NodeId> {
        self.address(id).checked_sub(1).and_then(|p| self.node_at(p))
    }

    /// Direct dependents of `id`, in ascending positional order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&child| self[child].head == Some(id))
            .collect()
    }

    /// Direct dependents of `id` holding the given relation label, in
    /// ascending positional order. Empty when none match, never an error.
    pub fn children_with_label(&self, id: NodeId, label: &str) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&child| {
                let node = &self[child];
                node.head == Some(id) && node.label == label
            })
            .collect()
    }

    /// Remove the given nodes. Surviving nodes keep their ids; their derived
    /// addresses shrink to stay contiguous.
    ///
    /// Precondition: a surviving node whose head is being removed must have
    /// its head re-pointed explicitly, before or after this call, by the
    /// transformation driving the removal. This primitive does not resolve
    /// dangling heads itself; [`validate`](DependencyTree::validate) reports
    /// them.
    pub fn remove(&mut self, ids: &[NodeId]) {
        for &id in ids {
            if let Some(slot) = self.slots.get_mut(id.index()) {
                *slot = None;
            }
        }
        let slots = &self.slots;
        self.order.retain(|id| slots[id.index()].is_some());
    }

    /// Check that every live node's head resolves to a live node and that
    /// position 0 still holds the single root.
    pub fn validate(&self) -> Result<(), TreeError> {
        for (position, &id) in self.order.iter().enumerate() {
            let node = &self[id];
            if position == 0 {
                if !node.is_root() || node.head.is_some() {
                    return Err(TreeError::MissingRoot);
                }
                continue;
            }
            if node.is_root() {
                return Err(TreeError::DuplicateRoot { address: position });
            }
            match node.head {
                None => return Err(TreeError::HeadlessNode { address: position }),
                Some(head) if self.get(head).is_none() => {
                    return Err(TreeError::DanglingHead { position });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Clear every node's consumed flag. Called by the engine at the start of
    /// each analysis run.
    pub fn clear_consumed(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.consumed = false;
        }
    }

    /// Nodes the engine never reached, in positional order. A non-empty
    /// report is diagnostic, not fatal: some subtrees (punctuation artifacts,
    /// already-joined multiword parts) legitimately end a run unvisited.
    pub fn unconsumed(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| !self[id].consumed)
            .collect()
    }
}

impl Index<NodeId> for DependencyTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.slots[id.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("node {id} has been removed from the tree"))
    }
}

impl IndexMut<NodeId> for DependencyTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("node {id} has been removed from the tree"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cat_tree() -> DependencyTree {
        // "the cat ran" : root -> ran, ran.nsubj -> cat, cat.det -> the
        DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 2, "det", "the").tagged("DT", "DET"),
            RawRelation::new(2, 3, "nsubj", "cat").tagged("NN", "NOUN"),
            RawRelation::new(3, 0, "root", "ran").tagged("VBD", "VERB"),
        ])
        .unwrap()
    }

    #[test]
    fn builds_and_validates() {
        let tree = cat_tree();
        assert_eq!(tree.len(), 4);
        assert!(tree.validate().is_ok());
        assert_eq!(tree[tree.root()].label, TOP_LABEL);
    }

    #[test]
    fn children_follow_head_links() {
        let tree = cat_tree();
        let ran = tree.node_at(3).unwrap();
        let cat = tree.node_at(2).unwrap();
        assert_eq!(tree.children(ran), vec![cat]);
        assert_eq!(tree.children_with_label(ran, "nsubj"), vec![cat]);
        assert_eq!(tree.children_with_label(ran, "dobj"), Vec::<NodeId>::new());
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            DependencyTree::from_relations(vec![]),
            Err(TreeError::Empty)
        );
        assert_eq!(
            DependencyTree::from_relations(vec![RawRelation::new(0, 1, "root", "ran")]),
            Err(TreeError::MissingRoot)
        );
        assert_eq!(
            DependencyTree::from_relations(vec![
                RawRelation::top(),
                RawRelation::new(1, 9, "root", "ran"),
            ]),
            Err(TreeError::HeadOutOfRange { address: 1, head: 9 })
        );
        assert_eq!(
            DependencyTree::from_relations(vec![
                RawRelation::top(),
                RawRelation::new(1, 1, "root", "ran"),
            ]),
            Err(TreeError::SelfHead { address: 1 })
        );
    }

    #[test]
    fn removal_keeps_ids_and_shrinks_addresses() {
        let mut tree = cat_tree();
        let the = tree.node_at(1).unwrap();
        let cat = tree.node_at(2).unwrap();
        let ran = tree.node_at(3).unwrap();

        tree.remove(&[the]);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.address(cat), 1);
        assert_eq!(tree.address(ran), 2);
        assert_eq!(tree.get(the), None);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn removal_of_a_head_leaves_a_dangling_link() {
        let mut tree = cat_tree();
        let cat = tree.node_at(2).unwrap();

        // "the" still points at "cat"; the caller was supposed to re-point it.
        tree.remove(&[cat]);

        assert_eq!(tree.validate(), Err(TreeError::DanglingHead { position: 1 }));
    }

    #[test]
    fn consumed_flags_partition_the_tree() {
        let mut tree = cat_tree();
        let ran = tree.node_at(3).unwrap();
        tree[ran].consumed = true;

        let unconsumed = tree.unconsumed();
        assert_eq!(unconsumed.len(), 3);
        assert!(!unconsumed.contains(&ran));

        tree.clear_consumed();
        assert_eq!(tree.unconsumed().len(), 4);
    }
}
