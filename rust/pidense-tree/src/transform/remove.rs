//! Passes that delete nodes carrying no propositional content.

use crate::error::TreeError;
use crate::transform::Transformation;
use crate::tree::DependencyTree;

/// Removes `punct` nodes.
pub struct RemovePunctuation;

impl Transformation for RemovePunctuation {
    fn name(&self) -> &'static str {
        "remove-punctuation"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        let doomed: Vec<_> = tree.ids().filter(|&id| tree[id].label == "punct").collect();
        if !doomed.is_empty() {
            tracing::debug!(count = doomed.len(), "removing punctuation nodes");
        }
        tree.remove(&doomed);
        Ok(())
    }
}

/// Removes lexical fillers like "I mean" attached as parataxis.
pub struct RemoveParataxisFillers;

impl Transformation for RemoveParataxisFillers {
    fn name(&self) -> &'static str {
        "remove-parataxis-fillers"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        let mut doomed = Vec::new();
        for id in tree.ids() {
            if tree[id].label == "parataxis" && tree[id].surface() == "mean" {
                let children = tree.children(id);
                if children.len() == 1 && tree[children[0]].surface() == "I" {
                    doomed.push(id);
                    doomed.push(children[0]);
                }
            }
        }
        tree.remove(&doomed);
        Ok(())
    }
}

/// Removes commonly used utterance-initial conjunctions ("and", "then").
/// No-op on trees with fewer than two nodes.
pub struct RemoveInitialConjunction;

impl Transformation for RemoveInitialConjunction {
    fn name(&self) -> &'static str {
        "remove-initial-conjunction"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        if let Some(id) = tree.node_at(1) {
            if matches!(tree[id].surface().to_lowercase().as_str(), "and" | "then") {
                tree.remove(&[id]);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::RawRelation;

    #[test]
    fn punctuation_removal_keeps_links_consistent() {
        // "the cat ran ." with the period attached to the verb
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 2, "det", "the"),
            RawRelation::new(2, 3, "nsubj", "cat"),
            RawRelation::new(3, 0, "root", "ran"),
            RawRelation::new(4, 3, "punct", "."),
        ])
        .unwrap();

        RemovePunctuation.apply(&mut tree).unwrap();

        assert_eq!(tree.len(), 4);
        assert!(tree.validate().is_ok());
        let addresses: Vec<_> = tree.ids().map(|id| tree.address(id)).collect();
        assert_eq!(addresses, vec![0, 1, 2, 3]);
    }

    #[test]
    fn initial_and_is_dropped() {
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 2, "cc", "And"),
            RawRelation::new(2, 0, "root", "ran"),
        ])
        .unwrap();

        RemoveInitialConjunction.apply(&mut tree).unwrap();

        assert_eq!(tree.len(), 2);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn i_mean_filler_is_dropped() {
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 3, "nsubj", "she"),
            RawRelation::new(2, 3, "aux", "was"),
            RawRelation::new(3, 0, "root", "running"),
            RawRelation::new(4, 5, "nsubj", "I"),
            RawRelation::new(5, 3, "parataxis", "mean"),
        ])
        .unwrap();

        RemoveParataxisFillers.apply(&mut tree).unwrap();

        assert_eq!(tree.len(), 4);
        assert!(tree.validate().is_ok());
        assert!(tree.ids().all(|id| tree[id].surface() != "mean"));
    }
}
