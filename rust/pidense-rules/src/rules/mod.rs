//! The rule-handler catalogue, grouped by phrase family.
//!
//! Shared sub-steps (dispatching a set of same-labeled children, harvesting
//! a single child's word, surface-ordering a mixed child set) live here as
//! free helpers; the families compose them instead of inheriting from each
//! other.

pub mod adjectival;
pub mod adverbial;
pub mod atomic;
pub mod emitting;
pub mod misc;
pub mod noun_phrase;
pub mod verb_phrase;

use pidense_tree::{DependencyTree, NodeId};

use crate::context::Context;
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;

/// Dispatch every child holding `label`, discarding the outcomes. The
/// children emit whatever they emit; absence of such children is a skip.
pub(crate) fn dispatch_each(
    tree: &mut DependencyTree,
    node: NodeId,
    label: &str,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<(), EngineError> {
    for child in tree.children_with_label(node, label) {
        engine.dispatch(tree, child, down, &Context::default())?;
    }
    Ok(())
}

/// Dispatch the first child holding `label` and harvest its word, if the
/// child contributed one inline. Absence of such a child is a skip.
pub(crate) fn resolve_child_word(
    tree: &mut DependencyTree,
    node: NodeId,
    label: &str,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<Option<String>, EngineError> {
    match tree.children_with_label(node, label).first().copied() {
        Some(child) => Ok(engine
            .dispatch(tree, child, down, &Context::default())?
            .into_word()),
        None => Ok(None),
    }
}

/// Children holding any of the given labels, merged into surface order.
pub(crate) fn children_in_surface_order(
    tree: &DependencyTree,
    node: NodeId,
    labels: &[&str],
) -> Vec<NodeId> {
    let mut ids = Vec::new();
    for label in labels {
        ids.extend(tree.children_with_label(node, label));
    }
    ids.sort_by_key(|&id| tree.address(id));
    ids
}
