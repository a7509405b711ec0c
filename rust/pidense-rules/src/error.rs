//! Error types for the analysis engine.

use pidense_tree::{NodeId, TreeError};
use thiserror::Error;

use crate::engine::MAX_DEPTH;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A node with this label was dispatched but no ruleset claims the label.
    /// Non-fatal at registry build (logged there); fatal here.
    #[error("no ruleset registered for relation label '{label}'")]
    UnhandledLabel { label: String },

    /// A ruleset assumed a child with a specific label and the tree does not
    /// have one. Malformed input, surfaced as a typed error instead of an
    /// out-of-bounds fault.
    #[error("node {node} is missing a required '{label}' child")]
    MissingChild { node: NodeId, label: &'static str },

    /// A ruleset's contract requires contextual information its caller did
    /// not supply.
    #[error("the '{label}' ruleset requires {what} in the dispatch context")]
    MissingContext {
        label: &'static str,
        what: &'static str,
    },

    /// A ruleset received a result shape its contract does not allow from
    /// the child it dispatched.
    #[error("dispatching the '{label}' child of node {node} returned an unexpected result shape")]
    UnexpectedOutcome { node: NodeId, label: &'static str },

    /// Recursion went past [`MAX_DEPTH`] levels. Dependency trees of real
    /// sentences stay well below this; hitting it means the input is
    /// malformed or cyclic.
    #[error("recursion exceeded {MAX_DEPTH} levels; the tree is likely cyclic")]
    DepthLimit,

    #[error(transparent)]
    Tree(#[from] TreeError),
}
