//! # Pidense Tree — dependency trees for idea-density analysis
//!
//! This crate holds the sentence-level data structure the rule engine walks:
//! a dependency tree produced by an external parser, stored as an arena of
//! nodes with stable identifiers.
//!
//! ## Core ideas
//!
//! - **Stable identifiers**: a [`NodeId`] never changes, no matter how many
//!   nodes are removed around it. Positional addresses are *derived* from the
//!   tree's order vector and are only used for deterministic iteration and
//!   adjacency checks, so structural edits never require renumbering.
//! - **Children are computed**: a node's dependents are whatever nodes name
//!   it as their head. There is no separate child list to fall out of sync.
//! - **Transformations rewrite before analysis**: a fixed, ordered pipeline
//!   of whole-tree passes (punctuation removal, multiword joins, attachment
//!   fixes) runs once before the first rule dispatches.
//!
//! ## Architecture
//!
//! ```text
//! parser output (RawRelation records)
//!   → DependencyTree::from_relations (validate, link)
//!     → transform::pipeline() (rewrite in order)
//!       → rule engine walk (pidense-rules)
//! ```

pub mod error;
pub mod node;
pub mod transform;
pub mod tree;

pub use error::TreeError;
pub use node::{Node, NodeId, RawRelation, TOP_LABEL};
pub use transform::Transformation;
pub use tree::DependencyTree;
