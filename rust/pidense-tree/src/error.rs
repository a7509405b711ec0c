//! Error types for tree construction and transformation.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("node claims address {address} but sits at position {expected}")]
    AddressMismatch { address: usize, expected: usize },

    #[error("the first node must be the synthetic TOP root (no head, no word)")]
    MissingRoot,

    #[error("second TOP node at address {address}")]
    DuplicateRoot { address: usize },

    #[error("non-root node at address {address} has no head")]
    HeadlessNode { address: usize },

    #[error("node at address {address} points at head {head}, outside the tree")]
    HeadOutOfRange { address: usize, head: usize },

    #[error("node at address {address} is its own head")]
    SelfHead { address: usize },

    #[error("node at position {position} points at a head that was removed")]
    DanglingHead { position: usize },

    #[error("transformation '{name}' expected {what}")]
    Precondition { name: &'static str, what: String },
}
