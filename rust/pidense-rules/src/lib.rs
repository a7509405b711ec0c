//! # Pidense Rules — propositional idea density over dependency trees
//!
//! Given a sentence's dependency tree, this crate decomposes it into atomic
//! semantic propositions: tuples of words (or references to earlier
//! propositions) tagged with a kind, such as `(ran, the cat) [P]` for a
//! predication or `(apples, some) [M]` for a modification. The count of
//! propositions against the sentence's length is the sentence's
//! propositional idea density.
//!
//! ## Core ideas
//!
//! - **Label-driven dispatch**: every relation label is bound to a
//!   [`Ruleset`] by a per-run [`Registry`] (first match in a priority list
//!   wins). The engine exposes one recursion primitive; rulesets decide
//!   which children to visit and in what order.
//! - **Context flows down, outcomes flow up**: a parent ruleset hands each
//!   child dispatch a fresh, immutable [`Context`] (a borrowable subject, a
//!   coordination mode, a numeral); the child answers with the
//!   [`RuleOutcome`] shape its family contracts to return.
//! - **Coverage is checked, not forced**: after a run, every node is either
//!   consumed or listed in the unconsumed report. The two sets partition
//!   the tree.
//!
//! ## Example
//!
//! ```
//! use pidense_rules::{DependencyTree, Engine, RawRelation};
//!
//! // "the cat ran" : root -> ran, ran.nsubj -> cat, cat.det -> the
//! let mut tree = DependencyTree::from_relations(vec![
//!     RawRelation::top(),
//!     RawRelation::new(1, 2, "det", "the").tagged("DT", "DET"),
//!     RawRelation::new(2, 3, "nsubj", "cat").tagged("NN", "NOUN"),
//!     RawRelation::new(3, 0, "root", "ran").tagged("VBD", "VERB"),
//! ])?;
//!
//! let mut engine = Engine::standard();
//! let analysis = engine.analyze(&mut tree)?;
//!
//! assert_eq!(analysis.propositions.len(), 1);
//! assert_eq!(analysis.propositions[0].to_string(), "ran, the cat [P]");
//! assert!(analysis.unconsumed.is_empty());
//! # Ok::<(), pidense_rules::EngineError>(())
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod proposition;
pub mod ruleset;
pub mod rules;

pub use context::{Context, PhraseClass, SubjectInfo};
pub use engine::{Analysis, Engine, Lineage, MAX_DEPTH, Registry};
pub use error::EngineError;
pub use outcome::{NounPhraseOutcome, RuleOutcome, VerbPhraseOutcome};
pub use proposition::{Component, PropId, PropKind, Proposition};
pub use ruleset::{Ruleset, standard_rulesets};

pub use pidense_tree::{DependencyTree, Node, NodeId, RawRelation, TreeError, transform};
