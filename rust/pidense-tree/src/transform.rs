//! Pre-analysis tree rewriting.
//!
//! Before any rule dispatches, the tree is rewritten by a fixed, ordered
//! pipeline of passes: removals of material that carries no propositional
//! content, joins of multiword expressions into single nodes, and fixes for
//! systematically misparsed attachments. Each pass is idempotent over its own
//! trigger condition but order-sensitive relative to the others (a join pass
//! must see the tree after punctuation removal, the multiword merge must run
//! after the passes that plant `mwe` labels).
//!
//! A pass that finds its structural precondition violated returns a
//! [`TreeError`], which aborts the whole analysis; a pass whose adjacency
//! probe simply fails to match skips the candidate instead. Each pass
//! documents which stance it takes.

use crate::error::TreeError;
use crate::tree::DependencyTree;

pub mod fix;
pub mod join;
pub mod remove;

/// A named, whole-tree rewrite pass.
pub trait Transformation: Send + Sync {
    /// Stable name, used in diagnostics and precondition errors.
    fn name(&self) -> &'static str;

    /// Apply the rewrite in place.
    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError>;
}

/// The standard pipeline, in the order the passes must run.
pub fn pipeline() -> Vec<Box<dyn Transformation>> {
    vec![
        Box::new(remove::RemovePunctuation),
        Box::new(remove::RemoveParataxisFillers),
        Box::new(remove::RemoveInitialConjunction),
        Box::new(join::JoinNoLonger),
        Box::new(join::JoinBecauseOf),
        Box::new(join::JoinUpTo),
        Box::new(join::JoinAtAll),
        Box::new(join::JoinMultiwordExpressions),
        Box::new(join::JoinPhrasalModifiers),
        Box::new(join::JoinDoublePrepositions),
        Box::new(join::JoinExpletives),
        Box::new(fix::FixAdjectiveRepetition),
        Box::new(fix::FixAdverbRepetition),
        Box::new(fix::FixReflexivePronouns),
        Box::new(fix::FixXcompAttributions),
        Box::new(fix::MarkNameCompounds),
    ]
}
