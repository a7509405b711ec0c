//! Atomic rulesets: relations whose whole contribution is their word.
//!
//! Particles, auxiliaries, copulas, conjunction words, possessive markers,
//! complementizers, subordinating markers and preconjunctions all resolve to
//! their surface form, handed back for the parent to weave into its own
//! assembly. One parameterized ruleset covers them all.

use pidense_tree::{DependencyTree, NodeId};

use crate::context::Context;
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::RuleOutcome;
use crate::ruleset::Ruleset;

/// Returns the node's word; emits nothing.
pub struct AtomicRuleset {
    label: &'static str,
}

impl AtomicRuleset {
    pub const fn new(label: &'static str) -> Self {
        AtomicRuleset { label }
    }
}

impl Ruleset for AtomicRuleset {
    fn label(&self) -> &'static str {
        self.label
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        _lineage: &Lineage,
        _engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        Ok(RuleOutcome::Word(tree[node].surface().to_string()))
    }
}
