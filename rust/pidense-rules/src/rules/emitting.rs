//! Atomic emitting rulesets: relations whose word is a standalone
//! modification.
//!
//! Negations ("not") and discourse markers ("well", "anyway") emit their
//! word as a one-component modification and contribute nothing inline.

use pidense_tree::{DependencyTree, NodeId};

use crate::context::Context;
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::RuleOutcome;
use crate::proposition::PropKind;
use crate::ruleset::Ruleset;

/// Emits `(word) [M]`; returns nothing inline.
pub struct EmittingRuleset {
    label: &'static str,
}

impl EmittingRuleset {
    pub const fn new(label: &'static str) -> Self {
        EmittingRuleset { label }
    }
}

impl Ruleset for EmittingRuleset {
    fn label(&self) -> &'static str {
        self.label
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        _lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let word = tree[node].surface().to_string();
        engine.emit([word.into()], PropKind::Modification);
        Ok(RuleOutcome::Nothing)
    }
}
