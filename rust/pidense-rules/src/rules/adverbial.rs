//! The adverbial-phrase ruleset.

use pidense_tree::{DependencyTree, NodeId};

use crate::context::Context;
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::RuleOutcome;
use crate::proposition::PropKind;
use crate::ruleset::Ruleset;
use crate::rules::dispatch_each;

/// Adverbial modifiers.
///
/// Three uses, distinguished by context:
/// - modifying a numeral ("about" in "about 200"): binds to the numeral as a
///   modification, like a quantifier phrase modifier;
/// - with its own emission suppressed (inside adjectival phrases, or under a
///   dummy-subject copula): contributes the bare word to the parent;
/// - free-standing: emits its word as a standalone modification, after
///   resolving nominal, nested adverbial and prepositional modifiers of its
///   own ("very slowly").
pub struct AdvmodRuleset;

impl Ruleset for AdvmodRuleset {
    fn label(&self) -> &'static str {
        "advmod"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let word = tree[node].surface().to_string();

        if let Some(numeral) = &ctx.numeral {
            engine.emit(
                [numeral.as_str().into(), word.as_str().into()],
                PropKind::Modification,
            );
            return Ok(RuleOutcome::Word(word));
        }

        let down = lineage.descend(node);

        if let Some(child) = tree.children_with_label(node, "npadvmod").first().copied() {
            if let Some(modifier) = engine
                .dispatch(tree, child, &down, &Context::default())?
                .into_word()
            {
                engine.emit(
                    [word.as_str().into(), modifier.into()],
                    PropKind::Modification,
                );
            }
        }

        for child in tree.children_with_label(node, "advmod") {
            if let Some(modifier) = engine
                .dispatch(tree, child, &down, &Context::default().suppressed())?
                .into_word()
            {
                engine.emit(
                    [word.as_str().into(), modifier.into()],
                    PropKind::Modification,
                );
            }
        }

        dispatch_each(tree, node, "prep", &down, engine)?;

        if !ctx.suppress_emission {
            engine.emit([word.as_str().into()], PropKind::Modification);
        }

        Ok(RuleOutcome::Word(word))
    }
}
