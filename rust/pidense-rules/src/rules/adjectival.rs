//! Adjectival-phrase rulesets.
//!
//! Adjectival complements ("the picture is *nice*") and adjectival
//! modifiers ("a *nice* picture") share one extraction: adverbial modifiers
//! are collected with their own emission suppressed and paired with the
//! adjective as modifications, reduced clausal modifiers ("hard *to
//! imagine*") are dispatched with a borrowable subject, prepositional
//! modifiers ("angry *with you*") emit on their own.

use pidense_tree::{DependencyTree, NodeId};

use crate::context::{Context, SubjectInfo};
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::RuleOutcome;
use crate::proposition::PropKind;
use crate::ruleset::Ruleset;
use crate::rules::dispatch_each;
use crate::rules::verb_phrase::NO_SUBJECT;

pub(crate) fn extract_adjectival_phrase(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<Vec<String>, EngineError> {
    let down = lineage.descend(node);

    let mut adverbials = Vec::new();
    for child in tree.children_with_label(node, "advmod") {
        if let Some(word) = engine
            .dispatch(tree, child, &down, &Context::default().suppressed())?
            .into_word()
        {
            adverbials.push(word);
        }
    }

    for child in tree.children_with_label(node, "xcomp") {
        let forwarded = if ctx.subject.is_some() {
            ctx.clone()
        } else {
            ctx.clone().with_subject(SubjectInfo::single(NO_SUBJECT))
        };
        engine.dispatch(tree, child, &down, &forwarded)?;
    }

    dispatch_each(tree, node, "prep", &down, engine)?;

    let words = vec![tree[node].surface().to_string()];
    for adverbial in &adverbials {
        for word in &words {
            engine.emit(
                [word.as_str().into(), adverbial.as_str().into()],
                PropKind::Modification,
            );
        }
    }

    Ok(words)
}

/// Adjectival complements of a verb ("it smells *good*").
pub struct AcompRuleset;

impl Ruleset for AcompRuleset {
    fn label(&self) -> &'static str {
        "acomp"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        Ok(RuleOutcome::Words(extract_adjectival_phrase(
            tree, node, lineage, engine, ctx,
        )?))
    }
}

/// Adjectival modifiers of a noun ("a *black* cat").
pub struct AmodRuleset;

impl Ruleset for AmodRuleset {
    fn label(&self) -> &'static str {
        "amod"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        Ok(RuleOutcome::Words(extract_adjectival_phrase(
            tree, node, lineage, engine, ctx,
        )?))
    }
}
