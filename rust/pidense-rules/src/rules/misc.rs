//! Uncategorized rulesets: the entry point, coordination, compounds,
//! determiners, prepositions, numerals and quantifiers, and attributed
//! complements.

use pidense_tree::{DependencyTree, NodeId};

use crate::context::{Context, PhraseClass};
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::RuleOutcome;
use crate::proposition::{Component, PropKind};
use crate::ruleset::Ruleset;
use crate::rules::adjectival::extract_adjectival_phrase;
use crate::rules::noun_phrase::extract_noun_phrase;
use crate::rules::verb_phrase::extract_verb_phrase;

/// The entry point: dispatches the root's sole dependent (the sentence's
/// syntactic root) and returns its outcome verbatim.
pub struct TopRuleset;

impl Ruleset for TopRuleset {
    fn label(&self) -> &'static str {
        pidense_tree::TOP_LABEL
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        _lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let clause = *tree
            .children(node)
            .first()
            .ok_or(EngineError::MissingChild { node, label: "root" })?;
        engine.dispatch(tree, clause, &Lineage::root(), ctx)
    }
}

/// Coordination conjuncts. The governor says which family the conjunct
/// belongs to; without a stated mode the conjunct is processed as a noun
/// phrase (the compound and numeral rulesets dispatch conjuncts without
/// one, and those are nominal).
pub struct ConjRuleset;

impl Ruleset for ConjRuleset {
    fn label(&self) -> &'static str {
        "conj"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        match ctx.class {
            Some(PhraseClass::VerbPhrase) => Ok(RuleOutcome::VerbPhrase(extract_verb_phrase(
                tree, node, lineage, engine, ctx,
            )?)),
            Some(PhraseClass::NounPhrase) | None => {
                let outcome =
                    extract_noun_phrase(tree, node, lineage, engine, &Context::default())?;
                if outcome.reserved_for_preconj.is_empty() {
                    Ok(RuleOutcome::Words(outcome.alternatives))
                } else {
                    Ok(RuleOutcome::Nothing)
                }
            }
        }
    }
}

/// Noun compounds: a single word ("Oil prices"), or a coordinated set
/// ("East and West Germany") resolved through cc/conj.
pub struct NnRuleset;

impl Ruleset for NnRuleset {
    fn label(&self) -> &'static str {
        "nn"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let word = tree[node].surface().to_string();
        let down = lineage.descend(node);

        let connectors = tree.children_with_label(node, "cc");
        let Some(&connector) = connectors.first() else {
            return Ok(RuleOutcome::Word(word));
        };
        engine.dispatch(tree, connector, &down, &Context::default())?;

        let mut words = vec![word];
        for conjunct in tree.children_with_label(node, "conj") {
            let outcome = engine.dispatch(tree, conjunct, &down, &Context::default())?;
            if let Some(first) = outcome.into_words().into_iter().next() {
                words.push(first);
            }
        }
        Ok(RuleOutcome::Words(words))
    }
}

/// Proper-name compounds relabeled by the transformation pipeline; folded
/// into the governing name's text instead of emitting modifications.
pub struct NnJoinRuleset;

impl Ruleset for NnJoinRuleset {
    fn label(&self) -> &'static str {
        "nn-join"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let word = tree[node].surface().to_string();
        let down = lineage.descend(node);

        let conjuncts = tree.children_with_label(node, "conj");
        if conjuncts.is_empty() {
            return Ok(RuleOutcome::Word(word));
        }

        for connector in tree.children_with_label(node, "cc") {
            engine.dispatch(tree, connector, &down, &Context::default())?;
        }

        let mut words = vec![word];
        for conjunct in conjuncts {
            let outcome = engine.dispatch(
                tree,
                conjunct,
                &down,
                &Context::default().with_class(PhraseClass::NounPhrase),
            )?;
            if let Some(first) = outcome.into_words().into_iter().next() {
                words.push(first);
            }
        }
        Ok(RuleOutcome::Words(words))
    }
}

/// Determiners. The closed integrated set is folded into the noun phrase's
/// text; every other determiner ("some", "any", "every") emits its own
/// modification against the governing word and contributes nothing inline.
pub struct DetRuleset;

const INTEGRATED_DETERMINERS: [&str; 7] = ["the", "a", "an", "this", "these", "that", "those"];

impl Ruleset for DetRuleset {
    fn label(&self) -> &'static str {
        "det"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let word = tree[node].surface().to_string();
        if INTEGRATED_DETERMINERS.contains(&word.to_lowercase().as_str()) {
            return Ok(RuleOutcome::Word(word));
        }

        let governor = lineage.parent().ok_or(EngineError::MissingContext {
            label: "det",
            what: "a governing word in the ancestor path",
        })?;
        let governor_word = tree[governor].surface().to_string();
        engine.emit(
            [governor_word.into(), word.into()],
            PropKind::Modification,
        );
        Ok(RuleOutcome::Nothing)
    }
}

/// Prepositional phrases always generate propositions: one per object
/// alternative, plus, for a preconjunction ("to both East and West
/// Germany"), a connection tying the reserved alternatives' propositions
/// together. A clausal object contributes only when it resolved to an
/// embeddable string.
pub struct PrepRuleset;

impl Ruleset for PrepRuleset {
    fn label(&self) -> &'static str {
        "prep"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let word = tree[node].surface().to_string();
        let down = lineage.descend(node);

        if let Some(object) = tree.children_with_label(node, "pobj").first().copied() {
            let phrase = engine
                .dispatch(tree, object, &down, &Context::default())?
                .into_noun_phrase()
                .ok_or(EngineError::UnexpectedOutcome { node, label: "pobj" })?;

            let mut emitted = Vec::new();
            for noun in &phrase.alternatives {
                emitted.push(engine.emit(
                    [format!("{word} {noun}").into()],
                    PropKind::Preposition,
                ));
            }

            if !phrase.reserved_for_preconj.is_empty() {
                if let Some(preconj) = &phrase.preconj {
                    let mut content: Vec<Component> = vec![preconj.as_str().into()];
                    content.extend(
                        phrase
                            .reserved_for_preconj
                            .iter()
                            .filter_map(|&i| emitted.get(i))
                            .map(|&id| Component::from(id)),
                    );
                    engine.emit(content, PropKind::Connection);
                }
            }
        }

        if let Some(clause) = tree.children_with_label(node, "pcomp").first().copied() {
            match engine.dispatch(tree, clause, &down, &Context::default())? {
                RuleOutcome::VerbPhrase(vp) => {
                    if let Some(embeddable) = vp.embeddable {
                        engine.emit(
                            [format!("{word} {embeddable}").into()],
                            PropKind::Preposition,
                        );
                    }
                }
                RuleOutcome::Word(embedded) => {
                    engine.emit(
                        [format!("{word} {embedded}").into()],
                        PropKind::Preposition,
                    );
                }
                _ => {}
            }
        }

        Ok(RuleOutcome::Nothing)
    }
}

/// Numeric modifiers. Assembles the number from its own word plus `number`
/// and cc/conj dependents in surface order ("two hundred", "two or
/// three"), then dispatches quantifier modifiers with the assembled
/// numeral; the governing noun phrase emits the modification.
pub struct NumRuleset;

impl Ruleset for NumRuleset {
    fn label(&self) -> &'static str {
        "num"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let down = lineage.descend(node);

        let mut pieces = Vec::new();
        for label in ["number", "cc", "conj"] {
            pieces.extend(tree.children_with_label(node, label));
        }
        pieces.push(node);
        pieces.sort_by_key(|&id| tree.address(id));

        let mut words = Vec::new();
        for piece in pieces {
            if piece == node {
                words.push(tree[node].surface().to_string());
                continue;
            }
            match engine.dispatch(tree, piece, &down, &Context::default())? {
                RuleOutcome::Word(word) => words.push(word),
                RuleOutcome::Words(more) => words.extend(more),
                _ => {}
            }
        }
        let numeral = words.join(" ");

        for quantifier in tree.children_with_label(node, "quantmod") {
            engine.dispatch(
                tree,
                quantifier,
                &down,
                &Context::default().with_numeral(numeral.clone()),
            )?;
        }

        Ok(RuleOutcome::Word(numeral))
    }
}

/// Quantifier phrase modifiers always generate a modification against the
/// numeral they modify ("About 200" yields `(200, About) [M]`). The
/// numeral in context is part of the contract.
pub struct QuantmodRuleset;

impl Ruleset for QuantmodRuleset {
    fn label(&self) -> &'static str {
        "quantmod"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        _lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let numeral = ctx.numeral.clone().ok_or(EngineError::MissingContext {
            label: "quantmod",
            what: "the numeral being modified",
        })?;
        let word = tree[node].surface().to_string();
        engine.emit([numeral.into(), word.into()], PropKind::Modification);
        Ok(RuleOutcome::Nothing)
    }
}

/// Attributed complements planted by the transformation pipeline ("she
/// considered him *a friend*"). Nominal heads assemble as a noun phrase,
/// adjectival heads as an adjectival phrase; anything else degrades to the
/// bare word.
pub struct WhatRuleset;

impl Ruleset for WhatRuleset {
    fn label(&self) -> &'static str {
        "what"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        match tree[node].coarse_tag.as_str() {
            "NOUN" => {
                let phrase = extract_noun_phrase(tree, node, lineage, engine, ctx)?;
                for alternative in &phrase.alternatives {
                    engine.emit([alternative.as_str().into()], PropKind::What);
                }
            }
            "ADJ" => {
                let words = extract_adjectival_phrase(tree, node, lineage, engine, ctx)?;
                for word in &words {
                    engine.emit([word.as_str().into()], PropKind::What);
                }
            }
            other => {
                tracing::warn!(tag = %other, "unexpected attributed-complement tag");
                let word = tree[node].surface().to_string();
                engine.emit([word.into()], PropKind::What);
            }
        }
        Ok(RuleOutcome::Nothing)
    }
}
