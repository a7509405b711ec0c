//! Noun-phrase rulesets.
//!
//! Subjects, objects, possessives, temporal modifiers and appositions share
//! one assembly routine, [`extract_noun_phrase`]: resolve the pieces a noun
//! phrase is built from (determiner, possessive, name compounds,
//! coordination), let the free-standing dependents emit on their own
//! (prepositions, negations, adverbials, reduced clauses), assemble the
//! surface alternatives, then pair every alternative with every collected
//! modifier as a modification proposition. The individual rulesets differ
//! only in what they do with the assembled phrase: a subject hands the whole
//! record up, a direct object contributes the bare alternatives, an indirect
//! object or temporal modifier emits instead of contributing.

use pidense_tree::{DependencyTree, NodeId};

use crate::context::{Context, PhraseClass, SubjectInfo};
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::{NounPhraseOutcome, RuleOutcome};
use crate::proposition::PropKind;
use crate::ruleset::Ruleset;
use crate::rules::{children_in_surface_order, dispatch_each, resolve_child_word};
use crate::rules::verb_phrase::NO_SUBJECT;

/// A resolved name-compound dependent: a single word ("Oil" in "Oil
/// prices") or a coordinated set ("East", "West" in "East and West
/// Germany"). A coordinated compound multiplies the phrase's alternatives.
enum Compound {
    Single(String),
    Coordinated(Vec<String>),
}

/// The shared noun-phrase assembly. Step order is part of the contract:
/// emissions happen while the steps run, so reordering them reorders
/// proposition ids.
pub(crate) fn extract_noun_phrase(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    _ctx: &Context,
) -> Result<NounPhraseOutcome, EngineError> {
    if let Some(outcome) = try_of_phrase(tree, node, lineage, engine)? {
        return Ok(outcome);
    }

    let down = lineage.descend(node);

    let determiner = resolve_child_word(tree, node, "det", &down, engine)?;
    let possessive = resolve_child_word(tree, node, "poss", &down, engine)?;
    let compounds = resolve_name_compounds(tree, node, &down, engine)?;
    let (conjuncts, coordinator) = resolve_coordination(tree, node, &down, engine)?;

    dispatch_each(tree, node, "prep", &down, engine)?;
    let modifiers = resolve_modifiers(tree, node, &down, engine)?;
    dispatch_reduced_clauses(tree, node, &down, engine)?;
    dispatch_each(tree, node, "neg", &down, engine)?;
    emit_nominal_adverbials(tree, node, &down, engine)?;
    dispatch_each(tree, node, "advmod", &down, engine)?;

    let (alternatives, reserved_for_preconj) = assemble_alternatives(
        determiner.as_deref(),
        possessive.as_deref(),
        &compounds,
        &conjuncts,
    );

    dispatch_appositions(tree, node, &down, engine, &alternatives)?;

    for modifier in &modifiers {
        for alternative in &alternatives {
            engine.emit(
                [alternative.as_str().into(), modifier.as_str().into()],
                PropKind::Modification,
            );
        }
    }

    let preconj = resolve_child_word(tree, node, "preconj", &down, engine)?;
    let (relative_ids, relative_pronoun) =
        resolve_relative_clauses(tree, node, &down, engine, &alternatives)?;

    Ok(NounPhraseOutcome {
        alternatives,
        coordinator,
        preconj,
        reserved_for_preconj,
        relative_pronoun,
        relative_ids,
    })
}

/// Noun phrases headed by "some" or "kind" whose first dependent is a
/// preposition ("some of the apples") quantify the preposition's object:
/// the object's phrase is adopted wholesale and one modification per object
/// alternative records the quantifier.
fn try_of_phrase(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
) -> Result<Option<NounPhraseOutcome>, EngineError> {
    if !matches!(tree[node].surface().to_lowercase().as_str(), "some" | "kind") {
        return Ok(None);
    }
    let Some(&first_child) = tree.children(node).first() else {
        return Ok(None);
    };
    if tree[first_child].label != "prep" {
        return Ok(None);
    }

    let preposition = first_child;
    let object = *tree
        .children_with_label(preposition, "pobj")
        .first()
        .ok_or(EngineError::MissingChild {
            node: preposition,
            label: "pobj",
        })?;

    let down = lineage.descend(node).descend(preposition);
    let outcome = engine
        .dispatch(tree, object, &down, &Context::default())?
        .into_noun_phrase()
        .ok_or(EngineError::UnexpectedOutcome {
            node: preposition,
            label: "pobj",
        })?;

    let quantifier = format!(
        "{} {}",
        tree[node].surface(),
        tree[preposition].surface()
    );
    for noun in &outcome.alternatives {
        engine.emit(
            [noun.as_str().into(), quantifier.as_str().into()],
            PropKind::Modification,
        );
    }
    Engine::mark_consumed(tree, preposition);

    Ok(Some(outcome))
}

/// Resolve `nn-join` dependents: proper-name compounds folded into the
/// phrase text instead of emitting modifications.
fn resolve_name_compounds(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<Vec<Compound>, EngineError> {
    let mut compounds = Vec::new();
    for child in tree.children_with_label(node, "nn-join") {
        match engine.dispatch(tree, child, down, &Context::default())? {
            RuleOutcome::Word(word) => compounds.push(Compound::Single(word)),
            RuleOutcome::Words(words) => compounds.push(Compound::Coordinated(words)),
            _ => {}
        }
    }
    Ok(compounds)
}

/// Resolve cc/conj coordination under this phrase. The conjuncts become the
/// phrase's alternatives (the head word first); the connecting word is
/// reported so the clause that consumes the alternatives can tie its
/// per-alternative propositions together. Conjuncts without a connecting
/// word are left alone.
fn resolve_coordination(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<(Vec<String>, Option<String>), EngineError> {
    let head_word = tree[node].surface().to_string();

    let cc = tree.children_with_label(node, "cc");
    let Some(&connector) = cc.first() else {
        return Ok((vec![head_word], None));
    };

    let coordinator = engine
        .dispatch(tree, connector, down, &Context::default())?
        .into_word();

    let mut alternatives = vec![head_word];
    for conjunct in tree.children_with_label(node, "conj") {
        let outcome = engine.dispatch(
            tree,
            conjunct,
            down,
            &Context::default().with_class(PhraseClass::NounPhrase),
        )?;
        // A conjunct reserved for a preconjunction contributes nothing here.
        if let Some(first) = outcome.into_words().into_iter().next() {
            alternatives.push(first);
        }
    }

    Ok((alternatives, coordinator))
}

/// Resolve adjectival, numeric and plain noun modifiers, in surface order.
/// These are collected; the caller pairs each with every assembled
/// alternative.
fn resolve_modifiers(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<Vec<String>, EngineError> {
    let mut modifiers = Vec::new();
    for child in children_in_surface_order(tree, node, &["amod", "num", "nn"]) {
        match engine.dispatch(tree, child, down, &Context::default())? {
            RuleOutcome::Word(word) => modifiers.push(word),
            RuleOutcome::Words(words) => modifiers.extend(words),
            _ => {}
        }
    }
    tracing::debug!(?modifiers, "resolved noun modifiers");
    Ok(modifiers)
}

/// Dispatch reduced verbal modifiers ("the man sitting there"): clauses with
/// no subject of their own, analyzed with a placeholder subject.
fn dispatch_reduced_clauses(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<(), EngineError> {
    for child in tree.children_with_label(node, "vmod") {
        let ctx = Context::default().with_subject(SubjectInfo::single(NO_SUBJECT));
        engine.dispatch(tree, child, down, &ctx)?;
    }
    Ok(())
}

/// Noun phrases used adverbially under a noun emit standalone
/// modifications.
fn emit_nominal_adverbials(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<(), EngineError> {
    for child in tree.children_with_label(node, "npadvmod") {
        if let Some(word) = engine
            .dispatch(tree, child, down, &Context::default())?
            .into_word()
        {
            engine.emit([word.into()], PropKind::Modification);
        }
    }
    Ok(())
}

/// Build the phrase alternatives out of the resolved pieces.
///
/// One alternative per conjunct; a coordinated name compound multiplies
/// them further and reserves the products for a later preconjunction
/// proposition.
fn assemble_alternatives(
    determiner: Option<&str>,
    possessive: Option<&str>,
    compounds: &[Compound],
    conjuncts: &[String],
) -> (Vec<String>, Vec<usize>) {
    let mut alternatives = Vec::new();
    let mut reserved = Vec::new();

    for conjunct in conjuncts {
        match compounds.first() {
            Some(Compound::Single(_)) => {
                let mut parts: Vec<&str> = Vec::new();
                parts.extend(determiner);
                parts.extend(possessive);
                for compound in compounds {
                    if let Compound::Single(word) = compound {
                        parts.push(word);
                    }
                }
                parts.push(conjunct);
                alternatives.push(parts.join(" "));
            }
            Some(Compound::Coordinated(words)) => {
                for word in words {
                    let mut parts: Vec<&str> = Vec::new();
                    parts.extend(determiner);
                    parts.extend(possessive);
                    parts.push(word);
                    parts.push(conjunct);
                    alternatives.push(parts.join(" "));
                    reserved.push(alternatives.len() - 1);
                }
            }
            None => {
                let mut parts: Vec<&str> = Vec::new();
                parts.extend(determiner);
                parts.extend(possessive);
                parts.push(conjunct);
                alternatives.push(parts.join(" "));
            }
        }
    }

    (alternatives, reserved)
}

/// Dispatch appositions with the assembled alternatives as their subject.
fn dispatch_appositions(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
    alternatives: &[String],
) -> Result<(), EngineError> {
    for child in tree.children_with_label(node, "appos") {
        let ctx = Context::default()
            .with_subject(SubjectInfo::from_alternatives(alternatives.to_vec()));
        engine.dispatch(tree, child, down, &ctx)?;
    }
    Ok(())
}

/// Dispatch relative clauses with the assembled alternatives as their
/// borrowable subject; report the clause's emitted ids and its subject (the
/// relative pronoun) for the connection propositions the consuming clause
/// emits later.
fn resolve_relative_clauses(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
    alternatives: &[String],
) -> Result<(Vec<crate::proposition::PropId>, Option<SubjectInfo>), EngineError> {
    let mut relative_ids = Vec::new();
    let mut relative_pronoun = None;
    for child in tree.children_with_label(node, "rcmod") {
        let ctx = Context::default()
            .with_subject(SubjectInfo::from_alternatives(alternatives.to_vec()));
        let clause = engine
            .dispatch(tree, child, down, &ctx)?
            .into_verb_phrase()
            .ok_or(EngineError::UnexpectedOutcome {
                node,
                label: "rcmod",
            })?;
        relative_ids = clause.prop_ids;
        relative_pronoun = Some(clause.subjects);
    }
    Ok((relative_ids, relative_pronoun))
}

/// Subjects hand the whole phrase record up to the governing clause.
pub struct NsubjRuleset;

impl Ruleset for NsubjRuleset {
    fn label(&self) -> &'static str {
        "nsubj"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        Ok(RuleOutcome::NounPhrase(extract_noun_phrase(
            tree, node, lineage, engine, ctx,
        )?))
    }
}

/// Passive subjects behave exactly like subjects.
pub struct NsubjpassRuleset;

impl Ruleset for NsubjpassRuleset {
    fn label(&self) -> &'static str {
        "nsubjpass"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        Ok(RuleOutcome::NounPhrase(extract_noun_phrase(
            tree, node, lineage, engine, ctx,
        )?))
    }
}

/// Direct objects contribute their bare alternatives to the governing
/// clause's predications, unless the alternatives are reserved for a
/// preconjunction proposition.
pub struct DobjRuleset;

impl Ruleset for DobjRuleset {
    fn label(&self) -> &'static str {
        "dobj"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let outcome = extract_noun_phrase(tree, node, lineage, engine, ctx)?;
        if outcome.reserved_for_preconj.is_empty() {
            Ok(RuleOutcome::Words(outcome.alternatives))
        } else {
            Ok(RuleOutcome::Nothing)
        }
    }
}

/// Prepositional objects hand the whole record up; the preposition ruleset
/// needs the preconjunction bookkeeping.
pub struct PobjRuleset;

impl Ruleset for PobjRuleset {
    fn label(&self) -> &'static str {
        "pobj"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        Ok(RuleOutcome::NounPhrase(extract_noun_phrase(
            tree, node, lineage, engine, ctx,
        )?))
    }
}

/// The indirect object of a verb always generates a proposition of its own:
/// "I gave her a book" yields `((to) her) [PREP]`, one per coordinated
/// alternative.
pub struct IobjRuleset;

impl Ruleset for IobjRuleset {
    fn label(&self) -> &'static str {
        "iobj"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let outcome = extract_noun_phrase(tree, node, lineage, engine, &Context::default())?;
        if outcome.reserved_for_preconj.is_empty() {
            for alternative in &outcome.alternatives {
                engine.emit(
                    [format!("(to) {alternative}").into()],
                    PropKind::Preposition,
                );
            }
        }
        Ok(RuleOutcome::Nothing)
    }
}

/// Possessive modifiers split on the possessor's part of speech: a
/// possessive pronoun is folded into the phrase text, a full noun-phrase
/// possessor emits a modification against the possessed referent and
/// contributes nothing inline. Any other tag degrades with a warning.
pub struct PossRuleset;

impl Ruleset for PossRuleset {
    fn label(&self) -> &'static str {
        "poss"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        _ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        match tree[node].fine_tag.as_str() {
            "PRP$" => Ok(RuleOutcome::Word(tree[node].surface().to_string())),
            "NN" | "NNS" | "NNP" => {
                let outcome =
                    extract_noun_phrase(tree, node, lineage, engine, &Context::default())?;
                if !outcome.reserved_for_preconj.is_empty() {
                    return Ok(RuleOutcome::Nothing);
                }

                let marker = *tree
                    .children_with_label(node, "possessive")
                    .first()
                    .ok_or(EngineError::MissingChild {
                        node,
                        label: "possessive",
                    })?;
                engine.dispatch(tree, marker, &lineage.descend(node), &Context::default())?;

                let referent = lineage.parent().ok_or(EngineError::MissingContext {
                    label: "poss",
                    what: "a governing noun in the ancestor path",
                })?;
                let referent = tree[referent].surface().to_string();
                for item in &outcome.alternatives {
                    engine.emit(
                        [referent.as_str().into(), format!("{item}'s").into()],
                        PropKind::Modification,
                    );
                }
                Ok(RuleOutcome::Nothing)
            }
            other => {
                tracing::warn!(
                    tag = %other,
                    "possessive ruleset cannot handle this part of speech yet"
                );
                Ok(RuleOutcome::Nothing)
            }
        }
    }
}

/// Noun phrases used adverbially ("40 years" in "he is 40 years old")
/// assemble their pieces in surface order into one string, emitting
/// nothing; the governing clause decides what the string modifies.
pub struct NpadvmodRuleset;

impl Ruleset for NpadvmodRuleset {
    fn label(&self) -> &'static str {
        "npadvmod"
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
        let mut pieces =
            children_in_surface_order(tree, node, &["det", "poss", "nn", "prep", "amod", "num"]);
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
        Ok(RuleOutcome::Word(words.join(" ")))
    }
}

/// A temporal modifier always generates a modification ("Last night, I ran"
/// yields `(Last night) [M]`).
pub struct TmodRuleset;

impl Ruleset for TmodRuleset {
    fn label(&self) -> &'static str {
        "tmod"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let outcome = extract_noun_phrase(tree, node, lineage, engine, ctx)?;
        if let Some(first) = outcome.alternatives.first() {
            engine.emit([first.as_str().into()], PropKind::Modification);
        }
        Ok(RuleOutcome::Nothing)
    }
}

/// Appositions predicate their phrase of the subject the caller supplies:
/// "John, my brother, was here" yields `((is), John, my brother) [P]`.
/// The subject in context is a structural requirement.
pub struct ApposRuleset;

impl Ruleset for ApposRuleset {
    fn label(&self) -> &'static str {
        "appos"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let subject = ctx
            .subject
            .clone()
            .ok_or(EngineError::MissingContext {
                label: "appos",
                what: "the apposition subject",
            })?;
        let outcome = extract_noun_phrase(tree, node, lineage, engine, ctx)?;
        let own = outcome.alternatives.first().cloned().unwrap_or_default();
        for alternative in &subject.alternatives {
            engine.emit(
                ["(is)".into(), alternative.as_str().into(), own.as_str().into()],
                PropKind::Predication,
            );
        }
        Ok(RuleOutcome::Nothing)
    }
}
