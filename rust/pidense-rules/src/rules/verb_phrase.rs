//! Verb-phrase rulesets.
//!
//! Clauses (the root clause, complements, subordinate, relative and
//! paratactic clauses, and verb-side coordination conjuncts) share one
//! extraction, [`extract_verb_phrase`]. It resolves the clause head into one
//! of four shapes by its word and part of speech: a copular "be" root, an
//! action verb, or a copula with a nominal or adjectival complement. The
//! subject and auxiliaries resolved by the chosen shape are threaded back
//! out and forwarded into coordination conjuncts, so "she has run and
//! jumped" predicates both verbs of the same subject with the same
//! auxiliary.

use pidense_tree::{DependencyTree, NodeId};

use crate::context::{Context, PhraseClass, SubjectInfo};
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::{RuleOutcome, VerbPhraseOutcome};
use crate::proposition::{Component, PropId, PropKind};
use crate::ruleset::Ruleset;
use crate::rules::{children_in_surface_order, dispatch_each, resolve_child_word};
use crate::rules::adjectival::extract_adjectival_phrase;
use crate::rules::noun_phrase::extract_noun_phrase;

/// Placeholder subject for clauses that have none and can borrow none.
pub(crate) const NO_SUBJECT: &str = "NO_SUBJ";

/// Placeholder marker for adverbial clauses with no subordinating word.
const NO_MARKER: &str = "NO_MARKER";

const BE_FORMS: [&str; 7] = ["am", "are", "is", "being", "was", "were", "been"];

/// The shared clause extraction.
pub(crate) fn extract_verb_phrase(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<VerbPhraseOutcome, EngineError> {
    dispatch_each(tree, node, "discourse", &lineage.descend(node), engine)?;

    let word = tree[node].surface().to_string();
    let fine_tag = tree[node].fine_tag.clone();

    let (mut outcome, subjects, auxiliaries) = if BE_FORMS.contains(&word.as_str()) {
        handle_be_as_root(tree, node, lineage, engine, ctx)?
    } else if matches!(
        fine_tag.as_str(),
        "VBZ" | "VBD" | "VBN" | "VB" | "VBG" | "VBP"
    ) {
        handle_action_verb(tree, node, lineage, engine, ctx)?
    } else if matches!(
        fine_tag.as_str(),
        "NN" | "NNS" | "NNP" | "NNPS" | "CD" | "WP"
    ) {
        handle_copula_with_noun(tree, node, lineage, engine, ctx)?
    } else if fine_tag == "JJ" {
        handle_copula_with_adjective(tree, node, lineage, engine, ctx)?
    } else {
        tracing::warn!(
            tag = %fine_tag,
            word = %word,
            "verb phrase cannot handle this part of speech yet"
        );
        return Ok(VerbPhraseOutcome {
            embeddable: Some(word),
            ..VerbPhraseOutcome::default()
        });
    };

    process_adverbial_clauses(tree, node, lineage, engine, &outcome.prop_ids)?;
    process_coordinations(
        tree,
        node,
        lineage,
        engine,
        &subjects,
        &auxiliaries,
        &mut outcome.prop_ids,
    )?;
    dispatch_each(tree, node, "parataxis", &lineage.descend(node), engine)?;

    outcome.subjects = subjects;
    emit_relative_connections(engine, &outcome);

    Ok(outcome)
}

/// Resolve the clause's subject: an overt `nsubj`/`nsubjpass`, a clausal
/// `csubj`, a subject borrowed from the caller (wrapped in parentheses to
/// mark the borrowing), or the placeholder. A relative pronoun standing as
/// subject is annotated with its resolved antecedent.
fn resolve_subjects(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<SubjectInfo, EngineError> {
    let down = lineage.descend(node);

    let mut subjects = match tree.children_with_label(node, "nsubj").first().copied() {
        Some(child) => dispatch_subject_phrase(tree, child, &down, engine)?,
        None => match &ctx.subject {
            Some(borrowed) => SubjectInfo::from_alternatives(
                borrowed
                    .alternatives
                    .iter()
                    .map(|subject| format!("({subject})"))
                    .collect(),
            ),
            None => SubjectInfo::single(format!("({NO_SUBJECT})")),
        },
    };

    if let Some(child) = tree.children_with_label(node, "nsubjpass").first().copied() {
        subjects = dispatch_subject_phrase(tree, child, &down, engine)?;
    }

    if let Some(child) = tree.children_with_label(node, "csubj").first().copied() {
        let clause = engine
            .dispatch(tree, child, &down, &Context::default())?
            .into_verb_phrase()
            .ok_or(EngineError::UnexpectedOutcome {
                node,
                label: "csubj",
            })?;
        let subject = clause
            .embeddable
            .unwrap_or_else(|| tree[child].surface().to_string());
        subjects = SubjectInfo::single(subject);
    }

    // Resolve relative pronouns in subordinate clauses against the
    // antecedent the caller supplied.
    if let Some(borrowed) = &ctx.subject {
        if let Some(first) = subjects.alternatives.first_mut() {
            if matches!(first.as_str(), "that" | "which" | "who") {
                if let Some(antecedent) = borrowed.alternatives.first() {
                    first.push_str(&format!("(={antecedent})"));
                }
            }
        }
    }

    Ok(subjects)
}

fn dispatch_subject_phrase(
    tree: &mut DependencyTree,
    child: NodeId,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<SubjectInfo, EngineError> {
    let phrase = engine
        .dispatch(tree, child, down, &Context::default())?
        .into_noun_phrase()
        .ok_or(EngineError::UnexpectedOutcome {
            node: child,
            label: "nsubj",
        })?;
    Ok(phrase.subject_info())
}

/// Resolve auxiliaries (`aux` and `auxpass`, in surface order), or borrow
/// the caller's when the clause has none of its own.
fn resolve_auxiliaries(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<Vec<String>, EngineError> {
    let down = lineage.descend(node);
    let mut auxiliaries = Vec::new();
    for child in children_in_surface_order(tree, node, &["aux", "auxpass"]) {
        if let Some(word) = engine
            .dispatch(tree, child, &down, &Context::default())?
            .into_word()
        {
            auxiliaries.push(word);
        }
    }
    if auxiliaries.is_empty() {
        if let Some(borrowed) = &ctx.auxiliaries {
            auxiliaries = borrowed.clone();
        }
    }
    Ok(auxiliaries)
}

/// Resolve the clause's complements (`dobj`, `xcomp`, `acomp`, in surface
/// order), forwarding the resolved subject so embedded clauses can borrow
/// it. Clausal complements contribute their embeddable string, if any.
fn resolve_complements(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    forwarded: &Context,
) -> Result<Vec<String>, EngineError> {
    let down = lineage.descend(node);
    let mut complements = Vec::new();
    for child in children_in_surface_order(tree, node, &["dobj", "xcomp", "acomp"]) {
        match engine.dispatch(tree, child, &down, forwarded)? {
            RuleOutcome::VerbPhrase(clause) => {
                if let Some(embeddable) = clause.embeddable {
                    complements.push(embeddable);
                }
            }
            RuleOutcome::Words(words) => complements.extend(words),
            RuleOutcome::Word(word) => complements.push(word),
            _ => {}
        }
    }
    Ok(complements)
}

/// Emit the clause's predications: one per subject-alternative ×
/// complement (or per subject-alternative alone, without complements). An
/// embedded gerund pairs the verb with its complements only; its subject
/// lives in the parent clause. When the subject was coordinated, a
/// connection proposition referencing all emitted predications follows.
fn emit_predications(
    engine: &mut Engine,
    verb: &str,
    subjects: &SubjectInfo,
    complements: &[String],
    label: &str,
    fine_tag: &str,
) -> Vec<PropId> {
    let mut ids = Vec::new();
    if fine_tag == "VBG" && !matches!(label, "null" | "root" | "conj") {
        for complement in complements {
            ids.push(engine.emit(
                [verb.into(), complement.as_str().into()],
                PropKind::Predication,
            ));
        }
    } else {
        for subject in &subjects.alternatives {
            if complements.is_empty() {
                ids.push(engine.emit(
                    [verb.into(), subject.as_str().into()],
                    PropKind::Predication,
                ));
            } else {
                for complement in complements {
                    ids.push(engine.emit(
                        [
                            verb.into(),
                            subject.as_str().into(),
                            complement.as_str().into(),
                        ],
                        PropKind::Predication,
                    ));
                }
            }
        }
    }
    emit_subject_coordination(engine, subjects, &ids);
    ids
}

/// A coordinated subject ties its per-alternative predications together
/// through the connecting word, by id.
fn emit_subject_coordination(engine: &mut Engine, subjects: &SubjectInfo, ids: &[PropId]) {
    if subjects.alternatives.len() < 2 || ids.len() < 2 {
        return;
    }
    let Some(coordinator) = &subjects.coordinator else {
        return;
    };
    let mut content: Vec<Component> = vec![coordinator.as_str().into()];
    content.extend(ids.iter().map(|&id| Component::from(id)));
    engine.emit(content, PropKind::Connection);
}

/// A copular "be" as the clause root: "the cat is in the garden",
/// "it was ten years ago".
fn handle_be_as_root(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<(VerbPhraseOutcome, SubjectInfo, Vec<String>), EngineError> {
    let down = lineage.descend(node);
    let subjects = resolve_subjects(tree, node, lineage, engine, ctx)?;
    let auxiliaries = resolve_auxiliaries(tree, node, lineage, engine, ctx)?;

    let mut verb_parts = auxiliaries.clone();
    verb_parts.push(tree[node].surface().to_string());
    let verb = verb_parts.join(" ");

    let mut modifiers =
        resolve_dummy_subject_prepositions(tree, node, lineage, engine, &subjects)?;
    modifiers.extend(resolve_dummy_subject_adverb(
        tree, node, lineage, engine, &subjects,
    )?);

    dispatch_each(tree, node, "complm", &down, engine)?;

    let mut prop_ids = Vec::new();
    if !modifiers.is_empty() && subjects.first().eq_ignore_ascii_case("it") {
        // "it" is a semantically empty subject; the adverbial and
        // prepositional material (a date, an age) joins the predication.
        for subject in &subjects.alternatives {
            for modifier in &modifiers {
                prop_ids.push(engine.emit(
                    [
                        verb.as_str().into(),
                        subject.as_str().into(),
                        modifier.as_str().into(),
                    ],
                    PropKind::Predication,
                ));
            }
        }
    } else {
        for subject in &subjects.alternatives {
            prop_ids.push(engine.emit(
                [verb.as_str().into(), subject.as_str().into()],
                PropKind::Predication,
            ));
        }
    }
    emit_subject_coordination(engine, &subjects, &prop_ids);

    Ok((
        VerbPhraseOutcome {
            embeddable: None,
            prop_ids,
            ..VerbPhraseOutcome::default()
        },
        subjects,
        auxiliaries,
    ))
}

/// Prepositional modifiers of a copular root. With a dummy "it" subject the
/// first preposition's object is folded into the predication (requiring the
/// object to exist); otherwise the prepositions emit on their own.
fn resolve_dummy_subject_prepositions(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    subjects: &SubjectInfo,
) -> Result<Vec<String>, EngineError> {
    let prepositions = tree.children_with_label(node, "prep");
    if prepositions.is_empty() {
        return Ok(Vec::new());
    }

    if subjects.first().eq_ignore_ascii_case("it") {
        let preposition = prepositions[0];
        let object = *tree
            .children_with_label(preposition, "pobj")
            .first()
            .ok_or(EngineError::MissingChild {
                node: preposition,
                label: "pobj",
            })?;
        let down = lineage.descend(node).descend(preposition);
        let phrase = engine
            .dispatch(tree, object, &down, &Context::default())?
            .into_noun_phrase()
            .ok_or(EngineError::UnexpectedOutcome {
                node: preposition,
                label: "pobj",
            })?;
        let prep_word = tree[preposition].surface().to_string();
        let modifiers = phrase
            .alternatives
            .iter()
            .map(|noun| format!("{prep_word} {noun}"))
            .collect();
        Engine::mark_consumed(tree, preposition);
        Ok(modifiers)
    } else {
        dispatch_each(tree, node, "prep", &lineage.descend(node), engine)?;
        Ok(Vec::new())
    }
}

/// The first adverbial modifier of a copular root; with a dummy "it"
/// subject its own emission is suppressed so it can join the predication.
fn resolve_dummy_subject_adverb(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    subjects: &SubjectInfo,
) -> Result<Vec<String>, EngineError> {
    let Some(&adverb) = tree.children_with_label(node, "advmod").first() else {
        return Ok(Vec::new());
    };
    let ctx = if subjects.first().eq_ignore_ascii_case("it") {
        Context::default().suppressed()
    } else {
        Context::default()
    };
    let down = lineage.descend(node);
    Ok(engine
        .dispatch(tree, adverb, &down, &ctx)?
        .into_word()
        .into_iter()
        .collect())
}

/// An action verb as the clause head.
fn handle_action_verb(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<(VerbPhraseOutcome, SubjectInfo, Vec<String>), EngineError> {
    let down = lineage.descend(node);
    let subjects = resolve_subjects(tree, node, lineage, engine, ctx)?;
    let auxiliaries = resolve_auxiliaries(tree, node, lineage, engine, ctx)?;
    let particle = resolve_child_word(tree, node, "prt", &down, engine)?;

    let mut verb_parts = auxiliaries.clone();
    verb_parts.push(tree[node].surface().to_string());
    verb_parts.extend(particle);
    let verb = verb_parts.join(" ");

    let forwarded = Context::default().with_subject(subjects.clone());
    let complements = resolve_complements(tree, node, lineage, engine, &forwarded)?;

    if let Some(child) = tree.children_with_label(node, "ccomp").first().copied() {
        engine.dispatch(tree, child, &down, &forwarded)?;
    }

    dispatch_each(tree, node, "prep", &down, engine)?;
    if let Some(child) = tree.children_with_label(node, "iobj").first().copied() {
        engine.dispatch(tree, child, &down, &Context::default())?;
    }

    dispatch_each(tree, node, "advmod", &down, engine)?;
    dispatch_each(tree, node, "tmod", &down, engine)?;
    dispatch_each(tree, node, "neg", &down, engine)?;
    dispatch_each(tree, node, "complm", &down, engine)?;
    dispatch_each(tree, node, "what", &down, engine)?;

    let label = tree[node].label.clone();
    let fine_tag = tree[node].fine_tag.clone();

    // Embedding contract: a gerund under a clausal-complement label hands
    // its verb up for the parent predication instead of (or besides)
    // predicating here.
    let outcome = if matches!(label.as_str(), "xcomp" | "ccomp" | "pcomp" | "csubj")
        && fine_tag == "VBG"
    {
        let prop_ids = if complements.is_empty() {
            Vec::new()
        } else {
            emit_predications(engine, &verb, &subjects, &complements, &label, &fine_tag)
        };
        VerbPhraseOutcome {
            embeddable: Some(tree[node].surface().to_string()),
            prop_ids,
            ..VerbPhraseOutcome::default()
        }
    } else {
        let prop_ids =
            emit_predications(engine, &verb, &subjects, &complements, &label, &fine_tag);
        VerbPhraseOutcome {
            embeddable: None,
            prop_ids,
            ..VerbPhraseOutcome::default()
        }
    };

    Ok((outcome, subjects, auxiliaries))
}

/// A copula with a noun-phrase complement ("John is my friend"). The `cop`
/// child is a structural requirement. The complement record is kept on the
/// outcome so relative clauses inside it can be connected afterwards.
fn handle_copula_with_noun(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<(VerbPhraseOutcome, SubjectInfo, Vec<String>), EngineError> {
    let down = lineage.descend(node);
    let subjects = resolve_subjects(tree, node, lineage, engine, ctx)?;

    let copula = *tree
        .children_with_label(node, "cop")
        .first()
        .ok_or(EngineError::MissingChild { node, label: "cop" })?;
    let copula_word = engine
        .dispatch(tree, copula, &down, &Context::default())?
        .into_word()
        .unwrap_or_default();

    let auxiliaries = resolve_auxiliaries(tree, node, lineage, engine, ctx)?;
    let mut verb_parts = auxiliaries.clone();
    verb_parts.push(copula_word);
    let verb = verb_parts.join(" ");

    dispatch_each(tree, node, "complm", &down, engine)?;

    let complement = extract_noun_phrase(tree, node, lineage, engine, ctx)?;

    let mut prop_ids = Vec::new();
    for subject in &subjects.alternatives {
        for alternative in &complement.alternatives {
            prop_ids.push(engine.emit(
                [
                    verb.as_str().into(),
                    subject.as_str().into(),
                    alternative.as_str().into(),
                ],
                PropKind::Predication,
            ));
        }
    }
    emit_subject_coordination(engine, &subjects, &prop_ids);

    Ok((
        VerbPhraseOutcome {
            embeddable: None,
            prop_ids,
            complement: Some(complement),
            ..VerbPhraseOutcome::default()
        },
        subjects,
        auxiliaries,
    ))
}

/// A copula with an adjectival complement ("the cat is black").
fn handle_copula_with_adjective(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    ctx: &Context,
) -> Result<(VerbPhraseOutcome, SubjectInfo, Vec<String>), EngineError> {
    let down = lineage.descend(node);
    let subjects = resolve_subjects(tree, node, lineage, engine, ctx)?;

    let copula = *tree
        .children_with_label(node, "cop")
        .first()
        .ok_or(EngineError::MissingChild { node, label: "cop" })?;
    let copula_word = engine
        .dispatch(tree, copula, &down, &Context::default())?
        .into_word()
        .unwrap_or_default();

    let auxiliaries = resolve_auxiliaries(tree, node, lineage, engine, ctx)?;
    let mut verb_parts = auxiliaries.clone();
    verb_parts.push(copula_word);
    let verb = verb_parts.join(" ");

    dispatch_each(tree, node, "complm", &down, engine)?;
    emit_nominal_adverbials(tree, node, &down, engine)?;

    let words = extract_adjectival_phrase(tree, node, lineage, engine, ctx)?;

    let mut prop_ids = Vec::new();
    for subject in &subjects.alternatives {
        for word in &words {
            prop_ids.push(engine.emit(
                [
                    verb.as_str().into(),
                    subject.as_str().into(),
                    word.as_str().into(),
                ],
                PropKind::Predication,
            ));
        }
    }
    emit_subject_coordination(engine, &subjects, &prop_ids);

    Ok((
        VerbPhraseOutcome {
            embeddable: None,
            prop_ids,
            ..VerbPhraseOutcome::default()
        },
        subjects,
        auxiliaries,
    ))
}

/// Nominal adverbials under a clause head emit against the head's word
/// ("he is 40 years old" yields `(old, 40 years) [M]`).
fn emit_nominal_adverbials(
    tree: &mut DependencyTree,
    node: NodeId,
    down: &Lineage,
    engine: &mut Engine,
) -> Result<(), EngineError> {
    for child in tree.children_with_label(node, "npadvmod") {
        if let Some(modifier) = engine
            .dispatch(tree, child, down, &Context::default())?
            .into_word()
        {
            let own = tree[node].surface().to_string();
            engine.emit([own.into(), modifier.into()], PropKind::Modification);
        }
    }
    Ok(())
}

/// Adverbial clauses connect to the governing clause through their marker:
/// one connection per own-predication, referencing the clause's
/// propositions by id.
fn process_adverbial_clauses(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    prop_ids: &[PropId],
) -> Result<(), EngineError> {
    let down = lineage.descend(node);
    for child in tree.children_with_label(node, "advcl") {
        let clause = engine
            .dispatch(tree, child, &down, &Context::default())?
            .into_verb_phrase()
            .ok_or(EngineError::UnexpectedOutcome {
                node,
                label: "advcl",
            })?;
        let marker = clause.marker.clone().unwrap_or_else(|| NO_MARKER.to_string());
        for &own in prop_ids {
            let mut content: Vec<Component> = vec![marker.as_str().into(), own.into()];
            content.extend(clause.prop_ids.iter().map(|&id| Component::from(id)));
            engine.emit(content, PropKind::Connection);
        }
    }
    Ok(())
}

/// Verb-side coordination: conjunct clauses borrow this clause's subject
/// and auxiliaries, their propositions accumulate onto this clause's list,
/// and the connecting word (prefixed by a preconjunction, when present)
/// emits a connection over the whole accumulated list.
fn process_coordinations(
    tree: &mut DependencyTree,
    node: NodeId,
    lineage: &Lineage,
    engine: &mut Engine,
    subjects: &SubjectInfo,
    auxiliaries: &[String],
    prop_ids: &mut Vec<PropId>,
) -> Result<(), EngineError> {
    let conjuncts = tree.children_with_label(node, "conj");
    if conjuncts.is_empty() {
        return Ok(());
    }
    let down = lineage.descend(node);

    let mut connector = match tree.children_with_label(node, "cc").first().copied() {
        Some(child) => engine
            .dispatch(tree, child, &down, &Context::default())?
            .into_word(),
        None => None,
    };
    if let Some(child) = tree.children_with_label(node, "preconj").first().copied() {
        if let Some(preconj) = engine
            .dispatch(tree, child, &down, &Context::default())?
            .into_word()
        {
            connector = Some(match connector {
                Some(word) => format!("{preconj}_{word}"),
                None => preconj,
            });
        }
    }

    for conjunct in conjuncts {
        let ctx = Context::default()
            .with_class(PhraseClass::VerbPhrase)
            .with_subject(subjects.clone())
            .with_auxiliaries(auxiliaries.to_vec());
        let clause = engine
            .dispatch(tree, conjunct, &down, &ctx)?
            .into_verb_phrase()
            .ok_or(EngineError::UnexpectedOutcome { node, label: "conj" })?;
        prop_ids.extend(clause.prop_ids);
    }

    if let Some(connector) = connector {
        let mut content: Vec<Component> = vec![connector.into()];
        content.extend(prop_ids.iter().map(|&id| Component::from(id)));
        engine.emit(content, PropKind::Connection);
    }
    Ok(())
}

/// Connect relative-clause propositions (on the subject, and on a copular
/// complement) to this clause's predications through the relative pronoun.
fn emit_relative_connections(engine: &mut Engine, outcome: &VerbPhraseOutcome) {
    if let Some(pronoun) = &outcome.subjects.relative_pronoun {
        for &own in &outcome.prop_ids {
            for &relative in &outcome.subjects.relative_ids {
                engine.emit(
                    [pronoun.as_str().into(), own.into(), relative.into()],
                    PropKind::Connection,
                );
            }
        }
    }

    if let Some(complement) = &outcome.complement {
        if let Some(wdt) = &complement.relative_pronoun {
            if let Some(pronoun) = wdt.alternatives.first() {
                for &own in &outcome.prop_ids {
                    for &relative in &complement.relative_ids {
                        engine.emit(
                            [pronoun.as_str().into(), own.into(), relative.into()],
                            PropKind::Connection,
                        );
                    }
                }
            }
        }
    }
}

/// The plain clause rulesets: the root clause and every clause-shaped
/// relation that adds nothing to the shared extraction.
pub struct VerbPhraseRuleset {
    label: &'static str,
}

impl VerbPhraseRuleset {
    pub const fn new(label: &'static str) -> Self {
        VerbPhraseRuleset { label }
    }
}

impl Ruleset for VerbPhraseRuleset {
    fn label(&self) -> &'static str {
        self.label
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        Ok(RuleOutcome::VerbPhrase(extract_verb_phrase(
            tree, node, lineage, engine, ctx,
        )?))
    }
}

/// Adverbial clauses additionally resolve their subordinating marker, which
/// the governing clause uses for the connection proposition.
pub struct AdvclRuleset;

impl Ruleset for AdvclRuleset {
    fn label(&self) -> &'static str {
        "advcl"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        let mut outcome = extract_verb_phrase(tree, node, lineage, engine, ctx)?;
        let marker = resolve_child_word(tree, node, "mark", &lineage.descend(node), engine)?
            .unwrap_or_else(|| NO_MARKER.to_string());
        outcome.marker = Some(marker);
        Ok(RuleOutcome::VerbPhrase(outcome))
    }
}
