//! Ruleset results, one explicit shape per handler family.
//!
//! Callers know which family they are dispatching into and pattern-match on
//! the outcome; a shape outside the dispatched family's contract is a typed
//! error at the call site, not a silent misread.

use crate::context::SubjectInfo;
use crate::proposition::PropId;

/// What a noun-phrase ruleset hands back to its caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NounPhraseOutcome {
    /// The resolved surface forms, one per coordinated alternative
    /// ("Mary and John" yields two).
    pub alternatives: Vec<String>,
    /// The connecting word of a coordination, when one was present.
    pub coordinator: Option<String>,
    /// A preconjunction word ("both", "either"), when one was present.
    pub preconj: Option<String>,
    /// Indices into `alternatives` reserved for a later
    /// preconjunction-emitted proposition instead of inline use.
    pub reserved_for_preconj: Vec<usize>,
    /// Subject info of an embedded relative clause, when one modified this
    /// phrase.
    pub relative_pronoun: Option<SubjectInfo>,
    /// Ids of the propositions the relative clause emitted.
    pub relative_ids: Vec<PropId>,
}

impl NounPhraseOutcome {
    /// This phrase in the shape verb-phrase rulesets consume as a subject.
    pub fn subject_info(&self) -> SubjectInfo {
        SubjectInfo {
            alternatives: self.alternatives.clone(),
            coordinator: self.coordinator.clone(),
            relative_pronoun: self
                .relative_pronoun
                .as_ref()
                .and_then(|wdt| wdt.alternatives.first().cloned()),
            relative_ids: self.relative_ids.clone(),
        }
    }
}

/// What a verb-phrase ruleset hands back to its caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerbPhraseOutcome {
    /// A string the parent clause may embed (a gerund complement's verb),
    /// or `None` when this clause emitted its content itself.
    pub embeddable: Option<String>,
    /// Ids of the propositions this clause emitted.
    pub prop_ids: Vec<PropId>,
    /// The clause's resolved subject.
    pub subjects: SubjectInfo,
    /// The noun-phrase complement of a copular clause, kept so the caller
    /// can emit connection propositions for its relative clauses.
    pub complement: Option<NounPhraseOutcome>,
    /// The subordinating marker of an adverbial clause ("because", "when").
    pub marker: Option<String>,
}

/// The result of one dispatch, polymorphic over the handler family.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// A bare word (atomic rulesets, adverbials, assembled numerals).
    Word(String),
    /// Several words (coordinated compounds, object alternatives).
    Words(Vec<String>),
    /// Nothing to contribute inline; any content was emitted directly.
    Nothing,
    NounPhrase(NounPhraseOutcome),
    VerbPhrase(VerbPhraseOutcome),
}

impl RuleOutcome {
    /// The single word, if this outcome is one.
    pub fn into_word(self) -> Option<String> {
        match self {
            RuleOutcome::Word(word) => Some(word),
            _ => None,
        }
    }

    /// The contributed words: one for `Word`, all for `Words`, none
    /// otherwise.
    pub fn into_words(self) -> Vec<String> {
        match self {
            RuleOutcome::Word(word) => vec![word],
            RuleOutcome::Words(words) => words,
            _ => Vec::new(),
        }
    }

    pub fn into_noun_phrase(self) -> Option<NounPhraseOutcome> {
        match self {
            RuleOutcome::NounPhrase(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_verb_phrase(self) -> Option<VerbPhraseOutcome> {
        match self {
            RuleOutcome::VerbPhrase(outcome) => Some(outcome),
            _ => None,
        }
    }
}
