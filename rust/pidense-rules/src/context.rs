//! The per-dispatch side channel between a parent ruleset and the child it
//! is about to dispatch.
//!
//! A [`Context`] is constructed fresh for every recursive call and never
//! mutated after construction: a parent decides exactly what the child may
//! see (a borrowable subject, a coordination mode, a numeral to bind) and
//! the child reads it. Nothing in a context outlives the dispatch it was
//! built for.

use crate::proposition::PropId;

/// Which phrase family a coordination conjunct should be processed as.
///
/// A `conj` dependent inherits its governor's role: "Mary and *John* ran"
/// processes John as a noun phrase, "Mary ran and *jumped*" processes
/// jumped as a full clause. The governor communicates the mode here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseClass {
    NounPhrase,
    VerbPhrase,
}

/// A clause subject as resolved by a noun-phrase ruleset, in the shape
/// verb-phrase rulesets consume: one surface form per coordinated
/// alternative, plus the information needed later for connection
/// propositions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectInfo {
    /// One resolved surface form per coordinated alternative; never empty
    /// for a subject that was actually resolved.
    pub alternatives: Vec<String>,
    /// The connecting word, when the subject was coordinated ("Mary *and*
    /// John"). Consumed by the predication step to tie the per-alternative
    /// predications together.
    pub coordinator: Option<String>,
    /// The relative pronoun of an embedded relative clause, if one modified
    /// this subject ("the man *who*...").
    pub relative_pronoun: Option<String>,
    /// Ids of the propositions the relative clause emitted.
    pub relative_ids: Vec<PropId>,
}

impl SubjectInfo {
    /// A subject with a single alternative and no embedded clauses.
    pub fn single(alternative: impl Into<String>) -> Self {
        SubjectInfo {
            alternatives: vec![alternative.into()],
            ..SubjectInfo::default()
        }
    }

    /// A subject with the given alternatives and no embedded clauses.
    pub fn from_alternatives(alternatives: Vec<String>) -> Self {
        SubjectInfo {
            alternatives,
            ..SubjectInfo::default()
        }
    }

    /// The first alternative, or the empty string for an unresolved subject.
    pub fn first(&self) -> &str {
        self.alternatives.first().map(String::as_str).unwrap_or("")
    }
}

/// Contextual information a parent ruleset threads into one child dispatch.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Coordination mode for a `conj` child.
    pub class: Option<PhraseClass>,
    /// A subject the child may borrow if it has no overt subject of its own
    /// (embedded clauses, appositions, reduced modifiers).
    pub subject: Option<SubjectInfo>,
    /// Auxiliaries the child may borrow (coordinated verb phrases share the
    /// first conjunct's auxiliaries: "she has run and jumped").
    pub auxiliaries: Option<Vec<String>>,
    /// The assembled numeral a quantifier modifier should combine with.
    pub numeral: Option<String>,
    /// Suppress the child's own standalone emission; the parent folds the
    /// child's contribution into its own proposition instead.
    pub suppress_emission: bool,
}

impl Context {
    pub fn with_class(mut self, class: PhraseClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_subject(mut self, subject: SubjectInfo) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_auxiliaries(mut self, auxiliaries: Vec<String>) -> Self {
        self.auxiliaries = Some(auxiliaries);
        self
    }

    pub fn with_numeral(mut self, numeral: impl Into<String>) -> Self {
        self.numeral = Some(numeral.into());
        self
    }

    pub fn suppressed(mut self) -> Self {
        self.suppress_emission = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        let ctx = Context::default()
            .with_class(PhraseClass::VerbPhrase)
            .with_subject(SubjectInfo::single("the cat"))
            .with_auxiliaries(vec!["has".to_string()])
            .suppressed();

        assert_eq!(ctx.class, Some(PhraseClass::VerbPhrase));
        assert_eq!(ctx.subject.as_ref().map(|s| s.first()), Some("the cat"));
        assert_eq!(ctx.auxiliaries.as_deref(), Some(&["has".to_string()][..]));
        assert!(ctx.suppress_emission);
    }

    #[test]
    fn unresolved_subject_reads_as_empty() {
        assert_eq!(SubjectInfo::default().first(), "");
        assert_eq!(SubjectInfo::single("she").first(), "she");
    }
}
