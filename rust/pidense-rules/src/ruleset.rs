//! The ruleset capability and the standard catalogue.

use std::sync::Arc;

use pidense_tree::{DependencyTree, NodeId};

use crate::context::Context;
use crate::engine::{Engine, Lineage};
use crate::error::EngineError;
use crate::outcome::RuleOutcome;
use crate::rules::{adjectival, adverbial, atomic, emitting, misc, noun_phrase, verb_phrase};

/// A ruleset interprets nodes carrying one relation label.
///
/// Rulesets are stateless and shared: the registry binds every node of a
/// label to the same instance, and anything a ruleset needs to remember
/// between steps travels as explicit values through its call chain, never
/// through fields.
pub trait Ruleset: Send + Sync {
    /// The relation label this ruleset is responsible for.
    fn label(&self) -> &'static str;

    /// Whether this ruleset applies to a label. Equality with [`label`] by
    /// default; the registry takes the first ruleset in the priority list
    /// that applies.
    ///
    /// [`label`]: Ruleset::label
    fn applies(&self, label: &str) -> bool {
        label == self.label()
    }

    /// Decompose the node: recurse into chosen children through
    /// [`Engine::dispatch`], emit propositions through [`Engine::emit`], and
    /// return the shape this ruleset's family contracts to return.
    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError>;
}

/// The standard catalogue, in priority order. First match wins when more
/// than one ruleset would claim a label.
pub fn standard_rulesets() -> Vec<Arc<dyn Ruleset>> {
    vec![
        Arc::new(misc::TopRuleset),
        // Atomic rulesets.
        Arc::new(atomic::AtomicRuleset::new("prt")),
        Arc::new(atomic::AtomicRuleset::new("aux")),
        Arc::new(atomic::AtomicRuleset::new("auxpass")),
        Arc::new(atomic::AtomicRuleset::new("cc")),
        Arc::new(atomic::AtomicRuleset::new("cop")),
        Arc::new(atomic::AtomicRuleset::new("complm")),
        Arc::new(atomic::AtomicRuleset::new("possessive")),
        Arc::new(atomic::AtomicRuleset::new("number")),
        Arc::new(atomic::AtomicRuleset::new("preconj")),
        Arc::new(atomic::AtomicRuleset::new("mark")),
        // Atomic emitting rulesets.
        Arc::new(emitting::EmittingRuleset::new("neg")),
        Arc::new(emitting::EmittingRuleset::new("discourse")),
        // Noun-phrase rulesets.
        Arc::new(noun_phrase::NsubjRuleset),
        Arc::new(noun_phrase::NsubjpassRuleset),
        Arc::new(noun_phrase::DobjRuleset),
        Arc::new(noun_phrase::PobjRuleset),
        Arc::new(noun_phrase::IobjRuleset),
        Arc::new(noun_phrase::PossRuleset),
        Arc::new(noun_phrase::NpadvmodRuleset),
        Arc::new(noun_phrase::TmodRuleset),
        Arc::new(noun_phrase::ApposRuleset),
        // Verb-phrase rulesets.
        Arc::new(verb_phrase::VerbPhraseRuleset::new("root")),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("null")),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("xcomp")),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("ccomp")),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("pcomp")),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("csubj")),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("vmod")),
        Arc::new(verb_phrase::AdvclRuleset),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("rcmod")),
        Arc::new(verb_phrase::VerbPhraseRuleset::new("parataxis")),
        // Adjectival-phrase rulesets.
        Arc::new(adjectival::AcompRuleset),
        Arc::new(adjectival::AmodRuleset),
        // Adverbial-phrase rulesets.
        Arc::new(adverbial::AdvmodRuleset),
        // Uncategorized rulesets.
        Arc::new(misc::ConjRuleset),
        Arc::new(misc::NnRuleset),
        Arc::new(misc::NnJoinRuleset),
        Arc::new(misc::DetRuleset),
        Arc::new(misc::PrepRuleset),
        Arc::new(misc::QuantmodRuleset),
        Arc::new(misc::NumRuleset),
        Arc::new(misc::WhatRuleset),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_no_duplicate_labels() {
        let rulesets = standard_rulesets();
        let mut labels: Vec<_> = rulesets.iter().map(|r| r.label()).collect();
        let total = labels.len();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), total);
    }

    #[test]
    fn applies_defaults_to_label_equality() {
        let ruleset = atomic::AtomicRuleset::new("aux");
        assert!(ruleset.applies("aux"));
        assert!(!ruleset.applies("auxpass"));
    }
}
