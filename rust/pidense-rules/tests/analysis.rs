//! End-to-end analysis scenarios: whole sentences in, ordered proposition
//! lists and coverage reports out.

use std::sync::Arc;

use pidense_rules::rules::misc::TopRuleset;
use pidense_rules::{
    Analysis, Context, DependencyTree, Engine, EngineError, Lineage, RawRelation, RuleOutcome,
    Ruleset,
};
use pidense_tree::NodeId;
use pretty_assertions::assert_eq;

fn analyze(relations: Vec<RawRelation>) -> Analysis {
    let mut tree = DependencyTree::from_relations(relations).expect("well-formed tree");
    Engine::standard()
        .analyze(&mut tree)
        .expect("analysis succeeds")
}

fn rendered(analysis: &Analysis) -> Vec<String> {
    analysis
        .propositions
        .iter()
        .map(|prop| prop.to_string())
        .collect()
}

#[test_log::test]
fn simple_transitive_clause() {
    // "the cat ran"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "det", "the").tagged("DT", "DET"),
        RawRelation::new(2, 3, "nsubj", "cat").tagged("NN", "NOUN"),
        RawRelation::new(3, 0, "root", "ran").tagged("VBD", "VERB"),
    ]);

    assert_eq!(rendered(&analysis), vec!["ran, the cat [P]"]);
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn non_integrated_determiner_emits_modification() {
    // "some apples fell": "some" is not in the integrated set, so it emits
    // its own modification and stays out of the phrase text.
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "det", "some").tagged("DT", "DET"),
        RawRelation::new(2, 3, "nsubj", "apples").tagged("NNS", "NOUN"),
        RawRelation::new(3, 0, "root", "fell").tagged("VBD", "VERB"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec!["apples, some [M]", "fell, apples [P]"]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn coordinated_subject_connects_predications() {
    // "Mary and John ran": one predication per conjunct, then a connection
    // referencing both by id.
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 4, "nsubj", "Mary").tagged("NNP", "NOUN"),
        RawRelation::new(2, 1, "cc", "and").tagged("CC", "CONJ"),
        RawRelation::new(3, 1, "conj", "John").tagged("NNP", "NOUN"),
        RawRelation::new(4, 0, "root", "ran").tagged("VBD", "VERB"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec!["ran, Mary [P]", "ran, John [P]", "and, #1, #2 [C]"]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn conjunct_without_connector_is_reported_unconsumed() {
    // A conj dependent with no cc sibling is never dispatched; it lands in
    // the coverage report instead of being silently corrected.
    let mut tree = DependencyTree::from_relations(vec![
        RawRelation::top(),
        RawRelation::new(1, 3, "nsubj", "Mary").tagged("NNP", "NOUN"),
        RawRelation::new(2, 1, "conj", "John").tagged("NNP", "NOUN"),
        RawRelation::new(3, 0, "root", "ran").tagged("VBD", "VERB"),
    ])
    .unwrap();
    let john = tree.node_at(2).unwrap();

    let analysis = Engine::standard().analyze(&mut tree).unwrap();

    assert_eq!(rendered(&analysis), vec!["ran, Mary [P]"]);
    assert_eq!(analysis.unconsumed, vec![john]);
    // Consumed and unconsumed partition the tree.
    assert!(tree.ids().all(|id| tree[id].consumed != analysis.unconsumed.contains(&id)));
}

#[test_log::test]
fn direct_object_joins_the_predication() {
    // "I saw Mary"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "I").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "saw").tagged("VBD", "VERB"),
        RawRelation::new(3, 2, "dobj", "Mary").tagged("NNP", "NOUN"),
    ]);

    assert_eq!(rendered(&analysis), vec!["saw, I, Mary [P]"]);
}

#[test_log::test]
fn coordinated_object_multiplies_predications() {
    // "I saw Mary and John"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "I").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "saw").tagged("VBD", "VERB"),
        RawRelation::new(3, 2, "dobj", "Mary").tagged("NNP", "NOUN"),
        RawRelation::new(4, 3, "cc", "and").tagged("CC", "CONJ"),
        RawRelation::new(5, 3, "conj", "John").tagged("NNP", "NOUN"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec!["saw, I, Mary [P]", "saw, I, John [P]"]
    );
}

#[test_log::test]
fn pronominal_possessive_stays_inline() {
    // "my friend ran"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "poss", "my").tagged("PRP$", "PRON"),
        RawRelation::new(2, 3, "nsubj", "friend").tagged("NN", "NOUN"),
        RawRelation::new(3, 0, "root", "ran").tagged("VBD", "VERB"),
    ]);

    assert_eq!(rendered(&analysis), vec!["ran, my friend [P]"]);
}

#[test_log::test]
fn nominal_possessive_emits_modification() {
    // "John's friend ran"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 3, "poss", "John").tagged("NNP", "NOUN"),
        RawRelation::new(2, 1, "possessive", "'s").tagged("POS", "PRT"),
        RawRelation::new(3, 4, "nsubj", "friend").tagged("NN", "NOUN"),
        RawRelation::new(4, 0, "root", "ran").tagged("VBD", "VERB"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec!["friend, John's [M]", "ran, friend [P]"]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn prepositional_phrase_emits_its_own_proposition() {
    // "she ran in the park"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "ran").tagged("VBD", "VERB"),
        RawRelation::new(3, 2, "prep", "in").tagged("IN", "ADP"),
        RawRelation::new(4, 5, "det", "the").tagged("DT", "DET"),
        RawRelation::new(5, 3, "pobj", "park").tagged("NN", "NOUN"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec!["in the park [PREP]", "ran, she [P]"]
    );
}

#[test_log::test]
fn preconjunction_ties_coordinated_prepositional_objects() {
    // "she ran to both East and West Germany": one proposition per
    // conjunct, then the preconjunction ties them together by id.
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "ran").tagged("VBD", "VERB"),
        RawRelation::new(3, 2, "prep", "to").tagged("IN", "ADP"),
        RawRelation::new(4, 8, "preconj", "both").tagged("DT", "DET"),
        RawRelation::new(5, 8, "nn", "East").tagged("NNP", "NOUN"),
        RawRelation::new(6, 5, "cc", "and").tagged("CC", "CONJ"),
        RawRelation::new(7, 5, "conj", "West").tagged("NNP", "NOUN"),
        RawRelation::new(8, 3, "pobj", "Germany").tagged("NNP", "NOUN"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec![
            "to East Germany [PREP]",
            "to West Germany [PREP]",
            "both, #1, #2 [C]",
            "ran, she [P]",
        ]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn copula_with_noun_complement() {
    // "John is my friend"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 4, "nsubj", "John").tagged("NNP", "NOUN"),
        RawRelation::new(2, 4, "cop", "is").tagged("VBZ", "VERB"),
        RawRelation::new(3, 4, "poss", "my").tagged("PRP$", "PRON"),
        RawRelation::new(4, 0, "root", "friend").tagged("NN", "NOUN"),
    ]);

    assert_eq!(rendered(&analysis), vec!["is, John, my friend [P]"]);
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn copula_missing_cop_child_is_a_typed_error() {
    let mut tree = DependencyTree::from_relations(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "John").tagged("NNP", "NOUN"),
        RawRelation::new(2, 0, "root", "friend").tagged("NN", "NOUN"),
    ])
    .unwrap();

    let result = Engine::standard().analyze(&mut tree);
    assert!(matches!(
        result,
        Err(EngineError::MissingChild { label: "cop", .. })
    ));
}

#[test_log::test]
fn copula_with_adjective_complement() {
    // "the cat is very black"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "det", "the").tagged("DT", "DET"),
        RawRelation::new(2, 5, "nsubj", "cat").tagged("NN", "NOUN"),
        RawRelation::new(3, 5, "cop", "is").tagged("VBZ", "VERB"),
        RawRelation::new(4, 5, "advmod", "very").tagged("RB", "ADV"),
        RawRelation::new(5, 0, "root", "black").tagged("JJ", "ADJ"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec!["black, very [M]", "is, the cat, black [P]"]
    );
}

#[test_log::test]
fn dummy_it_subject_folds_prepositional_material() {
    // "it was in Paris": "it" is semantically empty, so the prepositional
    // phrase joins the predication instead of emitting on its own.
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "it").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "was").tagged("VBD", "VERB"),
        RawRelation::new(3, 2, "prep", "in").tagged("IN", "ADP"),
        RawRelation::new(4, 3, "pobj", "Paris").tagged("NNP", "NOUN"),
    ]);

    assert_eq!(rendered(&analysis), vec!["was, it, in Paris [P]"]);
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn adverbial_clause_connects_through_its_marker() {
    // "she left because he arrived"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "left").tagged("VBD", "VERB"),
        RawRelation::new(3, 5, "mark", "because").tagged("IN", "ADP"),
        RawRelation::new(4, 5, "nsubj", "he").tagged("PRP", "PRON"),
        RawRelation::new(5, 2, "advcl", "arrived").tagged("VBD", "VERB"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec![
            "left, she [P]",
            "arrived, he [P]",
            "because, #1, #2 [C]",
        ]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn relative_clause_resolves_its_pronoun_and_connects() {
    // "the man who ran smiled"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "det", "the").tagged("DT", "DET"),
        RawRelation::new(2, 5, "nsubj", "man").tagged("NN", "NOUN"),
        RawRelation::new(3, 4, "nsubj", "who").tagged("WP", "PRON"),
        RawRelation::new(4, 2, "rcmod", "ran").tagged("VBD", "VERB"),
        RawRelation::new(5, 0, "root", "smiled").tagged("VBD", "VERB"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec![
            "ran, who(=the man) [P]",
            "smiled, the man [P]",
            "who(=the man), #2, #1 [C]",
        ]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn quantifier_binds_to_its_numeral() {
    // "About 200 people died"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "quantmod", "About").tagged("RB", "ADV"),
        RawRelation::new(2, 3, "num", "200").tagged("CD", "NUM"),
        RawRelation::new(3, 4, "nsubj", "people").tagged("NNS", "NOUN"),
        RawRelation::new(4, 0, "root", "died").tagged("VBD", "VERB"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec![
            "200, About [M]",
            "people, 200 [M]",
            "died, people [P]",
        ]
    );
}

#[test_log::test]
fn gerund_complement_embeds_in_the_parent_predication() {
    // "she likes running"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "likes").tagged("VBZ", "VERB"),
        RawRelation::new(3, 2, "xcomp", "running").tagged("VBG", "VERB"),
    ]);

    assert_eq!(rendered(&analysis), vec!["likes, she, running [P]"]);
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn negation_emits_and_auxiliary_joins_the_verb() {
    // "she did not run"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 4, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 4, "aux", "did").tagged("VBD", "VERB"),
        RawRelation::new(3, 4, "neg", "not").tagged("RB", "ADV"),
        RawRelation::new(4, 0, "root", "run").tagged("VB", "VERB"),
    ]);

    assert_eq!(rendered(&analysis), vec!["not [M]", "did run, she [P]"]);
}

#[test_log::test]
fn multiword_negation_survives_the_pipeline() {
    // "she no longer runs": the transformation pipeline folds "no" into
    // "longer" and relabels the result as a negation.
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 4, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 3, "neg", "no").tagged("DT", "DET"),
        RawRelation::new(3, 4, "advmod", "longer").tagged("RB", "ADV"),
        RawRelation::new(4, 0, "root", "runs").tagged("VBZ", "VERB"),
    ]);

    assert_eq!(rendered(&analysis), vec!["no longer [M]", "runs, she [P]"]);
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn attributed_complement_goes_through_the_what_relabel() {
    // "she considered him a friend": the pipeline turns the copless
    // nominal xcomp into a 'what' dependent and promotes its subject to
    // direct object of the matrix verb.
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "considered").tagged("VBD", "VERB"),
        RawRelation::new(3, 5, "nsubj", "him").tagged("PRP", "PRON"),
        RawRelation::new(4, 5, "det", "a").tagged("DT", "DET"),
        RawRelation::new(5, 2, "xcomp", "friend").tagged("NN", "NOUN"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec!["a friend [WHAT]", "considered, she, him [P]"]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn verb_coordination_borrows_subject_and_connects() {
    // "she ran and jumped"
    let analysis = analyze(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "ran").tagged("VBD", "VERB"),
        RawRelation::new(3, 2, "cc", "and").tagged("CC", "CONJ"),
        RawRelation::new(4, 2, "conj", "jumped").tagged("VBD", "VERB"),
    ]);

    assert_eq!(
        rendered(&analysis),
        vec![
            "ran, she [P]",
            "jumped, (she) [P]",
            "and, #1, #2 [C]",
        ]
    );
    assert_eq!(analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn runs_are_isolated() {
    let mut engine = Engine::standard();

    let mut first = DependencyTree::from_relations(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "ran").tagged("VBD", "VERB"),
    ])
    .unwrap();
    let first_analysis = engine.analyze(&mut first).unwrap();
    assert_eq!(rendered(&first_analysis), vec!["ran, she [P]"]);

    let mut second = DependencyTree::from_relations(vec![
        RawRelation::top(),
        RawRelation::new(1, 2, "nsubj", "he").tagged("PRP", "PRON"),
        RawRelation::new(2, 0, "root", "slept").tagged("VBD", "VERB"),
    ])
    .unwrap();
    let second_analysis = engine.analyze(&mut second).unwrap();

    // Nothing from the first run leaks: ids restart at 1, propositions and
    // coverage reflect only the second tree.
    assert_eq!(rendered(&second_analysis), vec!["slept, he [P]"]);
    assert_eq!(second_analysis.unconsumed, Vec::<NodeId>::new());
}

#[test_log::test]
fn analysis_is_deterministic() {
    let build = || {
        vec![
            RawRelation::top(),
            RawRelation::new(1, 4, "nsubj", "Mary").tagged("NNP", "NOUN"),
            RawRelation::new(2, 1, "cc", "and").tagged("CC", "CONJ"),
            RawRelation::new(3, 1, "conj", "John").tagged("NNP", "NOUN"),
            RawRelation::new(4, 0, "root", "ran").tagged("VBD", "VERB"),
            RawRelation::new(5, 4, "punct", ".").tagged(".", "."),
        ]
    };

    let first = analyze(build());
    let second = analyze(build());

    assert_eq!(first.propositions, second.propositions);
    assert_eq!(first.unconsumed, second.unconsumed);
}

#[test_log::test]
fn dispatching_an_unknown_label_aborts_the_run() {
    let mut tree = DependencyTree::from_relations(vec![
        RawRelation::top(),
        RawRelation::new(1, 0, "frobnicate", "ran").tagged("VBD", "VERB"),
    ])
    .unwrap();

    let result = Engine::standard().analyze(&mut tree);
    assert!(matches!(
        result,
        Err(EngineError::UnhandledLabel { label }) if label == "frobnicate"
    ));
}

/// A ruleset that re-dispatches its own node forever.
struct LoopRuleset;

impl Ruleset for LoopRuleset {
    fn label(&self) -> &'static str {
        "root"
    }

    fn extract(
        &self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        engine: &mut Engine,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        engine.dispatch(tree, node, lineage, ctx)
    }
}

#[test_log::test]
fn runaway_recursion_hits_the_depth_guard() {
    let mut tree = DependencyTree::from_relations(vec![
        RawRelation::top(),
        RawRelation::new(1, 0, "root", "ran").tagged("VBD", "VERB"),
    ])
    .unwrap();

    let rulesets: Vec<Arc<dyn Ruleset>> = vec![Arc::new(TopRuleset), Arc::new(LoopRuleset)];
    let mut engine = Engine::new(rulesets, Vec::new());

    let result = engine.analyze(&mut tree);
    assert!(matches!(result, Err(EngineError::DepthLimit)));
}
