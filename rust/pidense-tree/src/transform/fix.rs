//! Passes that fix systematically misparsed attachments and labels.

use crate::error::TreeError;
use crate::transform::Transformation;
use crate::tree::DependencyTree;

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Handles adjective repetition as intensifier ("a long long time"): the
/// first adjective becomes an adverb attached to the second.
pub struct FixAdjectiveRepetition;

impl Transformation for FixAdjectiveRepetition {
    fn name(&self) -> &'static str {
        "fix-adjective-repetition"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].fine_tag == "JJ"
                && tree[next].fine_tag == "JJ"
                && tree[id].surface() == tree[next].surface()
                && tree[id].head == tree[next].head
                && tree[id].label == tree[next].label
            {
                tree[id].fine_tag = "RB".to_string();
                tree[id].head = Some(next);
                tree[id].label = "advmod".to_string();
            }
        }
        Ok(())
    }
}

/// Handles adverb repetition as intensifier ("very very sick"): the first
/// adverb is re-pointed at the second instead of the following word.
pub struct FixAdverbRepetition;

impl Transformation for FixAdverbRepetition {
    fn name(&self) -> &'static str {
        "fix-adverb-repetition"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].fine_tag == "RB"
                && tree[next].fine_tag == "RB"
                && tree[id].surface() == tree[next].surface()
                && tree[id].label == tree[next].label
                && tree[id].head != Some(next)
            {
                tree[id].head = Some(next);
            }
        }
        Ok(())
    }
}

/// Connects a reflexive pronoun following a noun to that noun as an
/// adjectival modifier ("the author himself").
pub struct FixReflexivePronouns;

const REFLEXIVE_PRONOUNS: [&str; 8] = [
    "myself",
    "yourself",
    "himself",
    "herself",
    "itself",
    "ourselves",
    "yourselves",
    "themselves",
];

impl Transformation for FixReflexivePronouns {
    fn name(&self) -> &'static str {
        "fix-reflexive-pronouns"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for id in tree.ids().collect::<Vec<_>>() {
            if tree[id].fine_tag != "PRP" || !REFLEXIVE_PRONOUNS.contains(&tree[id].surface()) {
                continue;
            }
            let Some(previous) = tree.previous_of(id) else { continue };
            if matches!(
                tree[previous].fine_tag.as_str(),
                "NN" | "NNS" | "NNP" | "NNPS"
            ) {
                tree[id].head = Some(previous);
                tree[id].label = "amod".to_string();
            }
        }
        Ok(())
    }
}

/// Turns nominal or adjectival `xcomp` nodes with no copula into `what`
/// dependents ("she considered him a friend"), re-pointing the embedded
/// subject as the matrix verb's direct object.
pub struct FixXcompAttributions;

impl Transformation for FixXcompAttributions {
    fn name(&self) -> &'static str {
        "fix-xcomp-attributions"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for id in tree.ids().collect::<Vec<_>>() {
            if tree[id].label != "xcomp"
                || !matches!(
                    tree[id].fine_tag.as_str(),
                    "NN" | "NNS" | "NNP" | "NNPS" | "JJ"
                )
                || !tree.children_with_label(id, "cop").is_empty()
            {
                continue;
            }

            let subjects = tree.children_with_label(id, "nsubj");
            tree[id].label = "what".to_string();

            if let (Some(&subject), Some(head)) = (subjects.first(), tree[id].head) {
                tree[subject].head = Some(head);
                tree[subject].label = "dobj".to_string();
            }
        }
        Ok(())
    }
}

/// Relabels `nn` compounds between capitalized words as `nn-join`, so they
/// are folded into the governing name instead of emitting modifications
/// ("New York" stays one referent).
pub struct MarkNameCompounds;

impl Transformation for MarkNameCompounds {
    fn name(&self) -> &'static str {
        "mark-name-compounds"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for id in tree.ids().collect::<Vec<_>>() {
            if tree[id].label != "nn" {
                continue;
            }
            let Some(head) = tree[id].head else { continue };
            if starts_uppercase(tree[id].surface()) && starts_uppercase(tree[head].surface()) {
                tree[id].label = "nn-join".to_string();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::RawRelation;

    #[test]
    fn repeated_adjective_becomes_adverb() {
        // "a long long time"
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 4, "det", "a").tagged("DT", "DET"),
            RawRelation::new(2, 4, "amod", "long").tagged("JJ", "ADJ"),
            RawRelation::new(3, 4, "amod", "long").tagged("JJ", "ADJ"),
            RawRelation::new(4, 0, "root", "time").tagged("NN", "NOUN"),
        ])
        .unwrap();
        let first = tree.node_at(2).unwrap();
        let second = tree.node_at(3).unwrap();

        FixAdjectiveRepetition.apply(&mut tree).unwrap();

        assert_eq!(tree[first].label, "advmod");
        assert_eq!(tree[first].fine_tag, "RB");
        assert_eq!(tree[first].head, Some(second));
        assert_eq!(tree[second].label, "amod");
    }

    #[test]
    fn reflexive_after_noun_reattaches() {
        // "the author himself wrote"
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 2, "det", "the").tagged("DT", "DET"),
            RawRelation::new(2, 4, "nsubj", "author").tagged("NN", "NOUN"),
            RawRelation::new(3, 4, "dobj", "himself").tagged("PRP", "PRON"),
            RawRelation::new(4, 0, "root", "wrote").tagged("VBD", "VERB"),
        ])
        .unwrap();
        let himself = tree.node_at(3).unwrap();
        let author = tree.node_at(2).unwrap();

        FixReflexivePronouns.apply(&mut tree).unwrap();

        assert_eq!(tree[himself].head, Some(author));
        assert_eq!(tree[himself].label, "amod");
    }

    #[test]
    fn copless_nominal_xcomp_becomes_what() {
        // "she considered him a friend" :
        // considered.root; friend.xcomp -> considered; him.nsubj -> friend
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 2, "nsubj", "she").tagged("PRP", "PRON"),
            RawRelation::new(2, 0, "root", "considered").tagged("VBD", "VERB"),
            RawRelation::new(3, 5, "nsubj", "him").tagged("PRP", "PRON"),
            RawRelation::new(4, 5, "det", "a").tagged("DT", "DET"),
            RawRelation::new(5, 2, "xcomp", "friend").tagged("NN", "NOUN"),
        ])
        .unwrap();
        let considered = tree.node_at(2).unwrap();
        let him = tree.node_at(3).unwrap();
        let friend = tree.node_at(5).unwrap();

        FixXcompAttributions.apply(&mut tree).unwrap();

        assert_eq!(tree[friend].label, "what");
        assert_eq!(tree[him].head, Some(considered));
        assert_eq!(tree[him].label, "dobj");
    }

    #[test]
    fn capitalized_nn_becomes_nn_join() {
        // "West Germany grew"
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 2, "nn", "West").tagged("NNP", "NOUN"),
            RawRelation::new(2, 3, "nsubj", "Germany").tagged("NNP", "NOUN"),
            RawRelation::new(3, 0, "root", "grew").tagged("VBD", "VERB"),
        ])
        .unwrap();

        MarkNameCompounds.apply(&mut tree).unwrap();

        assert_eq!(tree[tree.node_at(1).unwrap()].label, "nn-join");
    }

    #[test]
    fn lowercase_nn_is_untouched() {
        // "oil prices rose"
        let mut tree = DependencyTree::from_relations(vec![
            RawRelation::top(),
            RawRelation::new(1, 2, "nn", "oil").tagged("NN", "NOUN"),
            RawRelation::new(2, 3, "nsubj", "prices").tagged("NNS", "NOUN"),
            RawRelation::new(3, 0, "root", "rose").tagged("VBD", "VERB"),
        ])
        .unwrap();

        MarkNameCompounds.apply(&mut tree).unwrap();

        assert_eq!(tree[tree.node_at(1).unwrap()].label, "nn");
    }
}
