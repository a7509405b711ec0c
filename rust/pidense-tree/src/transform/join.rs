//! Passes that merge multiword expressions into single nodes.

use crate::error::TreeError;
use crate::node::NodeId;
use crate::transform::Transformation;
use crate::tree::DependencyTree;

/// Relabels "no longer" so the multiword merge picks it up: "no" becomes an
/// `mwe` dependent and "longer" a negation. A sentence-final "no" is simply
/// not a match.
pub struct JoinNoLonger;

impl Transformation for JoinNoLonger {
    fn name(&self) -> &'static str {
        "join-no-longer"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].surface() == "no" && tree[next].surface() == "longer" {
                tree[id].label = "mwe".to_string();
                tree[next].label = "neg".to_string();
            }
        }
        Ok(())
    }
}

/// Relabels "because" before "of" as an `mwe` dependent.
pub struct JoinBecauseOf;

impl Transformation for JoinBecauseOf {
    fn name(&self) -> &'static str {
        "join-because-of"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].surface() == "because" && tree[next].surface() == "of" {
                tree[id].label = "mwe".to_string();
            }
        }
        Ok(())
    }
}

/// Merges "up to" into the "up" node.
pub struct JoinUpTo;

impl Transformation for JoinUpTo {
    fn name(&self) -> &'static str {
        "join-up-to"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        let mut doomed = Vec::new();
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].surface() == "up" && tree[next].surface() == "to" {
                tree[id].word = Some("up to".to_string());
                doomed.push(next);
            }
        }
        tree.remove(&doomed);
        Ok(())
    }
}

/// Merges "at all" into the "at" node, provided "all" has no dependents of
/// its own.
pub struct JoinAtAll;

impl Transformation for JoinAtAll {
    fn name(&self) -> &'static str {
        "join-at-all"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        let mut doomed = Vec::new();
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].surface() == "at"
                && tree[next].surface() == "all"
                && tree.children(next).is_empty()
            {
                tree[id].word = Some("at all".to_string());
                doomed.push(next);
            }
        }
        tree.remove(&doomed);
        Ok(())
    }
}

/// Merges every `mwe` dependent into its head's surface form, in surface
/// order, then removes the dependents. Runs after the passes that plant
/// `mwe` labels.
pub struct JoinMultiwordExpressions;

impl Transformation for JoinMultiwordExpressions {
    fn name(&self) -> &'static str {
        "join-multiword-expressions"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        // Group mwe dependents by head, in first-seen order.
        let mut groups: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
        for id in tree.ids() {
            if tree[id].label == "mwe" {
                let Some(head) = tree[id].head else { continue };
                match groups.iter_mut().find(|(h, _)| *h == head) {
                    Some((_, deps)) => deps.push(id),
                    None => groups.push((head, vec![id])),
                }
            }
        }

        for (head, deps) in groups {
            let mut members = deps.clone();
            members.push(head);
            members.sort_by_key(|&m| tree.address(m));
            let joined = members
                .iter()
                .map(|&m| tree[m].surface())
                .collect::<Vec<_>>()
                .join(" ");
            tracing::debug!(expression = %joined, "joining multiword expression");
            tree[head].word = Some(joined);
            tree.remove(&deps);
        }
        Ok(())
    }
}

/// Merges phrasal modal and aspectual markers ("have to", "ought to",
/// "used to") into the finite verb.
///
/// Precondition: when the trigger matches (a finite have/ought/use form
/// governing a bare-infinitive `xcomp`), the infinitive must carry a `TO`
/// auxiliary; a tree without one is rejected.
pub struct JoinPhrasalModifiers;

const PHRASAL_VERB_FORMS: [&str; 7] = ["have", "has", "had", "ought", "use", "uses", "used"];

impl Transformation for JoinPhrasalModifiers {
    fn name(&self) -> &'static str {
        "join-phrasal-modifiers"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        for id in tree.ids().collect::<Vec<_>>() {
            let Some(node) = tree.get(id) else { continue };
            if !(matches!(node.label.as_str(), "null" | "root" | "xcomp")
                && matches!(node.fine_tag.as_str(), "VBZ" | "VBD" | "VBP")
                && PHRASAL_VERB_FORMS.contains(&node.surface()))
            {
                continue;
            }

            let Some(&xcomp) = tree.children_with_label(id, "xcomp").first() else {
                return Ok(());
            };
            if tree[xcomp].fine_tag != "VB" {
                continue;
            }

            let to = tree
                .children_with_label(xcomp, "aux")
                .into_iter()
                .find(|&aux| tree[aux].fine_tag == "TO")
                .ok_or_else(|| TreeError::Precondition {
                    name: "join-phrasal-modifiers",
                    what: "a TO auxiliary under the infinitive".to_string(),
                })?;

            let merged = format!("{} to {}", tree[id].surface(), tree[xcomp].surface());
            tracing::debug!(verb = %merged, "joining phrasal modifier");
            tree[id].word = Some(merged);

            // Re-point the infinitive's remaining dependents before removal.
            for child in tree.children(xcomp) {
                if child != to {
                    tree[child].head = Some(id);
                }
            }
            tree.remove(&[to, xcomp]);
        }
        Ok(())
    }
}

/// Merges adjacent prepositions ("as of 2014") into the first one,
/// re-pointing the second's dependents.
pub struct JoinDoublePrepositions;

impl Transformation for JoinDoublePrepositions {
    fn name(&self) -> &'static str {
        "join-double-prepositions"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        let mut doomed = Vec::new();
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].fine_tag == "IN"
                && tree[next].fine_tag == "IN"
                && !doomed.contains(&id)
                && !doomed.contains(&next)
            {
                let merged = format!("{} {}", tree[id].surface(), tree[next].surface());
                tree[id].word = Some(merged);
                for child in tree.children(next) {
                    tree[child].head = Some(id);
                }
                doomed.push(next);
            }
        }
        tree.remove(&doomed);
        Ok(())
    }
}

/// Merges expletives ("there is", "there are") into the following word.
pub struct JoinExpletives;

impl Transformation for JoinExpletives {
    fn name(&self) -> &'static str {
        "join-expletives"
    }

    fn apply(&self, tree: &mut DependencyTree) -> Result<(), TreeError> {
        let mut doomed = Vec::new();
        for position in 0..tree.len() {
            let (Some(id), Some(next)) = (tree.node_at(position), tree.node_at(position + 1))
            else {
                continue;
            };
            if tree[id].fine_tag == "EX" {
                let merged = format!("{} {}", tree[id].surface(), tree[next].surface());
                tree[next].word = Some(merged);
                doomed.push(id);
            }
        }
        tree.remove(&doomed);
        Ok(())
    }
}
