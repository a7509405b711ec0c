//! The dispatch engine: registry construction, the recursive walk, and the
//! proposition accumulator.
//!
//! The engine does not traverse the tree in any fixed order. It exposes one
//! primitive, [`Engine::dispatch`], and the rulesets compose it: each ruleset
//! decides which of its node's children to visit, in what order, and with
//! what context. Subtrees no ruleset asks for (punctuation artifacts, parts
//! already folded into a multiword node) are never visited, which is
//! expected and reported, not corrected.

use std::sync::Arc;

use indexmap::IndexMap;
use pidense_tree::{DependencyTree, NodeId, Transformation};

use crate::context::Context;
use crate::error::EngineError;
use crate::outcome::RuleOutcome;
use crate::proposition::{Component, PropId, PropKind, Proposition};
use crate::ruleset::Ruleset;

/// Hard ceiling on dispatch recursion. Dependency trees of real sentences
/// stay well under 50 levels; the guard exists to turn malformed or cyclic
/// input into a clean error instead of a stack overflow.
pub const MAX_DEPTH: usize = 128;

/// The ancestor path of a dispatch: node ids from (but excluding) the
/// synthetic root down to the immediate parent of the node being dispatched.
///
/// Rulesets extend the path with their own node before recursing into a
/// child, giving every ruleset access to its lineage (a determiner ruleset
/// reads its governing noun off the path; a possessive ruleset reads the
/// possessed referent).
#[derive(Debug, Clone, Default)]
pub struct Lineage(Vec<NodeId>);

impl Lineage {
    /// The empty path, used when dispatching the root's clause.
    pub fn root() -> Self {
        Lineage(Vec::new())
    }

    /// A new path with `node` appended; the receiver is untouched.
    pub fn descend(&self, node: NodeId) -> Lineage {
        let mut nodes = self.0.clone();
        nodes.push(node);
        Lineage(nodes)
    }

    /// The immediate parent of the node being dispatched.
    pub fn parent(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    /// The full path, outermost ancestor first.
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }
}

/// The label→ruleset table for one analysis run.
///
/// Built from the tree's actual (post-transformation) labels: for each label,
/// the first ruleset in the supplied priority list whose `applies` returns
/// true. First match wins; that is the contract, not an accident of
/// iteration order. A label no ruleset claims is recorded and logged, which
/// is not an error until a node carrying it is actually dispatched.
pub struct Registry {
    bindings: IndexMap<String, Option<Arc<dyn Ruleset>>>,
}

impl Registry {
    fn empty() -> Self {
        Registry {
            bindings: IndexMap::new(),
        }
    }

    /// Build the table from a tree's labels. Deterministic: labels are
    /// recorded in first-appearance order.
    pub fn build(rulesets: &[Arc<dyn Ruleset>], tree: &DependencyTree) -> Self {
        let mut bindings: IndexMap<String, Option<Arc<dyn Ruleset>>> = IndexMap::new();
        for id in tree.ids() {
            let label = &tree[id].label;
            if bindings.contains_key(label.as_str()) {
                continue;
            }
            let ruleset = rulesets.iter().find(|r| r.applies(label)).cloned();
            if ruleset.is_none() {
                tracing::warn!(label = %label, "unrecognized relation label");
            }
            bindings.insert(label.clone(), ruleset);
        }
        Registry { bindings }
    }

    /// The ruleset bound to a label, if the label is known and claimed.
    pub fn ruleset_for(&self, label: &str) -> Option<Arc<dyn Ruleset>> {
        self.bindings.get(label).and_then(|slot| slot.clone())
    }

    /// Every label seen at build time, in first-appearance order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Labels no ruleset claimed.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(|(_, slot)| slot.is_none())
            .map(|(label, _)| label.as_str())
    }
}

/// The result of one top-level analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Every emitted proposition, in emission order. `propositions[i]` has
    /// id `i + 1`.
    pub propositions: Vec<Proposition>,
    /// Nodes never dispatched, in positional order. Diagnostic, not fatal.
    pub unconsumed: Vec<NodeId>,
}

/// Runs the analysis: applies the transformations, builds the registry,
/// walks the tree by dispatching rulesets, and accumulates what they emit.
pub struct Engine {
    rulesets: Vec<Arc<dyn Ruleset>>,
    transformations: Vec<Box<dyn Transformation>>,
    registry: Registry,
    propositions: Vec<Proposition>,
    depth: usize,
}

impl Engine {
    /// An engine over the given ruleset priority list and transformation
    /// pipeline.
    pub fn new(
        rulesets: Vec<Arc<dyn Ruleset>>,
        transformations: Vec<Box<dyn Transformation>>,
    ) -> Self {
        Engine {
            rulesets,
            transformations,
            registry: Registry::empty(),
            propositions: Vec::new(),
            depth: 0,
        }
    }

    /// The full standard catalogue and pipeline.
    pub fn standard() -> Self {
        Engine::new(
            crate::ruleset::standard_rulesets(),
            pidense_tree::transform::pipeline(),
        )
    }

    /// Analyze one sentence.
    ///
    /// Runs the transformation pipeline once, resets all per-run state (the
    /// accumulator, the consumed flags, the registry), then dispatches the
    /// synthetic root. Errors abort the run wholesale; no partial
    /// proposition list is returned, and the next call starts clean.
    pub fn analyze(&mut self, tree: &mut DependencyTree) -> Result<Analysis, EngineError> {
        // Reset before anything can fail, so a failed run can never leak
        // state into the next one.
        self.propositions.clear();
        self.depth = 0;

        for pass in &self.transformations {
            pass.apply(tree)?;
        }
        tracing::debug!(nodes = tree.len(), "tree after transformations");

        tree.clear_consumed();
        self.registry = Registry::build(&self.rulesets, tree);

        let root = tree.root();
        self.dispatch(tree, root, &Lineage::root(), &Context::default())?;

        Ok(Analysis {
            propositions: std::mem::take(&mut self.propositions),
            unconsumed: tree.unconsumed(),
        })
    }

    /// Dispatch one node: look up the ruleset for its label, invoke it, and
    /// mark the node consumed once it returns. The ruleset's outcome is
    /// passed back verbatim, typically to a parent ruleset mid-recursion.
    ///
    /// This is the primitive rulesets recurse through; it performs no
    /// traversal of its own.
    pub fn dispatch(
        &mut self,
        tree: &mut DependencyTree,
        node: NodeId,
        lineage: &Lineage,
        ctx: &Context,
    ) -> Result<RuleOutcome, EngineError> {
        if self.depth >= MAX_DEPTH {
            return Err(EngineError::DepthLimit);
        }

        let label = tree[node].label.clone();
        let ruleset = self
            .registry
            .ruleset_for(&label)
            .ok_or_else(|| EngineError::UnhandledLabel {
                label: label.clone(),
            })?;

        tracing::debug!(label = %label, node = %node, caller = ?lineage.parent(), "dispatching");

        self.depth += 1;
        let result = ruleset.extract(tree, node, lineage, self, ctx);
        self.depth -= 1;

        let outcome = result?;
        tree[node].consumed = true;
        Ok(outcome)
    }

    /// Emit a proposition into the current run's buffer and return its
    /// 1-based id, usable by later emissions as a back-reference.
    pub fn emit(
        &mut self,
        content: impl IntoIterator<Item = Component>,
        kind: PropKind,
    ) -> PropId {
        self.propositions
            .push(Proposition::new(content.into_iter().collect(), kind));
        PropId(self.propositions.len())
    }

    /// Mark a node consumed without dispatching it. Used by rulesets that
    /// fold a child's content into their own emission (the of-phrase and
    /// dummy-subject special cases).
    pub fn mark_consumed(tree: &mut DependencyTree, node: NodeId) {
        tree[node].consumed = true;
    }

    /// The registry of the current (or most recent) run.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
