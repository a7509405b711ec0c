//! Propositions: the atomic semantic units the engine emits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The 1-based position of a proposition in its run's emission order.
///
/// Ids are how later propositions refer to earlier ones: a connection
/// proposition for "Mary ran and John jumped" carries the conjunction word
/// plus the ids of the two predications, not their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropId(pub usize);

impl fmt::Display for PropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One slot of a proposition's content: a literal word (or joined phrase) or
/// a back-reference to a previously emitted proposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Word(String),
    Reference(PropId),
}

impl From<String> for Component {
    fn from(word: String) -> Self {
        Component::Word(word)
    }
}

impl From<&str> for Component {
    fn from(word: &str) -> Self {
        Component::Word(word.to_string())
    }
}

impl From<PropId> for Component {
    fn from(id: PropId) -> Self {
        Component::Reference(id)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Word(word) => write!(f, "{word}"),
            Component::Reference(id) => write!(f, "{id}"),
        }
    }
}

/// The kind of idea a proposition expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropKind {
    /// A predication: something said about a subject ("ran, the cat").
    Predication,
    /// A modification of a referent ("apples, some").
    Modification,
    /// A connection between other propositions ("and, #1, #2").
    Connection,
    /// A prepositional attachment ("in the park").
    Preposition,
    /// An attributed complement with no copula of its own
    /// ("she considered him a friend" yields "a friend").
    What,
}

impl PropKind {
    /// The conventional short tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            PropKind::Predication => "P",
            PropKind::Modification => "M",
            PropKind::Connection => "C",
            PropKind::Preposition => "PREP",
            PropKind::What => "WHAT",
        }
    }
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An emitted proposition. Immutable once emitted; identified by its 1-based
/// emission order within the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposition {
    pub content: Vec<Component>,
    pub kind: PropKind,
}

impl Proposition {
    pub fn new(content: Vec<Component>, kind: PropKind) -> Self {
        Proposition { content, kind }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.content.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{component}")?;
        }
        write!(f, " [{}]", self.kind)
    }
}
