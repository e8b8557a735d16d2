//! The opaque data model the indices are built over.
//!
//! Entities, axioms and sentences come from collaborators outside this crate
//! (an ontology store, an NL parser). The indices only need the handful of
//! capabilities declared here; [`crate::owl`] provides one concrete
//! instantiation.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use crate::lexicon::morph::WordClass;

/// Identifier of a class, property or individual.
///
/// Only equality, hashing and a total order (for deterministic iteration) are
/// required. Blanket-implemented for every type providing them.
pub trait Entity: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T: Clone + Eq + Hash + Ord + fmt::Debug> Entity for T {}

/// A logical statement.
pub trait Axiom: Clone + Eq + Hash + fmt::Debug {
    type Entity: Entity;

    /// The entities this axiom mentions.
    fn signature(&self) -> BTreeSet<Self::Entity>;

    /// The annotation-free form of this axiom. Index keys always use this form.
    fn canonical(&self) -> Self {
        self.clone()
    }

    /// Whether this axiom is a rule rather than a description-logic axiom.
    fn is_rule(&self) -> bool {
        false
    }

    /// Whether this axiom states something unsatisfiable, e.g. that a class
    /// is a subclass of the empty class.
    fn is_contradiction(&self) -> bool {
        false
    }
}

/// An immutable parsed sentence.
pub trait Sentence: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// Whether the sentence is interrogative.
    fn is_question(&self) -> bool;

    /// Whether the sentence uses the "nothing but" construction.
    fn is_nothingbut(&self) -> bool;

    /// Content-word tokens in order of appearance, duplicates included.
    fn content_words(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Decides whether an entity may appear in the entity index.
///
/// Trivial entities (top and bottom concepts, helper vocabulary) are excluded.
pub trait Showing<E> {
    fn is_showable(&self, entity: &E) -> bool;
}

impl<E, F> Showing<E> for F
where
    F: Fn(&E) -> bool,
{
    fn is_showable(&self, entity: &E) -> bool {
        self(entity)
    }
}

/// Shows every entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowAll;

impl<E> Showing<E> for ShowAll {
    fn is_showable(&self, _entity: &E) -> bool {
        true
    }
}

/// An entity that can carry word-forms in the lexicon.
pub trait LexicalEntity: Entity {
    /// The word class constraining which roles are legal, or `None` if the
    /// entity cannot be a content word at all.
    fn word_class(&self) -> Option<WordClass>;

    /// The lemma used when exporting the entity to a parser lexicon.
    fn lemma(&self) -> String;
}
