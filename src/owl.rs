//! A concrete OWL-flavoured instantiation of the data model.
//!
//! Entities are typed IRIs, axioms are a small functional-syntax AST with
//! annotations, and sentences are token lists. These are what the CLI loads
//! from JSON and what the integration tests and benches drive the indices
//! with; a host application is free to bring its own types instead.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::morph::WordClass;
use crate::model::{Axiom, LexicalEntity, Sentence, Showing};

pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const ACE_NS: &str = "http://attempto.ifi.uzh.ch/ace#";

const BUILTIN_NAMESPACES: [&str; 4] = [
    OWL_NS,
    "http://www.w3.org/2001/XMLSchema#",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    "http://www.w3.org/2000/01/rdf-schema#",
];

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    ObjectProperty,
    DataProperty,
    NamedIndividual,
    Datatype,
    AnnotationProperty,
}

/// A typed IRI. Ordered by kind first, then IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwlEntity {
    pub kind: EntityKind,
    pub iri: String,
}

impl OwlEntity {
    pub fn new(kind: EntityKind, iri: impl Into<String>) -> Self {
        Self {
            kind,
            iri: iri.into(),
        }
    }

    pub fn class(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::Class, iri)
    }

    pub fn object_property(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::ObjectProperty, iri)
    }

    pub fn data_property(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::DataProperty, iri)
    }

    pub fn individual(iri: impl Into<String>) -> Self {
        Self::new(EntityKind::NamedIndividual, iri)
    }

    /// `owl:Thing`.
    pub fn thing() -> Self {
        Self::class(format!("{OWL_NS}Thing"))
    }

    /// `owl:Nothing`.
    pub fn nothing() -> Self {
        Self::class(format!("{OWL_NS}Nothing"))
    }

    pub fn is_builtin(&self) -> bool {
        BUILTIN_NAMESPACES.iter().any(|ns| self.iri.starts_with(ns))
    }

    pub fn is_nothing(&self) -> bool {
        self.kind == EntityKind::Class && self.iri == format!("{OWL_NS}Nothing")
    }

    /// The part of the IRI after the last `#` or `/`.
    pub fn fragment(&self) -> &str {
        self.iri
            .rsplit(['#', '/'])
            .next()
            .unwrap_or(self.iri.as_str())
    }
}

impl fmt::Display for OwlEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fragment())
    }
}

impl LexicalEntity for OwlEntity {
    fn word_class(&self) -> Option<WordClass> {
        match self.kind {
            EntityKind::Class => Some(WordClass::CommonNoun),
            EntityKind::ObjectProperty | EntityKind::DataProperty => Some(WordClass::TransitiveVerb),
            EntityKind::NamedIndividual => Some(WordClass::ProperName),
            EntityKind::Datatype | EntityKind::AnnotationProperty => None,
        }
    }

    fn lemma(&self) -> String {
        self.iri.clone()
    }
}

/// Hides built-ins, datatypes, annotation properties and the ACE helper
/// vocabulary from the entity index.
#[derive(Debug, Clone)]
pub struct OwlShowing {
    hidden: BTreeSet<String>,
}

impl OwlShowing {
    pub fn new(hidden: impl IntoIterator<Item = String>) -> Self {
        Self {
            hidden: hidden.into_iter().collect(),
        }
    }

    /// The ACE helper entities that never appear as content words.
    pub fn ace_helpers() -> Vec<String> {
        ["contain", "know", "Universe", "Superman"]
            .iter()
            .map(|name| format!("{ACE_NS}{name}"))
            .collect()
    }
}

impl Default for OwlShowing {
    fn default() -> Self {
        Self::new(Self::ace_helpers())
    }
}

impl Showing<OwlEntity> for OwlShowing {
    fn is_showable(&self, entity: &OwlEntity) -> bool {
        if entity.is_builtin() || self.hidden.contains(&entity.iri) {
            return false;
        }
        !matches!(entity.kind, EntityKind::Datatype | EntityKind::AnnotationProperty)
    }
}

// ---------------------------------------------------------------------------
// Axioms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxiomKind {
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    ClassAssertion,
    ObjectPropertyAssertion,
    DataPropertyAssertion,
    SubObjectPropertyOf,
    /// A SWRL rule over the listed entities.
    Rule,
}

/// A logical axiom over named entities, with annotations.
///
/// Equality includes annotations; [`Axiom::canonical`] strips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalAxiom {
    pub kind: AxiomKind,
    pub terms: Vec<OwlEntity>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl LogicalAxiom {
    pub fn new(kind: AxiomKind, terms: Vec<OwlEntity>) -> Self {
        Self {
            kind,
            terms,
            annotations: BTreeMap::new(),
        }
    }

    pub fn sub_class_of(sub: OwlEntity, sup: OwlEntity) -> Self {
        Self::new(AxiomKind::SubClassOf, vec![sub, sup])
    }

    pub fn class_assertion(class: OwlEntity, individual: OwlEntity) -> Self {
        Self::new(AxiomKind::ClassAssertion, vec![class, individual])
    }

    pub fn object_property_assertion(property: OwlEntity, subject: OwlEntity, object: OwlEntity) -> Self {
        Self::new(AxiomKind::ObjectPropertyAssertion, vec![property, subject, object])
    }

    pub fn rule(terms: Vec<OwlEntity>) -> Self {
        Self::new(AxiomKind::Rule, terms)
    }

    pub fn with_annotation(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(property.into(), value.into());
        self
    }
}

impl Axiom for LogicalAxiom {
    type Entity = OwlEntity;

    fn signature(&self) -> BTreeSet<OwlEntity> {
        self.terms.iter().cloned().collect()
    }

    fn canonical(&self) -> Self {
        Self::new(self.kind, self.terms.clone())
    }

    fn is_rule(&self) -> bool {
        self.kind == AxiomKind::Rule
    }

    fn is_contradiction(&self) -> bool {
        match self.kind {
            AxiomKind::SubClassOf => self.terms.get(1).is_some_and(OwlEntity::is_nothing),
            AxiomKind::EquivalentClasses => self.terms.iter().any(OwlEntity::is_nothing),
            _ => false,
        }
    }
}

impl fmt::Display for LogicalAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(", self.kind)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        f.write_str(")")
    }
}

// ---------------------------------------------------------------------------
// Sentences
// ---------------------------------------------------------------------------

/// Function words that never need a lexicon entry.
const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "every", "each", "all", "no", "nothing", "but", "not", "is", "are", "was",
    "be", "if", "then", "and", "or", "that", "which", "who", "whom", "whose", "what", "where",
    "there", "it", "false", "true", "of", "by", "s", "at", "less", "least", "most", "more",
    "than", "exactly", "thing", "things", "does", "do", "he", "she", "he/she", "someone",
    "something", "somebody", "everybody", "everything", "nobody", "himself", "herself",
    "itself", "themselves", "for", "to", "how", "many", "much", "some",
];

/// A tokenized sentence. Tokens are compared exactly; display attaches
/// punctuation to the preceding token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AceSentence {
    tokens: Vec<String>,
}

impl AceSentence {
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Split on whitespace, detaching sentence-level punctuation.
    pub fn from_text(text: &str) -> Self {
        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            let trimmed = word.trim_end_matches(['.', '?', '!', ',']);
            if !trimmed.is_empty() {
                tokens.push(trimmed.to_string());
            }
            tokens.extend(word[trimmed.len()..].chars().map(String::from));
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    fn is_punctuation(token: &str) -> bool {
        matches!(token, "." | "?" | "!" | ",")
    }

    fn is_content_word(token: &str) -> bool {
        if Self::is_punctuation(token) || token.starts_with('"') {
            return false;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        // Variables such as X or Y1.
        let mut chars = token.chars();
        if chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_digit())
        {
            return false;
        }
        let lower = token.to_lowercase();
        !FUNCTION_WORDS.contains(&lower.as_str())
    }
}

impl Sentence for AceSentence {
    fn is_question(&self) -> bool {
        self.tokens.last().is_some_and(|t| t == "?")
    }

    fn is_nothingbut(&self) -> bool {
        self.tokens
            .windows(2)
            .any(|w| w[0].eq_ignore_ascii_case("nothing") && w[1].eq_ignore_ascii_case("but"))
    }

    fn content_words(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| Self::is_content_word(t))
            .cloned()
            .collect()
    }
}

impl fmt::Display for AceSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 && !Self::is_punctuation(token) {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

impl From<String> for AceSentence {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl From<AceSentence> for String {
    fn from(sentence: AceSentence) -> Self {
        sentence.to_string()
    }
}
