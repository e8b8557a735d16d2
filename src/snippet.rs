//! Snippets: sentences paired with the axioms they denote.
//!
//! A snippet is immutable once built. Its identity is its sentence sequence
//! alone: two snippets with the same sentences are the same snippet, whatever
//! axioms or metadata they carry. This is the uniqueness key of the
//! [`TextIndex`](crate::text::TextIndex).

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::model::{Axiom, Sentence};

/// Severity of a parser message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageLevel {
    Error,
    Warning,
}

/// A message the external parser attached to a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParserMessage {
    pub level: MessageLevel,
    /// Message category, e.g. `syntax`, `token`, or `owl` for errors raised
    /// while mapping a legal sentence to axioms.
    pub category: String,
    /// 1-based sentence position, if the message pinpoints one.
    pub sentence: Option<usize>,
    /// 1-based token position within the sentence.
    pub token: Option<usize>,
    /// The offending value.
    pub value: String,
    /// Suggested repair.
    pub repair: String,
}

impl ParserMessage {
    pub fn error(category: impl Into<String>, value: impl Into<String>, repair: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            category: category.into(),
            sentence: None,
            token: None,
            value: value.into(),
            repair: repair.into(),
        }
    }

    pub fn warning(category: impl Into<String>, value: impl Into<String>, repair: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            ..Self::error(category, value, repair)
        }
    }

    /// Pinpoint the message to a sentence and token (both 1-based).
    pub fn at(mut self, sentence: usize, token: usize) -> Self {
        self.sentence = Some(sentence);
        self.token = Some(token);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == MessageLevel::Error
    }
}

/// Display tags summarizing notable properties of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SnippetTag {
    /// Some sentence uses "nothing but".
    NothingBut,
    /// The snippet maps to neither OWL nor SWRL.
    NotOwlOrSwrl,
    /// The snippet contains a rule.
    Swrl,
    /// The snippet states something unsatisfiable.
    Weird,
}

impl fmt::Display for SnippetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetTag::NothingBut => write!(f, "/*nothing but*/"),
            SnippetTag::NotOwlOrSwrl => write!(f, "/*neither OWL nor SWRL*/"),
            SnippetTag::Swrl => write!(f, "/*SWRL*/"),
            SnippetTag::Weird => write!(f, "/*weird sentence*/"),
        }
    }
}

/// Sentences paired with the (possibly empty) set of axioms they denote.
#[derive(Debug, Clone)]
pub struct Snippet<S, A> {
    sentences: Vec<S>,
    axioms: Vec<A>,
    is_question: bool,
    namespace: String,
    alt_rendering: Option<String>,
    /// Seconds since UNIX epoch.
    timestamp: u64,
    messages: Vec<ParserMessage>,
}

impl<S: Sentence, A: Axiom> Snippet<S, A> {
    /// Build a snippet. Duplicate axioms are collapsed, keeping first occurrences.
    pub fn new(namespace: impl Into<String>, sentences: Vec<S>, axioms: impl IntoIterator<Item = A>) -> Self {
        let mut unique: Vec<A> = Vec::new();
        for axiom in axioms {
            if !unique.contains(&axiom) {
                unique.push(axiom);
            }
        }
        let is_question = sentences.last().is_some_and(Sentence::is_question);
        Self {
            sentences,
            axioms: unique,
            is_question,
            namespace: namespace.into(),
            alt_rendering: None,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            messages: Vec::new(),
        }
    }

    /// A snippet with no axioms, e.g. text that failed to parse.
    pub fn unparsed(namespace: impl Into<String>, sentences: Vec<S>) -> Self {
        Self::new(namespace, sentences, std::iter::empty())
    }

    /// A snippet manufactured from a single axiom. `sentences` is empty when
    /// the axiom could not be verbalized.
    pub fn from_axiom(namespace: impl Into<String>, sentences: Vec<S>, axiom: A) -> Self {
        Self::new(namespace, sentences, std::iter::once(axiom))
    }

    /// Attach the fallback rendering shown when there are no sentences.
    pub fn with_alt_rendering(mut self, rendering: impl Into<String>) -> Self {
        self.alt_rendering = Some(rendering.into());
        self
    }

    /// Attach the messages produced while parsing.
    pub fn with_messages(mut self, messages: Vec<ParserMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Override the creation timestamp.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn sentences(&self) -> &[S] {
        &self.sentences
    }

    pub fn axioms(&self) -> &[A] {
        &self.axioms
    }

    /// The single axiom of this snippet, if it has exactly one.
    pub fn axiom(&self) -> Option<&A> {
        match self.axioms.as_slice() {
            [axiom] => Some(axiom),
            _ => None,
        }
    }

    pub fn rules(&self) -> Vec<&A> {
        self.axioms.iter().filter(|a| a.is_rule()).collect()
    }

    pub fn has_axioms(&self) -> bool {
        !self.axioms.is_empty()
    }

    /// No sentences: the snippet only carries axioms.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Has sentences but no axioms.
    pub fn is_unparsed(&self) -> bool {
        self.axioms.is_empty() && !self.sentences.is_empty()
    }

    /// Has axioms but no sentences.
    pub fn is_unverbalized(&self) -> bool {
        !self.axioms.is_empty() && self.sentences.is_empty()
    }

    pub fn is_question(&self) -> bool {
        self.is_question
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn alt_rendering(&self) -> Option<&str> {
        self.alt_rendering.as_deref()
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn messages(&self) -> &[ParserMessage] {
        &self.messages
    }

    /// Error messages exist beyond those raised while mapping to axioms.
    pub fn has_ace_errors(&self) -> bool {
        let errors = self.messages.iter().filter(|m| m.is_error()).count();
        let owl_errors = self
            .messages
            .iter()
            .filter(|m| m.is_error() && m.category == "owl")
            .count();
        errors > 0 && errors != owl_errors
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.axioms.iter().any(Axiom::is_contradiction)
    }

    /// Every entity mentioned by any axiom, showable or not.
    pub fn referenced_entities(&self) -> BTreeSet<A::Entity> {
        self.axioms.iter().flat_map(Axiom::signature).collect()
    }

    pub fn contains_entity_reference(&self, entity: &A::Entity) -> bool {
        self.axioms.iter().any(|a| a.signature().contains(entity))
    }

    /// All sentences except those equal to `sentence`.
    pub fn rest(&self, sentence: &S) -> Vec<S> {
        self.sentences
            .iter()
            .filter(|s| *s != sentence)
            .cloned()
            .collect()
    }

    pub fn content_word_count(&self) -> usize {
        self.sentences.iter().map(|s| s.content_words().len()).sum()
    }

    pub fn tags(&self) -> BTreeSet<SnippetTag> {
        let mut tags = BTreeSet::new();
        if self.sentences.iter().any(Sentence::is_nothingbut) {
            tags.insert(SnippetTag::NothingBut);
        }
        if self.axioms.is_empty() {
            tags.insert(SnippetTag::NotOwlOrSwrl);
        } else {
            if self.axioms.iter().any(Axiom::is_rule) {
                tags.insert(SnippetTag::Swrl);
            }
            if self.is_unsatisfiable() {
                tags.insert(SnippetTag::Weird);
            }
        }
        tags
    }
}

impl<S: PartialEq, A> PartialEq for Snippet<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.sentences == other.sentences
    }
}

impl<S: Eq, A> Eq for Snippet<S, A> {}

impl<S: Hash, A> Hash for Snippet<S, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sentences.hash(state);
    }
}

impl<S: fmt::Display, A: fmt::Debug> fmt::Display for Snippet<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sentences.is_empty() {
            return match &self.alt_rendering {
                // Manchester syntax renderings carry layout; collapse it.
                Some(rendering) => {
                    let collapsed: Vec<&str> = rendering.split_whitespace().collect();
                    write!(f, "/* MOS: {} */", collapsed.join(" "))
                }
                None => write!(f, "/*{:?}*/", self.axioms),
            };
        }
        for (i, sentence) in self.sentences.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{sentence}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::{AceSentence, LogicalAxiom, OwlEntity};

    fn sentence(text: &str) -> AceSentence {
        AceSentence::from_text(text)
    }

    fn dog_is_animal() -> LogicalAxiom {
        LogicalAxiom::sub_class_of(OwlEntity::class("dog"), OwlEntity::class("animal"))
    }

    #[test]
    fn identity_is_the_sentence_sequence() {
        let a: Snippet<AceSentence, LogicalAxiom> =
            Snippet::from_axiom("ns", vec![sentence("Every dog is an animal.")], dog_is_animal());
        let b: Snippet<AceSentence, LogicalAxiom> =
            Snippet::unparsed("other", vec![sentence("Every dog is an animal.")]);
        assert_eq!(a, b);

        let c: Snippet<AceSentence, LogicalAxiom> =
            Snippet::unparsed("ns", vec![sentence("Every cat is an animal.")]);
        assert_ne!(a, c);
    }

    #[test]
    fn question_is_decided_by_last_sentence() {
        let q: Snippet<AceSentence, LogicalAxiom> = Snippet::unparsed(
            "ns",
            vec![sentence("John is a man."), sentence("Who is a man?")],
        );
        assert!(q.is_question());

        let not_q: Snippet<AceSentence, LogicalAxiom> = Snippet::unparsed(
            "ns",
            vec![sentence("Who is a man?"), sentence("John is a man.")],
        );
        assert!(!not_q.is_question());
    }

    #[test]
    fn duplicate_axioms_collapse() {
        let s: Snippet<AceSentence, LogicalAxiom> = Snippet::new(
            "ns",
            vec![sentence("Every dog is an animal.")],
            vec![dog_is_animal(), dog_is_animal()],
        );
        assert_eq!(s.axioms().len(), 1);
        assert_eq!(s.axiom(), Some(&dog_is_animal()));
    }

    #[test]
    fn unverbalized_rendering_collapses_whitespace() {
        let s: Snippet<AceSentence, LogicalAxiom> =
            Snippet::from_axiom("ns", vec![], dog_is_animal())
                .with_alt_rendering("dog\n   SubClassOf\tanimal");
        assert!(s.is_unverbalized());
        assert_eq!(s.to_string(), "/* MOS: dog SubClassOf animal */");
    }

    #[test]
    fn tags_reflect_content() {
        let unparsed: Snippet<AceSentence, LogicalAxiom> =
            Snippet::unparsed("ns", vec![sentence("John eats nothing but apples.")]);
        let tags = unparsed.tags();
        assert!(tags.contains(&SnippetTag::NothingBut));
        assert!(tags.contains(&SnippetTag::NotOwlOrSwrl));

        let weird: Snippet<AceSentence, LogicalAxiom> = Snippet::from_axiom(
            "ns",
            vec![sentence("No dog is a dog.")],
            LogicalAxiom::sub_class_of(OwlEntity::class("dog"), OwlEntity::nothing()),
        );
        assert!(weird.is_unsatisfiable());
        assert_eq!(weird.tags(), BTreeSet::from([SnippetTag::Weird]));
    }

    #[test]
    fn owl_only_errors_are_not_ace_errors() {
        let s: Snippet<AceSentence, LogicalAxiom> = Snippet::unparsed("ns", vec![sentence("John is a man.")])
            .with_messages(vec![ParserMessage::error("owl", "man", "unsupported construct")]);
        assert!(!s.has_ace_errors());

        let s = s.with_messages(vec![
            ParserMessage::error("owl", "man", ""),
            ParserMessage::error("syntax", "is", "").at(1, 2),
        ]);
        assert!(s.has_ace_errors());
    }

    #[test]
    fn rest_drops_the_given_sentence() {
        let s: Snippet<AceSentence, LogicalAxiom> = Snippet::unparsed(
            "ns",
            vec![sentence("John is a man."), sentence("Mary is a woman.")],
        );
        assert_eq!(s.rest(&sentence("John is a man.")), vec![sentence("Mary is a woman.")]);
    }
}
