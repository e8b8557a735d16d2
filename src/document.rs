//! A document: one text index and one lexicon edited together.
//!
//! The document is the session object every edit goes through. It builds
//! snippets with the external [`Parser`] and [`Verbalizer`], keeps the text
//! index and lexicon in step, and reports the axiom changes the caller has
//! to apply to its knowledge store.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::config::AceConfig;
use crate::error::AceResult;
use crate::lexicon::Lexicon;
use crate::lexicon::format::ParserLexicon;
use crate::metrics::TextMetrics;
use crate::model::{Axiom, LexicalEntity, Sentence, ShowAll, Showing};
use crate::owl::OwlShowing;
use crate::snippet::{ParserMessage, Snippet};
use crate::text::{SharedSnippet, TextIndex};

/// What a [`Parser`] made of a sentence sequence.
#[derive(Debug, Clone)]
pub struct ParseOutcome<A> {
    pub axioms: Vec<A>,
    pub messages: Vec<ParserMessage>,
}

impl<A> ParseOutcome<A> {
    pub fn new(axioms: Vec<A>) -> Self {
        Self {
            axioms,
            messages: Vec::new(),
        }
    }

    pub fn failed(messages: Vec<ParserMessage>) -> Self {
        Self {
            axioms: Vec::new(),
            messages,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(ParserMessage::is_error)
    }
}

/// Translates sentences into axioms.
pub trait Parser<S, A> {
    /// Parse `sentences` using only the word-forms in `lexicon`.
    fn parse(&self, sentences: &[S], lexicon: &ParserLexicon) -> ParseOutcome<A>;
}

/// Translates axioms back into sentences.
pub trait Verbalizer<S, A> {
    /// The sentences expressing `axiom`; empty if it cannot be verbalized.
    fn verbalize(&self, axiom: &A) -> Vec<S>;

    /// A non-ACE rendering of `axiom`, shown when it cannot be verbalized.
    fn render(&self, _axiom: &A) -> Option<String> {
        None
    }
}

/// Axioms to add to and remove from the knowledge store after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxiomChanges<A: Axiom> {
    pub added: HashSet<A>,
    pub removed: HashSet<A>,
}

impl<A: Axiom> Default for AxiomChanges<A> {
    fn default() -> Self {
        Self {
            added: HashSet::new(),
            removed: HashSet::new(),
        }
    }
}

impl<A: Axiom> AxiomChanges<A> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    fn add_snippet<S: Sentence>(&mut self, snippet: &Snippet<S, A>) {
        self.added
            .extend(snippet.axioms().iter().map(Axiom::canonical));
    }

    /// Fold the changes of a later edit into `self`.
    pub fn merge(&mut self, later: AxiomChanges<A>) {
        self.added.retain(|a| !later.removed.contains(a));
        self.removed.retain(|a| !later.added.contains(a));
        self.added.extend(later.added);
        self.removed.extend(later.removed);
    }
}

/// Where [`Document::add_axiom`] put an axiom.
#[derive(Debug, Clone)]
pub enum AxiomPlacement<S, A> {
    /// Some snippet already denotes the axiom.
    Covered,
    /// A new snippet was added for the axiom.
    Added(SharedSnippet<S, A>),
    /// No snippet could be added. Its rendering equals a snippet already in
    /// the text, typically because the axiom has no sentences and the text
    /// already holds a sentence-less snippet.
    Unplaced,
}

impl<S, A> AxiomPlacement<S, A> {
    pub fn snippet(&self) -> Option<&SharedSnippet<S, A>> {
        match self {
            AxiomPlacement::Added(snippet) => Some(snippet),
            AxiomPlacement::Covered | AxiomPlacement::Unplaced => None,
        }
    }

    pub fn is_unplaced(&self) -> bool {
        matches!(self, AxiomPlacement::Unplaced)
    }
}

/// The result of giving tangling axioms snippets of their own.
#[derive(Debug, Clone)]
pub struct Reverbalized<S, A> {
    /// Snippets created, in processing order.
    pub created: Vec<SharedSnippet<S, A>>,
    /// Axioms no snippet denotes any more. The caller still holds them in
    /// its knowledge store.
    pub unplaced: Vec<A>,
}

impl<S, A> Default for Reverbalized<S, A> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            unplaced: Vec::new(),
        }
    }
}

/// One text index and one lexicon, edited together.
#[derive(Debug, Clone)]
pub struct Document<S, A, P = ShowAll>
where
    A: Axiom,
    A::Entity: LexicalEntity,
{
    text: TextIndex<S, A, P>,
    lexicon: Lexicon<A::Entity>,
    config: AceConfig,
}

impl<S, A> Document<S, A, ShowAll>
where
    S: Sentence,
    A: Axiom,
    A::Entity: LexicalEntity,
{
    /// A document whose entity index shows every entity.
    pub fn new(config: AceConfig) -> Self {
        Self::with_showing(config, ShowAll)
    }
}

impl<S, A> Document<S, A, OwlShowing>
where
    S: Sentence,
    A: Axiom<Entity = crate::owl::OwlEntity>,
{
    /// A document hiding the configured helper entities.
    pub fn from_config(config: AceConfig) -> Self {
        let showing = config.showing();
        Self::with_showing(config, showing)
    }
}

impl<S, A, P> Document<S, A, P>
where
    S: Sentence,
    A: Axiom,
    A::Entity: LexicalEntity,
    P: Showing<A::Entity>,
{
    pub fn with_showing(config: AceConfig, showing: P) -> Self {
        Self {
            text: TextIndex::with_showing(showing),
            lexicon: Lexicon::new(),
            config,
        }
    }

    pub fn text(&self) -> &TextIndex<S, A, P> {
        &self.text
    }

    pub fn lexicon(&self) -> &Lexicon<A::Entity> {
        &self.lexicon
    }

    pub fn lexicon_mut(&mut self) -> &mut Lexicon<A::Entity> {
        &mut self.lexicon
    }

    pub fn config(&self) -> &AceConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Snippet construction
    // -----------------------------------------------------------------------

    /// Content words of `sentences` that the lexicon does not define.
    pub fn undefined_wordforms(&self, sentences: &[S]) -> BTreeSet<String> {
        sentences
            .iter()
            .flat_map(Sentence::content_words)
            .filter(|w| !self.lexicon.contains_wordform(w))
            .collect()
    }

    /// Build a snippet for `sentences` with `parser`.
    ///
    /// The parser sees only the lexicon entries of the sentences' content
    /// words. Unless undefined word-forms are allowed, text with an undefined
    /// content word is not parsed; the snippet gets one `token` error per
    /// undefined word-form instead. A parse reporting errors yields no axioms.
    pub fn parse_snippet(
        &self,
        namespace: &str,
        sentences: Vec<S>,
        parser: &impl Parser<S, A>,
    ) -> Snippet<S, A> {
        if !self.config.parse_with_undefined_tokens {
            let messages: Vec<ParserMessage> = self
                .undefined_wordforms(&sentences)
                .into_iter()
                .map(|w| ParserMessage::error("token", w, "Add this wordform to the lexicon"))
                .collect();
            if !messages.is_empty() {
                tracing::info!(undefined = messages.len(), "not parsing text with undefined tokens");
                return Snippet::unparsed(namespace, sentences).with_messages(messages);
            }
        }

        let content_words: BTreeSet<String> = sentences
            .iter()
            .flat_map(Sentence::content_words)
            .collect();
        let lexicon = self
            .lexicon
            .create_lexicon_for(content_words.iter().map(String::as_str));
        tracing::debug!(entries = lexicon.len(), "parsing with lexicon subset");

        let outcome = parser.parse(&sentences, &lexicon);
        if outcome.has_errors() {
            Snippet::unparsed(namespace, sentences).with_messages(outcome.messages)
        } else {
            Snippet::new(namespace, sentences, outcome.axioms).with_messages(outcome.messages)
        }
    }

    /// Build a snippet for `axiom` with `verbalizer`. An axiom that cannot be
    /// verbalized gets a sentence-less snippet carrying a fallback rendering.
    pub fn verbalize_axiom(&self, axiom: &A, verbalizer: &impl Verbalizer<S, A>) -> Snippet<S, A> {
        let sentences = verbalizer.verbalize(axiom);
        if sentences.is_empty() {
            tracing::warn!(axiom = ?axiom, "verbalizer produced no sentences");
            let rendering = verbalizer
                .render(axiom)
                .unwrap_or_else(|| format!("{axiom:?}"));
            return Snippet::from_axiom(self.config.namespace.as_str(), sentences, axiom.clone())
                .with_alt_rendering(rendering);
        }
        Snippet::from_axiom(self.config.namespace.as_str(), sentences, axiom.clone())
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Append a snippet.
    pub fn add_snippet(&mut self, snippet: Snippet<S, A>) -> AxiomChanges<A> {
        let mut changes = AxiomChanges::default();
        changes.add_snippet(&snippet);
        if !self.text.add(snippet) {
            return AxiomChanges::default();
        }
        changes
    }

    /// Insert a snippet at position `index`.
    pub fn insert_snippet(&mut self, index: usize, snippet: Snippet<S, A>) -> AceResult<AxiomChanges<A>> {
        let mut changes = AxiomChanges::default();
        changes.add_snippet(&snippet);
        if !self.text.insert(index, snippet)? {
            return Ok(AxiomChanges::default());
        }
        Ok(changes)
    }

    /// Remove a snippet; the orphaned axioms are to be removed from the store.
    pub fn remove_snippet(&mut self, snippet: &Snippet<S, A>) -> AxiomChanges<A> {
        AxiomChanges {
            added: HashSet::new(),
            removed: self.text.remove(snippet),
        }
    }

    /// Parse `sentences` and append the resulting snippet.
    pub fn add_text(&mut self, sentences: Vec<S>, parser: &impl Parser<S, A>) -> AxiomChanges<A> {
        let snippet = self.parse_snippet(&self.config.namespace, sentences, parser);
        self.add_snippet(snippet)
    }

    /// Replace `old` with a snippet parsed from `sentences`, at the same
    /// position. An absent `old` is treated as an append.
    pub fn update_snippet(
        &mut self,
        old: &Snippet<S, A>,
        sentences: Vec<S>,
        parser: &impl Parser<S, A>,
    ) -> AceResult<(SharedSnippet<S, A>, AxiomChanges<A>)> {
        let snippet = Arc::new(self.parse_snippet(old.namespace(), sentences, parser));
        let index = self.text.index_of(old).unwrap_or(self.text.len());
        tracing::info!(index, "updating snippet");

        let mut changes = self.remove_snippet(old);
        let mut added = AxiomChanges::default();
        if self.text.insert_shared(index, Arc::clone(&snippet))? {
            added.add_snippet(&snippet);
        }
        changes.merge(added);
        Ok((snippet, changes))
    }

    /// Parse and append every sentence sequence in `added`, then remove every
    /// snippet in `removed`.
    pub fn add_and_remove(
        &mut self,
        added: Vec<Vec<S>>,
        removed: &[Snippet<S, A>],
        parser: &impl Parser<S, A>,
    ) -> AxiomChanges<A> {
        let mut changes = AxiomChanges::default();
        for sentences in added {
            let step = self.add_text(sentences, parser);
            changes.merge(step);
        }
        for snippet in removed {
            let step = self.remove_snippet(snippet);
            changes.merge(step);
        }
        changes
    }

    /// Remove every snippet containing `sentence`. The other sentences of a
    /// removed multi-sentence snippet are parsed again as a snippet of their own.
    pub fn remove_sentence(&mut self, sentence: &S, parser: &impl Parser<S, A>) -> AxiomChanges<A> {
        let mut changes = AxiomChanges::default();
        let mut containing: Vec<SharedSnippet<S, A>> =
            self.text.sentence_snippets(sentence).into_iter().collect();
        containing.sort_by_key(|s| self.text.index_of(s));
        for old in containing {
            let step = self.remove_snippet(&old);
            changes.merge(step);
            if old.sentences().len() > 1 {
                tracing::info!(snippet = %old, "re-adding the rest of a multi-sentence snippet");
                let step = self.add_text(old.rest(sentence), parser);
                changes.merge(step);
            }
        }
        changes
    }

    /// The knowledge store dropped `axiom`: remove every snippet denoting it
    /// and give each axiom left without a snippet a verbalized one.
    pub fn remove_axiom(&mut self, axiom: &A, verbalizer: &impl Verbalizer<S, A>) -> Reverbalized<S, A> {
        let tangling = self.text.remove_axiom(axiom);
        self.process_tangling_axioms(tangling, verbalizer)
    }

    /// Give each axiom a verbalized snippet of its own, in `Debug` order.
    pub fn process_tangling_axioms(
        &mut self,
        tangling: impl IntoIterator<Item = A>,
        verbalizer: &impl Verbalizer<S, A>,
    ) -> Reverbalized<S, A> {
        let mut axioms: Vec<A> = tangling.into_iter().collect();
        axioms.sort_by_cached_key(|a| format!("{a:?}"));
        let mut outcome = Reverbalized::default();
        for axiom in axioms {
            tracing::info!(axiom = ?axiom, "adding back");
            match self.add_axiom(&axiom, verbalizer) {
                AxiomPlacement::Added(snippet) => outcome.created.push(snippet),
                AxiomPlacement::Unplaced => outcome.unplaced.push(axiom),
                AxiomPlacement::Covered => {}
            }
        }
        outcome
    }

    /// The knowledge store gained `axiom`: verbalize it into a new snippet
    /// unless some snippet already denotes it.
    pub fn add_axiom(&mut self, axiom: &A, verbalizer: &impl Verbalizer<S, A>) -> AxiomPlacement<S, A> {
        if self.text.contains_axiom(axiom) {
            return AxiomPlacement::Covered;
        }
        let snippet = Arc::new(self.verbalize_axiom(axiom, verbalizer));
        if self.text.add_shared(Arc::clone(&snippet)) {
            return AxiomPlacement::Added(snippet);
        }
        tracing::warn!(
            axiom = ?axiom,
            snippet = %snippet,
            "an equal snippet is already present, axiom left without a snippet"
        );
        AxiomPlacement::Unplaced
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Longest unambiguous completion of `prefix` among lexicon word-forms.
    pub fn complete(&self, prefix: &str) -> String {
        self.lexicon.complete(prefix)
    }

    /// Word-forms starting with `prefix`, up to the configured limit.
    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        self.lexicon.candidates(prefix, self.config.candidate_limit)
    }

    pub fn metrics(&self) -> TextMetrics {
        TextMetrics::collect(&self.text, &self.lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::morph::MorphType;
    use crate::owl::{AceSentence, LogicalAxiom, OwlEntity};

    const NS: &str = "http://example.org";

    fn class(name: &str) -> OwlEntity {
        OwlEntity::class(format!("{NS}#{name}"))
    }

    /// Parses "Every X is a Y." into SubClassOf(X Y); anything else is an error.
    struct EveryIsA;

    impl Parser<AceSentence, LogicalAxiom> for EveryIsA {
        fn parse(&self, sentences: &[AceSentence], lexicon: &ParserLexicon) -> ParseOutcome<LogicalAxiom> {
            let mut axioms = Vec::new();
            for s in sentences {
                match s.tokens() {
                    [every, sub, _, _, sup, _] if every == "Every" && lexicon.defines(sub) && lexicon.defines(sup) => {
                        axioms.push(LogicalAxiom::sub_class_of(class(sub), class(sup)));
                    }
                    _ => return ParseOutcome::failed(vec![ParserMessage::error("syntax", s.to_string(), "")]),
                }
            }
            ParseOutcome::new(axioms)
        }
    }

    struct Verbalize;

    impl Verbalizer<AceSentence, LogicalAxiom> for Verbalize {
        fn verbalize(&self, axiom: &LogicalAxiom) -> Vec<AceSentence> {
            match axiom.terms.as_slice() {
                [sub, sup] if sub.fragment() != "mute" => {
                    vec![AceSentence::from_text(&format!("Every {sub} is a {sup}."))]
                }
                _ => vec![],
            }
        }
    }

    fn doc() -> Document<AceSentence, LogicalAxiom, OwlShowing> {
        let mut doc = Document::from_config(AceConfig {
            namespace: NS.into(),
            ..Default::default()
        });
        for name in ["dog", "animal", "cat", "pet"] {
            doc.lexicon_mut()
                .add_entry(class(name), MorphType::CnSg, name)
                .unwrap();
        }
        doc
    }

    fn text(s: &str) -> Vec<AceSentence> {
        vec![AceSentence::from_text(s)]
    }

    #[test]
    fn add_text_reports_added_axioms() {
        let mut doc = doc();
        let changes = doc.add_text(text("Every dog is an animal."), &EveryIsA);
        assert_eq!(
            changes.added,
            HashSet::from([LogicalAxiom::sub_class_of(class("dog"), class("animal"))])
        );
        assert!(doc.add_text(text("Every dog is an animal."), &EveryIsA).is_empty());
        assert_eq!(doc.text().len(), 1);
    }

    #[test]
    fn undefined_tokens_skip_the_parser() {
        let mut doc = doc();
        let changes = doc.add_text(text("Every cow is an animal."), &EveryIsA);
        assert!(changes.is_empty());
        let snippet = &doc.text().snippets()[0];
        assert!(!snippet.has_axioms());
        assert_eq!(snippet.messages().len(), 1);
        assert_eq!(snippet.messages()[0].category, "token");
        assert_eq!(snippet.messages()[0].value, "cow");
        assert_eq!(doc.text().unparsed_count(), 1);
    }

    #[test]
    fn parse_errors_discard_axioms() {
        let mut doc = Document::from_config(AceConfig {
            parse_with_undefined_tokens: true,
            ..Default::default()
        });
        doc.add_text(text("Every cow is an animal."), &EveryIsA);
        let snippet = &doc.text().snippets()[0];
        assert!(!snippet.has_axioms());
        assert_eq!(snippet.messages()[0].category, "syntax");
    }

    #[test]
    fn update_keeps_position() {
        let mut doc = doc();
        doc.add_text(text("Every dog is an animal."), &EveryIsA);
        doc.add_text(text("Every cat is an animal."), &EveryIsA);
        let old = doc.text().snippets()[0].clone();
        let (new, changes) = doc
            .update_snippet(&old, text("Every dog is a pet."), &EveryIsA)
            .unwrap();
        assert_eq!(doc.text().index_of(&new), Some(0));
        assert_eq!(
            changes.removed,
            HashSet::from([LogicalAxiom::sub_class_of(class("dog"), class("animal"))])
        );
        assert_eq!(
            changes.added,
            HashSet::from([LogicalAxiom::sub_class_of(class("dog"), class("pet"))])
        );
    }

    #[test]
    fn remove_sentence_keeps_the_rest() {
        let mut doc = doc();
        let first = AceSentence::from_text("Every dog is an animal.");
        let second = AceSentence::from_text("Every cat is a pet.");
        doc.add_text(vec![first.clone(), second.clone()], &EveryIsA);
        let changes = doc.remove_sentence(&first, &EveryIsA);
        assert_eq!(doc.text().len(), 1);
        assert!(doc.text().contains_sentences(&[second]));
        assert_eq!(
            changes.removed,
            HashSet::from([LogicalAxiom::sub_class_of(class("dog"), class("animal"))])
        );
        assert_eq!(
            changes.added,
            HashSet::from([LogicalAxiom::sub_class_of(class("cat"), class("pet"))])
        );
    }

    #[test]
    fn merge_applies_in_order() {
        let x = LogicalAxiom::sub_class_of(class("dog"), class("animal"));
        let mut changes = AxiomChanges {
            added: HashSet::from([x.clone()]),
            removed: HashSet::new(),
        };
        changes.merge(AxiomChanges {
            added: HashSet::new(),
            removed: HashSet::from([x.clone()]),
        });
        assert!(changes.added.is_empty());
        assert_eq!(changes.removed, HashSet::from([x]));
    }

    #[test]
    fn removed_axiom_leaves_tangling_axioms_verbalized() {
        let mut doc = doc();
        let a = LogicalAxiom::sub_class_of(class("dog"), class("animal"));
        let b = LogicalAxiom::sub_class_of(class("cat"), class("pet"));
        doc.add_snippet(Snippet::new(NS, text("Dogs and cats."), vec![a.clone(), b.clone()]));

        let outcome = doc.remove_axiom(&a, &Verbalize);
        assert!(outcome.unplaced.is_empty());
        let created = outcome.created;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].axioms(), &[b.clone()]);
        assert_eq!(created[0].to_string(), "Every cat is a pet.");
        assert!(!doc.text().contains_axiom(&a));
        assert!(doc.text().contains_axiom(&b));
    }

    #[test]
    fn add_axiom_skips_covered_axioms() {
        let mut doc = doc();
        let a = LogicalAxiom::sub_class_of(class("dog"), class("animal"));
        assert!(doc.add_axiom(&a, &Verbalize).snippet().is_some());
        assert!(matches!(doc.add_axiom(&a, &Verbalize), AxiomPlacement::Covered));
        assert_eq!(doc.text().len(), 1);
    }

    #[test]
    fn second_sentenceless_axiom_is_reported_unplaced() {
        let mut doc = doc();
        let first = LogicalAxiom::sub_class_of(class("mute"), class("zzz"));
        let second = LogicalAxiom::sub_class_of(class("mute"), class("yyy"));

        assert!(doc.add_axiom(&first, &Verbalize).snippet().is_some());
        assert!(doc.add_axiom(&second, &Verbalize).is_unplaced());
        assert!(doc.text().contains_axiom(&first));
        assert!(!doc.text().contains_axiom(&second));
    }

    #[test]
    fn tangling_axiom_without_room_is_reported() {
        let mut doc = doc();
        let held = LogicalAxiom::sub_class_of(class("mute"), class("zzz"));
        let x = LogicalAxiom::sub_class_of(class("dog"), class("animal"));
        let tangling = LogicalAxiom::sub_class_of(class("mute"), class("yyy"));
        assert!(doc.add_axiom(&held, &Verbalize).snippet().is_some());
        doc.add_snippet(Snippet::new(NS, text("Dogs are mute."), vec![x.clone(), tangling.clone()]));

        let outcome = doc.remove_axiom(&x, &Verbalize);
        assert!(outcome.created.is_empty());
        assert_eq!(outcome.unplaced, vec![tangling.clone()]);
        assert!(!doc.text().contains_axiom(&tangling));
        assert_eq!(doc.text().len(), 1);
    }

    #[test]
    fn unverbalizable_axiom_gets_fallback_rendering() {
        let doc = doc();
        let mute = LogicalAxiom::sub_class_of(class("mute"), class("zzz"));
        let snippet = doc.verbalize_axiom(&mute, &Verbalize);
        assert!(snippet.sentences().is_empty());
        assert!(snippet.alt_rendering().is_some());
    }

    #[test]
    fn candidates_follow_config_limit() {
        let mut doc = doc();
        assert_eq!(doc.complete("d"), "dog");
        assert_eq!(doc.candidates("").len(), 4);
        doc.config.candidate_limit = 2;
        assert_eq!(doc.candidates(""), vec!["animal", "cat"]);
    }
}
