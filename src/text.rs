//! The text index: an ordered set of snippets plus the reverse indices from
//! entities, axioms and sentences back to the snippets using them.
//!
//! For every indexed snippet, each of its axioms (in canonical form) maps to
//! it, each showable entity of those axioms maps to it, and each of its
//! sentences maps to it. Removing the last snippet under a key removes the key.
//!
//! Removal is reference counted: [`TextIndex::remove`] reports exactly the
//! axioms that no remaining snippet refers to, so the caller knows which
//! axioms to drop from the underlying knowledge store.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::answer::{Answer, AnswerCache};
use crate::error::{TextError, TextResult};
use crate::model::{Axiom, Sentence, ShowAll, Showing};
use crate::multimap::MultiMap;
use crate::snippet::Snippet;

/// A shared handle to an indexed snippet.
pub type SharedSnippet<S, A> = Arc<Snippet<S, A>>;

/// One entity of the entity index with the snippets that mention it.
#[derive(Debug, Clone)]
pub struct EntityIndexEntry<E, S, A> {
    pub entity: E,
    /// Ordered case-insensitively by rendering.
    pub snippets: Vec<SharedSnippet<S, A>>,
}

/// Multi-index over snippets.
///
/// `P` decides which entities may appear in the entity index.
#[derive(Debug, Clone)]
pub struct TextIndex<S, A: Axiom, P = ShowAll> {
    snippets: Vec<SharedSnippet<S, A>>,
    entity_to_snippets: MultiMap<A::Entity, SharedSnippet<S, A>>,
    axiom_to_snippets: MultiMap<A, SharedSnippet<S, A>>,
    sentence_to_snippets: MultiMap<S, SharedSnippet<S, A>>,
    questions: Vec<SharedSnippet<S, A>>,
    answers: AnswerCache<S, A::Entity>,
    showing: P,
    /// Snippets containing at least one rule.
    rule_count: usize,
    /// "Nothing but" sentences over all snippets.
    nothingbut_count: usize,
    /// Snippets without axioms.
    unparsed_count: usize,
    /// Snippets without sentences.
    unverbalized_count: usize,
}

impl<S: Sentence, A: Axiom> TextIndex<S, A, ShowAll> {
    /// An empty index showing every entity.
    pub fn new() -> Self {
        Self::with_showing(ShowAll)
    }
}

impl<S: Sentence, A: Axiom> Default for TextIndex<S, A, ShowAll> {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_by_rendering<S: fmt::Display, A: fmt::Debug>(snippets: &mut [SharedSnippet<S, A>]) {
    snippets.sort_by_cached_key(|s| {
        let rendering = s.to_string();
        (rendering.to_lowercase(), rendering)
    });
}

impl<S, A, P> TextIndex<S, A, P>
where
    S: Sentence,
    A: Axiom,
    P: Showing<A::Entity>,
{
    /// An empty index whose entity index admits only entities `showing` accepts.
    pub fn with_showing(showing: P) -> Self {
        Self {
            snippets: Vec::new(),
            entity_to_snippets: MultiMap::new(),
            axiom_to_snippets: MultiMap::new(),
            sentence_to_snippets: MultiMap::new(),
            questions: Vec::new(),
            answers: AnswerCache::new(),
            showing,
            rule_count: 0,
            nothingbut_count: 0,
            unparsed_count: 0,
            unverbalized_count: 0,
        }
    }

    pub fn showing(&self) -> &P {
        &self.showing
    }

    /// Showable entities referenced by the axioms of `snippet`.
    fn showable_entities(&self, snippet: &Snippet<S, A>) -> BTreeSet<A::Entity> {
        snippet
            .referenced_entities()
            .into_iter()
            .filter(|e| self.showing.is_showable(e))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append a snippet. Returns `false` (and changes nothing) if an equal
    /// snippet is already present.
    pub fn add(&mut self, snippet: Snippet<S, A>) -> bool {
        self.add_shared(Arc::new(snippet))
    }

    /// Append an already shared snippet; see [`TextIndex::add`].
    pub fn add_shared(&mut self, snippet: SharedSnippet<S, A>) -> bool {
        if self.contains(&snippet) {
            return false;
        }
        self.register(&snippet);
        self.snippets.push(snippet);
        true
    }

    /// Insert a snippet at position `index`. Returns `Ok(false)` if an equal
    /// snippet is already present.
    pub fn insert(&mut self, index: usize, snippet: Snippet<S, A>) -> TextResult<bool> {
        self.insert_shared(index, Arc::new(snippet))
    }

    pub fn insert_shared(&mut self, index: usize, snippet: SharedSnippet<S, A>) -> TextResult<bool> {
        if index > self.snippets.len() {
            return Err(TextError::IndexOutOfBounds {
                index,
                len: self.snippets.len(),
            });
        }
        if self.contains(&snippet) {
            return Ok(false);
        }
        self.register(&snippet);
        self.snippets.insert(index, snippet);
        Ok(true)
    }

    fn register(&mut self, snippet: &SharedSnippet<S, A>) {
        if snippet.axioms().is_empty() {
            self.unparsed_count += 1;
        } else {
            if !snippet.rules().is_empty() {
                self.rule_count += 1;
            }
            for axiom in snippet.axioms() {
                self.axiom_to_snippets
                    .insert(axiom.canonical(), Arc::clone(snippet));
            }
            for entity in self.showable_entities(snippet) {
                self.entity_to_snippets.insert(entity, Arc::clone(snippet));
            }
        }

        for sentence in snippet.sentences() {
            self.sentence_to_snippets
                .insert(sentence.clone(), Arc::clone(snippet));
            if sentence.is_nothingbut() {
                self.nothingbut_count += 1;
            }
        }

        if snippet.is_question() {
            self.questions.push(Arc::clone(snippet));
        }
        if snippet.sentences().is_empty() {
            self.unverbalized_count += 1;
        }

        tracing::info!(
            position = self.snippets.len(),
            axioms = snippet.axioms().len(),
            sentences = snippet.sentences().len(),
            "snippet added"
        );
    }

    /// Remove a snippet and return the axioms (canonical form) that no
    /// remaining snippet refers to any more.
    ///
    /// Removing a snippet that is not present changes nothing and returns
    /// the empty set.
    pub fn remove(&mut self, snippet: &Snippet<S, A>) -> HashSet<A> {
        let Some(position) = self.index_of(snippet) else {
            return HashSet::new();
        };
        // The stored snippet is authoritative: it may carry other axioms
        // than an equal snippet built by the caller.
        let stored = self.snippets.remove(position);

        if stored.sentences().is_empty() {
            self.unverbalized_count -= 1;
        }
        if stored.is_question() {
            if let Some(q) = self.questions.iter().position(|q| q == &stored) {
                self.questions.remove(q);
            }
        }
        for sentence in stored.sentences() {
            self.sentence_to_snippets.remove(sentence, &stored);
            if sentence.is_nothingbut() {
                self.nothingbut_count -= 1;
            }
        }

        let mut orphaned = HashSet::new();
        if stored.axioms().is_empty() {
            self.unparsed_count -= 1;
        } else {
            if !stored.rules().is_empty() {
                self.rule_count -= 1;
            }
            for entity in self.showable_entities(&stored) {
                if !self.entity_to_snippets.remove(&entity, &stored) {
                    tracing::warn!(entity = ?entity, "entity not found in the entity index");
                }
            }
            for axiom in stored.axioms() {
                let key = axiom.canonical();
                self.axiom_to_snippets.remove(&key, &stored);
                if self.axiom_to_snippets.contains_key(&key) {
                    tracing::debug!(
                        axiom = ?key,
                        snippets = self.axiom_to_snippets.bucket_len(&key),
                        "axiom preserved, other snippets account for it"
                    );
                } else {
                    orphaned.insert(key);
                }
            }
        }

        tracing::info!(position, orphaned = orphaned.len(), "snippet removed");
        orphaned
    }

    /// Remove every given snippet and return the union of the orphaned axioms.
    pub fn remove_all<'a>(&mut self, snippets: impl IntoIterator<Item = &'a Snippet<S, A>>) -> HashSet<A>
    where
        S: 'a,
        A: 'a,
    {
        let mut orphaned = HashSet::new();
        for snippet in snippets {
            orphaned.extend(self.remove(snippet));
        }
        orphaned
    }

    /// Remove every snippet indexed under `axiom` and return the axioms left
    /// unreferenced by that removal, excluding `axiom` itself.
    pub fn remove_axiom(&mut self, axiom: &A) -> HashSet<A> {
        let key = axiom.canonical();
        let snippets: Vec<SharedSnippet<S, A>> = self.axiom_snippets(&key).into_iter().collect();
        if snippets.is_empty() {
            return HashSet::new();
        }
        tracing::info!(axiom = ?key, snippets = snippets.len(), "removing snippets of axiom");
        let mut tangling = self.remove_all(snippets.iter().map(|s| &**s));
        tangling.remove(&key);
        tangling
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Axioms of `snippet` that some other snippet also refers to.
    pub fn shared_axioms(&self, snippet: &Snippet<S, A>) -> HashSet<A> {
        let threshold = usize::from(self.contains(snippet));
        snippet
            .axioms()
            .iter()
            .map(Axiom::canonical)
            .filter(|key| self.axiom_to_snippets.bucket_len(key) > threshold)
            .collect()
    }

    /// Snippets (other than `snippet`) mentioning every showable entity that
    /// `snippet` mentions.
    ///
    /// Entities no indexed snippet mentions are skipped. The result is empty
    /// if `snippet` mentions no showable entity.
    pub fn similar_snippets(&self, snippet: &Snippet<S, A>) -> HashSet<SharedSnippet<S, A>> {
        let mut similar: Option<HashSet<SharedSnippet<S, A>>> = None;
        for entity in self.showable_entities(snippet) {
            let Some(bucket) = self.entity_to_snippets.get(&entity) else {
                continue;
            };
            match similar.as_mut() {
                None => {
                    let mut seed = bucket.clone();
                    seed.retain(|s| s.as_ref() != snippet);
                    similar = Some(seed);
                }
                Some(set) => set.retain(|s| bucket.contains(s)),
            }
        }
        similar.unwrap_or_default()
    }

    /// The snippet with exactly this sentence sequence.
    pub fn find(&self, sentences: &[S]) -> Option<SharedSnippet<S, A>> {
        let first = sentences.first()?;
        self.sentence_to_snippets
            .get(first)?
            .iter()
            .find(|s| s.sentences() == sentences)
            .cloned()
    }

    /// Whether a snippet with exactly this sentence sequence is present.
    /// Always `false` for an empty sequence.
    pub fn contains_sentences(&self, sentences: &[S]) -> bool {
        self.find(sentences).is_some()
    }

    /// Whether a snippet equal to `snippet` is present.
    pub fn contains(&self, snippet: &Snippet<S, A>) -> bool {
        if snippet.sentences().is_empty() {
            // Sentence-less snippets are all equal; they are not in the
            // sentence index.
            return self.snippets.iter().any(|s| s.sentences().is_empty());
        }
        self.contains_sentences(snippet.sentences())
    }

    pub fn index_of(&self, snippet: &Snippet<S, A>) -> Option<usize> {
        self.snippets.iter().position(|s| s.as_ref() == snippet)
    }

    pub fn get(&self, index: usize) -> Option<&SharedSnippet<S, A>> {
        self.snippets.get(index)
    }

    /// All snippets in text order.
    pub fn snippets(&self) -> &[SharedSnippet<S, A>] {
        &self.snippets
    }

    /// Question snippets in the order they were added.
    pub fn questions(&self) -> &[SharedSnippet<S, A>] {
        &self.questions
    }

    /// Snippets without axioms, with their positions.
    pub fn axiomless_snippets(&self) -> Vec<(usize, SharedSnippet<S, A>)> {
        self.snippets
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.has_axioms())
            .map(|(i, s)| (i, Arc::clone(s)))
            .collect()
    }

    pub fn contains_sentence(&self, sentence: &S) -> bool {
        self.sentence_to_snippets.contains_key(sentence)
    }

    /// Distinct sentences over all snippets.
    pub fn sentences(&self) -> HashSet<S> {
        self.sentence_to_snippets.keys().cloned().collect()
    }

    pub fn sentence_snippets(&self, sentence: &S) -> HashSet<SharedSnippet<S, A>> {
        self.sentence_to_snippets
            .get(sentence)
            .cloned()
            .unwrap_or_default()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_to_snippets.len()
    }

    /// Whether some snippet denotes `axiom`, compared in canonical form.
    pub fn contains_axiom(&self, axiom: &A) -> bool {
        self.axiom_to_snippets.contains_key(&axiom.canonical())
    }

    /// Snippets denoting `axiom`, compared in canonical form.
    pub fn axiom_snippets(&self, axiom: &A) -> HashSet<SharedSnippet<S, A>> {
        self.axiom_to_snippets
            .get(&axiom.canonical())
            .cloned()
            .unwrap_or_default()
    }

    /// Every indexed axiom in canonical form.
    pub fn axioms(&self) -> HashSet<A> {
        self.axiom_to_snippets.keys().cloned().collect()
    }

    /// Entities of the entity index, sorted.
    pub fn referenced_entities(&self) -> BTreeSet<A::Entity> {
        self.entity_to_snippets.keys().cloned().collect()
    }

    pub fn entity_snippets(&self, entity: &A::Entity) -> HashSet<SharedSnippet<S, A>> {
        self.entity_to_snippets
            .get(entity)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of snippets mentioning `entity`.
    pub fn snippet_count(&self, entity: &A::Entity) -> usize {
        self.entity_to_snippets.bucket_len(entity)
    }

    /// The snippets mentioning `entity`, ordered for display.
    pub fn index_entry(&self, entity: &A::Entity) -> Option<Vec<SharedSnippet<S, A>>> {
        let mut snippets: Vec<_> = self.entity_to_snippets.get(entity)?.iter().cloned().collect();
        sort_by_rendering(&mut snippets);
        Some(snippets)
    }

    /// The full entity index, sorted by entity.
    pub fn entity_index(&self) -> Vec<EntityIndexEntry<A::Entity, S, A>> {
        let sorted: BTreeMap<&A::Entity, _> = self.entity_to_snippets.iter().collect();
        sorted
            .into_iter()
            .map(|(entity, bucket)| {
                let mut snippets: Vec<_> = bucket.iter().cloned().collect();
                sort_by_rendering(&mut snippets);
                EntityIndexEntry {
                    entity: entity.clone(),
                    snippets,
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Counters
    // -----------------------------------------------------------------------

    /// Number of snippets.
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Snippets without axioms.
    pub fn unparsed_count(&self) -> usize {
        self.unparsed_count
    }

    /// Snippets without sentences.
    pub fn unverbalized_count(&self) -> usize {
        self.unverbalized_count
    }

    /// Snippets containing a rule.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// "Nothing but" sentences.
    pub fn nothingbut_count(&self) -> usize {
        self.nothingbut_count
    }

    // -----------------------------------------------------------------------
    // Answers
    // -----------------------------------------------------------------------

    pub fn set_answer(&mut self, question: &Snippet<S, A>, answer: Answer<A::Entity>) {
        self.answers.set(question.sentences(), answer);
    }

    pub fn answer(&self, question: &Snippet<S, A>) -> Option<&Answer<A::Entity>> {
        self.answers.get(question.sentences())
    }

    pub fn answer_mut(&mut self, question: &Snippet<S, A>) -> Option<&mut Answer<A::Entity>> {
        self.answers.get_mut(question.sentences())
    }
}

impl<S, A, P> fmt::Display for TextIndex<S, A, P>
where
    S: fmt::Display,
    A: Axiom,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, snippet) in self.snippets.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{snippet}")?;
        }
        Ok(())
    }
}
