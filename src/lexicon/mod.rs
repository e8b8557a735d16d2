//! The lexicon: word-forms mapped to (entity, morphological role) pairs.
//!
//! Every registered word-form is also registered with an [`Autocompleter`];
//! a word-form is in the autocompleter iff at least one triple carries it.

pub mod autocomplete;
pub mod entry;
pub mod format;
pub mod morph;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, LexiconResult};
use crate::model::LexicalEntity;
use crate::multimap::MultiMap;

use self::autocomplete::Autocompleter;
use self::entry::LexiconEntry;
use self::format::{ApeEntry, ParserLexicon};
use self::morph::{MorphType, WordClass};

/// One lexicon fact: `entity` has `wordform` in role `morph`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple<E> {
    pub entity: E,
    pub morph: MorphType,
    pub wordform: String,
}

impl<E: LexicalEntity> Triple<E> {
    /// The parser lexicon entry for this fact.
    pub fn ape_entry(&self) -> ApeEntry {
        ApeEntry {
            morph: self.morph,
            wordform: self.wordform.clone(),
            lemma: self.entity.lemma(),
        }
    }
}

/// Word-form ↔ (entity, role) mapping with ambiguity accounting.
#[derive(Debug, Clone)]
pub struct Lexicon<E: LexicalEntity> {
    wordform_to_triples: MultiMap<String, Triple<E>>,
    entity_to_triples: MultiMap<E, Triple<E>>,
    /// Triples per role, indexed by [`MorphType::slot`].
    morph_counts: [usize; 6],
    /// Word-forms carried by at least two triples.
    ambiguous_wordform_count: usize,
    autocompleter: Autocompleter,
}

impl<E: LexicalEntity> Default for Lexicon<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: LexicalEntity> Lexicon<E> {
    pub fn new() -> Self {
        Self {
            wordform_to_triples: MultiMap::new(),
            entity_to_triples: MultiMap::new(),
            morph_counts: [0; 6],
            ambiguous_wordform_count: 0,
            autocompleter: Autocompleter::new(),
        }
    }

    fn check_role(entity: &E, morph: MorphType) -> LexiconResult<()> {
        let word_class = entity.word_class().ok_or_else(|| LexiconError::NotLexical {
            entity: entity.lemma(),
        })?;
        if morph.word_class() != word_class {
            return Err(LexiconError::IllegalRole { word_class, morph });
        }
        Ok(())
    }

    /// Set the word-form of `entity` in role `morph`.
    ///
    /// Replaces a different word-form previously stored for the same
    /// (entity, role); re-adding the same one is a no-op. Fails without
    /// modifying the lexicon if the role is illegal for the entity.
    pub fn add_entry(
        &mut self,
        entity: E,
        morph: MorphType,
        wordform: impl Into<String>,
    ) -> LexiconResult<()> {
        Self::check_role(&entity, morph)?;
        let wordform = wordform.into();

        if let Some(old) = self.wordform(&entity, morph) {
            if old == wordform {
                return Ok(());
            }
            let old = old.to_string();
            self.detach(&entity, morph, &old);
        }

        let triple = Triple {
            entity: entity.clone(),
            morph,
            wordform: wordform.clone(),
        };
        self.entity_to_triples.insert(entity, triple.clone());
        self.wordform_to_triples.insert(wordform.clone(), triple);
        self.morph_counts[morph.slot()] += 1;
        if self.wordform_to_triples.bucket_len(wordform.as_str()) == 2 {
            self.ambiguous_wordform_count += 1;
        }
        self.autocompleter.add(&wordform);

        tracing::info!(wordform = %wordform, morph = %morph, "lexicon entry added");
        Ok(())
    }

    /// Remove the word-form of `entity` in role `morph`, returning it.
    /// Returns `Ok(None)` if the entity has no word-form in that role.
    pub fn remove_entry(&mut self, entity: &E, morph: MorphType) -> LexiconResult<Option<String>> {
        Self::check_role(entity, morph)?;
        let Some(wordform) = self.wordform(entity, morph).map(str::to_string) else {
            return Ok(None);
        };
        self.detach(entity, morph, &wordform);
        tracing::info!(wordform = %wordform, morph = %morph, "lexicon entry removed");
        Ok(Some(wordform))
    }

    /// Remove every word-form of `entity`. Returns the removed triples.
    pub fn remove_entity(&mut self, entity: &E) -> Vec<Triple<E>> {
        let mut triples: Vec<Triple<E>> = self
            .entity_to_triples
            .get(entity)
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default();
        triples.sort();
        for t in &triples {
            self.detach(&t.entity, t.morph, &t.wordform);
        }
        triples
    }

    fn detach(&mut self, entity: &E, morph: MorphType, wordform: &str) {
        let triple = Triple {
            entity: entity.clone(),
            morph,
            wordform: wordform.to_string(),
        };
        self.entity_to_triples.remove(entity, &triple);
        if !self.wordform_to_triples.remove(wordform, &triple) {
            return;
        }
        self.morph_counts[morph.slot()] -= 1;
        match self.wordform_to_triples.bucket_len(wordform) {
            0 => {
                self.autocompleter.remove(wordform);
                tracing::debug!(wordform, "no triples remaining, dropped from completion");
            }
            1 => self.ambiguous_wordform_count -= 1,
            _ => {}
        }
    }

    pub fn contains_wordform(&self, wordform: &str) -> bool {
        self.wordform_to_triples.contains_key(wordform)
    }

    /// Every entity carrying `wordform` in some role.
    pub fn wordform_entities(&self, wordform: &str) -> BTreeSet<E> {
        self.wordform_to_triples
            .get(wordform)
            .map(|bucket| bucket.iter().map(|t| t.entity.clone()).collect())
            .unwrap_or_default()
    }

    /// One entity carrying `wordform`. With several candidates the smallest
    /// in entity order is returned.
    pub fn wordform_entity(&self, wordform: &str) -> Option<E> {
        self.wordform_to_triples
            .get(wordform)?
            .iter()
            .map(|t| &t.entity)
            .min()
            .cloned()
    }

    /// The triples carrying `wordform`, sorted.
    pub fn wordform_entries(&self, wordform: &str) -> Vec<Triple<E>> {
        let mut triples: Vec<Triple<E>> = self
            .wordform_to_triples
            .get(wordform)
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default();
        triples.sort();
        triples
    }

    /// The word-form of `entity` in role `morph`.
    pub fn wordform(&self, entity: &E, morph: MorphType) -> Option<&str> {
        self.entity_to_triples
            .get(entity)?
            .iter()
            .find(|t| t.morph == morph)
            .map(|t| t.wordform.as_str())
    }

    /// The per-entity record of populated fields, or `None` if the entity has
    /// no word class.
    pub fn entry(&self, entity: &E) -> Option<LexiconEntry> {
        let mut entry = LexiconEntry::new(entity.word_class()?);
        for t in self.entity_to_triples.get(entity).into_iter().flatten() {
            // Triples are only stored for legal roles.
            let _ = entry.set(t.morph.field_type(), Some(t.wordform.clone()));
        }
        Some(entry)
    }

    /// Entities with at least one word-form.
    pub fn entities(&self) -> BTreeSet<E> {
        self.entity_to_triples.keys().cloned().collect()
    }

    /// All triples, sorted.
    pub fn triples(&self) -> Vec<Triple<E>> {
        let mut triples: Vec<Triple<E>> = self
            .entity_to_triples
            .iter()
            .flat_map(|(_, bucket)| bucket.iter().cloned())
            .collect();
        triples.sort();
        triples
    }

    /// Number of distinct entities with at least one word-form.
    pub fn len(&self) -> usize {
        self.entity_to_triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_to_triples.is_empty()
    }

    /// Number of distinct word-forms.
    pub fn wordform_count(&self) -> usize {
        self.wordform_to_triples.len()
    }

    pub fn triple_count(&self) -> usize {
        self.wordform_to_triples.value_count()
    }

    /// Number of triples in role `morph`.
    pub fn morph_count(&self, morph: MorphType) -> usize {
        self.morph_counts[morph.slot()]
    }

    /// Number of entities of `word_class` with at least one word-form.
    pub fn word_class_count(&self, word_class: WordClass) -> usize {
        self.entity_to_triples
            .keys()
            .filter(|e| e.word_class() == Some(word_class))
            .count()
    }

    /// Number of entities missing a word-form for some field of their class.
    pub fn partial_entry_count(&self) -> usize {
        self.entity_to_triples
            .keys()
            .filter_map(|e| self.entry(e))
            .filter(LexiconEntry::is_partial)
            .count()
    }

    /// Number of word-forms carried by two or more triples.
    pub fn ambiguous_wordform_count(&self) -> usize {
        self.ambiguous_wordform_count
    }

    /// The word-forms carried by two or more triples, sorted.
    pub fn ambiguous_wordforms(&self) -> Vec<String> {
        let mut forms: Vec<String> = self
            .wordform_to_triples
            .iter()
            .filter(|(_, bucket)| bucket.len() > 1)
            .map(|(w, _)| w.clone())
            .collect();
        forms.sort();
        forms
    }

    /// Number of word-forms shared by two or more entities of the same word
    /// class. Such sharing is almost always a modelling error, unlike the
    /// noun/verb sharing of e.g. "leaves".
    pub fn wordclass_ambiguous_wordform_count(&self) -> usize {
        self.wordform_to_triples
            .iter()
            .filter(|(_, bucket)| bucket.len() > 1)
            .filter(|(_, bucket)| {
                WordClass::ALL.iter().any(|&class| {
                    bucket
                        .iter()
                        .filter(|t| t.morph.word_class() == class)
                        .map(|t| &t.entity)
                        .collect::<BTreeSet<_>>()
                        .len()
                        > 1
                })
            })
            .count()
    }

    /// Parser lexicon restricted to the given word-forms. Unknown word-forms
    /// are skipped.
    pub fn create_lexicon_for<'a>(&self, wordforms: impl IntoIterator<Item = &'a str>) -> ParserLexicon {
        ParserLexicon::new(
            wordforms
                .into_iter()
                .filter_map(|w| self.wordform_to_triples.get(w))
                .flatten()
                .map(Triple::ape_entry),
        )
    }

    /// Parser lexicon of every triple.
    pub fn create_lexicon(&self) -> ParserLexicon {
        ParserLexicon::new(
            self.wordform_to_triples
                .iter()
                .flat_map(|(_, bucket)| bucket.iter().map(Triple::ape_entry)),
        )
    }

    /// The whole lexicon as APE Prolog facts.
    pub fn to_ace_lexicon_format(&self) -> String {
        self.create_lexicon().to_string()
    }

    pub fn autocompleter(&self) -> &Autocompleter {
        &self.autocompleter
    }

    /// Longest unambiguous extension of `prefix` among registered word-forms.
    pub fn complete(&self, prefix: &str) -> String {
        self.autocompleter.complete(prefix)
    }

    /// Registered word-forms starting with `prefix`; see [`Autocompleter::candidates`].
    pub fn candidates(&self, prefix: &str, limit: i32) -> Vec<String> {
        self.autocompleter.candidates(prefix, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::OwlEntity;

    fn class(name: &str) -> OwlEntity {
        OwlEntity::class(format!("http://example.org#{name}"))
    }

    fn person(name: &str) -> OwlEntity {
        OwlEntity::individual(format!("http://example.org#{name}"))
    }

    #[test]
    fn proper_name_plural_is_rejected() {
        let mut lex = Lexicon::new();
        let err = lex.add_entry(person("John"), MorphType::CnPl, "Johns").unwrap_err();
        assert!(matches!(
            err,
            LexiconError::IllegalRole {
                word_class: WordClass::ProperName,
                morph: MorphType::CnPl
            }
        ));
        assert!(lex.is_empty());
        assert!(!lex.contains_wordform("Johns"));
        assert!(lex.remove_entry(&person("John"), MorphType::TvSg).is_err());
    }

    #[test]
    fn datatypes_are_not_lexical() {
        let mut lex = Lexicon::new();
        let dt = OwlEntity::new(
            crate::owl::EntityKind::Datatype,
            "http://www.w3.org/2001/XMLSchema#int",
        );
        assert!(matches!(
            lex.add_entry(dt, MorphType::CnSg, "int"),
            Err(LexiconError::NotLexical { .. })
        ));
    }

    #[test]
    fn one_entity_two_roles() {
        let mut lex = Lexicon::new();
        lex.add_entry(class("dog"), MorphType::CnSg, "dog").unwrap();
        lex.add_entry(class("dog"), MorphType::CnPl, "dogs").unwrap();
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.wordform_count(), 2);
        assert_eq!(lex.morph_count(MorphType::CnSg), 1);
        assert_eq!(lex.morph_count(MorphType::CnPl), 1);
        assert_eq!(lex.word_class_count(WordClass::CommonNoun), 1);
        let entry = lex.entry(&class("dog")).unwrap();
        assert!(!entry.is_partial());
        assert_eq!(lex.partial_entry_count(), 0);
        assert_eq!(lex.wordform(&class("dog"), MorphType::CnPl), Some("dogs"));
    }

    #[test]
    fn ambiguity_round_trip() {
        let mut lex = Lexicon::new();
        lex.add_entry(class("dogA"), MorphType::CnSg, "dog").unwrap();
        assert_eq!(lex.ambiguous_wordform_count(), 0);
        lex.add_entry(class("dogB"), MorphType::CnSg, "dog").unwrap();
        assert_eq!(lex.ambiguous_wordform_count(), 1);
        assert_eq!(lex.wordclass_ambiguous_wordform_count(), 1);
        assert_eq!(lex.ambiguous_wordforms(), vec!["dog".to_string()]);
        assert_eq!(lex.wordform_entity("dog"), Some(class("dogA")));

        lex.remove_entry(&class("dogA"), MorphType::CnSg).unwrap();
        assert_eq!(lex.ambiguous_wordform_count(), 0);
        assert_eq!(lex.wordclass_ambiguous_wordform_count(), 0);
        assert!(lex.contains_wordform("dog"));
    }

    #[test]
    fn cross_class_sharing_is_not_wordclass_ambiguous() {
        let mut lex = Lexicon::new();
        lex.add_entry(class("leaf"), MorphType::CnPl, "leaves").unwrap();
        lex.add_entry(OwlEntity::object_property("http://example.org#leave"), MorphType::TvSg, "leaves")
            .unwrap();
        assert_eq!(lex.ambiguous_wordform_count(), 1);
        assert_eq!(lex.wordclass_ambiguous_wordform_count(), 0);
        assert_eq!(lex.wordform_entities("leaves").len(), 2);
    }

    #[test]
    fn replacing_a_wordform_updates_completion() {
        let mut lex = Lexicon::new();
        lex.add_entry(class("cat"), MorphType::CnSg, "kat").unwrap();
        lex.add_entry(class("cat"), MorphType::CnSg, "cat").unwrap();
        lex.add_entry(class("cat"), MorphType::CnSg, "cat").unwrap();
        assert_eq!(lex.morph_count(MorphType::CnSg), 1);
        assert!(!lex.contains_wordform("kat"));
        assert!(!lex.autocompleter().contains("kat"));
        assert_eq!(lex.complete("c"), "cat");
    }

    #[test]
    fn last_triple_removal_drops_completion() {
        let mut lex = Lexicon::new();
        lex.add_entry(class("leaf"), MorphType::CnSg, "leaf").unwrap();
        lex.add_entry(class("leaf"), MorphType::CnPl, "leaves").unwrap();
        assert_eq!(lex.complete("lea"), "lea");
        assert_eq!(
            lex.remove_entry(&class("leaf"), MorphType::CnPl).unwrap(),
            Some("leaves".to_string())
        );
        assert_eq!(lex.complete("lea"), "leaf");
        assert_eq!(lex.remove_entry(&class("leaf"), MorphType::CnPl).unwrap(), None);
        assert_eq!(lex.partial_entry_count(), 1);
    }

    #[test]
    fn remove_entity_clears_every_role() {
        let mut lex = Lexicon::new();
        let like = OwlEntity::object_property("http://example.org#like");
        lex.add_entry(like.clone(), MorphType::TvSg, "likes").unwrap();
        lex.add_entry(like.clone(), MorphType::TvPl, "like").unwrap();
        lex.add_entry(like.clone(), MorphType::TvVbg, "liked").unwrap();
        assert_eq!(lex.remove_entity(&like).len(), 3);
        assert!(lex.is_empty());
        assert_eq!(lex.wordform_count(), 0);
        assert!(lex.autocompleter().is_empty());
    }

    #[test]
    fn parser_lexicon_subset() {
        let mut lex = Lexicon::new();
        lex.add_entry(class("dog"), MorphType::CnSg, "dog").unwrap();
        lex.add_entry(person("John"), MorphType::PnSg, "John").unwrap();
        let subset = lex.create_lexicon_for(["John", "unknown"]);
        assert_eq!(subset.len(), 1);
        assert_eq!(
            subset.to_string(),
            "pn_sg('John', 'http://example.org#John', neutr).\n"
        );
        assert_eq!(lex.create_lexicon().len(), 2);
        assert!(lex.to_ace_lexicon_format().contains("noun_sg('dog'"));
    }
}
