//! Combined text and lexicon statistics.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::lexicon::morph::{MorphType, WordClass};
use crate::model::{Axiom, LexicalEntity, Sentence, Showing};
use crate::text::TextIndex;

/// A snapshot of document statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub snippets: usize,
    pub sentences: usize,
    pub questions: usize,
    pub swrl_snippets: usize,
    pub non_owl_swrl_snippets: usize,
    pub unverbalized_axioms: usize,
    pub nothing_but_sentences: usize,
    pub content_words: usize,
    pub common_nouns: usize,
    pub transitive_verbs: usize,
    pub proper_names: usize,
    /// Lexicon entities no snippet refers to.
    pub unused_content_words: usize,
    pub wordforms: usize,
    pub wordforms_per_morph: BTreeMap<MorphType, usize>,
    pub ambiguous_wordforms: usize,
    pub wordclass_ambiguous_wordforms: usize,
    pub partial_entries: usize,
}

impl TextMetrics {
    pub fn collect<S, A, P>(text: &TextIndex<S, A, P>, lexicon: &Lexicon<A::Entity>) -> Self
    where
        S: Sentence,
        A: Axiom,
        A::Entity: LexicalEntity,
        P: Showing<A::Entity>,
    {
        let referenced = text.referenced_entities();
        Self {
            snippets: text.len(),
            sentences: text.sentence_count(),
            questions: text.questions().len(),
            swrl_snippets: text.rule_count(),
            non_owl_swrl_snippets: text.unparsed_count(),
            unverbalized_axioms: text.unverbalized_count(),
            nothing_but_sentences: text.nothingbut_count(),
            content_words: lexicon.len(),
            common_nouns: lexicon.word_class_count(WordClass::CommonNoun),
            transitive_verbs: lexicon.word_class_count(WordClass::TransitiveVerb),
            proper_names: lexicon.word_class_count(WordClass::ProperName),
            unused_content_words: lexicon
                .entities()
                .iter()
                .filter(|e| !referenced.contains(*e))
                .count(),
            wordforms: lexicon.wordform_count(),
            wordforms_per_morph: MorphType::ALL
                .into_iter()
                .map(|m| (m, lexicon.morph_count(m)))
                .collect(),
            ambiguous_wordforms: lexicon.ambiguous_wordform_count(),
            wordclass_ambiguous_wordforms: lexicon.wordclass_ambiguous_wordform_count(),
            partial_entries: lexicon.partial_entry_count(),
        }
    }

    /// (label, count) rows in display order.
    pub fn rows(&self) -> Vec<(String, usize)> {
        let mut rows: Vec<(String, usize)> = [
            ("Snippets", self.snippets),
            ("Sentences", self.sentences),
            ("Questions", self.questions),
            ("SWRL snippets", self.swrl_snippets),
            ("Non OWL/SWRL snippets", self.non_owl_swrl_snippets),
            ("Unverbalized axioms", self.unverbalized_axioms),
            ("Sentences with \"nothing but\"", self.nothing_but_sentences),
            ("Content words (CN + TV + PN)", self.content_words),
            ("Common nouns (CN)", self.common_nouns),
            ("Transitive verbs (TV)", self.transitive_verbs),
            ("Proper names (PN)", self.proper_names),
            ("Unused content words", self.unused_content_words),
            ("Wordforms", self.wordforms),
        ]
        .into_iter()
        .map(|(label, n)| (label.to_string(), n))
        .collect();
        rows.extend(
            self.wordforms_per_morph
                .iter()
                .map(|(m, n)| (format!("  {m}"), *n)),
        );
        rows.extend([
            ("Ambiguous wordforms".to_string(), self.ambiguous_wordforms),
            (
                "Ambiguous wordforms in the same wordclass".to_string(),
                self.wordclass_ambiguous_wordforms,
            ),
            ("Incomplete lexicon entries".to_string(), self.partial_entries),
        ]);
        rows
    }
}

impl fmt::Display for TextMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, n) in rows {
            writeln!(f, "{label:<width$}  {n:>6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::{AceSentence, LogicalAxiom, OwlEntity, OwlShowing};
    use crate::snippet::Snippet;

    fn class(name: &str) -> OwlEntity {
        OwlEntity::class(format!("http://example.org#{name}"))
    }

    #[test]
    fn counts_text_and_lexicon() {
        let mut text: TextIndex<AceSentence, LogicalAxiom, OwlShowing> =
            TextIndex::with_showing(OwlShowing::default());
        text.add(Snippet::new(
            "http://example.org",
            vec![AceSentence::from_text("Every dog is an animal.")],
            vec![LogicalAxiom::sub_class_of(class("dog"), class("animal"))],
        ));
        text.add(Snippet::unparsed(
            "http://example.org",
            vec![AceSentence::from_text("Who is a dog?")],
        ));

        let mut lexicon = Lexicon::new();
        lexicon.add_entry(class("dog"), MorphType::CnSg, "dog").unwrap();
        lexicon.add_entry(class("dog"), MorphType::CnPl, "dogs").unwrap();
        lexicon.add_entry(class("cat"), MorphType::CnSg, "cat").unwrap();

        let metrics = TextMetrics::collect(&text, &lexicon);
        assert_eq!(metrics.snippets, 2);
        assert_eq!(metrics.sentences, 2);
        assert_eq!(metrics.questions, 1);
        assert_eq!(metrics.non_owl_swrl_snippets, 1);
        assert_eq!(metrics.content_words, 2);
        assert_eq!(metrics.common_nouns, 2);
        assert_eq!(metrics.unused_content_words, 1);
        assert_eq!(metrics.wordforms, 3);
        assert_eq!(metrics.wordforms_per_morph[&MorphType::CnSg], 2);
        assert_eq!(metrics.partial_entries, 1);

        let table = metrics.to_string();
        assert!(table.lines().any(|l| l.starts_with("Snippets") && l.ends_with(" 2")));
    }

    #[test]
    fn serializes_as_json() {
        let text: TextIndex<AceSentence, LogicalAxiom> = TextIndex::new();
        let lexicon: Lexicon<OwlEntity> = Lexicon::new();
        let json = serde_json::to_value(TextMetrics::collect(&text, &lexicon)).unwrap();
        assert_eq!(json["snippets"], 0);
        assert_eq!(json["wordforms_per_morph"]["CN_sg"], 0);
    }
}
