//! Per-entity lexicon entries.

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, LexiconResult};

use super::morph::{FieldType, MorphType, WordClass};

/// The word-forms of one entity, one slot per field of its word class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub sg: Option<String>,
    pub pl: Option<String>,
    pub vbg: Option<String>,
}

/// A lexicon entry: a word class plus the populated fields legal for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    word_class: WordClass,
    fields: EntryFields,
}

impl LexiconEntry {
    pub fn new(word_class: WordClass) -> Self {
        Self {
            word_class,
            fields: EntryFields::default(),
        }
    }

    pub fn word_class(&self) -> WordClass {
        self.word_class
    }

    fn check(&self, field: FieldType) -> LexiconResult<MorphType> {
        MorphType::from_parts(self.word_class, field).ok_or(LexiconError::IllegalRole {
            word_class: self.word_class,
            // Report the nearest role of the requested field.
            morph: match field {
                FieldType::Sg => MorphType::CnSg,
                FieldType::Pl => MorphType::CnPl,
                FieldType::Vbg => MorphType::TvVbg,
            },
        })
    }

    pub fn get(&self, field: FieldType) -> LexiconResult<Option<&str>> {
        self.check(field)?;
        let value = match field {
            FieldType::Sg => &self.fields.sg,
            FieldType::Pl => &self.fields.pl,
            FieldType::Vbg => &self.fields.vbg,
        };
        Ok(value.as_deref())
    }

    pub fn set(&mut self, field: FieldType, value: Option<String>) -> LexiconResult<()> {
        self.check(field)?;
        let slot = match field {
            FieldType::Sg => &mut self.fields.sg,
            FieldType::Pl => &mut self.fields.pl,
            FieldType::Vbg => &mut self.fields.vbg,
        };
        *slot = value;
        Ok(())
    }

    /// No field is populated.
    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }

    /// Some field legal for the word class is missing.
    pub fn is_partial(&self) -> bool {
        self.word_class
            .fields()
            .iter()
            .any(|&f| matches!(self.get(f), Ok(None)))
    }

    /// Populated (field, word-form) pairs in field order.
    pub fn populated(&self) -> impl Iterator<Item = (FieldType, &str)> {
        self.word_class
            .fields()
            .iter()
            .filter_map(|&f| self.get(f).ok().flatten().map(|v| (f, v)))
    }

    /// The field holding `wordform`, if any.
    pub fn field_of(&self, wordform: &str) -> Option<FieldType> {
        self.populated().find(|(_, v)| *v == wordform).map(|(f, _)| f)
    }

    /// Semicolon-separated word-forms in AceWiki order. Proper names repeat
    /// their single form in all four AceWiki slots.
    pub fn ace_wiki_format(&self) -> String {
        let show = |v: &Option<String>| v.clone().unwrap_or_default();
        match self.word_class {
            WordClass::CommonNoun => format!("{};{};", show(&self.fields.sg), show(&self.fields.pl)),
            WordClass::TransitiveVerb => format!(
                "{};{};{};",
                show(&self.fields.sg),
                show(&self.fields.pl),
                show(&self.fields.vbg)
            ),
            WordClass::ProperName => {
                let sg = show(&self.fields.sg);
                format!("{sg};{sg};{sg};{sg};")
            }
        }
    }
}
