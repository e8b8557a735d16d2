//! Word classes, entry fields and the morphological roles built from them.
//!
//! A [`MorphType`] is the pair of a [`WordClass`] and a [`FieldType`] that the
//! lexicon actually stores. Only six combinations are legal; the enum makes
//! the illegal ones unrepresentable and every `match` over it exhaustive.

use serde::{Deserialize, Serialize};

/// Namespace of the ACE lexicon annotation properties.
pub const ACE_LEXICON_NS: &str = "http://attempto.ifi.uzh.ch/ace_lexicon#";

/// Morphological category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WordClass {
    /// Common noun (named classes).
    CommonNoun,
    /// Transitive verb (object and data properties).
    TransitiveVerb,
    /// Proper name (named individuals).
    ProperName,
}

impl WordClass {
    pub const ALL: [WordClass; 3] = [
        WordClass::CommonNoun,
        WordClass::TransitiveVerb,
        WordClass::ProperName,
    ];

    /// Column label used in lexicon tables.
    pub fn name(self) -> &'static str {
        match self {
            WordClass::CommonNoun => "Noun",
            WordClass::TransitiveVerb => "Verb",
            WordClass::ProperName => "Name",
        }
    }

    /// One-letter abbreviation.
    pub fn abbr(self) -> &'static str {
        match self {
            WordClass::CommonNoun => "N",
            WordClass::TransitiveVerb => "V",
            WordClass::ProperName => "P",
        }
    }

    /// Word type name in the AceWiki export format.
    pub fn ace_wiki_type(self) -> &'static str {
        match self {
            WordClass::CommonNoun => "noun",
            WordClass::TransitiveVerb => "trverb",
            WordClass::ProperName => "propername",
        }
    }

    /// The fields an entry of this class may populate.
    pub fn fields(self) -> &'static [FieldType] {
        match self {
            WordClass::CommonNoun => &[FieldType::Sg, FieldType::Pl],
            WordClass::TransitiveVerb => &[FieldType::Sg, FieldType::Pl, FieldType::Vbg],
            WordClass::ProperName => &[FieldType::Sg],
        }
    }
}

impl std::fmt::Display for WordClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordClass::CommonNoun => write!(f, "common noun"),
            WordClass::TransitiveVerb => write!(f, "transitive verb"),
            WordClass::ProperName => write!(f, "proper name"),
        }
    }
}

/// A field of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
    /// Singular (nouns, names) or 3rd person singular (verbs).
    Sg,
    /// Plural (nouns) or infinitive/plural (verbs).
    Pl,
    /// Past participle (verbs only).
    Vbg,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Sg => "Singular",
            FieldType::Pl => "Plural",
            FieldType::Vbg => "P. participle",
        }
    }
}

/// A legal (word class, field) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MorphType {
    #[serde(rename = "CN_sg")]
    CnSg,
    #[serde(rename = "CN_pl")]
    CnPl,
    #[serde(rename = "PN_sg")]
    PnSg,
    #[serde(rename = "TV_sg")]
    TvSg,
    #[serde(rename = "TV_pl")]
    TvPl,
    #[serde(rename = "TV_vbg")]
    TvVbg,
}

impl MorphType {
    pub const ALL: [MorphType; 6] = [
        MorphType::CnSg,
        MorphType::CnPl,
        MorphType::PnSg,
        MorphType::TvSg,
        MorphType::TvPl,
        MorphType::TvVbg,
    ];

    pub fn word_class(self) -> WordClass {
        match self {
            MorphType::CnSg | MorphType::CnPl => WordClass::CommonNoun,
            MorphType::PnSg => WordClass::ProperName,
            MorphType::TvSg | MorphType::TvPl | MorphType::TvVbg => WordClass::TransitiveVerb,
        }
    }

    pub fn field_type(self) -> FieldType {
        match self {
            MorphType::CnSg | MorphType::PnSg | MorphType::TvSg => FieldType::Sg,
            MorphType::CnPl | MorphType::TvPl => FieldType::Pl,
            MorphType::TvVbg => FieldType::Vbg,
        }
    }

    /// Combine a word class and a field, if the combination is legal.
    pub fn from_parts(word_class: WordClass, field: FieldType) -> Option<Self> {
        match (word_class, field) {
            (WordClass::CommonNoun, FieldType::Sg) => Some(MorphType::CnSg),
            (WordClass::CommonNoun, FieldType::Pl) => Some(MorphType::CnPl),
            (WordClass::ProperName, FieldType::Sg) => Some(MorphType::PnSg),
            (WordClass::TransitiveVerb, FieldType::Sg) => Some(MorphType::TvSg),
            (WordClass::TransitiveVerb, FieldType::Pl) => Some(MorphType::TvPl),
            (WordClass::TransitiveVerb, FieldType::Vbg) => Some(MorphType::TvVbg),
            _ => None,
        }
    }

    /// Short tag, e.g. `CN_sg`.
    pub fn tag(self) -> &'static str {
        match self {
            MorphType::CnSg => "CN_sg",
            MorphType::CnPl => "CN_pl",
            MorphType::PnSg => "PN_sg",
            MorphType::TvSg => "TV_sg",
            MorphType::TvPl => "TV_pl",
            MorphType::TvVbg => "TV_vbg",
        }
    }

    /// IRI of the annotation property carrying this role.
    pub fn iri(self) -> String {
        format!("{ACE_LEXICON_NS}{}", self.tag())
    }

    /// Parse an annotation property IRI back into a role.
    pub fn from_iri(iri: &str) -> Option<Self> {
        let tag = iri.strip_prefix(ACE_LEXICON_NS)?;
        Self::ALL.into_iter().find(|m| m.tag() == tag)
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            MorphType::CnSg => 0,
            MorphType::CnPl => 1,
            MorphType::PnSg => 2,
            MorphType::TvSg => 3,
            MorphType::TvPl => 4,
            MorphType::TvVbg => 5,
        }
    }
}

impl std::fmt::Display for MorphType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_round_trip_for_every_morph() {
        for morph in MorphType::ALL {
            assert_eq!(
                MorphType::from_parts(morph.word_class(), morph.field_type()),
                Some(morph)
            );
        }
    }

    #[test]
    fn proper_names_have_no_plural() {
        assert_eq!(MorphType::from_parts(WordClass::ProperName, FieldType::Pl), None);
        assert_eq!(MorphType::from_parts(WordClass::CommonNoun, FieldType::Vbg), None);
        assert_eq!(WordClass::ProperName.fields(), &[FieldType::Sg]);
    }

    #[test]
    fn iri_lookup() {
        let iri = MorphType::TvVbg.iri();
        assert_eq!(iri, "http://attempto.ifi.uzh.ch/ace_lexicon#TV_vbg");
        assert_eq!(MorphType::from_iri(&iri), Some(MorphType::TvVbg));
        assert_eq!(MorphType::from_iri("http://example.org#CN_sg"), None);
    }

    #[test]
    fn slots_are_distinct() {
        let mut seen = [false; 6];
        for morph in MorphType::ALL {
            assert!(!seen[morph.slot()]);
            seen[morph.slot()] = true;
        }
    }
}
