//! Lexicons in the format the external ACE parser consumes.
//!
//! Each triple becomes one Prolog fact of the APE lexicon, e.g.
//! `noun_sg('dog', 'http://example.org#dog', neutr).`

use std::fmt;

use serde::{Deserialize, Serialize};

use super::morph::MorphType;

/// One parser lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApeEntry {
    pub morph: MorphType,
    pub wordform: String,
    pub lemma: String,
}

impl ApeEntry {
    /// Name of the APE lexicon predicate for this role.
    pub fn predicate(&self) -> &'static str {
        match self.morph {
            MorphType::CnSg => "noun_sg",
            MorphType::CnPl => "noun_pl",
            MorphType::PnSg => "pn_sg",
            MorphType::TvSg => "tv_finsg",
            MorphType::TvPl => "tv_infpl",
            MorphType::TvVbg => "tv_pp",
        }
    }

    /// Nouns and names carry a gender; all entities are neuter.
    fn has_gender(&self) -> bool {
        matches!(self.morph, MorphType::CnSg | MorphType::CnPl | MorphType::PnSg)
    }
}

/// Prolog atom quoting.
fn quote(atom: &str) -> String {
    format!("'{}'", atom.replace('\\', "\\\\").replace('\'', "\\'"))
}

impl fmt::Display for ApeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}",
            self.predicate(),
            quote(&self.wordform),
            quote(&self.lemma)
        )?;
        if self.has_gender() {
            write!(f, ", neutr")?;
        }
        write!(f, ").")
    }
}

/// A set of parser lexicon entries, sorted and duplicate-free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserLexicon {
    entries: Vec<ApeEntry>,
}

impl ParserLexicon {
    pub fn new(entries: impl IntoIterator<Item = ApeEntry>) -> Self {
        let mut entries: Vec<ApeEntry> = entries.into_iter().collect();
        entries.sort();
        entries.dedup();
        Self { entries }
    }

    pub fn entries(&self) -> &[ApeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether some entry carries `wordform`.
    pub fn defines(&self, wordform: &str) -> bool {
        self.entries.iter().any(|e| e.wordform == wordform)
    }
}

impl fmt::Display for ParserLexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
