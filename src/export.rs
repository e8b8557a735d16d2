//! JSON document files.
//!
//! A document file carries the lexicon as a flat list of triples and the
//! text as a list of snippets, each with its sentences and axioms:
//!
//! ```json
//! {
//!   "lexicon": [ { "entity": { "kind": "Class", "iri": "http://example.org#dog" },
//!                  "morph": "CN_sg", "wordform": "dog" } ],
//!   "snippets": [ { "sentences": ["Every dog is an animal."],
//!                   "axioms": [ { "kind": "SubClassOf", "terms": [ ... ] } ] } ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AceConfig;
use crate::document::Document;
use crate::error::{AceResult, ExportError, ExportResult};
use crate::lexicon::Triple;
use crate::owl::{AceSentence, LogicalAxiom, OwlEntity, OwlShowing};
use crate::snippet::Snippet;

/// The concrete document the CLI reads.
pub type OwlDocument = Document<AceSentence, LogicalAxiom, OwlShowing>;

/// One snippet as stored in a document file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetExport {
    #[serde(default)]
    pub sentences: Vec<AceSentence>,
    #[serde(default)]
    pub axioms: Vec<LogicalAxiom>,
    /// Fallback rendering for snippets without sentences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_rendering: Option<String>,
}

/// Serialized form of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    #[serde(default)]
    pub lexicon: Vec<Triple<OwlEntity>>,
    #[serde(default)]
    pub snippets: Vec<SnippetExport>,
}

impl DocumentFile {
    pub fn from_json(content: &str) -> ExportResult<Self> {
        serde_json::from_str(content).map_err(|e| ExportError::Parse {
            path: "<string>".into(),
            message: e.to_string(),
        })
    }

    pub fn to_json_string(&self) -> ExportResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialize {
            message: e.to_string(),
        })
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> ExportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ExportError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> ExportResult<()> {
        let content = self.to_json_string()?;
        std::fs::write(path, content).map_err(|e| ExportError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Capture the lexicon and snippets of `document`, in text order.
    pub fn from_document(document: &OwlDocument) -> Self {
        Self {
            lexicon: document.lexicon().triples(),
            snippets: document
                .text()
                .snippets()
                .iter()
                .map(|snippet| SnippetExport {
                    sentences: snippet.sentences().to_vec(),
                    axioms: snippet.axioms().to_vec(),
                    alt_rendering: snippet.alt_rendering().map(str::to_string),
                })
                .collect(),
        }
    }

    /// Build a document: lexicon entries first, then snippets in file order.
    ///
    /// Snippets are stamped with the configured namespace. A snippet whose
    /// sentences repeat an earlier one is skipped.
    pub fn into_document(self, config: AceConfig) -> AceResult<OwlDocument> {
        let mut document = OwlDocument::from_config(config);
        for triple in self.lexicon {
            document
                .lexicon_mut()
                .add_entry(triple.entity, triple.morph, triple.wordform)?;
        }
        let namespace = document.config().namespace.clone();
        for exported in self.snippets {
            let mut snippet = Snippet::new(namespace.as_str(), exported.sentences, exported.axioms);
            if let Some(rendering) = exported.alt_rendering {
                snippet = snippet.with_alt_rendering(rendering);
            }
            document.add_snippet(snippet);
        }
        tracing::info!(
            snippets = document.text().len(),
            content_words = document.lexicon().len(),
            "document loaded"
        );
        Ok(document)
    }
}
