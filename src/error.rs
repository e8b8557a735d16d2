//! Rich diagnostic error types for acetext.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Lookups on absent keys and duplicate
//! additions are not errors: they surface as `Option`, `bool` or empty sets.

use miette::Diagnostic;
use thiserror::Error;

use crate::lexicon::morph::{MorphType, WordClass};

/// Top-level error type.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum AceError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Lexicon errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LexiconError {
    #[error("morphological role {morph} is not legal for a {word_class}")]
    #[diagnostic(
        code(acetext::lexicon::illegal_role),
        help(
            "Each word class supports a fixed set of roles: common nouns take \
             CN_sg and CN_pl, transitive verbs take TV_sg, TV_pl and TV_vbg, \
             proper names take only PN_sg. Pick a role matching the entity's word class."
        )
    )]
    IllegalRole { word_class: WordClass, morph: MorphType },

    #[error("entity {entity} has no word class and cannot carry word-forms")]
    #[diagnostic(
        code(acetext::lexicon::not_lexical),
        help(
            "Only classes, properties and named individuals are content words. \
             Datatypes, annotation properties and built-ins have no lexicon entry."
        )
    )]
    NotLexical { entity: String },
}

// ---------------------------------------------------------------------------
// Text errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum TextError {
    #[error("snippet position {index} is out of bounds for a text of {len} snippets")]
    #[diagnostic(
        code(acetext::text::index_out_of_bounds),
        help("Insert positions range from 0 to the current number of snippets, inclusive.")
    )]
    IndexOutOfBounds { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(acetext::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(acetext::config::parse),
        help("Check the TOML syntax. Unknown keys are rejected; omitted keys take their defaults.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(acetext::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {message}")]
    #[diagnostic(code(acetext::config::serialize))]
    Serialize { message: String },
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to read document: {path}")]
    #[diagnostic(
        code(acetext::export::read),
        help("Ensure the document file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document: {path}: {message}")]
    #[diagnostic(
        code(acetext::export::parse),
        help(
            "A document is a JSON object with a \"lexicon\" array of \
             {{entity, morph, wordform}} triples and a \"snippets\" array of \
             {{sentences, axioms}} objects."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to write document: {path}")]
    #[diagnostic(
        code(acetext::export::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {message}")]
    #[diagnostic(code(acetext::export::serialize))]
    Serialize { message: String },
}

/// Convenience result type for acetext operations.
pub type AceResult<T> = std::result::Result<T, AceError>;

/// Result type for lexicon operations.
pub type LexiconResult<T> = std::result::Result<T, LexiconError>;

/// Result type for text index operations.
pub type TextResult<T> = std::result::Result<T, TextError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for document import and export.
pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_error_converts_to_top_level() {
        let err: AceError = LexiconError::IllegalRole {
            word_class: WordClass::ProperName,
            morph: MorphType::CnPl,
        }
        .into();
        assert!(matches!(err, AceError::Lexicon(_)));
        assert_eq!(
            err.to_string(),
            "morphological role CN_pl is not legal for a proper name"
        );
    }

    #[test]
    fn diagnostic_codes_are_namespaced() {
        let err = TextError::IndexOutOfBounds { index: 5, len: 2 };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("acetext::text::index_out_of_bounds"));
    }
}
