// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # acetext
//!
//! The text and lexicon model behind a controlled-natural-language
//! ontology editor. A document is a sequence of snippets of Attempto
//! Controlled English, each carrying the logical axioms it was parsed into,
//! together with a lexicon mapping content words to ontology entities.
//!
//! ## Architecture
//!
//! - **Text index** (`text`): snippets with entity, axiom and sentence indices
//!   that report which axioms an edit orphans
//! - **Lexicon** (`lexicon`): word-form ↔ (entity, role) mapping, APE lexicon
//!   export and a radix-tree autocompleter
//! - **Document** (`document`): the session object pairing a text with its
//!   lexicon, driving external parsers and verbalizers
//! - **Data model** (`model`, `owl`): traits for entities, axioms and sentences,
//!   with a concrete OWL-flavoured instantiation
//!
//! ## Library usage
//!
//! ```
//! use acetext::lexicon::Lexicon;
//! use acetext::lexicon::morph::MorphType;
//! use acetext::owl::{AceSentence, LogicalAxiom, OwlEntity};
//! use acetext::snippet::Snippet;
//! use acetext::text::TextIndex;
//!
//! let dog = OwlEntity::class("http://example.org#dog");
//! let animal = OwlEntity::class("http://example.org#animal");
//!
//! let mut lexicon = Lexicon::new();
//! lexicon.add_entry(dog.clone(), MorphType::CnSg, "dog").unwrap();
//! lexicon.add_entry(animal.clone(), MorphType::CnSg, "animal").unwrap();
//! assert_eq!(lexicon.complete("d"), "dog");
//!
//! let mut text: TextIndex<AceSentence, LogicalAxiom> = TextIndex::new();
//! let snippet = Snippet::new(
//!     "http://example.org",
//!     vec![AceSentence::from_text("Every dog is an animal.")],
//!     vec![LogicalAxiom::sub_class_of(dog, animal)],
//! );
//! text.add(snippet.clone());
//! let orphaned = text.remove(&snippet);
//! assert_eq!(orphaned.len(), 1);
//! ```

pub mod answer;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod lexicon;
pub mod metrics;
pub mod model;
pub mod multimap;
pub mod owl;
pub mod snippet;
pub mod text;
