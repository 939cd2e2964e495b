//! # Answer Language
//!
//! Language resources for sentence retrieval: sentence segmentation,
//! lemmatized normal forms and dictionary-based spelling correction.
//!
//! ## Architecture
//!
//! ```text
//! LanguageModel (trait)
//!     │
//!     ├──> segment    → UAX #29 sentence bounds + abbreviation repair
//!     ├──> lemmatize  → irregular table + suffix rules (fixed point)
//!     └──> correct    → SpellDictionary (edit distance, then frequency)
//!
//! Normalizer      = segment + lower-case + tokenize + lemmatize
//! SpellCorrector  = per-token correct, token count preserved
//! ```
//!
//! Both `Normalizer` and `SpellCorrector` take the model as an
//! `Arc<dyn LanguageModel>`, so tests can inject a deterministic stub.
//!
//! ## Example
//!
//! ```rust
//! use answer_language::{Normalizer, SpellCorrector};
//!
//! let normalizer = Normalizer::english();
//! assert_eq!(normalizer.normalize("The cat sat on the mat."), "the cat sit on the mat");
//!
//! let corrector = SpellCorrector::english();
//! assert_eq!(corrector.correct("the cuort").split_whitespace().count(), 2);
//! ```

mod dictionary;
mod error;
mod lemma;
mod model;
mod normalizer;
mod segment;
mod spelling;

pub use dictionary::{SpellDictionary, Suggestion};
pub use error::{LanguageError, Result};
pub use lemma::Lemmatizer;
pub use model::{EnglishModel, LanguageModel, DEFAULT_MAX_EDIT_DISTANCE};
pub use normalizer::{tokenize, Normalizer};
pub use segment::SentenceSegmenter;
pub use spelling::SpellCorrector;
