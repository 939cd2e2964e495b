//! # Answer Search
//!
//! Resolves free-text questions to corpus sentences.
//!
//! ```text
//! query ──> canned reply? ──yes──> Answer::Canned
//!             │ no
//!             ▼
//!           corpus loaded? ──no──> Answer::Unavailable
//!             │ yes
//!             ▼
//!           spell-correct ──> normalize
//!             │
//!             ▼
//!           tiers by MatchMode (first non-empty wins)
//!             ├── lexical:      exact
//!             ├── fuzzy_vector: fuzzy (>= 90) → tf-idf cosine (> 0.15)
//!             └── tiered:       exact → fuzzy → tf-idf cosine
//! ```
//!
//! ## Example
//!
//! ```rust
//! use answer_corpus::{Corpus, Document};
//! use answer_search::{PipelineConfig, QueryPipeline};
//!
//! let pipeline = QueryPipeline::english(PipelineConfig::default());
//! let documents = vec![Document::new(0, "Court fees are paid online.")];
//! let corpus = Corpus::build(&documents, pipeline.normalizer());
//!
//! let answer = pipeline.answer("court fee", Ok(&corpus)).unwrap();
//! assert_eq!(answer.text(), "Court fees are paid online.");
//! ```

mod canned;
mod config;
mod error;
mod exact;
mod fuzzy;
mod pipeline;
mod source;
mod tfidf;
mod types;
mod vector;

pub use canned::{canonicalize, CannedResponses};
pub use config::{MatchMode, PipelineConfig, SpellingConfig, VectorText};
pub use error::{Result, SearchError};
pub use exact::{ExactMatcher, EXACT_SCORE};
pub use fuzzy::{partial_ratio, FuzzyMatcher, DEFAULT_FUZZY_THRESHOLD};
pub use pipeline::{Answer, MatchedSentence, QueryPipeline, NO_RESULTS};
pub use source::CorpusSource;
pub use tfidf::{cosine_similarity, TfidfSpace};
pub use types::{MatchTier, SentenceMatch};
pub use vector::{VectorMatcher, DEFAULT_VECTOR_THRESHOLD};
