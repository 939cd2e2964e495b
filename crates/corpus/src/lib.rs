//! # Answer Corpus
//!
//! Loads a table of short documents and turns it into an ordered sequence
//! of sentences, each carrying its original text, its normalized form and
//! the id of the document it came from.
//!
//! ```text
//! CSV (header row, `text` column)
//!     │
//!     ├──> CorpusTable   → Document { id, raw_text }
//!     │
//!     └──> Corpus::build → Sentence { raw, normalized, document_id }
//! ```

mod error;
mod table;
mod types;

pub use error::{CorpusError, Result};
pub use table::{CorpusTable, DEFAULT_TEXT_COLUMN};
pub use types::{Corpus, Document, Sentence};
