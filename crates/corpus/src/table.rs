use crate::error::{CorpusError, Result};
use crate::types::{Corpus, Document};
use answer_language::Normalizer;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Column holding document text unless configured otherwise
pub const DEFAULT_TEXT_COLUMN: &str = "text";

/// Documents read from a CSV table with a header row
#[derive(Debug, Clone)]
pub struct CorpusTable {
    column: String,
    documents: Vec<Document>,
}

impl CorpusTable {
    /// Read the table at `path`, taking document text from `column`
    pub fn from_path(path: impl AsRef<Path>, column: &str) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => CorpusError::NotFound(path.to_path_buf()),
            _ => CorpusError::IoError(err),
        })?;
        log::debug!("Reading corpus table from {}", path.display());
        Self::from_reader(file, column)
    }

    /// Read a table from any reader
    ///
    /// Rows shorter than the header and empty cells yield empty documents.
    /// A row that cannot be parsed becomes an empty document, and invalid
    /// UTF-8 in a cell is replaced with U+FFFD; both are logged. Only header
    /// and I/O failures abort the load.
    pub fn from_reader<R: Read>(reader: R, column: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let column_idx = csv_reader
            .headers()?
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| CorpusError::missing_column(column))?;

        let mut documents = Vec::new();
        for (id, record) in csv_reader.byte_records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
                Err(err) => {
                    log::warn!("Row {id} could not be parsed ({err}); treating it as empty");
                    documents.push(Document::from_field(id, None));
                    continue;
                }
            };
            let field = record.get(column_idx).map(|bytes| decode_cell(id, bytes));
            if field.is_none() {
                log::warn!("Row {id} has no '{column}' cell; treating it as empty");
            }
            documents.push(Document::from_field(id, field.as_deref()));
        }

        Ok(Self {
            column: column.to_string(),
            documents,
        })
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Segment and normalize every document
    pub fn build_corpus(&self, normalizer: &Normalizer) -> Corpus {
        Corpus::build(&self.documents, normalizer)
    }
}

fn decode_cell(id: usize, bytes: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        log::warn!("Row {id} contains invalid UTF-8; replaced undecodable bytes");
    }
    text
}
