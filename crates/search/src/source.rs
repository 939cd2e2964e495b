use answer_corpus::{Corpus, CorpusError, CorpusTable};
use answer_language::Normalizer;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File identity used to notice on-disk changes
///
/// The content digest catches rewrites that keep the size and land within
/// the filesystem's mtime granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
    digest: [u8; 32],
}

impl FileStamp {
    fn read(path: &Path) -> Option<Self> {
        let meta = std::fs::metadata(path).ok()?;
        let bytes = std::fs::read(path).ok()?;
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(&bytes));
        Some(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
            digest,
        })
    }
}

/// A corpus table on disk, loaded lazily and reloaded when it changes
///
/// The load outcome is kept, including failures, so every query sees either
/// the current corpus or the error that prevented loading it. A failed load
/// is retried on the next refresh.
#[derive(Debug)]
pub struct CorpusSource {
    path: Option<PathBuf>,
    column: String,
    state: Result<Corpus, CorpusError>,
    stamp: Option<FileStamp>,
}

impl CorpusSource {
    /// Source with no file configured; refreshing yields `CorpusError::NotLoaded`
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            path: None,
            column: column.into(),
            state: Err(CorpusError::NotLoaded),
            stamp: None,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        let mut source = Self::new(column);
        source.path = Some(path.into());
        source
    }

    /// Source wrapping an already built corpus; never touches the filesystem
    pub fn from_corpus(corpus: Corpus) -> Self {
        Self {
            path: None,
            column: answer_corpus::DEFAULT_TEXT_COLUMN.to_string(),
            state: Ok(corpus),
            stamp: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Point the source at another file; it is read on the next refresh
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
        self.invalidate();
    }

    /// Force a reload on the next refresh
    pub fn invalidate(&mut self) {
        if self.path.is_some() {
            self.state = Err(CorpusError::NotLoaded);
        }
        self.stamp = None;
    }

    /// Current corpus, (re)loading the file first when it has not been
    /// loaded successfully or has changed since
    ///
    /// A change is any difference in modification time, size or content
    /// hash, so the file is read in full on every call.
    pub fn refresh(&mut self, normalizer: &Normalizer) -> Result<&Corpus, &CorpusError> {
        if let Some(path) = self.path.clone() {
            let stamp = FileStamp::read(&path);
            if self.state.is_err() || stamp.is_none() || stamp != self.stamp {
                self.state = CorpusTable::from_path(&path, &self.column)
                    .map(|table| table.build_corpus(normalizer));
                match &self.state {
                    Ok(corpus) => log::info!(
                        "Loaded {} sentences from {}",
                        corpus.len(),
                        path.display()
                    ),
                    Err(err) => log::warn!("Corpus unavailable: {err}"),
                }
                self.stamp = stamp;
            }
        }
        self.state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unconfigured_source_is_not_loaded() {
        let mut source = CorpusSource::new("text");
        let err = source.refresh(&Normalizer::english()).unwrap_err();
        assert!(matches!(err, CorpusError::NotLoaded));
    }

    #[test]
    fn missing_file_recovers_once_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.csv");
        let normalizer = Normalizer::english();
        let mut source = CorpusSource::from_path(&path, "text");

        let err = source.refresh(&normalizer).unwrap_err();
        assert_eq!(err.to_string(), format!("File not found: {}", path.display()));

        std::fs::write(&path, "text\nCourt fees are paid online.\n").unwrap();
        let corpus = source.refresh(&normalizer).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn changed_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.csv");
        let normalizer = Normalizer::english();
        std::fs::write(&path, "text\nOne.\n").unwrap();

        let mut source = CorpusSource::from_path(&path, "text");
        assert_eq!(source.refresh(&normalizer).unwrap().len(), 1);

        std::fs::write(&path, "text\nOne. Two.\nThree.\n").unwrap();
        assert_eq!(source.refresh(&normalizer).unwrap().len(), 3);
    }

    #[test]
    fn same_size_rewrite_with_same_mtime_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.csv");
        let normalizer = Normalizer::english();
        std::fs::write(&path, "text\nOne.\n").unwrap();

        let mut source = CorpusSource::from_path(&path, "text");
        assert_eq!(source.refresh(&normalizer).unwrap().sentences()[0].raw, "One.");

        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
        std::fs::write(&path, "text\nTwo.\n").unwrap();
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(modified)
            .unwrap();

        assert_eq!(source.refresh(&normalizer).unwrap().sentences()[0].raw, "Two.");
    }

    #[test]
    fn schema_error_persists_until_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.csv");
        let normalizer = Normalizer::english();
        std::fs::write(&path, "body\nOne.\n").unwrap();

        let mut source = CorpusSource::from_path(&path, "text");
        for _ in 0..2 {
            let err = source.refresh(&normalizer).unwrap_err();
            assert_eq!(err.to_string(), "The CSV file must contain a 'text' column.");
        }

        std::fs::write(&path, "text\nOne.\n").unwrap();
        assert!(source.refresh(&normalizer).is_ok());
    }

    #[test]
    fn set_path_switches_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        std::fs::write(&first, "text\nOne.\n").unwrap();
        std::fs::write(&second, "text\nOne.\nTwo.\n").unwrap();
        let normalizer = Normalizer::english();

        let mut source = CorpusSource::from_path(&first, "text");
        assert_eq!(source.refresh(&normalizer).unwrap().len(), 1);

        source.set_path(&second);
        assert_eq!(source.path(), Some(second.as_path()));
        assert_eq!(source.refresh(&normalizer).unwrap().len(), 2);
    }

    #[test]
    fn in_memory_corpus_is_returned_as_is() {
        let corpus = Corpus::default();
        let mut source = CorpusSource::from_corpus(corpus);
        assert!(source.refresh(&Normalizer::english()).unwrap().is_empty());
    }
}
