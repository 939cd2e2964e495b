use crate::canned::{canonicalize, CannedResponses};
use crate::config::{MatchMode, PipelineConfig};
use crate::error::{Result, SearchError};
use crate::exact::ExactMatcher;
use crate::fuzzy::FuzzyMatcher;
use crate::types::{MatchTier, SentenceMatch};
use crate::vector::VectorMatcher;
use answer_corpus::{Corpus, CorpusError};
use answer_language::{EnglishModel, LanguageModel, Normalizer, SpellCorrector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reply when every tier comes back empty
pub const NO_RESULTS: &str = "No relevant results found.";

/// A sentence returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSentence {
    pub text: String,
    pub document_id: usize,
    pub score: f64,
}

impl From<SentenceMatch<'_>> for MatchedSentence {
    fn from(m: SentenceMatch<'_>) -> Self {
        Self {
            text: m.sentence.raw.clone(),
            document_id: m.sentence.document_id,
            score: m.score,
        }
    }
}

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// Fixed reply for a greeting; the corpus was not consulted
    Canned { reply: String },

    /// Sentences from the first tier that produced any
    Found {
        corrected_query: String,
        tier: MatchTier,
        matches: Vec<MatchedSentence>,
    },

    /// Every configured tier came back empty
    NoMatch { corrected_query: String },

    /// No usable corpus; `message` says why
    Unavailable { message: String },
}

impl Answer {
    /// Single display string: matches joined by one space, the canned reply,
    /// the failure message or [`NO_RESULTS`]
    pub fn text(&self) -> String {
        match self {
            Self::Canned { reply } => reply.clone(),
            Self::Found { matches, .. } => matches
                .iter()
                .map(|m| m.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Self::NoMatch { .. } => NO_RESULTS.to_string(),
            Self::Unavailable { message } => message.clone(),
        }
    }

    /// Matched sentences one by one; empty for every other outcome
    pub fn sentences(&self) -> Vec<&str> {
        match self {
            Self::Found { matches, .. } => matches.iter().map(|m| m.text.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// The query after spelling correction, when the corpus was searched
    pub fn corrected_query(&self) -> Option<&str> {
        match self {
            Self::Found {
                corrected_query, ..
            }
            | Self::NoMatch { corrected_query } => Some(corrected_query),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

/// Resolves raw queries against a corpus
///
/// Order per query: canned reply, corpus precondition, spelling correction,
/// lemmatization, then the matchers selected by [`MatchMode`]. The first
/// tier with any result ends the search.
pub struct QueryPipeline {
    config: PipelineConfig,
    canned: CannedResponses,
    normalizer: Normalizer,
    corrector: SpellCorrector,
    exact: ExactMatcher,
    fuzzy: FuzzyMatcher,
    vector: VectorMatcher,
}

impl QueryPipeline {
    /// Pipeline over an injected language model
    pub fn new(config: PipelineConfig, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            canned: CannedResponses::builtin(),
            normalizer: Normalizer::new(Arc::clone(&model)),
            corrector: SpellCorrector::new(model),
            exact: ExactMatcher::new(),
            fuzzy: FuzzyMatcher::new(config.fuzzy_threshold),
            vector: VectorMatcher::new(config.vector_threshold, config.vector_text),
            config,
        }
    }

    /// Pipeline over the bundled English model
    pub fn english(config: PipelineConfig) -> Self {
        let model = EnglishModel::new().with_max_edit_distance(config.spelling.max_edit_distance);
        Self::new(config, Arc::new(model))
    }

    /// Builder: replace the canned reply table
    #[must_use]
    pub fn with_canned(mut self, canned: CannedResponses) -> Self {
        self.canned = canned;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalizer shared with corpus building
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Spelling-correct a query without consulting any corpus
    pub fn correct_query(&self, query: &str) -> String {
        self.corrector.correct(query.trim())
    }

    /// Resolve `query` against `corpus`
    ///
    /// `corpus` is the outcome of loading the current source; a load
    /// failure is reported as [`Answer::Unavailable`] for any non-canned
    /// query. Returns [`SearchError::EmptyQuery`] for blank input.
    pub fn answer(
        &self,
        query: &str,
        corpus: std::result::Result<&Corpus, &CorpusError>,
    ) -> Result<Answer> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        if let Some(reply) = self.canned.lookup(&canonicalize(trimmed)) {
            log::debug!("Canned reply for '{trimmed}'");
            return Ok(Answer::Canned {
                reply: reply.to_string(),
            });
        }

        let corpus = match corpus {
            Ok(corpus) => corpus,
            Err(err) => {
                return Ok(Answer::Unavailable {
                    message: err.to_string(),
                })
            }
        };

        let corrected_query = self.correct(trimmed, corpus);
        let normalized = self.normalizer.normalize(&corrected_query);
        log::debug!("Query '{trimmed}' -> corrected '{corrected_query}' -> normalized '{normalized}'");

        if normalized.is_empty() {
            return Ok(Answer::NoMatch { corrected_query });
        }

        match self.resolve(&normalized, corpus) {
            Some((tier, matches)) => Ok(Answer::Found {
                corrected_query,
                tier,
                matches: matches.into_iter().map(MatchedSentence::from).collect(),
            }),
            None => Ok(Answer::NoMatch { corrected_query }),
        }
    }

    fn correct(&self, query: &str, corpus: &Corpus) -> String {
        let spelling = &self.config.spelling;
        if !spelling.enabled {
            return query.to_string();
        }
        if spelling.protect_corpus_vocabulary {
            self.corrector.correct_protected(query, |token| {
                corpus.contains_word(token.trim_matches(|c: char| !c.is_alphanumeric()))
            })
        } else {
            self.corrector.correct(query)
        }
    }

    fn resolve<'a>(
        &self,
        normalized: &str,
        corpus: &'a Corpus,
    ) -> Option<(MatchTier, Vec<SentenceMatch<'a>>)> {
        let tiers: &[MatchTier] = match self.config.mode {
            MatchMode::Lexical => &[MatchTier::Exact],
            MatchMode::FuzzyVector => &[MatchTier::Fuzzy, MatchTier::Vector],
            MatchMode::Tiered => &[MatchTier::Exact, MatchTier::Fuzzy, MatchTier::Vector],
        };

        for &tier in tiers {
            let matches = match tier {
                MatchTier::Exact => self.exact.find(normalized, corpus),
                MatchTier::Fuzzy => self.fuzzy.find(normalized, corpus),
                MatchTier::Vector => self.vector.find(normalized, corpus).into_iter().collect(),
            };
            log::debug!("Tier {}: {} matches", tier.as_str(), matches.len());
            if !matches.is_empty() {
                return Some((tier, matches));
            }
        }
        None
    }
}

impl std::fmt::Debug for QueryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPipeline")
            .field("config", &self.config)
            .field("canned", &self.canned.len())
            .finish_non_exhaustive()
    }
}
