//! Relation triple extraction over dependency parses.
//!
//! Given sentences annotated with enhanced dependency graphs (see the
//! `annotate` crate), this crate extracts subject-predicate-object triples
//! in three stages: verb-argument extraction, preposition-mediated
//! extraction, and a possessive rewrite that redirects endpoints across
//! "of" constructions. The stages are pure functions over the sentence
//! graph; all working state is built fresh per sentence.

pub mod labels;
pub mod possessive;
pub mod preposition;
pub mod schema;
pub mod verb;

pub use schema::{Relation, SentenceRelations};

use std::collections::HashSet;

use annotate::AnnotatedSentence;
use serde::{Deserialize, Serialize};

/// Extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Prepositions whose `nmod:<prep>` edges the prepositional extractor
    /// skips. "of" belongs to the possessive rewriter; "for" is unmodeled.
    pub excluded_prepositions: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            excluded_prepositions: vec!["of".to_string(), "for".to_string()],
        }
    }
}

/// The per-sentence extraction pipeline.
pub struct Extractor {
    excluded: HashSet<String>,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            excluded: config.excluded_prepositions.into_iter().collect(),
        }
    }

    pub fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }

    /// Extract relations from one validated sentence.
    ///
    /// The verb and preposition extractors run independently and their
    /// outputs are unioned before the possessive rewrite. The deduplicated
    /// set is materialized in the `Relation` canonical order, so repeated
    /// runs over the same graph produce identical output.
    pub fn process_sentence(&self, sentence: &AnnotatedSentence) -> SentenceRelations {
        let mut relations = verb::extract(sentence);
        relations.extend(preposition::extract(sentence, &self.excluded));
        let relations = possessive::rewrite(sentence, relations);

        let mut relations: Vec<Relation> = relations.into_iter().collect();
        relations.sort_unstable();

        SentenceRelations {
            tokens: sentence.words(),
            relations,
        }
    }

    /// Extract relations from every sentence of a document.
    ///
    /// A sentence failing structural validation keeps its slot in the output
    /// (its tokens with an empty relation list) so the result stays aligned
    /// with the input; the failure never aborts the rest of the batch.
    pub fn process_document(&self, sentences: &[AnnotatedSentence]) -> Vec<SentenceRelations> {
        sentences
            .iter()
            .enumerate()
            .map(|(num, sentence)| match sentence.validate() {
                Ok(()) => self.process_sentence(sentence),
                Err(error) => {
                    tracing::warn!(sentence = num, error = %error, "Skipping malformed sentence");
                    SentenceRelations {
                        tokens: sentence.words(),
                        relations: Vec::new(),
                    }
                }
            })
            .collect()
    }
}
