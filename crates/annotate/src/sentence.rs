use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// POS tag prefix that marks a token as a noun (NN, NNS, NNP, NNPS).
pub const NOUN_TAG_PREFIX: &str = "NN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// 1-based position within the sentence, as assigned by the parser.
    pub index: usize,
    pub word: String,
    /// Part-of-speech tag. Defaults to empty when the parser omits it so a
    /// single bad token surfaces in `validate`, not as a parse failure for
    /// the whole document.
    #[serde(default)]
    pub pos: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Grammatical-relation label, possibly compound ("nmod:in", "conj:and").
    #[serde(rename = "dep")]
    pub relation: String,
    /// Governing token, 1-based. 0 is the synthetic ROOT governor.
    #[serde(rename = "governor")]
    pub source: usize,
    /// Dependent token, 1-based.
    #[serde(rename = "dependent")]
    pub target: usize,
}

impl DependencyEdge {
    /// Whether this is the synthetic root edge the parser adds per sentence.
    pub fn is_root(&self) -> bool {
        self.relation.eq_ignore_ascii_case("root")
    }
}

/// One sentence as returned by the parsing service: its tokens plus the
/// enhanced dependency graph. Enhanced graphs may give a token several
/// governors and are not guaranteed to be trees.
///
/// Indexing is 1-based throughout this layer to match the parser's
/// convention; downstream extractors convert to 0-based only when producing
/// final output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    #[serde(default)]
    pub index: usize,
    pub tokens: Vec<Token>,
    #[serde(rename = "enhancedPlusPlusDependencies", default)]
    pub edges: Vec<DependencyEdge>,
}

impl AnnotatedSentence {
    /// Surface form of the token at a 1-based position.
    pub fn word(&self, index: usize) -> &str {
        &self.tokens[index - 1].word
    }

    /// POS tag of the token at a 1-based position.
    pub fn pos(&self, index: usize) -> &str {
        &self.tokens[index - 1].pos
    }

    /// Whether the token at a 1-based position is tagged as a noun.
    pub fn is_noun(&self, index: usize) -> bool {
        self.pos(index).starts_with(NOUN_TAG_PREFIX)
    }

    /// The sentence's surface tokens in order.
    pub fn words(&self) -> Vec<String> {
        self.tokens.iter().map(|token| token.word.clone()).collect()
    }

    /// Structural validation of the parser's output.
    ///
    /// The extractors assume well-formed input and never repair it; this is
    /// the single gate where malformed sentences are rejected. Checks that
    /// token positions are contiguous from 1, that every token carries a POS
    /// tag, and that every edge endpoint names a real token (governor 0 is
    /// allowed only on the root edge).
    pub fn validate(&self) -> Result<()> {
        let count = self.tokens.len();

        for (position, token) in self.tokens.iter().enumerate() {
            if token.index != position + 1 {
                bail!(
                    "token {:?} at position {} carries index {}",
                    token.word,
                    position + 1,
                    token.index
                );
            }
            if token.pos.is_empty() {
                bail!("token {} ({:?}) has no part-of-speech tag", token.index, token.word);
            }
        }

        for edge in &self.edges {
            if edge.target == 0 || edge.target > count {
                bail!(
                    "edge {:?} has dependent {} outside 1..={}",
                    edge.relation,
                    edge.target,
                    count
                );
            }
            if edge.source == 0 && edge.is_root() {
                continue;
            }
            if edge.source == 0 || edge.source > count {
                bail!(
                    "edge {:?} has governor {} outside 1..={}",
                    edge.relation,
                    edge.source,
                    count
                );
            }
        }

        Ok(())
    }
}
