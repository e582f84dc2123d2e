use serde::{Deserialize, Serialize};

/// A subject-predicate-object triple over a sentence's token positions.
///
/// All indices are 0-based into the sentence's token list. The predicate is
/// an ordered sequence of one or more tokens: a verb, a preposition (possibly
/// multi-word), or a verb followed by its preposition. Equality is
/// structural, so relations reached through independent derivation paths
/// collapse in a `HashSet`; `Ord` gives the fields a stable canonical order
/// for deterministic materialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relation {
    pub subject: usize,
    pub predicate: Vec<usize>,
    pub object: usize,
}

impl Relation {
    pub fn new(subject: usize, predicate: Vec<usize>, object: usize) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Extraction output for one sentence: its surface tokens and the
/// deduplicated relations found in it. An empty relation list is a valid
/// result, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceRelations {
    pub tokens: Vec<String>,
    pub relations: Vec<Relation>,
}
