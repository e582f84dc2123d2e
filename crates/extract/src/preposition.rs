//! Preposition-mediated relation extraction.
//!
//! Walks `nmod:<prep>` edges, confirms the surface preposition through the
//! noun's `case` dependent (joined across `mwe` continuations for multi-word
//! forms like "in front of"), attaches verb-like sources to their governing
//! subjects, and finally expands the results across `conj:and` coordination.

use std::collections::{HashMap, HashSet};

use annotate::AnnotatedSentence;

use crate::labels::{ACL, CASE, CONJ_AND, MWE, NMOD_PREFIX, NSUBJ};
use crate::schema::Relation;

/// Auxiliary edge index: label -> governing token -> dependent tokens.
type EdgeIndex = HashMap<&'static str, HashMap<usize, Vec<usize>>>;

/// An extracted triple still in the parser's 1-based convention; conversion
/// to 0-based happens once, in `expand`.
type RawRelation = (usize, Vec<usize>, usize);

const INDEXED_LABELS: [&str; 5] = [CASE, MWE, ACL, NSUBJ, CONJ_AND];

/// Extract preposition-mediated relations from one sentence.
///
/// `excluded` lists the prepositions whose `nmod:<prep>` edges are skipped
/// entirely ("of" belongs to the possessive rewriter; "for" is unmodeled).
/// Indices in the returned relations are 0-based.
pub fn extract(sentence: &AnnotatedSentence, excluded: &HashSet<String>) -> HashSet<Relation> {
    let index = index_edges(sentence);
    let mut raw: Vec<RawRelation> = Vec::new();

    for edge in &sentence.edges {
        let Some(preposition) = edge.relation.strip_prefix(NMOD_PREFIX) else {
            continue;
        };
        if excluded.contains(preposition) {
            continue;
        }
        // the modified token must be a noun
        if !sentence.is_noun(edge.target) {
            continue;
        }
        // recover the literal preposition token(s); if the surface form
        // cannot be confirmed, skip this edge rather than fail the sentence
        let Some(predicate) = resolve_preposition(sentence, &index, edge.target, preposition)
        else {
            continue;
        };

        if sentence.is_noun(edge.source) {
            // simple prepositional relation: "park in front of lake"
            raw.push((edge.source, predicate, edge.target));
        } else {
            // verb-like source: relations run from its governing subjects,
            // first matching label wins
            for label in [ACL, NSUBJ] {
                let Some(subjects) = index[label].get(&edge.source) else {
                    continue;
                };
                // a verb immediately preceding the preposition joins the
                // predicate: "looked at"
                let predicate: Vec<usize> = if edge.source + 1 == predicate[0] {
                    std::iter::once(edge.source)
                        .chain(predicate.iter().copied())
                        .collect()
                } else {
                    predicate.clone()
                };
                for &subject in subjects {
                    raw.push((subject, predicate.clone(), edge.target));
                }
                break;
            }
        }
    }

    expand(&index, raw)
}

fn index_edges(sentence: &AnnotatedSentence) -> EdgeIndex {
    let mut index: EdgeIndex = INDEXED_LABELS
        .iter()
        .map(|&label| (label, HashMap::new()))
        .collect();

    for edge in &sentence.edges {
        let Some(by_governor) = index.get_mut(edge.relation.as_str()) else {
            continue;
        };
        // acl hangs the clause under the noun; swap so the verb governs,
        // matching the verb extractor's reading
        let (source, target) = if edge.relation == ACL {
            (edge.target, edge.source)
        } else {
            (edge.source, edge.target)
        };
        by_governor.entry(source).or_default().push(target);
    }

    index
}

/// Recover the literal preposition token(s) below a modified noun.
///
/// Each `case` dependent of the noun is a candidate. A candidate heading a
/// `mwe` chain is compared in its underscore-joined multi-word form
/// ("in front of" -> "in_front_of"), and a partial chain that does not
/// reproduce the label is no match. Returns the token indices of the first
/// candidate whose surface form equals the label's preposition.
fn resolve_preposition(
    sentence: &AnnotatedSentence,
    index: &EdgeIndex,
    noun: usize,
    preposition: &str,
) -> Option<Vec<usize>> {
    for &case in index[CASE].get(&noun)? {
        let mut tokens = vec![case];
        let surface = match index[MWE].get(&case) {
            Some(continuation) => {
                tokens.extend(continuation);
                tokens
                    .iter()
                    .map(|&token| sentence.word(token))
                    .collect::<Vec<_>>()
                    .join("_")
            }
            None => sentence.word(case).to_string(),
        };
        if surface == preposition {
            return Some(tokens);
        }
    }
    None
}

/// Expand raw relations across `conj:and` coordination and convert token
/// indices to the 0-based output convention. Duplicates from independent
/// derivation paths collapse here.
fn expand(index: &EdgeIndex, raw: Vec<RawRelation>) -> HashSet<Relation> {
    let conj = &index[CONJ_AND];
    let mut relations = HashSet::new();

    for (subject, predicate, object) in raw {
        let subjects = coordinated(conj, subject);
        let objects = coordinated(conj, object);
        let predicate: Vec<usize> = predicate.iter().map(|&token| token - 1).collect();

        for &subject in &subjects {
            for &object in &objects {
                relations.insert(Relation::new(subject - 1, predicate.clone(), object - 1));
            }
        }
    }

    relations
}

/// A token plus everything coordinated with it ("cats and dogs").
fn coordinated(conj: &HashMap<usize, Vec<usize>>, token: usize) -> Vec<usize> {
    let mut tokens = vec![token];
    if let Some(parallel) = conj.get(&token) {
        tokens.extend(parallel);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sentence;

    fn default_excluded() -> HashSet<String> {
        ["of", "for"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_noun_to_noun_preposition() {
        // "a park near the lake"
        let parsed = sentence(
            &[
                ("a", "DT"),
                ("park", "NN"),
                ("near", "IN"),
                ("the", "DT"),
                ("lake", "NN"),
            ],
            &[("case", 5, 3), ("nmod:near", 2, 5)],
        );

        let relations = extract(&parsed, &default_excluded());
        assert_eq!(relations.len(), 1);
        assert!(relations.contains(&Relation::new(1, vec![2], 4)));
    }

    #[test]
    fn test_multi_word_preposition() {
        // "a park in front of the lake": the mwe chain joins to
        // "in_front_of", matching the nmod label's suffix exactly
        let parsed = sentence(
            &[
                ("a", "DT"),
                ("park", "NN"),
                ("in", "IN"),
                ("front", "NN"),
                ("of", "IN"),
                ("the", "DT"),
                ("lake", "NN"),
            ],
            &[
                ("case", 7, 3),
                ("mwe", 3, 4),
                ("mwe", 3, 5),
                ("nmod:in_front_of", 2, 7),
            ],
        );

        let relations = extract(&parsed, &default_excluded());
        assert_eq!(relations.len(), 1);
        assert!(relations.contains(&Relation::new(1, vec![2, 3, 4], 6)));
    }

    #[test]
    fn test_partial_mwe_chain_is_skipped() {
        // only two of the three tokens are chained, so the joined form
        // "in_front" does not reproduce the label and the edge is dropped
        let parsed = sentence(
            &[
                ("a", "DT"),
                ("park", "NN"),
                ("in", "IN"),
                ("front", "NN"),
                ("of", "IN"),
                ("the", "DT"),
                ("lake", "NN"),
            ],
            &[("case", 7, 3), ("mwe", 3, 4), ("nmod:in_front_of", 2, 7)],
        );

        assert!(extract(&parsed, &default_excluded()).is_empty());
    }

    #[test]
    fn test_verb_source_concatenates_predicate() {
        // "She looked at the sky": the verb immediately precedes the
        // preposition, so the predicate becomes "looked at"
        let parsed = sentence(
            &[
                ("She", "PRP"),
                ("looked", "VBD"),
                ("at", "IN"),
                ("the", "DT"),
                ("sky", "NN"),
            ],
            &[("nsubj", 2, 1), ("case", 5, 3), ("nmod:at", 2, 5)],
        );

        let relations = extract(&parsed, &default_excluded());
        assert_eq!(relations.len(), 1);
        assert!(relations.contains(&Relation::new(0, vec![1, 2], 4)));
    }

    #[test]
    fn test_verb_source_without_adjacency_keeps_preposition_only() {
        // "She looked quietly at the sky": token 3 separates verb and
        // preposition, so the predicate stays the bare preposition
        let parsed = sentence(
            &[
                ("She", "PRP"),
                ("looked", "VBD"),
                ("quietly", "RB"),
                ("at", "IN"),
                ("the", "DT"),
                ("sky", "NN"),
            ],
            &[("nsubj", 2, 1), ("case", 6, 4), ("nmod:at", 2, 6)],
        );

        let relations = extract(&parsed, &default_excluded());
        assert_eq!(relations.len(), 1);
        assert!(relations.contains(&Relation::new(0, vec![3], 5)));
    }

    #[test]
    fn test_verb_source_without_subject_is_skipped() {
        // "The book is on the table." with nothing attaching "is" as a
        // governed clause or subject: no relation can anchor, edge dropped
        let parsed = sentence(
            &[
                ("The", "DT"),
                ("book", "NN"),
                ("is", "VBZ"),
                ("on", "IN"),
                ("the", "DT"),
                ("table", "NN"),
                (".", "."),
            ],
            &[("case", 6, 4), ("nmod:on", 3, 6)],
        );

        assert!(extract(&parsed, &default_excluded()).is_empty());
    }

    #[test]
    fn test_excluded_prepositions_are_skipped() {
        let parsed = sentence(
            &[
                ("a", "DT"),
                ("group", "NN"),
                ("of", "IN"),
                ("people", "NNS"),
            ],
            &[("case", 4, 3), ("nmod:of", 2, 4)],
        );
        assert!(extract(&parsed, &default_excluded()).is_empty());

        // an empty exclusion set lets the same edge through
        let relations = extract(&parsed, &HashSet::new());
        assert_eq!(relations.len(), 1);
        assert!(relations.contains(&Relation::new(1, vec![2], 3)));
    }

    #[test]
    fn test_non_noun_target_is_skipped() {
        let parsed = sentence(
            &[("park", "NN"), ("near", "IN"), ("running", "VBG")],
            &[("case", 3, 2), ("nmod:near", 1, 3)],
        );
        assert!(extract(&parsed, &default_excluded()).is_empty());
    }

    #[test]
    fn test_missing_case_edge_is_skipped() {
        let parsed = sentence(
            &[("park", "NN"), ("near", "IN"), ("lake", "NN")],
            &[("nmod:near", 1, 3)],
        );
        assert!(extract(&parsed, &default_excluded()).is_empty());
    }

    #[test]
    fn test_case_word_mismatch_is_skipped() {
        // the case dependent reads "by", not the label's "near"
        let parsed = sentence(
            &[("park", "NN"), ("by", "IN"), ("lake", "NN")],
            &[("case", 3, 2), ("nmod:near", 1, 3)],
        );
        assert!(extract(&parsed, &default_excluded()).is_empty());
    }

    #[test]
    fn test_conjunction_expands_subjects_and_objects() {
        // "parks and gardens near the lake and the river"
        let parsed = sentence(
            &[
                ("parks", "NNS"),
                ("and", "CC"),
                ("gardens", "NNS"),
                ("near", "IN"),
                ("the", "DT"),
                ("lake", "NN"),
                ("and", "CC"),
                ("the", "DT"),
                ("river", "NN"),
            ],
            &[
                ("conj:and", 1, 3),
                ("case", 6, 4),
                ("nmod:near", 1, 6),
                ("conj:and", 6, 9),
            ],
        );

        let relations = extract(&parsed, &default_excluded());
        assert_eq!(relations.len(), 4);
        for subject in [0, 2] {
            for object in [5, 8] {
                assert!(relations.contains(&Relation::new(subject, vec![3], object)));
            }
        }
    }
}
