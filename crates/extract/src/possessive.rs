//! Possessive normalization.
//!
//! "A group of people" names the group, but the entity a relation is really
//! about is "people". This pass redirects relation endpoints through
//! `nmod:of` dependencies so the dependent noun replaces the governing one.

use std::collections::{HashMap, HashSet};

use annotate::AnnotatedSentence;

use crate::labels::NMOD_OF;
use crate::schema::Relation;

/// Rewrite relation endpoints across "of" constructions.
///
/// Single pass: an endpoint is substituted at most once, and substituted
/// tokens are not chased through further `nmod:of` edges. Input and output
/// relations are 0-based; the rewrite produces new `Relation` values rather
/// than mutating in place, and duplicates collapse in the returned set.
pub fn rewrite(sentence: &AnnotatedSentence, relations: HashSet<Relation>) -> HashSet<Relation> {
    // governor -> "of"-dependents, shifted to the 0-based convention here
    let mut of_index: HashMap<usize, Vec<usize>> = HashMap::new();
    for edge in &sentence.edges {
        if edge.relation == NMOD_OF {
            of_index
                .entry(edge.source - 1)
                .or_default()
                .push(edge.target - 1);
        }
    }
    if of_index.is_empty() {
        return relations;
    }

    let mut rewritten = HashSet::new();
    for relation in relations {
        let subjects = endpoints(&of_index, relation.subject);
        let objects = endpoints(&of_index, relation.object);
        for &subject in &subjects {
            for &object in &objects {
                rewritten.insert(Relation::new(subject, relation.predicate.clone(), object));
            }
        }
    }
    rewritten
}

/// The endpoint itself, or its "of"-dependents when it governs any.
fn endpoints(of_index: &HashMap<usize, Vec<usize>>, endpoint: usize) -> Vec<usize> {
    match of_index.get(&endpoint) {
        Some(dependents) => dependents.clone(),
        None => vec![endpoint],
    }
}
