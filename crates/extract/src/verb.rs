//! Verb-argument relation extraction.
//!
//! Classifies `nsubj` / `acl` / `dobj` / `acl:relcl` edges into subject and
//! object candidates per governing predicate token, then emits the full
//! subject × object cross product for each predicate.

use std::collections::{HashMap, HashSet};

use annotate::AnnotatedSentence;

use crate::labels::{ACL, ACL_RELCL, DOBJ, NSUBJ};
use crate::schema::Relation;

#[derive(Default)]
struct Arguments {
    subjects: Vec<usize>,
    objects: Vec<usize>,
}

/// Extract verb-governed relations from one sentence.
///
/// Pure function over the sentence graph; indices in the returned relations
/// are 0-based. A predicate that collected only subjects or only objects
/// contributes nothing: an unpaired argument carries no complete triple.
pub fn extract(sentence: &AnnotatedSentence) -> HashSet<Relation> {
    // predicate token -> argument candidates, still 1-based
    let mut arguments: HashMap<usize, Arguments> = HashMap::new();

    for edge in &sentence.edges {
        match edge.relation.as_str() {
            NSUBJ => arguments
                .entry(edge.source)
                .or_default()
                .subjects
                .push(edge.target),
            // adjectival clauses attach the subject in reverse direction
            ACL => arguments
                .entry(edge.target)
                .or_default()
                .subjects
                .push(edge.source),
            DOBJ => arguments
                .entry(edge.source)
                .or_default()
                .objects
                .push(edge.target),
            // relative clauses attach the object in reverse direction
            ACL_RELCL => arguments
                .entry(edge.target)
                .or_default()
                .objects
                .push(edge.source),
            _ => {}
        }
    }

    let mut relations = HashSet::new();
    for (&predicate, args) in &arguments {
        for &subject in &args.subjects {
            for &object in &args.objects {
                relations.insert(Relation::new(subject - 1, vec![predicate - 1], object - 1));
            }
        }
    }
    relations
}
