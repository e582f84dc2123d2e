//! Grammatical-relation label constants shared by the extractors.

/// Nominal subject: the governor is the predicate, the dependent the subject.
pub const NSUBJ: &str = "nsubj";
/// Direct object: the governor is the predicate, the dependent the object.
pub const DOBJ: &str = "dobj";
/// Adjectival clause: attaches the subject in reverse direction.
pub const ACL: &str = "acl";
/// Relative clause: attaches the object in reverse direction.
pub const ACL_RELCL: &str = "acl:relcl";
/// Case-marking preposition under the noun it modifies.
pub const CASE: &str = "case";
/// Multi-word expression continuation ("in front of").
pub const MWE: &str = "mwe";
/// Coordination between parallel subjects or objects.
pub const CONJ_AND: &str = "conj:and";
/// Prefix of preposition-mediated noun-modifier labels ("nmod:in").
pub const NMOD_PREFIX: &str = "nmod:";
/// The possessive modifier, handled by the rewriter rather than extracted.
pub const NMOD_OF: &str = "nmod:of";
