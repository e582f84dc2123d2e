pub mod client;
pub mod sentence;

pub use client::AnnotateClient;
pub use sentence::{AnnotatedSentence, DependencyEdge, Token};
