use dashmap::DashMap;
use sha2::{Digest, Sha256};

use extract::SentenceRelations;

/// Cache of finished extractions keyed by a hash of the input text, so a
/// repeated document skips the round trip to the parsing service.
pub struct ResultCache {
    results: DashMap<String, Vec<SentenceRelations>>,
    max_entries: usize,
}

impl ResultCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            results: DashMap::new(),
            max_entries,
        }
    }

    pub fn get(&self, text: &str) -> Option<Vec<SentenceRelations>> {
        self.results
            .get(&hash_text(text))
            .map(|entry| entry.value().clone())
    }

    pub fn set(&self, text: &str, sentences: Vec<SentenceRelations>) {
        if self.results.len() >= self.max_entries {
            // simple eviction: drop a quarter of the entries when full
            let stale: Vec<String> = self
                .results
                .iter()
                .take(self.max_entries / 4)
                .map(|entry| entry.key().clone())
                .collect();
            for key in stale {
                self.results.remove(&key);
            }
        }
        self.results.insert(hash_text(text), sentences);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            results_cached: self.results.len(),
        }
    }
}

fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, serde::Serialize)]
pub struct CacheStats {
    pub results_cached: usize,
}
