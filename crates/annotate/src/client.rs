use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::sentence::AnnotatedSentence;

/// Client for a Stanford CoreNLP server.
///
/// The server does sentence splitting, tagging and dependency parsing; this
/// side only ships raw text and deserializes the JSON it gets back.
#[derive(Clone)]
pub struct AnnotateClient {
    base_url: String,
    annotators: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    sentences: Vec<AnnotatedSentence>,
}

impl AnnotateClient {
    pub fn new(base_url: String, annotators: String, timeout: Duration) -> Self {
        Self {
            base_url,
            annotators,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn default() -> Self {
        Self::new(
            "http://localhost:9000".to_string(),
            "depparse".to_string(),
            Duration::from_secs(15),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Annotate raw text, returning one parsed sentence per input sentence.
    pub async fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>> {
        let properties = serde_json::json!({
            "annotators": self.annotators,
            "outputFormat": "json",
        });

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("properties", properties.to_string())])
            .timeout(self.timeout)
            .body(text.to_string())
            .send()
            .await
            .context("Failed to send request to CoreNLP server")?;

        if !response.status().is_success() {
            anyhow::bail!("CoreNLP request failed: {}", response.status());
        }

        let annotated: AnnotateResponse = response
            .json()
            .await
            .context("Failed to parse CoreNLP response")?;

        Ok(annotated.sentences)
    }

    /// Annotate a throwaway string so the server loads its models before
    /// real traffic arrives.
    pub async fn warm_up(&self) -> Result<()> {
        self.annotate("Prepare.").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{
            "sentences": [
                {
                    "index": 0,
                    "tokens": [{"index": 1, "word": "Hi", "pos": "UH"}],
                    "enhancedPlusPlusDependencies": [
                        {"dep": "ROOT", "governor": 0, "dependent": 1}
                    ]
                },
                {
                    "index": 1,
                    "tokens": [{"index": 1, "word": "Bye", "pos": "UH"}],
                    "enhancedPlusPlusDependencies": []
                }
            ]
        }"#;

        let response: AnnotateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.sentences.len(), 2);
        assert_eq!(response.sentences[0].word(1), "Hi");
        assert!(response.sentences[1].edges.is_empty());
    }
}
