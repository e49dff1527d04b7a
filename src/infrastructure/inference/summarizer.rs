use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::Summarizer;

const WARMUP_TEXT: &str = "The service is starting up. The summarization model is being loaded \
    so that incoming transcripts can be condensed into short summaries.";

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

/// Client for a text-generation server exposing the Hugging Face
/// summarization task format (`[{"summary_text": ...}]`).
#[derive(Clone, Debug)]
pub struct HttpSummarizer {
    client: Client,
    endpoint: Url,
}

impl HttpSummarizer {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build summarizer HTTP client")?;
        Ok(Self { client, endpoint })
    }

    /// Builds the client and runs one warm-up request; inference servers
    /// answer 503 until the model weights are in memory.
    pub async fn load(endpoint: Url, timeout: Duration) -> Result<Self> {
        let summarizer = Self::new(endpoint, timeout)?;
        summarizer
            .summarize(WARMUP_TEXT, 5, 30)
            .await
            .context("summarizer warm-up failed")?;
        info!("✅ Summarizer ready at {}", summarizer.endpoint);
        Ok(summarizer)
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, text: &str, min_len: usize, max_len: usize) -> Result<String> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: GenerationParameters {
                min_length: min_len,
                max_length: max_len,
                do_sample: false,
            },
        };

        debug!(chars = text.len(), min_len, max_len, "requesting summary");

        let outputs: Vec<SummarizationOutput> = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .context("summarizer request failed")?
            .error_for_status()
            .context("summarizer returned an error status")?
            .json()
            .await
            .context("summarizer returned malformed JSON")?;

        outputs
            .into_iter()
            .next()
            .map(|output| output.summary_text)
            .ok_or_else(|| anyhow!("summarizer returned no output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpSummarizer {
        let endpoint = Url::parse(&format!("{}/summarize", server.uri())).expect("valid url");
        HttpSummarizer::new(endpoint, Duration::from_secs(5)).expect("client should build")
    }

    #[tokio::test]
    async fn summarize_posts_greedy_request_and_returns_first_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .and(body_json(serde_json::json!({
                "inputs": "a long transcript",
                "parameters": { "min_length": 30, "max_length": 130, "do_sample": false }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "summary_text": "short" },
                { "summary_text": "ignored" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let summary = client_for(&server)
            .summarize("a long transcript", 30, 130)
            .await
            .expect("summarize succeeds");

        assert_eq!(summary, "short");
    }

    #[tokio::test]
    async fn summarize_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .summarize("text", 30, 130)
            .await
            .expect_err("should fail");
        assert!(error.to_string().contains("error status"));
    }

    #[tokio::test]
    async fn summarize_fails_on_empty_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .summarize("text", 30, 130)
            .await
            .expect_err("should fail");
        assert_eq!(error.to_string(), "summarizer returned no output");
    }

    #[tokio::test]
    async fn summarize_fails_on_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .summarize("text", 30, 130)
            .await
            .expect_err("should fail");
        assert!(error.to_string().contains("malformed JSON"));
    }

    #[tokio::test]
    async fn load_waits_for_the_model_to_come_up() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "summary_text": "warm" }])),
            )
            .mount(&server)
            .await;

        let endpoint = Url::parse(&format!("{}/summarize", server.uri())).expect("valid url");
        let error = HttpSummarizer::load(endpoint.clone(), Duration::from_secs(5))
            .await
            .expect_err("first warm-up hits 503");
        assert!(error.to_string().contains("warm-up failed"));

        HttpSummarizer::load(endpoint, Duration::from_secs(5))
            .await
            .expect("second warm-up succeeds");
    }
}
