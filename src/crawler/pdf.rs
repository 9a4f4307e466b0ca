//! PDF text extraction collaborator
//!
//! PDF documents are not parsed in-process. Their raw bytes are handed to an
//! extraction service that answers with the document's text.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Errors from the extraction collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No PDF extraction endpoint configured")]
    Unavailable,

    #[error("Extraction service returned HTTP {0}")]
    Status(u16),

    #[error("Extraction request failed: {0}")]
    Transport(String),

    #[error("Invalid extraction response: {0}")]
    InvalidResponse(String),
}

/// Converts a binary document into text
#[async_trait]
pub trait PdfExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Success body of the extraction service
#[derive(Debug, Deserialize)]
struct ExtractedText {
    text: String,
}

/// Extractor that POSTs the document to an HTTP service
///
/// The service receives the raw PDF as the request body and answers
/// `200 {"text": "..."}`. Anything else is an [`ExtractionError`].
pub struct HttpPdfExtractor {
    client: Client,
    endpoint: String,
}

impl HttpPdfExtractor {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PdfExtractor for HttpPdfExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/pdf")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;

        let parsed: ExtractedText = serde_json::from_slice(&body)
            .map_err(|e| ExtractionError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            "Extracted {} chars from {} byte PDF",
            parsed.text.len(),
            bytes.len()
        );

        Ok(parsed.text)
    }
}

/// Extractor used when no service is configured; every PDF soft-fails
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledPdfExtractor;

#[async_trait]
impl PdfExtractor for DisabledPdfExtractor {
    async fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        Err(ExtractionError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_extracts_text_from_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse-pdf"))
            .and(header("content-type", "application/pdf"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"text":"Annual report 2023"}"#),
            )
            .mount(&server)
            .await;

        let extractor =
            HttpPdfExtractor::new(Client::new(), format!("{}/parse-pdf", server.uri()));
        let text = extractor.extract(b"%PDF-1.4 fake").await.unwrap();
        assert_eq!(text, "Annual report 2023");
    }

    #[tokio::test]
    async fn test_service_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(r#"{"error":"Failed to parse PDF"}"#),
            )
            .mount(&server)
            .await;

        let extractor = HttpPdfExtractor::new(Client::new(), server.uri());
        assert_eq!(
            extractor.extract(b"garbage").await,
            Err(ExtractionError::Status(500))
        );
    }

    #[tokio::test]
    async fn test_malformed_service_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let extractor = HttpPdfExtractor::new(Client::new(), server.uri());
        assert!(matches!(
            extractor.extract(b"%PDF").await,
            Err(ExtractionError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_extractor() {
        assert_eq!(
            DisabledPdfExtractor.extract(b"%PDF").await,
            Err(ExtractionError::Unavailable)
        );
    }
}
