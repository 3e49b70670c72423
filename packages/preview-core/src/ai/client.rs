//! HTTP client for a real extraction backend.
//!
//! Speaks the collaborator contract: `POST {base_url}/extract` with a JSON
//! body of `{documentId, template}`, bearer auth when an API key is
//! configured. Also implements [`ExtractionDriver`] so a remote backend is
//! a drop-in replacement for the mock.

use async_stream::stream;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, Result};
use crate::traits::driver::{EventStream, ExtractionDriver, ExtractionEvent};
use crate::types::result::ExtractData;
use crate::types::template::ExtractTemplate;

/// Client for a remote extraction service.
#[derive(Clone)]
pub struct ExtractClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExtractClient {
    /// Create a client against a base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: None,
        }
    }

    /// Attach an API key, sent as a bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one extraction call against the remote service.
    ///
    /// Non-2xx responses surface as [`PreviewError::Transport`].
    pub async fn extract(
        &self,
        document_id: &str,
        template: &ExtractTemplate,
    ) -> Result<ExtractResponse> {
        let url = format!("{}/extract", self.base_url.trim_end_matches('/'));
        let body = ExtractRequest {
            document_id,
            template,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PreviewError::Transport(Box::new(e)))?;

        let response = response
            .error_for_status()
            .map_err(|e| PreviewError::Transport(Box::new(e)))?;

        response
            .json::<ExtractResponse>()
            .await
            .map_err(|e| PreviewError::Transport(Box::new(e)))
    }
}

impl ExtractionDriver for ExtractClient {
    fn extract(&self, document_id: &str, template: &ExtractTemplate) -> EventStream {
        let client = self.clone();
        let document_id = document_id.to_string();
        let template = template.clone();

        Box::pin(stream! {
            yield Ok(ExtractionEvent::processing(0));
            match ExtractClient::extract(&client, &document_id, &template).await {
                Ok(response) => {
                    yield Ok(ExtractionEvent::completed(response.data, response.confidence));
                }
                Err(e) => yield Err(e),
            }
        })
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractRequest<'a> {
    document_id: &'a str,
    template: &'a ExtractTemplate,
}

/// Payload returned by the remote extraction service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    /// Extracted values keyed by field name
    #[serde(default)]
    pub data: ExtractData,

    /// Overall confidence in [0, 1]
    #[serde(default)]
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::template::{FieldSchema, FieldType};

    #[test]
    fn test_request_wire_shape() {
        let template = ExtractTemplate::new(vec![FieldSchema::new("title", FieldType::Text)], true);
        let request = ExtractRequest {
            document_id: "doc-1",
            template: &template,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["documentId"], "doc-1");
        assert_eq!(json["template"]["fields"][0]["name"], "title");
    }

    #[test]
    fn test_response_defaults() {
        let response: ExtractResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.confidence, 0.0);
    }

    #[test]
    fn test_base_url_preserved() {
        let client = ExtractClient::new("https://ai.example.com/api").with_api_key("secret");
        assert_eq!(client.base_url(), "https://ai.example.com/api");
    }
}
