use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use reqwest::{Client, Url};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use crate::error::{Result, AppError};

pub const MAX_TOKENS: u32 = 1024;
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 1.0;

const JSON_MIME: &str = "application/json";

/// Transport to a hosted model: serialized request bytes in, response bytes out.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// Calls the Bedrock runtime `InvokeModel` REST endpoint with an API key.
pub struct BedrockClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl BedrockClient {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn invoke_url(&self, model_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::InvocationError(format!("Invalid endpoint {}: {}", self.endpoint, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::InvocationError(format!("Endpoint cannot be a base: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(["model", model_id, "invoke"]);
        Ok(url)
    }
}

#[async_trait]
impl ModelBackend for BedrockClient {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let url = self.invoke_url(model_id)?;

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, JSON_MIME)
            .header(CONTENT_TYPE, JSON_MIME)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::InvocationError(format!("Request failed: {}", e)))?;

        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| AppError::InvocationError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::InvocationError(format!(
                "Model endpoint returned {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            )));
        }

        Ok(bytes.to_vec())
    }
}

#[derive(Serialize)]
struct Penalty {
    scale: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    stop_sequences: Vec<String>,
    count_penalty: Penalty,
    presence_penalty: Penalty,
    frequency_penalty: Penalty,
}

impl<'a> CompletionRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            stop_sequences: Vec::new(),
            count_penalty: Penalty { scale: 0.0 },
            presence_penalty: Penalty { scale: 0.0 },
            frequency_penalty: Penalty { scale: 0.0 },
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    completions: Vec<Completion>,
}

#[derive(Deserialize)]
struct Completion {
    data: CompletionData,
}

#[derive(Deserialize)]
struct CompletionData {
    text: String,
}

/// Sends prompts to a fixed model with fixed generation parameters.
#[derive(Clone)]
pub struct ModelInvoker {
    backend: Arc<dyn ModelBackend>,
    model_id: String,
}

impl ModelInvoker {
    pub fn new(backend: Arc<dyn ModelBackend>, model_id: impl Into<String>) -> Self {
        Self {
            backend,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Returns the text of the first completion for `prompt`.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = serde_json::to_vec(&CompletionRequest::new(prompt))
            .map_err(|e| AppError::InvocationError(format!("Failed to encode request: {}", e)))?;

        let raw = self.backend.invoke_model(&self.model_id, body).await?;

        let text = String::from_utf8(raw)
            .map_err(|e| AppError::InvocationError(format!("Response is not UTF-8: {}", e)))?;
        let response: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| AppError::InvocationError(format!("Invalid response format from model: {}", e)))?;

        response
            .completions
            .into_iter()
            .next()
            .map(|completion| completion.data.text)
            .ok_or_else(|| AppError::InvocationError("Model returned no completions".to_string()))
    }
}
