//! Replicate predictions client.
//!
//! One generation is a `POST` that creates a prediction followed by `GET`s on the prediction's
//! `urls.get` until its status is terminal. There is no overall deadline: DeepFloyd IF runs can
//! take minutes and the caller waits for them.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ReplicateConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REPLICATE_API_URL};
use crate::error::{GenerationClientError, Result};
use crate::types::{CreatePrediction, GenerationRequest, Prediction, PredictionStatus};
use crate::{mask_token, ImageGenerator};

/// DeepFloyd IF on Replicate, pinned to a model version.
pub const DEEPFLOYD_IF_MODEL: &str =
    "stability-ai/deepfloyd-if:66657a7509f6e3a89e9f9116e02a0a2b5e28a50f162985392097cdb04041b312";

/// Replicate image generation client.
#[derive(Clone)]
pub struct ReplicateClient {
    http: Arc<Client>,
    api_token: String,
    base_url: String,
    model: String,
    poll_interval: Duration,
}

impl ReplicateClient {
    /// Creates a client for the public Replicate API and the DeepFloyd IF model.
    pub fn new(api_token: String) -> Self {
        Self {
            http: Arc::new(Client::new()),
            api_token,
            base_url: DEFAULT_REPLICATE_API_URL.to_string(),
            model: DEEPFLOYD_IF_MODEL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Builds a client from config; None when no token is configured.
    pub fn from_config(config: &ReplicateConfig) -> Option<Self> {
        let token = config.api_token.clone()?;
        Some(
            Self::new(token)
                .with_base_url(config.api_url.clone())
                .with_model(config.model.clone())
                .with_poll_interval(Duration::from_millis(config.poll_interval_ms)),
        )
    }

    /// Points the client at another API root (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the model, `owner/name:version` or `owner/name`.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Creation endpoint and version hash for the configured model.
    fn prediction_target(&self) -> Result<(String, Option<&str>)> {
        let (name, version) = match self.model.split_once(':') {
            Some((name, version)) => (name, Some(version)),
            None => (self.model.as_str(), None),
        };
        let valid_name = name
            .split_once('/')
            .map(|(owner, model)| !owner.is_empty() && !model.is_empty() && !model.contains('/'))
            .unwrap_or(false);
        if !valid_name || version.is_some_and(str::is_empty) {
            return Err(GenerationClientError::InvalidModel(self.model.clone()));
        }
        match version {
            Some(version) => Ok((format!("{}/predictions", self.base_url), Some(version))),
            None => Ok((format!("{}/models/{}/predictions", self.base_url, name), None)),
        }
    }

    async fn create_prediction(&self, request: &GenerationRequest) -> Result<Prediction> {
        let (url, version) = self.prediction_target()?;
        let body = CreatePrediction {
            version,
            input: request,
        };
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        read_prediction(response).await
    }

    async fn get_prediction(&self, url: &str) -> Result<Prediction> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        read_prediction(response).await
    }

    /// Creates a prediction and polls it until it reaches a terminal status.
    #[tracing::instrument(skip(self, request), fields(model = %self.model))]
    pub async fn run(&self, request: &GenerationRequest) -> Result<Prediction> {
        tracing::info!(
            prompt_preview = %request.prompt.chars().take(100).collect::<String>(),
            width = request.width,
            height = request.height,
            api_token = %mask_token(&self.api_token),
            "Replicate prediction request"
        );

        let mut prediction = self.create_prediction(request).await?;
        tracing::info!(prediction_id = %prediction.id, status = prediction.status.as_str(), "Replicate prediction created");

        while !prediction.status.is_terminal() {
            tokio::time::sleep(self.poll_interval).await;
            prediction = self.get_prediction(&prediction.urls.get).await?;
            tracing::debug!(prediction_id = %prediction.id, status = prediction.status.as_str(), "Replicate prediction polled");
        }

        Ok(prediction)
    }
}

/// Maps a non-2xx response to [`GenerationClientError::Api`], otherwise decodes the prediction.
async fn read_prediction(response: Response) -> Result<Prediction> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response body>".to_string());
        return Err(GenerationClientError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<Prediction>().await?)
}

#[async_trait]
impl ImageGenerator for ReplicateClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let prediction = self.run(request).await?;
        match prediction.status {
            PredictionStatus::Succeeded => {
                let urls = prediction.output_urls()?;
                tracing::info!(
                    prediction_id = %prediction.id,
                    image_count = urls.len(),
                    "Replicate prediction succeeded"
                );
                Ok(urls)
            }
            status => Err(GenerationClientError::PredictionFailed {
                id: prediction.id.clone(),
                status: status.as_str().to_string(),
                message: prediction.error_message(),
            }),
        }
    }
}
