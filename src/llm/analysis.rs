use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, RoastError};
use crate::llm::truncate_for_log;
use crate::media::DecodedImage;
use crate::types::Language;

const ANALYSIS_ERROR_BODY_LIMIT: usize = 800;

/// Boundary to the external image-analysis service. The orchestrator treats
/// every failure here as recoverable and falls back to a simulated fragment.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze(&self, image: &DecodedImage, language: Language) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    roast_prompt: Option<String>,
}

/// Client for the image-analysis HTTP service: multipart upload of the image
/// bytes plus the requested language, returning a short descriptive fragment.
pub struct HttpImageAnalyzer {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpImageAnalyzer {
    pub fn new(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl ImageAnalyzer for HttpImageAnalyzer {
    async fn analyze(&self, image: &DecodedImage, language: Language) -> Result<String> {
        let image_part = Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(&image.mime_type)
            .map_err(|err| {
                RoastError::Validation(format!(
                    "unsupported MIME type '{}': {err}",
                    image.mime_type
                ))
            })?;
        let form = Form::new()
            .part("image", image_part)
            .text("language", language.code());

        debug!(
            "Submitting image for analysis: endpoint={}, filename={}, bytes={}",
            self.endpoint,
            image.filename,
            image.bytes.len()
        );

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Image analysis API error: status={}, body={}",
                status,
                truncate_for_log(&body, ANALYSIS_ERROR_BODY_LIMIT)
            );
            return Err(RoastError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<AnalyzeResponse>().await.map_err(|err| {
            RoastError::ContractViolation(format!("invalid analysis response: {err}"))
        })?;

        match parsed.roast_prompt {
            Some(fragment) if !fragment.trim().is_empty() => Ok(fragment),
            _ => Err(RoastError::ContractViolation(
                "analysis response missing 'roast_prompt' field".to_string(),
            )),
        }
    }
}
