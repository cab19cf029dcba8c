//! Label detection via the Google Cloud Vision REST API
//!
//! One image per request, one `LABEL_DETECTION` feature, no retries.

use std::io::Write;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub mod credentials;

pub use credentials::Credentials;

/// A single label returned for an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnnotation {
    pub description: String,
    /// Confidence in 0..1
    #[serde(default)]
    pub score: f32,
}

// Wire types for `images:annotate`

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    requests: Vec<AnnotateImageRequest<'a>>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest<'a> {
    image: ImageContent,
    features: Vec<Feature<'a>>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Client for the label detection endpoint
#[derive(Debug, Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl VisionClient {
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            credentials,
        }
    }

    /// Read `path` fully and detect labels in it
    pub async fn detect_labels_in_file(
        &self,
        path: impl AsRef<Path>,
        max_results: Option<u32>,
    ) -> Result<Vec<LabelAnnotation>> {
        let path = path.as_ref();
        // file handle is closed before the request goes out
        let content = tokio::fs::read(path).await?;
        tracing::info!(path = %path.display(), bytes = content.len(), "Loaded image");

        self.detect_labels(&content, max_results).await
    }

    /// Send raw image bytes for label detection
    pub async fn detect_labels(
        &self,
        image: &[u8],
        max_results: Option<u32>,
    ) -> Result<Vec<LabelAnnotation>> {
        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: "LABEL_DETECTION",
                    max_results,
                }],
            }],
        };

        let request = self
            .credentials
            .authorize(&self.http, self.http.post(&self.endpoint))
            .await?;
        let resp = request.json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::VisionApi {
                status: status.as_u16(),
                message,
            });
        }

        let body: AnnotateResponse = resp.json().await?;
        let response = match body.responses.into_iter().next() {
            Some(response) => response,
            None => return Ok(Vec::new()),
        };

        if let Some(err) = response.error {
            return Err(Error::VisionApi {
                status: status.as_u16(),
                message: format!("code {}: {}", err.code, err.message),
            });
        }

        tracing::debug!(labels = response.label_annotations.len(), "Label detection finished");
        Ok(response.label_annotations)
    }
}

/// Write one `<description> <score>` line per label
pub fn write_labels(out: &mut impl Write, labels: &[LabelAnnotation]) -> std::io::Result<()> {
    for label in labels {
        writeln!(out, "{} {}", label.description, label.score)?;
    }
    out.flush()
}
