use std::time::Duration;

use futures_util::StreamExt;
use playground_core::ExtractionResponse;
use playground_logging::{pg_debug, pg_info};
use reqwest::header::ACCEPT;
use url::Url;

use crate::{EngineError, FailureKind, FetchError};

const EXTRACT_PATH: [&str; 2] = ["recipes", "extract"];

#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    /// Base URL of the extraction service, e.g. `https://api.example.com`.
    pub api_root: Url,
    pub connect_timeout: Duration,
    /// Extraction downloads and analyses the whole video, so this is generous.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl ExtractionSettings {
    pub fn new(api_root: Url) -> Self {
        Self {
            api_root,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_bytes: 5 * 1024 * 1024,
        }
    }

    /// `{api_root}/recipes/extract?url={video_url}` with the video URL encoded.
    pub fn endpoint_for(&self, video_url: &str) -> Result<Url, FetchError> {
        let mut endpoint = self.api_root.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| FetchError::new(FailureKind::InvalidUrl, "api root cannot be a base url"))?
            .pop_if_empty()
            .extend(EXTRACT_PATH);
        endpoint
            .query_pairs_mut()
            .clear()
            .append_pair("url", video_url);
        Ok(endpoint)
    }
}

#[async_trait::async_trait]
pub trait RecipeExtractor: Send + Sync {
    async fn extract(
        &self,
        video_url: &str,
        credential: &str,
    ) -> Result<ExtractionResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestExtractor {
    settings: ExtractionSettings,
    client: reqwest::Client,
}

impl ReqwestExtractor {
    pub fn new(settings: ExtractionSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RecipeExtractor for ReqwestExtractor {
    async fn extract(
        &self,
        video_url: &str,
        credential: &str,
    ) -> Result<ExtractionResponse, FetchError> {
        let endpoint = self.settings.endpoint_for(video_url)?;
        pg_info!("GET {} url_len={}", endpoint.path(), video_url.len());

        let response = self
            .client
            .get(endpoint)
            .bearer_auth(credential)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("Network response was not ok ({status})"),
            ));
        }

        let body = self.read_body(response).await?;
        pg_debug!("extraction body received bytes={}", body.len());
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
