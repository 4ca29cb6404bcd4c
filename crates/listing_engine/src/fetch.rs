use std::time::Duration;

use futures_util::StreamExt;
use listing_logging::listing_info;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::envelope::parse_listing;
use crate::request::{build_request_url, PageRequest, DEFAULT_API_BASE_URL};
use crate::{FailureKind, FetchError, ListingPage};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub api_base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![JSON.to_string()],
        }
    }
}

#[async_trait::async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<ListingPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestListingFetcher {
    settings: FetchSettings,
}

impl ReqwestListingFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// Full URL for `request` against the configured base.
    pub fn request_url(&self, request: &PageRequest) -> Result<reqwest::Url, FetchError> {
        let base = reqwest::Url::parse(&self.settings.api_base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(build_request_url(&base, request))
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }
}

#[async_trait::async_trait]
impl ListingFetcher for ReqwestListingFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<ListingPage, FetchError> {
        let url = self.request_url(request)?;
        listing_info!("Fetching: {}", url);
        let client = self.build_client()?;

        let response = client
            .get(url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("HTTP error! status: {}", status.as_u16()),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    format!("unsupported content type {ct}"),
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        parse_listing(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
