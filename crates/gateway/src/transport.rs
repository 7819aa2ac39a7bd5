use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Config, ConfigError};
use crate::error::{GatewayError, Result};
use crate::models::{RemoteErrorBody, UploadResponse};
use crate::multipart::EncodedForm;

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP plumbing against the remote service.
///
/// Holds the validated base URL and a client with the API key installed as
/// a default header. No state is kept between calls beyond the connection
/// pool inside [`Client`].
#[derive(Debug, Clone)]
pub struct Transport {
    base: Url,
    client: Client,
}

impl Transport {
    pub fn new(config: &Config) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);
        default_headers.insert(API_KEY_HEADER, api_key);

        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            base: config.sds_url.clone(),
            client,
        })
    }

    /// Join path segments onto the base URL.
    ///
    /// Each segment is escaped as a path component, so distinct segment
    /// tuples never collide. A trailing empty segment on the base (from a
    /// configured trailing slash) is dropped before extending.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Cannot fail: the base URL was validated at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issue a GET and require a 2xx status.
    pub async fn get(&self, url: Url) -> Result<Response> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::RemoteProtocol(status));
        }

        Ok(response)
    }

    /// GET a JSON body and decode it into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.get(url).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Transmit a spooled multipart form.
    ///
    /// The spool file becomes the request body, so the upload streams with
    /// an exact `Content-Length`. A 4xx/5xx response is translated into the
    /// remote's structured error message; failing to decode that error body
    /// is a decode failure in its own right.
    pub async fn post_form(&self, url: Url, form: EncodedForm) -> Result<UploadResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, form.content_type)
            .header(CONTENT_LENGTH, form.content_length)
            .body(reqwest::Body::from(tokio::fs::File::from_std(form.file)))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.bytes().await?;
            let remote_error: RemoteErrorBody = serde_json::from_slice(&body)?;
            return Err(GatewayError::RemoteApplication {
                status,
                message: remote_error.message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
