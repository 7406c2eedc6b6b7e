//! HTTP client used by the downloaders.
//!
//! This module wraps `reqwest` with the handful of request shapes the SDK distributors need:
//! - basic-auth POST returning JSON (login)
//! - bearer-authenticated GET returning JSON (signed download links)
//! - a HEAD probe that checks a public release link exists
//! - a streaming download with a progress callback
//!
//! Metadata requests run under a short per-request timeout. Payload downloads only have a
//! connect timeout, since SDK installers can take minutes on slow links. Nothing is retried.
//!
//! # Examples
//!
//! ```no_run
//! use sdkpull_core::http::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//!
//! client.probe("https://github.com/raysan5/raylib/releases/download/5.5/raylib-5.5_macos.tar.gz").await?;
//!
//! let bytes = client.download(
//!     "https://github.com/raysan5/raylib/releases/download/5.5/raylib-5.5_macos.tar.gz",
//!     "raylib-5.5_macos.tar.gz".as_ref(),
//!     Some(|downloaded, total| {
//!         println!("Downloaded {}/{} bytes", downloaded, total);
//!     }),
//! ).await?;
//! # Ok(())
//! # }
//! ```

use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

const DEFAULT_USER_AGENT: &str = concat!("sdkpull/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}{}", format_body(.body))]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error parsing API response: {0}")]
    JsonParse(String),
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!("\nResponse: {}", body)
    }
}

pub struct HttpClient {
    client: Client,
    probe_client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = Self::builder(&config).build()?;
        // Release hosts answer the probe with a redirect to a signed storage URL that may
        // reject HEAD, so the probe looks at the first response only.
        let probe_client = Self::builder(&config).redirect(Policy::none()).build()?;

        Ok(Self {
            client,
            probe_client,
            timeout: config.timeout,
        })
    }

    fn builder(config: &HttpClientConfig) -> reqwest::ClientBuilder {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            match reqwest::Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => log::warn!("Ignoring invalid proxy {}: {}", proxy_url, e),
            }
        }

        builder
    }

    /// POST with HTTP basic credentials and deserialize the JSON body
    pub async fn post_basic_json<T: DeserializeOwned>(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<T, HttpError> {
        log::debug!("POST {}", url);
        let request = self
            .client
            .post(url)
            .basic_auth(username, Some(password))
            .timeout(self.timeout);

        self.send_json(request, url).await
    }

    /// GET with a bearer token and deserialize the JSON body
    pub async fn get_bearer_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, HttpError> {
        log::debug!("GET {}", url);
        let request = self
            .client
            .get(url)
            .bearer_auth(token)
            .timeout(self.timeout);

        self.send_json(request, url).await
    }

    /// Check that a URL answers a HEAD request with a success or redirect status
    pub async fn probe(&self, url: &str) -> Result<(), HttpError> {
        log::debug!("HEAD {}", url);
        let response = self
            .probe_client
            .head(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            Ok(())
        } else {
            Err(HttpError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body: String::new(),
            })
        }
    }

    /// Download file with progress callback, returning the number of bytes written.
    ///
    /// The callback receives `(downloaded, total)`; `total` is 0 when the server sent no
    /// `Content-Length`. A failed transfer leaves whatever was written so far on disk.
    pub async fn download<F>(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<F>,
    ) -> Result<u64, HttpError>
    where
        F: Fn(u64, u64),
    {
        log::debug!("GET {} -> {}", url, dest.display());
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response, url).await?;

        // Get total size from Content-Length header
        let total_size = response.content_length().unwrap_or(0);

        // Create parent directories if they don't exist
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = File::create(dest).await?;
        let mut downloaded: u64 = 0;

        // Stream the response body
        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref callback) = progress {
                callback(downloaded, total_size);
            }
        }

        file.flush().await?;

        Ok(downloaded)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, HttpError> {
        let response = request.send().await?;
        let response = Self::check_status(response, url).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| HttpError::JsonParse(e.to_string()))
    }

    async fn check_status(response: Response, url: &str) -> Result<Response, HttpError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        Err(HttpError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }
}
