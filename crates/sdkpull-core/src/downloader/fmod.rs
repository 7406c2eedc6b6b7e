//! FMOD Studio API downloader.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use crate::http::HttpClient;
use crate::profile::{self, Sdk};
use crate::{Result, SetupError};

use super::DownloadOutcome;

pub const FMOD_LOGIN_URL: &str = "https://www.fmod.com/api-login";
pub const FMOD_DOWNLOAD_LINK_URL: &str = "https://www.fmod.com/api-get-download-link";

/// FMOD account credentials
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkResponse {
    url: Option<String>,
}

/// Downloads FMOD installers through the login + signed link exchange
pub struct FmodDownloader {
    http_client: Arc<HttpClient>,
    login_url: String,
    link_url: String,
    download_dir: PathBuf,
}

impl FmodDownloader {
    pub fn new(http_client: Arc<HttpClient>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            http_client,
            login_url: FMOD_LOGIN_URL.to_string(),
            link_url: FMOD_DOWNLOAD_LINK_URL.to_string(),
            download_dir: download_dir.into(),
        }
    }

    /// Use different login and download-link endpoints
    pub fn with_endpoints(mut self, login_url: impl Into<String>, link_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self.link_url = link_url.into();
        self
    }

    /// Download the installer for `platform_key` and `version`
    pub async fn fetch<F>(
        &self,
        credentials: &Credentials,
        platform_key: &str,
        version: &str,
        progress: Option<F>,
    ) -> Result<DownloadOutcome>
    where
        F: Fn(u64, u64),
    {
        let profile = profile::resolve(Sdk::Fmod, platform_key)?;
        let filename = profile.filename(version);
        let remote_path = profile.remote_path.unwrap_or_default();

        log::info!("Authenticating with FMOD API as {}", credentials.user);
        let token = self.login(credentials).await?;

        let link_url = self.link_request_url(remote_path, &filename, &credentials.user)?;
        log::info!("Requesting download link for {}", filename);
        let link: LinkResponse = self.http_client.get_bearer_json(link_url.as_str(), &token).await?;
        let url = link
            .url
            .filter(|u| !u.is_empty())
            .ok_or(SetupError::LinkRetrievalFailed)?;

        let dest = self.download_dir.join(&filename);
        log::info!("Downloading {} to {}", filename, dest.display());
        let bytes = self.http_client.download(&url, &dest, progress).await?;

        Ok(DownloadOutcome { path: dest, bytes })
    }

    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let response: LoginResponse = self
            .http_client
            .post_basic_json(&self.login_url, &credentials.user, &credentials.password)
            .await?;

        response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(SetupError::AuthenticationFailed)
    }

    fn link_request_url(&self, remote_path: &str, filename: &str, user: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.link_url,
            &[("path", remote_path), ("filename", filename), ("user", user)],
        )
        .map_err(|e| SetupError::Config(format!("Invalid download link URL {}: {}", self.link_url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloader() -> FmodDownloader {
        FmodDownloader::new(Arc::new(HttpClient::new().unwrap()), "downloads")
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("user@example.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_link_request_url() {
        let url = downloader()
            .link_request_url(
                "files/fmodstudio/api/Windows/",
                "fmodstudioapi20312win-installer.exe",
                "user@example.com",
            )
            .unwrap();

        assert_eq!(url.host_str(), Some("www.fmod.com"));
        assert_eq!(url.path(), "/api-get-download-link");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("path".to_string(), "files/fmodstudio/api/Windows/".to_string()),
                ("filename".to_string(), "fmodstudioapi20312win-installer.exe".to_string()),
                ("user".to_string(), "user@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_link_endpoint() {
        let downloader = downloader().with_endpoints("not a url", "also not a url");
        let err = downloader.link_request_url("p", "f", "u").unwrap_err();
        assert!(matches!(err, SetupError::Config(_)));
    }

    #[tokio::test]
    async fn test_unknown_platform_fails_before_network() {
        // Endpoints point nowhere; a network attempt would surface as an Http error.
        let downloader = downloader().with_endpoints("http://127.0.0.1:9/login", "http://127.0.0.1:9/link");
        let creds = Credentials::new("u", "p");
        let err = downloader
            .fetch(&creds, "amiga", "20312", None::<fn(u64, u64)>)
            .await
            .unwrap_err();
        assert!(matches!(err, SetupError::UnsupportedPlatform { .. }));
    }
}
