//! Project configuration (`sdkpull.toml`).
//!
//! Every key is optional. The file is looked up from the project directory upwards, and
//! relative paths inside it are resolved against the directory holding the file.
//!
//! ```toml
//! [paths]
//! libs_dir = "third_party"
//! download_dir = "downloads"
//!
//! [http]
//! timeout_secs = 60
//!
//! [extract]
//! seven_zip = ["D:/tools/7-Zip/7z.exe"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::downloader::{FMOD_DOWNLOAD_LINK_URL, FMOD_LOGIN_URL, RAYLIB_RELEASES_URL};
use crate::http::HttpClientConfig;
use crate::installer::InstallOptions;
use crate::{Result, SetupError};

pub const CONFIG_FILE_NAME: &str = "sdkpull.toml";
const DEFAULT_LIBS_DIR: &str = "libs";

/// The configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SdkpullConfig {
    pub paths: PathsConfig,
    pub http: HttpConfig,
    pub fmod: FmodConfig,
    pub raylib: RaylibConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Library root (default: `<project>/libs`)
    pub libs_dir: Option<PathBuf>,

    /// Where downloaded release files are written (default: current directory)
    pub download_dir: Option<PathBuf>,

    /// Parent of extraction workspaces (default: system temp dir)
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Timeout for login, link and probe requests
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FmodConfig {
    pub login_url: Option<String>,
    pub download_link_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RaylibConfig {
    pub releases_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// 7-Zip executables tried before the built-in locations; entries without a directory
    /// part are command names
    pub seven_zip: Vec<PathBuf>,
}

impl SdkpullConfig {
    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SetupError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Find `sdkpull.toml`, searching upward from `start_dir`.
    ///
    /// Returns the parsed file and the directory containing it.
    pub fn discover(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        for dir in start_dir.ancestors() {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                log::debug!("Using configuration {}", config_path.display());
                return Ok(Some((Self::from_file(&config_path)?, dir.to_path_buf())));
            }
        }
        Ok(None)
    }
}

/// Effective settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub libs_dir: PathBuf,
    pub download_dir: PathBuf,
    pub temp_dir: Option<PathBuf>,
    pub http: HttpClientConfig,
    pub fmod_login_url: String,
    pub fmod_link_url: String,
    pub raylib_releases_url: String,
    pub seven_zip: Vec<PathBuf>,
}

impl Settings {
    /// Built-in defaults for a project directory
    pub fn for_project(project_dir: &Path) -> Self {
        Self {
            libs_dir: project_dir.join(DEFAULT_LIBS_DIR),
            download_dir: PathBuf::from("."),
            temp_dir: None,
            http: HttpClientConfig::default(),
            fmod_login_url: FMOD_LOGIN_URL.to_string(),
            fmod_link_url: FMOD_DOWNLOAD_LINK_URL.to_string(),
            raylib_releases_url: RAYLIB_RELEASES_URL.to_string(),
            seven_zip: Vec::new(),
        }
    }

    /// Defaults overlaid with `sdkpull.toml`, if one is found
    pub fn load(project_dir: &Path) -> Result<Self> {
        let mut settings = Self::for_project(project_dir);
        if let Some((config, config_dir)) = SdkpullConfig::discover(project_dir)? {
            settings.apply(config, &config_dir);
        }
        Ok(settings)
    }

    /// Overlay a parsed configuration; relative paths resolve against `base_dir`
    pub fn apply(&mut self, config: SdkpullConfig, base_dir: &Path) {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base_dir.join(p) };

        if let Some(dir) = config.paths.libs_dir {
            self.libs_dir = resolve(dir);
        }
        if let Some(dir) = config.paths.download_dir {
            self.download_dir = resolve(dir);
        }
        if let Some(dir) = config.paths.temp_dir {
            self.temp_dir = Some(resolve(dir));
        }

        if let Some(secs) = config.http.timeout_secs {
            self.http.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = config.http.connect_timeout_secs {
            self.http.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(user_agent) = config.http.user_agent {
            self.http.user_agent = user_agent;
        }
        if config.http.proxy.is_some() {
            self.http.proxy = config.http.proxy;
        }

        if let Some(url) = config.fmod.login_url {
            self.fmod_login_url = url;
        }
        if let Some(url) = config.fmod.download_link_url {
            self.fmod_link_url = url;
        }
        if let Some(url) = config.raylib.releases_url {
            self.raylib_releases_url = url;
        }

        // Bare command names stay as they are so they are looked up on PATH.
        self.seven_zip = config
            .extract
            .seven_zip
            .into_iter()
            .map(|p| if p.components().count() > 1 { resolve(p) } else { p })
            .collect();
    }

    pub fn install_options(&self) -> InstallOptions {
        let mut options =
            InstallOptions::new(&self.libs_dir).with_seven_zip_paths(self.seven_zip.clone());
        if let Some(temp_dir) = &self.temp_dir {
            options = options.with_temp_root(temp_dir);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::for_project(Path::new("/work/game"));
        assert_eq!(settings.libs_dir, PathBuf::from("/work/game/libs"));
        assert_eq!(settings.download_dir, PathBuf::from("."));
        assert_eq!(settings.temp_dir, None);
        assert_eq!(settings.fmod_login_url, FMOD_LOGIN_URL);
        assert_eq!(settings.raylib_releases_url, RAYLIB_RELEASES_URL);
        assert!(settings.seven_zip.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config: SdkpullConfig = toml::from_str(
            r#"
            [paths]
            libs_dir = "third_party"
            download_dir = "/var/cache/sdk"

            [http]
            timeout_secs = 5
            proxy = "http://proxy:3128"

            [fmod]
            login_url = "http://localhost/login"

            [raylib]
            releases_url = "http://localhost/raylib"

            [extract]
            seven_zip = ["tools/7z"]
            "#,
        )
        .unwrap();

        let mut settings = Settings::for_project(Path::new("/work/game"));
        settings.apply(config, Path::new("/work"));

        assert_eq!(settings.libs_dir, PathBuf::from("/work/third_party"));
        assert_eq!(settings.download_dir, PathBuf::from("/var/cache/sdk"));
        assert_eq!(settings.http.timeout, Duration::from_secs(5));
        assert_eq!(settings.http.proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(settings.fmod_login_url, "http://localhost/login");
        assert_eq!(settings.fmod_link_url, FMOD_DOWNLOAD_LINK_URL);
        assert_eq!(settings.raylib_releases_url, "http://localhost/raylib");
        assert_eq!(settings.seven_zip, vec![PathBuf::from("/work/tools/7z")]);
    }

    #[test]
    fn test_seven_zip_command_names_are_not_resolved() {
        let config: SdkpullConfig = toml::from_str(
            r#"
            [extract]
            seven_zip = ["7zz", "bin/7z", "/opt/7zip/7z"]
            "#,
        )
        .unwrap();

        let mut settings = Settings::for_project(Path::new("/work/game"));
        settings.apply(config, Path::new("/work"));

        assert_eq!(
            settings.seven_zip,
            vec![
                PathBuf::from("7zz"),
                PathBuf::from("/work/bin/7z"),
                PathBuf::from("/opt/7zip/7z"),
            ]
        );
    }

    #[test]
    fn test_discover_searches_upward() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[paths]\nlibs_dir = \"vendor/libs\"\n",
        )
        .unwrap();
        let nested = temp.path().join("game/src");
        std::fs::create_dir_all(&nested).unwrap();

        let settings = Settings::load(&nested).unwrap();
        assert_eq!(settings.libs_dir, temp.path().join("vendor/libs"));
    }

    #[test]
    fn test_invalid_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[paths\nbroken").unwrap();

        let err = Settings::load(temp.path()).unwrap_err();
        assert!(matches!(err, SetupError::Config(_)));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: SdkpullConfig = toml::from_str("[future]\nsetting = true\n").unwrap();
        assert!(config.paths.libs_dir.is_none());
    }
}
