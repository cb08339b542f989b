// src/patterns/source.rs

//! Where pattern documents come from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::PatternsConfig;

/// A location that can produce the raw pattern document.
#[async_trait]
pub trait PatternSource: Send + Sync {
    /// Fetch the document body.
    async fn fetch(&self) -> Result<String>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Pattern document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PatternSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pattern document served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: &str, config: &PatternsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: Url::parse(url)?,
        })
    }
}

#[async_trait]
impl PatternSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// In-memory document, for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    body: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl PatternSource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Pick a source for a location string: http(s) URLs go over the network,
/// anything else is treated as a file path.
pub fn from_location(location: &str, config: &PatternsConfig) -> Result<Box<dyn PatternSource>> {
    let location = location.trim();
    if location.is_empty() {
        return Err(AppError::config("empty pattern source location"));
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, config)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
