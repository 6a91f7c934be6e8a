use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

pub const DEFAULT_CONFIG_PATH: &str = "lms.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Origin the dashboard is served from; used for links handed to users.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default)]
    pub session_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }

    /// Reads `LMS_CONFIG` (or `lms.toml`) when present, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("LMS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::from_str("")?
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("DATABASE_URL") {
            self.database_url = value;
        }
        if let Ok(value) = std::env::var("LMS_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = std::env::var("LMS_SESSION_SECRET") {
            self.session_secret = value;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.session_secret.trim().is_empty() {
            bail!("session_secret is not set (config file or LMS_SESSION_SECRET)");
        }
        if self.session_ttl_hours <= 0 {
            bail!("session_ttl_hours must be positive, got {}", self.session_ttl_hours);
        }
        Ok(())
    }

    /// Link a teacher can share so students land on the enrollment page.
    pub fn shareable_link(&self, course_id: impl std::fmt::Display) -> String {
        format!(
            "{}/student/enroll?courseId={course_id}",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_database_url() -> String {
    "sqlite://classroom.db?mode=rwc".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_session_ttl_hours() -> i64 {
    24 * 7
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}
