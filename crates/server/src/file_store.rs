use std::path::PathBuf;

use async_trait::async_trait;
use classroom_core::domain::{FileCategory, FileStore, FileStoreError, UploadedFile};
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Keeps uploads on local disk and serves them under `{public_base_url}/files/`.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn sanitize(file_name: &str) -> String {
        let cleaned: String = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let cleaned = cleaned.trim_start_matches('.');
        if cleaned.is_empty() {
            "upload".to_string()
        } else {
            cleaned.to_string()
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(
        &self,
        file: UploadedFile,
        category: FileCategory,
    ) -> Result<String, FileStoreError> {
        let key = format!(
            "{}/{}-{}",
            category.as_str(),
            Uuid::new_v4(),
            Self::sanitize(&file.file_name)
        );

        let dir = self.root.join(category.as_str());
        fs::create_dir_all(&dir).await?;
        fs::write(self.root.join(&key), &file.bytes).await?;

        info!(key = %key, size = file.bytes.len(), "stored upload");
        Ok(key)
    }

    fn url_for_key(&self, key: &str) -> String {
        format!("{}/files/{}", self.public_base_url, key.trim_start_matches('/'))
    }
}
