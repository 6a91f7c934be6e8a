use async_trait::async_trait;
use thiserror::Error;

/// Folder an upload is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Assignment,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Assignment => "assignment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some("application/pdf")
            || self.file_name.to_lowercase().ends_with(".pdf")
    }
}

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("file store write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// `true` when `value` already carries an `http://` or `https://` scheme.
pub fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores the file and returns its key.
    async fn upload(
        &self,
        file: UploadedFile,
        category: FileCategory,
    ) -> Result<String, FileStoreError>;

    /// Public URL for a stored key.
    fn url_for_key(&self, key: &str) -> String;

    /// Public URL for a key or an already absolute URL, which passes through.
    fn to_url(&self, key_or_url: &str) -> String {
        if is_absolute_url(key_or_url) {
            key_or_url.to_string()
        } else {
            self.url_for_key(key_or_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PrefixStore;

    #[async_trait]
    impl FileStore for PrefixStore {
        async fn upload(
            &self,
            file: UploadedFile,
            category: FileCategory,
        ) -> Result<String, FileStoreError> {
            Ok(format!("{}/{}", category.as_str(), file.file_name))
        }

        fn url_for_key(&self, key: &str) -> String {
            format!("https://files.example.com/{key}")
        }
    }

    #[test]
    fn absolute_urls_pass_through() {
        let store = PrefixStore;

        assert_eq!(
            store.to_url("https://elsewhere.example.com/a.pdf"),
            "https://elsewhere.example.com/a.pdf"
        );
        assert_eq!(
            store.to_url("assignment/a.pdf"),
            "https://files.example.com/assignment/a.pdf"
        );
    }

    #[test]
    fn assignment_uploads_use_the_assignment_folder() {
        assert_eq!(FileCategory::Assignment.as_str(), "assignment");
    }

    #[test]
    fn pdf_detection_accepts_mime_or_extension() {
        let by_mime = UploadedFile {
            file_name: "notes".into(),
            content_type: Some("application/pdf".into()),
            bytes: vec![],
        };
        let by_name = UploadedFile {
            file_name: "Notes.PDF".into(),
            content_type: None,
            bytes: vec![],
        };
        let image = UploadedFile {
            file_name: "photo.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![],
        };

        assert!(by_mime.is_pdf());
        assert!(by_name.is_pdf());
        assert!(!image.is_pdf());
    }
}
