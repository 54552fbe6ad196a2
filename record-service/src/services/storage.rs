use async_trait::async_trait;
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Destination for uploaded files.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` unchanged under `file_name`, replacing any existing file.
    async fn upload(&self, file_name: &str, data: &[u8]) -> Result<(), AppError>;
}

/// Writes uploads flat into one local directory.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, file_name: &str, data: &[u8]) -> Result<(), AppError> {
        // Only bare names are accepted so a write can never leave base_path.
        let is_bare = Path::new(file_name).file_name().and_then(|n| n.to_str()) == Some(file_name);
        if !is_bare {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Invalid file name: {}",
                file_name
            )));
        }

        fs::write(self.base_path.join(file_name), data).await?;
        Ok(())
    }
}
