use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Permission bits for stored assets: owner read/write, everyone else read.
#[cfg(unix)]
const ASSET_FILE_MODE: u32 = 0o644;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for assets (e.g., "./assets")
    /// * `base_url` - Base URL the root is served under (e.g., "http://localhost:8091/assets")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve an asset name to a path directly under the root.
    fn name_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(StorageError::InvalidKey(
                "Asset name contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(name))
    }

    fn open_options() -> fs::OpenOptions {
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(ASSET_FILE_MODE);
        options
    }

    async fn write_file(path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = Self::open_options().open(path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let result = async {
            file.write_all(data).await?;
            file.sync_all().await?;
            // The process umask may have narrowed the mode passed at open.
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(path, std::fs::Permissions::from_mode(ASSET_FILE_MODE))
                    .await?;
            }
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = result {
            drop(file);
            if let Err(remove_err) = fs::remove_file(path).await {
                tracing::warn!(
                    path = %path.display(),
                    error = %remove_err,
                    "Failed to remove partially written asset"
                );
            }
            return Err(StorageError::WriteFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn write(&self, name: &str, data: Bytes) -> StorageResult<String> {
        let path = self.name_to_path(name)?;
        let size = data.len();
        let start = std::time::Instant::now();

        Self::write_file(&path, &data).await?;

        let url = self.public_url(name);

        tracing::info!(
            path = %path.display(),
            name = %name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(url)
    }

    async fn read(&self, name: &str) -> StorageResult<Bytes> {
        let path = self.name_to_path(name)?;

        let data = fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::ReadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            )),
        })?;

        Ok(Bytes::from(data))
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(name)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}
