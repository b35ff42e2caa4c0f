use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem storage. Relative paths resolve against `base_path`;
/// absolute paths are used as-is.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// Makes a user-supplied input path absolute so that it does not resolve
/// against the output directory.
pub fn absolute_input_path(path: &str) -> Result<String> {
    let absolute = std::path::absolute(path)?;
    Ok(absolute.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested/out");
        let storage = LocalStorage::new(base.to_string_lossy().into_owned());

        storage.write_file("prices.csv", b"SKU\n").await.unwrap();
        assert_eq!(storage.read_file("prices.csv").await.unwrap(), b"SKU\n");
        assert!(base.join("prices.csv").exists());
    }

    #[tokio::test]
    async fn test_absolute_paths_ignore_base() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("export.xlsx");
        fs::write(&input, b"data").unwrap();

        let storage = LocalStorage::new("./does-not-exist".to_string());
        let data = storage.read_file(&input.to_string_lossy()).await.unwrap();
        assert_eq!(data, b"data");
    }

    #[test]
    fn test_absolute_input_path() {
        let path = absolute_input_path("export.xlsx").unwrap();
        assert!(Path::new(&path).is_absolute());
        assert!(path.ends_with("export.xlsx"));
    }
}
