use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::{FlatFileStore, StoreConfig, StoreError};

/// Data files in one directory on local disk. The directory is created
/// once, when the store opens.
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let data_dir = config.resolved_dir();
        std::fs::create_dir_all(&data_dir).map_err(|source| StoreError::DataDir {
            path: data_dir.clone(),
            source,
        })?;
        debug!("data dir ready: {}", data_dir.display());
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn file(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }
}

#[async_trait]
impl FlatFileStore for LocalStore {
    async fn read(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        match tokio::fs::read(self.file(key)).await {
            Ok(data) if data.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn write(&self, key: &str, data: Bytes) -> Result<(), StoreError> {
        tokio::fs::write(self.file(key), &data)
            .await
            .map_err(|source| StoreError::Write {
                key: key.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_missing_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("state/pantry");

        let store = LocalStore::open(&StoreConfig::in_dir(&dir)).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.data_dir(), dir.as_path());
    }

    #[test]
    fn open_fails_when_data_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("pantry");
        std::fs::write(&file, "").unwrap();

        let err = LocalStore::open(&StoreConfig::in_dir(&file)).err().unwrap();
        assert!(matches!(err, StoreError::DataDir { .. }));
    }

    #[tokio::test]
    async fn missing_and_blank_files_read_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(&StoreConfig::in_dir(tmp.path())).unwrap();
        assert!(store.read("lobby.json").await.unwrap().is_none());

        std::fs::write(tmp.path().join("lobby.json"), " \n\t\n").unwrap();
        assert!(store.read("lobby.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_replaces_whole_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(&StoreConfig::in_dir(tmp.path())).unwrap();

        store
            .write("recipes.json", Bytes::from(r#"{"results":[1,2,3]}"#))
            .await
            .unwrap();
        store
            .write("recipes.json", Bytes::from("[]"))
            .await
            .unwrap();
        let data = store.read("recipes.json").await.unwrap().unwrap();
        assert_eq!(data.as_ref(), b"[]");
    }

    #[tokio::test]
    async fn unreadable_key_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(&StoreConfig::in_dir(tmp.path())).unwrap();
        std::fs::create_dir(tmp.path().join("fridge.csv")).unwrap();

        let err = store.read("fridge.csv").await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read fridge.csv"));
    }
}
