//! Whole-file JSON document guarded by a single-writer gate.

use std::{
    ffi::OsString,
    io::ErrorKind,
    marker::PhantomData,
    path::PathBuf,
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use super::error::{JsonDaoError, JsonResult};

/// A JSON file holding the full state of one mapping.
///
/// Every access re-reads the file while holding the gate, so a read-modify-write cycle can never
/// interleave with another one on the same document. A missing or blank file reads as
/// `T::default()`.
pub struct JsonDocument<T> {
    path: PathBuf,
    gate: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Document stored at `path`; nothing touches the disk until the first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gate: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Load the current document content.
    pub async fn read(&self) -> JsonResult<T> {
        let _gate = self.gate.lock().await;
        self.load().await
    }

    /// Load the document, apply `mutate`, and write the result back.
    ///
    /// Nothing is written when `mutate` fails.
    pub async fn update<R, E, F>(&self, mutate: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<JsonDaoError>,
    {
        let _gate = self.gate.lock().await;
        let mut document = self.load().await?;
        let outcome = mutate(&mut document)?;
        self.store(&document).await?;
        Ok(outcome)
    }

    async fn load(&self) -> JsonResult<T> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(T::default()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| JsonDaoError::Parse {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(T::default()),
            Err(source) => Err(JsonDaoError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn store(&self, document: &T) -> JsonResult<()> {
        let bytes =
            serde_json::to_vec_pretty(document).map_err(|source| JsonDaoError::Serialize {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }

        // Write beside the target then rename, so readers never observe a truncated file.
        let staging = self.staging_path();
        fs::write(&staging, &bytes)
            .await
            .map_err(|source| self.write_error(source))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|source| self.write_error(source))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "wrote JSON document");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("document"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> JsonDaoError {
        JsonDaoError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    type Counters = BTreeMap<String, u32>;

    #[tokio::test]
    async fn missing_file_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let document = JsonDocument::<Counters>::new(dir.path().join("absent.json"));

        assert!(document.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_persists_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("counters.json");
        let document = JsonDocument::<Counters>::new(&path);

        document
            .update(|counters| {
                counters.insert("a".into(), 1);
                Ok::<_, JsonDaoError>(())
            })
            .await
            .unwrap();

        let reopened = JsonDocument::<Counters>::new(&path);
        assert_eq!(reopened.read().await.unwrap().get("a"), Some(&1));
        assert!(!dir.path().join("nested").join("counters.json.tmp").exists());
    }

    #[derive(Debug)]
    enum Refused {
        Storage,
        Rule,
    }

    impl From<JsonDaoError> for Refused {
        fn from(_: JsonDaoError) -> Self {
            Refused::Storage
        }
    }

    #[tokio::test]
    async fn failed_mutation_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counters.json");
        std::fs::write(&path, r#"{"a": 1}"#).unwrap();
        let document = JsonDocument::<Counters>::new(&path);

        let result = document
            .update(|counters| {
                counters.insert("b".into(), 2);
                Err::<(), _>(Refused::Rule)
            })
            .await;

        assert!(matches!(result, Err(Refused::Rule)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"a": 1}"#);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counters.json");
        std::fs::write(&path, "{not json").unwrap();
        let document = JsonDocument::<Counters>::new(&path);

        assert!(matches!(
            document.read().await,
            Err(JsonDaoError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn concurrent_updates_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let document =
            std::sync::Arc::new(JsonDocument::<Counters>::new(dir.path().join("c.json")));

        let tasks = (0..16).map(|index| {
            let document = document.clone();
            tokio::spawn(async move {
                document
                    .update(|counters| {
                        counters.insert(format!("k{index}"), index);
                        Ok::<_, JsonDaoError>(())
                    })
                    .await
            })
        });

        for task in futures::future::join_all(tasks).await {
            task.unwrap().unwrap();
        }

        assert_eq!(document.read().await.unwrap().len(), 16);
    }
}
