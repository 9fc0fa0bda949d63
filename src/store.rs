use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, TranslatorError};
use crate::record::MultilingualRecord;

/// Storage layer owning the records handed to the orchestrator
#[async_trait]
pub trait RecordStore<R>: Send + Sync {
    /// Persist every field mutation of `record` in one write
    async fn save(&self, record: &R) -> Result<()>;

    /// Notify the storage layer that translation of `record` is finished
    async fn mark_finished(&self, record: &R) -> Result<()>;
}

/// Record store backed by a JSON array on disk.
///
/// Records are read from `input` once. Every save replaces the stored copy
/// with the same id and rewrites `output` with the full set.
pub struct JsonFileStore {
    output: PathBuf,
    records: Mutex<Vec<MultilingualRecord>>,
}

impl JsonFileStore {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::open_with_output(path, path).await
    }

    pub async fn open_with_output<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Self> {
        let input = input.as_ref();
        let content = fs::read_to_string(input).await.map_err(|e| {
            TranslatorError::Store(format!("Failed to read {}: {}", input.display(), e))
        })?;
        let records: Vec<MultilingualRecord> = serde_json::from_str(&content)?;
        debug!("Loaded {} records from {}", records.len(), input.display());

        Ok(Self {
            output: output.as_ref().to_path_buf(),
            records: Mutex::new(records),
        })
    }

    /// Copy of the records as currently stored
    pub async fn records(&self) -> Vec<MultilingualRecord> {
        self.records.lock().await.clone()
    }

    async fn update<F>(&self, id: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut MultilingualRecord) + Send,
    {
        let mut records = self.records.lock().await;
        let stored = records
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or_else(|| TranslatorError::Store(format!("Unknown record: {}", id)))?;
        apply(stored);

        let content = serde_json::to_string_pretty(&*records)?;
        fs::write(&self.output, content).await.map_err(|e| {
            TranslatorError::Store(format!("Failed to write {}: {}", self.output.display(), e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore<MultilingualRecord> for JsonFileStore {
    async fn save(&self, record: &MultilingualRecord) -> Result<()> {
        let fields = record.fields.clone();
        self.update(&record.id, move |stored| stored.fields = fields).await?;
        debug!("Saved record {}", record.id);
        Ok(())
    }

    async fn mark_finished(&self, record: &MultilingualRecord) -> Result<()> {
        self.update(&record.id, |stored| stored.finished_at = Some(Utc::now())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Translatable;

    const RECORDS: &str = r#"[
        {"id": "1", "fields": {"title": {"en": "Hello", "fr": ""}}},
        {"id": "2", "fields": {"title": {"en": "Bye", "fr": ""}}}
    ]"#;

    #[tokio::test]
    async fn test_save_rewrites_only_the_saved_record() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, RECORDS).unwrap();

        let store = JsonFileStore::open_with_output(&input, &output).await.unwrap();
        let mut records = store.records().await;
        records[0].set_translation("title", "fr", "Bonjour".to_string());
        records[1].set_translation("title", "fr", "Au revoir".to_string());

        store.save(&records[0]).await.unwrap();
        store.mark_finished(&records[0]).await.unwrap();

        let written: Vec<MultilingualRecord> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written[0].translation("title", "fr"), Some("Bonjour"));
        assert!(written[0].finished_at.is_some());
        assert_eq!(written[1].translation("title", "fr"), Some(""));
        assert!(written[1].finished_at.is_none());

        // input untouched when an output path is given
        assert_eq!(std::fs::read_to_string(&input).unwrap(), RECORDS);
    }

    #[tokio::test]
    async fn test_save_unknown_record_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        std::fs::write(&input, RECORDS).unwrap();

        let store = JsonFileStore::open(&input).await.unwrap();
        let stranger = MultilingualRecord::new("99");
        let err = store.save(&stranger).await.unwrap_err();
        assert!(matches!(err, TranslatorError::Store(_)));
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonFileStore::open(dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(TranslatorError::Store(_))));
    }
}
