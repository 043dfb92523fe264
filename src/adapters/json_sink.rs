use crate::domain::model::NormalizedRecord;
use crate::domain::ports::Sink;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

/// Writes one JSON document per accepted record. Stands in for the
/// database sink on dry runs and in tests.
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Sink for JsonLinesSink {
    async fn load(&self, records: &[NormalizedRecord]) -> Result<u64> {
        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            lines.push(serde_json::to_string(record)?);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;

        tracing::info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(records.len() as u64)
    }
}
