use crate::domain::model::NormalizedRecord;
use crate::domain::ports::{ConfigProvider, Sink};
use crate::utils::error::Result;
use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::Client;

/// Inserts the accepted batch into a MongoDB collection. Owns the
/// connection for the duration of one load; no retry or backoff.
pub struct MongoSink<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> MongoSink<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }
}

#[async_trait]
impl<C: ConfigProvider> Sink for MongoSink<C> {
    async fn load(&self, records: &[NormalizedRecord]) -> Result<u64> {
        if records.is_empty() {
            tracing::warn!("No accepted records; skipping database insert");
            return Ok(0);
        }

        let documents = records
            .iter()
            .map(mongodb::bson::to_document)
            .collect::<std::result::Result<Vec<Document>, _>>()?;

        tracing::debug!("Connecting to {}", self.config.connection_uri());
        let client = Client::with_uri_str(self.config.connection_uri()).await?;
        let collection = client
            .database(self.config.database())
            .collection::<Document>(self.config.collection());

        let result = collection.insert_many(documents).await?;
        Ok(result.inserted_ids.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_empty_batch_skips_connection() {
        let config = CliConfig {
            config: None,
            input_path: "data/member-data.csv".to_string(),
            delimiter: '|',
            columns: crate::config::DEFAULT_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            required_fields: crate::core::transform::CORE_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_formats: crate::config::DEFAULT_DATE_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reference_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            // nothing listens here; an empty batch must not try to connect
            connection_uri: "mongodb://127.0.0.1:1".to_string(),
            database: "etl_database".to_string(),
            collection: "employees".to_string(),
            json_output: None,
            verbose: false,
            log_json: false,
        };

        let sink = MongoSink::new(config);
        assert_eq!(sink.load(&[]).await.unwrap(), 0);
    }
}
