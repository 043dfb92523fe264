use crate::domain::model::{NormalizedRecord, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Produces the raw row sequence. A failed extract is fatal and aborts
/// the run before the batch runner is invoked.
#[async_trait]
pub trait Source: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRecord>>;
}

/// Persists the accepted records. Returns how many were written.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn load(&self, records: &[NormalizedRecord]) -> Result<u64>;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn columns(&self) -> &[String];
    fn required_fields(&self) -> &[String];
    fn date_formats(&self) -> &[String];
    fn reference_date(&self) -> NaiveDate;
    fn connection_uri(&self) -> &str;
    fn database(&self) -> &str;
    fn collection(&self) -> &str;
    fn json_output(&self) -> Option<&str>;
}
