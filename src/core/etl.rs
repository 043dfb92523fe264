use crate::core::batch::BatchRunner;
use crate::domain::model::BatchSummary;
use crate::domain::ports::{Sink, Source};
use crate::utils::error::Result;

pub struct EtlEngine<S: Source, K: Sink> {
    source: S,
    sink: K,
    runner: BatchRunner,
}

impl<S: Source, K: Sink> EtlEngine<S, K> {
    pub fn new(source: S, sink: K, runner: BatchRunner) -> Self {
        Self {
            source,
            sink,
            runner,
        }
    }

    pub async fn run(&self) -> Result<BatchSummary> {
        tracing::info!("Extracting data...");
        let rows = self.source.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        tracing::info!("Transforming data...");
        let outcome = self.runner.run(rows);
        tracing::info!(
            "Accepted {} of {} rows ({} rejected)",
            outcome.summary.accepted,
            outcome.summary.rows_seen,
            outcome.summary.rejected
        );

        tracing::info!("Loading data...");
        let loaded = self.sink.load(&outcome.accepted).await?;
        tracing::info!("Loaded {} records", loaded);

        Ok(outcome.summary)
    }
}
