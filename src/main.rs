use clap::Parser;
use member_etl::adapters::{FileSource, JsonLinesSink, MongoSink};
use member_etl::core::batch::BatchRunner;
use member_etl::core::etl::EtlEngine;
use member_etl::core::transform::{RecordTransformer, TransformConfig};
use member_etl::domain::model::BatchSummary;
use member_etl::domain::ports::ConfigProvider;
use member_etl::utils::{logger, validation::Validate};
use member_etl::{CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting member-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => run(config).await,
            Err(e) => Err(e.into()),
        },
        None => run(cli).await,
    };

    match result {
        Ok(summary) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!(
                "✅ ETL run completed: {} rows seen, {} accepted, {} rejected",
                summary.rows_seen, summary.accepted, summary.rejected
            );
        }
        Err(e) => {
            tracing::error!("❌ ETL process failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run<C>(config: C) -> anyhow::Result<BatchSummary>
where
    C: ConfigProvider + Validate + Clone,
{
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let transformer = RecordTransformer::new(TransformConfig::from_provider(&config));
    let runner = BatchRunner::new(transformer);
    let source = FileSource::new(config.clone());

    let summary = match config.json_output() {
        Some(path) => {
            tracing::info!("📁 Writing accepted records to {}", path);
            let sink = JsonLinesSink::new(path);
            EtlEngine::new(source, sink, runner).run().await?
        }
        None => {
            let sink = MongoSink::new(config.clone());
            EtlEngine::new(source, sink, runner).run().await?
        }
    };

    tracing::debug!("Batch summary: {}", serde_json::to_string(&summary)?);
    Ok(summary)
}
