pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FileSource, JsonLinesSink, MongoSink};
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::{batch::BatchRunner, etl::EtlEngine, transform::RecordTransformer};
pub use utils::error::{EtlError, Result};
