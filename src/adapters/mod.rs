pub mod file_source;
pub mod json_sink;
pub mod mongo_sink;

pub use file_source::FileSource;
pub use json_sink::JsonLinesSink;
pub use mongo_sink::MongoSink;
