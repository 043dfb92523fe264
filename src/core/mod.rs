pub mod batch;
pub mod etl;
pub mod normalize;
pub mod transform;

pub use crate::domain::model::{
    BatchOutcome, BatchSummary, NormalizedRecord, RawRecord, Rejection,
};
pub use crate::domain::ports::{ConfigProvider, Sink, Source};
pub use crate::utils::error::Result;
