pub mod etl;
pub mod mapper;
pub mod pipeline;
pub mod report;
pub mod writer;

pub use crate::domain::model::{SourceRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
