mod error;
mod extract;
mod model;
mod parser;

pub use error::ExtractionError;
pub use extract::{extract_records, snapshot};
pub use model::PerfRecord;
