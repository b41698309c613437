mod error;
mod writer;

pub use error::WriteError;
pub use writer::write_report;
