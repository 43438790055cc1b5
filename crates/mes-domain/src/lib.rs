mod dataset;
mod domain_stubs;
mod errors;
mod record;
mod record_source;

pub use dataset::Dataset;
pub use domain_stubs::DomainStubs;
pub use errors::DomainError;
pub use record::{parse_date, FieldValue, Record};
pub use record_source::{InMemoryRecordSource, JsonFileSource, RecordSource};
