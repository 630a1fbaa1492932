pub mod cancel;
pub mod client;
pub mod executor;
pub mod export;
pub mod logging;
pub mod query;

pub use cancel::CancelToken;
pub use client::{
    ClientError, HttpProcessStore, ProcessCollection, ProcessRecord, ProcessStore, Profile,
    default_credentials_path,
};
pub use executor::run_query;
pub use export::{CSV_HEADER, CsvExporter, Row, append_mode, output_filename};
pub use query::{TimeWindow, build_queries};
