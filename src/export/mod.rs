pub mod csv_writer;
pub mod row;

pub use csv_writer::{CsvExporter, append_mode, output_filename};
pub use row::{CSV_HEADER, Row};
