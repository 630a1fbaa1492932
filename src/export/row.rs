use chrono::SecondsFormat;

use crate::client::ProcessRecord;

/// Fixed CSV header. `proc_url` carries the process GUID; the label is kept
/// for output compatibility with the original tooling.
pub const CSV_HEADER: [&str; 12] = [
    "proc_timestamp",
    "proc_hostname",
    "proc_username",
    "proc_path",
    "proc_cmdline",
    "proc_hashes",
    "proc_child_count",
    "proc_filemod_count",
    "proc_modload_count",
    "proc_netconn_count",
    "proc_url",
    "parent_name",
];

/// One CSV data row: twelve scalar fields in fixed column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    fields: [String; 12],
}

impl Row {
    pub fn from_record(record: &ProcessRecord) -> Self {
        let hashes = record
            .process_hash
            .as_deref()
            .map(|hashes| hashes.join(","))
            .unwrap_or_default();

        Self {
            fields: [
                record
                    .device_timestamp
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                record.device_name.clone(),
                record.process_username.clone(),
                record.process_name.clone(),
                record.process_cmdline.clone(),
                hashes,
                record.childproc_count.to_string(),
                record.filemod_count.to_string(),
                record.modload_count.to_string(),
                record.netconn_count.to_string(),
                record.process_guid.clone(),
                record.parent_name.clone(),
            ],
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
