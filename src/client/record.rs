use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed process execution as reported by the store.
///
/// `process_hash` is the only field a record may legitimately lack; everything
/// else is required, and a record missing a required field fails to decode and
/// aborts the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub device_timestamp: DateTime<Utc>,
    pub device_name: String,
    pub process_username: String,
    pub process_name: String,
    pub process_cmdline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_hash: Option<Vec<String>>,
    pub childproc_count: u64,
    pub filemod_count: u64,
    pub modload_count: u64,
    pub netconn_count: u64,
    pub process_guid: String,
    pub parent_name: String,
}
