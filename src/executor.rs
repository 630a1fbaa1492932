use anyhow::Result;
use tracing::info;

use crate::cancel::CancelToken;
use crate::client::ProcessStore;
use crate::export::Row;
use crate::query::TimeWindow;

const PROGRESS_INTERVAL: usize = 100;

/// Runs one query against the store and flattens every record into a row.
///
/// The window clause, when present, is appended verbatim to the query before
/// submission. Cancellation is checked at the iteration boundary: tripping the
/// token ends this query's loop and returns the rows accumulated so far as a
/// partial result, then clears the token so later queries in the batch run.
pub fn run_query(
    store: &dyn ProcessStore,
    query: &str,
    window: Option<&TimeWindow>,
    cancel: &CancelToken,
) -> Result<Vec<Row>> {
    let mut full_query = query.to_string();
    if let Some(window) = window {
        full_query.push_str(&window.clause());
    }

    info!(query = %full_query, "submitting process search");
    let collection = store.search(&full_query)?;
    let total = collection.total();
    info!("Total results: {total}");

    let mut rows = Vec::new();
    for record in collection {
        if cancel.is_cancelled() {
            info!("Caught CTRL-C. Returning what we have . . .");
            cancel.reset();
            return Ok(rows);
        }

        let record = record?;
        rows.push(Row::from_record(&record));

        if rows.len() % PROGRESS_INTERVAL == 0 {
            info!("Processing {} of {}", rows.len(), total);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ProcessCollection, ProcessRecord};
    use chrono::{TimeZone, Utc};

    fn record(n: usize) -> ProcessRecord {
        ProcessRecord {
            device_timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            device_name: format!("host-{n}"),
            process_username: "CORP\\alice".to_string(),
            process_name: "c:\\windows\\system32\\cmd.exe".to_string(),
            process_cmdline: "cmd.exe /c whoami".to_string(),
            process_hash: Some(vec!["d41d8cd98f00b204e9800998ecf8427e".to_string()]),
            childproc_count: 1,
            filemod_count: 0,
            modload_count: 40,
            netconn_count: 0,
            process_guid: format!("GUID-{n}"),
            parent_name: "explorer.exe".to_string(),
        }
    }

    /// Store yielding canned records; optionally trips a cancel token when the
    /// record at `cancel_at` is reached, or fails at `fail_at`.
    struct MockStore {
        records: Vec<ProcessRecord>,
        cancel_at: Option<(usize, CancelToken)>,
        fail_at: Option<usize>,
    }

    impl MockStore {
        fn new(count: usize) -> Self {
            Self {
                records: (0..count).map(record).collect(),
                cancel_at: None,
                fail_at: None,
            }
        }
    }

    impl ProcessStore for MockStore {
        fn search(&self, _query: &str) -> Result<ProcessCollection, ClientError> {
            let total = self.records.len();
            let cancel_at = self.cancel_at.clone();
            let fail_at = self.fail_at;
            let iter = self
                .records
                .clone()
                .into_iter()
                .enumerate()
                .map(move |(i, record)| {
                    if let Some((at, token)) = &cancel_at {
                        if i == *at {
                            token.cancel();
                        }
                    }
                    if fail_at == Some(i) {
                        return Err(ClientError::Api {
                            status: 500,
                            body: "mid-stream failure".to_string(),
                        });
                    }
                    Ok(record)
                });
            Ok(ProcessCollection::new(total, iter))
        }
    }

    #[test]
    fn test_all_records_become_rows() {
        let store = MockStore::new(7);
        let cancel = CancelToken::new();

        let rows = run_query(&store, "process_name:cmd.exe", None, &cancel).unwrap();
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn test_empty_result_set() {
        let store = MockStore::new(0);
        let cancel = CancelToken::new();

        let rows = run_query(&store, "", None, &cancel).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_cancel_keeps_partial_rows_and_resets_token() {
        let cancel = CancelToken::new();
        let mut store = MockStore::new(10);
        store.cancel_at = Some((4, cancel.clone()));

        let rows = run_query(&store, "", None, &cancel).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(!cancel.is_cancelled());

        // The next query in the batch still runs to completion.
        let next = MockStore::new(3);
        let rows = run_query(&next, "", None, &cancel).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_batch_rows_sum_across_queries() {
        let cancel = CancelToken::new();
        let stores = [MockStore::new(4), MockStore::new(0), MockStore::new(2)];

        let mut rows = Vec::new();
        for store in &stores {
            rows.extend(run_query(store, "", None, &cancel).unwrap());
        }
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn test_mid_stream_error_aborts() {
        let mut store = MockStore::new(5);
        store.fail_at = Some(2);
        let cancel = CancelToken::new();

        assert!(run_query(&store, "", None, &cancel).is_err());
    }

    #[test]
    fn test_window_clause_appended() {
        struct CapturingStore {
            seen: std::sync::Mutex<Vec<String>>,
        }

        impl ProcessStore for CapturingStore {
            fn search(&self, query: &str) -> Result<ProcessCollection, ClientError> {
                self.seen.lock().unwrap().push(query.to_string());
                Ok(ProcessCollection::new(0, std::iter::empty()))
            }
        }

        let store = CapturingStore {
            seen: std::sync::Mutex::new(Vec::new()),
        };
        let cancel = CancelToken::new();
        let window = TimeWindow::from_args(Some(1), None);

        run_query(&store, "process_name:cmd.exe", window.as_ref(), &cancel).unwrap();
        assert_eq!(
            store.seen.lock().unwrap()[0],
            "process_name:cmd.exe start:-1440m"
        );
    }
}
