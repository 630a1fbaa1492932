use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::error::ClientError;
use crate::client::profile::Profile;
use crate::client::record::ProcessRecord;
use crate::client::{ProcessCollection, ProcessStore};

/// Rows requested per page.
const PAGE_SIZE: usize = 500;

const SEARCH_PATH: &str = "/api/v1/processes/search";

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    start: usize,
    rows: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    num_found: usize,
    results: Vec<ProcessRecord>,
}

/// Process store backed by the server's HTTP search endpoint.
///
/// Pages through results with `start`/`rows` parameters; the collection
/// returned by [`ProcessStore::search`] fetches pages lazily as it is
/// iterated.
pub struct HttpProcessStore {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpProcessStore {
    pub fn new(profile: &Profile) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: profile.url.trim_end_matches('/').to_string(),
            token: profile.token.clone(),
        })
    }
}

fn fetch_page(
    client: &Client,
    base_url: &str,
    token: &str,
    query: &str,
    start: usize,
) -> Result<SearchResponse, ClientError> {
    let url = format!("{base_url}{SEARCH_PATH}");
    debug!(%url, start, rows = PAGE_SIZE, "fetching result page");

    let response = client
        .post(&url)
        .header("X-Auth-Token", token)
        .json(&SearchRequest {
            query,
            start,
            rows: PAGE_SIZE,
        })
        .send()?;

    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

impl ProcessStore for HttpProcessStore {
    fn search(&self, query: &str) -> Result<ProcessCollection, ClientError> {
        let first = fetch_page(&self.client, &self.base_url, &self.token, query, 0)?;
        let total = first.num_found;

        // reqwest clients share their connection pool across clones
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let token = self.token.clone();
        let query = query.to_string();
        let fetch =
            move |start: usize| fetch_page(&client, &base_url, &token, &query, start);

        Ok(ProcessCollection::new(
            total,
            PageIter::new(total, first.results, fetch),
        ))
    }
}

/// Iterator over a paged result set. Yields the buffered page, then fetches
/// the next page until `total` records have been produced.
struct PageIter<F> {
    page: std::vec::IntoIter<ProcessRecord>,
    fetch: F,
    yielded: usize,
    total: usize,
    failed: bool,
}

impl<F> PageIter<F>
where
    F: FnMut(usize) -> Result<SearchResponse, ClientError>,
{
    fn new(total: usize, first_page: Vec<ProcessRecord>, fetch: F) -> Self {
        Self {
            page: first_page.into_iter(),
            fetch,
            yielded: 0,
            total,
            failed: false,
        }
    }
}

impl<F> Iterator for PageIter<F>
where
    F: FnMut(usize) -> Result<SearchResponse, ClientError>,
{
    type Item = Result<ProcessRecord, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(record) = self.page.next() {
                self.yielded += 1;
                return Some(Ok(record));
            }
            if self.yielded >= self.total {
                return None;
            }
            match (self.fetch)(self.yielded) {
                Ok(response) => {
                    if response.results.is_empty() {
                        // Server reported more rows than it will return; stop
                        // rather than spin on empty pages.
                        return None;
                    }
                    self.page = response.results.into_iter();
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
