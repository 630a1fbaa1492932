use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Assembles the ordered list of queries for one invocation.
///
/// An ad-hoc query wins over a query file; with neither, a single empty-string
/// query is returned, which the store treats as "match all". Query-file lines
/// are trimmed and kept in file order.
pub fn build_queries(query: Option<&str>, queryfile: Option<&Path>) -> Result<Vec<String>> {
    if let Some(query) = query {
        return Ok(vec![query.to_string()]);
    }

    if let Some(path) = queryfile {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file: {}", path.display()))?;
        return Ok(contents
            .lines()
            .map(|line| line.trim().to_string())
            .collect());
    }

    Ok(vec![String::new()])
}
