use std::fs;
use std::path::{Path, PathBuf};

use crate::client::error::ClientError;

/// A named credential profile: server URL plus API token.
///
/// Profiles live in an INI-style file, one `[section]` per profile with
/// `url=` and `token=` keys:
///
/// ```text
/// [default]
/// url=https://defense.example.com
/// token=ABCDEF/GHIJKL
/// ```
#[derive(Debug, Clone)]
pub struct Profile {
    pub url: String,
    pub token: String,
}

/// Default credential file location, `~/.carbonblack/credentials.psc`.
pub fn default_credentials_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".carbonblack").join("credentials.psc"))
        .unwrap_or_else(|| PathBuf::from("credentials.psc"))
}

impl Profile {
    /// Loads the named profile from the credential file at `path`.
    pub fn load(path: &Path, name: &str) -> Result<Self, ClientError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ClientError::Credentials(format!(
                "cannot read credential file {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&contents, name, path)
    }

    fn parse(contents: &str, name: &str, path: &Path) -> Result<Self, ClientError> {
        let mut in_section = false;
        let mut seen_section = false;
        let mut url = None;
        let mut token = None;

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(section) = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                in_section = section == name;
                seen_section |= in_section;
                continue;
            }
            if !in_section {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                match key.trim() {
                    "url" => url = Some(value.trim().to_string()),
                    "token" => token = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        if !seen_section {
            return Err(ClientError::Credentials(format!(
                "profile '{name}' not found in {}",
                path.display()
            )));
        }

        match (url, token) {
            (Some(url), Some(token)) => Ok(Self { url, token }),
            (None, _) => Err(ClientError::Credentials(format!(
                "profile '{name}' has no url key"
            ))),
            (_, None) => Err(ClientError::Credentials(format!(
                "profile '{name}' has no token key"
            ))),
        }
    }
}
