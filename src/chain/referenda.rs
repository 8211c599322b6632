//! Referenda sources - chain gateway over HTTP and JSON snapshots on disk

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::chain::{ChainError, ChainSource};
use crate::models::{Referendum, ReferendumIndex, ReferendumOngoing};

/// One element of the gateway's `/referenda` array
#[derive(Clone, Debug, Deserialize)]
pub struct ReferendumEntry {
    pub index: ReferendumIndex,
    pub info: Referendum,
}

/// Decode a referenda document, keeping the order it lists them in
pub fn parse_referenda(body: &str) -> Result<Vec<(ReferendumIndex, Referendum)>, ChainError> {
    let entries: Vec<ReferendumEntry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().map(|e| (e.index, e.info)).collect())
}

/// Keep only the ongoing referenda, in the order given
pub fn filter_ongoing<I>(referenda: I) -> Vec<(ReferendumIndex, ReferendumOngoing)>
where
    I: IntoIterator<Item = (ReferendumIndex, Referendum)>,
{
    referenda
        .into_iter()
        .filter_map(|(index, referendum)| referendum.into_ongoing().map(|r| (index, r)))
        .collect()
}

/// Chain gateway reachable over HTTP
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, ChainError> {
        Ok(HttpSource {
            client: create_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn referenda_url(&self) -> String {
        format!("{}/referenda", self.base_url)
    }
}

#[async_trait]
impl ChainSource for HttpSource {
    async fn referenda(&self) -> Result<Vec<(ReferendumIndex, Referendum)>, ChainError> {
        let url = self.referenda_url();
        tracing::debug!(url = %url, "Requesting referenda");

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChainError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        parse_referenda(&body)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Referenda snapshot saved as JSON on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait]
impl ChainSource for FileSource {
    async fn referenda(&self) -> Result<Vec<(ReferendumIndex, Referendum)>, ChainError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_referenda(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// HTTP client for the gateway. No request timeout here: the loader owns it.
fn create_client() -> Result<reqwest::Client, ChainError> {
    Ok(reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"index": 1, "info": {"ongoing": {
            "track": 0, "origin": {"system": {"root": null}},
            "proposal": {"lookup": {"hash": "0x01", "len": 10}},
            "enactment": {"at": 900}, "submitted": 10,
            "submissionDeposit": {"who": "alice", "amount": 1},
            "decisionDeposit": null, "deciding": null,
            "tally": {"ayes": 0, "nays": 0, "support": 0}, "inQueue": false}}},
        {"index": 2, "info": {"approved": [40, null, null]}},
        {"index": 3, "info": {"ongoing": {
            "track": 30, "origin": {"origins": "SmallTipper"},
            "proposal": {"inline": "0x0a0b0c"},
            "enactment": {"after": 10}, "submitted": 20,
            "submissionDeposit": {"who": "bob", "amount": "0x10"},
            "decisionDeposit": {"who": "bob", "amount": 5},
            "deciding": {"since": 25, "confirming": 30},
            "tally": {"ayes": "100", "nays": "50", "support": "100"}, "inQueue": true}}},
        {"index": 4, "info": {"killed": 41}}
    ]"#;

    #[test]
    fn test_parse_keeps_order() {
        let referenda = parse_referenda(SNAPSHOT).unwrap();
        let indices: Vec<_> = referenda.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_ongoing_drops_closed() {
        let ongoing = filter_ongoing(parse_referenda(SNAPSHOT).unwrap());
        let indices: Vec<_> = ongoing.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 3]);
        assert_eq!(ongoing[1].1.track, 30);
        assert!(ongoing[1].1.in_queue);
    }

    #[test]
    fn test_filter_ongoing_preserves_unsorted_order() {
        let mut referenda = parse_referenda(SNAPSHOT).unwrap();
        referenda.reverse();
        let indices: Vec<_> = filter_ongoing(referenda).into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![3, 1]);
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(parse_referenda("{}"), Err(ChainError::Decode(_))));
        assert!(matches!(
            parse_referenda(r#"[{"index": 1, "info": {"pending": 3}}]"#),
            Err(ChainError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source_reads_snapshot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("referenda.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let source = FileSource::new(&path);
        let referenda = source.referenda().await.unwrap();
        assert_eq!(referenda.len(), 4);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/referenda.json");
        assert!(matches!(source.referenda().await, Err(ChainError::Io(_))));
    }

    #[test]
    fn test_http_source_url() {
        let source = HttpSource::new("http://localhost:8080/").unwrap();
        assert_eq!(source.referenda_url(), "http://localhost:8080/referenda");
    }
}
