//! Chain layer - where referenda and tracks come from
//!
//! Referenda are fetched asynchronously through a [`ChainSource`]; tracks are
//! static per network and read synchronously.

pub mod referenda;
pub mod tracks;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::models::{Referendum, ReferendumIndex};

pub use referenda::{filter_ongoing, FileSource, HttpSource};
pub use tracks::get_all_tracks;

/// Errors raised while talking to a chain source
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gateway answered with status {0}")]
    Status(u16),
    #[error("could not read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed referenda data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unsupported endpoint {0:?}")]
    InvalidEndpoint(String),
}

/// Anything that can list every referendum known to a chain, in chain order
#[async_trait]
pub trait ChainSource: Send + Sync {
    async fn referenda(&self) -> Result<Vec<(ReferendumIndex, Referendum)>, ChainError>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}

/// Build the source matching an endpoint: `http(s)://` goes to a gateway,
/// `file://` or a `.json` path reads a snapshot
pub fn connect(endpoint: &str) -> Result<Arc<dyn ChainSource>, ChainError> {
    let endpoint = endpoint.trim();
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(endpoint)?))
    } else if let Some(path) = endpoint.strip_prefix("file://") {
        Ok(Arc::new(FileSource::new(path)))
    } else if endpoint.ends_with(".json") {
        Ok(Arc::new(FileSource::new(endpoint)))
    } else {
        Err(ChainError::InvalidEndpoint(endpoint.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_picks_source() {
        assert!(connect("http://127.0.0.1:8080").unwrap().describe().starts_with("http://"));
        assert_eq!(connect("file:///tmp/refs.json").unwrap().describe(), "/tmp/refs.json");
        assert_eq!(connect("snap.json").unwrap().describe(), "snap.json");
        assert!(matches!(
            connect("wss://rpc.polkadot.io"),
            Err(ChainError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_timeout_message() {
        let err = ChainError::Timeout(Duration::from_millis(15000));
        assert_eq!(err.to_string(), "timed out after 15000ms");
    }
}
