//! Network messages - communication between App and Network layers

use crate::models::{Network, Referendum, ReferendumIndex};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Open a chain connection; a new id replaces the previous connection
    Connect {
        connection_id: u64,
        endpoint: String,
        network: Option<Network>,
    },
    /// Fetch every referendum through the current connection. Cancels any
    /// fetch still in flight.
    FetchReferenda {
        generation: u64,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Connection ready; `network` is None when it could not be identified
    Connected {
        connection_id: u64,
        network: Option<Network>,
    },
    ConnectFailed {
        connection_id: u64,
        message: String,
    },
    /// Full referenda list, in chain order
    ReferendaLoaded {
        generation: u64,
        referenda: Vec<(ReferendumIndex, Referendum)>,
    },
    /// Fetch timed out or failed
    FetchFailed {
        generation: u64,
        cause: String,
    },
}
