//! Command handlers - business logic for processing UI events and network responses

use chrono::Local;

use crate::app::state::ConnectionInfo;
use crate::app::AppState;
use crate::chain::{filter_ongoing, get_all_tracks};
use crate::constants::{CONNECT_ERROR_MESSAGE, FETCH_ERROR_MESSAGE};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Network, VoteType};

impl AppState {
    // ========================
    // Connection
    // ========================

    /// Start a new connection. The old one is forgotten immediately, so its
    /// late responses are ignored, including a load still in flight.
    pub fn connect(&mut self) -> NetworkCommand {
        self.current_connection_id += 1;
        self.load_generation += 1;
        if let Some(previous) = self.connection.take() {
            tracing::info!(previous = previous.id, "Dropping connection");
        }
        tracing::info!(connection_id = self.current_connection_id, endpoint = %self.endpoint, "Connecting");
        NetworkCommand::Connect {
            connection_id: self.current_connection_id,
            endpoint: self.endpoint.clone(),
            network: self.network_override,
        }
    }

    /// Runs once per connection identity
    fn on_connected(&mut self, connection_id: u64, network: Option<Network>) -> NetworkCommand {
        self.connection = Some(ConnectionInfo {
            id: connection_id,
            network,
            connected_at: Local::now(),
        });
        self.begin_load(network)
    }

    // ========================
    // Data loader
    // ========================

    /// Store the tracks right away, then ask for the referenda
    pub fn begin_load(&mut self, network: Option<Network>) -> NetworkCommand {
        self.tracks = network.map(get_all_tracks).unwrap_or_default();
        self.load_generation += 1;
        self.is_loading = true;
        NetworkCommand::FetchReferenda {
            generation: self.load_generation,
        }
    }

    /// Apply a network response; may answer with a follow-up command
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::Connected { connection_id, network } => {
                if connection_id != self.current_connection_id {
                    tracing::warn!(connection_id, "Ignoring stale connection");
                    return None;
                }
                Some(self.on_connected(connection_id, network))
            }
            NetworkResponse::ConnectFailed { connection_id, message } => {
                if connection_id == self.current_connection_id {
                    tracing::error!(connection_id, %message, "Could not connect");
                    self.is_loading = false;
                    self.error = Some(String::from(CONNECT_ERROR_MESSAGE));
                }
                None
            }
            NetworkResponse::ReferendaLoaded { generation, referenda } => {
                if generation != self.load_generation {
                    tracing::warn!(generation, latest = self.load_generation, "Discarding stale referenda");
                    return None;
                }
                let ongoing = filter_ongoing(referenda);
                tracing::info!(generation, ongoing = ongoing.len(), "Referenda ready");
                self.session.replace_pending(ongoing);
                self.is_loading = false;
                self.error = None;
                None
            }
            NetworkResponse::FetchFailed { generation, cause } => {
                if generation != self.load_generation {
                    tracing::warn!(generation, %cause, "Discarding stale fetch failure");
                    return None;
                }
                tracing::error!(generation, %cause, "Failed to fetch referenda");
                self.is_loading = false;
                self.error = Some(String::from(FETCH_ERROR_MESSAGE));
                None
            }
        }
    }

    // ========================
    // Voting
    // ========================

    pub fn vote(&mut self, vote: VoteType) {
        match self.session.vote_topmost(vote) {
            Ok(index) => {
                tracing::info!(index, vote = vote.as_str(), remaining = self.session.remaining(), "Vote cast");
                self.notice = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Vote rejected");
                self.notice = Some(e.to_string());
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
