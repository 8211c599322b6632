//! App state - pure data structure with no I/O logic

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::app::session::VotingSession;
use crate::config::Config;
use crate::messages::RenderState;
use crate::models::{Network, Track, TrackId};

/// The connection the session is currently bound to
#[derive(Clone, Debug)]
pub struct ConnectionInfo {
    pub id: u64,
    pub network: Option<Network>,
    pub connected_at: DateTime<Local>,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Where to connect
    pub endpoint: String,
    pub network_override: Option<Network>,

    // Connection
    pub connection: Option<ConnectionInfo>,
    /// Id handed out by the latest connect; older ids are stale
    pub current_connection_id: u64,

    // Data loader
    pub tracks: BTreeMap<TrackId, Track>,
    /// Generation of the latest fetch; older results are discarded
    pub load_generation: u64,
    pub is_loading: bool,
    pub error: Option<String>,

    // Voting
    pub session: VotingSession,
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            endpoint: config.endpoint.clone(),
            network_override: config.network,
            connection: None,
            current_connection_id: 0,
            tracks: BTreeMap::new(),
            load_generation: 0,
            is_loading: false,
            error: None,
            session: VotingSession::new(),
            notice: None,
            show_help: false,
        }
    }

    pub fn network(&self) -> Option<Network> {
        self.connection.as_ref().and_then(|c| c.network)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let topmost = self
            .session
            .topmost()
            .map(|(index, referendum)| (index, referendum.clone()));
        let topmost_track = topmost
            .as_ref()
            .and_then(|(_, referendum)| self.tracks.get(&referendum.track))
            .cloned();

        RenderState {
            endpoint: self.endpoint.clone(),
            connected: self.connection.is_some(),
            connected_at: self.connection.as_ref().map(|c| c.connected_at),
            network: self.network(),
            phase: self.session.phase(),
            topmost,
            topmost_track,
            remaining: self.session.remaining(),
            votes: self.session.votes().to_vec(),
            is_loading: self.is_loading,
            error: self.error.clone(),
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
