//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::app::session::SessionPhase;
use crate::constants::DEFAULT_ENDPOINT;
use crate::models::{Network, ReferendumIndex, ReferendumOngoing, Track, Vote};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Connection
    pub endpoint: String,
    pub connected: bool,
    pub connected_at: Option<DateTime<Local>>,
    pub network: Option<Network>,

    // Session
    pub phase: SessionPhase,
    pub topmost: Option<(ReferendumIndex, ReferendumOngoing)>,
    /// Track of the topmost referendum, if known for this network
    pub topmost_track: Option<Track>,
    pub remaining: usize,
    pub votes: Vec<Vote>,

    // Loading / errors
    pub is_loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            endpoint: String::from(DEFAULT_ENDPOINT),
            connected: false,
            connected_at: None,
            network: None,
            phase: SessionPhase::Voting,
            topmost: None,
            topmost_track: None,
            remaining: 0,
            votes: Vec::new(),
            is_loading: false,
            error: None,
            notice: None,
            show_help: false,
        }
    }
}
