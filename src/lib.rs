//! # SwipeVote
//!
//! Swipe through the ongoing on-chain referenda of a Substrate relay chain
//! and cast Aye/Nay decisions, right in the terminal.
//!
//! ## Features
//! - Referenda from a chain gateway over HTTP or from a JSON snapshot
//! - Built-in governance track tables (Polkadot, Kusama, Westend)
//! - Fetch raced against a timeout, with stale results discarded
//! - Keyboard and mouse-drag swiping
//! - End-of-session vote summary
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (Voting session state machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod config;
pub mod ui;
pub mod chain;
pub mod messages;
pub mod app;
pub mod network;
pub mod constants;

// Re-export commonly used types
pub use models::{Network, Referendum, ReferendumIndex, ReferendumOngoing, Track, Vote, VoteType};
pub use chain::{filter_ongoing, get_all_tracks, ChainError, ChainSource};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, SessionPhase};
pub use app::session::{VoteError, VotingSession};
pub use network::NetworkActor;
