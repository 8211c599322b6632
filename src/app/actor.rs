//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let _ = self.network_tx.send(self.state.connect());
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    if let Some(cmd) = self.state.handle_response(response) {
                        let _ = self.network_tx.send(cmd);
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Vote(vote) => self.state.vote(vote),
            UiEvent::Reconnect => {
                let _ = self.network_tx.send(self.state.connect());
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::SessionPhase;
    use crate::models::{Network, Proposal, Referendum, ReferendumOngoing, Tally, VoteType};

    fn ongoing() -> Referendum {
        Referendum::Ongoing(ReferendumOngoing {
            track: 0,
            origin: serde_json::Value::Null,
            proposal: Proposal::Legacy { hash: String::from("0xff") },
            enactment: None,
            submitted: 0,
            submission_deposit: None,
            decision_deposit: None,
            deciding: None,
            tally: Tally::default(),
            in_queue: false,
        })
    }

    #[tokio::test]
    async fn test_session_over_channels() {
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(&Config::default(), net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        let Some(NetworkCommand::Connect { connection_id, .. }) = net_cmd_rx.recv().await else {
            panic!("actor should connect on start");
        };
        net_resp_tx
            .send(NetworkResponse::Connected { connection_id, network: Some(Network::Westend) })
            .unwrap();

        let Some(NetworkCommand::FetchReferenda { generation }) = net_cmd_rx.recv().await else {
            panic!("actor should fetch after connecting");
        };
        net_resp_tx
            .send(NetworkResponse::ReferendaLoaded {
                generation,
                referenda: vec![(10, ongoing()), (11, ongoing())],
            })
            .unwrap();

        // wait until the load is visible
        loop {
            let state = render_rx.recv().await.unwrap();
            if state.remaining == 2 {
                break;
            }
        }

        ui_tx.send(UiEvent::Vote(VoteType::Aye)).unwrap();
        ui_tx.send(UiEvent::Vote(VoteType::Nay)).unwrap();

        let summary = loop {
            let state = render_rx.recv().await.unwrap();
            if state.phase == SessionPhase::Summary {
                break state;
            }
        };
        let votes: Vec<_> = summary.votes.iter().map(|v| (v.index, v.vote)).collect();
        assert_eq!(votes, vec![(11, VoteType::Aye), (10, VoteType::Nay)]);

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();
    }
}
