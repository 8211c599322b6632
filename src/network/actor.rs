//! Network actor - owns the chain connection and runs fetches in the Tokio runtime

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::chain::{self, ChainError, ChainSource};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Network;
use crate::network::loader::{load_referenda, LoadOutcome};

/// Builds a chain source from an endpoint string
pub type Connector = Box<dyn Fn(&str) -> Result<Arc<dyn ChainSource>, ChainError> + Send>;

/// The live connection
struct Connection {
    id: u64,
    source: Arc<dyn ChainSource>,
}

/// Tracks the in-flight fetch for cancellation
struct ActiveFetch {
    generation: u64,
    cancel_tx: oneshot::Sender<()>,
}

/// Network actor that processes connect and fetch commands
pub struct NetworkActor {
    connector: Connector,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    fetch_timeout: Duration,
    connection: Option<Connection>,
    active_fetch: Option<ActiveFetch>,
    tasks: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>, fetch_timeout: Duration) -> Self {
        Self::with_connector(response_tx, fetch_timeout, Box::new(chain::connect))
    }

    pub fn with_connector(
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
        fetch_timeout: Duration,
        connector: Connector,
    ) -> Self {
        NetworkActor {
            connector,
            response_tx,
            fetch_timeout,
            connection: None,
            active_fetch: None,
            tasks: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Connect { connection_id, endpoint, network }) => {
                            self.connect(connection_id, &endpoint, network);
                        }
                        Some(NetworkCommand::FetchReferenda { generation }) => {
                            self.fetch(generation);
                        }
                        Some(NetworkCommand::Shutdown) | None => {
                            self.cancel_active_fetch();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.tasks.join_next() => {}
            }
        }
    }

    fn connect(&mut self, connection_id: u64, endpoint: &str, network: Option<Network>) {
        self.cancel_active_fetch();

        match (self.connector)(endpoint) {
            Ok(source) => {
                let network = network.or_else(|| Network::detect(endpoint));
                tracing::info!(connection_id, source = %source.describe(), ?network, "Connected");
                self.connection = Some(Connection { id: connection_id, source });
                let _ = self.response_tx.send(NetworkResponse::Connected { connection_id, network });
            }
            Err(e) => {
                tracing::error!(connection_id, endpoint, error = %e, "Connection failed");
                self.connection = None;
                let _ = self.response_tx.send(NetworkResponse::ConnectFailed {
                    connection_id,
                    message: e.to_string(),
                });
            }
        }
    }

    fn fetch(&mut self, generation: u64) {
        self.cancel_active_fetch();

        let Some(connection) = &self.connection else {
            let _ = self.response_tx.send(NetworkResponse::FetchFailed {
                generation,
                cause: String::from("no chain connection"),
            });
            return;
        };

        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.active_fetch = Some(ActiveFetch { generation, cancel_tx });

        let source = connection.source.clone();
        let connection_id = connection.id;
        let timeout = self.fetch_timeout;
        let response_tx = self.response_tx.clone();

        self.tasks.spawn(async move {
            tracing::info!(generation, connection_id, "Fetching referenda");
            match load_referenda(source.as_ref(), timeout, cancel_rx).await {
                LoadOutcome::Loaded(referenda) => {
                    tracing::info!(generation, count = referenda.len(), "Referenda fetched");
                    let _ = response_tx.send(NetworkResponse::ReferendaLoaded { generation, referenda });
                }
                LoadOutcome::Failed(e) => {
                    let _ = response_tx.send(NetworkResponse::FetchFailed {
                        generation,
                        cause: e.to_string(),
                    });
                }
                LoadOutcome::Cancelled => {
                    tracing::info!(generation, "Referenda fetch cancelled");
                }
            }
        });
    }

    fn cancel_active_fetch(&mut self) {
        if let Some(active) = self.active_fetch.take() {
            tracing::debug!(generation = active.generation, "Cancelling fetch");
            let _ = active.cancel_tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    use crate::constants::FETCH_DATA_TIMEOUT;
    use crate::network::loader::tests::{one_approved, MockSource};

    fn spawn_actor(
        delay: Option<Duration>,
    ) -> (mpsc::UnboundedSender<NetworkCommand>, mpsc::UnboundedReceiver<NetworkResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let connector: Connector = Box::new(move |endpoint: &str| {
            if endpoint == "bad" {
                return Err(ChainError::InvalidEndpoint(endpoint.to_string()));
            }
            let source: Arc<dyn ChainSource> = Arc::new(MockSource {
                delay,
                result: one_approved,
                dropped: Arc::new(AtomicBool::new(false)),
            });
            Ok(source)
        });
        let actor = NetworkActor::with_connector(resp_tx, FETCH_DATA_TIMEOUT, connector);
        tokio::spawn(actor.run(cmd_rx));
        (cmd_tx, resp_rx)
    }

    fn connect(cmd_tx: &mpsc::UnboundedSender<NetworkCommand>, endpoint: &str) {
        cmd_tx
            .send(NetworkCommand::Connect {
                connection_id: 1,
                endpoint: endpoint.to_string(),
                network: None,
            })
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_detects_network() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Some(Duration::from_millis(10)));
        connect(&cmd_tx, "https://polkadot-gateway.example");
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::Connected { connection_id, network } => {
                assert_eq!(connection_id, 1);
                assert_eq!(network, Some(Network::Polkadot));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_failure() {
        let (cmd_tx, mut resp_rx) = spawn_actor(None);
        connect(&cmd_tx, "bad");
        assert!(matches!(
            resp_rx.recv().await.unwrap(),
            NetworkResponse::ConnectFailed { connection_id: 1, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_without_connection_fails() {
        let (cmd_tx, mut resp_rx) = spawn_actor(None);
        cmd_tx.send(NetworkCommand::FetchReferenda { generation: 1 }).unwrap();
        assert!(matches!(
            resp_rx.recv().await.unwrap(),
            NetworkResponse::FetchFailed { generation: 1, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_fetch_cancels_first() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Some(Duration::from_millis(100)));
        connect(&cmd_tx, "http://node");
        assert!(matches!(resp_rx.recv().await.unwrap(), NetworkResponse::Connected { .. }));

        cmd_tx.send(NetworkCommand::FetchReferenda { generation: 1 }).unwrap();
        cmd_tx.send(NetworkCommand::FetchReferenda { generation: 2 }).unwrap();

        match resp_rx.recv().await.unwrap() {
            NetworkResponse::ReferendaLoaded { generation, referenda } => {
                assert_eq!(generation, 2);
                assert_eq!(referenda.len(), 1);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        assert!(resp_rx.recv().await.is_none(), "generation 1 must never answer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_times_out() {
        let (cmd_tx, mut resp_rx) = spawn_actor(None);
        connect(&cmd_tx, "http://node");
        resp_rx.recv().await.unwrap();

        cmd_tx.send(NetworkCommand::FetchReferenda { generation: 7 }).unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::FetchFailed { generation, cause } => {
                assert_eq!(generation, 7);
                assert_eq!(cause, "timed out after 15000ms");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
