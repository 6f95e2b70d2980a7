use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::gateway::gate::GatePolicy;
use crate::http::connection::Connection;
use crate::store::Store;

pub async fn run<S: Store>(cfg: &Config, store: S) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    let policy = GatePolicy {
        require_endpoint: cfg.gate.require_endpoint,
    };

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let store = store.clone();
        let policy = policy.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, store, policy);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
