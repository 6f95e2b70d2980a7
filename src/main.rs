use keygate::config::{Config, StoreBackend};
use keygate::server;
use keygate::store::{MemoryStore, RedisStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    tokio::select! {
        res = serve(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn serve(cfg: &Config) -> anyhow::Result<()> {
    match cfg.store.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&cfg.store.url).await?;
            server::listener::run(cfg, store).await
        }

        StoreBackend::Memory => {
            tracing::warn!("Using in-process memory store; data is lost on exit");
            server::listener::run(cfg, MemoryStore::new()).await
        }
    }
}
