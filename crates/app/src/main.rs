use std::sync::Arc;

use engine::store::{MemoryStore, Store};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wirepay={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let store: Arc<dyn Store> = match settings.store.backend {
        settings::StoreBackend::Memory => {
            if let Some(endpoint) = &settings.store.endpoint {
                tracing::warn!("store.endpoint {endpoint} ignored by the memory backend");
            }
            Arc::new(MemoryStore::new())
        }
    };
    let engine = engine::Engine::builder().store(store).build();

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tokio::select! {
        result = server::run_with_listener(engine, listener) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
