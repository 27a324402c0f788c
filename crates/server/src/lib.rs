#![forbid(unsafe_code)]

mod error;
pub mod handler;
pub mod rate_limit;
mod validate;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::time::Duration;
use tracing::info;

use burnbox_storage::Reaper;

pub use error::ApiError;
pub use handler::{AppState, router};
pub use rate_limit::RateLimiter;
pub use validate::validate_content;

/// Serve a API até `shutdown` completar.
///
/// Ordem de encerramento: conexões drenadas, reaper e pruner parados, store
/// limpo. Nada sobrevive ao processo.
pub async fn serve<F>(
    listener: TcpListener,
    state: AppState,
    sweep_interval: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let reaper = Reaper::new(state.store.clone(), sweep_interval).spawn(shutdown_tx.subscribe());
    let pruner = state
        .limiter
        .clone()
        .map(|limiter| limiter.spawn_pruner(sweep_interval, shutdown_tx.subscribe()));

    let store = state.store.clone();
    let app = router(state);

    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .context("erro no servidor HTTP");

    drop(shutdown_tx);
    reaper.await.context("reaper abortou")?;
    if let Some(pruner) = pruner {
        pruner.await.context("pruner abortou")?;
    }

    let discarded = store.len();
    store.clear();
    info!(discarded, "store limpo");

    result
}
