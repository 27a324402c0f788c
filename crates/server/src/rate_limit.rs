use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::{ApiError, AppState};

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

struct SharedState {
    windows: DashMap<IpAddr, Window>,
    limit: u32,
    window: Duration,
}

/// Limite por IP em janela fixa.
#[derive(Clone)]
pub struct RateLimiter {
    shared: Arc<SharedState>,
}

impl RateLimiter {
    /// `limit` requisições por minuto por IP.
    pub fn new(limit: u32) -> Self {
        Self::with_window(limit, WINDOW)
    }

    pub fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            shared: Arc::new(SharedState {
                windows: DashMap::new(),
                limit,
                window,
            }),
        }
    }

    /// Registra uma requisição; retorna `false` se o IP estourou a janela.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut w = self.shared.windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(w.started) >= self.shared.window {
            w.started = now;
            w.count = 0;
        }

        if w.count >= self.shared.limit {
            return false;
        }
        w.count += 1;
        true
    }

    /// Descarta janelas já vencidas. Retorna quantas removeu.
    pub fn prune(&self, now: Instant) -> usize {
        let mut removed = 0;
        let window = self.shared.window;
        self.shared.windows.retain(|_, w| {
            if now.duration_since(w.started) >= window {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn tracked(&self) -> usize {
        self.shared.windows.len()
    }

    /// Poda periódica, encerrada pelo mesmo sinal de shutdown do reaper.
    pub fn spawn_pruner(
        self,
        period: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = self.prune(Instant::now());
                        debug!(removed, tracked = self.tracked(), "janelas de rate limit podadas");
                    }
                    _ = shutdown.recv() => break,
                }
            }
        })
    }
}

/// Middleware axum que aplica o limite por IP do cliente.
///
/// Sem `ConnectInfo<SocketAddr>` nas extensões não há IP a contar e a
/// requisição passa.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(limiter) = &state.limiter {
        match request.extensions().get::<ConnectInfo<SocketAddr>>() {
            Some(ConnectInfo(addr)) if !limiter.check(addr.ip()) => {
                warn!("limite de requisições excedido");
                return ApiError::RateLimited.into_response();
            }
            Some(_) => {}
            None => warn!("rate limit ignorado: ConnectInfo ausente"),
        }
    }
    next.run(request).await
}
