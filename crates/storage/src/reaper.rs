use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::SecretStore;

/// Resultado de uma varredura.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: usize,
    pub remaining: usize,
}

/// Background task que remove periodicamente os segredos expirados.
///
/// Roda até o canal de shutdown receber uma mensagem ou ser fechado.
pub struct Reaper {
    store: SecretStore,
    period: Duration,
}

impl Reaper {
    pub fn new(store: SecretStore, period: Duration) -> Self {
        Self { store, period }
    }

    pub fn sweep_once(&self) -> SweepReport {
        let removed = self.store.sweep(Instant::now());
        SweepReport {
            removed,
            remaining: self.store.len(),
        }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // primeiro tick é imediato

        info!("reaper iniciado, período {:?}", self.period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = self.sweep_once();
                    if report.removed > 0 {
                        info!(
                            removed = report.removed,
                            remaining = report.remaining,
                            "segredos expirados removidos"
                        );
                    } else {
                        debug!(remaining = report.remaining, "varredura sem expirados");
                    }
                }
                // Ok(()) ou Closed: ambos encerram
                _ = shutdown.recv() => break,
            }
        }

        info!("reaper encerrado");
    }

    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
