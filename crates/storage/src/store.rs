use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use burnbox_common::{StorageError, StorageResult, looks_like_id};

use crate::entry::SecretEntry;

/// Resultado de um `put`: o id (credencial de acesso) e quando expira.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub id: String,
    pub expires_at: Instant,
}

struct SharedState {
    entries: DashMap<Uuid, SecretEntry>,
    ttl: Duration,
}

/// Handle para o store in-memory de segredos de leitura única.
///
/// Toda mutação é insert-inteiro ou remove-inteiro sob o lock do shard do
/// `DashMap`. Ids não devem aparecer em logs: quem tem o id tem o segredo.
#[derive(Clone)]
pub struct SecretStore {
    shared: Arc<SharedState>,
}

impl SecretStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            shared: Arc::new(SharedState {
                entries: DashMap::new(),
                ttl,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    /// Armazena o payload sob um id UUID v4 novo e retorna o recibo.
    pub fn put(&self, payload: String) -> Receipt {
        let expires_at = Instant::now() + self.shared.ttl;
        let entry = SecretEntry::new(payload, expires_at);

        // Colisão de v4 é astronomicamente improvável, mas um id vivo nunca é
        // sobrescrito.
        loop {
            let id = Uuid::new_v4();
            if let Entry::Vacant(slot) = self.shared.entries.entry(id) {
                slot.insert(entry);
                return Receipt {
                    id: id.hyphenated().to_string(),
                    expires_at,
                };
            }
        }
    }

    /// Remove e retorna o payload se o id existir e ainda não tiver expirado.
    ///
    /// A remoção acontece antes da checagem de expiração: só quem removeu a
    /// entrada do mapa pode vê-la, então dois chamadores concorrentes nunca
    /// recebem o mesmo payload. Só a forma hifenizada em minúsculas, a mesma
    /// que `put` devolve, alcança a entrada.
    pub fn take_if_valid(&self, id: &str) -> StorageResult<Zeroizing<String>> {
        if !looks_like_id(id) {
            return Err(StorageError::NotFound);
        }
        let key = Uuid::try_parse(id).map_err(|_| StorageError::NotFound)?;
        let (_, entry) = self
            .shared
            .entries
            .remove(&key)
            .ok_or(StorageError::NotFound)?;

        if entry.is_expired_at(Instant::now()) {
            debug!("segredo expirado descartado na leitura");
            return Err(StorageError::NotFound);
        }
        Ok(entry.into_payload())
    }

    /// Remove toda entrada com `expires_at <= now`. Retorna quantas removeu.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.shared.entries.retain(|_, entry| {
            if entry.is_expired_at(now) {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.shared.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.entries.is_empty()
    }

    /// Descarta todas as entradas. Usado no shutdown.
    pub fn clear(&self) {
        self.shared.entries.clear();
    }
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(burnbox_common::DEFAULT_TTL_SECS))
    }
}
