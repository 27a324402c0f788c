use tokio::time::Instant;
use zeroize::Zeroizing;

/// Entrada no store: payload + instante de expiração.
///
/// O payload é zerado na memória quando a entrada é descartada.
#[derive(Debug)]
pub(crate) struct SecretEntry {
    payload: Zeroizing<String>,
    expires_at: Instant,
}

impl SecretEntry {
    pub(crate) fn new(payload: String, expires_at: Instant) -> Self {
        Self {
            payload: Zeroizing::new(payload),
            expires_at,
        }
    }

    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub(crate) fn into_payload(self) -> Zeroizing<String> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = Instant::now();
        let entry = SecretEntry::new("x".into(), now + Duration::from_secs(1));
        assert!(!entry.is_expired_at(now));
        assert!(entry.is_expired_at(now + Duration::from_secs(1)));
        assert!(entry.is_expired_at(now + Duration::from_secs(2)));
    }
}
