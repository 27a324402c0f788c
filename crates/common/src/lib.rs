#![forbid(unsafe_code)]

mod error;

pub use error::*;

pub const DEFAULT_PORT: u16 = 8087;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8087";
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60; // 24 h
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60 * 60; // 1 h
pub const MAX_CONTENT_BYTES: usize = 100_000;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;

/// Comprimento do id na forma hifenizada (UUID v4).
pub const ID_LEN: usize = 36;

/// Checagem de formato de um id: só a forma hifenizada em minúsculas é
/// aceita, para que cada segredo tenha exatamente uma grafia. Existência e
/// expiração são decididas pelo store.
pub fn looks_like_id(id: &str) -> bool {
    id.len() == ID_LEN
        && id.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_digit() || (b'a'..=b'f').contains(&b),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_shape() {
        assert!(looks_like_id("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!looks_like_id("67e5504410b1426f9247bb680e5fe0c8"));
        assert!(!looks_like_id("67e55044-10b1-426f-9247-bb680e5fe0cz"));
        assert!(!looks_like_id(""));
        assert!(!looks_like_id("../../../../../../../../../etc/passwd"));
    }

    #[test]
    fn only_canonical_lowercase_form() {
        assert!(!looks_like_id("67E55044-10B1-426F-9247-BB680E5FE0C8"));
        assert!(!looks_like_id("{67e55044-10b1-426f-9247-bb680e5fe0}"));
        assert!(!looks_like_id("67e55044-10b1-426f-9247-bb680e5fe0c8-"));
        // hífens fora de posição
        assert!(!looks_like_id("67e5504-410b1-426f-9247-bb680e5fe0c8"));
        assert!(!looks_like_id("------------------------------------"));
    }

    #[test]
    fn defaults_match_documented_values() {
        assert_eq!(DEFAULT_TTL_SECS, 86_400);
        assert_eq!(DEFAULT_SWEEP_INTERVAL_SECS, 3_600);
        assert_eq!(MAX_CONTENT_BYTES, 100_000);
        assert_eq!(DEFAULT_SERVER_URL, format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"));
    }
}
