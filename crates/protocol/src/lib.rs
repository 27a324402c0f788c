#![forbid(unsafe_code)]

mod message;
mod ttl;

pub use message::{
    CreateSecretRequest, CreateSecretResponse, ErrorResponse, HealthResponse,
    RevealSecretResponse,
};
pub use ttl::describe_ttl;

pub const SECRETS_PATH: &str = "/api/secrets";
pub const HEALTH_PATH: &str = "/health";
/// Prefixo dos links entregues ao usuário: `{public_url}/s/{id}`.
pub const SHARE_PATH_PREFIX: &str = "/s/";
