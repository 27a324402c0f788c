use std::borrow::Cow;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use burnbox_common::{StorageError, looks_like_id};
use burnbox_protocol::{
    CreateSecretRequest, CreateSecretResponse, HEALTH_PATH, HealthResponse,
    RevealSecretResponse, SECRETS_PATH, SHARE_PATH_PREFIX, describe_ttl,
};
use burnbox_storage::SecretStore;

use crate::rate_limit::{self, RateLimiter};
use crate::validate::validate_content;
use crate::ApiError;

/// Estado compartilhado entre os handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SecretStore,
    pub max_content_bytes: usize,
    /// Base dos links de compartilhamento, sem `/` final.
    pub public_url: String,
    /// `None` desliga o rate limit.
    pub limiter: Option<RateLimiter>,
}

/// Monta o router com todas as rotas da API.
///
/// O rate limit lê o IP do cliente de `ConnectInfo<SocketAddr>`, então só
/// tem efeito quando o router é servido com
/// `into_make_service_with_connect_info::<SocketAddr>()`. Sem isso as
/// requisições passam sem limite.
pub fn router(state: AppState) -> Router {
    // JSON pode escapar cada byte em até 6 (`\uXXXX`)
    let body_limit = state
        .max_content_bytes
        .saturating_mul(6)
        .saturating_add(1024);

    let secrets = Router::new()
        .route(SECRETS_PATH, post(create_secret))
        .route(&format!("{SECRETS_PATH}/{{id}}"), get(reveal_secret))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route(HEALTH_PATH, get(health))
        .merge(secrets)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
}

pub fn share_url(public_url: &str, id: &str) -> String {
    format!("{public_url}{SHARE_PATH_PREFIX}{id}")
}

async fn create_secret(
    State(state): State<AppState>,
    body: Result<Json<CreateSecretRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSecretResponse>), ApiError> {
    let Json(body) = body?;
    validate_content(&body.content, state.max_content_bytes)?;

    let receipt = state.store.put(body.content);
    let ttl = state.store.ttl();
    info!(secrets = state.store.len(), "segredo criado");

    let response = CreateSecretResponse {
        url: share_url(&state.public_url, &receipt.id),
        id: receipt.id,
        expires_in_secs: ttl.as_secs(),
        expires_in: describe_ttl(ttl),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Entrega o segredo uma única vez. Id malformado, desconhecido, expirado ou
/// já lido produzem a mesma resposta.
///
/// O corpo é serializado a partir de um empréstimo; o buffer original é
/// zerado quando `payload` sai de escopo.
async fn reveal_secret(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    if !looks_like_id(&id) {
        debug!("id com formato inválido");
        return Err(StorageError::NotFound.into());
    }

    let payload = state.store.take_if_valid(&id)?;
    info!(secrets = state.store.len(), "segredo revelado e destruído");

    let response = Json(RevealSecretResponse {
        content: Cow::Borrowed(payload.as_str()),
    })
    .into_response();
    Ok(response)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        secrets: state.store.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_url_format() {
        assert_eq!(
            share_url("https://burn.example", "67e55044-10b1-426f-9247-bb680e5fe0c8"),
            "https://burn.example/s/67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }
}
