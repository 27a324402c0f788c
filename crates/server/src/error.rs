use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use burnbox_common::{StorageError, ValidationError};
use burnbox_protocol::ErrorResponse;

/// Erros da camada HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Corpo ausente, malformado, com content-type errado ou grande demais.
    #[error("corpo da requisição inválido: {}", .0.body_text())]
    Json(#[from] JsonRejection),
    #[error("muitas requisições, tente novamente em instantes")]
    RateLimited,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Json(rejection) => rejection.status(),
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::from(ValidationError::Empty).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StorageError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn json_rejection_keeps_its_status() {
        use axum::extract::rejection::MissingJsonContentType;

        let err = ApiError::from(JsonRejection::from(MissingJsonContentType::default()));
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(err.to_string().starts_with("corpo da requisição inválido: "));
    }

    #[test]
    fn not_found_message_is_generic() {
        let err = ApiError::from(StorageError::NotFound);
        assert_eq!(err.to_string(), "segredo não encontrado ou já acessado");
    }
}
