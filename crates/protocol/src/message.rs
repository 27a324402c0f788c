use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Corpo de `POST /api/secrets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSecretRequest {
    pub content: String,
}

/// Resposta de criação: id, link de compartilhamento e prazo de expiração.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSecretResponse {
    pub id: String,
    pub url: String,
    pub expires_in_secs: u64,
    /// Descrição legível, ex.: "24 horas".
    pub expires_in: String,
}

/// Resposta de leitura. O servidor serializa a partir de um empréstimo do
/// payload guardado; clientes desserializam para `Cow::Owned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealSecretResponse<'a> {
    pub content: Cow<'a, str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub secrets: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_from_json() {
        let req: CreateSecretRequest =
            serde_json::from_str(r#"{"content":"hello"}"#).unwrap();
        assert_eq!(req.content, "hello");
    }

    #[test]
    fn create_request_missing_content() {
        let res = serde_json::from_str::<CreateSecretRequest>(r#"{"text":"hello"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn create_response_field_names() {
        let resp = CreateSecretResponse {
            id: "abc".into(),
            url: "http://localhost/s/abc".into(),
            expires_in_secs: 86_400,
            expires_in: "24 horas".into(),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["url"], "http://localhost/s/abc");
        assert_eq!(value["expires_in_secs"], 86_400);
        assert_eq!(value["expires_in"], "24 horas");
    }

    #[test]
    fn reveal_response_borrows_for_serialization() {
        let payload = String::from("s3nha\n");
        let resp = RevealSecretResponse {
            content: Cow::Borrowed(payload.as_str()),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"content":"s3nha\n"}"#);

        let back: RevealSecretResponse<'static> = serde_json::from_str(&json).unwrap();
        assert!(matches!(back.content, Cow::Owned(_)));
        assert_eq!(back.content, "s3nha\n");
    }

    #[test]
    fn error_response_shape() {
        let resp = ErrorResponse {
            error: "segredo não encontrado ou já acessado".into(),
            code: 404,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            json,
            r#"{"error":"segredo não encontrado ou já acessado","code":404}"#
        );
    }
}
