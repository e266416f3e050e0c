//! Thin HTTP client for the banking API under test.
//!
//! Two deployed flavors of the API exist. The classic flavor accepts
//! form-encoded bodies and answers `200 OK` with a human-readable text body
//! that embeds the created identifier after an `ID: ` marker. The REST
//! flavor accepts JSON and answers `201 Created` with a JSON body carrying
//! an `id` field. [`ApiVariant`] selects the encoding and the expected
//! success status; [`extract_entity_id`] understands both body shapes.

use std::str::FromStr;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Which flavor of the banking API the harness is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVariant {
    /// Form-encoded requests, `200 OK` text responses.
    Classic,
    /// JSON requests, `201 Created` JSON responses.
    Rest,
}

impl ApiVariant {
    /// The status a successful creation or mutation answers with.
    pub fn success_status(&self) -> StatusCode {
        match self {
            ApiVariant::Classic => StatusCode::OK,
            ApiVariant::Rest => StatusCode::CREATED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVariant::Classic => "classic",
            ApiVariant::Rest => "rest",
        }
    }
}

impl FromStr for ApiVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(ApiVariant::Classic),
            "rest" => Ok(ApiVariant::Rest),
            other => Err(format!("unknown API variant '{other}'")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("POST {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A completed HTTP exchange: status plus the full response body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Extracts the server-assigned identifier from the body, if any.
    pub fn entity_id(&self) -> Option<String> {
        extract_entity_id(&self.body)
    }
}

/// Pulls a created-entity identifier out of a response body.
///
/// JSON bodies yield their top-level `id` field (string or number). Text
/// bodies yield whatever follows the last `ID: ` marker. Returns `None`
/// when neither shape matches, which callers treat as "nothing to publish".
pub fn extract_entity_id(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return match value.get("id") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
    }
    let marker = body.rfind("ID: ")?;
    let id = body[marker + 4..].trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Shared HTTP client, cheap to clone across virtual users.
#[derive(Debug, Clone)]
pub struct BankClient {
    http: Client,
    base_url: String,
    variant: ApiVariant,
}

impl BankClient {
    pub fn new(
        base_url: impl Into<String>,
        variant: ApiVariant,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("banco-load/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            variant,
        })
    }

    pub fn variant(&self) -> ApiVariant {
        self.variant
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one POST with the body encoded per the active [`ApiVariant`].
    /// Any status counts as a completed exchange; only transport-level
    /// failures (connect, timeout, body read) surface as errors.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.post(&url);
        let request = match self.variant {
            ApiVariant::Classic => request.form(body),
            ApiVariant::Rest => request.json(body),
        };
        let response = request.send().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;
        tracing::trace!(%url, status = status.as_u16(), "request completed");
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id_from_text_marker() {
        let body = "Conta criada com sucesso! ID: 4f3a2b1c";
        assert_eq!(extract_entity_id(body), Some("4f3a2b1c".to_string()));
    }

    #[test]
    fn test_extract_id_trims_whitespace() {
        assert_eq!(
            extract_entity_id("Chave PIX registrada! ID: abc-123\n"),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_extract_id_uses_last_marker() {
        let body = "primeiro ID: a, segundo ID: b";
        assert_eq!(extract_entity_id(body), Some("b".to_string()));
    }

    #[test]
    fn test_extract_id_missing_marker() {
        assert_eq!(extract_entity_id("Cartão virtual gerado! Número: 1234"), None);
        assert_eq!(extract_entity_id(""), None);
        assert_eq!(extract_entity_id("ID: "), None);
    }

    #[test]
    fn test_extract_id_from_json_string() {
        let body = r#"{"id": "acc-42", "titular": "Fulano"}"#;
        assert_eq!(extract_entity_id(body), Some("acc-42".to_string()));
    }

    #[test]
    fn test_extract_id_from_json_number() {
        assert_eq!(extract_entity_id(r#"{"id": 42}"#), Some("42".to_string()));
    }

    #[test]
    fn test_extract_id_json_without_id_field() {
        assert_eq!(extract_entity_id(r#"{"status": "ok"}"#), None);
        assert_eq!(extract_entity_id(r#"{"id": ""}"#), None);
    }

    #[test]
    fn test_variant_success_status() {
        assert_eq!(ApiVariant::Classic.success_status(), StatusCode::OK);
        assert_eq!(ApiVariant::Rest.success_status(), StatusCode::CREATED);
    }

    #[test]
    fn test_variant_parse_round_trip() {
        assert_eq!("classic".parse::<ApiVariant>().unwrap(), ApiVariant::Classic);
        assert_eq!("rest".parse::<ApiVariant>().unwrap(), ApiVariant::Rest);
        assert!("soap".parse::<ApiVariant>().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BankClient::new(
            "http://localhost:8080/",
            ApiVariant::Classic,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
