//! HTTP client for a remote waitlist deployment

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::waitlist::{
    redact_email, RegistrationError, RegistrationRecord, RegistrationService, TargetLanguage,
};
use crate::domain::DomainError;

const REGISTER_PATH: &str = "/v1/waitlist";

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_language: Option<TargetLanguage>,
}

/// Registers through `POST {base_url}/v1/waitlist` on another instance
#[derive(Debug, Clone)]
pub struct RemoteRegistrationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteRegistrationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), REGISTER_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull `error.message` out of an API error envelope, falling back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn transport_error(error: reqwest::Error) -> RegistrationError {
    if error.is_timeout() {
        RegistrationError::TimedOut
    } else {
        RegistrationError::Unavailable(format!("Request failed: {}", error))
    }
}

#[async_trait]
impl RegistrationService for RemoteRegistrationClient {
    async fn register(
        &self,
        email: &str,
        target_language: Option<TargetLanguage>,
    ) -> Result<RegistrationRecord, RegistrationError> {
        debug!(email = %redact_email(email), endpoint = %self.endpoint, "Registering remotely");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RegisterBody {
                email,
                target_language,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);

            warn!(%status, message = %message, "Remote registration refused");

            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    RegistrationError::Rejected(message)
                }
                _ => RegistrationError::Unavailable(format!("HTTP {}: {}", status, message)),
            });
        }

        response.json::<RegistrationRecord>().await.map_err(|e| {
            if e.is_timeout() {
                RegistrationError::TimedOut
            } else {
                RegistrationError::Unavailable(format!("Failed to parse response: {}", e))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record_json(email: &str, newly_created: bool) -> serde_json::Value {
        json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "email": email,
            "target_language": "japanese",
            "created_at": "2026-01-15T10:00:00Z",
            "newly_created": newly_created
        })
    }

    fn client(server: &MockServer) -> RemoteRegistrationClient {
        RemoteRegistrationClient::new(&server.uri(), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client =
            RemoteRegistrationClient::new("https://lody.app/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "https://lody.app/v1/waitlist");
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error": {"message": "bad email", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body), "bad email");
        assert_eq!(error_message("  plain text  "), "plain text");
    }

    #[tokio::test]
    async fn test_register_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/waitlist"))
            .and(body_json(json!({
                "email": "fan@lody.app",
                "target_language": "japanese"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(record_json("fan@lody.app", true)))
            .expect(1)
            .mount(&server)
            .await;

        let record = client(&server)
            .register("fan@lody.app", Some(TargetLanguage::Japanese))
            .await
            .unwrap();

        assert_eq!(record.email, "fan@lody.app");
        assert_eq!(record.target_language, Some(TargetLanguage::Japanese));
        assert!(record.newly_created);
    }

    #[tokio::test]
    async fn test_register_omits_missing_language() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/waitlist"))
            .and(body_json(json!({ "email": "fan@lody.app" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(record_json("fan@lody.app", false)))
            .expect(1)
            .mount(&server)
            .await;

        let record = client(&server).register("fan@lody.app", None).await.unwrap();
        assert!(!record.newly_created);
    }

    #[tokio::test]
    async fn test_bad_request_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/waitlist"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "'nope' is not a valid email address", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = client(&server).register("nope", None).await.unwrap_err();
        assert_eq!(
            err,
            RegistrationError::Rejected("'nope' is not a valid email address".to_string())
        );
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client(&server).register("fan@lody.app", None).await.unwrap_err();

        match err {
            RegistrationError::Unavailable(message) => assert!(message.contains("maintenance")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = client(&server).register("fan@lody.app", None).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(record_json("fan@lody.app", true))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client =
            RemoteRegistrationClient::new(&server.uri(), Duration::from_millis(50)).unwrap();

        let err = client.register("fan@lody.app", None).await.unwrap_err();
        assert_eq!(err, RegistrationError::TimedOut);
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let client =
            RemoteRegistrationClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        let err = client.register("fan@lody.app", None).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Unavailable(_) | RegistrationError::TimedOut));
    }
}
