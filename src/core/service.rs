use crate::core::{decoder, inspector, RequestExecutor};
use crate::domain::model::{Credential, Inspection, QueryParameters, Retrieval};
use crate::domain::ports::ApodSource;
use crate::utils::error::{ExplorerError, Result};
use async_trait::async_trait;

/// Runs one APOD request through query, execute, inspect and decode.
///
/// Holds the credential resolved at startup; everything else is per call.
#[derive(Debug, Clone)]
pub struct ApodService {
    executor: RequestExecutor,
    credential: Credential,
    high_definition: bool,
}

impl ApodService {
    pub fn new(executor: RequestExecutor, credential: Credential, high_definition: bool) -> Self {
        Self {
            executor,
            credential,
            high_definition,
        }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Date used when the caller does not name one.
    pub fn todays_date() -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }

    fn parameters_for(&self, date: Option<&str>) -> QueryParameters {
        let date = match date.map(str::trim) {
            Some(date) if !date.is_empty() => date.to_string(),
            _ => Self::todays_date(),
        };
        QueryParameters::new(self.credential.clone(), date, self.high_definition)
    }
}

#[async_trait]
impl ApodSource for ApodService {
    async fn fetch(&self, date: Option<&str>) -> Result<Retrieval> {
        let params = self.parameters_for(date);
        tracing::info!(
            "URL query: date: {} HD: {} external API path: {}",
            params.date,
            params.high_definition,
            self.executor.endpoint_path()
        );

        let response = self.executor.execute(&params.into_query_string()).await?;
        let inspection = inspector::inspect(response);

        if !inspection.is_success() {
            return Err(upstream_error(&inspection));
        }

        let record = decoder::decode(&inspection.body)?;
        tracing::debug!("Decoded APOD record {:?} ({})", record.title, record.date);

        Ok(Retrieval {
            record,
            rate_limit: inspection.rate_limit,
            field_names: inspection.field_names,
        })
    }
}

/// The APOD API reports errors as `{"msg": ..}` or `{"error": {"message": ..}}`.
fn upstream_error(inspection: &Inspection) -> ExplorerError {
    let message = serde_json::from_slice::<serde_json::Value>(&inspection.body)
        .ok()
        .and_then(|value| {
            value
                .get("msg")
                .and_then(|m| m.as_str())
                .or_else(|| value.pointer("/error/message").and_then(|m| m.as_str()))
                .map(str::to_string)
        })
        .unwrap_or_else(|| "no error message".to_string());

    tracing::warn!(
        "❌ Upstream rejected the request with status {}: {}",
        inspection.status,
        message
    );

    ExplorerError::UpstreamError {
        status: inspection.status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::DEFAULT_TIMEOUT;
    use httpmock::prelude::*;

    fn service_for(server: &MockServer) -> ApodService {
        let executor = RequestExecutor::new(&server.url("/planetary/apod"), DEFAULT_TIMEOUT).unwrap();
        ApodService::new(executor, Credential::new("test-key"), true)
    }

    #[tokio::test]
    async fn test_empty_date_uses_today() {
        let server = MockServer::start();
        let today = ApodService::todays_date();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/planetary/apod")
                .query_param("date", today.as_str());
            then.status(200).json_body(serde_json::json!({
                "date": today.as_str(),
                "explanation": "E",
                "media_type": "image",
                "title": "Today",
                "url": "http://x"
            }));
        });

        let service = service_for(&server);
        let retrieval = service.fetch(Some("  ")).await.unwrap();

        api_mock.assert();
        assert_eq!(retrieval.record.title, "Today");
    }

    #[tokio::test]
    async fn test_each_request_uses_its_own_date() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET).query_param("date", "2001-01-01");
            then.status(200).json_body(serde_json::json!({
                "date": "2001-01-01", "explanation": "E", "media_type": "image",
                "title": "First", "url": "http://x"
            }));
        });
        let second = server.mock(|when, then| {
            when.method(GET).query_param("date", "2002-02-02");
            then.status(200).json_body(serde_json::json!({
                "date": "2002-02-02", "explanation": "E", "media_type": "image",
                "title": "Second", "url": "http://y"
            }));
        });

        let service = service_for(&server);
        assert_eq!(service.fetch(Some("2001-01-01")).await.unwrap().record.title, "First");
        assert_eq!(service.fetch(Some("2002-02-02")).await.unwrap().record.title, "Second");

        first.assert();
        second.assert();
        assert_eq!(service.executor().calls(), 2);
    }

    #[tokio::test]
    async fn test_upstream_error_status_surfaces_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/planetary/apod");
            then.status(400).json_body(serde_json::json!({
                "code": 400,
                "msg": "Date must be between Jun 16, 1995 and today.",
                "service_version": "v1"
            }));
        });

        let err = service_for(&server).fetch(Some("1900-01-01")).await.unwrap_err();

        match err {
            ExplorerError::UpstreamError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("Date must be between"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_error_shape() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/planetary/apod");
            then.status(429).json_body(serde_json::json!({
                "error": {"code": "OVER_RATE_LIMIT", "message": "You have exceeded your rate limit."}
            }));
        });

        let err = service_for(&server).fetch(Some("2020-07-04")).await.unwrap_err();
        assert!(matches!(
            err,
            ExplorerError::UpstreamError { status: 429, ref message } if message.contains("rate limit")
        ));
    }

    #[tokio::test]
    async fn test_decode_failure_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/planetary/apod");
            then.status(200).json_body(serde_json::json!({
                "date": "2020-07-04", "explanation": "E", "media_type": "image", "url": "http://x"
            }));
        });

        let err = service_for(&server).fetch(Some("2020-07-04")).await.unwrap_err();
        assert!(matches!(err, ExplorerError::DecodeError(_)));
    }
}
