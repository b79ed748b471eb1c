use crate::core::query;
use crate::domain::model::{Credential, UpstreamResponse};
use crate::utils::error::{ExplorerError, Result};
use crate::utils::monitor::QueryCounter;
use reqwest::Client;
use std::collections::HashMap;
use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Issues GET requests against the APOD endpoint.
///
/// Cloning shares the connection pool and the query counter.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    endpoint_path: String,
    counter: Arc<QueryCounter>,
}

impl RequestExecutor {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.trim().to_string();
        let parsed = Url::parse(&endpoint).map_err(|e| ExplorerError::InvalidConfigValueError {
            field: "api_endpoint".to_string(),
            value: endpoint.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(format!("apod-explorer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExplorerError::ConfigError {
                field: "http_client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint_path: strip_to_path(&parsed),
            counter: Arc::new(QueryCounter::new()),
        })
    }

    /// Scheme, host and path of the upstream. Never contains the api key.
    ///
    /// Any query or userinfo in the configured endpoint is dropped here and on the wire.
    pub fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }

    /// Number of upstream calls attempted so far, probes included.
    pub fn calls(&self) -> u64 {
        self.counter.get()
    }

    pub fn counter(&self) -> &QueryCounter {
        &self.counter
    }

    /// Sends `GET <endpoint><query>` and reads the whole body.
    pub async fn execute(&self, query: &str) -> Result<UpstreamResponse> {
        let run = self.counter.increment();
        tracing::info!("🚀 Run query #{} -->", run);
        tracing::debug!("External API path: {}", self.endpoint_path);

        let response = self
            .client
            .get(format!("{}{}", self.endpoint_path, query))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }

        // The connection goes back to the pool once `bytes` consumes the response.
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        tracing::debug!(
            "Upstream answered {} with {} bytes",
            status,
            body.len()
        );

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }

    /// One-shot key check. Returns the HTTP status of `GET <endpoint>?api_key=<key>`.
    pub async fn probe(&self, credential: &Credential) -> Result<u16> {
        let response = self.execute(&query::build_probe(credential)).await?;
        Ok(response.status)
    }

    fn classify(&self, err: reqwest::Error) -> ExplorerError {
        // reqwest puts the full URL (api key included) into its Display output.
        let err = err.without_url();
        let message = describe(&err);

        if err.is_timeout() {
            ExplorerError::NetworkError {
                endpoint: self.endpoint_path.clone(),
                message,
                timed_out: true,
            }
        } else if err.is_connect() {
            ExplorerError::NetworkError {
                endpoint: self.endpoint_path.clone(),
                message,
                timed_out: false,
            }
        } else {
            ExplorerError::ProtocolError {
                endpoint: self.endpoint_path.clone(),
                message,
            }
        }
    }
}

fn strip_to_path(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.to_string()
}

fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
