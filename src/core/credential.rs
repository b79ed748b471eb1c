use crate::core::executor::RequestExecutor;
use crate::domain::model::Credential;

/// Checks a user supplied API key once at startup.
///
/// Invalid or unverifiable keys are never fatal: the validator degrades to
/// `DEMO_KEY` and the service keeps running on the lower quota.
pub struct CredentialValidator<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> CredentialValidator<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn resolve(&self, supplied: &str) -> Credential {
        let supplied = supplied.trim();
        tracing::debug!("# of chars in supplied key: {}", supplied.len());

        if supplied.is_empty() {
            tracing::info!("🔑 No API key supplied, using DEMO_KEY");
            return Credential::demo();
        }

        let candidate = Credential::new(supplied);
        match self.executor.probe(&candidate).await {
            Ok(200) => {
                tracing::info!("✅ API key accepted by {}", self.executor.endpoint_path());
                candidate
            }
            Ok(status) => {
                tracing::warn!(
                    "⚠️ API key rejected (response status code: {}). DEMO_KEY will be used instead.",
                    status
                );
                Credential::demo()
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Could not verify API key ({}). DEMO_KEY will be used instead.",
                    e
                );
                Credential::demo()
            }
        }
    }
}
