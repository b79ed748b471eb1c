use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Network error calling {endpoint}: {message}")]
    NetworkError {
        endpoint: String,
        message: String,
        timed_out: bool,
    },

    #[error("Protocol error from {endpoint}: {message}")]
    ProtocolError { endpoint: String, message: String },

    #[error("Failed to decode APOD record: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a run that ended with an error of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl ExplorerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkError { .. } => ErrorCategory::Network,
            Self::ProtocolError { .. } | Self::UpstreamError { .. } => ErrorCategory::Upstream,
            Self::DecodeError(_) => ErrorCategory::Data,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 上游暫時性問題，呼叫端可以稍後重試
            Self::NetworkError { .. } | Self::UpstreamError { .. } => ErrorSeverity::Medium,
            Self::ProtocolError { .. } | Self::DecodeError(_) => ErrorSeverity::High,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    /// True when the upstream call ran out of time rather than failing outright.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NetworkError { timed_out: true, .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NetworkError { timed_out: true, .. } => {
                "The APOD service did not answer in time.".to_string()
            }
            Self::NetworkError { .. } => "Could not reach the APOD service.".to_string(),
            Self::ProtocolError { .. } => {
                "The APOD service sent a response that could not be read.".to_string()
            }
            Self::DecodeError(_) => {
                "The APOD service returned a record in an unexpected format.".to_string()
            }
            Self::UpstreamError { status, message } => {
                format!("The APOD service refused the request ({status}): {message}")
            }
            Self::IoError(e) => format!("A local I/O operation failed: {e}"),
            Self::ConfigError { field, message } => format!("Invalid configuration ({field}): {message}"),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration value for {field}: {reason}")
            }
            Self::ServerError { message } => format!("The web server failed: {message}"),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NetworkError { timed_out: true, .. } => {
                "Try again later or raise --timeout-secs"
            }
            Self::NetworkError { .. } => "Check your network connection and the --api-endpoint value",
            Self::ProtocolError { .. } => "Verify that --api-endpoint points at the APOD API",
            Self::DecodeError(_) => "Try another date; the upstream record may be incomplete",
            Self::UpstreamError { status: 429, .. } => {
                "The hourly rate limit is exhausted; use a personal API key or wait an hour"
            }
            Self::UpstreamError { .. } => "Check the requested date (YYYY-MM-DD, not in the future)",
            Self::IoError(_) => "Check file permissions and paths",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value and restart"
            }
            Self::ServerError { .. } => "Make sure the bind address is free and reachable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
